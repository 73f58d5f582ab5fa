//! Terminal front-end: snapshot → character frame → screen.

pub mod renderer;
pub mod view;

pub use renderer::TerminalRenderer;
pub use view::{Frame, GameView, Glyph};
