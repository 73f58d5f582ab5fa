//! Flushes a character frame to the terminal.
//!
//! Raw mode + alternate screen, full-frame redraws with queued crossterm
//! commands. The frames here are tiny (a board plus two side panels), so
//! diffing is not worth its complexity; batching everything into one write
//! per frame keeps the output tear-free.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use gridfall_types::Rgb;

use crate::view::Frame;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Enter raw mode and the alternate screen. Pair with [`Self::exit`].
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush()?;
        Ok(())
    }

    /// Restore the terminal. Safe to call even if `enter` failed midway.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw a full frame.
    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();

        let mut current: Option<Rgb> = None;
        self.buf.queue(ResetColor)?;
        for y in 0..frame.height() {
            self.buf.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..frame.width() {
                let glyph = frame.get(x, y);
                if glyph.fg != current {
                    match glyph.fg {
                        Some(rgb) => {
                            self.buf.queue(SetForegroundColor(to_color(rgb)))?;
                        }
                        None => {
                            self.buf.queue(ResetColor)?;
                        }
                    }
                    current = glyph.fg;
                }
                self.buf.queue(Print(glyph.ch))?;
            }
        }
        self.buf.queue(ResetColor)?;

        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
