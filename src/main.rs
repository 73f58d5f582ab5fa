//! Terminal host for the falling-block engine.
//!
//! Wires the pieces together: a session with a file-backed high score, the
//! engine with its gravity thread, crossterm input, and the frame renderer.
//! Gravity runs on the engine's driver thread at the session's fall period;
//! this thread only pumps input and redraws.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use gridfall::core::{GameConfig, Session, Snapshot};
use gridfall::engine::{Engine, FileHighScores};
use gridfall::input::{map_key, should_quit};
use gridfall::term::{Frame, GameView, TerminalRenderer};

const HIGH_SCORE_FILE: &str = "high_score.txt";
const FRAME_MS: u64 = 33;

fn main() -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1);

    let session = Session::new(
        GameConfig::default(),
        seed,
        Box::new(FileHighScores::new(HIGH_SCORE_FILE)),
    );
    let engine = Engine::new(session);
    let driver = engine.spawn_driver();
    engine.start();

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&engine, &mut term);
    let _ = term.exit();

    engine.shutdown();
    driver.join();

    // Final stats once the terminal is back to normal.
    let snapshot = engine.snapshot();
    println!(
        "Finished: {} lines, level {}, {} points (high score {}).",
        snapshot.lines, snapshot.level, snapshot.score, snapshot.high_score
    );

    result
}

fn run(engine: &Engine, term: &mut TerminalRenderer) -> Result<()> {
    let view = GameView;
    let mut snapshot = Snapshot::default();
    let mut frame = Frame::new(1, 1);

    loop {
        engine.snapshot_into(&mut snapshot);
        view.render(&snapshot, &mut frame);
        term.draw(&frame)?;

        if event::poll(Duration::from_millis(FRAME_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = map_key(key) {
                        engine.apply(command);
                    }
                }
            }
        }
    }
}
