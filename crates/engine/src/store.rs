//! File-backed high-score storage.
//!
//! The high score is a single integer in a plain text file. A missing or
//! unreadable file reads as 0; writes are best-effort and report success as a
//! boolean, so a full disk or bad permissions can never take the game down
//! with it.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use gridfall_core::HighScoreStore;

/// High-score store persisting to a text file.
#[derive(Debug, Clone)]
pub struct FileHighScores {
    path: PathBuf,
}

impl FileHighScores {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read(&self) -> Result<u32> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read high score from {}", self.path.display()))?;
        text.trim()
            .parse()
            .with_context(|| format!("parse high score {text:?}"))
    }

    fn write(&self, score: u32) -> Result<()> {
        fs::write(&self.path, score.to_string())
            .with_context(|| format!("write high score to {}", self.path.display()))
    }
}

impl HighScoreStore for FileHighScores {
    fn load(&self) -> u32 {
        self.read().unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> bool {
        self.write(score).is_ok()
    }
}
