//! The on-screen score readout.

use crate::constants::{SCORE_LEFT, SCORE_TOP};

/// Formats the score, rebuilding the text only when the value changes.
#[derive(Clone, Debug)]
pub struct ScoreDisplay {
    last_score: Option<u32>,
    text: String,
    renders: u32,
}

impl Default for ScoreDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreDisplay {
    pub fn new() -> Self {
        ScoreDisplay {
            last_score: None,
            text: String::new(),
            renders: 0,
        }
    }

    /// Bring the text up to date with `score`.
    pub fn update(&mut self, score: u32) {
        if self.last_score == Some(score) {
            return;
        }
        self.last_score = Some(score);
        self.text = format!("Score: {}", score);
        self.renders += 1;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times the text has been rebuilt.
    pub fn renders(&self) -> u32 {
        self.renders
    }

    /// Top-left corner of the readout, in playfield pixels.
    pub fn position(&self) -> (i32, i32) {
        (SCORE_LEFT, SCORE_TOP)
    }
}
