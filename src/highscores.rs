//! Score leaderboard
//!
//! Keeps the top 10 finished runs, persisted as JSON next to the settings
//! file. Timestamps come from the frontend; the library never reads the wall
//! clock itself.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Unix timestamp (ms) when the run ended
    pub timestamp_ms: u64,
}

/// Leaderboard, sorted descending by score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Would this score make the board?
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_some_and(|e| score > e.score)
    }

    /// Record a finished run. Returns the 1-indexed rank achieved, or `None`
    /// if the score didn't qualify.
    pub fn record(&mut self, score: u32, timestamp_ms: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let entry = HighScoreEntry {
            score,
            timestamp_ms,
        };
        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HighScoreEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".neon-strike")
                .join("highscores.json")
        })
    }

    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::new();
        };
        match fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str::<HighScores>(&json).ok())
        {
            Some(scores) => {
                log::info!("loaded {} high scores", scores.entries.len());
                scores
            }
            None => Self::new(),
        }
    }

    pub fn save(&self) {
        let Some(path) = Self::path() else { return };
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            match fs::write(&path, json) {
                Ok(()) => log::info!("high scores saved ({} entries)", self.entries.len()),
                Err(err) => log::warn!("could not save high scores: {err}"),
            }
        }
    }
}
