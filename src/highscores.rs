//! High score leaderboard
//!
//! Tracks the best runs of the current process. Nothing is written to
//! disk; the table lives as long as the session that owns it.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub score: u64,
    /// Simulation ticks survived
    pub ticks: u64,
    /// Obstacles spawned during the run
    pub obstacles: u32,
}

/// High score leaderboard, sorted best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<RunRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or
    /// None if it didn't make the table.
    pub fn add_run(&mut self, score: u64, ticks: u64, obstacles: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let record = RunRecord {
            score,
            ticks,
            obstacles,
        };

        // Ties rank below earlier runs
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
