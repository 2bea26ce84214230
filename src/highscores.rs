//! High score leaderboard
//!
//! Top 10 runs per game mode, persisted inside the player profile.

use serde::{Deserialize, Serialize};

use crate::sim::GameMode;

/// Maximum number of entries kept per mode
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub mode: GameMode,
    /// Best combo reached during the run
    pub max_combo: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries for one mode, best first
    pub fn for_mode(&self, mode: GameMode) -> impl Iterator<Item = &HighScoreEntry> {
        self.entries.iter().filter(move |e| e.mode == mode)
    }

    /// Check if a score makes the given mode's board
    pub fn qualifies(&self, score: u32, mode: GameMode) -> bool {
        if score == 0 {
            return false;
        }
        let mut board = self.for_mode(mode);
        match board.nth(MAX_HIGH_SCORES - 1) {
            Some(lowest) => score > lowest.score,
            None => true,
        }
    }

    /// Rank a score would achieve in its mode (1-indexed)
    pub fn potential_rank(&self, score: u32, mode: GameMode) -> Option<usize> {
        if !self.qualifies(score, mode) {
            return None;
        }
        Some(self.for_mode(mode).filter(|e| e.score >= score).count() + 1)
    }

    /// Add a finished run. Returns the rank achieved within its mode.
    pub fn add_score(
        &mut self,
        score: u32,
        mode: GameMode,
        max_combo: u32,
        timestamp: f64,
    ) -> Option<usize> {
        let rank = self.potential_rank(score, mode)?;

        let entry = HighScoreEntry {
            score,
            mode,
            max_combo,
            timestamp,
        };

        // Ties keep the older entry first
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        // Drop whatever fell off the bottom of this mode's board
        let mut seen = 0;
        self.entries.retain(|e| {
            if e.mode != mode {
                return true;
            }
            seen += 1;
            seen <= MAX_HIGH_SCORES
        });

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score across all modes
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best score in one mode
    pub fn best_for(&self, mode: GameMode) -> Option<u32> {
        self.for_mode(mode).next().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0, GameMode::Classic));
        assert!(scores.qualifies(1, GameMode::Classic));
    }

    #[test]
    fn test_sorted_insert_and_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(10, GameMode::Classic, 2, 0.0), Some(1));
        assert_eq!(scores.add_score(30, GameMode::Classic, 5, 1.0), Some(1));
        assert_eq!(scores.add_score(20, GameMode::Classic, 4, 2.0), Some(2));
        assert_eq!(scores.add_score(20, GameMode::Classic, 1, 3.0), Some(3));

        let order: Vec<_> = scores.entries.iter().map(|e| e.timestamp).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0, 0.0]);
        assert_eq!(scores.top_score(), Some(30));
    }

    #[test]
    fn test_boards_are_per_mode() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(100 + i, GameMode::Classic, 0, 0.0);
        }
        assert!(!scores.qualifies(50, GameMode::Classic));
        assert!(scores.qualifies(50, GameMode::Zen));

        assert_eq!(scores.add_score(5, GameMode::Zen, 0, 0.0), Some(1));
        assert_eq!(scores.best_for(GameMode::Zen), Some(5));
        assert_eq!(scores.best_for(GameMode::Hardcore), None);
    }

    #[test]
    fn test_full_board_trims_lowest() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(i * 10, GameMode::Hardcore, 0, 0.0);
        }
        scores.add_score(3, GameMode::Classic, 0, 0.0);

        assert_eq!(scores.add_score(15, GameMode::Hardcore, 0, 0.0), Some(10));
        assert_eq!(scores.for_mode(GameMode::Hardcore).count(), MAX_HIGH_SCORES);
        assert!(scores.for_mode(GameMode::Hardcore).all(|e| e.score >= 15));
        assert_eq!(scores.best_for(GameMode::Classic), Some(3));
    }
}
