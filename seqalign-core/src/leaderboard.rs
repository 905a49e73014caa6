//! Fixed-capacity high score table.

use crate::types::AlignmentScore;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_CAPACITY: usize = 10;
pub const MAX_NAME_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: i32,
    /// Seconds taken, never negative
    pub time: f64,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: i32, time: f64) -> Self {
        Self {
            name: name.chars().take(MAX_NAME_LEN).collect(),
            score,
            time: time.max(0.0),
        }
    }

    /// Ranking order: higher score, then lower time, then name
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.time.total_cmp(&other.time))
            .then_with(|| self.name.cmp(&other.name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<LeaderboardEntry>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    /// Board pre-seeded with the house record to beat
    pub fn with_house_entry() -> Self {
        Self::default().seeded_with_house_entry()
    }

    /// Add the house record to an existing board
    pub fn seeded_with_house_entry(mut self) -> Self {
        self.submit_entry("BLAST", 50, 0.2);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Lowest kept entry
    pub fn lowest(&self) -> Option<&LeaderboardEntry> {
        self.entries.last()
    }

    /// Whether a finished round earns a place on the board
    pub fn qualifies(&self, score: AlignmentScore, time: f64) -> bool {
        let Some(score) = score.value() else {
            return false;
        };
        if self.capacity == 0 {
            return false;
        }
        match self.lowest() {
            Some(lowest) if self.is_full() => {
                score > lowest.score || (score == lowest.score && time < lowest.time)
            }
            _ => true,
        }
    }

    /// Insert, re-rank and drop whatever falls past capacity.
    ///
    /// Returns the entry's 0-based rank, or `None` if it did not survive.
    pub fn submit_entry(&mut self, name: &str, score: i32, time: f64) -> Option<usize> {
        let entry = LeaderboardEntry::new(name, score, time);
        let position = self
            .entries
            .iter()
            .position(|existing| entry.rank_cmp(existing) == Ordering::Less)
            .unwrap_or(self.entries.len());

        self.entries.insert(position, entry);
        self.entries.truncate(self.capacity);

        if position < self.entries.len() {
            Some(position)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_ten_best_of_eleven() {
        let mut board = Leaderboard::default();
        for score in [5, 12, -3, 40, 7, 22, 1, 18, 9, 30, 2] {
            board.submit_entry("p", score, 1.0);
        }
        let scores: Vec<i32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![40, 30, 22, 18, 12, 9, 7, 5, 2, 1]);
    }

    #[test]
    fn test_tiebreak_on_time_then_name() {
        let mut board = Leaderboard::default();
        board.submit_entry("zed", 10, 3.0);
        board.submit_entry("amy", 10, 3.0);
        board.submit_entry("bob", 10, 1.5);
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["bob", "amy", "zed"]);
    }

    #[test]
    fn test_rank_returned_or_dropped() {
        let mut board = Leaderboard::new(2);
        assert_eq!(board.submit_entry("a", 5, 1.0), Some(0));
        assert_eq!(board.submit_entry("b", 9, 1.0), Some(0));
        assert_eq!(board.submit_entry("c", 1, 1.0), None);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_name_truncated_and_time_clamped() {
        let mut board = Leaderboard::default();
        board.submit_entry("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 3, -2.0);
        let entry = &board.entries()[0];
        assert_eq!(entry.name, "ABCDEFGHIJKLMNO");
        assert_eq!(entry.time, 0.0);
    }

    #[test]
    fn test_qualifies_rules() {
        let mut board = Leaderboard::new(2);
        assert!(board.qualifies(AlignmentScore::Valid(-100), 99.0));
        assert!(!board.qualifies(AlignmentScore::Unscoreable, 0.0));

        board.submit_entry("a", 10, 5.0);
        board.submit_entry("b", 4, 5.0);
        assert!(board.qualifies(AlignmentScore::Valid(5), 50.0));
        assert!(board.qualifies(AlignmentScore::Valid(4), 4.9));
        assert!(!board.qualifies(AlignmentScore::Valid(4), 5.0));
        assert!(!board.qualifies(AlignmentScore::Valid(3), 0.1));
    }

    #[test]
    fn test_house_entry() {
        let board = Leaderboard::with_house_entry();
        assert_eq!(board.len(), 1);
        assert_eq!(board.entries()[0].name, "BLAST");
        assert_eq!(board.entries()[0].score, 50);
    }

    #[test]
    fn test_unbounded_capacity() {
        let mut board = Leaderboard::new(usize::MAX).seeded_with_house_entry();
        assert!(!board.is_full());
        assert_eq!(board.submit_entry("ada", 60, 9.0), Some(0));
        assert_eq!(board.len(), 2);
    }
}
