//! Frame-step façade over one edit session and the process-wide leaderboard.
//!
//! Hosts translate their input devices into [`Intent`]s, call
//! [`Game::apply`] for each, and draw from [`Game::snapshot`].

use crate::clock::{Clock, SystemClock};
use crate::generator::GeneratorResult;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::optimal::OptimalAlignment;
use crate::scoring::ScoreBreakdown;
use crate::session::{EditSession, RoundResult, SessionStatus};
use crate::types::AlignmentScore;
use serde::Serialize;

/// Discrete, already-debounced player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    InsertGap,
    DeleteGap,
    MoveOffset(isize),
    MoveCursor(isize),
    Submit,
    Restart,
    ToggleHint,
    NameChar(char),
    NameBackspace,
    NameCommit,
}

/// Read-only view of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub genome: String,
    pub read: String,
    pub offset: usize,
    pub cursor: Option<usize>,
    pub status: SessionStatus,
    pub elapsed: f64,
    pub score: AlignmentScore,
    pub breakdown: Option<ScoreBreakdown>,
    pub hint: Option<OptimalAlignment>,
    pub result: Option<RoundResult>,
    pub name: String,
    pub name_entry: bool,
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub struct Game<C: Clock = SystemClock> {
    session: EditSession<C>,
    leaderboard: Leaderboard,
}

impl<C: Clock> Game<C> {
    pub fn new(session: EditSession<C>, leaderboard: Leaderboard) -> Self {
        Self { session, leaderboard }
    }

    pub fn session(&self) -> &EditSession<C> {
        &self.session
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Apply one intent. Returns whether any state changed.
    pub fn apply(&mut self, intent: Intent) -> GeneratorResult<bool> {
        let changed = match intent {
            Intent::InsertGap => self.session.insert_gap(),
            Intent::DeleteGap => self.session.delete_gap(),
            Intent::MoveOffset(delta) => self.session.move_offset(delta),
            Intent::MoveCursor(delta) => self.session.move_cursor(delta),
            Intent::Submit => self.session.submit(&self.leaderboard).is_some(),
            Intent::Restart => {
                self.session.restart()?;
                true
            }
            Intent::ToggleHint => self.session.toggle_hint(),
            Intent::NameChar(c) => self.session.push_name_char(c),
            Intent::NameBackspace => self.session.pop_name_char(),
            Intent::NameCommit => {
                // True once a non-empty name closed the entry, whether or not
                // the result still had a place on the board
                let was_open = self.session.name_entry_active();
                self.session.commit_name(&mut self.leaderboard);
                was_open && !self.session.name_entry_active()
            }
        };
        Ok(changed)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let session = &self.session;
        GameSnapshot {
            genome: session.genome().to_string(),
            read: session.read().to_string(),
            offset: session.offset(),
            cursor: session.cursor(),
            status: session.status(),
            elapsed: session.elapsed(),
            score: session.current_score(),
            breakdown: session.current_breakdown(),
            hint: session.hint(),
            result: session.result(),
            name: session.name().to_string(),
            name_entry: session.name_entry_active(),
            leaderboard: self.leaderboard.entries().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::generator::{Generator, PuzzleParams};

    fn game(clock: &ManualClock) -> Game<ManualClock> {
        let generator = Generator::new(PuzzleParams {
            deterministic_seed: Some(21),
            ..Default::default()
        })
        .unwrap();
        let session = EditSession::new(generator, clock.clone()).unwrap();
        Game::new(session, Leaderboard::with_house_entry())
    }

    #[test]
    fn test_full_round_reaches_leaderboard() {
        let clock = ManualClock::new();
        let mut game = game(&clock);

        assert!(game.apply(Intent::MoveCursor(1)).unwrap());
        assert!(game.apply(Intent::MoveCursor(1)).unwrap());
        assert!(game.apply(Intent::InsertGap).unwrap());
        clock.advance(8.0);
        assert!(game.apply(Intent::Submit).unwrap());

        let snapshot = game.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Won);
        assert!(snapshot.name_entry);

        for c in "ada".chars() {
            game.apply(Intent::NameChar(c)).unwrap();
        }
        assert!(game.apply(Intent::NameBackspace).unwrap());
        assert!(game.apply(Intent::NameCommit).unwrap());

        let snapshot = game.snapshot();
        assert_eq!(snapshot.leaderboard.len(), 2);
        assert!(snapshot.leaderboard.iter().any(|e| e.name == "ad" && e.time == 8.0));
        assert!(!snapshot.name_entry);
    }

    #[test]
    fn test_snapshot_reflects_edits() {
        let clock = ManualClock::new();
        let mut game = game(&clock);
        game.apply(Intent::MoveOffset(3)).unwrap();
        game.apply(Intent::ToggleHint).unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.offset, 3);
        assert_eq!(snapshot.read.len(), 50);
        assert_eq!(snapshot.genome.len(), 250);
        assert!(snapshot.hint.is_some());
        assert!(snapshot.breakdown.is_some());
        assert_eq!(snapshot.score, game.session().current_score());
    }

    #[test]
    fn test_snapshot_serializes() {
        let clock = ManualClock::new();
        let game = game(&clock);
        let json = serde_json::to_value(game.snapshot()).unwrap();

        assert_eq!(json["status"], "Playing");
        assert_eq!(json["offset"], 0);
        assert!(json["cursor"].is_null());
        assert_eq!(json["leaderboard"][0]["name"], "BLAST");
    }

    #[test]
    fn test_empty_name_commit_keeps_entry_open() {
        let clock = ManualClock::new();
        let mut game = game(&clock);
        game.apply(Intent::Submit).unwrap();
        assert!(game.snapshot().name_entry);

        assert!(!game.apply(Intent::NameCommit).unwrap());
        assert!(game.snapshot().name_entry);
        assert_eq!(game.leaderboard().len(), 1);

        game.apply(Intent::NameChar('z')).unwrap();
        assert!(game.apply(Intent::NameCommit).unwrap());
        assert!(!game.snapshot().name_entry);
    }

    #[test]
    fn test_restart_intent() {
        let clock = ManualClock::new();
        let mut game = game(&clock);
        game.apply(Intent::Submit).unwrap();
        assert!(!game.apply(Intent::MoveOffset(1)).unwrap());
        assert!(game.apply(Intent::Restart).unwrap());
        assert_eq!(game.snapshot().status, SessionStatus::Playing);
        assert!(game.apply(Intent::MoveOffset(1)).unwrap());
    }
}
