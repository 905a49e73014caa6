//! seqalign Core Library
//!
//! Affine gap scoring, puzzle generation, optimal offset search, edit
//! sessions and the leaderboard behind the seqalign puzzle game.

pub mod types;
pub mod scoring;
pub mod optimal;
pub mod generator;
pub mod clock;
pub mod leaderboard;
pub mod session;
pub mod game;

// Re-export commonly used types and functions
pub use types::{AlignmentScore, Base, Genome, Read, SequenceError};
pub use scoring::{breakdown, score, ScoreBreakdown, ScoringParams};
pub use optimal::{find_optimal, OptimalAligner, OptimalAlignment};
pub use generator::{Generator, GeneratorError, GeneratorResult, Puzzle, PuzzleParams};
pub use clock::{Clock, ManualClock, SystemClock};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use session::{EditSession, RoundResult, SessionStatus};
pub use game::{Game, GameSnapshot, Intent};

/// Version information for the seqalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
