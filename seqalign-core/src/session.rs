//! Mutable state of one puzzle round and the edit operations on it.
//!
//! Every edit validates its bounds first and returns `false` without touching
//! state when they do not hold. Edits are only accepted while the round is
//! [`SessionStatus::Playing`].

use crate::clock::{Clock, SystemClock};
use crate::generator::{Generator, GeneratorResult, Puzzle};
use crate::leaderboard::{Leaderboard, MAX_NAME_LEN};
use crate::optimal::{OptimalAligner, OptimalAlignment};
use crate::scoring::{breakdown, ScoreBreakdown, ScoringParams};
use crate::types::{AlignmentScore, Base, Genome, Read};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Playing,
    /// Transient while a submission is being ranked
    Scoring,
    Won,
    Lost,
}

/// Score and time frozen at submission
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub score: AlignmentScore,
    pub time: f64,
}

/// Add a signed step to `value`, clamped to `[0, max]`
fn step_clamped(value: usize, delta: isize, max: usize) -> usize {
    let moved = if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    };
    moved.min(max)
}

pub struct EditSession<C: Clock = SystemClock> {
    generator: Generator,
    scoring: ScoringParams,
    aligner: OptimalAligner,
    clock: C,

    genome: Genome,
    puzzle: Puzzle,
    read: Read,
    offset: usize,
    cursor: Option<usize>,
    status: SessionStatus,
    round_started: f64,
    result: Option<RoundResult>,
    hint_visible: bool,

    name: String,
    name_entry: bool,
}

impl<C: Clock> EditSession<C> {
    /// Start a session with a freshly generated round
    pub fn new(mut generator: Generator, clock: C) -> GeneratorResult<Self> {
        let (genome, puzzle) = generator.generate_round()?;
        Ok(Self::from_round(generator, clock, genome, puzzle))
    }

    /// Start a session on an existing genome and puzzle
    pub fn from_round(generator: Generator, clock: C, genome: Genome, puzzle: Puzzle) -> Self {
        let round_started = clock.now_secs();
        log::info!(
            "Round started: genome of {} bases, read of {} bases",
            genome.len(),
            puzzle.read.len()
        );
        Self {
            generator,
            scoring: ScoringParams::default(),
            aligner: OptimalAligner::default(),
            clock,
            read: puzzle.read.clone(),
            genome,
            puzzle,
            offset: 0,
            cursor: None,
            status: SessionStatus::Playing,
            round_started,
            result: None,
            hint_visible: false,
            name: String::new(),
            name_entry: false,
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringParams) -> Self {
        self.scoring = scoring;
        self.aligner = OptimalAligner::new(scoring).with_assumed_gaps(self.aligner.assumed_gaps());
        self
    }

    pub fn with_aligner(mut self, aligner: OptimalAligner) -> Self {
        self.aligner = aligner;
        self
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn read(&self) -> &Read {
        &self.read
    }

    /// The generated puzzle this round started from
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn scoring(&self) -> &ScoringParams {
        &self.scoring
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_entry_active(&self) -> bool {
        self.name_entry
    }

    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    /// Seconds since the round started, frozen once submitted
    pub fn elapsed(&self) -> f64 {
        match self.result {
            Some(result) => result.time,
            None => (self.clock.now_secs() - self.round_started).max(0.0),
        }
    }

    pub fn current_score(&self) -> AlignmentScore {
        self.scoring.score(&self.read, &self.genome, self.offset)
    }

    pub fn current_breakdown(&self) -> Option<ScoreBreakdown> {
        breakdown(&self.read, &self.genome, self.offset)
    }

    /// Optimal alignment of the current read, when the hint is switched on
    pub fn hint(&self) -> Option<OptimalAlignment> {
        if !self.hint_visible {
            return None;
        }
        self.aligner.find_optimal(&self.read, &self.genome)
    }

    /// Read index under `cursor` if it may be edited. The last read position
    /// is never editable.
    fn editable_index(&self, cursor: usize) -> Option<usize> {
        cursor
            .checked_sub(self.offset)
            .filter(|&k| k + 1 < self.read.len())
    }

    pub fn insert_gap_at(&mut self, cursor: usize) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(k) = self.editable_index(cursor) else {
            log::debug!("Gap insert rejected: cursor {} outside editable range", cursor);
            return false;
        };
        if self.offset + self.read.len() + 1 > self.genome.len() {
            log::debug!("Gap insert rejected: read would overhang the genome");
            return false;
        }
        self.read.insert(k, Base::Gap);
        true
    }

    pub fn delete_gap_at(&mut self, cursor: usize) -> bool {
        if !self.is_playing() {
            return false;
        }
        match self.editable_index(cursor) {
            Some(k) if self.read.get(k) == Some(Base::Gap) => {
                self.read.remove(k);
                true
            }
            _ => {
                log::debug!("Gap delete rejected at cursor {}", cursor);
                false
            }
        }
    }

    /// Insert a gap under the session cursor
    pub fn insert_gap(&mut self) -> bool {
        match self.cursor {
            Some(cursor) => self.insert_gap_at(cursor),
            None => false,
        }
    }

    /// Delete the gap under the session cursor
    pub fn delete_gap(&mut self) -> bool {
        match self.cursor {
            Some(cursor) => self.delete_gap_at(cursor),
            None => false,
        }
    }

    pub fn move_offset(&mut self, delta: isize) -> bool {
        if !self.is_playing() {
            return false;
        }
        let max_offset = self.genome.len().saturating_sub(self.read.len());
        let next = step_clamped(self.offset, delta, max_offset);
        let changed = next != self.offset;
        self.offset = next;
        changed
    }

    /// Move the cursor by `delta` genome columns.
    ///
    /// A cursor that is unset or outside the read's span enters the read at
    /// its first column when moving right and at its last column when moving
    /// left.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        if !self.is_playing() || delta == 0 {
            return false;
        }
        let last_column = self.genome.len() - 1;
        let span = self.offset..self.offset + self.read.len();
        let next = match self.cursor {
            Some(cursor) if span.contains(&cursor) => step_clamped(cursor, delta, last_column),
            _ if delta > 0 => self.offset.min(last_column),
            _ => (span.end.saturating_sub(1)).min(last_column),
        };
        let changed = self.cursor != Some(next);
        self.cursor = Some(next);
        changed
    }

    pub fn toggle_hint(&mut self) -> bool {
        self.hint_visible = !self.hint_visible;
        true
    }

    /// Freeze the round and rank it against `leaderboard`.
    ///
    /// Returns `None` when the round was not being played.
    pub fn submit(&mut self, leaderboard: &Leaderboard) -> Option<RoundResult> {
        if !self.is_playing() {
            return None;
        }
        let time = self.elapsed();
        self.status = SessionStatus::Scoring;
        let result = RoundResult {
            score: self.current_score(),
            time,
        };
        self.result = Some(result);

        if leaderboard.qualifies(result.score, result.time) {
            self.status = SessionStatus::Won;
            self.name_entry = true;
        } else {
            self.status = SessionStatus::Lost;
        }
        log::info!(
            "Round submitted: score {} in {:.2}s ({:?})",
            result.score,
            result.time,
            self.status
        );
        Some(result)
    }

    pub fn push_name_char(&mut self, c: char) -> bool {
        if !self.name_entry || c.is_control() || self.name.chars().count() >= MAX_NAME_LEN {
            return false;
        }
        self.name.push(c);
        true
    }

    pub fn pop_name_char(&mut self) -> bool {
        self.name_entry && self.name.pop().is_some()
    }

    /// Record the won round under the typed name. Entry closes afterwards.
    pub fn commit_name(&mut self, leaderboard: &mut Leaderboard) -> Option<usize> {
        if !self.name_entry || self.name.is_empty() {
            return None;
        }
        let result = self.result?;
        let score = result.score.value()?;
        self.name_entry = false;
        leaderboard.submit_entry(&self.name, score, result.time)
    }

    /// Generate a new round and reset all per-round state
    pub fn restart(&mut self) -> GeneratorResult<()> {
        let (genome, puzzle) = self.generator.generate_round()?;
        log::info!("Restarting round");
        self.read = puzzle.read.clone();
        self.genome = genome;
        self.puzzle = puzzle;
        self.offset = 0;
        self.cursor = None;
        self.status = SessionStatus::Playing;
        self.round_started = self.clock.now_secs();
        self.result = None;
        self.hint_visible = false;
        self.name.clear();
        self.name_entry = false;
        Ok(())
    }
}
