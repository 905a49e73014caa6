//! Affine gap scoring of a read against a genome at a fixed offset.
//!
//! The scorer runs every frame, so it is a single left-to-right pass with no
//! allocation beyond the accumulator.

use crate::types::{AlignmentScore, Base, Genome, Read};
use serde::{Deserialize, Serialize};

pub const MATCH: i32 = 1;
pub const MISMATCH: i32 = -1;
pub const GAP_OPENING: i32 = -2;
pub const GAP_EXTENSION: i32 = -1;

/// Per-column contributions of the affine gap model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Added for a base equal to the genome column
    pub match_score: i32,
    /// Added for a base different from the genome column
    pub mismatch: i32,
    /// Added for the first gap of a run
    pub gap_opening: i32,
    /// Added for every further gap of a run
    pub gap_extension: i32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            match_score: MATCH,
            mismatch: MISMATCH,
            gap_opening: GAP_OPENING,
            gap_extension: GAP_EXTENSION,
        }
    }
}

/// Column counts behind a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub matches: u32,
    pub mismatches: u32,
    pub gap_openings: u32,
    pub gap_extensions: u32,
}

impl ScoreBreakdown {
    pub fn total(&self, params: &ScoringParams) -> i32 {
        self.matches as i32 * params.match_score
            + self.mismatches as i32 * params.mismatch
            + self.gap_openings as i32 * params.gap_opening
            + self.gap_extensions as i32 * params.gap_extension
    }

    /// Gap symbols counted, whether opening or extending a run
    pub fn gaps(&self) -> u32 {
        self.gap_openings + self.gap_extensions
    }
}

/// Returns the aligned genome slice, or `None` when the read overhangs the genome.
#[inline]
fn aligned_window<'g>(read: &[Base], genome: &'g [Base], offset: usize) -> Option<&'g [Base]> {
    let end = offset.checked_add(read.len())?;
    genome.get(offset..end)
}

impl ScoringParams {
    /// Score `read` placed at `offset` on `genome`.
    pub fn score(&self, read: &Read, genome: &Genome, offset: usize) -> AlignmentScore {
        self.score_bases(read.bases(), genome.bases(), offset)
    }

    pub fn score_bases(&self, read: &[Base], genome: &[Base], offset: usize) -> AlignmentScore {
        let Some(window) = aligned_window(read, genome, offset) else {
            return AlignmentScore::Unscoreable;
        };

        let mut total = 0i32;
        let mut in_gap = false;
        for (&base, &reference) in read.iter().zip(window) {
            if base.is_gap() {
                if in_gap {
                    total += self.gap_extension;
                } else {
                    total += self.gap_opening;
                    in_gap = true;
                }
            } else {
                in_gap = false;
                total += if base == reference { self.match_score } else { self.mismatch };
            }
        }

        AlignmentScore::Valid(total)
    }
}

/// Score with the default constants
pub fn score(read: &Read, genome: &Genome, offset: usize) -> AlignmentScore {
    ScoringParams::default().score(read, genome, offset)
}

/// Count matches, mismatches and gap columns under the same bounds rule as [`score`].
pub fn breakdown(read: &Read, genome: &Genome, offset: usize) -> Option<ScoreBreakdown> {
    let window = aligned_window(read.bases(), genome.bases(), offset)?;

    let mut counts = ScoreBreakdown::default();
    let mut in_gap = false;
    for (&base, &reference) in read.bases().iter().zip(window) {
        match (base.is_gap(), in_gap) {
            (true, true) => counts.gap_extensions += 1,
            (true, false) => {
                counts.gap_openings += 1;
                in_gap = true;
            }
            (false, _) => {
                in_gap = false;
                if base == reference {
                    counts.matches += 1;
                } else {
                    counts.mismatches += 1;
                }
            }
        }
    }

    Some(counts)
}
