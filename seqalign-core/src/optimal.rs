//! Exhaustive search for the best offset of a read on a genome.

use crate::scoring::ScoringParams;
use crate::types::{AlignmentScore, Genome, Read};
use serde::{Deserialize, Serialize};

/// Gap count every generated puzzle requires
pub const DEFAULT_ASSUMED_GAPS: usize = 4;

/// Best offset found by [`OptimalAligner::find_optimal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalAlignment {
    pub offset: usize,
    pub score: AlignmentScore,
}

/// Brute-force offset search used for hints and verification
#[derive(Debug, Clone)]
pub struct OptimalAligner {
    params: ScoringParams,
    assumed_gaps: usize,
}

impl Default for OptimalAligner {
    fn default() -> Self {
        Self::new(ScoringParams::default())
    }
}

impl OptimalAligner {
    pub fn new(params: ScoringParams) -> Self {
        Self {
            params,
            assumed_gaps: DEFAULT_ASSUMED_GAPS,
        }
    }

    /// Override the number of gap columns reserved past the end of the read.
    ///
    /// The search window is `read.len() + assumed_gaps` regardless of how many
    /// gaps the read already carries.
    pub fn with_assumed_gaps(mut self, assumed_gaps: usize) -> Self {
        self.assumed_gaps = assumed_gaps;
        self
    }

    pub fn assumed_gaps(&self) -> usize {
        self.assumed_gaps
    }

    /// Score every offset in `[0, genome.len() - (read.len() + assumed_gaps)]`
    /// and return the highest one; the lowest offset wins ties.
    ///
    /// Runs in O(genome.len() × read.len()). Returns `None` when the genome is
    /// shorter than the search window.
    pub fn find_optimal(&self, read: &Read, genome: &Genome) -> Option<OptimalAlignment> {
        let window = read.len().checked_add(self.assumed_gaps)?;
        let last = genome.len().checked_sub(window)?;

        let mut best: Option<OptimalAlignment> = None;
        for offset in 0..=last {
            let score = self.params.score(read, genome, offset);
            match best {
                Some(current) if current.score >= score => {}
                _ => best = Some(OptimalAlignment { offset, score }),
            }
        }

        best
    }
}

/// [`OptimalAligner::find_optimal`] with default scoring and the assumed gap count
pub fn find_optimal(read: &Read, genome: &Genome) -> Option<OptimalAlignment> {
    OptimalAligner::default().find_optimal(read, genome)
}
