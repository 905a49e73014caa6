//! Random genome and puzzle generation.
//!
//! A puzzle is cut from a window of the genome: a few window positions are
//! removed (the player re-inserts them as gaps), a few others are mutated
//! (guaranteed mismatches), and an optional verbatim tail from just after the
//! window is appended. The construction is recorded so the intended solution and its
//! score can be recovered.

use crate::scoring::ScoringParams;
use crate::types::{Base, Genome, Read};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur during generation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Invalid generator parameters: {0}")]
    InvalidParams(String),

    #[error("Genome of length {genome_length} cannot hold a window of {needed} bases")]
    GenomeTooShort { genome_length: usize, needed: usize },

    #[error("No valid puzzle found after {attempts} attempts")]
    Exhausted { attempts: usize },
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Parameters for puzzle generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleParams {
    /// Length of the reference genome
    pub genome_length: usize,
    /// Bases kept from the window once the gap slots are removed
    pub read_length: usize,
    /// Window positions removed and left for the player to re-insert as gaps
    pub required_gaps: usize,
    /// Window positions replaced by a different base
    pub mutations: usize,
    /// Bases copied verbatim from just after the window; 0 keeps the read at
    /// `read_length`
    pub tail_length: usize,
    /// Draws attempted before giving up on mutation placement
    pub max_attempts: usize,
    /// Optional seed for reproducible rounds
    pub deterministic_seed: Option<u64>,
}

impl Default for PuzzleParams {
    fn default() -> Self {
        Self {
            genome_length: 250,
            read_length: 50,
            required_gaps: 4,
            mutations: 2,
            tail_length: 0,
            max_attempts: 64,
            deterministic_seed: None,
        }
    }
}

impl PuzzleParams {
    /// Genome columns covered by the window before gap removal
    pub fn window_length(&self) -> usize {
        self.read_length + self.required_gaps
    }

    /// Length of a freshly generated read
    pub fn initial_read_length(&self) -> usize {
        self.read_length + self.tail_length
    }

    /// Reject parameter sets that can never produce a puzzle
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.read_length < 2 {
            return Err(GeneratorError::InvalidParams("read_length must be at least 2".into()));
        }
        if self.mutations > self.read_length {
            return Err(GeneratorError::InvalidParams(format!(
                "{} mutations do not fit in a read of {} bases",
                self.mutations, self.read_length
            )));
        }
        if self.max_attempts == 0 {
            return Err(GeneratorError::InvalidParams("max_attempts must be positive".into()));
        }
        self.check_genome_length(self.genome_length)
    }

    fn check_genome_length(&self, genome_length: usize) -> GeneratorResult<()> {
        let needed = self.window_length() + self.tail_length;
        if genome_length < needed {
            return Err(GeneratorError::GenomeTooShort { genome_length, needed });
        }
        Ok(())
    }
}

/// A generated read together with the record of how it was built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub read: Read,
    /// Genome index where the window starts; the solution's offset
    pub window_start: usize,
    /// Removed window positions, ascending
    pub gap_slots: Vec<usize>,
    /// Mutated window positions, ascending
    pub mutated_slots: Vec<usize>,
    pub tail_length: usize,
}

impl Puzzle {
    /// The read with a gap re-inserted at every removed slot
    pub fn solution(&self) -> Read {
        let mut solution = self.read.clone();
        for &slot in &self.gap_slots {
            solution.insert(slot, Base::Gap);
        }
        solution
    }

    /// Score of [`Puzzle::solution`] at `window_start`, derived from the construction
    pub fn designed_score(&self, params: &ScoringParams) -> i32 {
        let non_gap = (self.read.len() - self.mutated_slots.len()) as i32;
        let mut total = non_gap * params.match_score + self.mutated_slots.len() as i32 * params.mismatch;

        let mut previous: Option<usize> = None;
        for &slot in &self.gap_slots {
            total += match previous {
                Some(p) if p + 1 == slot => params.gap_extension,
                _ => params.gap_opening,
            };
            previous = Some(slot);
        }
        total
    }
}

/// Source of genomes and puzzles for successive rounds
pub struct Generator {
    params: PuzzleParams,
    rng: StdRng,
}

impl Generator {
    pub fn new(params: PuzzleParams) -> GeneratorResult<Self> {
        params.validate()?;
        let rng = match params.deterministic_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { params, rng })
    }

    pub fn params(&self) -> &PuzzleParams {
        &self.params
    }

    /// `length` independent uniform draws from A, T, G, C
    pub fn generate_genome(&mut self, length: usize) -> GeneratorResult<Genome> {
        let bases = (0..length)
            .map(|_| Base::NUCLEOTIDES[self.rng.gen_range(0..Base::NUCLEOTIDES.len())])
            .collect();
        Genome::new(bases).map_err(|e| GeneratorError::InvalidParams(format!("genome: {e}")))
    }

    /// Build a puzzle read from a random window of `genome`
    pub fn generate_puzzle(&mut self, genome: &Genome) -> GeneratorResult<Puzzle> {
        self.params.check_genome_length(genome.len())?;

        for attempt in 1..=self.params.max_attempts {
            if let Some(puzzle) = self.try_puzzle(genome) {
                log::debug!(
                    "Generated puzzle at window {} after {} attempt(s)",
                    puzzle.window_start,
                    attempt
                );
                return Ok(puzzle);
            }
            log::debug!("Puzzle attempt {} had too few mutation positions, retrying", attempt);
        }

        Err(GeneratorError::Exhausted { attempts: self.params.max_attempts })
    }

    /// A fresh genome of the configured length and a puzzle cut from it
    pub fn generate_round(&mut self) -> GeneratorResult<(Genome, Puzzle)> {
        let genome = self.generate_genome(self.params.genome_length)?;
        let puzzle = self.generate_puzzle(&genome)?;
        Ok((genome, puzzle))
    }

    fn try_puzzle(&mut self, genome: &Genome) -> Option<Puzzle> {
        let window_length = self.params.window_length();
        let tail_length = self.params.tail_length;
        let last_start = genome.len() - window_length - tail_length;
        let start = self.rng.gen_range(0..=last_start);

        // The last two read columns never take a gap insert, so no removed
        // slot may land there either
        let slot_range = window_length - 2;
        let mut gap_slots = index::sample(&mut self.rng, slot_range, self.params.required_gaps).into_vec();
        gap_slots.sort_unstable();

        let excluded: BTreeSet<usize> = gap_slots
            .iter()
            .flat_map(|&slot| [slot.checked_sub(1), Some(slot), Some(slot + 1)])
            .flatten()
            .collect();
        let eligible: Vec<usize> = (0..window_length).filter(|p| !excluded.contains(p)).collect();
        if eligible.len() < self.params.mutations {
            return None;
        }

        let mut mutated_slots: Vec<usize> = eligible
            .choose_multiple(&mut self.rng, self.params.mutations)
            .copied()
            .collect();
        mutated_slots.sort_unstable();

        let window = &genome.bases()[start..start + window_length];
        let mut bases = Vec::with_capacity(self.params.initial_read_length());
        for (position, &base) in window.iter().enumerate() {
            if gap_slots.binary_search(&position).is_ok() {
                continue;
            }
            if mutated_slots.binary_search(&position).is_ok() {
                bases.push(self.mutate(base));
            } else {
                bases.push(base);
            }
        }
        let tail_start = start + window_length;
        bases.extend_from_slice(&genome.bases()[tail_start..tail_start + tail_length]);

        Some(Puzzle {
            read: Read::new(bases),
            window_start: start,
            gap_slots,
            mutated_slots,
            tail_length,
        })
    }

    fn mutate(&mut self, base: Base) -> Base {
        let alternatives: Vec<Base> = Base::NUCLEOTIDES.iter().copied().filter(|&b| b != base).collect();
        alternatives.choose(&mut self.rng).copied().unwrap_or(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score;
    use crate::types::AlignmentScore;

    fn seeded(seed: u64) -> Generator {
        Generator::new(PuzzleParams {
            deterministic_seed: Some(seed),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_genome_uses_nucleotides_only() {
        let mut generator = seeded(1);
        let genome = generator.generate_genome(250).unwrap();
        assert_eq!(genome.len(), 250);
        assert!(genome.bases().iter().all(|b| !b.is_gap()));
        assert!(matches!(generator.generate_genome(0), Err(GeneratorError::InvalidParams(_))));
    }

    #[test]
    fn test_default_read_is_fifty_bases() {
        let params = PuzzleParams::default();
        assert_eq!(params.window_length(), 54);
        assert_eq!(params.initial_read_length(), 50);

        let (_, puzzle) = seeded(1).generate_round().unwrap();
        assert_eq!(puzzle.read.len(), 50);
        assert_eq!(puzzle.solution().len(), 54);
    }

    #[test]
    fn test_gap_slots_leave_last_two_columns() {
        for seed in 0..200 {
            let (_, puzzle) = seeded(seed).generate_round().unwrap();
            assert!(puzzle.gap_slots.iter().all(|&slot| slot < 52), "seed {seed}: {:?}", puzzle.gap_slots);
        }
    }

    #[test]
    fn test_puzzle_shape() {
        let mut generator = seeded(7);
        let (genome, puzzle) = generator.generate_round().unwrap();
        let params = generator.params();

        assert_eq!(puzzle.read.len(), params.initial_read_length());
        assert_eq!(puzzle.read.gap_count(), 0);
        assert_eq!(puzzle.gap_slots.len(), 4);
        assert_eq!(puzzle.mutated_slots.len(), 2);
        assert!(puzzle.window_start + params.window_length() + params.tail_length <= genome.len());
        assert!(puzzle.gap_slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_mutations_avoid_gap_neighbourhood() {
        for seed in 0..200 {
            let mut generator = seeded(seed);
            let (_, puzzle) = generator.generate_round().unwrap();
            for &m in &puzzle.mutated_slots {
                for &g in &puzzle.gap_slots {
                    assert!(m.abs_diff(g) > 1, "seed {seed}: mutation {m} next to gap {g}");
                }
            }
            assert_ne!(puzzle.mutated_slots[0], puzzle.mutated_slots[1]);
        }
    }

    #[test]
    fn test_solution_scores_designed_value() {
        let scoring = ScoringParams::default();
        for seed in 0..200 {
            let mut generator = seeded(seed);
            let (genome, puzzle) = generator.generate_round().unwrap();
            let solution = puzzle.solution();
            assert_eq!(
                score(&solution, &genome, puzzle.window_start),
                AlignmentScore::Valid(puzzle.designed_score(&scoring)),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_solution_restores_window() {
        let mut generator = seeded(11);
        let (genome, puzzle) = generator.generate_round().unwrap();
        let solution = puzzle.solution();
        let window_length = generator.params().window_length();
        for (i, base) in solution.bases().iter().enumerate() {
            let reference = genome.bases()[puzzle.window_start + i];
            let is_gap_slot = puzzle.gap_slots.contains(&i);
            let is_mutated = i < window_length && puzzle.mutated_slots.contains(&i);
            assert_eq!(base.is_gap(), is_gap_slot);
            if !is_gap_slot {
                assert_eq!(*base == reference, !is_mutated, "column {i}");
            }
        }
    }

    #[test]
    fn test_isolated_gaps_budget() {
        let puzzle = Puzzle {
            read: Read::new(vec![Base::A; 50]),
            window_start: 0,
            gap_slots: vec![3, 10, 20, 30],
            mutated_slots: vec![40, 45],
            tail_length: 0,
        };
        // 48 matches, 2 mismatches, 4 single-gap runs
        assert_eq!(puzzle.designed_score(&ScoringParams::default()), 48 - 2 - 8);

        let adjacent = Puzzle { gap_slots: vec![3, 4, 20, 30], ..puzzle };
        assert_eq!(adjacent.designed_score(&ScoringParams::default()), 48 - 2 - 6 - 1);
    }

    #[test]
    fn test_seed_reproducible() {
        let (g1, p1) = seeded(42).generate_round().unwrap();
        let (g2, p2) = seeded(42).generate_round().unwrap();
        assert_eq!(g1, g2);
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let too_small = PuzzleParams { genome_length: 50, ..Default::default() };
        assert_eq!(
            Generator::new(too_small).err(),
            Some(GeneratorError::GenomeTooShort { genome_length: 50, needed: 54 })
        );

        let with_tail = PuzzleParams { genome_length: 60, tail_length: 16, ..Default::default() };
        assert_eq!(
            Generator::new(with_tail).err(),
            Some(GeneratorError::GenomeTooShort { genome_length: 60, needed: 70 })
        );

        let empty_read = PuzzleParams { read_length: 0, ..Default::default() };
        assert!(matches!(Generator::new(empty_read), Err(GeneratorError::InvalidParams(_))));
    }

    #[test]
    fn test_short_genome_rejected_per_call() {
        let mut generator = seeded(3);
        let genome: Genome = "ACGT".repeat(10).parse().unwrap();
        assert!(matches!(
            generator.generate_puzzle(&genome),
            Err(GeneratorError::GenomeTooShort { .. })
        ));
    }

    #[test]
    fn test_crowded_window_exhausts() {
        // Every window position sits next to a removed slot
        let params = PuzzleParams {
            genome_length: 20,
            read_length: 2,
            required_gaps: 2,
            mutations: 2,
            tail_length: 0,
            max_attempts: 5,
            deterministic_seed: Some(9),
        };
        let mut generator = Generator::new(params).unwrap();
        assert_eq!(
            generator.generate_round().err(),
            Some(GeneratorError::Exhausted { attempts: 5 })
        );
    }
}
