//! Configuration handling for the seqalign CLI
//!
//! Supports loading configuration from seqalign.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use seqalign_core::leaderboard::DEFAULT_CAPACITY;
use seqalign_core::optimal::DEFAULT_ASSUMED_GAPS;
use seqalign_core::{Leaderboard, OptimalAligner, PuzzleParams, ScoringParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "seqalign.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub puzzle: PuzzleConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub play: PlayConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Fixed generator seed; omit for a fresh round every run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default = "default_genome_length")]
    pub genome_length: usize,

    #[serde(default = "default_read_length")]
    pub read_length: usize,

    /// Gaps the player has to re-insert
    #[serde(default = "default_required_gaps")]
    pub required_gaps: usize,

    #[serde(default = "default_mutations")]
    pub mutations: usize,

    /// Genome bases appended after the window
    #[serde(default = "default_tail_length")]
    pub tail_length: usize,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Gap columns the hint search reserves past the read
    #[serde(default = "default_assumed_gaps")]
    pub assumed_gaps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_match")]
    pub match_score: i32,

    #[serde(default = "default_mismatch")]
    pub mismatch: i32,

    #[serde(default = "default_gap_opening")]
    pub gap_opening: i32,

    #[serde(default = "default_gap_extension")]
    pub gap_extension: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Seed the board with the house record
    #[serde(default = "default_true")]
    pub house_entry: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Columns drawn per row; also the w/s and up/down step
    #[serde(default = "default_row_length")]
    pub row_length: usize,
}

fn default_genome_length() -> usize { PuzzleParams::default().genome_length }
fn default_read_length() -> usize { PuzzleParams::default().read_length }
fn default_required_gaps() -> usize { PuzzleParams::default().required_gaps }
fn default_mutations() -> usize { PuzzleParams::default().mutations }
fn default_tail_length() -> usize { PuzzleParams::default().tail_length }
fn default_max_attempts() -> usize { PuzzleParams::default().max_attempts }
fn default_assumed_gaps() -> usize { DEFAULT_ASSUMED_GAPS }
fn default_match() -> i32 { ScoringParams::default().match_score }
fn default_mismatch() -> i32 { ScoringParams::default().mismatch }
fn default_gap_opening() -> i32 { ScoringParams::default().gap_opening }
fn default_gap_extension() -> i32 { ScoringParams::default().gap_extension }
fn default_capacity() -> usize { DEFAULT_CAPACITY }
fn default_true() -> bool { true }
fn default_row_length() -> usize { 50 }

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            genome_length: default_genome_length(),
            read_length: default_read_length(),
            required_gaps: default_required_gaps(),
            mutations: default_mutations(),
            tail_length: default_tail_length(),
            max_attempts: default_max_attempts(),
            assumed_gaps: default_assumed_gaps(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: default_match(),
            mismatch: default_mismatch(),
            gap_opening: default_gap_opening(),
            gap_extension: default_gap_extension(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            house_entry: true,
        }
    }
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            row_length: default_row_length(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find seqalign.toml in current directory
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }

    /// Generator parameters with the resolved seed applied
    pub fn puzzle_params(&self, seed: Option<u64>) -> PuzzleParams {
        PuzzleParams {
            genome_length: self.puzzle.genome_length,
            read_length: self.puzzle.read_length,
            required_gaps: self.puzzle.required_gaps,
            mutations: self.puzzle.mutations,
            tail_length: self.puzzle.tail_length,
            max_attempts: self.puzzle.max_attempts,
            deterministic_seed: seed,
        }
    }

    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            match_score: self.scoring.match_score,
            mismatch: self.scoring.mismatch,
            gap_opening: self.scoring.gap_opening,
            gap_extension: self.scoring.gap_extension,
        }
    }

    pub fn aligner(&self) -> OptimalAligner {
        OptimalAligner::new(self.scoring_params()).with_assumed_gaps(self.puzzle.assumed_gaps)
    }

    pub fn leaderboard(&self) -> Leaderboard {
        let board = Leaderboard::new(self.board.capacity);
        if self.board.house_entry {
            board.seeded_with_house_entry()
        } else {
            board
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.seed, None);
        assert_eq!(config.puzzle.read_length, 50);
        assert_eq!(config.puzzle.assumed_gaps, 4);
        assert_eq!(config.scoring.gap_opening, -2);
        assert_eq!(config.board.capacity, 10);
        assert!(config.board.house_entry);
        assert_eq!(config.play.row_length, 50);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.general.seed = Some(7);
        config.scoring.mismatch = -3;
        config.board.house_entry = false;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded_config = Config::load_from_file(temp_file.path())?;

        assert_eq!(config, loaded_config);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "[puzzle]\ngenome_length = 400\n\n[play]\nrow_length = 40\n")?;

        let config = Config::load(Some(temp_file.path()))?;
        assert_eq!(config.puzzle.genome_length, 400);
        assert_eq!(config.puzzle.read_length, 50);
        assert_eq!(config.play.row_length, 40);
        assert_eq!(config.scoring, ScoringConfig::default());
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "[puzzle\ngenome_length = ")?;
        assert!(Config::load_from_file(temp_file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[puzzle]"));
        assert!(example.contains("[scoring]"));
        assert!(example.contains("[board]"));
        assert!(example.contains("[play]"));
        Ok(())
    }

    #[test]
    fn test_core_params_follow_config() {
        let mut config = Config::default();
        config.puzzle.tail_length = 16;
        config.puzzle.assumed_gaps = 6;
        config.board.capacity = 3;

        let params = config.puzzle_params(Some(11));
        assert_eq!(Config::default().puzzle_params(None).initial_read_length(), 50);
        assert_eq!(params.initial_read_length(), 66);
        assert_eq!(params.deterministic_seed, Some(11));
        assert_eq!(config.aligner().assumed_gaps(), 6);

        let board = config.leaderboard();
        assert_eq!(board.capacity(), 3);
        assert_eq!(board.len(), 1);
    }
}
