//! Command implementations for the seqalign CLI

pub mod config;
pub mod generate;
pub mod optimal;
pub mod play;
pub mod score;

use crate::error::{CliError, CliResult};
use seqalign_core::{Genome, Read};

pub(crate) fn parse_genome(text: &str) -> CliResult<Genome> {
    text.parse().map_err(|e| CliError::invalid_sequence("genome", e))
}

pub(crate) fn parse_read(text: &str) -> CliResult<Read> {
    text.parse().map_err(|e| CliError::invalid_sequence("read", e))
}
