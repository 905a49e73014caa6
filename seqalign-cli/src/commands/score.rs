//! Score command implementation - evaluate one read at one offset

use anyhow::{Context, Result};
use serde::Serialize;

use super::{parse_genome, parse_read};
use crate::config::Config;
use seqalign_core::{breakdown, AlignmentScore, ScoreBreakdown};

#[derive(Debug, Serialize)]
struct ScoreReport {
    offset: usize,
    score: AlignmentScore,
    breakdown: Option<ScoreBreakdown>,
}

pub fn execute(config: &Config, genome: &str, read: &str, offset: usize, json: bool) -> Result<()> {
    let genome = parse_genome(genome)?;
    let read = parse_read(read)?;
    log::debug!("Scoring read of {} columns against genome of {} bases at offset {}", read.len(), genome.len(), offset);

    let report = ScoreReport {
        offset,
        score: config.scoring_params().score(&read, &genome, offset),
        breakdown: breakdown(&read, &genome, offset),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize score report")?);
        return Ok(());
    }

    println!("offset: {}", report.offset);
    println!("score:  {}", report.score);
    match report.breakdown {
        Some(counts) => {
            println!(
                "        {} matches, {} mismatches, {} gap openings, {} gap extensions",
                counts.matches, counts.mismatches, counts.gap_openings, counts.gap_extensions
            );
        }
        None => println!("        read overhangs the genome at this offset"),
    }

    Ok(())
}
