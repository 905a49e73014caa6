//! Generate command implementation - print a fresh round

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Config;
use crate::error::CliError;
use seqalign_core::{Generator, Puzzle};

#[derive(Debug, Serialize)]
struct RoundReport<'a> {
    genome: String,
    read: String,
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reveal: Option<Reveal<'a>>,
}

#[derive(Debug, Serialize)]
struct Reveal<'a> {
    window_start: usize,
    gap_slots: &'a [usize],
    mutated_slots: &'a [usize],
    solution: String,
    designed_score: i32,
}

pub fn execute(config: &Config, seed: Option<u64>, reveal: bool, json: bool) -> Result<()> {
    let mut generator = Generator::new(config.puzzle_params(seed)).map_err(CliError::from)?;
    let (genome, puzzle) = generator.generate_round().map_err(CliError::from)?;
    log::info!("Generated puzzle at window {}", puzzle.window_start);

    let report = RoundReport {
        genome: genome.to_string(),
        read: puzzle.read.to_string(),
        seed,
        reveal: reveal.then(|| reveal_of(config, &puzzle)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize round")?);
        return Ok(());
    }

    println!("genome: {}", report.genome);
    println!("read:   {}", report.read);
    if let Some(reveal) = &report.reveal {
        println!("window start:   {}", reveal.window_start);
        println!("gap slots:      {:?}", reveal.gap_slots);
        println!("mutated slots:  {:?}", reveal.mutated_slots);
        println!("solution:       {}", reveal.solution);
        println!("designed score: {}", reveal.designed_score);
    }

    Ok(())
}

fn reveal_of<'a>(config: &Config, puzzle: &'a Puzzle) -> Reveal<'a> {
    Reveal {
        window_start: puzzle.window_start,
        gap_slots: &puzzle.gap_slots,
        mutated_slots: &puzzle.mutated_slots,
        solution: puzzle.solution().to_string(),
        designed_score: puzzle.designed_score(&config.scoring_params()),
    }
}
