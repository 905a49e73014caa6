//! Optimal command implementation - best offset for a read

use anyhow::{Context, Result};

use super::{parse_genome, parse_read};
use crate::config::Config;

pub fn execute(
    config: &Config,
    genome: &str,
    read: &str,
    assumed_gaps: Option<usize>,
    json: bool,
) -> Result<()> {
    let genome = parse_genome(genome)?;
    let read = parse_read(read)?;

    let mut aligner = config.aligner();
    if let Some(gaps) = assumed_gaps {
        aligner = aligner.with_assumed_gaps(gaps);
    }
    log::info!(
        "Searching {} offsets",
        (genome.len() + 1).saturating_sub(read.len() + aligner.assumed_gaps())
    );

    let best = aligner.find_optimal(&read, &genome);

    if json {
        println!("{}", serde_json::to_string_pretty(&best).context("Failed to serialize optimal alignment")?);
        return Ok(());
    }

    match best {
        Some(best) => {
            println!("offset: {}", best.offset);
            println!("score:  {}", best.score);
        }
        None => println!(
            "no candidate offset: genome of {} bases is shorter than read + {} assumed gaps",
            genome.len(),
            aligner.assumed_gaps()
        ),
    }

    Ok(())
}
