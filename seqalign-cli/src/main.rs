use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod deterministic;
mod error;

use config::Config;
use error::CliError;

#[derive(Parser)]
#[command(name = "seqalign")]
#[command(about = "seqalign - sequence alignment puzzle")]
#[command(version)]
#[command(long_about = "
seqalign generates short DNA alignment puzzles: a read cut from a random genome
with a few bases removed and a few mutated. Slide the read, re-insert the gaps
and submit to beat the leaderboard.

Examples:
  seqalign play
  seqalign generate --reveal --seed 7
  seqalign score --genome ACGTACGT --read CG-TA --offset 1
  seqalign optimal --genome ACGTACGTACGT --read GTAC
  seqalign config --example --write seqalign.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable deterministic mode for reproducible rounds
    #[arg(long, global = true)]
    pub deterministic: bool,

    /// Generator seed (overrides general.seed and --deterministic)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play interactively in the terminal
    Play,

    /// Print a freshly generated genome and puzzle read
    Generate {
        /// Also print the construction and intended solution
        #[arg(long)]
        reveal: bool,

        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,
    },

    /// Score a read against a genome at a fixed offset
    Score {
        /// Genome bases (A, C, G, T)
        #[arg(long)]
        genome: String,

        /// Read bases, '-' for gaps
        #[arg(long, allow_hyphen_values = true)]
        read: String,

        /// Genome index of the read's first column
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,
    },

    /// Find the best-scoring offset for a read
    Optimal {
        /// Genome bases (A, C, G, T)
        #[arg(long)]
        genome: String,

        /// Read bases, '-' for gaps
        #[arg(long, allow_hyphen_values = true)]
        read: String,

        /// Gap columns reserved past the end of the read
        #[arg(long)]
        assumed_gaps: Option<usize>,

        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print or write the configuration
    Config {
        /// Use the default configuration instead of the loaded one
        #[arg(long)]
        example: bool,

        /// Write the TOML to this file instead of printing it
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = Config::load(cli.config.as_deref())
        .map_err(|e| CliError::config(format!("{:#}", e)))?;

    let seed_for = |component: &str| {
        deterministic::resolve_seed(cli.seed, config.general.seed, cli.deterministic, component)
    };

    // Execute the requested command
    match cli.command {
        Commands::Play => {
            commands::play::execute(&config, seed_for("play"))?;
        }

        Commands::Generate { reveal, json } => {
            commands::generate::execute(&config, seed_for("generate"), reveal, json)?;
        }

        Commands::Score { ref genome, ref read, offset, json } => {
            commands::score::execute(&config, genome, read, offset, json)?;
        }

        Commands::Optimal { ref genome, ref read, assumed_gaps, json } => {
            commands::optimal::execute(&config, genome, read, assumed_gaps, json)?;
        }

        Commands::Config { example, ref write } => {
            commands::config::execute(&config, example, write.as_deref())?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose, cli.quiet)?;

    if let Err(err) = run(cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            error::print_error_and_exit(cli_err);
        }
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["seqalign", "generate", "--reveal", "--seed", "9", "-vv"]).unwrap();
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Generate { reveal: true, json: false }));
    }

    #[test]
    fn test_read_may_start_with_gap() {
        let cli = Cli::try_parse_from(["seqalign", "optimal", "--genome", "ACGTACGT", "--read", "--GT"]).unwrap();
        assert!(matches!(cli.command, Commands::Optimal { ref read, .. } if read == "--GT"));
    }

    #[test]
    fn test_config_write_argument() {
        let cli = Cli::try_parse_from(["seqalign", "config", "--example", "--write", "out.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config { example: true, write: Some(ref path) } if path == std::path::Path::new("out.toml")
        ));
    }

    #[test]
    fn test_score_arguments() {
        let cli = Cli::try_parse_from([
            "seqalign", "score", "--genome", "ACGT", "--read", "C-G", "--offset", "1",
        ])
        .unwrap();
        match cli.command {
            Commands::Score { genome, read, offset, json } => {
                assert_eq!(genome, "ACGT");
                assert_eq!(read, "C-G");
                assert_eq!(offset, 1);
                assert!(!json);
            }
            _ => panic!("expected score command"),
        }
    }
}
