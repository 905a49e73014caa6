//! Error handling for the seqalign CLI

use seqalign_core::{GeneratorError, SequenceError};
use thiserror::Error;

/// Main error type for seqalign CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("Invalid {what} sequence: {source}")]
    InvalidSequence {
        what: &'static str,
        #[source]
        source: SequenceError,
    },

    #[error("Puzzle generation failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Terminal error: {message}")]
    Terminal { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn invalid_sequence(what: &'static str, source: SequenceError) -> Self {
        Self::InvalidSequence { what, source }
    }

    pub fn terminal<S: Into<String>>(message: S) -> Self {
        Self::Terminal { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your seqalign.toml configuration file\n\
                 • Use 'seqalign config --example' to generate a sample configuration",
            );
        }

        CliError::InvalidSequence { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Genomes may only contain A, C, G and T\n\
                 • Reads may also contain '-' for gaps",
            );
        }

        CliError::Generator(GeneratorError::Exhausted { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Lower puzzle.mutations or puzzle.required_gaps\n\
                 • Raise puzzle.max_attempts",
            );
        }

        CliError::Generator(_) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • genome_length must be at least read_length + required_gaps + tail_length\n\
                 • Use 'seqalign config --example' to see the default puzzle settings",
            );
        }

        CliError::Terminal { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Run 'seqalign play' from an interactive terminal\n\
                 • Use 'seqalign generate' for non-interactive output",
            );
        }

        CliError::Io { .. } => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
