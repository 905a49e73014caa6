use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing genome or read text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid base '{symbol}' at position {position}")]
    InvalidBase { symbol: char, position: usize },

    #[error("Gap symbol at position {position} is not allowed in a genome")]
    GapInGenome { position: usize },

    #[error("Sequence is empty")]
    Empty,
}

pub type SequenceResult<T> = Result<T, SequenceError>;

/// One column symbol of a read or genome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Base {
    A,
    T,
    G,
    C,
    Gap,
}

impl Base {
    /// The four nucleotides a genome is drawn from
    pub const NUCLEOTIDES: [Base; 4] = [Base::A, Base::T, Base::G, Base::C];

    pub fn is_gap(self) -> bool {
        matches!(self, Base::Gap)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Base::A),
            'T' => Some(Base::T),
            'G' => Some(Base::G),
            'C' => Some(Base::C),
            '-' => Some(Base::Gap),
            _ => None,
        }
    }
}

impl From<Base> for char {
    fn from(base: Base) -> Self {
        match base {
            Base::A => 'A',
            Base::T => 'T',
            Base::G => 'G',
            Base::C => 'C',
            Base::Gap => '-',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

fn parse_bases(text: &str) -> SequenceResult<Vec<Base>> {
    text.chars()
        .enumerate()
        .map(|(position, symbol)| {
            Base::from_char(symbol).ok_or(SequenceError::InvalidBase { symbol, position })
        })
        .collect()
}

fn write_bases(bases: &[Base], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for base in bases {
        write!(f, "{}", char::from(*base))?;
    }
    Ok(())
}

/// Reference sequence for a round. Never contains gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    bases: Vec<Base>,
}

impl Genome {
    /// Build a genome from nucleotides, rejecting gap symbols
    pub fn new(bases: Vec<Base>) -> SequenceResult<Self> {
        if bases.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some(position) = bases.iter().position(|b| b.is_gap()) {
            return Err(SequenceError::GapInGenome { position });
        }
        Ok(Self { bases })
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    pub fn get(&self, index: usize) -> Option<Base> {
        self.bases.get(index).copied()
    }
}

impl FromStr for Genome {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_bases(s.trim())?)
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bases(&self.bases, f)
    }
}

/// The player-editable sequence, gaps included
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Read {
    bases: Vec<Base>,
}

impl Read {
    pub fn new(bases: Vec<Base>) -> Self {
        Self { bases }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    pub fn get(&self, index: usize) -> Option<Base> {
        self.bases.get(index).copied()
    }

    /// Number of gap symbols currently in the read
    pub fn gap_count(&self) -> usize {
        self.bases.iter().filter(|b| b.is_gap()).count()
    }

    pub(crate) fn insert(&mut self, index: usize, base: Base) {
        self.bases.insert(index, base);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Base {
        self.bases.remove(index)
    }
}

impl FromStr for Read {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(parse_bases(s.trim())?))
    }
}

impl fmt::Display for Read {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bases(&self.bases, f)
    }
}

/// Score of a read at an offset. `Unscoreable` orders below every valid score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlignmentScore {
    Unscoreable,
    Valid(i32),
}

impl AlignmentScore {
    pub fn value(self) -> Option<i32> {
        match self {
            AlignmentScore::Valid(score) => Some(score),
            AlignmentScore::Unscoreable => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, AlignmentScore::Valid(_))
    }
}

impl fmt::Display for AlignmentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentScore::Valid(score) => write!(f, "{}", score),
            AlignmentScore::Unscoreable => write!(f, "-inf"),
        }
    }
}
