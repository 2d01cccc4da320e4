use std::{error, fmt};

// -------------------------------------------------------------------------------------------------

/// Provides an enumeration of all possible errors reported by the granulator.
#[derive(Debug)]
pub enum Error {
    /// A grain's start offset or length falls outside the source buffer.
    InvalidRange {
        start: usize,
        length: usize,
        buffer_len: usize,
    },
    /// A merge overlap exceeds the number of samples available in one of the operands.
    InvalidOverlap { overlap: usize, available: usize },
    /// Peak normalization of a grain set whose maximum sample value is zero.
    ZeroPeak,
    /// A grain whose loudness can't be measured, e.g. because it's empty.
    DegenerateGrain,
    /// An operation which needs at least one grain got none.
    NoGrains,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange {
                start,
                length,
                buffer_len,
            } => write!(
                f,
                "Grain range {start}..{} exceeds buffer length {buffer_len}",
                start.saturating_add(*length)
            ),
            Self::InvalidOverlap { overlap, available } => write!(
                f,
                "Overlap of {overlap} samples exceeds the {available} available samples"
            ),
            Self::ZeroPeak => write!(f, "Can't normalize grains with a peak amplitude of zero"),
            Self::DegenerateGrain => write!(f, "Grain loudness can't be measured"),
            Self::NoGrains => write!(f, "No grains to process"),
        }
    }
}
