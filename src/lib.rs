#![doc = include_str!("../README.md")]

// private mods (will be partly re-exported)
mod error;
mod extractor;
mod grain;
mod loudness;
mod merger;
mod normalizer;
mod window;

// public, flat re-exports
pub use error::Error;

pub use grain::{Grain, GrainList, SampleBuffer};

pub use window::{envelope, split_envelope, WindowKind};

pub use extractor::{extract_grain, GrainParameters, Granulator};

pub use loudness::{dbfs, max_dbfs, retain_loud_grains, rms};

pub use merger::merge_grains;

pub use normalizer::{normalize_peaks, normalized_peaks, peak};
