//! Grain extraction from sample buffers.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    grain::Grain,
    window::{split_envelope, WindowKind},
    Error,
};

// -------------------------------------------------------------------------------------------------

/// Parameters controlling how a grain gets extracted from a source buffer.
///
/// Unspecified (`None`) start offsets and lengths are drawn randomly for each extracted grain.
#[derive(Clone, Debug, PartialEq)]
pub struct GrainParameters {
    /// Start offset of the grain in the source buffer. Random when `None`.
    pub start: Option<usize>,
    /// Grain length in samples. When `None`, a random length which fits into the samples that
    /// follow the start offset gets used.
    pub length: Option<usize>,
    /// Window that is applied to the grain.
    pub window: WindowKind,
    /// Maximum length of the window. When the grain is longer, the window is split and only
    /// applied to the start and end of the grain. `None` applies the window to the whole grain.
    pub max_window_length: Option<usize>,
}

impl Default for GrainParameters {
    fn default() -> Self {
        Self {
            start: None,
            length: None,
            window: WindowKind::Hanning,
            max_window_length: None,
        }
    }
}

impl GrainParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    pub fn with_max_window_length(mut self, max_window_length: usize) -> Self {
        self.max_window_length = Some(max_window_length);
        self
    }

    /// Validate the specified parts of the parameters against a source buffer's length.
    pub fn validate(&self, buffer_len: usize) -> Result<(), Error> {
        let start = self.start.unwrap_or(0);
        // random starts need at least one sample to pick from
        let start_out_of_range = match self.start {
            Some(start) => start >= buffer_len,
            None => buffer_len == 0,
        };
        if start_out_of_range {
            return Err(Error::InvalidRange {
                start,
                length: self.length.unwrap_or(0),
                buffer_len,
            });
        }
        if let Some(length) = self.length {
            if start.checked_add(length).is_none_or(|end| end > buffer_len) {
                return Err(Error::InvalidRange {
                    start,
                    length,
                    buffer_len,
                });
            }
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

/// Extract a single windowed grain from the given buffer.
///
/// Unspecified start offsets are drawn from `0..buffer.len()`, unspecified lengths from
/// `0..buffer.len() - start`, using the given random number generator. Grains near the end of
/// the buffer thus tend to be short.
///
/// When the window is shorter than the grain, it gets split into an attack and release part
/// with a flat run of ones in between, see [`split_envelope`].
pub fn extract_grain<R: Rng>(
    buffer: &[f32],
    parameters: &GrainParameters,
    rng: &mut R,
) -> Result<Grain, Error> {
    parameters.validate(buffer.len())?;

    let start = match parameters.start {
        Some(start) => start,
        None => rng.random_range(0..buffer.len()),
    };
    let length = match parameters.length {
        Some(length) => length,
        None => rng.random_range(0..buffer.len() - start),
    };
    // a random start followed by a fixed length may overshoot
    let end = start + length;
    if end > buffer.len() {
        return Err(Error::InvalidRange {
            start,
            length,
            buffer_len: buffer.len(),
        });
    }

    let window_length = match parameters.max_window_length {
        Some(max_window_length) if max_window_length > length => {
            log::debug!(
                "Clamping window length {max_window_length} to grain length {length} samples"
            );
            length
        }
        Some(max_window_length) => max_window_length,
        None => length,
    };

    let mut grain = Grain::with_source_range(buffer[start..end].to_vec(), start);
    grain.apply_envelope(&split_envelope(parameters.window, length, window_length));
    Ok(grain)
}

// -------------------------------------------------------------------------------------------------

/// Extracts grains from sample buffers, using its own random number generator to pick
/// unspecified grain starts and lengths.
///
/// Each granulator owns its generator, so granulators created with the same seed produce the
/// same grains, and granulators can be moved to different threads without sharing any state.
#[derive(Debug, Clone)]
pub struct Granulator {
    rng: SmallRng,
}

impl Default for Granulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Granulator {
    /// Create a new granulator with a randomly seeded generator.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Create a new granulator with a deterministic, seeded generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Extract a single grain. See [`extract_grain`].
    pub fn extract(
        &mut self,
        buffer: &[f32],
        parameters: &GrainParameters,
    ) -> Result<Grain, Error> {
        extract_grain(buffer, parameters, &mut self.rng)
    }

    /// Extract `count` grains with the given parameters. Unspecified starts and lengths are
    /// drawn for each grain individually.
    pub fn extract_many(
        &mut self,
        buffer: &[f32],
        parameters: &GrainParameters,
        count: usize,
    ) -> Result<Vec<Grain>, Error> {
        (0..count)
            .map(|_| extract_grain(buffer, parameters, &mut self.rng))
            .collect()
    }
}

// -------------------------------------------------------------------------------------------------
