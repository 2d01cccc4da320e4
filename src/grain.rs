//! Grain and sample buffer types.

use std::ops::{Deref, DerefMut};

// -------------------------------------------------------------------------------------------------

/// A single channel, owned buffer of audio samples.
pub type SampleBuffer = Vec<f32>;

/// An ordered list of grains. The order defines the merge order.
pub type GrainList = Vec<Grain>;

// -------------------------------------------------------------------------------------------------

/// A short, usually windowed, segment of audio copied from a source buffer.
///
/// Grains own their samples, so they can be windowed, scaled or merged without touching the
/// source buffer they got extracted from. The grain's provenance, the range in the source buffer,
/// is kept along with the samples.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Grain {
    samples: SampleBuffer,
    start: usize,
    source_len: usize,
}

impl Grain {
    /// Create a new grain from the given samples which are not related to any source buffer.
    pub fn new(samples: SampleBuffer) -> Self {
        let source_len = samples.len();
        Self {
            samples,
            start: 0,
            source_len,
        }
    }

    /// Create a new grain from samples which got copied from `start` in some source buffer.
    pub fn with_source_range(samples: SampleBuffer, start: usize) -> Self {
        let source_len = samples.len();
        Self {
            samples,
            start,
            source_len,
        }
    }

    /// Start offset of the grain in its source buffer.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of samples that got copied from the source buffer.
    #[inline]
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Read-only access to the grain's samples.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the grain and return its samples.
    pub fn into_samples(self) -> SampleBuffer {
        self.samples
    }

    /// Maximum sample value, not the maximum absolute value. `None` for empty grains.
    pub fn max_sample(&self) -> Option<f32> {
        self.samples.iter().copied().reduce(f32::max)
    }

    /// Multiply all samples with the given gain.
    pub fn scale(&mut self, gain: f32) {
        for sample in self.samples.iter_mut() {
            *sample *= gain;
        }
    }

    /// Multiply all samples elementwise with the given envelope.
    /// The envelope must be as long as the grain.
    pub(crate) fn apply_envelope(&mut self, envelope: &[f32]) {
        debug_assert_eq!(envelope.len(), self.samples.len());
        for (sample, gain) in self.samples.iter_mut().zip(envelope) {
            *sample *= gain;
        }
    }
}

impl From<SampleBuffer> for Grain {
    fn from(samples: SampleBuffer) -> Self {
        Self::new(samples)
    }
}

impl Deref for Grain {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}

impl DerefMut for Grain {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.samples
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance() {
        let grain = Grain::with_source_range(vec![0.5; 8], 100);
        assert_eq!(grain.start(), 100);
        assert_eq!(grain.source_len(), 8);
        assert_eq!(grain.len(), 8);

        let grain = Grain::from(vec![1.0, 2.0]);
        assert_eq!(grain.start(), 0);
        assert_eq!(grain.source_len(), 2);
    }

    #[test]
    fn max_sample_is_not_absolute() {
        let grain = Grain::new(vec![-4.0, 0.25, -1.0]);
        assert_eq!(grain.max_sample(), Some(0.25));
        assert_eq!(Grain::default().max_sample(), None);
    }

    #[test]
    fn scale_and_envelope() {
        let mut grain = Grain::new(vec![1.0, 2.0, 4.0]);
        grain.scale(0.5);
        assert_eq!(grain.samples(), &[0.5, 1.0, 2.0]);
        grain.apply_envelope(&[0.0, 1.0, 0.5]);
        assert_eq!(grain.samples(), &[0.0, 1.0, 1.0]);
        // samples are mutable through the slice
        grain[0] = -1.0;
        for sample in grain.iter_mut().skip(1) {
            *sample *= 2.0;
        }
        assert_eq!(grain.into_samples(), vec![-1.0, 2.0, 2.0]);
    }
}
