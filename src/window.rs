//! Amplitude envelopes (windows) which get applied to grains.

use std::f64::consts::PI;

// -------------------------------------------------------------------------------------------------

/// Grain window families.
///
/// Parsing via [`std::str::FromStr`] is strict and fails for unknown names. Use
/// [`WindowKind::from_name`] for a lenient parser which falls back to a rectangular window.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum WindowKind {
    /// Flat envelope of ones.
    #[strum(to_string = "rectangular", serialize = "ones", serialize = "boxcar")]
    Rectangular,
    /// Bartlett window: linear rise and fall, zero at the edges.
    #[strum(to_string = "triangular", serialize = "bartlett", serialize = "triangle")]
    Triangular,
    #[strum(to_string = "blackman")]
    Blackman,
    /// Raised cosine window, zero at the edges.
    #[default]
    #[strum(to_string = "hanning", serialize = "hann")]
    Hanning,
    /// Raised cosine window which does not fully reach zero at the edges.
    #[strum(to_string = "hamming")]
    Hamming,
}

impl WindowKind {
    /// Parse a window name, falling back to [`WindowKind::Rectangular`] for unknown names.
    pub fn from_name(name: &str) -> Self {
        name.trim().parse().unwrap_or_else(|_| {
            log::debug!("Unknown window '{name}': using a rectangular window");
            Self::Rectangular
        })
    }

    /// Window gain at sample `index` of a window with `length` samples.
    /// `length` must be > 1 and `index` < `length`.
    fn gain(&self, index: usize, length: usize) -> f64 {
        let m = (length - 1) as f64;
        let n = index as f64;
        match self {
            WindowKind::Rectangular => 1.0,
            WindowKind::Triangular => 1.0 - (2.0 * n / m - 1.0).abs(),
            WindowKind::Blackman => {
                0.42 - 0.5 * (2.0 * PI * n / m).cos() + 0.08 * (4.0 * PI * n / m).cos()
            }
            WindowKind::Hanning => 0.5 - 0.5 * (2.0 * PI * n / m).cos(),
            WindowKind::Hamming => 0.54 - 0.46 * (2.0 * PI * n / m).cos(),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Create a symmetric window of the given kind with `length` gain values in range [0, 1].
///
/// A zero length results in an empty envelope. Windows with a single sample are `[1.0]`.
pub fn envelope(kind: WindowKind, length: usize) -> Vec<f32> {
    match length {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => (0..length)
            // clamp rounding errors, e.g. blackman's edges are slightly below zero
            .map(|index| kind.gain(index, length).clamp(0.0, 1.0) as f32)
            .collect(),
    }
}

/// Create an envelope of `grain_length` samples which applies a `window_length` window of the
/// given kind at the grain's edges only.
///
/// The window gets split in two: its first `window_length / 2` values fade in, the remaining
/// values fade out, and the gap in between is filled with ones. When `window_length` is equal to
/// or greater than `grain_length`, this is a plain `grain_length` sized window.
pub fn split_envelope(kind: WindowKind, grain_length: usize, window_length: usize) -> Vec<f32> {
    if window_length >= grain_length {
        return envelope(kind, grain_length);
    }
    let window = envelope(kind, window_length);
    let (attack, release) = window.split_at(window_length / 2);
    let mut envelope = Vec::with_capacity(grain_length);
    envelope.extend_from_slice(attack);
    envelope.resize(attack.len() + grain_length - window_length, 1.0);
    envelope.extend_from_slice(release);
    envelope
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use strum::{IntoEnumIterator, VariantNames};

    fn assert_all_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-6, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn lengths_and_ranges() {
        for kind in WindowKind::iter() {
            assert!(envelope(kind, 0).is_empty());
            assert_eq!(envelope(kind, 1), vec![1.0]);
            for length in [2, 3, 4, 17, 64, 513] {
                let window = envelope(kind, length);
                assert_eq!(window.len(), length);
                assert!(
                    window.iter().all(|v| (0.0..=1.0).contains(v)),
                    "{kind} window out of range"
                );
            }
        }
        assert!(envelope(WindowKind::Rectangular, 32)
            .iter()
            .all(|v| *v == 1.0));
    }

    #[test]
    fn known_values() {
        assert_all_close(
            &envelope(WindowKind::Triangular, 5),
            &[0.0, 0.5, 1.0, 0.5, 0.0],
        );
        assert_all_close(&envelope(WindowKind::Hanning, 3), &[0.0, 1.0, 0.0]);
        assert_all_close(&envelope(WindowKind::Hamming, 3), &[0.08, 1.0, 0.08]);
        assert_all_close(
            &envelope(WindowKind::Hanning, 5),
            &[0.0, 0.5, 1.0, 0.5, 0.0],
        );
        let blackman = envelope(WindowKind::Blackman, 5);
        assert_all_close(&blackman, &[0.0, 0.34, 1.0, 0.34, 0.0]);
    }

    #[test]
    fn symmetry() {
        for kind in WindowKind::iter() {
            let window = envelope(kind, 33);
            let reversed = window.iter().rev().copied().collect::<Vec<_>>();
            assert_all_close(&window, &reversed);
        }
    }

    #[test]
    fn split() {
        let window = envelope(WindowKind::Hanning, 4);
        let split = split_envelope(WindowKind::Hanning, 10, 4);
        assert_eq!(split.len(), 10);
        assert_eq!(&split[..2], &window[..2]);
        assert!(split[2..8].iter().all(|v| *v == 1.0));
        assert_eq!(&split[8..], &window[2..]);

        // odd window sizes put the extra sample into the release
        let window = envelope(WindowKind::Triangular, 5);
        let split = split_envelope(WindowKind::Triangular, 8, 5);
        assert_eq!(split.len(), 8);
        assert_eq!(&split[..2], &window[..2]);
        assert_eq!(&split[2..5], &[1.0, 1.0, 1.0]);
        assert_eq!(&split[5..], &window[2..]);

        // no split needed
        assert_eq!(
            split_envelope(WindowKind::Blackman, 6, 6),
            envelope(WindowKind::Blackman, 6)
        );
        // an empty window leaves the grain untouched
        assert_eq!(split_envelope(WindowKind::Hanning, 3, 0), vec![1.0; 3]);
    }

    #[test]
    fn names() {
        assert_eq!(WindowKind::Hanning.to_string(), "hanning");
        assert_eq!("bartlett".parse::<WindowKind>(), Ok(WindowKind::Triangular));
        assert_eq!("Hann".parse::<WindowKind>(), Ok(WindowKind::Hanning));
        assert!("kaiser".parse::<WindowKind>().is_err());
        assert_eq!(WindowKind::from_name("kaiser"), WindowKind::Rectangular);
        assert_eq!(WindowKind::from_name(" blackman "), WindowKind::Blackman);
        assert_eq!(
            WindowKind::VARIANTS,
            &["rectangular", "triangular", "blackman", "hanning", "hamming"]
        );
        for name in WindowKind::VARIANTS {
            assert_eq!(WindowKind::from_name(name).to_string(), *name);
        }
    }
}
