//! Loudness measurement of grains and sample buffers.

use crate::{grain::Grain, Error};

// -------------------------------------------------------------------------------------------------

/// Root mean square of the given samples. `None` for empty buffers.
pub fn rms(buffer: &[f32]) -> Option<f32> {
    if buffer.is_empty() {
        return None;
    }
    // accumulate in f64 to keep long buffers precise
    let sum_of_squares = buffer
        .iter()
        .map(|sample| (*sample as f64) * (*sample as f64))
        .sum::<f64>();
    Some((sum_of_squares / buffer.len() as f64).sqrt() as f32)
}

/// Loudness of the given samples in dB relative to full scale, calculated from their RMS.
///
/// Silent buffers have a loudness of negative infinity. Empty buffers, or buffers containing
/// non-finite samples, can't be measured and result in an [`Error::DegenerateGrain`].
pub fn dbfs(buffer: &[f32]) -> Result<f32, Error> {
    let rms = rms(buffer).ok_or(Error::DegenerateGrain)?;
    let dbfs = 20.0 * rms.abs().log10();
    if dbfs.is_nan() || dbfs == f32::INFINITY {
        return Err(Error::DegenerateGrain);
    }
    Ok(dbfs)
}

/// Loudness of the loudest grain in dB relative to full scale.
///
/// Grains which can't be measured are skipped. Returns negative infinity when no grain could be
/// measured.
pub fn max_dbfs(grains: &[Grain]) -> f32 {
    grains
        .iter()
        .enumerate()
        .filter_map(|(index, grain)| match dbfs(grain) {
            Ok(dbfs) => Some(dbfs),
            Err(err) => {
                log::debug!("Skipping grain #{index} in loudness measurement: {err}");
                None
            }
        })
        .fold(f32::NEG_INFINITY, f32::max)
}

/// Keep grains which are at most `threshold_db` decibels quieter than the loudest grain, i.e.
/// grains with a loudness of at least `max_dbfs(grains) - threshold_db`.
///
/// Negative thresholds require grains to be louder than the loudest grain and thus drop all
/// grains. Grains which can't be measured are dropped. Silent grains only pass when the
/// threshold is negative infinity, which is the case for an infinite `threshold_db` or when
/// no grain is louder than silence.
pub fn retain_loud_grains(grains: Vec<Grain>, threshold_db: f32) -> Vec<Grain> {
    let threshold = max_dbfs(&grains) - threshold_db;
    let grain_count = grains.len();
    let loud_grains = grains
        .into_iter()
        .filter(|grain| dbfs(grain).is_ok_and(|dbfs| dbfs >= threshold))
        .collect::<Vec<_>>();
    log::debug!(
        "Kept {} of {grain_count} grains above {threshold} dBFS",
        loud_grains.len()
    );
    loud_grains
}

// -------------------------------------------------------------------------------------------------
