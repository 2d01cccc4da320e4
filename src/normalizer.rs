//! Peak normalization of grain lists.

use crate::{grain::Grain, Error};

// -------------------------------------------------------------------------------------------------

/// Common peak of a grain list: the maximum sample value of all grains, clipped at zero.
///
/// Note that this is the maximum and not the maximum absolute value: negative excursions are
/// ignored. Empty grains do not contribute.
pub fn peak(grains: &[Grain]) -> f32 {
    grains
        .iter()
        .filter_map(Grain::max_sample)
        .fold(0.0, f32::max)
}

/// Scale all grains in place, so that the maximum sample value of all grains is 1.0.
///
/// Fails with [`Error::ZeroPeak`] and leaves the grains untouched when the peak is zero.
/// Empty grain lists are left as they are.
pub fn normalize_peaks(grains: &mut [Grain]) -> Result<(), Error> {
    if grains.is_empty() {
        return Ok(());
    }
    let peak = peak(grains);
    if peak == 0.0 {
        return Err(Error::ZeroPeak);
    }
    log::debug!("Normalizing {} grains with a peak of {peak}", grains.len());
    for grain in grains.iter_mut() {
        for sample in grain.iter_mut() {
            *sample /= peak;
        }
    }
    Ok(())
}

/// Peak normalized copies of the given grains. See [`normalize_peaks`].
pub fn normalized_peaks(grains: &[Grain]) -> Result<Vec<Grain>, Error> {
    let mut normalized = grains.to_vec();
    normalize_peaks(&mut normalized)?;
    Ok(normalized)
}

// -------------------------------------------------------------------------------------------------
