//! Overlap-add resynthesis of grain lists.

use crate::{
    grain::{Grain, SampleBuffer},
    Error,
};

// -------------------------------------------------------------------------------------------------

/// Merge a list of grains into a single buffer, overlapping `overlap` samples of each grain with
/// the end of the previously merged grains.
///
/// Overlapping samples are simply summed up. There's no gain compensation, so the overlapping
/// parts may exceed the unit range when the grains are not windowed.
///
/// The resulting buffer is `overlap * (grains.len() - 1)` samples shorter than all grains
/// together. Fails when there are no grains or when one of the merged grains, or the merged
/// output so far, is shorter than the overlap.
pub fn merge_grains(grains: &[Grain], overlap: usize) -> Result<SampleBuffer, Error> {
    let (first, rest) = grains.split_first().ok_or(Error::NoGrains)?;

    let total_len = grains.iter().map(|grain| grain.len()).sum::<usize>();
    let mut output = SampleBuffer::with_capacity(total_len);
    output.extend_from_slice(first);

    for grain in rest {
        let available = output.len().min(grain.len());
        if overlap > available {
            return Err(Error::InvalidOverlap { overlap, available });
        }
        let (head, tail) = grain.split_at(overlap);
        let overlap_start = output.len() - overlap;
        for (target, sample) in output[overlap_start..].iter_mut().zip(head) {
            *target += *sample;
        }
        output.extend_from_slice(tail);
    }

    Ok(output)
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_add() {
        let grains = vec![Grain::new(vec![1.0; 6]), Grain::new(vec![1.0; 4])];
        let output = merge_grains(&grains, 2).unwrap();
        assert_eq!(output.len(), 6 + 4 - 2);
        assert_eq!(output, vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0]);
    }

    #[test]
    fn merge_order_and_length() {
        let grains = vec![
            Grain::new(vec![1.0, 2.0, 3.0]),
            Grain::new(vec![10.0, 20.0, 30.0, 40.0]),
            Grain::new(vec![100.0, 200.0]),
        ];
        let output = merge_grains(&grains, 1).unwrap();
        assert_eq!(output.len(), 3 + 4 + 2 - 2);
        assert_eq!(output, vec![1.0, 2.0, 13.0, 20.0, 30.0, 140.0, 200.0]);

        // no overlap concatenates
        let output = merge_grains(&grains, 0).unwrap();
        assert_eq!(
            output,
            vec![1.0, 2.0, 3.0, 10.0, 20.0, 30.0, 40.0, 100.0, 200.0]
        );

        // a single grain is passed through
        let output = merge_grains(&grains[..1], 3).unwrap();
        assert_eq!(output, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn full_overlap() {
        let grains = vec![Grain::new(vec![0.5; 4]), Grain::new(vec![0.25; 4])];
        assert_eq!(merge_grains(&grains, 4).unwrap(), vec![0.75; 4]);
    }

    #[test]
    fn invalid_overlaps() {
        assert!(matches!(merge_grains(&[], 0), Err(Error::NoGrains)));

        let grains = vec![Grain::new(vec![1.0; 8]), Grain::new(vec![1.0; 3])];
        assert!(matches!(
            merge_grains(&grains, 4),
            Err(Error::InvalidOverlap {
                overlap: 4,
                available: 3
            })
        ));
        let grains = vec![Grain::new(vec![1.0; 2]), Grain::new(vec![1.0; 8])];
        assert!(matches!(
            merge_grains(&grains, 3),
            Err(Error::InvalidOverlap {
                overlap: 3,
                available: 2
            })
        ));
    }
}
