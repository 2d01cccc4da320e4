//! Granulates a WAV file: extracts random grains, drops quiet ones, balances their peaks and
//! merges them into a new WAV file.

use std::{error::Error, path::Path};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use granulator::{
    extract_grain, max_dbfs, merge_grains, normalize_peaks, retain_loud_grains, GrainParameters,
};

// -------------------------------------------------------------------------------------------------

// Common demo code
#[path = "./common/arguments.rs"]
mod arguments;

// -------------------------------------------------------------------------------------------------

// Default granulation parameters (tweak as needed!)
const GRAIN_COUNT: usize = 64;
const GRAIN_MS: f32 = 120.0;
const FADE_MS: f32 = 40.0;
const OVERLAP_MS: f32 = 20.0;
const THRESHOLD_DB: f32 = 24.0;

// -------------------------------------------------------------------------------------------------

/// Read a WAV file and mix it down to a single channel.
fn read_mono(path: &Path) -> Result<(Vec<f32>, u32), Box<dyn Error>> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let interleaved = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|sample| sample as f32 * scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    let channel_count = spec.channels as usize;
    let mono = interleaved
        .chunks_exact(channel_count)
        .map(|frame| frame.iter().sum::<f32>() / channel_count as f32)
        .collect();
    Ok((mono, spec.sample_rate))
}

/// Write a single channel float WAV file.
fn write_mono(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), Box<dyn Error>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for sample in samples {
        writer.write_sample(*sample)?;
    }
    writer.finalize()?;
    Ok(())
}

// -------------------------------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn Error>> {
    // Parse optional arguments
    let args = arguments::parse();
    let (Some(input_path), Some(output_path)) = (&args.input_path, &args.output_path) else {
        return Err("Both, an input and an output path are required".into());
    };

    let (buffer, sample_rate) = read_mono(input_path)?;
    let ms_to_samples = |ms: f32| (ms * sample_rate as f32 / 1000.0) as usize;

    let grain_length = ms_to_samples(args.grain_ms.unwrap_or(GRAIN_MS));
    let overlap = ms_to_samples(args.overlap_ms.unwrap_or(OVERLAP_MS));
    if grain_length == 0 || grain_length > buffer.len() {
        return Err(format!(
            "Grain length of {grain_length} samples does not fit into the input file"
        )
        .into());
    }
    if overlap > grain_length {
        return Err("The overlap must not exceed the grain length".into());
    }

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    // Extract grains at random positions which fit into the file
    let parameters = GrainParameters::new()
        .with_length(grain_length)
        .with_window(args.window_kind())
        .with_max_window_length(ms_to_samples(args.fade_ms.unwrap_or(FADE_MS)));
    let mut grains = Vec::new();
    for _ in 0..args.grain_count.unwrap_or(GRAIN_COUNT) {
        let start = rng.random_range(0..=buffer.len() - grain_length);
        grains.push(extract_grain(
            &buffer,
            &parameters.clone().with_start(start),
            &mut rng,
        )?);
    }
    log::info!(
        "Extracted {} grains, loudest grain has {:.2} dBFS",
        grains.len(),
        max_dbfs(&grains)
    );

    // Balance and merge the loud ones
    let mut grains = retain_loud_grains(grains, args.threshold_db.unwrap_or(THRESHOLD_DB));
    normalize_peaks(&mut grains)?;
    let output = merge_grains(&grains, overlap)?;
    log::info!(
        "Merged {} grains into {:.2} seconds of audio",
        grains.len(),
        output.len() as f32 / sample_rate as f32
    );

    write_mono(output_path, &output, sample_rate)
}
