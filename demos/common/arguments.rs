use std::path::PathBuf;

use arg::{parse_args, Args};

use strum::VariantNames;

use granulator::WindowKind;

// -------------------------------------------------------------------------------------------------

const DEFAULT_LOG_LEVEL: log::Level = if cfg!(debug_assertions) {
    log::Level::Debug
} else {
    log::Level::Warn
};

// -------------------------------------------------------------------------------------------------

/// Program arguments for the granulator demo applications.
#[derive(Args, Debug, Default)]
#[allow(unused)]
pub struct Arguments {
    #[arg(short = "i", long = "input")]
    /// WAV file to read grains from.
    pub input_path: Option<PathBuf>,
    #[arg(short = "o", long = "output")]
    /// WAV file to write the merged grains into.
    pub output_path: Option<PathBuf>,
    #[arg(short = "g", long = "grains")]
    /// Number of grains to extract.
    pub grain_count: Option<usize>,
    #[arg(long = "grain-ms")]
    /// Length of each grain in milliseconds.
    pub grain_ms: Option<f32>,
    #[arg(long = "fade-ms")]
    /// Maximum window length in milliseconds. Longer grains only get faded in and out.
    pub fade_ms: Option<f32>,
    #[arg(long = "overlap-ms")]
    /// Overlap of merged grains in milliseconds.
    pub overlap_ms: Option<f32>,
    #[arg(short = "w", long = "window")]
    /// Grain window name. Unknown names list all available windows.
    pub window: Option<String>,
    #[arg(short = "t", long = "threshold")]
    /// Drop grains which are more than the given dB quieter than the loudest grain.
    pub threshold_db: Option<f32>,
    #[arg(short = "s", long = "seed")]
    /// Seed for the random grain positions. Random by default.
    pub seed: Option<u64>,
    #[arg(short = "l", long = "log-level")]
    /// Set logging level to \"debug\", \"info\", \"warn\" or \"error\".
    /// By default \"debug\" in dev builds and \"warn\" in release builds.
    pub log_level: Option<log::Level>,
}

impl Arguments {
    /// Grain window, falling back to a rectangular window for unknown names.
    #[allow(unused)]
    pub fn window_kind(&self) -> WindowKind {
        match self.window.as_deref() {
            None => WindowKind::Hanning,
            Some(name) => name.parse().unwrap_or_else(|_| {
                log::warn!(
                    "Unknown window '{name}', expected one of: {}. Using a rectangular window.",
                    WindowKind::VARIANTS.join(", ")
                );
                WindowKind::Rectangular
            }),
        }
    }
}

/// Parse demo arguments and apply the log-level arg to the logger
#[allow(unused)]
pub fn parse() -> Arguments {
    let args = parse_args::<Arguments>();

    create_logger(args.log_level);
    args
}

// -------------------------------------------------------------------------------------------------

/// Create default logger from arguments. Invoked from `parse`.
#[allow(unused)]
pub fn create_logger(log_level: Option<log::Level>) {
    simple_logger::SimpleLogger::new()
        // use default or arg level by default
        .with_level(log_level.unwrap_or(DEFAULT_LOG_LEVEL).to_level_filter())
        // disable logging in chatty modules
        .with_module_level("hound", log::LevelFilter::Warn)
        .init()
        .expect("Failed to set logger");
}
