use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Scene presets selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenePreset {
    /// Checker ground with a grid of random bouncing spheres
    BouncingSpheres,
    /// Two large checker-textured globes
    CheckeredSpheres,
    /// Image-textured globe with a snowman, lights and snowfall
    Earth,
    /// Dim scene lit by a single HDR sphere light
    SimpleLight,
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumenpath")]
#[command(about = "An offline Monte Carlo path tracer")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Scene preset to render
    #[arg(long, value_enum, default_value = "bouncing-spheres", help = "Scene preset to render")]
    pub scene: ScenePreset,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces per path
    #[arg(long, default_value = "50", help = "Maximum number of ray bounces per path")]
    pub max_depth: u32,

    /// Seed for the render and scene random generators
    #[arg(long, default_value = "0", help = "Seed for the render and scene random generators")]
    pub seed: u64,

    /// Send image to TEV for real-time visualization
    #[arg(long, help = "Send image to TEV for real-time visualization")]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long, help = "TEV client IP address and port (automatically enables --tev)")]
    pub tev_address: Option<String>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png", help = "Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)")]
    pub output: String,
}
