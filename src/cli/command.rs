use std::path::PathBuf;

use clap::{Args, Parser as ClapParser, Subcommand, ValueEnum};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nstratec ",
    env!("STRATEC_VERSION"),
    "\nbuilt ",
    env!("BUILD_TIMESTAMP"),
);

#[derive(Debug, ClapParser)]
#[command(
    name         = env!("CARGO_PKG_NAME"),
    version      = env!("CARGO_PKG_VERSION"),
    long_version = LONG_VERSION,
    author       = env!("CARGO_PKG_AUTHORS"),
    about        = "Tools for inspecting and decoding Stratec pQCT image files",
    long_about   = None,
)]
pub struct Cli {
    /// Set the log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,

    /// Treat warnings as fatal errors and stop at the first failed file.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Show progress bars during operations.
    #[arg(long, global = true)]
    pub progress: bool,

    /// Directory holding the device calibration (.typ) files.
    #[arg(long, global = true, value_name = "DIR", default_value = "typ")]
    pub typ_dir: PathBuf,

    /// Choose an operation to perform.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode the specified Stratec files into raster images.
    Decode(DecodeArgs),

    /// Print file information
    Info(InfoArgs),
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Input Stratec files (use "-" for stdin).
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for images and metadata files.
    #[arg(long, value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Raster format for output.
    #[arg(long, value_enum, default_value_t = ImageFormat::Pgm)]
    pub format: ImageFormat,

    /// Skip writing the YAML metadata sidecar.
    #[arg(long)]
    pub no_metadata: bool,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Input Stratec files (use "-" for stdin).
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Disable logging output.
    Off,
    /// No output except errors.
    Error,
    /// Show warnings and errors.
    Warn,
    /// Show info, warnings and errors (default).
    Info,
    /// Show debug, info, warnings and errors.
    Debug,
    /// Show all log messages including trace.
    Trace,
}

impl LogLevel {
    /// Convert LogLevel to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Colorized human-readable text.
    Plain,
    /// Structured JSON per log record.
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum ImageFormat {
    /// 16-bit binary PGM holding the unsigned pixel values.
    Pgm,
    /// Headerless signed 16-bit little-endian pixels.
    Raw,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Pgm => "pgm",
            ImageFormat::Raw => "raw",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "pqct",
            "decode",
            "a.M01",
            "b.M01",
            "--format",
            "raw",
            "--typ-dir",
            "/opt/typ",
            "--strict",
        ])
        .unwrap();

        assert!(cli.strict);
        assert_eq!(cli.typ_dir, PathBuf::from("/opt/typ"));
        match cli.command {
            Commands::Decode(args) => {
                assert_eq!(args.inputs.len(), 2);
                assert_eq!(args.format, ImageFormat::Raw);
                assert!(args.output_path.is_none());
            }
            Commands::Info(_) => panic!("expected decode"),
        }
    }

    #[test]
    fn inputs_are_required() {
        assert!(Cli::try_parse_from(["pqct", "info"]).is_err());
    }
}
