use std::path::PathBuf;

/// Returns `$err` when `$level` is at or above the configured fail level,
/// otherwise logs it at `$level` and carries on.
#[macro_export]
macro_rules! log_or_err {
    ($state:expr, $level:expr, $err:expr $(,)?) => {{
        if $level <= $state.fail_level {
            return Err($err);
        } else {
            match $level {
                ::log::Level::Error => ::log::error!("{}", $err),
                ::log::Level::Warn => ::log::warn!("{}", $err),
                ::log::Level::Info => ::log::info!("{}", $err),
                ::log::Level::Debug => ::log::debug!("{}", $err),
                ::log::Level::Trace => ::log::trace!("{}", $err),
            }
        }
    }};
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Apparently not a Stratec file, file length {0} <= 1609 bytes")]
    TooShort(usize),

    #[error("Apparently not a Stratec file, device string {0:?} does not name a .typ")]
    InvalidDevice(String),

    #[error(
        "Pixel data truncated: {width}x{height} matrix needs {required} bytes, file holds {actual}"
    )]
    TruncatedPixelData {
        width: u16,
        height: u16,
        required: usize,
        actual: usize,
    },

    #[error("Pixel matrix is empty ({width}x{height})")]
    EmptyMatrix { width: u16, height: u16 },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No calibration resource for device {0:?}")]
    ResourceNotFound(String),

    #[error("Calibration key {0} not found")]
    KeyNotFound(&'static str),

    #[error("Calibration value for {key} is not a number: {value:?}")]
    ParseError { key: &'static str, value: String },
}

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error("Path is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Could not read input file {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure of a whole-file decode.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] IoError),
}
