use std::fs;
use std::path::Path;

use log::{Level, debug};

use crate::process::resolve::CalibrationResolver;
use crate::process::store::CalibrationStore;
use crate::structs::header::Header;
use crate::structs::image::DecodedImage;
use crate::structs::pixels::PixelMatrix;
use crate::utils::byte_io::ByteIoSliceReader;
use crate::utils::errors::{DecodeError, IoError};

/// Validation settings shared by the decoding stages.
#[derive(Debug, Clone, Copy)]
pub struct DecoderState {
    /// Soft checks at or above this level abort the decode.
    pub fail_level: Level,
}

impl Default for DecoderState {
    fn default() -> Self {
        Self {
            fail_level: Level::Error,
        }
    }
}

/// Decodes whole Stratec files.
///
/// A decode runs the header, the device calibration and the pixel matrix in
/// that order. Any failure aborts the whole call, so a [`DecodedImage`] is
/// either complete or not returned at all. The decoder itself holds no
/// per-file state and can be shared between threads when its store can.
#[derive(Debug, Clone)]
pub struct Decoder<S> {
    resolver: CalibrationResolver<S>,
    state: DecoderState,
}

impl<S: CalibrationStore> Decoder<S> {
    pub fn new(store: S) -> Self {
        Self {
            resolver: CalibrationResolver::new(store),
            state: DecoderState::default(),
        }
    }

    /// Sets the failure level for soft validation checks.
    ///
    /// - `log::Level::Error`: only hard format errors fail (default)
    /// - `log::Level::Warn`: warnings such as an empty matrix fail too
    pub fn set_fail_level(&mut self, level: Level) {
        self.state.fail_level = level;
    }

    pub fn fail_level(&self) -> Level {
        self.state.fail_level
    }

    pub fn resolver(&self) -> &CalibrationResolver<S> {
        &self.resolver
    }

    /// Decodes a complete in-memory file.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        let reader = ByteIoSliceReader::from_slice(bytes);

        let header = Header::read(&reader)?;
        let calibration = self.resolver.resolve(&header.device)?;
        let pixels = PixelMatrix::read(&self.state, &reader, &header)?;

        Ok(DecodedImage {
            header,
            calibration,
            pixels,
        })
    }

    /// Reads `path` in one go and decodes it.
    ///
    /// The file handle is released before decoding starts.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> Result<DecodedImage, DecodeError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(IoError::NotAFile(path.to_path_buf()).into());
        }

        let bytes = fs::read(path).map_err(|source| IoError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        self.decode(&bytes)
    }
}

/// Decodes `bytes` with default settings, resolving calibration via `store`.
pub fn decode<S: CalibrationStore>(bytes: &[u8], store: S) -> Result<DecodedImage, DecodeError> {
    Decoder::new(store).decode(bytes)
}

/// Reads and decodes the file at `path` with default settings.
pub fn decode_file<S: CalibrationStore>(
    path: impl AsRef<Path>,
    store: S,
) -> Result<DecodedImage, DecodeError> {
    Decoder::new(store).decode_file(path)
}
