//! Pixel matrix decoding.
//!
//! Pixels follow the header as `width * height` little-endian signed 16-bit
//! words in row-major order. Each word `s` is remapped as
//!
//! - `s >= 0`: `s - 32768`
//! - `s < 0`: `s + 32767`
//!
//! The negative branch adds 32767, not 32768, so raw `0x7FFF` and `0x8000`
//! both land on -1. Existing consumers of Stratec data depend on this exact
//! mapping.

use log::{Level, debug};

use crate::log_or_err;
use crate::process::decode::DecoderState;
use crate::structs::header::{Header, PIXEL_DATA_OFFSET};
use crate::utils::byte_io::ByteIoSliceReader;
use crate::utils::errors::FormatError;

/// Observed value range over the unsigned reinterpretation of the pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub min: u16,
    pub max: u16,
}

impl DisplayRange {
    /// Range of `value as u16` over `pixels`, `None` when empty.
    pub fn of(pixels: &[i16]) -> Option<Self> {
        pixels.iter().fold(None, |range, &value| {
            let unsigned = value as u16;
            Some(match range {
                None => DisplayRange {
                    min: unsigned,
                    max: unsigned,
                },
                Some(DisplayRange { min, max }) => DisplayRange {
                    min: min.min(unsigned),
                    max: max.max(unsigned),
                },
            })
        })
    }
}

/// Remaps one raw pixel word.
#[inline(always)]
pub fn remap(raw: i16) -> i16 {
    let raw = i32::from(raw);
    let value = if raw >= 0 { raw - 32768 } else { raw + 32767 };
    value as i16
}

/// Decoded density pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    width: u16,
    height: u16,
    data: Vec<i16>,
    range: Option<DisplayRange>,
}

impl PixelMatrix {
    pub fn read(
        state: &DecoderState,
        reader: &ByteIoSliceReader,
        header: &Header,
    ) -> Result<Self, FormatError> {
        let (width, height) = (header.pic_matrix_x, header.pic_matrix_y);
        let required = PIXEL_DATA_OFFSET + header.pixel_data_len();

        if reader.len() < required {
            return Err(FormatError::TruncatedPixelData {
                width,
                height,
                required,
                actual: reader.len(),
            });
        }

        if header.pixel_count() == 0 {
            log_or_err!(state, Level::Warn, FormatError::EmptyMatrix { width, height });
        }

        let trailing = reader.len() - required;
        if trailing > 0 {
            debug!("{trailing} bytes of trailing data after the pixel matrix");
        }

        let data: Vec<i16> = reader
            .get_i16_run_at(PIXEL_DATA_OFFSET, header.pixel_count())
            .map_err(|_| FormatError::TruncatedPixelData {
                width,
                height,
                required,
                actual: reader.len(),
            })?
            .into_iter()
            .map(remap)
            .collect();

        let range = DisplayRange::of(&data);
        debug!("Decoded {width}x{height} pixels, display range {range:?}");

        Ok(Self {
            width,
            height,
            data,
            range,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[i16] {
        &self.data
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: u16, y: u16) -> Option<i16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(x as usize + y as usize * self.width as usize)
            .copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i16]> {
        self.data.chunks_exact(self.width.max(1) as usize)
    }

    /// Pixels reinterpreted as unsigned 16-bit, the domain of the display
    /// calibration.
    pub fn unsigned(&self) -> impl Iterator<Item = u16> + '_ {
        self.data.iter().map(|&value| value as u16)
    }

    pub fn range(&self) -> Option<DisplayRange> {
        self.range
    }

    pub fn min(&self) -> Option<u16> {
        self.range.map(|range| range.min)
    }

    pub fn max(&self) -> Option<u16> {
        self.range.map(|range| range.max)
    }

    pub fn into_vec(self) -> Vec<i16> {
        self.data
    }
}

/// Decodes the pixel matrix described by `header` with default checks.
pub fn decode_pixels(buffer: &[u8], header: &Header) -> Result<PixelMatrix, FormatError> {
    PixelMatrix::read(
        &DecoderState::default(),
        &ByteIoSliceReader::from_slice(buffer),
        header,
    )
}
