#![doc = include_str!("../README.md")]
//!
//! ## Technical Overview
//!
//! Decoder for the binary image files written by Stratec peripheral
//! quantitative CT (pQCT) scanners.
//!
//! ### File Organization
//!
//! **Header**: 1609 bytes of fixed-offset little-endian fields, including a
//! device identifier naming the scanner's `.typ` calibration resource.
//! **Pixel Data**: `width * height` signed 16-bit words, row-major, starting
//! right after the header.
//!
//! ### Calibrations
//!
//! - Device calibration (`XSlope`, `XInter`) resolved from `.typ` text
//! - Display calibration `-32.768 + 0.001 * raw` in 1/cm, shared by all files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stratec::process::decode::Decoder;
//! use stratec::process::store::DirectoryStore;
//!
//! // Calibration resources live in one directory, one file per device
//! let decoder = Decoder::new(DirectoryStore::new("typ"));
//!
//! let image = decoder.decode_file("I0012345.M01")?;
//!
//! println!("{} on {}", image.header.pat_name, image.header.device);
//! println!("{}x{} px", image.width(), image.height());
//! if let Some(range) = image.pixels.range() {
//!     println!("display range {}..={}", range.min, range.max);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Decoding stages and the calibration store they consume.
///
/// 1. **Store** ([`process::store`]): `.typ` text lookup by device.
///
/// 2. **Resolution** ([`process::resolve`]): device calibration coefficients.
///
/// 3. **Decoding** ([`process::decode`]): header, calibration and pixels as
///    one operation.
pub mod process;

/// Data structures representing Stratec file components.
///
/// - **Header** ([`structs::header`]): Fixed-offset metadata
/// - **Calibration** ([`structs::calibration`]): Device and display calibrations
/// - **Pixels** ([`structs::pixels`]): Remapped pixel matrix and display range
/// - **Image** ([`structs::image`]): The decoded aggregate
pub mod structs;

/// Utility functions and supporting infrastructure.
///
/// - **Byte I/O** ([`utils::byte_io`]): Positioned little-endian reads
/// - **Error Handling** ([`utils::errors`]): Error types
pub mod utils;

pub use process::decode::{Decoder, decode, decode_file};
pub use process::store::{CalibrationStore, DirectoryStore, MemoryStore};
pub use structs::image::DecodedImage;
pub use utils::errors::DecodeError;
