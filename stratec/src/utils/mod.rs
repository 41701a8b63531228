//! Utility functions and supporting infrastructure.
//!
//! Provides little-endian byte access over the raw file buffer and the
//! error types shared by every decoding stage.

pub mod byte_io;
pub mod errors;

#[cfg(test)]
pub(crate) mod fixture;
