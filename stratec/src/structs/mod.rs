//! Data structures representing Stratec file components.
//!
//! Contains the fixed-offset header record, the device and display
//! calibrations, the decoded pixel matrix and the aggregate image handed
//! back to callers.

pub mod calibration;
pub mod header;
pub mod image;
pub mod pixels;
