/// Calibration text lookup.
///
/// Provides the [`CalibrationStore`](store::CalibrationStore) capability
/// together with directory-backed and in-memory implementations.
pub mod store;

/// Device calibration resolution.
///
/// Provides the [`CalibrationResolver`](resolve::CalibrationResolver) that
/// turns a device identifier into a [`Calibration`](crate::structs::calibration::Calibration).
pub mod resolve;

/// Whole-file decoding.
///
/// Provides the [`Decoder`](decode::Decoder) that runs header, calibration
/// and pixel decoding as one all-or-nothing operation.
pub mod decode;
