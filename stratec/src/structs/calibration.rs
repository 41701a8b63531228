//! Device and display calibrations.
//!
//! Two linear calibrations travel with a decoded image. The device
//! calibration (`XSlope`, `XInter`) comes from the scanner's `.typ`
//! resource and is carried as metadata. The display calibration is the
//! same for every Stratec file and maps the unsigned reinterpretation of a
//! pixel onto attenuation in 1/cm.

/// Device-specific linear coefficients resolved from a `.typ` resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub x_slope: f64,
    pub x_inter: f64,
}

/// A straight-line calibration `physical = intercept + slope * raw`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayCalibration {
    pub intercept: f64,
    pub slope: f64,
    pub unit: &'static str,
}

/// Format-wide display calibration shared by all Stratec files.
pub const DISPLAY_CALIBRATION: DisplayCalibration = DisplayCalibration {
    intercept: -32.768,
    slope: 0.001,
    unit: "1/cm",
};

impl DisplayCalibration {
    #[inline]
    pub fn apply(&self, raw: u16) -> f64 {
        self.intercept + self.slope * f64::from(raw)
    }
}

impl Default for DisplayCalibration {
    fn default() -> Self {
        DISPLAY_CALIBRATION
    }
}
