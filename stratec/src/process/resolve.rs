use log::debug;

use crate::process::store::CalibrationStore;
use crate::structs::calibration::Calibration;
use crate::utils::errors::ConfigError;

pub const XSLOPE_KEY: &str = "XSlope";
pub const XINTER_KEY: &str = "XInter";

/// Resolves device identifiers to calibration coefficients.
///
/// The `.typ` text of a device is a list of `key = value` lines. For each
/// required key the first line containing it is taken, all whitespace is
/// removed, and whatever follows the first `=` is parsed as a number.
#[derive(Debug, Clone)]
pub struct CalibrationResolver<S> {
    store: S,
}

impl<S: CalibrationStore> CalibrationResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn resolve(&self, device: &str) -> Result<Calibration, ConfigError> {
        let text = self
            .store
            .lookup(device)
            .ok_or_else(|| ConfigError::ResourceNotFound(device.to_string()))?;

        let calibration = parse_typ(&text)?;
        debug!(
            "Calibration for {device:?}: XSlope {}, XInter {}",
            calibration.x_slope, calibration.x_inter
        );

        Ok(calibration)
    }
}

/// Extracts both coefficients from `.typ` text.
pub fn parse_typ(text: &str) -> Result<Calibration, ConfigError> {
    Ok(Calibration {
        x_slope: typ_value(text, XSLOPE_KEY)?,
        x_inter: typ_value(text, XINTER_KEY)?,
    })
}

/// Value of `key` in `.typ` text.
///
/// A matched line without `=` is parsed whole, which fails for anything
/// but a bare number. Only finite decimal values are accepted.
pub fn typ_value(text: &str, key: &'static str) -> Result<f64, ConfigError> {
    let line = text
        .lines()
        .find(|line| line.contains(key))
        .ok_or(ConfigError::KeyNotFound(key))?;

    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let value = compact
        .split_once('=')
        .map_or(compact.as_str(), |(_, value)| value);

    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(ConfigError::ParseError {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::store::MemoryStore;
    use crate::utils::fixture::{DEVICE, TYP_TEXT};

    #[test]
    fn resolves_both_coefficients() {
        let resolver = CalibrationResolver::new(MemoryStore::new().with(DEVICE, TYP_TEXT));

        assert_eq!(
            resolver.resolve(DEVICE),
            Ok(Calibration {
                x_slope: 1724.0,
                x_inter: -322.0,
            })
        );
    }

    #[test]
    fn missing_resource() {
        let resolver = CalibrationResolver::new(MemoryStore::new());

        assert_eq!(
            resolver.resolve(DEVICE),
            Err(ConfigError::ResourceNotFound(DEVICE.to_string()))
        );
    }

    #[test]
    fn whitespace_and_crlf_are_tolerated() {
        let text = "Header\r\n  X Slope ignored\r\n\tXSlope\t=  1 7 2 4.5 \r\nXInter= -3.25e2\r\n";

        assert_eq!(typ_value(text, XSLOPE_KEY), Ok(1724.5));
        assert_eq!(typ_value(text, XINTER_KEY), Ok(-325.0));
    }

    #[test]
    fn first_matching_line_wins() {
        let text = "XSlopeComment = 7\nXSlope = 1\n";

        assert_eq!(typ_value(text, XSLOPE_KEY), Ok(7.0));
    }

    #[test]
    fn keys_are_case_sensitive() {
        assert_eq!(
            typ_value("xslope = 1\nXINTER = 2\n", XSLOPE_KEY),
            Err(ConfigError::KeyNotFound(XSLOPE_KEY))
        );
    }

    #[test]
    fn missing_keys() {
        assert_eq!(
            parse_typ("XInter = 1\n"),
            Err(ConfigError::KeyNotFound(XSLOPE_KEY))
        );
        assert_eq!(
            parse_typ("XSlope = 1\n"),
            Err(ConfigError::KeyNotFound(XINTER_KEY))
        );
        assert_eq!(parse_typ(""), Err(ConfigError::KeyNotFound(XSLOPE_KEY)));
    }

    #[test]
    fn malformed_values() {
        for (line, value) in [
            ("XSlope = one", "one"),
            ("XSlope =", ""),
            ("XSlope 12", "XSlope12"),
            ("XSlope = 1,5", "1,5"),
            ("XSlope = nan", "nan"),
            ("XSlope = NaN", "NaN"),
            ("XSlope = inf", "inf"),
            ("XSlope = -inf", "-inf"),
            ("XSlope = infinity", "infinity"),
            ("XSlope = 1e999", "1e999"),
        ] {
            assert_eq!(
                typ_value(line, XSLOPE_KEY),
                Err(ConfigError::ParseError {
                    key: XSLOPE_KEY,
                    value: value.to_string(),
                })
            );
        }
    }

    #[test]
    fn value_after_first_equals_sign() {
        assert_eq!(
            typ_value("XInter = =4", XINTER_KEY),
            Err(ConfigError::ParseError {
                key: XINTER_KEY,
                value: "=4".to_string(),
            })
        );
    }
}
