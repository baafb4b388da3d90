use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::{
    Result,
    SpecSiftError,
};

/// Thresholds for a screening run.
///
/// Convention: both tolerances are half-widths in Da. A precursor tolerance
/// of 2.5 on a query at 1000.0 admits references in (997.5, 1002.5), and a
/// fragment tolerance of 0.5 on a peak at 300.0 matches reference peaks in
/// [299.5, 300.5].
///
/// Example:
/// ```
/// use specsift::ScreenParams;
///
/// let params = ScreenParams::default();
/// assert_eq!(params.significance_height, 0.05);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScreenParams {
    /// Fraction of the base peak intensity below which peaks are ignored.
    pub significance_height: f64,
    /// Half-width of the precursor mass gate, in Da.
    pub precursor_mass_tolerance: f64,
    /// Half-width of the fragment match window, in Da.
    pub fragment_mass_tolerance: f64,
}

impl Default for ScreenParams {
    fn default() -> Self {
        Self {
            significance_height: 0.05,
            precursor_mass_tolerance: 2.5,
            fragment_mass_tolerance: 0.5,
        }
    }
}

impl ScreenParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.significance_height > 0.0 && self.significance_height <= 1.0) {
            return Err(SpecSiftError::InvalidParams {
                msg: format!(
                    "significance_height must be in (0, 1], got {}",
                    self.significance_height
                ),
            });
        }
        if !self.precursor_mass_tolerance.is_finite() || self.precursor_mass_tolerance < 0.0 {
            return Err(SpecSiftError::InvalidParams {
                msg: format!(
                    "precursor_mass_tolerance must be finite and >= 0, got {}",
                    self.precursor_mass_tolerance
                ),
            });
        }
        if !self.fragment_mass_tolerance.is_finite() || self.fragment_mass_tolerance < 0.0 {
            return Err(SpecSiftError::InvalidParams {
                msg: format!(
                    "fragment_mass_tolerance must be finite and >= 0, got {}",
                    self.fragment_mass_tolerance
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let params = ScreenParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.precursor_mass_tolerance, 2.5);
        assert_eq!(params.fragment_mass_tolerance, 0.5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let params: ScreenParams = serde_json::from_str(r#"{"significance_height": 0.1}"#).unwrap();
        assert_eq!(params.significance_height, 0.1);
        assert_eq!(params.precursor_mass_tolerance, 2.5);
        assert_eq!(params.fragment_mass_tolerance, 0.5);
    }

    #[test]
    fn test_rejects_zero_significance_height() {
        let params = ScreenParams {
            significance_height: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let params = ScreenParams {
            fragment_mass_tolerance: -0.5,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_fragment_tolerance_is_valid() {
        let params = ScreenParams {
            fragment_mass_tolerance: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
