//! Performance color bands.
//!
//! Accuracy percentages map onto a red/yellow/green band using the
//! thresholds configured in settings. Bands are contiguous, ascending and
//! cover 0..100.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Half-open percentage range `[min, max)` for one band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

/// The three configured bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceColors {
    pub red: ColorRange,
    pub yellow: ColorRange,
    pub green: ColorRange,
}

impl Default for PerformanceColors {
    fn default() -> Self {
        Self {
            red: ColorRange { min: 0.0, max: 60.0 },
            yellow: ColorRange {
                min: 60.0,
                max: 80.0,
            },
            green: ColorRange {
                min: 80.0,
                max: 100.0,
            },
        }
    }
}

impl PerformanceColors {
    /// Build bands from the two adjustable boundaries (red/yellow and
    /// yellow/green), the way the settings form edits them.
    pub fn from_boundaries(red_max: f64, yellow_max: f64) -> Result<Self, ValidationError> {
        let colors = Self {
            red: ColorRange {
                min: 0.0,
                max: red_max,
            },
            yellow: ColorRange {
                min: red_max,
                max: yellow_max,
            },
            green: ColorRange {
                min: yellow_max,
                max: 100.0,
            },
        };
        colors.validate()?;
        Ok(colors)
    }

    /// Bands must be contiguous, strictly ascending and cover 0..100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ok = self.red.min == 0.0
            && self.green.max == 100.0
            && self.red.max == self.yellow.min
            && self.yellow.max == self.green.min
            && self.red.min < self.red.max
            && self.yellow.min < self.yellow.max
            && self.green.min < self.green.max;
        if ok {
            Ok(())
        } else {
            Err(ValidationError::InvalidValue {
                field: "performance_colors".into(),
                message: "bands must be ascending, contiguous and cover 0..100".into(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceBand {
    Red,
    Yellow,
    Green,
}

/// Band for a percentage, first match from the top: green wins over
/// yellow, yellow over red.
pub fn band_for(percent: f64, colors: &PerformanceColors) -> PerformanceBand {
    if percent >= colors.green.min {
        PerformanceBand::Green
    } else if percent >= colors.yellow.min {
        PerformanceBand::Yellow
    } else {
        PerformanceBand::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_classify() {
        let colors = PerformanceColors::default();
        assert_eq!(band_for(0.0, &colors), PerformanceBand::Red);
        assert_eq!(band_for(59.9, &colors), PerformanceBand::Red);
        assert_eq!(band_for(60.0, &colors), PerformanceBand::Yellow);
        assert_eq!(band_for(79.9, &colors), PerformanceBand::Yellow);
        assert_eq!(band_for(80.0, &colors), PerformanceBand::Green);
        assert_eq!(band_for(100.0, &colors), PerformanceBand::Green);
    }

    #[test]
    fn custom_boundaries() {
        let colors = PerformanceColors::from_boundaries(50.0, 70.0).unwrap();
        assert_eq!(band_for(55.0, &colors), PerformanceBand::Yellow);
        assert_eq!(band_for(70.0, &colors), PerformanceBand::Green);
    }

    #[test]
    fn non_ascending_boundaries_are_rejected() {
        assert!(PerformanceColors::from_boundaries(80.0, 60.0).is_err());
        assert!(PerformanceColors::from_boundaries(60.0, 60.0).is_err());
        assert!(PerformanceColors::from_boundaries(60.0, 100.1).is_err());
    }
}
