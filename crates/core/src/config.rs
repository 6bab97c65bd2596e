//! Classifier configuration.
//!
//! Settings can be built programmatically, deserialized directly, or read
//! from a loose JSON object where every key is optional:
//!
//! ```
//! use hue_sort_core::ClassifierConfig;
//!
//! let config = ClassifierConfig::from_params(&serde_json::json!({"bins": 12}))?;
//! assert_eq!(config.bins, 12);
//! assert_eq!(config.min_sat, 0.15);
//! # Ok::<(), hue_sort_core::SortError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SortError;
use crate::params::{param_f64, param_u32, param_usize};

pub const DEFAULT_MIN_SAT: f64 = 0.15;
pub const DEFAULT_MIN_VAL: f64 = 0.15;
pub const DEFAULT_BINS: usize = 36;
pub const DEFAULT_SAMPLE_SIZE: (u32, u32) = (50, 50);

/// Thresholds and sampling for dominant-hue classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum saturation for a pixel to vote.
    pub min_sat: f64,
    /// Minimum value (brightness) for a pixel to vote.
    pub min_val: f64,
    /// Number of equal-width hue buckets over [0, 360).
    pub bins: usize,
    /// Width images are resampled to before classification.
    pub sample_width: u32,
    /// Height images are resampled to before classification.
    pub sample_height: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_sat: DEFAULT_MIN_SAT,
            min_val: DEFAULT_MIN_VAL,
            bins: DEFAULT_BINS,
            sample_width: DEFAULT_SAMPLE_SIZE.0,
            sample_height: DEFAULT_SAMPLE_SIZE.1,
        }
    }
}

fn check_unit(name: &str, value: f64) -> Result<(), SortError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SortError::invalid_parameter(
            name,
            format!("{value} (expected a number in [0, 1])"),
        ))
    }
}

impl ClassifierConfig {
    /// Builds a config from a JSON object, falling back to defaults per key,
    /// then validates it.
    pub fn from_params(params: &Value) -> Result<Self, SortError> {
        let d = Self::default();
        let config = Self {
            min_sat: param_f64(params, "min_sat", d.min_sat),
            min_val: param_f64(params, "min_val", d.min_val),
            bins: param_usize(params, "bins", d.bins),
            sample_width: param_u32(params, "sample_width", d.sample_width),
            sample_height: param_u32(params, "sample_height", d.sample_height),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON file and passes it to [`from_params`](Self::from_params).
    pub fn from_json_file(path: &Path) -> Result<Self, SortError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SortError::Io(format!("cannot read {}: {e}", path.display())))?;
        let params: Value = serde_json::from_str(&content).map_err(|e| {
            SortError::invalid_parameter("config", format!("{}: {e}", path.display()))
        })?;
        Self::from_params(&params)
    }

    /// Checks that thresholds lie in [0, 1] and counts are non-zero.
    pub fn validate(&self) -> Result<(), SortError> {
        check_unit("min_sat", self.min_sat)?;
        check_unit("min_val", self.min_val)?;
        if self.bins == 0 {
            return Err(SortError::invalid_parameter("bins", "0 (must be at least 1)"));
        }
        if self.sample_width == 0 || self.sample_height == 0 {
            return Err(SortError::invalid_parameter(
                "sample size",
                format!(
                    "{}x{} (both sides must be non-zero)",
                    self.sample_width, self.sample_height
                ),
            ));
        }
        Ok(())
    }
}
