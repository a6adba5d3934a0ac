//! Field configuration.
//!
//! Configuration is either built in code through the `with_*` methods or read
//! from a TOML file whose keys use the camelCase names of the external
//! interface (`fieldBits`, `frequency`, `threshold`, `scale`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_FIELD_BITS;
use crate::error::{Error, Result};

/// Octave limit of the fractal noise rule.
pub const MAX_FBM_OCTAVES: usize = 32;

/// Procedural rule that turns a lattice coordinate into a density value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DensityRule {
    /// Product of three sinusoids, one per axis.
    #[default]
    Sinusoid,
    /// Fractal Perlin noise.
    Fbm {
        /// Noise seed.
        seed: u32,
        /// Number of octaves.
        octaves: usize,
    },
}

/// Configuration of one field generation call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldConfig {
    /// Grid side is `2^field_bits`.
    pub field_bits: u32,
    /// Spatial frequency of the density pattern (radians per cell).
    pub frequency: f64,
    /// Cells whose density exceeds this cutoff are solid.
    pub threshold: f64,
    /// World-space edge length of one cell.
    pub scale: f32,
    /// Density rule.
    pub rule: DensityRule,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            field_bits: 6,
            frequency: std::f64::consts::PI / 20.0,
            threshold: 0.4,
            scale: 10.0,
            rule: DensityRule::Sinusoid,
        }
    }
}

impl FieldConfig {
    /// Set the grid-size exponent.
    pub fn with_field_bits(mut self, field_bits: u32) -> Self {
        self.field_bits = field_bits;
        self
    }

    /// Set the density pattern frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the occupancy cutoff.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the world-space cell size.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the density rule.
    pub fn with_rule(mut self, rule: DensityRule) -> Self {
        self.rule = rule;
        self
    }

    /// Grid side length in cells, or 0 when `field_bits` does not fit a `u32` shift.
    ///
    /// Only meaningful once [`validate`](Self::validate) passed.
    #[inline]
    pub fn field_size(&self) -> u32 {
        1u32.checked_shl(self.field_bits).unwrap_or(0)
    }

    /// Check every value against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.field_bits == 0 || self.field_bits > MAX_FIELD_BITS {
            return Err(Error::config(
                "fieldBits",
                self.field_bits,
                "must be between 1 and 10",
            ));
        }
        if !self.frequency.is_finite() {
            return Err(Error::config("frequency", self.frequency, "must be finite"));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(Error::config(
                "threshold",
                self.threshold,
                "must be positive and finite",
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::config(
                "scale",
                self.scale,
                "must be positive and finite",
            ));
        }
        if let DensityRule::Fbm { octaves, .. } = self.rule {
            if octaves == 0 || octaves > MAX_FBM_OCTAVES {
                return Err(Error::config("rule.octaves", octaves, "must be between 1 and 32"));
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_field() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.field_size(), 64);
        assert_eq!(config.rule, DensityRule::Sinusoid);
    }

    #[test]
    fn rejects_non_positive_threshold_and_scale() {
        for threshold in [0.0, -0.4, f64::NAN] {
            let config = FieldConfig::default().with_threshold(threshold);
            assert!(matches!(
                config.validate(),
                Err(Error::Configuration { field: "threshold", .. })
            ));
        }
        for scale in [0.0, -1.0, f32::INFINITY] {
            let config = FieldConfig::default().with_scale(scale);
            assert!(matches!(
                config.validate(),
                Err(Error::Configuration { field: "scale", .. })
            ));
        }
    }

    #[test]
    fn field_size_never_overflows() {
        assert_eq!(FieldConfig::default().with_field_bits(10).field_size(), 1024);
        assert_eq!(FieldConfig::default().with_field_bits(40).field_size(), 0);
    }

    #[test]
    fn misspelled_key_is_a_parse_error() {
        assert!(matches!(
            FieldConfig::from_toml_str("fieldbits = 4"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn rejects_grid_size_out_of_range() {
        for bits in [0, MAX_FIELD_BITS + 1, 31] {
            let config = FieldConfig::default().with_field_bits(bits);
            assert!(matches!(
                config.validate(),
                Err(Error::Configuration { field: "fieldBits", .. })
            ));
        }
    }

    #[test]
    fn parses_camel_case_toml() {
        let config = FieldConfig::from_toml_str(
            r#"
            fieldBits = 4
            threshold = 0.25
            scale = 2.0

            [rule]
            kind = "fbm"
            seed = 7
            octaves = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.field_bits, 4);
        assert_eq!(config.threshold, 0.25);
        assert_eq!(config.scale, 2.0);
        // Unspecified keys keep their defaults.
        assert_eq!(config.frequency, FieldConfig::default().frequency);
        assert_eq!(config.rule, DensityRule::Fbm { seed: 7, octaves: 3 });
    }

    #[test]
    fn toml_values_are_validated() {
        let err = FieldConfig::from_toml_str("scale = -3.0").unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "scale", .. }));

        let err = FieldConfig::from_toml_str("fieldBits = \"six\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
