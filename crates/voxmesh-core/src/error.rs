//! Error types for the extractor.

use thiserror::Error;

/// Engine-wide error type.
///
/// Every failure aborts the whole generation call; callers never receive a
/// partially built mesh.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration or parameter value was rejected.
    #[error("invalid configuration: {field} = {value} ({reason})")]
    Configuration {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A cell coordinate fell outside the grid.
    #[error("cell ({x}, {y}, {z}) is outside a grid of size {size}")]
    IndexOutOfRange { x: i32, y: i32, z: i32, size: u32 },

    /// The requested storage could not be allocated.
    #[error("cannot allocate storage for {cells} cells")]
    Allocation { cells: u128 },

    /// An isosurface provider returned data that cannot be normalized.
    #[error("isosurface provider returned malformed data: {0}")]
    ExternalProvider(String),

    /// Generation was cancelled through a cancel token.
    #[error("mesh generation cancelled")]
    Cancelled,

    /// A flat buffer did not hold whole triangles.
    #[error("buffer of {len} floats is not a whole number of triangles")]
    InvalidBuffer { len: usize },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] built from any displayable value.
    pub fn config(field: &'static str, value: impl std::fmt::Display, reason: &'static str) -> Self {
        Self::Configuration {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_the_coordinate() {
        let err = Error::IndexOutOfRange {
            x: 8,
            y: 0,
            z: -1,
            size: 8,
        };
        assert_eq!(
            err.to_string(),
            "cell (8, 0, -1) is outside a grid of size 8"
        );
    }

    #[test]
    fn configuration_names_field_and_value() {
        let err = Error::config("threshold", -0.5, "must be positive");
        let text = err.to_string();
        assert!(text.contains("threshold"));
        assert!(text.contains("-0.5"));
    }
}
