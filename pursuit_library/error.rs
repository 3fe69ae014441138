//! Error types for the pursuit library

use thiserror::Error;

/// Errors raised by [`SimulationState`](crate::SimulationState) operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The path is immutable while the simulation is running
    #[error("path is locked while the simulation is running")]
    PathLocked,

    /// Waypoint coordinates must be finite
    #[error("waypoint ({x}, {y}) has a non-finite coordinate")]
    NonFiniteWaypoint { x: f64, y: f64 },

    /// Starting requires at least one waypoint
    #[error("cannot start the simulation with an empty path")]
    EmptyPath,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("min_lookahead ({min}) exceeds max_lookahead ({max})")]
    LookaheadRange { min: f64, max: f64 },
}

impl ConfigError {
    /// Check that `value` is finite and strictly positive
    pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { field, value });
        }
        if value <= 0.0 {
            return Err(ConfigError::NonPositive { field, value });
        }
        Ok(())
    }

    /// Check that `value` is finite and not negative
    pub(crate) fn require_non_negative(
        field: &'static str,
        value: f64,
    ) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { field, value });
        }
        if value < 0.0 {
            return Err(ConfigError::NonPositive { field, value });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert!(ConfigError::require_positive("radius", 1.0).is_ok());
        assert_eq!(
            ConfigError::require_positive("radius", 0.0),
            Err(ConfigError::NonPositive {
                field: "radius",
                value: 0.0
            })
        );
        assert!(matches!(
            ConfigError::require_positive("radius", f64::NAN),
            Err(ConfigError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = SimulationError::NonFiniteWaypoint {
            x: f64::INFINITY,
            y: 1.0,
        };
        assert_eq!(err.to_string(), "waypoint (inf, 1) has a non-finite coordinate");
        assert_eq!(
            ConfigError::LookaheadRange { min: 60.0, max: 50.0 }.to_string(),
            "min_lookahead (60) exceeds max_lookahead (50)"
        );
    }
}
