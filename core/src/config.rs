//! Tunable parameters for a simulation session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    DEFAULT_COLLISION_THRESHOLD, DEFAULT_GRID_EXTENT, DEFAULT_OBSTACLE_COUNT,
    DEFAULT_STEP_DEGREES, MAX_LATITUDE,
};

/// Parameters fixed for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Degrees travelled by a single move command.
    pub step_degrees: f64,
    /// Degree-space distance below which a move is rejected.
    pub collision_threshold: f64,
    /// Number of obstacles generated at session start.
    pub obstacle_count: usize,
    /// Side length of the square display grid.
    pub grid_extent: f32,
    /// Seed for obstacle generation; `None` draws from the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_degrees: DEFAULT_STEP_DEGREES,
            collision_threshold: DEFAULT_COLLISION_THRESHOLD,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            grid_extent: DEFAULT_GRID_EXTENT,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Checks that the parameters keep the movement model well defined.
    ///
    /// The wrap policy only handles a single overflow past a pole or the
    /// antimeridian, so steps must stay strictly below 90 degrees.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.step_degrees;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidStep { step });
        }
        if step >= MAX_LATITUDE {
            return Err(ConfigError::StepTooLarge { step });
        }

        let threshold = self.collision_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold { threshold });
        }

        let extent = self.grid_extent;
        if !extent.is_finite() || extent <= 0.0 {
            return Err(ConfigError::InvalidGridExtent { extent });
        }

        Ok(())
    }
}

/// Reasons a [`SimulationConfig`] may be rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The move step is zero, negative or not a number.
    #[error("step_degrees must be finite and positive (received {step})")]
    InvalidStep {
        /// Step that failed validation.
        step: f64,
    },
    /// The move step could overflow a pole twice in one move.
    #[error("step_degrees must be below 90 (received {step})")]
    StepTooLarge {
        /// Step that failed validation.
        step: f64,
    },
    /// The collision threshold is negative or not a number.
    #[error("collision_threshold must be finite and non-negative (received {threshold})")]
    InvalidThreshold {
        /// Threshold that failed validation.
        threshold: f64,
    },
    /// The grid extent cannot produce a visible grid.
    #[error("grid_extent must be finite and positive (received {extent})")]
    InvalidGridExtent {
        /// Extent that failed validation.
        extent: f32,
    },
    /// A session was asked to start the rover outside the valid range.
    #[error("rover start ({lat}, {lon}) lies outside the valid latitude/longitude range")]
    StartOutOfBounds {
        /// Requested starting latitude.
        lat: f64,
        /// Requested starting longitude.
        lon: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_step() {
        let config = SimulationConfig {
            step_degrees: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidStep { step: 0.0 })
        );
    }

    #[test]
    fn rejects_step_that_breaks_single_wrap() {
        let config = SimulationConfig {
            step_degrees: 90.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::StepTooLarge { step: 90.0 })
        );
    }

    #[test]
    fn rejects_negative_threshold() {
        let config = SimulationConfig {
            collision_threshold: -1.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { threshold: -1.0 })
        );
    }

    #[test]
    fn rejects_nan_grid_extent() {
        let config = SimulationConfig {
            grid_extent: f32::NAN,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGridExtent { .. })
        ));
    }

    #[test]
    fn config_round_trips_through_bincode() {
        let config = SimulationConfig {
            seed: Some(7),
            ..SimulationConfig::default()
        };
        let bytes = bincode::serialize(&config).expect("serialize");
        let restored: SimulationConfig = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, config);
    }
}
