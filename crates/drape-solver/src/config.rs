//! Spring system configuration.
//!
//! Each [`SpringSystem`](crate::SpringSystem) owns its own copy, so
//! independent simulations can run side by side with different settings.

use serde::{Deserialize, Serialize};

use drape_types::constants::{DEFAULT_SPRING_CONSTANT, GRAVITY, MIN_SPRING_LENGTH};
use drape_types::{DrapeError, DrapeResult};

/// Configuration for a spring system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Gravity vector [gx, gy, gz].
    pub gravity: [f32; 3],

    /// Stiffness multiplier applied to every spring. Larger is stiffer.
    /// Not range-checked: negative values are accepted and make the
    /// mesh fly apart.
    pub spring_constant: f32,

    /// Shortest separation used when evaluating a spring.
    pub min_spring_length: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -GRAVITY, 0.0],
            spring_constant: DEFAULT_SPRING_CONSTANT,
            min_spring_length: MIN_SPRING_LENGTH,
        }
    }
}

impl SpringConfig {
    /// Default stiffness with gravity switched off.
    pub fn weightless() -> Self {
        Self {
            gravity: [0.0; 3],
            ..Default::default()
        }
    }

    /// Sets the gravity vector.
    pub fn with_gravity(mut self, gravity: [f32; 3]) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the spring constant.
    pub fn with_spring_constant(mut self, spring_constant: f32) -> Self {
        self.spring_constant = spring_constant;
        self
    }

    /// Checks values that would make the step produce non-finite output.
    ///
    /// The spring constant may be negative.
    pub fn validate(&self) -> DrapeResult<()> {
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(DrapeError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        if !self.spring_constant.is_finite() {
            return Err(DrapeError::InvalidConfig(format!(
                "spring_constant must be finite, got {}",
                self.spring_constant
            )));
        }
        if !(self.min_spring_length > 0.0 && self.min_spring_length.is_finite()) {
            return Err(DrapeError::InvalidConfig(format!(
                "min_spring_length must be positive, got {}",
                self.min_spring_length
            )));
        }
        Ok(())
    }
}
