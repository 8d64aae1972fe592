//! Physical parameter bundles for a dispersion run.
//!
//! Three small value types cover the inputs the model needs: the stack
//! itself, what it emits, and the atmosphere around it. All are immutable
//! for the duration of a run; derived quantities (effective height, sigmas)
//! are recomputed from them rather than cached.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Stack geometry, constant for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceGeometry {
    /// Stack height above ground (m)
    pub stack_height_m: f64,
    /// Stack exit diameter (m)
    pub stack_diameter_m: f64,
}

impl SourceGeometry {
    /// Reject nonphysical geometry.
    ///
    /// # Errors
    ///
    /// [`ModelError::OutOfRangeGeometry`] for a negative stack height or a
    /// non-positive diameter.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.stack_height_m < 0.0 {
            return Err(ModelError::OutOfRangeGeometry(format!(
                "stack height {} m is negative",
                self.stack_height_m
            )));
        }
        if self.stack_diameter_m <= 0.0 {
            return Err(ModelError::OutOfRangeGeometry(format!(
                "stack diameter {} m must be positive",
                self.stack_diameter_m
            )));
        }
        Ok(())
    }
}

/// Emission characteristics, constant for a run.
///
/// The rate unit (g/s or Ci/s) carries through to the concentration output
/// (g/m3 or Ci/m3 respectively).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionState {
    /// Uniform pollutant emission rate (g/s or Ci/s)
    pub rate: f64,
    /// Exhaust gas exit velocity (m/s)
    pub exit_velocity_m_s: f64,
}

impl EmissionState {
    /// Reject nonphysical emission parameters.
    ///
    /// # Errors
    ///
    /// [`ModelError::OutOfRangeGeometry`] for a negative rate or exit
    /// velocity.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.rate < 0.0 {
            return Err(ModelError::OutOfRangeGeometry(format!(
                "emission rate {} is negative",
                self.rate
            )));
        }
        if self.exit_velocity_m_s < 0.0 {
            return Err(ModelError::OutOfRangeGeometry(format!(
                "emission velocity {} m/s is negative",
                self.exit_velocity_m_s
            )));
        }
        Ok(())
    }
}

/// Ambient atmosphere and stack exit conditions, constant for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientState {
    /// Mean wind speed at stack height (m/s)
    pub wind_speed_m_s: f64,
    /// Ambient air pressure (kPa)
    pub pressure_kpa: f64,
    /// Ambient air temperature (K)
    pub air_temp_k: f64,
    /// Stack exit gas temperature (K)
    pub stack_temp_k: f64,
}

impl AmbientState {
    /// Reject nonphysical ambient conditions.
    ///
    /// Wind speed and stack temperature are denominators in the plume-rise
    /// formula, so exactly-zero values are reported as
    /// [`ModelError::InvalidParameter`]; negative values and non-positive
    /// absolute temperatures as [`ModelError::OutOfRangeGeometry`].
    ///
    /// # Errors
    ///
    /// See above.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.wind_speed_m_s == 0.0 {
            return Err(ModelError::InvalidParameter(
                "wind speed is zero".to_string(),
            ));
        }
        if self.wind_speed_m_s < 0.0 {
            return Err(ModelError::OutOfRangeGeometry(format!(
                "wind speed {} m/s is negative",
                self.wind_speed_m_s
            )));
        }
        if self.stack_temp_k == 0.0 {
            return Err(ModelError::InvalidParameter(
                "stack temperature is zero".to_string(),
            ));
        }
        if self.stack_temp_k < 0.0 || self.air_temp_k <= 0.0 {
            return Err(ModelError::OutOfRangeGeometry(format!(
                "temperatures must be positive kelvin (stack {} K, air {} K)",
                self.stack_temp_k, self.air_temp_k
            )));
        }
        if self.pressure_kpa <= 0.0 {
            return Err(ModelError::OutOfRangeGeometry(format!(
                "pressure {} kPa must be positive",
                self.pressure_kpa
            )));
        }
        Ok(())
    }
}
