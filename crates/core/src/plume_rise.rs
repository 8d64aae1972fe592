//! Holland plume-rise correction for buoyant stack exhaust.
//!
//! A hot, fast exhaust keeps climbing after it leaves the stack; the plume
//! centerline used by the concentration formula sits at the physical stack
//! top plus this rise.
//!
//! # References
//!
//! - Holland, J.Z. (1953). "A micrometeorological survey of the Oak Ridge area."
//! - Turner, D.B. (1967). "Workbook of Atmospheric Dispersion Estimates." US EPA.

use crate::error::ModelError;
use crate::params::{AmbientState, EmissionState, SourceGeometry};

/// Pressure coefficient of the Holland buoyancy term (1/kPa)
const HOLLAND_BUOYANCY_COEFF: f64 = 2.68e-2;

/// Effective stack height: physical height plus Holland plume rise.
///
/// ```text
/// H = h + (v_s * d / u) * (1.5 + 2.68e-2 * P * ((T_s - T_a) / T_s) * d)
/// ```
///
/// Where:
/// - h: stack height (m)
/// - `v_s`: exhaust exit velocity (m/s)
/// - d: stack diameter (m)
/// - u: wind speed (m/s)
/// - P: ambient pressure (kPa)
/// - `T_s`, `T_a`: stack exit and ambient temperatures (K)
///
/// Pure function of its inputs; callers re-invoke it after any parameter
/// change instead of caching the result.
///
/// # Errors
///
/// Propagates the parameter validation errors: [`ModelError::InvalidParameter`]
/// for a zero wind speed or stack temperature (both denominators),
/// [`ModelError::OutOfRangeGeometry`] for negative physical inputs.
pub fn effective_height(
    geometry: &SourceGeometry,
    emission: &EmissionState,
    ambient: &AmbientState,
) -> Result<f64, ModelError> {
    geometry.validate()?;
    emission.validate()?;
    ambient.validate()?;

    let momentum = emission.exit_velocity_m_s * geometry.stack_diameter_m / ambient.wind_speed_m_s;
    let buoyancy = HOLLAND_BUOYANCY_COEFF
        * ambient.pressure_kpa
        * ((ambient.stack_temp_k - ambient.air_temp_k) / ambient.stack_temp_k)
        * geometry.stack_diameter_m;

    Ok(geometry.stack_height_m + momentum * (1.5 + buoyancy))
}
