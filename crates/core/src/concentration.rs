//! Gaussian plume concentration with total ground reflection.
//!
//! Evaluates the Turner (1967) steady-state formula at a single receptor or
//! over a full sample grid. The ground is treated as a perfect reflector:
//! the vertical term mirrors the plume about the surface instead of letting
//! mass be absorbed.
//!
//! # References
//!
//! - Turner, D.B. (1967). "Workbook of Atmospheric Dispersion Estimates." US EPA.
//! - Davis, M.L. & Cornwell, D.A. "Introduction to Environmental Engineering."

use crate::error::ModelError;
use crate::grid::{ConcentrationGrid, GridSpec};
use crate::sigma::{sigma_y, sigma_z};
use crate::stability::StabilityClass;
use rayon::prelude::*;
use std::f64::consts::PI;
use tracing::debug;

/// Samples are rounded to 10 decimal places so exports compare bit-for-bit
/// across runs and platforms; not a physical requirement.
const ROUNDING_SCALE: f64 = 1e10;

/// Concentration at one receptor point.
///
/// ```text
/// C = Q / (2*pi*sigma_y*sigma_z*u)
///     * exp(-0.5 * (y/sigma_y)^2)
///     * [exp(-0.5 * ((z-H)/sigma_z)^2) + exp(-0.5 * ((z+H)/sigma_z)^2)]
/// ```
///
/// Where:
/// - Q: emission rate (g/s or Ci/s)
/// - u: wind speed (m/s)
/// - y, z: lateral and vertical receptor coordinates (m)
/// - H: effective stack height (m)
///
/// The result unit is the emission-rate unit per cubic meter, rounded to
/// 10 decimal places.
///
/// # Errors
///
/// [`ModelError::InvalidParameter`] if `sigma_y`, `sigma_z`, or
/// `wind_speed_m_s` is exactly zero (all three are denominators). The caller
/// supplies already-validated sigmas; this is the last line of defense, not
/// input sanitization.
pub fn concentration_at(
    lateral_m: f64,
    height_m: f64,
    effective_height_m: f64,
    emission_rate: f64,
    wind_speed_m_s: f64,
    sigma_y: f64,
    sigma_z: f64,
) -> Result<f64, ModelError> {
    if sigma_y == 0.0 {
        return Err(ModelError::InvalidParameter("sigma_y is zero".to_string()));
    }
    if sigma_z == 0.0 {
        return Err(ModelError::InvalidParameter("sigma_z is zero".to_string()));
    }
    if wind_speed_m_s == 0.0 {
        return Err(ModelError::InvalidParameter(
            "wind speed is zero".to_string(),
        ));
    }

    Ok(gaussian(
        lateral_m,
        height_m,
        effective_height_m,
        emission_rate,
        wind_speed_m_s,
        sigma_y,
        sigma_z,
    ))
}

/// Sweep the concentration formula over every cell of a sample grid.
///
/// Sigma pairs are computed once per downwind step (every lateral/height
/// cell at that distance shares them), then height slices are evaluated in
/// parallel; cells are independent, so the only synchronization is the final
/// gather. Ordering is height-major, then downwind, then lateral, matching
/// [`ConcentrationGrid`] indexing.
///
/// # Errors
///
/// - [`ModelError::InvalidParameter`] for a zero wind speed or zero grid
///   step.
/// - [`ModelError::OutOfRangeGeometry`] for a negative wind speed, emission
///   rate, or effective height.
pub fn sweep(
    spec: &GridSpec,
    class: StabilityClass,
    effective_height_m: f64,
    emission_rate: f64,
    wind_speed_m_s: f64,
) -> Result<ConcentrationGrid, ModelError> {
    spec.validate()?;
    if wind_speed_m_s == 0.0 {
        return Err(ModelError::InvalidParameter(
            "wind speed is zero".to_string(),
        ));
    }
    if wind_speed_m_s < 0.0 {
        return Err(ModelError::OutOfRangeGeometry(format!(
            "wind speed {wind_speed_m_s} m/s is negative"
        )));
    }
    if emission_rate < 0.0 {
        return Err(ModelError::OutOfRangeGeometry(format!(
            "emission rate {emission_rate} is negative"
        )));
    }
    if effective_height_m < 0.0 {
        return Err(ModelError::OutOfRangeGeometry(format!(
            "effective height {effective_height_m} m is negative"
        )));
    }

    let heights = spec.height_count();
    let downwinds = spec.downwind_count();
    let laterals = spec.lateral_count();
    debug!(
        heights,
        downwinds,
        laterals,
        class = %class,
        "sweeping concentration grid"
    );

    // One sigma pair per downwind step, shared by the whole column above it
    let sigma_pairs: Vec<(f64, f64)> = (0..downwinds)
        .map(|j| {
            let x = spec.downwind_at(j);
            (sigma_y(class, x), sigma_z(class, x))
        })
        .collect();

    let slices: Vec<Vec<f64>> = (0..heights)
        .into_par_iter()
        .map(|i| {
            let height = spec.height_at(i);
            let mut slice = Vec::with_capacity(downwinds * laterals);
            for &(sy, sz) in &sigma_pairs {
                for k in 0..laterals {
                    slice.push(gaussian(
                        spec.lateral_at(k),
                        height,
                        effective_height_m,
                        emission_rate,
                        wind_speed_m_s,
                        sy,
                        sz,
                    ));
                }
            }
            slice
        })
        .collect();

    Ok(ConcentrationGrid::from_raw(*spec, slices.concat()))
}

/// The raw formula; denominators checked by callers.
fn gaussian(
    lateral_m: f64,
    height_m: f64,
    effective_height_m: f64,
    emission_rate: f64,
    wind_speed_m_s: f64,
    sigma_y: f64,
    sigma_z: f64,
) -> f64 {
    let prefactor = emission_rate / (2.0 * PI * sigma_y * sigma_z * wind_speed_m_s);
    let lateral_term = (-0.5 * (lateral_m / sigma_y).powi(2)).exp();
    let direct = (-0.5 * ((height_m - effective_height_m) / sigma_z).powi(2)).exp();
    let reflected = (-0.5 * ((height_m + effective_height_m) / sigma_z).powi(2)).exp();

    round_sample(prefactor * lateral_term * (direct + reflected))
}

fn round_sample(value: f64) -> f64 {
    (value * ROUNDING_SCALE).round() / ROUNDING_SCALE
}
