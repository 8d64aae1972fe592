//! Pasquill-Gifford dispersion coefficients as power laws of downwind
//! distance.
//!
//! The Gaussian plume model assumes the pollutant distribution widens with
//! downwind travel; these functions give the standard deviations of that
//! distribution in the lateral (sigma-y) and vertical (sigma-z) directions,
//! parameterized by stability class.
//!
//! # Table quirks, preserved as published
//!
//! - The vertical coefficients switch from a "near" to a "far" triple at
//!   exactly 1 km downwind, with a small discontinuity for most classes.
//! - A downwind distance of exactly zero is substituted with
//!   [`MIN_DOWNWIND_KM`] before exponentiation to avoid the zero-power-law
//!   singularity.
//! - The near-field vertical fits go negative within roughly 20 m of the
//!   source for classes whose offset term is negative (D, F). The
//!   concentration formula tolerates this: its mirrored exponentials drive
//!   those cells to zero.

use crate::stability::{coefficients, StabilityClass};

/// Epsilon substituted for a zero downwind distance (km)
pub const MIN_DOWNWIND_KM: f64 = 1e-4;

/// Exponent of the horizontal spread power law
const SIGMA_Y_EXPONENT: f64 = 0.894;

/// Horizontal dispersion coefficient (m) at a downwind distance (km).
///
/// ```text
/// sigma_y = a * x^0.894
/// ```
///
/// Strictly positive for any positive distance.
pub fn sigma_y(class: StabilityClass, downwind_km: f64) -> f64 {
    let x = effective_distance(downwind_km);
    coefficients(class).a * x.powf(SIGMA_Y_EXPONENT)
}

/// Vertical dispersion coefficient (m) at a downwind distance (km).
///
/// ```text
/// sigma_z = c * x^d + f
/// ```
///
/// with `(c, d, f)` taken from the near triple below 1 km and the far triple
/// at and beyond 1 km.
pub fn sigma_z(class: StabilityClass, downwind_km: f64) -> f64 {
    let x = effective_distance(downwind_km);
    let coeffs = coefficients(class);
    let (c, d, f) = if x < 1.0 {
        (coeffs.c_near, coeffs.d_near, coeffs.f_near)
    } else {
        (coeffs.c_far, coeffs.d_far, coeffs.f_far)
    };
    c * x.powf(d) + f
}

/// Nudge an exactly-zero distance to the epsilon; pass everything else
/// through unchanged.
fn effective_distance(downwind_km: f64) -> f64 {
    if downwind_km == 0.0 {
        MIN_DOWNWIND_KM
    } else {
        downwind_km
    }
}
