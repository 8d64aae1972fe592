//! Gaussian Plume Dispersion Core Library
//!
//! Computes pollutant concentration downwind of an elevated point source
//! using the Turner (1967) Gaussian plume formulation with total ground
//! reflection: Pasquill-Gifford stability classification, Holland plume
//! rise, power-law dispersion coefficients, and single-point or full-grid
//! concentration evaluation.
//!
//! ## Model Pipeline
//!
//! - Stability classification from wind speed and sky condition (or a class
//!   picked directly)
//! - Effective stack height from the Holland plume-rise correction
//! - Sigma-y/sigma-z dispersion coefficients per downwind distance
//! - Gaussian concentration at one receptor or swept over a 3D grid

// Stability classification and coefficient tables
pub mod stability;

// Physical parameter bundles
pub mod params;

// Model stages
pub mod concentration;
pub mod plume_rise;
pub mod sigma;

// Grid geometry and results
pub mod grid;

// Run configuration
pub mod scenario;

// Error types
pub mod error;

// Re-export the model surface
pub use concentration::{concentration_at, sweep};
pub use error::ModelError;
pub use grid::{ConcentrationGrid, GridSpec};
pub use params::{AmbientState, EmissionState, SourceGeometry};
pub use plume_rise::effective_height;
pub use scenario::{Scenario, ScenarioError};
pub use sigma::{sigma_y, sigma_z, MIN_DOWNWIND_KM};
pub use stability::{classify, coefficients, SkyCondition, StabilityClass, StabilityCoefficients};
