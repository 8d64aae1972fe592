//! Run configuration: the validated parameter bundle a dispersion run is
//! built from, with a JSON round-trip for repeatable studies.
//!
//! A [`Scenario`] holds everything the model needs for one run. It never
//! mutates after creation; derived quantities (effective height, the grid)
//! are recomputed on demand.

use crate::concentration;
use crate::error::ModelError;
use crate::grid::{ConcentrationGrid, GridSpec};
use crate::params::{AmbientState, EmissionState, SourceGeometry};
use crate::plume_rise;
use crate::sigma::{sigma_y, sigma_z};
use crate::stability::StabilityClass;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Complete input bundle for one dispersion run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Pasquill-Gifford stability class
    pub stability: StabilityClass,
    /// Stack geometry
    pub source: SourceGeometry,
    /// Emission characteristics
    pub emission: EmissionState,
    /// Ambient and stack exit conditions
    pub ambient: AmbientState,
    /// Sample grid extents and resolutions
    pub grid: GridSpec,
}

impl Scenario {
    /// Built-in demonstration scenario: a 120 m stack under neutral
    /// conditions, sampled 10 km downwind, 1500 m to either side, up to
    /// 20 m above ground.
    pub fn demo() -> Self {
        Scenario {
            stability: StabilityClass::D,
            source: SourceGeometry {
                stack_height_m: 120.0,
                stack_diameter_m: 1.2,
            },
            emission: EmissionState {
                rate: 1656.2,
                exit_velocity_m_s: 10.0,
            },
            ambient: AmbientState {
                wind_speed_m_s: 4.5,
                pressure_kpa: 95.0,
                air_temp_k: 298.15,
                stack_temp_k: 588.15,
            },
            grid: GridSpec::new(10, 1500, 20),
        }
    }

    /// Validate every parameter bundle.
    ///
    /// # Errors
    ///
    /// The first failing bundle's [`ModelError`].
    pub fn validate(&self) -> Result<(), ModelError> {
        self.source.validate()?;
        self.emission.validate()?;
        self.ambient.validate()?;
        self.grid.validate()?;
        Ok(())
    }

    /// Effective stack height for these conditions; recomputed on every
    /// call.
    ///
    /// # Errors
    ///
    /// Parameter validation errors from the plume-rise inputs.
    pub fn effective_height(&self) -> Result<f64, ModelError> {
        plume_rise::effective_height(&self.source, &self.emission, &self.ambient)
    }

    /// Single-receptor concentration at the far corner of the sample box
    /// (maximum downwind distance, positive lateral extent, maximum
    /// height).
    ///
    /// # Errors
    ///
    /// Parameter validation errors, or [`ModelError::InvalidParameter`] for
    /// degenerate sigmas.
    pub fn single_point(&self) -> Result<f64, ModelError> {
        self.grid.validate()?;
        let effective = self.effective_height()?;
        let x_km = f64::from(self.grid.downwind_km);
        concentration::concentration_at(
            f64::from(self.grid.lateral_half_m),
            f64::from(self.grid.max_height_m),
            effective,
            self.emission.rate,
            self.ambient.wind_speed_m_s,
            sigma_y(self.stability, x_km),
            sigma_z(self.stability, x_km),
        )
    }

    /// Full concentration sweep over the sample grid.
    ///
    /// # Errors
    ///
    /// Parameter validation errors from any bundle.
    pub fn sweep(&self) -> Result<ConcentrationGrid, ModelError> {
        let effective = self.effective_height()?;
        concentration::sweep(
            &self.grid,
            self.stability,
            effective,
            self.emission.rate,
            self.ambient.wind_speed_m_s,
        )
    }

    /// Load a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// [`ScenarioError::LoadFailed`] if the file cannot be read,
    /// [`ScenarioError::ParseFailed`] if it is not a valid scenario.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(&path)
            .map_err(|e| ScenarioError::LoadFailed(e.to_string()))?;
        let scenario: Self =
            serde_json::from_str(&contents).map_err(|e| ScenarioError::ParseFailed(e.to_string()))?;
        info!(path = %path.as_ref().display(), "loaded scenario");
        Ok(scenario)
    }

    /// Save the scenario as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`ScenarioError::SerializeFailed`] or [`ScenarioError::SaveFailed`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ScenarioError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ScenarioError::SerializeFailed(e.to_string()))?;
        fs::write(&path, contents).map_err(|e| ScenarioError::SaveFailed(e.to_string()))?;
        info!(path = %path.as_ref().display(), "saved scenario");
        Ok(())
    }
}

/// Errors that can occur reading or writing scenario files
#[derive(Debug)]
pub enum ScenarioError {
    /// Failed to read the file
    LoadFailed(String),
    /// Failed to parse the file contents
    ParseFailed(String),
    /// Failed to serialize the scenario
    SerializeFailed(String),
    /// Failed to write the file
    SaveFailed(String),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            ScenarioError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            ScenarioError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            ScenarioError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
        }
    }
}

impl std::error::Error for ScenarioError {}
