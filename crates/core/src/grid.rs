//! Sample grid geometry and the 3D concentration result structure.
//!
//! The sweep samples a box downwind of the stack: heights from ground to a
//! maximum, downwind distances from the stack to a maximum, lateral offsets
//! symmetric about the plume centerline. Extents and steps are whole meters,
//! matching the integer stepping of the classic tabulations; index 0 on each
//! axis is that axis's minimum coordinate (ground, stack, -lateral extent).

use serde::{Deserialize, Serialize};

/// Default vertical resolution (m)
pub const DEFAULT_HEIGHT_STEP_M: u32 = 10;
/// Default downwind resolution (m)
pub const DEFAULT_DOWNWIND_STEP_M: u32 = 100;
/// Default lateral resolution (m)
pub const DEFAULT_LATERAL_STEP_M: u32 = 100;

/// Extents and resolutions of a concentration sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Maximum downwind distance (km)
    pub downwind_km: u32,
    /// Lateral half-extent either side of the centerline (m)
    pub lateral_half_m: u32,
    /// Maximum height above ground (m)
    pub max_height_m: u32,
    /// Vertical step (m)
    pub height_step_m: u32,
    /// Downwind step (m)
    pub downwind_step_m: u32,
    /// Lateral step (m)
    pub lateral_step_m: u32,
}

impl GridSpec {
    /// Spec with the given extents and the default 10/100/100 m resolutions.
    pub fn new(downwind_km: u32, lateral_half_m: u32, max_height_m: u32) -> Self {
        GridSpec {
            downwind_km,
            lateral_half_m,
            max_height_m,
            height_step_m: DEFAULT_HEIGHT_STEP_M,
            downwind_step_m: DEFAULT_DOWNWIND_STEP_M,
            lateral_step_m: DEFAULT_LATERAL_STEP_M,
        }
    }

    /// Reject degenerate resolutions.
    ///
    /// # Errors
    ///
    /// [`crate::ModelError::InvalidParameter`] if any step size is zero.
    pub fn validate(&self) -> Result<(), crate::ModelError> {
        if self.height_step_m == 0 || self.downwind_step_m == 0 || self.lateral_step_m == 0 {
            return Err(crate::ModelError::InvalidParameter(
                "grid step sizes must be nonzero".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of height steps, ground included
    pub fn height_count(&self) -> usize {
        (self.max_height_m / self.height_step_m) as usize + 1
    }

    /// Number of downwind steps, stack position included
    pub fn downwind_count(&self) -> usize {
        (self.downwind_km * 1000 / self.downwind_step_m) as usize + 1
    }

    /// Number of lateral steps across the full extent, centerline included
    pub fn lateral_count(&self) -> usize {
        (2 * self.lateral_half_m / self.lateral_step_m) as usize + 1
    }

    /// Total cell count of the sweep
    pub fn cell_count(&self) -> usize {
        self.height_count() * self.downwind_count() * self.lateral_count()
    }

    /// Physical height (m) of a height index
    pub fn height_at(&self, index: usize) -> f64 {
        f64::from(self.height_step_m) * index as f64
    }

    /// Physical downwind distance (km) of a downwind index
    pub fn downwind_at(&self, index: usize) -> f64 {
        f64::from(self.downwind_step_m) * index as f64 / 1000.0
    }

    /// Physical lateral offset (m) of a lateral index; negative is left of
    /// the centerline looking downwind
    pub fn lateral_at(&self, index: usize) -> f64 {
        f64::from(self.lateral_step_m) * index as f64 - f64::from(self.lateral_half_m)
    }

    /// Row labels for exporters, one per height index ("H0m", "H10m", ...)
    pub fn height_labels(&self) -> Vec<String> {
        (0..self.height_count())
            .map(|i| format!("H{}m", u64::from(self.height_step_m) * i as u64))
            .collect()
    }

    /// Column labels for exporters, one per downwind index
    /// ("D0.0km", "D0.1km", ...)
    pub fn downwind_labels(&self) -> Vec<String> {
        (0..self.downwind_count())
            .map(|j| {
                let meters = u64::from(self.downwind_step_m) * j as u64;
                format!("D{}km", format_km(meters))
            })
            .collect()
    }

    /// Lateral labels, one per lateral index ("L-1500m", ..., "L0m", ...,
    /// "L1500m")
    pub fn lateral_labels(&self) -> Vec<String> {
        (0..self.lateral_count())
            .map(|k| {
                let offset = i64::from(self.lateral_step_m) * k as i64
                    - i64::from(self.lateral_half_m);
                format!("L{offset}m")
            })
            .collect()
    }
}

/// Format whole meters as kilometers with no trailing zeros beyond the first
/// decimal ("0.0", "0.1", "1.25").
fn format_km(meters: u64) -> String {
    let whole = meters / 1000;
    let frac = meters % 1000;
    if frac == 0 {
        return format!("{whole}.0");
    }
    let mut digits = format!("{frac:03}");
    while digits.ends_with('0') {
        digits.pop();
    }
    format!("{whole}.{digits}")
}

/// Concentration samples over a [`GridSpec`], indexed
/// `[height][downwind][lateral]` with index 0 at each axis minimum.
///
/// Stored as a flat row-major vector; `lateral` varies fastest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcentrationGrid {
    spec: GridSpec,
    data: Vec<f64>,
}

impl ConcentrationGrid {
    /// Assemble from a flat height-major sample vector.
    ///
    /// # Panics
    ///
    /// Panics if `data` does not hold exactly `spec.cell_count()` samples;
    /// the sweep always produces the full grid.
    pub(crate) fn from_raw(spec: GridSpec, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            spec.cell_count(),
            "sample vector does not match grid dimensions"
        );
        ConcentrationGrid { spec, data }
    }

    /// The geometry this grid was sampled on
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Grid dimensions as (heights, downwinds, laterals)
    pub fn dims(&self) -> (usize, usize, usize) {
        (
            self.spec.height_count(),
            self.spec.downwind_count(),
            self.spec.lateral_count(),
        )
    }

    /// Concentration at a (height, downwind, lateral) index triple
    pub fn at(&self, height_idx: usize, downwind_idx: usize, lateral_idx: usize) -> f64 {
        let (_, downwinds, laterals) = self.dims();
        self.data[(height_idx * downwinds + downwind_idx) * laterals + lateral_idx]
    }

    /// All samples of one height slice, downwind-major
    pub fn height_slice(&self, height_idx: usize) -> &[f64] {
        let (_, downwinds, laterals) = self.dims();
        let stride = downwinds * laterals;
        &self.data[height_idx * stride..(height_idx + 1) * stride]
    }

    /// One downwind row of lateral samples within a height slice
    pub fn lateral_row(&self, height_idx: usize, downwind_idx: usize) -> &[f64] {
        let (_, downwinds, laterals) = self.dims();
        let start = (height_idx * downwinds + downwind_idx) * laterals;
        &self.data[start..start + laterals]
    }

    /// Largest sample in the grid; 0 for an all-zero grid
    pub fn max_sample(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }
}
