//! Pasquill-Gifford atmospheric stability classification.
//!
//! Implements the Turner (1967) surface classification table mapping wind
//! speed and insolation/cloud conditions to a stability class, plus the
//! per-class dispersion coefficient table consumed by the sigma power laws.
//!
//! # Scientific Background
//!
//! Atmospheric turbulence controls how quickly a plume spreads. The
//! Pasquill-Gifford scheme buckets turbulence intensity into six classes,
//! A (strongly convective daytime) through F (stable night), from two
//! routinely observed quantities: 10 m wind speed and an estimate of solar
//! radiation by day or cloud cover by night.
//!
//! # References
//!
//! - Pasquill, F. (1961). "The estimation of the dispersion of windborne material."
//! - Turner, D.B. (1967). "Workbook of Atmospheric Dispersion Estimates." US EPA.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Pasquill-Gifford stability class, ordered from most unstable (A) to most
/// stable (F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StabilityClass {
    /// Strongly unstable
    A,
    /// Moderately unstable
    B,
    /// Slightly unstable
    C,
    /// Neutral
    D,
    /// Slightly stable
    E,
    /// Stable
    F,
}

impl StabilityClass {
    /// All classes in turbulence order, A first.
    pub const ALL: [StabilityClass; 6] = [
        StabilityClass::A,
        StabilityClass::B,
        StabilityClass::C,
        StabilityClass::D,
        StabilityClass::E,
        StabilityClass::F,
    ];

    /// Parse a single-letter class designator.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidStabilityClass`] for anything outside
    /// `A`-`F` (lowercase accepted).
    pub fn from_char(c: char) -> Result<Self, ModelError> {
        match c.to_ascii_uppercase() {
            'A' => Ok(StabilityClass::A),
            'B' => Ok(StabilityClass::B),
            'C' => Ok(StabilityClass::C),
            'D' => Ok(StabilityClass::D),
            'E' => Ok(StabilityClass::E),
            'F' => Ok(StabilityClass::F),
            other => Err(ModelError::InvalidStabilityClass(format!(
                "'{other}' is not one of A-F"
            ))),
        }
    }

    /// Single-letter designator for display and labels.
    pub fn letter(self) -> char {
        match self {
            StabilityClass::A => 'A',
            StabilityClass::B => 'B',
            StabilityClass::C => 'C',
            StabilityClass::D => 'D',
            StabilityClass::E => 'E',
            StabilityClass::F => 'F',
        }
    }
}

impl std::fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl std::str::FromStr for StabilityClass {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            StabilityClass::from_char(c)
        } else {
            Err(ModelError::InvalidStabilityClass(format!(
                "'{s}' is not one of A-F"
            )))
        }
    }
}

/// Insolation (day) or cloud cover (night) category of the classification
/// table.
///
/// Day categories estimate incoming solar radiation; night categories
/// estimate cloud cover. Overcast conditions can be taken as class D
/// regardless of wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkyCondition {
    /// Daytime, strong insolation
    DayStrongInsolation,
    /// Daytime, moderate insolation
    DayModerateInsolation,
    /// Daytime, slight insolation
    DaySlightInsolation,
    /// Night, low cloud cover
    NightLowCloud,
    /// Night, moderate cloud cover
    NightModerateCloud,
}

/// Classify atmospheric stability from 10 m wind speed and sky condition.
///
/// Wind-speed brackets are `<2`, `2-3`, `3-5`, `5-6`, and `>6` m/s, taken
/// lower-inclusive. Table cells that list two classes ("A-B", "B-C", "C-D")
/// resolve to the first-listed, more unstable class.
///
/// # Errors
///
/// - [`ModelError::OutOfRangeGeometry`] for a negative wind speed.
/// - [`ModelError::InvalidParameter`] for calm clear nights (wind < 2 m/s at
///   night), which the source table leaves blank.
pub fn classify(wind_speed_m_s: f64, sky: SkyCondition) -> Result<StabilityClass, ModelError> {
    use SkyCondition::{
        DayModerateInsolation, DaySlightInsolation, DayStrongInsolation, NightLowCloud,
        NightModerateCloud,
    };
    use StabilityClass::{A, B, C, D, E, F};

    if wind_speed_m_s < 0.0 {
        return Err(ModelError::OutOfRangeGeometry(format!(
            "wind speed {wind_speed_m_s} m/s is negative"
        )));
    }

    let class = if wind_speed_m_s < 2.0 {
        match sky {
            // Moderate insolation is the table's "A-B" cell
            DayStrongInsolation | DayModerateInsolation => A,
            DaySlightInsolation => B,
            NightLowCloud | NightModerateCloud => {
                return Err(ModelError::InvalidParameter(
                    "stability is undefined for calm night conditions (wind < 2 m/s)".to_string(),
                ));
            }
        }
    } else if wind_speed_m_s < 3.0 {
        match sky {
            DayStrongInsolation => A, // A-B cell
            DayModerateInsolation => B,
            DaySlightInsolation => C,
            NightLowCloud => E,
            NightModerateCloud => F,
        }
    } else if wind_speed_m_s < 5.0 {
        match sky {
            // Moderate insolation is the table's "B-C" cell
            DayStrongInsolation | DayModerateInsolation => B,
            DaySlightInsolation => C,
            NightLowCloud => D,
            NightModerateCloud => E,
        }
    } else if wind_speed_m_s < 6.0 {
        match sky {
            // Moderate insolation is the table's "C-D" cell
            DayStrongInsolation | DayModerateInsolation => C,
            DaySlightInsolation | NightLowCloud | NightModerateCloud => D,
        }
    } else {
        match sky {
            DayStrongInsolation => C,
            _ => D,
        }
    };

    Ok(class)
}

/// Dispersion coefficients for one stability class.
///
/// `a` feeds the horizontal power law; the `(c, d, f)` triples feed the
/// vertical power law, with the `near` triple used below 1 km downwind and
/// the `far` triple at and beyond 1 km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityCoefficients {
    /// Horizontal spread coefficient
    pub a: f64,
    /// Vertical spread scale, downwind < 1 km
    pub c_near: f64,
    /// Vertical spread exponent, downwind < 1 km
    pub d_near: f64,
    /// Vertical spread offset (m), downwind < 1 km
    pub f_near: f64,
    /// Vertical spread scale, downwind >= 1 km
    pub c_far: f64,
    /// Vertical spread exponent, downwind >= 1 km
    pub d_far: f64,
    /// Vertical spread offset (m), downwind >= 1 km
    pub f_far: f64,
}

/// Look up the dispersion coefficients for a stability class.
///
/// Values from Turner's workbook (Table 12-11 in Davis & Cornwell's
/// reproduction); the near/far split at exactly 1 km is a quirk of that
/// table, preserved as published.
pub fn coefficients(class: StabilityClass) -> StabilityCoefficients {
    match class {
        StabilityClass::A => StabilityCoefficients {
            a: 213.0,
            c_near: 440.8,
            d_near: 1.941,
            f_near: 9.27,
            c_far: 459.7,
            d_far: 2.094,
            f_far: -9.6,
        },
        StabilityClass::B => StabilityCoefficients {
            a: 156.0,
            c_near: 100.6,
            d_near: 1.149,
            f_near: 3.3,
            c_far: 108.2,
            d_far: 1.098,
            f_far: 2.0,
        },
        StabilityClass::C => StabilityCoefficients {
            a: 104.0,
            c_near: 61.0,
            d_near: 0.911,
            f_near: 0.0,
            c_far: 61.0,
            d_far: 0.911,
            f_far: 0.0,
        },
        StabilityClass::D => StabilityCoefficients {
            a: 68.0,
            c_near: 33.2,
            d_near: 0.725,
            f_near: -1.7,
            c_far: 44.5,
            d_far: 0.516,
            f_far: -13.0,
        },
        StabilityClass::E => StabilityCoefficients {
            a: 50.5,
            c_near: 22.8,
            d_near: 0.678,
            f_near: 1.3,
            c_far: 55.4,
            d_far: 0.305,
            f_far: -34.0,
        },
        StabilityClass::F => StabilityCoefficients {
            a: 34.0,
            c_near: 14.35,
            d_near: 0.74,
            f_near: -0.35,
            c_far: 62.6,
            d_far: 0.18,
            f_far: -48.6,
        },
    }
}
