//! Error types for the dispersion model.
//!
//! All model functions are pure and fail fast: an invalid input is reported
//! to the caller as a typed error, never retried or patched up internally.
//! Re-prompting and recovery belong to the calling layer.

/// Errors surfaced by the dispersion model core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Stability class designator outside A-F
    InvalidStabilityClass(String),
    /// Zero denominator or an unclassifiable table cell
    InvalidParameter(String),
    /// Negative or otherwise nonphysical geometry/emission input
    OutOfRangeGeometry(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidStabilityClass(msg) => {
                write!(f, "Invalid stability class: {msg}")
            }
            ModelError::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            ModelError::OutOfRangeGeometry(msg) => write!(f, "Out-of-range geometry: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ModelError::InvalidStabilityClass("'G'".to_string());
        assert_eq!(err.to_string(), "Invalid stability class: 'G'");

        let err = ModelError::InvalidParameter("wind speed is zero".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: wind speed is zero");

        let err = ModelError::OutOfRangeGeometry("stack diameter -1 m".to_string());
        assert_eq!(err.to_string(), "Out-of-range geometry: stack diameter -1 m");
    }
}
