use thiserror::Error;

/// Rejected gallery configuration.
///
/// Runtime interaction never fails; only construction can.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("segment count must be at least 1")]
    ZeroSegments,
    #[error("drag sensitivity must be a positive number, got {0}")]
    NonPositiveSensitivity(f32),
    #[error("`{field}` must be a finite, non-negative number, got {value}")]
    InvalidNumber { field: &'static str, value: f32 },
    #[error("min radius {min} exceeds max radius {max}")]
    RadiusRange { min: f32, max: f32 },
}
