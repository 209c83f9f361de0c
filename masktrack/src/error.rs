//! Error types for tracker and adapter configuration

use thiserror::Error;

/// Result type alias for configuration checks
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Rejected configuration values.
///
/// Tracking itself never fails; only configurations are checked.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be within (0, 1], got {value}")]
    BlendOutOfRange { field: &'static str, value: f32 },

    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("max_concurrent_tracks must be at least 1")]
    ZeroTrackCap,

    #[error("visible_miss_threshold {visible} outlives retire_miss_threshold {retire}")]
    VisibleAfterRetire { visible: u32, retire: u32 },

    #[error("inertial friction must be within [0, 1], got {0}")]
    InvalidFriction(f32),

    #[error("landmark index {index} for {role} is used twice")]
    DuplicateLandmark { role: &'static str, index: usize },
}

impl ConfigError {
    pub(crate) fn check_blend(field: &'static str, value: f32) -> Result<()> {
        if value > 0.0 && value <= 1.0 {
            Ok(())
        } else {
            Err(Self::BlendOutOfRange { field, value })
        }
    }

    pub(crate) fn check_positive(field: &'static str, value: f32) -> Result<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NotPositive { field, value })
        }
    }

    pub(crate) fn check_non_negative(field: &'static str, value: f32) -> Result<()> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::Negative { field, value })
        }
    }
}
