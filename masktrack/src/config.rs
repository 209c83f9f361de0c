//! Tracker configuration passed into every `advance` call

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// How many subjects the tracker follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// Only the largest target of each frame reaches assignment
    Single,
    /// Every valid target is assigned
    #[default]
    Multi,
}

impl std::fmt::Display for TrackingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Multi => write!(f, "multi"),
        }
    }
}

impl std::str::FromStr for TrackingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multi" => Ok(Self::Multi),
            other => Err(format!("unknown tracking mode '{}'", other)),
        }
    }
}

/// What an unmatched track does while it coasts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PredictionPolicy {
    /// Hold position and scale until the track is matched or retired
    #[default]
    CoastInPlace,
    /// Keep moving along the last observed velocity, slowed by `friction` each frame
    Inertial { friction: f32 },
}

impl PredictionPolicy {
    pub const DEFAULT_FRICTION: f32 = 0.9;

    pub fn inertial() -> Self {
        Self::Inertial {
            friction: Self::DEFAULT_FRICTION,
        }
    }

    pub fn is_inertial(&self) -> bool {
        matches!(self, Self::Inertial { .. })
    }
}

/// Configuration for [`crate::MaskTracker::advance`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub tracking_mode: TrackingMode,
    /// Upper bound on rendered masks in multi mode
    pub max_concurrent_tracks: usize,
    /// Matching gate as a fraction of the frame width
    pub distance_gate_fraction: f32,
    /// Tracks missing for this many frames or more are not drawn
    pub visible_miss_threshold: u32,
    /// Tracks missing for more than this many frames are retired
    pub retire_miss_threshold: u32,
    pub smoothing_alpha_position: f32,
    pub smoothing_alpha_scale_fast: f32,
    pub smoothing_alpha_scale_slow: f32,
    /// Relative scale change below which the slow blend applies
    pub scale_jitter_deadzone: f32,
    /// Mask size relative to the track scale
    pub expansion_factor: f32,
    pub prediction: PredictionPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::multi_target()
    }
}

impl TrackerConfig {
    /// Several people at once, coasting in place while occluded
    pub fn multi_target() -> Self {
        Self {
            tracking_mode: TrackingMode::Multi,
            max_concurrent_tracks: 8,
            distance_gate_fraction: 0.25,
            visible_miss_threshold: 5,
            retire_miss_threshold: 15,
            smoothing_alpha_position: 0.5,
            smoothing_alpha_scale_fast: 0.15,
            smoothing_alpha_scale_slow: 0.005,
            scale_jitter_deadzone: 0.05,
            expansion_factor: 1.3,
            prediction: PredictionPolicy::CoastInPlace,
        }
    }

    /// One dominant subject, extrapolated through occlusions
    pub fn single_target() -> Self {
        Self {
            tracking_mode: TrackingMode::Single,
            max_concurrent_tracks: 1,
            distance_gate_fraction: 0.3,
            visible_miss_threshold: 5,
            retire_miss_threshold: 30,
            smoothing_alpha_position: 0.5,
            smoothing_alpha_scale_fast: 0.15,
            smoothing_alpha_scale_slow: 0.005,
            scale_jitter_deadzone: 0.05,
            expansion_factor: 1.5,
            prediction: PredictionPolicy::inertial(),
        }
    }

    /// Maximum center distance for a match, in pixels
    pub fn max_jump(&self, frame_width: u32) -> f32 {
        self.distance_gate_fraction * frame_width as f32
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_tracks == 0 {
            return Err(ConfigError::ZeroTrackCap);
        }
        if self.visible_miss_threshold > self.retire_miss_threshold.saturating_add(1) {
            return Err(ConfigError::VisibleAfterRetire {
                visible: self.visible_miss_threshold,
                retire: self.retire_miss_threshold,
            });
        }
        ConfigError::check_positive("distance_gate_fraction", self.distance_gate_fraction)?;
        ConfigError::check_blend("smoothing_alpha_position", self.smoothing_alpha_position)?;
        ConfigError::check_blend("smoothing_alpha_scale_fast", self.smoothing_alpha_scale_fast)?;
        ConfigError::check_blend("smoothing_alpha_scale_slow", self.smoothing_alpha_scale_slow)?;
        ConfigError::check_non_negative("scale_jitter_deadzone", self.scale_jitter_deadzone)?;
        ConfigError::check_positive("expansion_factor", self.expansion_factor)?;
        if let PredictionPolicy::Inertial { friction } = self.prediction {
            if !(0.0..=1.0).contains(&friction) {
                return Err(ConfigError::InvalidFriction(friction));
            }
        }
        Ok(())
    }
}
