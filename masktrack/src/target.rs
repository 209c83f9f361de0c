//! Per-frame targets handed from the detection adapter to the tracker

use crate::geometry::{is_finite_point, Point};
use serde::{Deserialize, Serialize};

/// One detected subject in the current frame, before assignment.
///
/// `scale` is the characteristic size of the subject (expanded shoulder width
/// for poses, the larger box side for face boxes). Targets live for a single
/// frame and are never stored by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub position: Point,
    pub scale: f32,
    pub valid: bool,
}

impl Target {
    /// Create a target, marking it invalid when the measurement is unusable
    pub fn new(position: Point, scale: f32) -> Self {
        let valid = is_finite_point(&position) && scale.is_finite() && scale > 0.0;
        Self {
            position,
            scale,
            valid,
        }
    }

    /// Create a target that the tracker will ignore
    pub fn rejected(position: Point, scale: f32) -> Self {
        Self {
            position,
            scale,
            valid: false,
        }
    }

    /// Whether this target may reach the assignment stage.
    ///
    /// Re-checks the measurement so hand-built targets flagged `valid`
    /// with a NaN position or zero scale are still dropped.
    pub fn is_trackable(&self) -> bool {
        self.valid && is_finite_point(&self.position) && self.scale.is_finite() && self.scale > 0.0
    }
}
