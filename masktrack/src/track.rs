//! Per-subject track state: smoothed updates, occlusion prediction and lifecycle

use crate::config::{PredictionPolicy, TrackerConfig};
use crate::geometry::{point, Point};
use crate::target::Target;
use serde::Serialize;

pub type TrackId = u64;

/// Lifecycle state of a live track. Retired tracks are removed from the live set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackState {
    /// Matched in the current frame
    Active,
    /// Unmatched for `missed_frames` frames, not yet retired
    Coasting,
}

/// Identity-bearing estimate of one subject across frames.
///
/// Fields are only written by the tracker's update paths; callers get
/// read-only accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    id: TrackId,
    position: Point,
    scale: f32,
    /// Displacement per frame, maintained only by the inertial policy
    velocity: Point,
    missed_frames: u32,
    updated_this_frame: bool,
}

impl Track {
    /// Birth: start directly at the target's measurement
    pub(crate) fn spawn(id: TrackId, target: &Target) -> Self {
        Track {
            id,
            position: target.position,
            scale: target.scale,
            velocity: point(0.0, 0.0),
            missed_frames: 0,
            updated_this_frame: true,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn missed_frames(&self) -> u32 {
        self.missed_frames
    }

    pub fn updated_this_frame(&self) -> bool {
        self.updated_this_frame
    }

    pub fn state(&self) -> TrackState {
        if self.missed_frames == 0 {
            TrackState::Active
        } else {
            TrackState::Coasting
        }
    }

    /// Whether the mask for this track should be drawn
    pub fn is_drawable(&self, visible_miss_threshold: u32) -> bool {
        self.missed_frames < visible_miss_threshold
    }

    /// Whether the track has coasted long enough to be retired
    pub fn is_expired(&self, retire_miss_threshold: u32) -> bool {
        self.missed_frames > retire_miss_threshold
    }

    pub(crate) fn begin_frame(&mut self) {
        self.updated_this_frame = false;
    }

    /// Matched update: exponential smoothing with a two-speed scale deadzone
    pub(crate) fn apply_match(&mut self, target: &Target, config: &TrackerConfig) {
        let previous = self.position;
        self.position += (target.position - self.position) * config.smoothing_alpha_position;

        let relative_change = (target.scale - self.scale).abs() / self.scale;
        let alpha_scale = if relative_change < config.scale_jitter_deadzone {
            config.smoothing_alpha_scale_slow
        } else {
            config.smoothing_alpha_scale_fast
        };
        self.scale += (target.scale - self.scale) * alpha_scale;

        if config.prediction.is_inertial() {
            self.velocity = self.position - previous;
        }

        self.missed_frames = 0;
        self.updated_this_frame = true;
    }

    /// Unmatched update: predict according to the policy and count the miss
    pub(crate) fn coast(&mut self, policy: &PredictionPolicy) {
        if let PredictionPolicy::Inertial { friction } = *policy {
            self.position += self.velocity;
            self.velocity *= friction;
        }
        self.missed_frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn target(x: f32, y: f32, scale: f32) -> Target {
        Target::new(point(x, y), scale)
    }

    #[test]
    fn test_spawn_copies_target() {
        let track = Track::spawn(7, &target(100.0, 50.0, 40.0));
        assert_eq!(track.id(), 7);
        assert_eq!(track.position(), point(100.0, 50.0));
        assert_eq!(track.scale(), 40.0);
        assert_eq!(track.missed_frames(), 0);
        assert!(track.updated_this_frame());
        assert_eq!(track.state(), TrackState::Active);
    }

    #[test]
    fn test_position_blends_toward_target() {
        let config = TrackerConfig::multi_target();
        let mut track = Track::spawn(1, &target(0.0, 0.0, 40.0));
        track.apply_match(&target(10.0, -20.0, 40.0), &config);
        assert_abs_diff_eq!(track.position().x, 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(track.position().y, -10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_scale_deadzone_uses_slow_blend() {
        let config = TrackerConfig::multi_target();
        let mut track = Track::spawn(1, &target(0.0, 0.0, 100.0));
        // 3% change sits inside the 5% deadzone
        track.apply_match(&target(0.0, 0.0, 103.0), &config);
        assert_abs_diff_eq!(track.scale(), 100.0 + 3.0 * 0.005, epsilon = 1e-4);
    }

    #[test]
    fn test_scale_outside_deadzone_uses_fast_blend() {
        let config = TrackerConfig::multi_target();
        let mut track = Track::spawn(1, &target(0.0, 0.0, 100.0));
        track.apply_match(&target(0.0, 0.0, 140.0), &config);
        assert_abs_diff_eq!(track.scale(), 100.0 + 40.0 * 0.15, epsilon = 1e-4);
    }

    #[test]
    fn test_deadzone_bounds_drift_under_oscillation() {
        let config = TrackerConfig::multi_target();
        let mut track = Track::spawn(1, &target(0.0, 0.0, 100.0));
        for frame in 0..200 {
            let jitter = if frame % 2 == 0 { 104.0 } else { 96.0 };
            let before = track.scale();
            track.apply_match(&target(0.0, 0.0, jitter), &config);
            let step = (track.scale() - before).abs();
            assert!(step <= (jitter - before).abs() * config.smoothing_alpha_scale_slow + 1e-5);
            assert!(step < before * config.scale_jitter_deadzone * config.smoothing_alpha_scale_slow);
        }
        assert_abs_diff_eq!(track.scale(), 100.0, epsilon = 0.5);
    }

    #[test]
    fn test_coast_in_place_holds_state() {
        let config = TrackerConfig::multi_target();
        let mut track = Track::spawn(1, &target(10.0, 10.0, 40.0));
        track.apply_match(&target(20.0, 10.0, 40.0), &config);
        let held = track.position();
        track.begin_frame();
        track.coast(&config.prediction);
        track.coast(&config.prediction);
        assert_eq!(track.position(), held);
        assert_eq!(track.velocity(), point(0.0, 0.0));
        assert_eq!(track.missed_frames(), 2);
        assert_eq!(track.state(), TrackState::Coasting);
        assert!(!track.updated_this_frame());
    }

    #[test]
    fn test_match_resets_missed_frames() {
        let config = TrackerConfig::multi_target();
        let mut track = Track::spawn(1, &target(10.0, 10.0, 40.0));
        track.coast(&config.prediction);
        track.coast(&config.prediction);
        track.apply_match(&target(10.0, 10.0, 40.0), &config);
        assert_eq!(track.missed_frames(), 0);
        assert_eq!(track.state(), TrackState::Active);
    }

    #[test]
    fn test_inertial_velocity_decays_geometrically() {
        let config = TrackerConfig::single_target();
        let mut track = Track::spawn(1, &target(0.0, 0.0, 40.0));
        track.apply_match(&target(20.0, 10.0, 40.0), &config);

        let v0 = track.velocity();
        let p0 = track.position();
        assert_abs_diff_eq!(v0.x, 10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(v0.y, 5.0, epsilon = 1e-5);

        let mut expected = p0;
        for k in 1..=6 {
            expected += v0 * 0.9f32.powi(k - 1);
            track.coast(&config.prediction);
            let v = track.velocity();
            assert_abs_diff_eq!(v.norm(), v0.norm() * 0.9f32.powi(k), epsilon = 1e-4);
            assert_abs_diff_eq!(track.position().x, expected.x, epsilon = 1e-3);
            assert_abs_diff_eq!(track.position().y, expected.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_drawable_and_expired_thresholds() {
        let config = TrackerConfig::multi_target();
        let mut track = Track::spawn(1, &target(0.0, 0.0, 40.0));
        for _ in 0..4 {
            track.coast(&config.prediction);
        }
        assert!(track.is_drawable(5));
        track.coast(&config.prediction);
        assert!(!track.is_drawable(5));
        assert!(!track.is_expired(5));
        track.coast(&config.prediction);
        assert!(track.is_expired(5));
    }
}
