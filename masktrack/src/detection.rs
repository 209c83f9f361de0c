//! Detection adapter: detector output to per-frame [`Target`]s
//!
//! Two detector shapes are supported:
//! - pose landmarks (BlazePose-style 33-point sets with per-point visibility)
//! - face bounding boxes from a single-entity face detector
//!
//! Measurements that are non-finite, non-positive or below the minimum-size
//! gate come out as `valid = false` and never reach assignment.

use crate::error::{ConfigError, Result};
use crate::geometry::{center_distance, is_finite_point, midpoint, point, Point};
use crate::target::Target;
use serde::{Deserialize, Serialize};

fn full_visibility() -> f32 {
    1.0
}

/// One landmark of a pose detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }
}

/// All landmarks of one detected person
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseDetection {
    pub landmarks: Vec<Landmark>,
    #[serde(default)]
    pub score: Option<f32>,
}

/// Face bounding box in pixel coordinates, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub score: Option<f32>,
}

impl FaceBox {
    pub fn new(origin_x: f32, origin_y: f32, width: f32, height: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
            score: None,
        }
    }

    pub fn center(&self) -> Point {
        point(
            self.origin_x + self.width / 2.0,
            self.origin_y + self.height / 2.0,
        )
    }
}

/// Coordinate space of incoming landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkSpace {
    /// 0..1 relative to frame width/height
    #[default]
    Normalized,
    Pixels,
}

/// Which landmark indices play which role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkRoles {
    pub head: usize,
    pub left_ear: usize,
    pub right_ear: usize,
    pub left_shoulder: usize,
    pub right_shoulder: usize,
}

impl Default for LandmarkRoles {
    /// BlazePose topology: nose, ears, shoulders
    fn default() -> Self {
        Self {
            head: 0,
            left_ear: 7,
            right_ear: 8,
            left_shoulder: 11,
            right_shoulder: 12,
        }
    }
}

impl LandmarkRoles {
    fn validate(&self) -> Result<()> {
        let roles = [
            ("head", self.head),
            ("left_ear", self.left_ear),
            ("right_ear", self.right_ear),
            ("left_shoulder", self.left_shoulder),
            ("right_shoulder", self.right_shoulder),
        ];
        for (i, (role, index)) in roles.iter().enumerate() {
            if roles[..i].iter().any(|(_, other)| other == index) {
                return Err(ConfigError::DuplicateLandmark {
                    role: *role,
                    index: *index,
                });
            }
        }
        Ok(())
    }
}

/// Adapter configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub landmark_space: LandmarkSpace,
    pub roles: LandmarkRoles,
    /// Visibility a head or ear landmark must exceed to anchor the position
    pub head_visibility_threshold: f32,
    /// Applied to the shoulder span so masks overdraw rather than underdraw
    pub scale_expansion: f32,
    /// Minimum raw size in pixels
    pub min_scale_px: f32,
    /// Minimum raw shoulder span as a fraction of the frame width
    pub min_scale_frame_fraction: f32,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            landmark_space: LandmarkSpace::Normalized,
            roles: LandmarkRoles::default(),
            head_visibility_threshold: 0.5,
            scale_expansion: 1.2,
            min_scale_px: 10.0,
            min_scale_frame_fraction: 0.05,
        }
    }
}

impl AdapterConfig {
    pub fn validate(&self) -> Result<()> {
        ConfigError::check_non_negative("head_visibility_threshold", self.head_visibility_threshold)?;
        ConfigError::check_positive("scale_expansion", self.scale_expansion)?;
        ConfigError::check_non_negative("min_scale_px", self.min_scale_px)?;
        ConfigError::check_non_negative("min_scale_frame_fraction", self.min_scale_frame_fraction)?;
        self.roles.validate()
    }
}

/// Normalizes detector output into targets
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectionAdapter {
    config: AdapterConfig,
}

impl DetectionAdapter {
    pub fn new(config: AdapterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// One target per pose, in detector order
    pub fn targets_from_poses(
        &self,
        poses: &[PoseDetection],
        frame_width: u32,
        frame_height: u32,
    ) -> Vec<Target> {
        poses
            .iter()
            .map(|pose| self.pose_target(pose, frame_width, frame_height))
            .collect()
    }

    /// Bounding-box mode: at most one target, from the first box
    pub fn targets_from_face_boxes(&self, faces: &[FaceBox]) -> Vec<Target> {
        faces
            .first()
            .map(|face| {
                let center = face.center();
                let size = face.width.max(face.height);
                let target = Target::new(center, size);
                if target.valid && size >= self.config.min_scale_px {
                    target
                } else {
                    log::trace!("Rejected face box {:?}", face);
                    Target::rejected(center, size)
                }
            })
            .into_iter()
            .collect()
    }

    fn to_pixels(&self, landmark: &Landmark, frame_width: u32, frame_height: u32) -> Point {
        match self.config.landmark_space {
            LandmarkSpace::Normalized => point(
                landmark.x * frame_width as f32,
                landmark.y * frame_height as f32,
            ),
            LandmarkSpace::Pixels => point(landmark.x, landmark.y),
        }
    }

    fn pose_target(&self, pose: &PoseDetection, frame_width: u32, frame_height: u32) -> Target {
        let roles = &self.config.roles;
        let landmark = |index: usize| pose.landmarks.get(index);
        let pixel = |lm: &Landmark| self.to_pixels(lm, frame_width, frame_height);

        let (left_shoulder, right_shoulder) =
            match (landmark(roles.left_shoulder), landmark(roles.right_shoulder)) {
                (Some(l), Some(r)) => (pixel(l), pixel(r)),
                _ => {
                    log::trace!(
                        "Pose with {} landmarks has no shoulders",
                        pose.landmarks.len()
                    );
                    return Target::rejected(point(0.0, 0.0), 0.0);
                }
            };

        let span = center_distance(&left_shoulder, &right_shoulder);
        let shoulder_mid = midpoint(&left_shoulder, &right_shoulder);
        let threshold = self.config.head_visibility_threshold;

        let position = if let Some(head) = visible(landmark(roles.head), threshold) {
            pixel(head)
        } else if let (Some(l), Some(r)) = (
            visible(landmark(roles.left_ear), threshold),
            visible(landmark(roles.right_ear), threshold),
        ) {
            midpoint(&pixel(l), &pixel(r))
        } else {
            point(shoulder_mid.x, shoulder_mid.y - span / 2.0)
        };

        let min_span = self
            .config
            .min_scale_px
            .max(self.config.min_scale_frame_fraction * frame_width as f32);
        let scale = span * self.config.scale_expansion;

        if !is_finite_point(&position) || !span.is_finite() || span <= min_span {
            log::trace!("Rejected pose: span {:.1}px below gate {:.1}px", span, min_span);
            return Target::rejected(position, scale);
        }
        Target::new(position, scale)
    }
}

/// A landmark that clears the visibility threshold (strictly)
fn visible(landmark: Option<&Landmark>, threshold: f32) -> Option<&Landmark> {
    landmark.filter(|lm| lm.visibility > threshold)
}
