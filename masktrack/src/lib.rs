//! Online 2D multi-target tracking for mask redaction
//!
//! Turns a noisy, unordered list of per-frame person detections into stable,
//! identity-persistent mask placements:
//!
//! - [`DetectionAdapter`] normalizes pose landmarks or face boxes into [`Target`]s
//! - [`GreedyAssigner`] matches targets to tracks by nearest center under a distance gate
//! - [`Track`] smooths matched updates (with a scale jitter deadzone) and predicts while occluded
//! - [`selection`] applies single-target reduction and the multi-target render cap
//! - [`MaskCompositor`] maps each renderable track to a glyph or image draw call
//!
//! ```rust,ignore
//! use masktrack::{DetectionAdapter, MaskCompositor, MaskTracker, TrackerConfig};
//!
//! let config = TrackerConfig::multi_target();
//! let adapter = DetectionAdapter::default();
//! let mut tracker = MaskTracker::default();
//!
//! let targets = adapter.targets_from_poses(&poses, width, height);
//! let masks = tracker.advance(&targets, width, height, &config);
//! MaskCompositor::default().composite(&masks, &mut canvas);
//! ```

pub mod assignment;
pub mod config;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod selection;
pub mod target;
pub mod track;
pub mod tracker;

pub use assignment::{AssignmentResult, GreedyAssigner};
pub use config::{PredictionPolicy, TrackerConfig, TrackingMode};
pub use detection::{
    AdapterConfig, DetectionAdapter, FaceBox, Landmark, LandmarkRoles, LandmarkSpace,
    PoseDetection,
};
pub use error::ConfigError;
pub use geometry::{Point, Rect};
pub use mask::{Canvas, DrawCommand, MaskCompositor, MaskKind, RenderableMask};
pub use target::Target;
pub use track::{Track, TrackId, TrackState};
pub use tracker::MaskTracker;
