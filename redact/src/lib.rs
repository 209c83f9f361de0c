//! Frame redaction host for masktrack
//!
//! Reads still frames and per-frame detector records, tracks the people in
//! them with [`masktrack::MaskTracker`] and composites a glyph or image mask
//! over every tracked head. Composited frames are written back out as
//! numbered PNGs.

pub mod canvas;
pub mod config;
pub mod error;
pub mod frames;
pub mod pipeline;
pub mod types;

pub use canvas::{ImageCanvas, MaskArt};
pub use config::{MaskSource, RedactConfig};
pub use error::{RedactError, Result};
pub use frames::{FrameSink, FrameSource};
pub use pipeline::{FrameReport, PipelineStats, RedactionPipeline};
pub use types::{DetectionLog, DetectionSource, FrameDetections};

/// Get library version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
