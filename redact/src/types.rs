//! Detector output records, one per frame
//!
//! The detector runs outside this crate and writes JSON Lines:
//!
//! ```text
//! {"frame":0,"poses":[{"landmarks":[{"x":0.51,"y":0.22,"visibility":0.98}, ...]}]}
//! {"frame":1,"faces":[{"origin_x":310,"origin_y":120,"width":96,"height":110}]}
//! ```
//!
//! Frames with no record are treated as frames with no detections.

use crate::error::{RedactError, Result};
use masktrack::{FaceBox, PoseDetection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

/// Which part of a record feeds the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Full-body landmark sets, one target per person
    #[default]
    Poses,
    /// Face boxes from a single-face detector, at most one target per frame
    Faces,
}

/// Detections for a single frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameDetections {
    pub frame: usize,
    #[serde(default)]
    pub poses: Vec<PoseDetection>,
    #[serde(default)]
    pub faces: Vec<FaceBox>,
}

impl FrameDetections {
    pub fn empty(frame: usize) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    pub fn count(&self, source: DetectionSource) -> usize {
        match source {
            DetectionSource::Poses => self.poses.len(),
            DetectionSource::Faces => self.faces.len(),
        }
    }
}

/// All detection records of a clip, indexed by frame
#[derive(Debug, Clone, Default)]
pub struct DetectionLog {
    frames: BTreeMap<usize, FrameDetections>,
}

impl DetectionLog {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut frames = BTreeMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let record: FrameDetections = serde_json::from_str(trimmed)
                .map_err(|e| RedactError::record(idx + 1, e.to_string()))?;
            if frames.insert(record.frame, record).is_some() {
                log::warn!("Duplicate detection record at line {}, keeping the later one", idx + 1);
            }
        }
        log::info!("Loaded detection records for {} frames", frames.len());
        Ok(Self { frames })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Detections for `frame`, or an empty record when the detector reported nothing
    pub fn frame(&self, frame: usize) -> FrameDetections {
        self.frames
            .get(&frame)
            .cloned()
            .unwrap_or_else(|| FrameDetections::empty(frame))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
