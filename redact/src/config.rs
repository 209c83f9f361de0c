//! Redaction run configuration, loaded from JSON and overridden by CLI flags

use crate::error::{RedactError, Result};
use crate::types::DetectionSource;
use masktrack::{AdapterConfig, MaskCompositor, TrackerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the mask comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaskSource {
    /// A glyph rendered with the given font file
    Glyph {
        symbol: String,
        font_path: PathBuf,
        #[serde(default = "default_glyph_color")]
        color: [u8; 4],
    },
    /// An image file composited with its alpha channel
    Image { path: PathBuf },
}

fn default_glyph_color() -> [u8; 4] {
    [255, 204, 0, 255]
}

/// Full configuration of a redaction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactConfig {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub adapter: AdapterConfig,
    #[serde(default)]
    pub compositor: MaskCompositor,
    /// Which detector records feed the tracker
    #[serde(default)]
    pub detections_format: DetectionSource,
    pub mask: MaskSource,
}

impl RedactConfig {
    pub fn new(mask: MaskSource) -> Self {
        Self {
            tracker: TrackerConfig::default(),
            adapter: AdapterConfig::default(),
            compositor: MaskCompositor::default(),
            detections_format: DetectionSource::default(),
            mask,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.tracker.validate()?;
        self.adapter.validate()?;
        if !self.compositor.glyph_baseline_offset.is_finite() {
            return Err(RedactError::config("glyph_baseline_offset must be finite"));
        }
        if let MaskSource::Glyph { symbol, .. } = &self.mask {
            if symbol.is_empty() {
                return Err(RedactError::config("glyph mask needs a symbol"));
            }
        }
        Ok(())
    }
}
