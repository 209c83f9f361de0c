/// Image-backed rasterizer for mask draw calls
use crate::config::MaskSource;
use crate::error::{RedactError, Result};
use ab_glyph::{FontVec, PxScale};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use masktrack::{Canvas, MaskKind, Point, Rect};

/// Loaded mask artwork
pub enum MaskArt {
    Glyph {
        symbol: String,
        font: FontVec,
        color: Rgba<u8>,
    },
    Image(RgbaImage),
}

impl std::fmt::Debug for MaskArt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Glyph { symbol, color, .. } => f
                .debug_struct("Glyph")
                .field("symbol", symbol)
                .field("color", color)
                .finish(),
            Self::Image(img) => write!(f, "Image({}x{})", img.width(), img.height()),
        }
    }
}

impl MaskArt {
    pub fn load(source: &MaskSource) -> Result<Self> {
        match source {
            MaskSource::Glyph {
                symbol,
                font_path,
                color,
            } => {
                let bytes = std::fs::read(font_path)?;
                let font = FontVec::try_from_vec(bytes).map_err(|e| {
                    RedactError::font(format!("{}: {}", font_path.display(), e))
                })?;
                log::info!("Loaded glyph mask '{}' from {}", symbol, font_path.display());
                Ok(Self::Glyph {
                    symbol: symbol.clone(),
                    font,
                    color: Rgba(*color),
                })
            }
            MaskSource::Image { path } => {
                let img = image::open(path)?.to_rgba8();
                if img.width() == 0 || img.height() == 0 {
                    return Err(RedactError::config(format!(
                        "mask image {} is empty",
                        path.display()
                    )));
                }
                log::info!(
                    "Loaded image mask {} ({}x{})",
                    path.display(),
                    img.width(),
                    img.height()
                );
                Ok(Self::Image(img))
            }
        }
    }

    /// Mask description handed to the tracker
    pub fn kind(&self) -> MaskKind {
        match self {
            Self::Glyph { symbol, .. } => MaskKind::Glyph {
                symbol: symbol.clone(),
            },
            Self::Image(img) => MaskKind::Image {
                width: img.width(),
                height: img.height(),
            },
        }
    }
}

/// Draws masks straight into a decoded frame. Draws are clipped at the frame edges.
pub struct ImageCanvas<'a> {
    frame: &'a mut RgbaImage,
    art: &'a MaskArt,
    draw_calls: usize,
}

impl<'a> ImageCanvas<'a> {
    pub fn new(frame: &'a mut RgbaImage, art: &'a MaskArt) -> Self {
        Self {
            frame,
            art,
            draw_calls: 0,
        }
    }

    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }
}

/// Round a float extent to whole pixels, rejecting degenerate sizes
fn pixel_extent(value: f32) -> Option<u32> {
    if value.is_finite() && value >= 1.0 {
        Some(value.round() as u32)
    } else {
        None
    }
}

impl Canvas for ImageCanvas<'_> {
    fn draw_glyph(&mut self, symbol: &str, font_size: f32, center: Point) {
        let MaskArt::Glyph { font, color, .. } = self.art else {
            log::warn!("Glyph draw requested but the mask is an image");
            return;
        };
        if pixel_extent(font_size).is_none() || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }

        let scale = PxScale::from(font_size);
        let (w, h) = imageproc::drawing::text_size(scale, font, symbol);
        if w == 0 || h == 0 {
            // No outline in this font, nothing would be covered
            log::warn!("Font has no outline for mask glyph '{}'", symbol);
            return;
        }
        let x = (center.x - w as f32 / 2.0).round() as i32;
        let y = (center.y - h as f32 / 2.0).round() as i32;
        imageproc::drawing::draw_text_mut(&mut *self.frame, *color, x, y, scale, font, symbol);
        self.draw_calls += 1;
    }

    fn draw_image(&mut self, rect: Rect) {
        let MaskArt::Image(mask) = self.art else {
            log::warn!("Image draw requested but the mask is a glyph");
            return;
        };
        let (Some(w), Some(h)) = (pixel_extent(rect.width), pixel_extent(rect.height)) else {
            log::warn!("Skipping mask with degenerate size {}", rect);
            return;
        };
        if !rect.x.is_finite() || !rect.y.is_finite() {
            return;
        }

        let resized = imageops::resize(mask, w, h, FilterType::Triangle);
        imageops::overlay(
            &mut *self.frame,
            &resized,
            rect.x.round() as i64,
            rect.y.round() as i64,
        );
        self.draw_calls += 1;
    }
}
