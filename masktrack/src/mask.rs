//! Mask placement: from a track's (position, size) to a draw call

use crate::geometry::{Point, Rect};
use crate::track::TrackId;
use serde::{Deserialize, Serialize};

/// What gets drawn over each tracked subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaskKind {
    /// A character (usually an emoji) rendered at a computed font size
    Glyph { symbol: String },
    /// A source image; its native size fixes the aspect ratio
    Image { width: u32, height: u32 },
}

impl Default for MaskKind {
    fn default() -> Self {
        Self::Glyph {
            symbol: "\u{1F642}".to_string(),
        }
    }
}

/// One mask to draw this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableMask {
    pub track_id: TrackId,
    /// Center of the tracked subject
    pub position: Point,
    /// Destination size, already expanded from the track scale
    pub size: f32,
    pub kind: MaskKind,
}

/// A resolved draw instruction for the rasterizer
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Glyph {
        track_id: TrackId,
        symbol: String,
        font_size: f32,
        /// Point the glyph is centered on
        center: Point,
    },
    Image { track_id: TrackId, rect: Rect },
}

/// Rasterizer seam. Implementations clip to the frame themselves.
pub trait Canvas {
    fn draw_glyph(&mut self, symbol: &str, font_size: f32, center: Point);
    fn draw_image(&mut self, rect: Rect);
}

/// Turns renderable masks into draw calls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskCompositor {
    /// Downward shift of glyph masks as a fraction of their size.
    /// Glyph baselines sit high relative to a face's center.
    pub glyph_baseline_offset: f32,
}

impl Default for MaskCompositor {
    fn default() -> Self {
        Self {
            glyph_baseline_offset: 0.1,
        }
    }
}

impl MaskCompositor {
    pub fn new(glyph_baseline_offset: f32) -> Self {
        Self {
            glyph_baseline_offset,
        }
    }

    pub fn placement(&self, mask: &RenderableMask) -> DrawCommand {
        match &mask.kind {
            MaskKind::Glyph { symbol } => {
                let mut center = mask.position;
                center.y += mask.size * self.glyph_baseline_offset;
                DrawCommand::Glyph {
                    track_id: mask.track_id,
                    symbol: symbol.clone(),
                    font_size: mask.size,
                    center,
                }
            }
            MaskKind::Image { width, height } => {
                let aspect = if *width > 0 {
                    *height as f32 / *width as f32
                } else {
                    1.0
                };
                DrawCommand::Image {
                    track_id: mask.track_id,
                    rect: Rect::from_center(mask.position, mask.size, mask.size * aspect),
                }
            }
        }
    }

    /// Issue one draw call per mask
    pub fn composite<C: Canvas + ?Sized>(&self, masks: &[RenderableMask], canvas: &mut C) {
        for mask in masks {
            match self.placement(mask) {
                DrawCommand::Glyph {
                    symbol,
                    font_size,
                    center,
                    ..
                } => canvas.draw_glyph(&symbol, font_size, center),
                DrawCommand::Image { rect, .. } => canvas.draw_image(rect),
            }
            log::trace!("Composited mask for track {}", mask.track_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;
    use approx::assert_abs_diff_eq;

    #[derive(Default)]
    struct RecordingCanvas {
        glyphs: Vec<(String, f32, Point)>,
        images: Vec<Rect>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_glyph(&mut self, symbol: &str, font_size: f32, center: Point) {
            self.glyphs.push((symbol.to_string(), font_size, center));
        }

        fn draw_image(&mut self, rect: Rect) {
            self.images.push(rect);
        }
    }

    fn mask(kind: MaskKind) -> RenderableMask {
        RenderableMask {
            track_id: 3,
            position: point(200.0, 100.0),
            size: 80.0,
            kind,
        }
    }

    #[test]
    fn test_glyph_offset_down() {
        let compositor = MaskCompositor::default();
        let cmd = compositor.placement(&mask(MaskKind::Glyph {
            symbol: "X".to_string(),
        }));
        match cmd {
            DrawCommand::Glyph {
                font_size, center, ..
            } => {
                assert_eq!(font_size, 80.0);
                assert_abs_diff_eq!(center.x, 200.0);
                assert_abs_diff_eq!(center.y, 108.0, epsilon = 1e-4);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_image_keeps_native_aspect() {
        let compositor = MaskCompositor::default();
        let cmd = compositor.placement(&mask(MaskKind::Image {
            width: 200,
            height: 100,
        }));
        match cmd {
            DrawCommand::Image { rect, track_id } => {
                assert_eq!(track_id, 3);
                assert_abs_diff_eq!(rect.width, 80.0);
                assert_abs_diff_eq!(rect.height, 40.0);
                assert_abs_diff_eq!(rect.x, 160.0);
                assert_abs_diff_eq!(rect.y, 80.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_composite_one_call_per_mask() {
        let compositor = MaskCompositor::default();
        let mut canvas = RecordingCanvas::default();
        let masks = vec![
            mask(MaskKind::default()),
            mask(MaskKind::Image {
                width: 10,
                height: 10,
            }),
            mask(MaskKind::default()),
        ];
        compositor.composite(&masks, &mut canvas);
        assert_eq!(canvas.glyphs.len(), 2);
        assert_eq!(canvas.images.len(), 1);
    }
}
