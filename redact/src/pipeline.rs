/// Frame redaction pipeline
///
/// Each frame goes through three stages:
/// 1. Adaptation: detector records to tracker targets
/// 2. Tracking: one `MaskTracker::advance` step
/// 3. Compositing: renderable masks drawn into the frame
use crate::canvas::{ImageCanvas, MaskArt};
use crate::config::RedactConfig;
use crate::error::Result;
use crate::frames::{FrameSink, FrameSource};
use crate::types::{DetectionLog, DetectionSource, FrameDetections};
use image::RgbaImage;
use masktrack::{DetectionAdapter, MaskCompositor, MaskTracker, RenderableMask, TrackerConfig};
use std::time::Instant;

/// Outcome of one processed frame
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: usize,
    pub targets: usize,
    pub masks: Vec<RenderableMask>,
    pub draw_calls: usize,
    pub live_tracks: usize,
    pub elapsed_ms: f32,
}

/// Running totals over a clip
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PipelineStats {
    pub frames: usize,
    pub targets: usize,
    pub masks_drawn: usize,
    pub peak_live_tracks: usize,
    pub total_time_ms: f32,
}

impl PipelineStats {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.targets += report.targets;
        self.masks_drawn += report.draw_calls;
        self.peak_live_tracks = self.peak_live_tracks.max(report.live_tracks);
        self.total_time_ms += report.elapsed_ms;
    }

    pub fn avg_frame_ms(&self) -> f32 {
        if self.frames == 0 {
            0.0
        } else {
            self.total_time_ms / self.frames as f32
        }
    }
}

pub struct RedactionPipeline {
    tracker: MaskTracker,
    tracker_config: TrackerConfig,
    adapter: DetectionAdapter,
    compositor: MaskCompositor,
    detections: DetectionSource,
    art: MaskArt,
    stats: PipelineStats,
}

impl RedactionPipeline {
    /// Build a pipeline around already loaded mask artwork
    pub fn new(config: &RedactConfig, art: MaskArt) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Redaction pipeline: {} mode, {:?} detections, mask {:?}",
            config.tracker.tracking_mode,
            config.detections_format,
            art
        );
        Ok(Self {
            tracker: MaskTracker::new(art.kind()),
            tracker_config: config.tracker.clone(),
            adapter: DetectionAdapter::new(config.adapter),
            compositor: config.compositor,
            detections: config.detections_format,
            art,
            stats: PipelineStats::default(),
        })
    }

    /// Build a pipeline, loading the mask named in the config
    pub fn from_config(config: &RedactConfig) -> Result<Self> {
        let art = MaskArt::load(&config.mask)?;
        Self::new(config, art)
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    pub fn tracker(&self) -> &MaskTracker {
        &self.tracker
    }

    /// Track and redact one frame in place
    pub fn process_frame(
        &mut self,
        frame: &mut RgbaImage,
        detections: &FrameDetections,
    ) -> FrameReport {
        let start = Instant::now();
        let (width, height) = frame.dimensions();

        let targets = match self.detections {
            DetectionSource::Poses => {
                self.adapter
                    .targets_from_poses(&detections.poses, width, height)
            }
            DetectionSource::Faces => self.adapter.targets_from_face_boxes(&detections.faces),
        };

        let detected = detections.count(self.detections);
        if detected > targets.len() {
            log::trace!(
                "Frame {}: {} of {} detections reduced away",
                detections.frame,
                detected - targets.len(),
                detected
            );
        }

        let masks = self
            .tracker
            .advance(&targets, width, height, &self.tracker_config);

        let mut canvas = ImageCanvas::new(frame, &self.art);
        self.compositor.composite(&masks, &mut canvas);
        let draw_calls = canvas.draw_calls();

        let report = FrameReport {
            frame: detections.frame,
            targets: targets.len(),
            masks,
            draw_calls,
            live_tracks: self.tracker.num_tracks(),
            elapsed_ms: start.elapsed().as_secs_f32() * 1000.0,
        };
        self.stats.record(&report);

        log::debug!(
            "Frame {}: {} detections, {} targets, {} live tracks, {} masks drawn ({:.2}ms)",
            report.frame,
            detected,
            report.targets,
            report.live_tracks,
            report.draw_calls,
            report.elapsed_ms
        );
        report
    }

    /// Redact every frame of `source` into `sink`
    pub fn run(
        &mut self,
        source: &mut FrameSource,
        detections: &DetectionLog,
        sink: &mut FrameSink,
    ) -> Result<PipelineStats> {
        for index in 0..source.len() {
            let mut frame = source.load(index)?;
            let report = self.process_frame(&mut frame, &detections.frame(index));
            sink.write(index, &frame)?;

            if (index + 1) % 100 == 0 {
                log::info!(
                    "Processed {}/{} frames, {} live tracks",
                    index + 1,
                    source.len(),
                    report.live_tracks
                );
            }
        }
        self.finish();
        Ok(self.stats)
    }

    /// Log the clip summary
    pub fn finish(&self) {
        let stats = &self.stats;
        log::info!(
            "Redacted {} frames: {} targets, {} masks drawn, peak {} live tracks, avg {:.2}ms/frame",
            stats.frames,
            stats.targets,
            stats.masks_drawn,
            stats.peak_live_tracks,
            stats.avg_frame_ms()
        );
    }
}
