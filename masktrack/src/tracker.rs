//! Online multi-target mask tracker
//!
//! One `advance` call per video frame: filter and select targets, assign them
//! greedily to live tracks, update matched tracks, coast the rest, retire the
//! stale ones, spawn tracks for leftovers and emit the masks to draw.

use crate::assignment::GreedyAssigner;
use crate::config::TrackerConfig;
use crate::geometry::Point;
use crate::mask::{MaskKind, RenderableMask};
use crate::selection::{filter_targets, renderable_tracks};
use crate::target::Target;
use crate::track::{Track, TrackId};

/// Owns the live track set for one clip.
///
/// Cloning gives an independent snapshot, for hosts that want to run
/// inference on the next frame while this one is still being composited.
#[derive(Debug, Clone)]
pub struct MaskTracker {
    mask: MaskKind,
    tracks: Vec<Track>,
    next_track_id: TrackId,
    n_steps: u64,
}

impl Default for MaskTracker {
    fn default() -> Self {
        Self::new(MaskKind::default())
    }
}

impl MaskTracker {
    pub fn new(mask: MaskKind) -> Self {
        MaskTracker {
            mask,
            tracks: Vec::new(),
            next_track_id: 1,
            n_steps: 0,
        }
    }

    /// Process one frame's targets and return the masks to draw.
    ///
    /// An empty (or all-invalid) target list is a normal frame: every track
    /// coasts and may retire.
    pub fn advance(
        &mut self,
        targets: &[Target],
        frame_width: u32,
        frame_height: u32,
        config: &TrackerConfig,
    ) -> Vec<RenderableMask> {
        // Step 1: Drop invalid targets, then apply the mode's pre-filter
        let valid: Vec<Target> = targets.iter().filter(|t| t.is_trackable()).copied().collect();
        let dropped = targets.len() - valid.len();
        let selected = filter_targets(config.tracking_mode, valid);

        // Step 2: Nothing is claimed yet this frame
        for track in &mut self.tracks {
            track.begin_frame();
        }

        // Step 3: Greedy nearest-center assignment
        let max_jump = config.max_jump(frame_width);
        let target_centers: Vec<Point> = selected.iter().map(|t| t.position).collect();
        let track_centers: Vec<Point> = self.tracks.iter().map(|t| t.position()).collect();
        let assignment = GreedyAssigner::solve(&target_centers, &track_centers, max_jump);

        // Step 4: Smoothed update for matched tracks
        for &(target_idx, track_idx) in &assignment.assignments {
            let track = &mut self.tracks[track_idx];
            track.apply_match(&selected[target_idx], config);
            log::trace!(
                "Track {} matched at ({:.1}, {:.1}) scale {:.1}",
                track.id(),
                track.position().x,
                track.position().y,
                track.scale()
            );
        }

        // Step 5: Predictive update for unmatched tracks
        for &track_idx in &assignment.unassigned_tracks {
            self.tracks[track_idx].coast(&config.prediction);
        }

        // Step 6: Retire tracks that coasted too long
        self.remove_stale_tracks(config.retire_miss_threshold);

        // Step 7: Spawn tracks for unmatched targets
        self.create_tracks(assignment.unassigned_targets.iter().map(|&i| &selected[i]));

        self.n_steps += 1;
        log::debug!(
            "Frame {} ({}x{}): {} targets ({} dropped), {} matched, {} live tracks",
            self.n_steps,
            frame_width,
            frame_height,
            selected.len(),
            dropped,
            assignment.assignments.len(),
            self.tracks.len()
        );

        // Step 8: Masks for draw-eligible tracks
        self.renderables(config)
    }

    fn create_tracks<'a>(&mut self, targets: impl Iterator<Item = &'a Target>) {
        for target in targets {
            let track = Track::spawn(self.next_track_id, target);
            log::debug!(
                "Track {} born at ({:.1}, {:.1}) scale {:.1}",
                track.id(),
                target.position.x,
                target.position.y,
                target.scale
            );
            self.tracks.push(track);
            self.next_track_id += 1;
        }
    }

    fn remove_stale_tracks(&mut self, retire_miss_threshold: u32) {
        self.tracks.retain(|track| {
            let keep = !track.is_expired(retire_miss_threshold);
            if !keep {
                log::debug!(
                    "Track {} retired after {} missed frames",
                    track.id(),
                    track.missed_frames()
                );
            }
            keep
        });
    }

    fn renderables(&self, config: &TrackerConfig) -> Vec<RenderableMask> {
        renderable_tracks(
            &self.tracks,
            config.tracking_mode,
            config.max_concurrent_tracks,
            config.visible_miss_threshold,
        )
        .into_iter()
        .map(|idx| {
            let track = &self.tracks[idx];
            RenderableMask {
                track_id: track.id(),
                position: track.position(),
                size: track.scale() * config.expansion_factor,
                kind: self.mask.clone(),
            }
        })
        .collect()
    }

    /// Live tracks in birth order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    pub fn step_count(&self) -> u64 {
        self.n_steps
    }

    pub fn mask(&self) -> &MaskKind {
        &self.mask
    }

    /// Drop every track. Ids keep increasing so none is ever reused.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.n_steps = 0;
    }
}
