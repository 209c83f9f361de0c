//! Largest-wins selection: target pre-filter for single mode and the
//! render cap for multi mode

use crate::config::TrackingMode;
use crate::target::Target;
use crate::track::Track;

/// The target with the greatest scale; the first one wins ties
pub fn largest_target(targets: &[Target]) -> Option<Target> {
    let mut best: Option<Target> = None;
    for target in targets {
        match best {
            Some(current) if target.scale <= current.scale => {}
            _ => best = Some(*target),
        }
    }
    best
}

/// Reduce the frame's targets before assignment.
///
/// Single mode keeps at most the largest target so a momentarily larger
/// subject can take over the one track through the normal match/birth path.
pub fn filter_targets(mode: TrackingMode, targets: Vec<Target>) -> Vec<Target> {
    match mode {
        TrackingMode::Multi => targets,
        TrackingMode::Single => largest_target(&targets).into_iter().collect(),
    }
}

/// Indices of the tracks to render this frame.
///
/// Only drawable tracks are candidates. Multi mode keeps the
/// `max_concurrent_tracks` largest by scale (stable, so ties keep live-set
/// order). Single mode renders one mask, preferring the most recently matched
/// track and then the largest.
pub fn renderable_tracks(
    tracks: &[Track],
    mode: TrackingMode,
    max_concurrent_tracks: usize,
    visible_miss_threshold: u32,
) -> Vec<usize> {
    let mut candidates: Vec<usize> = tracks
        .iter()
        .enumerate()
        .filter(|(_, track)| track.is_drawable(visible_miss_threshold))
        .map(|(idx, _)| idx)
        .collect();

    match mode {
        TrackingMode::Multi => {
            candidates.sort_by(|&a, &b| tracks[b].scale().total_cmp(&tracks[a].scale()));
            candidates.truncate(max_concurrent_tracks);
        }
        TrackingMode::Single => {
            candidates.sort_by(|&a, &b| {
                tracks[a]
                    .missed_frames()
                    .cmp(&tracks[b].missed_frames())
                    .then(tracks[b].scale().total_cmp(&tracks[a].scale()))
            });
            candidates.truncate(1);
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PredictionPolicy;
    use crate::geometry::point;

    fn target(x: f32, scale: f32) -> Target {
        Target::new(point(x, 0.0), scale)
    }

    #[test]
    fn test_largest_target() {
        let targets = vec![target(0.0, 10.0), target(100.0, 50.0), target(200.0, 30.0)];
        let largest = largest_target(&targets).unwrap();
        assert_eq!(largest.scale, 50.0);
        assert_eq!(largest.position.x, 100.0);
        assert!(largest_target(&[]).is_none());
    }

    #[test]
    fn test_largest_target_tie_keeps_first() {
        let targets = vec![target(0.0, 50.0), target(100.0, 50.0)];
        assert_eq!(largest_target(&targets).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_filter_targets_by_mode() {
        let targets = vec![target(0.0, 10.0), target(100.0, 50.0), target(200.0, 30.0)];
        assert_eq!(filter_targets(TrackingMode::Multi, targets.clone()).len(), 3);
        let single = filter_targets(TrackingMode::Single, targets);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].scale, 50.0);
        assert!(filter_targets(TrackingMode::Single, Vec::new()).is_empty());
    }

    #[test]
    fn test_render_cap_keeps_largest() {
        let tracks: Vec<Track> = [20.0, 80.0, 40.0, 60.0, 10.0]
            .iter()
            .enumerate()
            .map(|(i, &s)| Track::spawn(i as u64 + 1, &target(i as f32 * 100.0, s)))
            .collect();
        let picked = renderable_tracks(&tracks, TrackingMode::Multi, 2, 5);
        assert_eq!(picked, vec![1, 3]);
    }

    #[test]
    fn test_render_skips_hidden_tracks() {
        let mut tracks = vec![
            Track::spawn(1, &target(0.0, 90.0)),
            Track::spawn(2, &target(100.0, 30.0)),
        ];
        for _ in 0..5 {
            tracks[0].coast(&PredictionPolicy::CoastInPlace);
        }
        let picked = renderable_tracks(&tracks, TrackingMode::Multi, 1, 5);
        assert_eq!(picked, vec![1]);
    }

    #[test]
    fn test_single_mode_prefers_matched_track() {
        let mut tracks = vec![
            Track::spawn(1, &target(0.0, 90.0)),
            Track::spawn(2, &target(400.0, 30.0)),
        ];
        tracks[0].coast(&PredictionPolicy::CoastInPlace);
        let picked = renderable_tracks(&tracks, TrackingMode::Single, 8, 5);
        assert_eq!(picked, vec![1]);
    }
}
