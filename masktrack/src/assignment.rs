/// Greedy nearest-center assignment of targets to tracks
///
/// Targets are visited in source order and each one claims the closest
/// unclaimed track strictly inside the distance gate. No global optimum is
/// computed: on ambiguous frames the earlier target wins, and that is the
/// behavior tracks rely on to keep their ids.
use crate::geometry::{center_distance, Point};

/// Result of one frame's assignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// Assignments as (target_idx, track_idx) pairs, in target order
    pub assignments: Vec<(usize, usize)>,
    /// Targets that found no track inside the gate; each becomes a new track
    pub unassigned_targets: Vec<usize>,
    /// Tracks no target claimed this frame
    pub unassigned_tracks: Vec<usize>,
}

/// Greedy first-fit-by-distance solver
pub struct GreedyAssigner;

impl GreedyAssigner {
    /// Match target centers to track centers.
    ///
    /// # Arguments
    /// * `targets` - Target centers in processing order
    /// * `tracks` - Track centers in live-set order
    /// * `max_jump` - Matches require `distance < max_jump`
    pub fn solve(targets: &[Point], tracks: &[Point], max_jump: f32) -> AssignmentResult {
        let mut claimed = vec![false; tracks.len()];
        let mut assignments = Vec::with_capacity(targets.len().min(tracks.len()));
        let mut unassigned_targets = Vec::new();

        for (target_idx, target) in targets.iter().enumerate() {
            match Self::nearest_unclaimed(target, tracks, &claimed, max_jump) {
                Some(track_idx) => {
                    claimed[track_idx] = true;
                    assignments.push((target_idx, track_idx));
                }
                None => unassigned_targets.push(target_idx),
            }
        }

        let unassigned_tracks = claimed
            .iter()
            .enumerate()
            .filter_map(|(idx, taken)| (!taken).then_some(idx))
            .collect();

        AssignmentResult {
            assignments,
            unassigned_targets,
            unassigned_tracks,
        }
    }

    /// Closest unclaimed track inside the gate; ties go to the lower index
    fn nearest_unclaimed(
        target: &Point,
        tracks: &[Point],
        claimed: &[bool],
        max_jump: f32,
    ) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, track) in tracks.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let distance = center_distance(target, track);
            if distance >= max_jump {
                continue;
            }
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((idx, distance)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    #[test]
    fn test_empty_inputs() {
        let result = GreedyAssigner::solve(&[], &[], 100.0);
        assert!(result.assignments.is_empty());

        let result = GreedyAssigner::solve(&[point(0.0, 0.0)], &[], 100.0);
        assert_eq!(result.unassigned_targets, vec![0]);

        let result = GreedyAssigner::solve(&[], &[point(0.0, 0.0), point(5.0, 5.0)], 100.0);
        assert_eq!(result.unassigned_tracks, vec![0, 1]);
    }

    #[test]
    fn test_nearest_track_wins() {
        let tracks = [point(0.0, 0.0), point(100.0, 0.0)];
        let targets = [point(90.0, 0.0), point(5.0, 0.0)];
        let result = GreedyAssigner::solve(&targets, &tracks, 200.0);
        assert_eq!(result.assignments, vec![(0, 1), (1, 0)]);
        assert!(result.unassigned_targets.is_empty());
        assert!(result.unassigned_tracks.is_empty());
    }

    #[test]
    fn test_gate_is_strict() {
        let tracks = [point(0.0, 0.0)];

        let at_gate = GreedyAssigner::solve(&[point(50.0, 0.0)], &tracks, 50.0);
        assert!(at_gate.assignments.is_empty());
        assert_eq!(at_gate.unassigned_targets, vec![0]);
        assert_eq!(at_gate.unassigned_tracks, vec![0]);

        let inside = GreedyAssigner::solve(&[point(49.99, 0.0)], &tracks, 50.0);
        assert_eq!(inside.assignments, vec![(0, 0)]);
    }

    #[test]
    fn test_greedy_order_beats_global_optimum() {
        // Target 0 grabs track 0 even though assigning it to track 1
        // would let target 1 match as well.
        let tracks = [point(0.0, 0.0), point(-30.0, 0.0)];
        let targets = [point(-10.0, 0.0), point(25.0, 0.0)];
        let result = GreedyAssigner::solve(&targets, &tracks, 30.0);
        assert_eq!(result.assignments, vec![(0, 0)]);
        assert_eq!(result.unassigned_targets, vec![1]);
        assert_eq!(result.unassigned_tracks, vec![1]);
    }

    #[test]
    fn test_equal_distance_picks_first_track() {
        let tracks = [point(-10.0, 0.0), point(10.0, 0.0)];
        let result = GreedyAssigner::solve(&[point(0.0, 0.0)], &tracks, 50.0);
        assert_eq!(result.assignments, vec![(0, 0)]);
    }

    #[test]
    fn test_each_track_claimed_once() {
        let tracks = [point(0.0, 0.0)];
        let targets = [point(1.0, 0.0), point(2.0, 0.0)];
        let result = GreedyAssigner::solve(&targets, &tracks, 50.0);
        assert_eq!(result.assignments, vec![(0, 0)]);
        assert_eq!(result.unassigned_targets, vec![1]);
    }
}
