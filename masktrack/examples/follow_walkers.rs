use masktrack::geometry::point;
use masktrack::{MaskTracker, Target, TrackerConfig};

fn print_masks(frame: usize, masks: &[masktrack::RenderableMask]) {
    println!("Frame {}: {} masks", frame, masks.len());
    for mask in masks {
        println!(
            "  Track {}: center ({:.1}, {:.1}) size {:.1}",
            mask.track_id, mask.position.x, mask.position.y, mask.size
        );
    }
}

fn main() -> anyhow::Result<()> {
    let config = TrackerConfig::multi_target();
    config.validate()?;
    let mut tracker = MaskTracker::default();

    // Frame 1: two people walk in
    let frame1 = [
        Target::new(point(200.0, 300.0), 90.0),
        Target::new(point(900.0, 280.0), 70.0),
    ];
    print_masks(1, &tracker.advance(&frame1, 1280, 720, &config));

    // Frame 2: both move a little, a tiny false positive shows up
    let frame2 = [
        Target::new(point(212.0, 302.0), 91.0),
        Target::new(point(890.0, 281.0), 69.0),
        Target::new(point(600.0, 600.0), 0.0),
    ];
    print_masks(2, &tracker.advance(&frame2, 1280, 720, &config));

    // Frames 3-8: the second person is occluded
    for frame in 3..=8 {
        let x = 212.0 + (frame - 2) as f32 * 12.0;
        let targets = [Target::new(point(x, 303.0), 91.0)];
        print_masks(frame, &tracker.advance(&targets, 1280, 720, &config));
    }

    // Frame 9: the second person reappears near where they were lost
    let frame9 = [
        Target::new(point(290.0, 303.0), 90.0),
        Target::new(point(880.0, 282.0), 70.0),
    ];
    print_masks(9, &tracker.advance(&frame9, 1280, 720, &config));

    println!("\nLive tracks: {}", tracker.num_tracks());
    for track in tracker.tracks() {
        println!(
            "  Track {}: {:?}, missed {}",
            track.id(),
            track.state(),
            track.missed_frames()
        );
    }
    Ok(())
}
