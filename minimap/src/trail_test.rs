use super::*;

fn at(x: f64, z: f64) -> Pose {
    Pose { x, y: 64.0, z, yaw: 0.0 }
}

#[test]
fn first_sample_always_recorded() {
    let mut trail = Trail::default();
    assert!(trail.record(&at(0.0, 0.0)));
    assert_eq!(trail.len(), 1);
}

#[test]
fn small_moves_are_skipped() {
    let mut trail = Trail::new(16, 1.0);
    trail.record(&at(0.0, 0.0));
    assert!(!trail.record(&at(0.5, 0.5)));
    assert!(!trail.record(&at(1.0, 0.0)));
    assert_eq!(trail.len(), 1);
}

#[test]
fn moves_beyond_threshold_are_recorded() {
    let mut trail = Trail::new(16, 1.0);
    trail.record(&at(0.0, 0.0));
    assert!(trail.record(&at(2.0, 0.0)));
    assert!(trail.record(&at(2.0, 3.0)));
    let samples: Vec<_> = trail.iter().copied().collect();
    assert_eq!(
        samples,
        vec![TrailSample { x: 0.0, z: 0.0 }, TrailSample { x: 2.0, z: 0.0 }, TrailSample { x: 2.0, z: 3.0 }]
    );
}

#[test]
fn vertical_movement_is_ignored() {
    let mut trail = Trail::new(16, 1.0);
    trail.record(&at(0.0, 0.0));
    assert!(!trail.record(&Pose { x: 0.0, y: 200.0, z: 0.0, yaw: 90.0 }));
}

#[test]
fn capacity_evicts_oldest() {
    let mut trail = Trail::new(3, 0.0);
    for i in 0..5 {
        trail.record(&at(f64::from(i) * 10.0, 0.0));
    }
    assert_eq!(trail.len(), 3);
    assert_eq!(trail.iter().next().map(|s| s.x), Some(20.0));
    assert_eq!(trail.iter().last().map(|s| s.x), Some(40.0));
}

#[test]
fn default_capacity_is_bounded() {
    let mut trail = Trail::default();
    for i in 0..(TRAIL_MAX_SAMPLES + 100) {
        trail.record(&at(i as f64 * 2.0, 0.0));
    }
    assert_eq!(trail.len(), TRAIL_MAX_SAMPLES);
}

#[test]
fn non_finite_pose_is_skipped() {
    let mut trail = Trail::default();
    assert!(!trail.record(&at(f64::NAN, 0.0)));
    assert!(trail.is_empty());
}

#[test]
fn clear_empties() {
    let mut trail = Trail::default();
    trail.record(&at(0.0, 0.0));
    trail.clear();
    assert!(trail.is_empty());
}
