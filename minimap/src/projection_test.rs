#![allow(clippy::float_cmp)]

use super::*;
use crate::waypoint::Position;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn waypoint_at(x: f64, z: f64) -> Waypoint {
    Waypoint {
        name: "wp".into(),
        position: Position { x, y: 64.0, z },
        color: "#00eaff".into(),
        enabled: true,
    }
}

fn pose(x: f64, z: f64, yaw: f64) -> Pose {
    Pose { x, y: 64.0, z, yaw }
}

/// `mapZoom` that yields one pixel per world unit.
const UNIT_ZOOM: f64 = 32.0;
const RADIUS: f64 = 100.0;

// --- scale ---

#[test]
fn scale_is_linear_in_zoom() {
    assert_eq!(scale_for_zoom(32.0), 1.0);
    assert_eq!(scale_for_zoom(8.0), 0.25);
    assert_eq!(scale_for_zoom(64.0), 2.0);
}

#[test]
fn scale_collapses_for_invalid_zoom() {
    assert_eq!(scale_for_zoom(0.0), 0.0);
    assert_eq!(scale_for_zoom(-4.0), 0.0);
    assert_eq!(scale_for_zoom(f64::NAN), 0.0);
}

#[test]
fn limit_is_radius_minus_margin() {
    let projection = Projection::new(&pose(0.0, 0.0, 0.0), UNIT_ZOOM, RADIUS);
    assert_eq!(projection.limit(), RADIUS - EDGE_MARGIN_PX);
}

#[test]
fn limit_never_negative() {
    let projection = Projection::new(&pose(0.0, 0.0, 0.0), UNIT_ZOOM, 5.0);
    assert_eq!(projection.limit(), 0.0);
}

// --- center ---

#[test]
fn zero_distance_projects_to_center() {
    for yaw in [0.0, 45.0, 90.0, 271.0] {
        let p = project_waypoint(&waypoint_at(3.0, -7.0), &pose(3.0, -7.0, yaw), UNIT_ZOOM, RADIUS).unwrap();
        assert_eq!(p.length(), 0.0);
    }
}

#[test]
fn vertical_offset_is_ignored() {
    let mut waypoint = waypoint_at(0.0, 0.0);
    waypoint.position.y = 200.0;
    let p = project_waypoint(&waypoint, &pose(0.0, 0.0, 0.0), UNIT_ZOOM, RADIUS).unwrap();
    assert_eq!(p, Point::default());
}

// --- heading lock ---

#[test]
fn due_north_at_yaw_zero_is_straight_up() {
    let p = project_waypoint(&waypoint_at(10.0, -20.0), &pose(10.0, 0.0, 0.0), UNIT_ZOOM, RADIUS).unwrap();
    assert!(point_approx_eq(p, Point::new(0.0, -20.0)), "{p:?}");
}

#[test]
fn due_east_at_yaw_zero_is_right() {
    let p = project_waypoint(&waypoint_at(20.0, 0.0), &pose(0.0, 0.0, 0.0), UNIT_ZOOM, RADIUS).unwrap();
    assert!(point_approx_eq(p, Point::new(20.0, 0.0)), "{p:?}");
}

#[test]
fn facing_east_puts_east_ahead() {
    let p = project_waypoint(&waypoint_at(20.0, 0.0), &pose(0.0, 0.0, 90.0), UNIT_ZOOM, RADIUS).unwrap();
    assert!(point_approx_eq(p, Point::new(0.0, -20.0)), "{p:?}");
}

#[test]
fn facing_east_puts_north_left() {
    let p = project_waypoint(&waypoint_at(0.0, -20.0), &pose(0.0, 0.0, 90.0), UNIT_ZOOM, RADIUS).unwrap();
    assert!(point_approx_eq(p, Point::new(-20.0, 0.0)), "{p:?}");
}

#[test]
fn full_turn_is_periodic() {
    let targets = [(5.0, 9.0), (-40.0, 3.0), (0.5, -0.25), (300.0, -300.0)];
    for yaw in [0.0, 12.5, 90.0, 200.0, 359.0] {
        for (x, z) in targets {
            let a = project_waypoint(&waypoint_at(x, z), &pose(1.0, 2.0, yaw), UNIT_ZOOM, RADIUS).unwrap();
            let b = project_waypoint(&waypoint_at(x, z), &pose(1.0, 2.0, yaw + 360.0), UNIT_ZOOM, RADIUS).unwrap();
            assert!(point_approx_eq(a, b), "yaw {yaw}: {a:?} vs {b:?}");
        }
    }
}

#[test]
fn rotation_preserves_radius() {
    let w = waypoint_at(30.0, 40.0);
    for yaw in [0.0, 33.0, 180.0, 300.0] {
        let p = project_waypoint(&w, &pose(0.0, 0.0, yaw), UNIT_ZOOM, RADIUS).unwrap();
        assert!(approx_eq(p.length(), 50.0));
    }
}

// --- scaling and clamp ---

#[test]
fn radius_scales_with_zoom() {
    let w = waypoint_at(0.0, -16.0);
    let near = project_waypoint(&w, &pose(0.0, 0.0, 0.0), 8.0, RADIUS).unwrap();
    let far = project_waypoint(&w, &pose(0.0, 0.0, 0.0), 16.0, RADIUS).unwrap();
    assert!(approx_eq(near.length(), 4.0));
    assert!(approx_eq(far.length(), 8.0));
}

#[test]
fn far_waypoint_clamps_to_edge() {
    let p = project_waypoint(&waypoint_at(0.0, -10_000.0), &pose(0.0, 0.0, 0.0), UNIT_ZOOM, RADIUS).unwrap();
    assert!(point_approx_eq(p, Point::new(0.0, -(RADIUS - EDGE_MARGIN_PX))));
}

#[test]
fn clamp_holds_for_any_distance() {
    for distance in [1.0, 85.0, 86.0, 1e3, 1e9, 1e300, f64::MAX, f64::INFINITY] {
        for zoom in [1.0, 8.0, 32.0, 256.0] {
            let p = project_waypoint(&waypoint_at(distance, 0.0), &pose(0.0, 0.0, 17.0), zoom, RADIUS).unwrap();
            assert!(
                p.length() <= RADIUS - EDGE_MARGIN_PX + EPSILON,
                "distance {distance} zoom {zoom}: {}",
                p.length()
            );
        }
    }
}

#[test]
fn nan_offset_projects_to_center() {
    let p = project_waypoint(&waypoint_at(f64::NAN, 0.0), &pose(0.0, 0.0, 0.0), UNIT_ZOOM, RADIUS).unwrap();
    assert_eq!(p, Point::default());
}

// --- disabled ---

#[test]
fn disabled_waypoint_is_not_projected() {
    let mut w = waypoint_at(5.0, 5.0);
    w.enabled = false;
    assert!(project_waypoint(&w, &pose(0.0, 0.0, 0.0), UNIT_ZOOM, RADIUS).is_none());
}

// --- rotate helper ---

#[test]
fn rotate_quarter_turn_clockwise() {
    let p = rotate(Point::new(0.0, -10.0), std::f64::consts::FRAC_PI_2);
    assert!(point_approx_eq(p, Point::new(10.0, 0.0)), "{p:?}");
}

#[test]
fn projection_rotation_is_negative_yaw() {
    let projection = Projection::new(&pose(0.0, 0.0, 90.0), UNIT_ZOOM, RADIUS);
    assert!(approx_eq(projection.rotation(), -std::f64::consts::FRAC_PI_2));
}
