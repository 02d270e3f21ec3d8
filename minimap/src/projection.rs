//! Heading-locked projection from world offsets to radar screen space.
//!
//! Screen coordinates are relative to the radar center with `y` growing
//! downward. World −z is "forward" at yaw 0 and renders straight up; the whole
//! world is rotated by the negative yaw so the viewer's facing is always up.
//! Distances scale linearly with the zoom setting and are clamped so a marker
//! never leaves the viewport minus [`EDGE_MARGIN_PX`].

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use crate::consts::{EDGE_MARGIN_PX, REFERENCE_DISTANCE};
use crate::pose::{Point, Pose};
use crate::waypoint::Waypoint;

/// World-to-radar transform for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    origin_x: f64,
    origin_z: f64,
    yaw_rad: f64,
    /// Pixels per world unit.
    scale: f64,
    /// Maximum projected radius in pixels.
    limit: f64,
}

impl Projection {
    /// Build the transform for `pose` at `map_zoom` inside a circle of `viewport_radius` pixels.
    #[must_use]
    pub fn new(pose: &Pose, map_zoom: f64, viewport_radius: f64) -> Self {
        Self {
            origin_x: pose.x,
            origin_z: pose.z,
            yaw_rad: pose.yaw.to_radians(),
            scale: scale_for_zoom(map_zoom),
            limit: (viewport_radius - EDGE_MARGIN_PX).max(0.0),
        }
    }

    /// Pixels per world unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Largest radius any projected point may have.
    #[must_use]
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Project a world `(x, z)` position.
    #[must_use]
    pub fn project(&self, x: f64, z: f64) -> Point {
        let dx = x - self.origin_x;
        let dz = z - self.origin_z;
        let distance = dx.hypot(dz);
        if distance == 0.0 || distance.is_nan() {
            return Point::default();
        }
        let angle = dz.atan2(dx) - self.yaw_rad;
        let radius = (distance * self.scale).min(self.limit);
        Point::new(angle.cos() * radius, angle.sin() * radius)
    }

    /// Project a waypoint, or `None` if it is disabled.
    #[must_use]
    pub fn project_waypoint(&self, waypoint: &Waypoint) -> Option<Point> {
        if !waypoint.enabled {
            return None;
        }
        Some(self.project(waypoint.position.x, waypoint.position.z))
    }

    /// Rotation applied to world-aligned geometry (grids, the player indicator).
    #[must_use]
    pub fn rotation(&self) -> f64 {
        -self.yaw_rad
    }
}

/// Pixels per world unit for a `mapZoom` setting. Non-positive zoom collapses to zero.
#[must_use]
pub fn scale_for_zoom(map_zoom: f64) -> f64 {
    if map_zoom.is_finite() && map_zoom > 0.0 {
        map_zoom / REFERENCE_DISTANCE
    } else {
        0.0
    }
}

/// Rotate a screen-space offset by `angle` radians (clockwise on screen).
#[must_use]
pub fn rotate(point: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}

/// Project `waypoint` for `pose` without building a reusable [`Projection`].
#[must_use]
pub fn project_waypoint(waypoint: &Waypoint, pose: &Pose, map_zoom: f64, viewport_radius: f64) -> Option<Point> {
    Projection::new(pose, map_zoom, viewport_radius).project_waypoint(waypoint)
}
