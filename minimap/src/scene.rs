//! Per-frame radar scene: everything the renderer draws, in screen space.
//!
//! The scene is built from read-only views of settings, pose and trail and
//! carries no references back into them. All points are relative to the radar
//! center; the renderer translates once to the canvas middle.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::consts::{
    CHUNK_BLOCKS, GRID_SPACING_PX, PLAYER_BASE_PX, PLAYER_HALF_BASE_PX, PLAYER_TIP_PX, RING_INSET_PX, TICK_INNER_INSET_PX,
    TICK_OUTER_INSET_PX, TICK_STEP_DEG,
};
use crate::pose::{Point, Pose};
use crate::projection::{Projection, rotate};
use crate::settings::Settings;
use crate::trail::Trail;

/// Radar ring plus heading ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub radius: f64,
    /// `(inner, outer)` endpoints of each tick.
    pub ticks: Vec<(Point, Point)>,
}

/// Heading-locked reference grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Rotation applied to the grid, in radians.
    pub rotation: f64,
    /// Half-size of the square the grid covers.
    pub extent: f64,
    /// Fine line spacing in pixels.
    pub spacing: f64,
    /// Chunk line spacing in pixels, when the chunk grid is enabled.
    pub chunk_spacing: Option<f64>,
}

/// A projected waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Point,
    pub radius: f64,
    pub color: String,
    pub label: String,
}

/// Everything drawn for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarScene {
    /// Half the canvas size; the radar center in canvas pixels.
    pub center: f64,
    pub ring: Option<Ring>,
    pub grid: Option<Grid>,
    /// Player triangle vertices: tip, right base, left base.
    pub player: [Point; 3],
    pub markers: Vec<Marker>,
    /// Trail polyline, oldest sample first. Empty when breadcrumbs are off.
    pub trail: Vec<Point>,
}

/// One drawable piece of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layer<'a> {
    Ring(&'a Ring),
    Grid(&'a Grid),
    Player(&'a [Point; 3]),
    Marker(&'a Marker),
    Trail(&'a [Point]),
}

impl RadarScene {
    /// Layers in paint order: ring, grid, player, markers, then the trail on top.
    #[must_use]
    pub fn layers(&self) -> Vec<Layer<'_>> {
        let mut layers = Vec::with_capacity(self.markers.len() + 4);
        layers.extend(self.ring.as_ref().map(Layer::Ring));
        layers.extend(self.grid.as_ref().map(Layer::Grid));
        layers.push(Layer::Player(&self.player));
        layers.extend(self.markers.iter().map(Layer::Marker));
        if !self.trail.is_empty() {
            layers.push(Layer::Trail(&self.trail));
        }
        layers
    }

    /// Build the scene for a square canvas of `size` pixels.
    ///
    /// Returns `None` when neither the minimap nor the radar is enabled.
    #[must_use]
    pub fn build(settings: &Settings, pose: &Pose, trail: &Trail, size: f64) -> Option<Self> {
        if !settings.minimap && !settings.radar {
            return None;
        }
        let center = size / 2.0;
        let projection = Projection::new(pose, settings.map_zoom, center);

        let ring = settings.radar.then(|| radar_ring(center));
        let grid = settings.minimap.then(|| Grid {
            rotation: projection.rotation(),
            extent: center,
            spacing: GRID_SPACING_PX,
            chunk_spacing: settings
                .chunk_grid
                .then(|| chunk_spacing(settings.map_zoom))
                .flatten(),
        });

        let markers = settings
            .waypoints
            .iter()
            .filter_map(|w| {
                projection.project_waypoint(w).map(|position| Marker {
                    position,
                    radius: settings.marker_size,
                    color: w.color.clone(),
                    label: w.name.clone(),
                })
            })
            .collect();

        let trail = if settings.breadcrumbs {
            trail.iter().map(|s| projection.project(s.x, s.z)).collect()
        } else {
            Vec::new()
        };

        Some(Self { center, ring, grid, player: player_triangle(projection.rotation()), markers, trail })
    }
}

fn radar_ring(center: f64) -> Ring {
    let inner = center - TICK_INNER_INSET_PX;
    let outer = center - TICK_OUTER_INSET_PX;
    let steps = (360.0 / TICK_STEP_DEG).round();
    let mut ticks = Vec::new();
    let mut i = 0.0;
    while i < steps {
        let (sin, cos) = (i * TICK_STEP_DEG).to_radians().sin_cos();
        ticks.push((Point::new(cos * inner, sin * inner), Point::new(cos * outer, sin * outer)));
        i += 1.0;
    }
    Ring { radius: center - RING_INSET_PX, ticks }
}

/// Chunk grid spacing in pixels for a zoom setting, `None` when degenerate.
#[must_use]
pub fn chunk_spacing(map_zoom: f64) -> Option<f64> {
    let spacing = CHUNK_BLOCKS * map_zoom;
    (spacing.is_finite() && spacing >= 1.0).then_some(spacing)
}

/// Up-pointing triangle rotated by `rotation` radians about the center.
#[must_use]
pub fn player_triangle(rotation: f64) -> [Point; 3] {
    [
        Point::new(0.0, -PLAYER_TIP_PX),
        Point::new(PLAYER_HALF_BASE_PX, PLAYER_BASE_PX),
        Point::new(-PLAYER_HALF_BASE_PX, PLAYER_BASE_PX),
    ]
    .map(|p| rotate(p, rotation))
}
