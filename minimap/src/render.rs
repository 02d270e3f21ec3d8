//! Rendering: draws a [`RadarScene`] to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a finished scene and produces pixels; it does not mutate any
//! overlay state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::{SQRT_2, TAU};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{
    ACCENT_COLOR, CHUNK_GRID_COLOR, GRID_COLOR, LABEL_COLOR, LABEL_FONT, LABEL_OFFSET_PX, PLAYER_COLOR, RING_ALPHA,
    RING_WIDTH_PX, TICK_COLOR, TRAIL_COLOR, TRAIL_WIDTH_PX,
};
use crate::pose::Point;
use crate::scene::{Grid, Layer, Marker, RadarScene, Ring};

/// Clear the canvas without drawing anything (radar and minimap both off).
pub fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);
}

/// Draw every layer of the scene in paint order.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &RadarScene) -> Result<(), JsValue> {
    let size = scene.center * 2.0;
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, size, size);
    ctx.translate(scene.center, scene.center)?;

    for layer in scene.layers() {
        match layer {
            Layer::Ring(ring) => draw_ring(ctx, ring)?,
            Layer::Grid(grid) => draw_grid(ctx, grid)?,
            Layer::Player(triangle) => draw_player(ctx, triangle),
            Layer::Marker(marker) => draw_marker(ctx, marker)?,
            Layer::Trail(trail) => draw_trail(ctx, trail),
        }
    }
    Ok(())
}

// =============================================================
// Layers
// =============================================================

fn draw_grid(ctx: &CanvasRenderingContext2d, grid: &Grid) -> Result<(), JsValue> {
    ctx.save();
    ctx.begin_path();
    ctx.arc(0.0, 0.0, grid.extent, 0.0, TAU)?;
    ctx.clip();
    ctx.rotate(grid.rotation)?;

    // Rotated lines must still reach the corners of the clip square.
    let reach = grid.extent * SQRT_2;
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(GRID_COLOR);
    draw_grid_lines(ctx, grid.spacing, reach);
    if let Some(spacing) = grid.chunk_spacing {
        ctx.set_stroke_style_str(CHUNK_GRID_COLOR);
        draw_grid_lines(ctx, spacing, reach);
    }

    ctx.restore();
    Ok(())
}

fn draw_grid_lines(ctx: &CanvasRenderingContext2d, spacing: f64, reach: f64) {
    if spacing <= 0.0 {
        return;
    }
    ctx.begin_path();
    let mut offset = 0.0;
    while offset <= reach {
        for at in [offset, -offset] {
            ctx.move_to(at, -reach);
            ctx.line_to(at, reach);
            ctx.move_to(-reach, at);
            ctx.line_to(reach, at);
        }
        offset += spacing;
    }
    ctx.stroke();
}

fn draw_ring(ctx: &CanvasRenderingContext2d, ring: &Ring) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(RING_ALPHA);
    ctx.set_line_width(RING_WIDTH_PX);
    ctx.set_stroke_style_str(ACCENT_COLOR);
    ctx.begin_path();
    ctx.arc(0.0, 0.0, ring.radius.max(0.0), 0.0, TAU)?;
    ctx.stroke();
    ctx.restore();

    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(TICK_COLOR);
    ctx.begin_path();
    for (inner, outer) in &ring.ticks {
        ctx.move_to(inner.x, inner.y);
        ctx.line_to(outer.x, outer.y);
    }
    ctx.stroke();
    Ok(())
}

fn draw_trail(ctx: &CanvasRenderingContext2d, trail: &[Point]) {
    let Some((first, rest)) = trail.split_first() else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    ctx.set_line_width(TRAIL_WIDTH_PX);
    ctx.set_stroke_style_str(TRAIL_COLOR);
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();
}

fn draw_marker(ctx: &CanvasRenderingContext2d, marker: &Marker) -> Result<(), JsValue> {
    let p = marker.position;
    ctx.set_fill_style_str(&marker.color);
    ctx.begin_path();
    ctx.arc(p.x, p.y, marker.radius.max(0.0), 0.0, TAU)?;
    ctx.fill();

    ctx.set_font(LABEL_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("bottom");
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.fill_text(&marker.label, p.x, p.y - LABEL_OFFSET_PX)?;
    Ok(())
}

fn draw_player(ctx: &CanvasRenderingContext2d, triangle: &[Point; 3]) {
    let [tip, right, left] = triangle;
    ctx.set_fill_style_str(PLAYER_COLOR);
    ctx.begin_path();
    ctx.move_to(tip.x, tip.y);
    ctx.line_to(right.x, right.y);
    ctx.line_to(left.x, left.y);
    ctx.close_path();
    ctx.fill();
}
