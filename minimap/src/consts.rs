//! Shared numeric and string constants for the minimap crate.

// ── Colors ──────────────────────────────────────────────────────

/// Default waypoint color and radar accent.
pub const ACCENT_COLOR: &str = "#00eaff";

/// Radar heading tick color (accent at ~33% alpha).
pub const TICK_COLOR: &str = "#00eaff55";

/// Fine reference grid color.
pub const GRID_COLOR: &str = "#00eaff18";

/// Coarse chunk grid color.
pub const CHUNK_GRID_COLOR: &str = "#00eaff33";

/// Player indicator fill.
pub const PLAYER_COLOR: &str = "#ffffff";

/// Waypoint label fill.
pub const LABEL_COLOR: &str = "#cfffff";

/// Breadcrumb trail stroke (translucent accent).
pub const TRAIL_COLOR: &str = "rgba(0, 234, 255, 0.45)";

// ── Projection ──────────────────────────────────────────────────

/// World units per unit of the `mapZoom` setting at which one unit maps to one pixel.
pub const REFERENCE_DISTANCE: f64 = 32.0;

/// Gap between the viewport edge and the outermost projected marker, in pixels.
pub const EDGE_MARGIN_PX: f64 = 14.0;

// ── Radar / minimap geometry ────────────────────────────────────

/// Inset of the radar ring from the viewport edge.
pub const RING_INSET_PX: f64 = 6.0;

/// Radar ring stroke width.
pub const RING_WIDTH_PX: f64 = 2.0;

/// Radar ring opacity.
pub const RING_ALPHA: f64 = 0.7;

/// Inner end of a heading tick, measured inward from the viewport edge.
pub const TICK_INNER_INSET_PX: f64 = 14.0;

/// Outer end of a heading tick, measured inward from the viewport edge.
pub const TICK_OUTER_INSET_PX: f64 = 8.0;

/// Angular spacing of heading ticks (12 ticks per revolution).
pub const TICK_STEP_DEG: f64 = 30.0;

/// Fine grid spacing in pixels.
pub const GRID_SPACING_PX: f64 = 16.0;

/// Blocks per chunk; the chunk grid is drawn every `CHUNK_BLOCKS * mapZoom` pixels.
pub const CHUNK_BLOCKS: f64 = 16.0;

/// Distance from center to the tip of the player triangle.
pub const PLAYER_TIP_PX: f64 = 10.0;

/// Half-width of the player triangle base.
pub const PLAYER_HALF_BASE_PX: f64 = 6.0;

/// Distance from center to the player triangle base.
pub const PLAYER_BASE_PX: f64 = 6.0;

/// Vertical gap between a marker center and its label baseline.
pub const LABEL_OFFSET_PX: f64 = 8.0;

/// Waypoint label font.
pub const LABEL_FONT: &str = "10px monospace";

/// Breadcrumb trail stroke width.
pub const TRAIL_WIDTH_PX: f64 = 2.0;

// ── Breadcrumbs ─────────────────────────────────────────────────

/// Minimum planar distance the pose must move before a new sample is recorded.
pub const TRAIL_MIN_STEP: f64 = 1.0;

/// Maximum retained breadcrumb samples; the oldest is evicted beyond this.
pub const TRAIL_MAX_SAMPLES: usize = 1024;

// ── Manual position stepping ────────────────────────────────────

/// World units per arrow-key press.
pub const STEP: f64 = 1.0;

/// World units per arrow-key press while Shift is held.
pub const STEP_FAST: f64 = 5.0;

/// Degrees per turn-key press.
pub const YAW_STEP_DEG: f64 = 5.0;

// ── Persistence ─────────────────────────────────────────────────

/// Storage key for the whole settings object.
pub const SETTINGS_STORAGE_KEY: &str = "hudmap_settings_v1";

/// Storage key for the saved server address list.
pub const SERVERS_STORAGE_KEY: &str = "hudmap_servers_v1";

/// File name offered for waypoint export downloads.
pub const EXPORT_FILE_NAME: &str = "waypoints.json";

/// Delay before the export object URL is revoked, so the download can start.
pub const EXPORT_REVOKE_DELAY_MS: u32 = 1000;

// ── Latency probe ───────────────────────────────────────────────

/// Minimum interval between latency probes.
pub const PING_INTERVAL_MS: f64 = 1000.0;

/// Same-origin target of the `HEAD` latency probe.
pub const PING_URL: &str = ".";

// ── Page ────────────────────────────────────────────────────────

/// Element id of the embedded game iframe.
pub const GAME_FRAME_ID: &str = "gameFrame";

/// Global the game may expose on its window with the local player's pose.
pub const PROBE_GLOBAL: &str = "player";

/// Prompt text and default answer when capturing a waypoint by key.
pub const WAYPOINT_PROMPT: &str = "Waypoint name:";
pub const WAYPOINT_PROMPT_DEFAULT: &str = "Waypoint";
