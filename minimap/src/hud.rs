//! HUD counters and text lines.
//!
//! Everything here is string formatting over plain numbers so the page glue
//! only copies text into elements. The latency probe itself runs in the
//! browser; [`PingState`] only decides when one is due and remembers the
//! last outcome.

#[cfg(test)]
#[path = "hud_test.rs"]
mod hud_test;

use crate::consts::PING_INTERVAL_MS;
use crate::pose::Pose;
use crate::settings::Settings;
use crate::waypoint::{Waypoint, WaypointStore};

/// Frames-per-second from the delta between consecutive frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    last_frame_ms: Option<f64>,
    fps: u32,
}

impl FpsCounter {
    /// Record a frame at `now_ms` and return the instantaneous FPS (at least 1).
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        self.fps = match self.last_frame_ms {
            Some(last) if now_ms > last => fps_from_delta(now_ms - last),
            _ => self.fps.max(1),
        };
        self.last_frame_ms = Some(now_ms);
        self.fps
    }

    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fps_from_delta(delta_ms: f64) -> u32 {
    (1000.0 / delta_ms).round().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Last known latency probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PingReading {
    /// No probe has completed yet.
    #[default]
    Pending,
    /// Round trip in milliseconds.
    Millis(u32),
    /// The last probe failed.
    Unavailable,
}

/// Throttle and result holder for the `HEAD` latency probe.
///
/// At most one probe is in flight and probes start at most once per
/// [`PING_INTERVAL_MS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PingState {
    last_started_ms: Option<f64>,
    in_flight: bool,
    reading: PingReading,
}

impl PingState {
    /// Whether a probe should start at `now_ms`. Marks it in flight if so.
    pub fn begin(&mut self, now_ms: f64) -> bool {
        if self.in_flight {
            return false;
        }
        let due = self
            .last_started_ms
            .is_none_or(|last| now_ms - last >= PING_INTERVAL_MS);
        if due {
            self.in_flight = true;
            self.last_started_ms = Some(now_ms);
        }
        due
    }

    /// Store the outcome of the in-flight probe. Outcomes arriving after a
    /// [`reset`](Self::reset) are dropped.
    pub fn finish(&mut self, reading: PingReading) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        self.reading = reading;
    }

    /// Forget the last reading (probe disabled).
    pub fn reset(&mut self) {
        self.in_flight = false;
        self.reading = PingReading::Pending;
    }

    #[must_use]
    pub fn reading(&self) -> PingReading {
        self.reading
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

/// Milliseconds to a [`PingReading`]; negative or non-finite durations are unavailable.
#[must_use]
pub fn reading_from_elapsed(elapsed_ms: f64) -> PingReading {
    if elapsed_ms.is_finite() && elapsed_ms >= 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ms = elapsed_ms.round().min(f64::from(u32::MAX)) as u32;
        PingReading::Millis(ms)
    } else {
        PingReading::Unavailable
    }
}

/// Text for each HUD element; empty strings clear the element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudText {
    pub fps: String,
    pub ping: String,
    pub coords: String,
    pub clock: String,
    pub session: String,
    pub zoom: String,
    pub waypoints: Vec<String>,
    /// Crosshair CSS class, or `None` when the custom crosshair is hidden.
    pub crosshair: Option<&'static str>,
}

/// Inputs that come from the browser clock rather than session state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    /// Milliseconds elapsed since the session started.
    pub session_ms: f64,
    /// Local wall-clock seconds since midnight.
    pub local_secs: u32,
}

impl HudText {
    /// Build every HUD line for the current frame.
    #[must_use]
    pub fn build(settings: &Settings, pose: &Pose, fps: u32, ping: PingReading, clock: Clock, zoom_held: bool) -> Self {
        Self {
            fps: if settings.fps { format!("FPS: {fps}") } else { String::new() },
            ping: if settings.ping { format_ping(ping) } else { String::new() },
            coords: if settings.coords { format_coords(pose) } else { String::new() },
            clock: if settings.clock { format_hms(clock.local_secs) } else { String::new() },
            session: if settings.session { format_session(clock.session_ms) } else { String::new() },
            zoom: if settings.zoom_key && zoom_held {
                format!("Zoom FOV ~ {}", settings.zoom_fov)
            } else {
                String::new()
            },
            waypoints: if settings.show_wp_list { waypoint_listing(&settings.waypoints) } else { Vec::new() },
            crosshair: settings
                .custom_crosshair
                .then(|| settings.crosshair_style.class_name()),
        }
    }
}

/// `Ping: N ms`, `Ping: n/a`, or blank while the first probe is pending.
#[must_use]
pub fn format_ping(reading: PingReading) -> String {
    match reading {
        PingReading::Pending => String::new(),
        PingReading::Millis(ms) => format!("Ping: {ms} ms"),
        PingReading::Unavailable => "Ping: n/a".to_owned(),
    }
}

/// `XYZ: x y z | Yaw: N°` with one decimal per axis.
#[must_use]
pub fn format_coords(pose: &Pose) -> String {
    format!("XYZ: {:.1} {:.1} {:.1} | Yaw: {:.0}°", pose.x, pose.y, pose.z, pose.yaw.round() + 0.0)
}

/// `HH:MM:SS` for a number of seconds (hours not wrapped).
#[must_use]
pub fn format_hms(secs: u32) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// `Session: hh:mm:ss` for elapsed milliseconds.
#[must_use]
pub fn format_session(elapsed_ms: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let secs = (elapsed_ms / 1000.0).floor().clamp(0.0, f64::from(u32::MAX)) as u32;
    format!("Session: {}", format_hms(secs))
}

/// Integer part of a coordinate, truncated toward zero.
#[allow(clippy::cast_possible_truncation)]
fn truncated(v: f64) -> i64 {
    v.trunc() as i64
}

/// One listing line: `name: [x, y, z]`.
#[must_use]
pub fn waypoint_line(waypoint: &Waypoint) -> String {
    let p = waypoint.position;
    format!("{}: [{}, {}, {}]", waypoint.name, truncated(p.x), truncated(p.y), truncated(p.z))
}

/// `Waypoints:` header plus one line per enabled waypoint; empty when none are enabled.
#[must_use]
pub fn waypoint_listing(store: &WaypointStore) -> Vec<String> {
    let lines: Vec<String> = store.enabled().map(waypoint_line).collect();
    if lines.is_empty() {
        return lines;
    }
    std::iter::once("Waypoints:".to_owned()).chain(lines).collect()
}
