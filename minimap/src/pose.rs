//! Pose model and the position source that owns the session's single pose.
//!
//! The overlay cannot read the embedded game's state, so the pose is either
//! copied from a best-effort [`PoseProbe`] (probed mode) or stepped manually
//! from the keyboard (fallback mode). Mode selection happens every refresh and
//! is never surfaced to the user.

#[cfg(test)]
#[path = "pose_test.rs"]
mod pose_test;

use serde::{Deserialize, Serialize};

use crate::consts::{STEP, STEP_FAST, YAW_STEP_DEG};

/// A point in radar screen space, relative to the viewport center.
///
/// `x` grows to the right and `y` grows downward, matching canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the viewport center.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// World position plus heading of the viewer.
///
/// `yaw` is in degrees. At yaw 0 the viewer faces world −z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self { x: 0.0, y: 64.0, z: 0.0, yaw: 0.0 }
    }
}

/// Sparse pose update. Only present fields are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseSnapshot {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub yaw: Option<f64>,
}

impl PoseSnapshot {
    /// Whether the snapshot carries no usable field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none() && self.yaw.is_none()
    }
}

/// One manual step of the fallback pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    /// Toward world −z.
    North,
    /// Toward world +z.
    South,
    /// Toward world −x.
    West,
    /// Toward world +x.
    East,
    /// Up (+y).
    Up,
    /// Down (−y).
    Down,
    /// Yaw decreases.
    TurnLeft,
    /// Yaw increases.
    TurnRight,
}

impl Pose {
    /// Apply a partial snapshot. Absent or non-finite fields keep their value.
    pub fn apply(&mut self, snapshot: &PoseSnapshot) {
        let keep = |current: f64, incoming: Option<f64>| incoming.filter(|v| v.is_finite()).unwrap_or(current);
        self.x = keep(self.x, snapshot.x);
        self.y = keep(self.y, snapshot.y);
        self.z = keep(self.z, snapshot.z);
        self.yaw = keep(self.yaw, snapshot.yaw);
    }

    /// Step the pose by one key press. `fast` selects the Shift step size.
    pub fn nudge(&mut self, nudge: Nudge, fast: bool) {
        let step = if fast { STEP_FAST } else { STEP };
        match nudge {
            Nudge::North => self.z -= step,
            Nudge::South => self.z += step,
            Nudge::West => self.x -= step,
            Nudge::East => self.x += step,
            Nudge::Up => self.y += step,
            Nudge::Down => self.y -= step,
            Nudge::TurnLeft => self.yaw = (self.yaw - YAW_STEP_DEG).rem_euclid(360.0),
            Nudge::TurnRight => self.yaw = (self.yaw + YAW_STEP_DEG).rem_euclid(360.0),
        }
    }
}

/// Best-effort reader of the embedded game's player pose.
///
/// Implementations must never fail loudly: anything unreadable is `None`.
pub trait PoseProbe {
    fn probe(&mut self) -> Option<PoseSnapshot>;
}

/// How the pose was last refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// Copied from the game probe.
    Probed,
    /// Manual stepping only.
    #[default]
    Fallback,
}

/// Owner of the session's authoritative pose.
pub struct PositionSource {
    pose: Pose,
    probe: Option<Box<dyn PoseProbe>>,
    mode: SourceMode,
}

impl Default for PositionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionSource {
    /// A fallback-only source starting at the default pose.
    #[must_use]
    pub fn new() -> Self {
        Self { pose: Pose::default(), probe: None, mode: SourceMode::Fallback }
    }

    /// A source that tries `probe` on every refresh.
    #[must_use]
    pub fn with_probe(probe: Box<dyn PoseProbe>) -> Self {
        Self { pose: Pose::default(), probe: Some(probe), mode: SourceMode::Fallback }
    }

    /// Install or replace the probe.
    pub fn set_probe(&mut self, probe: Box<dyn PoseProbe>) {
        self.probe = Some(probe);
    }

    /// Pull a snapshot from the probe, if any, and merge it into the pose.
    ///
    /// Returns the resulting mode. A missing probe or an empty snapshot both
    /// leave the pose untouched and select fallback mode.
    pub fn refresh(&mut self) -> SourceMode {
        let snapshot = self
            .probe
            .as_mut()
            .and_then(|probe| probe.probe())
            .filter(|snapshot| !snapshot.is_empty());
        let mode = match snapshot {
            Some(snapshot) => {
                self.pose.apply(&snapshot);
                SourceMode::Probed
            }
            None => SourceMode::Fallback,
        };
        if mode != self.mode {
            log::debug!("position source switched to {mode:?}");
            self.mode = mode;
        }
        mode
    }

    /// Manual step. Applies in either mode; a probe overwrites it on the next refresh.
    pub fn nudge(&mut self, nudge: Nudge, fast: bool) {
        self.pose.nudge(nudge, fast);
    }

    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[must_use]
    pub fn mode(&self) -> SourceMode {
        self.mode
    }
}
