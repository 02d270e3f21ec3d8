use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::hud::{Clock, FpsCounter, HudText, PingReading, PingState};
use crate::input::{self, Command};
use crate::pose::{Pose, PoseProbe, PositionSource, SourceMode};
use crate::render;
use crate::scene::RadarScene;
use crate::servers::ServerList;
use crate::settings::{self, RestoreSource, Settings, SettingsError, Storage};
use crate::trail::Trail;
use crate::waypoint::WaypointError;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the page to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ask the user for a waypoint name, then call back with it.
    PromptWaypointName,
    /// Show (`true`) or hide the settings menu.
    MenuVisibility(bool),
    /// Settings changed and were persisted; the page should refresh its panel.
    SettingsChanged,
}

/// Output of one display frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub hud: HudText,
    /// Scene to draw, or `None` to leave the canvas cleared.
    pub scene: Option<RadarScene>,
    /// A latency probe should be started now.
    pub ping_due: bool,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub settings: Settings,
    pub source: PositionSource,
    pub trail: Trail,
    pub servers: ServerList,
    fps: FpsCounter,
    ping: PingState,
    storage: Box<dyn Storage>,
    restored_from: RestoreSource,
    session_start_ms: Option<f64>,
    zoom_held: bool,
    menu_open: bool,
    focused: bool,
    canvas_size: f64,
}

impl EngineCore {
    /// Restore persisted state from `storage` and start a fallback-mode session.
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let (settings, restored_from) = settings::restore(storage.as_ref());
        let servers = ServerList::load(storage.as_ref());
        log::info!("settings restored from {restored_from:?}, {} waypoint(s)", settings.waypoints.len());
        Self {
            settings,
            source: PositionSource::new(),
            trail: Trail::default(),
            servers,
            fps: FpsCounter::default(),
            ping: PingState::default(),
            storage,
            restored_from,
            session_start_ms: None,
            zoom_held: false,
            menu_open: false,
            focused: true,
            canvas_size: 0.0,
        }
    }

    /// Install the game-state probe.
    pub fn set_probe(&mut self, probe: Box<dyn PoseProbe>) {
        self.source.set_probe(probe);
    }

    // --- Input ---

    /// Handle a key press by `KeyboardEvent.code`.
    pub fn on_key_down(&mut self, code: &str, shift: bool) -> Vec<Action> {
        let Some(command) = input::key_down(code, shift) else {
            return Vec::new();
        };
        match command {
            Command::OpenMenu => {
                self.menu_open = true;
                vec![Action::MenuVisibility(true)]
            }
            Command::CloseMenu => {
                self.menu_open = false;
                vec![Action::MenuVisibility(false)]
            }
            Command::AddWaypoint => vec![Action::PromptWaypointName],
            Command::ToggleWaypointList => {
                self.settings.show_wp_list = !self.settings.show_wp_list;
                self.persist();
                vec![Action::SettingsChanged]
            }
            Command::ZoomHold(held) => {
                self.zoom_held = held;
                Vec::new()
            }
            Command::Nudge { nudge, fast } => {
                self.source.nudge(nudge, fast);
                Vec::new()
            }
        }
    }

    /// Handle a key release.
    pub fn on_key_up(&mut self, code: &str) -> Vec<Action> {
        if let Some(Command::ZoomHold(held)) = input::key_up(code) {
            self.zoom_held = held;
        }
        Vec::new()
    }

    /// Page focus changed.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Canvas size in pixels (the canvas is square).
    pub fn set_canvas_size(&mut self, size: f64) {
        self.canvas_size = size.max(0.0);
    }

    // --- Waypoints ---

    /// Capture a waypoint at the current pose and persist.
    ///
    /// # Errors
    ///
    /// [`WaypointError::EmptyName`] for a blank name; nothing changes.
    pub fn add_waypoint(&mut self, name: &str, color: Option<&str>) -> Result<(), WaypointError> {
        let pose = self.source.pose();
        self.settings.waypoints.add(&pose, name, color)?;
        self.persist();
        Ok(())
    }

    /// Delete the waypoint at `index`. Returns whether one was removed.
    pub fn remove_waypoint(&mut self, index: usize) -> bool {
        let removed = self.settings.waypoints.remove(index).is_some();
        if removed {
            self.persist();
        }
        removed
    }

    /// Flip the enabled flag of the waypoint at `index`; returns the new state.
    pub fn toggle_waypoint(&mut self, index: usize) -> Option<bool> {
        let enabled = self.settings.waypoints.toggle_enabled(index)?;
        self.persist();
        Some(enabled)
    }

    /// Change the color of the waypoint at `index`.
    ///
    /// # Errors
    ///
    /// Invalid color or index; the waypoint is unchanged.
    pub fn recolor_waypoint(&mut self, index: usize, hex: &str) -> Result<(), WaypointError> {
        self.settings.waypoints.recolor(index, hex)?;
        self.persist();
        Ok(())
    }

    /// Replace every waypoint with an imported document. Returns the new count.
    ///
    /// # Errors
    ///
    /// Malformed documents leave the store untouched.
    pub fn import_waypoints(&mut self, document: &str) -> Result<usize, WaypointError> {
        let count = self.settings.waypoints.import_json(document)?;
        self.persist();
        Ok(count)
    }

    /// Pretty JSON export of the store.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn export_waypoints(&self) -> Result<String, WaypointError> {
        self.settings.waypoints.export_json()
    }

    // --- Settings ---

    /// Set one setting by its persisted key and persist.
    ///
    /// Turning breadcrumbs off drops the recorded trail; turning the ping
    /// display off forgets the last reading.
    ///
    /// # Errors
    ///
    /// Unknown or read-only keys and mistyped values; nothing changes.
    pub fn set_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        self.settings.set_by_key(key, value)?;
        if !self.settings.breadcrumbs {
            self.trail.clear();
        }
        if !self.settings.ping {
            self.ping.reset();
        }
        self.persist();
        Ok(())
    }

    /// Remember a server address. Returns whether it was new.
    pub fn add_server(&mut self, address: &str) -> bool {
        if !self.servers.add(address) {
            return false;
        }
        if let Err(e) = self.servers.save(self.storage.as_mut()) {
            log::warn!("failed to save server list: {e}");
        }
        true
    }

    // --- Frame ---

    /// Advance one display frame at `now_ms`.
    ///
    /// Returns `None` when paused because the page is unfocused and
    /// `pauseWhenUnfocused` is on; the caller keeps scheduling frames.
    pub fn frame(&mut self, now_ms: f64, local_secs: u32) -> Option<Frame> {
        let start = *self.session_start_ms.get_or_insert(now_ms);
        if self.settings.pause_when_unfocused && !self.focused {
            return None;
        }

        self.source.refresh();
        let pose = self.source.pose();
        if self.settings.breadcrumbs {
            self.trail.record(&pose);
        }
        let fps = self.fps.tick(now_ms);
        let ping_due = self.settings.ping && self.ping.begin(now_ms);

        let clock = Clock { session_ms: now_ms - start, local_secs };
        let hud = HudText::build(&self.settings, &pose, fps, self.ping.reading(), clock, self.zoom_held);
        let scene = RadarScene::build(&self.settings, &pose, &self.trail, self.canvas_size);
        Some(Frame { hud, scene, ping_due })
    }

    /// Record the outcome of the in-flight latency probe.
    pub fn finish_ping(&mut self, reading: PingReading) {
        self.ping.finish(reading);
    }

    // --- Queries ---

    #[must_use]
    pub fn pose(&self) -> Pose {
        self.source.pose()
    }

    #[must_use]
    pub fn source_mode(&self) -> SourceMode {
        self.source.mode()
    }

    #[must_use]
    pub fn restored_from(&self) -> RestoreSource {
        self.restored_from
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    #[must_use]
    pub fn zoom_held(&self) -> bool {
        self.zoom_held
    }

    #[must_use]
    pub fn ping_reading(&self) -> PingReading {
        self.ping.reading()
    }

    /// The stored settings JSON, as the page panel reads it.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn settings_json(&self) -> Result<String, SettingsError> {
        self.settings.to_stored_json()
    }

    fn persist(&mut self) {
        if let Err(e) = settings::persist(&self.settings, self.storage.as_mut()) {
            log::warn!("failed to persist settings: {e}");
        }
    }
}

/// The full overlay engine. Wraps `EngineCore` and owns the radar canvas.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, storage: Box<dyn Storage>) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut core = EngineCore::new(storage);
        core.set_canvas_size(f64::from(canvas.width()));
        Ok(Self { canvas, ctx, core })
    }

    /// Pick up canvas resizes made by the page.
    pub fn sync_canvas_size(&mut self) {
        self.core.set_canvas_size(f64::from(self.canvas.width()));
    }

    /// Draw `scene`, or just clear the canvas when there is none.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self, scene: Option<&RadarScene>) -> Result<(), JsValue> {
        match scene {
            Some(scene) => render::draw(&self.ctx, scene),
            None => {
                render::clear(&self.ctx, f64::from(self.canvas.width()), f64::from(self.canvas.height()));
                Ok(())
            }
        }
    }
}
