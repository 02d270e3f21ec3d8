//! Browser glue: wasm entry point, frame loop, DOM listeners and the
//! [`OverlayHandle`] the page's settings panel calls into.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns the settings panel markup. Everything stateful lives in
//! [`EngineCore`](crate::engine::EngineCore); this module only adapts browser
//! APIs to it (`localStorage`, the game iframe, `requestAnimationFrame`,
//! keyboard and focus events, the `HEAD` latency probe, file download).
//!
//! Borrows of the shared engine are never held across a call back into the
//! page (prompt, change callback) so re-entrant handlers cannot double-borrow.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::{Date, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, HtmlCanvasElement, HtmlIFrameElement, KeyboardEvent, Url};

use crate::consts::{EXPORT_FILE_NAME, EXPORT_REVOKE_DELAY_MS, GAME_FRAME_ID, PING_URL, PROBE_GLOBAL, WAYPOINT_PROMPT, WAYPOINT_PROMPT_DEFAULT};
use crate::engine::{Action, Engine};
use crate::hud::{HudText, PingReading, reading_from_elapsed};
use crate::input::is_text_entry;
use crate::pose::{PoseProbe, PoseSnapshot};
use crate::probe::{FieldReader, snapshot_from_fields};
use crate::settings::{Settings, Storage, StorageError};

// Overlay element ids.
const FPS_ID: &str = "overlay-fps";
const PING_ID: &str = "overlay-ping";
const COORDS_ID: &str = "overlay-coords";
const CLOCK_ID: &str = "overlay-clock";
const SESSION_ID: &str = "overlay-session";
const ZOOM_ID: &str = "zoomIndicator";
const WAYPOINTS_ID: &str = "overlay-waypoints";
const CROSSHAIR_ID: &str = "crosshair";
const FULLBRIGHT_ID: &str = "fullbright";
const MENU_ID: &str = "clientMenu";

type SharedEngine = Rc<RefCell<Engine>>;
type ChangeCallback = Rc<RefCell<Option<Function>>>;

/// Install the panic hook and console logger when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::warn!("console logger not installed: {e}");
    }
}

// =============================================================
// Storage and probe adapters
// =============================================================

/// `window.localStorage`, or nothing when the browser denies it.
struct LocalStorage(Option<web_sys::Storage>);

impl LocalStorage {
    fn open() -> Self {
        Self(web_sys::window().and_then(|w| w.local_storage().unwrap_or_default()))
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).unwrap_or_default()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.0.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected(format!("{e:?}")))
    }
}

/// Numeric property reads on an arbitrary JS object. Throwing getters read as missing.
struct JsFields(JsValue);

impl FieldReader for JsFields {
    fn number(&self, name: &str) -> Option<f64> {
        Reflect::get(&self.0, &JsValue::from_str(name))
            .unwrap_or(JsValue::UNDEFINED)
            .as_f64()
    }
}

/// Reads the player global from the game iframe's window.
///
/// Cross-origin frames throw on property access, which reads as unavailable.
struct FramePlayerProbe;

impl PoseProbe for FramePlayerProbe {
    fn probe(&mut self) -> Option<PoseSnapshot> {
        let frame = document()?.get_element_by_id(GAME_FRAME_ID)?;
        let game_window = frame.dyn_ref::<HtmlIFrameElement>()?.content_window()?;
        let player = Reflect::get(&game_window, &JsValue::from_str(PROBE_GLOBAL)).unwrap_or(JsValue::UNDEFINED);
        if !player.is_object() {
            return None;
        }
        snapshot_from_fields(&JsFields(player))
    }
}

// =============================================================
// Handle
// =============================================================

/// The overlay as seen from page JavaScript.
///
/// Mutating methods report success as a boolean and log the reason when they
/// reject input; state is unchanged on rejection.
#[wasm_bindgen]
pub struct OverlayHandle {
    engine: SharedEngine,
    on_change: ChangeCallback,
}

#[wasm_bindgen]
impl OverlayHandle {
    /// Bind to the radar canvas with id `canvas_id`, restore settings and start the frame loop.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no window, the canvas is missing, or it has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<OverlayHandle, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let canvas = document()
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str("radar canvas not found"))?
            .dyn_into::<HtmlCanvasElement>()?;

        let mut engine = Engine::new(canvas, Box::new(LocalStorage::open()))?;
        engine.core.set_probe(Box::new(FramePlayerProbe));
        apply_page_settings(&engine.core.settings);
        let engine = Rc::new(RefCell::new(engine));
        let on_change: ChangeCallback = Rc::new(RefCell::new(None));

        install_key_listeners(&window, &engine, &on_change)?;
        install_focus_listeners(&window, &engine)?;
        start_frame_loop(&window, Rc::clone(&engine))?;
        log::info!("overlay started");
        Ok(Self { engine, on_change })
    }

    /// Register a callback invoked after key commands change settings.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: Function) {
        *self.on_change.borrow_mut() = Some(callback);
    }

    /// Capture a waypoint at the current pose.
    #[wasm_bindgen(js_name = addWaypoint)]
    pub fn add_waypoint(&self, name: &str, color: Option<String>) -> bool {
        logged("add waypoint", self.engine.borrow_mut().core.add_waypoint(name, color.as_deref()))
    }

    #[wasm_bindgen(js_name = removeWaypoint)]
    pub fn remove_waypoint(&self, index: usize) -> bool {
        self.engine.borrow_mut().core.remove_waypoint(index)
    }

    /// Flip a waypoint's visibility; returns the new state, or `undefined` for a bad index.
    #[wasm_bindgen(js_name = toggleWaypoint)]
    pub fn toggle_waypoint(&self, index: usize) -> Option<bool> {
        self.engine.borrow_mut().core.toggle_waypoint(index)
    }

    #[wasm_bindgen(js_name = recolorWaypoint)]
    pub fn recolor_waypoint(&self, index: usize, hex: &str) -> bool {
        logged("recolor waypoint", self.engine.borrow_mut().core.recolor_waypoint(index, hex))
    }

    /// Replace the waypoint store with an imported document.
    #[wasm_bindgen(js_name = importWaypoints)]
    pub fn import_waypoints(&self, document: &str) -> bool {
        logged("import waypoints", self.engine.borrow_mut().core.import_waypoints(document))
    }

    /// Download the waypoint store as a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization or any DOM call fails.
    #[wasm_bindgen(js_name = exportWaypoints)]
    pub fn export_waypoints(&self) -> Result<(), JsValue> {
        let json = self
            .engine
            .borrow()
            .core
            .export_waypoints()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        download_json(&json, EXPORT_FILE_NAME)
    }

    /// Set one setting by its persisted key, e.g. `setSetting("mapZoom", 16)`.
    #[wasm_bindgen(js_name = setSetting)]
    pub fn set_setting(&self, key: &str, value: JsValue) -> bool {
        let value = match js_value_to_json(&value) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("set {key}: {e:?}");
                return false;
            }
        };
        let applied = logged("set setting", self.engine.borrow_mut().core.set_setting(key, value));
        if applied {
            apply_page_settings(&self.engine.borrow().core.settings);
        }
        applied
    }

    /// The full settings object as stored, for populating the panel.
    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> Option<String> {
        match self.engine.borrow().core.settings_json() {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("settings json: {e}");
                None
            }
        }
    }

    /// Report page focus explicitly, e.g. when the game iframe takes focus
    /// and the window only sees `blur`.
    #[wasm_bindgen(js_name = setFocused)]
    pub fn set_focused(&self, focused: bool) {
        self.engine.borrow_mut().core.set_focused(focused);
    }

    #[wasm_bindgen(js_name = addServer)]
    pub fn add_server(&self, address: &str) -> bool {
        self.engine.borrow_mut().core.add_server(address)
    }

    pub fn servers(&self) -> Vec<String> {
        self.engine.borrow().core.servers.addresses().to_vec()
    }
}

/// Log a rejected operation and collapse the result to success.
fn logged<T, E: std::fmt::Display>(what: &str, result: Result<T, E>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            log::warn!("{what} rejected: {e}");
            false
        }
    }
}

fn js_value_to_json(value: &JsValue) -> Result<serde_json::Value, JsValue> {
    let raw: String = js_sys::JSON::stringify(value)?.into();
    serde_json::from_str(&raw).map_err(|e| JsValue::from_str(&e.to_string()))
}

// =============================================================
// Listeners
// =============================================================

fn install_key_listeners(window: &web_sys::Window, engine: &SharedEngine, on_change: &ChangeCallback) -> Result<(), JsValue> {
    let engine_down = Rc::clone(engine);
    let on_change_down = Rc::clone(on_change);
    let key_down = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if typing_in_field(&event) {
            return;
        }
        let actions = engine_down.borrow_mut().core.on_key_down(&event.code(), event.shift_key());
        for action in actions {
            handle_action(&engine_down, &on_change_down, action);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    window.add_event_listener_with_callback("keydown", key_down.as_ref().unchecked_ref())?;
    key_down.forget();

    let engine_up = Rc::clone(engine);
    let key_up = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        engine_up.borrow_mut().core.on_key_up(&event.code());
    }) as Box<dyn FnMut(KeyboardEvent)>);
    window.add_event_listener_with_callback("keyup", key_up.as_ref().unchecked_ref())?;
    key_up.forget();
    Ok(())
}

fn install_focus_listeners(window: &web_sys::Window, engine: &SharedEngine) -> Result<(), JsValue> {
    for (event, focused) in [("focus", true), ("blur", false)] {
        let engine = Rc::clone(engine);
        let cb = Closure::wrap(Box::new(move || {
            engine.borrow_mut().core.set_focused(focused);
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

/// Key presses inside panel inputs belong to the input, not the overlay.
fn typing_in_field(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return is_text_entry(&input.type_());
    }
    target
        .dyn_ref::<web_sys::Element>()
        .is_some_and(|element| element.tag_name().eq_ignore_ascii_case("textarea"))
}

fn handle_action(engine: &SharedEngine, on_change: &ChangeCallback, action: Action) {
    match action {
        Action::PromptWaypointName => {
            let Some(window) = web_sys::window() else {
                return;
            };
            match window.prompt_with_message_and_default(WAYPOINT_PROMPT, WAYPOINT_PROMPT_DEFAULT) {
                Ok(Some(name)) => {
                    if logged("add waypoint", engine.borrow_mut().core.add_waypoint(&name, None)) {
                        notify_change(on_change);
                    }
                }
                Ok(None) => {}
                Err(e) => log::warn!("waypoint prompt failed: {e:?}"),
            }
        }
        Action::MenuVisibility(visible) => {
            if let Some(document) = document() {
                set_hidden(&document, MENU_ID, !visible);
            }
        }
        Action::SettingsChanged => notify_change(on_change),
    }
}

fn notify_change(on_change: &ChangeCallback) {
    let callback = on_change.borrow().clone();
    if let Some(callback) = callback {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!("change callback threw: {e:?}");
        }
    }
}

// =============================================================
// Frame loop
// =============================================================

fn start_frame_loop(window: &web_sys::Window, engine: SharedEngine) -> Result<(), JsValue> {
    // The closure reschedules itself through this slot for the page's lifetime.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let slot_for_cb = Rc::clone(&slot);
    let cb = Closure::wrap(Box::new(move |now_ms: f64| {
        tick(&engine, now_ms);
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(cb) = slot_for_cb.borrow().as_ref() {
            if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("frame loop stopped: {e:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>);
    window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    *slot.borrow_mut() = Some(cb);
    Ok(())
}

fn tick(engine: &SharedEngine, now_ms: f64) {
    let frame = {
        let mut engine = engine.borrow_mut();
        engine.sync_canvas_size();
        engine.core.frame(now_ms, local_secs())
    };
    let Some(frame) = frame else {
        return;
    };

    if let Err(e) = engine.borrow().render(frame.scene.as_ref()) {
        log::warn!("radar draw failed: {e:?}");
    }
    if let Some(document) = document() {
        apply_hud(&document, &frame.hud);
    }
    if frame.ping_due {
        spawn_ping(Rc::clone(engine));
    }
}

/// Settings the page applies itself rather than per frame: tint overlay and GUI scale.
fn apply_page_settings(settings: &Settings) {
    let Some(document) = document() else {
        return;
    };
    set_hidden(&document, FULLBRIGHT_ID, !settings.fullbright);
    if let Some(root) = document.document_element() {
        if let Err(e) = root.set_attribute("style", &format!("font-size: {}%", settings.gui_scale)) {
            log::debug!("gui scale not applied: {e:?}");
        }
    }
}

fn apply_hud(document: &Document, hud: &HudText) {
    set_text(document, FPS_ID, &hud.fps);
    set_text(document, PING_ID, &hud.ping);
    set_text(document, COORDS_ID, &hud.coords);
    set_text(document, CLOCK_ID, &hud.clock);
    set_text(document, SESSION_ID, &hud.session);
    set_text(document, ZOOM_ID, &hud.zoom);
    set_text(document, WAYPOINTS_ID, &hud.waypoints.join("\n"));
    if let Some(crosshair) = document.get_element_by_id(CROSSHAIR_ID) {
        match hud.crosshair {
            Some(style) => crosshair.set_class_name(&format!("crosshair {style}")),
            None => crosshair.set_class_name("crosshair hidden"),
        }
    }
}

/// Wall-clock seconds since local midnight.
fn local_secs() -> u32 {
    let now = Date::new_0();
    now.get_hours() * 3600 + now.get_minutes() * 60 + now.get_seconds()
}

// =============================================================
// Latency probe
// =============================================================

fn spawn_ping(engine: SharedEngine) {
    wasm_bindgen_futures::spawn_local(async move {
        let started = Date::now();
        let url = format!("{PING_URL}?t={started}");
        let response = gloo_net::http::RequestBuilder::new(&url)
            .method(gloo_net::http::Method::HEAD)
            .send()
            .await;
        let reading = match response {
            Ok(_) => reading_from_elapsed(Date::now() - started),
            Err(e) => {
                log::debug!("ping failed: {e}");
                PingReading::Unavailable
            }
        };
        engine.borrow_mut().core.finish_ping(reading);
    });
}

// =============================================================
// DOM helpers
// =============================================================

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(element) = document.get_element_by_id(id) {
        element.set_text_content(Some(text));
    }
}

fn set_hidden(document: &Document, id: &str, hidden: bool) {
    let Some(element) = document.get_element_by_id(id) else {
        return;
    };
    let result = if hidden { element.set_attribute("hidden", "") } else { element.remove_attribute("hidden") };
    if let Err(e) = result {
        log::debug!("toggle hidden on #{id}: {e:?}");
    }
}

fn download_json(json: &str, file_name: &str) -> Result<(), JsValue> {
    let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor = document.create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    Timeout::new(EXPORT_REVOKE_DELAY_MS, move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            log::debug!("revoke export url: {e:?}");
        }
    })
    .forget();
    Ok(())
}
