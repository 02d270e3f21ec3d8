//! Minimap, radar and HUD engine for the game companion overlay.
//!
//! This crate is compiled to WebAssembly and runs in the page that hosts the
//! embedded game iframe. It owns the overlay's session state: the persisted
//! settings object and its waypoint store, the single authoritative pose, the
//! breadcrumb trail and the HUD counters. Every display frame it projects
//! waypoints into a heading-locked, radius-clamped radar scene and draws it to
//! a 2D canvas. The page's own JavaScript is responsible only for the settings
//! panel DOM and calls into the `web::OverlayHandle` wasm export for every mutation.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`waypoint`] | Waypoint type and the owning [`waypoint::WaypointStore`] |
//! | [`settings`] | Persisted settings object, storage seam, restore/persist |
//! | [`pose`] | Pose, partial snapshots and the position source |
//! | [`probe`] | Capability detection for a same-origin game global |
//! | [`projection`] | Heading-locked world-to-radar projection |
//! | [`scene`] | Pure per-frame draw description |
//! | [`render`] | Draws a scene to a `CanvasRenderingContext2d` |
//! | [`trail`] | Bounded breadcrumb trail |
//! | [`hud`] | FPS, ping, clock and listing text |
//! | [`input`] | Key code to command mapping |
//! | [`servers`] | Saved server address list |
//! | [`consts`] | Shared numeric and string constants |

pub mod consts;
pub mod engine;
pub mod hud;
pub mod input;
pub mod pose;
pub mod probe;
pub mod projection;
pub mod render;
pub mod scene;
pub mod servers;
pub mod settings;
pub mod trail;
pub mod waypoint;
#[cfg(target_arch = "wasm32")]
pub mod web;
