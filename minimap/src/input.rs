//! Input model: keyboard codes mapped to overlay commands.
//!
//! Codes are `KeyboardEvent.code` strings, so the layout is physical and
//! independent of the user's keyboard language.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::pose::Nudge;

/// What a key press asks the overlay to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the settings menu.
    OpenMenu,
    /// Hide the settings menu.
    CloseMenu,
    /// Capture a waypoint at the current pose (after a name prompt).
    AddWaypoint,
    /// Show or hide the waypoint text listing.
    ToggleWaypointList,
    /// Zoom key pressed (`true`) or released (`false`).
    ZoomHold(bool),
    /// Step the manual pose. `fast` is set while Shift is held.
    Nudge { nudge: Nudge, fast: bool },
}

/// Map a key-down event.
#[must_use]
pub fn key_down(code: &str, shift: bool) -> Option<Command> {
    let nudge = |nudge| Some(Command::Nudge { nudge, fast: shift });
    match code {
        "ShiftRight" => Some(Command::OpenMenu),
        "ControlRight" => Some(Command::CloseMenu),
        "KeyB" => Some(Command::AddWaypoint),
        "KeyL" => Some(Command::ToggleWaypointList),
        "KeyC" => Some(Command::ZoomHold(true)),
        "ArrowUp" => nudge(Nudge::North),
        "ArrowDown" => nudge(Nudge::South),
        "ArrowLeft" => nudge(Nudge::West),
        "ArrowRight" => nudge(Nudge::East),
        "KeyQ" => nudge(Nudge::Up),
        "KeyE" => nudge(Nudge::Down),
        "KeyA" => nudge(Nudge::TurnLeft),
        "KeyD" => nudge(Nudge::TurnRight),
        _ => None,
    }
}

/// Map a key-up event.
#[must_use]
pub fn key_up(code: &str) -> Option<Command> {
    match code {
        "KeyC" => Some(Command::ZoomHold(false)),
        _ => None,
    }
}

/// Whether an `<input>` of this `type` takes typed text, so key commands
/// aimed at the overlay must not fire while it has focus.
///
/// Checkboxes, ranges, color pickers, file pickers and buttons keep the key map live.
#[must_use]
pub fn is_text_entry(input_type: &str) -> bool {
    matches!(
        input_type.to_ascii_lowercase().as_str(),
        "" | "text" | "search" | "number" | "email" | "password" | "url" | "tel"
    )
}
