//! Input model: drop tools, modifier keys, and keyboard shortcuts.
//!
//! The render adapter reports raw key presses; `shortcut` maps them to editor
//! `Command`s. Drops from the sidebar carry a `DropTool` describing what to
//! create.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{NUDGE_STEP, NUDGE_STEP_LARGE};

/// What a drag-and-drop from the sidebar creates.
#[derive(Debug, Clone, PartialEq)]
pub enum DropTool {
    /// Filled rectangle.
    Rect,
    /// Filled circle.
    Circle,
    /// Placeholder text.
    Text,
    /// Library symbol. `image_size` is the natural pixel size of the symbol
    /// image when the host managed to load it.
    Symbol { symbol_id: i64, image_size: Option<(f64, f64)> },
}

impl DropTool {
    /// Parse the drag payload `type` tag used by the sidebar.
    #[must_use]
    pub fn from_tag(tag: &str, symbol_id: Option<i64>) -> Option<Self> {
        match tag {
            "rect" => Some(Self::Rect),
            "circle" => Some(Self::Circle),
            "text" => Some(Self::Text),
            "symbol" => symbol_id.map(|symbol_id| Self::Symbol { symbol_id, image_size: None }),
            _ => None,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether a click should add to / remove from the selection.
    #[must_use]
    pub fn extends_selection(self) -> bool {
        self.shift || self.meta
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Editor command produced by a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Delete,
    Copy,
    Paste,
    Duplicate,
    Undo,
    Redo,
    /// Move the selection by a document-space delta.
    Nudge { dx: f64, dy: f64 },
}

/// Map a key press to an editor command.
///
/// Returns `None` for keys with no binding. The caller is responsible for not
/// routing keys typed into text fields here.
#[must_use]
pub fn shortcut(key: &Key, modifiers: Modifiers) -> Option<Command> {
    let name = key.0.as_str();
    let lower = name.to_ascii_lowercase();

    if modifiers.command() {
        return match (lower.as_str(), modifiers.shift) {
            ("c", false) => Some(Command::Copy),
            ("v", false) => Some(Command::Paste),
            ("d", false) => Some(Command::Duplicate),
            ("z", false) => Some(Command::Undo),
            ("z", true) | ("y", _) => Some(Command::Redo),
            _ => None,
        };
    }

    let step = if modifiers.shift { NUDGE_STEP_LARGE } else { NUDGE_STEP };
    match name {
        "Delete" | "Backspace" => Some(Command::Delete),
        "ArrowUp" => Some(Command::Nudge { dx: 0.0, dy: -step }),
        "ArrowDown" => Some(Command::Nudge { dx: 0.0, dy: step }),
        "ArrowLeft" => Some(Command::Nudge { dx: -step, dy: 0.0 }),
        "ArrowRight" => Some(Command::Nudge { dx: step, dy: 0.0 }),
        _ => None,
    }
}
