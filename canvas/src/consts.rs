//! Shared numeric constants for the canvas crate.

// ── Clipboard ───────────────────────────────────────────────────

/// Offset applied to both axes when duplicating or pasting elements.
pub const PASTE_OFFSET: f64 = 20.0;

// ── Board ───────────────────────────────────────────────────────

/// Map scale denominator used when the board metadata carries none (1:50 000).
pub const DEFAULT_MAP_SCALE: f64 = 50_000.0;

/// Content format version written on save.
pub const CONTENT_VERSION: &str = "1.0.0";

/// Default width of the board frame in document units.
pub const BOARD_WIDTH: f64 = 800.0;

/// Default height of the board frame in document units.
pub const BOARD_HEIGHT: f64 = 600.0;

// ── Viewport ────────────────────────────────────────────────────

/// Initial stage scale when an editor opens.
pub const DEFAULT_STAGE_SCALE: f64 = 0.6;

/// Multiplicative zoom step per wheel notch.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.1;

// ── Drop defaults ───────────────────────────────────────────────

/// Bounding box side for dropped symbols, before aspect-ratio fitting.
pub const SYMBOL_BASE_SIZE: f64 = 60.0;

/// Placeholder text for a freshly dropped text element.
pub const NEW_TEXT_PLACEHOLDER: &str = "Right click to edit";

/// Font size for a freshly dropped text element.
pub const NEW_TEXT_FONT_SIZE: u32 = 20;

/// Display name given to dropped elements.
pub const NEW_OBJECT_NAME: &str = "New Object";

// ── Keyboard ────────────────────────────────────────────────────

/// Arrow-key nudge distance.
pub const NUDGE_STEP: f64 = 1.0;

/// Arrow-key nudge distance while Shift is held.
pub const NUDGE_STEP_LARGE: f64 = 10.0;
