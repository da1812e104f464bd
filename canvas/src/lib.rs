//! Document model and editing engine for map boards.
//!
//! This crate owns everything about an open board that does not need the
//! network: the typed element list, board metadata, selection, clipboard,
//! linear undo/redo, the stage viewport, and the mapping from pointer and
//! keyboard events to document edits. A render adapter feeds events into
//! [`engine::EditorCore`] and carries out the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event handlers over a document and viewport |
//! | [`doc`] | Document store: elements, selection, clipboard, history |
//! | [`element`] | Scene element types, wire format, validation, patches |
//! | [`history`] | Linear snapshot history |
//! | [`content`] | Persisted `{version, board, objects, metadata}` payload |
//! | [`camera`] | Stage viewport and coordinate conversions |
//! | [`input`] | Drop tools, modifiers and keyboard shortcuts |
//! | [`consts`] | Shared constants (offsets, defaults, zoom factor) |

pub mod camera;
pub mod consts;
pub mod content;
pub mod doc;
pub mod element;
pub mod engine;
pub mod history;
pub mod input;
