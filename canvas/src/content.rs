//! Persisted canvas content: the JSON document exchanged with the backend's
//! load/save endpoints.
//!
//! `{ version, board, objects[], metadata{} }`. Board settings travel inside
//! the open-ended `metadata` map under `boardType`, `backgroundImageUrl` and
//! `mapScale`; loading reads them leniently because older saves stored the
//! scale as a string and some omit keys entirely.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH, CONTENT_VERSION, DEFAULT_MAP_SCALE};
use crate::doc::{BoardMetadata, BoardType, Document, Snapshot};
use crate::element::{ElementId, ElementKind, SceneElement, ValidationError, is_valid_color};

const KEY_BOARD_TYPE: &str = "boardType";
const KEY_BACKGROUND: &str = "backgroundImageUrl";
const KEY_MAP_SCALE: &str = "mapScale";

fn default_version() -> String {
    CONTENT_VERSION.to_owned()
}

fn board_literal() -> String {
    "board".to_owned()
}

/// Fixed-size frame the backend stores alongside the objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardFrame {
    #[serde(default = "board_literal")]
    pub id: String,
    #[serde(rename = "type", default = "board_literal")]
    pub frame_type: String,
    #[serde(default)]
    pub transform: BoardTransform,
    #[serde(default)]
    pub fields: BoardFields,
}

impl Default for BoardFrame {
    fn default() -> Self {
        Self {
            id: board_literal(),
            frame_type: board_literal(),
            transform: BoardTransform::default(),
            fields: BoardFields::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardTransform {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "board_width")]
    pub width: f64,
    #[serde(default = "board_height")]
    pub height: f64,
}

fn board_width() -> f64 {
    BOARD_WIDTH
}

fn board_height() -> f64 {
    BOARD_HEIGHT
}

impl Default for BoardTransform {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, width: BOARD_WIDTH, height: BOARD_HEIGHT }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardFields {
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
}

impl Default for BoardFields {
    fn default() -> Self {
        Self { background_color: "#ffffff".to_owned() }
    }
}

/// Canvas content as loaded from and saved to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasContent {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub board: BoardFrame,
    #[serde(default)]
    pub objects: Vec<SceneElement>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Default for CanvasContent {
    fn default() -> Self {
        Self {
            version: default_version(),
            board: BoardFrame::default(),
            objects: Vec::new(),
            metadata: Map::new(),
        }
    }
}

impl CanvasContent {
    /// Save payload for a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let board = &snapshot.board;
        let mut metadata = Map::new();
        metadata.insert(KEY_BOARD_TYPE.to_owned(), Value::String(board.board_type.as_str().to_owned()));
        metadata.insert(
            KEY_BACKGROUND.to_owned(),
            board.background_image_url.clone().map_or(Value::Null, Value::String),
        );
        metadata.insert(KEY_MAP_SCALE.to_owned(), serde_json::json!(board.map_scale));

        Self { objects: snapshot.elements.clone(), metadata, ..Self::default() }
    }

    /// Save payload for the document's present snapshot.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        Self::from_snapshot(doc.snapshot())
    }

    /// Board settings read leniently from `metadata`.
    #[must_use]
    pub fn board_metadata(&self) -> BoardMetadata {
        let board_type = self
            .metadata
            .get(KEY_BOARD_TYPE)
            .and_then(Value::as_str)
            .and_then(BoardType::parse)
            .unwrap_or_default();

        let background_image_url = self
            .metadata
            .get(KEY_BACKGROUND)
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(ToOwned::to_owned);

        let map_scale = self
            .metadata
            .get(KEY_MAP_SCALE)
            .and_then(number_like)
            .filter(|scale| scale.is_finite() && *scale != 0.0)
            .unwrap_or(DEFAULT_MAP_SCALE);

        BoardMetadata { board_type, background_image_url, map_scale }
    }

    /// Convert into the snapshot an editor starts from.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        let board = self.board_metadata();
        Snapshot { elements: self.objects, board }
    }

    /// Distinct symbol ids referenced by symbol elements.
    #[must_use]
    pub fn symbol_ids(&self) -> BTreeSet<i64> {
        self.objects
            .iter()
            .filter_map(|el| match &el.kind {
                ElementKind::Symbol(fields) => Some(fields.symbol_id),
                _ => None,
            })
            .collect()
    }

    /// Full check, including that every element id is unique.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a malformed version, an invalid board
    /// color, a repeated element id, or an element rule violation.
    pub fn validate(&self) -> Result<(), ContentError> {
        self.validate_for_save()?;
        match self.duplicate_ids().into_iter().next() {
            Some(id) => Err(ContentError::DuplicateId(id)),
            None => Ok(()),
        }
    }

    /// Check the content against what the backend accepts on save. Repeated
    /// element ids are accepted there and are left to [`Self::duplicate_ids`].
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a malformed version, an invalid board
    /// frame or color, or an element rule violation.
    pub fn validate_for_save(&self) -> Result<(), ContentError> {
        if !is_valid_version(&self.version) {
            return Err(ContentError::InvalidVersion(self.version.clone()));
        }
        let frame = &self.board.transform;
        if frame.width <= 0.0 || frame.height <= 0.0 {
            return Err(ContentError::InvalidBoard("frame size must be positive".to_owned()));
        }
        if !is_valid_color(&self.board.fields.background_color) {
            return Err(ContentError::InvalidBoard(format!(
                "backgroundColor `{}` is not a hex or rgb/rgba color",
                self.board.fields.background_color
            )));
        }
        for el in &self.objects {
            el.validate()?;
        }
        Ok(())
    }

    /// Ids used by more than one element, each listed once in first-repeat order.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<ElementId> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut repeated: Vec<ElementId> = Vec::new();
        for el in &self.objects {
            if !seen.insert(el.id.as_str()) && !repeated.contains(&el.id) {
                repeated.push(el.id.clone());
            }
        }
        repeated
    }
}

/// Problems found by [`CanvasContent::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContentError {
    #[error("invalid content version `{0}` (expected MAJOR.MINOR[.PATCH])")]
    InvalidVersion(String),

    #[error("invalid board frame: {0}")]
    InvalidBoard(String),

    #[error("duplicate element id `{0}`")]
    DuplicateId(ElementId),

    #[error(transparent)]
    Element(#[from] ValidationError),
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => None,
        },
        _ => None,
    }
}

fn is_valid_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    (2..=3).contains(&parts.len())
        && parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
