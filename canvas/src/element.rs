//! Scene elements: the typed objects placed on a board.
//!
//! A `SceneElement` carries the fields every element shares (transform,
//! style, properties) plus an `ElementKind` payload. The enum variant is the
//! only discriminant; renderers and property panels match on it instead of
//! comparing type strings.
//!
//! On the wire an element is a flat JSON object with a `"type"` tag and the
//! variant payload under `"fields"`. Serialization goes through borrowed wire
//! structs so the in-memory type never has to mirror that shape.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize, Serializer};

/// Unique identifier for a scene element. Generated client-side as a UUID string.
pub type ElementId = String;

/// Wire discriminant for a scene element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Shape,
    Symbol,
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

// =============================================================================
// SHARED PARTS
// =============================================================================

/// Position, rotation and scale of an element in document space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Transform {
    /// Unrotated, unscaled transform at `(x, y)` with no explicit size.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, rotation: 0.0, scale_x: 1.0, scale_y: 1.0, width: None, height: None }
    }

    /// Same transform with an explicit size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Same transform shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self.clone() }
    }
}

/// Paint attributes. Colors are CSS hex or `rgb()`/`rgba()` strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Style {
    /// Effective opacity; absent means fully opaque.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }
}

/// Editor-facing flags and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Carried for the backend; paint order is the element array order.
    #[serde(default)]
    pub z_index: i64,
}

impl Default for Properties {
    fn default() -> Self {
        Self { visible: true, locked: false, name: None, z_index: 0 }
    }
}

// =============================================================================
// VARIANT PAYLOADS
// =============================================================================

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

fn default_font_size() -> u32 {
    16
}

fn default_font_family() -> String {
    "Arial".to_owned()
}

fn normal() -> String {
    "normal".to_owned()
}

fn no_decoration() -> String {
    "none".to_owned()
}

fn default_text_color() -> String {
    "#000000".to_owned()
}

fn default_line_height() -> f64 {
    1.2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFields {
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "normal")]
    pub font_weight: String,
    #[serde(default = "normal")]
    pub font_style: String,
    #[serde(default = "no_decoration")]
    pub text_decoration: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default = "default_text_color")]
    pub color: String,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub letter_spacing: f64,
}

impl TextFields {
    /// Text payload with every typographic attribute at its default.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: normal(),
            font_style: normal(),
            text_decoration: no_decoration(),
            text_align: TextAlign::Left,
            color: default_text_color(),
            line_height: default_line_height(),
            letter_spacing: 0.0,
        }
    }
}

/// Geometric primitive drawn by a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Polygon,
    Line,
}

impl ShapeKind {
    /// Whether this primitive is defined by a point list rather than its box.
    #[must_use]
    pub fn uses_points(self) -> bool {
        matches!(self, Self::Polygon | Self::Line)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeFields {
    #[serde(rename = "shapeType")]
    pub shape_type: ShapeKind,
    /// Flat `[x0, y0, x1, y1, ...]` list for polygons and lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
}

/// Reference to a library symbol, resolved to an image by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFields {
    pub symbol_id: i64,
}

/// Reference to an uploaded image. Not drawn by any current renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFields {
    pub image_id: i64,
}

/// Variant payload of a scene element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(TextFields),
    Shape(ShapeFields),
    Symbol(SymbolFields),
    Image(ImageFields),
}

impl ElementKind {
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text(_) => ElementType::Text,
            Self::Shape(_) => ElementType::Shape,
            Self::Symbol(_) => ElementType::Symbol,
            Self::Image(_) => ElementType::Image,
        }
    }
}

// =============================================================================
// SCENE ELEMENT
// =============================================================================

/// One placed object on the canvas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireElement")]
pub struct SceneElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub transform: Transform,
    pub style: Option<Style>,
    pub properties: Option<Properties>,
}

impl SceneElement {
    /// Element with the given payload and no style or properties.
    #[must_use]
    pub fn new(id: impl Into<ElementId>, kind: ElementKind, transform: Transform) -> Self {
        Self { id: id.into(), kind, transform, style: None, properties: None }
    }

    #[must_use]
    pub fn shape(id: impl Into<ElementId>, shape_type: ShapeKind, transform: Transform) -> Self {
        Self::new(id, ElementKind::Shape(ShapeFields { shape_type, points: None }), transform)
    }

    #[must_use]
    pub fn text(id: impl Into<ElementId>, text: impl Into<String>, transform: Transform) -> Self {
        Self::new(id, ElementKind::Text(TextFields::new(text)), transform)
    }

    #[must_use]
    pub fn symbol(id: impl Into<ElementId>, symbol_id: i64, transform: Transform) -> Self {
        Self::new(id, ElementKind::Symbol(SymbolFields { symbol_id }), transform)
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Locked elements ignore keyboard nudges.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| p.locked)
    }

    /// Copy of this element under a new id, shifted by `(dx, dy)`.
    #[must_use]
    pub fn cloned_with_offset(&self, id: ElementId, dx: f64, dy: f64) -> Self {
        Self { id, transform: self.transform.translated(dx, dy), ..self.clone() }
    }

    /// Check the element against the rules the backend enforces on save.
    ///
    /// # Errors
    ///
    /// Returns the first rule the element breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let id = &self.id;
        let t = &self.transform;
        if t.scale_x <= 0.0 || t.scale_y <= 0.0 {
            return Err(ValidationError::OutOfRange { id: id.clone(), field: "scale" });
        }
        if t.width.is_some_and(|w| w < 0.0) || t.height.is_some_and(|h| h < 0.0) {
            return Err(ValidationError::OutOfRange { id: id.clone(), field: "size" });
        }

        if let Some(style) = &self.style {
            check_color(id, "fill", style.fill.as_deref())?;
            check_color(id, "stroke", style.stroke.as_deref())?;
            if style.stroke_width.is_some_and(|w| w < 0.0) {
                return Err(ValidationError::OutOfRange { id: id.clone(), field: "strokeWidth" });
            }
            if style.opacity.is_some_and(|o| !(0.0..=1.0).contains(&o)) {
                return Err(ValidationError::OutOfRange { id: id.clone(), field: "opacity" });
            }
        }

        if let Some(name) = self.properties.as_ref().and_then(|p| p.name.as_deref()) {
            if name.chars().count() > MAX_NAME_LEN {
                return Err(ValidationError::NameTooLong { id: id.clone() });
            }
        }

        match &self.kind {
            ElementKind::Text(fields) => {
                let len = fields.text.chars().count();
                if len == 0 || len > MAX_TEXT_LEN {
                    return Err(ValidationError::TextLength { id: id.clone() });
                }
                if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&fields.font_size) {
                    return Err(ValidationError::OutOfRange { id: id.clone(), field: "fontSize" });
                }
                if fields.line_height < MIN_LINE_HEIGHT {
                    return Err(ValidationError::OutOfRange { id: id.clone(), field: "lineHeight" });
                }
                check_color(id, "color", Some(&fields.color))?;
            }
            ElementKind::Shape(fields) => {
                if fields.shape_type.uses_points() {
                    let valid = fields
                        .points
                        .as_ref()
                        .is_some_and(|p| p.len() >= 4 && p.len() % 2 == 0);
                    if !valid {
                        return Err(ValidationError::Points { id: id.clone() });
                    }
                }
            }
            ElementKind::Symbol(fields) => {
                if fields.symbol_id <= 0 {
                    return Err(ValidationError::OutOfRange { id: id.clone(), field: "symbol_id" });
                }
            }
            ElementKind::Image(fields) => {
                if fields.image_id <= 0 {
                    return Err(ValidationError::OutOfRange { id: id.clone(), field: "image_id" });
                }
            }
        }
        Ok(())
    }
}

const MAX_NAME_LEN: usize = 100;
const MAX_TEXT_LEN: usize = 5000;
const MIN_FONT_SIZE: u32 = 8;
const MAX_FONT_SIZE: u32 = 200;
const MIN_LINE_HEIGHT: f64 = 0.5;

/// Whether `value` is a CSS color the backend accepts: `#rgb`, `#rrggbb`,
/// `#rrggbbaa`, or an `rgb(`/`rgba(` expression.
#[must_use]
pub fn is_valid_color(value: &str) -> bool {
    let color = value.trim();
    if color.starts_with('#') {
        return matches!(color.len(), 4 | 7 | 9);
    }
    let lower = color.to_ascii_lowercase();
    lower.starts_with("rgb(") || lower.starts_with("rgba(")
}

fn check_color(id: &str, field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(color) if !is_valid_color(color) => Err(ValidationError::InvalidColor {
            id: id.to_owned(),
            field,
            value: color.to_owned(),
        }),
        _ => Ok(()),
    }
}

/// A rule violation found by [`SceneElement::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("element {id}: {field} must be a hex or rgb/rgba color, got `{value}`")]
    InvalidColor { id: ElementId, field: &'static str, value: String },

    #[error("element {id}: {field} is out of range")]
    OutOfRange { id: ElementId, field: &'static str },

    #[error("element {id}: text must be between 1 and 5000 characters")]
    TextLength { id: ElementId },

    #[error("element {id}: points must contain at least two x,y pairs")]
    Points { id: ElementId },

    #[error("element {id}: name must be at most 100 characters")]
    NameTooLong { id: ElementId },
}

// =============================================================================
// PATCH
// =============================================================================

/// Shallow partial update. Each present part replaces the element's part
/// wholesale; absent parts are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub transform: Option<Transform>,
    pub style: Option<Style>,
    pub properties: Option<Properties>,
    pub kind: Option<ElementKind>,
}

impl ElementPatch {
    #[must_use]
    pub fn transform(transform: Transform) -> Self {
        Self { transform: Some(transform), ..Self::default() }
    }

    #[must_use]
    pub fn style(style: Style) -> Self {
        Self { style: Some(style), ..Self::default() }
    }

    #[must_use]
    pub fn properties(properties: Properties) -> Self {
        Self { properties: Some(properties), ..Self::default() }
    }

    #[must_use]
    pub fn kind(kind: ElementKind) -> Self {
        Self { kind: Some(kind), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transform.is_none() && self.style.is_none() && self.properties.is_none() && self.kind.is_none()
    }

    /// Merge into `element`. The id is never touched.
    pub fn apply_to(self, element: &mut SceneElement) {
        if let Some(transform) = self.transform {
            element.transform = transform;
        }
        if let Some(style) = self.style {
            element.style = Some(style);
        }
        if let Some(properties) = self.properties {
            element.properties = Some(properties);
        }
        if let Some(kind) = self.kind {
            element.kind = kind;
        }
    }
}

// =============================================================================
// WIRE FORMAT
// =============================================================================

#[derive(Deserialize)]
struct WireElement {
    id: ElementId,
    #[serde(rename = "type")]
    element_type: ElementType,
    transform: Transform,
    #[serde(default)]
    style: Option<Style>,
    #[serde(default)]
    properties: Option<Properties>,
    fields: serde_json::Value,
}

impl TryFrom<WireElement> for SceneElement {
    type Error = serde_json::Error;

    fn try_from(wire: WireElement) -> Result<Self, Self::Error> {
        let kind = match wire.element_type {
            ElementType::Text => ElementKind::Text(serde_json::from_value(wire.fields)?),
            ElementType::Shape => ElementKind::Shape(serde_json::from_value(wire.fields)?),
            ElementType::Symbol => ElementKind::Symbol(serde_json::from_value(wire.fields)?),
            ElementType::Image => ElementKind::Image(serde_json::from_value(wire.fields)?),
        };
        Ok(Self {
            id: wire.id,
            kind,
            transform: wire.transform,
            style: wire.style,
            properties: wire.properties,
        })
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum FieldsRef<'a> {
    Text(&'a TextFields),
    Shape(&'a ShapeFields),
    Symbol(&'a SymbolFields),
    Image(&'a ImageFields),
}

#[derive(Serialize)]
struct WireElementRef<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    element_type: ElementType,
    transform: &'a Transform,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Properties>,
    fields: FieldsRef<'a>,
}

impl Serialize for SceneElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = match &self.kind {
            ElementKind::Text(f) => FieldsRef::Text(f),
            ElementKind::Shape(f) => FieldsRef::Shape(f),
            ElementKind::Symbol(f) => FieldsRef::Symbol(f),
            ElementKind::Image(f) => FieldsRef::Image(f),
        };
        WireElementRef {
            id: &self.id,
            element_type: self.element_type(),
            transform: &self.transform,
            style: self.style.as_ref(),
            properties: self.properties.as_ref(),
            fields,
        }
        .serialize(serializer)
    }
}
