#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn rect(id: &str) -> SceneElement {
    SceneElement::shape(id, ShapeKind::Rectangle, Transform::at(10.0, 20.0).with_size(100.0, 50.0))
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn serializes_type_tag_and_fields() {
    let el = rect("a").with_style(Style { fill: Some("#ff0000".into()), ..Style::default() });
    let value = serde_json::to_value(&el).unwrap();
    assert_eq!(value["id"], "a");
    assert_eq!(value["type"], "shape");
    assert_eq!(value["fields"]["shapeType"], "rectangle");
    assert_eq!(value["transform"]["scaleX"], 1.0);
    assert_eq!(value["transform"]["width"], 100.0);
    assert_eq!(value["style"]["fill"], "#ff0000");
    assert!(value.get("properties").is_none());
    assert!(value["style"].get("strokeWidth").is_none());
}

#[test]
fn deserializes_text_with_defaults() {
    let el: SceneElement = serde_json::from_value(json!({
        "id": "t1",
        "type": "text",
        "transform": { "x": 5, "y": 6 },
        "fields": { "text": "Hello" }
    }))
    .unwrap();
    assert_eq!(el.element_type(), ElementType::Text);
    assert_eq!(el.transform.rotation, 0.0);
    assert_eq!(el.transform.scale_y, 1.0);
    let ElementKind::Text(fields) = &el.kind else {
        panic!("expected text, got {:?}", el.kind);
    };
    assert_eq!(fields.text, "Hello");
    assert_eq!(fields.font_size, 16);
    assert_eq!(fields.font_family, "Arial");
    assert_eq!(fields.text_align, TextAlign::Left);
    assert_eq!(fields.line_height, 1.2);
}

#[test]
fn deserializes_symbol_and_properties() {
    let el: SceneElement = serde_json::from_value(json!({
        "id": "s1",
        "type": "symbol",
        "transform": { "x": 0, "y": 0, "width": 60, "height": 30 },
        "properties": { "locked": true, "name": "Tank", "zIndex": 3 },
        "fields": { "symbol_id": 7 }
    }))
    .unwrap();
    assert_eq!(el.kind, ElementKind::Symbol(SymbolFields { symbol_id: 7 }));
    let props = el.properties.as_ref().unwrap();
    assert!(props.visible);
    assert!(props.locked);
    assert_eq!(props.z_index, 3);
    assert!(el.is_locked());
}

#[test]
fn unknown_type_is_rejected() {
    let result = serde_json::from_value::<SceneElement>(json!({
        "id": "x",
        "type": "video",
        "transform": { "x": 0, "y": 0 },
        "fields": {}
    }));
    assert!(result.is_err());
}

#[test]
fn fields_must_match_type() {
    let result = serde_json::from_value::<SceneElement>(json!({
        "id": "x",
        "type": "symbol",
        "transform": { "x": 0, "y": 0 },
        "fields": { "text": "not a symbol" }
    }));
    assert!(result.is_err());
}

#[test]
fn polygon_points_survive_round_trip() {
    let el = SceneElement::new(
        "p",
        ElementKind::Shape(ShapeFields { shape_type: ShapeKind::Polygon, points: Some(vec![0.0, 0.0, 10.0, 0.0, 5.0, 8.0]) }),
        Transform::at(0.0, 0.0),
    );
    let text = serde_json::to_string(&el).unwrap();
    let back: SceneElement = serde_json::from_str(&text).unwrap();
    assert_eq!(back, el);
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn opacity_defaults_to_opaque() {
    assert_eq!(Style::default().opacity(), 1.0);
    assert_eq!(Style { opacity: Some(0.25), ..Style::default() }.opacity(), 0.25);
}

#[test]
fn cloned_with_offset_keeps_everything_but_id_and_position() {
    let el = rect("a").with_properties(Properties { name: Some("Box".into()), ..Properties::default() });
    let copy = el.cloned_with_offset("b".into(), 20.0, 20.0);
    assert_eq!(copy.id, "b");
    assert_eq!(copy.transform.x, 30.0);
    assert_eq!(copy.transform.y, 40.0);
    assert_eq!(copy.transform.width, Some(100.0));
    assert_eq!(copy.kind, el.kind);
    assert_eq!(copy.properties, el.properties);
}

#[test]
fn patch_replaces_present_parts_only() {
    let mut el = rect("a").with_style(Style { fill: Some("#000".into()), ..Style::default() });
    let patch = ElementPatch::transform(Transform::at(1.0, 2.0));
    assert!(!patch.is_empty());
    patch.apply_to(&mut el);
    assert_eq!(el.id, "a");
    assert_eq!(el.transform, Transform::at(1.0, 2.0));
    assert_eq!(el.style.as_ref().and_then(|s| s.fill.as_deref()), Some("#000"));
}

#[test]
fn empty_patch_is_a_no_op() {
    let mut el = rect("a");
    let before = el.clone();
    let patch = ElementPatch::default();
    assert!(patch.is_empty());
    patch.apply_to(&mut el);
    assert_eq!(el, before);
}

// =============================================================
// Validation
// =============================================================

#[test]
fn color_rules() {
    for ok in ["#fff", "#ff0000", "#ff000080", "rgb(1,2,3)", "rgba(1,2,3,0.5)", "RGB(0,0,0)"] {
        assert!(is_valid_color(ok), "{ok} should be valid");
    }
    for bad in ["red", "#ff", "#ff00", "ff0000", "hsl(0,0%,0%)", ""] {
        assert!(!is_valid_color(bad), "{bad} should be invalid");
    }
}

#[test]
fn valid_elements_pass() {
    assert_eq!(rect("a").validate(), Ok(()));
    assert_eq!(SceneElement::text("t", "hi", Transform::at(0.0, 0.0)).validate(), Ok(()));
    assert_eq!(SceneElement::symbol("s", 1, Transform::at(0.0, 0.0)).validate(), Ok(()));
}

#[test]
fn named_color_fill_is_rejected() {
    let el = rect("a").with_style(Style { fill: Some("red".into()), ..Style::default() });
    assert!(matches!(el.validate(), Err(ValidationError::InvalidColor { field: "fill", .. })));
}

#[test]
fn opacity_and_stroke_width_ranges() {
    let el = rect("a").with_style(Style { opacity: Some(1.5), ..Style::default() });
    assert!(matches!(el.validate(), Err(ValidationError::OutOfRange { field: "opacity", .. })));

    let el = rect("a").with_style(Style { stroke_width: Some(-1.0), ..Style::default() });
    assert!(matches!(el.validate(), Err(ValidationError::OutOfRange { field: "strokeWidth", .. })));
}

#[test]
fn scale_must_be_positive() {
    let mut el = rect("a");
    el.transform.scale_x = 0.0;
    assert!(matches!(el.validate(), Err(ValidationError::OutOfRange { field: "scale", .. })));
}

#[test]
fn text_rules() {
    let empty = SceneElement::text("t", "", Transform::at(0.0, 0.0));
    assert_eq!(empty.validate(), Err(ValidationError::TextLength { id: "t".into() }));

    let long = SceneElement::text("t", "x".repeat(5001), Transform::at(0.0, 0.0));
    assert_eq!(long.validate(), Err(ValidationError::TextLength { id: "t".into() }));

    let tiny = SceneElement::new(
        "t",
        ElementKind::Text(TextFields { font_size: 4, ..TextFields::new("a") }),
        Transform::at(0.0, 0.0),
    );
    assert!(matches!(tiny.validate(), Err(ValidationError::OutOfRange { field: "fontSize", .. })));
}

#[test]
fn line_needs_two_points() {
    let line = |points: Vec<f64>| {
        SceneElement::new(
            "l",
            ElementKind::Shape(ShapeFields { shape_type: ShapeKind::Line, points: Some(points) }),
            Transform::at(0.0, 0.0),
        )
    };
    assert_eq!(line(vec![0.0, 0.0, 1.0]).validate(), Err(ValidationError::Points { id: "l".into() }));
    assert_eq!(line(vec![0.0, 0.0, 1.0, 1.0, 2.0]).validate(), Err(ValidationError::Points { id: "l".into() }));
    assert_eq!(line(vec![0.0, 0.0, 1.0, 1.0]).validate(), Ok(()));
}

#[test]
fn long_name_is_rejected() {
    let el = rect("a").with_properties(Properties { name: Some("n".repeat(101)), ..Properties::default() });
    assert_eq!(el.validate(), Err(ValidationError::NameTooLong { id: "a".into() }));
}

#[test]
fn symbol_id_must_be_positive() {
    let el = SceneElement::symbol("s", 0, Transform::at(0.0, 0.0));
    assert!(matches!(el.validate(), Err(ValidationError::OutOfRange { field: "symbol_id", .. })));
}
