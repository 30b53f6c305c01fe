#![allow(clippy::float_cmp)]

use serde_json::{Map, json};

use super::*;

fn rect(id: i64, x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::Rect(RectShape {
        id: ShapeId::Int(id),
        x,
        y,
        width: w,
        height: h,
        fill_color: None,
        stroke_color: None,
        stroke_width: None,
        color: None,
        extra: Map::new(),
    })
}

fn circle(id: &str, x: f64, y: f64, r: f64) -> Shape {
    Shape::Circle(CircleShape {
        id: ShapeId::from(id),
        x,
        y,
        radius: r,
        fill_color: Some("#f00".into()),
        stroke_color: None,
        stroke_width: Some(2.0),
        color: None,
        extra: Map::new(),
    })
}

// =============================================================
// ShapeId
// =============================================================

#[test]
fn id_accepts_integer_and_string() {
    let n: ShapeId = serde_json::from_value(json!(7)).unwrap();
    let s: ShapeId = serde_json::from_value(json!("a7")).unwrap();
    assert_eq!(n, ShapeId::Int(7));
    assert_eq!(s, ShapeId::Text("a7".into()));
}

#[test]
fn id_display() {
    assert_eq!(ShapeId::Int(42).to_string(), "42");
    assert_eq!(ShapeId::from("wall-3").to_string(), "wall-3");
}

// =============================================================
// Shape decoding
// =============================================================

#[test]
fn decode_rect() {
    let shape: Shape = serde_json::from_value(json!({
        "id": 1, "type": "rect", "x": 10, "y": 20, "width": 30, "height": 40,
        "fillColor": "#abc", "strokeColor": "#def", "strokeWidth": 3
    }))
    .unwrap();
    let Shape::Rect(r) = shape else {
        panic!("expected rect, got {shape:?}");
    };
    assert_eq!(r.id, ShapeId::Int(1));
    assert_eq!((r.x, r.y, r.width, r.height), (10.0, 20.0, 30.0, 40.0));
    assert_eq!(r.fill_color.as_deref(), Some("#abc"));
    assert_eq!(r.stroke_color.as_deref(), Some("#def"));
    assert_eq!(r.stroke_width, Some(3.0));
}

#[test]
fn decode_circle() {
    let shape: Shape =
        serde_json::from_value(json!({ "id": "c", "type": "circle", "x": 5, "y": 6, "radius": 7 })).unwrap();
    let Shape::Circle(c) = shape else {
        panic!("expected circle, got {shape:?}");
    };
    assert_eq!(c.id, ShapeId::from("c"));
    assert_eq!((c.x, c.y, c.radius), (5.0, 6.0, 7.0));
    assert!(c.fill_color.is_none());
}

#[test]
fn legacy_color_key_is_fill() {
    let shape: Shape =
        serde_json::from_value(json!({ "id": 1, "type": "rect", "x": 0, "y": 0, "width": 1, "height": 1, "color": "blue" }))
            .unwrap();
    assert_eq!(shape.style().unwrap().fill, "blue");
}

#[test]
fn missing_extent_defaults_to_zero() {
    let shape: Shape = serde_json::from_value(json!({ "id": 1, "type": "circle" })).unwrap();
    assert_eq!(shape, Shape::Circle(CircleShape {
        id: ShapeId::Int(1),
        x: 0.0,
        y: 0.0,
        radius: 0.0,
        fill_color: None,
        stroke_color: None,
        stroke_width: None,
        color: None,
        extra: Map::new(),
    }));
}

#[test]
fn unknown_kind_is_unsupported() {
    let raw = json!({ "id": 9, "type": "polygon", "points": [[0, 0], [1, 1]] });
    let shape: Shape = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(shape, Shape::Unsupported(raw));
    assert!(shape.id().is_none());
    assert!(shape.anchor().is_none());
    assert!(shape.style().is_none());
}

#[test]
fn missing_type_is_unsupported() {
    let raw = json!({ "id": 9, "x": 1 });
    let shape = Shape::from_value(raw.clone());
    assert_eq!(shape, Shape::Unsupported(raw));
}

#[test]
fn malformed_known_kind_is_unsupported() {
    let raw = json!({ "type": "rect", "x": 1, "y": 1, "width": 2, "height": 2 });
    let shape = Shape::from_value(raw.clone());
    assert_eq!(shape, Shape::Unsupported(raw));
}

// =============================================================
// Shape encoding
// =============================================================

#[test]
fn encode_rect_restores_type_tag() {
    let value = serde_json::to_value(rect(1, 10.0, 10.0, 20.0, 20.0)).unwrap();
    assert_eq!(value, json!({ "type": "rect", "id": 1, "x": 10.0, "y": 10.0, "width": 20.0, "height": 20.0 }));
}

#[test]
fn encode_circle_uses_camel_case() {
    let value = serde_json::to_value(circle("c1", 1.0, 2.0, 3.0)).unwrap();
    assert_eq!(value["type"], "circle");
    assert_eq!(value["fillColor"], "#f00");
    assert_eq!(value["strokeWidth"], 2.0);
    assert!(value.get("strokeColor").is_none());
}

#[test]
fn unknown_fields_survive_encode() {
    let raw = json!({
        "id": 1, "type": "rect", "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0,
        "label": "door", "meta": { "layer": 3 }
    });
    let shape = Shape::from_value(raw.clone());
    let Shape::Rect(ref r) = shape else {
        panic!("expected rect, got {shape:?}");
    };
    assert_eq!(r.extra.get("label"), Some(&json!("door")));
    assert!(r.extra.get("type").is_none());
    assert_eq!(serde_json::to_value(&shape).unwrap(), raw);
}

#[test]
fn legacy_color_key_is_written_back_as_is() {
    let raw = json!({ "id": 2, "type": "circle", "x": 5.0, "y": 5.0, "radius": 1.0, "color": "red" });
    let value = serde_json::to_value(Shape::from_value(raw.clone())).unwrap();
    assert_eq!(value, raw);
    assert!(value.get("fillColor").is_none());
}

#[test]
fn fill_patch_keeps_legacy_key() {
    let mut shape = Shape::from_value(json!({ "id": 2, "type": "circle", "radius": 1.0, "color": "red" }));
    shape.apply(&ShapePatch { fill_color: Some("green".into()), ..Default::default() });
    let value = serde_json::to_value(&shape).unwrap();
    assert_eq!(value["color"], "green");
    assert!(value.get("fillColor").is_none());
    assert_eq!(shape.style().unwrap().fill, "green");
}

#[test]
fn fill_color_wins_over_legacy_key() {
    let shape = Shape::from_value(json!({ "id": 1, "type": "rect", "width": 1, "height": 1, "fillColor": "#abc", "color": "blue" }));
    assert_eq!(shape.style().unwrap().fill, "#abc");
}

#[test]
fn unsupported_survives_encode() {
    let raw = json!({ "id": "t", "type": "text", "body": "hello" });
    let value = serde_json::to_value(Shape::from_value(raw.clone())).unwrap();
    assert_eq!(value, raw);
}

#[test]
fn document_preserves_list_order() {
    let doc: Document = serde_json::from_value(json!({
        "shapes": [
            { "id": 3, "type": "rect" },
            { "id": 1, "type": "circle" },
            { "id": 2, "type": "rect" }
        ]
    }))
    .unwrap();
    let ids: Vec<_> = doc.shapes.iter().filter_map(Shape::id).cloned().collect();
    assert_eq!(ids, vec![ShapeId::Int(3), ShapeId::Int(1), ShapeId::Int(2)]);
}

// =============================================================
// Shape accessors and patches
// =============================================================

#[test]
fn anchor_is_top_left_or_center() {
    assert_eq!(rect(1, 3.0, 4.0, 10.0, 10.0).anchor(), Some(Point::new(3.0, 4.0)));
    assert_eq!(circle("c", 5.0, 6.0, 2.0).anchor(), Some(Point::new(5.0, 6.0)));
}

#[test]
fn apply_anchor_patch_moves_rect() {
    let mut shape = rect(1, 0.0, 0.0, 10.0, 10.0);
    shape.apply(&ShapePatch::anchor(Point::new(7.0, 8.0)));
    assert_eq!(shape, rect(1, 7.0, 8.0, 10.0, 10.0));
}

#[test]
fn apply_ignores_fields_for_other_variant() {
    let mut shape = rect(1, 0.0, 0.0, 10.0, 10.0);
    shape.apply(&ShapePatch { radius: Some(99.0), ..Default::default() });
    assert_eq!(shape, rect(1, 0.0, 0.0, 10.0, 10.0));

    let mut c = circle("c", 0.0, 0.0, 5.0);
    c.apply(&ShapePatch { width: Some(99.0), radius: Some(6.0), ..Default::default() });
    let Shape::Circle(inner) = c else {
        panic!("expected circle");
    };
    assert_eq!(inner.radius, 6.0);
}

#[test]
fn apply_merges_style() {
    let mut shape = circle("c", 0.0, 0.0, 5.0);
    shape.apply(&ShapePatch { stroke_color: Some("#123".into()), ..Default::default() });
    let style = shape.style().unwrap();
    assert_eq!(style.fill, "#f00");
    assert_eq!(style.stroke, "#123");
    assert_eq!(style.line_width, 2.0);
}

#[test]
fn apply_on_unsupported_is_noop() {
    let raw = json!({ "type": "star" });
    let mut shape = Shape::Unsupported(raw.clone());
    shape.apply(&ShapePatch::anchor(Point::new(1.0, 1.0)));
    assert_eq!(shape, Shape::Unsupported(raw));
}

// =============================================================
// Style defaults
// =============================================================

#[test]
fn style_defaults() {
    let shape = rect(1, 0.0, 0.0, 1.0, 1.0);
    let style = shape.style().unwrap();
    assert_eq!(style.fill, DEFAULT_FILL);
    assert_eq!(style.stroke, DEFAULT_STROKE);
    assert_eq!(style.line_width, DEFAULT_LINE_WIDTH);
    assert!(!style.stroked);
}

#[test]
fn zero_stroke_width_is_not_stroked() {
    let mut shape = rect(1, 0.0, 0.0, 1.0, 1.0);
    shape.apply(&ShapePatch { stroke_width: Some(0.0), ..Default::default() });
    let style = shape.style().unwrap();
    assert!(!style.stroked);
    assert_eq!(style.line_width, DEFAULT_LINE_WIDTH);
}

// =============================================================
// GridConfig and Document
// =============================================================

#[test]
fn grid_defaults_when_fields_missing() {
    let grid: GridConfig = serde_json::from_value(json!({ "show": true })).unwrap();
    assert!(grid.show);
    assert_eq!(grid.size, 50.0);
    assert_eq!(grid.color, "#eee");
}

#[test]
fn grid_spacing_falls_back_for_bad_sizes() {
    for size in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let grid = GridConfig { size, ..Default::default() };
        assert_eq!(grid.spacing(), DEFAULT_GRID_SIZE);
    }
    let grid = GridConfig { size: 25.0, ..Default::default() };
    assert_eq!(grid.spacing(), 25.0);
}

#[test]
fn grid_empty_color_falls_back() {
    let grid = GridConfig { color: String::new(), ..Default::default() };
    assert_eq!(grid.line_color(), DEFAULT_GRID_COLOR);
}

#[test]
fn document_defaults_when_empty() {
    let doc: Document = serde_json::from_value(json!({})).unwrap();
    assert!(doc.shapes.is_empty());
    assert!(!doc.grid.show);
}

#[test]
fn document_new_wraps_list() {
    let doc = Document::new(vec![rect(1, 0.0, 0.0, 1.0, 1.0)], GridConfig::default());
    assert_eq!(doc.shapes.len(), 1);
}
