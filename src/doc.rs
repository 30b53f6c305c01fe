//! Document model: shapes, sparse shape patches, the grid directive and the
//! document the caller pushes into the engine.
//!
//! Shapes travel as JSON objects tagged by `"type"` (`"rect"` or `"circle"`)
//! with camelCase fields. Entries of any other type are carried through as
//! [`Shape::Unsupported`] so a commit hands them back to the caller untouched,
//! but they are never drawn and never hit.
//!
//! List position is the z-order: later shapes paint over earlier ones and win
//! hit-tests. Nothing in this crate reorders a shape list.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::consts::{DEFAULT_FILL, DEFAULT_GRID_COLOR, DEFAULT_GRID_SIZE, DEFAULT_LINE_WIDTH, DEFAULT_STROKE};
use crate::geometry::Point;

/// Shared, identity-comparable shape list.
///
/// The engine detects a new document by pointer identity (`Rc::ptr_eq`), never
/// by deep comparison.
pub type ShapeList = Rc<Vec<Shape>>;

/// Identifier of a shape, unique within a document. Integer or string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ShapeId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for ShapeId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectShape {
    pub id: ShapeId,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Legacy fill key. Used when `fillColor` is absent and written back
    /// under the same name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Caller fields this engine does not model, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleShape {
    pub id: ShapeId,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Legacy fill key. Used when `fillColor` is absent and written back
    /// under the same name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Caller fields this engine does not model, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A shape on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(RectShape),
    Circle(CircleShape),
    /// A shape kind this engine does not know, kept verbatim.
    Unsupported(Value),
}

/// Serialization view that restores the `"type"` tag.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedShape<'a> {
    Rect(&'a RectShape),
    Circle(&'a CircleShape),
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Rect(rect) => TaggedShape::Rect(rect).serialize(serializer),
            Self::Circle(circle) => TaggedShape::Circle(circle).serialize(serializer),
            Self::Unsupported(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_value(raw))
    }
}

impl Shape {
    /// Decode one shape entry. Never fails: unknown kinds and malformed
    /// entries become [`Shape::Unsupported`].
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let decoded = match raw.get("type").and_then(Value::as_str) {
            Some("rect") => RectShape::deserialize(&raw).map(|mut r| {
                r.extra.remove("type");
                Self::Rect(r)
            }),
            Some("circle") => CircleShape::deserialize(&raw).map(|mut c| {
                c.extra.remove("type");
                Self::Circle(c)
            }),
            _ => return Self::Unsupported(raw),
        };
        match decoded {
            Ok(shape) => shape,
            Err(err) => {
                log::warn!("shape entry could not be decoded, keeping it undrawn: {err}");
                Self::Unsupported(raw)
            }
        }
    }

    /// The shape's id. Unsupported shapes have none the engine can act on.
    #[must_use]
    pub fn id(&self) -> Option<&ShapeId> {
        match self {
            Self::Rect(r) => Some(&r.id),
            Self::Circle(c) => Some(&c.id),
            Self::Unsupported(_) => None,
        }
    }

    /// Anchor position: top-left for rectangles, center for circles.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Self::Rect(r) => Some(Point::new(r.x, r.y)),
            Self::Circle(c) => Some(Point::new(c.x, c.y)),
            Self::Unsupported(_) => None,
        }
    }

    /// Fill and stroke settings with defaults applied.
    #[must_use]
    pub fn style(&self) -> Option<Style<'_>> {
        match self {
            Self::Rect(r) => {
                let fill = r.fill_color.as_deref().or(r.color.as_deref());
                Some(Style::new(fill, r.stroke_color.as_deref(), r.stroke_width))
            }
            Self::Circle(c) => {
                let fill = c.fill_color.as_deref().or(c.color.as_deref());
                Some(Style::new(fill, c.stroke_color.as_deref(), c.stroke_width))
            }
            Self::Unsupported(_) => None,
        }
    }

    /// Shallow-merge `patch` into this shape. Fields that do not apply to the
    /// variant (a radius on a rectangle, say) are ignored.
    pub fn apply(&mut self, patch: &ShapePatch) {
        match self {
            Self::Rect(r) => {
                merge(&mut r.x, patch.x);
                merge(&mut r.y, patch.y);
                merge(&mut r.width, patch.width);
                merge(&mut r.height, patch.height);
                merge_style(&mut r.fill_color, &mut r.color, &mut r.stroke_color, &mut r.stroke_width, patch);
            }
            Self::Circle(c) => {
                merge(&mut c.x, patch.x);
                merge(&mut c.y, patch.y);
                merge(&mut c.radius, patch.radius);
                merge_style(&mut c.fill_color, &mut c.color, &mut c.stroke_color, &mut c.stroke_width, patch);
            }
            Self::Unsupported(_) => {}
        }
    }
}

fn merge(field: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *field = v;
    }
}

/// A new fill goes under whichever key the shape already uses.
fn merge_style(
    fill: &mut Option<String>,
    legacy_fill: &mut Option<String>,
    stroke: &mut Option<String>,
    stroke_width: &mut Option<f64>,
    patch: &ShapePatch,
) {
    if let Some(ref f) = patch.fill_color {
        if fill.is_none() && legacy_fill.is_some() {
            *legacy_fill = Some(f.clone());
        } else {
            *fill = Some(f.clone());
        }
    }
    if let Some(ref s) = patch.stroke_color {
        *stroke = Some(s.clone());
    }
    if let Some(w) = patch.stroke_width {
        *stroke_width = Some(w);
    }
}

/// Resolved paint settings for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style<'a> {
    pub fill: &'a str,
    pub stroke: &'a str,
    pub line_width: f64,
    /// Whether a stroke pass is drawn. Only a non-zero `strokeWidth` enables it.
    pub stroked: bool,
}

impl<'a> Style<'a> {
    fn new(fill: Option<&'a str>, stroke: Option<&'a str>, stroke_width: Option<f64>) -> Self {
        let stroked = stroke_width.is_some_and(|w| w != 0.0 && !w.is_nan());
        Self {
            fill: fill.unwrap_or(DEFAULT_FILL),
            stroke: stroke.unwrap_or(DEFAULT_STROKE),
            line_width: if stroked { stroke_width.unwrap_or(DEFAULT_LINE_WIDTH) } else { DEFAULT_LINE_WIDTH },
            stroked,
        }
    }
}

/// Sparse update for a shape. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl ShapePatch {
    /// A patch that moves a shape's anchor to `to`.
    #[must_use]
    pub fn anchor(to: Point) -> Self {
        Self { x: Some(to.x), y: Some(to.y), ..Default::default() }
    }
}

/// Background grid directive. Affects rendering only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub show: bool,
    #[serde(default = "default_grid_size")]
    pub size: f64,
    #[serde(default = "default_grid_color")]
    pub color: String,
}

fn default_grid_size() -> f64 {
    DEFAULT_GRID_SIZE
}

fn default_grid_color() -> String {
    DEFAULT_GRID_COLOR.to_owned()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: false, size: DEFAULT_GRID_SIZE, color: default_grid_color() }
    }
}

impl GridConfig {
    /// Line spacing, falling back to the default for zero, negative or
    /// non-finite sizes.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        if self.size > 0.0 && self.size.is_finite() {
            self.size
        } else {
            DEFAULT_GRID_SIZE
        }
    }

    /// Line color, falling back to the default for an empty string.
    #[must_use]
    pub fn line_color(&self) -> &str {
        if self.color.is_empty() {
            DEFAULT_GRID_COLOR
        } else {
            &self.color
        }
    }
}

/// What the caller pushes into the engine on every change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub shapes: ShapeList,
    #[serde(default)]
    pub grid: GridConfig,
}

impl Document {
    #[must_use]
    pub fn new(shapes: Vec<Shape>, grid: GridConfig) -> Self {
        Self { shapes: Rc::new(shapes), grid }
    }
}
