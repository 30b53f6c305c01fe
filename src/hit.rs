#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::Shape;
use crate::geometry::Point;

/// Return the topmost shape containing `pt`, if any.
///
/// Walks the list from last to first so the result matches paint order: the
/// shape drawn last is the one the user sees and grabs.
#[must_use]
pub fn hit_test(shapes: &[Shape], pt: Point) -> Option<&Shape> {
    shapes.iter().rev().find(|shape| contains(shape, pt))
}

/// Whether `pt` lies inside `shape`.
///
/// Rectangles use an inclusive bounds check. Circles compare squared distance
/// to the squared radius. Unsupported shapes and negative radii contain nothing.
#[must_use]
pub fn contains(shape: &Shape, pt: Point) -> bool {
    match shape {
        Shape::Rect(r) => pt.x >= r.x && pt.x <= r.x + r.width && pt.y >= r.y && pt.y <= r.y + r.height,
        Shape::Circle(c) => {
            if c.radius < 0.0 {
                return false;
            }
            let dx = pt.x - c.x;
            let dy = pt.y - c.y;
            dx * dx + dy * dy <= c.radius * c.radius
        }
        Shape::Unsupported(_) => false,
    }
}
