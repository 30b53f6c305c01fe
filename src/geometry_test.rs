#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn point_approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

// --- to_canvas_space ---

#[test]
fn unscaled_canvas_subtracts_offset() {
    let bounds = ClientRect::new(100.0, 50.0, 400.0, 300.0);
    let buffer = PixelSize::new(400, 300);
    let p = to_canvas_space(Point::new(115.0, 65.0), bounds, buffer);
    assert!(point_approx_eq(p, Point::new(15.0, 15.0)));
}

#[test]
fn double_density_scales_both_axes() {
    let bounds = ClientRect::new(0.0, 0.0, 200.0, 100.0);
    let buffer = PixelSize::new(400, 200);
    let p = to_canvas_space(Point::new(30.0, 40.0), bounds, buffer);
    assert!(point_approx_eq(p, Point::new(60.0, 80.0)));
}

#[test]
fn axes_scale_independently() {
    let bounds = ClientRect::new(10.0, 20.0, 100.0, 50.0);
    let buffer = PixelSize::new(300, 100);
    let p = to_canvas_space(Point::new(60.0, 45.0), bounds, buffer);
    assert!(point_approx_eq(p, Point::new(150.0, 50.0)));
}

#[test]
fn matches_ratio_formula_across_sizes() {
    let sizes = [(200.0, 100.0, 200, 100), (150.0, 75.0, 225, 113), (333.0, 111.0, 999, 222)];
    let offsets = [(0.0, 0.0), (12.5, 7.25), (80.0, 40.0)];
    for (w, h, bw, bh) in sizes {
        let bounds = ClientRect::new(5.0, 9.0, w, h);
        let buffer = PixelSize::new(bw, bh);
        for (px, py) in offsets {
            let p = to_canvas_space(Point::new(5.0 + px, 9.0 + py), bounds, buffer);
            let expected = Point::new(px * f64::from(bw) / w, py * f64::from(bh) / h);
            assert!(point_approx_eq(p, expected), "{p:?} != {expected:?}");
        }
    }
}

#[test]
fn pointer_left_of_canvas_is_negative() {
    let bounds = ClientRect::new(100.0, 100.0, 200.0, 200.0);
    let buffer = PixelSize::new(200, 200);
    let p = to_canvas_space(Point::new(90.0, 95.0), bounds, buffer);
    assert!(point_approx_eq(p, Point::new(-10.0, -5.0)));
}

#[test]
fn zero_sized_bounds_do_not_divide_by_zero() {
    let bounds = ClientRect::new(10.0, 10.0, 0.0, 0.0);
    let buffer = PixelSize::new(300, 150);
    let p = to_canvas_space(Point::new(20.0, 30.0), bounds, buffer);
    assert!(p.x.is_finite());
    assert!(p.y.is_finite());
    assert!(point_approx_eq(p, Point::new(10.0, 20.0)));
}
