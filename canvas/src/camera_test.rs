#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Viewport ---

#[test]
fn default_viewport_is_zoomed_out() {
    let vp = Viewport::default();
    assert_eq!(vp.scale, 0.6);
    assert_eq!(vp.x, 0.0);
    assert_eq!(vp.y, 0.0);
}

#[test]
fn screen_to_world_divides_out_scale_and_offset() {
    let vp = Viewport { scale: 2.0, x: 10.0, y: 20.0 };
    let world = vp.screen_to_world(Point::new(110.0, 220.0));
    assert!(point_approx_eq(world, Point::new(50.0, 100.0)));
}

#[test]
fn world_screen_round_trip() {
    let vp = Viewport { scale: 0.75, x: -40.0, y: 13.0 };
    let p = Point::new(123.0, -45.5);
    assert!(point_approx_eq(vp.screen_to_world(vp.world_to_screen(p)), p));
}

#[test]
fn wheel_up_zooms_in_by_factor() {
    let mut vp = Viewport { scale: 1.0, x: 0.0, y: 0.0 };
    vp.zoom_at(Point::new(0.0, 0.0), -100.0);
    assert!(approx_eq(vp.scale, 1.1));
    vp.zoom_at(Point::new(0.0, 0.0), 100.0);
    assert!(approx_eq(vp.scale, 1.0));
}

#[test]
fn zoom_keeps_pointer_anchored() {
    let mut vp = Viewport { scale: 0.6, x: 30.0, y: -10.0 };
    let pointer = Point::new(400.0, 300.0);
    let before = vp.screen_to_world(pointer);
    vp.zoom_at(pointer, -1.0);
    vp.zoom_at(pointer, -1.0);
    vp.zoom_at(pointer, 1.0);
    assert!(point_approx_eq(vp.screen_to_world(pointer), before));
}

#[test]
fn pan_shifts_offset() {
    let mut vp = Viewport::default();
    vp.pan_by(15.0, -5.0);
    assert_eq!((vp.x, vp.y), (15.0, -5.0));
    assert_eq!(vp.scale, 0.6);
}
