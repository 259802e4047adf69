#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn rect_edges() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.origin(), Point::new(10.0, 20.0));
    assert_eq!(r.center(), Point::new(25.0, 40.0));
}

#[test]
fn rect_adders_mutate_one_field() {
    let mut r = Rect::new(0.0, 0.0, 10.0, 10.0);
    r.add_left(5.0);
    r.add_top(-2.0);
    r.add_width(3.0);
    r.add_height(-4.0);
    assert_eq!(r, Rect::new(5.0, -2.0, 13.0, 6.0));
}

#[test]
fn clamp_between_inside_interval() {
    assert_eq!(clamp_between(5.0, 0.0, 10.0), 5.0);
    assert_eq!(clamp_between(-5.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp_between(15.0, 0.0, 10.0), 10.0);
}

#[test]
fn clamp_between_inverted_interval_prefers_upper() {
    assert_eq!(clamp_between(5.0, 10.0, 0.0), 0.0);
}

#[test]
fn clamp_between_infinite_bounds() {
    assert_eq!(clamp_between(-1e9, f64::NEG_INFINITY, f64::INFINITY), -1e9);
}

#[test]
fn vector_zero_is_default() {
    assert_eq!(Vector::zero(), Vector::new(0.0, 0.0));
}
