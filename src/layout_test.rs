#![allow(clippy::float_cmp)]

use super::*;
use crate::config::{Appearance, ResolvedAppearance};

fn appearance(thickness: f64) -> ResolvedAppearance {
    Appearance { thickness: Some(thickness), ..Appearance::default() }
        .resolve(Orientation::Resize(HandlePosition::Top))
}

fn all_handles(thickness: f64) -> [Option<ResolvedAppearance>; 8] {
    std::array::from_fn(|_| Some(appearance(thickness)))
}

fn full_frame() -> Frame {
    Frame::new(Rect::new(100.0, 100.0, 200.0, 100.0), &all_handles(8.0), 1)
}

fn rect_of(frame: &Frame, position: HandlePosition) -> Rect {
    frame.handles.get(position).map(|h| h.rect).unwrap_or_default()
}

// =============================================================
// HandlePosition
// =============================================================

#[test]
fn handle_position_index_matches_slot_order() {
    for (i, position) in HandlePosition::ALL.iter().enumerate() {
        assert_eq!(position.index(), i);
    }
}

#[test]
fn handle_position_edges_and_corners_are_disjoint() {
    for position in HandlePosition::ALL {
        assert_ne!(position.edge().is_some(), position.corner_edges().is_some());
    }
}

#[test]
fn corner_edges_pair_horizontal_with_vertical() {
    assert_eq!(HandlePosition::TopRight.corner_edges(), Some((Side::Right, Side::Top)));
    assert_eq!(HandlePosition::BottomLeft.corner_edges(), Some((Side::Left, Side::Bottom)));
    for position in HandlePosition::ALL {
        if let Some((h, v)) = position.corner_edges() {
            assert_eq!(h.axis(), Axis::Horizontal);
            assert_eq!(v.axis(), Axis::Vertical);
        }
    }
}

#[test]
fn touches_top_and_left() {
    assert!(HandlePosition::TopLeft.touches_top());
    assert!(HandlePosition::TopLeft.touches_left());
    assert!(!HandlePosition::BottomRight.touches_top());
    assert!(!HandlePosition::BottomRight.touches_left());
    assert!(HandlePosition::TopRight.touches_top());
    assert!(!HandlePosition::TopRight.touches_left());
}

#[test]
fn handle_position_parses_snake_case() {
    let p: HandlePosition = serde_json::from_str("\"bottom_right\"").unwrap();
    assert_eq!(p, HandlePosition::BottomRight);
}

// =============================================================
// Orientation / DragOrientation
// =============================================================

#[test]
fn orientation_parses_either_kind() {
    let o: Orientation = serde_json::from_str("\"top_left\"").unwrap();
    assert_eq!(o, Orientation::Resize(HandlePosition::TopLeft));
    let o: Orientation = serde_json::from_str("\"horizontal\"").unwrap();
    assert_eq!(o, Orientation::Drag(DragOrientation::Horizontal));
    assert!(serde_json::from_str::<Orientation>("\"sideways\"").is_err());
}

#[test]
fn drag_orientation_covering() {
    assert_eq!(DragOrientation::covering(1.0, 1.0), Some(DragOrientation::Both));
    assert_eq!(DragOrientation::covering(-1.0, 0.0), Some(DragOrientation::Horizontal));
    assert_eq!(DragOrientation::covering(0.0, 2.0), Some(DragOrientation::Vertical));
    assert_eq!(DragOrientation::covering(0.0, 0.0), None);
}

#[test]
fn drag_orientation_axes() {
    assert!(DragOrientation::Both.moves_horizontally());
    assert!(DragOrientation::Both.moves_vertically());
    assert!(!DragOrientation::Horizontal.moves_vertically());
    assert!(!DragOrientation::Vertical.moves_horizontally());
}

// =============================================================
// Side
// =============================================================

#[test]
fn side_opposites() {
    for side in [Side::Top, Side::Right, Side::Bottom, Side::Left] {
        assert_eq!(side.opposite().opposite(), side);
        assert_eq!(side.opposite().axis(), side.axis());
        assert_ne!(side.opposite().is_near(), side.is_near());
    }
}

#[test]
fn cross_pair_is_perpendicular_near_first() {
    assert_eq!(Side::Left.cross_pair(), (Side::Top, Side::Bottom));
    assert_eq!(Side::Bottom.cross_pair(), (Side::Left, Side::Right));
    for side in [Side::Top, Side::Right, Side::Bottom, Side::Left] {
        let (near, far) = side.cross_pair();
        assert!(near.is_near());
        assert!(!far.is_near());
        assert_ne!(near.axis(), side.axis());
    }
}

// =============================================================
// handle_rect / Frame::new
// =============================================================

#[test]
fn edge_handles_span_side_centered_on_edge() {
    let c = Rect::new(100.0, 100.0, 200.0, 100.0);
    assert_eq!(handle_rect(&c, HandlePosition::Top, 8.0), Rect::new(100.0, 96.0, 200.0, 8.0));
    assert_eq!(handle_rect(&c, HandlePosition::Bottom, 8.0), Rect::new(100.0, 196.0, 200.0, 8.0));
    assert_eq!(handle_rect(&c, HandlePosition::Left, 8.0), Rect::new(96.0, 100.0, 8.0, 100.0));
    assert_eq!(handle_rect(&c, HandlePosition::Right, 8.0), Rect::new(296.0, 100.0, 8.0, 100.0));
}

#[test]
fn corner_handles_are_squares_centered_on_corner() {
    let c = Rect::new(100.0, 100.0, 200.0, 100.0);
    assert_eq!(handle_rect(&c, HandlePosition::TopLeft, 10.0), Rect::new(95.0, 95.0, 10.0, 10.0));
    assert_eq!(handle_rect(&c, HandlePosition::BottomRight, 10.0), Rect::new(295.0, 195.0, 10.0, 10.0));
    let center = handle_rect(&c, HandlePosition::TopRight, 10.0).center();
    assert_eq!((center.x, center.y), (c.right(), c.top));
}

#[test]
fn frame_skips_absent_slots() {
    let mut appearances: [Option<ResolvedAppearance>; 8] = Default::default();
    appearances[HandlePosition::Left.index()] = Some(appearance(6.0));
    let frame = Frame::new(Rect::new(0.0, 0.0, 50.0, 50.0), &appearances, 3);
    assert_eq!(frame.handles.len(), 1);
    assert!(frame.handles.contains(HandlePosition::Left));
    assert!(!frame.handles.contains(HandlePosition::Right));
    assert_eq!(frame.handles.get(HandlePosition::Left).map(|h| h.z_index), Some(3));
}

#[test]
fn frame_with_no_handles_is_empty() {
    let frame = Frame::new(Rect::new(0.0, 0.0, 10.0, 10.0), &Default::default(), 1);
    assert!(frame.handles.is_empty());
    assert_eq!(frame.drag_band(), frame.container);
}

// =============================================================
// Frame mutation
// =============================================================

#[test]
fn translate_moves_everything() {
    let mut frame = full_frame();
    let before = frame.clone();
    frame.translate(Axis::Horizontal, -30.0);
    assert_eq!(frame.container.left, 70.0);
    for position in HandlePosition::ALL {
        let (a, b) = (rect_of(&before, position), rect_of(&frame, position));
        assert_eq!(b.left, a.left - 30.0);
        assert_eq!(b.top, a.top);
        assert_eq!(b.width, a.width);
    }
}

#[test]
fn move_right_edge_grows_and_shifts_dependents() {
    let mut frame = full_frame();
    frame.move_edge(Side::Right, 20.0);
    assert_eq!(frame.container, Rect::new(100.0, 100.0, 220.0, 100.0));
    assert_eq!(rect_of(&frame, HandlePosition::Top).width, 220.0);
    assert_eq!(rect_of(&frame, HandlePosition::Bottom).width, 220.0);
    assert_eq!(rect_of(&frame, HandlePosition::Right).left, 316.0);
    assert_eq!(rect_of(&frame, HandlePosition::TopRight).left, 316.0);
    assert_eq!(rect_of(&frame, HandlePosition::BottomRight).left, 316.0);
    assert_eq!(rect_of(&frame, HandlePosition::Left).left, 96.0);
}

#[test]
fn move_left_edge_shrinks_and_shifts_five_handles() {
    let mut frame = full_frame();
    frame.move_edge(Side::Left, 50.0);
    assert_eq!(frame.container, Rect::new(150.0, 100.0, 150.0, 100.0));
    assert_eq!(rect_of(&frame, HandlePosition::Left).left, 146.0);
    assert_eq!(rect_of(&frame, HandlePosition::TopLeft).left, 146.0);
    assert_eq!(rect_of(&frame, HandlePosition::BottomLeft).left, 146.0);
    assert_eq!(rect_of(&frame, HandlePosition::Top), Rect::new(150.0, 96.0, 150.0, 8.0));
    assert_eq!(rect_of(&frame, HandlePosition::Bottom), Rect::new(150.0, 196.0, 150.0, 8.0));
    assert_eq!(rect_of(&frame, HandlePosition::Right).left, 296.0);
}

#[test]
fn move_top_edge_keeps_handles_on_container() {
    let mut frame = full_frame();
    frame.move_edge(Side::Top, -10.0);
    assert_eq!(frame.container, Rect::new(100.0, 90.0, 200.0, 110.0));
    assert_eq!(rect_of(&frame, HandlePosition::Top).top, 86.0);
    assert_eq!(rect_of(&frame, HandlePosition::Left), Rect::new(96.0, 90.0, 8.0, 110.0));
    assert_eq!(rect_of(&frame, HandlePosition::Right), Rect::new(296.0, 90.0, 8.0, 110.0));
    assert_eq!(rect_of(&frame, HandlePosition::Bottom).top, 196.0);
}

#[test]
fn moved_frame_matches_fresh_layout() {
    let mut frame = full_frame();
    frame.move_edge(Side::Bottom, 25.0);
    frame.move_edge(Side::Left, -15.0);
    frame.translate(Axis::Vertical, 7.0);
    let fresh = Frame::new(frame.container, &all_handles(8.0), 1);
    assert_eq!(frame, fresh);
}

#[test]
fn set_z_index_mirrors_onto_handles() {
    let mut frame = full_frame();
    frame.set_z_index(9);
    assert!(frame.handles.iter().all(|h| h.z_index == 9));
}
