//! Clamp solvers: the two independent limits on a proposed translation.
//!
//! [`clamp_to_boundary`] keeps the element inside the surface (or a custom
//! rectangle); [`clamp_to_dimensions`] keeps its width and height inside the
//! configured min/max. Both either shorten the translation or deny it
//! outright when the element is already flush against the limit in the
//! requested direction. Denial is a normal outcome, not an error.

#[cfg(test)]
#[path = "clamp_test.rs"]
mod clamp_test;

use crate::config::{Boundary, Bounds, ResolvedParameters};
use crate::consts::NO_SPACE_TOLERANCE;
use crate::geom::{Rect, clamp_between};
use crate::layout::{Axis, Side};

/// Outcome of a clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clamp {
    /// The element is flush against the limit; no movement at all.
    Denied,
    /// The translation to apply, possibly shortened.
    To(f64),
}

impl Clamp {
    #[must_use]
    pub fn is_denied(self) -> bool {
        matches!(self, Self::Denied)
    }

    /// The translation to apply; zero when denied.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Denied => 0.0,
            Self::To(v) => v,
        }
    }
}

/// What a boundary clamp is moving: the whole element along an axis (drag)
/// or a single edge (resize).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Travel {
    Move(Axis),
    Edge(Side),
}

/// Effective containment rectangle for `element`, or `None` when unbounded.
///
/// `BoundedAtCenter` widens the surface by half the element's own size on
/// every side so that the element's center, not its edge, is what stays in.
#[must_use]
pub fn manipulation_bounds(element: &Rect, params: &ResolvedParameters, surface: &Rect) -> Option<Bounds> {
    let (half_w, half_h) = match params.boundary {
        Boundary::NoBounds => return None,
        Boundary::Custom => return Some(params.custom_boundary),
        Boundary::BoundedAtEdges => (0.0, 0.0),
        Boundary::BoundedAtCenter => (element.width / 2.0, element.height / 2.0),
    };
    Some(Bounds {
        left: surface.left - half_w,
        top: surface.top - half_h,
        right: surface.right() + half_w,
        bottom: surface.bottom() + half_h,
    })
}

/// Clamp `translation` so that `element` stays inside its boundary.
#[must_use]
pub fn clamp_to_boundary(
    travel: Travel,
    translation: f64,
    element: &Rect,
    params: &ResolvedParameters,
    surface: &Rect,
) -> Clamp {
    let Some(bounds) = manipulation_bounds(element, params, surface) else {
        return Clamp::To(translation);
    };

    let no_space_left = element.left <= bounds.left && translation <= 0.0;
    let no_space_top = element.top <= bounds.top && translation <= 0.0;
    let room_right = bounds.right - element.right();
    let room_bottom = bounds.bottom - element.bottom();
    let no_space_right = room_right < NO_SPACE_TOLERANCE && translation >= 0.0;
    let no_space_bottom = room_bottom < NO_SPACE_TOLERANCE && translation >= 0.0;

    let (denied, lo, hi) = match travel {
        Travel::Move(Axis::Horizontal) => (no_space_left || no_space_right, bounds.left - element.left, room_right),
        Travel::Move(Axis::Vertical) => (no_space_top || no_space_bottom, bounds.top - element.top, room_bottom),
        Travel::Edge(Side::Left) => (no_space_left, bounds.left - element.left, element.width),
        Travel::Edge(Side::Right) => (no_space_right, -element.width, room_right),
        Travel::Edge(Side::Top) => (no_space_top, bounds.top - element.top, element.height),
        Travel::Edge(Side::Bottom) => (no_space_bottom, -element.height, room_bottom),
    };

    if denied {
        return Clamp::Denied;
    }
    Clamp::To(clamp_between(translation, lo, hi))
}

/// Clamp `translation` of `side` so that the element's size along that
/// side's axis stays within the configured min/max.
#[must_use]
pub fn clamp_to_dimensions(side: Side, translation: f64, element: &Rect, params: &ResolvedParameters) -> Clamp {
    let (size, min, max) = match side.axis() {
        Axis::Horizontal => (element.width, params.min_width, params.max_width),
        Axis::Vertical => (element.height, params.min_height, params.max_height),
    };

    // Near edges shrink the element when moving forward; far edges grow it.
    let (denied, lo, hi) = if side.is_near() {
        ((size >= max && translation <= 0.0) || (size <= min && translation >= 0.0), size - max, size - min)
    } else {
        ((size <= min && translation <= 0.0) || (size >= max && translation >= 0.0), min - size, max - size)
    };

    if denied {
        return Clamp::Denied;
    }
    Clamp::To(clamp_between(translation, lo, hi))
}
