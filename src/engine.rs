//! Manipulation delta engine: turns one raw translation from a drag band or
//! resize handle into the legal, clamped change of an entity's [`Frame`].
//!
//! DESIGN
//! ======
//! Every step is a pure synchronous computation followed by a mutation of
//! the frame. Size limits are consulted before the boundary, so a min/max
//! always wins over containment. Coupled moves (aspect-ratio lock) are
//! clamped as a unit: if the coupled axis is shortened, the primary axis is
//! rescaled to match before anything is applied, and if either side is
//! denied nothing is applied at all.
//!
//! Single edges and corners share the same helpers: [`clamp_edge`] for the
//! dimension-then-boundary chain, [`Side::cross_pair`] for the opposite pair
//! that follows an edge under the lock, and [`corner_parity`] for the sign
//! flip of the anti-diagonal corners.
//!
//! The aspect-ratio lock reads the live `width / height` on every step
//! rather than storing a ratio when the lock is turned on. Each locked step
//! preserves the ratio it started from, so the live value stays equal to the
//! one in force when locking began, and a ratio set while unlocked (for
//! example by `Registry::set_aspect_ratio`) is picked up without extra state.
//!
//! Non-finite translation components (NaN, ±∞) mean no movement on that
//! axis; they never reach the clamp solvers.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, trace, warn};

use crate::clamp::{Clamp, Travel, clamp_to_boundary, clamp_to_dimensions};
use crate::config::ResolvedParameters;
use crate::geom::{Rect, Vector};
use crate::layout::{Axis, DragOrientation, Frame, HandlePosition, Side};

/// Result of one manipulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manipulation {
    /// Container rect after the step.
    pub rect: Rect,
    /// Translation actually applied along each primary axis, after clamping.
    pub translation: Vector,
}

impl Manipulation {
    fn unchanged(rect: Rect) -> Self {
        Self { rect, translation: Vector::zero() }
    }
}

/// Zero out non-finite components.
fn finite_components(translation: Vector) -> Vector {
    if translation.dx.is_finite() && translation.dy.is_finite() {
        return translation;
    }
    warn!(dx = translation.dx, dy = translation.dy, "ignoring non-finite translation component");
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    Vector::new(finite(translation.dx), finite(translation.dy))
}

// =============================================================================
// DRAG
// =============================================================================

/// Move the whole frame. Each enabled axis is clamped against the boundary
/// independently; a denial on one axis never blocks the other.
pub fn drag(
    frame: &mut Frame,
    orientation: DragOrientation,
    translation: Vector,
    params: &ResolvedParameters,
    surface: &Rect,
) -> Manipulation {
    trace!(?orientation, dx = translation.dx, dy = translation.dy, "drag delta");
    let translation = finite_components(translation);
    let element = frame.container;

    let dx = if orientation.moves_horizontally() {
        clamp_to_boundary(Travel::Move(Axis::Horizontal), translation.dx, &element, params, surface)
    } else {
        Clamp::Denied
    };
    let dy = if orientation.moves_vertically() {
        clamp_to_boundary(Travel::Move(Axis::Vertical), translation.dy, &element, params, surface)
    } else {
        Clamp::Denied
    };

    if let Clamp::To(v) = dx {
        frame.translate(Axis::Horizontal, v);
    }
    if let Clamp::To(v) = dy {
        frame.translate(Axis::Vertical, v);
    }
    if dx.is_denied() && dy.is_denied() {
        debug!(?orientation, "drag denied on both axes");
    }

    Manipulation { rect: frame.container, translation: Vector::new(dx.value(), dy.value()) }
}

// =============================================================================
// RESIZE
// =============================================================================

/// Resize the frame from the handle at `position`.
pub fn resize(
    frame: &mut Frame,
    position: HandlePosition,
    translation: Vector,
    params: &ResolvedParameters,
    surface: &Rect,
) -> Manipulation {
    trace!(?position, dx = translation.dx, dy = translation.dy, "resize delta");
    let translation = finite_components(translation);
    if let Some(side) = position.edge() {
        return resize_edge(frame, side, translation, params, surface);
    }
    match position.corner_edges() {
        Some((horizontal, vertical)) => {
            resize_corner(frame, horizontal, vertical, corner_parity(position), translation, params, surface)
        }
        None => Manipulation::unchanged(frame.container),
    }
}

/// Dimension clamp, then boundary clamp, for one edge.
fn clamp_edge(side: Side, translation: f64, element: &Rect, params: &ResolvedParameters, surface: &Rect) -> Clamp {
    match clamp_to_dimensions(side, translation, element, params) {
        Clamp::Denied => Clamp::Denied,
        Clamp::To(t) => clamp_to_boundary(Travel::Edge(side), t, element, params, surface),
    }
}

/// Sign relating a corner's vertical move to its horizontal move under the
/// aspect-ratio lock. Dragging a main-diagonal corner outward moves both of
/// its edges in the same direction; the anti-diagonal corners invert it.
fn corner_parity(position: HandlePosition) -> f64 {
    match position {
        HandlePosition::TopRight | HandlePosition::BottomLeft => -1.0,
        _ => 1.0,
    }
}

/// `numerator / denominator` when it is a usable aspect ratio.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    let r = numerator / denominator;
    (r.is_finite() && r > 0.0).then_some(r)
}

fn component(v: Vector, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => v.dx,
        Axis::Vertical => v.dy,
    }
}

fn along(axis: Axis, value: f64) -> Vector {
    match axis {
        Axis::Horizontal => Vector::new(value, 0.0),
        Axis::Vertical => Vector::new(0.0, value),
    }
}

fn resize_edge(
    frame: &mut Frame,
    side: Side,
    translation: Vector,
    params: &ResolvedParameters,
    surface: &Rect,
) -> Manipulation {
    let element = frame.container;
    let axis = side.axis();

    let Clamp::To(mut primary) = clamp_edge(side, component(translation, axis), &element, params, surface) else {
        debug!(?side, "edge resize denied");
        return Manipulation::unchanged(element);
    };

    let mut coupled = None;
    if params.keep_aspect_ratio {
        // Size along the cross axis per unit along the primary axis.
        let cross_ratio = match axis {
            Axis::Vertical => ratio(element.width, element.height),
            Axis::Horizontal => ratio(element.height, element.width),
        };
        let Some(cross_ratio) = cross_ratio else {
            debug!(?side, "aspect-locked resize denied: degenerate ratio");
            return Manipulation::unchanged(element);
        };

        // The near cross edge follows a near primary edge and opposes a far one.
        let sign = if side.is_near() { 1.0 } else { -1.0 };
        let wanted = sign * primary * cross_ratio / 2.0;
        let (near, far) = side.cross_pair();
        let Some(got) = clamp_cross_pair(near, far, wanted, &element, params, surface) else {
            debug!(?side, "aspect-locked resize denied on the cross axis");
            return Manipulation::unchanged(element);
        };
        if got.abs() < wanted.abs() {
            primary = sign * got * 2.0 / cross_ratio;
        }
        coupled = Some((near, far, got));
    }

    frame.move_edge(side, primary);
    if let Some((near, far, delta)) = coupled {
        frame.move_edge(near, delta);
        frame.move_edge(far, -delta);
    }

    Manipulation { rect: frame.container, translation: along(axis, primary) }
}

/// Clamp a symmetric move of a pair of opposite edges: `near` by `delta`,
/// `far` by `-delta`. Returns the legal `delta`, or `None` when denied.
fn clamp_cross_pair(
    near: Side,
    far: Side,
    delta: f64,
    element: &Rect,
    params: &ResolvedParameters,
    surface: &Rect,
) -> Option<f64> {
    // The size changes by twice the per-edge delta.
    let delta = match clamp_to_dimensions(near, delta * 2.0, element, params) {
        Clamp::Denied => return None,
        Clamp::To(d) => d / 2.0,
    };
    let delta = match clamp_to_boundary(Travel::Edge(near), delta, element, params, surface) {
        Clamp::Denied => return None,
        Clamp::To(d) => d,
    };
    match clamp_to_boundary(Travel::Edge(far), -delta, element, params, surface) {
        Clamp::Denied => None,
        Clamp::To(d) => Some(-d),
    }
}

fn resize_corner(
    frame: &mut Frame,
    horizontal: Side,
    vertical: Side,
    parity: f64,
    translation: Vector,
    params: &ResolvedParameters,
    surface: &Rect,
) -> Manipulation {
    let element = frame.container;
    let mut dx = clamp_edge(horizontal, translation.dx, &element, params, surface);

    let dy = if params.keep_aspect_ratio {
        let (Clamp::To(tx), Some(r)) = (dx, ratio(element.height, element.width)) else {
            debug!(?horizontal, ?vertical, "aspect-locked corner resize denied");
            return Manipulation::unchanged(element);
        };
        let derived = tx * r * parity;
        let Clamp::To(ty) = clamp_edge(vertical, derived, &element, params, surface) else {
            debug!(?horizontal, ?vertical, "aspect-locked corner resize denied on the vertical edge");
            return Manipulation::unchanged(element);
        };
        if ty.abs() < derived.abs() {
            dx = Clamp::To(ty / r * parity);
        }
        Clamp::To(ty)
    } else {
        clamp_edge(vertical, translation.dy, &element, params, surface)
    };

    if let Clamp::To(v) = dy {
        frame.move_edge(vertical, v);
    }
    if let Clamp::To(v) = dx {
        frame.move_edge(horizontal, v);
    }

    Manipulation { rect: frame.container, translation: Vector::new(dx.value(), dy.value()) }
}
