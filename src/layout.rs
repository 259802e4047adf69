//! Handle layout: compass positions, the handle set, and how an edge move
//! propagates to the container and its dependent handles.
//!
//! An entity's geometry is a [`Frame`]: the container rect (which doubles as
//! the drag band) plus up to eight handles. [`Frame::new`] computes the
//! initial placement; [`Frame::move_edge`] and [`Frame::translate`] keep the
//! handles glued to the container as the engine mutates it.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};

use crate::config::ResolvedAppearance;
use crate::geom::Rect;

/// Compass position of a resize handle. The discriminant is the slot index
/// in a [`HandleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlePosition {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
    TopLeft = 4,
    TopRight = 5,
    BottomLeft = 6,
    BottomRight = 7,
}

impl HandlePosition {
    /// All positions in slot order.
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Slot index in a [`HandleSet`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The edge this handle drags, or `None` for corners.
    #[must_use]
    pub fn edge(self) -> Option<Side> {
        match self {
            Self::Top => Some(Side::Top),
            Self::Right => Some(Side::Right),
            Self::Bottom => Some(Side::Bottom),
            Self::Left => Some(Side::Left),
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight => None,
        }
    }

    /// The `(horizontal, vertical)` edges a corner drags, or `None` for edges.
    #[must_use]
    pub fn corner_edges(self) -> Option<(Side, Side)> {
        match self {
            Self::TopLeft => Some((Side::Left, Side::Top)),
            Self::TopRight => Some((Side::Right, Side::Top)),
            Self::BottomLeft => Some((Side::Left, Side::Bottom)),
            Self::BottomRight => Some((Side::Right, Side::Bottom)),
            Self::Top | Self::Right | Self::Bottom | Self::Left => None,
        }
    }

    /// Whether this position moves the top edge.
    #[must_use]
    pub fn touches_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    /// Whether this position moves the left edge.
    #[must_use]
    pub fn touches_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }
}

/// Axis of the drag band. At most one per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragOrientation {
    Horizontal,
    Vertical,
    Both,
}

impl DragOrientation {
    /// Orientation covering the non-zero components of a translation, if any.
    #[must_use]
    pub fn covering(dx: f64, dy: f64) -> Option<Self> {
        match (dx != 0.0, dy != 0.0) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Horizontal),
            (false, true) => Some(Self::Vertical),
            (false, false) => None,
        }
    }

    #[must_use]
    pub fn moves_horizontally(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    #[must_use]
    pub fn moves_vertically(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

/// Either a resize handle position or a drag axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Orientation {
    Resize(HandlePosition),
    Drag(DragOrientation),
}

/// One of the two axes of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One edge of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Axis along which this edge moves.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Whether moving this edge by a positive amount shrinks the rectangle.
    #[must_use]
    pub fn is_near(self) -> bool {
        matches!(self, Self::Top | Self::Left)
    }

    /// The edge across the rectangle.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// The pair of edges perpendicular to this one, near edge first.
    #[must_use]
    pub fn cross_pair(self) -> (Self, Self) {
        match self.axis() {
            Axis::Horizontal => (Self::Top, Self::Bottom),
            Axis::Vertical => (Self::Left, Self::Right),
        }
    }
}

/// Which handles an edge move resizes and which it shifts.
struct EdgeDependents {
    resized: &'static [HandlePosition],
    moved: &'static [HandlePosition],
}

fn dependents(side: Side) -> EdgeDependents {
    use HandlePosition as P;
    match side {
        Side::Top => EdgeDependents {
            resized: &[P::Left, P::Right],
            moved: &[P::Top, P::TopLeft, P::TopRight, P::Left, P::Right],
        },
        Side::Right => EdgeDependents {
            resized: &[P::Top, P::Bottom],
            moved: &[P::Right, P::TopRight, P::BottomRight],
        },
        Side::Bottom => EdgeDependents {
            resized: &[P::Left, P::Right],
            moved: &[P::Bottom, P::BottomLeft, P::BottomRight],
        },
        Side::Left => EdgeDependents {
            resized: &[P::Top, P::Bottom],
            moved: &[P::Left, P::TopLeft, P::BottomLeft, P::Top, P::Bottom],
        },
    }
}

/// A resize handle: its slot, its rect on the surface, and how it looks.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    pub position: HandlePosition,
    pub rect: Rect,
    pub z_index: i64,
    pub appearance: ResolvedAppearance,
}

/// Fixed eight-slot handle array indexed by [`HandlePosition`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleSet {
    slots: [Option<Handle>; 8],
}

impl HandleSet {
    #[must_use]
    pub fn get(&self, position: HandlePosition) -> Option<&Handle> {
        self.slots[position.index()].as_ref()
    }

    #[must_use]
    pub fn contains(&self, position: HandlePosition) -> bool {
        self.slots[position.index()].is_some()
    }

    /// Present handles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.slots.iter().flatten()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Handle> {
        self.slots.iter_mut().flatten()
    }

    fn rect_mut(&mut self, position: HandlePosition) -> Option<&mut Rect> {
        self.slots[position.index()].as_mut().map(|h| &mut h.rect)
    }

    /// Number of present handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Geometry of one entity: the container (drag band) and its handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub container: Rect,
    pub handles: HandleSet,
}

impl Frame {
    /// Lay out handles around `container`. `appearances` is indexed by
    /// [`HandlePosition::index`]; `None` slots get no handle.
    #[must_use]
    pub fn new(container: Rect, appearances: &[Option<ResolvedAppearance>; 8], z_index: i64) -> Self {
        let mut handles = HandleSet::default();
        for position in HandlePosition::ALL {
            let Some(appearance) = &appearances[position.index()] else {
                continue;
            };
            handles.slots[position.index()] = Some(Handle {
                position,
                rect: handle_rect(&container, position, appearance.thickness),
                z_index,
                appearance: appearance.clone(),
            });
        }
        Self { container, handles }
    }

    /// The drag band covers the container exactly.
    #[must_use]
    pub fn drag_band(&self) -> Rect {
        self.container
    }

    /// Shift the container and every handle along one axis.
    pub fn translate(&mut self, axis: Axis, delta: f64) {
        shift(&mut self.container, axis, delta);
        for handle in self.handles.iter_mut() {
            shift(&mut handle.rect, axis, delta);
        }
    }

    /// Move one edge of the container by `delta` along its axis, resizing
    /// the container and the perpendicular edge handles and shifting every
    /// handle that sits on the moved edge.
    pub fn move_edge(&mut self, side: Side, delta: f64) {
        let axis = side.axis();
        let size_delta = if side.is_near() { -delta } else { delta };
        let deps = dependents(side);

        grow(&mut self.container, axis, size_delta);
        for &position in deps.resized {
            if let Some(rect) = self.handles.rect_mut(position) {
                grow(rect, axis, size_delta);
            }
        }

        if side.is_near() {
            shift(&mut self.container, axis, delta);
        }
        for &position in deps.moved {
            if let Some(rect) = self.handles.rect_mut(position) {
                shift(rect, axis, delta);
            }
        }
    }

    /// Mirror a z-index onto every present handle.
    pub fn set_z_index(&mut self, z_index: i64) {
        for handle in self.handles.iter_mut() {
            handle.z_index = z_index;
        }
    }
}

fn shift(rect: &mut Rect, axis: Axis, delta: f64) {
    match axis {
        Axis::Horizontal => rect.add_left(delta),
        Axis::Vertical => rect.add_top(delta),
    }
}

fn grow(rect: &mut Rect, axis: Axis, delta: f64) {
    match axis {
        Axis::Horizontal => rect.add_width(delta),
        Axis::Vertical => rect.add_height(delta),
    }
}

/// Initial rect of a handle centered on its edge or corner of `container`.
#[must_use]
pub fn handle_rect(container: &Rect, position: HandlePosition, thickness: f64) -> Rect {
    let half = thickness / 2.0;
    let c = container;
    match position {
        HandlePosition::Top => Rect::new(c.left, c.top - half, c.width, thickness),
        HandlePosition::Bottom => Rect::new(c.left, c.bottom() - half, c.width, thickness),
        HandlePosition::Left => Rect::new(c.left - half, c.top, thickness, c.height),
        HandlePosition::Right => Rect::new(c.right() - half, c.top, thickness, c.height),
        HandlePosition::TopLeft => Rect::new(c.left - half, c.top - half, thickness, thickness),
        HandlePosition::TopRight => Rect::new(c.right() - half, c.top - half, thickness, thickness),
        HandlePosition::BottomLeft => Rect::new(c.left - half, c.bottom() - half, thickness, thickness),
        HandlePosition::BottomRight => Rect::new(c.right() - half, c.bottom() - half, thickness, thickness),
    }
}
