//! Gesture model: the per-entity gesture state and the host callback bundle.
//!
//! A gesture runs `Idle → Dragging | Resizing → Idle`. Start and completion
//! only notify the host; every delta in between is one synchronous engine
//! step. The host guarantees start → delta* → complete ordering and never
//! interleaves two gestures on one entity, so no queue is kept here.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use std::fmt;

use crate::geom::{Rect, Vector};
use crate::layout::HandlePosition;

/// The gesture currently in progress on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The drag band is being dragged.
    Dragging,
    /// The handle at this position is being dragged.
    Resizing(HandlePosition),
}

impl Gesture {
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

type Notify = Box<dyn FnMut()>;
type Rewrite = Box<dyn FnMut(Vector) -> Vector>;
type Report = Box<dyn FnMut(Rect)>;
type NotifyAt = Box<dyn FnMut(HandlePosition)>;
type RewriteAt = Box<dyn FnMut(Vector, HandlePosition) -> Vector>;
type ReportAt = Box<dyn FnMut(Rect, HandlePosition)>;

/// Optional host callbacks, one slot per event, all invoked inline.
///
/// The `before_*` slots may rewrite the raw translation before the engine
/// sees it; the `after_*` slots receive the container rect after the step.
#[derive(Default)]
pub struct HandlingCallbacks {
    pub drag_started: Option<Notify>,
    pub before_dragging: Option<Rewrite>,
    pub after_dragging: Option<Report>,
    pub drag_completed: Option<Notify>,
    pub resize_started: Option<NotifyAt>,
    pub before_resizing: Option<RewriteAt>,
    pub after_resizing: Option<ReportAt>,
    pub resize_completed: Option<NotifyAt>,
}

impl HandlingCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_drag_started(mut self, f: impl FnMut() + 'static) -> Self {
        self.drag_started = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_before_dragging(mut self, f: impl FnMut(Vector) -> Vector + 'static) -> Self {
        self.before_dragging = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_after_dragging(mut self, f: impl FnMut(Rect) + 'static) -> Self {
        self.after_dragging = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag_completed(mut self, f: impl FnMut() + 'static) -> Self {
        self.drag_completed = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_resize_started(mut self, f: impl FnMut(HandlePosition) + 'static) -> Self {
        self.resize_started = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_before_resizing(mut self, f: impl FnMut(Vector, HandlePosition) -> Vector + 'static) -> Self {
        self.before_resizing = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_after_resizing(mut self, f: impl FnMut(Rect, HandlePosition) + 'static) -> Self {
        self.after_resizing = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_resize_completed(mut self, f: impl FnMut(HandlePosition) + 'static) -> Self {
        self.resize_completed = Some(Box::new(f));
        self
    }

    pub(crate) fn notify_drag_started(&mut self) {
        if let Some(f) = self.drag_started.as_mut() {
            f();
        }
    }

    /// The translation the engine should use for a raw drag delta.
    pub(crate) fn rewrite_drag(&mut self, raw: Vector) -> Vector {
        self.before_dragging.as_mut().map_or(raw, |f| f(raw))
    }

    pub(crate) fn report_drag(&mut self, rect: Rect) {
        if let Some(f) = self.after_dragging.as_mut() {
            f(rect);
        }
    }

    pub(crate) fn notify_drag_completed(&mut self) {
        if let Some(f) = self.drag_completed.as_mut() {
            f();
        }
    }

    pub(crate) fn notify_resize_started(&mut self, position: HandlePosition) {
        if let Some(f) = self.resize_started.as_mut() {
            f(position);
        }
    }

    /// The translation the engine should use for a raw resize delta.
    pub(crate) fn rewrite_resize(&mut self, raw: Vector, position: HandlePosition) -> Vector {
        self.before_resizing.as_mut().map_or(raw, |f| f(raw, position))
    }

    pub(crate) fn report_resize(&mut self, rect: Rect, position: HandlePosition) {
        if let Some(f) = self.after_resizing.as_mut() {
            f(rect, position);
        }
    }

    pub(crate) fn notify_resize_completed(&mut self, position: HandlePosition) {
        if let Some(f) = self.resize_completed.as_mut() {
            f(position);
        }
    }
}

impl fmt::Debug for HandlingCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlingCallbacks")
            .field("drag_started", &self.drag_started.is_some())
            .field("before_dragging", &self.before_dragging.is_some())
            .field("after_dragging", &self.after_dragging.is_some())
            .field("drag_completed", &self.drag_completed.is_some())
            .field("resize_started", &self.resize_started.is_some())
            .field("before_resizing", &self.before_resizing.is_some())
            .field("after_resizing", &self.after_resizing.is_some())
            .field("resize_completed", &self.resize_completed.is_some())
            .finish()
    }
}
