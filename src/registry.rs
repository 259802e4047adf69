//! Entity registry: the host-facing surface of the crate.
//!
//! DESIGN
//! ======
//! A [`Registry`] is bound to exactly one [`Surface`] at construction and
//! exclusively owns the state of every registered item: its container and
//! handle geometry ([`Frame`]), resolved parameters, z-index, gesture state
//! and callbacks. Items themselves stay owned by the host; the registry only
//! tracks their placement and hands it back on [`Registry::unregister`].
//!
//! Mutating operations on an unknown id are silent no-ops so that input
//! still in flight after a removal is harmless. Queries on an unknown id
//! fail with [`RegistryError::NotFound`].

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{HandlingParameters, Orientations, ResolvedAppearance, ResolvedParameters};
use crate::engine::{self, Manipulation};
use crate::geom::{Rect, Vector};
use crate::gesture::{Gesture, HandlingCallbacks};
use crate::layout::{DragOrientation, Frame, HandlePosition};
use crate::zorder::{self, Stacked};

/// Opaque identity of a host item.
pub type ItemId = Uuid;

/// Identity of a host surface.
pub type SurfaceId = Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("item already registered: {0}")]
    AlreadyRegistered(ItemId),
    #[error("item is not hosted on an absolute-positioning surface: {0}")]
    UnsupportedContainer(ItemId),
    #[error("item {id} is hosted on surface {found}, registry is bound to {expected}")]
    InconsistentSurface { id: ItemId, expected: SurfaceId, found: SurfaceId },
    #[error("item not found: {0}")]
    NotFound(ItemId),
}

impl RegistryError {
    /// Stable machine-readable code for hosts that forward errors.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRegistered(_) => "E_ALREADY_REGISTERED",
            Self::UnsupportedContainer(_) => "E_UNSUPPORTED_CONTAINER",
            Self::InconsistentSurface { .. } => "E_INCONSISTENT_SURFACE",
            Self::NotFound(_) => "E_NOT_FOUND",
        }
    }
}

/// The plane that hosts every item of a registry.
///
/// A dimension left as `None` is auto-sized and takes its `actual_*` value.
/// Registration pins auto-sized dimensions so that bounds stay concrete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub id: SurfaceId,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub actual_width: f64,
    pub actual_height: f64,
}

impl Surface {
    /// A surface with a declared size.
    #[must_use]
    pub fn fixed(id: SurfaceId, width: f64, height: f64) -> Self {
        Self { id, width: Some(width), height: Some(height), actual_width: width, actual_height: height }
    }

    /// An auto-sized surface with its currently measured size.
    #[must_use]
    pub fn auto(id: SurfaceId, actual_width: f64, actual_height: f64) -> Self {
        Self { id, width: None, height: None, actual_width, actual_height }
    }

    /// The surface as a rect anchored at the origin.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width.unwrap_or(self.actual_width),
            self.height.unwrap_or(self.actual_height),
        )
    }

    /// Whether both dimensions are declared.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    fn pin(&mut self) {
        self.width.get_or_insert(self.actual_width);
        self.height.get_or_insert(self.actual_height);
    }
}

/// A host item as seen at registration time, and as handed back when it is
/// unregistered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub id: ItemId,
    /// The surface the item currently sits on, if any.
    pub host: Option<SurfaceId>,
    pub left: f64,
    pub top: f64,
    /// Declared width; `None` means auto-sized.
    pub width: Option<f64>,
    /// Declared height; `None` means auto-sized.
    pub height: Option<f64>,
    pub actual_width: f64,
    pub actual_height: f64,
}

impl Item {
    /// An item with a declared size placed on `host`.
    #[must_use]
    pub fn placed(id: ItemId, host: SurfaceId, rect: Rect) -> Self {
        Self {
            id,
            host: Some(host),
            left: rect.left,
            top: rect.top,
            width: Some(rect.width),
            height: Some(rect.height),
            actual_width: rect.width,
            actual_height: rect.height,
        }
    }

    /// Placement of the item, with auto-sized dimensions taken as measured.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.width.unwrap_or(self.actual_width),
            self.height.unwrap_or(self.actual_height),
        )
    }
}

/// Managed state of one registered item.
#[derive(Debug)]
pub struct Entity {
    id: ItemId,
    frame: Frame,
    drag: Option<(DragOrientation, ResolvedAppearance)>,
    params: ResolvedParameters,
    z_index: i64,
    gesture: Gesture,
    callbacks: HandlingCallbacks,
}

impl Entity {
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Container and handle geometry.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Drag band orientation, if the entity has one.
    #[must_use]
    pub fn drag_orientation(&self) -> Option<DragOrientation> {
        self.drag.as_ref().map(|(orientation, _)| *orientation)
    }

    /// Appearance of the drag band, if the entity has one.
    #[must_use]
    pub fn drag_appearance(&self) -> Option<&ResolvedAppearance> {
        self.drag.as_ref().map(|(_, appearance)| appearance)
    }

    #[must_use]
    pub fn params(&self) -> &ResolvedParameters {
        &self.params
    }

    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }
}

impl Stacked for Entity {
    fn z_index(&self) -> i64 {
        self.z_index
    }

    fn set_z_index(&mut self, z_index: i64) {
        self.z_index = z_index;
        self.frame.set_z_index(z_index);
    }

    fn is_exempt(&self) -> bool {
        self.params.dont_change_z_index
    }
}

/// Registry of managed items bound to one surface.
#[derive(Debug)]
pub struct Registry {
    surface: Surface,
    entities: HashMap<ItemId, Entity>,
}

impl Registry {
    /// Create an empty registry bound to `surface`.
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        Self { surface, entities: HashMap::new() }
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Declare a new surface size. Entities are not moved.
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface.width = Some(width);
        self.surface.height = Some(height);
        self.surface.actual_width = width;
        self.surface.actual_height = height;
    }

    #[must_use]
    pub fn entity(&self, id: &ItemId) -> Option<&Entity> {
        self.entities.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.entities.contains_key(id)
    }

    /// Ids of all registered items, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.entities.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Start managing `item`: wrap it in a container at its current
    /// placement, lay out its handles and put it on top of the z-order.
    ///
    /// # Errors
    ///
    /// `AlreadyRegistered` if the id is known, `UnsupportedContainer` if the
    /// item sits on no surface, `InconsistentSurface` if it sits on a
    /// different surface than the one this registry is bound to.
    pub fn register(
        &mut self,
        item: Item,
        orientations: &Orientations,
        parameters: &HandlingParameters,
        callbacks: HandlingCallbacks,
    ) -> Result<(), RegistryError> {
        let id = item.id;
        if self.entities.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        let host = item.host.ok_or(RegistryError::UnsupportedContainer(id))?;
        if host != self.surface.id {
            return Err(RegistryError::InconsistentSurface { id, expected: self.surface.id, found: host });
        }
        self.surface.pin();

        let params = parameters.resolve();
        let resolved = orientations.resolve();
        let z_index = zorder::next_index(&self.entities, params.dont_change_z_index);
        let frame = Frame::new(item.rect(), &resolved.handles, z_index);

        info!(
            %id,
            z_index,
            handles = frame.handles.len(),
            drag = ?resolved.drag.as_ref().map(|(d, _)| *d),
            "registered item"
        );
        self.entities.insert(
            id,
            Entity {
                id,
                frame,
                drag: resolved.drag,
                params,
                z_index,
                gesture: Gesture::Idle,
                callbacks,
            },
        );
        Ok(())
    }

    /// Stop managing `id` and hand the item back, placed on the surface
    /// where its container was. Returns `None` for an unknown id.
    pub fn unregister(&mut self, id: &ItemId) -> Option<Item> {
        let entity = self.detach(id)?;
        let rect = entity.frame.container;
        info!(%id, left = rect.left, top = rect.top, "unregistered item");
        Some(Item::placed(*id, self.surface.id, rect))
    }

    /// Discard `id` together with its item. Returns `false` for an unknown id.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let removed = self.detach(id).is_some();
        if removed {
            info!(%id, "removed item");
        }
        removed
    }

    /// Discard every item.
    pub fn remove_all(&mut self) {
        info!(count = self.entities.len(), "removed all items");
        self.entities.clear();
    }

    fn detach(&mut self, id: &ItemId) -> Option<Entity> {
        let entity = self.entities.remove(id)?;
        if !entity.is_exempt() {
            zorder::close_gap(&mut self.entities, entity.z_index);
        }
        Some(entity)
    }

    // =========================================================================
    // GESTURES
    // =========================================================================

    /// The host saw a pointer press on the entity's band or one of its
    /// handles. Raises it to the top unless it is z-index exempt.
    pub fn press(&mut self, id: &ItemId) {
        self.bring_to_front(id);
    }

    /// A drag gesture started on the entity's drag band.
    pub fn begin_drag(&mut self, id: &ItemId) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        if entity.drag.is_none() {
            return;
        }
        entity.gesture = Gesture::Dragging;
        entity.callbacks.notify_drag_started();
    }

    /// One delta of a drag gesture. Returns `None` for an unknown id or an
    /// entity without a drag band.
    pub fn drag_delta(&mut self, id: &ItemId, raw: Vector) -> Option<Manipulation> {
        let surface = self.surface.rect();
        let entity = self.entities.get_mut(id)?;
        let orientation = entity.drag_orientation()?;
        let translation = entity.callbacks.rewrite_drag(raw);
        let result = engine::drag(&mut entity.frame, orientation, translation, &entity.params, &surface);
        entity.callbacks.report_drag(result.rect);
        Some(result)
    }

    /// The drag gesture on the entity's drag band completed.
    pub fn end_drag(&mut self, id: &ItemId) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        if entity.drag.is_none() {
            return;
        }
        entity.gesture = Gesture::Idle;
        entity.callbacks.notify_drag_completed();
    }

    /// A resize gesture started on the handle at `position`.
    pub fn begin_resize(&mut self, id: &ItemId, position: HandlePosition) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        if !entity.frame.handles.contains(position) {
            return;
        }
        entity.gesture = Gesture::Resizing(position);
        entity.callbacks.notify_resize_started(position);
    }

    /// One delta of a resize gesture. Returns `None` for an unknown id or a
    /// position without a handle.
    pub fn resize_delta(&mut self, id: &ItemId, position: HandlePosition, raw: Vector) -> Option<Manipulation> {
        let surface = self.surface.rect();
        let entity = self.entities.get_mut(id)?;
        if !entity.frame.handles.contains(position) {
            return None;
        }
        let translation = entity.callbacks.rewrite_resize(raw, position);
        let result = engine::resize(&mut entity.frame, position, translation, &entity.params, &surface);
        entity.callbacks.report_resize(result.rect, position);
        Some(result)
    }

    /// The resize gesture on the handle at `position` completed.
    pub fn end_resize(&mut self, id: &ItemId, position: HandlePosition) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        if !entity.frame.handles.contains(position) {
            return;
        }
        entity.gesture = Gesture::Idle;
        entity.callbacks.notify_resize_completed(position);
    }

    // =========================================================================
    // PROGRAMMATIC MANIPULATION
    // =========================================================================

    /// Move the item by a translation, clamped like a drag along the axes
    /// with a non-zero component.
    pub fn drag(&mut self, id: &ItemId, dx: f64, dy: f64) -> Option<Manipulation> {
        let surface = self.surface.rect();
        let entity = self.entities.get_mut(id)?;
        let Some(orientation) = DragOrientation::covering(dx, dy) else {
            return Some(Manipulation { rect: entity.frame.container, translation: Vector::zero() });
        };
        Some(engine::drag(&mut entity.frame, orientation, Vector::new(dx, dy), &entity.params, &surface))
    }

    pub fn drag_horizontally(&mut self, id: &ItemId, dx: f64) -> Option<Manipulation> {
        self.drag(id, dx, 0.0)
    }

    pub fn drag_vertically(&mut self, id: &ItemId, dy: f64) -> Option<Manipulation> {
        self.drag(id, 0.0, dy)
    }

    /// Move the item's top-left corner to `(left, top)`, clamped. Present
    /// fields of `overrides` replace the entity's parameters for this call.
    pub fn position(&mut self, id: &ItemId, left: f64, top: f64, overrides: &HandlingParameters) -> Option<Manipulation> {
        let current = self.entities.get(id)?.frame.container;
        self.position_by(id, Vector::new(left - current.left, top - current.top), overrides)
    }

    pub fn position_left(&mut self, id: &ItemId, left: f64, overrides: &HandlingParameters) -> Option<Manipulation> {
        let current = self.entities.get(id)?.frame.container;
        self.position_by(id, Vector::new(left - current.left, 0.0), overrides)
    }

    pub fn position_top(&mut self, id: &ItemId, top: f64, overrides: &HandlingParameters) -> Option<Manipulation> {
        let current = self.entities.get(id)?.frame.container;
        self.position_by(id, Vector::new(0.0, top - current.top), overrides)
    }

    /// Center the item on the surface.
    pub fn position_at_center(&mut self, id: &ItemId) -> Option<Manipulation> {
        let surface = self.surface.rect();
        let current = self.entities.get(id)?.frame.container;
        let left = (surface.width - current.width) / 2.0;
        let top = (surface.height - current.height) / 2.0;
        self.position(id, left, top, &HandlingParameters::default())
    }

    fn position_by(&mut self, id: &ItemId, translation: Vector, overrides: &HandlingParameters) -> Option<Manipulation> {
        let surface = self.surface.rect();
        let entity = self.entities.get_mut(id)?;
        let params = overrides.overlay(&entity.params);
        Some(engine::drag(&mut entity.frame, DragOrientation::Both, translation, &params, &surface))
    }

    /// Resize the item to `width × height` as if dragging the handle at
    /// `position`, which decides the edges that move. The handle does not
    /// have to exist. Present fields of `overrides` replace the entity's
    /// parameters for this call.
    pub fn resize(
        &mut self,
        id: &ItemId,
        width: f64,
        height: f64,
        position: HandlePosition,
        overrides: &HandlingParameters,
    ) -> Option<Manipulation> {
        let surface = self.surface.rect();
        let entity = self.entities.get_mut(id)?;
        let params = overrides.overlay(&entity.params);
        let current = entity.frame.container;

        let mut dx = width - current.width;
        let mut dy = height - current.height;
        if position.touches_left() {
            dx = -dx;
        }
        if position.touches_top() {
            dy = -dy;
        }
        Some(engine::resize(&mut entity.frame, position, Vector::new(dx, dy), &params, &surface))
    }

    /// Resize the width by moving the right edge.
    pub fn resize_width(&mut self, id: &ItemId, width: f64) -> Option<Manipulation> {
        let height = self.entities.get(id)?.frame.container.height;
        self.resize(id, width, height, HandlePosition::Right, &HandlingParameters::default())
    }

    /// Resize the height by moving the bottom edge.
    pub fn resize_height(&mut self, id: &ItemId, height: f64) -> Option<Manipulation> {
        let width = self.entities.get(id)?.frame.container.width;
        self.resize(id, width, height, HandlePosition::Bottom, &HandlingParameters::default())
    }

    /// Shrink one side of the item so that `width / height == ratio`,
    /// anchored at the top-left corner. Non-positive or non-finite ratios
    /// are ignored.
    pub fn set_aspect_ratio(&mut self, id: &ItemId, ratio: f64) -> Option<Manipulation> {
        if !(ratio.is_finite() && ratio > 0.0) {
            warn!(%id, ratio, "ignoring invalid aspect ratio");
            return None;
        }
        let current = self.entities.get(id)?.frame.container;
        let (mut width, mut height) = (current.width, current.height);
        if width / height > ratio {
            width = height * ratio;
        } else {
            height = width / ratio;
        }
        self.resize(id, width, height, HandlePosition::BottomRight, &HandlingParameters::aspect_lock(false))
    }

    /// Re-resolve and replace the entity's parameters. Toggling the z-index
    /// exemption takes the entity out of, or puts it on top of, the stack.
    pub fn set_parameters(&mut self, id: &ItemId, parameters: &HandlingParameters) {
        let resolved = parameters.resolve();
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        let was_exempt = entity.is_exempt();
        let vacated = entity.z_index;
        entity.params = resolved;
        debug!(%id, ?resolved, "parameters replaced");

        match (was_exempt, resolved.dont_change_z_index) {
            (false, true) => zorder::close_gap(&mut self.entities, vacated),
            (true, false) => {
                let top = zorder::top_index(&self.entities);
                if let Some(entity) = self.entities.get_mut(id) {
                    entity.set_z_index(top);
                }
            }
            _ => {}
        }
    }

    // =========================================================================
    // QUERIES AND Z-ORDER
    // =========================================================================

    /// Left edge of the item's container.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn left(&self, id: &ItemId) -> Result<f64, RegistryError> {
        self.lookup(id).map(|e| e.frame.container.left)
    }

    /// Top edge of the item's container.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn top(&self, id: &ItemId) -> Result<f64, RegistryError> {
        self.lookup(id).map(|e| e.frame.container.top)
    }

    /// Current z-index of the item.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn z_index(&self, id: &ItemId) -> Result<i64, RegistryError> {
        self.lookup(id).map(|e| e.z_index)
    }

    /// Set the z-index directly. Other entities are not renumbered; keeping
    /// the stack consistent is the caller's job.
    pub fn set_z_index(&mut self, id: &ItemId, z_index: i64) {
        if let Some(entity) = self.entities.get_mut(id) {
            entity.set_z_index(z_index);
        }
    }

    /// Raise the item to the top of the z-order.
    pub fn bring_to_front(&mut self, id: &ItemId) {
        if zorder::bring_to_front(&mut self.entities, id) {
            debug!(%id, "brought to front");
        }
    }

    fn lookup(&self, id: &ItemId) -> Result<&Entity, RegistryError> {
        self.entities.get(id).ok_or(RegistryError::NotFound(*id))
    }
}
