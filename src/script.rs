//! Scenario replay: drive a [`Registry`] from a JSON script and report the
//! resulting geometry.
//!
//! A scenario names a surface, a list of items and a list of steps. Items are
//! referred to by name; ids are allocated at registration. Gesture steps go
//! through the same start → delta → complete path a host would use, so the
//! replay exercises callbacks and gesture state as well as the engine.
//!
//! ```json
//! {
//!   "surface": { "width": 800, "height": 600 },
//!   "items": [
//!     { "name": "card", "rect": { "left": 100, "top": 100, "width": 200, "height": 100 },
//!       "parameters": { "min_width": 50 } }
//!   ],
//!   "steps": [
//!     { "op": "drag", "item": "card", "dx": -150, "dy": 0 },
//!     { "op": "resize_handle", "item": "card", "position": "left", "dx": 160, "dy": 0 }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{HandlingParameters, Orientations};
use crate::engine::Manipulation;
use crate::geom::{Rect, Vector};
use crate::gesture::HandlingCallbacks;
use crate::layout::{HandlePosition, Orientation};
use crate::registry::{Item, ItemId, Registry, RegistryError, Surface};
use crate::zorder::Stacked;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("registry rejected item: {0}")]
    Registry(#[from] RegistryError),
    #[error("unknown item `{0}`")]
    UnknownItem(String),
    #[error("duplicate item name `{0}`")]
    DuplicateItem(String),
}

// =============================================================================
// SCENARIO
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub surface: SurfaceSpec,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SurfaceSpec {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    pub rect: Rect,
    /// Absent means every handle plus a two-axis drag band.
    #[serde(default)]
    pub orientations: Option<Vec<Orientation>>,
    #[serde(default)]
    pub parameters: HandlingParameters,
}

/// One replayed host action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// A full drag gesture on the drag band with a single delta.
    Drag { item: String, dx: f64, dy: f64 },
    /// A full resize gesture on one handle with a single delta.
    ResizeHandle { item: String, position: HandlePosition, dx: f64, dy: f64 },
    /// Programmatic translation.
    Move { item: String, dx: f64, dy: f64 },
    Position {
        item: String,
        left: f64,
        top: f64,
        #[serde(default)]
        parameters: HandlingParameters,
    },
    Center { item: String },
    Resize {
        item: String,
        width: f64,
        height: f64,
        #[serde(default = "default_resize_position")]
        position: HandlePosition,
        #[serde(default)]
        parameters: HandlingParameters,
    },
    AspectRatio { item: String, ratio: f64 },
    Press { item: String },
    BringToFront { item: String },
    SetParameters { item: String, parameters: HandlingParameters },
    SurfaceSize { width: f64, height: f64 },
    Unregister { item: String },
}

fn default_resize_position() -> HandlePosition {
    HandlePosition::BottomRight
}

impl Step {
    /// Name of the operation as written in the script.
    #[must_use]
    pub fn op(&self) -> &'static str {
        match self {
            Self::Drag { .. } => "drag",
            Self::ResizeHandle { .. } => "resize_handle",
            Self::Move { .. } => "move",
            Self::Position { .. } => "position",
            Self::Center { .. } => "center",
            Self::Resize { .. } => "resize",
            Self::AspectRatio { .. } => "aspect_ratio",
            Self::Press { .. } => "press",
            Self::BringToFront { .. } => "bring_to_front",
            Self::SetParameters { .. } => "set_parameters",
            Self::SurfaceSize { .. } => "surface_size",
            Self::Unregister { .. } => "unregister",
        }
    }

    /// Name of the item the step targets, if any.
    #[must_use]
    pub fn item(&self) -> Option<&str> {
        match self {
            Self::Drag { item, .. }
            | Self::ResizeHandle { item, .. }
            | Self::Move { item, .. }
            | Self::Position { item, .. }
            | Self::Center { item }
            | Self::Resize { item, .. }
            | Self::AspectRatio { item, .. }
            | Self::Press { item }
            | Self::BringToFront { item }
            | Self::SetParameters { item, .. }
            | Self::Unregister { item } => Some(item),
            Self::SurfaceSize { .. } => None,
        }
    }
}

impl Scenario {
    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// `Json` when the text is not a valid scenario.
    pub fn parse(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, `Json` when it is not a valid
    /// scenario.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

// =============================================================================
// REPORT
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub surface: Rect,
    pub steps: Vec<StepOutcome>,
    /// Items still registered at the end, in script order.
    pub items: Vec<ItemState>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// Translation the engine applied, when the step ran the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<Vector>,
    /// Container rect after the step, when the step ran the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemState {
    pub name: String,
    pub rect: Rect,
    pub z_index: i64,
}

// =============================================================================
// REPLAY
// =============================================================================

/// Replay `scenario` against a fresh registry.
///
/// # Errors
///
/// `DuplicateItem` or `Registry` when an item cannot be registered,
/// `UnknownItem` when a step names an item that was never declared.
pub fn run(scenario: &Scenario) -> Result<Report, ScriptError> {
    info!(items = scenario.items.len(), steps = scenario.steps.len(), "replaying scenario");

    let surface = Surface::fixed(Uuid::new_v4(), scenario.surface.width, scenario.surface.height);
    let mut registry = Registry::new(surface);
    let mut names: HashMap<String, ItemId> = HashMap::new();

    for spec in &scenario.items {
        if names.contains_key(&spec.name) {
            return Err(ScriptError::DuplicateItem(spec.name.clone()));
        }
        let id = Uuid::new_v4();
        let orientations = spec.orientations.clone().map_or(Orientations::Default, Orientations::Set);
        registry.register(
            Item::placed(id, surface.id, spec.rect),
            &orientations,
            &spec.parameters,
            HandlingCallbacks::new(),
        )?;
        names.insert(spec.name.clone(), id);
    }

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let id = match step.item() {
            Some(name) => Some(*names.get(name).ok_or_else(|| ScriptError::UnknownItem(name.to_string()))?),
            None => None,
        };
        debug!(index, op = step.op(), "step");
        let result = id.and_then(|id| apply(&mut registry, &id, step));
        steps.push(StepOutcome {
            index,
            op: step.op(),
            item: step.item().map(str::to_string),
            applied: result.map(|m| m.translation),
            rect: result.map(|m| m.rect),
        });
        if let Step::SurfaceSize { width, height } = step {
            registry.set_surface_size(*width, *height);
        }
    }

    let items = scenario
        .items
        .iter()
        .filter_map(|spec| {
            let id = names.get(&spec.name)?;
            let entity = registry.entity(id)?;
            Some(ItemState {
                name: spec.name.clone(),
                rect: entity.frame().container,
                z_index: entity.z_index(),
            })
        })
        .collect();

    Ok(Report { surface: registry.surface().rect(), steps, items })
}

fn apply(registry: &mut Registry, id: &ItemId, step: &Step) -> Option<Manipulation> {
    match step {
        Step::Drag { dx, dy, .. } => {
            registry.press(id);
            registry.begin_drag(id);
            let result = registry.drag_delta(id, Vector::new(*dx, *dy));
            registry.end_drag(id);
            result
        }
        Step::ResizeHandle { position, dx, dy, .. } => {
            registry.press(id);
            registry.begin_resize(id, *position);
            let result = registry.resize_delta(id, *position, Vector::new(*dx, *dy));
            registry.end_resize(id, *position);
            result
        }
        Step::Move { dx, dy, .. } => registry.drag(id, *dx, *dy),
        Step::Position { left, top, parameters, .. } => registry.position(id, *left, *top, parameters),
        Step::Center { .. } => registry.position_at_center(id),
        Step::Resize { width, height, position, parameters, .. } => {
            registry.resize(id, *width, *height, *position, parameters)
        }
        Step::AspectRatio { ratio, .. } => registry.set_aspect_ratio(id, *ratio),
        Step::Press { .. } => {
            registry.press(id);
            None
        }
        Step::BringToFront { .. } => {
            registry.bring_to_front(id);
            None
        }
        Step::SetParameters { parameters, .. } => {
            registry.set_parameters(id, parameters);
            None
        }
        Step::Unregister { .. } => {
            registry.unregister(id);
            None
        }
        Step::SurfaceSize { .. } => None,
    }
}
