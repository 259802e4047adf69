//! Configuration: handling parameters and handle appearance, each in two
//! stages.
//!
//! Hosts describe what they want with the all-optional input types
//! ([`HandlingParameters`], [`Appearance`], [`Orientations`]), typically
//! deserialized from JSON. Registration resolves them once against fixed
//! defaults into [`ResolvedParameters`] / [`ResolvedAppearance`]; the engine
//! only ever sees the resolved form.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_HANDLE_THICKNESS;
use crate::layout::{DragOrientation, HandlePosition, Orientation};

// =============================================================================
// PARAMETERS
// =============================================================================

/// How far an entity may travel relative to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// No containment at all.
    NoBounds,
    /// The entity's edges stay inside the surface.
    #[default]
    BoundedAtEdges,
    /// The entity's center stays inside the surface.
    BoundedAtCenter,
    /// The entity's edges stay inside a configured rectangle.
    Custom,
}

/// Edge coordinates of a containment rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// The whole plane.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            left: f64::NEG_INFINITY,
            top: f64::NEG_INFINITY,
            right: f64::INFINITY,
            bottom: f64::INFINITY,
        }
    }
}

/// Partially specified handling parameters. Absent fields fall back to
/// defaults on [`resolve`](Self::resolve), or to an entity's current values
/// on [`overlay`](Self::overlay).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlingParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_aspect_ratio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dont_change_z_index: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_bottom: Option<f64>,
}

/// Fully resolved handling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedParameters {
    pub keep_aspect_ratio: bool,
    pub dont_change_z_index: bool,
    pub boundary: Boundary,
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: f64,
    pub max_height: f64,
    /// Only consulted when `boundary` is [`Boundary::Custom`].
    pub custom_boundary: Bounds,
}

impl Default for ResolvedParameters {
    fn default() -> Self {
        Self {
            keep_aspect_ratio: false,
            dont_change_z_index: false,
            boundary: Boundary::BoundedAtEdges,
            min_width: 0.0,
            min_height: 0.0,
            max_width: f64::INFINITY,
            max_height: f64::INFINITY,
            custom_boundary: Bounds::unbounded(),
        }
    }
}

impl HandlingParameters {
    /// Fill every absent field with its default.
    #[must_use]
    pub fn resolve(&self) -> ResolvedParameters {
        self.overlay(&ResolvedParameters::default())
    }

    /// Fill every absent field from `base`.
    #[must_use]
    pub fn overlay(&self, base: &ResolvedParameters) -> ResolvedParameters {
        ResolvedParameters {
            keep_aspect_ratio: self.keep_aspect_ratio.unwrap_or(base.keep_aspect_ratio),
            dont_change_z_index: self.dont_change_z_index.unwrap_or(base.dont_change_z_index),
            boundary: self.boundary.unwrap_or(base.boundary),
            min_width: self.min_width.map_or(base.min_width, non_negative),
            min_height: self.min_height.map_or(base.min_height, non_negative),
            max_width: self.max_width.unwrap_or(base.max_width),
            max_height: self.max_height.unwrap_or(base.max_height),
            custom_boundary: Bounds {
                left: self.boundary_left.unwrap_or(base.custom_boundary.left),
                top: self.boundary_top.unwrap_or(base.custom_boundary.top),
                right: self.boundary_right.unwrap_or(base.custom_boundary.right),
                bottom: self.boundary_bottom.unwrap_or(base.custom_boundary.bottom),
            },
        }
    }

    /// Parameters that only turn the aspect-ratio lock on or off.
    #[must_use]
    pub fn aspect_lock(keep: bool) -> Self {
        Self { keep_aspect_ratio: Some(keep), ..Self::default() }
    }
}

fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

// =============================================================================
// APPEARANCE
// =============================================================================

/// A color as ARGB bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Fully transparent white; the at-rest default for every handle.
    pub const TRANSPARENT: Self = Self { a: 0, r: 255, g: 255, b: 255 };

    #[must_use]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }
}

/// Cursor the host should show over a handle. Rendering is the host's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorHint {
    NorthSouth,
    WestEast,
    NorthwestSoutheast,
    NortheastSouthwest,
    Move,
}

impl CursorHint {
    /// Default cursor for an orientation.
    #[must_use]
    pub fn for_orientation(orientation: Orientation) -> Self {
        use HandlePosition as P;
        match orientation {
            Orientation::Resize(P::Top | P::Bottom) | Orientation::Drag(DragOrientation::Vertical) => Self::NorthSouth,
            Orientation::Resize(P::Left | P::Right) | Orientation::Drag(DragOrientation::Horizontal) => Self::WestEast,
            Orientation::Resize(P::TopLeft | P::BottomRight) => Self::NorthwestSoutheast,
            Orientation::Resize(P::TopRight | P::BottomLeft) => Self::NortheastSouthwest,
            Orientation::Drag(DragOrientation::Both) => Self::Move,
        }
    }
}

/// Partially specified look of one handle (or of the drag band).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub thickness: Option<f64>,
    pub cursor: Option<CursorHint>,
    pub at_rest: Option<Color>,
    pub hover: Option<Color>,
    pub pressed: Option<Color>,
}

/// Fully resolved look of one handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAppearance {
    pub thickness: f64,
    pub cursor: CursorHint,
    pub at_rest: Color,
    pub hover: Color,
    pub pressed: Color,
}

impl Appearance {
    /// Resolve against the defaults for `orientation`. Hover falls back to
    /// at-rest and pressed falls back to hover.
    #[must_use]
    pub fn resolve(&self, orientation: Orientation) -> ResolvedAppearance {
        let at_rest = self.at_rest.unwrap_or(Color::TRANSPARENT);
        let hover = self.hover.unwrap_or(at_rest);
        let pressed = self.pressed.unwrap_or(hover);
        ResolvedAppearance {
            thickness: self.thickness.unwrap_or(DEFAULT_HANDLE_THICKNESS),
            cursor: self.cursor.unwrap_or_else(|| CursorHint::for_orientation(orientation)),
            at_rest,
            hover,
            pressed,
        }
    }
}

// =============================================================================
// ORIENTATIONS
// =============================================================================

/// Which handles and which drag band an entity gets.
#[derive(Debug, Clone, Default)]
pub enum Orientations {
    /// All eight resize handles plus a two-axis drag band.
    #[default]
    Default,
    /// The listed orientations with default appearance. Listing both
    /// horizontal and vertical drag yields a two-axis drag band.
    Set(Vec<Orientation>),
    /// The listed orientations with per-orientation appearance.
    Styled(HashMap<Orientation, Appearance>),
}

/// Resolved handle and drag-band configuration of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOrientations {
    /// Indexed by [`HandlePosition::index`].
    pub handles: [Option<ResolvedAppearance>; 8],
    pub drag: Option<(DragOrientation, ResolvedAppearance)>,
}

impl Orientations {
    #[must_use]
    pub fn resolve(&self) -> ResolvedOrientations {
        let requested: HashMap<Orientation, Appearance> = match self {
            Self::Default => HandlePosition::ALL
                .into_iter()
                .map(Orientation::Resize)
                .chain(std::iter::once(Orientation::Drag(DragOrientation::Both)))
                .map(|o| (o, Appearance::default()))
                .collect(),
            Self::Set(list) => {
                let horizontal = Orientation::Drag(DragOrientation::Horizontal);
                let vertical = Orientation::Drag(DragOrientation::Vertical);
                let merge = list.contains(&horizontal) && list.contains(&vertical);
                list.iter()
                    .copied()
                    .map(|o| if merge && (o == horizontal || o == vertical) { Orientation::Drag(DragOrientation::Both) } else { o })
                    .map(|o| (o, Appearance::default()))
                    .collect()
            }
            Self::Styled(map) => map.clone(),
        };

        let mut handles: [Option<ResolvedAppearance>; 8] = Default::default();
        for position in HandlePosition::ALL {
            let orientation = Orientation::Resize(position);
            if let Some(appearance) = requested.get(&orientation) {
                handles[position.index()] = Some(appearance.resolve(orientation));
            }
        }

        let drag = [DragOrientation::Both, DragOrientation::Horizontal, DragOrientation::Vertical]
            .into_iter()
            .find_map(|d| {
                let orientation = Orientation::Drag(d);
                requested.get(&orientation).map(|a| (d, a.resolve(orientation)))
            });

        ResolvedOrientations { handles, drag }
    }
}
