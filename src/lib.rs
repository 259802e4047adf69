//! Drag and resize geometry for rectangular items on a bounded surface.
//!
//! A host registers items with a [`registry::Registry`] bound to its surface
//! and forwards pointer gestures to it. Each gesture delta runs through the
//! manipulation engine, which clamps the raw translation against the
//! configured size limits, aspect-ratio lock and boundary, then moves the
//! item's container and every dependent resize handle. Rendering, hit-testing
//! and pointer capture stay with the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | Entity registry, host API and gesture entry points |
//! | [`engine`] | Manipulation delta engine for drags and resizes |
//! | [`clamp`] | Boundary and dimension clamp solvers |
//! | [`layout`] | Handle positions, handle placement and edge dependencies |
//! | [`config`] | Handling parameters, appearance and their resolution |
//! | [`zorder`] | Z-order stack maintenance |
//! | [`gesture`] | Gesture state and the host callback bundle |
//! | [`script`] | JSON scenario replay used by the `dragresize` binary |
//! | [`geom`] | Points, vectors and rectangles |
//! | [`consts`] | Shared numeric constants (handle thickness, tolerances) |

pub mod clamp;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod gesture;
pub mod layout;
pub mod registry;
pub mod script;
pub mod zorder;
