//! Shared numeric constants for the crate.

// ── Handles ─────────────────────────────────────────────────────

/// Handle thickness in surface units when an appearance leaves it unset.
pub const DEFAULT_HANDLE_THICKNESS: f64 = 8.0;

// ── Clamping ────────────────────────────────────────────────────

/// Room below this on the far (right/bottom) side counts as no room at all.
/// The near (left/top) side uses an exact comparison.
pub const NO_SPACE_TOLERANCE: f64 = 0.1;
