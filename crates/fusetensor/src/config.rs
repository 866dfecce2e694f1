//! Build-time configuration.
//!
//! The checking toggles map cargo features onto constants so that disabled
//! checks compile down to nothing. All three are in the default feature set;
//! build with `--no-default-features` plus an explicit feature list to turn
//! individual checks off.

/// Element-access bounds checking (`bounds-check` feature).
pub const BOUNDS_CHECK: bool = cfg!(feature = "bounds-check");

/// Dimension-count checking at expression evaluation (`rank-check` feature).
pub const RANK_CHECK: bool = cfg!(feature = "rank-check");

/// Per-axis extent checking at expression evaluation (`shape-check` feature).
pub const SHAPE_CHECK: bool = cfg!(feature = "shape-check");

/// Tolerance used by approximate equality and the structural predicates
/// (identity, symmetry, triangularity) unless the caller passes its own.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;
