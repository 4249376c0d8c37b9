//! Core computation for dofviz.
//!
//! This crate holds the pure, host-independent parts of the depth-of-field
//! visualizer:
//! - [`compute_limits`] maps lens intrinsics and a focus distance to the
//!   hyperfocal distance and near/far limits (thin-lens model)
//! - [`project_onto_axis`] measures world points along the optical axis
//! - [`build_overlay`] and [`build_segments`] turn limits into world-space
//!   overlay geometry
//! - [`pick_focus`] and [`FocusPicker`] derive a new focus distance from a
//!   picked point
//!
//! Nothing here keeps state between calls.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Optics formulas use the conventional single-letter names (f, s, c, N)
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod axis;
pub mod camera;
pub mod error;
pub mod focus;
pub mod optics;
pub mod options;
pub mod overlay;

pub use axis::{closest_point_on_axis, project_onto_axis};
pub use camera::{Aperture, CameraIntrinsics, CameraPose, ClipRange};
pub use error::{DofError, Result};
pub use focus::{pick_focus, FocusPick, FocusPicker, FocusTarget};
pub use optics::{compute_limits, frustum_half_extent, CircleOfConfusion, DofLimits};
pub use options::{DofOptions, OverlayStyle, UnitScale};
pub use overlay::{
    build_overlay, build_segments, segment_vertices, LineVertex, OverlayMarker, OverlayPlane,
    OverlayPrimitive, OverlayPrimitives, OverlayRole, OverlaySegment, SegmentKind,
};

// Re-export glam types for convenience
pub use glam::{DMat4, DVec3};
