//! dofviz: depth-of-field envelope visualization for virtual cameras.
//!
//! Computes where a camera's depth of field starts and ends, turns that into
//! overlay geometry along the camera's optical axis, and lets the user set the
//! focus distance by pointing at a spot in the scene.
//!
//! # Quick Start
//!
//! ```no_run
//! use dofviz::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let intrinsics = CameraIntrinsics::new(50.0, 36.0)
//!         .with_f_stop(2.8)
//!         .with_focus_distance(5000.0);
//!     let pose = CameraPose::look_at(DVec3::new(0.0, -10.0, 1.5), DVec3::ZERO, DVec3::Z)?;
//!     let mut camera = StaticCamera::new(intrinsics, pose);
//!
//!     let session = DofSession::new(DofOptions::default())?;
//!     let frame = session.refresh(&camera)?;
//!     println!("{}", frame.readout);
//!
//!     // Focus on whatever the 3D cursor points at
//!     session.pick_focus(&mut camera, DVec3::new(0.0, -2.0, 1.0))?;
//!     Ok(())
//! }
//! ```
//!
//! # Units
//!
//! Lens parameters and the camera's focus distance are millimetres. Poses,
//! overlay geometry and the readout are in world units; the conversion is
//! [`DofOptions::unit_scale`].

mod readout;
mod session;
mod source;

pub use dofviz_core::{
    axis, camera, error, focus, optics, options, overlay, build_overlay, build_segments,
    compute_limits, pick_focus, project_onto_axis, Aperture, CameraIntrinsics, CameraPose,
    CircleOfConfusion, ClipRange, DMat4, DVec3, DofError, DofLimits, DofOptions, FocusPick,
    FocusPicker, FocusTarget, LineVertex, OverlayPrimitive, OverlayRole, OverlaySegment,
    OverlayStyle, Result, SegmentKind, UnitScale,
};

pub use readout::DofReadout;
pub use session::{DofFrame, DofSession};
pub use source::{CameraSource, StaticCamera};

/// Initializes logging from the `RUST_LOG` environment variable.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
