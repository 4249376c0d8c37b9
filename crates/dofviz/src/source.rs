//! The host's camera, as seen by dofviz.

use dofviz_core::{CameraIntrinsics, CameraPose, ClipRange, DVec3, FocusTarget};

/// Supplies camera state on demand.
///
/// Implement this on (a thin wrapper around) the host's camera object. Every
/// call to [`crate::DofSession::refresh`] takes a fresh snapshot, so the
/// camera may move or change lenses between frames.
pub trait CameraSource {
    /// Lens intrinsics, with the current focus distance in millimetres.
    fn intrinsics(&self) -> CameraIntrinsics;

    /// World-space pose.
    fn pose(&self) -> CameraPose;

    /// Clip range in world units, used for the axis line overlay.
    fn clip_range(&self) -> Option<ClipRange> {
        None
    }

    /// World position of an object the camera tracks for focus.
    ///
    /// When set, the focus distance is derived from this point on every
    /// refresh and the stored focus distance is ignored.
    fn focus_object(&self) -> Option<DVec3> {
        None
    }
}

/// A camera held entirely by value.
///
/// Useful for hosts without their own camera object, and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCamera {
    /// Lens intrinsics.
    pub intrinsics: CameraIntrinsics,
    /// World-space pose.
    pub pose: CameraPose,
    /// Clip range in world units.
    pub clip_range: Option<ClipRange>,
    /// Tracked focus object position.
    pub focus_object: Option<DVec3>,
}

impl StaticCamera {
    /// Creates a camera with no clip range and no focus object.
    pub fn new(intrinsics: CameraIntrinsics, pose: CameraPose) -> Self {
        Self {
            intrinsics,
            pose,
            clip_range: None,
            focus_object: None,
        }
    }

    /// Sets the clip range.
    #[must_use]
    pub fn with_clip_range(mut self, clip_range: ClipRange) -> Self {
        self.clip_range = Some(clip_range);
        self
    }

    /// Sets the tracked focus object.
    #[must_use]
    pub fn with_focus_object(mut self, position: DVec3) -> Self {
        self.focus_object = Some(position);
        self
    }
}

impl CameraSource for StaticCamera {
    fn intrinsics(&self) -> CameraIntrinsics {
        self.intrinsics
    }

    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn clip_range(&self) -> Option<ClipRange> {
        self.clip_range
    }

    fn focus_object(&self) -> Option<DVec3> {
        self.focus_object
    }
}

impl FocusTarget for StaticCamera {
    fn set_focus_distance(&mut self, distance_mm: f64) {
        self.intrinsics.focus_distance = Some(distance_mm);
    }
}
