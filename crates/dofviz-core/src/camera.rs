//! Camera parameters (lens intrinsics and pose).
//!
//! Both types are value snapshots: the host copies them out of its own camera
//! object on every refresh, the core never holds on to them between calls.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{DofError, Result};

/// Aperture radii at or below this (in millimetres) are treated as a pinhole.
pub const PINHOLE_RADIUS_EPSILON: f64 = 1e-5;

/// How the lens aperture is specified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Aperture {
    /// Relative aperture as an f-number (e.g. 2.8 for f/2.8).
    FStop(f64),
    /// Physical aperture radius in millimetres.
    Radius(f64),
}

impl Aperture {
    /// Returns the f-number for a lens of the given focal length.
    ///
    /// Returns `None` for a pinhole radius, which has unlimited depth of field.
    pub fn f_number(self, focal_length: f64) -> Option<f64> {
        match self {
            Aperture::FStop(n) => Some(n),
            Aperture::Radius(r) if r <= PINHOLE_RADIUS_EPSILON => None,
            Aperture::Radius(r) => Some(focal_length / (2.0 * r)),
        }
    }
}

/// Camera lens intrinsics.
///
/// Lengths are in millimetres. `aperture` and `focus_distance` are `None` when
/// the host has depth of field switched off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length in millimetres.
    pub focal_length: f64,
    /// Sensor width in millimetres.
    pub sensor_width: f64,
    /// Sensor height in millimetres, if known.
    pub sensor_height: Option<f64>,
    /// Lens aperture, or `None` when depth of field is disabled.
    pub aperture: Option<Aperture>,
    /// Focus distance in millimetres, or `None` when unset.
    pub focus_distance: Option<f64>,
}

impl CameraIntrinsics {
    /// Creates intrinsics with depth of field disabled.
    pub fn new(focal_length: f64, sensor_width: f64) -> Self {
        Self {
            focal_length,
            sensor_width,
            sensor_height: None,
            aperture: None,
            focus_distance: None,
        }
    }

    /// Sets the sensor height.
    #[must_use]
    pub fn with_sensor_height(mut self, sensor_height: f64) -> Self {
        self.sensor_height = Some(sensor_height);
        self
    }

    /// Sets the aperture.
    #[must_use]
    pub fn with_aperture(mut self, aperture: Aperture) -> Self {
        self.aperture = Some(aperture);
        self
    }

    /// Sets the aperture as an f-number.
    #[must_use]
    pub fn with_f_stop(self, f_number: f64) -> Self {
        self.with_aperture(Aperture::FStop(f_number))
    }

    /// Sets the focus distance in millimetres.
    #[must_use]
    pub fn with_focus_distance(mut self, focus_distance: f64) -> Self {
        self.focus_distance = Some(focus_distance);
        self
    }

    /// Returns the effective f-number, or `None` if the aperture is disabled
    /// or a pinhole.
    pub fn f_number(&self) -> Option<f64> {
        self.aperture
            .and_then(|aperture| aperture.f_number(self.focal_length))
    }

    /// Returns the sensor diagonal in millimetres.
    ///
    /// Falls back to the sensor width when the height is unknown.
    pub fn sensor_diagonal(&self) -> f64 {
        match self.sensor_height {
            Some(h) => self.sensor_width.hypot(h),
            None => self.sensor_width,
        }
    }

    /// Checks the lens preconditions.
    pub fn validate(&self) -> Result<()> {
        check_positive("focal_length", self.focal_length)?;
        check_positive("sensor_width", self.sensor_width)?;
        if let Some(h) = self.sensor_height {
            check_positive("sensor_height", h)?;
        }
        match self.aperture {
            Some(Aperture::FStop(n)) => check_positive("aperture", n)?,
            Some(Aperture::Radius(r)) if !r.is_finite() || r < 0.0 => {
                return Err(DofError::InvalidIntrinsics {
                    field: "aperture_radius",
                    value: r,
                });
            }
            _ => {}
        }
        if let Some(s) = self.focus_distance {
            // +inf is a legitimate "focused at infinity"
            if s.is_nan() || s < 0.0 {
                return Err(DofError::InvalidIntrinsics {
                    field: "focus_distance",
                    value: s,
                });
            }
        }
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DofError::InvalidIntrinsics { field, value })
    }
}

/// Camera pose in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: DVec3,
    /// View direction (normalized).
    pub view_dir: DVec3,
    /// Up direction (normalized, orthogonal to `view_dir`).
    pub up_dir: DVec3,
}

impl CameraPose {
    /// Creates a pose from position and directions.
    ///
    /// Both directions are normalized and `up_dir` is re-orthogonalized against
    /// `view_dir`. If `up_dir` is parallel to `view_dir` an arbitrary
    /// perpendicular is chosen.
    pub fn new(position: DVec3, view_dir: DVec3, up_dir: DVec3) -> Result<Self> {
        if !position.is_finite() {
            return Err(DofError::InvalidPose("position is not finite"));
        }
        let view_dir = view_dir
            .try_normalize()
            .ok_or(DofError::InvalidPose("view direction has zero length"))?;
        let up_dir = (up_dir - view_dir * up_dir.dot(view_dir))
            .try_normalize()
            .unwrap_or_else(|| view_dir.any_orthonormal_vector());
        Ok(Self {
            position,
            view_dir,
            up_dir,
        })
    }

    /// Creates a pose at `position` looking at `target`.
    pub fn look_at(position: DVec3, target: DVec3, up: DVec3) -> Result<Self> {
        Self::new(position, target - position, up)
    }

    /// Creates a pose from a camera-to-world matrix.
    ///
    /// The camera looks down its local -Z axis with +Y up. Scale in the matrix
    /// is ignored.
    pub fn from_world_matrix(matrix: DMat4) -> Result<Self> {
        let position = matrix.w_axis.truncate();
        let view_dir = -matrix.z_axis.truncate();
        let up_dir = matrix.y_axis.truncate();
        Self::new(position, view_dir, up_dir)
    }

    /// Re-validates a pose whose fields were set directly.
    ///
    /// Equivalent to passing the fields through [`CameraPose::new`].
    pub fn normalized(&self) -> Result<Self> {
        Self::new(self.position, self.view_dir, self.up_dir)
    }

    /// Camera at the origin looking down -Z.
    pub fn default_pose() -> Self {
        Self {
            position: DVec3::ZERO,
            view_dir: DVec3::NEG_Z,
            up_dir: DVec3::Y,
        }
    }

    /// Gets the right direction (view cross up).
    pub fn right_dir(&self) -> DVec3 {
        self.view_dir.cross(self.up_dir)
    }

    /// Returns the point on the optical axis at signed distance `distance`.
    pub fn point_on_axis(&self, distance: f64) -> DVec3 {
        self.position + distance * self.view_dir
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::default_pose()
    }
}

/// Camera clipping range along the optical axis, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRange {
    /// Near clip distance.
    pub start: f64,
    /// Far clip distance.
    pub end: f64,
}

impl ClipRange {
    /// Creates a clip range, swapping the bounds if they are reversed.
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Clamps a distance into the range.
    pub fn clamp(&self, distance: f64) -> f64 {
        // f64::clamp panics on reversed bounds
        distance.max(self.start).min(self.end)
    }
}

impl Default for ClipRange {
    fn default() -> Self {
        Self {
            start: 0.1,
            end: 100.0,
        }
    }
}
