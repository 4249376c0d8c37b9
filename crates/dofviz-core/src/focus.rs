//! Setting the focus distance from a picked world point.

use glam::DVec3;

use crate::axis::project_onto_axis;
use crate::camera::CameraPose;
use crate::options::UnitScale;

/// Result of picking a focus distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusPick {
    /// New focus distance in world units (never negative).
    pub distance: f64,
    /// Signed projection onto the optical axis before clamping.
    pub raw: f64,
    /// Whether the distance was clamped to 0 (point behind the camera, or a
    /// NaN projection).
    pub clamped: bool,
}

impl FocusPick {
    /// Returns the picked distance in millimetres.
    pub fn millimetres(&self, scale: UnitScale) -> f64 {
        scale.to_millimetres(self.distance)
    }
}

/// Receives focus distance write-backs (in millimetres).
pub trait FocusTarget {
    /// Sets the camera focus distance.
    fn set_focus_distance(&mut self, distance_mm: f64);
}

/// Projects `point` onto the optical axis and clamps it to a valid focus
/// distance.
///
/// Points behind the camera clamp to 0 with `clamped` set, so a negative focus
/// distance never reaches the optics model. A point with NaN coordinates is
/// clamped the same way and keeps its NaN `raw` value.
pub fn pick_focus(pose: &CameraPose, point: DVec3) -> FocusPick {
    let raw = project_onto_axis(pose, point);
    if raw.is_nan() {
        log::warn!("focus point {point} is not a number, clamping to 0");
        FocusPick {
            distance: 0.0,
            raw,
            clamped: true,
        }
    } else if raw < 0.0 {
        log::debug!("focus point {raw:.3} behind camera, clamping to 0");
        FocusPick {
            distance: 0.0,
            raw,
            clamped: true,
        }
    } else {
        FocusPick {
            distance: raw,
            raw,
            clamped: false,
        }
    }
}

/// Picks focus distances and writes them back to a camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusPicker {
    unit_scale: UnitScale,
}

impl FocusPicker {
    /// Creates a picker converting world units with `unit_scale`.
    pub fn new(unit_scale: UnitScale) -> Self {
        Self { unit_scale }
    }

    /// Picks the focus distance for `point` without writing it anywhere.
    pub fn pick(&self, pose: &CameraPose, point: DVec3) -> FocusPick {
        pick_focus(pose, point)
    }

    /// Picks the focus distance for `point` and writes it to `target`.
    ///
    /// A NaN projection leaves `target` untouched.
    pub fn apply<T: FocusTarget + ?Sized>(
        &self,
        target: &mut T,
        pose: &CameraPose,
        point: DVec3,
    ) -> FocusPick {
        let pick = pick_focus(pose, point);
        if pick.raw.is_nan() {
            return pick;
        }
        let distance_mm = pick.millimetres(self.unit_scale);
        log::info!("focus distance set to {distance_mm:.3} mm");
        target.set_focus_distance(distance_mm);
        pick
    }
}
