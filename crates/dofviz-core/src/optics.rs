//! Thin-lens depth-of-field model.
//!
//! Maps camera intrinsics and a focus distance to the hyperfocal distance and
//! the near/far limits of acceptable sharpness. All lengths are millimetres.
//!
//! Numeric edge cases never surface as errors: a disabled aperture or focus
//! yields the "everything in focus" limits, and a far limit whose denominator
//! approaches zero becomes `f64::INFINITY`.

use serde::{Deserialize, Serialize};

use crate::camera::CameraIntrinsics;
use crate::error::{DofError, Result};

/// Relative distance to the hyperfocal distance below which the far limit is
/// taken to be at infinity.
pub const SINGULARITY_EPSILON: f64 = 1e-9;

/// Relative offset `(s - f) / (H - f)` below which the subject is treated as
/// lying on the focal length (near limit 0).
pub const CROSSOVER_EPSILON: f64 = 1e-12;

/// Convention used to derive the circle-of-confusion diameter.
///
/// "Acceptably sharp" is a viewing convention, not an optical law, so the
/// diameter is a tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CircleOfConfusion {
    /// Sensor width divided by the given divisor.
    SensorWidthFraction(f64),
    /// Sensor diagonal divided by the given divisor (the "d/1500" rule).
    SensorDiagonalFraction(f64),
    /// Fixed diameter in millimetres.
    Fixed(f64),
}

impl CircleOfConfusion {
    /// Divisor of the default sensor-width convention.
    pub const DEFAULT_WIDTH_DIVISOR: f64 = 1000.0;

    /// Divisor of the diagonal-based "d/1500" convention.
    pub const DIAGONAL_DIVISOR: f64 = 1500.0;

    /// The classic d/1500 diagonal convention.
    pub fn diagonal() -> Self {
        CircleOfConfusion::SensorDiagonalFraction(Self::DIAGONAL_DIVISOR)
    }

    /// Returns the circle-of-confusion diameter in millimetres.
    pub fn diameter(self, intrinsics: &CameraIntrinsics) -> Result<f64> {
        let c = match self {
            CircleOfConfusion::SensorWidthFraction(divisor) => intrinsics.sensor_width / divisor,
            CircleOfConfusion::SensorDiagonalFraction(divisor) => {
                intrinsics.sensor_diagonal() / divisor
            }
            CircleOfConfusion::Fixed(c) => c,
        };
        if c > 0.0 && c.is_finite() {
            Ok(c)
        } else {
            Err(DofError::InvalidCircleOfConfusion(c))
        }
    }
}

impl Default for CircleOfConfusion {
    fn default() -> Self {
        CircleOfConfusion::SensorWidthFraction(Self::DEFAULT_WIDTH_DIVISOR)
    }
}

/// Depth-of-field limits derived from a camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DofLimits {
    /// Hyperfocal distance, or infinity when depth of field is disabled.
    pub hyperfocal: f64,
    /// Near limit of acceptable sharpness (>= 0).
    pub near: f64,
    /// Far limit of acceptable sharpness, possibly infinite.
    pub far: f64,
    /// Focus distance the limits were computed for, if known.
    pub focus: Option<f64>,
}

impl DofLimits {
    /// Limits for a camera without depth of field: everything is sharp.
    pub fn everything_in_focus(focus: Option<f64>) -> Self {
        Self {
            hyperfocal: f64::INFINITY,
            near: 0.0,
            far: f64::INFINITY,
            focus,
        }
    }

    /// Returns true if these are the "everything in focus" limits.
    pub fn is_everything_in_focus(&self) -> bool {
        self.hyperfocal == f64::INFINITY && self.near == 0.0 && self.far == f64::INFINITY
    }

    /// Total depth of field (far - near), infinite when the far limit is.
    pub fn depth_of_field(&self) -> f64 {
        self.far - self.near
    }

    /// Sharp depth in front of the focus distance.
    pub fn front_depth(&self) -> Option<f64> {
        self.focus.map(|s| (s - self.near).max(0.0))
    }

    /// Sharp depth behind the focus distance.
    pub fn rear_depth(&self) -> Option<f64> {
        self.focus.map(|s| (self.far - s).max(0.0))
    }

    /// Near limit when focused at the hyperfocal distance (H / 2).
    pub fn hyperfocal_near_limit(&self) -> f64 {
        self.hyperfocal / 2.0
    }

    /// Returns the limits with every distance multiplied by `factor`.
    ///
    /// Used to convert between millimetres and scene units. Infinity and zero
    /// are preserved.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            hyperfocal: self.hyperfocal * factor,
            near: self.near * factor,
            far: self.far * factor,
            focus: self.focus.map(|s| s * factor),
        }
    }
}

/// Hyperfocal distance `f² / (N c) + f`.
pub fn hyperfocal_distance(focal_length: f64, f_number: f64, coc: f64) -> f64 {
    focal_length * focal_length / (f_number * coc) + focal_length
}

/// Computes the depth-of-field limits for the given intrinsics.
///
/// Fails only when the intrinsics or circle-of-confusion convention violate
/// their preconditions.
pub fn compute_limits(intrinsics: &CameraIntrinsics, coc: CircleOfConfusion) -> Result<DofLimits> {
    intrinsics.validate()?;
    let c = coc.diameter(intrinsics)?;

    let focus = intrinsics.focus_distance;
    let (Some(s), Some(n)) = (focus, intrinsics.f_number()) else {
        log::debug!("depth of field disabled, everything in focus");
        return Ok(DofLimits::everything_in_focus(focus));
    };

    let f = intrinsics.focal_length;
    let hyperfocal = hyperfocal_distance(f, n, c);
    // H - f without the cancellation
    let a = f * f / (n * c);

    let near = near_limit(s, f, a);
    let mut far = far_limit(s, f, a, hyperfocal);
    // far > near for every positive focus, even when the quotient underflows
    if s > 0.0 && far <= near {
        far = next_above(near);
    }

    Ok(DofLimits {
        hyperfocal,
        near,
        far,
        focus,
    })
}

/// Smallest `f64` greater than a finite non-negative `x`.
fn next_above(x: f64) -> f64 {
    f64::from_bits(x.to_bits() + 1)
}

/// `s (H - f) / (H + s - 2f)`, written as `s / (1 + (s - f) / a)`.
fn near_limit(s: f64, f: f64, a: f64) -> f64 {
    // No real image forms for subjects inside (or on) the focal length.
    if s <= f || s - f <= CROSSOVER_EPSILON * a {
        return 0.0;
    }
    if s.is_infinite() {
        return a;
    }
    (s / (1.0 + (s - f) / a)).max(0.0)
}

/// `s (H - f) / (H - s)`, infinite at and beyond the hyperfocal distance.
fn far_limit(s: f64, f: f64, a: f64, hyperfocal: f64) -> f64 {
    if s >= hyperfocal || hyperfocal - s <= SINGULARITY_EPSILON * hyperfocal {
        return f64::INFINITY;
    }
    let far = s * a / (a - (s - f));
    if far.is_finite() {
        far
    } else {
        f64::INFINITY
    }
}

/// Half-width of the field of view per unit distance along the axis.
///
/// A plane at distance `d` spans `±d * frustum_half_extent` across.
pub fn frustum_half_extent(intrinsics: &CameraIntrinsics) -> f64 {
    intrinsics.sensor_width / (2.0 * intrinsics.focal_length)
}
