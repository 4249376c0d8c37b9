//! Projection of world points onto the camera's optical axis.

use glam::DVec3;

use crate::camera::CameraPose;

/// Returns the signed distance of `point` along the optical axis.
///
/// This is a scalar projection, not a Euclidean distance: points behind the
/// camera yield negative values.
pub fn project_onto_axis(pose: &CameraPose, point: DVec3) -> f64 {
    (point - pose.position).dot(pose.view_dir)
}

/// Returns the point on the optical axis closest to `point`.
pub fn closest_point_on_axis(pose: &CameraPose, point: DVec3) -> DVec3 {
    pose.point_on_axis(project_onto_axis(pose, point))
}
