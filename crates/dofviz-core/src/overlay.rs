//! Overlay geometry for the depth-of-field envelope.
//!
//! Turns scalar [`DofLimits`] into world-space primitives anchored to the
//! camera's optical axis: planes at the near and far limits, markers at the
//! focus and hyperfocal distances, and line segments along the axis that split
//! the clip range into out-of-focus and in-focus parts.
//!
//! Everything here is rebuilt from scratch on every call. Distances are in
//! world units.

use std::iter::FusedIterator;

use glam::{DVec3, Vec4};

use crate::camera::{CameraPose, ClipRange};
use crate::optics::DofLimits;
use crate::options::OverlayStyle;

/// What an overlay primitive marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayRole {
    /// Near limit of acceptable sharpness.
    Near,
    /// Far limit of acceptable sharpness.
    Far,
    /// Focus distance.
    Focus,
    /// Hyperfocal distance.
    Hyperfocal,
}

impl OverlayRole {
    /// All roles in emission order.
    pub const ALL: [OverlayRole; 4] = [
        OverlayRole::Near,
        OverlayRole::Far,
        OverlayRole::Focus,
        OverlayRole::Hyperfocal,
    ];

    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            OverlayRole::Near => "near",
            OverlayRole::Far => "far",
            OverlayRole::Focus => "focus",
            OverlayRole::Hyperfocal => "hyperfocal",
        }
    }

    /// Returns the distance this role marks in `limits`, if any.
    pub fn distance(self, limits: &DofLimits) -> Option<f64> {
        match self {
            OverlayRole::Near => Some(limits.near),
            OverlayRole::Far => Some(limits.far),
            OverlayRole::Focus => limits.focus,
            OverlayRole::Hyperfocal => Some(limits.hyperfocal),
        }
    }
}

/// A square plane facing the camera at some depth along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlane {
    /// What this plane marks.
    pub role: OverlayRole,
    /// Distance along the optical axis.
    pub distance: f64,
    /// Center of the plane (on the optical axis).
    pub origin: DVec3,
    /// Plane normal, equal to the camera view direction.
    pub normal: DVec3,
    /// In-plane up direction, equal to the camera up direction.
    pub up: DVec3,
    /// Half the side length of the plane.
    pub half_extent: f64,
}

impl OverlayPlane {
    /// Returns the four corners, counter-clockwise seen from the camera.
    pub fn corners(&self) -> [DVec3; 4] {
        let right = self.normal.cross(self.up) * self.half_extent;
        let up = self.up * self.half_extent;
        [
            self.origin - right - up,
            self.origin + right - up,
            self.origin + right + up,
            self.origin - right + up,
        ]
    }
}

/// A point marker on the optical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayMarker {
    /// What this marker marks.
    pub role: OverlayRole,
    /// Distance along the optical axis.
    pub distance: f64,
    /// World position of the marker.
    pub position: DVec3,
}

/// A renderable overlay primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayPrimitive {
    /// A plane across the field of view.
    Plane(OverlayPlane),
    /// A point marker.
    Marker(OverlayMarker),
}

impl OverlayPrimitive {
    /// Returns the role of this primitive.
    pub fn role(&self) -> OverlayRole {
        match self {
            OverlayPrimitive::Plane(plane) => plane.role,
            OverlayPrimitive::Marker(marker) => marker.role,
        }
    }

    /// Returns the distance of this primitive along the optical axis.
    pub fn distance(&self) -> f64 {
        match self {
            OverlayPrimitive::Plane(plane) => plane.distance,
            OverlayPrimitive::Marker(marker) => marker.distance,
        }
    }

    /// Returns the point where this primitive crosses the optical axis.
    pub fn position(&self) -> DVec3 {
        match self {
            OverlayPrimitive::Plane(plane) => plane.origin,
            OverlayPrimitive::Marker(marker) => marker.position,
        }
    }
}

/// Lazily generated overlay primitives.
///
/// Yields at most one primitive per role, in [`OverlayRole::ALL`] order,
/// skipping distances that are infinite, negative or NaN. Clone the iterator
/// (or build a new one) to walk the sequence again.
#[derive(Debug, Clone)]
pub struct OverlayPrimitives {
    pose: CameraPose,
    limits: DofLimits,
    extent: f64,
    next_role: usize,
}

impl OverlayPrimitives {
    fn primitive(&self, role: OverlayRole) -> Option<OverlayPrimitive> {
        let distance = role.distance(&self.limits)?;
        if !(distance.is_finite() && distance >= 0.0) {
            return None;
        }
        let origin = self.pose.point_on_axis(distance);
        Some(match role {
            OverlayRole::Near | OverlayRole::Far => OverlayPrimitive::Plane(OverlayPlane {
                role,
                distance,
                origin,
                normal: self.pose.view_dir,
                up: self.pose.up_dir,
                half_extent: self.extent * distance,
            }),
            OverlayRole::Focus | OverlayRole::Hyperfocal => {
                OverlayPrimitive::Marker(OverlayMarker {
                    role,
                    distance,
                    position: origin,
                })
            }
        })
    }
}

impl Iterator for OverlayPrimitives {
    type Item = OverlayPrimitive;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&role) = OverlayRole::ALL.get(self.next_role) {
            self.next_role += 1;
            if let Some(primitive) = self.primitive(role) {
                return Some(primitive);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(OverlayRole::ALL.len().saturating_sub(self.next_role)))
    }
}

impl FusedIterator for OverlayPrimitives {}

/// Builds the overlay primitives for the given limits.
///
/// `extent` is the half-width of the field of view per unit distance (see
/// [`crate::optics::frustum_half_extent`]), so each plane fills the view at
/// its depth.
pub fn build_overlay(pose: &CameraPose, limits: &DofLimits, extent: f64) -> OverlayPrimitives {
    OverlayPrimitives {
        pose: *pose,
        limits: *limits,
        extent: extent.max(0.0),
        next_role: 0,
    }
}

/// Which part of the clip range a segment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Clip start to the near limit.
    OutOfFocusNear,
    /// Near limit to far limit.
    InFocus,
    /// Far limit to clip end.
    OutOfFocusFar,
}

impl SegmentKind {
    /// Returns whether the segment is inside the depth of field.
    pub fn is_in_focus(self) -> bool {
        self == SegmentKind::InFocus
    }
}

/// A line segment along the optical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySegment {
    /// Which part of the range this segment covers.
    pub kind: SegmentKind,
    /// Start point in world space.
    pub start: DVec3,
    /// End point in world space.
    pub end: DVec3,
}

impl OverlaySegment {
    /// Returns the two colored vertices of this segment.
    pub fn vertices(&self, style: &OverlayStyle) -> [LineVertex; 2] {
        let color = if self.kind.is_in_focus() {
            style.in_focus_color
        } else {
            style.out_of_focus_color
        };
        [
            LineVertex::new(self.start, color),
            LineVertex::new(self.end, color),
        ]
    }
}

/// GPU-compatible line vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World position.
    pub position: [f32; 3],
    /// RGBA color.
    pub color: [f32; 4],
}

impl LineVertex {
    /// Creates a vertex, narrowing the position to `f32`.
    pub fn new(position: DVec3, color: Vec4) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            color: color.to_array(),
        }
    }
}

/// Builds the axis segments splitting `clip` at the near and far limits.
///
/// An infinite far limit is drawn up to the clip end. Limits are clamped into
/// the clip range and empty segments are dropped.
pub fn build_segments(
    pose: &CameraPose,
    limits: &DofLimits,
    clip: ClipRange,
) -> Vec<OverlaySegment> {
    let near = clip.clamp(limits.near);
    let far = if limits.far.is_finite() {
        clip.clamp(limits.far)
    } else {
        clip.end
    };
    [
        (SegmentKind::OutOfFocusNear, clip.start, near),
        (SegmentKind::InFocus, near, far),
        (SegmentKind::OutOfFocusFar, far, clip.end),
    ]
    .into_iter()
    .filter(|&(_, from, to)| to > from)
    .map(|(kind, from, to)| OverlaySegment {
        kind,
        start: pose.point_on_axis(from),
        end: pose.point_on_axis(to),
    })
    .collect()
}

/// Flattens segments into a line-list vertex buffer.
pub fn segment_vertices(segments: &[OverlaySegment], style: &OverlayStyle) -> Vec<LineVertex> {
    segments
        .iter()
        .flat_map(|segment| segment.vertices(style))
        .collect()
}
