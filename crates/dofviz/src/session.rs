//! Refresh and focus-pick orchestration.

use dofviz_core::{
    build_overlay, build_segments, compute_limits, frustum_half_extent, pick_focus,
    segment_vertices, CameraPose, DVec3, DofLimits, DofOptions, FocusPick, FocusPicker,
    FocusTarget, LineVertex, OverlayPrimitive, OverlaySegment, Result,
};

use crate::readout::DofReadout;
use crate::source::CameraSource;

/// Everything the host needs to draw one frame of the overlay.
#[derive(Debug, Clone)]
pub struct DofFrame {
    /// Camera pose the frame was built for.
    pub pose: CameraPose,
    /// Limits in millimetres.
    pub limits_mm: DofLimits,
    /// Limits in world units.
    pub limits: DofLimits,
    /// Plane half-extent per unit distance.
    pub extent: f64,
    /// Whether there is anything to draw.
    pub visible: bool,
    /// Axis line segments (empty without a clip range).
    pub segments: Vec<OverlaySegment>,
    /// Focus/near/far readout.
    pub readout: DofReadout,
    /// Focus derived from the tracked focus object, if any.
    pub focus_object_pick: Option<FocusPick>,
}

impl DofFrame {
    /// Returns the overlay primitives for this frame.
    ///
    /// Empty when the frame is not visible. The iterator is lazy and can be
    /// cloned to walk it again.
    pub fn primitives(&self) -> impl Iterator<Item = OverlayPrimitive> + Clone {
        self.visible
            .then(|| build_overlay(&self.pose, &self.limits, self.extent))
            .into_iter()
            .flatten()
    }

    /// Returns the axis segments as a line-list vertex buffer.
    pub fn line_vertices(&self, options: &DofOptions) -> Vec<LineVertex> {
        segment_vertices(&self.segments, &options.overlay)
    }
}

/// Drives the depth-of-field overlay for one host view.
///
/// The session holds only options; camera state is read from the
/// [`CameraSource`] on every call.
#[derive(Debug, Clone)]
pub struct DofSession {
    options: DofOptions,
    picker: FocusPicker,
}

impl DofSession {
    /// Creates a session with the given options.
    pub fn new(options: DofOptions) -> Result<Self> {
        options.validate()?;
        let picker = FocusPicker::new(options.unit_scale);
        Ok(Self { options, picker })
    }

    /// Returns the current options.
    pub fn options(&self) -> &DofOptions {
        &self.options
    }

    /// Replaces the options.
    pub fn set_options(&mut self, options: DofOptions) -> Result<()> {
        options.validate()?;
        self.picker = FocusPicker::new(options.unit_scale);
        self.options = options;
        Ok(())
    }

    /// Recomputes limits and overlay geometry from the camera's current state.
    ///
    /// Call whenever the host considers the overlay stale (camera property
    /// change, viewport redraw). The camera pose is re-normalized first, so a
    /// source may hand out unnormalized directions.
    pub fn refresh<C: CameraSource + ?Sized>(&self, camera: &C) -> Result<DofFrame> {
        let pose = camera.pose().normalized()?;
        let mut intrinsics = camera.intrinsics();
        let scale = self.options.unit_scale;

        let focus_object_pick = camera.focus_object().map(|position| {
            let pick = pick_focus(&pose, position);
            intrinsics.focus_distance = Some(pick.millimetres(scale));
            pick
        });

        let limits_mm = compute_limits(&intrinsics, self.options.circle_of_confusion)?;
        let limits = limits_mm.scaled(scale.to_world(1.0));
        let extent = frustum_half_extent(&intrinsics) * self.options.extent_scale;
        let visible = self.options.enabled && !limits.is_everything_in_focus();

        let segments = match camera.clip_range() {
            Some(clip) if visible => build_segments(&pose, &limits, clip),
            _ => Vec::new(),
        };

        let readout = DofReadout::from(&limits);
        log::trace!("dof refresh: {readout}");

        Ok(DofFrame {
            pose,
            limits_mm,
            limits,
            extent,
            visible,
            segments,
            readout,
            focus_object_pick,
        })
    }

    /// Sets the camera's focus distance from a picked world point.
    ///
    /// The point is projected onto the optical axis; points behind the camera
    /// set the focus distance to 0 and report `clamped`. Cameras tracking a
    /// focus object are still written, but the object keeps overriding the
    /// stored distance on refresh.
    ///
    /// Fails only if the camera pose is degenerate (zero view direction or a
    /// non-finite position); the camera is not written in that case.
    pub fn pick_focus<C: CameraSource + FocusTarget + ?Sized>(
        &self,
        camera: &mut C,
        cursor: DVec3,
    ) -> Result<FocusPick> {
        let pose = camera.pose().normalized()?;
        if camera.focus_object().is_some() {
            log::warn!("camera tracks a focus object, picked distance will be overridden");
        }
        Ok(self.picker.apply(camera, &pose, cursor))
    }
}

impl Default for DofSession {
    fn default() -> Self {
        Self {
            options: DofOptions::default(),
            picker: FocusPicker::default(),
        }
    }
}
