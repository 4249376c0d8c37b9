//! Integration tests for the refresh and focus-pick paths.
//!
//! All tests use a metre-scaled scene (the default unit scale) with a 50mm
//! full-frame lens, so the numbers line up with the usual photography tables.

use dofviz::*;

fn full_frame_camera(focus_mm: f64) -> StaticCamera {
    let intrinsics = CameraIntrinsics::new(50.0, 36.0)
        .with_sensor_height(24.0)
        .with_f_stop(2.8)
        .with_focus_distance(focus_mm);
    let pose = CameraPose::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z, DVec3::Y)
        .expect("valid pose");
    StaticCamera::new(intrinsics, pose)
}

fn session() -> DofSession {
    DofSession::new(DofOptions::default()).expect("default options are valid")
}

#[test]
fn test_refresh_converts_to_world_units() {
    let frame = session().refresh(&full_frame_camera(5000.0)).unwrap();

    assert!(frame.visible);
    assert!((frame.limits_mm.near - 4168.111_612).abs() < 1e-3);
    assert!((frame.limits.near - 4.168_111_612).abs() < 1e-6);
    assert!((frame.limits.far - 6.246_751_689).abs() < 1e-6);
    assert!((frame.limits.focus.unwrap() - 5.0).abs() < 1e-12);
    assert_eq!(
        frame.readout.to_string(),
        "Focus Distance: 5.000 Near Limit: 4.168 Far Limit: 6.247"
    );
}

#[test]
fn test_refresh_primitives_fill_field_of_view() {
    let frame = session().refresh(&full_frame_camera(5000.0)).unwrap();
    let primitives: Vec<_> = frame.primitives().collect();

    let roles: Vec<_> = primitives.iter().map(OverlayPrimitive::role).collect();
    assert_eq!(roles, OverlayRole::ALL.to_vec());

    let OverlayPrimitive::Plane(near) = primitives[0] else {
        panic!("near limit should be a plane");
    };
    // 36mm / (2 * 50mm) = 0.36 half-width per metre of depth
    assert!((near.half_extent - 0.36 * frame.limits.near).abs() < 1e-9);
    assert!((near.origin.z - (10.0 - frame.limits.near)).abs() < 1e-9);

    // the iterator can be walked again
    assert_eq!(frame.primitives().count(), primitives.len());
}

#[test]
fn test_refresh_beyond_hyperfocal_omits_far() {
    let frame = session().refresh(&full_frame_camera(30_000.0)).unwrap();

    assert_eq!(frame.limits.far, f64::INFINITY);
    let roles: Vec<_> = frame.primitives().map(|p| p.role()).collect();
    assert_eq!(
        roles,
        vec![OverlayRole::Near, OverlayRole::Focus, OverlayRole::Hyperfocal]
    );
    assert!(frame.readout.to_string().ends_with("Far Limit: inf"));
}

#[test]
fn test_refresh_disabled_aperture_draws_nothing() {
    let mut camera = full_frame_camera(5000.0);
    camera.intrinsics.aperture = None;
    let camera = camera.with_clip_range(ClipRange::new(0.1, 100.0));
    let frame = session().refresh(&camera).unwrap();

    assert!(frame.limits.is_everything_in_focus());
    assert!(!frame.visible);
    assert_eq!(frame.primitives().count(), 0);
    assert!(frame.segments.is_empty());
}

#[test]
fn test_refresh_disabled_option_draws_nothing() {
    let options = DofOptions {
        enabled: false,
        ..DofOptions::default()
    };
    let frame = DofSession::new(options)
        .unwrap()
        .refresh(&full_frame_camera(5000.0))
        .unwrap();
    assert!(!frame.visible);
    assert_eq!(frame.primitives().count(), 0);
    // limits are still reported
    assert!(frame.limits.far.is_finite());
}

#[test]
fn test_refresh_invalid_intrinsics_fail() {
    let mut camera = full_frame_camera(5000.0);
    camera.intrinsics.focal_length = 0.0;
    assert!(matches!(
        session().refresh(&camera),
        Err(DofError::InvalidIntrinsics { .. })
    ));
}

#[test]
fn test_refresh_segments_and_vertices() {
    let camera = full_frame_camera(5000.0).with_clip_range(ClipRange::new(0.1, 100.0));
    let session = session();
    let frame = session.refresh(&camera).unwrap();

    let kinds: Vec<_> = frame.segments.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SegmentKind::OutOfFocusNear,
            SegmentKind::InFocus,
            SegmentKind::OutOfFocusFar
        ]
    );
    let vertices = frame.line_vertices(session.options());
    assert_eq!(vertices.len(), 6);
    assert_eq!(vertices[2].color, [0.0, 1.0, 0.0, 0.8]);
}

#[test]
fn test_pick_focus_writes_back_and_refreshes() {
    let session = session();
    let mut camera = full_frame_camera(5000.0);

    // 8m in front of the camera, off to the side
    let pick = session
        .pick_focus(&mut camera, DVec3::new(3.0, -1.0, 2.0))
        .unwrap();
    assert!(!pick.clamped);
    assert!((pick.distance - 8.0).abs() < 1e-12);
    assert!((camera.intrinsics.focus_distance.unwrap() - 8000.0).abs() < 1e-9);

    let frame = session.refresh(&camera).unwrap();
    assert!((frame.limits.focus.unwrap() - 8.0).abs() < 1e-12);
}

#[test]
fn test_pick_focus_behind_camera_clamps_to_zero() {
    let session = session();
    let mut camera = full_frame_camera(5000.0);

    let pick = session
        .pick_focus(&mut camera, DVec3::new(0.0, 0.0, 12.0))
        .unwrap();
    assert!(pick.clamped);
    assert_eq!(pick.distance, 0.0);
    assert_eq!(camera.intrinsics.focus_distance, Some(0.0));

    // a zero focus distance is still a valid refresh
    let frame = session.refresh(&camera).unwrap();
    assert_eq!(frame.limits.near, 0.0);
}

#[test]
fn test_unnormalized_pose_matches_unit_pose() {
    let session = session();
    let unit = full_frame_camera(5000.0).with_clip_range(ClipRange::new(0.1, 100.0));
    let mut stretched = unit.clone();
    stretched.pose.view_dir = DVec3::new(0.0, 0.0, -4.0);
    stretched.pose.up_dir = DVec3::new(0.0, 2.5, 0.0);

    let expected = session.refresh(&unit).unwrap();
    let frame = session.refresh(&stretched).unwrap();
    assert_eq!(frame.pose, expected.pose);
    let origins: Vec<_> = frame.primitives().map(|p| p.position()).collect();
    let expected_origins: Vec<_> = expected.primitives().map(|p| p.position()).collect();
    assert_eq!(origins, expected_origins);
    assert!((origins[0].z - (10.0 - frame.limits.near)).abs() < 1e-9);
    assert_eq!(frame.segments, expected.segments);

    let pick = session
        .pick_focus(&mut stretched, DVec3::new(3.0, -1.0, 2.0))
        .unwrap();
    assert!((pick.distance - 8.0).abs() < 1e-12);
    assert!((stretched.intrinsics.focus_distance.unwrap() - 8000.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_pose_fails_without_writing() {
    let session = session();
    let mut camera = full_frame_camera(5000.0);
    camera.pose.view_dir = DVec3::ZERO;

    assert!(matches!(
        session.refresh(&camera),
        Err(DofError::InvalidPose(_))
    ));
    assert!(matches!(
        session.pick_focus(&mut camera, DVec3::new(0.0, 0.0, 2.0)),
        Err(DofError::InvalidPose(_))
    ));
    assert_eq!(camera.intrinsics.focus_distance, Some(5000.0));
}

#[test]
fn test_focus_object_overrides_focus_distance() {
    let camera = full_frame_camera(1000.0).with_focus_object(DVec3::new(0.5, 0.5, 5.0));
    let frame = session().refresh(&camera).unwrap();

    let pick = frame.focus_object_pick.expect("focus object was set");
    assert!((pick.distance - 5.0).abs() < 1e-12);
    assert!((frame.limits_mm.focus.unwrap() - 5000.0).abs() < 1e-9);
}

#[test]
fn test_diagonal_convention_from_json_options() {
    let options = DofOptions::from_json_str(
        r#"{ "circle_of_confusion": { "SensorDiagonalFraction": 1500.0 } }"#,
    )
    .unwrap();
    let frame = DofSession::new(options)
        .unwrap()
        .refresh(&full_frame_camera(5000.0))
        .unwrap();
    assert!((frame.limits_mm.hyperfocal - 31_004.252_021_5).abs() < 1e-3);
}

#[test]
fn test_readout_serializes() {
    let frame = session().refresh(&full_frame_camera(5000.0)).unwrap();
    let json = serde_json::to_value(frame.readout).unwrap();
    assert!((json["focus"].as_f64().unwrap() - 5.0).abs() < 1e-12);
}

mod picking {
    use dofviz::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_cursor_behind_camera_never_writes_negative_focus(
            behind in 1e-6f64..1e4,
            x in -1e3f64..1e3,
            y in -1e3f64..1e3,
        ) {
            let eye = DVec3::new(1.0, 2.0, 3.0);
            let pose = CameraPose::look_at(eye, DVec3::ZERO, DVec3::Z).unwrap();
            let intrinsics = CameraIntrinsics::new(35.0, 36.0).with_f_stop(4.0);
            let mut camera = StaticCamera::new(intrinsics, pose);
            let cursor = pose.point_on_axis(-behind) + x * pose.right_dir() + y * pose.up_dir;

            let pick = DofSession::default()
                .pick_focus(&mut camera, cursor)
                .unwrap();
            prop_assert!(pick.clamped);
            prop_assert_eq!(pick.distance, 0.0);
            prop_assert_eq!(camera.intrinsics.focus_distance, Some(0.0));
        }
    }
}
