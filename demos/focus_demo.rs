//! Headless walkthrough of the depth-of-field overlay.
//!
//! Racks focus across a few picked points and prints the limits and overlay
//! primitives a host would draw. Run with `RUST_LOG=debug` to see clamping.

use dofviz::*;

fn describe(frame: &DofFrame) {
    println!("{}", frame.readout);
    for primitive in frame.primitives() {
        match primitive {
            OverlayPrimitive::Plane(plane) => println!(
                "  {:>10} plane  at {:8.3}  half-extent {:.3}",
                plane.role.name(),
                plane.distance,
                plane.half_extent
            ),
            OverlayPrimitive::Marker(marker) => println!(
                "  {:>10} marker at {:8.3}",
                marker.role.name(),
                marker.distance
            ),
        }
    }
    for segment in &frame.segments {
        println!(
            "  segment {:?}: {:.2} -> {:.2}",
            segment.kind, segment.start, segment.end
        );
    }
}

fn main() -> Result<()> {
    init_logging();

    let intrinsics = CameraIntrinsics::new(50.0, 36.0)
        .with_sensor_height(24.0)
        .with_f_stop(2.8)
        .with_focus_distance(5000.0);
    let eye = DVec3::new(0.0, -10.0, 1.5);
    let pose = CameraPose::look_at(eye, DVec3::new(0.0, 0.0, 1.5), DVec3::Z)?;
    let mut camera =
        StaticCamera::new(intrinsics, pose).with_clip_range(ClipRange::new(0.1, 100.0));

    let session = DofSession::new(DofOptions::default())?;
    describe(&session.refresh(&camera)?);

    let targets = [
        DVec3::new(0.5, -7.0, 1.0),  // close subject
        DVec3::new(-2.0, 20.0, 3.0), // past the hyperfocal distance
        DVec3::new(0.0, -12.0, 1.5), // behind the camera
    ];
    for target in targets {
        let pick = session.pick_focus(&mut camera, target)?;
        println!(
            "\npicked {target:.2} -> focus {:.3}{}",
            pick.distance,
            if pick.clamped { " (clamped)" } else { "" }
        );
        describe(&session.refresh(&camera)?);
    }

    Ok(())
}
