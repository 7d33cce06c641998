use std::path::Path;

use image::{GrayImage, Luma};

use scanner_core::camera::{CameraBackend, ReplayCamera, StreamRequest, TrackConstraint};
use scanner_core::config::{CameraRigConfig, ReplayDeviceConfig, RigPermission};
use scanner_core::error::ScanError;
use scanner_core::model::{CameraConstraints, FacingMode};

fn write_frame(path: &Path, shade: u8) {
    GrayImage::from_pixel(4, 3, Luma([shade])).save(path).unwrap();
}

fn device(label: &str, facing: FacingMode, frames: &str, torch: bool) -> ReplayDeviceConfig {
    ReplayDeviceConfig {
        label: label.into(),
        facing,
        frames: frames.into(),
        torch,
        manual_focus: torch,
    }
}

/// Rig with a two-frame rear camera and a single-image front camera.
fn rig(dir: &Path) -> CameraRigConfig {
    let back = dir.join("back");
    std::fs::create_dir(&back).unwrap();
    write_frame(&back.join("002.png"), 200);
    write_frame(&back.join("001.png"), 10);
    std::fs::write(back.join("notes.txt"), "ignored").unwrap();
    write_frame(&dir.join("front.png"), 90);

    CameraRigConfig {
        permission: RigPermission::Granted,
        devices: vec![
            device("Back Camera", FacingMode::Environment, "back", true),
            device("Front Camera", FacingMode::User, "front.png", false),
        ],
    }
}

#[test]
fn test_enumerates_configured_devices() {
    let dir = tempfile::tempdir().unwrap();
    let camera = ReplayCamera::from_config(&rig(dir.path()), Some(dir.path()));
    let inputs = camera.video_inputs().unwrap();
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0].id, "replay-0");
    assert_eq!(inputs[1].label, "Front Camera");
    assert_eq!(inputs[1].facing, Some(FacingMode::User));
}

#[test]
fn test_frames_replay_in_name_order_and_loop() {
    let dir = tempfile::tempdir().unwrap();
    let camera = ReplayCamera::from_config(&rig(dir.path()), Some(dir.path()));
    let mut stream = camera.open_stream(&StreamRequest::AnyVideo).unwrap();
    let track = stream.video_track_mut().unwrap();

    let shades: Vec<u8> = (0..3)
        .map(|_| track.grab_frame().unwrap().unwrap().get_pixel(0, 0).0[0])
        .collect();
    assert_eq!(shades, vec![10, 200, 10]);
}

#[test]
fn test_constraints_select_by_facing() {
    let dir = tempfile::tempdir().unwrap();
    let camera = ReplayCamera::from_config(&rig(dir.path()), Some(dir.path()));
    let user = CameraConstraints::default().switched();
    let stream = camera.open_stream(&StreamRequest::Constraints(user)).unwrap();
    assert_eq!(stream.video_track().unwrap().label(), "Front Camera");
}

#[test]
fn test_missing_facing_falls_back_to_first_camera() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = rig(dir.path());
    config.devices.truncate(1);
    let camera = ReplayCamera::from_config(&config, Some(dir.path()));
    let user = CameraConstraints::default().switched();
    let stream = camera.open_stream(&StreamRequest::Constraints(user)).unwrap();
    assert_eq!(stream.video_track().unwrap().label(), "Back Camera");
}

#[test]
fn test_unknown_device_id() {
    let dir = tempfile::tempdir().unwrap();
    let camera = ReplayCamera::from_config(&rig(dir.path()), Some(dir.path()));
    let opened = camera.open_stream(&StreamRequest::Device("replay-9".into()));
    assert!(matches!(opened, Err(ScanError::NoCamera)));
}

#[test]
fn test_denied_rig_rejects_streams() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = rig(dir.path());
    config.permission = RigPermission::Denied;
    let camera = ReplayCamera::from_config(&config, Some(dir.path()));
    let opened = camera.open_stream(&StreamRequest::AnyVideo);
    assert!(matches!(opened, Err(ScanError::PermissionDenied(_))));
    assert_eq!(camera.video_inputs().unwrap().len(), 2);
}

#[test]
fn test_empty_rig_has_no_camera() {
    let camera = ReplayCamera::from_config(&CameraRigConfig::default(), None);
    let opened = camera.open_stream(&StreamRequest::AnyVideo);
    assert!(matches!(opened, Err(ScanError::NoCamera)));
}

#[test]
fn test_track_constraints_follow_device_support() {
    let dir = tempfile::tempdir().unwrap();
    let camera = ReplayCamera::from_config(&rig(dir.path()), Some(dir.path()));

    let mut back = camera.open_stream(&StreamRequest::Device("replay-0".into())).unwrap();
    let track = back.video_track_mut().unwrap();
    assert!(track.capabilities().torch);
    assert!(track.capabilities().supports_manual_focus());
    track.apply(&TrackConstraint::Torch(true)).unwrap();
    track
        .apply(&TrackConstraint::ManualFocus {
            distance: 0.5,
            point: (0.5, 0.5),
        })
        .unwrap();

    let mut front = camera.open_stream(&StreamRequest::Device("replay-1".into())).unwrap();
    let track = front.video_track_mut().unwrap();
    assert!(!track.capabilities().supports_manual_focus());
    let err = track.apply(&TrackConstraint::Torch(true)).unwrap_err();
    assert!(matches!(err, ScanError::ConstraintApply(_)));
    track.apply(&TrackConstraint::ContinuousFocus).unwrap();
}

#[test]
fn test_stopped_track_is_closed() {
    let dir = tempfile::tempdir().unwrap();
    let camera = ReplayCamera::from_config(&rig(dir.path()), Some(dir.path()));
    let mut stream = camera.open_stream(&StreamRequest::AnyVideo).unwrap();
    assert!(stream.is_live());
    stream.stop_all();
    assert!(!stream.is_live());

    let track = stream.video_track_mut().unwrap();
    assert!(matches!(track.grab_frame(), Err(ScanError::StreamClosed)));
    assert!(matches!(
        track.apply(&TrackConstraint::ContinuousFocus),
        Err(ScanError::StreamClosed)
    ));
}

#[test]
fn test_missing_frames_surface_as_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = CameraRigConfig {
        permission: RigPermission::Granted,
        devices: vec![device("Ghost", FacingMode::Environment, "nope.png", false)],
    };
    let camera = ReplayCamera::from_config(&config, Some(dir.path()));
    assert!(camera.open_stream(&StreamRequest::AnyVideo).is_err());
}

#[test]
fn test_open_stream_lists_frames_without_decoding() {
    let dir = tempfile::tempdir().unwrap();
    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).unwrap();
    write_frame(&frames.join("001.png"), 40);
    std::fs::write(frames.join("002.png"), b"not a png").unwrap();

    let config = CameraRigConfig {
        permission: RigPermission::Granted,
        devices: vec![device("Back Camera", FacingMode::Environment, "frames", false)],
    };
    let camera = ReplayCamera::from_config(&config, Some(dir.path()));
    let mut stream = camera.open_stream(&StreamRequest::AnyVideo).unwrap();
    let track = stream.video_track_mut().unwrap();

    assert_eq!(track.grab_frame().unwrap().unwrap().get_pixel(0, 0).0[0], 40);
    assert!(matches!(track.grab_frame(), Err(ScanError::ImageError(_))));
    assert!(track.grab_frame().unwrap().is_some());
}

#[test]
fn test_empty_frame_directory_yields_no_frames() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("empty")).unwrap();
    let config = CameraRigConfig {
        permission: RigPermission::Granted,
        devices: vec![device("Back Camera", FacingMode::Environment, "empty", false)],
    };
    let camera = ReplayCamera::from_config(&config, Some(dir.path()));
    let mut stream = camera.open_stream(&StreamRequest::AnyVideo).unwrap();
    assert!(stream.video_track_mut().unwrap().grab_frame().unwrap().is_none());
}
