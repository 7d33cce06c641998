#[allow(dead_code)]
mod common;

use common::{rear_and_front, FakeCamera};
use scanner_core::camera::StreamRequest;
use scanner_core::error::ScanError;
use scanner_core::permission::{probe_camera, PermissionGate, PermissionState};
use scanner_core::routing::{Navigator, Route};

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

#[test]
fn test_probe_grants_and_releases_stream() {
    let camera = FakeCamera::new(rear_and_front());
    assert_eq!(probe_camera(&camera), PermissionState::Granted);

    let opens = camera.opens();
    assert_eq!(opens.len(), 1);
    assert_eq!(opens[0].request, StreamRequest::AnyVideo);
    assert!(!opens[0].state.is_live());
}

#[test]
fn test_probe_denied_by_user() {
    let camera = FakeCamera::denied();
    assert_eq!(probe_camera(&camera), PermissionState::Denied);
}

#[test]
fn test_probe_without_devices_is_denied() {
    let camera = FakeCamera::new(Vec::new());
    assert_eq!(probe_camera(&camera), PermissionState::Denied);
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

#[test]
fn test_gate_starts_unknown() {
    let gate = PermissionGate::new();
    assert_eq!(gate.state(), PermissionState::Unknown);
    assert!(!gate.allows_scanning());
}

#[test]
fn test_gate_probes_only_once() {
    let camera = FakeCamera::new(rear_and_front());
    let mut gate = PermissionGate::new();

    assert_eq!(gate.check_camera_availability(&camera), PermissionState::Granted);
    assert_eq!(gate.check_camera_availability(&camera), PermissionState::Granted);
    assert_eq!(camera.open_count(), 1);
    assert!(gate.allows_scanning());
}

#[test]
fn test_gate_denied_blocks_scanning() {
    let camera = FakeCamera::denied();
    let mut gate = PermissionGate::new();
    assert_eq!(gate.check_camera_availability(&camera), PermissionState::Denied);
    assert!(!gate.allows_scanning());
}

#[test]
fn test_gate_keeps_first_resolution() {
    let mut gate = PermissionGate::new();
    assert_eq!(gate.resolve(PermissionState::Denied), PermissionState::Denied);
    assert_eq!(gate.resolve(PermissionState::Granted), PermissionState::Denied);

    let camera = FakeCamera::new(rear_and_front());
    assert_eq!(gate.check_camera_availability(&camera), PermissionState::Denied);
    assert_eq!(camera.open_count(), 0);
}

#[test]
fn test_gate_resolve_unknown_is_noop() {
    let mut gate = PermissionGate::new();
    gate.resolve(PermissionState::Unknown);
    assert_eq!(gate.resolve(PermissionState::Granted), PermissionState::Granted);
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[test]
fn test_navigator_blocks_scanner_until_granted() {
    let mut nav = Navigator::new();
    let mut gate = PermissionGate::new();
    assert_eq!(nav.current(), Route::Landing);

    let err = nav.navigate(Route::Scanner, &gate).unwrap_err();
    assert!(matches!(err, ScanError::PermissionDenied(_)));
    assert_eq!(nav.current(), Route::Landing);

    gate.resolve(PermissionState::Granted);
    assert_eq!(nav.navigate(Route::Scanner, &gate).unwrap(), Route::Scanner);
    assert_eq!(nav.current(), Route::Scanner);
}

#[test]
fn test_navigator_back_returns_to_landing() {
    let mut nav = Navigator::new();
    let mut gate = PermissionGate::new();
    gate.resolve(PermissionState::Granted);
    nav.navigate(Route::Scanner, &gate).unwrap();
    assert_eq!(nav.back(), Route::Landing);
    assert_eq!(Route::Scanner.to_string(), "/scanner");
    assert_eq!(Route::Landing.to_string(), "/");
}

#[test]
fn test_landing_is_always_reachable() {
    let mut nav = Navigator::new();
    let gate = PermissionGate::new();
    assert_eq!(nav.navigate(Route::Landing, &gate).unwrap(), Route::Landing);
}
