//! Integration tests for camera negotiation and capture startup
//!
//! These tests drive the full session path: enumerate, negotiate, open a
//! stream, attach it to the sink, and sample frames.

use std::sync::Arc;

use qrscan_capture::*;

fn smartphone_devices() -> Vec<DeviceDescriptor> {
    vec![
        DeviceDescriptor::audio("Built-in Microphone", "audio-0"),
        DeviceDescriptor::video("camera2 0, facing front", "front-0"),
        DeviceDescriptor::video("camera2 1, facing back", "back-0"),
    ]
}

// ============================================================================
// NEGOTIATION PROPERTIES
// ============================================================================

#[tokio::test]
async fn test_negotiated_constraint_pins_enumerated_back_camera() {
    let devices = MockMediaDevices::with_devices(smartphone_devices());

    let constraints = negotiate_constraints(&devices).await.unwrap();

    // The pinned deviceId must come from the enumeration, be a video input,
    // and carry a "back" label.
    match &constraints.video {
        VideoConstraint::Device { exact } => {
            let descriptors = devices.enumerate().await.unwrap();
            let chosen = descriptors
                .iter()
                .find(|d| &d.device_id == exact)
                .expect("pinned device must be present in the enumeration");
            assert_eq!(chosen.kind, DeviceKind::VideoInput);
            assert!(chosen.label.contains("back"));
        }
        VideoConstraint::Any => panic!("Expected a pinned device"),
    }
}

#[tokio::test]
async fn test_negotiation_never_requests_audio() {
    let devices = MockMediaDevices::with_devices(smartphone_devices());
    let constraints = negotiate_constraints(&devices).await.unwrap();
    assert!(!constraints.audio);

    let devices = MockMediaDevices::with_devices(vec![]).prompting();
    let constraints = negotiate_constraints(&devices).await.unwrap();
    assert!(!constraints.audio);
}

// ============================================================================
// CAPTURE STARTUP
// ============================================================================

#[tokio::test]
async fn test_start_capture_attaches_stream_for_pinned_device() {
    let sink = Arc::new(MockVideoSink::new(1200, 800));
    let devices = Arc::new(MockMediaDevices::with_devices(smartphone_devices()));
    let mut session =
        CaptureSession::initialize(sink.clone(), devices.clone(), DEFAULT_FRAME_WIDTH);

    session.start_capture().await.unwrap();

    let recorded = devices.recorded_constraints();
    assert_eq!(recorded.len(), 1);
    assert_eq!(
        recorded[0].video,
        VideoConstraint::Device {
            exact: "back-0".to_string()
        }
    );
    assert!(sink.attached_stream().is_some());
}

#[tokio::test]
async fn test_start_capture_unconstrained_without_back_camera() {
    let sink = Arc::new(MockVideoSink::new(1200, 800));
    let devices = Arc::new(MockMediaDevices::with_devices(vec![
        DeviceDescriptor::video("Integrated Webcam", "video-0"),
    ]));
    let mut session =
        CaptureSession::initialize(sink.clone(), devices.clone(), DEFAULT_FRAME_WIDTH);

    session.start_capture().await.unwrap();

    let recorded = devices.recorded_constraints();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].video, VideoConstraint::Any);
}

#[tokio::test]
async fn test_enumeration_failure_fails_capture_start() {
    let sink = Arc::new(MockVideoSink::new(1200, 800));
    let devices = Arc::new(
        MockMediaDevices::with_devices(smartphone_devices()).failing_enumeration(
            CaptureError::EnumerationFailed {
                reason: "platform surface unavailable".to_string(),
            },
        ),
    );
    let mut session =
        CaptureSession::initialize(sink.clone(), devices.clone(), DEFAULT_FRAME_WIDTH);

    match session.start_capture().await {
        Err(CaptureError::EnumerationFailed { .. }) => (),
        other => panic!("Expected EnumerationFailed, got {:?}", other),
    }
    // Negotiation yielded no stream: nothing was requested or attached
    assert!(devices.recorded_constraints().is_empty());
    assert!(sink.attached_stream().is_none());
}

#[tokio::test]
async fn test_failed_start_leaves_sink_unattached() {
    let sink = Arc::new(MockVideoSink::new(1200, 800));
    let devices = Arc::new(
        MockMediaDevices::with_devices(vec![]).failing_open(CaptureError::StreamOpenFailed {
            reason: "no camera connected".to_string(),
        }),
    );
    let mut session =
        CaptureSession::initialize(sink.clone(), devices, DEFAULT_FRAME_WIDTH);

    assert!(session.start_capture().await.is_err());
    assert!(sink.attached_stream().is_none());
}

// ============================================================================
// FRAME BUFFER SIZING ACROSS THE SESSION
// ============================================================================

#[tokio::test]
async fn test_buffer_dimensions_fixed_for_session_lifetime() {
    let sink = Arc::new(MockVideoSink::new(1200, 800));
    let devices = Arc::new(MockMediaDevices::with_devices(smartphone_devices()));
    let mut session =
        CaptureSession::initialize(sink.clone(), devices, DEFAULT_FRAME_WIDTH);

    session.start_capture().await.unwrap();
    sink.set_ready(true);

    for _ in 0..5 {
        let frame = session.capture_frame().unwrap();
        assert_eq!((frame.width, frame.height), (600, 400));
        assert_eq!(frame.data.len(), 600 * 400 * 4);
    }

    // Ready toggling and display-size changes never resize the buffer
    sink.set_ready(false);
    sink.set_ready(true);
    sink.set_display_size(1920, 1080);
    let frame = session.capture_frame().unwrap();
    assert_eq!((frame.width, frame.height), (600, 400));
}
