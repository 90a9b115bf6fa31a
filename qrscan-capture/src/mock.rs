//! Scripted platform surfaces for tests and unsupported platforms
//!
//! These mirror the real platform traits but run entirely in-process:
//! the device surface serves a canned enumeration and records every
//! stream-acquisition request, and the sink serves synthetic frames with
//! optional transient-failure injection.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use crate::device::{DeviceDescriptor, MediaConstraints, MediaDevices};
use crate::error::CaptureError;
use crate::sink::{MediaStream, VideoSink};

/// Scripted device surface
pub struct MockMediaDevices {
    devices: Vec<DeviceDescriptor>,
    prompts: bool,
    enumerate_failure: Mutex<Option<CaptureError>>,
    open_failure: Mutex<Option<CaptureError>>,
    recorded: Mutex<Vec<MediaConstraints>>,
    enumerations: AtomicUsize,
}

impl MockMediaDevices {
    /// Create a surface serving the given enumeration
    pub fn with_devices(devices: Vec<DeviceDescriptor>) -> Self {
        Self {
            devices,
            prompts: false,
            enumerate_failure: Mutex::new(None),
            open_failure: Mutex::new(None),
            recorded: Mutex::new(Vec::new()),
            enumerations: AtomicUsize::new(0),
        }
    }

    /// Fail the next `enumerate` call with the given error
    pub fn failing_enumeration(self, error: CaptureError) -> Self {
        *self.enumerate_failure.lock() = Some(error);
        self
    }

    /// Behave like a platform that natively prompts for a camera
    pub fn prompting(mut self) -> Self {
        self.prompts = true;
        self
    }

    /// Fail the next `open_stream` call with the given error
    pub fn failing_open(self, error: CaptureError) -> Self {
        *self.open_failure.lock() = Some(error);
        self
    }

    /// Constraints of every `open_stream` call so far, in order
    pub fn recorded_constraints(&self) -> Vec<MediaConstraints> {
        self.recorded.lock().clone()
    }

    /// Number of enumerations performed
    pub fn enumeration_count(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaDevices for MockMediaDevices {
    async fn enumerate(&self) -> Result<Vec<DeviceDescriptor>, CaptureError> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.enumerate_failure.lock().take() {
            return Err(error);
        }
        Ok(self.devices.clone())
    }

    async fn open_stream(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<MediaStream, CaptureError> {
        self.recorded.lock().push(constraints.clone());
        if let Some(error) = self.open_failure.lock().take() {
            return Err(error);
        }
        let serial = self.recorded.lock().len();
        Ok(MediaStream::new(format!("mock-stream-{}", serial)))
    }

    fn prompts_for_camera(&self) -> bool {
        self.prompts
    }
}

/// Scripted video sink
pub struct MockVideoSink {
    display_size: Mutex<(u32, u32)>,
    ready: AtomicBool,
    attached: Mutex<Option<MediaStream>>,
    transient_failures: AtomicUsize,
    empty_frames: AtomicUsize,
    samples: AtomicUsize,
}

impl MockVideoSink {
    /// Create a sink reporting the given display size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            display_size: Mutex::new((width, height)),
            ready: AtomicBool::new(false),
            attached: Mutex::new(None),
            transient_failures: AtomicUsize::new(0),
            empty_frames: AtomicUsize::new(0),
            samples: AtomicUsize::new(0),
        }
    }

    /// Mark the sink playable (the "ready" transition)
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Change the reported display size
    pub fn set_display_size(&self, width: u32, height: u32) {
        *self.display_size.lock() = (width, height);
    }

    /// Make the next frame sample fail transiently
    pub fn push_transient_failure(&self) {
        self.transient_failures.fetch_add(1, Ordering::SeqCst);
    }

    /// Make the next frame sample return an empty bitmap
    pub fn push_empty_frame(&self) {
        self.empty_frames.fetch_add(1, Ordering::SeqCst);
    }

    /// Stream currently attached, if any
    pub fn attached_stream(&self) -> Option<MediaStream> {
        self.attached.lock().clone()
    }

    /// Number of frame samples served (failures included)
    pub fn sample_count(&self) -> usize {
        self.samples.load(Ordering::SeqCst)
    }

    fn take_pending(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |pending| {
                if pending > 0 {
                    Some(pending - 1)
                } else {
                    None
                }
            })
            .is_ok()
    }
}

#[async_trait]
impl VideoSink for MockVideoSink {
    async fn attach(&self, stream: MediaStream) -> Result<(), CaptureError> {
        *self.attached.lock() = Some(stream);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn display_size(&self) -> (u32, u32) {
        *self.display_size.lock()
    }

    fn sample_frame(&self, width: u32, height: u32) -> Result<Bytes, CaptureError> {
        self.samples.fetch_add(1, Ordering::SeqCst);
        if !self.is_ready() {
            return Err(CaptureError::SinkNotReady);
        }
        if Self::take_pending(&self.transient_failures) {
            return Err(CaptureError::FrameNotAvailable);
        }
        if Self::take_pending(&self.empty_frames) {
            return Ok(Bytes::new());
        }
        Ok(Bytes::from(vec![0u8; (width * height * 4) as usize]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::VideoConstraint;

    #[tokio::test]
    async fn test_mock_devices_record_constraints() {
        let devices = MockMediaDevices::with_devices(vec![]);

        devices
            .open_stream(&MediaConstraints::video_any())
            .await
            .unwrap();
        devices
            .open_stream(&MediaConstraints::video_device("back-0"))
            .await
            .unwrap();

        let recorded = devices.recorded_constraints();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].video, VideoConstraint::Any);
        assert_eq!(
            recorded[1].video,
            VideoConstraint::Device {
                exact: "back-0".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_mock_devices_enumeration_failure_is_one_shot() {
        let devices = MockMediaDevices::with_devices(vec![DeviceDescriptor::video(
            "camera2 1, facing back",
            "back-0",
        )])
        .failing_enumeration(CaptureError::EnumerationFailed {
            reason: "platform surface unavailable".to_string(),
        });

        assert!(matches!(
            devices.enumerate().await,
            Err(CaptureError::EnumerationFailed { .. })
        ));
        assert_eq!(devices.enumerate().await.unwrap().len(), 1);
        assert_eq!(devices.enumeration_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_sink_serves_sized_frames() {
        let sink = MockVideoSink::new(1200, 800);
        sink.set_ready(true);

        let data = sink.sample_frame(600, 400).unwrap();
        assert_eq!(data.len(), 600 * 400 * 4);
        assert_eq!(sink.sample_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_sink_failure_injection_is_one_shot() {
        let sink = MockVideoSink::new(1200, 800);
        sink.set_ready(true);
        sink.push_transient_failure();

        assert!(matches!(
            sink.sample_frame(600, 400),
            Err(CaptureError::FrameNotAvailable)
        ));
        assert!(sink.sample_frame(600, 400).is_ok());
    }
}
