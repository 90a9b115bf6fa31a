//! Media device model and camera negotiation
//!
//! Enumeration returns transient [`DeviceDescriptor`]s; negotiation turns
//! them into the [`MediaConstraints`] used to open a stream. The selection
//! rule prefers a rear-facing camera by label on platforms that do not let
//! the user pick one themselves.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::CaptureError;
use crate::sink::MediaStream;

/// Kind of an enumerable media input device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Camera
    VideoInput,
    /// Microphone
    AudioInput,
    /// Anything else the platform reports
    Other,
}

/// One enumerable input device
///
/// Descriptors are used transiently during negotiation and are not retained
/// by the capture session.
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    /// Device kind
    pub kind: DeviceKind,
    /// Human-readable label reported by the platform
    pub label: String,
    /// Opaque platform identifier for the device
    pub device_id: String,
}

impl DeviceDescriptor {
    /// Create a video input descriptor
    pub fn video(label: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            kind: DeviceKind::VideoInput,
            label: label.into(),
            device_id: device_id.into(),
        }
    }

    /// Create an audio input descriptor
    pub fn audio(label: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            kind: DeviceKind::AudioInput,
            label: label.into(),
            device_id: device_id.into(),
        }
    }
}

/// Video part of a capture constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoConstraint {
    /// Unconstrained: the platform (or the user) chooses the camera
    Any,
    /// Pin capture to the device with exactly this identifier
    Device {
        /// Required device identifier
        exact: String,
    },
}

/// Constraints passed to a stream-acquisition request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConstraints {
    /// Whether to capture audio (always `false` for scanning)
    pub audio: bool,
    /// Video device selection
    pub video: VideoConstraint,
}

impl MediaConstraints {
    /// Video-only capture with no device preference
    pub fn video_any() -> Self {
        Self {
            audio: false,
            video: VideoConstraint::Any,
        }
    }

    /// Video-only capture pinned to an exact device identifier
    pub fn video_device(device_id: impl Into<String>) -> Self {
        Self {
            audio: false,
            video: VideoConstraint::Device {
                exact: device_id.into(),
            },
        }
    }
}

/// Platform surface for device enumeration and stream acquisition
///
/// Implementations wrap whatever the host platform provides; tests use the
/// scripted implementation in [`crate::mock`].
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Enumerate all available input devices, in platform order
    async fn enumerate(&self) -> Result<Vec<DeviceDescriptor>, CaptureError>;

    /// Request a live stream matching the given constraints
    async fn open_stream(&self, constraints: &MediaConstraints)
        -> Result<MediaStream, CaptureError>;

    /// Whether this platform natively prompts the user to pick a camera
    ///
    /// When it does, negotiation skips enumeration entirely and requests
    /// unconstrained video, leaving the choice to the user.
    fn prompts_for_camera(&self) -> bool {
        false
    }
}

/// Substring looked for in camera labels to spot a rear-facing device.
/// Labels of back cameras usually contain "facing back". The match is
/// case-sensitive, as found in the label.
const REAR_FACING_LABEL: &str = "back";

/// Select the capture constraints for scanning
///
/// Negotiation is one-shot: it runs once per capture session, and no
/// re-negotiation happens if the chosen device later disconnects.
///
/// - If the platform prompts the user to pick a camera, request
///   unconstrained video.
/// - Otherwise scan the enumeration, in order, for the first video input
///   whose label contains `"back"` and pin its exact device identifier.
/// - No match falls back to unconstrained video.
pub async fn negotiate_constraints(
    devices: &dyn MediaDevices,
) -> Result<MediaConstraints, CaptureError> {
    if devices.prompts_for_camera() {
        debug!("Platform prompts for camera selection, requesting unconstrained video");
        return Ok(MediaConstraints::video_any());
    }

    let descriptors = devices.enumerate().await?;
    debug!("Enumerated {} input devices", descriptors.len());

    for descriptor in &descriptors {
        if descriptor.kind == DeviceKind::VideoInput
            && descriptor.label.contains(REAR_FACING_LABEL)
        {
            info!(
                device_id = %descriptor.device_id,
                label = %descriptor.label,
                "Selected rear-facing camera"
            );
            return Ok(MediaConstraints::video_device(descriptor.device_id.clone()));
        }
    }

    // No rear-facing camera found (non-smartphone); let the user choose
    debug!("No rear-facing camera found, requesting unconstrained video");
    Ok(MediaConstraints::video_any())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockMediaDevices;

    #[tokio::test]
    async fn test_negotiation_picks_first_back_labelled_video_input() {
        let devices = MockMediaDevices::with_devices(vec![
            DeviceDescriptor::audio("Built-in Microphone", "audio-0"),
            DeviceDescriptor::video("camera2 0, facing front", "front-0"),
            DeviceDescriptor::video("camera2 1, facing back", "back-0"),
            DeviceDescriptor::video("camera2 2, facing back", "back-1"),
        ]);

        let constraints = negotiate_constraints(&devices).await.unwrap();
        assert_eq!(constraints, MediaConstraints::video_device("back-0"));
        assert!(!constraints.audio);
    }

    #[tokio::test]
    async fn test_negotiation_ignores_back_labelled_audio_input() {
        let devices = MockMediaDevices::with_devices(vec![
            DeviceDescriptor::audio("back panel line-in", "audio-0"),
            DeviceDescriptor::video("Integrated Webcam", "video-0"),
        ]);

        let constraints = negotiate_constraints(&devices).await.unwrap();
        assert_eq!(constraints, MediaConstraints::video_any());
    }

    #[tokio::test]
    async fn test_negotiation_falls_back_to_unconstrained() {
        let devices = MockMediaDevices::with_devices(vec![DeviceDescriptor::video(
            "Integrated Webcam",
            "video-0",
        )]);

        let constraints = negotiate_constraints(&devices).await.unwrap();
        assert_eq!(constraints, MediaConstraints::video_any());
    }

    #[tokio::test]
    async fn test_negotiation_label_match_is_case_sensitive() {
        // "Back" does not match; the label comparison is case-sensitive.
        let devices = MockMediaDevices::with_devices(vec![DeviceDescriptor::video(
            "Back Camera",
            "back-0",
        )]);

        let constraints = negotiate_constraints(&devices).await.unwrap();
        assert_eq!(constraints, MediaConstraints::video_any());
    }

    #[tokio::test]
    async fn test_negotiation_skips_enumeration_when_platform_prompts() {
        let devices = MockMediaDevices::with_devices(vec![DeviceDescriptor::video(
            "camera2 1, facing back",
            "back-0",
        )])
        .prompting();

        let constraints = negotiate_constraints(&devices).await.unwrap();
        assert_eq!(constraints, MediaConstraints::video_any());
        assert_eq!(devices.enumeration_count(), 0);
    }
}
