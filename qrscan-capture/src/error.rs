//! Capture error types and handling
//!
//! This module defines all error types used during camera negotiation and
//! frame sampling, including the transient classification the scan loop
//! relies on to decide between retrying and propagating.

use thiserror::Error;

/// Main error type for capture operations
#[derive(Error, Debug)]
pub enum CaptureError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The platform denied access to the requested device
    #[error("Permission denied: {reason}")]
    PermissionDenied {
        /// Reason reported by the platform
        reason: String,
    },

    /// A pinned device identifier did not resolve to a device
    #[error("Device not found: {device_id}")]
    DeviceNotFound {
        /// Device identifier that failed to resolve
        device_id: String,
    },

    /// Device enumeration failed
    #[error("Device enumeration failed: {reason}")]
    EnumerationFailed {
        /// Failure reason
        reason: String,
    },

    /// Opening the media stream failed
    #[error("Failed to open stream: {reason}")]
    StreamOpenFailed {
        /// Failure reason
        reason: String,
    },

    /// The video sink has no attached stream or is not yet playable
    #[error("Video sink not ready")]
    SinkNotReady,

    /// The sink's image source was momentarily unavailable
    ///
    /// This is the classified transient-resource-unavailable case: some
    /// platforms briefly report the video element's image source as missing
    /// while a stream is live. The scan loop recovers by rescheduling.
    #[error("Frame not available from sink")]
    FrameNotAvailable,

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

impl CaptureError {
    /// Check if the error is transient
    ///
    /// Transient errors are recovered by rescheduling the current scan
    /// cycle; all other errors propagate to the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, CaptureError::FrameNotAvailable)
    }
}
