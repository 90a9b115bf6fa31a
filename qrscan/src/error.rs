//! Top-level scanner error type

use qrscan_capture::CaptureError;
use qrscan_decode::DecodeError;
use thiserror::Error;

/// Main error type for scanning operations
#[derive(Error, Debug)]
pub enum ScanError {
    /// A scan is already in progress on this scanner
    #[error("A scan is already active")]
    AlreadyActive,

    /// The scan was cancelled before a code was found
    #[error("Scan cancelled")]
    Cancelled,

    /// The attempt bound was reached without a successful decode
    #[error("No code found within the attempt bound")]
    NoCodeFound,

    /// The scan timeout elapsed without a successful decode
    #[error("Scan timed out")]
    Timeout,

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// Capture-side failure (negotiation, stream, frame sampling)
    #[error("Capture error: {source}")]
    Capture {
        /// Underlying capture error
        #[from]
        source: CaptureError,
    },

    /// Decoder worker failure
    #[error("Decode error: {source}")]
    Decode {
        /// Underlying decoder error
        #[from]
        source: DecodeError,
    },
}
