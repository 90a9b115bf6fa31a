//! Decoder worker error types

use thiserror::Error;

/// Errors from the decoder worker round trip
///
/// The engine itself has no error variant; its output is trusted as
/// well-formed. Failures here are worker-lifecycle failures only.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The worker task is gone and cannot serve the request
    #[error("Decoder worker is no longer running")]
    WorkerGone,
}

/// Result type alias for decoder operations
pub type DecodeResult<T> = Result<T, DecodeError>;
