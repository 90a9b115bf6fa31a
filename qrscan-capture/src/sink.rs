//! Video sink abstraction
//!
//! The sink is the presentation-side video element a live stream plays
//! into. This crate only needs three things from it: attach a stream, know
//! when it becomes playable (and at what display size), and sample the
//! current frame into a fixed-size bitmap.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::CaptureError;

/// Handle to a live media stream
///
/// The stream itself is owned by the platform; this handle keeps it alive
/// for the session and identifies it in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    id: String,
}

impl MediaStream {
    /// Wrap a platform stream identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Platform identifier of the stream
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Platform surface for the page's video element
#[async_trait]
pub trait VideoSink: Send + Sync {
    /// Attach a live stream as the sink's playback source
    async fn attach(&self, stream: MediaStream) -> Result<(), CaptureError>;

    /// Whether the sink currently has an attached, playable stream
    fn is_ready(&self) -> bool;

    /// Display size of the sink, `(width, height)`
    ///
    /// Only meaningful once the sink is ready; used exactly once per
    /// session to fix the frame buffer's dimensions.
    fn display_size(&self) -> (u32, u32);

    /// Sample the current video frame into a `width` x `height` RGBA bitmap
    ///
    /// Returns [`CaptureError::FrameNotAvailable`] when the sink's image
    /// source is momentarily unavailable; that error is transient and the
    /// scan loop reschedules. Returns [`CaptureError::SinkNotReady`] when
    /// no stream is attached.
    fn sample_frame(&self, width: u32, height: u32) -> Result<Bytes, CaptureError>;
}
