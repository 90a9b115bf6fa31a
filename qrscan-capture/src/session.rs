//! Capture session lifecycle
//!
//! A [`CaptureSession`] owns the sink handle, the negotiated stream, and the
//! fixed-size frame buffer for one scanning session. It replaces ambient
//! shared state with a single owner: create it once, start capture once,
//! then sample frames from it for as long as the session lives.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::device::{negotiate_constraints, MediaDevices};
use crate::error::CaptureError;
use crate::frame::{FrameBitmap, FrameBuffer};
use crate::sink::VideoSink;

/// One camera capture session
pub struct CaptureSession {
    sink: Arc<dyn VideoSink>,
    devices: Arc<dyn MediaDevices>,
    buffer: FrameBuffer,
    streaming: bool,
}

impl CaptureSession {
    /// Initialize a session around a video sink and a device surface
    ///
    /// Creates the (not yet sized) frame buffer. Call once, after the sink
    /// exists; then call [`start_capture`](Self::start_capture) to acquire
    /// a stream.
    pub fn initialize(
        sink: Arc<dyn VideoSink>,
        devices: Arc<dyn MediaDevices>,
        frame_width: u32,
    ) -> Self {
        Self {
            sink,
            devices,
            buffer: FrameBuffer::new(frame_width),
            streaming: false,
        }
    }

    /// Negotiate a camera and attach its stream to the sink
    ///
    /// Negotiation is one-shot; permission and device errors are logged and
    /// returned, and nothing retries on the caller's behalf.
    pub async fn start_capture(&mut self) -> Result<(), CaptureError> {
        let constraints = match negotiate_constraints(self.devices.as_ref()).await {
            Ok(constraints) => constraints,
            Err(e) => {
                warn!("Device enumeration failed: {}", e);
                return Err(e);
            }
        };

        let stream = match self.devices.open_stream(&constraints).await {
            Ok(stream) => stream,
            Err(e) => {
                // Maybe there is no camera connected?
                warn!("Failed to open capture stream: {}", e);
                return Err(e);
            }
        };

        info!(stream_id = %stream.id(), "Capture stream opened");
        self.sink.attach(stream).await?;
        Ok(())
    }

    /// Sample the current video frame into the session's frame buffer
    ///
    /// The first time the sink reports ready, the buffer's dimensions are
    /// fixed from the sink's display size; later ready transitions never
    /// resize it.
    pub fn capture_frame(&mut self) -> Result<FrameBitmap, CaptureError> {
        if !self.sink.is_ready() {
            return Err(CaptureError::SinkNotReady);
        }

        if !self.streaming {
            let (sink_width, sink_height) = self.sink.display_size();
            self.buffer.size_to_sink(sink_width, sink_height);
            if self.buffer.is_sized() {
                debug!(
                    width = self.buffer.width(),
                    height = self.buffer.height(),
                    "Frame buffer sized to sink"
                );
                self.streaming = true;
            }
        }

        if !self.buffer.is_sized() {
            return Err(CaptureError::SinkNotReady);
        }

        let data = self
            .sink
            .sample_frame(self.buffer.width(), self.buffer.height())?;
        Ok(FrameBitmap::new(
            self.buffer.width(),
            self.buffer.height(),
            data,
        ))
    }

    /// Dimensions of the frame buffer, `(width, height)`
    pub fn buffer_size(&self) -> (u32, u32) {
        (self.buffer.width(), self.buffer.height())
    }

    /// Whether the first ready transition has been observed
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }
}
