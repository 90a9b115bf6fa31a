//! Frame buffer and bitmap types
//!
//! The frame buffer is the offscreen surface a scan cycle samples into. Its
//! width is fixed; its height is derived once, at the first sink-ready
//! transition, to preserve the sink's native aspect ratio, and never changes
//! for the remainder of the session.

use bytes::Bytes;

/// Fixed width of the sampling buffer, in pixels
pub const DEFAULT_FRAME_WIDTH: u32 = 600;

/// A single sampled still image, as sent to the decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBitmap {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Raw RGBA pixel data, row-major
    pub data: Bytes,
}

impl FrameBitmap {
    /// Create a bitmap from raw pixel data
    pub fn new(width: u32, height: u32, data: Bytes) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Whether the bitmap carries no pixel data
    ///
    /// Empty bitmaps are never submitted to the decoder.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Derive the buffer height preserving the sink's aspect ratio
///
/// `ceil(width * sink_height / sink_width)`, computed in integer
/// arithmetic and saturating at `u32::MAX` for degenerate sink
/// dimensions.
pub fn derive_frame_height(frame_width: u32, sink_width: u32, sink_height: u32) -> u32 {
    let scaled = u64::from(frame_width) * u64::from(sink_height);
    let height = scaled.div_ceil(u64::from(sink_width));
    u32::try_from(height).unwrap_or(u32::MAX)
}

/// Fixed-dimension sampling buffer for one capture session
#[derive(Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    sized: bool,
}

impl FrameBuffer {
    /// Create an unsized buffer with the given fixed width
    pub fn new(width: u32) -> Self {
        Self {
            width,
            height: 0,
            sized: false,
        }
    }

    /// Fix the buffer dimensions from the sink's display size
    ///
    /// Only the first call has any effect; subsequent ready transitions are
    /// ignored so the dimensions stay fixed for the session's lifetime.
    pub fn size_to_sink(&mut self, sink_width: u32, sink_height: u32) {
        if self.sized || sink_width == 0 {
            return;
        }
        self.height = derive_frame_height(self.width, sink_width, sink_height);
        self.sized = true;
    }

    /// Whether the dimensions have been fixed
    pub fn is_sized(&self) -> bool {
        self.sized
    }

    /// Buffer width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels (0 until sized)
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_WIDTH)
    }
}
