//! # qrscan capture
//!
//! Camera negotiation, video sink abstraction, and frame sampling for the
//! qrscan scanner. This crate owns everything between the platform's media
//! surface and the bitmap handed to the decoder: device selection, stream
//! attachment, and the fixed-size aspect-preserving frame buffer.

#![warn(clippy::all)]

pub mod device;
pub mod error;
pub mod frame;
pub mod mock;
pub mod session;
pub mod sink;

// Re-export main types
pub use device::{
    negotiate_constraints, DeviceDescriptor, DeviceKind, MediaConstraints, MediaDevices,
    VideoConstraint,
};
pub use error::{CaptureError, CaptureResult};
pub use frame::{derive_frame_height, FrameBitmap, FrameBuffer, DEFAULT_FRAME_WIDTH};
pub use mock::{MockMediaDevices, MockVideoSink};
pub use session::CaptureSession;
pub use sink::{MediaStream, VideoSink};
