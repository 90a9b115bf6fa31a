//! # qrscan - Camera-Driven QR Scanning
//!
//! qrscan wraps a camera video stream and an external QR decoder into one
//! scan loop: negotiate access to an appropriate camera, sample the live
//! video into a fixed-size frame buffer, and submit frames to the decoder
//! worker until exactly one code is found.
//!
//! ## Key Features
//!
//! - **Rear-camera preference**: device negotiation pins a back-facing
//!   camera by label on platforms that don't let the user pick one
//! - **Opaque decoder seam**: the recognition algorithm lives behind a
//!   trait, reached through an async worker round trip
//! - **Single-fire results**: a scan resolves a future with at most one
//!   payload; no callback can fire twice
//! - **Explicit retry policy**: unbounded by default, with opt-in attempt
//!   and timeout bounds
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qrscan::{QrScanner, ScanConfig};
//! use qrscan::{MockMediaDevices, MockVideoSink, ScriptedEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Wire the platform surfaces (mocks here; real platforms implement
//!     // the VideoSink / MediaDevices / DecodeEngine traits)
//!     let sink = Arc::new(MockVideoSink::new(1200, 800));
//!     let devices = Arc::new(MockMediaDevices::with_devices(vec![]));
//!     let engine = Arc::new(ScriptedEngine::misses_then_match(3, "HELLO123"));
//!
//!     let mut scanner = QrScanner::initialize(
//!         sink.clone(), devices, engine, ScanConfig::default())?;
//!     scanner.start_capture().await?;
//!     sink.set_ready(true);
//!
//!     let payload = scanner.scan().await?;
//!     println!("Decoded: {}", payload);
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export capture types for easy access
pub use qrscan_capture::{
    negotiate_constraints, CaptureError, CaptureResult, CaptureSession, DeviceDescriptor,
    DeviceKind, FrameBitmap, FrameBuffer, MediaConstraints, MediaDevices, MediaStream,
    MockMediaDevices, MockVideoSink, VideoConstraint, VideoSink, DEFAULT_FRAME_WIDTH,
};

// Re-export decoder types
pub use qrscan_decode::{
    DecodeEngine, DecodeError, DecodeMatch, DecodeRequest, DecodeResponse, DecoderHandle,
    DecoderWorker, MatchGeometry, NullEngine, Point, ScriptedEngine,
};

// Public API modules
pub mod config;
pub mod error;
pub mod event;
pub mod scanner;

// Re-export main API types
pub use config::ScanConfig;
pub use error::ScanError;
pub use event::{ScanEvent, ScanEventStream};
pub use scanner::{QrScanner, ScanCancelHandle};
