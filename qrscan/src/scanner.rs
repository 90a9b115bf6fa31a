//! Scanner and scan loop
//!
//! [`QrScanner`] owns the capture session and the decoder worker handle for
//! one scanning surface. A call to [`scan`](QrScanner::scan) drives the
//! cycle: sample a frame, submit it to the decoder, await the response, and
//! either resolve with the first payload or yield back to the scheduler and
//! go again. The future resolves with at most one payload per call; there
//! is no busy spin anywhere on the retry paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use qrscan_capture::{CaptureSession, MediaDevices, VideoSink};
use qrscan_decode::{DecodeEngine, DecoderHandle, DecoderWorker};
use tokio::sync::broadcast;
use tokio::task::yield_now;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::event::{ScanEvent, ScanEventStream};

/// Detached cancellation handle for a scanner
///
/// Cancellation is cooperative: it flips the session's active flag, which
/// the scan loop re-checks at every cycle start and again after every
/// decoder response. An in-flight round trip cannot be aborted, but its
/// result is discarded once the flag is down.
#[derive(Debug, Clone)]
pub struct ScanCancelHandle {
    active: Arc<AtomicBool>,
}

impl ScanCancelHandle {
    /// Cancel the scan in progress, if any
    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Camera-driven QR scanner
pub struct QrScanner {
    session: CaptureSession,
    decoder: DecoderHandle,
    config: ScanConfig,
    active: Arc<AtomicBool>,
    event_tx: broadcast::Sender<ScanEvent>,
}

impl QrScanner {
    /// Initialize a scanner around a video sink and a decode engine
    ///
    /// Creates the capture session (with its not-yet-sized frame buffer)
    /// and spawns the decoder worker. Call once after the sink exists,
    /// then [`start_capture`](Self::start_capture) before scanning.
    pub fn initialize(
        sink: Arc<dyn VideoSink>,
        devices: Arc<dyn MediaDevices>,
        engine: Arc<dyn DecodeEngine>,
        config: ScanConfig,
    ) -> Result<Self, ScanError> {
        config.validate()?;
        let session = CaptureSession::initialize(sink, devices, config.frame_width);
        let decoder = DecoderWorker::spawn(engine);
        let (event_tx, _) = broadcast::channel(64);

        Ok(Self {
            session,
            decoder,
            config,
            active: Arc::new(AtomicBool::new(false)),
            event_tx,
        })
    }

    /// Negotiate a camera and attach its stream to the sink
    pub async fn start_capture(&mut self) -> Result<(), ScanError> {
        self.session.start_capture().await?;
        Ok(())
    }

    /// Subscribe to scan progress events
    pub fn events(&self) -> ScanEventStream {
        ScanEventStream::new(self.event_tx.subscribe())
    }

    /// Get a handle that can cancel a running scan
    pub fn cancel_handle(&self) -> ScanCancelHandle {
        ScanCancelHandle {
            active: self.active.clone(),
        }
    }

    /// Scan until exactly one code is decoded
    ///
    /// Resolves with the payload of the first match of the first non-empty
    /// decoder response, or with an error when the scan is cancelled, a
    /// configured bound is exceeded, or capture fails non-transiently.
    /// Calling `scan` while a scan is active returns
    /// [`ScanError::AlreadyActive`].
    pub async fn scan(&mut self) -> Result<String, ScanError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ScanError::AlreadyActive);
        }

        self.emit(ScanEvent::ScanStarted);
        debug!("Scan session started");

        let result = self.run_cycles().await;
        self.active.store(false, Ordering::SeqCst);

        match &result {
            Ok(payload) => {
                info!(payload = %payload, "Code detected");
                self.emit(ScanEvent::CodeDetected {
                    payload: payload.clone(),
                });
            }
            Err(ScanError::Cancelled) => {
                debug!("Scan cancelled");
                self.emit(ScanEvent::ScanCancelled);
            }
            Err(e) => {
                warn!("Scan failed: {}", e);
                self.emit(ScanEvent::ScanFailed {
                    reason: e.to_string(),
                });
            }
        }

        result
    }

    /// Cancel the scan in progress, if any
    ///
    /// Equivalent to [`ScanCancelHandle::cancel`]; the handle form exists
    /// because `scan` borrows the scanner for its whole run.
    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Dimensions of the frame-sampling buffer, `(width, height)`
    ///
    /// The height is 0 until the first sink-ready transition fixes it.
    pub fn buffer_size(&self) -> (u32, u32) {
        self.session.buffer_size()
    }

    async fn run_cycles(&mut self) -> Result<String, ScanError> {
        let deadline = self.config.timeout.map(|t| Instant::now() + t);
        let mut attempt: u64 = 0;

        loop {
            // Cancellation takes effect here, before any frame is sampled
            // or submitted.
            if !self.active.load(Ordering::SeqCst) {
                return Err(ScanError::Cancelled);
            }
            if let Some(max) = self.config.max_attempts {
                if attempt >= max {
                    return Err(ScanError::NoCodeFound);
                }
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return Err(ScanError::Timeout);
                }
            }
            attempt += 1;

            let frame = match self.session.capture_frame() {
                Ok(frame) => frame,
                Err(e) if e.is_transient() => {
                    debug!(attempt, "Frame not available, rescheduling cycle");
                    self.emit(ScanEvent::TransientCaptureError { attempt });
                    yield_now().await;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            // A frame with no pixel data is never submitted; treat it like
            // a transient miss.
            if frame.is_empty() {
                yield_now().await;
                continue;
            }

            self.emit(ScanEvent::FrameSubmitted { attempt });
            let response = self.decoder.submit(frame).await?;

            if let Some(payload) = response.first_payload() {
                // A cancellation that raced the decoder round trip wins:
                // the payload is discarded rather than delivered late.
                if !self.active.load(Ordering::SeqCst) {
                    return Err(ScanError::Cancelled);
                }
                return Ok(payload.to_string());
            }

            self.emit(ScanEvent::EmptyResponse { attempt });
            yield_now().await;
        }
    }

    fn emit(&self, event: ScanEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}
