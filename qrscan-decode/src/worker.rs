//! Decoder worker task
//!
//! The engine runs out of the scanner's task, behind message passing: a
//! spawned tokio task owns the [`DecodeEngine`] and drains a request
//! channel, answering each request through its own oneshot. Submission
//! never blocks the submitting task; it suspends until the response
//! arrives.

use std::sync::Arc;

use qrscan_capture::FrameBitmap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace, warn};

use crate::engine::DecodeEngine;
use crate::error::DecodeError;
use crate::protocol::{DecodeRequest, DecodeResponse};

struct WorkItem {
    request: DecodeRequest,
    respond_to: oneshot::Sender<DecodeResponse>,
}

/// Handle to a running decoder worker
///
/// Cloning the handle shares the same worker. The worker stops once every
/// handle is dropped, or eagerly via [`shutdown`](Self::shutdown).
#[derive(Clone)]
pub struct DecoderHandle {
    request_tx: mpsc::UnboundedSender<WorkItem>,
}

impl DecoderHandle {
    /// Submit one bitmap and await the decoder's response
    pub async fn submit(&self, frame: FrameBitmap) -> Result<DecodeResponse, DecodeError> {
        let (respond_to, response_rx) = oneshot::channel();
        let item = WorkItem {
            request: DecodeRequest { frame },
            respond_to,
        };
        self.request_tx
            .send(item)
            .map_err(|_| DecodeError::WorkerGone)?;
        response_rx.await.map_err(|_| DecodeError::WorkerGone)
    }

    /// Stop accepting requests from this handle
    ///
    /// In-flight requests still complete; the worker exits once the last
    /// handle stops feeding it.
    pub fn shutdown(self) {
        drop(self.request_tx);
    }
}

/// Spawned task owning the decode engine
pub struct DecoderWorker;

impl DecoderWorker {
    /// Spawn a worker around the given engine and return its handle
    pub fn spawn(engine: Arc<dyn DecodeEngine>) -> DecoderHandle {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<WorkItem>();

        tokio::spawn(async move {
            debug!("Decoder worker started");
            while let Some(item) = request_rx.recv().await {
                let matches = engine.decode(&item.request.frame);
                trace!(matches = matches.len(), "Decoded frame");
                if item.respond_to.send(DecodeResponse::from(matches)).is_err() {
                    // Submitter gave up on the round trip; keep serving
                    warn!("Decode response dropped, submitter went away");
                }
            }
            debug!("Decoder worker stopped");
        });

        DecoderHandle { request_tx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScriptedEngine;
    use bytes::Bytes;

    fn frame() -> FrameBitmap {
        FrameBitmap::new(2, 2, Bytes::from(vec![0u8; 16]))
    }

    #[tokio::test]
    async fn test_round_trip() {
        let handle = DecoderWorker::spawn(Arc::new(ScriptedEngine::misses_then_match(1, "hit")));

        let response = handle.submit(frame()).await.unwrap();
        assert!(response.is_empty());

        let response = handle.submit(frame()).await.unwrap();
        assert_eq!(response.first_payload(), Some("hit"));
    }

    #[tokio::test]
    async fn test_cloned_handles_share_one_worker() {
        let handle = DecoderWorker::spawn(Arc::new(ScriptedEngine::misses_then_match(1, "hit")));
        let clone = handle.clone();
        handle.shutdown();

        // The surviving clone still reaches the worker, and the scripted
        // state is shared across handles.
        let response = clone.submit(frame()).await.unwrap();
        assert!(response.is_empty());
        let response = clone.submit(frame()).await.unwrap();
        assert_eq!(response.first_payload(), Some("hit"));
    }
}
