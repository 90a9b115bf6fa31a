//! Scan progress events
//!
//! Events are purely observational: the scan result itself travels through
//! the future returned by `scan`. Subscribers that lag simply miss events.

use tokio::sync::broadcast;

/// Events emitted while a scan is running
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// A scan session started
    ScanStarted,
    /// A frame was submitted to the decoder
    FrameSubmitted {
        /// Scan cycle number, starting at 1
        attempt: u64,
    },
    /// The decoder found nothing in a submitted frame
    EmptyResponse {
        /// Scan cycle number the response belongs to
        attempt: u64,
    },
    /// Frame sampling failed transiently and the cycle was rescheduled
    TransientCaptureError {
        /// Scan cycle number that was rescheduled
        attempt: u64,
    },
    /// A code was decoded and the scan completed
    CodeDetected {
        /// Decoded payload
        payload: String,
    },
    /// The scan was cancelled
    ScanCancelled,
    /// The scan failed and will not continue
    ScanFailed {
        /// Failure description
        reason: String,
    },
}

impl ScanEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            ScanEvent::ScanStarted => "scan_started",
            ScanEvent::FrameSubmitted { .. } => "frame_submitted",
            ScanEvent::EmptyResponse { .. } => "empty_response",
            ScanEvent::TransientCaptureError { .. } => "transient_capture_error",
            ScanEvent::CodeDetected { .. } => "code_detected",
            ScanEvent::ScanCancelled => "scan_cancelled",
            ScanEvent::ScanFailed { .. } => "scan_failed",
        }
    }

    /// Check if this event ends a scan session
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScanEvent::CodeDetected { .. } | ScanEvent::ScanCancelled | ScanEvent::ScanFailed { .. }
        )
    }
}

/// Stream of scan events for async iteration
#[derive(Debug)]
pub struct ScanEventStream {
    receiver: broadcast::Receiver<ScanEvent>,
}

impl ScanEventStream {
    pub(crate) fn new(receiver: broadcast::Receiver<ScanEvent>) -> Self {
        Self { receiver }
    }

    /// Get the next event from the stream
    ///
    /// Returns `None` once the scanner is gone; lagged events are skipped.
    pub async fn next(&mut self) -> Option<ScanEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(ScanEvent::ScanStarted.event_type(), "scan_started");
        assert_eq!(
            ScanEvent::FrameSubmitted { attempt: 3 }.event_type(),
            "frame_submitted"
        );
        assert_eq!(
            ScanEvent::CodeDetected {
                payload: "x".to_string()
            }
            .event_type(),
            "code_detected"
        );
    }

    #[test]
    fn test_terminal_classification() {
        assert!(!ScanEvent::ScanStarted.is_terminal());
        assert!(!ScanEvent::EmptyResponse { attempt: 1 }.is_terminal());
        assert!(ScanEvent::ScanCancelled.is_terminal());
        assert!(ScanEvent::CodeDetected {
            payload: "x".to_string()
        }
        .is_terminal());
        assert!(ScanEvent::ScanFailed {
            reason: "capture".to_string()
        }
        .is_terminal());
    }

    #[tokio::test]
    async fn test_event_stream_delivery() {
        let (tx, rx) = broadcast::channel(16);
        let mut stream = ScanEventStream::new(rx);

        tx.send(ScanEvent::ScanStarted).unwrap();
        tx.send(ScanEvent::FrameSubmitted { attempt: 1 }).unwrap();

        assert_eq!(stream.next().await.unwrap().event_type(), "scan_started");
        assert_eq!(stream.next().await.unwrap().event_type(), "frame_submitted");

        drop(tx);
        assert!(stream.next().await.is_none());
    }
}
