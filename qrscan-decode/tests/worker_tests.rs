//! Integration tests for the decoder worker round trip

use std::sync::Arc;

use bytes::Bytes;
use qrscan_capture::FrameBitmap;
use qrscan_decode::*;

fn frame() -> FrameBitmap {
    FrameBitmap::new(4, 4, Bytes::from(vec![0u8; 64]))
}

#[tokio::test]
async fn test_responses_arrive_in_submission_order() {
    let engine = ScriptedEngine::new(vec![
        vec![],
        vec![DecodeMatch::with_payload("first")],
        vec![DecodeMatch::with_payload("second")],
    ]);
    let handle = DecoderWorker::spawn(Arc::new(engine));

    assert!(handle.submit(frame()).await.unwrap().is_empty());
    assert_eq!(
        handle.submit(frame()).await.unwrap().first_payload(),
        Some("first")
    );
    assert_eq!(
        handle.submit(frame()).await.unwrap().first_payload(),
        Some("second")
    );
}

#[tokio::test]
async fn test_worker_serves_many_submissions() {
    let handle = DecoderWorker::spawn(Arc::new(NullEngine));

    for _ in 0..100 {
        let response = handle.submit(frame()).await.unwrap();
        assert!(response.is_empty());
    }
}

#[tokio::test]
async fn test_multi_match_response_preserves_order() {
    let engine = ScriptedEngine::new(vec![vec![
        DecodeMatch {
            geometry: MatchGeometry::axis_aligned(100, 100),
            orientation: 90,
            payload: "HELLO123".to_string(),
        },
        DecodeMatch::with_payload("ignored"),
    ]]);
    let handle = DecoderWorker::spawn(Arc::new(engine));

    let response = handle.submit(frame()).await.unwrap();
    assert_eq!(response.matches.len(), 2);
    assert_eq!(response.first_payload(), Some("HELLO123"));
    assert_eq!(response.matches[0].orientation, 90);
}
