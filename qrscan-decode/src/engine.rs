//! Decode engine seam
//!
//! The actual QR recognition lives behind [`DecodeEngine`]: the worker hands
//! it a bitmap and trusts whatever comes back. No error variant exists on
//! this seam; an engine that finds nothing returns an empty collection.

use std::collections::VecDeque;

use parking_lot::Mutex;
use qrscan_capture::FrameBitmap;

use crate::protocol::DecodeMatch;

/// External, opaque decoder component
pub trait DecodeEngine: Send + Sync {
    /// Inspect one bitmap and return zero or more decoded matches
    fn decode(&self, frame: &FrameBitmap) -> Vec<DecodeMatch>;
}

/// Engine that never finds a code
///
/// Stand-in for platforms where no real engine is wired up.
#[derive(Debug, Default)]
pub struct NullEngine;

impl DecodeEngine for NullEngine {
    fn decode(&self, _frame: &FrameBitmap) -> Vec<DecodeMatch> {
        Vec::new()
    }
}

/// Engine serving a scripted queue of responses
///
/// Each decode call pops the next scripted response; once the queue is
/// drained every call returns no matches. Used by tests and the demo.
pub struct ScriptedEngine {
    responses: Mutex<VecDeque<Vec<DecodeMatch>>>,
}

impl ScriptedEngine {
    /// Create an engine from scripted responses, served in order
    pub fn new(responses: impl IntoIterator<Item = Vec<DecodeMatch>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    /// An engine that misses `misses` times and then reports one match
    pub fn misses_then_match(misses: usize, payload: impl Into<String>) -> Self {
        let mut responses: Vec<Vec<DecodeMatch>> = vec![Vec::new(); misses];
        responses.push(vec![DecodeMatch::with_payload(payload)]);
        Self::new(responses)
    }

    /// Number of scripted responses not yet served
    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }
}

impl DecodeEngine for ScriptedEngine {
    fn decode(&self, _frame: &FrameBitmap) -> Vec<DecodeMatch> {
        self.responses.lock().pop_front().unwrap_or_default()
    }
}
