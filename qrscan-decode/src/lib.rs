//! # qrscan decode
//!
//! Decoder service client for the qrscan scanner. The recognition algorithm
//! itself is an external collaborator behind the [`DecodeEngine`] trait;
//! this crate provides the request/response protocol, the worker task that
//! owns an engine, and the handle the scan loop submits frames through.

#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod protocol;
pub mod worker;

// Re-export main types
pub use engine::{DecodeEngine, NullEngine, ScriptedEngine};
pub use error::{DecodeError, DecodeResult};
pub use protocol::{DecodeMatch, DecodeRequest, DecodeResponse, MatchGeometry, Point};
pub use worker::{DecoderHandle, DecoderWorker};
