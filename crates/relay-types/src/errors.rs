//! # Error Types
//!
//! Defines the error taxonomy used across the workspace.

use crate::peer::PeerId;
use thiserror::Error;

/// Errors from frame construction and the wire codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Payload exceeds the fixed maximum. Construction fails rather than
    /// truncating.
    #[error("Payload too large: {len} bytes exceeds maximum {max}")]
    PayloadTooLarge { len: usize, max: usize },

    /// Byte sequence cannot be decoded: shorter than the header, or the
    /// declared payload length is inconsistent with the remaining bytes.
    #[error("Malformed frame: {reason}")]
    MalformedFrame { reason: &'static str },
}

/// Errors surfaced by the registry, the dispatch service, and the client.
///
/// Every kind is surfaced distinctly to callers; nothing in the workspace
/// maps a protocol error to a generic failure code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    /// Routing to an identity that is not (or no longer) registered. Also
    /// the cancellation signal delivered to a `receive` whose identity was
    /// deregistered while it waited.
    #[error("Unknown peer: {peer} is not registered")]
    UnknownPeer { peer: PeerId },

    /// Registration refused: the registry is at capacity.
    #[error("Registry full: {capacity} peers already registered")]
    RegistryFull { capacity: usize },

    /// Application-level content the transformation cannot interpret.
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    /// Client-side wait expired before a response arrived.
    #[error("Timed out after {millis}ms waiting for a response")]
    Timeout { millis: u64 },

    /// Frame construction or decoding failed.
    #[error(transparent)]
    Frame(#[from] FrameError),
}
