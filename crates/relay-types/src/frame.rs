//! # Message Frame
//!
//! The addressed, length-bounded unit of data exchanged between endpoints,
//! and its wire codec.
//!
//! ## Wire Format
//!
//! ```text
//! ┌────────────┬───────────┬─────────────────┬──────────────────┐
//! │ sender u32 │ flags u16 │ payload_len u16 │ payload bytes... │
//! └────────────┴───────────┴─────────────────┴──────────────────┘
//!   little-endian, fixed 8-byte header
//! ```
//!
//! `decode` is the exact inverse of `encode`: trailing bytes beyond the
//! declared payload length are rejected, not ignored.

use crate::errors::FrameError;
use crate::peer::PeerId;

/// Fixed header size in bytes: sender (4) + flags (2) + payload length (2).
pub const HEADER_LEN: usize = 8;

/// Maximum payload size in bytes for a single frame.
pub const MAX_PAYLOAD: usize = 1024;

/// Set on every frame originated by the dispatch service.
pub const FLAG_RESPONSE: u16 = 0b0001;

/// Set when the payload carries an error description instead of a result.
/// Only meaningful together with [`FLAG_RESPONSE`].
pub const FLAG_ERROR: u16 = 0b0010;

/// One request or response unit.
///
/// Immutable once constructed; the payload length invariant is checked at
/// construction so `encode` is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    sender: PeerId,
    flags: u16,
    payload: Vec<u8>,
}

impl Frame {
    /// Construct a frame, enforcing the payload bound.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::PayloadTooLarge`] if the payload exceeds
    /// [`MAX_PAYLOAD`]. The payload is never truncated.
    pub fn new(sender: PeerId, flags: u16, payload: Vec<u8>) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD {
            return Err(FrameError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_PAYLOAD,
            });
        }
        Ok(Self {
            sender,
            flags,
            payload,
        })
    }

    /// The identity that originated this frame.
    #[must_use]
    pub const fn sender(&self) -> PeerId {
        self.sender
    }

    /// Raw flag bits.
    #[must_use]
    pub const fn flags(&self) -> u16 {
        self.flags
    }

    /// Whether this frame is a service-originated response.
    #[must_use]
    pub const fn is_response(&self) -> bool {
        self.flags & FLAG_RESPONSE != 0
    }

    /// Whether this frame carries an error description.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.flags & FLAG_ERROR != 0
    }

    /// The payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume the frame, returning its payload.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Serialize to the fixed-header wire format.
    ///
    /// Total for any constructed frame: the length invariant was checked
    /// in [`Frame::new`], so `payload.len()` always fits the u16 field.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.payload.len());
        bytes.extend_from_slice(&self.sender.as_raw().to_le_bytes());
        bytes.extend_from_slice(&self.flags.to_le_bytes());
        bytes.extend_from_slice(&(self.payload.len() as u16).to_le_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Deserialize from the wire format. Exact inverse of [`Frame::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::MalformedFrame`] if the input is shorter than
    /// the header, the declared payload length exceeds the remaining bytes,
    /// or trailing bytes follow the declared payload.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < HEADER_LEN {
            return Err(FrameError::MalformedFrame {
                reason: "shorter than header",
            });
        }
        let sender = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let flags = u16::from_le_bytes([bytes[4], bytes[5]]);
        let declared = u16::from_le_bytes([bytes[6], bytes[7]]) as usize;

        let body = &bytes[HEADER_LEN..];
        if declared > body.len() {
            return Err(FrameError::MalformedFrame {
                reason: "declared payload length exceeds remaining bytes",
            });
        }
        if declared < body.len() {
            return Err(FrameError::MalformedFrame {
                reason: "trailing bytes after declared payload",
            });
        }

        // declared <= MAX_PAYLOAD is implied: a u16 can exceed MAX_PAYLOAD,
        // so re-check to uphold the construction invariant.
        Self::new(PeerId::from_raw(sender), flags, body.to_vec()).map_err(|_| {
            FrameError::MalformedFrame {
                reason: "declared payload length exceeds maximum",
            }
        })
    }
}
