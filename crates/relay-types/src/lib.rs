//! # Relay Types Crate
//!
//! Protocol types shared by every crate in the workspace: the opaque
//! [`PeerId`] handle, the length-bounded [`Frame`] and its wire codec, and
//! the error taxonomy.
//!
//! ## Design Principles
//!
//! - **Frames are values**: a `Frame` is immutable once constructed and is
//!   copied across component boundaries, never shared by reference.
//! - **No silent truncation**: an oversized payload fails construction with
//!   [`FrameError::PayloadTooLarge`]; nothing in this crate clamps.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod errors;
pub mod frame;
pub mod peer;

pub use errors::{FrameError, RelayError};
pub use frame::{Frame, FLAG_ERROR, FLAG_RESPONSE, HEADER_LEN, MAX_PAYLOAD};
pub use peer::PeerId;
