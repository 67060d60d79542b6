//! # Relay Service - Request Dispatch
//!
//! The long-lived responder side of the exchange: a single worker that
//! receives framed requests on its own registered identity, applies a
//! [`RequestHandler`] transformation, and answers the originating peer.
//!
//! ## Flow
//!
//! 1. Client sends a request frame to the service identity
//! 2. Service validates the payload via its handler
//! 3. Handler output (or an error description) becomes the response frame
//! 4. Response is routed back to the request's sender identity
//!
//! ## Reply Policy
//!
//! The service **always** replies, including on validation failure: an
//! invalid payload produces a `FLAG_ERROR` response frame carrying the
//! error text. A request is dropped without reply only when the response
//! frame itself cannot be built (allocate-or-abandon).

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod dispatch;
pub mod handler;

pub use dispatch::DispatchService;
pub use handler::{IncrementResponder, RequestHandler};
