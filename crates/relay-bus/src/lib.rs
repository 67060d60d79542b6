//! # Relay Bus - Endpoint Registry and Delivery
//!
//! The routing core of the workspace: maps peer identities to per-peer FIFO
//! queues and delivers frames between them.
//!
//! ## Rules
//!
//! - The identity-to-queue map is the **only** shared mutable state; all
//!   mutations are synchronized, so no queue is ever observed mid-update.
//! - `receive` on one identity belongs to that identity's single owning
//!   task; there is no fan-in on a queue.
//! - Deregistration wakes any outstanding `receive` on that identity with
//!   `UnknownPeer` instead of leaving it suspended.
//!
//! ```text
//! ┌──────────────┐   send(id, frame)   ┌──────────────────┐
//! │ Client task  │ ──────────────────→ │ EndpointRegistry │
//! └──────────────┘                     │  id → FIFO queue │
//!        ↑                             └──────────────────┘
//!        │            receive(id)               │
//!        └──────────────────────────────────────┘
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod channel;
pub mod registry;

pub use channel::{ByteChannel, InProcessChannel};
pub use registry::EndpointRegistry;

/// Default maximum number of concurrently registered peers.
pub const DEFAULT_REGISTRY_CAPACITY: usize = 1024;
