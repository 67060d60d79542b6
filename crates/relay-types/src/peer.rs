//! # Peer Identity
//!
//! The opaque handle identifying one registered endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, process-scoped identity of a registered endpoint.
///
/// Allocated by the registry from a monotonic counter, so an identity is
/// unique among live registrations and is never handed out twice within a
/// process. Plays the role the sender PID plays on a netlink socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(u32);

impl PeerId {
    /// Wrap a raw identity value.
    ///
    /// Intended for the registry's allocator and for decoding frames off
    /// the wire; application code should treat identities as opaque.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw wire representation of this identity.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer#{}", self.0)
    }
}
