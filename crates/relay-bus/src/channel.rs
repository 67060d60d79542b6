//! # Byte Channel
//!
//! The transport seam: a byte-oriented, message-framed channel that can
//! address a registered peer, deliver best-effort, and surface delivery
//! failure synchronously. The role a netlink socket or character device
//! plays at a kernel boundary; here implemented over the in-process
//! registry.

use crate::registry::EndpointRegistry;
use async_trait::async_trait;
use relay_types::{Frame, PeerId, RelayError};
use std::sync::Arc;
use tracing::debug;

/// Byte-oriented, addressed, message-framed transport.
///
/// Implementations own framing validation: `send_bytes` rejects byte
/// sequences that do not decode to a well-formed frame rather than
/// forwarding garbage.
#[async_trait]
pub trait ByteChannel: Send + Sync {
    /// Open an addressable endpoint, returning its handle.
    async fn open_channel(&self) -> Result<PeerId, RelayError>;

    /// Close an endpoint. Idempotent.
    async fn close_channel(&self, handle: PeerId);

    /// Deliver an encoded frame to `dest`.
    ///
    /// # Errors
    ///
    /// `MalformedFrame` if `bytes` does not decode; `UnknownPeer` if
    /// `dest` is not registered (surfaced synchronously, never queued
    /// into the void).
    async fn send_bytes(&self, dest: PeerId, bytes: &[u8]) -> Result<(), RelayError>;

    /// Wait for the next message addressed to `handle`, returning the
    /// source identity and the encoded frame.
    async fn recv_bytes(&self, handle: PeerId) -> Result<(PeerId, Vec<u8>), RelayError>;
}

/// In-process [`ByteChannel`] backed by an [`EndpointRegistry`].
pub struct InProcessChannel {
    registry: Arc<EndpointRegistry>,
}

impl InProcessChannel {
    /// Create a channel over `registry`.
    #[must_use]
    pub fn new(registry: Arc<EndpointRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this channel routes through.
    #[must_use]
    pub fn registry(&self) -> &Arc<EndpointRegistry> {
        &self.registry
    }
}

#[async_trait]
impl ByteChannel for InProcessChannel {
    async fn open_channel(&self) -> Result<PeerId, RelayError> {
        self.registry.register()
    }

    async fn close_channel(&self, handle: PeerId) {
        self.registry.deregister(handle);
    }

    async fn send_bytes(&self, dest: PeerId, bytes: &[u8]) -> Result<(), RelayError> {
        let frame = Frame::decode(bytes)?;
        debug!(dest = %dest, len = bytes.len(), "Routing encoded frame");
        self.registry.send(dest, frame)
    }

    async fn recv_bytes(&self, handle: PeerId) -> Result<(PeerId, Vec<u8>), RelayError> {
        let frame = self.registry.receive(handle).await?;
        Ok((frame.sender(), frame.encode()))
    }
}
