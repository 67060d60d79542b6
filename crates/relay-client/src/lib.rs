//! # Relay Client - Request Driver
//!
//! The requesting side of the exchange. A driver frames a payload, sends
//! it to the service identity over a [`ByteChannel`], and waits (bounded)
//! for the correlated response on its own identity.
//!
//! Two usage patterns, both provided:
//!
//! - [`ClientDriver::request`] — one-shot: open a channel, exchange once,
//!   close before returning (the single-socket-per-invocation shape).
//! - [`ClientSession`] — persistent: keep one identity across several
//!   exchanges, close explicitly.
//!
//! Every failure kind is surfaced distinctly: `Timeout`, `UnknownPeer`,
//! `MalformedFrame`, `PayloadTooLarge`, and `InvalidPayload` (decoded from
//! an error response frame) each reach the caller as themselves.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use relay_bus::ByteChannel;
use relay_types::{Frame, PeerId, RelayError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default wait for a response before giving up.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One-shot client driver bound to a service identity.
pub struct ClientDriver<C> {
    channel: Arc<C>,
    service: PeerId,
    timeout: Duration,
}

impl<C: ByteChannel> ClientDriver<C> {
    /// Create a driver that addresses `service` over `channel`.
    #[must_use]
    pub fn new(channel: Arc<C>, service: PeerId) -> Self {
        Self {
            channel,
            service,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the response wait window.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Issue one request and wait for its response.
    ///
    /// Registers a fresh identity, exchanges once, and deregisters before
    /// returning, success or not.
    ///
    /// # Errors
    ///
    /// - [`RelayError::Timeout`] — no response within the window
    /// - [`RelayError::UnknownPeer`] — the service identity is gone, or
    ///   this client was deregistered while waiting
    /// - [`RelayError::InvalidPayload`] — the service answered with an
    ///   error frame
    /// - [`RelayError::Frame`] — the request could not be framed or the
    ///   response could not be decoded
    pub async fn request(&self, payload: Vec<u8>) -> Result<Vec<u8>, RelayError> {
        let handle = self.channel.open_channel().await?;
        let result = exchange(&*self.channel, self.service, handle, self.timeout, payload).await;
        self.channel.close_channel(handle).await;
        result
    }

    /// Open a persistent session retaining one identity across requests.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::RegistryFull`] if no identity can be
    /// allocated.
    pub async fn open_session(&self) -> Result<ClientSession<C>, RelayError> {
        let handle = self.channel.open_channel().await?;
        debug!(handle = %handle, "Client session opened");
        Ok(ClientSession {
            channel: self.channel.clone(),
            service: self.service,
            handle,
            timeout: self.timeout,
            closed: false,
        })
    }
}

/// A persistent client identity, valid until [`ClientSession::close`].
///
/// At most one request may be outstanding at a time (no pipelining); the
/// session's `request` enforces this by construction, being `&mut self`.
pub struct ClientSession<C> {
    channel: Arc<C>,
    service: PeerId,
    handle: PeerId,
    timeout: Duration,
    closed: bool,
}

impl<C: ByteChannel> ClientSession<C> {
    /// The session's registered identity.
    #[must_use]
    pub fn handle(&self) -> PeerId {
        self.handle
    }

    /// Issue one request on this session and wait for its response.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ClientDriver::request`].
    pub async fn request(&mut self, payload: Vec<u8>) -> Result<Vec<u8>, RelayError> {
        exchange(&*self.channel, self.service, self.handle, self.timeout, payload).await
    }

    /// Close the session, releasing its identity.
    pub async fn close(mut self) {
        self.channel.close_channel(self.handle).await;
        self.closed = true;
        debug!(handle = %self.handle, "Client session closed");
    }
}

impl<C> Drop for ClientSession<C> {
    fn drop(&mut self) {
        if !self.closed {
            // Cannot deregister from a sync drop; the registration lives
            // until registry shutdown.
            warn!(handle = %self.handle, "Session dropped without close()");
        }
    }
}

/// Send one framed request and await the correlated response.
async fn exchange<C: ByteChannel>(
    channel: &C,
    service: PeerId,
    handle: PeerId,
    timeout: Duration,
    payload: Vec<u8>,
) -> Result<Vec<u8>, RelayError> {
    let request = Frame::new(handle, 0, payload)?;
    channel.send_bytes(service, &request.encode()).await?;

    let (source, bytes) = tokio::time::timeout(timeout, channel.recv_bytes(handle))
        .await
        .map_err(|_| RelayError::Timeout {
            millis: timeout.as_millis() as u64,
        })??;

    if source != service {
        // Only the service sends to client identities; anything else is
        // worth seeing in the logs.
        warn!(source = %source, expected = %service, "Response from unexpected sender");
    }

    let response = Frame::decode(&bytes)?;
    if response.is_error() {
        return Err(RelayError::InvalidPayload {
            reason: String::from_utf8_lossy(response.payload()).into_owned(),
        });
    }

    debug!(handle = %handle, len = response.payload().len(), "Response received");
    Ok(response.into_payload())
}
