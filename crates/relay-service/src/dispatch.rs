//! # Dispatch Service
//!
//! The single worker owning the responder side of the exchange.

use crate::handler::RequestHandler;
use relay_bus::EndpointRegistry;
use relay_types::{Frame, PeerId, RelayError, FLAG_ERROR, FLAG_RESPONSE};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// The resident responder.
///
/// Has exactly one state, listening, with a self-loop per processed frame.
/// It terminates only on the external stop signal; per-request failures
/// never abort the loop. Frames not yet delivered at shutdown are dropped
/// (fire-and-forget, matching non-blocking send-or-fail delivery).
pub struct DispatchService {
    /// Registry the service receives on and routes responses through.
    registry: Arc<EndpointRegistry>,

    /// The service's own registered identity.
    service_id: PeerId,

    /// The transformation applied to each request payload.
    handler: Arc<dyn RequestHandler>,

    /// External stop signal.
    shutdown: watch::Receiver<bool>,
}

impl DispatchService {
    /// Register a service identity on `registry` and build the service.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::RegistryFull`] if no identity can be
    /// allocated.
    pub fn new(
        registry: Arc<EndpointRegistry>,
        handler: Arc<dyn RequestHandler>,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self, RelayError> {
        let service_id = registry.register()?;
        Ok(Self {
            registry,
            service_id,
            handler,
            shutdown,
        })
    }

    /// The identity clients address requests to.
    #[must_use]
    pub const fn service_id(&self) -> PeerId {
        self.service_id
    }

    /// Run the listening loop until the stop signal fires.
    ///
    /// Consumes the service; its identity is deregistered on exit.
    pub async fn run(mut self) {
        info!(service = %self.service_id, "Dispatch service listening");

        loop {
            tokio::select! {
                result = self.registry.receive(self.service_id) => {
                    match result {
                        Ok(request) => self.process(request),
                        // Our own identity vanished; nothing left to serve.
                        Err(err) => {
                            error!(service = %self.service_id, error = %err,
                                   "Service identity lost, stopping");
                            return;
                        }
                    }
                }
                _ = self.shutdown.changed() => {
                    info!(service = %self.service_id, "Stop signal received");
                    break;
                }
            }
        }

        self.registry.deregister(self.service_id);
        info!(service = %self.service_id, "Dispatch service stopped");
    }

    /// Handle one inbound request frame.
    ///
    /// Single-request outcome is always local: validation failures are
    /// answered with an error frame, undeliverable responses are logged,
    /// and only an unbuildable response frame abandons the request.
    fn process(&self, request: Frame) {
        let client = request.sender();

        let (flags, payload) = match self.handler.handle(request.payload()) {
            Ok(bytes) => (FLAG_RESPONSE, bytes),
            Err(RelayError::InvalidPayload { reason }) => {
                warn!(client = %client, reason = %reason, "Invalid request payload");
                // Always reply: the client's blocking receive must not hang
                // on bad input.
                (FLAG_RESPONSE | FLAG_ERROR, reason.into_bytes())
            }
            Err(err) => {
                warn!(client = %client, error = %err, "Handler failed, request dropped");
                return;
            }
        };

        let response = match Frame::new(self.service_id, flags, payload) {
            Ok(frame) => frame,
            // Allocate-or-abandon: an unbuildable response drops the
            // request with no reply.
            Err(err) => {
                error!(client = %client, error = %err, "Response frame unbuildable");
                return;
            }
        };

        if let Err(err) = self.registry.send(client, response) {
            // Client deregistered between request and response.
            warn!(client = %client, error = %err, "Response undeliverable");
        }
    }
}
