//! # Endpoint Registry
//!
//! Owns the mapping from peer identity to delivery queue.

use crate::DEFAULT_REGISTRY_CAPACITY;
use parking_lot::RwLock;
use relay_types::{Frame, PeerId, RelayError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

/// One registered peer: the enqueue side plus the (single-owner) dequeue
/// side of its FIFO queue.
struct PeerSlot {
    /// Enqueue half. Dropped on deregistration, which closes the queue and
    /// wakes any waiting `receive` on the dequeue half.
    tx: mpsc::UnboundedSender<Frame>,

    /// Dequeue half, behind an async mutex so `receive` can await without
    /// holding the registry lock.
    rx: Arc<Mutex<mpsc::UnboundedReceiver<Frame>>>,
}

/// Maps peer identities to delivery queues and routes frames between them.
///
/// Safe for concurrent `register`/`deregister`/`send` from many tasks.
/// `receive` on a given identity is only ever invoked by that identity's
/// owning task.
pub struct EndpointRegistry {
    /// Identity → queue. The only shared mutable state in the workspace.
    peers: RwLock<HashMap<PeerId, PeerSlot>>,

    /// Monotonic identity allocator. Identities are never reused.
    next_id: AtomicU32,

    /// Total frames accepted for delivery.
    frames_sent: AtomicU64,

    /// Maximum concurrently registered peers.
    capacity: usize,
}

impl EndpointRegistry {
    /// Create a registry with the default peer capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REGISTRY_CAPACITY)
    }

    /// Create a registry bounded to `capacity` concurrent registrations.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            peers: RwLock::new(HashMap::new()),
            next_id: AtomicU32::new(1),
            frames_sent: AtomicU64::new(0),
            capacity,
        }
    }

    /// Allocate a fresh identity with an empty receive queue.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::RegistryFull`] when `capacity` peers are
    /// already registered.
    pub fn register(&self) -> Result<PeerId, RelayError> {
        let mut peers = self.peers.write();
        if peers.len() >= self.capacity {
            warn!(capacity = self.capacity, "Registration refused, registry full");
            return Err(RelayError::RegistryFull {
                capacity: self.capacity,
            });
        }

        let id = PeerId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        peers.insert(
            id,
            PeerSlot {
                tx,
                rx: Arc::new(Mutex::new(rx)),
            },
        );

        debug!(peer = %id, registered = peers.len(), "Peer registered");
        Ok(id)
    }

    /// Remove `peer`, discarding any undelivered frames.
    ///
    /// Idempotent: deregistering an unknown identity is a no-op. Dropping
    /// the enqueue half closes the queue, so an outstanding `receive` on
    /// this identity resolves with `UnknownPeer` instead of hanging.
    pub fn deregister(&self, peer: PeerId) {
        let removed = self.peers.write().remove(&peer);
        if removed.is_some() {
            debug!(peer = %peer, "Peer deregistered");
        }
    }

    /// Enqueue `frame` for delivery to `dest` (FIFO per identity).
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownPeer`] if `dest` is not registered.
    pub fn send(&self, dest: PeerId, frame: Frame) -> Result<(), RelayError> {
        let peers = self.peers.read();
        let slot = peers
            .get(&dest)
            .ok_or(RelayError::UnknownPeer { peer: dest })?;

        // Cannot fail while the slot is alive: the dequeue half is owned
        // by the same map entry we are holding a read lock on.
        if slot.tx.send(frame).is_err() {
            return Err(RelayError::UnknownPeer { peer: dest });
        }

        self.frames_sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Wait until a frame is available for `peer`, then return it.
    ///
    /// Suspends only the calling task; delivery to other peers proceeds.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownPeer`] if `peer` is not registered, or
    /// becomes deregistered while this call is waiting (cancellation
    /// signal, not a silent hang).
    pub async fn receive(&self, peer: PeerId) -> Result<Frame, RelayError> {
        let rx = {
            let peers = self.peers.read();
            peers
                .get(&peer)
                .ok_or(RelayError::UnknownPeer { peer })?
                .rx
                .clone()
        };

        let mut rx = rx.lock().await;
        match rx.recv().await {
            Some(frame) => Ok(frame),
            // Queue closed: the peer was deregistered while we waited.
            None => Err(RelayError::UnknownPeer { peer }),
        }
    }

    /// Whether `peer` is currently registered.
    #[must_use]
    pub fn is_registered(&self, peer: PeerId) -> bool {
        self.peers.read().contains_key(&peer)
    }

    /// Number of currently registered peers.
    #[must_use]
    pub fn peer_count(&self) -> usize {
        self.peers.read().len()
    }

    /// Total frames accepted for delivery since construction.
    #[must_use]
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent.load(Ordering::Relaxed)
    }

    /// The registration capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}
