//! Server-side handle to one connected peer.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::PeerId;
use crate::error::DeliveryError;

/// Sending half of one session's outbound queue.
///
/// The handle never touches the socket. The owning session drains the
/// queue and is the only writer of its transport. Delivery is
/// non-blocking: a full or closed queue is reported immediately so one
/// stalled peer cannot hold up a room.
#[derive(Debug)]
pub struct PeerHandle {
    id: PeerId,
    outbound: mpsc::Sender<String>,
}

impl PeerHandle {
    /// Wraps an outbound queue sender under the given peer id.
    #[must_use]
    pub fn new(id: PeerId, outbound: mpsc::Sender<String>) -> Self {
        Self { id, outbound }
    }

    /// Creates a handle and its receiving end with the given queue bound.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(PeerId::new(), tx), rx)
    }

    /// Returns the peer id.
    #[must_use]
    pub fn id(&self) -> PeerId {
        self.id
    }

    /// Queues `payload` for this peer without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Closed`] when the session has ended and
    /// [`DeliveryError::Full`] when the peer has fallen too far behind.
    pub fn deliver(&self, payload: String) -> Result<(), DeliveryError> {
        self.outbound.try_send(payload).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::Full,
            TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deliver_queues_in_order() {
        let (handle, mut rx) = PeerHandle::channel(4);
        assert!(handle.deliver("a".into()).is_ok());
        assert!(handle.deliver("b".into()).is_ok());
        assert_eq!(rx.recv().await.as_deref(), Some("a"));
        assert_eq!(rx.recv().await.as_deref(), Some("b"));
    }

    #[test]
    fn full_queue_is_reported() {
        let (handle, _rx) = PeerHandle::channel(1);
        assert!(handle.deliver("first".into()).is_ok());
        assert_eq!(handle.deliver("second".into()), Err(DeliveryError::Full));
    }

    #[test]
    fn dropped_receiver_is_reported() {
        let (handle, rx) = PeerHandle::channel(1);
        drop(rx);
        assert_eq!(handle.deliver("late".into()), Err(DeliveryError::Closed));
    }
}
