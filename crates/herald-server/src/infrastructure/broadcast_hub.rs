use herald_core::SignalEvent;
use herald_ports::SignalPublisher;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Membership set of live signal subscribers
///
/// Every subscriber owns a bounded queue. `publish` hands the event to each
/// member present at the moment of the call without waiting on any of them:
/// a full queue loses that one event, a closed queue loses its membership.
pub struct BroadcastHub {
    members: RwLock<HashMap<Uuid, mpsc::Sender<Arc<SignalEvent>>>>,
    /// Per-subscriber queue capacity
    buffer: usize,
    closed: AtomicBool,
}

impl BroadcastHub {
    pub fn new(buffer: usize) -> Self {
        BroadcastHub {
            members: RwLock::new(HashMap::new()),
            buffer: buffer.max(1),
            closed: AtomicBool::new(false),
        }
    }

    /// Join the membership set
    ///
    /// Only events published after this call returns are delivered.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(self.buffer);

        {
            let mut members = self.members.write();
            // Checked under the lock so a concurrent `close` cannot miss us
            if self.closed.load(Ordering::SeqCst) {
                drop(tx);
            } else {
                members.insert(id, tx);
            }
        }

        debug!(subscriber = %id, "Subscriber joined");
        Subscription {
            id,
            rx,
            hub: Arc::downgrade(self),
        }
    }

    /// Leave the membership set. Unknown or repeated ids are ignored.
    pub fn unsubscribe(&self, id: Uuid) -> bool {
        let removed = self.members.write().remove(&id).is_some();
        if removed {
            debug!(subscriber = %id, "Subscriber left");
        }
        removed
    }

    /// Deliver `event` to every current member, returning how many accepted it
    pub fn broadcast(&self, event: SignalEvent) -> usize {
        let event = Arc::new(event);
        let mut delivered = 0;
        let mut gone = Vec::new();

        {
            let members = self.members.read();
            for (id, tx) in members.iter() {
                match tx.try_send(Arc::clone(&event)) {
                    Ok(()) => delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        warn!(
                            subscriber = %id,
                            signal_id = event.signal_id,
                            "Subscriber queue full, dropping event"
                        );
                    }
                    Err(TrySendError::Closed(_)) => gone.push(*id),
                }
            }
        }

        if !gone.is_empty() {
            let mut members = self.members.write();
            for id in gone {
                members.remove(&id);
                debug!(subscriber = %id, "Removed closed subscriber");
            }
        }

        debug!(signal_id = event.signal_id, delivered, "Signal broadcast");
        delivered
    }

    /// Drop every member; pending and future `recv` calls return `None`
    pub fn close(&self) {
        let mut members = self.members.write();
        self.closed.store(true, Ordering::SeqCst);
        let count = members.len();
        members.clear();
        info!(subscribers = count, "Broadcast hub closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn subscriber_count(&self) -> usize {
        self.members.read().len()
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(256)
    }
}

impl SignalPublisher for BroadcastHub {
    fn publish(&self, event: SignalEvent) -> usize {
        self.broadcast(event)
    }

    fn subscriber_count(&self) -> usize {
        BroadcastHub::subscriber_count(self)
    }
}

/// Receiving end of one hub membership; dropping it unsubscribes
pub struct Subscription {
    id: Uuid,
    rx: mpsc::Receiver<Arc<SignalEvent>>,
    hub: Weak<BroadcastHub>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Next event, or `None` once the membership has ended
    pub async fn recv(&mut self) -> Option<Arc<SignalEvent>> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.unsubscribe(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
