//! Page-scoped edit channels
//!
//! Delivery contract: at-least-once, arrival order only, cancelable.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use pagecraft_model::ElementEdit;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tracing::debug;

pub type EditCallback = Box<dyn Fn(ElementEdit) + Send + Sync + 'static>;

/// A source of live edits for pages
pub trait EditChannel: Send + Sync {
    /// Invoke `on_edit` once per edit published for `page_key` until the
    /// returned handle is cancelled or dropped.
    fn subscribe(&self, page_key: &str, on_edit: EditCallback) -> SubscriptionHandle;
}

/// Shared on/off switch between a handle and its delivery task.
///
/// The delivery task holds the lock for the whole callback, so turning the
/// gate off waits for a callback that is already running.
#[derive(Debug, Clone)]
pub struct DeliveryGate(Arc<Mutex<bool>>);

impl DeliveryGate {
    pub fn open() -> Self {
        Self(Arc::new(Mutex::new(true)))
    }

    pub fn closed() -> Self {
        Self(Arc::new(Mutex::new(false)))
    }

    pub fn is_open(&self) -> bool {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` unless the gate has been closed. Returns whether it ran.
    pub fn run<F: FnOnce()>(&self, f: F) -> bool {
        let open = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if *open {
            f();
        }
        *open
    }

    fn close(&self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }
}

/// Cancels a subscription when cancelled or dropped.
///
/// Once `cancel` returns the callback is not running and is never invoked
/// again. `cancel` blocks until an in-flight callback finishes, so it must
/// not be called from inside that callback.
pub struct SubscriptionHandle {
    gate: DeliveryGate,
    task: Option<JoinHandle<()>>,
}

impl SubscriptionHandle {
    pub fn new(gate: DeliveryGate, task: Option<JoinHandle<()>>) -> Self {
        Self { gate, task }
    }

    /// Handle for a subscription that never delivers anything
    pub fn inert() -> Self {
        Self::new(DeliveryGate::closed(), None)
    }

    pub fn is_active(&self) -> bool {
        self.gate.is_open()
    }

    pub fn cancel(&self) {
        self.gate.close();
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

struct Subscriber {
    id: u64,
    sender: mpsc::UnboundedSender<ElementEdit>,
}

/// In-process edit channel.
///
/// Every subscriber owns an unbounded queue, so a slow subscriber never
/// loses edits published in a burst.
pub struct BroadcastEditHub {
    pages: RwLock<HashMap<String, Vec<Subscriber>>>,
    next_id: AtomicU64,
}

impl BroadcastEditHub {
    pub fn new() -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    fn register(&self, page_key: &str) -> mpsc::UnboundedReceiver<ElementEdit> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut pages = self.pages.write().unwrap_or_else(PoisonError::into_inner);
        pages
            .entry(page_key.to_string())
            .or_default()
            .push(Subscriber { id, sender });
        receiver
    }

    /// Publish an edit, returning how many subscribers received it
    pub fn publish(&self, page_key: &str, edit: ElementEdit) -> usize {
        let (delivered, stale) = {
            let pages = self.pages.read().unwrap_or_else(PoisonError::into_inner);
            let Some(subscribers) = pages.get(page_key) else {
                debug!(page_key, "No live subscribers for edit");
                return 0;
            };
            let mut delivered = 0;
            let mut stale = Vec::new();
            for subscriber in subscribers {
                match subscriber.sender.send(edit.clone()) {
                    Ok(()) => delivered += 1,
                    Err(_) => stale.push(subscriber.id),
                }
            }
            (delivered, stale)
        };

        if !stale.is_empty() {
            self.prune(page_key, &stale);
        }
        if delivered == 0 {
            debug!(page_key, "No live subscribers for edit");
        }
        delivered
    }

    fn prune(&self, page_key: &str, ids: &[u64]) {
        let mut pages = self.pages.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(subscribers) = pages.get_mut(page_key) {
            subscribers.retain(|s| !ids.contains(&s.id));
            if subscribers.is_empty() {
                pages.remove(page_key);
            }
        }
    }

    pub fn subscriber_count(&self, page_key: &str) -> usize {
        let pages = self.pages.read().unwrap_or_else(PoisonError::into_inner);
        pages
            .get(page_key)
            .map_or(0, |subs| subs.iter().filter(|s| !s.sender.is_closed()).count())
    }
}

impl Default for BroadcastEditHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EditChannel for BroadcastEditHub {
    /// Must be called from within a Tokio runtime.
    fn subscribe(&self, page_key: &str, on_edit: EditCallback) -> SubscriptionHandle {
        let mut stream = UnboundedReceiverStream::new(self.register(page_key));
        let gate = DeliveryGate::open();
        let task_gate = gate.clone();
        let page_key = page_key.to_string();

        let task = tokio::spawn(async move {
            while let Some(edit) = stream.next().await {
                if !task_gate.run(|| on_edit(edit)) {
                    break;
                }
            }
            debug!(page_key = %page_key, "Live edit subscription ended");
        });

        SubscriptionHandle::new(gate, Some(task))
    }
}
