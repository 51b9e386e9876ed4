//! Change notification channel of observable (Inpc/Real) instances
//!
//! Subscribers are invoked synchronously, in registration order, on the
//! thread performing the mutation. The subscriber list is snapshotted before
//! dispatch, so callbacks may subscribe or unsubscribe freely.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Notification naming the property whose value changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChanged {
    pub property: Arc<str>,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type ChangeCallback = Arc<dyn Fn(&PropertyChanged) + Send + Sync>;

/// Ordered subscriber list
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(SubscriptionId, ChangeCallback)>>,
}

impl ChangeNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        self.attach(Arc::new(callback))
    }

    /// Register an already shared callback
    pub fn attach(&self, callback: ChangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, callback));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Emit one notification naming `property`
    pub fn notify(&self, property: &Arc<str>) {
        let callbacks: Vec<ChangeCallback> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        if callbacks.is_empty() {
            return;
        }
        let event = PropertyChanged {
            property: Arc::clone(property),
        };
        for callback in callbacks {
            callback(&event);
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Routes a collection's or dictionary's changes to its owner
///
/// The owning instance is the sole observer: the binding names the owning
/// property and holds the owner's notifier.
#[derive(Debug, Clone)]
pub struct OwnerBinding {
    property: Arc<str>,
    notifier: Arc<ChangeNotifier>,
}

impl OwnerBinding {
    pub fn new(property: Arc<str>, notifier: Arc<ChangeNotifier>) -> Self {
        Self { property, notifier }
    }

    pub fn property(&self) -> &Arc<str> {
        &self.property
    }

    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.notifier
    }

    pub fn notify(&self) {
        self.notifier.notify(&self.property);
    }
}
