//! Change-notification fan-out with a monotonic snapshot version.
//!
//! Each store owns one [`ChangeNotifier`]. Consumers follow the external-store
//! contract: register a zero-argument callback with [`ChangeNotifier::subscribe`]
//! and read [`ChangeNotifier::version`] to detect "something changed" without
//! diffing values. The returned [`Subscription`] unregisters on drop.

use std::sync::{
    Arc, Mutex, Weak,
    atomic::{AtomicU64, Ordering},
};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Listener registry plus monotonic version counter.
pub struct ChangeNotifier {
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    version: AtomicU64,
}

impl ChangeNotifier {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(1),
            version: AtomicU64::new(0),
        })
    }

    /// Current snapshot version. Starts at 0 and increases by exactly one per
    /// [`notify`](Self::notify) call.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Register a callback invoked after every mutation. Dropping the returned
    /// [`Subscription`] unregisters it.
    #[must_use]
    pub fn subscribe(self: &Arc<Self>, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock_listeners().push((id, Arc::new(listener)));
        Subscription {
            notifier: Arc::downgrade(self),
            id,
        }
    }

    /// Bump the version, then invoke every listener registered at call time.
    ///
    /// Listeners run outside the registry lock, so a listener may subscribe or
    /// unsubscribe (itself included) without deadlocking or skipping the
    /// remaining listeners in this round.
    pub fn notify(&self) {
        self.version.fetch_add(1, Ordering::AcqRel);
        let snapshot: Vec<Listener> = self
            .lock_listeners()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in snapshot {
            listener();
        }
    }

    fn unsubscribe(&self, id: u64) {
        self.lock_listeners().retain(|(lid, _)| *lid != id);
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Vec<(u64, Listener)>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Guard for a registered listener; dropping it unregisters the listener.
pub struct Subscription {
    notifier: Weak<ChangeNotifier>,
    id: u64,
}

impl Subscription {
    /// Explicit unsubscribe; equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(notifier) = self.notifier.upgrade() {
            notifier.unsubscribe(self.id);
        }
    }
}
