//! Observable value container
//!
//! A `Signal<T>` holds one value and fans every write out to its subscribers
//! synchronously, on the writer's thread, before `set` returns. There is no
//! de-duplication: writing a value equal to the current one still notifies.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Callback<T> = Box<dyn FnMut(&T) + Send>;

struct SignalInner<T> {
    value: Mutex<T>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: AtomicU64,
}

/// A shared observable value. Cloning the signal clones the handle, not the
/// value; all clones observe and mutate the same underlying slot.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send> Signal<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                value: Mutex::new(initial),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.value.lock().clone()
    }

    /// Write a new value and notify every subscriber before returning.
    ///
    /// The value lock is released before fan-out, so callbacks may read this
    /// signal (or others). A callback must not call `set` or `subscribe` on
    /// the signal it is observing; the subscriber lock is held during fan-out.
    pub fn set(&self, value: T) {
        *self.inner.value.lock() = value.clone();
        let mut subscribers = self.inner.subscribers.lock();
        for (_, callback) in subscribers.iter_mut() {
            callback(&value);
        }
    }

    /// Register a callback invoked on every subsequent write.
    ///
    /// The returned [`Subscription`] detaches the callback when dropped, so
    /// the caller must hold on to it for as long as it wants notifications.
    pub fn subscribe(&self, callback: impl FnMut(&T) + Send + 'static) -> Subscription<T> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.lock().push((id, Box::new(callback)));
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}

/// Handle for one registered subscriber; dropping it unsubscribes.
pub struct Subscription<T> {
    inner: Weak<SignalInner<T>>,
    id: u64,
}

impl<T> Subscription<T> {
    /// Explicitly detach the callback. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.subscribers.lock().retain(|(id, _)| *id != self.id);
        }
    }
}
