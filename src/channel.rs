//! A handoff that resolves at most once. Any number of producers may race to
//! [`deliver`](ResultChannel::deliver) a value, and exactly one of them wins. Every
//! consumer calling [`recv`](ResultChannel::recv) observes that same value,
//! whether it was waiting before the delivery or showed up afterwards.
//!
//! ```
//! use dialog_await::ResultChannel;
//!
//! let channel = ResultChannel::new();
//! assert!(channel.deliver("first"));
//! assert!(!channel.deliver("second"));
//!
//! let value = futures::executor::block_on(channel.recv());
//! assert_eq!(value, "first");
//! ```
//!
//! # Blocking and `.await`
//!
//! Delivering never blocks. Losing a delivery race is not an error either, it just
//! returns `false`. Only receiving waits (asynchronously), and only until the first
//! delivery. After that, [`recv`](ResultChannel::recv) resolves on its first poll.
//!
//! Dropping a pending [`recv`](ResultChannel::recv) future withdraws that waiter and
//! nothing else. The channel stays open, and other waiters still get the value.

use futures::channel::oneshot;
use parking_lot::Mutex;
use std::{fmt, mem, sync::Arc};

/// A single-resolution result slot. Cloning yields another handle to the same
/// slot.
///
/// Use [`deliver`](Self::deliver) to resolve it and [`recv`](Self::recv) to wait
/// for the resolution. [`peek`](Self::peek) reads the resolved value without
/// waiting.
pub struct ResultChannel<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

struct Inner<T> {
    value: Option<T>,
    waiters: Vec<oneshot::Sender<T>>,
}

impl<T> Clone for ResultChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ResultChannel<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: None,
                waiters: Vec::new(),
            })),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ResultChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ResultChannel")
            .field("value", &inner.value)
            .field("waiters", &inner.waiters.len())
            .finish()
    }
}

impl<T> ResultChannel<T>
where
    T: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the channel with `value` unless it is already resolved. Returns
    /// whether this call was the one that resolved it.
    ///
    /// Every waiter currently suspended in [`recv`](Self::recv) is woken with a
    /// clone of the value.
    pub fn deliver(&self, value: T) -> bool {
        let waiters = {
            let mut inner = self.inner.lock();
            if inner.value.is_some() {
                tracing::trace!("result already delivered, discarding late delivery");
                return false;
            }
            inner.value = Some(value.clone());
            mem::take(&mut inner.waiters)
        };

        tracing::debug!(waiters = waiters.len(), "result delivered");
        for waiter in waiters {
            // a cancelled wait has dropped its receiver
            let _ = waiter.send(value.clone());
        }
        true
    }

    /// Waits until the channel is resolved and returns the value. If it already
    /// is, returns on the first poll.
    pub async fn recv(&self) -> T {
        let rx = {
            let mut inner = self.inner.lock();
            if let Some(value) = &inner.value {
                return value.clone();
            }
            let (tx, rx) = oneshot::channel();
            inner.waiters.retain(|waiter| !waiter.is_canceled());
            inner.waiters.push(tx);
            rx
        };
        // senders only leave `waiters` through `deliver`, which sends first
        rx.await.ok().expect("result channel dropped a pending waiter")
    }

    /// The resolved value, if there is one.
    pub fn peek(&self) -> Option<T> {
        self.inner.lock().value.clone()
    }
}

impl<T> ResultChannel<T> {
    pub fn is_resolved(&self) -> bool {
        self.inner.lock().value.is_some()
    }
}
