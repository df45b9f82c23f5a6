/*!
 * FIFO Work Queue
 * Blocking, timed, and non-blocking pop over a mutex-protected deque
 */

use crate::sync::Signal;
use log::trace;
use parking_lot::{Mutex, MutexGuard};
use std::collections::VecDeque;
use std::time::Duration;

/// Thread-safe, unbounded FIFO work queue
///
/// Producers append with [`push`](WorkQueue::push) (or through a
/// [`WorkQueueGuard`] when the push must compose with a larger critical
/// section); consumers take the head with [`wait_pop`](WorkQueue::wait_pop),
/// [`timed_pop`](WorkQueue::timed_pop), or [`try_pop`](WorkQueue::try_pop).
/// Items are opaque to the queue: they are moved in on push and moved out on
/// pop, never inspected or cloned.
///
/// Any number of producers and consumers may operate concurrently. Items are
/// delivered in FIFO order relative to pushes that do not race with each
/// other; racing pushes are ordered by whichever wins the lock. No item is
/// ever delivered twice. No fairness is guaranteed among waiting consumers
/// beyond "whoever takes the lock first after a wakeup wins".
///
/// Teardown is the caller's responsibility: drop the queue only after all
/// producers and consumers have quiesced. Shared use goes through an
/// [`Arc`](std::sync::Arc), whose lifetime makes early teardown
/// unrepresentable in safe code. Items still queued at drop are dropped with
/// the deque.
///
/// # Performance
/// - Cache-line aligned to keep the deque and signal off shared lines
/// - All non-blocking operations are O(1) critical sections
#[repr(align(64))]
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
    signal: Signal,
}

/// Scoped lock over a queue's items
///
/// Obtained from [`WorkQueue::lock`]. While the guard lives no other thread
/// can touch the queue, so several pushes (or a push plus decisions based on
/// [`len`](WorkQueueGuard::len)) become one atomic step from every other
/// thread's point of view. Consumers woken by the pushes start competing for
/// the items once the guard drops.
pub struct WorkQueueGuard<'a, T> {
    items: MutexGuard<'a, VecDeque<T>>,
    signal: &'a Signal,
}

impl<T> WorkQueueGuard<'_, T> {
    /// Append an item at the tail and raise the queue's signal
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
        self.signal.set();
    }

    /// Number of queued items under this lock
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty under this lock
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> WorkQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            signal: Signal::new(),
        }
    }

    /// Append an item at the tail and signal waiting consumers
    ///
    /// Pushes while the queue is already non-empty coalesce into the single
    /// raised level: the signal means "something to look at", not "N pushes
    /// happened".
    pub fn push(&self, item: T) {
        let mut items = self.items.lock();
        items.push_back(item);
        self.signal.set();
    }

    /// Lock the queue for a composite critical section
    ///
    /// Lets a caller update its own state and hand off work in one atomic
    /// step, pushing through the returned guard. Producers and consumers
    /// block until the guard drops.
    pub fn lock(&self) -> WorkQueueGuard<'_, T> {
        WorkQueueGuard {
            items: self.items.lock(),
            signal: &self.signal,
        }
    }

    /// Remove and return the head item, blocking until one is available
    ///
    /// Returns only an item this call itself removed. When one push wakes
    /// several consumers, whoever takes the lock first gets the item and the
    /// rest go back to waiting.
    pub fn wait_pop(&self) -> T {
        loop {
            self.signal.wait();

            let mut items = self.items.lock();
            if let Some(item) = items.pop_front() {
                if items.is_empty() {
                    // Last item out clears the level.
                    self.signal.reset();
                }
                return item;
            }
            // Another consumer emptied the queue between the wakeup and the
            // lock; wait again.
        }
    }

    /// Remove and return the head item, giving up after `timeout`
    ///
    /// Returns `None` if the timeout elapses with nothing to take. The
    /// signal generation is captured before the items lock is released, so a
    /// push landing between the emptiness check and the wait makes the wait
    /// return immediately instead of sleeping out the timeout.
    pub fn timed_pop(&self, timeout: Duration) -> Option<T> {
        loop {
            let mut items = self.items.lock();
            if let Some(item) = items.pop_front() {
                if items.is_empty() {
                    self.signal.reset();
                }
                return Some(item);
            }

            let generation = self.signal.generation();
            drop(items);

            if self.signal.wait_timeout(timeout, generation).is_err() {
                trace!("timed_pop expired after {:?}", timeout);
                return None;
            }
            // Woken: an item may be there, or another consumer already took
            // it. Re-check under the lock.
        }
    }

    /// Remove and return the head item without blocking
    ///
    /// Returns `None` immediately if the queue is empty.
    pub fn try_pop(&self) -> Option<T> {
        let mut items = self.items.lock();
        let item = items.pop_front();
        if item.is_some() && items.is_empty() {
            self.signal.reset();
        }
        item
    }

    /// Snapshot of emptiness; may be stale as soon as it returns
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Snapshot of the number of queued items; may be stale as soon as it
    /// returns
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
