/*!
 * Level-Triggered Signal
 *
 * Mutex + condvar event with a generation counter for race-free timed waits
 */

use log::trace;
use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Result type for wait operations
pub type WaitResult<T> = Result<T, WaitError>;

/// Wait operation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    #[error("Wait operation timed out")]
    Timeout,
}

/// State behind the signal's mutex
struct SignalState {
    set: bool,
    generation: u64,
}

/// Level-triggered signal
///
/// The signal holds a level with two states, *set* and *clear*. A waiter in
/// [`wait`](Signal::wait) returns as soon as the level is set; the level stays
/// set until someone calls [`reset`](Signal::reset), so waiters arriving after
/// the set still get through. This is the "something to look at" shape of
/// notification: many sets while the level is already up coalesce into one.
///
/// `generation` increases on every clear-to-set transition. A timed waiter
/// captures it while still holding whatever lock guards its predicate, then
/// passes the captured value to [`wait_timeout`](Signal::wait_timeout); a set
/// that lands in the gap between releasing that lock and starting the wait
/// moves the counter and the wait returns without sleeping.
pub struct Signal {
    state: Mutex<SignalState>,
    condvar: Condvar,
}

impl Signal {
    /// Create a new signal, clear, at generation 0
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SignalState {
                set: false,
                generation: 0,
            }),
            condvar: Condvar::new(),
        }
    }

    /// Raise the level and wake all waiters
    ///
    /// Setting an already-set signal is a no-op: the level and the generation
    /// only move on the clear-to-set transition.
    pub fn set(&self) {
        let mut state = self.state.lock();
        if !state.set {
            state.set = true;
            state.generation += 1;
            self.condvar.notify_all();
        }
    }

    /// Clear the level
    ///
    /// Returns the current generation, which the caller can hand to
    /// [`wait_timeout`](Signal::wait_timeout) to detect sets that happen
    /// after this reset.
    pub fn reset(&self) -> u64 {
        let mut state = self.state.lock();
        state.set = false;
        state.generation
    }

    /// Current generation, without touching the level
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Snapshot of the level
    pub fn is_set(&self) -> bool {
        self.state.lock().set
    }

    /// Block until the level is set
    ///
    /// Returns immediately if the level is already set.
    pub fn wait(&self) {
        let mut state = self.state.lock();
        while !state.set {
            self.condvar.wait(&mut state);
        }
    }

    /// Block until the level is set, the generation moves past `generation`,
    /// or `timeout` elapses
    ///
    /// Never sleeps if either wake condition already holds on entry, so a set
    /// that happened between the caller capturing `generation` and calling
    /// here is not lost, even if a reset followed it.
    pub fn wait_timeout(&self, timeout: Duration, generation: u64) -> WaitResult<()> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();

        while !state.set && state.generation == generation {
            if self.condvar.wait_until(&mut state, deadline).timed_out() {
                trace!("signal wait timed out at generation {}", state.generation);
                return Err(WaitError::Timeout);
            }
        }

        Ok(())
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::new()
    }
}
