/*!
 * Synchronization Primitives
 *
 * The level-triggered signal the work queue is built on.
 *
 * # Architecture
 *
 * [`Signal`] is a mutex-protected flag plus a condvar, with a generation
 * counter bumped on every clear-to-set transition. The counter is what lets a
 * timed waiter release the lock guarding its predicate, then start waiting,
 * without a set in the gap going unnoticed (the classic lost wakeup).
 *
 * # Use Cases
 *
 * - **Work queues**: level up while items are pending, down when drained
 * - **Completion flags**: block until some other thread finishes a step
 */

mod signal;

pub use signal::{Signal, WaitError, WaitResult};
