/*!
 * Work Queue Library
 * Thread-safe FIFO work handoff between producer and consumer threads
 */

pub mod queue;
pub mod sync;

// Re-exports
pub use queue::{WorkQueue, WorkQueueGuard};
pub use sync::{Signal, WaitError, WaitResult};
