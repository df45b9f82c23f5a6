/*!
 * Work Queue
 * FIFO handoff of opaque work items between producer and consumer threads
 */

mod work;

pub use work::{WorkQueue, WorkQueueGuard};
