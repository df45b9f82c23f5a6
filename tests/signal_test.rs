/*!
 * Signal Integration Tests
 *
 * Threaded tests for the level-triggered signal primitive
 */

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use wqueue::{Signal, WaitError};

#[test]
fn test_set_wakes_blocked_waiter() {
    let signal = Arc::new(Signal::new());
    let signal_clone = signal.clone();

    let handle = thread::spawn(move || {
        let start = Instant::now();
        signal_clone.wait();
        start.elapsed()
    });

    // Give thread time to park
    thread::sleep(Duration::from_millis(50));
    signal.set();

    let elapsed = handle.join().unwrap();
    assert!(elapsed >= Duration::from_millis(50));
    assert!(elapsed < Duration::from_secs(1));
}

#[test]
fn test_level_stays_up_for_late_waiters() {
    let signal = Signal::new();
    signal.set();

    // Waiters arriving after the set go straight through
    let start = Instant::now();
    signal.wait();
    signal.wait();
    assert!(start.elapsed() < Duration::from_millis(10));
}

#[test]
fn test_set_wakes_all_waiters() {
    let signal = Arc::new(Signal::new());

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let signal = signal.clone();
            thread::spawn(move || signal.wait())
        })
        .collect();

    thread::sleep(Duration::from_millis(100));
    signal.set();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_timed_wait_expires() {
    let signal = Signal::new();
    let generation = signal.generation();

    let start = Instant::now();
    let result = signal.wait_timeout(Duration::from_millis(50), generation);
    let elapsed = start.elapsed();

    assert_eq!(result, Err(WaitError::Timeout));
    assert!(elapsed >= Duration::from_millis(50));
    assert!(elapsed < Duration::from_millis(500)); // Should not overshoot
}

#[test]
fn test_set_in_gap_is_not_lost() {
    // The race the generation counter exists for: capture, then a full
    // set/reset cycle, then the wait. The wait must return immediately.
    let signal = Signal::new();
    let generation = signal.generation();

    signal.set();
    signal.reset();

    let start = Instant::now();
    let result = signal.wait_timeout(Duration::from_secs(5), generation);

    assert_eq!(result, Ok(()));
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[test]
fn test_reset_makes_waiters_block_again() {
    let signal = Arc::new(Signal::new());
    signal.set();
    signal.reset();

    let generation = signal.generation();
    let result = signal.wait_timeout(Duration::from_millis(50), generation);
    assert_eq!(result, Err(WaitError::Timeout));
}

#[test]
fn test_generation_moves_once_per_level_change() {
    let signal = Signal::new();
    let base = signal.generation();

    signal.set();
    signal.set();
    signal.set();
    assert_eq!(signal.generation(), base + 1);

    signal.reset();
    assert_eq!(signal.generation(), base + 1);

    signal.set();
    assert_eq!(signal.generation(), base + 2);
}
