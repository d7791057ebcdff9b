//! Virtual-clock queue of delayed work.
//!
//! Everything that happens "later" in a game (timer ticks, answer feedback,
//! countdown digits, notice clearing) is a task value queued here. The owner
//! advances the clock and handles due tasks one at a time, so there is never
//! more than one piece of game logic running.

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::Duration;

/// Cancellation handle for a scheduled task.
///
/// Cancelling only sets a flag; the queue drops the task when it comes due.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
    cancelled: Rc<Cell<bool>>,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the BinaryHeap pops the earliest due task first, FIFO on ties.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Entry<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.queue.push(Entry {
            due: self.now + delay,
            seq: self.next_seq,
            task,
            cancelled: Rc::clone(&cancelled),
        });
        self.next_seq += 1;
        TaskHandle { cancelled }
    }

    /// Pop the next live task due at or before `until`, moving the clock to its due time.
    ///
    /// Tasks scheduled while handling a popped task are seen by later calls,
    /// so a zero-delay task runs within the same advance.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        while let Some(entry) = self.queue.peek() {
            if entry.due > until {
                return None;
            }
            let entry = self.queue.pop()?;
            if entry.cancelled.get() {
                log::trace!("dropping cancelled task due at {:?}", entry.due);
                continue;
            }
            self.now = self.now.max(entry.due);
            return Some(entry.task);
        }
        None
    }

    /// Settle the clock at `until` once every due task has been handled
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Number of queued tasks that have not been cancelled
    pub fn pending(&self) -> usize {
        self.queue.iter().filter(|e| !e.cancelled.get()).count()
    }

    pub fn cancel_all(&mut self) {
        for entry in self.queue.drain() {
            entry.cancelled.set(true);
        }
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
