//! Deferred task queue on a virtual clock.
//!
//! Tasks are ordered by due time, then by insertion order. Cancellation is
//! wholesale: `cancel_all` bumps the generation and every entry queued under
//! an older generation is dropped when it surfaces.
//!
//! A `Mark` splits the queue in two. Zero-delay tasks queued after the mark
//! are held back by `pop_due_before`, so a chain of immediate callbacks
//! advances one link per pass instead of spinning.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use tracing::trace;

struct Entry<T> {
    due: Duration,
    queued_at: Duration,
    seq: u64,
    generation: u64,
    task: T,
}

impl<T> Entry<T> {
    fn held_by(&self, mark: Mark) -> bool {
        self.seq >= mark.0 && self.due == self.queued_at
    }
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

impl<T> Ord for Entry<T> {
    // Reversed so the BinaryHeap pops the earliest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Position in the insertion order, taken with `Scheduler::mark`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark(u64);

impl Mark {
    /// Holds nothing back.
    pub const END: Mark = Mark(u64::MAX);
}

/// Single-threaded task queue driven by `advance`.
pub struct Scheduler<T> {
    now: Duration,
    generation: u64,
    next_seq: u64,
    queue: BinaryHeap<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            generation: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Everything queued from here on is after the mark.
    #[must_use]
    pub fn mark(&self) -> Mark {
        Mark(self.next_seq)
    }

    /// Queue `task` to run `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        let entry = Entry {
            due: self.now + delay,
            queued_at: self.now,
            seq: self.next_seq,
            generation: self.generation,
            task,
        };
        trace!(due_ms = entry.due.as_millis() as u64, seq = entry.seq, "task scheduled");
        self.next_seq += 1;
        self.queue.push(entry);
    }

    /// Invalidate everything queued so far.
    pub fn cancel_all(&mut self) {
        self.generation += 1;
    }

    /// Move the clock forward.
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    /// Pop the next live task that is due, discarding stale ones.
    pub fn pop_due(&mut self) -> Option<T> {
        self.pop_due_before(Mark::END)
    }

    /// Like `pop_due`, skipping zero-delay tasks queued after `mark`.
    pub fn pop_due_before(&mut self, mark: Mark) -> Option<T> {
        let mut held = Vec::new();
        let mut found = None;
        while let Some(entry) = self.queue.pop() {
            if entry.due > self.now {
                self.queue.push(entry);
                break;
            }
            if entry.generation != self.generation {
                trace!(seq = entry.seq, "stale task dropped");
                continue;
            }
            if entry.held_by(mark) {
                held.push(entry);
                continue;
            }
            found = Some(entry.task);
            break;
        }
        self.queue.extend(held);
        found
    }

    /// Number of live tasks still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|e| e.generation == self.generation)
            .count()
    }

    /// Time until the next live task is due, if any.
    #[must_use]
    pub fn next_due_in(&self) -> Option<Duration> {
        self.next_due_before(Mark::END)
    }

    /// Like `next_due_in`, ignoring what `pop_due_before(mark)` would hold back.
    #[must_use]
    pub fn next_due_before(&self, mark: Mark) -> Option<Duration> {
        self.queue
            .iter()
            .filter(|e| e.generation == self.generation && !e.held_by(mark))
            .map(|e| e.due.saturating_sub(self.now))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_tasks_fire_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(500), "late");
        s.schedule(ms(100), "early");
        s.schedule(ms(100), "early-second");

        assert_eq!(s.pop_due(), None);
        s.advance(ms(100));
        assert_eq!(s.pop_due(), Some("early"));
        assert_eq!(s.pop_due(), Some("early-second"));
        assert_eq!(s.pop_due(), None);

        s.advance(ms(400));
        assert_eq!(s.pop_due(), Some("late"));
    }

    #[test]
    fn test_cancel_all_drops_stale_tasks() {
        let mut s = Scheduler::new();
        s.schedule(ms(10), 1);
        s.schedule(ms(20), 2);
        assert_eq!(s.pending(), 2);

        s.cancel_all();
        assert_eq!(s.pending(), 0);
        s.schedule(ms(30), 3);

        s.advance(ms(50));
        assert_eq!(s.pop_due(), Some(3));
        assert_eq!(s.pop_due(), None);
    }

    #[test]
    fn test_mark_holds_back_immediate_follow_ups() {
        let mut s = Scheduler::new();
        s.schedule(Duration::ZERO, "before");
        let mark = s.mark();
        s.schedule(Duration::ZERO, "after");
        s.schedule(ms(10), "later");

        assert_eq!(s.pop_due_before(mark), Some("before"));
        assert_eq!(s.pop_due_before(mark), None);
        assert_eq!(s.next_due_before(mark), Some(ms(10)));
        assert_eq!(s.pending(), 2);

        s.advance(ms(10));
        assert_eq!(s.pop_due_before(mark), Some("later"));
        assert_eq!(s.pop_due_before(mark), None);
        assert_eq!(s.pop_due_before(s.mark()), Some("after"));
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut s = Scheduler::new();
        s.schedule(Duration::ZERO, 'x');
        assert_eq!(s.next_due_in(), Some(Duration::ZERO));
        assert_eq!(s.pop_due(), Some('x'));
        assert_eq!(s.next_due_in(), None);
    }
}
