//! Delayed-transition scheduling for a quiz run.
//!
//! The `TransitionQueue` is a discrete-event priority queue over wall-clock
//! milliseconds. Each entry carries the run generation it was scheduled
//! under; entries from an abandoned generation (a retried run) are skipped by
//! the caller, so a stale timer firing is a no-op rather than a mutation of a
//! run the user has left.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Which timed transition a queue entry drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransitionKind {
    /// Reveal delay elapsed; the advance control unlocks.
    RevealElapsed,
    /// Automatic completion path after the final stage is answered.
    AutoFinish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedTransition {
    pub fire_at_ms: u64,
    pub generation: u32,
    pub kind: TransitionKind,
}

/// Wrapper that provides Ord for DelayedTransition.
/// Ordering: (fire_at_ms ASC, kind ASC, generation ASC).
/// We use `Reverse` in the BinaryHeap so the earliest entry comes out first.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct OrderedTransition(DelayedTransition);

impl PartialOrd for OrderedTransition {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedTransition {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .fire_at_ms
            .cmp(&other.0.fire_at_ms)
            .then_with(|| self.0.kind.cmp(&other.0.kind))
            .then_with(|| self.0.generation.cmp(&other.0.generation))
    }
}

#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: BinaryHeap<Reverse<OrderedTransition>>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, transition: DelayedTransition) {
        self.queue.push(Reverse(OrderedTransition(transition)));
    }

    /// Pop the next entry whose fire time has been reached, earliest first.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<DelayedTransition> {
        let next = self.queue.peek()?;
        if next.0 .0.fire_at_ms > now_ms {
            return None;
        }
        self.queue.pop().map(|entry| entry.0 .0)
    }

    pub fn peek_next_fire_ms(&self) -> Option<u64> {
        self.queue.peek().map(|entry| entry.0 .0.fire_at_ms)
    }

    /// Entries scheduled under the given (live) generation.
    pub fn pending_for(&self, generation: u32) -> usize {
        self.queue
            .iter()
            .filter(|entry| entry.0 .0.generation == generation)
            .count()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_entries_in_fire_time_order() {
        let mut queue = TransitionQueue::new();
        queue.schedule(DelayedTransition {
            fire_at_ms: 2_500,
            generation: 0,
            kind: TransitionKind::AutoFinish,
        });
        queue.schedule(DelayedTransition {
            fire_at_ms: 1_500,
            generation: 0,
            kind: TransitionKind::RevealElapsed,
        });

        assert_eq!(queue.peek_next_fire_ms(), Some(1_500));
        assert!(queue.pop_due(1_000).is_none());
        let first = queue.pop_due(3_000).expect("entry due");
        assert_eq!(first.kind, TransitionKind::RevealElapsed);
        let second = queue.pop_due(3_000).expect("entry due");
        assert_eq!(second.kind, TransitionKind::AutoFinish);
        assert!(queue.is_empty());
    }

    #[test]
    fn pending_for_counts_only_live_generation() {
        let mut queue = TransitionQueue::new();
        queue.schedule(DelayedTransition {
            fire_at_ms: 100,
            generation: 0,
            kind: TransitionKind::RevealElapsed,
        });
        queue.schedule(DelayedTransition {
            fire_at_ms: 200,
            generation: 1,
            kind: TransitionKind::RevealElapsed,
        });

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pending_for(1), 1);
    }
}
