// SPDX-License-Identifier: MPL-2.0
//! Cooperative deferred actions.
//!
//! Nothing here sleeps or spawns. The owner schedules actions against an
//! explicit clock, asks [`DeferredQueue::next_deadline`] when it should wake
//! up, and collects due actions with [`DeferredQueue::take_due`] from its
//! event loop.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<A> {
    seq: u64,
    due: Instant,
    action: A,
}

/// Queue of cancellable actions, each due at an instant.
///
/// Scheduling the same action twice keeps both entries. Actions due at the
/// same instant fire in scheduling order.
#[derive(Debug, Clone)]
pub struct DeferredQueue<A> {
    next_seq: u64,
    pending: Vec<Pending<A>>,
}

impl<A> DeferredQueue<A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, due: Instant, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending { seq, due, action });
    }

    pub fn schedule_after(&mut self, now: Instant, delay: Duration, action: A) {
        self.schedule(now + delay, action);
    }

    /// Cancels everything; safe to call repeatedly.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    /// Removes and returns every action due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<A> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter().map(|p| p.action).collect()
    }

    /// Deadline of the earliest pending action.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<A> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        A,
        B,
    }

    #[test]
    fn actions_fire_only_when_due() {
        let t0 = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule_after(t0, Duration::from_millis(500), Action::A);

        assert!(queue.take_due(t0 + Duration::from_millis(499)).is_empty());
        assert_eq!(queue.take_due(t0 + Duration::from_millis(500)), vec![Action::A]);
        assert!(queue.is_empty());
    }

    #[test]
    fn due_actions_come_out_in_deadline_order() {
        let t0 = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule_after(t0, Duration::from_millis(300), Action::B);
        queue.schedule_after(t0, Duration::from_millis(100), Action::A);

        assert_eq!(
            queue.take_due(t0 + Duration::from_secs(1)),
            vec![Action::A, Action::B]
        );
    }

    #[test]
    fn rescheduling_stacks() {
        let t0 = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule_after(t0, Duration::from_millis(500), Action::A);
        queue.schedule_after(t0 + Duration::from_millis(200), Duration::from_millis(500), Action::A);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.next_deadline(), Some(t0 + Duration::from_millis(500)));
        assert_eq!(queue.take_due(t0 + Duration::from_millis(600)), vec![Action::A]);
        assert_eq!(queue.take_due(t0 + Duration::from_millis(700)), vec![Action::A]);
    }

    #[test]
    fn simultaneous_actions_keep_scheduling_order() {
        let t0 = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(t0, Action::B);
        queue.schedule(t0, Action::A);

        assert_eq!(queue.take_due(t0), vec![Action::B, Action::A]);
    }

    #[test]
    fn cancel_all_is_repeatable() {
        let t0 = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(t0, Action::A);
        queue.schedule(t0, Action::B);

        assert_eq!(queue.cancel_all(), 2);
        assert_eq!(queue.cancel_all(), 0);
        assert!(queue.next_deadline().is_none());
    }
}
