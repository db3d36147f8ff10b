//! Single-shot settle timer.
//!
//! Input that should settle after a pause schedules an action; any newer input
//! cancels or replaces it. The clock is passed in by the caller, so the timer
//! never fires on its own: whoever drives the event loop polls [`Stasis::fire_due`].

use std::time::{Duration, Instant};

/// Identifies one call to [`Stasis::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StasisHandle(u64);

#[derive(Debug)]
struct Pending<A> {
    generation: u64,
    deadline: Instant,
    action: A,
}

/// At most one pending action, fired once its deadline has passed.
#[derive(Debug)]
pub struct Stasis<A> {
    delay: Duration,
    generation: u64,
    pending: Option<Pending<A>>,
}

impl<A> Stasis<A> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending action with `action`, due `delay` after `now`.
    pub fn schedule(&mut self, action: A, now: Instant) -> StasisHandle {
        self.generation += 1;
        self.pending = Some(Pending {
            generation: self.generation,
            deadline: now + self.delay,
            action,
        });
        StasisHandle(self.generation)
    }

    /// Drop the pending action, if any. Calling it again is harmless.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.action)
    }

    /// Cancel only if `handle` is still the pending schedule.
    pub fn cancel_handle(&mut self, handle: StasisHandle) -> Option<A> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.generation == handle.0);
        if current {
            self.cancel()
        } else {
            None
        }
    }

    /// Take the pending action if its deadline has been reached.
    pub fn fire_due(&mut self, now: Instant) -> Option<A> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if due {
            self.cancel()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}
