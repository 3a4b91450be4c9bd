#![forbid(unsafe_code)]

//! Cancellable single-shot timer for deferred resolution.
//!
//! [`DeferredTimer`] does not spawn anything. It records a deadline and hands
//! out a [`TimerHandle`] that the host can use to schedule a wakeup on its own
//! event loop. When the wakeup arrives the host reports it back with
//! [`DeferredTimer::fire`]; only the handle of the current arming can fire.
//!
//! # Invariants
//!
//! 1. At most one arming is pending at a time. Arming again replaces it.
//! 2. A handle from a cancelled, replaced or already fired arming never fires.
//! 3. A timer fires at or after its deadline, never before.

use web_time::Instant;

/// Identity of one arming of a [`DeferredTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw generation number, useful as a key for host-side timer tables.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    handle: TimerHandle,
    deadline: Instant,
}

/// A cancellable single-shot timer owned by one state machine.
#[derive(Debug, Default)]
pub struct DeferredTimer {
    generation: u64,
    armed: Option<Armed>,
}

impl DeferredTimer {
    /// Create an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            armed: None,
        }
    }

    /// Arm the timer for `deadline`, replacing any pending arming.
    pub fn arm(&mut self, deadline: Instant) -> TimerHandle {
        self.generation = self.generation.wrapping_add(1);
        let handle = TimerHandle(self.generation);
        self.armed = Some(Armed { handle, deadline });
        handle
    }

    /// Cancel the pending arming. Returns true if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    /// Whether an arming is pending.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Handle of the pending arming.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.armed.map(|a| a.handle)
    }

    /// Deadline of the pending arming.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|a| a.deadline)
    }

    /// Whether the pending arming has reached its deadline at `now`.
    #[inline]
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.armed.is_some_and(|a| now >= a.deadline)
    }

    /// Fire the pending arming if it is due, disarming the timer.
    ///
    /// Returns the handle that fired.
    pub fn fire_if_due(&mut self, now: Instant) -> Option<TimerHandle> {
        if self.is_due(now) {
            self.armed.take().map(|a| a.handle)
        } else {
            None
        }
    }

    /// Fire a specific arming reported by the host.
    ///
    /// Returns false (and leaves the timer untouched) when `handle` is stale
    /// or the deadline has not been reached yet.
    pub fn fire(&mut self, handle: TimerHandle, now: Instant) -> bool {
        match self.armed {
            Some(a) if a.handle == handle && now >= a.deadline => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }
}
