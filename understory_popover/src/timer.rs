// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover timers: single-shot open/close slots driven by an injected scheduler.
//!
//! ## Overview
//!
//! A popover has at most one pending open timer and at most one pending close
//! timer. [`HoverTimers`] owns those two slots. It never stores callbacks:
//! the delayed action is identified by its [`TimerKind`], and the embedder
//! delivers fired handles back to
//! [`PopoverState::fire_timer`](crate::state::PopoverState::fire_timer).
//!
//! A handle that was cancelled or superseded is no longer in its slot, so a
//! late delivery is rejected by [`HoverTimers::take_fired`]. This is what makes
//! a cancel issued in the same synchronous turn win over the timer.
//!
//! ## Scheduling context
//!
//! Implement [`Scheduler`] on top of your event loop. For tests, demos and
//! hosts without a real clock, [`ManualScheduler`] provides a virtual clock
//! that is advanced explicitly.
//!
//! ```
//! use understory_popover::timer::{HoverTimers, ManualScheduler, TimerKind};
//!
//! let mut scheduler = ManualScheduler::new();
//! let mut timers = HoverTimers::new();
//!
//! let first = timers.arm(&mut scheduler, TimerKind::Close, 300);
//! // Re-arming supersedes the previous timer of the same kind.
//! let second = timers.arm(&mut scheduler, TimerKind::Close, 300);
//! assert_ne!(first, second);
//! assert_eq!(scheduler.pending_count(), 1);
//!
//! scheduler.advance_by(300);
//! let due = scheduler.pop_due().unwrap();
//! assert_eq!(timers.take_fired(due), Some(TimerKind::Close));
//! assert_eq!(timers.take_fired(first), None);
//! ```

use alloc::vec::Vec;
use core::num::NonZeroU64;

/// Opaque identifier of a scheduled timer.
///
/// Handles are minted by a [`Scheduler`]; two handles issued by the same
/// scheduler never compare equal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimerHandle(NonZeroU64);

impl TimerHandle {
    /// Wrap a raw scheduler id.
    pub const fn new(raw: NonZeroU64) -> Self {
        Self(raw)
    }

    /// The raw scheduler id.
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

/// Which of the two timer slots a handle belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TimerKind {
    /// Delayed hover open, armed by the trigger.
    Open,
    /// Delayed hover close, armed by the root after a grace-area exit.
    Close,
}

/// A scheduling context for delayed popover actions.
///
/// Delays are in milliseconds. The popover never schedules a zero delay: it
/// runs zero-delay actions synchronously instead.
pub trait Scheduler {
    /// Schedule a single-shot timer and return its handle.
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle;

    /// Cancel a timer. Cancelling a fired or unknown handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle {
        (**self).schedule(delay_ms)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle);
    }
}

/// The open and close timer slots of one popover.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverTimers {
    open: Option<TimerHandle>,
    close: Option<TimerHandle>,
}

impl HoverTimers {
    /// Create empty slots.
    pub const fn new() -> Self {
        Self {
            open: None,
            close: None,
        }
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<TimerHandle> {
        match kind {
            TimerKind::Open => &mut self.open,
            TimerKind::Close => &mut self.close,
        }
    }

    /// The pending handle of `kind`, if any.
    pub fn pending(&self, kind: TimerKind) -> Option<TimerHandle> {
        match kind {
            TimerKind::Open => self.open,
            TimerKind::Close => self.close,
        }
    }

    /// Whether a timer of `kind` is pending.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending(kind).is_some()
    }

    /// Cancel any pending timer of `kind` and schedule a new one.
    pub fn arm<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        kind: TimerKind,
        delay_ms: u64,
    ) -> TimerHandle {
        self.cancel(scheduler, kind);
        let handle = scheduler.schedule(delay_ms);
        *self.slot_mut(kind) = Some(handle);
        trace_event!(trace, ?kind, delay_ms, handle = handle.get(), "timer armed");
        handle
    }

    /// Cancel the pending timer of `kind`.
    ///
    /// Returns `true` if something was pending. Idempotent.
    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, kind: TimerKind) -> bool {
        match self.slot_mut(kind).take() {
            Some(handle) => {
                scheduler.cancel(handle);
                trace_event!(trace, ?kind, handle = handle.get(), "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel both slots.
    pub fn cancel_all<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.cancel(scheduler, TimerKind::Open);
        self.cancel(scheduler, TimerKind::Close);
    }

    /// Claim a fired handle.
    ///
    /// Clears the slot holding `handle` and returns its kind. Returns `None`
    /// when `handle` was cancelled or superseded; the caller must then ignore
    /// the firing.
    pub fn take_fired(&mut self, handle: TimerHandle) -> Option<TimerKind> {
        if self.open == Some(handle) {
            self.open = None;
            Some(TimerKind::Open)
        } else if self.close == Some(handle) {
            self.close = None;
            Some(TimerKind::Close)
        } else {
            None
        }
    }
}

/// A deterministic scheduler driven by an explicit virtual clock.
///
/// Time only moves through [`ManualScheduler::advance_by`]; due timers are
/// then drained with [`ManualScheduler::pop_due`] in deadline order (ties in
/// scheduling order).
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: u64,
    issued: u64,
    queue: Vec<(u64, TimerHandle)>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of timers that have neither fired nor been cancelled.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether `handle` is still waiting to fire.
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.queue.iter().any(|&(_, h)| h == handle)
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.iter().map(|&(deadline, _)| deadline).min()
    }

    /// Move the clock forward by `ms`.
    pub fn advance_by(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
    }

    /// Remove and return the earliest timer whose deadline has passed.
    pub fn pop_due(&mut self) -> Option<TimerHandle> {
        let now = self.now;
        let (idx, _) = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _))| *deadline <= now)
            .min_by_key(|(_, entry)| **entry)?;
        Some(self.queue.remove(idx).1)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle {
        let handle = TimerHandle(NonZeroU64::MIN.saturating_add(self.issued));
        self.issued += 1;
        self.queue.push((self.now.saturating_add(delay_ms), handle));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queue.retain(|&(_, h)| h != handle);
    }
}
