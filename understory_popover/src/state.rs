// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root popover state: the single source of truth for open/close.
//!
//! ## Overview
//!
//! [`PopoverState`] holds the open flag, the hover provenance of the current
//! open session, whether the user has interacted with the content, and the
//! hover cooldown. Controllers ([`Trigger`](crate::trigger::Trigger),
//! [`Content`](crate::content::Content), [`Close`](crate::content::Close))
//! borrow it mutably per event and call the transition methods here.
//!
//! ## Phases
//!
//! The flags span four observable [`Phase`]s:
//!
//! - `Closed`
//! - `OpenExplicit`: opened by click, keyboard, or [`PopoverState::set_open`]
//! - `OpenViaHover`: opened by hover, content not yet engaged
//! - `OpenViaHoverInteracted`: opened by hover, content focused or pressed
//!
//! Whenever the popover closes, provenance and interaction are reset and any
//! pending close timer is cancelled, so every open session starts clean.
//!
//! ## Timers
//!
//! Delayed actions go through the injected [`Scheduler`]. Deliver fired
//! handles with [`PopoverState::fire_timer`]; stale handles are ignored.
//!
//! ```
//! use understory_popover::state::{Phase, PopoverState};
//! use understory_popover::timer::ManualScheduler;
//!
//! let mut root = PopoverState::new(ManualScheduler::new());
//! root.set_close_delay(300);
//!
//! root.handle_hover_open();
//! assert_eq!(root.phase(), Phase::OpenViaHover);
//!
//! // A grace-area exit arms a delayed close...
//! root.handle_delayed_hover_close();
//! root.advance(100);
//! // ...which an interaction in the meantime defeats.
//! root.mark_interaction();
//! root.advance(500);
//! assert!(root.is_open());
//! assert_eq!(root.phase(), Phase::OpenViaHoverInteracted);
//! ```

use alloc::vec::Vec;

use crate::attrs::DataState;
use crate::timer::{HoverTimers, ManualScheduler, Scheduler, TimerHandle, TimerKind};

bitflags::bitflags! {
    /// Boolean state of a popover.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PopoverFlags: u8 {
        /// The popover is visible.
        const OPEN             = 0b0000_0001;
        /// The current open session came from a hover open.
        const OPENED_VIA_HOVER = 0b0000_0010;
        /// The user focused or pressed inside the content.
        const INTERACTED       = 0b0000_0100;
        /// Hover opening is suppressed until the trigger is left or clicked.
        const HOVER_COOLDOWN   = 0b0000_1000;
    }
}

/// The conceptual state of a popover, derived from its flags.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Not visible.
    Closed,
    /// Opened by click, keyboard, or an external force.
    OpenExplicit,
    /// Opened by hover; the content has not been engaged.
    OpenViaHover,
    /// Opened by hover; the content has been focused or pressed.
    OpenViaHoverInteracted,
}

/// Why the open flag changed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ChangeReason {
    /// [`PopoverState::toggle_open`].
    Toggle,
    /// [`PopoverState::handle_close`].
    Close,
    /// [`PopoverState::handle_hover_open`], directly or from the open timer.
    HoverOpen,
    /// [`PopoverState::handle_hover_close`].
    HoverClose,
    /// [`PopoverState::handle_delayed_hover_close`], directly or from the close timer.
    DelayedHoverClose,
    /// [`PopoverState::set_open`].
    External,
}

/// A recorded change of the open flag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OpenChange {
    /// The new value of the open flag.
    pub open: bool,
    /// What caused it.
    pub reason: ChangeReason,
}

/// Receives every change of the open flag.
pub trait OpenObserver {
    /// Called after the open flag changed and the close-reset ran.
    fn open_changed(&mut self, open: bool, reason: ChangeReason);
}

/// Ignores all changes.
impl OpenObserver for () {
    fn open_changed(&mut self, _open: bool, _reason: ChangeReason) {}
}

/// Records all changes in order.
impl OpenObserver for Vec<OpenChange> {
    fn open_changed(&mut self, open: bool, reason: ChangeReason) {
        self.push(OpenChange { open, reason });
    }
}

/// The root state machine of one popover.
///
/// `S` is the scheduling context; `O` observes open changes.
#[derive(Clone, Debug)]
pub struct PopoverState<S, O = ()> {
    flags: PopoverFlags,
    close_delay: u64,
    timers: HoverTimers,
    scheduler: S,
    observer: O,
}

impl<S: Scheduler> PopoverState<S> {
    /// Create a closed popover with no close delay.
    pub fn new(scheduler: S) -> Self {
        Self::with_observer(scheduler, ())
    }
}

impl<S: Scheduler, O: OpenObserver> PopoverState<S, O> {
    /// Create a closed popover that reports open changes to `observer`.
    pub fn with_observer(scheduler: S, observer: O) -> Self {
        Self {
            flags: PopoverFlags::empty(),
            close_delay: 0,
            timers: HoverTimers::new(),
            scheduler,
            observer,
        }
    }

    /// Current flags.
    pub fn flags(&self) -> PopoverFlags {
        self.flags
    }

    /// Whether the popover is open.
    pub fn is_open(&self) -> bool {
        self.flags.contains(PopoverFlags::OPEN)
    }

    /// Whether the current open session came from hover.
    pub fn opened_via_hover(&self) -> bool {
        self.flags.contains(PopoverFlags::OPENED_VIA_HOVER)
    }

    /// Whether the user interacted with the content during this session.
    pub fn has_interacted_with_content(&self) -> bool {
        self.flags.contains(PopoverFlags::INTERACTED)
    }

    /// Whether hover opening is currently suppressed.
    pub fn hover_cooldown(&self) -> bool {
        self.flags.contains(PopoverFlags::HOVER_COOLDOWN)
    }

    /// The derived phase.
    pub fn phase(&self) -> Phase {
        match (
            self.is_open(),
            self.opened_via_hover(),
            self.has_interacted_with_content(),
        ) {
            (false, _, _) => Phase::Closed,
            (true, false, _) => Phase::OpenExplicit,
            (true, true, false) => Phase::OpenViaHover,
            (true, true, true) => Phase::OpenViaHoverInteracted,
        }
    }

    /// `data-state` value for the current open flag.
    pub fn data_state(&self) -> DataState {
        DataState::from_open(self.is_open())
    }

    /// Close delay in milliseconds used by [`Self::handle_delayed_hover_close`].
    pub fn close_delay(&self) -> u64 {
        self.close_delay
    }

    /// Set the close delay. Takes effect for the next delayed close.
    pub fn set_close_delay(&mut self, ms: u64) {
        self.close_delay = ms;
    }

    /// The timer slots.
    pub fn timers(&self) -> &HoverTimers {
        &self.timers
    }

    /// The scheduling context.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The scheduling context, mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The open observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The open observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Whether the grace area should be judging pointer travel.
    pub fn grace_area_active(&self) -> bool {
        self.phase() == Phase::OpenViaHover
    }

    /// Whether the content should trap focus.
    ///
    /// A hover-opened popover the user has not engaged must not steal focus.
    pub fn should_trap_focus(&self) -> bool {
        self.phase() != Phase::OpenViaHover
    }

    fn apply_open(&mut self, open: bool, reason: ChangeReason) {
        if self.is_open() == open {
            return;
        }
        self.flags.set(PopoverFlags::OPEN, open);
        if !open {
            self.flags
                .remove(PopoverFlags::OPENED_VIA_HOVER | PopoverFlags::INTERACTED);
            self.timers.cancel(&mut self.scheduler, TimerKind::Close);
        }
        trace_event!(debug, open, ?reason, flags = self.flags.bits(), "popover open changed");
        self.observer.open_changed(open, reason);
    }

    /// Force the open flag from outside, as a bound `open` property would.
    pub fn set_open(&mut self, open: bool) {
        self.apply_open(open, ChangeReason::External);
    }

    /// Flip the open flag. Click and keyboard path; ignores hover state.
    pub fn toggle_open(&mut self) {
        self.timers.cancel(&mut self.scheduler, TimerKind::Close);
        let open = !self.is_open();
        self.apply_open(open, ChangeReason::Toggle);
    }

    /// Close. No-op (apart from cancelling the close timer) when closed.
    pub fn handle_close(&mut self) {
        self.timers.cancel(&mut self.scheduler, TimerKind::Close);
        self.apply_open(false, ChangeReason::Close);
    }

    /// Open as a hover session. No-op when already open.
    ///
    /// Callers must not invoke this while [`Self::hover_cooldown`] is set.
    pub fn handle_hover_open(&mut self) {
        self.timers.cancel(&mut self.scheduler, TimerKind::Close);
        if self.is_open() {
            return;
        }
        self.flags.insert(PopoverFlags::OPENED_VIA_HOVER);
        self.apply_open(true, ChangeReason::HoverOpen);
    }

    fn hover_close_allowed(&self) -> bool {
        self.opened_via_hover() && !self.has_interacted_with_content()
    }

    /// Close immediately, but only an unengaged hover session.
    pub fn handle_hover_close(&mut self) {
        if !self.is_open() || !self.hover_close_allowed() {
            return;
        }
        self.apply_open(false, ChangeReason::HoverClose);
    }

    /// Close an unengaged hover session after [`Self::close_delay`].
    ///
    /// The armed timer re-checks provenance and interaction when it fires.
    pub fn handle_delayed_hover_close(&mut self) {
        if !self.is_open() || !self.hover_close_allowed() {
            return;
        }
        if self.close_delay == 0 {
            self.apply_open(false, ChangeReason::DelayedHoverClose);
        } else {
            self.timers
                .arm(&mut self.scheduler, TimerKind::Close, self.close_delay);
        }
    }

    /// Cancel a pending delayed close without touching the open flag.
    pub fn cancel_delayed_close(&mut self) {
        self.timers.cancel(&mut self.scheduler, TimerKind::Close);
    }

    /// Record that the user engaged the content.
    ///
    /// Disables hover closing until the popover closes. No-op while closed.
    pub fn mark_interaction(&mut self) {
        if !self.is_open() {
            return;
        }
        self.flags.insert(PopoverFlags::INTERACTED);
        self.timers.cancel(&mut self.scheduler, TimerKind::Close);
    }

    /// Deliver a fired timer.
    ///
    /// Returns `false` when `handle` is not the armed handle of either slot
    /// (cancelled, superseded, or foreign); nothing happens in that case.
    pub fn fire_timer(&mut self, handle: TimerHandle) -> bool {
        match self.timers.take_fired(handle) {
            Some(TimerKind::Open) => {
                self.handle_hover_open();
                true
            }
            Some(TimerKind::Close) => {
                if self.is_open() && self.hover_close_allowed() {
                    self.apply_open(false, ChangeReason::DelayedHoverClose);
                }
                true
            }
            None => false,
        }
    }

    // Controller-facing helpers.

    pub(crate) fn arm_open_timer(&mut self, delay_ms: u64) {
        self.timers.arm(&mut self.scheduler, TimerKind::Open, delay_ms);
    }

    pub(crate) fn cancel_open_timer(&mut self) {
        self.timers.cancel(&mut self.scheduler, TimerKind::Open);
    }

    pub(crate) fn cancel_all_timers(&mut self) {
        self.timers.cancel_all(&mut self.scheduler);
    }

    pub(crate) fn set_hover_cooldown(&mut self, on: bool) {
        // Cooldown only ever starts on an open popover.
        if on && !self.is_open() {
            return;
        }
        self.flags.set(PopoverFlags::HOVER_COOLDOWN, on);
    }

    /// Turn a hover session into an explicit one.
    pub(crate) fn pin(&mut self) {
        if !self.is_open() {
            return;
        }
        self.flags.remove(PopoverFlags::OPENED_VIA_HOVER);
        self.mark_interaction();
    }
}

impl<O: OpenObserver> PopoverState<ManualScheduler, O> {
    /// Advance the virtual clock by `ms` and deliver every timer that became
    /// due, in deadline order. Returns the number of timers delivered, which
    /// includes close timers that re-checked the state and declined to close.
    pub fn advance(&mut self, ms: u64) -> usize {
        self.scheduler.advance_by(ms);
        let mut delivered = 0;
        while let Some(handle) = self.scheduler.pop_due() {
            if self.fire_timer(handle) {
                delivered += 1;
            }
        }
        delivered
    }
}
