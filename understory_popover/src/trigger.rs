// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger controller: pointer and keyboard input on the trigger element.
//!
//! ## Hover sessions
//!
//! With [`TriggerConfig::open_on_hover`], entering the trigger arms the open
//! timer (or opens at once for a zero delay). Leaving the trigger cancels a
//! pending open and clears the hover cooldown, but never closes: the pointer
//! may be travelling to the content, which is for the
//! [grace area](crate::grace) to judge.
//!
//! ## Clicks
//!
//! A primary click cancels all timers, then:
//!
//! 1. on a hover-opened popover still under the pointer, pins it open as an
//!    explicit session instead of toggling it closed;
//! 2. when closing a popover that is still hovered, sets the hover cooldown
//!    so the same hover does not reopen it;
//! 3. when opening during a cooldown, clears the cooldown.
//!
//! and finally toggles. Keyboard activation always toggles.

use crate::attrs::{self, DataState};
use crate::state::{OpenObserver, PopoverState};
use crate::timer::Scheduler;
use crate::types::{Button, Key, PRIMARY_BUTTON, PointerKind};

/// Delay before a hover opens the popover, in milliseconds.
pub const DEFAULT_OPEN_DELAY: u64 = 700;

/// Trigger configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TriggerConfig {
    /// Ignore all input.
    pub disabled: bool,
    /// Open when the pointer hovers the trigger.
    pub open_on_hover: bool,
    /// Hover open delay in milliseconds; `0` opens immediately.
    pub open_delay: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            open_on_hover: false,
            open_delay: DEFAULT_OPEN_DELAY,
        }
    }
}

/// Input handling for a popover trigger.
#[derive(Clone, Debug, Default)]
pub struct Trigger {
    config: TriggerConfig,
    hovering: bool,
}

impl Trigger {
    /// Create a trigger.
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            config,
            hovering: false,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// Replace the configuration. Applies to the next event.
    pub fn set_config(&mut self, config: TriggerConfig) {
        self.config = config;
    }

    /// Whether the pointer is over the trigger in a hover-tracked session.
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    fn ignores_hover(&self, pointer: PointerKind) -> bool {
        self.config.disabled || !self.config.open_on_hover || !pointer.can_hover()
    }

    /// The pointer entered the trigger.
    pub fn on_pointer_enter<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
        pointer: PointerKind,
    ) {
        if self.ignores_hover(pointer) {
            return;
        }
        self.hovering = true;
        root.cancel_delayed_close();
        if root.is_open() || root.hover_cooldown() {
            return;
        }
        if self.config.open_delay == 0 {
            root.handle_hover_open();
        } else {
            root.arm_open_timer(self.config.open_delay);
        }
    }

    /// The pointer left the trigger.
    pub fn on_pointer_leave<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
        pointer: PointerKind,
    ) {
        if self.ignores_hover(pointer) {
            return;
        }
        self.hovering = false;
        root.cancel_open_timer();
        root.set_hover_cooldown(false);
    }

    /// A click on the trigger with `button`.
    pub fn on_click<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
        button: Button,
    ) {
        if self.config.disabled || button != PRIMARY_BUTTON {
            return;
        }
        root.cancel_all_timers();

        if self.hovering && root.is_open() && root.opened_via_hover() {
            root.pin();
            return;
        }
        if self.hovering && self.config.open_on_hover && root.is_open() {
            root.set_hover_cooldown(true);
        }
        if root.hover_cooldown() && !root.is_open() {
            root.set_hover_cooldown(false);
        }
        root.toggle_open();
    }

    /// Keyboard activation (Enter or Space). Bypasses all hover handling.
    pub fn on_key_activate<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
    ) {
        if self.config.disabled {
            return;
        }
        root.cancel_all_timers();
        root.toggle_open();
    }

    /// A key press on the trigger.
    ///
    /// Returns `true` when the key was consumed; the embedder should then
    /// suppress the key's default action.
    pub fn on_key_down<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
        key: Key,
    ) -> bool {
        if self.config.disabled || !key.is_activation() {
            return false;
        }
        self.on_key_activate(root);
        true
    }

    /// `aria-expanded` for the trigger.
    pub fn aria_expanded<S: Scheduler, O: OpenObserver>(
        &self,
        root: &PopoverState<S, O>,
    ) -> &'static str {
        attrs::aria_expanded(root.is_open())
    }

    /// `data-state` for the trigger.
    pub fn data_state<S: Scheduler, O: OpenObserver>(
        &self,
        root: &PopoverState<S, O>,
    ) -> DataState {
        root.data_state()
    }
}
