// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A bundled popover: one root with its trigger, content, and close button.

use kurbo::{Point, Rect};

use crate::content::{Close, Content};
use crate::grace::{GraceArea, GraceAreaEvent};
use crate::state::{OpenObserver, PopoverState};
use crate::timer::Scheduler;
use crate::trigger::{Trigger, TriggerConfig};
use crate::types::PointerKind;

/// Delay before an unengaged hover session closes after leaving the grace
/// area, in milliseconds.
pub const DEFAULT_CLOSE_DELAY: u64 = 300;

/// Configuration of a [`Popover`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PopoverConfig {
    /// Trigger behavior, including the hover open delay.
    pub trigger: TriggerConfig,
    /// Hover close delay in milliseconds; `0` closes immediately.
    pub close_delay: u64,
    /// Exit-point buffer of the grace area.
    pub grace_buffer: f64,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerConfig::default(),
            close_delay: DEFAULT_CLOSE_DELAY,
            grace_buffer: crate::grace::DEFAULT_BUFFER,
        }
    }
}

/// A root state with its controllers.
///
/// The fields are public so that each part can be driven directly, for
/// example `p.trigger.on_click(&mut p.state, 0)`.
#[derive(Clone, Debug)]
pub struct Popover<S, O = ()> {
    /// The root state machine.
    pub state: PopoverState<S, O>,
    /// The trigger controller.
    pub trigger: Trigger,
    /// The content controller and its grace area.
    pub content: Content,
    /// The close button controller.
    pub close: Close,
}

impl<S: Scheduler> Popover<S> {
    /// Create a closed popover.
    pub fn new(scheduler: S, config: PopoverConfig) -> Self {
        Self::with_observer(scheduler, (), config)
    }
}

impl<S: Scheduler, O: OpenObserver> Popover<S, O> {
    /// Create a closed popover reporting open changes to `observer`.
    pub fn with_observer(scheduler: S, observer: O, config: PopoverConfig) -> Self {
        let mut state = PopoverState::with_observer(scheduler, observer);
        state.set_close_delay(config.close_delay);
        Self {
            state,
            trigger: Trigger::new(config.trigger),
            content: Content::with_grace_area(GraceArea::with_buffer(config.grace_buffer)),
            close: Close,
        }
    }

    /// Whether the popover is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Feed a pointer move to the grace area.
    pub fn pointer_move(
        &mut self,
        pointer: PointerKind,
        point: Point,
        trigger: Rect,
        content: Rect,
    ) -> GraceAreaEvent {
        self.content
            .on_pointer_move(&mut self.state, pointer, point, trigger, content)
    }
}
