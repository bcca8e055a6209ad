// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory demos.
//!
//! [`replay`] drives a [`Popover`] from a scripted pointer path the way a
//! toolkit would: it synthesizes enter/leave events from rectangle
//! containment and forwards every move to the grace area.

use kurbo::{Point, Rect};
use understory_popover::Popover;
use understory_popover::grace::{GraceAreaEvent, contains_inclusive};
use understory_popover::state::OpenObserver;
use understory_popover::timer::ManualScheduler;
use understory_popover::types::{PRIMARY_BUTTON, PointerKind};

/// One step of a scripted session.
#[derive(Copy, Clone, Debug)]
pub enum Step {
    /// Move the mouse to `(x, y)`.
    Move(f64, f64),
    /// Let the virtual clock run for this many milliseconds.
    Wait(u64),
    /// Primary click on the trigger.
    Click,
}

/// What happened in one step.
#[derive(Copy, Clone, Debug)]
pub enum StepOutcome {
    /// Grace-area verdict of a move.
    Moved(GraceAreaEvent),
    /// Number of timers delivered during a wait.
    Waited(usize),
    /// A click was delivered.
    Clicked,
}

/// Replay `script` against `p`, calling `report` after each step.
pub fn replay<O: OpenObserver>(
    p: &mut Popover<ManualScheduler, O>,
    trigger: Rect,
    content: Rect,
    script: &[Step],
    mut report: impl FnMut(&Popover<ManualScheduler, O>, Step, StepOutcome),
) {
    let mouse = PointerKind::Mouse;
    let mut in_trigger = false;
    let mut in_content = false;
    for &step in script {
        let outcome = match step {
            Step::Move(x, y) => {
                let pt = Point::new(x, y);
                let now_trigger = contains_inclusive(trigger, pt);
                let now_content = contains_inclusive(content, pt);
                if now_trigger && !in_trigger {
                    p.trigger.on_pointer_enter(&mut p.state, mouse);
                }
                if !now_trigger && in_trigger {
                    p.trigger.on_pointer_leave(&mut p.state, mouse);
                }
                if now_content && !in_content {
                    p.content.on_pointer_enter(&mut p.state, mouse);
                }
                if !now_content && in_content {
                    p.content.on_pointer_leave(&mut p.state, mouse);
                }
                in_trigger = now_trigger;
                in_content = now_content;
                StepOutcome::Moved(p.pointer_move(mouse, pt, trigger, content))
            }
            Step::Wait(ms) => StepOutcome::Waited(p.state.advance(ms)),
            Step::Click => {
                p.trigger.on_click(&mut p.state, PRIMARY_BUTTON);
                StepOutcome::Clicked
            }
        };
        report(&*p, step, outcome);
    }
}
