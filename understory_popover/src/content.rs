// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content and close-button controllers.
//!
//! [`Content`] marks interaction when the user presses or focuses inside the
//! floating panel, aborts a pending delayed close when the pointer comes
//! back, and owns the [`GraceArea`] whose exit triggers the delayed hover
//! close. It also handles dismissal from outside interaction and Escape.
//!
//! [`Close`] is a button inside the content that closes the popover.

use kurbo::{Point, Rect};

use crate::grace::{GraceArea, GraceAreaEvent};
use crate::state::{OpenObserver, PopoverState};
use crate::timer::Scheduler;
use crate::types::{Key, PointerKind};

/// A pointer-down or focus landing outside the content.
///
/// Fields are computed by the embedder from the raw event target.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct InteractOutside {
    /// The application handled the event and prevented its default.
    pub default_prevented: bool,
    /// The target is this popover's trigger (or inside it).
    pub on_trigger: bool,
    /// The target is inside a custom anchor element used for positioning.
    pub in_custom_anchor: bool,
}

/// Input handling for popover content.
#[derive(Clone, Debug, Default)]
pub struct Content {
    grace: GraceArea,
}

impl Content {
    /// Create content with a default grace area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create content with a custom grace area (for example a larger buffer).
    pub fn with_grace_area(grace: GraceArea) -> Self {
        Self { grace }
    }

    /// The grace area.
    pub fn grace_area(&self) -> &GraceArea {
        &self.grace
    }

    /// A pointer press inside the content.
    pub fn on_pointer_down<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
    ) {
        root.mark_interaction();
    }

    /// Focus moved into the content. Only focusable targets count.
    pub fn on_focus_in<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
        focusable: bool,
    ) {
        if focusable {
            root.mark_interaction();
        }
    }

    /// The pointer entered the content.
    pub fn on_pointer_enter<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
        pointer: PointerKind,
    ) {
        if !pointer.can_hover() {
            return;
        }
        root.cancel_delayed_close();
    }

    /// The pointer left the content.
    ///
    /// Nothing happens here; leaving is judged by [`Self::on_pointer_move`].
    pub fn on_pointer_leave<S: Scheduler, O: OpenObserver>(
        &mut self,
        _root: &mut PopoverState<S, O>,
        _pointer: PointerKind,
    ) {
    }

    /// A pointer move anywhere, with the current trigger and content bounds.
    ///
    /// The grace area is active only for an unengaged hover session. An exit
    /// requests [`PopoverState::handle_delayed_hover_close`].
    pub fn on_pointer_move<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
        pointer: PointerKind,
        point: Point,
        trigger: Rect,
        content: Rect,
    ) -> GraceAreaEvent {
        if !pointer.can_hover() {
            return GraceAreaEvent::Idle;
        }
        self.grace.set_enabled(root.grace_area_active());
        let event = self.grace.pointer_move(point, trigger, content);
        if event == GraceAreaEvent::Exit {
            root.handle_delayed_hover_close();
        }
        event
    }

    /// An interaction outside the content. Closes unless excluded.
    pub fn on_interact_outside<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
        outside: InteractOutside,
    ) {
        if outside.default_prevented || outside.on_trigger || outside.in_custom_anchor {
            return;
        }
        root.handle_close();
    }

    /// Escape pressed while the content is open.
    pub fn on_escape_key_down<S: Scheduler, O: OpenObserver>(
        &mut self,
        root: &mut PopoverState<S, O>,
        default_prevented: bool,
    ) {
        if default_prevented {
            return;
        }
        root.handle_close();
    }

    /// Whether the content should trap focus right now.
    pub fn should_trap_focus<S: Scheduler, O: OpenObserver>(
        &self,
        root: &PopoverState<S, O>,
    ) -> bool {
        root.should_trap_focus()
    }
}

/// A close button inside the content.
#[derive(Copy, Clone, Debug, Default)]
pub struct Close;

impl Close {
    /// The button was clicked.
    pub fn on_click<S: Scheduler, O: OpenObserver>(&self, root: &mut PopoverState<S, O>) {
        root.handle_close();
    }

    /// A key press on the button. Returns `true` when consumed.
    pub fn on_key_down<S: Scheduler, O: OpenObserver>(
        &self,
        root: &mut PopoverState<S, O>,
        key: Key,
    ) -> bool {
        if !key.is_activation() {
            return false;
        }
        root.handle_close();
        true
    }
}
