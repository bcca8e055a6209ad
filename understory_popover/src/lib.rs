// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_popover --heading-base-level=0

//! Understory Popover: interaction logic for a floating panel anchored to a trigger.
//!
//! ## Overview
//!
//! A popover opens and closes by click, keyboard, or hover. Hover makes this
//! harder than a toggle: the pointer has to be able to travel from the
//! trigger to the content without the popover closing under it, a click on a
//! hover-opened popover should keep it open rather than close it, and closing
//! by click while still hovering must not immediately reopen it.
//!
//! This crate implements that behavior without any rendering, layout, or
//! event-system dependency:
//!
//! - [`state::PopoverState`]: the root state machine and the only mutation surface.
//! - [`trigger::Trigger`]: trigger pointer, click, and key handling with hover open delay and cooldown.
//! - [`content::Content`]: interaction tracking and dismissal for the floating content.
//! - [`grace::GraceArea`]: the safe polygon between trigger and content.
//! - [`timer`]: the open/close timer slots and the [`Scheduler`](timer::Scheduler) seam.
//!
//! Raw events are reduced to plain parameters at the boundary: a
//! [`PointerKind`](types::PointerKind), a button index, a
//! [`Key`](types::Key), whether a focus target is focusable, and the current
//! trigger/content rectangles from your layout engine.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_popover::popover::{Popover, PopoverConfig};
//! use understory_popover::timer::ManualScheduler;
//! use understory_popover::trigger::TriggerConfig;
//! use understory_popover::types::PointerKind;
//!
//! let config = PopoverConfig {
//!     trigger: TriggerConfig { open_on_hover: true, open_delay: 0, ..TriggerConfig::default() },
//!     close_delay: 300,
//!     ..PopoverConfig::default()
//! };
//! let mut p = Popover::new(ManualScheduler::new(), config);
//! let trigger = Rect::new(0.0, 0.0, 100.0, 40.0);
//! let content = Rect::new(0.0, 60.0, 200.0, 260.0);
//!
//! // Hovering the trigger opens the popover.
//! p.trigger.on_pointer_enter(&mut p.state, PointerKind::Mouse);
//! assert!(p.is_open());
//! p.pointer_move(PointerKind::Mouse, Point::new(50.0, 20.0), trigger, content);
//!
//! // Leaving the trigger toward the content keeps it open...
//! p.trigger.on_pointer_leave(&mut p.state, PointerKind::Mouse);
//! p.pointer_move(PointerKind::Mouse, Point::new(50.0, 50.0), trigger, content);
//! p.state.advance(1_000);
//! assert!(p.is_open());
//!
//! // ...while leaving the grace area closes it after the close delay.
//! p.pointer_move(PointerKind::Mouse, Point::new(500.0, 10.0), trigger, content);
//! p.state.advance(300);
//! assert!(!p.is_open());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo.
//! - `libm`: `no_std` float math for Kurbo.
//! - `tracing`: emit `tracing` records for open changes, grace-area exits, and timer traffic.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::$level!($($arg)+);
        }
    };
}

pub mod attrs;
pub mod content;
pub mod grace;
pub mod popover;
pub mod state;
pub mod timer;
pub mod trigger;
pub mod types;

pub use popover::{Popover, PopoverConfig};
pub use state::{Phase, PopoverState};
