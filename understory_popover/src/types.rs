// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain input descriptions passed to the controllers.
//!
//! Raw toolkit events are reduced to these at the boundary so the popover
//! logic stays event-agnostic.

/// Mouse button index, DOM numbering (`0` is the primary button).
pub type Button = u8;

/// The primary (usually left) button.
pub const PRIMARY_BUTTON: Button = 0;

/// The device that produced a pointer event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// A mouse or trackpad.
    #[default]
    Mouse,
    /// A stylus.
    Pen,
    /// A touch contact. Touch has no hover, so hover logic skips it.
    Touch,
}

impl PointerKind {
    /// Whether this device has a meaningful hover state.
    pub const fn can_hover(self) -> bool {
        !matches!(self, Self::Touch)
    }
}

/// The keys a popover reacts to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Escape.
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Enter and Space activate buttons.
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}
