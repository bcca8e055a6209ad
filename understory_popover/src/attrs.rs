// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! String state for accessibility and styling hooks.
//!
//! These are pure functions of the popover flags, computed on read.

/// Value of a `data-state` attribute.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DataState {
    /// `"open"`.
    Open,
    /// `"closed"`.
    Closed,
}

impl DataState {
    /// Map the open flag.
    pub const fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    /// The attribute string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// `aria-haspopup` value of a popover trigger.
pub const ARIA_HASPOPUP: &str = "dialog";

/// `aria-expanded` value for the open flag.
pub const fn aria_expanded(open: bool) -> &'static str {
    bool_to_str(open)
}

/// `"true"` or `"false"`.
pub const fn bool_to_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
