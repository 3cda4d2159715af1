// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance configuration.
//!
//! Everything is optional; [`TooltipConfig::default`] is a bottom-placed tooltip with no
//! arrow, immediate hover/focus open and close, a 700ms long press to open on touch, and a
//! 1500ms auto-close after the touch is released.
//!
//! ```
//! use understory_tooltip::config::{TooltipConfig, TriggerSources};
//! use understory_placement::Placement;
//!
//! let cfg = TooltipConfig::default()
//!     .placement(Placement::TopStart)
//!     .arrow(true)
//!     .enter_delay(300)
//!     .disable_touch_listener(true);
//! assert_eq!(cfg.triggers, TriggerSources::HOVER | TriggerSources::FOCUS);
//! assert_eq!(cfg.delays.enter, 300);
//! ```

use alloc::string::String;

use understory_placement::{DEFAULT_GAP, Placement, PlacementOptions};

use crate::types::Millis;

bitflags::bitflags! {
    /// Anchor input modalities the tooltip listens to.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TriggerSources: u8 {
        /// Pointer enter/leave on the anchor.
        const HOVER = 1 << 0;
        /// Keyboard focus/blur on the anchor.
        const FOCUS = 1 << 1;
        /// Touch press-in/press-out on the anchor.
        const TOUCH = 1 << 2;
    }
}

impl Default for TriggerSources {
    fn default() -> Self {
        Self::all()
    }
}

/// Default long-press duration before a touch opens the tooltip.
pub const DEFAULT_ENTER_TOUCH_DELAY: Millis = 700;

/// Default time a touch-opened tooltip stays visible after the touch ends.
pub const DEFAULT_LEAVE_TOUCH_DELAY: Millis = 1500;

/// Open and close delays in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct Delays {
    /// Hover/focus open delay.
    pub enter: Millis,
    /// Hover/focus/surface close delay. Also extends the hysteresis window.
    pub leave: Millis,
    /// Touch long-press duration.
    pub enter_touch: Millis,
    /// Auto-close delay after a touch ends.
    pub leave_touch: Millis,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            enter: 0,
            leave: 0,
            enter_touch: DEFAULT_ENTER_TOUCH_DELAY,
            leave_touch: DEFAULT_LEAVE_TOUCH_DELAY,
        }
    }
}

/// Accessibility role of the overlay surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OverlayRole {
    /// Supplementary description of the anchor.
    #[default]
    Tooltip,
    /// Content that should be announced when shown.
    Alert,
}

impl OverlayRole {
    /// ARIA-style role name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tooltip => "tooltip",
            Self::Alert => "alert",
        }
    }
}

/// Configuration of one tooltip instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct TooltipConfig {
    /// Preferred placement relative to the anchor.
    pub placement: Placement,
    /// Draw an arrow; pushes the overlay out by the arrow size.
    pub arrow: bool,
    /// Anchor-to-overlay distance.
    pub gap: f64,
    /// Open and close delays.
    pub delays: Delays,
    /// Enabled anchor listeners.
    pub triggers: TriggerSources,
    /// When true, moving the pointer onto the overlay does not keep it open.
    pub disable_interactive: bool,
    /// Position at the cursor instead of against the anchor.
    pub follow_cursor: bool,
    /// Controlled open state. `None` is uncontrolled.
    pub open: Option<bool>,
    /// Initial uncontrolled open state.
    pub default_open: bool,
    /// Suppress all scheduling.
    pub disabled: bool,
    /// Overlay identifier. When `None` one is allocated from the context.
    pub id: Option<String>,
    /// Accessibility role of the overlay.
    pub role: OverlayRole,
    /// Accessible label forwarded to the anchor while open.
    pub label: Option<String>,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            arrow: false,
            gap: DEFAULT_GAP,
            delays: Delays::default(),
            triggers: TriggerSources::default(),
            disable_interactive: false,
            follow_cursor: false,
            open: None,
            default_open: false,
            disabled: false,
            id: None,
            role: OverlayRole::default(),
            label: None,
        }
    }
}

impl TooltipConfig {
    /// Set the preferred placement.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Enable or disable the arrow.
    #[must_use]
    pub fn arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    /// Set the anchor-to-overlay gap.
    #[must_use]
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the hover/focus open delay.
    #[must_use]
    pub fn enter_delay(mut self, ms: Millis) -> Self {
        self.delays.enter = ms;
        self
    }

    /// Set the hover/focus close delay.
    #[must_use]
    pub fn leave_delay(mut self, ms: Millis) -> Self {
        self.delays.leave = ms;
        self
    }

    /// Set the touch long-press duration.
    #[must_use]
    pub fn enter_touch_delay(mut self, ms: Millis) -> Self {
        self.delays.enter_touch = ms;
        self
    }

    /// Set the auto-close delay after a touch ends.
    #[must_use]
    pub fn leave_touch_delay(mut self, ms: Millis) -> Self {
        self.delays.leave_touch = ms;
        self
    }

    /// Stop listening to hover on the anchor.
    #[must_use]
    pub fn disable_hover_listener(mut self, disable: bool) -> Self {
        self.triggers.set(TriggerSources::HOVER, !disable);
        self
    }

    /// Stop listening to focus on the anchor.
    #[must_use]
    pub fn disable_focus_listener(mut self, disable: bool) -> Self {
        self.triggers.set(TriggerSources::FOCUS, !disable);
        self
    }

    /// Stop listening to touch on the anchor.
    #[must_use]
    pub fn disable_touch_listener(mut self, disable: bool) -> Self {
        self.triggers.set(TriggerSources::TOUCH, !disable);
        self
    }

    /// Close as soon as the pointer leaves the anchor, even onto the overlay.
    #[must_use]
    pub fn disable_interactive(mut self, disable: bool) -> Self {
        self.disable_interactive = disable;
        self
    }

    /// Follow the cursor instead of the anchor.
    #[must_use]
    pub fn follow_cursor(mut self, follow: bool) -> Self {
        self.follow_cursor = follow;
        self
    }

    /// Make the open state controlled by the owner.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Initial uncontrolled open state.
    #[must_use]
    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Suppress all scheduling.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Use a fixed overlay identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the accessibility role.
    #[must_use]
    pub fn role(mut self, role: OverlayRole) -> Self {
        self.role = role;
        self
    }

    /// Set the accessible label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// True when the overlay keeps itself open while the pointer is over it.
    pub fn is_interactive(&self) -> bool {
        !self.disable_interactive
    }

    /// Geometry options for the placement calculator.
    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions::default().gap(self.gap).arrow(self.arrow)
    }
}
