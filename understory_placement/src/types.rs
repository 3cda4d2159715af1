// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement vocabulary: sides, cross-axis alignment, and the 12 placements.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Side of the anchor the overlay is placed on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
    /// To the right of the anchor.
    Right,
}

impl Side {
    /// The side facing this one across the anchor.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// True for [`Side::Top`] and [`Side::Bottom`], whose primary axis is vertical.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Cross-axis alignment of the overlay against the anchor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Align {
    /// Centered on the anchor's cross axis.
    #[default]
    Center,
    /// Aligned to the anchor's start edge (left for vertical sides, top for horizontal sides).
    Start,
    /// Aligned to the anchor's end edge (right for vertical sides, bottom for horizontal sides).
    End,
}

/// One of the 12 directional placements: `{top, bottom, left, right} × {center, start, end}`.
///
/// The default is [`Placement::Bottom`]. String forms are the kebab-case names
/// (`"top"`, `"top-start"`, `"right-end"`, ...).
///
/// ```
/// use understory_placement::{Align, Placement, Side};
///
/// let p: Placement = "left-end".parse().unwrap();
/// assert_eq!(p.side(), Side::Left);
/// assert_eq!(p.align(), Align::End);
/// assert_eq!(Placement::parse_or_default("sideways"), Placement::Bottom);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Placement {
    /// Above, centered.
    Top,
    /// Above, aligned to the anchor's left edge.
    TopStart,
    /// Above, aligned to the anchor's right edge.
    TopEnd,
    /// Below, centered.
    #[default]
    Bottom,
    /// Below, aligned to the anchor's left edge.
    BottomStart,
    /// Below, aligned to the anchor's right edge.
    BottomEnd,
    /// Left, centered.
    Left,
    /// Left, aligned to the anchor's top edge.
    LeftStart,
    /// Left, aligned to the anchor's bottom edge.
    LeftEnd,
    /// Right, centered.
    Right,
    /// Right, aligned to the anchor's top edge.
    RightStart,
    /// Right, aligned to the anchor's bottom edge.
    RightEnd,
}

impl Placement {
    /// All placements, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
    ];

    /// Build a placement from its side and alignment.
    pub const fn new(side: Side, align: Align) -> Self {
        match (side, align) {
            (Side::Top, Align::Center) => Self::Top,
            (Side::Top, Align::Start) => Self::TopStart,
            (Side::Top, Align::End) => Self::TopEnd,
            (Side::Bottom, Align::Center) => Self::Bottom,
            (Side::Bottom, Align::Start) => Self::BottomStart,
            (Side::Bottom, Align::End) => Self::BottomEnd,
            (Side::Left, Align::Center) => Self::Left,
            (Side::Left, Align::Start) => Self::LeftStart,
            (Side::Left, Align::End) => Self::LeftEnd,
            (Side::Right, Align::Center) => Self::Right,
            (Side::Right, Align::Start) => Self::RightStart,
            (Side::Right, Align::End) => Self::RightEnd,
        }
    }

    /// Side of the anchor this placement puts the overlay on.
    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Side::Left,
            Self::Right | Self::RightStart | Self::RightEnd => Side::Right,
        }
    }

    /// Cross-axis alignment of this placement.
    pub const fn align(self) -> Align {
        match self {
            Self::Top | Self::Bottom | Self::Left | Self::Right => Align::Center,
            Self::TopStart | Self::BottomStart | Self::LeftStart | Self::RightStart => Align::Start,
            Self::TopEnd | Self::BottomEnd | Self::LeftEnd | Self::RightEnd => Align::End,
        }
    }

    /// Same alignment on the opposite side.
    ///
    /// The placement calculator never flips on its own; this is for callers that
    /// implement their own fallback policy.
    pub const fn opposite(self) -> Self {
        Self::new(self.side().opposite(), self.align())
    }

    /// The kebab-case name of this placement.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
        }
    }

    /// Parse a placement name, falling back to the default ([`Placement::Bottom`])
    /// for anything unrecognized.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown placement name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unrecognized placement `{name}`")]
pub struct ParsePlacementError {
    name: String,
}

impl ParsePlacementError {
    /// The rejected input.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePlacementError { name: s.into() })
    }
}
