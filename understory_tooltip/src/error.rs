// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Programmer errors reported at setup time.
//!
//! Runtime failures (an anchor that cannot be measured, a timer that fires after teardown)
//! are not errors: the engine treats them as "stay hidden" and carries on.

/// Setup errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TooltipError {
    /// The tooltip was given no anchor node.
    #[error("tooltip requires exactly one anchor node, got none")]
    NoAnchor,
    /// The tooltip was given more than one anchor node.
    #[error("tooltip requires exactly one anchor node, got {count}")]
    MultipleAnchors {
        /// How many nodes were supplied.
        count: usize,
    },
    /// The tooltip behind a weak handle has already been dropped.
    #[error("tooltip was released before the handle was used")]
    AnchorReleased,
}

/// Return the single item of `nodes`, or an error describing how many there were.
///
/// ```
/// use understory_tooltip::error::{TooltipError, single_anchor};
///
/// assert_eq!(single_anchor([7]), Ok(7));
/// assert_eq!(single_anchor::<u32, _>([]), Err(TooltipError::NoAnchor));
/// assert_eq!(
///     single_anchor([1, 2, 3]),
///     Err(TooltipError::MultipleAnchors { count: 3 })
/// );
/// ```
pub fn single_anchor<N, I>(nodes: I) -> Result<N, TooltipError>
where
    I: IntoIterator<Item = N>,
{
    let mut iter = nodes.into_iter();
    let first = iter.next().ok_or(TooltipError::NoAnchor)?;
    let extra = iter.count();
    if extra == 0 {
        Ok(first)
    } else {
        Err(TooltipError::MultipleAnchors { count: extra + 1 })
    }
}
