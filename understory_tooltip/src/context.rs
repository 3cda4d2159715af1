// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared state for one class of tooltips.
//!
//! A [`TooltipContext`] is created by the host for each independent UI root and handed to
//! every [`Tooltip`](crate::tooltip::Tooltip) of that root. It owns:
//!
//! - the [`Hysteresis`] window,
//! - the identifier allocator (`tooltip-1`, `tooltip-2`, ...),
//! - the portal container, created lazily on first open and reused afterwards.
//!
//! Cloning shares the context. Two contexts created separately never share anything.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, RefCell};

use crate::hysteresis::Hysteresis;

#[derive(Debug)]
struct Shared<C> {
    hysteresis: Hysteresis,
    next_id: Cell<u64>,
    container: RefCell<Option<C>>,
}

/// Scoped service shared by the tooltips of one UI root.
#[derive(Debug)]
pub struct TooltipContext<C> {
    shared: Rc<Shared<C>>,
}

impl<C> Clone for TooltipContext<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<C> Default for TooltipContext<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TooltipContext<C> {
    /// Create a context with a default hysteresis window.
    pub fn new() -> Self {
        Self::with_hysteresis(Hysteresis::new())
    }

    /// Create a context around an existing hysteresis window.
    pub fn with_hysteresis(hysteresis: Hysteresis) -> Self {
        Self {
            shared: Rc::new(Shared {
                hysteresis,
                next_id: Cell::new(1),
                container: RefCell::new(None),
            }),
        }
    }

    /// The shared hysteresis window.
    pub fn hysteresis(&self) -> Hysteresis {
        self.shared.hysteresis.clone()
    }

    /// Allocate an overlay identifier unique within this context.
    pub fn allocate_id(&self) -> String {
        let n = self.shared.next_id.get();
        self.shared.next_id.set(n.wrapping_add(1));
        format!("tooltip-{n}")
    }

    /// Forget the container and reset the hysteresis window.
    ///
    /// The container itself belongs to the host; release it there if needed.
    pub fn teardown(&self) -> Option<C> {
        self.shared.hysteresis.reset();
        self.shared.container.borrow_mut().take()
    }

    /// True if both handles share one context.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<C: Clone> TooltipContext<C> {
    /// The portal container, if one has been created.
    pub fn container(&self) -> Option<C> {
        self.shared.container.borrow().clone()
    }

    /// The portal container, creating it with `create` on first use.
    pub fn container_or_create(&self, create: impl FnOnce() -> C) -> C {
        let mut slot = self.shared.container.borrow_mut();
        slot.get_or_insert_with(create).clone()
    }
}
