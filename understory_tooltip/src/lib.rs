// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tooltip --heading-base-level=0

//! Understory Tooltip: a deterministic tooltip engine for any UI host.
//!
//! This crate owns the parts of a tooltip that are the same everywhere: when it opens and
//! closes, where it goes, and how it plugs into an anchor without clobbering the anchor's own
//! listeners. Hosts supply a small [`Platform`](platform::Platform) adapter for measuring,
//! portals, and listeners.
//!
//! ## Pieces
//!
//! - [`scheduler`]: the open/close state machine. Hover, keyboard focus, touch long-press,
//!   Escape, surface hover, controlled mode, disabled, and empty content. Delays are
//!   cancellable deadlines in [`timer`].
//! - [`hysteresis`]: after one tooltip closes, the next opens without its enter delay for a
//!   short window. Scoped to a [`context::TooltipContext`], never global.
//! - [`binder`]: handler composition ([`binder::compose`]), per-kind handler sets, and the
//!   merged anchor reference.
//! - [`overlay`]: portal child lifecycle with off-screen measurement before placement.
//! - [`tooltip`]: the facade tying it together.
//! - [`adapters::headless`]: in-memory platform (feature `headless`).
//!
//! Geometry comes from [`understory_placement`].
//!
//! ## Time
//!
//! The engine never reads a clock. Every input carries a [`Millis`](types::Millis)
//! timestamp and delayed work is stored as deadlines. Hosts call `advance(now)` once
//! `next_deadline()` has passed, or map each pending entry onto a native timer and call
//! `fire(handle, now)`. A handle that was cancelled or outlived an unmount is ignored.
//!
//! ## Example
//!
//! ```rust
//! use understory_tooltip::config::TooltipConfig;
//! use understory_tooltip::context::TooltipContext;
//! use understory_tooltip::tooltip::Tooltip;
//! use understory_tooltip::types::InteractionState;
//! # use understory_tooltip::adapters::headless::HeadlessPlatform;
//!
//! let ctx = TooltipContext::new();
//! let tip: Tooltip<HeadlessPlatform> =
//!     Tooltip::new(TooltipConfig::default().enter_delay(300), &ctx);
//!
//! tip.on_hover_enter(0);
//! assert_eq!(tip.state(), InteractionState::OpenScheduled);
//! assert!(tip.advance(300).is_some());
//! assert!(tip.is_open());
//!
//! tip.on_escape(400);
//! assert!(!tip.is_open());
//! // Within the hysteresis window the next hover opens at once.
//! assert!(tip.on_hover_enter(500).is_some());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to kurbo.
//! - `libm`: `no_std` float math for kurbo.
//! - `headless` (default): the in-memory platform adapter.
//! - `tracing`: debug and trace events for timers and transitions.
//! - `serde`: serialize [`config::TooltipConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod binder;
pub mod config;
pub mod context;
pub mod error;
pub mod hysteresis;
pub mod overlay;
pub mod platform;
pub mod scheduler;
pub mod timer;
pub mod tooltip;
pub mod types;

pub use config::TooltipConfig;
pub use context::TooltipContext;
pub use error::TooltipError;
pub use tooltip::Tooltip;
