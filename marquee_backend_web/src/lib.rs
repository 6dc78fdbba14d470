// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for Marquee.
//!
//! This crate connects a [`CarouselController`](marquee_core::controller::CarouselController)
//! to the browser:
//!
//! - [`TimeoutHost`]: `setTimeout`-backed [`TimerHost`](marquee_core::timer::TimerHost)
//! - [`DomRenderer`]: applies [`CarouselChanges`](marquee_core::state::CarouselChanges)
//!   to slide, dot, and control elements
//! - [`mount_hero`]: discovers slides in the document, wires listeners, and
//!   starts rotation
//! - [`start_counters`]: count-up animation for statistic readouts
//! - [`ConsoleSink`]: trace events on the browser console

#![no_std]

extern crate alloc;

mod console;
mod dom;
mod mount;
mod stats;
mod timeout;

pub use console::ConsoleSink;
pub use dom::{DomRenderer, DomSelectors};
pub use marquee_core::backend::Renderer;
pub use mount::{HeroCarousel, Mounted, mount_hero, mount_hero_with};
pub use stats::start_counters;
pub use timeout::TimeoutHost;

use marquee_core::time::HostTime;

/// Returns the current host time from `performance.now()`, in whole
/// milliseconds.
#[must_use]
pub fn now() -> HostTime {
    let ms = timeout::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns a small positive f64"
    )]
    let ms = ms as u64;
    HostTime(ms)
}
