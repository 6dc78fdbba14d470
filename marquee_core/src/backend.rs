// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Marquee splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Timer host**: Implements [`TimerHost`](crate::timer::TimerHost) on top
//!   of the platform's one-shot timers (e.g. `setTimeout`), delivering
//!   [`CarouselInput::TimerElapsed`](crate::input::CarouselInput::TimerElapsed)
//!   back to the controller when a timer fires.
//!
//! - **Renderer**: Implements the [`Renderer`] trait to apply carousel
//!   changes to a platform-native tree (e.g. DOM elements).
//!
//! - **Event wiring**: Translates platform events (clicks, key presses,
//!   touches, visibility) into [`CarouselInput`](crate::input::CarouselInput)
//!   values. This is backend-specific and not abstracted by a trait.
//!
//! # Crate boundaries
//!
//! `marquee_core` owns the data model, the state machine, timer ownership,
//! and this contract module. Backend crates depend on `marquee_core` and
//! provide platform glue. Application code depends on both and wires them
//! together at mount.

use alloc::format;
use alloc::string::String;

use crate::deck::{Slide, SlideDeck};
use crate::state::CarouselChanges;
use crate::time::Duration;

/// Read-only snapshot of the controller handed to [`Renderer::apply`].
#[derive(Clone, Copy, Debug)]
pub struct CarouselView<'a> {
    /// The slides.
    pub deck: &'a SlideDeck,
    /// Index of the active slide.
    pub current: u32,
    /// Whether auto-advance is enabled.
    pub playing: bool,
    /// Whether a countdown is live (playing and not suspended by hover,
    /// touch, or a hidden document).
    pub countdown_running: bool,
    /// The auto-advance interval.
    pub interval: Duration,
}

impl CarouselView<'_> {
    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.deck.len()
    }

    /// Whether there are no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Whether navigation controls should be shown.
    #[must_use]
    pub fn navigation_visible(&self) -> bool {
        self.deck.is_rotating()
    }

    /// The active slide.
    #[must_use]
    pub fn active(&self) -> Option<&Slide> {
        self.deck.get(self.current)
    }

    /// 1-based position readout, e.g. `2/5`.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.current + 1, self.len())
    }

    /// Accessible label of the position indicator for slide `index`.
    #[must_use]
    pub fn dot_label(&self, index: u32) -> String {
        format!("View advertisement {} of {}", index + 1, self.len())
    }
}

/// Applies evaluated carousel changes to a platform-native presentation tree.
///
/// DOM renderers and recording test doubles implement this trait.
///
/// # Input handling pseudocode
///
/// Every input the controller accepts goes through the same steps:
///
/// ```rust,ignore
/// fn on_input(input: CarouselInput) {
///     // Translate: mutate the state machine and the countdown
///     state.next();
///     countdown.arm();
///
///     // Evaluate: drain dirty channels
///     let changes = state.evaluate();
///
///     // Render: apply incremental changes to the native tree
///     renderer.apply(&view, &changes);
/// }
/// ```
pub trait Renderer {
    /// Applies the given [`CarouselChanges`], reading current values from
    /// `view` as needed.
    fn apply(&mut self, view: &CarouselView<'_>, changes: &CarouselChanges);
}
