// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events and gesture recognition.
//!
//! Backends translate platform events into [`CarouselInput`] values and hand
//! them to [`CarouselController::handle`](crate::controller::CarouselController::handle).
//! Two small recognizers live here because they are pure geometry:
//!
//! - [`SwipeTracker`] turns a touch start/end pair into a [`Swipe`] when the
//!   horizontal travel reaches a threshold.
//! - [`fully_visible`] decides whether a region's bounding box lies entirely
//!   inside the viewport, which gates keyboard shortcuts.

use kurbo::{Rect, Size};

use crate::timer::TimerToken;

/// A keyboard key the carousel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow: previous slide.
    ArrowLeft,
    /// Right arrow: next slide.
    ArrowRight,
    /// Space bar: toggle play/pause.
    Space,
    /// Anything else.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    ///
    /// Both the standard `" "` and the legacy `"Spacebar"` map to
    /// [`Key::Space`].
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            " " | "Spacebar" => Self::Space,
            _ => Self::Other,
        }
    }
}

/// An event delivered to the carousel controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CarouselInput {
    /// A timer armed with this token fired.
    TimerElapsed(TimerToken),
    /// The previous control was activated.
    Previous,
    /// The next control was activated.
    Next,
    /// A skip control was activated.
    Skip,
    /// A position indicator (dot) was activated.
    Dot(u32),
    /// The play/pause control was activated.
    TogglePlay,
    /// The pointer entered the carousel region.
    PointerEnter,
    /// The pointer left the carousel region.
    PointerLeave,
    /// A touch began at horizontal screen coordinate `x`.
    TouchStart {
        /// Horizontal screen coordinate in CSS pixels.
        x: f64,
    },
    /// A touch ended at horizontal screen coordinate `x`.
    TouchEnd {
        /// Horizontal screen coordinate in CSS pixels.
        x: f64,
    },
    /// A key was pressed anywhere in the document.
    KeyDown {
        /// The key.
        key: Key,
        /// The carousel region's bounding box in viewport coordinates.
        region: Rect,
        /// The viewport size.
        viewport: Size,
    },
    /// The document became hidden (`true`) or visible (`false`).
    VisibilityChanged {
        /// Whether the document is now hidden.
        hidden: bool,
    },
}

/// Whether an input changed anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The carousel acted on the input. Backends suppress the platform's
    /// default action for handled key presses and skip links.
    Handled,
    /// The input did not apply (stale timer, gated key, static carousel).
    Ignored,
}

impl Outcome {
    /// Whether the input was handled.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Direction of a recognized swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Swipe {
    /// Finger moved right to left: show the next slide.
    Left,
    /// Finger moved left to right: show the previous slide.
    Right,
}

/// Recognizes horizontal swipes from touch start/end coordinates.
#[derive(Clone, Copy, Debug)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    /// Creates a tracker; travel of at least `threshold` pixels is a swipe.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    /// Records the start of a touch.
    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finishes a touch and classifies it.
    ///
    /// Returns `None` for short travel or when no touch was started.
    pub fn end(&mut self, x: f64) -> Option<Swipe> {
        let start = self.start_x.take()?;
        let distance = start - x;
        if distance >= self.threshold {
            Some(Swipe::Left)
        } else if -distance >= self.threshold {
            Some(Swipe::Right)
        } else {
            None
        }
    }
}

/// Whether `region` lies entirely inside a viewport of the given size whose
/// origin is at `(0, 0)`.
#[must_use]
pub fn fully_visible(region: Rect, viewport: Size) -> bool {
    region.x0 >= 0.0
        && region.y0 >= 0.0
        && region.x1 <= viewport.width
        && region.y1 <= viewport.height
}
