// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the carousel controller.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`CarouselController`](crate::controller::CarouselController) calls as it
//! handles inputs. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::input::{CarouselInput, Key, Outcome};
use crate::time::HostTime;
use crate::timer::TimerToken;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What triggered a slide transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cause {
    /// The auto-advance countdown elapsed.
    Auto,
    /// The previous control or left arrow.
    Previous,
    /// The next control or right arrow.
    Next,
    /// A skip control.
    Skip,
    /// A position indicator.
    Dot,
    /// A horizontal swipe.
    Swipe,
    /// A programmatic call (`advance`, `retreat`, `jump_to`).
    Api,
}

/// What happened to the auto-advance timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerEventKind {
    /// A timer was armed.
    Armed,
    /// The live timer was cancelled.
    Cancelled,
    /// The live timer fired and was accepted.
    Elapsed,
    /// A timer fired that was no longer live; it was ignored.
    Stale,
}

/// Payload-free classification of a [`CarouselInput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// [`CarouselInput::TimerElapsed`].
    TimerElapsed,
    /// [`CarouselInput::Previous`].
    Previous,
    /// [`CarouselInput::Next`].
    Next,
    /// [`CarouselInput::Skip`].
    Skip,
    /// [`CarouselInput::Dot`].
    Dot,
    /// [`CarouselInput::TogglePlay`].
    TogglePlay,
    /// [`CarouselInput::PointerEnter`].
    PointerEnter,
    /// [`CarouselInput::PointerLeave`].
    PointerLeave,
    /// [`CarouselInput::TouchStart`].
    TouchStart,
    /// [`CarouselInput::TouchEnd`].
    TouchEnd,
    /// [`CarouselInput::KeyDown`].
    KeyDown(Key),
    /// [`CarouselInput::VisibilityChanged`].
    VisibilityChanged,
}

impl From<&CarouselInput> for InputKind {
    fn from(input: &CarouselInput) -> Self {
        match input {
            CarouselInput::TimerElapsed(_) => Self::TimerElapsed,
            CarouselInput::Previous => Self::Previous,
            CarouselInput::Next => Self::Next,
            CarouselInput::Skip => Self::Skip,
            CarouselInput::Dot(_) => Self::Dot,
            CarouselInput::TogglePlay => Self::TogglePlay,
            CarouselInput::PointerEnter => Self::PointerEnter,
            CarouselInput::PointerLeave => Self::PointerLeave,
            CarouselInput::TouchStart { .. } => Self::TouchStart,
            CarouselInput::TouchEnd { .. } => Self::TouchEnd,
            CarouselInput::KeyDown { key, .. } => Self::KeyDown(*key),
            CarouselInput::VisibilityChanged { .. } => Self::VisibilityChanged,
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the active slide changes (or is re-selected).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    /// Host time of the transition.
    pub at: HostTime,
    /// Previously active slide.
    pub from: u32,
    /// Newly active slide.
    pub to: u32,
    /// What triggered it.
    pub cause: Cause,
}

/// Emitted on every timer arm, cancel, and fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerEvent {
    /// Host time of the event.
    pub at: HostTime,
    /// Token of the affected timer.
    pub token: TimerToken,
    /// What happened.
    pub kind: TimerEventKind,
    /// When the timer is due (only for [`TimerEventKind::Armed`]).
    pub deadline: Option<HostTime>,
}

/// Emitted after each input is handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// Host time the input was handled.
    pub at: HostTime,
    /// The input.
    pub input: InputKind,
    /// Whether it was acted on.
    pub outcome: Outcome,
}

/// Emitted when the playing flag or countdown running state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackEvent {
    /// Host time of the change.
    pub at: HostTime,
    /// Whether auto-advance is enabled.
    pub playing: bool,
    /// Whether a countdown is live.
    pub countdown_running: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the active slide changes.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called on timer arm, cancel, and fire.
    fn on_timer(&mut self, e: &TimerEvent) {
        _ = e;
    }

    /// Called after an input is handled.
    fn on_input(&mut self, e: &InputEvent) {
        _ = e;
    }

    /// Called when playback state changes.
    fn on_playback(&mut self, e: &PlaybackEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimerEvent`].
    #[inline]
    pub fn timer(&mut self, e: &TimerEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timer(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`InputEvent`].
    #[inline]
    pub fn input(&mut self, e: &InputEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_input(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PlaybackEvent`].
    #[inline]
    pub fn playback(&mut self, e: &PlaybackEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_playback(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_kind_drops_payloads() {
        assert_eq!(
            InputKind::from(&CarouselInput::TimerElapsed(TimerToken(9))),
            InputKind::TimerElapsed
        );
        assert_eq!(InputKind::from(&CarouselInput::Dot(4)), InputKind::Dot);
        assert_eq!(
            InputKind::from(&CarouselInput::TouchEnd { x: 3.0 }),
            InputKind::TouchEnd
        );
    }

    #[test]
    fn tracer_none_accepts_events() {
        let mut t = Tracer::none();
        t.transition(&TransitionEvent {
            at: HostTime(0),
            from: 0,
            to: 1,
            cause: Cause::Auto,
        });
        t.playback(&PlaybackEvent {
            at: HostTime(0),
            playing: true,
            countdown_running: true,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        #[derive(Default)]
        struct Count {
            transitions: u32,
            timers: u32,
        }
        impl TraceSink for Count {
            fn on_transition(&mut self, _: &TransitionEvent) {
                self.transitions += 1;
            }
            fn on_timer(&mut self, _: &TimerEvent) {
                self.timers += 1;
            }
        }

        let mut sink = Count::default();
        {
            let mut t = Tracer::new(&mut sink);
            t.transition(&TransitionEvent {
                at: HostTime(5),
                from: 1,
                to: 2,
                cause: Cause::Next,
            });
            t.timer(&TimerEvent {
                at: HostTime(5),
                token: TimerToken(1),
                kind: TimerEventKind::Armed,
                deadline: Some(HostTime(6005)),
            });
            t.input(&InputEvent {
                at: HostTime(5),
                input: InputKind::Next,
                outcome: Outcome::Handled,
            });
        }
        assert_eq!(sink.transitions, 1);
        assert_eq!(sink.timers, 1);
    }
}
