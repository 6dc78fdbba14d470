// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel controller.
//!
//! [`CarouselController`] owns the slide deck, the state machine, the
//! auto-advance [`Countdown`], and a [`Renderer`]. Every entry point
//! (mount, [`handle`](CarouselController::handle), and the programmatic
//! surface) runs to completion synchronously:
//!
//! 1. translate the request into state-machine transitions and timer
//!    operations,
//! 2. evaluate the state machine,
//! 3. apply the resulting changes through the renderer.
//!
//! # Timer policy
//!
//! - Auto-advance runs only for decks with more than one slide.
//! - Arming always cancels the live timer first.
//! - Manual navigation restarts the countdown from the full interval while
//!   playing, and leaves it stopped while paused.
//! - Hover, touch, and a hidden document suspend the countdown without
//!   clearing the playing flag; leaving resumes it from the full interval.
//! - A fired timer whose token is no longer live is ignored.

use crate::backend::{CarouselView, Renderer};
use crate::config::CarouselConfig;
use crate::deck::SlideDeck;
use crate::input::{CarouselInput, Key, Outcome, Swipe, SwipeTracker, fully_visible};
use crate::state::{CarouselChanges, CarouselState, Transition};
use crate::timer::{Countdown, TimerHost, TimerToken};
use crate::trace::{
    Cause, InputEvent, InputKind, PlaybackEvent, TimerEvent, TimerEventKind, Tracer,
    TransitionEvent,
};

/// A mounted carousel.
pub struct CarouselController<T: TimerHost, R: Renderer> {
    deck: SlideDeck,
    state: CarouselState,
    countdown: Countdown<T>,
    renderer: R,
    config: CarouselConfig,
    swipe: SwipeTracker,
    changes: CarouselChanges,
}

impl<T: TimerHost, R: Renderer> core::fmt::Debug for CarouselController<T, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselController")
            .field("slides", &self.deck.len())
            .field("state", &self.state)
            .field("countdown", &self.countdown)
            .finish_non_exhaustive()
    }
}

impl<T: TimerHost, R: Renderer> CarouselController<T, R> {
    /// Mounts a carousel: renders the initial state and, for decks with more
    /// than one slide, starts auto-advance.
    #[must_use]
    pub fn mount(deck: SlideDeck, host: T, renderer: R, config: CarouselConfig) -> Self {
        Self::mount_traced(deck, host, renderer, config, &mut Tracer::none())
    }

    /// Like [`mount`](Self::mount), reporting to `tracer`.
    #[must_use]
    pub fn mount_traced(
        deck: SlideDeck,
        host: T,
        renderer: R,
        config: CarouselConfig,
        tracer: &mut Tracer<'_>,
    ) -> Self {
        let state = CarouselState::new(deck.len());
        let mut this = Self {
            deck,
            state,
            countdown: Countdown::new(host, config.interval),
            renderer,
            swipe: SwipeTracker::new(config.swipe_threshold),
            config,
            changes: CarouselChanges::default(),
        };
        if this.deck.is_rotating() {
            this.set_playing(true, tracer);
            this.arm(tracer);
        }
        this.flush();
        this
    }

    /// Handles one input.
    pub fn handle(&mut self, input: CarouselInput) -> Outcome {
        self.handle_traced(input, &mut Tracer::none())
    }

    /// Like [`handle`](Self::handle), reporting to `tracer`.
    pub fn handle_traced(&mut self, input: CarouselInput, tracer: &mut Tracer<'_>) -> Outcome {
        let outcome = if let CarouselInput::TimerElapsed(token) = input {
            self.on_timer(token, tracer)
        } else if self.deck.is_rotating() {
            self.on_input(input, tracer)
        } else {
            Outcome::Ignored
        };
        self.flush();
        tracer.input(&InputEvent {
            at: self.countdown.now(),
            input: InputKind::from(&input),
            outcome,
        });
        outcome
    }

    /// Shows the next slide and restarts the countdown.
    pub fn advance(&mut self) -> Outcome {
        self.navigate_and_render(Cause::Api, CarouselState::next)
    }

    /// Shows the previous slide and restarts the countdown.
    pub fn retreat(&mut self) -> Outcome {
        self.navigate_and_render(Cause::Api, CarouselState::prev)
    }

    /// Shows slide `index` and restarts the countdown. Out-of-range indices
    /// are ignored.
    pub fn jump_to(&mut self, index: u32) -> Outcome {
        self.navigate_and_render(Cause::Api, |state| state.go_to(index))
    }

    /// Toggles auto-advance.
    pub fn toggle_play(&mut self) -> Outcome {
        if !self.deck.is_rotating() {
            return Outcome::Ignored;
        }
        self.toggle(&mut Tracer::none());
        self.flush();
        Outcome::Handled
    }

    /// The slides.
    #[must_use]
    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    /// The state machine.
    #[must_use]
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Index of the active slide.
    #[must_use]
    pub fn current(&self) -> u32 {
        self.state.current()
    }

    /// Whether auto-advance is enabled.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// The auto-advance countdown.
    #[must_use]
    pub fn countdown(&self) -> &Countdown<T> {
        &self.countdown
    }

    /// The timer host.
    #[must_use]
    pub fn timer_host(&self) -> &T {
        self.countdown.host()
    }

    /// The timer host, mutably (for virtual-clock control in tests).
    pub fn timer_host_mut(&mut self) -> &mut T {
        self.countdown.host_mut()
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The configuration the carousel was mounted with.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    // -- input translation ---------------------------------------------------

    fn on_timer(&mut self, token: TimerToken, tracer: &mut Tracer<'_>) -> Outcome {
        let at = self.countdown.now();
        if !self.countdown.claim(token) {
            tracer.timer(&TimerEvent {
                at,
                token,
                kind: TimerEventKind::Stale,
                deadline: None,
            });
            return Outcome::Ignored;
        }
        tracer.timer(&TimerEvent {
            at,
            token,
            kind: TimerEventKind::Elapsed,
            deadline: None,
        });
        let transition = self.state.next();
        self.trace_transition(transition, Cause::Auto, tracer);
        if self.state.is_playing() {
            self.arm(tracer);
        } else {
            self.set_running(false, tracer);
        }
        Outcome::Handled
    }

    fn on_input(&mut self, input: CarouselInput, tracer: &mut Tracer<'_>) -> Outcome {
        match input {
            CarouselInput::TimerElapsed(token) => self.on_timer(token, tracer),
            CarouselInput::Previous => self.navigate(Cause::Previous, CarouselState::prev, tracer),
            CarouselInput::Next => self.navigate(Cause::Next, CarouselState::next, tracer),
            CarouselInput::Skip => self.navigate(Cause::Skip, CarouselState::next, tracer),
            CarouselInput::Dot(index) => {
                self.navigate(Cause::Dot, |state| state.go_to(index), tracer)
            }
            CarouselInput::TogglePlay => {
                self.toggle(tracer);
                Outcome::Handled
            }
            CarouselInput::PointerEnter | CarouselInput::VisibilityChanged { hidden: true } => {
                self.suspend(tracer);
                Outcome::Handled
            }
            CarouselInput::PointerLeave | CarouselInput::VisibilityChanged { hidden: false } => {
                self.resume(tracer);
                Outcome::Handled
            }
            CarouselInput::TouchStart { x } => {
                self.swipe.begin(x);
                self.suspend(tracer);
                Outcome::Handled
            }
            CarouselInput::TouchEnd { x } => {
                let transition = match self.swipe.end(x) {
                    Some(Swipe::Left) => self.state.next(),
                    Some(Swipe::Right) => self.state.prev(),
                    None => None,
                };
                self.trace_transition(transition, Cause::Swipe, tracer);
                self.resume(tracer);
                Outcome::Handled
            }
            CarouselInput::KeyDown {
                key,
                region,
                viewport,
            } => {
                if !fully_visible(region, viewport) {
                    return Outcome::Ignored;
                }
                match key {
                    Key::ArrowLeft => self.navigate(Cause::Previous, CarouselState::prev, tracer),
                    Key::ArrowRight => self.navigate(Cause::Next, CarouselState::next, tracer),
                    Key::Space => {
                        self.toggle(tracer);
                        Outcome::Handled
                    }
                    Key::Other => Outcome::Ignored,
                }
            }
        }
    }

    // -- operations ----------------------------------------------------------

    fn navigate_and_render(
        &mut self,
        cause: Cause,
        step: impl FnOnce(&mut CarouselState) -> Option<Transition>,
    ) -> Outcome {
        if !self.deck.is_rotating() {
            return Outcome::Ignored;
        }
        let outcome = self.navigate(cause, step, &mut Tracer::none());
        self.flush();
        outcome
    }

    /// Runs one manual transition, then restarts the countdown.
    fn navigate(
        &mut self,
        cause: Cause,
        step: impl FnOnce(&mut CarouselState) -> Option<Transition>,
        tracer: &mut Tracer<'_>,
    ) -> Outcome {
        let transition = step(&mut self.state);
        if transition.is_none() {
            return Outcome::Ignored;
        }
        self.trace_transition(transition, cause, tracer);
        if self.state.is_playing() {
            self.arm(tracer);
        } else {
            self.cancel(tracer);
        }
        Outcome::Handled
    }

    fn toggle(&mut self, tracer: &mut Tracer<'_>) {
        if self.state.is_playing() {
            self.set_playing(false, tracer);
            self.cancel(tracer);
        } else {
            self.set_playing(true, tracer);
            self.arm(tracer);
        }
    }

    /// Hover, touch, hidden document: stop the countdown, keep `playing`.
    fn suspend(&mut self, tracer: &mut Tracer<'_>) {
        if self.state.is_playing() {
            self.cancel(tracer);
        }
    }

    fn resume(&mut self, tracer: &mut Tracer<'_>) {
        if self.state.is_playing() {
            self.arm(tracer);
        }
    }

    fn arm(&mut self, tracer: &mut Tracer<'_>) {
        let at = self.countdown.now();
        let armed = self.countdown.arm();
        if let Some(replaced) = armed.replaced {
            tracer.timer(&TimerEvent {
                at,
                token: replaced,
                kind: TimerEventKind::Cancelled,
                deadline: None,
            });
        }
        tracer.timer(&TimerEvent {
            at,
            token: armed.token,
            kind: TimerEventKind::Armed,
            deadline: Some(armed.deadline),
        });
        self.set_running(true, tracer);
    }

    fn cancel(&mut self, tracer: &mut Tracer<'_>) {
        if let Some(token) = self.countdown.disarm() {
            tracer.timer(&TimerEvent {
                at: self.countdown.now(),
                token,
                kind: TimerEventKind::Cancelled,
                deadline: None,
            });
        }
        self.set_running(false, tracer);
    }

    fn set_playing(&mut self, playing: bool, tracer: &mut Tracer<'_>) {
        if self.state.set_playing(playing) {
            self.trace_playback(tracer);
        }
    }

    fn set_running(&mut self, running: bool, tracer: &mut Tracer<'_>) {
        if self.state.set_countdown_running(running) {
            self.trace_playback(tracer);
        }
    }

    fn trace_playback(&self, tracer: &mut Tracer<'_>) {
        tracer.playback(&PlaybackEvent {
            at: self.countdown.now(),
            playing: self.state.is_playing(),
            countdown_running: self.state.countdown_running(),
        });
    }

    fn trace_transition(
        &self,
        transition: Option<Transition>,
        cause: Cause,
        tracer: &mut Tracer<'_>,
    ) {
        if let Some(t) = transition {
            tracer.transition(&TransitionEvent {
                at: self.countdown.now(),
                from: t.from,
                to: t.to,
                cause,
            });
        }
    }

    /// Evaluates the state machine and renders whatever changed.
    fn flush(&mut self) {
        self.state.evaluate_into(&mut self.changes);
        if self.changes.is_empty() {
            return;
        }
        let view = CarouselView {
            deck: &self.deck,
            current: self.state.current(),
            playing: self.state.is_playing(),
            countdown_running: self.state.countdown_running(),
            interval: self.config.interval,
        };
        self.renderer.apply(&view, &self.changes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{SlideSpec, StyleResolver};
    use crate::time::{Duration, HostTime};
    use alloc::vec::Vec;
    use kurbo::{Rect, Size};

    #[derive(Default)]
    struct Host {
        armed: Vec<TimerToken>,
        cancelled: Vec<TimerToken>,
    }

    impl TimerHost for Host {
        type Handle = TimerToken;

        fn now(&self) -> HostTime {
            HostTime(0)
        }

        fn arm(&mut self, token: TimerToken, _delay: Duration) -> TimerToken {
            self.armed.push(token);
            token
        }

        fn cancel(&mut self, handle: TimerToken) {
            self.cancelled.push(handle);
        }
    }

    /// Tracks which slides currently carry the active marker.
    #[derive(Default)]
    struct Marker {
        active: Vec<u32>,
        applies: u32,
        navigation: Option<bool>,
    }

    impl Renderer for Marker {
        fn apply(&mut self, view: &CarouselView<'_>, changes: &CarouselChanges) {
            self.applies += 1;
            self.active.retain(|i| !changes.deactivated.contains(i));
            for &i in &changes.activated {
                if !self.active.contains(&i) {
                    self.active.push(i);
                }
            }
            if changes.navigation_changed {
                self.navigation = Some(view.navigation_visible());
            }
        }
    }

    fn mount(n: usize) -> CarouselController<Host, Marker> {
        let specs = (0..n).map(|_| SlideSpec::default());
        let deck = SlideDeck::new(specs, &StyleResolver::default());
        CarouselController::mount(
            deck,
            Host::default(),
            Marker::default(),
            CarouselConfig::hero(),
        )
    }

    fn live(c: &CarouselController<Host, Marker>) -> TimerToken {
        c.countdown().live_token().expect("a live timer")
    }

    #[test]
    fn mount_arms_and_renders_first_slide() {
        let c = mount(3);
        assert!(c.is_playing());
        assert_eq!(c.timer_host().armed.len(), 1);
        assert_eq!(c.renderer().active, [0]);
        assert_eq!(c.renderer().navigation, Some(true));
    }

    #[test]
    fn single_slide_never_arms() {
        let mut c = mount(1);
        assert!(!c.is_playing());
        assert!(c.timer_host().armed.is_empty());
        assert_eq!(c.renderer().navigation, Some(false));
        assert_eq!(c.handle(CarouselInput::Next), Outcome::Ignored);
        assert_eq!(c.handle(CarouselInput::TogglePlay), Outcome::Ignored);
        assert_eq!(c.advance(), Outcome::Ignored);
        assert!(c.timer_host().armed.is_empty());
    }

    #[test]
    fn timer_fire_advances_and_rearms() {
        let mut c = mount(3);
        let token = live(&c);
        assert_eq!(c.handle(CarouselInput::TimerElapsed(token)), Outcome::Handled);
        assert_eq!(c.current(), 1);
        assert_eq!(c.renderer().active, [1]);
        assert_ne!(live(&c), token, "re-armed with a fresh token");
        assert!(c.timer_host().cancelled.is_empty(), "a fired timer is not cancelled");
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut c = mount(3);
        let stale = live(&c);
        c.handle(CarouselInput::Next);
        assert_eq!(
            c.handle(CarouselInput::TimerElapsed(stale)),
            Outcome::Ignored
        );
        assert_eq!(c.current(), 1, "only the click advanced");
    }

    #[test]
    fn dot_out_of_range_is_ignored() {
        let mut c = mount(3);
        let armed = c.timer_host().armed.len();
        assert_eq!(c.handle(CarouselInput::Dot(7)), Outcome::Ignored);
        assert_eq!(c.current(), 0);
        assert_eq!(c.timer_host().armed.len(), armed, "countdown untouched");
    }

    #[test]
    fn hover_suspends_without_pausing() {
        let mut c = mount(2);
        c.handle(CarouselInput::PointerEnter);
        assert!(c.is_playing());
        assert!(!c.countdown().is_armed());
        c.handle(CarouselInput::PointerLeave);
        assert!(c.countdown().is_armed());
    }

    #[test]
    fn paused_navigation_does_not_arm() {
        let mut c = mount(3);
        c.toggle_play();
        assert!(!c.is_playing());
        let armed = c.timer_host().armed.len();
        c.handle(CarouselInput::Next);
        c.handle(CarouselInput::PointerLeave);
        assert_eq!(c.current(), 1);
        assert_eq!(c.timer_host().armed.len(), armed);
    }

    #[test]
    fn keys_require_full_visibility() {
        let mut c = mount(3);
        let viewport = Size::new(1000.0, 800.0);
        let hidden = Rect::new(0.0, 700.0, 1000.0, 1200.0);
        let shown = Rect::new(0.0, 100.0, 1000.0, 600.0);

        let key = |key, region| CarouselInput::KeyDown {
            key,
            region,
            viewport,
        };
        assert_eq!(c.handle(key(Key::ArrowRight, hidden)), Outcome::Ignored);
        assert_eq!(c.current(), 0);
        assert_eq!(c.handle(key(Key::ArrowRight, shown)), Outcome::Handled);
        assert_eq!(c.current(), 1);
        assert_eq!(c.handle(key(Key::Space, shown)), Outcome::Handled);
        assert!(!c.is_playing());
        assert_eq!(c.handle(key(Key::Other, shown)), Outcome::Ignored);
    }

    #[test]
    fn swipe_takes_precedence_and_arms_once() {
        let mut c = mount(3);
        c.handle(CarouselInput::TouchStart { x: 400.0 });
        assert!(!c.countdown().is_armed());
        let armed = c.timer_host().armed.len();
        c.handle(CarouselInput::TouchEnd { x: 300.0 });
        assert_eq!(c.current(), 1);
        assert_eq!(c.timer_host().armed.len(), armed + 1);
    }

    #[test]
    fn programmatic_surface() {
        let mut c = mount(4);
        assert_eq!(c.retreat(), Outcome::Handled);
        assert_eq!(c.current(), 3);
        assert_eq!(c.advance(), Outcome::Handled);
        assert_eq!(c.current(), 0);
        assert_eq!(c.jump_to(2), Outcome::Handled);
        assert_eq!(c.jump_to(4), Outcome::Ignored);
        assert_eq!(c.current(), 2);
        assert_eq!(c.renderer().active, [2]);
    }

    #[test]
    fn nothing_changed_renders_nothing() {
        let mut c = mount(2);
        c.toggle_play();
        let applies = c.renderer().applies;
        c.handle(CarouselInput::PointerEnter);
        assert_eq!(c.renderer().applies, applies);
    }
}
