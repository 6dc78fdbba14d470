// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenario driver.

use marquee_core::config::CarouselConfig;
use marquee_core::controller::CarouselController;
use marquee_core::deck::SlideDeck;
use marquee_core::input::{CarouselInput, Outcome};
use marquee_core::style::{SlideSpec, StyleResolver};
use marquee_core::time::{Duration, HostTime};
use marquee_core::timer::{TimerHost, TimerToken};

use crate::recorder::RecordingRenderer;
use crate::timers::ManualTimers;

/// The controller type a [`Simulation`] drives.
pub type SimulatedCarousel = CarouselController<ManualTimers, RecordingRenderer>;

/// Hero palette used by [`Simulation::hero`].
const PALETTE: [&str; 3] = ["#2563eb", "#16a34a", "#dc2626"];

/// A carousel mounted on a virtual clock.
#[derive(Debug)]
pub struct Simulation {
    carousel: SimulatedCarousel,
}

impl Simulation {
    /// Mounts `specs` at time zero.
    #[must_use]
    pub fn new(specs: impl IntoIterator<Item = SlideSpec>, config: CarouselConfig) -> Self {
        let deck = SlideDeck::new(specs, &StyleResolver::new(&config));
        Self {
            carousel: CarouselController::mount(
                deck,
                ManualTimers::default(),
                RecordingRenderer::new(),
                config,
            ),
        }
    }

    /// Mounts `n` white-on-color slides with the hero preset.
    #[must_use]
    pub fn hero(n: usize) -> Self {
        let specs = (0..n).map(|i| SlideSpec::colors(PALETTE[i % PALETTE.len()], "#ffffff"));
        Self::new(specs, CarouselConfig::hero())
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.timers().now()
    }

    /// Advances the clock by `d`, delivering every timer that comes due in
    /// order (including timers armed by earlier deliveries).
    ///
    /// Returns the number of deliveries the controller accepted.
    pub fn advance_by(&mut self, d: Duration) -> u32 {
        let target = self.now().saturating_add(d);
        self.advance_to(target)
    }

    /// Advances the clock to `t`; see [`advance_by`](Self::advance_by).
    pub fn advance_to(&mut self, t: HostTime) -> u32 {
        let mut accepted = 0;
        while let Some(token) = self.carousel.timer_host_mut().pop_due(t) {
            if self.carousel.handle(CarouselInput::TimerElapsed(token)).is_handled() {
                accepted += 1;
            }
        }
        self.carousel.timer_host_mut().set_now(t);
        accepted
    }

    /// Delivers a user input at the current time.
    pub fn send(&mut self, input: CarouselInput) -> Outcome {
        self.carousel.handle(input)
    }

    /// Delivers a timer callback for `token` as if it had been queued before
    /// its timer was cancelled.
    pub fn deliver_late(&mut self, token: TimerToken) -> Outcome {
        self.carousel.handle(CarouselInput::TimerElapsed(token))
    }

    /// Active slide index.
    #[must_use]
    pub fn current(&self) -> u32 {
        self.carousel.current()
    }

    /// The controller.
    #[must_use]
    pub fn carousel(&self) -> &SimulatedCarousel {
        &self.carousel
    }

    /// The controller, mutably.
    pub fn carousel_mut(&mut self) -> &mut SimulatedCarousel {
        &mut self.carousel
    }

    /// The timer host.
    #[must_use]
    pub fn timers(&self) -> &ManualTimers {
        self.carousel.timer_host()
    }

    /// The renderer.
    #[must_use]
    pub fn screen(&self) -> &RecordingRenderer {
        self.carousel.renderer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};
    use marquee_core::input::Key;

    const SIX_SECONDS: Duration = Duration::from_secs(6);

    /// Exactly one slide is marked, and the marker, readout, and state agree.
    fn assert_consistent(sim: &Simulation) {
        let screen = sim.screen();
        let len = sim.carousel().deck().len();
        assert_eq!(
            screen.active_slides(),
            [sim.current()],
            "exactly the current slide is active"
        );
        let readout = alloc::format!("{}/{}", sim.current() + 1, len);
        assert_eq!(screen.readout(), Some(readout.as_str()), "readout matches");
        assert!(sim.timers().live_count() <= 1, "at most one live timer");
    }

    #[test]
    fn interval_then_prev_restarts_countdown() {
        let mut sim = Simulation::hero(3);
        assert_eq!(sim.advance_by(SIX_SECONDS), 1);
        assert_eq!(sim.current(), 1);

        sim.advance_by(Duration::from_millis(2_000));
        assert_eq!(sim.send(CarouselInput::Previous), Outcome::Handled);
        assert_eq!(sim.current(), 0);
        assert_eq!(
            sim.timers().pending()[0].due,
            HostTime(8_000 + 6_000),
            "countdown restarted from the full interval"
        );

        sim.advance_by(Duration::from_millis(5_999));
        assert_eq!(sim.current(), 0, "not yet");
        sim.advance_by(Duration::from_millis(1));
        assert_eq!(sim.current(), 1);
        assert_consistent(&sim);
    }

    #[test]
    fn auto_advance_cycles_through_every_slide() {
        let mut sim = Simulation::hero(3);
        let mut seen = alloc::vec::Vec::new();
        for _ in 0..6 {
            sim.advance_by(SIX_SECONDS);
            seen.push(sim.current());
            assert_consistent(&sim);
        }
        assert_eq!(seen, [1, 2, 0, 1, 2, 0]);
        assert_eq!(sim.timers().max_live(), 1, "never two live timers");
    }

    #[test]
    fn rapid_clicks_advance_one_slide_each() {
        let mut sim = Simulation::hero(5);
        for _ in 0..7 {
            sim.send(CarouselInput::Next);
        }
        assert_eq!(sim.current(), 2, "7 clicks on 5 slides");
        assert_eq!(sim.timers().live_count(), 1);
        assert_eq!(sim.timers().max_live(), 1);
        assert_consistent(&sim);
    }

    #[test]
    fn manual_navigation_resets_countdown() {
        let mut sim = Simulation::hero(3);
        sim.advance_by(Duration::from_millis(4_000));
        sim.send(CarouselInput::Next);
        assert_eq!(sim.current(), 1);

        sim.advance_to(HostTime(6_000));
        assert_eq!(sim.current(), 1, "original deadline was cancelled");
        sim.advance_to(HostTime(10_000));
        assert_eq!(sim.current(), 2);
    }

    #[test]
    fn dot_jumps_and_restarts_countdown() {
        let mut sim = Simulation::hero(4);
        sim.advance_by(Duration::from_millis(3_000));
        assert_eq!(sim.send(CarouselInput::Dot(3)), Outcome::Handled);
        assert_eq!(sim.current(), 3);
        assert_eq!(sim.timers().pending()[0].due, HostTime(9_000));

        assert_eq!(sim.send(CarouselInput::Dot(9)), Outcome::Ignored);
        assert_eq!(sim.current(), 3);
        assert_consistent(&sim);
    }

    #[test]
    fn reselecting_active_dot_restarts_progress() {
        let mut sim = Simulation::hero(3);
        assert_eq!(sim.screen().restarts(0), 1);
        sim.send(CarouselInput::Dot(0));
        assert_eq!(sim.screen().restarts(0), 2);
        assert_consistent(&sim);
    }

    #[test]
    fn skip_behaves_like_next() {
        let mut sim = Simulation::hero(3);
        sim.advance_by(Duration::from_millis(1_000));
        assert_eq!(sim.send(CarouselInput::Skip), Outcome::Handled);
        assert_eq!(sim.current(), 1);
        assert_eq!(sim.timers().pending()[0].due, HostTime(7_000));
    }

    #[test]
    fn single_slide_hides_navigation_and_never_arms() {
        let mut sim = Simulation::hero(1);
        assert_eq!(sim.screen().navigation_visible(), Some(false));
        assert_eq!(sim.timers().arm_count(), 0);
        sim.advance_by(Duration::from_secs(60));
        assert_eq!(sim.send(CarouselInput::Next), Outcome::Ignored);
        assert_eq!(sim.send(CarouselInput::PointerLeave), Outcome::Ignored);
        assert_eq!(sim.current(), 0);
        assert_eq!(sim.timers().arm_count(), 0);
        assert_eq!(sim.screen().active_slides(), [0]);
        assert_eq!(sim.screen().readout(), Some("1/1"));
    }

    #[test]
    fn empty_deck_mounts_inert() {
        let mut sim = Simulation::hero(0);
        assert!(sim.screen().active_slides().is_empty());
        assert_eq!(sim.send(CarouselInput::Next), Outcome::Ignored);
        assert_eq!(sim.timers().arm_count(), 0);
    }

    #[test]
    fn stale_token_never_advances() {
        let mut sim = Simulation::hero(3);
        let stale = sim.timers().pending()[0].token;
        sim.send(CarouselInput::Next);
        assert_eq!(sim.deliver_late(stale), Outcome::Ignored);
        assert_eq!(sim.current(), 1);

        sim.send(CarouselInput::TogglePlay);
        let after_pause = sim.current();
        assert_eq!(sim.deliver_late(stale), Outcome::Ignored);
        assert_eq!(sim.current(), after_pause);
    }

    #[test]
    fn hover_suspends_and_leave_restarts_full_interval() {
        let mut sim = Simulation::hero(3);
        sim.advance_by(Duration::from_millis(1_000));
        sim.send(CarouselInput::PointerEnter);
        assert!(sim.carousel().is_playing(), "hover does not pause");
        assert!(!sim.screen().progress_running());

        sim.advance_by(Duration::from_secs(20));
        assert_eq!(sim.current(), 0, "no advance while hovered");

        sim.send(CarouselInput::PointerLeave);
        assert!(sim.screen().progress_running());
        sim.advance_by(Duration::from_millis(5_999));
        assert_eq!(sim.current(), 0);
        sim.advance_by(Duration::from_millis(1));
        assert_eq!(sim.current(), 1);
    }

    #[test]
    fn pause_stops_and_play_rearms() {
        let mut sim = Simulation::hero(3);
        sim.send(CarouselInput::TogglePlay);
        assert_eq!(sim.screen().shows_playing(), Some(false));
        assert_eq!(sim.timers().live_count(), 0);

        sim.advance_by(Duration::from_secs(30));
        assert_eq!(sim.current(), 0);

        sim.send(CarouselInput::PointerEnter);
        sim.send(CarouselInput::PointerLeave);
        assert_eq!(sim.timers().live_count(), 0, "leave does not arm while paused");

        sim.send(CarouselInput::Next);
        assert_eq!(sim.timers().live_count(), 0, "navigation does not arm while paused");

        sim.send(CarouselInput::TogglePlay);
        assert_eq!(sim.screen().shows_playing(), Some(true));
        sim.advance_by(SIX_SECONDS);
        assert_eq!(sim.current(), 2);
    }

    #[test]
    fn swipe_navigates_and_short_touch_resumes() {
        let mut sim = Simulation::hero(3);
        sim.send(CarouselInput::TouchStart { x: 200.0 });
        assert_eq!(sim.timers().live_count(), 0, "touch suspends");
        sim.send(CarouselInput::TouchEnd { x: 260.0 });
        assert_eq!(sim.current(), 2, "rightward swipe goes back");
        assert_eq!(sim.timers().live_count(), 1);

        let arms = sim.timers().arm_count();
        sim.send(CarouselInput::TouchStart { x: 200.0 });
        sim.send(CarouselInput::TouchEnd { x: 170.0 });
        assert_eq!(sim.current(), 2, "30px is not a swipe");
        assert_eq!(sim.timers().arm_count(), arms + 1, "resumed once");
        assert_consistent(&sim);
    }

    #[test]
    fn hidden_document_suspends() {
        let mut sim = Simulation::hero(2);
        sim.send(CarouselInput::VisibilityChanged { hidden: true });
        sim.advance_by(Duration::from_secs(60));
        assert_eq!(sim.current(), 0);
        sim.send(CarouselInput::VisibilityChanged { hidden: false });
        sim.advance_by(SIX_SECONDS);
        assert_eq!(sim.current(), 1);
    }

    #[test]
    fn keyboard_is_gated_by_viewport() {
        let mut sim = Simulation::hero(3);
        let viewport = Size::new(1024.0, 768.0);
        let below_fold = Rect::new(0.0, 500.0, 1024.0, 1100.0);
        let on_screen = Rect::new(0.0, 64.0, 1024.0, 664.0);

        let press = |key, region| CarouselInput::KeyDown {
            key,
            region,
            viewport,
        };
        assert_eq!(sim.send(press(Key::ArrowLeft, below_fold)), Outcome::Ignored);
        assert_eq!(sim.current(), 0);
        assert_eq!(sim.send(press(Key::ArrowLeft, on_screen)), Outcome::Handled);
        assert_eq!(sim.current(), 2);
        assert_eq!(sim.send(press(Key::Space, on_screen)), Outcome::Handled);
        assert!(!sim.carousel().is_playing());
    }

    #[test]
    fn styles_are_applied_once_at_mount() {
        let sim = Simulation::hero(3);
        assert_eq!(
            sim.screen().background(0),
            Some("linear-gradient(135deg, #2563eb, #1d4fbc)")
        );
        let styled: usize = sim.screen().log().iter().map(|c| c.styled.len()).sum();
        assert_eq!(styled, 3, "each slide styled exactly once");
    }

    #[test]
    fn mixed_input_sequence_keeps_one_active_slide() {
        let mut sim = Simulation::hero(4);
        // Small LCG so the sequence is fixed.
        let mut seed: u32 = 0x1234_5678;
        for _ in 0..200 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let input = match (seed >> 24) % 9 {
                0 => CarouselInput::Next,
                1 => CarouselInput::Previous,
                2 => CarouselInput::Skip,
                3 => CarouselInput::Dot((seed >> 8) % 6),
                4 => CarouselInput::TogglePlay,
                5 => CarouselInput::PointerEnter,
                6 => CarouselInput::PointerLeave,
                7 => CarouselInput::TouchStart { x: 300.0 },
                _ => CarouselInput::TouchEnd {
                    x: f64::from((seed >> 4) % 600),
                },
            };
            sim.send(input);
            sim.advance_by(Duration::from_millis(u64::from((seed >> 12) % 9_000)));
            assert_consistent(&sim);
        }
        assert_eq!(sim.timers().max_live(), 1);
    }
}
