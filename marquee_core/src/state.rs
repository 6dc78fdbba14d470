// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slide state machine.
//!
//! [`CarouselState`] owns which slide is active. Its states are the slide
//! indices `0..len`, it starts at `0`, and it has no terminal state.
//! [`go_to`](CarouselState::go_to) is the only mutator of the active index;
//! [`next`](CarouselState::next) and [`prev`](CarouselState::prev) wrap
//! around and funnel through it.
//!
//! Mutations do not touch presentation. They mark [`dirty`](crate::dirty)
//! channels and flags, and [`evaluate`](CarouselState::evaluate) drains them
//! into a [`CarouselChanges`] for a [`Renderer`](crate::backend::Renderer).
//! The controller evaluates and renders before returning from every input, so
//! callers never observe a frame with zero or two active slides.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::dirty;

/// A change of active slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Previously active slide.
    pub from: u32,
    /// Newly active slide.
    pub to: u32,
}

/// The set of changes produced by a single [`CarouselState::evaluate`] call.
///
/// Slide lists contain indices into the deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarouselChanges {
    /// Slides whose resolved style has not been applied yet.
    pub styled: Vec<u32>,
    /// Slides that must carry the active marker (and restart their progress
    /// indicator).
    pub activated: Vec<u32>,
    /// Slides that must lose the active marker.
    pub deactivated: Vec<u32>,
    /// Whether the position readout (`i/N`) must be refreshed.
    pub position_changed: bool,
    /// Whether the playing flag or the countdown's running state changed.
    pub playback_changed: bool,
    /// Whether navigation controls must be shown or hidden.
    pub navigation_changed: bool,
}

impl CarouselChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.styled.clear();
        self.activated.clear();
        self.deactivated.clear();
        self.position_changed = false;
        self.playback_changed = false;
        self.navigation_changed = false;
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styled.is_empty()
            && self.activated.is_empty()
            && self.deactivated.is_empty()
            && !self.position_changed
            && !self.playback_changed
            && !self.navigation_changed
    }
}

/// Active-slide state for one mounted carousel.
pub struct CarouselState {
    len: u32,
    current: u32,
    playing: bool,
    countdown_running: bool,
    dirty: DirtyTracker<u32>,
    position_dirty: bool,
    playback_dirty: bool,
    navigation_dirty: bool,
}

impl core::fmt::Debug for CarouselState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselState")
            .field("len", &self.len)
            .field("current", &self.current)
            .field("playing", &self.playing)
            .field("countdown_running", &self.countdown_running)
            .finish_non_exhaustive()
    }
}

impl CarouselState {
    /// Creates the state for a deck of `len` slides.
    ///
    /// Every slide starts style-dirty, slide `0` (if any) starts
    /// active-dirty, and navigation visibility is pending.
    #[must_use]
    pub fn new(len: u32) -> Self {
        let mut tracker = DirtyTracker::with_cycle_handling(CycleHandling::Error);
        for idx in 0..len {
            tracker.mark(idx, dirty::STYLE);
        }
        if len > 0 {
            tracker.mark(0, dirty::ACTIVE);
        }
        Self {
            len,
            current: 0,
            playing: false,
            countdown_running: false,
            dirty: tracker,
            position_dirty: len > 0,
            playback_dirty: true,
            navigation_dirty: true,
        }
    }

    /// Number of slides.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Whether there are no slides.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the active slide. Meaningless when the deck is empty.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Whether navigation controls apply (more than one slide).
    #[must_use]
    pub const fn is_rotating(&self) -> bool {
        self.len > 1
    }

    /// Whether auto-advance is enabled.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether an auto-advance countdown is currently live.
    #[must_use]
    pub const fn countdown_running(&self) -> bool {
        self.countdown_running
    }

    /// Activates `index`.
    ///
    /// Returns `None`, leaving the state unchanged, when `index` is out of
    /// range. Re-selecting the active slide is a transition onto itself: the
    /// slide is marked again so its progress indicator restarts.
    pub fn go_to(&mut self, index: u32) -> Option<Transition> {
        if index >= self.len {
            return None;
        }
        let from = self.current;
        self.dirty.mark(from, dirty::ACTIVE);
        self.dirty.mark(index, dirty::ACTIVE);
        self.current = index;
        self.position_dirty = true;
        Some(Transition { from, to: index })
    }

    /// Activates the following slide, wrapping to `0` after the last.
    pub fn next(&mut self) -> Option<Transition> {
        if self.len == 0 {
            return None;
        }
        self.go_to((self.current + 1) % self.len)
    }

    /// Activates the preceding slide, wrapping to the last before `0`.
    pub fn prev(&mut self) -> Option<Transition> {
        if self.len == 0 {
            return None;
        }
        self.go_to((self.current + self.len - 1) % self.len)
    }

    /// Sets the playing flag. Returns whether it changed.
    pub fn set_playing(&mut self, playing: bool) -> bool {
        if self.playing == playing {
            return false;
        }
        self.playing = playing;
        self.playback_dirty = true;
        true
    }

    /// Records whether a countdown is live. Returns whether it changed.
    pub fn set_countdown_running(&mut self, running: bool) -> bool {
        if self.countdown_running == running {
            return false;
        }
        self.countdown_running = running;
        self.playback_dirty = true;
        true
    }

    /// Drains all pending changes.
    pub fn evaluate(&mut self) -> CarouselChanges {
        let mut changes = CarouselChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut CarouselChanges) {
        changes.clear();

        changes.styled = self
            .dirty
            .drain(dirty::STYLE)
            .deterministic()
            .run()
            .collect();
        changes.styled.sort_unstable();
        changes.styled.dedup();

        let mut marked: Vec<u32> = self
            .dirty
            .drain(dirty::ACTIVE)
            .deterministic()
            .run()
            .collect();
        marked.sort_unstable();
        marked.dedup();
        for idx in marked {
            if idx == self.current {
                changes.activated.push(idx);
            } else {
                changes.deactivated.push(idx);
            }
        }

        changes.position_changed = core::mem::take(&mut self.position_dirty);
        changes.playback_changed = core::mem::take(&mut self.playback_dirty);
        changes.navigation_changed = core::mem::take(&mut self.navigation_dirty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled(len: u32) -> CarouselState {
        let mut state = CarouselState::new(len);
        let _ = state.evaluate();
        state
    }

    #[test]
    fn initial_evaluate_styles_everything_and_activates_first() {
        let mut state = CarouselState::new(3);
        let changes = state.evaluate();
        assert_eq!(changes.styled, [0, 1, 2]);
        assert_eq!(changes.activated, [0]);
        assert!(changes.deactivated.is_empty());
        assert!(changes.position_changed);
        assert!(changes.navigation_changed);

        // Nothing left afterwards.
        assert!(state.evaluate().is_empty());
    }

    #[test]
    fn go_to_moves_active_marker() {
        let mut state = settled(4);
        assert_eq!(state.go_to(2), Some(Transition { from: 0, to: 2 }));
        let changes = state.evaluate();
        assert_eq!(changes.activated, [2]);
        assert_eq!(changes.deactivated, [0]);
        assert!(changes.position_changed);
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn go_to_out_of_range_is_rejected() {
        let mut state = settled(3);
        assert_eq!(state.go_to(3), None);
        assert_eq!(state.go_to(u32::MAX), None);
        assert_eq!(state.current(), 0);
        assert!(state.evaluate().is_empty(), "rejected go_to must not dirty");
    }

    #[test]
    fn reselecting_current_restarts_it() {
        let mut state = settled(3);
        assert_eq!(state.go_to(0), Some(Transition { from: 0, to: 0 }));
        let changes = state.evaluate();
        assert_eq!(changes.activated, [0]);
        assert!(changes.deactivated.is_empty());
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut state = settled(3);
        assert_eq!(state.prev(), Some(Transition { from: 0, to: 2 }));
        assert_eq!(state.next(), Some(Transition { from: 2, to: 0 }));
        assert_eq!(state.next(), Some(Transition { from: 0, to: 1 }));
    }

    #[test]
    fn cyclic_closure_from_every_start() {
        let n = 5;
        for start in 0..n {
            let mut state = settled(n);
            state.go_to(start);
            for _ in 0..n {
                state.next();
            }
            assert_eq!(state.current(), start, "next() x{n} from {start}");
            for _ in 0..n {
                state.prev();
            }
            assert_eq!(state.current(), start, "prev() x{n} from {start}");
        }
    }

    #[test]
    fn several_transitions_before_evaluate_leave_one_active() {
        let mut state = settled(4);
        state.go_to(1);
        state.go_to(3);
        let changes = state.evaluate();
        assert_eq!(changes.activated, [3]);
        assert_eq!(changes.deactivated, [0, 1]);
    }

    #[test]
    fn empty_deck_never_transitions() {
        let mut state = CarouselState::new(0);
        let changes = state.evaluate();
        assert!(changes.styled.is_empty());
        assert!(changes.activated.is_empty());
        assert!(!changes.position_changed);
        assert_eq!(state.next(), None);
        assert_eq!(state.prev(), None);
        assert_eq!(state.go_to(0), None);
    }

    #[test]
    fn playback_flags_mark_once() {
        let mut state = settled(2);
        assert!(state.set_playing(true));
        assert!(!state.set_playing(true));
        assert!(state.set_countdown_running(true));
        let changes = state.evaluate();
        assert!(changes.playback_changed);
        assert!(!state.evaluate().playback_changed);
    }
}
