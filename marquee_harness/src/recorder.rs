// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A renderer that models what the page would show.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use marquee_core::backend::{CarouselView, Renderer};
use marquee_core::state::CarouselChanges;

/// A [`Renderer`] that keeps the observable presentation state in memory.
///
/// It tracks the same things the DOM renderer writes: the active marker on
/// each slide (and its dot), the `i/N` readout, the play/pause icon, whether
/// navigation is shown, the progress indicator, and each slide's background.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    active: Vec<bool>,
    restarts: Vec<u32>,
    backgrounds: Vec<Option<String>>,
    readout: Option<String>,
    playing: Option<bool>,
    progress_running: bool,
    navigation_visible: Option<bool>,
    log: Vec<CarouselChanges>,
}

impl RecordingRenderer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of slides currently carrying the active marker.
    #[must_use]
    pub fn active_slides(&self) -> Vec<u32> {
        (0_u32..)
            .zip(&self.active)
            .filter(|(_, on)| **on)
            .map(|(i, _)| i)
            .collect()
    }

    /// How many times slide `index` was activated (its progress indicator
    /// restarted).
    #[must_use]
    pub fn restarts(&self, index: u32) -> u32 {
        self.restarts.get(index as usize).copied().unwrap_or(0)
    }

    /// CSS background applied to slide `index`.
    #[must_use]
    pub fn background(&self, index: u32) -> Option<&str> {
        self.backgrounds.get(index as usize)?.as_deref()
    }

    /// Current `i/N` readout.
    #[must_use]
    pub fn readout(&self) -> Option<&str> {
        self.readout.as_deref()
    }

    /// Whether the play/pause control shows the "playing" state.
    #[must_use]
    pub fn shows_playing(&self) -> Option<bool> {
        self.playing
    }

    /// Whether the active slide's progress indicator is animating.
    #[must_use]
    pub fn progress_running(&self) -> bool {
        self.progress_running
    }

    /// Whether navigation controls are shown.
    #[must_use]
    pub fn navigation_visible(&self) -> Option<bool> {
        self.navigation_visible
    }

    /// Every change set applied, in order.
    #[must_use]
    pub fn log(&self) -> &[CarouselChanges] {
        &self.log
    }
}

impl Renderer for RecordingRenderer {
    fn apply(&mut self, view: &CarouselView<'_>, changes: &CarouselChanges) {
        let len = view.len() as usize;
        if self.active.len() != len {
            self.active = vec![false; len];
            self.restarts = vec![0; len];
            self.backgrounds = vec![None; len];
        }

        for &i in &changes.styled {
            if let Some(slide) = view.deck.get(i) {
                self.backgrounds[i as usize] = Some(slide.style().background.css());
            }
        }
        for &i in &changes.deactivated {
            self.active[i as usize] = false;
        }
        for &i in &changes.activated {
            self.active[i as usize] = true;
            self.restarts[i as usize] += 1;
        }
        if changes.position_changed {
            self.readout = Some(view.position_label());
        }
        if changes.playback_changed {
            self.playing = Some(view.playing);
            self.progress_running = view.countdown_running;
        }
        if changes.navigation_changed {
            self.navigation_visible = Some(view.navigation_visible());
        }
        self.log.push(changes.clone());
    }
}
