// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM rendering.
//!
//! [`DomRenderer`] maps [`CarouselChanges`] onto the hero markup: the
//! `active` class on slides and dots, the progress animation on the active
//! dot, the play/pause icon, position readouts, and the per-slide styles
//! resolved at mount.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use marquee_core::backend::{CarouselView, Renderer};
use marquee_core::state::CarouselChanges;
use marquee_core::style::{ActionStyle, SlideStyle};
use marquee_core::time::Duration;
use wasm_bindgen::JsCast as _;
use web_sys::{Element, HtmlElement, NodeList};

/// Element ids, selectors, and class names of the hero markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomSelectors {
    /// Id of the region that receives hover, touch, and viewport checks.
    pub region_id: &'static str,
    /// Selector matching slide elements, in display order.
    pub slide: &'static str,
    /// Id of the container that receives generated dots.
    pub dots_id: &'static str,
    /// Id of the play/pause button.
    pub play_button_id: &'static str,
    /// Id of the play/pause icon element.
    pub play_icon_id: &'static str,
    /// Id of the previous button.
    pub prev_button_id: &'static str,
    /// Id of the next button.
    pub next_button_id: &'static str,
    /// Selector matching skip buttons anywhere in the document.
    pub skip_button: &'static str,
    /// Class given to generated dots.
    pub dot_class: &'static str,
    /// Class marking the active slide and dot.
    pub active_class: &'static str,
    /// Selector, relative to a slide, of primary action buttons.
    pub primary_action: &'static str,
    /// Selector, relative to a slide, of outline action buttons.
    pub outline_action: &'static str,
    /// Selector of position readouts (`i/N`).
    pub position_readout: &'static str,
    /// Selector of count-up statistic numbers.
    pub stat_number: &'static str,
    /// Icon class while playing.
    pub playing_icon: &'static str,
    /// Icon class while paused.
    pub paused_icon: &'static str,
    /// CSS animation name of the dot progress indicator.
    pub progress_animation: &'static str,
}

impl DomSelectors {
    /// The stock hero section markup.
    #[must_use]
    pub const fn hero() -> Self {
        Self {
            region_id: "heroSection",
            slide: ".hero-ad",
            dots_id: "adNavDots",
            play_button_id: "adPlayBtn",
            play_icon_id: "adPlayIcon",
            prev_button_id: "prevAdBtn",
            next_button_id: "nextAdBtn",
            skip_button: ".skip-ad-btn",
            dot_class: "ad-dot",
            active_class: "active",
            primary_action: ".btn-ad",
            outline_action: ".btn-ad-outline",
            position_readout: ".ad-stat:nth-child(1) span",
            stat_number: ".stat-number",
            playing_icon: "fas fa-pause",
            paused_icon: "fas fa-play",
            progress_animation: "dotProgress",
        }
    }
}

impl Default for DomSelectors {
    fn default() -> Self {
        Self::hero()
    }
}

/// Applies carousel changes to live DOM elements.
pub struct DomRenderer {
    selectors: DomSelectors,
    slides: Vec<HtmlElement>,
    dots: Vec<HtmlElement>,
    play_icon: Option<Element>,
    navigation: Vec<HtmlElement>,
    readouts: Vec<HtmlElement>,
}

impl core::fmt::Debug for DomRenderer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomRenderer")
            .field("slides_len", &self.slides.len())
            .field("dots_len", &self.dots.len())
            .field("readouts_len", &self.readouts.len())
            .finish_non_exhaustive()
    }
}

impl DomRenderer {
    /// Creates a renderer over already-discovered elements.
    ///
    /// `dots` may be empty (single-slide decks get none); `navigation` lists
    /// the controls hidden when the deck does not rotate.
    #[must_use]
    pub fn new(
        selectors: DomSelectors,
        slides: Vec<HtmlElement>,
        dots: Vec<HtmlElement>,
        play_icon: Option<Element>,
        navigation: Vec<HtmlElement>,
        readouts: Vec<HtmlElement>,
    ) -> Self {
        Self {
            selectors,
            slides,
            dots,
            play_icon,
            navigation,
            readouts,
        }
    }

    /// Returns the slide element at `index`.
    #[must_use]
    pub fn slide(&self, index: u32) -> Option<&HtmlElement> {
        self.slides.get(index as usize)
    }

    /// Returns the dot element at `index`.
    #[must_use]
    pub fn dot(&self, index: u32) -> Option<&HtmlElement> {
        self.dots.get(index as usize)
    }

    fn set_active(&self, index: u32, active: bool) {
        let class = self.selectors.active_class;
        for el in [self.slide(index), self.dot(index)].into_iter().flatten() {
            let list = el.class_list();
            let _ = if active {
                list.add_1(class)
            } else {
                list.remove_1(class)
            };
        }
    }

    /// Restarts the active dot's progress animation, paused unless the
    /// countdown is running.
    fn restart_progress(&self, index: u32, interval: Duration, running: bool) {
        let Some(dot) = self.dot(index) else {
            return;
        };
        let style = dot.style();
        let _ = style.set_property("animation", "none");
        // Reading layout flushes the `none` so the next value starts over.
        let _ = dot.offset_width();
        let _ = style.set_property(
            "animation",
            &progress_animation(self.selectors.progress_animation, interval),
        );
        let _ = style.set_property("animation-play-state", play_state(running));
    }

    fn apply_style(&self, index: u32, style: &SlideStyle) {
        let Some(slide) = self.slide(index) else {
            return;
        };
        let css = slide.style();
        let _ = css.set_property("background", &style.background.css());
        if style.background.has_image() {
            let _ = css.set_property("background-size", "cover");
            let _ = css.set_property("background-position", "center");
            let _ = css.set_property("background-blend-mode", "overlay");
        }
        let _ = css.set_property("color", &style.text_color.to_hex());

        for (selector, action) in [
            (self.selectors.primary_action, &style.primary_action),
            (self.selectors.outline_action, &style.outline_action),
        ] {
            if let Ok(list) = slide.query_selector_all(selector) {
                for button in html_elements(&list) {
                    apply_action(&button, action);
                }
            }
        }
    }
}

impl Renderer for DomRenderer {
    fn apply(&mut self, view: &CarouselView<'_>, changes: &CarouselChanges) {
        // 1. Styles (first render only)
        for &idx in &changes.styled {
            if let Some(slide) = view.deck.get(idx) {
                self.apply_style(idx, slide.style());
            }
        }

        // 2. Active markers
        for &idx in &changes.deactivated {
            self.set_active(idx, false);
        }
        for &idx in &changes.activated {
            self.set_active(idx, true);
            self.restart_progress(idx, view.interval, view.countdown_running);
        }

        // 3. Readouts
        if changes.position_changed {
            let label = view.position_label();
            for el in &self.readouts {
                el.set_text_content(Some(&label));
            }
        }

        // 4. Playback
        if changes.playback_changed {
            if let Some(icon) = &self.play_icon {
                icon.set_class_name(if view.playing {
                    self.selectors.playing_icon
                } else {
                    self.selectors.paused_icon
                });
            }
            // Every resume re-arms a full interval, so the indicator starts
            // over with it.
            if !changes.activated.contains(&view.current) {
                if view.countdown_running {
                    self.restart_progress(view.current, view.interval, true);
                } else if let Some(dot) = self.dot(view.current) {
                    let _ = dot
                        .style()
                        .set_property("animation-play-state", play_state(false));
                }
            }
        }

        // 5. Navigation visibility
        if changes.navigation_changed && !view.navigation_visible() {
            for el in &self.navigation {
                let _ = el.style().set_property("display", "none");
            }
        }
    }
}

fn apply_action(button: &HtmlElement, action: &ActionStyle) {
    let css = button.style();
    let fill = action
        .fill
        .map_or_else(|| String::from("transparent"), |c| c.to_hex());
    let _ = css.set_property("background-color", &fill);
    let _ = css.set_property("color", &action.label.to_hex());
    if let Some(border) = action.border {
        let _ = css.set_property("border-color", &border.to_hex());
    }
}

/// Collects the `HtmlElement`s of a node list, skipping other node types.
pub(crate) fn html_elements(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// The `animation` shorthand for one countdown of `interval`.
pub(crate) fn progress_animation(name: &str, interval: Duration) -> String {
    format!("{name} {}s linear forwards", interval.as_secs_f64())
}

fn play_state(running: bool) -> &'static str {
    if running { "running" } else { "paused" }
}
