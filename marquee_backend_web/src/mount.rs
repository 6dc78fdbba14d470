// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mounting a carousel onto hero markup.
//!
//! [`mount_hero_with`] discovers slides under the region element, creates
//! navigation dots, builds the controller with a [`TimeoutHost`] and a
//! [`DomRenderer`], and wires DOM listeners that translate browser events
//! into [`CarouselInput`]s.
//!
//! The controller lives in an `Rc<RefCell<Mounted>>`. Leaked listeners keep it
//! alive for the life of the page; the timer closure, which the controller
//! itself owns, holds a `Weak`. Both use `try_borrow_mut`, so an event that
//! arrives while the controller is already borrowed is dropped.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;

use core::cell::RefCell;

use kurbo::{Rect, Size};
use marquee_core::backend::CarouselView;
use marquee_core::config::CarouselConfig;
use marquee_core::controller::CarouselController;
use marquee_core::deck::SlideDeck;
use marquee_core::input::{CarouselInput, Key, Outcome};
use marquee_core::style::{SlideSpec, StyleResolver};
use marquee_core::time::Duration;
use marquee_core::trace::{TraceSink, Tracer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, TouchEvent};

use crate::dom::{DomRenderer, DomSelectors, html_elements};
use crate::timeout::TimeoutHost;

/// The controller type the browser backend mounts.
pub type HeroCarousel = CarouselController<TimeoutHost, DomRenderer>;

/// A mounted carousel and its optional trace sink.
pub struct Mounted {
    carousel: HeroCarousel,
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Mounted {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mounted")
            .field("carousel", &self.carousel)
            .field("traced", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl Mounted {
    /// Feeds one input to the controller, reporting to the sink if any.
    pub fn handle(&mut self, input: CarouselInput) -> Outcome {
        match &mut self.sink {
            Some(sink) => self
                .carousel
                .handle_traced(input, &mut Tracer::new(sink.as_mut())),
            None => self.carousel.handle(input),
        }
    }

    /// Returns the controller.
    #[must_use]
    pub fn carousel(&self) -> &HeroCarousel {
        &self.carousel
    }

    /// Returns the controller mutably, for the manual-control surface
    /// (`advance`, `retreat`, `jump_to`, `toggle_play`).
    pub fn carousel_mut(&mut self) -> &mut HeroCarousel {
        &mut self.carousel
    }
}

/// Mounts the stock hero carousel on `document`.
///
/// See [`mount_hero_with`].
pub fn mount_hero(document: &Document) -> Result<Option<Rc<RefCell<Mounted>>>, JsValue> {
    mount_hero_with(document, DomSelectors::hero(), CarouselConfig::hero(), None)
}

/// Mounts a carousel on `document` using the given selectors and config.
///
/// Returns `Ok(None)` without touching the page when the region element is
/// missing or holds no slides. Optional controls that are absent are skipped.
/// A `data-interval` attribute (milliseconds) on the region overrides
/// `config.interval`.
///
/// # Errors
///
/// Propagates DOM failures while discovering elements, creating dots, or
/// registering listeners.
pub fn mount_hero_with(
    document: &Document,
    selectors: DomSelectors,
    mut config: CarouselConfig,
    sink: Option<Box<dyn TraceSink>>,
) -> Result<Option<Rc<RefCell<Mounted>>>, JsValue> {
    let Some(region) = document.get_element_by_id(selectors.region_id) else {
        return Ok(None);
    };
    let slides = html_elements(&region.query_selector_all(selectors.slide)?);
    if slides.is_empty() {
        return Ok(None);
    }
    if let Some(interval) = region
        .get_attribute("data-interval")
        .as_deref()
        .and_then(parse_interval)
    {
        config = config.with_interval(interval);
    }

    let deck = SlideDeck::new(
        slides.iter().map(slide_spec),
        &StyleResolver::new(&config),
    );

    let dots_container = html_by_id(document, selectors.dots_id);
    let dots = match &dots_container {
        Some(container) if deck.is_rotating() => {
            create_dots(document, container, &selectors, &deck, config.interval)?
        }
        _ => Vec::new(),
    };
    let play_button = html_by_id(document, selectors.play_button_id);
    let prev_button = html_by_id(document, selectors.prev_button_id);
    let next_button = html_by_id(document, selectors.next_button_id);
    let navigation = [&dots_container, &play_button, &prev_button, &next_button]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    let readouts = html_elements(&document.query_selector_all(selectors.position_readout)?);
    let renderer = DomRenderer::new(
        selectors,
        slides,
        dots,
        document.get_element_by_id(selectors.play_icon_id),
        navigation,
        readouts,
    );

    let mounted = Rc::new_cyclic(|weak: &Weak<RefCell<Mounted>>| {
        let weak = weak.clone();
        let host = TimeoutHost::new(move |token| {
            if let Some(mounted) = weak.upgrade() {
                dispatch(&mounted, CarouselInput::TimerElapsed(token));
            }
        });
        let mut sink = sink;
        let carousel = match &mut sink {
            Some(s) => HeroCarousel::mount_traced(
                deck,
                host,
                renderer,
                config,
                &mut Tracer::new(s.as_mut()),
            ),
            None => HeroCarousel::mount(deck, host, renderer, config),
        };
        RefCell::new(Mounted { carousel, sink })
    });

    if !mounted.borrow().carousel.deck().is_rotating() {
        return Ok(Some(mounted));
    }

    if let Some(button) = &prev_button {
        listen(button, "click", &mounted, Prevent::Never, |_| {
            Some(CarouselInput::Previous)
        })?;
    }
    if let Some(button) = &next_button {
        listen(button, "click", &mounted, Prevent::Never, |_| {
            Some(CarouselInput::Next)
        })?;
    }
    if let Some(button) = &play_button {
        listen(button, "click", &mounted, Prevent::Never, |_| {
            Some(CarouselInput::TogglePlay)
        })?;
    }
    for button in html_elements(&document.query_selector_all(selectors.skip_button)?) {
        listen(&button, "click", &mounted, Prevent::Always, |_| {
            Some(CarouselInput::Skip)
        })?;
    }
    if let Some(container) = &dots_container {
        let dot_selector = format!(".{}", selectors.dot_class);
        listen(container, "click", &mounted, Prevent::Never, move |event| {
            let dot = event
                .target()?
                .dyn_into::<Element>()
                .ok()?
                .closest(&dot_selector)
                .ok()??;
            dot.get_attribute("data-index")
                .as_deref()
                .and_then(parse_index)
                .map(CarouselInput::Dot)
        })?;
    }

    {
        let region = region.clone();
        let doc = document.clone();
        listen(document, "keydown", &mounted, Prevent::WhenHandled, move |event| {
            let key = Key::from_dom(&event.dyn_ref::<KeyboardEvent>()?.key());
            if key == Key::Other {
                return None;
            }
            Some(CarouselInput::KeyDown {
                key,
                region: client_rect(&region),
                viewport: viewport_size(&doc),
            })
        })?;
    }
    listen(&region, "mouseenter", &mounted, Prevent::Never, |_| {
        Some(CarouselInput::PointerEnter)
    })?;
    listen(&region, "mouseleave", &mounted, Prevent::Never, |_| {
        Some(CarouselInput::PointerLeave)
    })?;
    listen(&region, "touchstart", &mounted, Prevent::Never, |event| {
        touch_x(event).map(|x| CarouselInput::TouchStart { x })
    })?;
    listen(&region, "touchend", &mounted, Prevent::Never, |event| {
        touch_x(event).map(|x| CarouselInput::TouchEnd { x })
    })?;
    {
        let doc = document.clone();
        listen(document, "visibilitychange", &mounted, Prevent::Never, move |_| {
            Some(CarouselInput::VisibilityChanged {
                hidden: doc.hidden(),
            })
        })?;
    }

    Ok(Some(mounted))
}

/// When a listener calls `preventDefault`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prevent {
    Never,
    Always,
    WhenHandled,
}

/// Registers a listener that translates events with `to_input` and feeds the
/// result to the controller. The closure is leaked; it lives as long as the
/// page.
fn listen(
    target: &EventTarget,
    kind: &str,
    mounted: &Rc<RefCell<Mounted>>,
    prevent: Prevent,
    mut to_input: impl FnMut(&Event) -> Option<CarouselInput> + 'static,
) -> Result<(), JsValue> {
    let mounted = Rc::clone(mounted);
    let cb = Closure::wrap(Box::new(move |event: Event| {
        if prevent == Prevent::Always {
            event.prevent_default();
        }
        let Some(input) = to_input(&event) else {
            return;
        };
        if dispatch(&mounted, input).is_handled() && prevent == Prevent::WhenHandled {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn dispatch(mounted: &RefCell<Mounted>, input: CarouselInput) -> Outcome {
    // Re-entrant events (fired synchronously from inside a render) are
    // dropped.
    let Ok(mut mounted) = mounted.try_borrow_mut() else {
        return Outcome::Ignored;
    };
    mounted.handle(input)
}

fn create_dots(
    document: &Document,
    container: &HtmlElement,
    selectors: &DomSelectors,
    deck: &SlideDeck,
    interval: Duration,
) -> Result<Vec<HtmlElement>, JsValue> {
    let view = CarouselView {
        deck,
        current: 0,
        playing: false,
        countdown_running: false,
        interval,
    };
    let mut dots = Vec::with_capacity(deck.len() as usize);
    for idx in 0..deck.len() {
        let dot: HtmlElement = document.create_element("button")?.unchecked_into();
        dot.set_class_name(selectors.dot_class);
        dot.set_attribute("type", "button")?;
        dot.set_attribute("aria-label", &view.dot_label(idx))?;
        dot.set_attribute("data-index", &format!("{idx}"))?;
        container.append_child(&dot)?;
        dots.push(dot);
    }
    Ok(dots)
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn slide_spec(el: &HtmlElement) -> SlideSpec {
    let attr = |name: &str| el.get_attribute(name).filter(|v| !v.is_empty());
    SlideSpec {
        background_color: attr("data-background-color"),
        text_color: attr("data-text-color"),
        image_url: attr("data-image-url"),
    }
}

fn client_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.right(), r.bottom())
}

/// The layout viewport: `innerWidth`/`innerHeight`, falling back to the root
/// element's client size.
fn viewport_size(document: &Document) -> Size {
    let inner = web_sys::window().and_then(|w| {
        let width = w.inner_width().ok()?.as_f64()?;
        let height = w.inner_height().ok()?.as_f64()?;
        Some(Size::new(width, height))
    });
    let root = document
        .document_element()
        .map(|el| Size::new(f64::from(el.client_width()), f64::from(el.client_height())));
    match (inner, root) {
        (Some(size), Some(root)) => Size::new(
            if size.width > 0.0 { size.width } else { root.width },
            if size.height > 0.0 { size.height } else { root.height },
        ),
        (Some(size), None) => size,
        (None, Some(root)) => root,
        (None, None) => Size::ZERO,
    }
}

fn touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().item(0)?;
    Some(f64::from(touch.screen_x()))
}

/// Parses a `data-interval` value in milliseconds. Zero and malformed values
/// are rejected.
fn parse_interval(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|&ms| ms > 0)
        .map(Duration::from_millis)
}

fn parse_index(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_attribute_overrides_only_when_valid() {
        assert_eq!(parse_interval("4000"), Some(Duration::from_millis(4_000)));
        assert_eq!(parse_interval(" 2500 "), Some(Duration::from_millis(2_500)));
        assert_eq!(parse_interval("0"), None);
        assert_eq!(parse_interval("6s"), None);
        assert_eq!(parse_interval(""), None);
    }

    #[test]
    fn dot_indices_parse() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("12"), Some(12));
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("x"), None);
    }
}
