// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Count-up animation for statistic readouts.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;

use core::cell::Cell;

use marquee_core::counter::{CountUp, CountUpConfig, parse_target};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlElement};

use crate::dom::html_elements;
use crate::timeout::{clear_interval, delay_to_js, set_interval};

/// Starts a count-up on every element matching `selector` that carries a
/// numeric `data-target` attribute.
///
/// Each element counts from zero to its target in `config.steps` steps, one
/// every `config.step_interval`, then shows the exact target. Elements whose
/// target does not parse are left untouched. Returns how many counters were
/// started.
pub fn start_counters(
    document: &Document,
    selector: &str,
    config: &CountUpConfig,
) -> Result<usize, JsValue> {
    let list = document.query_selector_all(selector)?;
    let mut started = 0;
    for el in html_elements(&list) {
        let Some(target) = el
            .get_attribute("data-target")
            .as_deref()
            .and_then(parse_target)
        else {
            continue;
        };
        start_one(el, CountUp::new(target, config), config);
        started += 1;
    }
    Ok(started)
}

fn start_one(el: HtmlElement, mut count: CountUp, config: &CountUpConfig) {
    let id = Rc::new(Cell::new(None::<i32>));
    let id_in_tick = Rc::clone(&id);
    let tick = Closure::wrap(Box::new(move || match count.tick() {
        Some(value) => el.set_text_content(Some(&format!("{value}"))),
        None => {
            if let Some(id) = id_in_tick.take() {
                clear_interval(id);
            }
        }
    }) as Box<dyn FnMut()>);
    id.set(Some(set_interval(
        tick.as_ref().unchecked_ref(),
        delay_to_js(config.step_interval),
    )));
    // The interval outlives this call; it clears itself after the last step.
    tick.forget();
}
