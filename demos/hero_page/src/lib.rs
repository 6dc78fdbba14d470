// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hero carousel demo.
//!
//! Mounts the stock hero carousel on `index.html`, logging trace events to
//! the console, and starts the statistic count-ups.
//!
//! Build with: `wasm-pack build --target web demos/hero_page`
//! Then serve `demos/hero_page/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;

use marquee_backend_web::{ConsoleSink, DomSelectors, mount_hero_with, start_counters};
use marquee_core::config::CarouselConfig;
use marquee_core::counter::CountUpConfig;
use wasm_bindgen::prelude::*;

/// Entry point for the hero demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let selectors = DomSelectors::hero();
    let mounted = mount_hero_with(
        &document,
        selectors,
        CarouselConfig::hero(),
        Some(Box::new(ConsoleSink::new())),
    )?;
    if mounted.is_none() {
        web_sys::console::warn_1(&JsValue::from_str("hero_page: no slides to rotate"));
    }

    start_counters(&document, selectors.stat_number, &CountUpConfig::stats())?;
    Ok(())
}
