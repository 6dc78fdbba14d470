// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace output on the browser console.

use alloc::format;

use marquee_core::trace::{
    InputEvent, PlaybackEvent, TimerEvent, TimerEventKind, TraceSink, TransitionEvent,
};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that logs one `console.debug` line per event.
///
/// Only produces output when `marquee_core` is built with the `trace`
/// feature (enable this crate's `trace` feature).
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Creates a console sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn log(line: &str) {
    web_sys::console::debug_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_transition(&mut self, e: &TransitionEvent) {
        log(&format!(
            "[marquee] slide {} -> {} ({:?}) at {}ms",
            e.from,
            e.to,
            e.cause,
            e.at.millis()
        ));
    }

    fn on_timer(&mut self, e: &TimerEvent) {
        let kind = match e.kind {
            TimerEventKind::Armed => "armed",
            TimerEventKind::Cancelled => "cancelled",
            TimerEventKind::Elapsed => "elapsed",
            TimerEventKind::Stale => "stale",
        };
        log(&format!(
            "[marquee] timer {kind} token={} at {}ms",
            e.token.0,
            e.at.millis()
        ));
    }

    fn on_input(&mut self, e: &InputEvent) {
        log(&format!(
            "[marquee] input {:?} -> {:?} at {}ms",
            e.input,
            e.outcome,
            e.at.millis()
        ));
    }

    fn on_playback(&mut self, e: &PlaybackEvent) {
        log(&format!(
            "[marquee] playing={} running={} at {}ms",
            e.playing,
            e.countdown_running,
            e.at.millis()
        ));
    }
}
