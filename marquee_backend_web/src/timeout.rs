// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout` timer host.
//!
//! [`TimeoutHost`] implements [`TimerHost`] with the browser's one-shot
//! timers. A single JS closure is registered for every timer; the timer's
//! [`TimerToken`] travels as the extra `setTimeout` argument, so the closure
//! can report which timer fired without allocating per arm.

use alloc::boxed::Box;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use marquee_core::time::{Duration, HostTime};
use marquee_core::timer::{TimerHost, TimerToken};

// Direct global bindings instead of `web_sys::Window` methods, so arming a
// timer does not fetch (and unwrap) the Window object.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout_with_arg(handler: &JsValue, timeout_ms: i32, arg: f64) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);

    #[wasm_bindgen(js_name = "setInterval")]
    pub(crate) fn set_interval(handler: &JsValue, timeout_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearInterval")]
    pub(crate) fn clear_interval(id: i32);
}

type TimeoutClosure = Closure<dyn FnMut(f64)>;

/// A [`TimerHost`] backed by `setTimeout`/`clearTimeout`.
///
/// Create with [`TimeoutHost::new`], passing the function that should
/// receive fired tokens (normally one that forwards
/// [`CarouselInput::TimerElapsed`](marquee_core::input::CarouselInput::TimerElapsed)
/// to the controller).
pub struct TimeoutHost {
    closure: TimeoutClosure,
}

impl core::fmt::Debug for TimeoutHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimeoutHost").finish_non_exhaustive()
    }
}

impl TimeoutHost {
    /// Creates a host whose timers call `on_fire` with their token.
    pub fn new(mut on_fire: impl FnMut(TimerToken) + 'static) -> Self {
        let closure = Closure::wrap(Box::new(move |raw: f64| {
            on_fire(token_from_js(raw));
        }) as Box<dyn FnMut(f64)>);
        Self { closure }
    }
}

impl TimerHost for TimeoutHost {
    type Handle = i32;

    fn now(&self) -> HostTime {
        crate::now()
    }

    fn arm(&mut self, token: TimerToken, delay: Duration) -> i32 {
        set_timeout_with_arg(
            self.closure.as_ref().unchecked_ref(),
            delay_to_js(delay),
            token_to_js(token),
        )
    }

    fn cancel(&mut self, handle: i32) {
        clear_timeout(handle);
    }
}

/// Clamps a delay to the range `setTimeout` accepts.
pub(crate) fn delay_to_js(delay: Duration) -> i32 {
    i32::try_from(delay.millis()).unwrap_or(i32::MAX)
}

/// Tokens below 2^53 survive the trip through a JS number exactly.
#[expect(
    clippy::cast_precision_loss,
    reason = "token counters stay far below 2^53"
)]
fn token_to_js(token: TimerToken) -> f64 {
    token.0 as f64
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value was produced by token_to_js"
)]
fn token_from_js(raw: f64) -> TimerToken {
    TimerToken(raw as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_cross_the_js_boundary_exactly() {
        for t in [0_u64, 1, 6_000, (1 << 53) - 1] {
            assert_eq!(token_from_js(token_to_js(TimerToken(t))), TimerToken(t));
        }
    }

    #[test]
    fn delays_are_clamped() {
        assert_eq!(delay_to_js(Duration::from_secs(6)), 6_000);
        assert_eq!(delay_to_js(Duration(u64::MAX)), i32::MAX);
    }
}
