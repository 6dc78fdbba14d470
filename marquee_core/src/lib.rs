// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State machine, timing contract, and style resolution for hero carousels.
//!
//! `marquee_core` contains everything about a rotating promotional carousel
//! that does not touch a platform API. It is `no_std` compatible (with
//! `alloc`); timers and presentation are injected through traits so the whole
//! component can be driven deterministically in tests.
//!
//! # Architecture
//!
//! ```text
//!   Backend input (click, key, touch, timer fire)
//!       │
//!       ▼
//!   CarouselInput ──► CarouselController::handle()
//!                          │            │
//!                          │            └──► Countdown (cancel-then-arm)
//!                          ▼                        │
//!                   CarouselState::go_to()          ▼
//!                          │                  TimerHost::arm()
//!                          ▼
//!   CarouselState::evaluate() ──► CarouselChanges ──► Renderer::apply()
//! ```
//!
//! **[`color`]**: Hex parsing and the percentage darkening used for gradient
//! contrast.
//!
//! **[`style`]**: Resolves per-slide declarative attributes into a
//! [`SlideStyle`](style::SlideStyle), once, at mount.
//!
//! **[`deck`]**: The immutable ordered sequence of slides.
//!
//! **[`state`]**: The slide state machine. `go_to` is the only mutator of
//! the active index; changes are tracked on dirty channels and drained by
//! [`CarouselState::evaluate`](state::CarouselState::evaluate).
//!
//! **[`timer`]**: The [`TimerHost`](timer::TimerHost) trait and the
//! [`Countdown`](timer::Countdown) that guarantees at most one live timer.
//!
//! **[`input`]**: Input events, keys, swipe detection, viewport gating.
//!
//! **[`controller`]**: Translates input into transitions and timer
//! operations, then renders.
//!
//! **[`backend`]**: The [`Renderer`](backend::Renderer) trait that platform
//! backends implement.
//!
//! **[`counter`]**: Stepped count-up animation for statistic readouts.
//!
//! **[`config`]**: Tunables with `const` presets.
//!
//! **[`time`]**: Millisecond `HostTime` and `Duration`.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! carousel instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod color;
pub mod config;
pub mod controller;
pub mod counter;
pub mod deck;
pub mod dirty;
pub mod input;
pub mod state;
pub mod style;
pub mod time;
pub mod timer;
pub mod trace;
