// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic simulation harness for carousels.
//!
//! Runs a [`CarouselController`](marquee_core::controller::CarouselController)
//! against a virtual clock, so timing behavior can be tested without waiting
//! on wall-clock time:
//!
//! - [`ManualTimers`] is a [`TimerHost`](marquee_core::timer::TimerHost) whose
//!   timers fire only when the simulation advances the clock.
//! - [`RecordingRenderer`] is a [`Renderer`](marquee_core::backend::Renderer)
//!   that keeps a model of what a DOM renderer would show.
//! - [`Simulation`] ties them together and delivers due timers in order.

#![no_std]

extern crate alloc;

mod recorder;
mod sim;
mod timers;

pub use recorder::RecordingRenderer;
pub use sim::{Simulation, SimulatedCarousel};
pub use timers::{ManualTimers, PendingTimer, TimerId, TimerOp};
