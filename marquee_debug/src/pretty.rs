// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use marquee_core::input::Outcome;
use marquee_core::trace::{
    Cause, InputEvent, PlaybackEvent, TimerEvent, TimerEventKind, TraceSink, TransitionEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub(crate) fn cause_name(cause: Cause) -> &'static str {
    match cause {
        Cause::Auto => "auto",
        Cause::Previous => "prev",
        Cause::Next => "next",
        Cause::Skip => "skip",
        Cause::Dot => "dot",
        Cause::Swipe => "swipe",
        Cause::Api => "api",
    }
}

pub(crate) fn timer_kind_name(kind: TimerEventKind) -> &'static str {
    match kind {
        TimerEventKind::Armed => "armed",
        TimerEventKind::Cancelled => "cancelled",
        TimerEventKind::Elapsed => "elapsed",
        TimerEventKind::Stale => "stale",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_transition(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[slide] {} -> {} ({}) at {}ms",
            e.from,
            e.to,
            cause_name(e.cause),
            e.at.millis(),
        );
    }

    fn on_timer(&mut self, e: &TimerEvent) {
        match e.deadline {
            Some(deadline) => {
                let _ = writeln!(
                    self.writer,
                    "[timer:{}] token={} at {}ms due {}ms",
                    timer_kind_name(e.kind),
                    e.token.0,
                    e.at.millis(),
                    deadline.millis(),
                );
            }
            None => {
                let _ = writeln!(
                    self.writer,
                    "[timer:{}] token={} at {}ms",
                    timer_kind_name(e.kind),
                    e.token.0,
                    e.at.millis(),
                );
            }
        }
    }

    fn on_input(&mut self, e: &InputEvent) {
        let outcome = match e.outcome {
            Outcome::Handled => "handled",
            Outcome::Ignored => "ignored",
        };
        let _ = writeln!(
            self.writer,
            "[input] {:?} {outcome} at {}ms",
            e.input,
            e.at.millis(),
        );
    }

    fn on_playback(&mut self, e: &PlaybackEvent) {
        let state = match (e.playing, e.countdown_running) {
            (true, true) => "running",
            (true, false) => "suspended",
            (false, _) => "paused",
        };
        let _ = writeln!(self.writer, "[playback] {state} at {}ms", e.at.millis());
    }
}
