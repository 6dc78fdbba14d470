// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each armed countdown becomes an async span (`b`/`e`, keyed by its token)
//! that ends when the timer elapses or is cancelled, so pauses and restarts
//! are visible at a glance. Transitions, stale fires, and inputs are instant
//! events; playback state is a counter track.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use marquee_core::time::HostTime;
use marquee_core::trace::TimerEventKind;

use crate::pretty::{cause_name, timer_kind_name};
use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Transition(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Transition",
                    "cat": "Slides",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "from": e.from,
                        "to": e.to,
                        "cause": cause_name(e.cause),
                    }
                }));
            }
            RecordedEvent::Timer(e) => {
                let (ph, name) = match e.kind {
                    TimerEventKind::Armed => ("b", "Countdown"),
                    TimerEventKind::Cancelled | TimerEventKind::Elapsed => ("e", "Countdown"),
                    TimerEventKind::Stale => ("i", "StaleFire"),
                };
                let mut event = json!({
                    "ph": ph,
                    "name": name,
                    "cat": "Timer",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": 1,
                    "id": e.token.0,
                    "args": {
                        "kind": timer_kind_name(e.kind),
                    }
                });
                if let Some(deadline) = e.deadline {
                    event["args"]["deadline_ms"] = json!(deadline.millis());
                }
                if ph == "i" {
                    event["s"] = json!("t");
                }
                events.push(event);
            }
            RecordedEvent::Input(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.input),
                    "cat": "Input",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": 2,
                    "s": "t",
                    "args": {
                        "handled": e.outcome.is_handled(),
                    }
                }));
            }
            RecordedEvent::Playback(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": "Playback",
                    "cat": "Timer",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "playing": u8::from(e.playing),
                        "running": u8::from(e.countdown_running),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_us(t: HostTime) -> u64 {
    t.millis().saturating_mul(1_000)
}
