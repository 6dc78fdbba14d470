// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use marquee_core::input::{Key, Outcome};
use marquee_core::time::HostTime;
use marquee_core::timer::TimerToken;
use marquee_core::trace::{
    Cause, InputEvent, InputKind, PlaybackEvent, TimerEvent, TimerEventKind, TraceSink,
    TransitionEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_TRANSITION: u8 = 1;
const TAG_TIMER: u8 = 2;
const TAG_INPUT: u8 = 3;
const TAG_PLAYBACK: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_option_u64(&mut self, v: Option<u64>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u64(val);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_cause(&mut self, c: Cause) {
        self.write_u8(match c {
            Cause::Auto => 0,
            Cause::Previous => 1,
            Cause::Next => 2,
            Cause::Skip => 3,
            Cause::Dot => 4,
            Cause::Swipe => 5,
            Cause::Api => 6,
        });
    }

    fn write_timer_kind(&mut self, k: TimerEventKind) {
        self.write_u8(match k {
            TimerEventKind::Armed => 0,
            TimerEventKind::Cancelled => 1,
            TimerEventKind::Elapsed => 2,
            TimerEventKind::Stale => 3,
        });
    }

    /// Input kinds take two bytes: the kind and, for key presses, the key.
    fn write_input_kind(&mut self, k: InputKind) {
        let (kind, key) = match k {
            InputKind::TimerElapsed => (0, 0),
            InputKind::Previous => (1, 0),
            InputKind::Next => (2, 0),
            InputKind::Skip => (3, 0),
            InputKind::Dot => (4, 0),
            InputKind::TogglePlay => (5, 0),
            InputKind::PointerEnter => (6, 0),
            InputKind::PointerLeave => (7, 0),
            InputKind::TouchStart => (8, 0),
            InputKind::TouchEnd => (9, 0),
            InputKind::KeyDown(key) => (
                10,
                match key {
                    Key::ArrowLeft => 0,
                    Key::ArrowRight => 1,
                    Key::Space => 2,
                    Key::Other => 3,
                },
            ),
            InputKind::VisibilityChanged => (11, 0),
        };
        self.write_u8(kind);
        self.write_u8(key);
    }
}

impl TraceSink for RecorderSink {
    fn on_transition(&mut self, e: &TransitionEvent) {
        self.write_u8(TAG_TRANSITION);
        self.write_u64(e.at.millis());
        self.write_u32(e.from);
        self.write_u32(e.to);
        self.write_cause(e.cause);
    }

    fn on_timer(&mut self, e: &TimerEvent) {
        self.write_u8(TAG_TIMER);
        self.write_u64(e.at.millis());
        self.write_u64(e.token.0);
        self.write_timer_kind(e.kind);
        self.write_option_u64(e.deadline.map(HostTime::millis));
    }

    fn on_input(&mut self, e: &InputEvent) {
        self.write_u8(TAG_INPUT);
        self.write_u64(e.at.millis());
        self.write_input_kind(e.input);
        self.write_u8(u8::from(e.outcome.is_handled()));
    }

    fn on_playback(&mut self, e: &PlaybackEvent) {
        self.write_u8(TAG_PLAYBACK);
        self.write_u64(e.at.millis());
        self.write_u8(u8::from(e.playing) | (u8::from(e.countdown_running) << 1));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`TransitionEvent`].
    Transition(TransitionEvent),
    /// A [`TimerEvent`].
    Timer(TimerEvent),
    /// An [`InputEvent`].
    Input(InputEvent),
    /// A [`PlaybackEvent`].
    Playback(PlaybackEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_option_u64(&mut self) -> Option<Option<u64>> {
        let present = self.read_u8()?;
        let val = self.read_u64()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn read_cause(&mut self) -> Option<Cause> {
        Some(match self.read_u8()? {
            0 => Cause::Auto,
            1 => Cause::Previous,
            2 => Cause::Next,
            3 => Cause::Skip,
            4 => Cause::Dot,
            5 => Cause::Swipe,
            _ => Cause::Api,
        })
    }

    fn read_timer_kind(&mut self) -> Option<TimerEventKind> {
        Some(match self.read_u8()? {
            0 => TimerEventKind::Armed,
            1 => TimerEventKind::Cancelled,
            2 => TimerEventKind::Elapsed,
            _ => TimerEventKind::Stale,
        })
    }

    fn read_input_kind(&mut self) -> Option<InputKind> {
        let kind = self.read_u8()?;
        let key = self.read_u8()?;
        Some(match kind {
            0 => InputKind::TimerElapsed,
            1 => InputKind::Previous,
            2 => InputKind::Next,
            3 => InputKind::Skip,
            4 => InputKind::Dot,
            5 => InputKind::TogglePlay,
            6 => InputKind::PointerEnter,
            7 => InputKind::PointerLeave,
            8 => InputKind::TouchStart,
            9 => InputKind::TouchEnd,
            10 => InputKind::KeyDown(match key {
                0 => Key::ArrowLeft,
                1 => Key::ArrowRight,
                2 => Key::Space,
                _ => Key::Other,
            }),
            _ => InputKind::VisibilityChanged,
        })
    }

    fn decode_transition(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Transition(TransitionEvent {
            at: HostTime(self.read_u64()?),
            from: self.read_u32()?,
            to: self.read_u32()?,
            cause: self.read_cause()?,
        }))
    }

    fn decode_timer(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Timer(TimerEvent {
            at: HostTime(self.read_u64()?),
            token: TimerToken(self.read_u64()?),
            kind: self.read_timer_kind()?,
            deadline: self.read_option_u64()?.map(HostTime),
        }))
    }

    fn decode_input(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Input(InputEvent {
            at: HostTime(self.read_u64()?),
            input: self.read_input_kind()?,
            outcome: if self.read_u8()? != 0 {
                Outcome::Handled
            } else {
                Outcome::Ignored
            },
        }))
    }

    fn decode_playback(&mut self) -> Option<RecordedEvent> {
        let at = HostTime(self.read_u64()?);
        let bits = self.read_u8()?;
        Some(RecordedEvent::Playback(PlaybackEvent {
            at,
            playing: bits & 1 != 0,
            countdown_running: bits & 2 != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_TRANSITION => self.decode_transition(),
            TAG_TIMER => self.decode_timer(),
            TAG_INPUT => self.decode_input(),
            TAG_PLAYBACK => self.decode_playback(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
