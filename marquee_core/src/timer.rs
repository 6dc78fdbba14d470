// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-advance timer ownership.
//!
//! A [`TimerHost`] is the platform's one-shot timer facility (`setTimeout` in
//! a browser, a virtual clock in tests). [`Countdown`] wraps a host and owns
//! at most one live timer:
//!
//! - [`arm`](Countdown::arm) always cancels the live timer before arming a
//!   new one, so two timers never tick for the same carousel.
//! - Every armed timer carries a fresh [`TimerToken`]. When a timer fires the
//!   host reports its token, and [`claim`](Countdown::claim) accepts it only
//!   if it is still the live one. A callback that was already queued when its
//!   timer was cancelled is rejected as stale.
//!
//! Self-rescheduling (advance, then arm again) is done by the controller on
//! each claimed fire, never by the host.

use core::fmt;

use crate::time::{Duration, HostTime};

/// Identifies one armed timer.
///
/// Tokens are issued in increasing order by a [`Countdown`] and never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimerToken(pub u64);

impl fmt::Debug for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerToken({})", self.0)
    }
}

/// A platform one-shot timer facility.
///
/// Implementations schedule a callback that, after `delay`, delivers
/// [`CarouselInput::TimerElapsed`](crate::input::CarouselInput::TimerElapsed)
/// carrying the token passed to [`arm`](Self::arm) back to the controller.
pub trait TimerHost {
    /// Handle used to cancel a scheduled timer.
    type Handle;

    /// Current time on the host's monotonic clock.
    fn now(&self) -> HostTime;

    /// Schedules a one-shot timer.
    fn arm(&mut self, token: TimerToken, delay: Duration) -> Self::Handle;

    /// Cancels a scheduled timer. Cancelling a timer that already fired is a
    /// no-op.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Result of [`Countdown::arm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Armed {
    /// Token of the newly armed timer.
    pub token: TimerToken,
    /// Token of the timer that was cancelled to make room, if any.
    pub replaced: Option<TimerToken>,
    /// When the new timer is due.
    pub deadline: HostTime,
}

struct LiveTimer<T> {
    token: TimerToken,
    handle: T,
    deadline: HostTime,
}

/// Owns the single auto-advance timer of one carousel.
pub struct Countdown<H: TimerHost> {
    host: H,
    interval: Duration,
    live: Option<LiveTimer<H::Handle>>,
    next_token: u64,
}

impl<H: TimerHost> fmt::Debug for Countdown<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Countdown")
            .field("interval", &self.interval)
            .field("live", &self.live.as_ref().map(|t| t.token))
            .field("deadline", &self.live.as_ref().map(|t| t.deadline))
            .field("next_token", &self.next_token)
            .finish_non_exhaustive()
    }
}

impl<H: TimerHost> Countdown<H> {
    /// Creates a disarmed countdown.
    #[must_use]
    pub fn new(host: H, interval: Duration) -> Self {
        Self {
            host,
            interval,
            live: None,
            next_token: 1,
        }
    }

    /// The full interval every arm counts down from.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current host time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.host.now()
    }

    /// Cancels the live timer (if any), then arms a new one for the full
    /// interval.
    pub fn arm(&mut self) -> Armed {
        let replaced = self.disarm();
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let deadline = self.host.now().saturating_add(self.interval);
        let handle = self.host.arm(token, self.interval);
        self.live = Some(LiveTimer {
            token,
            handle,
            deadline,
        });
        Armed {
            token,
            replaced,
            deadline,
        }
    }

    /// Cancels the live timer. Returns its token, or `None` if nothing was
    /// armed.
    pub fn disarm(&mut self) -> Option<TimerToken> {
        let live = self.live.take()?;
        self.host.cancel(live.handle);
        Some(live.token)
    }

    /// Accepts a fired timer if `token` is the live one.
    ///
    /// On success the countdown is left disarmed (the timer is spent). Stale
    /// tokens leave the live timer untouched.
    pub fn claim(&mut self, token: TimerToken) -> bool {
        match &self.live {
            Some(live) if live.token == token => {
                self.live = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a timer is live.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.live.is_some()
    }

    /// Token of the live timer.
    #[must_use]
    pub fn live_token(&self) -> Option<TimerToken> {
        self.live.as_ref().map(|t| t.token)
    }

    /// When the live timer is due.
    #[must_use]
    pub fn deadline(&self) -> Option<HostTime> {
        self.live.as_ref().map(|t| t.deadline)
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    ///
    /// Scheduling through this reference bypasses the single-timer
    /// bookkeeping; it is meant for inspection and virtual-clock control.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
