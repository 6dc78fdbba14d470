// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual-clock timer host.

use alloc::vec::Vec;

use marquee_core::time::{Duration, HostTime};
use marquee_core::timer::{TimerHost, TimerToken};

/// Handle of a timer scheduled on [`ManualTimers`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A scheduled, not yet fired timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTimer {
    /// Token delivered when it fires.
    pub token: TimerToken,
    /// When it fires.
    pub due: HostTime,
    id: TimerId,
}

/// One call made on the host, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerOp {
    /// `arm` was called.
    Armed {
        /// Token passed in.
        token: TimerToken,
        /// Computed due time.
        due: HostTime,
    },
    /// `cancel` was called on a timer that had not fired.
    Cancelled {
        /// Token of the cancelled timer.
        token: TimerToken,
    },
}

/// A [`TimerHost`] driven by an explicit virtual clock.
///
/// Time only moves through [`set_now`](Self::set_now) and
/// [`pop_due`](Self::pop_due); timers never fire on their own.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now: HostTime,
    pending: Vec<PendingTimer>,
    next_id: u64,
    ops: Vec<TimerOp>,
    max_live: usize,
}

impl ManualTimers {
    /// Creates a host whose clock reads `start`.
    #[must_use]
    pub fn starting_at(start: HostTime) -> Self {
        Self {
            now: start,
            ..Self::default()
        }
    }

    /// Moves the clock forward to `t`. Moving backwards is ignored.
    ///
    /// Timers that become due are not delivered; use
    /// [`pop_due`](Self::pop_due) for that.
    pub fn set_now(&mut self, t: HostTime) {
        if t > self.now {
            self.now = t;
        }
    }

    /// Removes the earliest timer due at or before `limit`, moves the clock
    /// to its due time, and returns its token.
    ///
    /// Timers due at the same instant fire in arming order.
    pub fn pop_due(&mut self, limit: HostTime) -> Option<TimerToken> {
        let (pos, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= limit)
            .min_by_key(|(_, t)| (t.due, t.id.0))?;
        let timer = self.pending.remove(pos);
        self.set_now(timer.due);
        Some(timer.token)
    }

    /// Timers scheduled and not yet fired or cancelled.
    #[must_use]
    pub fn pending(&self) -> &[PendingTimer] {
        &self.pending
    }

    /// Number of live timers.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.pending.len()
    }

    /// The largest number of simultaneously live timers ever observed.
    #[must_use]
    pub fn max_live(&self) -> usize {
        self.max_live
    }

    /// Every arm and cancel, in call order.
    #[must_use]
    pub fn ops(&self) -> &[TimerOp] {
        &self.ops
    }

    /// Number of `arm` calls so far.
    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, TimerOp::Armed { .. }))
            .count()
    }
}

impl TimerHost for ManualTimers {
    type Handle = TimerId;

    fn now(&self) -> HostTime {
        self.now
    }

    fn arm(&mut self, token: TimerToken, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        self.pending.push(PendingTimer { token, due, id });
        self.ops.push(TimerOp::Armed { token, due });
        self.max_live = self.max_live.max(self.pending.len());
        id
    }

    fn cancel(&mut self, handle: TimerId) {
        if let Some(pos) = self.pending.iter().position(|t| t.id == handle) {
            let timer = self.pending.remove(pos);
            self.ops.push(TimerOp::Cancelled { token: timer.token });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut host = ManualTimers::default();
        host.arm(TimerToken(1), Duration(300));
        host.arm(TimerToken(2), Duration(100));
        host.arm(TimerToken(3), Duration(100));

        assert_eq!(host.pop_due(HostTime(50)), None, "nothing due yet");
        assert_eq!(host.pop_due(HostTime(1000)), Some(TimerToken(2)));
        assert_eq!(host.now(), HostTime(100), "clock moves to the due time");
        assert_eq!(host.pop_due(HostTime(1000)), Some(TimerToken(3)));
        assert_eq!(host.pop_due(HostTime(1000)), Some(TimerToken(1)));
        assert_eq!(host.pop_due(HostTime(1000)), None);
        assert_eq!(host.max_live(), 3);
    }

    #[test]
    fn cancel_removes_pending() {
        let mut host = ManualTimers::starting_at(HostTime(10));
        let id = host.arm(TimerToken(7), Duration(5));
        host.cancel(id);
        host.cancel(id);
        assert_eq!(host.live_count(), 0);
        assert_eq!(
            host.ops(),
            [
                TimerOp::Armed {
                    token: TimerToken(7),
                    due: HostTime(15),
                },
                TimerOp::Cancelled {
                    token: TimerToken(7),
                },
            ],
            "a second cancel is a no-op"
        );
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut host = ManualTimers::starting_at(HostTime(100));
        host.set_now(HostTime(50));
        assert_eq!(host.now(), HostTime(100));
    }
}
