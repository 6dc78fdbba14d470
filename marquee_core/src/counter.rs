// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Count-up animation for headline statistics.
//!
//! A [`CountUp`] walks from `0` to a target in a fixed number of equal steps.
//! Each [`tick`](CountUp::tick) yields the value to display: the floor of the
//! running value, and exactly the target on the last step. Backends drive it
//! with a repeating timer every [`CountUpConfig::step_interval`].

use crate::time::Duration;

/// Step count and pacing of a [`CountUp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountUpConfig {
    /// Number of increments from zero to the target. Zero is treated as one.
    pub steps: u32,
    /// Time between increments.
    pub step_interval: Duration,
}

impl CountUpConfig {
    /// Preset for the site's statistics band: 50 steps, 30 ms apart.
    #[must_use]
    pub const fn stats() -> Self {
        Self {
            steps: 50,
            step_interval: Duration::from_millis(30),
        }
    }

    /// Time from the first tick to the last.
    #[must_use]
    pub const fn total(&self) -> Duration {
        Duration::from_millis(self.step_interval.millis() * self.steps as u64)
    }
}

impl Default for CountUpConfig {
    fn default() -> Self {
        Self::stats()
    }
}

/// Parses a target attribute the way the markup writes it.
///
/// Leading whitespace is skipped and the longest run of leading ASCII digits
/// is read, so `"500+"` yields `500`. Returns `None` when there are no
/// leading digits or the value overflows.
#[must_use]
pub fn parse_target(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    trimmed[..end].parse().ok()
}

/// A running count-up from zero to a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountUp {
    target: u64,
    steps: u32,
    step: u32,
}

impl CountUp {
    /// Creates a count-up that has not ticked yet.
    #[must_use]
    pub const fn new(target: u64, config: &CountUpConfig) -> Self {
        Self {
            target,
            steps: if config.steps == 0 { 1 } else { config.steps },
            step: 0,
        }
    }

    /// The final value.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// Whether the last step has been yielded.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.step >= self.steps
    }

    /// Value currently displayed (`0` before the first tick).
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the scaled value never exceeds target, which is a u64"
    )]
    pub fn value(&self) -> u64 {
        if self.is_done() {
            return self.target;
        }
        (u128::from(self.target) * u128::from(self.step) / u128::from(self.steps)) as u64
    }

    /// Advances one step and returns the value to display, or `None` once
    /// finished.
    pub fn tick(&mut self) -> Option<u64> {
        if self.is_done() {
            return None;
        }
        self.step += 1;
        Some(self.value())
    }
}

impl Iterator for CountUp {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn reaches_exact_target_after_configured_steps() {
        let mut c = CountUp::new(1234, &CountUpConfig::stats());
        let values: Vec<u64> = c.by_ref().collect();
        assert_eq!(values.len(), 50);
        assert_eq!(values.last().copied(), Some(1234));
        assert!(c.is_done());
        assert_eq!(c.tick(), None);
    }

    #[test]
    fn values_are_floored_and_monotonic() {
        let values: Vec<u64> = CountUp::new(7, &CountUpConfig::stats()).collect();
        // 7 / 50 per step: step 7 reaches 0.98, step 8 reaches 1.12.
        assert_eq!(values[6], 0);
        assert_eq!(values[7], 1);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn zero_steps_finishes_in_one() {
        let config = CountUpConfig {
            steps: 0,
            step_interval: Duration::from_millis(30),
        };
        let values: Vec<u64> = CountUp::new(10, &config).collect();
        assert_eq!(values, [10]);
    }

    #[test]
    fn targets_parse_like_markup() {
        assert_eq!(parse_target("500"), Some(500));
        assert_eq!(parse_target("  42"), Some(42));
        assert_eq!(parse_target("500+"), Some(500));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("-3"), None);
    }

    #[test]
    fn stats_preset_runs_for_one_and_a_half_seconds() {
        assert_eq!(CountUpConfig::stats().total(), Duration::from_millis(1500));
    }
}
