// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel tunables.
//!
//! [`CarouselConfig`] carries every constant the carousel's timing, gesture,
//! and styling behavior depends on. [`CarouselConfig::hero`] is the preset
//! used by the marketing site's hero section; backends may override
//! individual fields (e.g. the interval from a markup attribute) before
//! mounting.

use crate::color::Rgb;
use crate::time::Duration;

/// Configuration for a [`CarouselController`](crate::controller::CarouselController).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselConfig {
    /// Time each slide stays active before auto-advance.
    pub interval: Duration,
    /// Minimum horizontal travel, in CSS pixels, for a touch to count as a
    /// swipe.
    pub swipe_threshold: f64,
    /// How much the background color is darkened for the gradient's second
    /// stop, in percent.
    pub darken_percent: u8,
    /// Alpha byte applied to both gradient stops when the slide has a
    /// background image (`0xe6` ≈ 90%).
    pub overlay_alpha: u8,
    /// Background color used when a slide's attribute is absent or
    /// malformed.
    pub fallback_background: Rgb,
    /// Text color used when a slide's attribute is absent or malformed.
    pub fallback_text: Rgb,
}

impl CarouselConfig {
    /// Preset for the hero advertisement carousel.
    #[must_use]
    pub const fn hero() -> Self {
        Self {
            interval: Duration::from_secs(6),
            swipe_threshold: 50.0,
            darken_percent: 20,
            overlay_alpha: 0xe6,
            fallback_background: Rgb::new(0x25, 0x63, 0xeb),
            fallback_text: Rgb::WHITE,
        }
    }

    /// Returns a copy with the given auto-advance interval.
    ///
    /// A zero interval is ignored; it would re-arm the timer in a tight loop.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        if interval.millis() > 0 {
            self.interval = interval;
        }
        self
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::hero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_preset() {
        let c = CarouselConfig::hero();
        assert_eq!(c.interval, Duration::from_millis(6000));
        assert_eq!(c.darken_percent, 20);
        assert_eq!(c.fallback_background.to_hex(), "#2563eb");
        assert_eq!(c.fallback_text.to_hex(), "#ffffff");
        assert_eq!(c, CarouselConfig::default());
    }

    #[test]
    fn zero_interval_is_ignored() {
        let c = CarouselConfig::hero().with_interval(Duration::ZERO);
        assert_eq!(c.interval, Duration::from_secs(6));
        let c = CarouselConfig::hero().with_interval(Duration::from_millis(2000));
        assert_eq!(c.interval, Duration::from_millis(2000));
    }
}
