// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hex colors and percentage darkening.
//!
//! Slide colors arrive as `#rrggbb` strings in markup attributes. [`Rgb`]
//! parses them, darkens them for gradient contrast, and re-encodes them as
//! lowercase hex, optionally with an alpha byte appended (`#rrggbbaa`).
//!
//! Only the six-digit form is understood. Anything else fails to parse and
//! callers substitute their configured fallback.

use alloc::string::String;
use core::fmt;
use core::fmt::Write as _;

/// An opaque 8-bit-per-channel color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    /// Creates a color from its channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb` (either case).
    ///
    /// Returns `None` for any other length or for non-hex digits.
    #[must_use]
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
        let bytes = digits.as_bytes();
        if bytes.len() != 6 {
            return None;
        }
        Some(Self {
            r: hex_pair(bytes[0], bytes[1])?,
            g: hex_pair(bytes[2], bytes[3])?,
            b: hex_pair(bytes[4], bytes[5])?,
        })
    }

    /// Scales every channel by `(100 - percent) / 100`, rounding down.
    ///
    /// `percent` saturates at 100, so the result never leaves `0..=255`.
    #[must_use]
    pub const fn darken(self, percent: u8) -> Self {
        let percent = if percent > 100 { 100 } else { percent };
        let keep = 100 - percent as u16;
        Self {
            r: scale(self.r, keep),
            g: scale(self.g, keep),
            b: scale(self.b, keep),
        }
    }

    /// Encodes as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        let mut out = String::with_capacity(7);
        let _ = write!(out, "{self}");
        out
    }

    /// Encodes as lowercase `#rrggbbaa`.
    #[must_use]
    pub fn to_hex_with_alpha(self, alpha: u8) -> String {
        let mut out = String::with_capacity(9);
        let _ = write!(out, "{self}{alpha:02x}");
        out
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({self})")
    }
}

/// Darkens a hex color string by `percent`.
///
/// Returns `None` when `hex` is not a six-digit hex color.
#[must_use]
pub fn darken(hex: &str, percent: u8) -> Option<String> {
    Rgb::parse_hex(hex).map(|c| c.darken(percent).to_hex())
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "channel * keep / 100 is at most 255 because keep <= 100"
)]
const fn scale(channel: u8, keep: u16) -> u8 {
    (channel as u16 * keep / 100) as u8
}

const fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    Some((hex_digit(hi)? << 4) | hex_digit(lo)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_brand_blue_by_twenty_percent() {
        // 0x25*0.8 = 29.6, 0x63*0.8 = 79.2, 0xeb*0.8 = 188.0 → floor
        assert_eq!(darken("#2563eb", 20).as_deref(), Some("#1d4fbc"));
    }

    #[test]
    fn darken_zero_is_identity_ignoring_case() {
        for hex in ["#2563EB", "#ffffff", "#000000", "#a1B2c3"] {
            let out = darken(hex, 0).expect("valid hex");
            assert!(out.eq_ignore_ascii_case(hex), "{hex} became {out}");
        }
    }

    #[test]
    fn darken_hundred_is_black() {
        assert_eq!(darken("#ffffff", 100).as_deref(), Some("#000000"));
        assert_eq!(darken("#2563eb", 100).as_deref(), Some("#000000"));
        assert_eq!(darken("#2563eb", 250).as_deref(), Some("#000000"));
    }

    #[test]
    fn parse_accepts_optional_hash() {
        assert_eq!(Rgb::parse_hex("2563eb"), Some(Rgb::new(0x25, 0x63, 0xeb)));
        assert_eq!(Rgb::parse_hex(" #FFFFFF "), Some(Rgb::WHITE));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(Rgb::parse_hex("#fff"), None);
        assert_eq!(Rgb::parse_hex("#12345g"), None);
        assert_eq!(Rgb::parse_hex("#1234567"), None);
        assert_eq!(Rgb::parse_hex(""), None);
        assert_eq!(darken("blue", 20), None);
    }

    #[test]
    fn alpha_suffix() {
        assert_eq!(Rgb::new(0x25, 0x63, 0xeb).to_hex_with_alpha(0xe6), "#2563ebe6");
        assert_eq!(Rgb::BLACK.to_hex_with_alpha(0x0a), "#0000000a");
    }
}
