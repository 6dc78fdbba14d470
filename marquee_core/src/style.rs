// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-slide style resolution.
//!
//! Each slide declares up to three attributes in markup: a background color,
//! a text color, and an image URL. [`StyleResolver::resolve`] turns those
//! into a [`SlideStyle`] once, at mount; nothing is recomputed on transitions.
//!
//! The treatment is:
//!
//! - a 135° gradient from the background color to the background darkened by
//!   [`CarouselConfig::darken_percent`],
//! - composited at [`CarouselConfig::overlay_alpha`] over the image, with
//!   `cover` sizing, centered, in `overlay` blend mode, when an image is set,
//! - primary actions inverted (fill = text color, label = background color),
//! - outline actions transparent with border and label in the text color.

use alloc::format;
use alloc::string::String;

use crate::color::Rgb;
use crate::config::CarouselConfig;

/// Raw per-slide attributes as found in markup.
///
/// Every field is optional; absent or malformed values fall back to the
/// configured defaults during resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideSpec {
    /// Background color attribute, expected as `#rrggbb`.
    pub background_color: Option<String>,
    /// Text color attribute, expected as `#rrggbb`.
    pub text_color: Option<String>,
    /// Background image URL.
    pub image_url: Option<String>,
}

impl SlideSpec {
    /// Creates a spec with both colors set and no image.
    #[must_use]
    pub fn colors(background: &str, text: &str) -> Self {
        Self {
            background_color: Some(background.into()),
            text_color: Some(text.into()),
            image_url: None,
        }
    }

    /// Returns a copy with the given image URL.
    #[must_use]
    pub fn with_image(mut self, url: &str) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// How a slide's background is painted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Background {
    /// A diagonal gradient between two opaque stops.
    Gradient {
        /// First stop (the slide's background color).
        from: Rgb,
        /// Second stop (the darkened background color).
        to: Rgb,
    },
    /// A translucent diagonal gradient composited over an image.
    ImageOverlay {
        /// First stop.
        from: Rgb,
        /// Second stop.
        to: Rgb,
        /// Alpha byte applied to both stops.
        alpha: u8,
        /// Image URL.
        url: String,
    },
}

impl Background {
    /// Returns the CSS `background` shorthand value.
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::Gradient { from, to } => format!("linear-gradient(135deg, {from}, {to})"),
            Self::ImageOverlay {
                from,
                to,
                alpha,
                url,
            } => format!(
                "linear-gradient(135deg, {}, {}), url('{}')",
                from.to_hex_with_alpha(*alpha),
                to.to_hex_with_alpha(*alpha),
                escape_css_url(url),
            ),
        }
    }

    /// Whether the background carries an image layer.
    #[must_use]
    pub fn has_image(&self) -> bool {
        matches!(self, Self::ImageOverlay { .. })
    }
}

/// Colors for an action element inside a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionStyle {
    /// Fill color; `None` means transparent.
    pub fill: Option<Rgb>,
    /// Label (foreground) color.
    pub label: Rgb,
    /// Border color, if the element draws one.
    pub border: Option<Rgb>,
}

/// The display treatment computed for one slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideStyle {
    /// Resolved background color.
    pub background_color: Rgb,
    /// Background color darkened for the gradient's second stop.
    pub darkened_accent: Rgb,
    /// Resolved text color.
    pub text_color: Rgb,
    /// Background painting.
    pub background: Background,
    /// Treatment for primary action elements.
    pub primary_action: ActionStyle,
    /// Treatment for outline action elements.
    pub outline_action: ActionStyle,
}

/// Computes [`SlideStyle`]s from [`SlideSpec`]s.
#[derive(Clone, Copy, Debug)]
pub struct StyleResolver {
    darken_percent: u8,
    overlay_alpha: u8,
    fallback_background: Rgb,
    fallback_text: Rgb,
}

impl StyleResolver {
    /// Creates a resolver using the styling fields of `config`.
    #[must_use]
    pub const fn new(config: &CarouselConfig) -> Self {
        Self {
            darken_percent: config.darken_percent,
            overlay_alpha: config.overlay_alpha,
            fallback_background: config.fallback_background,
            fallback_text: config.fallback_text,
        }
    }

    /// Resolves one slide's treatment.
    #[must_use]
    pub fn resolve(&self, spec: &SlideSpec) -> SlideStyle {
        let bg = parse_or(spec.background_color.as_deref(), self.fallback_background);
        let fg = parse_or(spec.text_color.as_deref(), self.fallback_text);
        let dark = bg.darken(self.darken_percent);

        let background = match spec.image_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Background::ImageOverlay {
                from: bg,
                to: dark,
                alpha: self.overlay_alpha,
                url: url.into(),
            },
            _ => Background::Gradient { from: bg, to: dark },
        };

        SlideStyle {
            background_color: bg,
            darkened_accent: dark,
            text_color: fg,
            background,
            primary_action: ActionStyle {
                fill: Some(fg),
                label: bg,
                border: None,
            },
            outline_action: ActionStyle {
                fill: None,
                label: fg,
                border: Some(fg),
            },
        }
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new(&CarouselConfig::hero())
    }
}

fn parse_or(attr: Option<&str>, fallback: Rgb) -> Rgb {
    attr.and_then(Rgb::parse_hex).unwrap_or(fallback)
}

/// Escapes characters that would terminate a single-quoted CSS `url()`.
fn escape_css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\'' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' | '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_gradient_without_image() {
        let style = StyleResolver::default().resolve(&SlideSpec::colors("#2563eb", "#ffffff"));
        assert_eq!(
            style.background,
            Background::Gradient {
                from: Rgb::new(0x25, 0x63, 0xeb),
                to: Rgb::new(0x1d, 0x4f, 0xbc),
            }
        );
        assert_eq!(
            style.background.css(),
            "linear-gradient(135deg, #2563eb, #1d4fbc)"
        );
        assert!(!style.background.has_image());
    }

    #[test]
    fn image_overlay_uses_translucent_stops() {
        let spec = SlideSpec::colors("#ff0000", "#000000").with_image("/static/ad.webp");
        let style = StyleResolver::default().resolve(&spec);
        assert!(style.background.has_image());
        assert_eq!(
            style.background.css(),
            "linear-gradient(135deg, #ff0000e6, #cc0000e6), url('/static/ad.webp')"
        );
    }

    #[test]
    fn blank_image_url_is_ignored() {
        let spec = SlideSpec::colors("#ff0000", "#000000").with_image("   ");
        let style = StyleResolver::default().resolve(&spec);
        assert!(!style.background.has_image());
    }

    #[test]
    fn missing_and_malformed_colors_fall_back() {
        let resolver = StyleResolver::default();
        let style = resolver.resolve(&SlideSpec::default());
        assert_eq!(style.background_color.to_hex(), "#2563eb");
        assert_eq!(style.text_color.to_hex(), "#ffffff");

        let style = resolver.resolve(&SlideSpec::colors("red", "#12"));
        assert_eq!(style.background_color.to_hex(), "#2563eb");
        assert_eq!(style.text_color.to_hex(), "#ffffff");
    }

    #[test]
    fn actions_invert_and_outline() {
        let style = StyleResolver::default().resolve(&SlideSpec::colors("#101010", "#fafafa"));
        let bg = Rgb::new(0x10, 0x10, 0x10);
        let fg = Rgb::new(0xfa, 0xfa, 0xfa);
        assert_eq!(style.primary_action.fill, Some(fg));
        assert_eq!(style.primary_action.label, bg);
        assert_eq!(style.outline_action.fill, None);
        assert_eq!(style.outline_action.label, fg);
        assert_eq!(style.outline_action.border, Some(fg));
    }

    #[test]
    fn quotes_in_image_url_are_escaped() {
        let spec = SlideSpec::default().with_image("a'b.png");
        let css = StyleResolver::default().resolve(&spec).background.css();
        assert!(css.ends_with(r"url('a\'b.png')"), "got: {css}");
    }
}
