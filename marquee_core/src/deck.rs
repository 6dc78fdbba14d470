// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered, immutable sequence of slides.

use alloc::vec::Vec;

use crate::style::{SlideSpec, SlideStyle, StyleResolver};

/// One promotional slide with its resolved treatment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    index: u32,
    spec: SlideSpec,
    style: SlideStyle,
}

impl Slide {
    /// Position in the deck (0-based).
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// The attributes the slide was declared with.
    #[must_use]
    pub const fn spec(&self) -> &SlideSpec {
        &self.spec
    }

    /// The treatment resolved at mount.
    #[must_use]
    pub const fn style(&self) -> &SlideStyle {
        &self.style
    }
}

/// An immutable, contiguously indexed list of [`Slide`]s.
///
/// Indices are `0..len()`, assigned in declaration order. Slides are never
/// added or removed after construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    /// Builds a deck, resolving each slide's style once.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` slides are supplied.
    #[must_use]
    pub fn new(specs: impl IntoIterator<Item = SlideSpec>, resolver: &StyleResolver) -> Self {
        let slides = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Slide {
                index: u32::try_from(i).expect("slide count exceeds u32::MAX"),
                style: resolver.resolve(&spec),
                spec,
            })
            .collect();
        Self { slides }
    }

    /// Number of slides.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "construction guarantees the length fits in u32"
    )]
    pub fn len(&self) -> u32 {
        self.slides.len() as u32
    }

    /// Whether the deck has no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Whether the deck rotates (more than one slide).
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.slides.len() > 1
    }

    /// Returns the slide at `index`.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&Slide> {
        self.slides.get(index as usize)
    }

    /// Iterates slides in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Slide> {
        self.slides.iter()
    }
}

impl<'a> IntoIterator for &'a SlideDeck {
    type Item = &'a Slide;
    type IntoIter = core::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}
