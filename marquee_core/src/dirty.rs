// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! [`CarouselState`](crate::state::CarouselState) records per-slide changes
//! on independent [`understory_dirty`] channels keyed by slide index. Both
//! channels are local-only: marking a slide never marks another.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`CarouselState::evaluate`](crate::state::CarouselState::evaluate) call
//! drains all channels and surfaces the results as
//! [`CarouselChanges`](crate::state::CarouselChanges), which backends
//! [consume](crate::backend::Renderer::apply).

use understory_dirty::Channel;

/// The slide's active marker changed (it became active or stopped being
/// active). Also marked when the active slide is re-selected, so its
/// progress indicator restarts.
pub const ACTIVE: Channel = Channel::new(0);

/// The slide's resolved style has not been applied yet.
pub const STYLE: Channel = Channel::new(1);
