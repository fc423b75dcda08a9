// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider identity.

use core::fmt;

/// A handle to a slider in a [`SliderSet`](crate::set::SliderSet).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a slider is detached and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliderId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl SliderId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for SliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SliderId({}@gen{})", self.idx, self.generation)
    }
}

impl fmt::Display for SliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.idx, self.generation)
    }
}
