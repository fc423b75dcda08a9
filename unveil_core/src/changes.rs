// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style writes produced by one controller operation.

use crate::position::RevealPosition;

/// The style properties one operation wants written to a container's nodes.
///
/// `reveal` maps to both the overlay's `width` and the handle's `left` (as a
/// percentage); `image_width` maps to the top image's `width` in pixels.
/// Fields that are `None` are left untouched by the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SliderChanges {
    /// New reveal position for overlay and handle.
    pub reveal: Option<RevealPosition>,
    /// New pixel width for the top image.
    pub image_width: Option<f64>,
}

impl SliderChanges {
    /// Changes that only move the overlay and handle.
    #[inline]
    #[must_use]
    pub const fn reveal(position: RevealPosition) -> Self {
        Self {
            reveal: Some(position),
            image_width: None,
        }
    }

    /// Changes that only resize the top image.
    #[inline]
    #[must_use]
    pub const fn image_width(px: f64) -> Self {
        Self {
            reveal: None,
            image_width: Some(px),
        }
    }

    /// Returns `true` if there is nothing to write.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reveal.is_none() && self.image_width.is_none()
    }
}
