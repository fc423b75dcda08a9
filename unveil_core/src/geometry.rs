// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container geometry and the pointer-to-position mapping.
//!
//! The only arithmetic in a comparison slider is turning an absolute pointer
//! coordinate into a percentage of the container's width:
//!
//! ```text
//! position = clamp(((pointer_x - left) / width) * 100, 0, 100)
//! ```
//!
//! [`ContainerGeometry::reveal_at`] does exactly that and refuses inputs that
//! would leak NaN or infinities into style values.

use core::fmt;

use kurbo::Rect;

use crate::position::RevealPosition;

/// Horizontal extent of a container in the host's viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerGeometry {
    /// Left edge, in the same space as pointer client coordinates.
    pub left: f64,
    /// Rendered width in pixels.
    pub width: f64,
}

impl ContainerGeometry {
    /// Creates geometry from a left edge and a width.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Takes the horizontal extent of a bounding rectangle.
    #[inline]
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            left: rect.x0,
            width: rect.width(),
        }
    }

    /// Maps an absolute pointer coordinate to a clamped reveal position.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::DegenerateWidth`] if the width is zero, negative or
    ///   not finite (e.g. the container is hidden or not laid out yet).
    /// - [`GeometryError::NonFiniteLeft`] if the left edge is NaN or infinite.
    /// - [`GeometryError::NonFinitePointer`] if `pointer_x` is NaN or infinite.
    pub fn reveal_at(self, pointer_x: f64) -> Result<RevealPosition, GeometryError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(GeometryError::DegenerateWidth(self.width));
        }
        if !self.left.is_finite() {
            return Err(GeometryError::NonFiniteLeft(self.left));
        }
        if !pointer_x.is_finite() {
            return Err(GeometryError::NonFinitePointer(pointer_x));
        }
        let raw = ((pointer_x - self.left) / self.width) * 100.0;
        RevealPosition::clamped(raw).ok_or(GeometryError::NonFinitePointer(pointer_x))
    }
}

/// A container's geometry cannot produce a usable style value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryError {
    /// Container width is zero, negative or not finite.
    DegenerateWidth(f64),
    /// Container left edge is NaN or infinite.
    NonFiniteLeft(f64),
    /// Pointer coordinate is NaN or infinite.
    NonFinitePointer(f64),
    /// Rendered pixel width for the top image is negative or not finite.
    InvalidImageWidth(f64),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateWidth(w) => write!(f, "container width {w} cannot be divided by"),
            Self::NonFiniteLeft(x) => write!(f, "container left edge {x} is not finite"),
            Self::NonFinitePointer(x) => write!(f, "pointer coordinate {x} is not finite"),
            Self::InvalidImageWidth(w) => write!(f, "image width {w}px is not a valid length"),
        }
    }
}

impl core::error::Error for GeometryError {}

/// Validates a rendered container width for use as the top image's width.
///
/// Zero is accepted: a hidden container legitimately measures `0px`, and a
/// later resize brings the image back in sync.
///
/// # Errors
///
/// [`GeometryError::InvalidImageWidth`] for negative or non-finite widths.
pub fn image_width(container_width: f64) -> Result<f64, GeometryError> {
    if container_width.is_finite() && container_width >= 0.0 {
        Ok(container_width)
    } else {
        Err(GeometryError::InvalidImageWidth(container_width))
    }
}
