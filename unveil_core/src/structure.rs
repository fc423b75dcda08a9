// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structure discovery.
//!
//! A comparison is four nodes: the container, an overlay and a handle below
//! it, and an image below the overlay. [`discover`] resolves them once at
//! attach time into a [`ContainerView`], so event handling never has to query
//! the tree again.

use core::fmt;

use crate::backend::StructureQuery;
use crate::config::Selectors;

/// The resolved nodes of one comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerView<N> {
    /// Receives press and move input; its bounds define the geometry.
    pub container: N,
    /// Clipped layer whose width encodes the reveal position.
    pub overlay: N,
    /// Draggable marker whose left offset mirrors the overlay width.
    pub handle: N,
    /// Top image inside the overlay, sized to the container's pixel width.
    pub image: N,
}

/// Which part of a comparison could not be found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MissingPart {
    /// No overlay under the container.
    Overlay,
    /// No handle under the container.
    Handle,
    /// No image under the overlay.
    Image,
}

impl MissingPart {
    /// Lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overlay => "overlay",
            Self::Handle => "handle",
            Self::Image => "image",
        }
    }
}

/// A container is missing one of its required parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StructuralError {
    /// The first part that was not found.
    pub missing: MissingPart,
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "comparison container has no {}", self.missing.as_str())
    }
}

impl core::error::Error for StructuralError {}

/// Resolves the parts of the comparison rooted at `container`.
///
/// Parts are looked up in the order overlay, handle, image; the image is
/// searched under the overlay, not the container.
///
/// # Errors
///
/// [`StructuralError`] naming the first missing part.
pub fn discover<Q: StructureQuery>(
    query: &Q,
    container: Q::Node,
    selectors: &Selectors,
) -> Result<ContainerView<Q::Node>, StructuralError> {
    let missing = |missing| StructuralError { missing };
    let overlay = query
        .find(&container, &selectors.overlay)
        .ok_or(missing(MissingPart::Overlay))?;
    let handle = query
        .find(&container, &selectors.handle)
        .ok_or(missing(MissingPart::Handle))?;
    let image = query
        .find(&overlay, &selectors.image)
        .ok_or(missing(MissingPart::Image))?;
    Ok(ContainerView {
        container,
        overlay,
        handle,
        image,
    })
}
