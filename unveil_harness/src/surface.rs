// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording slider surface.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use core::cell::Cell;

use kurbo::Rect;
use unveil_core::backend::SliderSurface;
use unveil_core::changes::SliderChanges;

/// Container layout as a browser would report it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FakeLayout {
    /// Bounding rectangle in client coordinates.
    pub bounds: Rect,
    /// Rendered width in pixels.
    pub rendered_width: f64,
}

impl FakeLayout {
    /// Layout whose rendered width equals the width of `bounds`.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            rendered_width: bounds.width(),
        }
    }
}

/// A [`SliderSurface`] that keeps the inline style values a browser would
/// receive.
///
/// Styles are stored as the exact CSS strings written, so tests can assert on
/// `"50%"` and `"400px"` rather than on numbers.
#[derive(Clone, Debug)]
pub struct FakeSurface {
    layout: Rc<Cell<FakeLayout>>,
    overlay_width: Option<String>,
    handle_left: Option<String>,
    image_width: Option<String>,
    writes: usize,
}

impl FakeSurface {
    /// Creates a surface reading its layout from `layout`.
    #[must_use]
    pub fn new(layout: Rc<Cell<FakeLayout>>) -> Self {
        Self {
            layout,
            overlay_width: None,
            handle_left: None,
            image_width: None,
            writes: 0,
        }
    }

    /// Creates a surface with its own fixed layout.
    #[must_use]
    pub fn with_bounds(bounds: Rect) -> Self {
        Self::new(Rc::new(Cell::new(FakeLayout::new(bounds))))
    }

    /// Overlay `width` style, if ever written.
    #[must_use]
    pub fn overlay_width(&self) -> Option<&str> {
        self.overlay_width.as_deref()
    }

    /// Handle `left` style, if ever written.
    #[must_use]
    pub fn handle_left(&self) -> Option<&str> {
        self.handle_left.as_deref()
    }

    /// Top image `width` style, if ever written.
    #[must_use]
    pub fn image_width(&self) -> Option<&str> {
        self.image_width.as_deref()
    }

    /// Number of non-empty [`apply`](SliderSurface::apply) calls.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Moves the container; affects every surface sharing the layout.
    pub fn set_layout(&self, layout: FakeLayout) {
        self.layout.set(layout);
    }
}

impl SliderSurface for FakeSurface {
    fn bounds(&self) -> Rect {
        self.layout.get().bounds
    }

    fn rendered_width(&self) -> f64 {
        self.layout.get().rendered_width
    }

    fn apply(&mut self, changes: &SliderChanges) {
        if changes.is_empty() {
            return;
        }
        self.writes += 1;
        if let Some(position) = changes.reveal {
            let css = position.to_string();
            self.overlay_width = Some(css.clone());
            self.handle_left = Some(css);
        }
        if let Some(width) = changes.image_width {
            self.image_width = Some(format!("{width}px"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::position::RevealPosition;

    #[test]
    fn reveal_writes_overlay_and_handle_together() {
        let mut surface = FakeSurface::with_bounds(Rect::new(0.0, 0.0, 200.0, 100.0));
        surface.apply(&SliderChanges::reveal(RevealPosition::HALF));
        assert_eq!(surface.overlay_width(), Some("50%"));
        assert_eq!(surface.handle_left(), Some("50%"));
        assert_eq!(surface.image_width(), None);
        assert_eq!(surface.writes(), 1);
    }

    #[test]
    fn image_width_is_pixels() {
        let mut surface = FakeSurface::with_bounds(Rect::ZERO);
        surface.apply(&SliderChanges::image_width(412.5));
        assert_eq!(surface.image_width(), Some("412.5px"));
        assert_eq!(surface.overlay_width(), None);
    }

    #[test]
    fn empty_changes_are_not_writes() {
        let mut surface = FakeSurface::with_bounds(Rect::ZERO);
        surface.apply(&SliderChanges::default());
        assert_eq!(surface.writes(), 0);
    }
}
