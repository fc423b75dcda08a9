// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM structure queries and style writes.
//!
//! [`DomQuery`] resolves a container's parts with `querySelector`;
//! [`DomSurface`] holds the resolved elements and writes
//! [`SliderChanges`] as inline styles.

use alloc::format;
use alloc::string::ToString as _;

use kurbo::Rect;
use unveil_core::backend::{SliderSurface, StructureQuery};
use unveil_core::changes::SliderChanges;
use unveil_core::structure::ContainerView;
use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

/// [`StructureQuery`] over live DOM elements.
///
/// Only HTML elements count as matches; an SVG node matching a selector is
/// treated as missing because it has no inline `style` to write.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomQuery;

impl StructureQuery for DomQuery {
    type Node = HtmlElement;

    fn find(&self, parent: &HtmlElement, selector: &str) -> Option<HtmlElement> {
        parent
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

/// The live elements of one comparison.
pub struct DomSurface {
    container: HtmlElement,
    overlay: HtmlElement,
    handle: HtmlElement,
    image: HtmlElement,
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("container", &"HtmlElement")
            .field("overlay", &"HtmlElement")
            .field("handle", &"HtmlElement")
            .field("image", &"HtmlElement")
            .finish()
    }
}

impl DomSurface {
    /// Wraps the elements resolved by discovery.
    #[must_use]
    pub fn new(view: ContainerView<HtmlElement>) -> Self {
        Self {
            container: view.container,
            overlay: view.overlay,
            handle: view.handle,
            image: view.image,
        }
    }
}

impl SliderSurface for DomSurface {
    fn bounds(&self) -> Rect {
        let r = self.container.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn rendered_width(&self) -> f64 {
        f64::from(self.container.offset_width())
    }

    fn apply(&mut self, changes: &SliderChanges) {
        if let Some(position) = changes.reveal {
            let css = position.to_string();
            let _ = self.overlay.style().set_property("width", &css);
            let _ = self.handle.style().set_property("left", &css);
        }
        if let Some(width) = changes.image_width {
            let _ = self
                .image
                .style()
                .set_property("width", &format!("{width}px"));
        }
    }
}
