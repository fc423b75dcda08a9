// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: before/after comparison sliders.
//!
//! On start, attaches a slider to every `.comparison-container` on the page.
//! If the page has none, two demo comparisons are built first: one with the
//! default settings and one that starts at 25% and keeps touch drags from
//! scrolling the page.

use unveil_backend_web::{ConsoleSink, attach};
use unveil_core::config::{ContainerOverrides, SliderConfig};
use unveil_core::position::RevealPosition;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

const BEFORE_SVG: &str = "data:image/svg+xml;utf8,\
<svg xmlns='http://www.w3.org/2000/svg' width='640' height='360'>\
<rect width='640' height='360' fill='%23324a73'/>\
<text x='40' y='200' font-size='64' fill='white' font-family='sans-serif'>before</text></svg>";

const AFTER_SVG: &str = "data:image/svg+xml;utf8,\
<svg xmlns='http://www.w3.org/2000/svg' width='640' height='360'>\
<rect width='640' height='360' fill='%23d9822b'/>\
<text x='40' y='200' font-size='64' fill='white' font-family='sans-serif'>after</text></svg>";

fn element(document: &Document, tag: &str, class: &str, style: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.set_attribute("style", style)?;
    Ok(el)
}

/// Builds one comparison and appends it to `parent`.
fn build_comparison(document: &Document, parent: &Element) -> Result<Element, JsValue> {
    let container = element(
        document,
        "div",
        "comparison-container",
        "position: relative; width: min(640px, 90vw); aspect-ratio: 16 / 9; margin: 24px auto; overflow: hidden; user-select: none; cursor: ew-resize;",
    )?;

    let before = element(
        document,
        "img",
        "",
        "display: block; width: 100%; height: 100%; object-fit: cover;",
    )?;
    before.set_attribute("src", BEFORE_SVG)?;
    before.set_attribute("draggable", "false")?;

    let overlay = element(
        document,
        "div",
        "comparison-overlay",
        "position: absolute; top: 0; left: 0; width: 50%; height: 100%; overflow: hidden;",
    )?;
    let after = element(
        document,
        "img",
        "",
        "display: block; height: 100%; max-width: none; object-fit: cover;",
    )?;
    after.set_attribute("src", AFTER_SVG)?;
    after.set_attribute("draggable", "false")?;
    overlay.append_child(&after)?;

    let handle = element(
        document,
        "div",
        "comparison-handle",
        "position: absolute; top: 0; left: 50%; width: 4px; height: 100%; margin-left: -2px; background: white; box-shadow: 0 0 6px rgba(0,0,0,0.4);",
    )?;

    container.append_child(&before)?;
    container.append_child(&overlay)?;
    container.append_child(&handle)?;
    parent.append_child(&container)?;
    Ok(container)
}

/// Entry point for the web-compare demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .expect("window")
        .document()
        .expect("document");

    let config = SliderConfig::default().with_initial_position(RevealPosition::HALF);

    if document
        .query_selector(&config.selectors.container)?
        .is_none()
    {
        let body = document.body().expect("body");
        build_comparison(&document, &body)?;
        let second = build_comparison(&document, &body)?;
        second.set_attribute(ContainerOverrides::INITIAL_POSITION_ATTRIBUTE, "25%")?;
        second.set_attribute(ContainerOverrides::TOUCH_SCROLL_ATTRIBUTE, "prevent")?;
    }

    let page = attach(&document, &config, Box::new(ConsoleSink::verbose()))?;
    web_sys::console::log_1(&format!("unveil: {} slider(s) attached", page.len()).into());

    // The sliders live as long as the document.
    core::mem::forget(page);
    Ok(())
}
