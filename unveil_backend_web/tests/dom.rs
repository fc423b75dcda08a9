// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser tests: attach to real DOM and drive it with synthetic events.

#![cfg(target_arch = "wasm32")]

use std::borrow::Cow;

use unveil_backend_web::{ConsoleSink, SliderPage, attach};
use unveil_core::config::{ContainerOverrides, Selectors, SliderConfig};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{
    Document, Element, EventTarget, HtmlElement, MouseEvent, MouseEventInit, Touch, TouchEvent,
    TouchEventInit, TouchInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// One comparison per class, laid out at x in [100, 400].
fn comparison(class: &str) -> String {
    format!(
        r#"<div class="{class}" style="position: fixed; left: 100px; top: 0; width: 300px; height: 100px;">
             <div class="comparison-overlay" style="width: 50%; overflow: hidden;"><img></div>
             <div class="comparison-handle"></div>
           </div>"#
    )
}

fn mount(html: &str) -> Element {
    let document = document();
    let root = document.create_element("div").unwrap();
    root.set_inner_html(html);
    document.body().unwrap().append_child(&root).unwrap();
    root
}

fn config(class: &str) -> SliderConfig {
    SliderConfig::default().with_selectors(Selectors {
        container: Cow::Owned(format!(".{class}")),
        ..Selectors::DEFAULT
    })
}

fn part(root: &Element, selector: &str) -> HtmlElement {
    root.query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn mouse(target: &EventTarget, kind: &str, client_x: i32) {
    let init = MouseEventInit::new();
    init.set_client_x(client_x);
    let event = MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&event).unwrap();
}

/// Dispatches a cancelable touch event with a single touch point.
fn touch(target: &EventTarget, kind: &str, client_x: i32) -> TouchEvent {
    let point = TouchInit::new(0, target);
    point.set_client_x(client_x);
    let point = Touch::new(&point).unwrap();
    let init = TouchEventInit::new();
    init.set_cancelable(true);
    init.set_touches(&js_sys::Array::of1(&point));
    init.set_changed_touches(&js_sys::Array::of1(&point));
    let event = TouchEvent::new_with_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&event).unwrap();
    event
}

fn style(el: &HtmlElement, property: &str) -> String {
    el.style().get_property_value(property).unwrap()
}

fn window() -> EventTarget {
    web_sys::window().unwrap().into()
}

fn attach_to(class: &str) -> SliderPage {
    attach(&document(), &config(class), Box::new(ConsoleSink::warnings())).unwrap()
}

/// Mounts one comparison with the given `data-touch-scroll` value.
fn mount_touch(class: &str, policy: &str) -> Element {
    let root = mount(&comparison(class));
    part(&root, &format!(".{class}"))
        .set_attribute(ContainerOverrides::TOUCH_SCROLL_ATTRIBUTE, policy)
        .unwrap();
    root
}

#[wasm_bindgen_test]
fn attach_syncs_image_width() {
    let root = mount(&comparison("sync-case"));
    let page = attach_to("sync-case");
    assert_eq!(page.len(), 1);
    assert_eq!(style(&part(&root, "img"), "width"), "300px");
    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn drag_then_release() {
    let root = mount(&comparison("drag-case"));
    let page = attach_to("drag-case");
    let container = part(&root, ".drag-case");
    let overlay = part(&root, ".comparison-overlay");
    let handle = part(&root, ".comparison-handle");

    mouse(&container, "mousedown", 100);
    mouse(&container, "mousemove", 250);
    assert_eq!(style(&overlay, "width"), "50%");
    assert_eq!(style(&handle, "left"), "50%");

    mouse(&window(), "mouseup", 250);
    mouse(&container, "mousemove", 400);
    assert_eq!(style(&overlay, "width"), "50%");
    assert!(!page.is_dragging(page.ids()[0]));

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn drag_clamps_left_of_container() {
    let root = mount(&comparison("clamp-case"));
    let page = attach_to("clamp-case");
    let container = part(&root, ".clamp-case");

    mouse(&container, "mousedown", 200);
    mouse(&container, "mousemove", 50);
    assert_eq!(style(&part(&root, ".comparison-overlay"), "width"), "0%");
    assert_eq!(style(&part(&root, ".comparison-handle"), "left"), "0%");

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn malformed_container_is_skipped() {
    let html = format!(
        r#"{}<div class="skip-case"><div class="comparison-overlay"></div></div>"#,
        comparison("skip-case")
    );
    let root = mount(&html);
    let page = attach_to("skip-case");
    assert_eq!(page.len(), 1);
    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn detached_slider_ignores_input() {
    let root = mount(&comparison("detach-case"));
    let mut page = attach_to("detach-case");
    let id = page.ids()[0];
    assert!(page.detach(id).is_some());
    assert!(page.is_empty());

    let container = part(&root, ".detach-case");
    mouse(&container, "mousedown", 100);
    mouse(&container, "mousemove", 400);
    // Still the stylesheet value, never written by the slider.
    assert_eq!(style(&part(&root, ".comparison-overlay"), "width"), "50%");

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn fractional_client_x_is_kept() {
    let root = mount(&comparison("fraction-case"));
    let page = attach_to("fraction-case");
    let container = part(&root, ".fraction-case");

    mouse(&container, "mousedown", 100);
    let event =
        MouseEvent::new_with_mouse_event_init_dict("mousemove", &MouseEventInit::new()).unwrap();
    let descriptor = js_sys::Object::new();
    js_sys::Reflect::set(&descriptor, &"value".into(), &JsValue::from_f64(175.75)).unwrap();
    js_sys::Object::define_property(&event, &"clientX".into(), &descriptor);
    container.dispatch_event(&event).unwrap();

    let percent = page.position(page.ids()[0]).unwrap().percent();
    assert!((percent - 25.25).abs() < 1e-9, "got {percent}");

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn touch_drag_prevents_scroll_when_asked() {
    let root = mount_touch("prevent-case", "prevent");
    let page = attach_to("prevent-case");
    let container = part(&root, ".prevent-case");

    touch(&container, "touchstart", 100);
    let moved = touch(&container, "touchmove", 250);
    assert_eq!(style(&part(&root, ".comparison-overlay"), "width"), "50%");
    assert_eq!(style(&part(&root, ".comparison-handle"), "left"), "50%");
    assert!(moved.default_prevented());

    touch(&window(), "touchend", 250);
    assert!(!page.is_dragging(page.ids()[0]));
    let idle = touch(&container, "touchmove", 400);
    assert!(!idle.default_prevented());
    assert_eq!(style(&part(&root, ".comparison-overlay"), "width"), "50%");

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn touch_drag_keeps_scroll_by_default() {
    let root = mount_touch("allow-case", "allow");
    let page = attach_to("allow-case");
    let container = part(&root, ".allow-case");

    touch(&container, "touchstart", 100);
    let moved = touch(&container, "touchmove", 175);
    assert_eq!(style(&part(&root, ".comparison-overlay"), "width"), "25%");
    assert!(!moved.default_prevented());

    drop(page);
    root.remove();
}
