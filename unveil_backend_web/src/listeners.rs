// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-listener wiring.
//!
//! [`attach`] discovers every comparison container in a document and wires:
//!
//! - `mousedown`, `touchstart`, `mousemove`, `touchmove` on each container,
//!   routed to that container's slider only;
//! - `mouseup`, `touchend`, `resize` once on the window, broadcast to every
//!   slider.
//!
//! All listeners are owned by the returned [`SliderPage`] and removed when it
//! is dropped (or, for one slider, when it is [detached](SliderPage::detach)).
//! Pages that live as long as the document can be leaked with
//! `core::mem::forget`.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use unveil_core::config::{ContainerOverrides, SliderConfig, TouchScrollPolicy};
use unveil_core::controller::PointerKind;
use unveil_core::id::SliderId;
use unveil_core::position::RevealPosition;
use unveil_core::set::{DispatchOutcome, InputEvent, SliderSet};
use unveil_core::trace::{TraceSink, Tracer};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent,
};

use crate::now;
use crate::surface::{DomQuery, DomSurface};

type Handler = Closure<dyn FnMut(Event)>;

/// One registered DOM listener; unregisters itself on drop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Handler,
}

impl Listener {
    fn new(
        target: &EventTarget,
        event: &'static str,
        options: Option<&AddEventListenerOptions>,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        match options {
            Some(options) => target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event, callback, options,
                )?,
            None => target.add_event_listener_with_callback(event, callback)?,
        }
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

struct PageState {
    set: SliderSet<DomSurface>,
    sink: Box<dyn TraceSink>,
}

impl PageState {
    fn dispatch(&mut self, event: InputEvent) -> DispatchOutcome {
        let mut tracer = Tracer::new(self.sink.as_mut());
        self.set.dispatch(event, &mut tracer)
    }
}

/// Routes `event` unless the state is already borrowed (a handler re-entered
/// through a synchronously dispatched DOM event).
fn dispatch(state: &RefCell<PageState>, event: InputEvent) -> DispatchOutcome {
    match state.try_borrow_mut() {
        Ok(mut s) => s.dispatch(event),
        Err(_) => DispatchOutcome::Ignored,
    }
}

/// Every comparison slider attached to one document.
pub struct SliderPage {
    state: Rc<RefCell<PageState>>,
    sliders: Vec<(SliderId, Vec<Listener>)>,
    window_listeners: Vec<Listener>,
}

impl core::fmt::Debug for SliderPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SliderPage")
            .field("sliders", &self.sliders.len())
            .field("window_listeners", &self.window_listeners.len())
            .finish_non_exhaustive()
    }
}

/// Attaches a slider to every container in `document` matching
/// `config.selectors.container`.
///
/// Containers with missing parts are skipped and reported to `sink`; the
/// remaining containers are attached regardless.
///
/// # Errors
///
/// Returns the browser's exception if the document has no window, the
/// container selector is invalid, or a listener cannot be registered.
pub fn attach(
    document: &Document,
    config: &SliderConfig,
    sink: Box<dyn TraceSink>,
) -> Result<SliderPage, JsValue> {
    let window = document
        .default_view()
        .ok_or_else(|| JsValue::from_str("document has no window"))?;
    let nodes = document.query_selector_all(&config.selectors.container)?;

    let state = Rc::new(RefCell::new(PageState {
        set: SliderSet::new(),
        sink,
    }));

    let mut attached = Vec::new();
    {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        for ordinal in 0..nodes.length() {
            let Some(container) = nodes
                .item(ordinal)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let mut tracer = Tracer::new(s.sink.as_mut());
            let overrides = ContainerOverrides::from_attributes(
                |name| container.get_attribute(name),
                ordinal,
                &mut tracer,
            );
            let result = s.set.attach(
                &DomQuery,
                container.clone(),
                ordinal,
                config,
                overrides,
                DomSurface::new,
                &mut tracer,
            );
            if let Ok(id) = result {
                let policy = config.resolve(overrides).touch_scroll;
                attached.push((id, container, policy));
            }
        }
    }

    let mut sliders = Vec::with_capacity(attached.len());
    for (id, container, policy) in attached {
        sliders.push((id, container_listeners(&state, id, &container, policy)?));
    }

    let window_target: &EventTarget = window.as_ref();
    let window_listeners = window_listeners(&state, window_target)?;

    Ok(SliderPage {
        state,
        sliders,
        window_listeners,
    })
}

/// Reads `clientX` as a double. The generated `client_x` getters return
/// `i32` and drop the fractional part browsers report on scaled displays.
fn client_x(source: &JsValue) -> Option<f64> {
    js_sys::Reflect::get(source, &JsValue::from_str("clientX"))
        .ok()?
        .as_f64()
}

fn container_listeners(
    state: &Rc<RefCell<PageState>>,
    id: SliderId,
    container: &HtmlElement,
    policy: TouchScrollPolicy,
) -> Result<Vec<Listener>, JsValue> {
    let target: &EventTarget = container.as_ref();

    let press = |kind: PointerKind| {
        let state = Rc::clone(state);
        move |_event: Event| {
            dispatch(
                &state,
                InputEvent::Press {
                    target: id,
                    kind,
                    at: now(),
                },
            );
        }
    };

    let mouse_state = Rc::clone(state);
    let mouse_move = move |event: Event| {
        if !event.is_instance_of::<MouseEvent>() {
            return;
        }
        let Some(client_x) = client_x(&event) else {
            return;
        };
        dispatch(
            &mouse_state,
            InputEvent::Move {
                target: id,
                kind: PointerKind::Mouse,
                client_x,
                at: now(),
            },
        );
    };

    let touch_state = Rc::clone(state);
    let touch_move = move |event: Event| {
        let Some(client_x) = event
            .dyn_ref::<TouchEvent>()
            .and_then(|touch_event| touch_event.touches().get(0))
            .and_then(|touch| client_x(&touch))
        else {
            return;
        };
        let Ok(mut s) = touch_state.try_borrow_mut() else {
            return;
        };
        s.dispatch(InputEvent::Move {
            target: id,
            kind: PointerKind::Touch,
            client_x,
            at: now(),
        });
        if policy == TouchScrollPolicy::Prevent && s.set.is_dragging(id) {
            event.prevent_default();
        }
    };

    // `preventDefault` is a no-op in passive listeners, which browsers assume
    // for touchmove on some targets.
    let touch_move_options = AddEventListenerOptions::new();
    touch_move_options.set_passive(policy == TouchScrollPolicy::Allow);

    Ok(alloc::vec![
        Listener::new(target, "mousedown", None, press(PointerKind::Mouse))?,
        Listener::new(target, "touchstart", None, press(PointerKind::Touch))?,
        Listener::new(target, "mousemove", None, mouse_move)?,
        Listener::new(target, "touchmove", Some(&touch_move_options), touch_move)?,
    ])
}

fn window_listeners(
    state: &Rc<RefCell<PageState>>,
    window: &EventTarget,
) -> Result<Vec<Listener>, JsValue> {
    let release = |kind: PointerKind| {
        let state = Rc::clone(state);
        move |_event: Event| {
            dispatch(&state, InputEvent::Release { kind, at: now() });
        }
    };

    let resize_state = Rc::clone(state);
    let resize = move |_event: Event| {
        dispatch(&resize_state, InputEvent::Resize { at: now() });
    };

    Ok(alloc::vec![
        Listener::new(window, "mouseup", None, release(PointerKind::Mouse))?,
        Listener::new(window, "touchend", None, release(PointerKind::Touch))?,
        Listener::new(window, "resize", None, resize)?,
    ])
}

impl SliderPage {
    /// Number of attached sliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().set.len()
    }

    /// Returns `true` if no container was attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of the attached sliders, in document order.
    #[must_use]
    pub fn ids(&self) -> Vec<SliderId> {
        self.sliders.iter().map(|(id, _)| *id).collect()
    }

    /// Last written position of a slider.
    #[must_use]
    pub fn position(&self, id: SliderId) -> Option<RevealPosition> {
        self.state.borrow().set.position(id)
    }

    /// Returns `true` while the slider is being dragged.
    #[must_use]
    pub fn is_dragging(&self, id: SliderId) -> bool {
        self.state.borrow().set.is_dragging(id)
    }

    /// Moves a slider programmatically. Returns `false` if `id` is stale.
    pub fn set_position(&self, id: SliderId, position: RevealPosition) -> bool {
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        let mut tracer = Tracer::new(s.sink.as_mut());
        s.set.set_position(id, position, &mut tracer)
    }

    /// Removes a slider's listeners and stops it from receiving broadcasts.
    ///
    /// Returns the slider's surface, or `None` if `id` is stale.
    pub fn detach(&mut self, id: SliderId) -> Option<DomSurface> {
        let pos = self.sliders.iter().position(|(slider, _)| *slider == id)?;
        // Dropping the listeners unregisters them.
        drop(self.sliders.remove(pos));
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        let mut tracer = Tracer::new(s.sink.as_mut());
        s.set.remove(id, &mut tracer)
    }
}
