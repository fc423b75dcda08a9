// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for unveil.
//!
//! This crate binds [`unveil_core`] to the browser:
//!
//! - [`DomQuery`] / [`DomSurface`]: structure discovery with `querySelector`
//!   and inline style writes.
//! - [`attach`] / [`SliderPage`]: scans a document for comparison
//!   containers, wires mouse, touch and resize listeners, and removes them
//!   again when the page handle is dropped.
//! - [`ConsoleSink`]: trace output through the browser console.

#![no_std]

extern crate alloc;

mod console;
mod listeners;
mod surface;

pub use console::ConsoleSink;
pub use listeners::{SliderPage, attach};
pub use surface::{DomQuery, DomSurface};
pub use unveil_core::backend::SliderSurface;

use unveil_core::time::{HostTime, Timebase};
use wasm_bindgen::prelude::*;

// Direct global binding instead of `web_sys::Window::performance()`, which
// would fetch (and unwrap) the Performance object on every input event.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;
}

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    let ms = performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}
