// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines trace output.
//!
//! [`JsonLinesSink`] writes one JSON object per event, terminated by a
//! newline. Every object carries an `"event"` name; timestamps are converted
//! to microseconds (`"ts"`) using the provided [`Timebase`], and positions are
//! plain percent numbers.

use std::io::Write;

use serde_json::{Value, json};

use unveil_core::controller::IgnoreReason;
use unveil_core::id::SliderId;
use unveil_core::time::{HostTime, Timebase};
use unveil_core::trace::{
    AttachEvent, ConfigFallbackEvent, DragEvent, IgnoredMoveEvent, ImageSyncEvent,
    ImageSyncFailedEvent, RevealEvent, SkipEvent, TraceSink,
};

/// Writes one JSON object per trace event.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn new(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ts(&self, t: HostTime) -> f64 {
        ticks_to_us(t.ticks(), self.timebase)
    }

    fn emit(&mut self, value: &Value) {
        if serde_json::to_writer(&mut self.writer, value).is_ok() {
            let _ = self.writer.write_all(b"\n");
        }
    }
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

fn slider(id: SliderId) -> Value {
    json!({ "index": id.index(), "generation": id.generation() })
}

fn reason(reason: IgnoreReason) -> Value {
    match reason {
        IgnoreReason::Idle => json!("idle"),
        IgnoreReason::Throttled => json!("throttled"),
        IgnoreReason::Geometry(err) => json!({ "geometry": err.to_string() }),
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.emit(&json!({
            "event": "attach",
            "container": e.ordinal,
            "slider": slider(e.slider),
            "image_width": e.image_width,
            "initial_position": e.initial_position.map(|p| p.percent()),
        }));
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        self.emit(&json!({
            "event": "skip",
            "container": e.ordinal,
            "missing": e.error.missing.as_str(),
        }));
    }

    fn on_config_fallback(&mut self, e: &ConfigFallbackEvent) {
        self.emit(&json!({
            "event": "config_fallback",
            "container": e.ordinal,
            "attribute": e.attribute,
            "error": e.error.to_string(),
        }));
    }

    fn on_drag_start(&mut self, e: &DragEvent) {
        let ts = self.ts(e.at);
        self.emit(&json!({
            "event": "drag_start",
            "slider": slider(e.slider),
            "kind": e.kind.as_str(),
            "ts": ts,
        }));
    }

    fn on_drag_end(&mut self, e: &DragEvent) {
        let ts = self.ts(e.at);
        self.emit(&json!({
            "event": "drag_end",
            "slider": slider(e.slider),
            "kind": e.kind.as_str(),
            "ts": ts,
        }));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let ts = e.at.map(|at| self.ts(at));
        self.emit(&json!({
            "event": "reveal",
            "slider": slider(e.slider),
            "client_x": e.client_x,
            "position": e.position.percent(),
            "ts": ts,
        }));
    }

    fn on_move_ignored(&mut self, e: &IgnoredMoveEvent) {
        let ts = self.ts(e.at);
        self.emit(&json!({
            "event": "move_ignored",
            "slider": slider(e.slider),
            "client_x": e.client_x,
            "reason": reason(e.reason),
            "ts": ts,
        }));
    }

    fn on_image_sync(&mut self, e: &ImageSyncEvent) {
        let ts = e.at.map(|at| self.ts(at));
        self.emit(&json!({
            "event": "image_sync",
            "slider": slider(e.slider),
            "width": e.width,
            "ts": ts,
        }));
    }

    fn on_image_sync_failed(&mut self, e: &ImageSyncFailedEvent) {
        self.emit(&json!({
            "event": "image_sync_failed",
            "slider": slider(e.slider),
            "error": e.error.to_string(),
        }));
    }

    fn on_detach(&mut self, id: SliderId) {
        self.emit(&json!({
            "event": "detach",
            "slider": slider(id),
        }));
    }
}
