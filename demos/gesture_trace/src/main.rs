// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replays the reference drag gestures against fake sliders.
//!
//! Every scenario from [`unveil_harness::reference_scenarios`] runs with the
//! default configuration. Events go to a
//! [`PrettyPrintSink`](unveil_debug::pretty::PrettyPrintSink) on stdout and to
//! a [`JsonLinesSink`](unveil_debug::json::JsonLinesSink) writing
//! `gesture_trace.jsonl`; the final overlay width of each slider is checked
//! against the scenario's expectation.

use std::fs::File;
use std::io::{BufWriter, Write};

use unveil_core::id::SliderId;
use unveil_core::time::Timebase;
use unveil_core::trace::{
    AttachEvent, ConfigFallbackEvent, DragEvent, IgnoredMoveEvent, ImageSyncEvent,
    ImageSyncFailedEvent, RevealEvent, SkipEvent, TraceSink,
};
use unveil_debug::json::JsonLinesSink;
use unveil_debug::pretty::PrettyPrintSink;
use unveil_harness::reference_scenarios;

/// Forwards every event to two sinks.
struct Tee<'a, A, B> {
    first: &'a mut A,
    second: &'a mut B,
}

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<'_, A, B> {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.first.on_attach(e);
        self.second.on_attach(e);
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        self.first.on_skip(e);
        self.second.on_skip(e);
    }

    fn on_config_fallback(&mut self, e: &ConfigFallbackEvent) {
        self.first.on_config_fallback(e);
        self.second.on_config_fallback(e);
    }

    fn on_drag_start(&mut self, e: &DragEvent) {
        self.first.on_drag_start(e);
        self.second.on_drag_start(e);
    }

    fn on_drag_end(&mut self, e: &DragEvent) {
        self.first.on_drag_end(e);
        self.second.on_drag_end(e);
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.first.on_reveal(e);
        self.second.on_reveal(e);
    }

    fn on_move_ignored(&mut self, e: &IgnoredMoveEvent) {
        self.first.on_move_ignored(e);
        self.second.on_move_ignored(e);
    }

    fn on_image_sync(&mut self, e: &ImageSyncEvent) {
        self.first.on_image_sync(e);
        self.second.on_image_sync(e);
    }

    fn on_image_sync_failed(&mut self, e: &ImageSyncFailedEvent) {
        self.first.on_image_sync_failed(e);
        self.second.on_image_sync_failed(e);
    }

    fn on_detach(&mut self, slider: SliderId) {
        self.first.on_detach(slider);
        self.second.on_detach(slider);
    }
}

fn main() {
    // The harness clock runs in microsecond ticks.
    let timebase = Timebase::MICROS;

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()), timebase);
    let path = "gesture_trace.jsonl";
    let file = File::create(path).expect("failed to create gesture_trace.jsonl");
    let mut json = JsonLinesSink::new(BufWriter::new(file), timebase);

    // -- scenarios ---------------------------------------------------------
    let scenarios = reference_scenarios();
    let mut failures = 0;
    for scenario in &scenarios {
        println!("== {} ==", scenario.name);
        let page = scenario.replay(Tee {
            first: &mut pretty,
            second: &mut json,
        });
        for (index, expected) in scenario.expected.iter().enumerate() {
            let actual = page.surface(index).and_then(|s| s.overlay_width());
            if actual == *expected {
                println!("   slider {index}: overlay {actual:?} ok");
            } else {
                failures += 1;
                println!("   slider {index}: overlay {actual:?}, expected {expected:?}");
            }
        }
    }

    json.into_inner()
        .flush()
        .expect("failed to write gesture_trace.jsonl");
    println!("Wrote {path} ({} scenarios)", scenarios.len());

    if failures > 0 {
        eprintln!("{failures} slider(s) ended in the wrong place");
        std::process::exit(1);
    }
}
