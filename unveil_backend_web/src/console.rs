// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace output.

use alloc::format;
use alloc::string::String;

use unveil_core::controller::IgnoreReason;
use unveil_core::id::SliderId;
use unveil_core::trace::{
    AttachEvent, ConfigFallbackEvent, DragEvent, IgnoredMoveEvent, ImageSyncEvent,
    ImageSyncFailedEvent, RevealEvent, SkipEvent, TraceSink,
};
use web_sys::console;

/// Writes trace events to the browser console.
///
/// Skipped containers, rejected overrides and geometry failures always go to
/// `console.warn`. Everything else goes to `console.debug`, and only when the
/// sink is verbose.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    verbose: bool,
}

impl ConsoleSink {
    /// Creates a sink that only reports warnings.
    #[must_use]
    pub const fn warnings() -> Self {
        Self { verbose: false }
    }

    /// Creates a sink that also reports attach, drag and reveal events.
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }

    fn debug(&self, line: String) {
        if self.verbose {
            console::debug_1(&line.into());
        }
    }
}

fn warn(line: String) {
    console::warn_1(&line.into());
}

fn attach_line(e: &AttachEvent) -> String {
    let image = e
        .image_width
        .map_or_else(|| String::from("unsynced"), |w| format!("{w}px"));
    format!(
        "unveil: attached container {} as {} (image {image})",
        e.ordinal, e.slider
    )
}

impl TraceSink for ConsoleSink {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.debug(attach_line(e));
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        warn(format!(
            "unveil: skipping container {}: {}",
            e.ordinal, e.error
        ));
    }

    fn on_config_fallback(&mut self, e: &ConfigFallbackEvent) {
        warn(format!(
            "unveil: container {} has an invalid {}: {}",
            e.ordinal, e.attribute, e.error
        ));
    }

    fn on_drag_start(&mut self, e: &DragEvent) {
        self.debug(format!("unveil: {} {} drag start", e.slider, e.kind.as_str()));
    }

    fn on_drag_end(&mut self, e: &DragEvent) {
        self.debug(format!("unveil: {} {} drag end", e.slider, e.kind.as_str()));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.debug(format!("unveil: {} reveal {}", e.slider, e.position));
    }

    fn on_move_ignored(&mut self, e: &IgnoredMoveEvent) {
        if let IgnoreReason::Geometry(error) = e.reason {
            warn(format!("unveil: {} move ignored: {error}", e.slider));
        }
    }

    fn on_image_sync(&mut self, e: &ImageSyncEvent) {
        self.debug(format!("unveil: {} image width {}px", e.slider, e.width));
    }

    fn on_image_sync_failed(&mut self, e: &ImageSyncFailedEvent) {
        warn(format!("unveil: {} image not resized: {}", e.slider, e.error));
    }

    fn on_detach(&mut self, slider: SliderId) {
        self.debug(format!("unveil: {slider} detached"));
    }
}
