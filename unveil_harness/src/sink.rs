// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace sink that keeps every event.

use alloc::vec::Vec;

use unveil_core::id::SliderId;
use unveil_core::trace::{
    AttachEvent, ConfigFallbackEvent, DragEvent, IgnoredMoveEvent, ImageSyncEvent,
    ImageSyncFailedEvent, RevealEvent, SkipEvent, TraceSink,
};

/// One event received by a [`CollectingSink`].
#[derive(Clone, Copy, Debug)]
pub enum TraceRecord {
    /// [`TraceSink::on_attach`].
    Attach(AttachEvent),
    /// [`TraceSink::on_skip`].
    Skip(SkipEvent),
    /// [`TraceSink::on_config_fallback`].
    ConfigFallback(ConfigFallbackEvent),
    /// [`TraceSink::on_drag_start`].
    DragStart(DragEvent),
    /// [`TraceSink::on_drag_end`].
    DragEnd(DragEvent),
    /// [`TraceSink::on_reveal`].
    Reveal(RevealEvent),
    /// [`TraceSink::on_move_ignored`].
    MoveIgnored(IgnoredMoveEvent),
    /// [`TraceSink::on_image_sync`].
    ImageSync(ImageSyncEvent),
    /// [`TraceSink::on_image_sync_failed`].
    ImageSyncFailed(ImageSyncFailedEvent),
    /// [`TraceSink::on_detach`].
    Detach(SliderId),
}

/// Stores trace events in arrival order.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    /// Everything received so far.
    pub records: Vec<TraceRecord>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip events, in order.
    pub fn skips(&self) -> impl Iterator<Item = &SkipEvent> {
        self.records.iter().filter_map(|r| match r {
            TraceRecord::Skip(e) => Some(e),
            _ => None,
        })
    }

    /// Config fallback events, in order.
    pub fn fallbacks(&self) -> impl Iterator<Item = &ConfigFallbackEvent> {
        self.records.iter().filter_map(|r| match r {
            TraceRecord::ConfigFallback(e) => Some(e),
            _ => None,
        })
    }

    /// Reveal events, in order.
    pub fn reveals(&self) -> impl Iterator<Item = &RevealEvent> {
        self.records.iter().filter_map(|r| match r {
            TraceRecord::Reveal(e) => Some(e),
            _ => None,
        })
    }

    /// Ignored-move events, in order.
    pub fn ignored_moves(&self) -> impl Iterator<Item = &IgnoredMoveEvent> {
        self.records.iter().filter_map(|r| match r {
            TraceRecord::MoveIgnored(e) => Some(e),
            _ => None,
        })
    }

    /// Drops everything received so far.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl TraceSink for CollectingSink {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.records.push(TraceRecord::Attach(*e));
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        self.records.push(TraceRecord::Skip(*e));
    }

    fn on_config_fallback(&mut self, e: &ConfigFallbackEvent) {
        self.records.push(TraceRecord::ConfigFallback(*e));
    }

    fn on_drag_start(&mut self, e: &DragEvent) {
        self.records.push(TraceRecord::DragStart(*e));
    }

    fn on_drag_end(&mut self, e: &DragEvent) {
        self.records.push(TraceRecord::DragEnd(*e));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.records.push(TraceRecord::Reveal(*e));
    }

    fn on_move_ignored(&mut self, e: &IgnoredMoveEvent) {
        self.records.push(TraceRecord::MoveIgnored(*e));
    }

    fn on_image_sync(&mut self, e: &ImageSyncEvent) {
        self.records.push(TraceRecord::ImageSync(*e));
    }

    fn on_image_sync_failed(&mut self, e: &ImageSyncFailedEvent) {
        self.records.push(TraceRecord::ImageSyncFailed(*e));
    }

    fn on_detach(&mut self, slider: SliderId) {
        self.records.push(TraceRecord::Detach(slider));
    }
}
