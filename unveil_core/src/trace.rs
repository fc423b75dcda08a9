// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for slider dispatch.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`SliderSet`](crate::set::SliderSet) calls as it attaches sliders and
//! routes input. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Skips and geometry failures are the events a host should surface as
//! warnings; everything else is debug-level chatter.

use crate::config::ConfigError;
use crate::controller::{IgnoreReason, PointerKind};
use crate::geometry::GeometryError;
use crate::id::SliderId;
use crate::position::RevealPosition;
use crate::structure::StructuralError;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// A container was attached as a slider.
#[derive(Clone, Copy, Debug)]
pub struct AttachEvent {
    /// The new slider.
    pub slider: SliderId,
    /// Position of the container in document order.
    pub ordinal: u32,
    /// Initial top-image width written, if the sync succeeded.
    pub image_width: Option<f64>,
    /// Initial position written, if configured.
    pub initial_position: Option<RevealPosition>,
}

/// A container was skipped because its structure is incomplete.
#[derive(Clone, Copy, Debug)]
pub struct SkipEvent {
    /// Position of the container in document order.
    pub ordinal: u32,
    /// What was missing.
    pub error: StructuralError,
}

/// A per-container override could not be parsed and the page default is used.
#[derive(Clone, Copy, Debug)]
pub struct ConfigFallbackEvent {
    /// Position of the container in document order.
    pub ordinal: u32,
    /// Name of the offending attribute.
    pub attribute: &'static str,
    /// Why it was rejected.
    pub error: ConfigError,
}

/// A gesture started or ended on a slider.
#[derive(Clone, Copy, Debug)]
pub struct DragEvent {
    /// The slider.
    pub slider: SliderId,
    /// Device of the gesture.
    pub kind: PointerKind,
    /// Host time of the press or release.
    pub at: HostTime,
}

/// A new reveal position was written.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// The slider.
    pub slider: SliderId,
    /// Pointer coordinate that produced the position; `None` when set
    /// programmatically.
    pub client_x: Option<f64>,
    /// The position written to overlay and handle.
    pub position: RevealPosition,
    /// Host time of the move, if any.
    pub at: Option<HostTime>,
}

/// A move was received but produced no write.
#[derive(Clone, Copy, Debug)]
pub struct IgnoredMoveEvent {
    /// The slider.
    pub slider: SliderId,
    /// Pointer coordinate of the move.
    pub client_x: f64,
    /// Why nothing was written.
    pub reason: IgnoreReason,
    /// Host time of the move.
    pub at: HostTime,
}

/// The top image was resized to the container width.
#[derive(Clone, Copy, Debug)]
pub struct ImageSyncEvent {
    /// The slider.
    pub slider: SliderId,
    /// Width written, in pixels.
    pub width: f64,
    /// Host time of the resize; `None` for the initial sync.
    pub at: Option<HostTime>,
}

/// The top image could not be resized.
#[derive(Clone, Copy, Debug)]
pub struct ImageSyncFailedEvent {
    /// The slider.
    pub slider: SliderId,
    /// Why the measured width was rejected.
    pub error: GeometryError,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from slider dispatch.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a slider is attached and initially synced.
    fn on_attach(&mut self, e: &AttachEvent) {
        _ = e;
    }

    /// Called when a container is skipped.
    fn on_skip(&mut self, e: &SkipEvent) {
        _ = e;
    }

    /// Called when a container override falls back to the page default.
    fn on_config_fallback(&mut self, e: &ConfigFallbackEvent) {
        _ = e;
    }

    /// Called when a gesture starts.
    fn on_drag_start(&mut self, e: &DragEvent) {
        _ = e;
    }

    /// Called for each slider whose gesture a release ended.
    fn on_drag_end(&mut self, e: &DragEvent) {
        _ = e;
    }

    /// Called when a reveal position is written.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called when a move is dropped.
    fn on_move_ignored(&mut self, e: &IgnoredMoveEvent) {
        _ = e;
    }

    /// Called when the top image is resized.
    fn on_image_sync(&mut self, e: &ImageSyncEvent) {
        _ = e;
    }

    /// Called when the top image could not be resized.
    fn on_image_sync_failed(&mut self, e: &ImageSyncFailedEvent) {
        _ = e;
    }

    /// Called after a slider is detached.
    fn on_detach(&mut self, slider: SliderId) {
        _ = slider;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`AttachEvent`].
    #[inline]
    pub fn attach(&mut self, e: &AttachEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_attach(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SkipEvent`].
    #[inline]
    pub fn skip(&mut self, e: &SkipEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_skip(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ConfigFallbackEvent`].
    #[inline]
    pub fn config_fallback(&mut self, e: &ConfigFallbackEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_config_fallback(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a drag-start [`DragEvent`].
    #[inline]
    pub fn drag_start(&mut self, e: &DragEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_drag_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a drag-end [`DragEvent`].
    #[inline]
    pub fn drag_end(&mut self, e: &DragEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_drag_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RevealEvent`].
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveal(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`IgnoredMoveEvent`].
    #[inline]
    pub fn move_ignored(&mut self, e: &IgnoredMoveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_move_ignored(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ImageSyncEvent`].
    #[inline]
    pub fn image_sync(&mut self, e: &ImageSyncEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_image_sync(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ImageSyncFailedEvent`].
    #[inline]
    pub fn image_sync_failed(&mut self, e: &ImageSyncFailedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_image_sync_failed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a detach notification.
    #[inline]
    pub fn detach(&mut self, slider: SliderId) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_detach(slider);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = slider;
        }
    }
}

#[cfg(all(test, feature = "trace"))]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        skips: u32,
        detaches: u32,
    }

    impl TraceSink for Counter {
        fn on_skip(&mut self, _e: &SkipEvent) {
            self.skips += 1;
        }

        fn on_detach(&mut self, _slider: SliderId) {
            self.detaches += 1;
        }
    }

    #[test]
    fn tracer_forwards_to_sink() {
        let mut counter = Counter::default();
        {
            let mut tracer = Tracer::new(&mut counter);
            tracer.skip(&SkipEvent {
                ordinal: 0,
                error: StructuralError {
                    missing: crate::structure::MissingPart::Handle,
                },
            });
            tracer.detach(SliderId {
                idx: 0,
                generation: 0,
            });
        }
        assert_eq!(counter.skips, 1);
        assert_eq!(counter.detaches, 1);
    }

    #[test]
    fn none_tracer_discards() {
        let mut tracer = Tracer::none();
        tracer.detach(SliderId {
            idx: 3,
            generation: 1,
        });
    }
}
