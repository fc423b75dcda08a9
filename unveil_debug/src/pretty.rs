// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use unveil_core::controller::IgnoreReason;
use unveil_core::id::SliderId;
use unveil_core::time::{HostTime, Timebase};
use unveil_core::trace::{
    AttachEvent, ConfigFallbackEvent, DragEvent, IgnoredMoveEvent, ImageSyncEvent,
    ImageSyncFailedEvent, RevealEvent, SkipEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ms(&self, t: HostTime) -> f64 {
        t.to_nanos(self.timebase) as f64 / 1_000_000.0
    }
}

fn reason(reason: IgnoreReason) -> String {
    match reason {
        IgnoreReason::Idle => "idle".to_owned(),
        IgnoreReason::Throttled => "throttled".to_owned(),
        IgnoreReason::Geometry(err) => format!("geometry: {err}"),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_attach(&mut self, e: &AttachEvent) {
        let image = e
            .image_width
            .map_or_else(|| "unsynced".to_owned(), |w| format!("{w}px"));
        let initial = e
            .initial_position
            .map_or_else(|| "-".to_owned(), |p| p.to_string());
        let _ = writeln!(
            self.writer,
            "[attach] container={} slider={} image={image} initial={initial}",
            e.ordinal, e.slider,
        );
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        let _ = writeln!(
            self.writer,
            "[skip] container={} missing={}",
            e.ordinal,
            e.error.missing.as_str(),
        );
    }

    fn on_config_fallback(&mut self, e: &ConfigFallbackEvent) {
        let _ = writeln!(
            self.writer,
            "[config] container={} {}: {}",
            e.ordinal, e.attribute, e.error,
        );
    }

    fn on_drag_start(&mut self, e: &DragEvent) {
        let _ = writeln!(
            self.writer,
            "[drag:start] slider={} {} at {:.3}ms",
            e.slider,
            e.kind.as_str(),
            self.ms(e.at),
        );
    }

    fn on_drag_end(&mut self, e: &DragEvent) {
        let _ = writeln!(
            self.writer,
            "[drag:end] slider={} {} at {:.3}ms",
            e.slider,
            e.kind.as_str(),
            self.ms(e.at),
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        match (e.client_x, e.at) {
            (Some(x), Some(at)) => {
                let _ = writeln!(
                    self.writer,
                    "[reveal] slider={} x={x} -> {} at {:.3}ms",
                    e.slider,
                    e.position,
                    self.ms(at),
                );
            }
            _ => {
                let _ = writeln!(self.writer, "[reveal] slider={} set {}", e.slider, e.position);
            }
        }
    }

    fn on_move_ignored(&mut self, e: &IgnoredMoveEvent) {
        let _ = writeln!(
            self.writer,
            "[move:ignored] slider={} x={} ({}) at {:.3}ms",
            e.slider,
            e.client_x,
            reason(e.reason),
            self.ms(e.at),
        );
    }

    fn on_image_sync(&mut self, e: &ImageSyncEvent) {
        let _ = writeln!(
            self.writer,
            "[image] slider={} width={}px",
            e.slider, e.width,
        );
    }

    fn on_image_sync_failed(&mut self, e: &ImageSyncFailedEvent) {
        let _ = writeln!(
            self.writer,
            "[image:failed] slider={} {}",
            e.slider, e.error,
        );
    }

    fn on_detach(&mut self, slider: SliderId) {
        let _ = writeln!(self.writer, "[detach] slider={slider}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use unveil_core::backend::SliderSurface;
    use unveil_core::changes::SliderChanges;
    use unveil_core::config::ControllerSettings;
    use unveil_core::controller::PointerKind;
    use unveil_core::geometry::GeometryError;
    use unveil_core::position::RevealPosition;
    use unveil_core::set::SliderSet;
    use unveil_core::structure::{MissingPart, StructuralError};
    use unveil_core::trace::Tracer;

    struct Fixed;

    impl SliderSurface for Fixed {
        fn bounds(&self) -> Rect {
            Rect::new(0.0, 0.0, 100.0, 100.0)
        }

        fn apply(&mut self, _changes: &SliderChanges) {}
    }

    fn slider() -> SliderId {
        SliderSet::new().insert(Fixed, ControllerSettings::default(), 0, &mut Tracer::none())
    }

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn reveal_line_has_pointer_and_time() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS);
        sink.on_reveal(&RevealEvent {
            slider: slider(),
            client_x: Some(250.0),
            position: RevealPosition::HALF,
            at: Some(HostTime(1_500)),
        });
        let out = output(sink);
        assert!(out.starts_with("[reveal]"), "got: {out}");
        assert!(out.contains("x=250 -> 50%"), "got: {out}");
        assert!(out.contains("at 1.500ms"), "got: {out}");
    }

    #[test]
    fn skip_names_missing_part() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_skip(&SkipEvent {
            ordinal: 2,
            error: StructuralError {
                missing: MissingPart::Overlay,
            },
        });
        let out = output(sink);
        assert!(out.contains("container=2"), "got: {out}");
        assert!(out.contains("missing=overlay"), "got: {out}");
    }

    #[test]
    fn ignored_move_reports_geometry() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_move_ignored(&IgnoredMoveEvent {
            slider: slider(),
            client_x: 10.0,
            reason: IgnoreReason::Geometry(GeometryError::DegenerateWidth(0.0)),
            at: HostTime(0),
        });
        sink.on_drag_end(&DragEvent {
            slider: slider(),
            kind: PointerKind::Touch,
            at: HostTime(0),
        });
        let out = output(sink);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2, "got: {out}");
        assert!(lines[0].contains("geometry:"), "got: {out}");
        assert!(lines[1].contains("touch"), "got: {out}");
    }
}
