// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-wide slider dispatch.
//!
//! A [`SliderSet`] owns every attached slider (surface plus controller) in
//! slot storage addressed by generational [`SliderId`]s. Hosts translate
//! native input into [`InputEvent`]s and hand them to
//! [`dispatch`](SliderSet::dispatch):
//!
//! - `Press` and `Move` are routed to their target slider only.
//! - `Release` and `Resize` are broadcast to every slider. A release ends
//!   every gesture on the page, including gestures that left their container.
//!
//! Detaching a slider with [`remove`](SliderSet::remove) unsubscribes it from
//! both broadcasts; its id becomes stale and is rejected from then on.

use alloc::vec::Vec;

use crate::backend::{SliderSurface, StructureQuery};
use crate::changes::SliderChanges;
use crate::config::{ContainerOverrides, ControllerSettings, SliderConfig};
use crate::controller::{MoveOutcome, PointerKind, SliderController};
use crate::geometry::ContainerGeometry;
use crate::id::SliderId;
use crate::position::RevealPosition;
use crate::structure::{self, ContainerView, StructuralError};
use crate::time::HostTime;
use crate::trace::{
    AttachEvent, DragEvent, IgnoredMoveEvent, ImageSyncEvent, ImageSyncFailedEvent, RevealEvent,
    SkipEvent, Tracer,
};

/// Host input, already translated into slider terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse press or touch start on a container.
    Press {
        /// Container that was pressed.
        target: SliderId,
        /// Input device.
        kind: PointerKind,
        /// Host time of the event.
        at: HostTime,
    },
    /// Mouse or touch move over a container.
    Move {
        /// Container the pointer moved over.
        target: SliderId,
        /// Input device.
        kind: PointerKind,
        /// Horizontal client coordinate (first touch point for touch).
        client_x: f64,
        /// Host time of the event.
        at: HostTime,
    },
    /// Mouse release or touch end anywhere on the page.
    Release {
        /// Input device.
        kind: PointerKind,
        /// Host time of the event.
        at: HostTime,
    },
    /// The viewport was resized.
    Resize {
        /// Host time of the event.
        at: HostTime,
    },
}

/// What [`SliderSet::dispatch`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Nothing changed: stale target, idle move, throttled move, release with
    /// no gesture in progress.
    Ignored,
    /// Drag state changed on this many sliders; nothing was written.
    StateChanged {
        /// Number of sliders whose state changed.
        sliders: usize,
    },
    /// Styles were written on this many sliders.
    Applied {
        /// Number of sliders written to.
        sliders: usize,
    },
}

#[derive(Debug)]
struct Entry<S> {
    surface: S,
    controller: SliderController,
}

#[derive(Debug)]
struct Slot<S> {
    generation: u32,
    entry: Option<Entry<S>>,
}

/// Every attached slider on a page.
#[derive(Debug)]
pub struct SliderSet<S> {
    slots: Vec<Slot<S>>,
    free: Vec<u32>,
    len: usize,
}

impl<S> Default for SliderSet<S> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<S: SliderSurface> SliderSet<S> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached sliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slider is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` refers to an attached slider.
    #[must_use]
    pub fn contains(&self, id: SliderId) -> bool {
        self.entry(id).is_some()
    }

    /// Ids of every attached slider, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = SliderId> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.entry.as_ref().map(|_| SliderId {
                idx: u32::try_from(idx).unwrap_or(u32::MAX),
                generation: slot.generation,
            })
        })
    }

    /// The controller of a slider.
    #[must_use]
    pub fn controller(&self, id: SliderId) -> Option<&SliderController> {
        self.entry(id).map(|e| &e.controller)
    }

    /// The surface of a slider.
    #[must_use]
    pub fn surface(&self, id: SliderId) -> Option<&S> {
        self.entry(id).map(|e| &e.surface)
    }

    /// Last written position of a slider.
    #[must_use]
    pub fn position(&self, id: SliderId) -> Option<RevealPosition> {
        self.controller(id).and_then(SliderController::position)
    }

    /// Returns `true` if the slider is mid-gesture.
    #[must_use]
    pub fn is_dragging(&self, id: SliderId) -> bool {
        self.controller(id).is_some_and(SliderController::is_dragging)
    }

    /// Discovers the comparison under `container` and attaches it.
    ///
    /// `build` turns the resolved view into the host surface. `ordinal` is
    /// the container's position in document order, used in diagnostics.
    ///
    /// # Errors
    ///
    /// [`StructuralError`] if a part is missing. The container is skipped
    /// (and traced); the set is unchanged.
    pub fn attach<Q: StructureQuery>(
        &mut self,
        query: &Q,
        container: Q::Node,
        ordinal: u32,
        config: &SliderConfig,
        overrides: ContainerOverrides,
        build: impl FnOnce(ContainerView<Q::Node>) -> S,
        tracer: &mut Tracer<'_>,
    ) -> Result<SliderId, StructuralError> {
        match structure::discover(query, container, &config.selectors) {
            Ok(view) => Ok(self.insert(build(view), config.resolve(overrides), ordinal, tracer)),
            Err(error) => {
                tracer.skip(&SkipEvent { ordinal, error });
                Err(error)
            }
        }
    }

    /// Attaches an already-built surface.
    ///
    /// The top image is synced to the container width and the configured
    /// initial position, if any, is written.
    pub fn insert(
        &mut self,
        mut surface: S,
        settings: ControllerSettings,
        ordinal: u32,
        tracer: &mut Tracer<'_>,
    ) -> SliderId {
        let id = self.alloc();
        let mut controller = SliderController::new(settings);

        let image_width = sync_image(id, &mut surface, &controller, None, tracer);
        if let Some(position) = settings.initial_position {
            surface.apply(&controller.set_position(position));
        }

        self.slots[id.idx as usize].entry = Some(Entry {
            surface,
            controller,
        });
        self.len += 1;

        tracer.attach(&AttachEvent {
            slider: id,
            ordinal,
            image_width,
            initial_position: settings.initial_position,
        });
        id
    }

    /// Detaches a slider and returns its surface.
    ///
    /// Returns `None` if `id` is stale.
    pub fn remove(&mut self, id: SliderId, tracer: &mut Tracer<'_>) -> Option<S> {
        let slot = self.slots.get_mut(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.idx);
        self.len -= 1;
        tracer.detach(id);
        Some(entry.surface)
    }

    /// Moves a slider to `position` outside of any gesture.
    ///
    /// Returns `false` if `id` is stale.
    pub fn set_position(
        &mut self,
        id: SliderId,
        position: RevealPosition,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let Some(Entry {
            surface,
            controller,
        }) = self.entry_mut(id)
        else {
            return false;
        };
        surface.apply(&controller.set_position(position));
        tracer.reveal(&RevealEvent {
            slider: id,
            client_x: None,
            position,
            at: None,
        });
        true
    }

    /// Routes one input event.
    pub fn dispatch(&mut self, event: InputEvent, tracer: &mut Tracer<'_>) -> DispatchOutcome {
        match event {
            InputEvent::Press { target, kind, at } => {
                let Some(entry) = self.entry_mut(target) else {
                    return DispatchOutcome::Ignored;
                };
                if !entry.controller.press(kind) {
                    return DispatchOutcome::Ignored;
                }
                tracer.drag_start(&DragEvent {
                    slider: target,
                    kind,
                    at,
                });
                DispatchOutcome::StateChanged { sliders: 1 }
            }
            InputEvent::Move {
                target,
                client_x,
                at,
                ..
            } => {
                let Some(Entry {
                    surface,
                    controller,
                }) = self.entry_mut(target)
                else {
                    return DispatchOutcome::Ignored;
                };
                let outcome = controller.pointer_move(client_x, at, || {
                    ContainerGeometry::from_rect(surface.bounds())
                });
                match outcome {
                    MoveOutcome::Applied(position) => {
                        surface.apply(&SliderChanges::reveal(position));
                        tracer.reveal(&RevealEvent {
                            slider: target,
                            client_x: Some(client_x),
                            position,
                            at: Some(at),
                        });
                        DispatchOutcome::Applied { sliders: 1 }
                    }
                    MoveOutcome::Ignored(reason) => {
                        tracer.move_ignored(&IgnoredMoveEvent {
                            slider: target,
                            client_x,
                            reason,
                            at,
                        });
                        DispatchOutcome::Ignored
                    }
                }
            }
            InputEvent::Release { at, .. } => {
                let mut ended = 0;
                for (id, entry) in self.entries_mut() {
                    if let Some(kind) = entry.controller.release() {
                        ended += 1;
                        tracer.drag_end(&DragEvent {
                            slider: id,
                            kind,
                            at,
                        });
                    }
                }
                if ended == 0 {
                    DispatchOutcome::Ignored
                } else {
                    DispatchOutcome::StateChanged { sliders: ended }
                }
            }
            InputEvent::Resize { at } => {
                let mut synced = 0;
                for (id, entry) in self.entries_mut() {
                    let Entry {
                        surface,
                        controller,
                    } = entry;
                    if sync_image(id, surface, controller, Some(at), tracer).is_some() {
                        synced += 1;
                    }
                }
                if synced == 0 {
                    DispatchOutcome::Ignored
                } else {
                    DispatchOutcome::Applied { sliders: synced }
                }
            }
        }
    }

    fn alloc(&mut self) -> SliderId {
        if let Some(idx) = self.free.pop() {
            let generation = self.slots[idx as usize].generation;
            return SliderId { idx, generation };
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a page never holds anywhere near u32::MAX sliders"
        )]
        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: None,
        });
        SliderId { idx, generation: 0 }
    }

    fn entry(&self, id: SliderId) -> Option<&Entry<S>> {
        let slot = self.slots.get(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, id: SliderId) -> Option<&mut Entry<S>> {
        let slot = self.slots.get_mut(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    fn entries_mut(&mut self) -> impl Iterator<Item = (SliderId, &mut Entry<S>)> {
        self.slots.iter_mut().enumerate().filter_map(|(idx, slot)| {
            let generation = slot.generation;
            slot.entry.as_mut().map(|entry| {
                let id = SliderId {
                    idx: u32::try_from(idx).unwrap_or(u32::MAX),
                    generation,
                };
                (id, entry)
            })
        })
    }
}

/// Sizes the top image to the container's rendered width and traces the
/// result. Returns the width written.
fn sync_image<S: SliderSurface>(
    id: SliderId,
    surface: &mut S,
    controller: &SliderController,
    at: Option<HostTime>,
    tracer: &mut Tracer<'_>,
) -> Option<f64> {
    match controller.sync_image_width(surface.rendered_width()) {
        Ok(changes) => {
            surface.apply(&changes);
            let width = changes.image_width?;
            tracer.image_sync(&ImageSyncEvent {
                slider: id,
                width,
                at,
            });
            Some(width)
        }
        Err(error) => {
            tracer.image_sync_failed(&ImageSyncFailedEvent { slider: id, error });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Rect;

    use super::*;
    use crate::config::TouchScrollPolicy;
    use crate::structure::MissingPart;
    use crate::time::Duration;

    #[derive(Debug)]
    struct Recording {
        bounds: Rect,
        writes: Vec<SliderChanges>,
        overlay_width: Option<RevealPosition>,
        handle_left: Option<RevealPosition>,
        image_width: Option<f64>,
    }

    impl Recording {
        fn new(left: f64, width: f64) -> Self {
            Self {
                bounds: Rect::new(left, 0.0, left + width, 200.0),
                writes: Vec::new(),
                overlay_width: None,
                handle_left: None,
                image_width: None,
            }
        }
    }

    impl SliderSurface for Recording {
        fn bounds(&self) -> Rect {
            self.bounds
        }

        fn apply(&mut self, changes: &SliderChanges) {
            self.writes.push(*changes);
            if let Some(p) = changes.reveal {
                self.overlay_width = Some(p);
                self.handle_left = Some(p);
            }
            if let Some(w) = changes.image_width {
                self.image_width = Some(w);
            }
        }
    }

    fn press(target: SliderId) -> InputEvent {
        InputEvent::Press {
            target,
            kind: PointerKind::Mouse,
            at: HostTime(0),
        }
    }

    fn move_to(target: SliderId, client_x: f64) -> InputEvent {
        InputEvent::Move {
            target,
            kind: PointerKind::Mouse,
            client_x,
            at: HostTime(0),
        }
    }

    const RELEASE: InputEvent = InputEvent::Release {
        kind: PointerKind::Mouse,
        at: HostTime(0),
    };

    fn set_with(surfaces: Vec<Recording>) -> (SliderSet<Recording>, Vec<SliderId>) {
        let mut set = SliderSet::new();
        let ids = surfaces
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                set.insert(
                    s,
                    ControllerSettings::default(),
                    u32::try_from(i).unwrap(),
                    &mut Tracer::none(),
                )
            })
            .collect();
        (set, ids)
    }

    #[test]
    fn attach_syncs_image_width() {
        let (set, ids) = set_with(vec![Recording::new(100.0, 300.0)]);
        let surface = set.surface(ids[0]).unwrap();
        assert_eq!(surface.image_width, Some(300.0));
        assert_eq!(surface.overlay_width, None, "markup keeps its own position");
    }

    #[test]
    fn attach_writes_configured_initial_position() {
        let mut set = SliderSet::new();
        let settings = ControllerSettings {
            initial_position: Some(RevealPosition::HALF),
            ..ControllerSettings::default()
        };
        let id = set.insert(
            Recording::new(0.0, 640.0),
            settings,
            0,
            &mut Tracer::none(),
        );
        let surface = set.surface(id).unwrap();
        assert_eq!(surface.overlay_width, Some(RevealPosition::HALF));
        assert_eq!(set.position(id), Some(RevealPosition::HALF));
    }

    #[test]
    fn scenario_drag_then_release() {
        let (mut set, ids) = set_with(vec![Recording::new(100.0, 300.0)]);
        let a = ids[0];
        let t = &mut Tracer::none();

        assert_eq!(
            set.dispatch(press(a), t),
            DispatchOutcome::StateChanged { sliders: 1 }
        );
        assert_eq!(
            set.dispatch(move_to(a, 250.0), t),
            DispatchOutcome::Applied { sliders: 1 }
        );
        assert_eq!(
            set.dispatch(RELEASE, t),
            DispatchOutcome::StateChanged { sliders: 1 }
        );
        assert_eq!(set.dispatch(move_to(a, 400.0), t), DispatchOutcome::Ignored);

        let surface = set.surface(a).unwrap();
        assert_eq!(surface.overlay_width, Some(RevealPosition::HALF));
        assert_eq!(surface.handle_left, surface.overlay_width);
        // Initial image sync plus the single move.
        assert_eq!(surface.writes.len(), 2);
    }

    #[test]
    fn scenario_drag_past_left_edge() {
        let (mut set, ids) = set_with(vec![Recording::new(100.0, 300.0)]);
        let t = &mut Tracer::none();
        set.dispatch(press(ids[0]), t);
        set.dispatch(move_to(ids[0], 50.0), t);
        let surface = set.surface(ids[0]).unwrap();
        assert_eq!(surface.overlay_width, Some(RevealPosition::MIN));
        assert_eq!(surface.handle_left, Some(RevealPosition::MIN));
    }

    #[test]
    fn release_broadcasts_to_all() {
        let (mut set, ids) = set_with(vec![
            Recording::new(0.0, 200.0),
            Recording::new(300.0, 200.0),
        ]);
        let (a, b) = (ids[0], ids[1]);
        let t = &mut Tracer::none();

        set.dispatch(press(a), t);
        assert!(set.is_dragging(a), "A pressed");
        assert!(!set.is_dragging(b), "B untouched");

        assert_eq!(
            set.dispatch(RELEASE, t),
            DispatchOutcome::StateChanged { sliders: 1 }
        );
        assert!(!set.is_dragging(a), "release ends A");
        assert!(!set.is_dragging(b), "B stays idle");
        assert_eq!(set.dispatch(RELEASE, t), DispatchOutcome::Ignored);
    }

    #[test]
    fn moves_only_reach_their_target() {
        let (mut set, ids) = set_with(vec![
            Recording::new(0.0, 200.0),
            Recording::new(300.0, 200.0),
        ]);
        let t = &mut Tracer::none();
        set.dispatch(press(ids[0]), t);
        set.dispatch(press(ids[1]), t);
        set.dispatch(move_to(ids[0], 100.0), t);

        assert_eq!(set.position(ids[0]), Some(RevealPosition::HALF));
        assert_eq!(set.position(ids[1]), None);
    }

    #[test]
    fn resize_resyncs_every_image() {
        let (mut set, ids) = set_with(vec![
            Recording::new(0.0, 200.0),
            Recording::new(300.0, 200.0),
        ]);
        for id in &ids {
            let idx = id.index() as usize;
            // Reach in through the slot to simulate a layout change.
            let entry = set.slots[idx].entry.as_mut().unwrap();
            entry.surface.bounds = Rect::new(0.0, 0.0, 480.0, 100.0);
        }
        let outcome = set.dispatch(InputEvent::Resize { at: HostTime(5) }, &mut Tracer::none());
        assert_eq!(outcome, DispatchOutcome::Applied { sliders: 2 });
        for id in ids {
            assert_eq!(set.surface(id).unwrap().image_width, Some(480.0));
        }
    }

    #[test]
    fn resize_twice_is_idempotent() {
        let (mut set, ids) = set_with(vec![Recording::new(0.0, 320.0)]);
        let t = &mut Tracer::none();
        set.dispatch(InputEvent::Resize { at: HostTime(1) }, t);
        let first = set.surface(ids[0]).unwrap().image_width;
        set.dispatch(InputEvent::Resize { at: HostTime(2) }, t);
        assert_eq!(set.surface(ids[0]).unwrap().image_width, first);
    }

    #[test]
    fn zero_width_container_writes_nothing_on_move() {
        let (mut set, ids) = set_with(vec![Recording::new(100.0, 0.0)]);
        let t = &mut Tracer::none();
        set.dispatch(press(ids[0]), t);
        assert_eq!(set.dispatch(move_to(ids[0], 120.0), t), DispatchOutcome::Ignored);
        let surface = set.surface(ids[0]).unwrap();
        assert_eq!(surface.overlay_width, None);
        assert_eq!(surface.image_width, Some(0.0));
    }

    #[test]
    fn removed_ids_go_stale() {
        let (mut set, ids) = set_with(vec![Recording::new(0.0, 100.0)]);
        let t = &mut Tracer::none();
        let old = ids[0];
        assert!(set.remove(old, t).is_some(), "first remove detaches");
        assert!(set.remove(old, t).is_none(), "second remove is rejected");
        assert!(set.is_empty());
        assert_eq!(set.dispatch(press(old), t), DispatchOutcome::Ignored);

        let new = set.insert(
            Recording::new(0.0, 100.0),
            ControllerSettings::default(),
            0,
            t,
        );
        assert_eq!(new.index(), old.index(), "slot is reused");
        assert_ne!(new, old);
        assert!(!set.contains(old));
        assert!(!set.set_position(old, RevealPosition::MAX, t));
    }

    #[test]
    fn detached_slider_misses_broadcasts() {
        let (mut set, ids) = set_with(vec![
            Recording::new(0.0, 100.0),
            Recording::new(0.0, 100.0),
        ]);
        let t = &mut Tracer::none();
        set.dispatch(press(ids[0]), t);
        let detached = set.remove(ids[0], t).unwrap();
        assert_eq!(set.dispatch(RELEASE, t), DispatchOutcome::Ignored);
        assert_eq!(
            set.dispatch(InputEvent::Resize { at: HostTime(0) }, t),
            DispatchOutcome::Applied { sliders: 1 }
        );
        assert_eq!(detached.writes.len(), 1, "only the attach-time sync");
    }

    #[test]
    fn throttle_comes_from_settings() {
        let mut set = SliderSet::new();
        let t = &mut Tracer::none();
        let id = set.insert(
            Recording::new(0.0, 100.0),
            ControllerSettings {
                move_throttle: Duration(10),
                touch_scroll: TouchScrollPolicy::Prevent,
                initial_position: None,
            },
            0,
            t,
        );
        set.dispatch(press(id), t);
        let at = |ticks| InputEvent::Move {
            target: id,
            kind: PointerKind::Touch,
            client_x: 40.0,
            at: HostTime(ticks),
        };
        assert_eq!(set.dispatch(at(100), t), DispatchOutcome::Applied { sliders: 1 });
        assert_eq!(set.dispatch(at(104), t), DispatchOutcome::Ignored);
        assert_eq!(set.dispatch(at(111), t), DispatchOutcome::Applied { sliders: 1 });
    }

    #[test]
    fn attach_skips_incomplete_structure() {
        struct OnlyOverlay;
        impl StructureQuery for OnlyOverlay {
            type Node = u8;
            fn find(&self, parent: &u8, selector: &str) -> Option<u8> {
                (*parent == 0 && selector == ".comparison-overlay").then_some(1)
            }
        }

        let mut set: SliderSet<Recording> = SliderSet::new();
        let result = set.attach(
            &OnlyOverlay,
            0,
            0,
            &SliderConfig::default(),
            ContainerOverrides::default(),
            |_| Recording::new(0.0, 100.0),
            &mut Tracer::none(),
        );
        assert_eq!(
            result,
            Err(StructuralError {
                missing: MissingPart::Handle
            })
        );
        assert!(set.is_empty());
    }

    #[test]
    fn ids_lists_live_sliders() {
        let (mut set, ids) = set_with(vec![
            Recording::new(0.0, 100.0),
            Recording::new(0.0, 100.0),
            Recording::new(0.0, 100.0),
        ]);
        set.remove(ids[1], &mut Tracer::none());
        let live: Vec<_> = set.ids().collect();
        assert_eq!(live, vec![ids[0], ids[2]]);
        assert_eq!(set.len(), 2);
    }
}
