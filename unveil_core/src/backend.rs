// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! A backend binds the core to a concrete element tree. It provides:
//!
//! - **Structure queries**: [`StructureQuery`] finds the overlay, handle and
//!   image under a container so [`discover`](crate::structure::discover) can
//!   build a typed [`ContainerView`](crate::structure::ContainerView).
//!
//! - **A surface per container**: [`SliderSurface`] answers geometry queries
//!   and applies [`SliderChanges`] to the host nodes.
//!
//! - **Time**: a `now() -> HostTime` free function stamping input events.
//!
//! - **Listener wiring**: translating host input into
//!   [`InputEvent`](crate::set::InputEvent)s and feeding them to a
//!   [`SliderSet`](crate::set::SliderSet). This differs fundamentally between
//!   hosts and is not abstracted by a trait.
//!
//! # Crate boundaries
//!
//! `unveil_core` owns the math, the drag state machine and dispatch.
//! `unveil_backend_web` binds it to the DOM; `unveil_harness` binds it to an
//! in-memory fake for tests.

use kurbo::Rect;

use crate::changes::SliderChanges;

/// Finds nodes in a host element tree.
pub trait StructureQuery {
    /// The host's node handle.
    type Node;

    /// Returns the first descendant of `parent` matching `selector`.
    fn find(&self, parent: &Self::Node, selector: &str) -> Option<Self::Node>;
}

/// One comparison container as seen by the core.
///
/// Geometry is read on demand so that layout changes between events are always
/// observed; nothing is cached across events.
///
/// # Event handler pseudocode
///
/// ```rust,ignore
/// fn on_move(id: SliderId, client_x: f64) {
///     let event = InputEvent::Move { target: id, kind, client_x, at: now() };
///     // Reads surface.bounds(), computes the position, calls surface.apply().
///     let outcome = set.dispatch(event, &mut tracer);
/// }
/// ```
pub trait SliderSurface {
    /// Container bounding rectangle in pointer client coordinates.
    fn bounds(&self) -> Rect;

    /// Rendered container width in pixels, as used for the top image.
    ///
    /// Hosts may round this differently from [`bounds`](Self::bounds) (the DOM
    /// reports an integer `offsetWidth`).
    fn rendered_width(&self) -> f64 {
        self.bounds().width()
    }

    /// Writes `changes` to the host nodes.
    fn apply(&mut self, changes: &SliderChanges);
}
