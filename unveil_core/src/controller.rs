// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-container drag state machine.
//!
//! ```text
//!            press (container)
//!   Idle ─────────────────────────► Dragging
//!    ▲                                 │
//!    └──────── release (window) ───────┘
//! ```
//!
//! Moves are only evaluated in `Dragging`; in `Idle` they return before any
//! geometry is read. Release is broadcast to every controller and is a no-op
//! when already idle.

use crate::changes::SliderChanges;
use crate::config::ControllerSettings;
use crate::geometry::{self, ContainerGeometry, GeometryError};
use crate::position::RevealPosition;
use crate::time::HostTime;

/// Input device that started or continued a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse button events.
    Mouse,
    /// Touch events (the first touch point is used).
    Touch,
}

impl PointerKind {
    /// Lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mouse => "mouse",
            Self::Touch => "touch",
        }
    }
}

/// Whether a slider is being dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragState {
    /// Moves are ignored.
    #[default]
    Idle,
    /// Moves update the reveal position. Carries the device that pressed.
    Dragging(PointerKind),
}

/// Why a move did not produce a style write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IgnoreReason {
    /// The slider is not being dragged.
    Idle,
    /// The previous applied move was less than the throttle interval ago.
    Throttled,
    /// The geometry could not produce a position.
    Geometry(GeometryError),
}

/// Result of feeding one move to a controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// The position was recomputed and should be written.
    Applied(RevealPosition),
    /// Nothing should be written.
    Ignored(IgnoreReason),
}

/// Drag state and last written position of one comparison.
#[derive(Clone, Debug)]
pub struct SliderController {
    state: DragState,
    position: Option<RevealPosition>,
    last_applied: Option<HostTime>,
    settings: ControllerSettings,
}

impl SliderController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            state: DragState::Idle,
            position: None,
            last_applied: None,
            settings,
        }
    }

    /// Current drag state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns `true` while a gesture is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Last position this controller wrote, if any.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<RevealPosition> {
        self.position
    }

    /// The settings this controller runs with.
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Starts a gesture. Returns `true` if the controller was idle.
    ///
    /// Pressing again while dragging keeps the original gesture.
    pub fn press(&mut self, kind: PointerKind) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging(kind);
        self.last_applied = None;
        true
    }

    /// Ends any gesture. Returns the device of the gesture that ended, or
    /// `None` if the controller was already idle.
    pub fn release(&mut self) -> Option<PointerKind> {
        match core::mem::take(&mut self.state) {
            DragState::Dragging(kind) => Some(kind),
            DragState::Idle => None,
        }
    }

    /// Feeds a pointer move at client coordinate `client_x`.
    ///
    /// `geometry` is only called while dragging, so idle moves never touch
    /// the host's layout.
    pub fn pointer_move(
        &mut self,
        client_x: f64,
        at: HostTime,
        geometry: impl FnOnce() -> ContainerGeometry,
    ) -> MoveOutcome {
        if !self.is_dragging() {
            return MoveOutcome::Ignored(IgnoreReason::Idle);
        }
        let throttle = self.settings.move_throttle;
        if !throttle.is_zero()
            && let Some(last) = self.last_applied
            && at.saturating_duration_since(last) < throttle
        {
            return MoveOutcome::Ignored(IgnoreReason::Throttled);
        }
        match geometry().reveal_at(client_x) {
            Ok(position) => {
                self.position = Some(position);
                self.last_applied = Some(at);
                MoveOutcome::Applied(position)
            }
            Err(err) => MoveOutcome::Ignored(IgnoreReason::Geometry(err)),
        }
    }

    /// Moves the slider to `position` regardless of drag state.
    pub fn set_position(&mut self, position: RevealPosition) -> SliderChanges {
        self.position = Some(position);
        SliderChanges::reveal(position)
    }

    /// Changes that size the top image to the container's rendered width.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidImageWidth`] for negative or non-finite widths.
    pub fn sync_image_width(&self, rendered_width: f64) -> Result<SliderChanges, GeometryError> {
        geometry::image_width(rendered_width).map(SliderChanges::image_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Duration;

    const BOX: ContainerGeometry = ContainerGeometry::new(100.0, 300.0);

    fn controller() -> SliderController {
        SliderController::new(ControllerSettings::default())
    }

    #[test]
    fn starts_idle() {
        let c = controller();
        assert_eq!(c.state(), DragState::Idle);
        assert_eq!(c.position(), None);
    }

    #[test]
    fn idle_move_never_reads_geometry() {
        let mut c = controller();
        let outcome = c.pointer_move(250.0, HostTime(0), || {
            panic!("geometry must not be read while idle")
        });
        assert_eq!(outcome, MoveOutcome::Ignored(IgnoreReason::Idle));
        assert_eq!(c.position(), None);
    }

    #[test]
    fn press_move_release_move() {
        let mut c = controller();
        assert!(c.press(PointerKind::Mouse), "idle → dragging");
        assert_eq!(
            c.pointer_move(250.0, HostTime(1), || BOX),
            MoveOutcome::Applied(RevealPosition::HALF)
        );
        assert_eq!(c.release(), Some(PointerKind::Mouse));
        assert_eq!(
            c.pointer_move(400.0, HostTime(2), || BOX),
            MoveOutcome::Ignored(IgnoreReason::Idle)
        );
        assert_eq!(c.position(), Some(RevealPosition::HALF));
    }

    #[test]
    fn release_when_idle_is_noop() {
        let mut c = controller();
        assert_eq!(c.release(), None);
        assert_eq!(c.state(), DragState::Idle);
    }

    #[test]
    fn second_press_keeps_gesture() {
        let mut c = controller();
        assert!(c.press(PointerKind::Touch), "first press starts");
        assert!(!c.press(PointerKind::Mouse), "second press is absorbed");
        assert_eq!(c.state(), DragState::Dragging(PointerKind::Touch));
    }

    #[test]
    fn drag_left_of_container_clamps_to_zero() {
        let mut c = controller();
        c.press(PointerKind::Mouse);
        assert_eq!(
            c.pointer_move(50.0, HostTime(0), || BOX),
            MoveOutcome::Applied(RevealPosition::MIN)
        );
    }

    #[test]
    fn degenerate_geometry_keeps_previous_position() {
        let mut c = controller();
        c.press(PointerKind::Mouse);
        c.pointer_move(250.0, HostTime(0), || BOX);
        let outcome = c.pointer_move(300.0, HostTime(1), || ContainerGeometry::new(100.0, 0.0));
        assert_eq!(
            outcome,
            MoveOutcome::Ignored(IgnoreReason::Geometry(GeometryError::DegenerateWidth(0.0)))
        );
        assert_eq!(c.position(), Some(RevealPosition::HALF));
    }

    #[test]
    fn throttle_skips_close_moves() {
        let mut c = SliderController::new(ControllerSettings {
            move_throttle: Duration(10),
            ..ControllerSettings::default()
        });
        c.press(PointerKind::Mouse);
        assert!(matches!(
            c.pointer_move(130.0, HostTime(100), || BOX),
            MoveOutcome::Applied(_)
        ));
        assert_eq!(
            c.pointer_move(160.0, HostTime(105), || BOX),
            MoveOutcome::Ignored(IgnoreReason::Throttled)
        );
        assert!(matches!(
            c.pointer_move(190.0, HostTime(110), || BOX),
            MoveOutcome::Applied(_)
        ));
    }

    #[test]
    fn new_gesture_is_not_throttled() {
        let mut c = SliderController::new(ControllerSettings {
            move_throttle: Duration(1_000),
            ..ControllerSettings::default()
        });
        c.press(PointerKind::Mouse);
        c.pointer_move(130.0, HostTime(100), || BOX);
        c.release();
        c.press(PointerKind::Mouse);
        assert!(matches!(
            c.pointer_move(160.0, HostTime(101), || BOX),
            MoveOutcome::Applied(_)
        ));
    }

    #[test]
    fn image_sync_is_idempotent() {
        let c = controller();
        let first = c.sync_image_width(300.0).unwrap();
        let second = c.sync_image_width(300.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.image_width, Some(300.0));
        assert_eq!(first.reveal, None);
    }

    #[test]
    fn set_position_ignores_drag_state() {
        let mut c = controller();
        let changes = c.set_position(RevealPosition::MAX);
        assert_eq!(changes, SliderChanges::reveal(RevealPosition::MAX));
        assert_eq!(c.position(), Some(RevealPosition::MAX));
        assert_eq!(c.state(), DragState::Idle);
    }
}
