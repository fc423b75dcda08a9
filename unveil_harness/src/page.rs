// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted pages.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;
use unveil_core::config::{ContainerOverrides, SliderConfig};
use unveil_core::controller::{DragState, PointerKind};
use unveil_core::id::SliderId;
use unveil_core::position::RevealPosition;
use unveil_core::set::{DispatchOutcome, InputEvent, SliderSet};
use unveil_core::time::{Duration, HostTime, Timebase};
use unveil_core::trace::{TraceSink, Tracer};

use crate::sink::CollectingSink;
use crate::surface::FakeSurface;
use crate::tree::FakeTree;

/// One scripted input. Sliders are addressed by their index among the
/// attached sliders, in document order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Mouse press or touch start on a slider.
    Press(usize, PointerKind),
    /// Pointer move over a slider at a client x coordinate.
    Move(usize, PointerKind, f64),
    /// Page-wide release.
    Release(PointerKind),
    /// Viewport resize.
    Resize,
    /// Lets simulated time pass without input.
    Wait(Duration),
}

/// Every comparison of a [`FakeTree`], attached and driven by a simulated
/// clock.
///
/// The clock runs in microsecond ticks ([`Timebase::MICROS`]) and advances by
/// one millisecond after each input step.
#[derive(Debug)]
pub struct FakePage<T: TraceSink = CollectingSink> {
    tree: FakeTree,
    set: SliderSet<FakeSurface>,
    sliders: Vec<SliderId>,
    clock: HostTime,
    sink: T,
}

impl FakePage {
    /// Attaches every container of `tree`, collecting trace events.
    #[must_use]
    pub fn attach(tree: FakeTree, config: &SliderConfig) -> Self {
        Self::attach_with_sink(tree, config, CollectingSink::new())
    }
}

impl<T: TraceSink> FakePage<T> {
    /// Step between scripted inputs.
    pub const STEP: Duration = Duration::from_millis(1, Timebase::MICROS);

    /// Attaches every container of `tree`, tracing into `sink`.
    ///
    /// Containers are read the way the web backend reads them, including
    /// `data-*` overrides.
    pub fn attach_with_sink(tree: FakeTree, config: &SliderConfig, mut sink: T) -> Self {
        let mut set = SliderSet::new();
        let mut sliders = Vec::new();
        {
            let mut tracer = Tracer::new(&mut sink);
            let containers = tree.query_all(&config.selectors.container);
            for (ordinal, container) in (0_u32..).zip(containers) {
                let overrides = ContainerOverrides::from_attributes(
                    |name| tree.attribute(container, name),
                    ordinal,
                    &mut tracer,
                );
                let attached = set.attach(
                    &tree,
                    container,
                    ordinal,
                    config,
                    overrides,
                    |view| FakeSurface::new(tree.layout(view.container)),
                    &mut tracer,
                );
                if let Ok(id) = attached {
                    sliders.push(id);
                }
            }
        }
        Self {
            tree,
            set,
            sliders,
            clock: HostTime(0),
            sink,
        }
    }

    /// The element tree; layout changes made through it are seen by the
    /// sliders on their next event.
    #[must_use]
    pub fn tree(&self) -> &FakeTree {
        &self.tree
    }

    /// The underlying slider set.
    #[must_use]
    pub fn set(&self) -> &SliderSet<FakeSurface> {
        &self.set
    }

    /// Ids of the attached sliders, in document order.
    #[must_use]
    pub fn ids(&self) -> &[SliderId] {
        &self.sliders
    }

    /// Number of attached sliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    /// Returns `true` if nothing was attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }

    /// Surface of the `index`th slider.
    #[must_use]
    pub fn surface(&self, index: usize) -> Option<&FakeSurface> {
        self.set.surface(*self.sliders.get(index)?)
    }

    /// Drag state of the `index`th slider.
    #[must_use]
    pub fn state(&self, index: usize) -> Option<DragState> {
        let id = *self.sliders.get(index)?;
        self.set.controller(id).map(|c| c.state())
    }

    /// The trace sink.
    #[must_use]
    pub fn sink(&self) -> &T {
        &self.sink
    }

    /// The trace sink, mutably.
    pub fn sink_mut(&mut self) -> &mut T {
        &mut self.sink
    }

    /// Current simulated time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.clock
    }

    /// Moves the `index`th slider programmatically.
    pub fn set_position(&mut self, index: usize, position: RevealPosition) -> bool {
        let Some(&id) = self.sliders.get(index) else {
            return false;
        };
        self.set
            .set_position(id, position, &mut Tracer::new(&mut self.sink))
    }

    /// Detaches the `index`th slider. Later steps addressing it are ignored.
    pub fn detach(&mut self, index: usize) -> Option<FakeSurface> {
        let id = *self.sliders.get(index)?;
        self.set.remove(id, &mut Tracer::new(&mut self.sink))
    }

    /// Replays one step. Returns `None` for [`Step::Wait`].
    pub fn step(&mut self, step: Step) -> Option<DispatchOutcome> {
        let at = self.clock;
        let event = match step {
            Step::Wait(duration) => {
                self.clock = self.clock + duration;
                return None;
            }
            Step::Press(index, kind) => InputEvent::Press {
                target: self.target(index)?,
                kind,
                at,
            },
            Step::Move(index, kind, client_x) => InputEvent::Move {
                target: self.target(index)?,
                kind,
                client_x,
                at,
            },
            Step::Release(kind) => InputEvent::Release { kind, at },
            Step::Resize => InputEvent::Resize { at },
        };
        self.clock = self.clock + Self::STEP;
        Some(self.set.dispatch(event, &mut Tracer::new(&mut self.sink)))
    }

    /// Replays `steps` in order, returning the outcome of each input.
    pub fn run(&mut self, steps: &[Step]) -> Vec<DispatchOutcome> {
        steps.iter().filter_map(|&step| self.step(step)).collect()
    }

    fn target(&self, index: usize) -> Option<SliderId> {
        self.sliders.get(index).copied()
    }
}

/// A named gesture script over a row of containers.
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Short identifier.
    pub name: &'static str,
    /// One well-formed comparison is built per rectangle.
    pub containers: Vec<Rect>,
    /// The script.
    pub steps: Vec<Step>,
    /// Final overlay width of each slider (`None`: never written).
    pub expected: Vec<Option<&'static str>>,
}

impl Scenario {
    /// Builds the scenario's tree.
    #[must_use]
    pub fn tree(&self) -> FakeTree {
        let mut tree = FakeTree::new();
        for bounds in &self.containers {
            tree.comparison(*bounds);
        }
        tree
    }

    /// Attaches the scenario's tree with the default configuration and runs
    /// the script, tracing into `sink`.
    pub fn replay<T: TraceSink>(&self, sink: T) -> FakePage<T> {
        let mut page = FakePage::attach_with_sink(self.tree(), &SliderConfig::default(), sink);
        page.run(&self.steps);
        page
    }
}

/// The reference drag gestures.
///
/// Containers span `[100, 400]` horizontally (300 px wide).
#[must_use]
pub fn reference_scenarios() -> Vec<Scenario> {
    use PointerKind::{Mouse, Touch};

    let a = Rect::new(100.0, 0.0, 400.0, 200.0);
    let b = Rect::new(100.0, 220.0, 400.0, 420.0);
    vec![
        Scenario {
            name: "drag-then-release",
            containers: vec![a],
            steps: vec![
                Step::Press(0, Mouse),
                Step::Move(0, Mouse, 250.0),
                Step::Release(Mouse),
                Step::Move(0, Mouse, 400.0),
            ],
            expected: vec![Some("50%")],
        },
        Scenario {
            name: "drag-past-left-edge",
            containers: vec![a],
            steps: vec![Step::Press(0, Mouse), Step::Move(0, Mouse, 50.0)],
            expected: vec![Some("0%")],
        },
        Scenario {
            name: "release-ends-every-drag",
            containers: vec![a, b],
            steps: vec![
                Step::Press(0, Touch),
                Step::Move(0, Touch, 400.0),
                Step::Release(Touch),
                Step::Move(0, Touch, 100.0),
                Step::Move(1, Touch, 100.0),
            ],
            expected: vec![Some("100%"), None],
        },
    ]
}
