// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fake host and scripted gestures for exercising unveil without a browser.
//!
//! - [`FakeTree`]: an in-memory element tree implementing
//!   [`StructureQuery`](unveil_core::backend::StructureQuery) with class and
//!   tag selectors, attributes and per-element layout.
//! - [`FakeSurface`]: a [`SliderSurface`](unveil_core::backend::SliderSurface)
//!   that records the inline styles a browser would receive.
//! - [`CollectingSink`]: stores every trace event for assertions.
//! - [`FakePage`]: attaches every container of a tree and replays [`Step`]s
//!   against a simulated clock.
//! - [`reference_scenarios`]: the reference drag gestures as ready-made
//!   scripts.

#![no_std]

extern crate alloc;

mod page;
mod sink;
mod surface;
mod tree;

pub use page::{FakePage, Scenario, Step, reference_scenarios};
pub use sink::{CollectingSink, TraceRecord};
pub use surface::{FakeLayout, FakeSurface};
pub use tree::{FakeNode, FakeTree};
