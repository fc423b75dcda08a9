// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core logic for before/after image comparison sliders.
//!
//! A comparison container stacks two images; the top one sits inside an
//! overlay whose width is clipped to a draggable handle's position. Dragging
//! across the container reveals more or less of the image underneath.
//! `unveil_core` is `no_std` compatible (with `alloc`) and knows nothing about
//! the DOM: hosts implement two small traits and feed input events in.
//!
//! # Architecture
//!
//! ```text
//!   Host tree ──► StructureQuery ──► structure::discover() ──► ContainerView
//!                                                                  │
//!                 ┌────────────────────────────────────────────────┘
//!                 ▼
//!   host builds SliderSurface ──► SliderSet::insert()  (image width synced)
//!
//!   Host input ──► InputEvent ──► SliderSet::dispatch()
//!                                     │
//!                 ┌───────────────────┘
//!                 ▼
//!   SliderController (Idle/Dragging) ──► SliderChanges ──► SliderSurface::apply()
//! ```
//!
//! **[`geometry`]**: Pointer coordinate to clamped percentage; rejects inputs
//! that would put NaN into a style value.
//!
//! **[`controller`]**: Per-container drag state machine. Moves are only
//! evaluated while dragging; releases are unconditional.
//!
//! **[`set`]**: Page-wide dispatcher. Routes press/move to one slider and
//! broadcasts release/resize to all of them.
//!
//! **[`structure`]**: Typed view of a container's overlay, handle and image,
//! resolved once at attach time.
//!
//! **[`backend`]**: The [`StructureQuery`](backend::StructureQuery) and
//! [`SliderSurface`](backend::SliderSurface) traits hosts implement.
//!
//! **[`config`]**: Selectors, touch scroll policy, move throttle and initial
//! position, with per-container overrides.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! dispatch diagnostics, with zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod changes;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod id;
pub mod position;
pub mod set;
pub mod structure;
pub mod time;
pub mod trace;
