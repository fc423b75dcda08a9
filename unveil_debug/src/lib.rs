// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON-lines output for unveil diagnostics.
//!
//! This crate provides [`TraceSink`](unveil_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`json::JsonLinesSink`]: one JSON object per event, for feeding into
//!   `jq` or a log pipeline.

pub mod json;
pub mod pretty;
