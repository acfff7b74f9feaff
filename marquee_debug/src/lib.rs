// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON-lines export for marquee
//! diagnostics.
//!
//! This crate provides [`TraceSink`](marquee_core::trace::TraceSink)
//! implementations for development and offline analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory recording of every event, with
//!   per-frame queries.
//! - [`jsonl::export`]: writes recorded events as JSON lines.

pub mod jsonl;
pub mod pretty;
pub mod recorder;
