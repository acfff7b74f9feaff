// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven interaction logic for studio marketing pages.
//!
//! `marquee_core` holds every decision the page makes in response to scroll,
//! pointer and form input, with no browser dependency. It is `no_std`
//! compatible (with `alloc`); element references are opaque
//! [`ElementId`](element::ElementId) handles and all DOM mutation is described
//! as [`DomChanges`](backend::DomChanges) that a backend applies.
//!
//! # Architecture
//!
//! The scroll path turns a burst of browser scroll events into one batch of
//! style writes per rendered frame:
//!
//! ```text
//!   scroll events ──► FrameCoalescer::request() ──► (one rAF per frame)
//!                                                       │
//!                 ┌─────────────────────────────────────┘
//!                 ▼
//!   ScrollSample ──► ScrollEffects::frame() ──► DomChanges ──► Presenter::apply()
//!                        │
//!                        ├─ ParallaxEngine::recompute()
//!                        ├─ HeroDrift::update()
//!                        ├─ RevealScheduler::check() ──► delayed reveals
//!                        └─ SectionTracker::update()
//! ```
//!
//! **[`coalesce`]**: the at-most-one-pending-frame flag behind the scroll
//! dispatcher.
//!
//! **[`parallax`]**: depth-scaled offsets for a fixed registry of layers.
//!
//! **[`reveal`]**: the unified reveal scheduler (persistent or once groups,
//! staggered delays).
//!
//! **[`section`]**: which page section the scroll offset is in.
//!
//! **[`effects`]**: bundles the scroll-driven controllers behind one
//! per-frame entry point.
//!
//! **[`nav`]**, **[`filter`]**, **[`video`]**, **[`form`]**, **[`hover`]**:
//! the page's small stateless or nearly stateless collaborators.
//!
//! **[`config`]**: the markup contract (selectors, speeds, trigger lines).
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! the zero-overhead [`Tracer`](trace::Tracer) wrapper.
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
pub mod coalesce;
pub mod config;
pub mod effects;
pub mod element;
pub mod filter;
pub mod form;
pub mod geometry;
pub mod hover;
pub mod nav;
pub mod parallax;
pub mod reveal;
pub mod section;
pub mod trace;
pub mod video;

pub use kurbo;
