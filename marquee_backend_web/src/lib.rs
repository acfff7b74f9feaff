// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for marquee.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`ScrollDispatcher`]: passive scroll listener coalesced to one
//!   `requestAnimationFrame` callback per rendered frame, plus an immediate
//!   path for `resize`
//! - [`DomPresenter`]: element slots, geometry reads and style/class writes
//! - [`set_timeout`]: fire-and-forget delayed callbacks
//! - [`ConsoleSink`]: a [`TraceSink`](marquee_core::trace::TraceSink) that
//!   logs to the browser console
//!
//! plus a few window queries ([`sample`], [`prefers_reduced_motion`],
//! [`is_touch`], [`smooth_scroll_to`]).

#![no_std]

extern crate alloc;

mod console;
mod presenter;
mod raf;
mod timer;

pub use console::{ConsoleSink, log_error};
pub use marquee_core::backend::Presenter;
pub use presenter::DomPresenter;
pub use raf::{Dispatch, ScrollDispatcher};
pub use timer::set_timeout;

use marquee_core::geometry::ScrollSample;
use wasm_bindgen::JsValue;
use web_sys::{ScrollBehavior, ScrollToOptions, Window};

/// Returns the global `window`.
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Reads the scroll offset and viewport size.
pub fn sample(window: &Window) -> Result<ScrollSample, JsValue> {
    let scroll_y = window.scroll_y()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(ScrollSample::new(scroll_y, width, height))
}

/// Returns `true` if the visitor asked for reduced motion.
#[must_use]
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|m| m.matches())
}

/// Returns `true` on touch-capable browsers (`'ontouchstart' in window`).
#[must_use]
pub fn is_touch(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

/// Smoothly scrolls the document to `top`.
pub fn smooth_scroll_to(window: &Window, top: f64) {
    let opts = ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
}
