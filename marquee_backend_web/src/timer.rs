// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot timers.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = "setTimeout")]
    fn set_timeout_raw(handler: &JsValue, timeout_ms: i32) -> Result<i32, JsValue>;
}

/// Runs `f` once after `delay_ms` milliseconds and returns the timer ID.
///
/// The closure is handed to JS and freed after it runs. There is no cancel:
/// delayed reveals and form sends always complete.
pub fn set_timeout(delay_ms: u32, f: impl FnOnce() + 'static) -> Result<i32, JsValue> {
    let handler = Closure::once_into_js(f);
    let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    set_timeout_raw(&handler, timeout)
}
