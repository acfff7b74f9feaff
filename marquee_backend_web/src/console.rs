// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console logging.

use alloc::format;

use marquee_core::trace::{
    FormEvent, FormOutcome, FrameSummary, RevealEvent, RevealTransition, SectionEvent, TraceSink,
};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that writes to the browser console.
///
/// By default only section changes and form outcomes are logged. With
/// `verbose` set, every frame summary and reveal transition is logged too.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    verbose: bool,
}

impl ConsoleSink {
    /// Creates a sink logging section changes and form outcomes.
    #[must_use]
    pub const fn new() -> Self {
        Self { verbose: false }
    }

    /// Creates a sink that also logs per-frame summaries and reveals.
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }
}

fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Logs an error to the console.
pub fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

impl TraceSink for ConsoleSink {
    fn on_reveal(&mut self, e: &RevealEvent) {
        if !self.verbose {
            return;
        }
        let el = e.element;
        match e.transition {
            RevealTransition::Shown => log(&format!("[marquee] reveal {el:?} shown")),
            RevealTransition::Hidden => log(&format!("[marquee] reveal {el:?} hidden")),
            RevealTransition::Scheduled { delay_ms } => {
                log(&format!("[marquee] reveal {el:?} scheduled +{delay_ms}ms"));
            }
            RevealTransition::Fired => log(&format!("[marquee] reveal {el:?} fired")),
        }
    }

    fn on_section_change(&mut self, e: &SectionEvent) {
        log(&format!(
            "[marquee] frame {} section -> {}",
            e.frame_index, e.index
        ));
    }

    fn on_form(&mut self, e: &FormEvent) {
        match e.outcome {
            FormOutcome::Rejected(err) => log(&format!("[marquee] form rejected: {err}")),
            FormOutcome::Sending => log("[marquee] form sending"),
            FormOutcome::Sent => log("[marquee] form sent"),
        }
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        if !self.verbose {
            return;
        }
        log(&format!(
            "[marquee] frame {} events={} y={:.0} parallax={} shown={} hidden={} scheduled={} ops={}",
            s.frame_index,
            s.events,
            s.scroll_y,
            s.parallax_updates,
            s.shown,
            s.hidden,
            s.scheduled,
            s.dom_ops
        ));
    }
}
