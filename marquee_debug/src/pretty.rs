// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use marquee_core::trace::{
    FormEvent, FormOutcome, FrameEvent, FrameSummary, ParallaxEvent, RevealEvent,
    RevealTransition, SectionEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn frame_label(frame_index: Option<u64>) -> String {
    match frame_index {
        Some(i) => format!("frame={i}"),
        None => "timer".to_owned(),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame(&mut self, e: &FrameEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] frame={} events={} y={:.1}px vh={:.0}px",
            e.frame_index, e.events, e.scroll_y, e.viewport_height,
        );
    }

    fn on_parallax(&mut self, e: &ParallaxEvent) {
        let _ = writeln!(
            self.writer,
            "[parallax] frame={} updated={} skipped={}",
            e.frame_index, e.updated, e.skipped,
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let what = match e.transition {
            RevealTransition::Shown => "shown".to_owned(),
            RevealTransition::Hidden => "hidden".to_owned(),
            RevealTransition::Scheduled { delay_ms } => format!("scheduled +{delay_ms}ms"),
            RevealTransition::Fired => "fired".to_owned(),
        };
        let _ = writeln!(
            self.writer,
            "[reveal] {} element={} {what}",
            frame_label(e.frame_index),
            e.element.index(),
        );
    }

    fn on_section_change(&mut self, e: &SectionEvent) {
        let _ = writeln!(
            self.writer,
            "[section] frame={} active={}",
            e.frame_index, e.index,
        );
    }

    fn on_form(&mut self, e: &FormEvent) {
        let _ = match e.outcome {
            FormOutcome::Rejected(err) => writeln!(self.writer, "[form] rejected: {err}"),
            FormOutcome::Sending => writeln!(self.writer, "[form] sending"),
            FormOutcome::Sent => writeln!(self.writer, "[form] sent"),
        };
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let section = s
            .section
            .map_or_else(|| "-".to_owned(), |i| i.to_string());
        let _ = writeln!(
            self.writer,
            "[summary] frame={} events={} y={:.1}px parallax={} shown={} hidden={} \
             scheduled={} section={section} ops={}",
            s.frame_index,
            s.events,
            s.scroll_y,
            s.parallax_updates,
            s.shown,
            s.hidden,
            s.scheduled,
            s.dom_ops,
        );
    }
}
