// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the scroll path and page controllers.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! instrumentation calls as a frame is evaluated. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::element::ElementId;
use crate::form::ValidationError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What happened to a reveal target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealTransition {
    /// The reveal class was added immediately.
    Shown,
    /// The reveal class was removed (persistent groups only).
    Hidden,
    /// A delayed reveal was scheduled.
    Scheduled {
        /// Delay before the class is added.
        delay_ms: u32,
    },
    /// A scheduled reveal's timer fired and the class was added.
    Fired,
}

/// How a contact-form submission ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// Validation failed; nothing was sent.
    Rejected(ValidationError),
    /// The submission was accepted and is in flight.
    Sending,
    /// The simulated send completed.
    Sent,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per coalesced animation frame, before any controller runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Scroll events coalesced into this frame.
    pub events: u32,
    /// Sampled scroll offset.
    pub scroll_y: f64,
    /// Sampled viewport height.
    pub viewport_height: f64,
}

/// Emitted after parallax offsets are computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallaxEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Layers that received a new offset.
    pub updated: u32,
    /// Layers skipped because their element is absent or off screen.
    pub skipped: u32,
}

/// Emitted for each reveal state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    /// Frame counter, or `None` for timer callbacks outside a frame.
    pub frame_index: Option<u64>,
    /// The target.
    pub element: ElementId,
    /// What happened.
    pub transition: RevealTransition,
}

/// Emitted when the active section changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Index of the newly active section.
    pub index: usize,
}

/// Emitted for each contact-form submission attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormEvent {
    /// Result of the attempt.
    pub outcome: FormOutcome,
}

/// Per-frame summary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSummary {
    /// Frame counter.
    pub frame_index: u64,
    /// Scroll events coalesced into this frame.
    pub events: u32,
    /// Sampled scroll offset.
    pub scroll_y: f64,
    /// Parallax layers written.
    pub parallax_updates: u32,
    /// Reveal classes added immediately.
    pub shown: u32,
    /// Reveal classes removed.
    pub hidden: u32,
    /// Delayed reveals scheduled.
    pub scheduled: u32,
    /// New active section, if it changed this frame.
    pub section: Option<usize>,
    /// Total DOM operations handed to the presenter.
    pub dom_ops: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the page controllers.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of each coalesced frame.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called after parallax offsets are computed.
    fn on_parallax(&mut self, e: &ParallaxEvent) {
        _ = e;
    }

    /// Called for each reveal transition.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called when the active section changes.
    fn on_section_change(&mut self, e: &SectionEvent) {
        _ = e;
    }

    /// Called for each form submission attempt.
    fn on_form(&mut self, e: &FormEvent) {
        _ = e;
    }

    /// Called with a per-frame summary after all controllers ran.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ParallaxEvent`].
    #[inline]
    pub fn parallax(&mut self, e: &ParallaxEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_parallax(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RevealEvent`].
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveal(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SectionEvent`].
    #[inline]
    pub fn section_change(&mut self, e: &SectionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_section_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FormEvent`].
    #[inline]
    pub fn form(&mut self, e: &FormEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_form(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameSummary`].
    #[inline]
    pub fn frame_summary(&mut self, s: &FrameSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_frame_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> FrameEvent {
        FrameEvent {
            frame_index: 42,
            events: 3,
            scroll_y: 640.0,
            viewport_height: 900.0,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame(&sample_frame());
        sink.on_reveal(&RevealEvent {
            frame_index: None,
            element: ElementId(1),
            transition: RevealTransition::Fired,
        });
        sink.on_frame_summary(&FrameSummary::default());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame(&sample_frame());
        tracer.form(&FormEvent {
            outcome: FormOutcome::Sending,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
            sections: Vec<usize>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame(&mut self, e: &FrameEvent) {
                self.frames.push(e.frame_index);
            }
            fn on_section_change(&mut self, e: &SectionEvent) {
                self.sections.push(e.index);
            }
        }

        let mut sink = RecordingSink {
            frames: Vec::new(),
            sections: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame(&sample_frame());
        tracer.section_change(&SectionEvent {
            frame_index: 42,
            index: 2,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
        assert_eq!(sink.sections, &[2]);
    }
}
