// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it sees,
//! in arrival order, as a [`RecordedEvent`].

use marquee_core::element::ElementId;
use marquee_core::trace::{
    FormEvent, FrameEvent, FrameSummary, ParallaxEvent, RevealEvent, RevealTransition,
    SectionEvent, TraceSink,
};

/// One recorded trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`FrameEvent`].
    Frame(FrameEvent),
    /// A [`ParallaxEvent`].
    Parallax(ParallaxEvent),
    /// A [`RevealEvent`].
    Reveal(RevealEvent),
    /// A [`SectionEvent`].
    SectionChange(SectionEvent),
    /// A [`FormEvent`].
    Form(FormEvent),
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
}

impl RecordedEvent {
    /// Returns the frame this event belongs to, if any.
    ///
    /// Form events and fired reveals happen outside a frame.
    #[must_use]
    pub fn frame_index(&self) -> Option<u64> {
        match self {
            Self::Frame(e) => Some(e.frame_index),
            Self::Parallax(e) => Some(e.frame_index),
            Self::Reveal(e) => e.frame_index,
            Self::SectionChange(e) => Some(e.frame_index),
            Self::Form(_) => None,
            Self::FrameSummary(s) => Some(s.frame_index),
        }
    }
}

/// A [`TraceSink`] that records events into a `Vec`.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the recorded frame summaries.
    pub fn summaries(&self) -> impl Iterator<Item = &FrameSummary> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::FrameSummary(s) => Some(s),
            _ => None,
        })
    }

    /// Returns every element that was revealed, either immediately or when
    /// its delay fired, in reveal order.
    #[must_use]
    pub fn revealed(&self) -> Vec<ElementId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Reveal(RevealEvent {
                    element,
                    transition: RevealTransition::Shown | RevealTransition::Fired,
                    ..
                }) => Some(*element),
                _ => None,
            })
            .collect()
    }

    /// Returns the sequence of active-section indices.
    #[must_use]
    pub fn section_changes(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::SectionChange(s) => Some(s.index),
                _ => None,
            })
            .collect()
    }
}

impl TraceSink for RecorderSink {
    fn on_frame(&mut self, e: &FrameEvent) {
        self.events.push(RecordedEvent::Frame(*e));
    }

    fn on_parallax(&mut self, e: &ParallaxEvent) {
        self.events.push(RecordedEvent::Parallax(*e));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.events.push(RecordedEvent::Reveal(*e));
    }

    fn on_section_change(&mut self, e: &SectionEvent) {
        self.events.push(RecordedEvent::SectionChange(*e));
    }

    fn on_form(&mut self, e: &FormEvent) {
        self.events.push(RecordedEvent::Form(*e));
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.events.push(RecordedEvent::FrameSummary(*s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::form::ValidationError;
    use marquee_core::trace::FormOutcome;

    fn reveal(frame: Option<u64>, el: u32, transition: RevealTransition) -> RevealEvent {
        RevealEvent {
            frame_index: frame,
            element: ElementId(el),
            transition,
        }
    }

    #[test]
    fn records_in_arrival_order() {
        let mut rec = RecorderSink::new();
        rec.on_frame(&FrameEvent {
            frame_index: 0,
            events: 3,
            scroll_y: 120.0,
            viewport_height: 800.0,
        });
        rec.on_parallax(&ParallaxEvent {
            frame_index: 0,
            updated: 2,
            skipped: 1,
        });
        rec.on_frame_summary(&FrameSummary {
            frame_index: 0,
            events: 3,
            ..FrameSummary::default()
        });

        let events = rec.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RecordedEvent::Frame(_)));
        assert!(matches!(events[1], RecordedEvent::Parallax(_)));
        assert!(matches!(events[2], RecordedEvent::FrameSummary(_)));
        assert_eq!(rec.summaries().count(), 1);
    }

    #[test]
    fn revealed_includes_fired_but_not_scheduled() {
        let mut rec = RecorderSink::new();
        rec.on_reveal(&reveal(Some(1), 4, RevealTransition::Shown));
        rec.on_reveal(&reveal(
            Some(1),
            5,
            RevealTransition::Scheduled { delay_ms: 200 },
        ));
        rec.on_reveal(&reveal(Some(2), 6, RevealTransition::Hidden));
        rec.on_reveal(&reveal(None, 5, RevealTransition::Fired));

        assert_eq!(rec.revealed(), vec![ElementId(4), ElementId(5)]);
    }

    #[test]
    fn frame_index_is_absent_outside_frames() {
        let form = RecordedEvent::Form(FormEvent {
            outcome: FormOutcome::Rejected(ValidationError::InvalidEmail),
        });
        assert_eq!(form.frame_index(), None);
        let fired = RecordedEvent::Reveal(reveal(None, 1, RevealTransition::Fired));
        assert_eq!(fired.frame_index(), None);
        let section = RecordedEvent::SectionChange(SectionEvent {
            frame_index: 9,
            index: 2,
        });
        assert_eq!(section.frame_index(), Some(9));
    }

    #[test]
    fn section_changes_and_clear() {
        let mut rec = RecorderSink::new();
        rec.on_section_change(&SectionEvent {
            frame_index: 1,
            index: 0,
        });
        rec.on_section_change(&SectionEvent {
            frame_index: 4,
            index: 2,
        });
        assert_eq!(rec.section_changes(), vec![0, 2]);
        rec.clear();
        assert!(rec.events().is_empty());
    }
}
