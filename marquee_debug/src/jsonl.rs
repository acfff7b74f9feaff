// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines exporter.
//!
//! [`export`] writes events recorded by a
//! [`RecorderSink`](crate::recorder::RecorderSink) as one JSON object per
//! line, each tagged with a `"type"` field.

use std::io::{self, Write};

use serde_json::{Value, json};

use marquee_core::trace::{FormOutcome, RevealTransition};

use crate::recorder::RecordedEvent;

/// Converts one recorded event to a JSON object.
#[must_use]
pub fn to_json(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Frame(e) => json!({
            "type": "frame",
            "frame_index": e.frame_index,
            "events": e.events,
            "scroll_y": e.scroll_y,
            "viewport_height": e.viewport_height,
        }),
        RecordedEvent::Parallax(e) => json!({
            "type": "parallax",
            "frame_index": e.frame_index,
            "updated": e.updated,
            "skipped": e.skipped,
        }),
        RecordedEvent::Reveal(e) => {
            let (transition, delay_ms) = match e.transition {
                RevealTransition::Shown => ("shown", None),
                RevealTransition::Hidden => ("hidden", None),
                RevealTransition::Scheduled { delay_ms } => ("scheduled", Some(delay_ms)),
                RevealTransition::Fired => ("fired", None),
            };
            json!({
                "type": "reveal",
                "frame_index": e.frame_index,
                "element": e.element.index(),
                "transition": transition,
                "delay_ms": delay_ms,
            })
        }
        RecordedEvent::SectionChange(e) => json!({
            "type": "section",
            "frame_index": e.frame_index,
            "index": e.index,
        }),
        RecordedEvent::Form(e) => match e.outcome {
            FormOutcome::Rejected(err) => json!({
                "type": "form",
                "outcome": "rejected",
                "message": err.to_string(),
            }),
            FormOutcome::Sending => json!({ "type": "form", "outcome": "sending" }),
            FormOutcome::Sent => json!({ "type": "form", "outcome": "sent" }),
        },
        RecordedEvent::FrameSummary(s) => json!({
            "type": "summary",
            "frame_index": s.frame_index,
            "events": s.events,
            "scroll_y": s.scroll_y,
            "parallax_updates": s.parallax_updates,
            "shown": s.shown,
            "hidden": s.hidden,
            "scheduled": s.scheduled,
            "section": s.section,
            "dom_ops": s.dom_ops,
        }),
    }
}

/// Writes `events` as JSON lines.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    for event in events {
        serde_json::to_writer(&mut *writer, &to_json(event))?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use marquee_core::element::ElementId;
    use marquee_core::trace::{FrameEvent, RevealEvent, SectionEvent, TraceSink};

    #[test]
    fn export_writes_one_object_per_line() {
        let mut rec = RecorderSink::new();
        rec.on_frame(&FrameEvent {
            frame_index: 0,
            events: 2,
            scroll_y: 900.0,
            viewport_height: 800.0,
        });
        rec.on_reveal(&RevealEvent {
            frame_index: Some(0),
            element: ElementId(3),
            transition: RevealTransition::Scheduled { delay_ms: 300 },
        });
        rec.on_section_change(&SectionEvent {
            frame_index: 0,
            index: 1,
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "frame");
        assert_eq!(lines[0]["scroll_y"], 900.0);
        assert_eq!(lines[1]["transition"], "scheduled");
        assert_eq!(lines[1]["delay_ms"], 300);
        assert_eq!(lines[1]["element"], 3);
        assert_eq!(lines[2]["type"], "section");
        assert_eq!(lines[2]["index"], 1);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
