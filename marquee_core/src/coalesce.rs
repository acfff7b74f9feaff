// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame coalescing for scroll-driven work.
//!
//! Browsers may fire several scroll events between two rendered frames.
//! [`FrameCoalescer`] is the pending-frame flag that collapses them: the first
//! event of a burst asks the caller to schedule one animation frame, later
//! events are absorbed, and completing the frame re-arms the flag. The frame
//! callback samples scroll state when it runs, so the newest state always
//! wins and no event is queued for a later frame.
//!
//! # Usage
//!
//! ```rust
//! use marquee_core::coalesce::FrameCoalescer;
//!
//! let mut c = FrameCoalescer::new();
//! assert!(c.request()); // schedule requestAnimationFrame
//! assert!(!c.request()); // already pending
//! let report = c.complete(); // inside the frame callback
//! assert_eq!(report.events, 2);
//! ```

/// What happened between two completed frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Zero-based index of the frame that just completed.
    pub frame_index: u64,
    /// Number of scroll events absorbed into this frame.
    pub events: u32,
}

/// At-most-one-pending-frame guard for one dispatcher.
///
/// Each dispatcher owns its own coalescer; independent dispatchers do not
/// coordinate with each other.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameCoalescer {
    pending: bool,
    events: u32,
    frames: u64,
}

impl FrameCoalescer {
    /// Creates an idle coalescer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: false,
            events: 0,
            frames: 0,
        }
    }

    /// Records a trigger event.
    ///
    /// Returns `true` exactly when the caller must schedule a frame: the
    /// flag was clear and is now set.
    #[must_use = "a `true` result means a frame must be scheduled"]
    pub fn request(&mut self) -> bool {
        self.events = self.events.saturating_add(1);
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// Returns the report the next [`complete`](Self::complete) will yield,
    /// without clearing the flag.
    ///
    /// Frame callbacks run their update with this report while the frame is
    /// still pending, then call `complete`.
    #[must_use]
    pub const fn peek(&self) -> FrameReport {
        FrameReport {
            frame_index: self.frames,
            events: self.events,
        }
    }

    /// Marks the scheduled frame's work as done and clears the flag.
    ///
    /// Calling this with no frame pending still counts a frame; resize and
    /// load-time evaluations run outside the coalescing path.
    pub fn complete(&mut self) -> FrameReport {
        let report = self.peek();
        self.pending = false;
        self.events = 0;
        self.frames = self.frames.wrapping_add(1);
        report
    }

    /// Returns `true` while a frame is scheduled but has not completed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns the number of frames completed so far.
    #[must_use]
    pub const fn frames_completed(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_events_schedules_one_frame() {
        let mut c = FrameCoalescer::new();
        let scheduled = (0..25).filter(|_| c.request()).count();
        assert_eq!(scheduled, 1);
        assert!(c.is_pending());

        let report = c.complete();
        assert_eq!(report.events, 25);
        assert_eq!(report.frame_index, 0);
        assert!(!c.is_pending());
    }

    #[test]
    fn each_frame_rearms_the_flag() {
        let mut c = FrameCoalescer::new();
        let mut frames = 0;
        for _frame in 0..10 {
            // Three scroll events per rendered frame.
            for _ in 0..3 {
                if c.request() {
                    frames += 1;
                }
            }
            c.complete();
        }
        assert_eq!(frames, 10);
        assert_eq!(c.frames_completed(), 10);
    }

    #[test]
    fn update_runs_while_the_frame_is_still_pending() {
        let mut c = FrameCoalescer::new();
        assert!(c.request(), "first event schedules a frame");
        assert!(!c.request(), "second event is absorbed");

        let seen = c.peek();
        // Events arriving during the update join the same frame.
        assert!(c.is_pending());
        assert!(!c.request(), "no second frame while the update runs");

        let report = c.complete();
        assert_eq!(seen.frame_index, report.frame_index);
        assert_eq!(seen.events, 2);
        assert_eq!(report.events, 3);
        assert!(!c.is_pending());
    }

    #[test]
    fn complete_without_request_counts_zero_events() {
        let mut c = FrameCoalescer::new();
        let r = c.complete();
        assert_eq!(r.events, 0);
        assert!(c.request(), "flag must be clear after an idle completion");
    }
}
