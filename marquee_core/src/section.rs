// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section indicator tracking.
//!
//! The page shows one indicator dot per section. [`SectionTracker`] decides
//! which section the scroll offset falls in and produces the class writes
//! that mark exactly that dot active.

use alloc::vec::Vec;

use crate::backend::DomChanges;
use crate::element::ElementId;
use crate::geometry::{Geometry, ScrollSample};

/// A section's vertical extent in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds {
    /// Document-space top edge.
    pub top: f64,
    /// Section height.
    pub height: f64,
}

impl SectionBounds {
    /// Creates bounds spanning `top..top + height`.
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Returns the index of the section containing `scroll_y`.
///
/// Section `i` matches when `scroll_y` lies in the half-open interval
/// `[top - correction, top - correction + height)`. When stale layout makes
/// intervals overlap, the last match in document order wins.
#[must_use]
pub fn locate(sections: &[SectionBounds], scroll_y: f64, correction: f64) -> Option<usize> {
    sections
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            let start = s.top - correction;
            scroll_y >= start && scroll_y < start + s.height
        })
        .map(|(i, _)| i)
        .last()
}

/// Tracks which section indicator is active.
#[derive(Clone, Debug)]
pub struct SectionTracker {
    sections: Vec<ElementId>,
    correction: f64,
    active: Option<usize>,
}

impl SectionTracker {
    /// Offset applied to section tops so a section becomes current slightly
    /// before its top reaches the viewport top.
    pub const DEFAULT_CORRECTION: f64 = 100.0;

    /// Creates a tracker over `sections` in document order.
    #[must_use]
    pub fn new(sections: Vec<ElementId>, correction: f64) -> Self {
        Self {
            sections,
            correction,
            active: None,
        }
    }

    /// Returns the index of the currently active section.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Returns the tracked sections.
    #[must_use]
    pub fn sections(&self) -> &[ElementId] {
        &self.sections
    }

    /// Measures section bounds in document coordinates.
    ///
    /// Absent sections are reported with zero height so indices stay aligned
    /// with indicator dots.
    #[must_use]
    pub fn measure(&self, sample: &ScrollSample, geometry: &impl Geometry) -> Vec<SectionBounds> {
        self.sections
            .iter()
            .map(|&s| match geometry.bounding_rect(s) {
                Some(r) => SectionBounds::new(r.y0 + sample.scroll_y, r.height()),
                None => SectionBounds::new(0.0, 0.0),
            })
            .collect()
    }

    /// Re-reads the layout and updates the active section.
    ///
    /// Returns the new index when it changed. When no section matches the
    /// previous selection is kept.
    pub fn update(&mut self, sample: &ScrollSample, geometry: &impl Geometry) -> Option<usize> {
        let bounds = self.measure(sample, geometry);
        let found = locate(&bounds, sample.scroll_y, self.correction)?;
        if self.active == Some(found) {
            return None;
        }
        self.active = Some(found);
        Some(found)
    }

    /// Queues class writes leaving only the active indicator marked.
    ///
    /// Indicators beyond the number of sections (or sections beyond the
    /// number of indicators) are simply left inactive.
    pub fn write_indicators(
        &self,
        indicators: &[ElementId],
        class: &'static str,
        out: &mut DomChanges,
    ) {
        for &dot in indicators {
            out.remove_class(dot, class);
        }
        if let Some(dot) = self.active.and_then(|i| indicators.get(i)) {
            out.add_class(*dot, class);
        }
    }

    /// Scroll offset that brings section `index` just below a fixed header
    /// of `header_height` pixels.
    #[must_use]
    pub fn scroll_target(
        &self,
        index: usize,
        header_height: f64,
        sample: &ScrollSample,
        geometry: &impl Geometry,
    ) -> Option<f64> {
        let rect = geometry.bounding_rect(*self.sections.get(index)?)?;
        Some(rect.y0 + sample.scroll_y - header_height)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::backend::DomOp;
    use crate::geometry::DocumentLayout;

    #[test]
    fn locate_picks_containing_interval() {
        let s = [SectionBounds::new(0.0, 800.0), SectionBounds::new(800.0, 800.0)];
        assert_eq!(locate(&s, 900.0, 0.0), Some(1));
        assert_eq!(locate(&s, 0.0, 0.0), Some(0));
        assert_eq!(locate(&s, 799.9, 0.0), Some(0));
        assert_eq!(locate(&s, 800.0, 0.0), Some(1), "interval is half-open");
        assert_eq!(locate(&s, 1600.0, 0.0), None);
    }

    #[test]
    fn locate_applies_correction() {
        let s = [SectionBounds::new(0.0, 800.0), SectionBounds::new(800.0, 800.0)];
        assert_eq!(locate(&s, 720.0, 100.0), Some(1));
        assert_eq!(locate(&s, 690.0, 100.0), Some(0));
    }

    #[test]
    fn overlapping_intervals_prefer_later_section() {
        let s = [SectionBounds::new(0.0, 1000.0), SectionBounds::new(800.0, 800.0)];
        assert_eq!(locate(&s, 900.0, 0.0), Some(1));
    }

    #[test]
    fn exactly_one_indicator_is_active() {
        let mut layout = DocumentLayout::new();
        let home = layout.push_block(0.0, 800.0);
        let about = layout.push_block(800.0, 800.0);
        let dots = [ElementId(100), ElementId(101)];
        let mut t = SectionTracker::new(vec![home, about], 0.0);

        layout.scroll_to(900.0);
        assert_eq!(t.update(&layout.sample(700.0), &layout), Some(1));

        let mut ops = DomChanges::new();
        t.write_indicators(&dots, "active", &mut ops);
        let added: alloc::vec::Vec<_> = ops
            .ops()
            .iter()
            .filter_map(|op| match op {
                DomOp::AddClass { element, .. } => Some(*element),
                _ => None,
            })
            .collect();
        assert_eq!(added, [dots[1]]);
        assert_eq!(
            ops.ops().first(),
            Some(&DomOp::RemoveClass {
                element: dots[0],
                class: "active"
            })
        );
    }

    #[test]
    fn update_reports_only_changes_and_keeps_last_match() {
        let mut layout = DocumentLayout::new();
        let a = layout.push_block(0.0, 500.0);
        let b = layout.push_block(500.0, 500.0);
        let mut t = SectionTracker::new(vec![a, b], SectionTracker::DEFAULT_CORRECTION);

        assert_eq!(t.update(&layout.sample(700.0), &layout), Some(0));
        layout.scroll_to(100.0);
        assert_eq!(t.update(&layout.sample(700.0), &layout), None);

        // Past the last section: nothing matches, selection is kept.
        layout.scroll_to(5000.0);
        assert_eq!(t.update(&layout.sample(700.0), &layout), None);
        assert_eq!(t.active(), Some(0));

        layout.scroll_to(450.0);
        assert_eq!(t.update(&layout.sample(700.0), &layout), Some(1));
    }

    #[test]
    fn scroll_target_leaves_room_for_header() {
        let mut layout = DocumentLayout::new();
        let a = layout.push_block(0.0, 500.0);
        let b = layout.push_block(500.0, 500.0);
        let t = SectionTracker::new(vec![a, b], 100.0);
        layout.scroll_to(250.0);
        assert_eq!(t.scroll_target(1, 80.0, &layout.sample(700.0), &layout), Some(420.0));
        assert_eq!(t.scroll_target(7, 80.0, &layout.sample(700.0), &layout), None);
    }
}
