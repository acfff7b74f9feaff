// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll samples and element geometry.
//!
//! A [`ScrollSample`] is read once per animation frame; all controllers
//! evaluating that frame see the same sample. Element bounds come from a
//! [`Geometry`] implementation, which backends provide from
//! `getBoundingClientRect()` and tests provide with [`DocumentLayout`].

use alloc::vec::Vec;

use kurbo::Rect;

use crate::element::ElementId;

/// The scroll position and viewport size at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    /// Vertical scroll offset of the document, in CSS pixels (`pageYOffset`).
    pub scroll_y: f64,
    /// Viewport height, in CSS pixels (`innerHeight`).
    pub viewport_height: f64,
    /// Viewport width, in CSS pixels (`innerWidth`).
    pub viewport_width: f64,
}

impl ScrollSample {
    /// Creates a sample, clamping a negative scroll offset (overscroll
    /// bounce) to zero.
    #[must_use]
    pub fn new(scroll_y: f64, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y: scroll_y.max(0.0),
            viewport_height,
            viewport_width,
        }
    }

    /// Returns the y coordinate, in viewport space, of a trigger line placed
    /// at `fraction` of the viewport height.
    #[inline]
    #[must_use]
    pub fn trigger_line(&self, fraction: f64) -> f64 {
        self.viewport_height * fraction
    }

    /// Returns `true` if a viewport-relative rect overlaps the viewport
    /// vertically (edges touching count as overlapping).
    #[inline]
    #[must_use]
    pub fn intersects(&self, rect: Rect) -> bool {
        rect.y1 >= 0.0 && rect.y0 <= self.viewport_height
    }
}

/// Reads element bounds relative to the viewport.
///
/// Returning `None` means the element is not present (its selector matched
/// nothing or it was detached); callers skip it without error.
pub trait Geometry {
    /// Returns the element's border box in viewport coordinates.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;
}

/// A static page layout in document coordinates.
///
/// Converts document-space boxes to viewport space using the current scroll
/// offset, which is what `getBoundingClientRect()` reports for untransformed
/// elements. Useful for headless evaluation and tests.
#[derive(Clone, Debug, Default)]
pub struct DocumentLayout {
    rects: Vec<Option<Rect>>,
    scroll_y: f64,
}

impl DocumentLayout {
    /// Creates an empty layout scrolled to the top.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element at document-space `rect` and returns its handle.
    pub fn push(&mut self, rect: Rect) -> ElementId {
        let id = self.next_id();
        self.rects.push(Some(rect));
        id
    }

    /// Reserves a handle for an element that is absent from the page.
    pub fn push_missing(&mut self) -> ElementId {
        let id = self.next_id();
        self.rects.push(None);
        id
    }

    /// Adds a full-width block spanning `top..top + height`.
    pub fn push_block(&mut self, top: f64, height: f64) -> ElementId {
        self.push(Rect::new(0.0, top, 1280.0, top + height))
    }

    /// Scrolls the document.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// Returns the current scroll offset.
    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Returns a sample for the current scroll offset and the given
    /// viewport height.
    #[must_use]
    pub fn sample(&self, viewport_height: f64) -> ScrollSample {
        ScrollSample::new(self.scroll_y, 1280.0, viewport_height)
    }

    fn next_id(&self) -> ElementId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "layouts hold far fewer than u32::MAX elements"
        )]
        let idx = self.rects.len() as u32;
        ElementId(idx)
    }
}

impl Geometry for DocumentLayout {
    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        let rect = (*self.rects.get(element.index() as usize)?)?;
        Some(Rect::new(
            rect.x0,
            rect.y0 - self.scroll_y,
            rect.x1,
            rect.y1 - self.scroll_y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_scroll_is_clamped() {
        let s = ScrollSample::new(-12.0, 1024.0, 768.0);
        assert_eq!(s.scroll_y, 0.0);
    }

    #[test]
    fn intersects_counts_touching_edges() {
        let s = ScrollSample::new(0.0, 1024.0, 800.0);
        assert!(s.intersects(Rect::new(0.0, 800.0, 10.0, 900.0)));
        assert!(s.intersects(Rect::new(0.0, -100.0, 10.0, 0.0)));
        assert!(!s.intersects(Rect::new(0.0, 801.0, 10.0, 900.0)));
        assert!(!s.intersects(Rect::new(0.0, -100.0, 10.0, -1.0)));
    }

    #[test]
    fn document_layout_reports_viewport_relative_bounds() {
        let mut layout = DocumentLayout::new();
        let a = layout.push_block(1000.0, 200.0);
        let gone = layout.push_missing();
        layout.scroll_to(400.0);

        let r = layout.bounding_rect(a).unwrap();
        assert_eq!(r.y0, 600.0);
        assert_eq!(r.height(), 200.0);
        assert!(layout.bounding_rect(gone).is_none());
        assert!(layout.bounding_rect(ElementId(99)).is_none());
    }
}
