// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for browser integrations.
//!
//! Marquee splits browser-specific work into a backend crate. The backend
//! provides the following pieces:
//!
//! - **Scroll dispatcher**: turns scroll events into at most one frame
//!   callback per rendered frame, using [`FrameCoalescer`] for the pending
//!   flag. Not abstracted by a trait because listener registration and
//!   closure lifetimes are inherently browser-specific.
//!
//! - **Sampling**: a free function returning the current
//!   [`ScrollSample`].
//!
//! - **Geometry**: implements [`Geometry`] so the core can read element
//!   bounds.
//!
//! - **Presenter**: implements the [`Presenter`] trait to apply
//!   [`DomChanges`] to live elements.
//!
//! - **Timers**: runs delayed reveals and the simulated form latency with
//!   `setTimeout`. Delays are never cancelled.
//!
//! [`FrameCoalescer`]: crate::coalesce::FrameCoalescer
//! [`ScrollSample`]: crate::geometry::ScrollSample
//! [`Geometry`]: crate::geometry::Geometry

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::element::ElementId;

/// One DOM mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomOp {
    /// Sets an inline style property (standard or custom `--name`).
    SetStyle {
        /// Target element.
        element: ElementId,
        /// Property name in CSS syntax, e.g. `transform` or `--parallax-y`.
        property: &'static str,
        /// Property value.
        value: String,
    },
    /// Removes an inline style property, falling back to the stylesheet.
    ClearStyle {
        /// Target element.
        element: ElementId,
        /// Property name in CSS syntax.
        property: &'static str,
    },
    /// Adds a class to the element's class list.
    AddClass {
        /// Target element.
        element: ElementId,
        /// Class name without the leading dot.
        class: &'static str,
    },
    /// Removes a class from the element's class list.
    RemoveClass {
        /// Target element.
        element: ElementId,
        /// Class name without the leading dot.
        class: &'static str,
    },
    /// Replaces the element's inner markup.
    SetHtml {
        /// Target element.
        element: ElementId,
        /// Markup to install.
        html: &'static str,
    },
}

impl DomOp {
    /// Returns the element this operation targets.
    #[must_use]
    pub fn element(&self) -> ElementId {
        match *self {
            Self::SetStyle { element, .. }
            | Self::ClearStyle { element, .. }
            | Self::AddClass { element, .. }
            | Self::RemoveClass { element, .. }
            | Self::SetHtml { element, .. } => element,
        }
    }
}

/// An ordered batch of DOM mutations produced by one evaluation.
///
/// Operations are applied in insertion order, so a later write to the same
/// property wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DomChanges {
    ops: Vec<DomOp>,
}

impl DomChanges {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an inline style write.
    pub fn set_style(&mut self, element: ElementId, property: &'static str, value: String) {
        self.ops.push(DomOp::SetStyle {
            element,
            property,
            value,
        });
    }

    /// Queues removal of an inline style property.
    pub fn clear_style(&mut self, element: ElementId, property: &'static str) {
        self.ops.push(DomOp::ClearStyle { element, property });
    }

    /// Queues adding a class.
    pub fn add_class(&mut self, element: ElementId, class: &'static str) {
        self.ops.push(DomOp::AddClass { element, class });
    }

    /// Queues removing a class.
    pub fn remove_class(&mut self, element: ElementId, class: &'static str) {
        self.ops.push(DomOp::RemoveClass { element, class });
    }

    /// Queues adding or removing a class.
    pub fn toggle_class(&mut self, element: ElementId, class: &'static str, on: bool) {
        if on {
            self.add_class(element, class);
        } else {
            self.remove_class(element, class);
        }
    }

    /// Queues an inner-markup replacement.
    pub fn set_html(&mut self, element: ElementId, html: &'static str) {
        self.ops.push(DomOp::SetHtml { element, html });
    }

    /// Appends all operations of `other`, preserving order.
    pub fn append(&mut self, other: &mut Self) {
        self.ops.append(&mut other.ops);
    }

    /// Returns the queued operations in application order.
    #[must_use]
    pub fn ops(&self) -> &[DomOp] {
        &self.ops
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the number of queued operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if any queued operation targets `element`.
    #[must_use]
    pub fn touches(&self, element: ElementId) -> bool {
        self.ops.iter().any(|op| op.element() == element)
    }

    /// Returns the last value queued for `property` on `element`, if any.
    #[must_use]
    pub fn style_value(&self, element: ElementId, property: &str) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            DomOp::SetStyle {
                element: e,
                property: p,
                value,
            } if *e == element && *p == property => Some(value.as_str()),
            _ => None,
        })
    }
}

/// Applies a batch of DOM mutations to a live presentation tree.
///
/// The DOM presenter implements this for real elements; tests can implement
/// it to record what would have been written.
pub trait Presenter {
    /// Applies `changes` in order. Operations on unknown elements are
    /// ignored.
    fn apply(&mut self, changes: &DomChanges);
}

/// Formats a pixel length, printing negative zero as `0px`.
#[must_use]
pub fn px(value: f64) -> String {
    // `-0.0 + 0.0` is `+0.0`.
    format!("{}px", value + 0.0)
}

/// Formats a vertical translation transform.
#[must_use]
pub fn translate_y(value: f64) -> String {
    format!("translateY({})", px(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formats_integers_without_fraction() {
        assert_eq!(px(-100.0), "-100px");
        assert_eq!(px(-0.0), "0px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(translate_y(-0.0), "translateY(0px)");
    }

    #[test]
    fn style_value_returns_last_write() {
        let mut c = DomChanges::new();
        let e = ElementId(3);
        c.set_style(e, "transform", "translateY(1px)".into());
        c.set_style(ElementId(4), "transform", "translateY(9px)".into());
        c.set_style(e, "transform", "translateY(2px)".into());
        assert_eq!(c.style_value(e, "transform"), Some("translateY(2px)"));
        assert_eq!(c.style_value(e, "opacity"), None);
        assert!(c.touches(ElementId(4)));
        assert!(!c.touches(ElementId(5)));
    }

    #[test]
    fn append_preserves_order() {
        let mut a = DomChanges::new();
        a.add_class(ElementId(0), "active");
        let mut b = DomChanges::new();
        b.remove_class(ElementId(0), "active");
        a.append(&mut b);
        assert!(b.is_empty());
        assert_eq!(a.len(), 2);
        assert_eq!(
            a.ops()[1],
            DomOp::RemoveClass {
                element: ElementId(0),
                class: "active"
            }
        );
    }
}
