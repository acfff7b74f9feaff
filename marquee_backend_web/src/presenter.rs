// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Binds live elements to [`ElementId`] slots, reads their bounds for the
//! core's [`Geometry`] queries, and applies [`DomChanges`] to them.
//!
//! [`ElementId`]: marquee_core::element::ElementId
//! [`Geometry`]: marquee_core::geometry::Geometry
//! [`DomChanges`]: marquee_core::backend::DomChanges

use alloc::vec::Vec;

use kurbo::Rect;
use marquee_core::backend::{DomChanges, DomOp, Presenter};
use marquee_core::element::ElementId;
use marquee_core::geometry::Geometry;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlElement};

/// Maps [`ElementId`] slots to live DOM elements.
///
/// Elements are bound once at setup with [`bind`](Self::bind) or the
/// selector helpers. A slot whose element is later unbound reads as absent:
/// geometry returns `None` and writes to it are skipped.
#[derive(Default)]
pub struct DomPresenter {
    elements: Vec<Option<HtmlElement>>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("elements_len", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates an empty presenter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `element` to a new slot and returns its handle.
    ///
    /// Binding the same element twice returns the existing handle.
    pub fn bind(&mut self, element: HtmlElement) -> ElementId {
        if let Some(id) = self.find(&element) {
            return id;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "pages bind far fewer than u32::MAX elements"
        )]
        let idx = self.elements.len() as u32;
        self.elements.push(Some(element));
        ElementId(idx)
    }

    /// Binds the first element matching `selector`, if any.
    pub fn bind_first(
        &mut self,
        document: &Document,
        selector: &str,
    ) -> Result<Option<ElementId>, JsValue> {
        let found = document.query_selector(selector)?;
        Ok(found
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| self.bind(el)))
    }

    /// Binds every element matching `selector`, in document order.
    pub fn bind_all(
        &mut self,
        document: &Document,
        selector: &str,
    ) -> Result<Vec<ElementId>, JsValue> {
        let list = document.query_selector_all(selector)?;
        let mut ids = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                ids.push(self.bind(el));
            }
        }
        Ok(ids)
    }

    /// Binds every element matching `selector` inside `container`.
    pub fn bind_within(
        &mut self,
        container: ElementId,
        selector: &str,
    ) -> Result<Vec<ElementId>, JsValue> {
        let Some(root) = self.get(container).cloned() else {
            return Ok(Vec::new());
        };
        let list = root.query_selector_all(selector)?;
        let mut ids = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                ids.push(self.bind(el));
            }
        }
        Ok(ids)
    }

    /// Returns the element bound to `id`.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements
            .get(id.index() as usize)
            .and_then(|slot| slot.as_ref())
    }

    /// Returns the handle of an already-bound element.
    #[must_use]
    pub fn find(&self, element: &HtmlElement) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|slot| slot.as_ref() == Some(element))
            .and_then(|i| u32::try_from(i).ok())
            .map(ElementId)
    }

    /// Reads `data-<name>` from the element bound to `id`.
    #[must_use]
    pub fn data(&self, id: ElementId, name: &str) -> Option<alloc::string::String> {
        self.get(id)?.dataset().get(name)
    }

    /// Unbinds `id`; later reads and writes for it are skipped.
    pub fn unbind(&mut self, id: ElementId) {
        if let Some(slot) = self.elements.get_mut(id.index() as usize) {
            *slot = None;
        }
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Geometry for DomPresenter {
    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        let r = self.get(element)?.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, changes: &DomChanges) {
        for op in changes.ops() {
            let Some(el) = self.get(op.element()) else {
                continue;
            };
            match op {
                DomOp::SetStyle {
                    property, value, ..
                } => {
                    let _ = el.style().set_property(property, value);
                }
                DomOp::ClearStyle { property, .. } => {
                    let _ = el.style().remove_property(property);
                }
                DomOp::AddClass { class, .. } => {
                    let _ = el.class_list().add_1(class);
                }
                DomOp::RemoveClass { class, .. } => {
                    let _ = el.class_list().remove_1(class);
                }
                DomOp::SetHtml { html, .. } => el.set_inner_html(html),
            }
        }
    }
}
