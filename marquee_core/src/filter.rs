// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category filtering for card grids.
//!
//! The equipment and project sections each show a row of category buttons
//! above a grid of cards. Selecting a button marks it active and hides
//! every card outside that category; the special category [`ALL`] shows
//! everything.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::backend::DomChanges;
use crate::element::ElementId;

/// Category value that matches every card.
pub const ALL: &str = "all";

/// Entrance animation replayed on cards that become visible.
pub const FADE_IN: &str = "fadeInUp 0.6s ease";

/// Returns `true` if a card in `card_category` is shown under `selected`.
#[must_use]
pub fn matches(selected: &str, card_category: Option<&str>) -> bool {
    selected == ALL || card_category == Some(selected)
}

/// An element tagged with a `data-category` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tagged {
    /// The element.
    pub element: ElementId,
    /// Its category, if the attribute is present.
    pub category: Option<String>,
}

impl Tagged {
    /// Creates a tagged element.
    #[must_use]
    pub fn new(element: ElementId, category: Option<&str>) -> Self {
        Self {
            element,
            category: category.map(ToString::to_string),
        }
    }
}

/// One button row and the cards it controls.
#[derive(Clone, Debug, Default)]
pub struct CategoryFilter {
    buttons: Vec<Tagged>,
    cards: Vec<Tagged>,
    selected: Option<usize>,
}

impl CategoryFilter {
    /// Creates a filter with no selection.
    #[must_use]
    pub fn new(buttons: Vec<Tagged>, cards: Vec<Tagged>) -> Self {
        Self {
            buttons,
            cards,
            selected: None,
        }
    }

    /// Returns the selected button index.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the buttons in document order.
    #[must_use]
    pub fn buttons(&self) -> &[Tagged] {
        &self.buttons
    }

    /// Returns the index of the button for `element`.
    #[must_use]
    pub fn button_index(&self, element: ElementId) -> Option<usize> {
        self.buttons.iter().position(|b| b.element == element)
    }

    /// Selects button `index` and returns the writes that apply it.
    ///
    /// A button without a category selects nothing and hides every card
    /// except those matched by [`ALL`]; an out-of-range index is ignored.
    pub fn select(&mut self, index: usize) -> DomChanges {
        let mut out = DomChanges::new();
        let Some(button) = self.buttons.get(index) else {
            return out;
        };
        let selected = button.category.clone().unwrap_or_default();
        self.selected = Some(index);

        for (i, b) in self.buttons.iter().enumerate() {
            out.toggle_class(b.element, "active", i == index);
        }
        for card in &self.cards {
            if matches(&selected, card.category.as_deref()) {
                out.set_style(card.element, "display", "block".to_string());
                out.set_style(card.element, "animation", FADE_IN.to_string());
            } else {
                out.set_style(card.element, "display", "none".to_string());
            }
        }
        out
    }

    /// Number of cards visible under the current selection.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        let Some(button) = self.selected.and_then(|i| self.buttons.get(i)) else {
            return self.cards.len();
        };
        let selected = button.category.as_deref().unwrap_or_default();
        self.cards
            .iter()
            .filter(|c| matches(selected, c.category.as_deref()))
            .count()
    }
}

/// Chooses the button to apply at page load: the first one already marked
/// active, else the first button.
#[must_use]
pub fn default_button(active: &[bool]) -> Option<usize> {
    active
        .iter()
        .position(|&a| a)
        .or_else(|| (!active.is_empty()).then_some(0))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn grid() -> CategoryFilter {
        CategoryFilter::new(
            vec![
                Tagged::new(ElementId(0), Some("all")),
                Tagged::new(ElementId(1), Some("cameras")),
                Tagged::new(ElementId(2), Some("lighting")),
            ],
            vec![
                Tagged::new(ElementId(10), Some("cameras")),
                Tagged::new(ElementId(11), Some("lighting")),
                Tagged::new(ElementId(12), Some("cameras")),
                Tagged::new(ElementId(13), None),
            ],
        )
    }

    #[test]
    fn all_shows_every_card() {
        let mut f = grid();
        let ops = f.select(0);
        for id in 10..14 {
            assert_eq!(ops.style_value(ElementId(id), "display"), Some("block"));
        }
        assert_eq!(f.visible_count(), 4);
    }

    #[test]
    fn category_hides_other_cards() {
        let mut f = grid();
        let ops = f.select(1);
        assert_eq!(ops.style_value(ElementId(10), "display"), Some("block"));
        assert_eq!(ops.style_value(ElementId(10), "animation"), Some(FADE_IN));
        assert_eq!(ops.style_value(ElementId(11), "display"), Some("none"));
        assert_eq!(ops.style_value(ElementId(13), "display"), Some("none"));
        assert_eq!(f.visible_count(), 2);
    }

    #[test]
    fn only_selected_button_is_active() {
        use crate::backend::DomOp;
        let mut f = grid();
        let ops = f.select(2);
        let active: alloc::vec::Vec<_> = ops
            .ops()
            .iter()
            .filter_map(|op| match op {
                DomOp::AddClass { element, .. } => Some(*element),
                _ => None,
            })
            .collect();
        assert_eq!(active, [ElementId(2)]);
        assert_eq!(f.selected(), Some(2));
        assert_eq!(f.button_index(ElementId(1)), Some(1));
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut f = grid();
        assert!(f.select(9).is_empty());
        assert_eq!(f.selected(), None);
    }

    #[test]
    fn default_prefers_marked_button() {
        assert_eq!(default_button(&[false, true, false]), Some(1));
        assert_eq!(default_button(&[false, false]), Some(0));
        assert_eq!(default_button(&[]), None);
    }
}
