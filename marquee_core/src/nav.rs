// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation bar and mobile menu.

use alloc::string::ToString as _;

use crate::backend::DomChanges;
use crate::element::ElementId;

/// Navigation thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavConfig {
    /// Scroll offset past which the bar gets its `scrolled` class.
    pub scrolled_after: f64,
    /// Scroll offset past which scrolling down hides the bar. `None`
    /// disables auto-hide.
    pub hide_after: Option<f64>,
    /// Height of the fixed bar; anchor jumps stop this far above a target.
    pub header_height: f64,
}

impl NavConfig {
    /// Landing-page behavior: shrink after 50 px, never hide.
    #[must_use]
    pub const fn landing() -> Self {
        Self {
            scrolled_after: 50.0,
            hide_after: None,
            header_height: 80.0,
        }
    }

    /// Team-page behavior: also hide while scrolling down past 200 px.
    #[must_use]
    pub const fn team() -> Self {
        Self {
            scrolled_after: 50.0,
            hide_after: Some(200.0),
            header_height: 80.0,
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self::landing()
    }
}

/// Keys the menu reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `Enter`.
    Enter,
    /// The space bar.
    Space,
    /// `Escape`.
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Maps a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key_value(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// Elements the navigation writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavElements {
    /// The bar itself (`#navbar`).
    pub bar: Option<ElementId>,
    /// The hamburger button (`#nav-toggle`).
    pub toggle: ElementId,
    /// The collapsible menu (`#nav-menu`).
    pub menu: ElementId,
    /// `<body>`, whose scrolling is locked while the menu is open.
    pub body: ElementId,
}

/// Navigation state machine.
#[derive(Clone, Debug)]
pub struct NavState {
    config: NavConfig,
    open: bool,
    scrolled: bool,
    hidden: bool,
    last_scroll_y: f64,
}

impl NavState {
    /// Creates a closed menu at the top of the page.
    #[must_use]
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            open: false,
            scrolled: false,
            hidden: false,
            last_scroll_y: 0.0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Returns `true` while the mobile menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns `true` while the bar is hidden by auto-hide.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Flips the menu.
    pub fn toggle(&mut self, el: &NavElements) -> DomChanges {
        self.open = !self.open;
        self.menu_ops(el)
    }

    /// Closes the menu. Idempotent.
    pub fn close(&mut self, el: &NavElements) -> DomChanges {
        self.open = false;
        self.menu_ops(el)
    }

    /// Handles a key pressed on the toggle button.
    ///
    /// Enter and Space activate the toggle like a click. Returns `None` for
    /// keys the toggle ignores, so the caller leaves the default action.
    pub fn toggle_key(&mut self, key: Key, el: &NavElements) -> Option<DomChanges> {
        match key {
            Key::Enter | Key::Space => Some(self.toggle(el)),
            _ => None,
        }
    }

    /// Handles a key pressed anywhere in the document.
    pub fn document_key(&mut self, key: Key, el: &NavElements) -> Option<DomChanges> {
        (key == Key::Escape).then(|| self.close(el))
    }

    /// Handles a click anywhere in the document.
    ///
    /// `inside` is true when the click target lies within the menu or the
    /// toggle; such clicks are handled by their own listeners.
    pub fn document_click(&mut self, inside: bool, el: &NavElements) -> Option<DomChanges> {
        (!inside).then(|| self.close(el))
    }

    /// Updates the bar for a new scroll offset.
    pub fn on_scroll(&mut self, scroll_y: f64, el: &NavElements) -> DomChanges {
        let mut out = DomChanges::new();
        let Some(bar) = el.bar else {
            self.last_scroll_y = scroll_y;
            return out;
        };

        let scrolled = scroll_y > self.config.scrolled_after;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            out.toggle_class(bar, "scrolled", scrolled);
        }

        if let Some(hide_after) = self.config.hide_after {
            let hidden = scroll_y > self.last_scroll_y && scroll_y > hide_after;
            if hidden != self.hidden {
                self.hidden = hidden;
                let value = if hidden { "translateY(-100%)" } else { "translateY(0)" };
                out.set_style(bar, "transform", value.to_string());
            }
        }

        self.last_scroll_y = scroll_y;
        out
    }

    /// Scroll offset for an in-page anchor whose target sits at document
    /// offset `target_top`.
    #[must_use]
    pub fn anchor_target(&self, target_top: f64) -> f64 {
        target_top - self.config.header_height
    }

    fn menu_ops(&self, el: &NavElements) -> DomChanges {
        let mut out = DomChanges::new();
        out.toggle_class(el.menu, "active", self.open);
        out.toggle_class(el.toggle, "active", self.open);
        if self.open {
            out.set_style(el.body, "overflow", "hidden".to_string());
        } else {
            out.clear_style(el.body, "overflow");
        }
        out
    }
}
