// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport reveal scheduling.
//!
//! A [`RevealScheduler`] watches groups of elements and adds a class to each
//! one when its top edge passes the group's trigger line (a fraction of the
//! viewport height, measured from the viewport top).
//!
//! # Modes
//!
//! - [`RevealMode::Persistent`]: the class follows the element. It is added
//!   when the top is above the trigger line and removed when the element
//!   scrolls back below it, on every check.
//! - [`RevealMode::Once`]: the element stops being watched the first time it
//!   activates; the class is never removed.
//!
//! # Delays
//!
//! Each element may carry an activation delay. A delayed element moves to
//! [`RevealState::Scheduled`] and appears in [`RevealChanges::delayed`]; the
//! backend arms a timer and calls [`RevealScheduler::fire`] when it expires.
//! Timers are never cancelled. A persistent element that leaves the band
//! while scheduled still receives its class when the timer fires, and the
//! next check removes it again.
//!
//! ```text
//!   once:        Hidden ──► (Scheduled) ──► Revealed   (terminal, unwatched)
//!   persistent:  Hidden ──► (Scheduled) ──► Revealed ──► Hidden ──► …
//! ```

use alloc::vec::Vec;

use crate::backend::DomChanges;
use crate::element::ElementId;
use crate::geometry::{Geometry, ScrollSample};

/// Whether a group's reveals are reversible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealMode {
    /// Toggle the class on every check.
    Persistent,
    /// Activate once, then stop watching.
    Once,
}

/// Configuration shared by all elements of a reveal group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealGroupConfig {
    /// Reversibility policy.
    pub mode: RevealMode,
    /// Trigger line as a fraction of the viewport height.
    pub trigger_fraction: f64,
    /// Class added on reveal.
    pub class: &'static str,
    /// Delay step between consecutive elements of the group, in ms. The
    /// n-th element (zero-based) waits `n * stagger_ms`.
    pub stagger_ms: u32,
}

impl RevealGroupConfig {
    /// Trigger line used when a group does not choose its own.
    pub const DEFAULT_TRIGGER: f64 = 0.85;

    /// A persistent group at the default trigger line.
    #[must_use]
    pub const fn persistent(class: &'static str) -> Self {
        Self {
            mode: RevealMode::Persistent,
            trigger_fraction: Self::DEFAULT_TRIGGER,
            class,
            stagger_ms: 0,
        }
    }

    /// A one-shot group at the default trigger line.
    #[must_use]
    pub const fn once(class: &'static str) -> Self {
        Self {
            mode: RevealMode::Once,
            trigger_fraction: Self::DEFAULT_TRIGGER,
            class,
            stagger_ms: 0,
        }
    }

    /// Overrides the trigger line.
    #[must_use]
    pub const fn with_trigger(mut self, fraction: f64) -> Self {
        self.trigger_fraction = fraction;
        self
    }

    /// Sets the per-element stagger step.
    #[must_use]
    pub const fn with_stagger(mut self, stagger_ms: u32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }
}

/// Per-element reveal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealState {
    /// Not revealed (initial state).
    Hidden,
    /// Activation timer armed; class not yet added.
    Scheduled,
    /// Class added.
    Revealed,
}

/// Handle to a registered group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub u32);

/// A class to add or remove.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassChange {
    /// Target element.
    pub element: ElementId,
    /// Class name.
    pub class: &'static str,
}

/// A reveal waiting on a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayedReveal {
    /// Element to pass to [`RevealScheduler::fire`] when the timer expires.
    pub element: ElementId,
    /// Delay in milliseconds.
    pub delay_ms: u32,
}

/// Transitions produced by one [`RevealScheduler::check`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealChanges {
    /// Elements revealed immediately.
    pub shown: Vec<ClassChange>,
    /// Persistent elements that left the band.
    pub hidden: Vec<ClassChange>,
    /// Elements whose reveal timer must be armed.
    pub delayed: Vec<DelayedReveal>,
}

impl RevealChanges {
    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty() && self.hidden.is_empty() && self.delayed.is_empty()
    }

    /// Queues the immediate class writes. Delayed reveals are not included.
    pub fn write_to(&self, out: &mut DomChanges) {
        for c in &self.shown {
            out.add_class(c.element, c.class);
        }
        for c in &self.hidden {
            out.remove_class(c.element, c.class);
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    element: ElementId,
    trigger: ElementId,
    group: u32,
    delay_ms: u32,
    state: RevealState,
    watching: bool,
}

/// Unified reveal scheduler over any number of groups.
#[derive(Clone, Debug, Default)]
pub struct RevealScheduler {
    groups: Vec<RevealGroupConfig>,
    candidates: Vec<Candidate>,
}

impl RevealScheduler {
    /// Creates a scheduler with no groups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group in which each element triggers on its own position.
    ///
    /// Elements already registered by an earlier group are ignored, so
    /// overlapping selectors do not produce competing policies.
    pub fn add_group(&mut self, config: RevealGroupConfig, elements: &[ElementId]) -> GroupId {
        self.register(config, None, elements)
    }

    /// Registers a group whose elements all trigger on `trigger`'s position,
    /// e.g. the cards of a section revealed when the section arrives.
    pub fn add_group_triggered_by(
        &mut self,
        config: RevealGroupConfig,
        trigger: ElementId,
        elements: &[ElementId],
    ) -> GroupId {
        self.register(config, Some(trigger), elements)
    }

    fn register(
        &mut self,
        config: RevealGroupConfig,
        trigger: Option<ElementId>,
        elements: &[ElementId],
    ) -> GroupId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a page registers a handful of groups"
        )]
        let group = self.groups.len() as u32;
        self.groups.push(config);

        let mut position: u32 = 0;
        for &element in elements {
            if self.find(element).is_some() {
                continue;
            }
            self.candidates.push(Candidate {
                element,
                trigger: trigger.unwrap_or(element),
                group,
                delay_ms: position.saturating_mul(config.stagger_ms),
                state: RevealState::Hidden,
                watching: true,
            });
            position += 1;
        }
        GroupId(group)
    }

    /// Overrides one element's activation delay. Returns `false` if the
    /// element is not registered.
    pub fn set_delay(&mut self, element: ElementId, delay_ms: u32) -> bool {
        match self.find_mut(element) {
            Some(c) => {
                c.delay_ms = delay_ms;
                true
            }
            None => false,
        }
    }

    /// Evaluates every watched element against the current sample.
    pub fn check(&mut self, sample: &ScrollSample, geometry: &impl Geometry) -> RevealChanges {
        let mut changes = RevealChanges::default();
        for c in self.candidates.iter_mut().filter(|c| c.watching) {
            let config = &self.groups[c.group as usize];
            let Some(rect) = geometry.bounding_rect(c.trigger) else {
                continue;
            };
            let in_band = rect.y0 < sample.trigger_line(config.trigger_fraction);

            match (c.state, in_band) {
                (RevealState::Hidden, true) => {
                    if config.mode == RevealMode::Once {
                        c.watching = false;
                    }
                    if c.delay_ms == 0 {
                        c.state = RevealState::Revealed;
                        changes.shown.push(ClassChange {
                            element: c.element,
                            class: config.class,
                        });
                    } else {
                        c.state = RevealState::Scheduled;
                        changes.delayed.push(DelayedReveal {
                            element: c.element,
                            delay_ms: c.delay_ms,
                        });
                    }
                }
                (RevealState::Revealed, false) if config.mode == RevealMode::Persistent => {
                    c.state = RevealState::Hidden;
                    changes.hidden.push(ClassChange {
                        element: c.element,
                        class: config.class,
                    });
                }
                _ => {}
            }
        }
        changes
    }

    /// Completes a delayed reveal.
    ///
    /// Returns the class to add, or `None` if `element` had no armed timer.
    pub fn fire(&mut self, element: ElementId) -> Option<ClassChange> {
        let c = self.find_mut(element)?;
        if c.state != RevealState::Scheduled {
            return None;
        }
        c.state = RevealState::Revealed;
        let group = c.group;
        Some(ClassChange {
            element,
            class: self.groups[group as usize].class,
        })
    }

    /// Returns the element's state, or `None` if it is not registered.
    #[must_use]
    pub fn state(&self, element: ElementId) -> Option<RevealState> {
        self.find(element).map(|c| c.state)
    }

    /// Returns `true` if the element is still checked on every frame.
    #[must_use]
    pub fn is_watching(&self, element: ElementId) -> bool {
        self.find(element).is_some_and(|c| c.watching)
    }

    /// Returns the element's activation delay.
    #[must_use]
    pub fn delay_ms(&self, element: ElementId) -> Option<u32> {
        self.find(element).map(|c| c.delay_ms)
    }

    /// Returns the configuration of `group`.
    #[must_use]
    pub fn group(&self, group: GroupId) -> Option<&RevealGroupConfig> {
        self.groups.get(group.0 as usize)
    }

    /// Returns the number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if no element is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the number of elements still being watched.
    #[must_use]
    pub fn watching_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.watching).count()
    }

    fn find(&self, element: ElementId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.element == element)
    }

    fn find_mut(&mut self, element: ElementId) -> Option<&mut Candidate> {
        self.candidates.iter_mut().find(|c| c.element == element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DocumentLayout;

    const VH: f64 = 1000.0;

    fn layout_with_card_at(top: f64) -> (DocumentLayout, ElementId) {
        let mut layout = DocumentLayout::new();
        let card = layout.push_block(top, 300.0);
        (layout, card)
    }

    #[test]
    fn persistent_element_toggles_with_scroll() {
        let (mut layout, card) = layout_with_card_at(1500.0);
        let mut s = RevealScheduler::new();
        s.add_group(RevealGroupConfig::persistent("active"), &[card]);

        // Top at 1500 > trigger 850.
        assert!(s.check(&layout.sample(VH), &layout).is_empty());
        assert_eq!(s.state(card), Some(RevealState::Hidden));

        layout.scroll_to(700.0); // top at 800 < 850
        let c = s.check(&layout.sample(VH), &layout);
        assert_eq!(
            c.shown,
            [ClassChange {
                element: card,
                class: "active"
            }]
        );
        assert_eq!(s.state(card), Some(RevealState::Revealed));

        // No duplicate add while still in band.
        layout.scroll_to(900.0);
        assert!(s.check(&layout.sample(VH), &layout).is_empty());

        layout.scroll_to(0.0);
        let c = s.check(&layout.sample(VH), &layout);
        assert_eq!(c.hidden.len(), 1);
        assert_eq!(s.state(card), Some(RevealState::Hidden));
        assert!(s.is_watching(card));
    }

    #[test]
    fn once_element_never_hides_again() {
        let (mut layout, card) = layout_with_card_at(1500.0);
        let mut s = RevealScheduler::new();
        s.add_group(RevealGroupConfig::once("animate-in"), &[card]);

        layout.scroll_to(1000.0);
        let c = s.check(&layout.sample(VH), &layout);
        assert_eq!(c.shown.len(), 1);
        assert!(!s.is_watching(card));

        for y in [0.0, 3000.0, 0.0, 1200.0] {
            layout.scroll_to(y);
            assert!(s.check(&layout.sample(VH), &layout).is_empty());
            assert_eq!(s.state(card), Some(RevealState::Revealed));
        }
    }

    #[test]
    fn delayed_reveal_goes_through_scheduled() {
        let (mut layout, card) = layout_with_card_at(200.0);
        let mut s = RevealScheduler::new();
        s.add_group(RevealGroupConfig::once("animate-in"), &[card]);
        assert!(s.set_delay(card, 400));

        let c = s.check(&layout.sample(VH), &layout);
        assert!(c.shown.is_empty());
        assert_eq!(
            c.delayed,
            [DelayedReveal {
                element: card,
                delay_ms: 400
            }]
        );
        assert_eq!(s.state(card), Some(RevealState::Scheduled));

        // Scrolling while the timer is armed does not re-arm it.
        layout.scroll_to(50.0);
        assert!(s.check(&layout.sample(VH), &layout).is_empty());

        assert_eq!(
            s.fire(card),
            Some(ClassChange {
                element: card,
                class: "animate-in"
            })
        );
        assert_eq!(s.state(card), Some(RevealState::Revealed));
        assert_eq!(s.fire(card), None, "timer fires only once");
    }

    #[test]
    fn persistent_scheduled_element_is_hidden_after_late_timer() {
        let (mut layout, card) = layout_with_card_at(1500.0);
        let mut s = RevealScheduler::new();
        s.add_group(RevealGroupConfig::persistent("active"), &[card]);
        s.set_delay(card, 100);

        layout.scroll_to(1000.0);
        assert_eq!(s.check(&layout.sample(VH), &layout).delayed.len(), 1);

        // Element leaves the band before the timer fires.
        layout.scroll_to(0.0);
        assert!(s.check(&layout.sample(VH), &layout).is_empty());
        assert_eq!(s.state(card), Some(RevealState::Scheduled));

        // The timer is not cancelled: the class is added anyway...
        assert!(s.fire(card).is_some());
        // ...and the next check removes it.
        let c = s.check(&layout.sample(VH), &layout);
        assert_eq!(c.hidden.len(), 1);
        assert_eq!(s.state(card), Some(RevealState::Hidden));
    }

    #[test]
    fn stagger_assigns_increasing_delays() {
        let mut layout = DocumentLayout::new();
        let cards: alloc::vec::Vec<_> = (0..4)
            .map(|i| layout.push_block(100.0 + f64::from(i) * 50.0, 40.0))
            .collect();
        let mut s = RevealScheduler::new();
        s.add_group(RevealGroupConfig::once("active").with_stagger(100), &cards);

        let c = s.check(&layout.sample(VH), &layout);
        // First card has no delay and shows immediately.
        assert_eq!(c.shown.len(), 1);
        let delays: alloc::vec::Vec<_> = c.delayed.iter().map(|d| d.delay_ms).collect();
        assert_eq!(delays, [100, 200, 300]);
    }

    #[test]
    fn container_trigger_reveals_children_together() {
        let mut layout = DocumentLayout::new();
        let section = layout.push_block(2000.0, 900.0);
        let a = layout.push_block(2600.0, 100.0);
        let b = layout.push_block(2700.0, 100.0);
        let mut s = RevealScheduler::new();
        s.add_group_triggered_by(
            RevealGroupConfig::once("active").with_trigger(0.8),
            section,
            &[a, b],
        );

        layout.scroll_to(1000.0); // section top at 1000, line at 800
        assert!(s.check(&layout.sample(VH), &layout).is_empty());

        layout.scroll_to(1300.0); // section top at 700
        let c = s.check(&layout.sample(VH), &layout);
        assert_eq!(c.shown.len(), 2, "children are below the line but follow the section");
    }

    #[test]
    fn duplicate_registration_keeps_first_group() {
        let (layout, card) = layout_with_card_at(100.0);
        let mut s = RevealScheduler::new();
        let first = s.add_group(RevealGroupConfig::once("animate-in"), &[card]);
        let second = s.add_group(RevealGroupConfig::persistent("active"), &[card]);
        assert_ne!(first, second);
        assert_eq!(s.len(), 1);

        let c = s.check(&layout.sample(VH), &layout);
        assert_eq!(c.shown[0].class, "animate-in");
        assert_eq!(s.group(second).map(|g| g.mode), Some(RevealMode::Persistent));
    }

    #[test]
    fn absent_elements_are_ignored() {
        let mut layout = DocumentLayout::new();
        let gone = layout.push_missing();
        let mut s = RevealScheduler::new();
        s.add_group(RevealGroupConfig::persistent("active"), &[gone]);
        assert!(s.check(&layout.sample(VH), &layout).is_empty());
        assert_eq!(s.state(gone), Some(RevealState::Hidden));
        assert_eq!(s.watching_count(), 1);
    }
}
