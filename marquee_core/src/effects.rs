// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame entry point for scroll-driven controllers.
//!
//! [`ScrollEffects`] owns the parallax engine, the optional hero drift, the
//! reveal scheduler and the optional section tracker, and evaluates all of
//! them against one [`ScrollSample`] per coalesced frame. The result is one
//! batch of DOM writes for the presenter plus the delayed reveals the backend
//! must arm timers for.

use alloc::format;
use alloc::string::ToString as _;
use alloc::vec::Vec;

use crate::backend::DomChanges;
use crate::coalesce::FrameReport;
use crate::element::ElementId;
use crate::geometry::{Geometry, ScrollSample};
use crate::parallax::{HeroDrift, ParallaxEngine};
use crate::reveal::{DelayedReveal, RevealScheduler};
use crate::section::SectionTracker;
use crate::trace::{
    FrameEvent, FrameSummary, ParallaxEvent, RevealEvent, RevealTransition, SectionEvent, Tracer,
};

/// Section tracker plus the indicator dots it drives.
#[derive(Clone, Debug)]
pub struct SectionIndicators {
    /// The tracker.
    pub tracker: SectionTracker,
    /// One dot per section.
    pub indicators: Vec<ElementId>,
    /// Class marking the active dot.
    pub class: &'static str,
}

/// Output of one evaluated frame.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    /// Writes to apply now.
    pub changes: DomChanges,
    /// Reveals to apply after a delay; pass each back to
    /// [`ScrollEffects::fire`] when its timer expires.
    pub delayed: Vec<DelayedReveal>,
    /// Counts for diagnostics.
    pub summary: FrameSummary,
}

/// Scroll-driven controllers evaluated together.
#[derive(Clone, Debug)]
pub struct ScrollEffects {
    parallax: ParallaxEngine,
    hero: Option<HeroDrift>,
    reveal: RevealScheduler,
    sections: Option<SectionIndicators>,
}

impl ScrollEffects {
    /// Bundles a parallax engine and a reveal scheduler.
    #[must_use]
    pub fn new(parallax: ParallaxEngine, reveal: RevealScheduler) -> Self {
        Self {
            parallax,
            hero: None,
            reveal,
            sections: None,
        }
    }

    /// Adds the hero drift.
    #[must_use]
    pub fn with_hero(mut self, hero: Option<HeroDrift>) -> Self {
        self.hero = hero;
        self
    }

    /// Adds section indicators.
    #[must_use]
    pub fn with_sections(mut self, sections: Option<SectionIndicators>) -> Self {
        self.sections = sections;
        self
    }

    /// Returns the reveal scheduler.
    #[must_use]
    pub fn reveal(&self) -> &RevealScheduler {
        &self.reveal
    }

    /// Returns the parallax engine.
    #[must_use]
    pub fn parallax(&self) -> &ParallaxEngine {
        &self.parallax
    }

    /// Returns the section indicators, if configured.
    #[must_use]
    pub fn sections(&self) -> Option<&SectionIndicators> {
        self.sections.as_ref()
    }

    /// Writes to apply once at page-ready, before the first frame.
    #[must_use]
    pub fn init_ops(&self) -> DomChanges {
        self.hero.as_ref().map(HeroDrift::init_ops).unwrap_or_default()
    }

    /// Evaluates every controller for one coalesced frame.
    pub fn frame(
        &mut self,
        report: FrameReport,
        sample: &ScrollSample,
        geometry: &impl Geometry,
        tracer: &mut Tracer<'_>,
    ) -> FrameOutput {
        let frame_index = report.frame_index;
        tracer.frame(&FrameEvent {
            frame_index,
            events: report.events,
            scroll_y: sample.scroll_y,
            viewport_height: sample.viewport_height,
        });

        let mut out = FrameOutput::default();
        out.summary.frame_index = frame_index;
        out.summary.events = report.events;
        out.summary.scroll_y = sample.scroll_y;

        out.summary.parallax_updates =
            self.run_parallax(frame_index, sample, geometry, tracer, &mut out.changes);

        if let Some(hero) = &mut self.hero {
            let mut ops = hero.update(sample, geometry);
            out.changes.append(&mut ops);
        }

        let reveals = self.reveal.check(sample, geometry);
        for c in &reveals.shown {
            tracer.reveal(&RevealEvent {
                frame_index: Some(frame_index),
                element: c.element,
                transition: RevealTransition::Shown,
            });
        }
        for c in &reveals.hidden {
            tracer.reveal(&RevealEvent {
                frame_index: Some(frame_index),
                element: c.element,
                transition: RevealTransition::Hidden,
            });
        }
        for d in &reveals.delayed {
            tracer.reveal(&RevealEvent {
                frame_index: Some(frame_index),
                element: d.element,
                transition: RevealTransition::Scheduled {
                    delay_ms: d.delay_ms,
                },
            });
        }
        out.summary.shown = count(reveals.shown.len());
        out.summary.hidden = count(reveals.hidden.len());
        out.summary.scheduled = count(reveals.delayed.len());
        reveals.write_to(&mut out.changes);
        out.delayed = reveals.delayed;

        if let Some(s) = &mut self.sections
            && let Some(index) = s.tracker.update(sample, geometry)
        {
            tracer.section_change(&SectionEvent { frame_index, index });
            s.tracker
                .write_indicators(&s.indicators, s.class, &mut out.changes);
            out.summary.section = Some(index);
        }

        out.summary.dom_ops = count(out.changes.len());
        tracer.frame_summary(&out.summary);
        out
    }

    /// Recomputes parallax only, outside the coalescing path.
    pub fn resize(
        &self,
        frame_index: u64,
        sample: &ScrollSample,
        geometry: &impl Geometry,
        tracer: &mut Tracer<'_>,
    ) -> DomChanges {
        let mut changes = DomChanges::new();
        self.run_parallax(frame_index, sample, geometry, tracer, &mut changes);
        changes
    }

    /// Completes a delayed reveal whose timer expired.
    pub fn fire(&mut self, element: ElementId, tracer: &mut Tracer<'_>) -> DomChanges {
        let mut changes = DomChanges::new();
        if let Some(c) = self.reveal.fire(element) {
            tracer.reveal(&RevealEvent {
                frame_index: None,
                element,
                transition: RevealTransition::Fired,
            });
            changes.add_class(c.element, c.class);
        }
        changes
    }

    /// Scroll offset that brings section `index` below a header of
    /// `header_height` pixels.
    #[must_use]
    pub fn section_target(
        &self,
        index: usize,
        header_height: f64,
        sample: &ScrollSample,
        geometry: &impl Geometry,
    ) -> Option<f64> {
        self.sections
            .as_ref()?
            .tracker
            .scroll_target(index, header_height, sample, geometry)
    }

    fn run_parallax(
        &self,
        frame_index: u64,
        sample: &ScrollSample,
        geometry: &impl Geometry,
        tracer: &mut Tracer<'_>,
        out: &mut DomChanges,
    ) -> u32 {
        let parallax = self.parallax.recompute(sample, geometry);
        let updated = count(parallax.updates.len());
        tracer.parallax(&ParallaxEvent {
            frame_index,
            updated,
            skipped: parallax.skipped,
        });
        parallax.write_to(out);
        updated
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Delays for a staggered sequence: the n-th item waits `n * step_ms`.
pub fn stagger(len: usize, step_ms: u32) -> impl Iterator<Item = u32> {
    (0..len).map(move |i| count(i).saturating_mul(step_ms))
}

/// `animation-delay` writes staggering CSS-driven entrances.
#[must_use]
pub fn animation_delays(elements: &[ElementId], step_ms: u32) -> DomChanges {
    let mut out = DomChanges::new();
    for (&el, delay) in elements.iter().zip(stagger(elements.len(), step_ms)) {
        out.set_style(el, "animation-delay", format!("{delay}ms"));
    }
    out
}

/// Writes that bring one hero entrance item into its resting state.
#[must_use]
pub fn entrance(element: ElementId) -> DomChanges {
    let mut out = DomChanges::new();
    out.set_style(element, "opacity", "1".to_string());
    out.set_style(element, "transform", "translateY(0)".to_string());
    out
}

/// Delay between `load` and the body fade-in.
pub const BODY_FADE_DELAY_MS: u32 = 100;

/// Writes hiding the body before `load`.
#[must_use]
pub fn body_hidden(body: ElementId) -> DomChanges {
    let mut out = DomChanges::new();
    out.set_style(body, "opacity", "0".to_string());
    out.set_style(body, "transform", "translateY(30px)".to_string());
    out
}

/// Writes fading the body in.
#[must_use]
pub fn body_shown(body: ElementId) -> DomChanges {
    let mut out = DomChanges::new();
    out.set_style(
        body,
        "transition",
        "opacity 0.8s ease, transform 0.8s ease".to_string(),
    );
    out.set_style(body, "opacity", "1".to_string());
    out.set_style(body, "transform", "translateY(0)".to_string());
    out
}

/// Images waiting for their first appearance on screen.
#[derive(Clone, Debug, Default)]
pub struct LazyImages {
    waiting: Vec<ElementId>,
}

impl LazyImages {
    /// Watches `images`.
    #[must_use]
    pub fn new(images: Vec<ElementId>) -> Self {
        Self { waiting: images }
    }

    /// Number of images not yet loaded.
    #[must_use]
    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    /// Returns images that entered the viewport and stops watching them.
    ///
    /// The caller copies `data-src` into `src`; the returned writes drop the
    /// `lazy` class.
    pub fn check(
        &mut self,
        sample: &ScrollSample,
        geometry: &impl Geometry,
    ) -> (Vec<ElementId>, DomChanges) {
        let mut loaded = Vec::new();
        let mut out = DomChanges::new();
        self.waiting.retain(|&img| {
            let visible = geometry
                .bounding_rect(img)
                .is_some_and(|r| sample.intersects(r));
            if visible {
                loaded.push(img);
                out.remove_class(img, "lazy");
            }
            !visible
        });
        (loaded, out)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::backend::DomOp;
    use crate::geometry::DocumentLayout;
    use crate::parallax::ParallaxLayer;
    use crate::reveal::{RevealGroupConfig, RevealState};

    const VH: f64 = 800.0;

    struct Page {
        layout: DocumentLayout,
        effects: ScrollEffects,
        bg: ElementId,
        card: ElementId,
        dots: [ElementId; 2],
    }

    fn page() -> Page {
        let mut layout = DocumentLayout::new();
        let home = layout.push_block(0.0, 1000.0);
        let about = layout.push_block(1000.0, 1000.0);
        let bg = layout.push_block(0.0, 1000.0);
        let card = layout.push_block(1200.0, 200.0);
        let dots = [layout.push_missing(), layout.push_missing()];

        let mut reveal = RevealScheduler::new();
        reveal.add_group(RevealGroupConfig::persistent("active"), &[card]);
        let effects = ScrollEffects::new(
            ParallaxEngine::new(vec![ParallaxLayer::new(Some(bg), 0.2)]),
            reveal,
        )
        .with_sections(Some(SectionIndicators {
            tracker: SectionTracker::new(vec![home, about], 100.0),
            indicators: dots.to_vec(),
            class: "active",
        }));
        Page {
            layout,
            effects,
            bg,
            card,
            dots,
        }
    }

    #[test]
    fn one_frame_drives_every_controller() {
        let mut p = page();
        p.layout.scroll_to(500.0);
        let report = FrameReport {
            frame_index: 3,
            events: 5,
        };
        let out = p.effects.frame(
            report,
            &p.layout.sample(VH),
            &p.layout,
            &mut Tracer::none(),
        );

        assert_eq!(out.changes.style_value(p.bg, "transform"), Some("translateY(-100px)"));
        // Card top sits at 700, below the 680 trigger line.
        assert!(!out.changes.touches(p.card));
        assert_eq!(out.summary.section, Some(0));
        assert!(out.changes.ops().contains(&DomOp::AddClass {
            element: p.dots[0],
            class: "active"
        }));
        assert_eq!(out.summary.events, 5);
        assert_eq!(out.summary.parallax_updates, 1);
        assert_eq!(out.summary.dom_ops, u32::try_from(out.changes.len()).unwrap());
    }

    #[test]
    fn reveal_and_section_follow_scroll() {
        let mut p = page();
        p.layout.scroll_to(950.0);
        let out = p.effects.frame(
            FrameReport::default(),
            &p.layout.sample(VH),
            &p.layout,
            &mut Tracer::none(),
        );
        assert_eq!(out.summary.shown, 1);
        assert_eq!(out.summary.section, Some(1));
        assert_eq!(p.effects.reveal().state(p.card), Some(RevealState::Revealed));

        // Same section again: no indicator writes.
        p.layout.scroll_to(960.0);
        let out = p.effects.frame(
            FrameReport::default(),
            &p.layout.sample(VH),
            &p.layout,
            &mut Tracer::none(),
        );
        assert_eq!(out.summary.section, None);
        assert!(!out.changes.touches(p.dots[1]));
    }

    #[test]
    fn resize_only_touches_parallax() {
        let mut p = page();
        p.layout.scroll_to(950.0);
        let ops = p
            .effects
            .resize(0, &p.layout.sample(VH), &p.layout, &mut Tracer::none());
        assert!(ops.touches(p.bg));
        assert!(!ops.touches(p.card));
        assert_eq!(p.effects.reveal().state(p.card), Some(RevealState::Hidden));
    }

    #[test]
    fn fire_completes_scheduled_reveal() {
        let mut layout = DocumentLayout::new();
        let card = layout.push_block(100.0, 100.0);
        let mut reveal = RevealScheduler::new();
        reveal.add_group(RevealGroupConfig::once("animate-in"), &[card]);
        reveal.set_delay(card, 400);
        let mut effects = ScrollEffects::new(ParallaxEngine::new(vec![]), reveal);

        let out = effects.frame(
            FrameReport::default(),
            &layout.sample(VH),
            &layout,
            &mut Tracer::none(),
        );
        assert_eq!(out.delayed, [DelayedReveal {
            element: card,
            delay_ms: 400
        }]);
        assert!(!out.changes.touches(card));

        let ops = effects.fire(card, &mut Tracer::none());
        assert_eq!(
            ops.ops(),
            [DomOp::AddClass {
                element: card,
                class: "animate-in"
            }]
        );
        assert!(effects.fire(card, &mut Tracer::none()).is_empty());
    }

    #[test]
    fn section_target_uses_tracker() {
        let mut p = page();
        p.layout.scroll_to(200.0);
        assert_eq!(
            p.effects
                .section_target(1, 80.0, &p.layout.sample(VH), &p.layout),
            Some(920.0)
        );
    }

    #[test]
    fn stagger_and_animation_delays() {
        assert_eq!(stagger(4, 200).collect::<Vec<_>>(), [0, 200, 400, 600]);
        let els = [ElementId(0), ElementId(1)];
        let ops = animation_delays(&els, 200);
        assert_eq!(ops.style_value(ElementId(1), "animation-delay"), Some("200ms"));
    }

    #[test]
    fn lazy_images_load_once() {
        let mut layout = DocumentLayout::new();
        let near = layout.push_block(100.0, 100.0);
        let far = layout.push_block(3000.0, 100.0);
        let mut lazy = LazyImages::new(vec![near, far]);

        let (loaded, ops) = lazy.check(&layout.sample(VH), &layout);
        assert_eq!(loaded, [near]);
        assert_eq!(
            ops.ops(),
            [DomOp::RemoveClass {
                element: near,
                class: "lazy"
            }]
        );
        assert_eq!(lazy.waiting(), 1);

        layout.scroll_to(2500.0);
        let (loaded, _) = lazy.check(&layout.sample(VH), &layout);
        assert_eq!(loaded, [far]);
        assert_eq!(lazy.waiting(), 0);
    }

    #[test]
    fn body_fade_sequence() {
        let body = ElementId(0);
        assert_eq!(body_hidden(body).style_value(body, "opacity"), Some("0"));
        assert_eq!(body_shown(body).style_value(body, "opacity"), Some("1"));
        assert_eq!(entrance(body).style_value(body, "transform"), Some("translateY(0)"));
    }
}
