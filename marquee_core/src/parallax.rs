// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-scaled parallax offsets.
//!
//! [`ParallaxEngine`] owns a fixed registry of [`ParallaxLayer`]s built at
//! page-ready time. Each [`recompute`](ParallaxEngine::recompute) reads one
//! [`ScrollSample`] and produces an offset for every layer currently
//! intersecting the viewport. Off-screen layers keep whatever offset they
//! last received; they are invisible until they re-enter, at which point
//! the next frame corrects them.

use alloc::string::ToString as _;
use alloc::vec::Vec;

use crate::backend::{DomChanges, px, translate_y};
use crate::element::ElementId;
use crate::geometry::{Geometry, ScrollSample};

/// Where a layer's offset is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleTarget {
    /// `transform: translateY(<offset>px)` on the element itself.
    Translate,
    /// A custom property (e.g. `--parallax-y`) read by a pseudo-element
    /// background in the stylesheet.
    Variable(&'static str),
}

/// The origin the scroll distance is measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParallaxAnchor {
    /// Offset is `-(scroll_y * speed)`: the layer moves from page top.
    #[default]
    Document,
    /// Offset is `-(scroll_y - element_top) * speed`: the layer is at rest
    /// when its own top reaches the top of the viewport.
    Element,
}

/// One registered parallax layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxLayer {
    /// The element, or `None` if its selector matched nothing.
    pub element: Option<ElementId>,
    /// Depth factor in `(0, 1]`; larger values move faster.
    pub speed: f64,
    /// Where the offset is written.
    pub target: StyleTarget,
    /// Where scroll distance is measured from.
    pub anchor: ParallaxAnchor,
}

impl ParallaxLayer {
    /// Creates a document-anchored translate layer.
    #[must_use]
    pub fn new(element: Option<ElementId>, speed: f64) -> Self {
        debug_assert!(
            speed > 0.0 && speed <= 1.0,
            "parallax speed must be in (0, 1], got {speed}"
        );
        Self {
            element,
            speed,
            target: StyleTarget::Translate,
            anchor: ParallaxAnchor::Document,
        }
    }

    /// Writes the offset to `target` instead of `transform`.
    #[must_use]
    pub fn with_target(mut self, target: StyleTarget) -> Self {
        self.target = target;
        self
    }

    /// Measures scroll distance from the element's own top.
    #[must_use]
    pub fn anchored(mut self) -> Self {
        self.anchor = ParallaxAnchor::Element;
        self
    }
}

/// Offset for a document-anchored layer.
#[inline]
#[must_use]
pub fn offset(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

/// One computed layer offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxUpdate {
    /// The layer's element.
    pub element: ElementId,
    /// Vertical offset in pixels.
    pub offset: f64,
    /// Where to write it.
    pub target: StyleTarget,
}

impl ParallaxUpdate {
    /// Queues the style write for this update.
    pub fn write_to(&self, out: &mut DomChanges) {
        match self.target {
            StyleTarget::Translate => {
                out.set_style(self.element, "transform", translate_y(self.offset));
            }
            StyleTarget::Variable(name) => out.set_style(self.element, name, px(self.offset)),
        }
    }
}

/// Result of one [`ParallaxEngine::recompute`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParallaxChanges {
    /// Offsets for layers intersecting the viewport, in registry order.
    pub updates: Vec<ParallaxUpdate>,
    /// Layers skipped because they were absent or off-screen.
    pub skipped: u32,
}

impl ParallaxChanges {
    /// Queues every update's style write.
    pub fn write_to(&self, out: &mut DomChanges) {
        for u in &self.updates {
            u.write_to(out);
        }
    }

    /// Returns the update for `element`, if it was recomputed.
    #[must_use]
    pub fn get(&self, element: ElementId) -> Option<&ParallaxUpdate> {
        self.updates.iter().find(|u| u.element == element)
    }
}

/// Fixed registry of parallax layers.
#[derive(Clone, Debug, Default)]
pub struct ParallaxEngine {
    layers: Vec<ParallaxLayer>,
}

impl ParallaxEngine {
    /// Creates an engine over `layers`. The registry never changes after
    /// construction.
    #[must_use]
    pub fn new(layers: Vec<ParallaxLayer>) -> Self {
        Self { layers }
    }

    /// Returns the registered layers.
    #[must_use]
    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    /// Computes offsets for every visible layer.
    #[must_use]
    pub fn recompute(&self, sample: &ScrollSample, geometry: &impl Geometry) -> ParallaxChanges {
        let mut changes = ParallaxChanges::default();
        for layer in &self.layers {
            let Some(element) = layer.element else {
                changes.skipped += 1;
                continue;
            };
            let Some(rect) = geometry.bounding_rect(element) else {
                changes.skipped += 1;
                continue;
            };

            let offset = match layer.anchor {
                ParallaxAnchor::Document => {
                    if !sample.intersects(rect) {
                        changes.skipped += 1;
                        continue;
                    }
                    offset(sample.scroll_y, layer.speed)
                }
                ParallaxAnchor::Element => {
                    if !(rect.y0 < sample.viewport_height && rect.y1 > 0.0) {
                        changes.skipped += 1;
                        continue;
                    }
                    // rect.y0 == element_doc_top - scroll_y
                    rect.y0 * layer.speed
                }
            };

            changes.updates.push(ParallaxUpdate {
                element,
                offset,
                target: layer.target,
            });
        }
        changes
    }
}

/// Downward-only drift of the hero background video.
///
/// While the hero section is on screen and the user scrolls down, the video
/// translates by `scroll_y * speed`; scrolling up or leaving the hero snaps it
/// back to rest. Text layers are pinned to their own compositing layer
/// (`translateZ(0)`) every frame so they stay crisp.
#[derive(Clone, Debug)]
pub struct HeroDrift {
    section: ElementId,
    video: ElementId,
    pinned: Vec<ElementId>,
    speed: f64,
    last_scroll_y: f64,
}

impl HeroDrift {
    /// Drift factor used on the studio landing page.
    pub const DEFAULT_SPEED: f64 = 0.1;

    /// Creates the effect, or `None` if the hero section or video is absent.
    #[must_use]
    pub fn new(
        section: Option<ElementId>,
        video: Option<ElementId>,
        pinned: Vec<ElementId>,
        speed: f64,
    ) -> Option<Self> {
        Some(Self {
            section: section?,
            video: video?,
            pinned,
            speed,
            last_scroll_y: 0.0,
        })
    }

    /// Style writes to apply once at page-ready.
    #[must_use]
    pub fn init_ops(&self) -> DomChanges {
        let mut out = DomChanges::new();
        self.pin(&mut out);
        out
    }

    /// Recomputes the drift for one frame.
    pub fn update(&mut self, sample: &ScrollSample, geometry: &impl Geometry) -> DomChanges {
        let mut out = DomChanges::new();
        let scrolled = sample.scroll_y;
        let hero_height = geometry
            .bounding_rect(self.section)
            .map_or(0.0, |r| r.height());

        let drifting = scrolled < hero_height && scrolled > self.last_scroll_y;
        let value = if drifting {
            translate_y(scrolled * self.speed)
        } else {
            "translateY(0)".to_string()
        };
        out.set_style(self.video, "transform", value);
        self.pin(&mut out);

        self.last_scroll_y = scrolled;
        out
    }

    fn pin(&self, out: &mut DomChanges) {
        for &el in &self.pinned {
            out.set_style(el, "transform", "translateZ(0)".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::geometry::DocumentLayout;

    const VH: f64 = 800.0;

    #[test]
    fn offset_scales_scroll_by_speed() {
        assert_eq!(offset(0.0, 0.2), 0.0);
        assert!((offset(500.0, 0.2) - -100.0).abs() < 1e-9);
    }

    #[test]
    fn visible_layer_gets_translate() {
        let mut layout = DocumentLayout::new();
        let bg = layout.push_block(0.0, 2000.0);
        let engine = ParallaxEngine::new(vec![ParallaxLayer::new(Some(bg), 0.2)]);

        layout.scroll_to(500.0);
        let changes = engine.recompute(&layout.sample(VH), &layout);
        let mut ops = DomChanges::new();
        changes.write_to(&mut ops);
        assert_eq!(ops.style_value(bg, "transform"), Some("translateY(-100px)"));

        layout.scroll_to(0.0);
        let mut ops = DomChanges::new();
        engine.recompute(&layout.sample(VH), &layout).write_to(&mut ops);
        assert_eq!(ops.style_value(bg, "transform"), Some("translateY(0px)"));
    }

    #[test]
    fn variable_target_writes_custom_property() {
        let mut layout = DocumentLayout::new();
        let about = layout.push_block(0.0, 900.0);
        let engine = ParallaxEngine::new(vec![
            ParallaxLayer::new(Some(about), 0.2).with_target(StyleTarget::Variable("--parallax-y")),
        ]);
        layout.scroll_to(100.0);

        let mut ops = DomChanges::new();
        engine.recompute(&layout.sample(VH), &layout).write_to(&mut ops);
        assert_eq!(ops.style_value(about, "--parallax-y"), Some("-20px"));
        assert_eq!(ops.style_value(about, "transform"), None);
    }

    #[test]
    fn offscreen_layer_is_not_touched() {
        let mut layout = DocumentLayout::new();
        let near = layout.push_block(0.0, 600.0);
        let far = layout.push_block(5000.0, 600.0);
        let engine = ParallaxEngine::new(vec![
            ParallaxLayer::new(Some(near), 0.1),
            ParallaxLayer::new(Some(far), 0.3),
        ]);
        layout.scroll_to(200.0);

        let changes = engine.recompute(&layout.sample(VH), &layout);
        assert!(changes.get(near).is_some());
        assert!(changes.get(far).is_none());
        assert_eq!(changes.skipped, 1);

        let mut ops = DomChanges::new();
        changes.write_to(&mut ops);
        assert!(!ops.touches(far));
    }

    #[test]
    fn missing_layers_are_skipped_silently() {
        let mut layout = DocumentLayout::new();
        let detached = layout.push_missing();
        let engine = ParallaxEngine::new(vec![
            ParallaxLayer::new(None, 0.1),
            ParallaxLayer::new(Some(detached), 0.2),
        ]);
        let changes = engine.recompute(&layout.sample(VH), &layout);
        assert!(changes.updates.is_empty());
        assert_eq!(changes.skipped, 2);
    }

    #[test]
    fn anchored_layer_rests_at_its_own_top() {
        let mut layout = DocumentLayout::new();
        let bg = layout.push_block(1000.0, 600.0);
        let engine = ParallaxEngine::new(vec![ParallaxLayer::new(Some(bg), 0.5).anchored()]);

        layout.scroll_to(1000.0);
        let c = engine.recompute(&layout.sample(VH), &layout);
        assert_eq!(c.get(bg).map(|u| u.offset), Some(0.0));

        layout.scroll_to(1200.0);
        let c = engine.recompute(&layout.sample(VH), &layout);
        assert_eq!(c.get(bg).map(|u| u.offset), Some(-100.0));

        // Bottom edge exactly at the viewport top is out of view.
        layout.scroll_to(1600.0);
        let c = engine.recompute(&layout.sample(VH), &layout);
        assert!(c.updates.is_empty());
    }

    #[test]
    fn hero_drift_only_moves_while_scrolling_down_inside_hero() {
        let mut layout = DocumentLayout::new();
        let hero = layout.push_block(0.0, 900.0);
        let video = layout.push_block(0.0, 900.0);
        let title = layout.push_block(300.0, 80.0);
        let mut drift =
            HeroDrift::new(Some(hero), Some(video), vec![title], HeroDrift::DEFAULT_SPEED).unwrap();

        layout.scroll_to(500.0);
        let ops = drift.update(&layout.sample(VH), &layout);
        assert_eq!(ops.style_value(video, "transform"), Some("translateY(50px)"));
        assert_eq!(ops.style_value(title, "transform"), Some("translateZ(0)"));

        layout.scroll_to(200.0);
        let ops = drift.update(&layout.sample(VH), &layout);
        assert_eq!(ops.style_value(video, "transform"), Some("translateY(0)"));

        layout.scroll_to(1200.0);
        let ops = drift.update(&layout.sample(VH), &layout);
        assert_eq!(ops.style_value(video, "transform"), Some("translateY(0)"));
    }

    #[test]
    fn hero_drift_requires_section_and_video() {
        assert!(HeroDrift::new(None, Some(ElementId(0)), vec![], 0.1).is_none());
        assert!(HeroDrift::new(Some(ElementId(0)), None, vec![], 0.1).is_none());
    }
}
