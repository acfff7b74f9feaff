// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover, focus and pointer-tilt styles.
//!
//! Every interaction here is a pure function from an input (pointer entered
//! or left, pointer position, focus) to style writes. Kinds that only add
//! motion are suppressed when the visitor prefers reduced motion.

use alloc::format;
use alloc::string::{String, ToString as _};

use kurbo::{Point, Rect};

use crate::backend::DomChanges;
use crate::element::ElementId;

const CARD_SHADOW: &str = "0 20px 40px rgba(0, 0, 0, 0.3)";
const SOFT_SHADOW: &str = "0 10px 20px rgba(0, 0, 0, 0.2)";
const GOLD: &str = "#d4af37";

/// Elements with a scripted hover effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoverKind {
    /// `.service-card`.
    ServiceCard,
    /// `.team-card` on the landing page (fixed lift and turn).
    TeamCard,
    /// `.stat-card`.
    StatCard,
    /// `.contact-card`.
    ContactCard,
    /// `.equipment-card`.
    EquipmentCard,
    /// `.project-card`.
    ProjectCard,
    /// `.stat-item`.
    StatItem,
    /// Social links in team cards and the footer.
    SocialLink,
    /// `.btn-primary` and `.btn-secondary`.
    Button,
    /// `.service-icon`.
    ServiceIcon,
    /// `.play-btn[data-youtube]` on pointer devices.
    PlayButton,
}

/// Inline styles for one hover state. `None` leaves a property untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverStyle {
    /// `transform`.
    pub transform: &'static str,
    /// `box-shadow`.
    pub box_shadow: Option<&'static str>,
    /// `background`.
    pub background: Option<&'static str>,
    /// `color`.
    pub color: Option<&'static str>,
    /// `transition`.
    pub transition: Option<&'static str>,
}

impl HoverStyle {
    const fn transform(transform: &'static str) -> Self {
        Self {
            transform,
            box_shadow: None,
            background: None,
            color: None,
            transition: None,
        }
    }

    const fn with_shadow(mut self, shadow: &'static str) -> Self {
        self.box_shadow = Some(shadow);
        self
    }

    /// Queues the writes for this style on `element`.
    pub fn write_to(&self, element: ElementId, out: &mut DomChanges) {
        out.set_style(element, "transform", self.transform.to_string());
        for (property, value) in [
            ("box-shadow", self.box_shadow),
            ("background", self.background),
            ("color", self.color),
            ("transition", self.transition),
        ] {
            if let Some(value) = value {
                out.set_style(element, property, value.to_string());
            }
        }
    }
}

impl HoverKind {
    /// Returns `true` for effects that are pure motion and are dropped under
    /// `prefers-reduced-motion`.
    #[must_use]
    pub const fn is_motion_only(self) -> bool {
        matches!(self, Self::Button | Self::ServiceIcon)
    }

    /// Style while the pointer is over the element.
    #[must_use]
    pub const fn enter(self) -> HoverStyle {
        match self {
            Self::ServiceCard | Self::StatCard | Self::ProjectCard => {
                HoverStyle::transform("translateY(-10px)").with_shadow(CARD_SHADOW)
            }
            Self::TeamCard | Self::EquipmentCard => {
                HoverStyle::transform("translateY(-10px) rotateY(5deg)").with_shadow(CARD_SHADOW)
            }
            Self::ContactCard => HoverStyle::transform("translateY(-5px)").with_shadow(SOFT_SHADOW),
            Self::StatItem => HoverStyle::transform("scale(1.05)").with_shadow(SOFT_SHADOW),
            Self::SocialLink => HoverStyle {
                transform: "scale(1.2) rotate(5deg)",
                box_shadow: None,
                background: Some(GOLD),
                color: Some("#000"),
                transition: None,
            },
            Self::Button => HoverStyle::transform("scale(1.05)"),
            Self::ServiceIcon => HoverStyle::transform("rotate(360deg)"),
            Self::PlayButton => HoverStyle {
                transform: "scale(1.1)",
                box_shadow: None,
                background: None,
                color: None,
                transition: Some("transform 0.2s ease"),
            },
        }
    }

    /// Style after the pointer leaves.
    #[must_use]
    pub const fn leave(self) -> HoverStyle {
        match self {
            Self::ServiceCard | Self::StatCard | Self::ProjectCard | Self::ContactCard => {
                HoverStyle::transform("translateY(0)").with_shadow("none")
            }
            Self::TeamCard | Self::EquipmentCard => {
                HoverStyle::transform("translateY(0) rotateY(0deg)").with_shadow("none")
            }
            Self::StatItem => HoverStyle::transform("scale(1)").with_shadow("none"),
            Self::SocialLink => HoverStyle {
                transform: "scale(1) rotate(0deg)",
                box_shadow: None,
                background: Some("rgba(255, 255, 255, 0.1)"),
                color: Some("#ffffff"),
                transition: None,
            },
            Self::Button | Self::PlayButton => HoverStyle::transform("scale(1)"),
            Self::ServiceIcon => HoverStyle::transform("rotate(0deg)"),
        }
    }
}

/// Writes for a pointer entering (`entered`) or leaving `element`.
///
/// Returns no writes for motion-only kinds when `reduced_motion` is set.
#[must_use]
pub fn hover(
    kind: HoverKind,
    element: ElementId,
    entered: bool,
    reduced_motion: bool,
) -> DomChanges {
    let mut out = DomChanges::new();
    if reduced_motion && kind.is_motion_only() {
        return out;
    }
    let style = if entered { kind.enter() } else { kind.leave() };
    style.write_to(element, &mut out);
    out
}

/// Divisor turning a pointer offset in pixels into degrees of tilt.
pub const TILT_DIVISOR: f64 = 20.0;

/// Transform for a tilt-tracked card the pointer has left.
pub const TILT_RESET: &str = "translateY(0) rotateX(0deg) rotateY(0deg) scale(1)";

/// Tilt angles, in degrees, for a pointer over a card.
///
/// `card` is the card's viewport rect and `pointer` the pointer's viewport
/// position. The card leans toward the pointer: below center tips the top
/// away (`rotate_x > 0`), left of center turns it left (`rotate_y > 0`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    /// Rotation about the horizontal axis.
    pub rotate_x: f64,
    /// Rotation about the vertical axis.
    pub rotate_y: f64,
}

impl Tilt {
    /// Computes the tilt for `pointer` over `card`.
    #[must_use]
    pub fn new(card: Rect, pointer: Point) -> Self {
        let center = card.center();
        Self {
            rotate_x: (pointer.y - center.y) / TILT_DIVISOR + 0.0,
            rotate_y: (center.x - pointer.x) / TILT_DIVISOR + 0.0,
        }
    }

    /// The lifted, tilted `transform` value.
    #[must_use]
    pub fn transform(&self) -> String {
        format!(
            "translateY(-20px) rotateX({}deg) rotateY({}deg) scale(1.02)",
            self.rotate_x, self.rotate_y
        )
    }

    /// Queues the tilt transform on `element`.
    pub fn write_to(&self, element: ElementId, out: &mut DomChanges) {
        out.set_style(element, "transform", self.transform());
    }
}

/// Writes for a form control gaining (`focused`) or losing focus.
#[must_use]
pub fn focus(element: ElementId, focused: bool) -> DomChanges {
    let (border, background) = if focused {
        (GOLD, "rgba(255, 255, 255, 0.2)")
    } else {
        ("rgba(255, 255, 255, 0.2)", "rgba(255, 255, 255, 0.1)")
    };
    let mut out = DomChanges::new();
    out.set_style(element, "border-color", border.to_string());
    out.set_style(element, "background", background.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_lift_and_reset() {
        let el = ElementId(4);
        let on = hover(HoverKind::ServiceCard, el, true, false);
        assert_eq!(on.style_value(el, "transform"), Some("translateY(-10px)"));
        assert_eq!(on.style_value(el, "box-shadow"), Some(CARD_SHADOW));
        let off = hover(HoverKind::ServiceCard, el, false, false);
        assert_eq!(off.style_value(el, "transform"), Some("translateY(0)"));
        assert_eq!(off.style_value(el, "box-shadow"), Some("none"));
    }

    #[test]
    fn social_link_recolors() {
        let el = ElementId(0);
        let on = hover(HoverKind::SocialLink, el, true, false);
        assert_eq!(on.style_value(el, "background"), Some(GOLD));
        assert_eq!(on.style_value(el, "color"), Some("#000"));
        assert_eq!(on.style_value(el, "box-shadow"), None);
    }

    #[test]
    fn reduced_motion_drops_buttons_and_icons_only() {
        let el = ElementId(0);
        assert!(hover(HoverKind::Button, el, true, true).is_empty());
        assert!(hover(HoverKind::ServiceIcon, el, true, true).is_empty());
        assert!(!hover(HoverKind::Button, el, true, false).is_empty());
        assert!(!hover(HoverKind::ProjectCard, el, true, true).is_empty());
    }

    #[test]
    fn tilt_follows_pointer() {
        let card = Rect::new(100.0, 200.0, 300.0, 400.0);
        let centered = Tilt::new(card, Point::new(200.0, 300.0));
        assert_eq!(centered.rotate_x, 0.0);
        assert_eq!(centered.rotate_y, 0.0);
        assert_eq!(
            centered.transform(),
            "translateY(-20px) rotateX(0deg) rotateY(0deg) scale(1.02)"
        );

        let corner = Tilt::new(card, Point::new(100.0, 400.0));
        assert_eq!(corner.rotate_x, 5.0);
        assert_eq!(corner.rotate_y, 5.0);
    }

    #[test]
    fn focus_highlights_border() {
        let el = ElementId(2);
        assert_eq!(focus(el, true).style_value(el, "border-color"), Some(GOLD));
        assert_eq!(
            focus(el, false).style_value(el, "background"),
            Some("rgba(255, 255, 255, 0.1)")
        );
    }
}
