// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The markup contract: which selectors each controller binds to.
//!
//! A [`PageConfig`] is plain `'static` data. Backends resolve its selectors
//! once at page ready; anything that matches nothing is skipped.
//!
//! Two presets mirror the site's pages:
//!
//! - [`PageConfig::cinema()`] for the landing page: hero drift and depth
//!   layers, section parallax via `--parallax-y`, persistent and once reveal
//!   groups, section indicators, category filters, video and contact form.
//! - [`PageConfig::team()`] for the team page: element-anchored parallax,
//!   staggered once reveals, pointer tilt, an auto-hiding navbar and a fade-in
//!   on load.

use crate::hover::HoverKind;
use crate::nav::NavConfig;
use crate::parallax::{ParallaxAnchor, StyleTarget};
use crate::reveal::RevealGroupConfig;
use crate::section::SectionTracker;

/// Whether a selector binds its first match or every match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Match {
    /// `querySelector`.
    First,
    /// `querySelectorAll`.
    All,
}

/// A parallax layer binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxSpec {
    /// Selector for the layer.
    pub selector: &'static str,
    /// Depth speed in `(0, 1]`.
    pub speed: f64,
    /// Where the offset is written.
    pub target: StyleTarget,
    /// Offset origin.
    pub anchor: ParallaxAnchor,
    /// How many matches become layers.
    pub matches: Match,
}

impl ParallaxSpec {
    /// A translated layer bound to the first match.
    #[must_use]
    pub const fn first(selector: &'static str, speed: f64) -> Self {
        Self {
            selector,
            speed,
            target: StyleTarget::Translate,
            anchor: ParallaxAnchor::Document,
            matches: Match::First,
        }
    }

    /// Writes the offset to a custom property instead of `transform`.
    #[must_use]
    pub const fn variable(mut self, name: &'static str) -> Self {
        self.target = StyleTarget::Variable(name);
        self
    }

    /// Binds every match and offsets each from its own document top.
    #[must_use]
    pub const fn anchored_all(mut self) -> Self {
        self.anchor = ParallaxAnchor::Element;
        self.matches = Match::All;
        self
    }
}

/// The hero video drift binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroSpec {
    /// The hero section, whose height bounds the drift.
    pub section: &'static str,
    /// The drifting video wrapper.
    pub video: &'static str,
    /// Elements kept on their own compositing layer.
    pub pinned: &'static [&'static str],
    /// Drift speed.
    pub speed: f64,
}

/// A reveal group binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealSpec {
    /// Selector for the group's elements.
    pub selector: &'static str,
    /// Group policy.
    pub group: RevealGroupConfig,
    /// If set, every element triggers when this container arrives.
    pub container: Option<&'static str>,
}

impl RevealSpec {
    /// Each element triggers on its own position.
    #[must_use]
    pub const fn new(selector: &'static str, group: RevealGroupConfig) -> Self {
        Self {
            selector,
            group,
            container: None,
        }
    }

    /// Elements trigger together when `container` arrives.
    #[must_use]
    pub const fn within(mut self, container: &'static str) -> Self {
        self.container = Some(container);
        self
    }
}

/// Per-index delay for matching elements: the n-th match waits `n * step_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaggerSpec {
    /// Selector for the staggered elements.
    pub selector: &'static str,
    /// Delay step in milliseconds.
    pub step_ms: u32,
}

/// Section indicator binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSpec {
    /// The indicator container; without it the tracker is not started.
    pub container: &'static str,
    /// Sections, in document order.
    pub sections: &'static str,
    /// Indicator dots, one per section.
    pub indicators: &'static str,
    /// Class marking the active dot.
    pub active_class: &'static str,
    /// Offset applied to section tops.
    pub correction: f64,
}

/// Navigation binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavSpec {
    /// The fixed bar.
    pub bar: &'static str,
    /// The menu toggle button.
    pub toggle: &'static str,
    /// The collapsible menu.
    pub menu: &'static str,
    /// Links that close the menu when clicked.
    pub links: &'static str,
    /// In-page anchors that scroll smoothly.
    pub anchors: &'static str,
    /// Thresholds.
    pub config: NavConfig,
}

/// A category filter binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterSpec {
    /// Category buttons.
    pub buttons: &'static str,
    /// Filtered cards.
    pub cards: &'static str,
    /// Apply the default selection at load.
    pub apply_default: bool,
}

/// A hover effect binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverSpec {
    /// Selector for the hovered elements.
    pub selector: &'static str,
    /// Which effect they get.
    pub kind: HoverKind,
}

impl HoverSpec {
    const fn new(selector: &'static str, kind: HoverKind) -> Self {
        Self { selector, kind }
    }
}

/// Video player binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoSpec {
    /// The `<video>` element.
    pub video: &'static str,
    /// Its play/pause button.
    pub button: &'static str,
    /// Its overlay.
    pub overlay: &'static str,
    /// The hover area.
    pub container: &'static str,
}

/// Equipment action buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipmentSpec {
    /// Rental request buttons.
    pub rent: &'static str,
    /// Specification request buttons.
    pub info: &'static str,
    /// The card enclosing a button.
    pub card: &'static str,
    /// The card's title element.
    pub title: &'static str,
}

/// Contact form binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormSpec {
    /// The `<form>`.
    pub form: &'static str,
    /// Its submit button.
    pub submit: &'static str,
}

/// Everything one page binds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfig {
    /// Depth-scaled layers.
    pub parallax: &'static [ParallaxSpec],
    /// Hero video drift.
    pub hero: Option<HeroSpec>,
    /// Reveal groups, in registration order (first group wins on overlap).
    pub reveals: &'static [RevealSpec],
    /// Reveal delays applied after registration.
    pub reveal_delays: &'static [StaggerSpec],
    /// `animation-delay` staggers for CSS-driven entrances.
    pub animation_delays: &'static [StaggerSpec],
    /// Children faded in one after another on load.
    pub entrance: Option<StaggerSpec>,
    /// Fade the whole body in after load.
    pub fade_in_body: bool,
    /// Section indicators.
    pub sections: Option<SectionSpec>,
    /// Navigation.
    pub nav: NavSpec,
    /// Category filters.
    pub filters: &'static [FilterSpec],
    /// Hover effects.
    pub hovers: &'static [HoverSpec],
    /// Cards that tilt toward the pointer.
    pub tilt: Option<&'static str>,
    /// Form controls with focus styling.
    pub focusable: Option<&'static str>,
    /// Video player.
    pub video: Option<VideoSpec>,
    /// Any `<video>` that gets the fallback panel on error.
    pub video_fallback: Option<&'static str>,
    /// Project play buttons opening an external video.
    pub play_links: Option<&'static str>,
    /// Equipment action buttons.
    pub equipment: Option<EquipmentSpec>,
    /// Contact form.
    pub form: Option<FormSpec>,
    /// Images whose `data-src` is swapped in on first sight.
    pub lazy_images: Option<&'static str>,
}

const REVEAL_3D: &str =
    ".animate-3d, .animate-left-3d, .animate-right-3d, .animate-scale-3d, .animate-rotate-3d";

const SERVICES_3D: &str = "#services .animate-3d, #services .animate-left-3d, \
     #services .animate-right-3d, #services .animate-scale-3d, #services .animate-rotate-3d";

const CINEMA_PARALLAX: &[ParallaxSpec] = &[
    ParallaxSpec::first(".parallax-bg", 0.1),
    ParallaxSpec::first(".parallax-mid", 0.2),
    ParallaxSpec::first(".parallax-front", 0.3),
    ParallaxSpec::first(".services", 0.15).variable("--parallax-y"),
    ParallaxSpec::first(".about", 0.2).variable("--parallax-y"),
    ParallaxSpec::first(".equipment", 0.18).variable("--parallax-y"),
    ParallaxSpec::first(".projects", 0.22).variable("--parallax-y"),
    ParallaxSpec::first(".contact", 0.16).variable("--parallax-y"),
];

const CINEMA_REVEALS: &[RevealSpec] = &[
    RevealSpec::new(
        SERVICES_3D,
        RevealGroupConfig::once("active")
            .with_trigger(0.8)
            .with_stagger(100),
    )
    .within("#services"),
    RevealSpec::new(REVEAL_3D, RevealGroupConfig::once("active")),
    RevealSpec::new(".animate", RevealGroupConfig::persistent("active")),
];

const CINEMA_HOVERS: &[HoverSpec] = &[
    HoverSpec::new(".service-card", HoverKind::ServiceCard),
    HoverSpec::new(".team-card", HoverKind::TeamCard),
    HoverSpec::new(".stat-card", HoverKind::StatCard),
    HoverSpec::new(".contact-card", HoverKind::ContactCard),
    HoverSpec::new(".equipment-card", HoverKind::EquipmentCard),
    HoverSpec::new(".project-card", HoverKind::ProjectCard),
    HoverSpec::new(".stat-item", HoverKind::StatItem),
    HoverSpec::new(".team-social a, .footer-social a", HoverKind::SocialLink),
    HoverSpec::new(".btn-primary, .btn-secondary", HoverKind::Button),
    HoverSpec::new(".service-icon", HoverKind::ServiceIcon),
];

const CINEMA_FILTERS: &[FilterSpec] = &[
    FilterSpec {
        buttons: ".equipment-categories .category-btn",
        cards: ".equipment-card",
        apply_default: false,
    },
    FilterSpec {
        buttons: ".project-categories .category-btn",
        cards: ".project-card",
        apply_default: true,
    },
];

const TEAM_PARALLAX: &[ParallaxSpec] = &[ParallaxSpec::first(".parallax-bg", 0.5).anchored_all()];

const TEAM_REVEALS: &[RevealSpec] = &[RevealSpec::new(
    ".animate-fade-up, .animate-slide-up",
    RevealGroupConfig::once("animate-in").with_trigger(0.9),
)];

const TEAM_REVEAL_DELAYS: &[StaggerSpec] = &[
    StaggerSpec {
        selector: ".team-card",
        step_ms: 200,
    },
    StaggerSpec {
        selector: ".value-item",
        step_ms: 200,
    },
];

const TEAM_ANIMATION_DELAYS: &[StaggerSpec] = &[StaggerSpec {
    selector: ".hero-stats .stat-item",
    step_ms: 200,
}];

const NAV: NavSpec = NavSpec {
    bar: "#navbar",
    toggle: "#nav-toggle",
    menu: "#nav-menu",
    links: ".nav-link",
    anchors: "a[href^=\"#\"]",
    config: NavConfig::landing(),
};

impl PageConfig {
    /// The landing page.
    #[must_use]
    pub const fn cinema() -> Self {
        Self {
            parallax: CINEMA_PARALLAX,
            hero: Some(HeroSpec {
                section: "#home",
                video: ".hero-video",
                pinned: &[".hero-content", ".hero-title"],
                speed: 0.1,
            }),
            reveals: CINEMA_REVEALS,
            reveal_delays: &[],
            animation_delays: &[],
            entrance: Some(StaggerSpec {
                selector: ".hero-content > *",
                step_ms: 200,
            }),
            fade_in_body: false,
            sections: Some(SectionSpec {
                container: "#scrollIndicator",
                sections: "section[id]",
                indicators: ".scroll-dot",
                active_class: "active",
                correction: SectionTracker::DEFAULT_CORRECTION,
            }),
            nav: NAV,
            filters: CINEMA_FILTERS,
            hovers: CINEMA_HOVERS,
            tilt: None,
            focusable: Some("input, select, textarea"),
            video: Some(VideoSpec {
                video: ".video-container-enhanced video",
                button: ".play-button",
                overlay: ".video-overlay",
                container: ".video-container-enhanced",
            }),
            video_fallback: Some("video"),
            play_links: Some(".play-btn[data-youtube]"),
            equipment: Some(EquipmentSpec {
                rent: ".equipment-card .btn-primary",
                info: ".btn-info",
                card: ".equipment-card",
                title: "h3",
            }),
            form: Some(FormSpec {
                form: "#contactForm",
                submit: "button[type=\"submit\"]",
            }),
            lazy_images: Some("img[data-src]"),
        }
    }

    /// The team page.
    #[must_use]
    pub const fn team() -> Self {
        Self {
            parallax: TEAM_PARALLAX,
            hero: None,
            reveals: TEAM_REVEALS,
            reveal_delays: TEAM_REVEAL_DELAYS,
            animation_delays: TEAM_ANIMATION_DELAYS,
            entrance: None,
            fade_in_body: true,
            sections: None,
            nav: NavSpec {
                config: NavConfig::team(),
                ..NAV
            },
            filters: &[],
            hovers: &[],
            tilt: Some(".team-card"),
            focusable: None,
            video: None,
            video_fallback: None,
            play_links: None,
            equipment: None,
            form: None,
            lazy_images: None,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::cinema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealMode;

    #[test]
    fn cinema_layers_match_markup_contract() {
        let cfg = PageConfig::cinema();
        assert_eq!(cfg.parallax.len(), 8);
        let variables = cfg
            .parallax
            .iter()
            .filter(|p| p.target == StyleTarget::Variable("--parallax-y"))
            .count();
        assert_eq!(variables, 5);
        assert!(cfg.parallax.iter().all(|p| p.speed > 0.0 && p.speed <= 1.0));
    }

    #[test]
    fn container_group_registers_before_general_group() {
        let cfg = PageConfig::cinema();
        assert_eq!(cfg.reveals[0].container, Some("#services"));
        assert_eq!(cfg.reveals[0].group.stagger_ms, 100);
        assert_eq!(cfg.reveals[2].group.mode, RevealMode::Persistent);
        assert_eq!(
            cfg.reveals[2].group.trigger_fraction,
            RevealGroupConfig::DEFAULT_TRIGGER
        );
    }

    #[test]
    fn team_page_hides_navbar_and_tilts_cards() {
        let cfg = PageConfig::team();
        assert_eq!(cfg.nav.config.hide_after, Some(200.0));
        assert_eq!(cfg.nav.toggle, "#nav-toggle");
        assert_eq!(cfg.tilt, Some(".team-card"));
        assert_eq!(cfg.parallax[0].anchor, ParallaxAnchor::Element);
        assert_eq!(cfg.parallax[0].matches, Match::All);
    }
}
