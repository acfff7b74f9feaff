// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cinema Studios site script.
//!
//! Binds every controller in [`marquee_core`] to the page's markup and
//! drives them from one coalesced scroll dispatcher. The landing page uses
//! [`PageConfig::cinema`]; a `<body data-page="team">` selects
//! [`PageConfig::team`].
//!
//! Build with: `wasm-pack build --target web demos/cinema_site`
//! Then include the generated module from the site's HTML.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

mod controls;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use marquee_backend_web::{
    ConsoleSink, Dispatch, DomPresenter, Presenter as _, ScrollDispatcher, set_timeout,
};
use marquee_core::backend::DomChanges;
use marquee_core::coalesce::FrameReport;
use marquee_core::config::{Match, PageConfig};
use marquee_core::effects::{
    BODY_FADE_DELAY_MS, LazyImages, ScrollEffects, SectionIndicators, animation_delays,
    body_hidden, body_shown, entrance, stagger,
};
use marquee_core::form::SubmitFlow;
use marquee_core::nav::{NavElements, NavState};
use marquee_core::parallax::{HeroDrift, ParallaxAnchor, ParallaxEngine, ParallaxLayer};
use marquee_core::reveal::RevealScheduler;
use marquee_core::section::SectionTracker;
use marquee_core::trace::Tracer;
use marquee_core::video::VideoPlayer;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlImageElement, Window};

/// Everything the page's listeners share.
struct Site {
    window: Window,
    document: Document,
    presenter: DomPresenter,
    effects: ScrollEffects,
    nav: Option<(NavState, NavElements)>,
    lazy: LazyImages,
    player: Option<VideoPlayer>,
    form: SubmitFlow,
    sink: ConsoleSink,
    reduced_motion: bool,
    last_frame: u64,
}

type Shared = Rc<RefCell<Site>>;

impl Site {
    fn apply(&mut self, changes: &DomChanges) {
        if !changes.is_empty() {
            self.presenter.apply(changes);
        }
    }
}

/// Entry point for the site script.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let window = marquee_backend_web::window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let config = match body.dataset().get("page").as_deref() {
        Some("team") => PageConfig::team(),
        _ => PageConfig::cinema(),
    };

    let mut presenter = DomPresenter::new();
    let body_id = presenter.bind(body);

    let effects = build_effects(&config, &document, &mut presenter)?;
    let nav = controls::bind_nav(&config, &document, &mut presenter, body_id)?;
    let lazy = match config.lazy_images {
        Some(sel) => LazyImages::new(presenter.bind_all(&document, sel)?),
        None => LazyImages::default(),
    };

    let mut init = effects.init_ops();
    for spec in config.animation_delays {
        let ids = presenter.bind_all(&document, spec.selector)?;
        init.append(&mut animation_delays(&ids, spec.step_ms));
    }
    if config.fade_in_body {
        init.append(&mut body_hidden(body_id));
    }
    presenter.apply(&init);

    let reduced_motion = marquee_backend_web::prefers_reduced_motion(&window);
    let site = Rc::new(RefCell::new(Site {
        window,
        document,
        presenter,
        effects,
        nav,
        lazy,
        player: None,
        form: SubmitFlow::new(),
        sink: ConsoleSink::new(),
        reduced_motion,
        last_frame: 0,
    }));

    controls::bind_all(&site, &config)?;

    if let Some(spec) = config.entrance {
        let ids = {
            let mut s = site.borrow_mut();
            let doc = s.document.clone();
            s.presenter.bind_all(&doc, spec.selector)?
        };
        for (el, delay) in ids.iter().copied().zip(stagger(ids.len(), spec.step_ms)) {
            let site = Rc::clone(&site);
            set_timeout(delay, move || {
                if let Ok(mut s) = site.try_borrow_mut() {
                    s.apply(&entrance(el));
                }
            })?;
        }
    }
    if config.fade_in_body {
        let site = Rc::clone(&site);
        set_timeout(BODY_FADE_DELAY_MS, move || {
            if let Ok(mut s) = site.try_borrow_mut() {
                s.apply(&body_shown(body_id));
            }
        })?;
    }

    let site_cb = Rc::clone(&site);
    let dispatcher = ScrollDispatcher::new(move |dispatch| on_dispatch(&site_cb, dispatch));
    dispatcher.attach()?;
    dispatcher.run_now();
    // The page never unloads the script.
    core::mem::forget(dispatcher);

    Ok(())
}

/// Resolves the markup contract into the scroll-driven controllers.
fn build_effects(
    config: &PageConfig,
    document: &Document,
    presenter: &mut DomPresenter,
) -> Result<ScrollEffects, JsValue> {
    let mut layers = Vec::new();
    for spec in config.parallax {
        let found = match spec.matches {
            Match::First => alloc::vec![presenter.bind_first(document, spec.selector)?],
            Match::All => presenter
                .bind_all(document, spec.selector)?
                .into_iter()
                .map(Some)
                .collect(),
        };
        for element in found {
            let layer = ParallaxLayer::new(element, spec.speed).with_target(spec.target);
            layers.push(match spec.anchor {
                ParallaxAnchor::Element => layer.anchored(),
                ParallaxAnchor::Document => layer,
            });
        }
    }

    let hero = match config.hero {
        Some(spec) => {
            let mut pinned = Vec::new();
            for sel in spec.pinned {
                pinned.extend(presenter.bind_first(document, sel)?);
            }
            HeroDrift::new(
                presenter.bind_first(document, spec.section)?,
                presenter.bind_first(document, spec.video)?,
                pinned,
                spec.speed,
            )
        }
        None => None,
    };

    let mut reveal = RevealScheduler::new();
    for spec in config.reveals {
        let elements = presenter.bind_all(document, spec.selector)?;
        let trigger = match spec.container {
            Some(sel) => presenter.bind_first(document, sel)?,
            None => None,
        };
        match trigger {
            Some(trigger) => reveal.add_group_triggered_by(spec.group, trigger, &elements),
            None => reveal.add_group(spec.group, &elements),
        };
    }
    for spec in config.reveal_delays {
        let elements = presenter.bind_all(document, spec.selector)?;
        for (el, delay) in elements.iter().copied().zip(stagger(elements.len(), spec.step_ms)) {
            reveal.set_delay(el, delay);
        }
    }

    let sections = match config.sections {
        Some(spec) if presenter.bind_first(document, spec.container)?.is_some() => {
            Some(SectionIndicators {
                tracker: SectionTracker::new(
                    presenter.bind_all(document, spec.sections)?,
                    spec.correction,
                ),
                indicators: presenter.bind_all(document, spec.indicators)?,
                class: spec.active_class,
            })
        }
        _ => None,
    };

    Ok(ScrollEffects::new(ParallaxEngine::new(layers), reveal)
        .with_hero(hero)
        .with_sections(sections))
}

fn on_dispatch(site: &Shared, dispatch: Dispatch) {
    let Ok(mut guard) = site.try_borrow_mut() else {
        return;
    };
    let s = &mut *guard;
    let Ok(sample) = marquee_backend_web::sample(&s.window) else {
        return;
    };
    let mut tracer = Tracer::new(&mut s.sink);

    let report = match dispatch {
        Dispatch::Frame(report) => {
            s.last_frame = report.frame_index;
            report
        }
        Dispatch::Resize => {
            let changes = s
                .effects
                .resize(s.last_frame, &sample, &s.presenter, &mut tracer);
            s.presenter.apply(&changes);
            return;
        }
        Dispatch::Immediate => FrameReport {
            frame_index: s.last_frame,
            events: 0,
        },
    };

    let out = s.effects.frame(report, &sample, &s.presenter, &mut tracer);
    let mut changes = out.changes;

    if let Some((nav, el)) = &mut s.nav {
        changes.append(&mut nav.on_scroll(sample.scroll_y, el));
    }

    let (loaded, mut lazy_ops) = s.lazy.check(&sample, &s.presenter);
    changes.append(&mut lazy_ops);
    for img in loaded {
        if let Some(src) = s.presenter.data(img, "src")
            && let Some(el) = s.presenter.get(img).and_then(|e| e.dyn_ref::<HtmlImageElement>())
        {
            el.set_src(&src);
        }
    }

    s.presenter.apply(&changes);

    for delayed in out.delayed {
        let site = Rc::clone(site);
        let armed = set_timeout(delayed.delay_ms, move || {
            let Ok(mut guard) = site.try_borrow_mut() else {
                return;
            };
            let s = &mut *guard;
            let mut tracer = Tracer::new(&mut s.sink);
            let changes = s.effects.fire(delayed.element, &mut tracer);
            s.presenter.apply(&changes);
        });
        if armed.is_err() {
            marquee_backend_web::log_error("failed to arm a delayed reveal");
        }
    }
}

/// Registers `f` for `event` on `target` for the lifetime of the page.
fn listen(
    target: &EventTarget,
    event: &str,
    f: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}
