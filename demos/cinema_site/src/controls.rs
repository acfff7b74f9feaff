// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer, keyboard and form listeners.

use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Point;
use marquee_backend_web::{Presenter as _, set_timeout, smooth_scroll_to};
use marquee_core::backend::DomChanges;
use marquee_core::config::{EquipmentSpec, FilterSpec, FormSpec, PageConfig, VideoSpec};
use marquee_core::element::ElementId;
use marquee_core::filter::{CategoryFilter, Tagged, default_button};
use marquee_core::form::{
    ContactFields, Field, SENDING_LABEL, SubmitError, info_message, rental_message,
};
use marquee_core::geometry::Geometry as _;
use marquee_core::hover::{HoverKind, TILT_RESET, Tilt, focus, hover};
use marquee_core::nav::{Key, NavConfig, NavElements, NavState};
use marquee_core::trace::{FormEvent, FormOutcome, Tracer};
use marquee_core::video::{
    FALLBACK_HTML, OpenTarget, PlaybackRequest, VideoElements, VideoPlayer, open_target,
};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlVideoElement, KeyboardEvent, MouseEvent, Node,
};

use crate::{Shared, listen};

/// Resolves the navigation elements. The menu is inert without both the
/// toggle and the menu.
pub(crate) fn bind_nav(
    config: &PageConfig,
    document: &Document,
    presenter: &mut marquee_backend_web::DomPresenter,
    body: ElementId,
) -> Result<Option<(NavState, NavElements)>, JsValue> {
    let spec = &config.nav;
    let bar = presenter.bind_first(document, spec.bar)?;
    let toggle = presenter.bind_first(document, spec.toggle)?;
    let menu = presenter.bind_first(document, spec.menu)?;
    Ok(toggle.zip(menu).map(|(toggle, menu)| {
        (
            NavState::new(spec.config),
            NavElements {
                bar,
                toggle,
                menu,
                body,
            },
        )
    }))
}

/// Registers every listener the page needs.
pub(crate) fn bind_all(site: &Shared, config: &PageConfig) -> Result<(), JsValue> {
    bind_nav_listeners(site, config)?;
    bind_anchors(site, config)?;
    bind_section_dots(site, config)?;
    for spec in config.filters {
        bind_filter(site, spec)?;
    }
    bind_hovers(site, config)?;
    if let Some(video) = config.video {
        bind_video(site, &video)?;
    }
    if let Some(sel) = config.video_fallback {
        bind_video_fallback(site, sel)?;
    }
    if let Some(sel) = config.play_links {
        bind_play_links(site, sel)?;
    }
    if let Some(equipment) = config.equipment {
        bind_equipment(site, &equipment)?;
    }
    if let Some(form) = config.form {
        bind_form(site, &form)?;
    }
    Ok(())
}

fn document(site: &Shared) -> Document {
    site.borrow().document.clone()
}

fn element(site: &Shared, id: ElementId) -> Option<HtmlElement> {
    site.borrow().presenter.get(id).cloned()
}

fn bind_ids(site: &Shared, selector: &str) -> Result<Vec<ElementId>, JsValue> {
    let doc = document(site);
    site.borrow_mut().presenter.bind_all(&doc, selector)
}

/// Every element matching `selector`, without binding a slot.
fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect())
}

fn apply(site: &Shared, changes: &DomChanges) {
    if let Ok(mut s) = site.try_borrow_mut() {
        s.apply(changes);
    }
}

fn with_nav(site: &Shared, f: impl FnOnce(&mut NavState, &NavElements) -> Option<DomChanges>) {
    let Ok(mut guard) = site.try_borrow_mut() else {
        return;
    };
    let s = &mut *guard;
    if let Some((nav, el)) = &mut s.nav
        && let Some(changes) = f(nav, el)
    {
        s.presenter.apply(&changes);
    }
}

fn with_player(site: &Shared, f: impl FnOnce(&mut VideoPlayer) -> DomChanges) {
    let Ok(mut guard) = site.try_borrow_mut() else {
        return;
    };
    let s = &mut *guard;
    if let Some(player) = &mut s.player {
        let changes = f(player);
        s.presenter.apply(&changes);
    }
}

fn alert(site: &Shared, message: &str) {
    let window = site.borrow().window.clone();
    let _ = window.alert_with_message(message);
}

fn header_height(site: &Shared) -> f64 {
    site.borrow()
        .nav
        .as_ref()
        .map_or(NavConfig::default().header_height, |(nav, _)| {
            nav.config().header_height
        })
}

fn bind_nav_listeners(site: &Shared, config: &PageConfig) -> Result<(), JsValue> {
    let Some(el) = site.borrow().nav.as_ref().map(|(_, el)| *el) else {
        return Ok(());
    };
    let (Some(toggle), Some(menu)) = (element(site, el.toggle), element(site, el.menu)) else {
        return Ok(());
    };

    let s = Rc::clone(site);
    listen(&toggle, "click", move |_event: Event| {
        with_nav(&s, |nav, el| Some(nav.toggle(el)));
    })?;

    let s = Rc::clone(site);
    listen(&toggle, "keydown", move |event: Event| {
        let Some(k) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::from_key_value(&k.key());
        let mut handled = false;
        with_nav(&s, |nav, el| {
            let changes = nav.toggle_key(key, el);
            handled = changes.is_some();
            changes
        });
        if handled {
            event.prevent_default();
        }
    })?;

    let doc = document(site);
    for link in query_all(&doc, config.nav.links)? {
        let s = Rc::clone(site);
        listen(&link, "click", move |_event: Event| {
            with_nav(&s, |nav, el| Some(nav.close(el)));
        })?;
    }

    let s = Rc::clone(site);
    listen(&doc, "click", move |event: Event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let inside = target
            .as_ref()
            .is_some_and(|n| menu.contains(Some(n)) || toggle.contains(Some(n)));
        with_nav(&s, |nav, el| nav.document_click(inside, el));
    })?;

    let s = Rc::clone(site);
    listen(&doc, "keydown", move |event: Event| {
        if let Some(k) = event.dyn_ref::<KeyboardEvent>() {
            let key = Key::from_key_value(&k.key());
            with_nav(&s, |nav, el| nav.document_key(key, el));
        }
    })?;
    Ok(())
}

fn bind_anchors(site: &Shared, config: &PageConfig) -> Result<(), JsValue> {
    let doc = document(site);
    for anchor in query_all(&doc, config.nav.anchors)? {
        let s = Rc::clone(site);
        let doc = doc.clone();
        let link = anchor.clone();
        listen(&anchor, "click", move |event: Event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            if href.len() < 2 {
                return;
            }
            let Some(target) = doc
                .query_selector(&href)
                .ok()
                .flatten()
                .and_then(|t| t.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            event.prevent_default();
            let top = f64::from(target.offset_top()) - header_height(&s);
            let window = s.borrow().window.clone();
            smooth_scroll_to(&window, top);
        })?;
    }
    Ok(())
}

fn bind_section_dots(site: &Shared, config: &PageConfig) -> Result<(), JsValue> {
    if config.sections.is_none() {
        return Ok(());
    }
    let dots = site
        .borrow()
        .effects
        .sections()
        .map(|s| s.indicators.clone())
        .unwrap_or_default();
    for (index, id) in dots.into_iter().enumerate() {
        let Some(dot) = element(site, id) else {
            continue;
        };
        let s = Rc::clone(site);
        listen(&dot, "click", move |_event: Event| {
            let header = header_height(&s);
            let (window, target) = {
                let site = s.borrow();
                let Ok(sample) = marquee_backend_web::sample(&site.window) else {
                    return;
                };
                let target = site
                    .effects
                    .section_target(index, header, &sample, &site.presenter);
                (site.window.clone(), target)
            };
            if let Some(top) = target {
                smooth_scroll_to(&window, top);
            }
        })?;
    }
    Ok(())
}

fn bind_filter(site: &Shared, spec: &FilterSpec) -> Result<(), JsValue> {
    let buttons = bind_ids(site, spec.buttons)?;
    let cards = bind_ids(site, spec.cards)?;
    if buttons.is_empty() {
        return Ok(());
    }
    let (tagged_buttons, tagged_cards, active) = {
        let s = site.borrow();
        let tag = |id: ElementId| Tagged::new(id, s.presenter.data(id, "category").as_deref());
        let active: Vec<bool> = buttons
            .iter()
            .map(|&id| {
                s.presenter
                    .get(id)
                    .is_some_and(|e| e.class_list().contains("active"))
            })
            .collect();
        (
            buttons.iter().copied().map(tag).collect(),
            cards.iter().copied().map(tag).collect(),
            active,
        )
    };
    let filter = Rc::new(RefCell::new(CategoryFilter::new(tagged_buttons, tagged_cards)));

    for (index, id) in buttons.iter().copied().enumerate() {
        let Some(button) = element(site, id) else {
            continue;
        };
        let s = Rc::clone(site);
        let filter = Rc::clone(&filter);
        listen(&button, "click", move |_event: Event| {
            let changes = filter.borrow_mut().select(index);
            apply(&s, &changes);
        })?;
    }

    if spec.apply_default
        && let Some(index) = default_button(&active)
    {
        let changes = filter.borrow_mut().select(index);
        apply(site, &changes);
    }
    Ok(())
}

fn bind_hover(site: &Shared, id: ElementId, kind: HoverKind) -> Result<(), JsValue> {
    let Some(el) = element(site, id) else {
        return Ok(());
    };
    for (event, entered) in [("mouseenter", true), ("mouseleave", false)] {
        let s = Rc::clone(site);
        listen(&el, event, move |_event: Event| {
            let reduced = s.borrow().reduced_motion;
            apply(&s, &hover(kind, id, entered, reduced));
        })?;
    }
    Ok(())
}

fn bind_hovers(site: &Shared, config: &PageConfig) -> Result<(), JsValue> {
    for spec in config.hovers {
        for id in bind_ids(site, spec.selector)? {
            bind_hover(site, id, spec.kind)?;
        }
    }

    if let Some(sel) = config.tilt {
        for id in bind_ids(site, sel)? {
            let Some(card) = element(site, id) else {
                continue;
            };
            let s = Rc::clone(site);
            listen(&card, "mousemove", move |event: Event| {
                let Some(m) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let pointer = Point::new(f64::from(m.client_x()), f64::from(m.client_y()));
                let Some(rect) = s.borrow().presenter.bounding_rect(id) else {
                    return;
                };
                let mut changes = DomChanges::new();
                Tilt::new(rect, pointer).write_to(id, &mut changes);
                apply(&s, &changes);
            })?;
            let s = Rc::clone(site);
            listen(&card, "mouseleave", move |_event: Event| {
                let mut changes = DomChanges::new();
                changes.set_style(id, "transform", TILT_RESET.to_string());
                apply(&s, &changes);
            })?;
        }
    }

    if let Some(sel) = config.focusable {
        for id in bind_ids(site, sel)? {
            let Some(input) = element(site, id) else {
                continue;
            };
            for (event, focused) in [("focus", true), ("blur", false)] {
                let s = Rc::clone(site);
                listen(&input, event, move |_event: Event| {
                    apply(&s, &focus(id, focused));
                })?;
            }
        }
    }
    Ok(())
}

fn bind_video(site: &Shared, spec: &VideoSpec) -> Result<(), JsValue> {
    let doc = document(site);
    let Some(video) = doc
        .query_selector(spec.video)?
        .and_then(|v| v.dyn_into::<HtmlVideoElement>().ok())
    else {
        return Ok(());
    };
    let (button, overlay, container) = {
        let mut s = site.borrow_mut();
        (
            s.presenter.bind_first(&doc, spec.button)?,
            s.presenter.bind_first(&doc, spec.overlay)?,
            s.presenter.bind_first(&doc, spec.container)?,
        )
    };
    let (Some(button), Some(overlay)) = (button, overlay) else {
        return Ok(());
    };
    {
        let mut s = site.borrow_mut();
        let player = VideoPlayer::new(VideoElements { button, overlay });
        let init = player.init_ops();
        s.apply(&init);
        s.player = Some(player);
    }

    if let Some(button_el) = element(site, button) {
        let s = Rc::clone(site);
        let media = video.clone();
        listen(&button_el, "click", move |_event: Event| {
            let request = s
                .borrow()
                .player
                .as_ref()
                .map_or(PlaybackRequest::None, VideoPlayer::click);
            match request {
                PlaybackRequest::Play => match media.play() {
                    Ok(promise) => {
                        let s = Rc::clone(&s);
                        let rejected = Closure::once(move |_err: JsValue| {
                            with_player(&s, |p| p.on_play_result(false));
                        });
                        let _ = promise.catch(&rejected);
                        rejected.forget();
                    }
                    Err(_) => with_player(&s, |p| p.on_play_result(false)),
                },
                PlaybackRequest::Pause => {
                    let _ = media.pause();
                }
                PlaybackRequest::None => {}
            }
        })?;
    }

    let s = Rc::clone(site);
    listen(&video, "play", move |_event: Event| with_player(&s, VideoPlayer::on_play))?;
    let s = Rc::clone(site);
    listen(&video, "pause", move |_event: Event| with_player(&s, VideoPlayer::on_pause))?;
    let s = Rc::clone(site);
    listen(&video, "ended", move |_event: Event| with_player(&s, VideoPlayer::on_ended))?;
    let s = Rc::clone(site);
    listen(&video, "error", move |_event: Event| with_player(&s, VideoPlayer::on_error))?;

    if let Some(container) = container.and_then(|id| element(site, id)) {
        for (event, entered) in [("mouseenter", true), ("mouseleave", false)] {
            let s = Rc::clone(site);
            listen(&container, event, move |_event: Event| {
                with_player(&s, |p| p.on_hover(entered));
            })?;
        }
    }
    Ok(())
}

fn bind_video_fallback(site: &Shared, selector: &str) -> Result<(), JsValue> {
    for video in query_all(&document(site), selector)? {
        let media = video.clone();
        listen(&video, "error", move |_event: Event| {
            if let Some(parent) = media.parent_element() {
                let _ = parent.insert_adjacent_html("beforeend", FALLBACK_HTML);
            }
        })?;
    }
    Ok(())
}

fn bind_play_links(site: &Shared, selector: &str) -> Result<(), JsValue> {
    let window = site.borrow().window.clone();
    let touch = marquee_backend_web::is_touch(&window);
    for id in bind_ids(site, selector)? {
        let Some(link) = element(site, id) else {
            continue;
        };
        let el = link.clone();
        let window = window.clone();
        listen(&link, "click", move |event: Event| {
            let Some(url) = el.dataset().get("youtube") else {
                return;
            };
            event.prevent_default();
            let width = window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0);
            match open_target(width, touch) {
                OpenTarget::SameTab => {
                    let _ = window.location().set_href(&url);
                }
                OpenTarget::NewTab => {
                    let _ = window.open_with_url_and_target_and_features(
                        &url,
                        "_blank",
                        "noopener,noreferrer",
                    );
                }
            }
        })?;
        if !touch {
            bind_hover(site, id, HoverKind::PlayButton)?;
        }
    }
    Ok(())
}

/// Title of the card enclosing `button`, or an empty string.
fn equipment_name(button: &Element, spec: &EquipmentSpec) -> String {
    button
        .closest(spec.card)
        .ok()
        .flatten()
        .and_then(|card| card.query_selector(spec.title).ok().flatten())
        .and_then(|title| title.text_content())
        .unwrap_or_default()
}

fn bind_equipment(site: &Shared, spec: &EquipmentSpec) -> Result<(), JsValue> {
    let doc = document(site);
    let buttons = [
        (spec.rent, rental_message as fn(&str) -> String),
        (spec.info, info_message),
    ];
    for (selector, message) in buttons {
        for button in query_all(&doc, selector)? {
            let s = Rc::clone(site);
            let el = button.clone();
            let spec = *spec;
            listen(&button, "click", move |_event: Event| {
                alert(&s, &message(&equipment_name(&el, &spec)));
            })?;
        }
    }
    Ok(())
}

fn bind_form(site: &Shared, spec: &FormSpec) -> Result<(), JsValue> {
    let Some(form) = document(site)
        .query_selector(spec.form)?
        .and_then(|f| f.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };
    let submit = form
        .query_selector(spec.submit)?
        .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());

    let s = Rc::clone(site);
    let el = form.clone();
    listen(&form, "submit", move |event: Event| {
        event.prevent_default();
        let Ok(data) = FormData::new_with_form(&el) else {
            return;
        };
        let values: Vec<String> = Field::REQUIRED
            .iter()
            .map(|f| data.get(f.name()).as_string().unwrap_or_default())
            .collect();
        let fields = ContactFields {
            first_name: &values[0],
            last_name: &values[1],
            email: &values[2],
            message: &values[3],
        };

        let result = {
            let Ok(mut guard) = s.try_borrow_mut() else {
                return;
            };
            let site = &mut *guard;
            let result = site.form.submit(&fields);
            let outcome = match &result {
                Ok(_) => Some(FormOutcome::Sending),
                Err(SubmitError::Invalid(err)) => Some(FormOutcome::Rejected(*err)),
                Err(SubmitError::InFlight) => None,
            };
            if let Some(outcome) = outcome {
                Tracer::new(&mut site.sink).form(&FormEvent { outcome });
            }
            result
        };

        let pending = match result {
            Ok(pending) => pending,
            Err(SubmitError::Invalid(err)) => {
                alert(&s, &err.to_string());
                return;
            }
            Err(SubmitError::InFlight) => return,
        };

        let label = submit.as_ref().map(|b| b.inner_html());
        if let Some(button) = &submit {
            button.set_text_content(Some(SENDING_LABEL));
            button.set_disabled(true);
        }

        let restore = {
            let button = submit.clone();
            move || {
                if let Some(button) = &button {
                    if let Some(label) = &label {
                        button.set_inner_html(label);
                    }
                    button.set_disabled(false);
                }
            }
        };

        let shared = Rc::clone(&s);
        let form = el.clone();
        let done = restore.clone();
        let armed = set_timeout(pending.delay_ms, move || {
            let message = {
                let Ok(mut guard) = shared.try_borrow_mut() else {
                    return;
                };
                let site = &mut *guard;
                let message = site.form.complete();
                if message.is_some() {
                    Tracer::new(&mut site.sink).form(&FormEvent {
                        outcome: FormOutcome::Sent,
                    });
                }
                message
            };
            if let Some(message) = message {
                alert(&shared, message);
            }
            form.reset();
            done();
        });
        if armed.is_err() {
            marquee_backend_web::log_error("failed to arm the contact form timer");
            if let Ok(mut guard) = s.try_borrow_mut() {
                guard.form.abort();
            }
            restore();
        }
    })?;
    Ok(())
}
