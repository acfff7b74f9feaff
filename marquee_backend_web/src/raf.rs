// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-coalesced scroll dispatch.
//!
//! [`ScrollDispatcher`] listens for `scroll` (passive) and `resize` on the
//! window. Scroll events go through a [`FrameCoalescer`]: the first event of
//! a burst registers one `requestAnimationFrame` callback, later events are
//! absorbed, and the callback clears the flag after running the user
//! callback. `resize` bypasses coalescing and runs the callback immediately.
//!
//! [`FrameCoalescer`]: marquee_core::coalesce::FrameCoalescer

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use marquee_core::coalesce::{FrameCoalescer, FrameReport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::AddEventListenerOptions;

// Global bindings; the frame path never fetches the Window object.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// Why the dispatcher callback is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// A coalesced animation frame after one or more scroll events.
    Frame(FrameReport),
    /// A `resize` event (not coalesced).
    Resize,
    /// An explicit [`ScrollDispatcher::run_now`] call, e.g. at load.
    Immediate,
}

type FrameClosure = Closure<dyn FnMut(f64)>;
type EventClosure = Closure<dyn FnMut()>;

/// Coalesces scroll events into at most one callback per rendered frame.
///
/// Create with [`ScrollDispatcher::new`], then call [`attach`](Self::attach)
/// to register the window listeners. Listeners are removed and any pending
/// frame is cancelled by [`detach`](Self::detach) or on drop.
pub struct ScrollDispatcher {
    inner: Rc<DispatchInner>,
}

struct DispatchInner {
    /// Pending-frame flag and event counters.
    coalescer: Cell<FrameCoalescer>,

    /// The user-supplied callback.
    callback: RefCell<Box<dyn FnMut(Dispatch)>>,

    /// The JS closure handed to `requestAnimationFrame`.
    frame: RefCell<Option<FrameClosure>>,

    /// The `scroll` listener.
    scroll: RefCell<Option<EventClosure>>,

    /// The `resize` listener.
    resize: RefCell<Option<EventClosure>>,

    /// ID of the in-flight animation frame, if any.
    raf_id: Cell<Option<i32>>,
}

impl DispatchInner {
    fn on_scroll(&self) {
        let mut c = self.coalescer.get();
        let schedule = c.request();
        self.coalescer.set(c);
        if schedule && let Some(ref frame) = *self.frame.borrow() {
            let id = request_animation_frame(frame.as_ref().unchecked_ref());
            self.raf_id.set(Some(id));
        }
    }

    fn on_frame(&self) {
        self.raf_id.set(None);
        // The callback samples scroll state itself; the flag clears after it.
        let report = self.coalescer.get().peek();
        self.callback.borrow_mut()(Dispatch::Frame(report));
        let mut c = self.coalescer.get();
        _ = c.complete();
        self.coalescer.set(c);
    }
}

impl ScrollDispatcher {
    /// Creates a dispatcher that is **not yet attached**.
    pub fn new(callback: impl FnMut(Dispatch) + 'static) -> Self {
        Self {
            inner: Rc::new(DispatchInner {
                coalescer: Cell::new(FrameCoalescer::new()),
                callback: RefCell::new(Box::new(callback)),
                frame: RefCell::new(None),
                scroll: RefCell::new(None),
                resize: RefCell::new(None),
                raf_id: Cell::new(None),
            }),
        }
    }

    /// Registers the window listeners. If already attached, this is a no-op.
    pub fn attach(&self) -> Result<(), JsValue> {
        if self.is_attached() {
            return Ok(());
        }
        let window = crate::window()?;

        let inner = Rc::clone(&self.inner);
        let frame = Closure::wrap(Box::new(move |_timestamp_ms: f64| {
            inner.on_frame();
        }) as Box<dyn FnMut(f64)>);
        *self.inner.frame.borrow_mut() = Some(frame);

        let inner = Rc::clone(&self.inner);
        let scroll = Closure::wrap(Box::new(move || inner.on_scroll()) as Box<dyn FnMut()>);
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            scroll.as_ref().unchecked_ref(),
            &opts,
        )?;
        *self.inner.scroll.borrow_mut() = Some(scroll);

        let inner = Rc::clone(&self.inner);
        let resize = Closure::wrap(Box::new(move || {
            inner.callback.borrow_mut()(Dispatch::Resize);
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        *self.inner.resize.borrow_mut() = Some(resize);

        Ok(())
    }

    /// Runs the callback immediately, outside the coalescing path.
    ///
    /// Does not touch the pending flag, so a frame already scheduled still
    /// runs.
    pub fn run_now(&self) {
        self.inner.callback.borrow_mut()(Dispatch::Immediate);
    }

    /// Removes the listeners and cancels a pending frame.
    pub fn detach(&self) {
        if let Some(id) = self.inner.raf_id.take() {
            cancel_animation_frame(id);
        }
        let mut c = self.inner.coalescer.get();
        if c.is_pending() {
            _ = c.complete();
            self.inner.coalescer.set(c);
        }
        if let Ok(window) = crate::window() {
            if let Some(scroll) = self.inner.scroll.borrow_mut().take() {
                _ = window
                    .remove_event_listener_with_callback("scroll", scroll.as_ref().unchecked_ref());
            }
            if let Some(resize) = self.inner.resize.borrow_mut().take() {
                _ = window
                    .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
            }
        }
        self.inner.frame.borrow_mut().take();
    }

    /// Returns `true` while the listeners are registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.scroll.borrow().is_some()
    }

    /// Returns `true` while a frame is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.coalescer.get().is_pending()
    }

    /// Returns the number of frames run so far.
    #[must_use]
    pub fn frames_completed(&self) -> u64 {
        self.inner.coalescer.get().frames_completed()
    }
}

impl Drop for ScrollDispatcher {
    fn drop(&mut self) {
        self.detach();
    }
}

impl core::fmt::Debug for ScrollDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollDispatcher")
            .field("attached", &self.is_attached())
            .field("pending", &self.is_pending())
            .field("frames_completed", &self.frames_completed())
            .finish_non_exhaustive()
    }
}
