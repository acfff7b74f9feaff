// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The studio video player and project play buttons.

use alloc::string::ToString as _;

use crate::backend::DomChanges;
use crate::element::ElementId;

/// Markup for the play button's icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayIcon {
    /// Shown while paused.
    Play,
    /// Shown while playing.
    Pause,
    /// Shown after a playback or load error.
    Error,
}

impl PlayIcon {
    /// Icon markup.
    #[must_use]
    pub const fn html(self) -> &'static str {
        match self {
            Self::Play => r#"<i class="fas fa-play"></i>"#,
            Self::Pause => r#"<i class="fas fa-pause"></i>"#,
            Self::Error => r#"<i class="fas fa-exclamation-triangle"></i>"#,
        }
    }
}

/// Panel appended next to any `<video>` that fails to load.
pub const FALLBACK_HTML: &str = concat!(
    r#"<div style="width: 100%; height: 100%; background: linear-gradient(135deg, #0a0a0a 0%, #1a1a1a 100%); "#,
    r#"display: flex; align-items: center; justify-content: center; color: #d4af37; font-size: 1.2rem;">"#,
    r#"<div style="text-align: center;">"#,
    r#"<i class="fas fa-video" style="font-size: 3rem; margin-bottom: 1rem;"></i>"#,
    r#"<p>Video unavailable</p>"#,
    r#"</div></div>"#,
);

/// What the caller should do with the media element after a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackRequest {
    /// Call `play()`; report the outcome with
    /// [`VideoPlayer::on_play_result`].
    Play,
    /// Call `pause()`.
    Pause,
    /// The player is in its error state; do nothing.
    None,
}

/// Elements the player writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoElements {
    /// The play/pause button.
    pub button: ElementId,
    /// The overlay dimmed while playing.
    pub overlay: ElementId,
}

/// Play/pause state for one video with an overlay button.
#[derive(Clone, Debug)]
pub struct VideoPlayer {
    el: VideoElements,
    playing: bool,
    failed: bool,
}

impl VideoPlayer {
    /// Creates a paused player.
    #[must_use]
    pub fn new(el: VideoElements) -> Self {
        Self {
            el,
            playing: false,
            failed: false,
        }
    }

    /// Returns `true` while playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Returns `true` after an error.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Initial writes: button clickable, overlay visible.
    #[must_use]
    pub fn init_ops(&self) -> DomChanges {
        let mut out = DomChanges::new();
        out.set_style(self.el.button, "pointer-events", "auto".to_string());
        out.set_style(self.el.overlay, "opacity", "1".to_string());
        out
    }

    /// Handles a click on the button.
    #[must_use]
    pub fn click(&self) -> PlaybackRequest {
        match (self.failed, self.playing) {
            (true, _) => PlaybackRequest::None,
            (false, true) => PlaybackRequest::Pause,
            (false, false) => PlaybackRequest::Play,
        }
    }

    /// Resolves the promise returned by `play()`.
    pub fn on_play_result(&mut self, ok: bool) -> DomChanges {
        if ok {
            self.on_play()
        } else {
            self.on_error()
        }
    }

    /// Media `play` event.
    pub fn on_play(&mut self) -> DomChanges {
        self.playing = true;
        let mut out = DomChanges::new();
        out.set_html(self.el.button, PlayIcon::Pause.html());
        out.set_style(self.el.overlay, "opacity", "0".to_string());
        out
    }

    /// Media `pause` event.
    pub fn on_pause(&mut self) -> DomChanges {
        self.playing = false;
        let mut out = DomChanges::new();
        out.set_html(self.el.button, PlayIcon::Play.html());
        out
    }

    /// Media `ended` event.
    pub fn on_ended(&mut self) -> DomChanges {
        let mut out = self.on_pause();
        out.set_style(self.el.overlay, "opacity", "1".to_string());
        out
    }

    /// Media `error` event or a rejected `play()`.
    pub fn on_error(&mut self) -> DomChanges {
        self.playing = false;
        self.failed = true;
        let mut out = DomChanges::new();
        out.set_html(self.el.button, PlayIcon::Error.html());
        out.set_style(self.el.button, "background", "#ef4444".to_string());
        out
    }

    /// Pointer entered (`true`) or left the video container.
    ///
    /// The overlay follows the pointer only while paused.
    pub fn on_hover(&self, entered: bool) -> DomChanges {
        let mut out = DomChanges::new();
        if !self.playing {
            let opacity = if entered { "1" } else { "0" };
            out.set_style(self.el.overlay, "opacity", opacity.to_string());
        }
        out
    }
}

/// Where a project's external video opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenTarget {
    /// Navigate the current tab.
    SameTab,
    /// Open a new tab without an opener.
    NewTab,
}

/// Viewports at or below this width count as narrow.
pub const NARROW_VIEWPORT: f64 = 768.0;

/// Chooses how to open an external video link.
#[must_use]
pub fn open_target(viewport_width: f64, touch: bool) -> OpenTarget {
    if touch || viewport_width <= NARROW_VIEWPORT {
        OpenTarget::SameTab
    } else {
        OpenTarget::NewTab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DomOp;

    fn player() -> VideoPlayer {
        VideoPlayer::new(VideoElements {
            button: ElementId(0),
            overlay: ElementId(1),
        })
    }

    #[test]
    fn click_alternates_play_and_pause() {
        let mut p = player();
        assert_eq!(p.click(), PlaybackRequest::Play);
        let ops = p.on_play_result(true);
        assert!(p.is_playing());
        assert!(ops.ops().contains(&DomOp::SetHtml {
            element: ElementId(0),
            html: PlayIcon::Pause.html()
        }));
        assert_eq!(ops.style_value(ElementId(1), "opacity"), Some("0"));
        assert_eq!(p.click(), PlaybackRequest::Pause);
        p.on_pause();
        assert_eq!(p.click(), PlaybackRequest::Play);
    }

    #[test]
    fn ended_restores_overlay() {
        let mut p = player();
        p.on_play();
        let ops = p.on_ended();
        assert!(!p.is_playing());
        assert_eq!(ops.style_value(ElementId(1), "opacity"), Some("1"));
    }

    #[test]
    fn rejected_play_shows_error_icon() {
        let mut p = player();
        let ops = p.on_play_result(false);
        assert!(p.is_failed());
        assert_eq!(ops.style_value(ElementId(0), "background"), Some("#ef4444"));
        assert_eq!(p.click(), PlaybackRequest::None);
    }

    #[test]
    fn hover_only_affects_paused_player() {
        let mut p = player();
        assert_eq!(p.on_hover(false).style_value(ElementId(1), "opacity"), Some("0"));
        p.on_play();
        assert!(p.on_hover(true).is_empty());
    }

    #[test]
    fn narrow_or_touch_opens_in_place() {
        assert_eq!(open_target(768.0, false), OpenTarget::SameTab);
        assert_eq!(open_target(1440.0, true), OpenTarget::SameTab);
        assert_eq!(open_target(1440.0, false), OpenTarget::NewTab);
    }

    #[test]
    fn fallback_panel_mentions_unavailability() {
        assert!(FALLBACK_HTML.contains("Video unavailable"));
    }
}
