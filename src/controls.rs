// Controls surface - previews, nav buttons, indicator and chrome auto-hide
//
// The surface is a pure function of the published slide index plus its own
// layout state. It never mutates the current index: keyboard and preview
// interactions produce NavIntents that the runtime routes through the
// navigation coordinator, and the active preview only moves when a
// committed SlideChange comes back. The one piece of state it owns
// outright is the chrome: scroll offset of the preview strip, nav button
// enablement derived from that offset, and the auto-hide timer.

use crate::events::{ControlsReady, NavIntent, ScrollDirection, SlideChange, WidgetEvent};
use crate::geometry::ContainerGeometry;
use crate::scheduler::TimerHandle;
use crossterm::event::KeyCode;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Fixed step for directional preview strip scrolling, in layout units
pub const PREVIEW_SCROLL_STEP: u16 = 250;

/// Rendered width of one preview thumbnail, in layout units
pub const PREVIEW_WIDTH: u16 = 155;

/// Delay before the chrome hides after the pointer leaves the widget
pub const CHROME_HIDE_DELAY: Duration = Duration::from_secs(3);

/// Visual style of the controls, selected by the 1..4 config integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlStyle {
    #[default]
    Round,
    Slim,
    Square,
    /// Thumbnail strip with indicator; always visible by design
    Preview,
}

impl ControlStyle {
    /// Map the configured integer selector, falling back to Round
    pub fn from_selector(selector: u8) -> Self {
        match selector {
            1 => Self::Round,
            2 => Self::Slim,
            3 => Self::Square,
            4 => Self::Preview,
            other => {
                warn!(selector = other, "unknown controls type, using round");
                Self::Round
            }
        }
    }

    /// The preview variant never auto-hides
    pub fn always_visible(&self) -> bool {
        matches!(self, Self::Preview)
    }
}

/// Horizontal scroll state of the preview strip
///
/// Owns offset, content width and viewport width in layout units. Offsets
/// are clamped, never elastic; the nav buttons read `at_start`/`at_end`
/// to derive their enabled state instead of listening for scroll events.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewScroll {
    offset: u16,
    content_width: u16,
    viewport_width: u16,
}

impl PreviewScroll {
    /// Update measurements; call whenever the container geometry changes.
    /// Clamps the offset into the new valid range.
    pub fn update_dimensions(&mut self, content_width: u16, viewport_width: u16) {
        self.content_width = content_width;
        self.viewport_width = viewport_width;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll one fixed step in the given direction
    pub fn scroll(&mut self, direction: ScrollDirection) {
        self.offset = match direction {
            ScrollDirection::Before => self.offset.saturating_sub(PREVIEW_SCROLL_STEP),
            ScrollDirection::Next => (self.offset + PREVIEW_SCROLL_STEP).min(self.max_offset()),
        };
    }

    /// Bring the preview at `index` into the middle of the viewport
    pub fn center_on(&mut self, index: usize) {
        let slot = index as u16 * PREVIEW_WIDTH + PREVIEW_WIDTH / 2;
        let half = self.viewport_width / 2;
        self.offset = slot.saturating_sub(half).min(self.max_offset());
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn at_start(&self) -> bool {
        self.offset == 0
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.max_offset()
    }

    fn max_offset(&self) -> u16 {
        self.content_width.saturating_sub(self.viewport_width)
    }
}

/// Chrome visibility lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chrome {
    #[default]
    Visible,
    /// Hide timer armed; still rendered until it fires
    HidePending,
    Hidden,
}

/// State of the controls chrome accompanying the slide viewport
pub struct ControlsSurface {
    style: ControlStyle,
    autohide: bool,
    preview_count: usize,
    active_preview: usize,
    show_nav_buttons: bool,
    scroll: PreviewScroll,
    chrome: Chrome,
    hide_timer: Option<TimerHandle>,
    configured: bool,
}

impl ControlsSurface {
    /// An inert surface; does nothing until `configure` arrives
    pub fn new() -> Self {
        Self {
            style: ControlStyle::default(),
            autohide: false,
            preview_count: 0,
            active_preview: 0,
            show_nav_buttons: false,
            scroll: PreviewScroll::default(),
            chrome: Chrome::Visible,
            hide_timer: None,
            configured: false,
        }
    }

    /// Apply the one-time configuration message
    pub fn configure(&mut self, ready: ControlsReady) {
        self.style = ready.style;
        self.autohide = ready.autohide;
        self.preview_count = ready.slide_count;
        self.configured = true;
        debug!(style = ?self.style, autohide = self.autohide, "controls configured");
    }

    /// Sync the highlighted preview to a committed slide change.
    ///
    /// For the preview style this also centers the thumbnail, mirroring
    /// what a click or autoplay advance does visually.
    pub fn sync_active(&mut self, change: SlideChange) {
        self.active_preview = change.index;
        if self.style == ControlStyle::Preview {
            self.scroll.center_on(change.index);
        }
    }

    /// Overflow check at mount time; the preview strip starts with nav
    /// buttons only when its content already overflows
    pub fn on_mount(&mut self, container: ContainerGeometry) {
        self.scroll
            .update_dimensions(container.scroll_width, container.client_width);
        if self.style == ControlStyle::Preview && container.overflows() {
            self.show_nav_buttons = true;
        }
    }

    /// Recompute overflow-dependent state on a viewport resize signal
    pub fn on_resize(&mut self, container: ContainerGeometry) {
        self.scroll
            .update_dimensions(container.scroll_width, container.client_width);
        self.show_nav_buttons = container.overflows();
    }

    /// Scroll the preview strip one fixed step
    pub fn scroll_previews(&mut self, direction: ScrollDirection) {
        self.scroll.scroll(direction);
    }

    /// Whether the "before" nav button accepts input
    pub fn before_enabled(&self) -> bool {
        self.show_nav_buttons && !self.scroll.at_start()
    }

    /// Whether the "next" nav button accepts input
    pub fn next_enabled(&self) -> bool {
        self.show_nav_buttons && !self.scroll.at_end()
    }

    /// React to the pointer entering (`true`) or leaving (`false`) the
    /// widget.
    ///
    /// Entering cancels any pending hide and shows the chrome at once;
    /// leaving arms the delayed hide. Suppressed entirely when auto-hide
    /// is disabled or the always-visible preview style is active.
    pub fn set_visibility(&mut self, visible: bool, tx: &mpsc::Sender<WidgetEvent>) {
        if !self.autohide || self.style.always_visible() {
            return;
        }

        if visible {
            if let Some(timer) = self.hide_timer.take() {
                timer.cancel();
            }
            self.chrome = Chrome::Visible;
        } else {
            // Rearm: the previous pending hide is invalidated first
            if let Some(timer) = self.hide_timer.take() {
                timer.cancel();
            }
            self.chrome = Chrome::HidePending;

            let tx = tx.clone();
            let task = tokio::spawn(async move {
                tokio::time::sleep(CHROME_HIDE_DELAY).await;
                let _ = tx.send(WidgetEvent::ChromeHideElapsed).await;
            });
            self.hide_timer = Some(TimerHandle::new(task));
        }
    }

    /// The hide delay elapsed without the pointer coming back
    pub fn on_hide_elapsed(&mut self) {
        // A cancelled timer can still race its final send; only honor it
        // while a hide is actually pending
        if self.chrome == Chrome::HidePending {
            self.chrome = Chrome::Hidden;
        }
        self.hide_timer = None;
    }

    /// Keyboard navigation on a focused preview. Wraparound is applied by
    /// the coordinator, never here.
    pub fn handle_key(&self, key: KeyCode) -> Option<NavIntent> {
        if !self.configured {
            return None;
        }
        match key {
            KeyCode::Left => Some(NavIntent::Previous),
            KeyCode::Right => Some(NavIntent::Next),
            _ => None,
        }
    }

    /// Indicator travel: summed widths of previews before the active one
    pub fn indicator_travel(&self) -> u16 {
        self.active_preview as u16 * PREVIEW_WIDTH
    }

    /// Invalidate the hide timer on widget teardown
    pub fn shutdown(&mut self) {
        if let Some(timer) = self.hide_timer.take() {
            timer.cancel();
        }
    }

    pub fn style(&self) -> ControlStyle {
        self.style
    }

    pub fn active_preview(&self) -> usize {
        self.active_preview
    }

    pub fn preview_count(&self) -> usize {
        self.preview_count
    }

    pub fn show_nav_buttons(&self) -> bool {
        self.show_nav_buttons
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll.offset()
    }

    pub fn chrome(&self) -> Chrome {
        self.chrome
    }

    #[allow(dead_code)] // Embedder-facing query, exercised in tests
    pub fn chrome_visible(&self) -> bool {
        self.chrome != Chrome::Hidden
    }

    #[allow(dead_code)] // Embedder-facing query, exercised in tests
    pub fn has_hide_timer(&self) -> bool {
        self.hide_timer.is_some()
    }
}

impl Default for ControlsSurface {
    fn default() -> Self {
        Self::new()
    }
}
