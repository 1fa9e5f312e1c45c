// Events that flow between the widget's components and timer tasks
//
// All cross-component communication is typed message passing: navigation
// intents travel from the controls surface (or keyboard) into the
// coordinator, timer tasks report back over the widget's mpsc channel,
// and committed slide changes fan out to subscribers. Nothing writes into
// another component's fields.

use crate::controls::ControlStyle;

/// A navigation request, resolved by the navigation coordinator
///
/// Intents never carry pre-validated indices; wraparound and the no-op
/// guard are applied centrally so every producer (keyboard, previews,
/// autoplay) gets identical rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Next,
    Previous,
    /// Jump straight to a slide (preview click, number key)
    GoTo(usize),
    /// Scroll the preview strip one fixed step in the given direction
    ScrollPreviews(ScrollDirection),
}

/// Direction for preview strip scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Before,
    Next,
}

/// A committed change of the current slide, published to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub index: usize,
    pub total: usize,
}

/// One-time controls configuration, delivered after first render
///
/// The surface stays inert until this arrives; see
/// ControlsSurface::configure.
#[derive(Debug, Clone, Copy)]
pub struct ControlsReady {
    pub slide_count: usize,
    pub style: ControlStyle,
    pub autohide: bool,
}

/// Events delivered to the widget through its event channel
///
/// Every suspension point (autoplay interval, chrome hide delay, initial
/// settle) reports back here, and the event loop applies them one at a
/// time.
#[derive(Debug, Clone, Copy)]
pub enum WidgetEvent {
    /// Autoplay fired; navigate to this slide
    AutoplayTick(usize),
    /// The chrome hide delay elapsed without being cancelled
    ChromeHideElapsed,
    /// Initial settle timer fired; configure the controls surface
    ControlsSettle(ControlsReady),
}
