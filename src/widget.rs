// Widget composition root
//
// Slideshow wires the registry, coordinator, scheduler and controls into
// the star topology: intents and timer events enter through exactly two
// funnels (handle_intent, handle_event), the coordinator is the only
// index mutator, and committed changes fan out to the controls surface
// and the autoplay cursor through subscriptions.
//
// Concurrency model: everything here runs on discrete event-loop
// callbacks. Each go_to runs to completion (transition, commit, publish)
// before the next event is applied - the timer tasks only ever send
// messages, they never touch widget state. Teardown invalidates every
// live timer handle so no callback outlives the widget.

use crate::config::Options;
use crate::controls::{ControlsSurface, PREVIEW_WIDTH};
use crate::coordinator::NavigationCoordinator;
use crate::events::{ControlsReady, NavIntent, SlideChange, WidgetEvent};
use crate::geometry::{ContainerGeometry, UniformGeometry};
use crate::registry::SlideSet;
use crate::scheduler::{PlaybackScheduler, TimerHandle};
use crate::transition::VisualState;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Delay before the one-time controls configuration message is sent,
/// letting the first render settle
const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Controls state shared with the slide change subscriber and the renderer
pub type SharedControls = Arc<Mutex<ControlsSurface>>;

/// A fully wired slide carousel instance
pub struct Slideshow {
    options: Options,
    slides: SlideSet,
    coordinator: NavigationCoordinator,
    scheduler: PlaybackScheduler,
    controls: SharedControls,
    geometry: UniformGeometry,
    viewport_width: u16,
    tx: mpsc::Sender<WidgetEvent>,
    settle_timer: Option<TimerHandle>,
}

impl Slideshow {
    /// Build a widget from resolved options and a loaded slide set.
    ///
    /// `tx` is the widget's event channel; timer tasks report back on it
    /// and the event loop feeds the receiver into `handle_event`.
    pub fn new(options: Options, slides: SlideSet, tx: mpsc::Sender<WidgetEvent>) -> Self {
        let geometry = UniformGeometry::new(options.width, slides.len(), options.width);
        let mut coordinator = NavigationCoordinator::new(slides.len(), options.transition);
        let scheduler = PlaybackScheduler::new();
        let controls: SharedControls = Arc::new(Mutex::new(ControlsSurface::new()));

        // Committed changes fan out: controls highlight first, then the
        // autoplay cursor, in subscription order
        let sync_controls = Arc::clone(&controls);
        coordinator.subscribe(move |change: SlideChange| {
            sync_controls.lock().unwrap().sync_active(change);
        });
        let cursor = scheduler.cursor_sync();
        coordinator.subscribe(move |change: SlideChange| {
            cursor.set(change.index);
        });

        Self {
            viewport_width: options.width,
            options,
            slides,
            coordinator,
            scheduler,
            controls,
            geometry,
            tx,
            settle_timer: None,
        }
    }

    /// Start the widget: autoplay (if configured) and the deferred
    /// controls configuration message.
    pub fn mount(&mut self) {
        self.scheduler
            .start(&self.options.autoplay, self.slides.len(), self.tx.clone());

        if self.options.show_controls {
            let ready = ControlsReady {
                slide_count: self.slides.len(),
                style: self.options.controls_type,
                autohide: self.options.autohide_controls,
            };
            let tx = self.tx.clone();
            let task = tokio::spawn(async move {
                tokio::time::sleep(SETTLE_DELAY).await;
                let _ = tx.send(WidgetEvent::ControlsSettle(ready)).await;
            });
            self.settle_timer = Some(TimerHandle::new(task));
        }
    }

    /// Route a navigation intent through the coordinator
    pub fn handle_intent(&mut self, intent: NavIntent) {
        match intent {
            NavIntent::Next => self.coordinator.next(&self.geometry),
            NavIntent::Previous => self.coordinator.previous(&self.geometry),
            NavIntent::GoTo(index) => self.coordinator.go_to(index as isize, &self.geometry),
            NavIntent::ScrollPreviews(direction) => {
                self.controls.lock().unwrap().scroll_previews(direction);
            }
        }
    }

    /// Apply a timer-driven event from the widget channel
    pub fn handle_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::AutoplayTick(index) => {
                self.coordinator.go_to(index as isize, &self.geometry);
            }
            WidgetEvent::ChromeHideElapsed => {
                self.controls.lock().unwrap().on_hide_elapsed();
            }
            WidgetEvent::ControlsSettle(ready) => {
                let mut controls = self.controls.lock().unwrap();
                controls.configure(ready);
                controls.on_mount(self.preview_container());
            }
        }
    }

    /// Viewport resize signal, width in layout units
    pub fn on_resize(&mut self, client_width: u16) {
        self.viewport_width = client_width;
        self.geometry.set_viewport_width(client_width);
        let container = self.preview_container();
        self.controls.lock().unwrap().on_resize(container);
    }

    /// Pointer entered (`true`) or left (`false`) the widget area
    pub fn pointer(&mut self, inside: bool) {
        self.controls.lock().unwrap().set_visibility(inside, &self.tx);
    }

    /// Register an outbound subscriber for committed slide changes
    pub fn subscribe(&mut self, handler: impl FnMut(SlideChange) + Send + 'static) {
        self.coordinator.subscribe(handler);
    }

    /// Tear down: invalidate every live timer handle
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
        if let Some(timer) = self.settle_timer.take() {
            timer.cancel();
        }
        self.controls.lock().unwrap().shutdown();
    }

    /// Geometry of the preview strip container
    fn preview_container(&self) -> ContainerGeometry {
        ContainerGeometry {
            client_width: self.viewport_width,
            scroll_width: PREVIEW_WIDTH.saturating_mul(self.slides.len() as u16),
        }
    }

    // Accessors for the renderer

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn slides(&self) -> &SlideSet {
        &self.slides
    }

    pub fn current(&self) -> usize {
        self.coordinator.current()
    }

    pub fn visual(&self) -> &VisualState {
        self.coordinator.visual()
    }

    pub fn controls(&self) -> SharedControls {
        Arc::clone(&self.controls)
    }

    /// Position counter string, e.g. "3/9"
    pub fn counter(&self) -> String {
        self.slides.counter(self.coordinator.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlStyle;
    use crate::registry::DEFAULT_SLIDE_LIMIT;
    use crate::scheduler::PlaybackConfig;
    use crate::transition::TransitionKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn options() -> Options {
        Options::default()
    }

    fn slides(n: usize) -> SlideSet {
        let input: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
        SlideSet::load(Some(&input), DEFAULT_SLIDE_LIMIT)
    }

    fn settle(show: &mut Slideshow, style: ControlStyle) {
        show.handle_event(WidgetEvent::ControlsSettle(ControlsReady {
            slide_count: show.slides().len(),
            style,
            autohide: false,
        }));
    }

    #[tokio::test]
    async fn test_intents_route_through_the_coordinator() {
        let (tx, _rx) = mpsc::channel(8);
        let mut show = Slideshow::new(options(), slides(5), tx);

        show.handle_intent(NavIntent::Next);
        show.handle_intent(NavIntent::Next);
        assert_eq!(show.current(), 2);
        assert_eq!(show.counter(), "3/5");

        show.handle_intent(NavIntent::Previous);
        assert_eq!(show.current(), 1);

        show.handle_intent(NavIntent::GoTo(0));
        show.handle_intent(NavIntent::Previous);
        assert_eq!(show.current(), 4);
    }

    #[tokio::test]
    async fn test_committed_change_syncs_the_controls_highlight() {
        let (tx, _rx) = mpsc::channel(8);
        let mut show = Slideshow::new(options(), slides(5), tx);
        settle(&mut show, ControlStyle::Round);

        show.handle_intent(NavIntent::GoTo(3));
        assert_eq!(show.controls().lock().unwrap().active_preview(), 3);
    }

    #[tokio::test]
    async fn test_autoplay_tick_drives_navigation() {
        let (tx, _rx) = mpsc::channel(8);
        let mut show = Slideshow::new(options(), slides(5), tx);

        show.handle_event(WidgetEvent::AutoplayTick(1));
        show.handle_event(WidgetEvent::AutoplayTick(2));
        assert_eq!(show.current(), 2);
    }

    #[tokio::test]
    async fn test_outbound_subscribers_see_commits_only() {
        let (tx, _rx) = mpsc::channel(8);
        let mut show = Slideshow::new(options(), slides(5), tx);
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&seen);
        show.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        show.handle_intent(NavIntent::GoTo(0)); // no-op, not published
        show.handle_intent(NavIntent::GoTo(2));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_arms_settle_and_autoplay() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut opts = options();
        opts.autoplay = PlaybackConfig::on();
        let mut show = Slideshow::new(opts, slides(3), tx);

        show.mount();

        // Both timer roles deliver through the channel; apply them as the
        // event loop would
        let mut saw_settle = false;
        let mut saw_tick = false;
        for _ in 0..2 {
            match rx.recv().await.expect("event") {
                ev @ WidgetEvent::ControlsSettle(_) => {
                    show.handle_event(ev);
                    saw_settle = true;
                }
                ev @ WidgetEvent::AutoplayTick(_) => {
                    show.handle_event(ev);
                    saw_tick = true;
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert!(saw_settle && saw_tick);

        show.shutdown();
    }

    #[tokio::test]
    async fn test_resize_flips_preview_nav_buttons() {
        let (tx, _rx) = mpsc::channel(8);
        let mut show = Slideshow::new(options(), slides(9), tx);
        settle(&mut show, ControlStyle::Preview);

        // 9 previews (1395 units) overflow the 200-unit default viewport
        assert!(show.controls().lock().unwrap().show_nav_buttons());

        show.on_resize(1600);
        assert!(!show.controls().lock().unwrap().show_nav_buttons());

        show.on_resize(600);
        assert!(show.controls().lock().unwrap().show_nav_buttons());
    }

    #[tokio::test]
    async fn test_strip_transition_uses_widget_width() {
        let (tx, _rx) = mpsc::channel(8);
        let mut opts = options();
        opts.width = 640;
        opts.transition = TransitionKind::Strip;
        let mut show = Slideshow::new(opts, slides(4), tx);

        show.handle_intent(NavIntent::GoTo(2));
        assert_eq!(show.visual().strip_offset, -1280);
    }
}
