// Navigation coordinator - single source of truth for the current slide
//
// Every navigation intent lands here: user input, preview clicks and
// autoplay ticks all funnel through go_to(), which applies the wraparound
// rule, runs the transition engine, commits the new index and publishes
// it to subscribers. Components never set the index themselves - the
// control flow is a one-directional star, so controls-driven and
// autoplay-driven updates cannot feed back into each other.
//
// The whole mutation runs to completion inside one event-loop callback
// (see the concurrency notes in widget.rs), so states are only ever
// `idle` or mid-`go_to`, never interleaved.

use crate::events::SlideChange;
use crate::geometry::GeometryProvider;
use crate::transition::{TransitionKind, VisualState};
use tracing::{debug, warn};

/// Handler invoked synchronously after every committed index change.
///
/// Handlers are called in registration order and receive the change by
/// value; they have no path back into the coordinator, so a synchronous
/// re-entrant transition is unrepresentable. Intents a handler wants to
/// raise go through the widget's event channel and run serialized, after
/// the current dispatch returns.
pub type Subscriber = Box<dyn FnMut(SlideChange) + Send>;

/// Owner of the navigation state machine
pub struct NavigationCoordinator {
    current: usize,
    /// In-flight target while a transition runs; converges to `current`
    /// when the synchronous update commits
    pending: usize,
    total: usize,
    kind: TransitionKind,
    visual: VisualState,
    subscribers: Vec<Subscriber>,
}

impl NavigationCoordinator {
    pub fn new(total: usize, kind: TransitionKind) -> Self {
        Self {
            current: 0,
            pending: 0,
            total,
            kind,
            visual: VisualState::initial(total),
            subscribers: Vec::new(),
        }
    }

    /// Index of the slide currently fully visible
    pub fn current(&self) -> usize {
        self.current
    }

    /// Visual state produced by the most recent transition
    pub fn visual(&self) -> &VisualState {
        &self.visual
    }

    /// Register a handler for committed index changes
    pub fn subscribe(&mut self, handler: impl FnMut(SlideChange) + Send + 'static) {
        self.subscribers.push(Box::new(handler));
    }

    /// Navigate to `index`, wrapping out-of-range requests.
    ///
    /// Below zero wraps to the last slide, past the end wraps to the
    /// first. A request for the current slide is a no-op: no transition
    /// runs and no subscriber is notified.
    pub fn go_to(&mut self, index: isize, geom: &dyn GeometryProvider) {
        if self.total == 0 {
            warn!("navigation requested with no slides loaded");
            return;
        }

        let target = if index < 0 {
            self.total - 1
        } else if index as usize >= self.total {
            0
        } else {
            index as usize
        };

        if target == self.current {
            return;
        }

        self.pending = target;
        self.visual = self.kind.apply(self.current, target, geom);
        self.current = self.pending;
        debug!(index = self.current, transition = self.kind.name(), "slide committed");

        let change = SlideChange {
            index: self.current,
            total: self.total,
        };
        for handler in self.subscribers.iter_mut() {
            handler(change);
        }
    }

    /// Advance one slide, wrapping past the end
    pub fn next(&mut self, geom: &dyn GeometryProvider) {
        self.go_to(self.current as isize + 1, geom);
    }

    /// Go back one slide, wrapping before the start
    pub fn previous(&mut self, geom: &dyn GeometryProvider) {
        self.go_to(self.current as isize - 1, geom);
    }
}
