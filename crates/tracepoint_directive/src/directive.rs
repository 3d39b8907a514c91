//! Host lifecycle hooks
//!
//! Translates the host framework's three directive phases into tracker
//! calls:
//!
//! - **attach** records the enter time and registers bind-phase bindings.
//! - **update** re-evaluates update-phase bindings; unload bindings are
//!   always re-evaluated here so a leave intent added after attach still
//!   lands.
//! - **detach** records the leave time, force-fires unload bindings (no
//!   native unload will reach a destroyed element), registers
//!   unbind-phase bindings, and then purges any click or view
//!   registration left for the element.

use std::rc::Rc;

use tracepoint_core::clock::Clock;
use tracepoint_core::sink::ReportSink;
use tracepoint_core::{BindPhase, TrackBinding, TriggerKind};

use crate::element::{BoundsSource, ElementId};
use crate::tracker::Tracker;

/// Directive adapter, one instance per host view root
///
/// The host invokes [`attach`](Self::attach) / [`update`](Self::update) /
/// [`detach`](Self::detach) with each element's current binding, and
/// feeds native events to the inner [`Tracker`].
pub struct TrackDirective {
    tracker: Tracker,
}

impl Default for TrackDirective {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackDirective {
    /// Create a directive on a fresh tracker
    pub fn new() -> Self {
        Self {
            tracker: Tracker::new(),
        }
    }

    /// Use a tracker-local sink instead of the process-wide one
    pub fn with_sink(mut self, sink: Rc<dyn ReportSink>) -> Self {
        self.tracker = self.tracker.with_sink(sink);
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.tracker = self.tracker.with_clock(clock);
        self
    }

    /// The underlying tracker
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Mutable access to the underlying tracker, for native event feeds
    pub fn tracker_mut(&mut self) -> &mut Tracker {
        &mut self.tracker
    }

    /// Element entered the tree with a binding
    pub fn attach(&mut self, source: &dyn BoundsSource, element: ElementId, binding: &TrackBinding) {
        self.tracker.mark_enter(element);
        if binding.phase == BindPhase::Bind {
            self.tracker.track(source, element, binding, false);
        }
    }

    /// Element updated in place
    pub fn update(&mut self, source: &dyn BoundsSource, element: ElementId, binding: &TrackBinding) {
        if binding.phase == BindPhase::Update || binding.trigger == TriggerKind::Unload {
            self.tracker.track(source, element, binding, false);
        }
    }

    /// Element is being destroyed
    ///
    /// The forced unload fire happens before the defensive purge, so a
    /// leave report always precedes registry cleanup.
    pub fn detach(&mut self, source: &dyn BoundsSource, element: ElementId, binding: &TrackBinding) {
        self.tracker.mark_leave(element);
        if binding.trigger == TriggerKind::Unload {
            self.tracker.track(source, element, binding, true);
        } else if binding.phase == BindPhase::Unbind {
            self.tracker.track(source, element, binding, false);
        }

        self.tracker.purge(element, TriggerKind::Click);
        self.tracker.purge(element, TriggerKind::View);
    }
}
