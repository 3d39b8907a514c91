//! Trigger handler registry and lifecycle bookkeeping
//!
//! The [`Tracker`] owns, per (element, trigger-kind) pair, the currently
//! registered trigger handler plus the element's timing state, and turns
//! native-event notifications from the host into at most one report per
//! registration epoch.
//!
//! # Architecture
//!
//! ```text
//! Host lifecycle hooks (TrackDirective)
//!     ↓ mark_enter / track / purge / mark_leave
//! Tracker (registry keyed by (ElementId, TriggerKind))
//!     ↓ on_click / on_scroll / on_unload
//! Armed handler fires once → build_report → ReportSink
//! ```
//!
//! A fired handler is disarmed but its registry entry is retained until
//! the next registration for the pair, or a purge. Registration always
//! fully supersedes the prior entry for its pair, so repeated `track`
//! calls never accumulate handlers.

use std::rc::Rc;
use std::time::Duration;

use rustc_hash::FxHashMap;

use tracepoint_core::clock::{Clock, SystemClock};
use tracepoint_core::report::build_report;
use tracepoint_core::sink::{self, ReportSink};
use tracepoint_core::{ElementTiming, ReportRecord, TrackBinding, TriggerKind};

use crate::element::{BoundsSource, ElementId};
use crate::throttle::Throttle;

/// Minimum spacing between visibility checks for one view registration
pub const VIEW_THROTTLE: Duration = Duration::from_millis(100);

/// One registered trigger handler
///
/// `armed` distinguishes "listener attached" from "fired; listener
/// removed, entry awaiting replacement or purge".
#[derive(Debug, Clone)]
struct HandlerEntry {
    binding: TrackBinding,
    armed: bool,
    epoch: u64,
    throttle: Option<Throttle>,
}

/// Per-element trigger registration and report dispatch
///
/// One instance per host view root. Reports go to the tracker-local sink
/// when one is set, otherwise through the process-wide sink slot.
pub struct Tracker {
    clock: Rc<dyn Clock>,
    sink: Option<Rc<dyn ReportSink>>,
    timing: FxHashMap<ElementId, ElementTiming>,
    handlers: FxHashMap<(ElementId, TriggerKind), HandlerEntry>,
    next_epoch: u64,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    /// Create a tracker on the system clock and the process-wide sink
    pub fn new() -> Self {
        Self {
            clock: Rc::new(SystemClock),
            sink: None,
            timing: FxHashMap::default(),
            handlers: FxHashMap::default(),
            next_epoch: 0,
        }
    }

    /// Use a tracker-local sink instead of the process-wide one
    pub fn with_sink(mut self, sink: Rc<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // =========================================================================
    // Timing state
    // =========================================================================

    /// Recorded timing state for an element
    pub fn timing(&self, element: ElementId) -> Option<&ElementTiming> {
        self.timing.get(&element)
    }

    /// Record the element's enter time (called at attach)
    pub fn mark_enter(&mut self, element: ElementId) {
        let now = self.clock.unix_seconds();
        self.timing.entry(element).or_default().enter_time = Some(now);
    }

    /// Record the element's leave time (called at detach)
    pub fn mark_leave(&mut self, element: ElementId) {
        let now = self.clock.unix_seconds();
        self.timing.entry(element).or_default().leave_time = Some(now);
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register (or fire) tracking for one element and binding
    ///
    /// Dispatches on the binding's trigger kind:
    ///
    /// - `ready` fires synchronously; no registry entry is created.
    /// - `click`/`view`/`unload` replace any prior registration for the
    ///   (element, kind) pair with a fresh armed handler; `view` runs one
    ///   immediate visibility check so an element already on screen
    ///   reports without waiting for a scroll.
    /// - `force_run` applies to unload bindings only: the handler runs
    ///   immediately, bypassing registration, so the report is delivered
    ///   even though no native unload will reach a destroyed element.
    pub fn track(
        &mut self,
        source: &dyn BoundsSource,
        element: ElementId,
        binding: &TrackBinding,
        force_run: bool,
    ) {
        match binding.trigger {
            TriggerKind::Ready => self.fire_ready(element, binding),
            TriggerKind::Click => {
                self.register(element, binding, None);
            }
            TriggerKind::View => {
                self.register(element, binding, Some(Throttle::new(VIEW_THROTTLE)));
                self.check_view(source, element);
            }
            TriggerKind::Unload => {
                if force_run {
                    self.fire_unload(element, binding.clone());
                    return;
                }
                self.register(element, binding, None);
            }
        }
    }

    /// Drop the registry entry for the pair, armed or not
    ///
    /// Removing an absent entry is a no-op.
    pub fn purge(&mut self, element: ElementId, kind: TriggerKind) {
        if let Some(entry) = self.handlers.remove(&(element, kind)) {
            tracing::debug!(
                element = ?element,
                kind = ?kind,
                epoch = entry.epoch,
                "purged trigger registration"
            );
        }
    }

    fn register(&mut self, element: ElementId, binding: &TrackBinding, throttle: Option<Throttle>) {
        let epoch = self.next_epoch;
        self.next_epoch += 1;

        let entry = HandlerEntry {
            binding: binding.clone(),
            armed: true,
            epoch,
            throttle,
        };
        match self.handlers.insert((element, binding.trigger), entry) {
            Some(prior) => tracing::debug!(
                element = ?element,
                kind = ?binding.trigger,
                superseded = prior.epoch,
                epoch,
                "replaced trigger registration"
            ),
            None => tracing::debug!(
                element = ?element,
                kind = ?binding.trigger,
                epoch,
                "registered trigger"
            ),
        }
    }

    // =========================================================================
    // Native event feeds
    // =========================================================================

    /// Host notification: a native click landed on `element`
    ///
    /// Fires the armed click handler once; later clicks in the same
    /// registration epoch are ignored.
    pub fn on_click(&mut self, element: ElementId) {
        let Some(entry) = self.handlers.get_mut(&(element, TriggerKind::Click)) else {
            return;
        };
        if !entry.armed {
            return;
        }
        entry.armed = false;
        let binding = entry.binding.clone();

        let occur_time = self.clock.unix_seconds();
        let report = build_report(&binding, &self.timing_of(element), occur_time);
        self.deliver(&report);
    }

    /// Host notification: the viewport scrolled
    ///
    /// Runs the throttled visibility check for every armed view
    /// registration.
    pub fn on_scroll(&mut self, source: &dyn BoundsSource) {
        let elements: Vec<ElementId> = self
            .handlers
            .iter()
            .filter(|((_, kind), entry)| *kind == TriggerKind::View && entry.armed)
            .map(|((element, _), _)| *element)
            .collect();
        for element in elements {
            self.check_view(source, element);
        }
    }

    /// Host notification: the page is unloading
    ///
    /// Fires every armed unload registration.
    pub fn on_unload(&mut self) {
        let armed: Vec<(ElementId, TrackBinding)> = self
            .handlers
            .iter()
            .filter(|((_, kind), entry)| *kind == TriggerKind::Unload && entry.armed)
            .map(|((element, _), entry)| (*element, entry.binding.clone()))
            .collect();
        for (element, binding) in armed {
            self.fire_unload(element, binding);
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Number of live registry entries, armed or fired
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Whether an armed handler exists for the pair
    pub fn is_armed(&self, element: ElementId, kind: TriggerKind) -> bool {
        self.handlers
            .get(&(element, kind))
            .map(|entry| entry.armed)
            .unwrap_or(false)
    }

    /// Whether any registry entry (armed or fired) exists for the pair
    pub fn is_registered(&self, element: ElementId, kind: TriggerKind) -> bool {
        self.handlers.contains_key(&(element, kind))
    }

    // =========================================================================
    // Trigger handlers
    // =========================================================================

    /// Page-enter handler: occurrence time is the recorded enter time
    fn fire_ready(&self, element: ElementId, binding: &TrackBinding) {
        let timing = self.timing_of(element);
        let occur_time = timing.enter_time.unwrap_or_default();
        let report = build_report(binding, &timing, occur_time);
        self.deliver(&report);
    }

    /// Page-leave handler, shared by the native and forced paths
    ///
    /// Records the leave time itself; occurrence time is the recorded
    /// enter time. Disarms any live unload entry so a later native unload
    /// does not report again.
    fn fire_unload(&mut self, element: ElementId, binding: TrackBinding) {
        let leave = self.clock.unix_seconds();
        let timing = self.timing.entry(element).or_default();
        timing.leave_time = Some(leave);
        let timing = *timing;

        if let Some(entry) = self.handlers.get_mut(&(element, TriggerKind::Unload)) {
            entry.armed = false;
        }

        let occur_time = timing.enter_time.unwrap_or_default();
        let report = build_report(&binding, &timing, occur_time);
        self.deliver(&report);
    }

    /// Visibility check for one view registration
    ///
    /// Fires (and disarms) when the element is fully on screen; otherwise
    /// leaves the registration armed for the next admitted scroll.
    fn check_view(&mut self, source: &dyn BoundsSource, element: ElementId) {
        let now = self.clock.now();
        let Some(entry) = self.handlers.get_mut(&(element, TriggerKind::View)) else {
            return;
        };
        if !entry.armed {
            return;
        }
        if let Some(throttle) = entry.throttle.as_mut() {
            if !throttle.admit(now) {
                tracing::trace!(element = ?element, "view check throttled");
                return;
            }
        }

        let fully_visible = source
            .bounds(element)
            .is_some_and(|bounds| bounds.fully_visible(source.viewport_height()));
        if !fully_visible {
            return;
        }
        entry.armed = false;
        let binding = entry.binding.clone();

        let occur_time = self.clock.unix_seconds();
        let report = build_report(&binding, &self.timing_of(element), occur_time);
        self.deliver(&report);
    }

    fn timing_of(&self, element: ElementId) -> ElementTiming {
        self.timing.get(&element).copied().unwrap_or_default()
    }

    fn deliver(&self, report: &ReportRecord) {
        match self.sink {
            Some(ref local) => local.deliver(report),
            None => sink::deliver(report),
        }
    }
}
