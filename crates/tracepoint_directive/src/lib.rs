//! Tracepoint Directive
//!
//! Declarative analytics instrumentation for element trees. An element is
//! annotated with a trigger intent (ready, click, view, unload) and a
//! payload descriptor; the directive registers the matching trigger
//! handler as the host mounts, updates, and destroys the element, and the
//! reporting sink receives exactly one normalized record per qualifying
//! occurrence.
//!
//! # Architecture
//!
//! ```text
//! Host framework (attach / update / detach hooks)
//!     ↓
//! TrackDirective (phase rules)
//!     ↓
//! Tracker (handler registry keyed by (ElementId, TriggerKind))
//!     ↓ on_click / on_scroll / on_unload
//! build_report → ReportSink (tracepoint_core)
//! ```
//!
//! # Example
//!
//! ```rust
//! use tracepoint_directive::prelude::*;
//!
//! struct FixedViewport;
//!
//! impl BoundsSource for FixedViewport {
//!     fn viewport_height(&self) -> f32 {
//!         600.0
//!     }
//!
//!     fn bounds(&self, _element: ElementId) -> Option<ElementBounds> {
//!         None
//!     }
//! }
//!
//! let mut directive = TrackDirective::new();
//! let element = ElementId::default(); // host-supplied in practice
//!
//! let binding = TrackBinding::new(TriggerKind::Click, "cta-click");
//! directive.attach(&FixedViewport, element, &binding);
//!
//! // First native click reports; the rest of the epoch stays silent.
//! directive.tracker_mut().on_click(element);
//! directive.tracker_mut().on_click(element);
//! ```

pub mod action;
pub mod compat;
pub mod directive;
pub mod element;
pub mod throttle;
pub mod tracker;

pub use action::{defer, ActionTracker, ACTION_DELAY};
pub use compat::{check_host_version, SUPPORTED_HOST_MAJOR, VERSION};
pub use directive::TrackDirective;
pub use element::{BoundsSource, ElementBounds, ElementId};
pub use throttle::Throttle;
pub use tracker::{Tracker, VIEW_THROTTLE};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::action::ActionTracker;
    pub use crate::directive::TrackDirective;
    pub use crate::element::{BoundsSource, ElementBounds, ElementId};
    pub use crate::tracker::Tracker;
    pub use tracepoint_core::{
        BindPhase, EventSpec, ParamValue, ReportRecord, ReportSink, TrackBinding, TriggerKind,
    };
}
