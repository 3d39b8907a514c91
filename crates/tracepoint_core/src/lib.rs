//! Tracepoint Core
//!
//! Host-independent primitives for declarative analytics instrumentation:
//!
//! - **Bindings**: the trigger intent + payload descriptor attached to an
//!   element (`{ t?, act, data: { id, p? } }` on the wire)
//! - **Reports**: normalized occurrence payloads and the pure builders
//!   that assemble them
//! - **Sink**: process-wide registration of the reporting callback
//! - **Clock**: injectable Unix time source
//!
//! The element-facing layer (trigger registration, lifecycle hooks,
//! visibility checks) lives in `tracepoint_directive`.
//!
//! # Example
//!
//! ```rust
//! use tracepoint_core::{build_report, ElementTiming, TrackBinding, TriggerKind};
//!
//! let binding = TrackBinding::new(TriggerKind::Ready, "pv-home").with_param("hero");
//! let timing = ElementTiming {
//!     enter_time: Some(1_700_000_000),
//!     leave_time: None,
//! };
//!
//! let report = build_report(&binding, &timing, 1_700_000_000);
//! assert_eq!(report.event_id, "pv-home");
//! assert_eq!(report.service_param["p1"], "1700000000");
//! assert_eq!(report.service_param["p2"], "");
//! assert_eq!(report.service_param["p3"], "hero");
//! ```

pub mod binding;
pub mod clock;
pub mod error;
pub mod report;
pub mod sink;

pub use binding::{BindPhase, EventSpec, ParamValue, TrackBinding, TriggerKind};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, TrackError};
pub use report::{build_action_report, build_report, ElementTiming, ReportRecord};
pub use sink::{clear_sink, deliver, init, LogSink, ReportSink};
