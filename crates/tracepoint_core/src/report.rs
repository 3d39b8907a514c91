//! Report payload assembly
//!
//! Builds the normalized record delivered to the reporting sink. Service
//! params are positional (`p1`, `p2`, ...): ready/unload reports reserve
//! the first two positions for the element's enter/leave timestamps, and
//! extra params from the binding fill the following positions in order.

use indexmap::IndexMap;
use serde::Serialize;

use crate::binding::{EventSpec, TrackBinding, TriggerKind};

/// Per-element timing state, recorded across the element's lifetime
///
/// `enter_time` is written once at attach; `leave_time` at detach and
/// again when an unload handler fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementTiming {
    /// Unix seconds at attach
    pub enter_time: Option<i64>,
    /// Unix seconds at detach or unload fire
    pub leave_time: Option<i64>,
}

/// Normalized payload delivered to the reporting sink
///
/// Produced once per occurrence and not retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecord {
    /// Opaque identifier of the tracked event type
    pub event_id: String,
    /// Unix seconds at which the tracked condition was satisfied
    pub occur_time: i64,
    /// Positional params, `p1`..`pN` in insertion order
    pub service_param: IndexMap<String, String>,
}

fn stringify(time: Option<i64>) -> String {
    time.map(|t| t.to_string()).unwrap_or_default()
}

fn append_params(service_param: &mut IndexMap<String, String>, spec: &EventSpec) {
    for param in &spec.params {
        let key = format!("p{}", service_param.len() + 1);
        service_param.insert(key, param.to_string());
    }
}

/// Build the report for a directive-managed trigger occurrence
///
/// Page-enter and page-leave reports lead with the element's recorded
/// timestamps in `p1`/`p2` (empty string when unset); extra params always
/// follow at the next sequential positions.
pub fn build_report(
    binding: &TrackBinding,
    timing: &ElementTiming,
    occur_time: i64,
) -> ReportRecord {
    let mut service_param = IndexMap::new();

    if matches!(binding.trigger, TriggerKind::Ready | TriggerKind::Unload) {
        service_param.insert("p1".to_owned(), stringify(timing.enter_time));
        service_param.insert("p2".to_owned(), stringify(timing.leave_time));
    }
    append_params(&mut service_param, &binding.data);

    ReportRecord {
        event_id: binding.data.id.clone(),
        occur_time,
        service_param,
    }
}

/// Build the report for an action-wrapper occurrence
///
/// No reserved positions: the payload is built purely from the
/// descriptor's extra params.
pub fn build_action_report(spec: &EventSpec, occur_time: i64) -> ReportRecord {
    let mut service_param = IndexMap::new();
    append_params(&mut service_param, spec);

    ReportRecord {
        event_id: spec.id.clone(),
        occur_time,
        service_param,
    }
}
