//! Reporting sink registration
//!
//! Occurrence reports flow to a process-wide sink installed with [`init`].
//! Until one is installed, reports fall back to [`LogSink`], which logs
//! each record. Delivery is fire-and-forget: nothing is returned, nothing
//! is retried, and sink panics propagate to the caller.

use std::sync::{Arc, RwLock};

use crate::report::ReportRecord;

/// Receives one normalized record per tracked occurrence
///
/// Implementations should not block the caller; the tracker delivers
/// synchronously from the host's event loop.
pub trait ReportSink {
    /// Deliver one occurrence report
    fn deliver(&self, report: &ReportRecord);
}

impl<F: Fn(&ReportRecord)> ReportSink for F {
    fn deliver(&self, report: &ReportRecord) {
        self(report)
    }
}

/// Fallback sink that logs each record
///
/// Stands in until [`init`] installs a real sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn deliver(&self, report: &ReportRecord) {
        tracing::info!(
            event_id = %report.event_id,
            occur_time = report.occur_time,
            service_param = ?report.service_param,
            "tracking report"
        );
    }
}

static REPORT_SINK: RwLock<Option<Arc<dyn ReportSink + Send + Sync>>> = RwLock::new(None);

/// Install the process-wide reporting sink
///
/// Takes effect immediately for all subsequent occurrences.
pub fn init(sink: Arc<dyn ReportSink + Send + Sync>) {
    let mut guard = REPORT_SINK.write().unwrap();
    *guard = Some(sink);
}

/// Remove the installed sink, restoring the logging fallback
pub fn clear_sink() {
    let mut guard = REPORT_SINK.write().unwrap();
    *guard = None;
}

/// Deliver a report through the installed sink, or the logging fallback
pub fn deliver(report: &ReportRecord) {
    let guard = REPORT_SINK.read().unwrap();
    if let Some(ref sink) = *guard {
        sink.deliver(report);
    } else {
        LogSink.deliver(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn record(event_id: &str) -> ReportRecord {
        ReportRecord {
            event_id: event_id.to_owned(),
            occur_time: 1,
            service_param: indexmap::IndexMap::new(),
        }
    }

    #[test]
    fn init_replaces_the_fallback_immediately() {
        let captured: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let sink_log = Arc::clone(&captured);
        init(Arc::new(move |report: &ReportRecord| {
            sink_log.lock().unwrap().push(report.event_id.clone());
        }));

        deliver(&record("e1"));
        deliver(&record("e2"));
        assert_eq!(*captured.lock().unwrap(), ["e1", "e2"]);

        // Back to the logging fallback; nothing else reaches the capture.
        clear_sink();
        deliver(&record("e3"));
        assert_eq!(captured.lock().unwrap().len(), 2);
    }
}
