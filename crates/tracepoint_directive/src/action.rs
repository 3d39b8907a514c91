//! Imperative tracking for handler wrappers
//!
//! For call sites the directive cannot reach (programmatic navigation
//! handlers, imperative command callbacks), [`ActionTracker::track`]
//! wraps a target function: invoking the wrapper reports the occurrence
//! first, then runs the target, optionally after a fixed pause so the
//! report leaves the process before the target tears the page down.

use std::rc::Rc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracepoint_core::clock::{Clock, SystemClock};
use tracepoint_core::report::build_action_report;
use tracepoint_core::sink::{self, ReportSink};
use tracepoint_core::EventSpec;

/// Default pause between report dispatch and delayed target invocation
pub const ACTION_DELAY: Duration = Duration::from_millis(500);

/// Run a task once after a fixed delay
///
/// One-shot and detached: no handle, no cancellation.
pub fn defer<F>(delay: Duration, task: F)
where
    F: FnOnce() + Send + 'static,
{
    thread::spawn(move || {
        thread::sleep(delay);
        task();
    });
}

/// Wraps target functions with report-then-invoke behavior
pub struct ActionTracker {
    clock: Rc<dyn Clock>,
    sink: Option<Rc<dyn ReportSink>>,
    delay: Duration,
}

impl Default for ActionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionTracker {
    /// Create an action tracker on the system clock and the process-wide
    /// sink, with the default delay
    pub fn new() -> Self {
        Self {
            clock: Rc::new(SystemClock),
            sink: None,
            delay: ACTION_DELAY,
        }
    }

    /// Use a local sink instead of the process-wide one
    pub fn with_sink(mut self, sink: Rc<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Override the delayed-invocation pause
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Wrap `target` so each invocation reports before running it
    ///
    /// The returned closure takes the payload descriptor and a delay
    /// flag. The report carries only the descriptor's extra params (no
    /// reserved positions) with occurrence time "now". With the flag
    /// set, `target` runs with `args` after the configured pause on a
    /// one-shot timer thread; otherwise it runs immediately.
    pub fn track<A, F>(&self, args: A, target: F) -> impl FnMut(&EventSpec, bool)
    where
        A: Clone + Send + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        let clock = Rc::clone(&self.clock);
        let local_sink = self.sink.clone();
        let delay = self.delay;
        let target = Arc::new(target);

        move |spec: &EventSpec, delayed: bool| {
            let report = build_action_report(spec, clock.unix_seconds());
            match local_sink {
                Some(ref local) => local.deliver(&report),
                None => sink::deliver(&report),
            }

            let args = args.clone();
            if delayed {
                let target = Arc::clone(&target);
                defer(delay, move || target(args));
            } else {
                target(args);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Mutex;

    use tracepoint_core::{ManualClock, ReportRecord};

    #[test]
    fn reports_before_invoking_the_target() {
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let sink_log = Arc::clone(&log);
        let sink: Rc<dyn ReportSink> = Rc::new(move |_: &ReportRecord| {
            sink_log.lock().unwrap().push("report");
        });

        let clock = Rc::new(ManualClock::at(2000));
        let tracker = ActionTracker::new()
            .with_sink(sink)
            .with_clock(clock as Rc<dyn Clock>);

        let target_log = Arc::clone(&log);
        let mut go_home = tracker.track("/home", move |route| {
            assert_eq!(route, "/home");
            target_log.lock().unwrap().push("target");
        });

        go_home(&EventSpec::new("nav"), false);
        assert_eq!(*log.lock().unwrap(), ["report", "target"]);

        // Every invocation reports again.
        go_home(&EventSpec::new("nav"), false);
        assert_eq!(*log.lock().unwrap(), ["report", "target", "report", "target"]);
    }

    #[test]
    fn report_payload_is_params_only() {
        let captured: Arc<Mutex<Vec<ReportRecord>>> = Arc::new(Mutex::new(Vec::new()));

        let sink_capture = Arc::clone(&captured);
        let sink: Rc<dyn ReportSink> = Rc::new(move |report: &ReportRecord| {
            sink_capture.lock().unwrap().push(report.clone());
        });

        let clock = Rc::new(ManualClock::at(2000));
        let tracker = ActionTracker::new()
            .with_sink(sink)
            .with_clock(clock as Rc<dyn Clock>);

        let mut wrapped = tracker.track((), |()| {});
        wrapped(&EventSpec::new("nav").with_param("a").with_param(2), false);

        let reports = captured.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].event_id, "nav");
        assert_eq!(reports[0].occur_time, 2000);
        let keys: Vec<&str> = reports[0].service_param.keys().map(String::as_str).collect();
        assert_eq!(keys, ["p1", "p2"]);
    }

    #[test]
    fn delayed_invocation_runs_after_the_pause() {
        let (report_tx, report_rx) = mpsc::channel::<()>();
        let sink: Rc<dyn ReportSink> = Rc::new(move |_: &ReportRecord| {
            report_tx.send(()).unwrap();
        });

        let tracker = ActionTracker::new()
            .with_sink(sink)
            .with_delay(Duration::from_millis(20));

        let (target_tx, target_rx) = mpsc::channel::<&'static str>();
        let mut wrapped = tracker.track("/away", move |route| {
            target_tx.send(route).unwrap();
        });

        wrapped(&EventSpec::new("nav"), true);

        // The report is synchronous; the target has not run yet.
        report_rx.try_recv().unwrap();
        assert!(target_rx.try_recv().is_err());

        // The one-shot timer fires exactly once.
        assert_eq!(
            target_rx.recv_timeout(Duration::from_secs(2)).unwrap(),
            "/away"
        );
        assert!(target_rx
            .recv_timeout(Duration::from_millis(100))
            .is_err());
    }
}
