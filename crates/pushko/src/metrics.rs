//! Request instrumentation.
//!
//! Uses the `metrics` facade. Nothing is recorded unless the application
//! installs a recorder (for example a Prometheus exporter).

use metrics::{counter, histogram};
use std::time::Instant;

/// Metric names.
pub mod names {
    pub const REQUESTS_TOTAL: &str = "pushko_requests_total";
    pub const SOFT_FAILURES_TOTAL: &str = "pushko_soft_failures_total";
    pub const ERRORS_TOTAL: &str = "pushko_errors_total";
    pub const LATENCY_SECONDS: &str = "pushko_request_latency_seconds";
}

/// Describe all client metrics to the installed recorder.
pub fn describe_metrics() {
    metrics::describe_counter!(
        names::REQUESTS_TOTAL,
        "Total number of requests sent to the service"
    );
    metrics::describe_counter!(
        names::SOFT_FAILURES_TOTAL,
        "Requests the service answered without accepting them"
    );
    metrics::describe_counter!(
        names::ERRORS_TOTAL,
        "Requests that failed in the transport"
    );
    metrics::describe_histogram!(
        names::LATENCY_SECONDS,
        "Round-trip request latency in seconds"
    );
}

/// Record a soft failure (non-accepted trigger, non-200 query).
pub fn record_soft_failure(operation: &'static str) {
    counter!(names::SOFT_FAILURES_TOTAL, "operation" => operation).increment(1);
}

/// Record a transport failure.
pub fn record_error(operation: &'static str) {
    counter!(names::ERRORS_TOTAL, "operation" => operation).increment(1);
}

/// Guard that records a request on creation and its latency on drop.
pub struct RequestTimer {
    operation: &'static str,
    started: Instant,
}

impl RequestTimer {
    /// Start timing a request.
    #[must_use]
    pub fn start(operation: &'static str) -> Self {
        counter!(names::REQUESTS_TOTAL, "operation" => operation).increment(1);
        Self {
            operation,
            started: Instant::now(),
        }
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        histogram!(names::LATENCY_SECONDS, "operation" => self.operation)
            .record(self.started.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_without_recorder() {
        // No recorder installed: every call is a no-op and must not panic.
        describe_metrics();
        let _timer = RequestTimer::start("trigger");
        record_soft_failure("trigger");
        record_error("trigger");
    }
}
