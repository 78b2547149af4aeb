//! Metrics collection.
//!
//! # Metrics
//! - `otp_client_rpc_requests_total` (counter): RPC calls by method, outcome
//! - `otp_client_contract_calls_total` (counter): contract steps by function, outcome
//! - `otp_client_contract_call_duration_seconds` (histogram): step latency
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every update is a no-op, which is the case for the CLI
//! - Embedding applications install their own recorder/exporter

use std::time::Duration;

/// Result classification used as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
    Timeout,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Error => "error",
            Outcome::Timeout => "timeout",
        }
    }
}

/// Record a single RPC request.
pub fn record_rpc_call(method: &'static str, outcome: Outcome) {
    ::metrics::counter!(
        "otp_client_rpc_requests_total",
        "method" => method,
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record a contract step (call or confirmed transaction).
pub fn record_contract_call(function: &'static str, ok: bool, elapsed: Duration) {
    let outcome = if ok { Outcome::Ok } else { Outcome::Error };
    ::metrics::counter!(
        "otp_client_contract_calls_total",
        "function" => function,
        "outcome" => outcome.as_str()
    )
    .increment(1);
    ::metrics::histogram!(
        "otp_client_contract_call_duration_seconds",
        "function" => function
    )
    .record(elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::Mutex;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Ok.as_str(), "ok");
        assert_eq!(Outcome::Error.as_str(), "error");
        assert_eq!(Outcome::Timeout.as_str(), "timeout");
    }

    /// Captures `name{label=value,...}` for every registered metric.
    #[derive(Default)]
    struct CapturingRecorder {
        keys: Mutex<Vec<String>>,
    }

    impl CapturingRecorder {
        fn capture(&self, key: &Key) {
            let labels: Vec<String> = key
                .labels()
                .map(|l| format!("{}={}", l.key(), l.value()))
                .collect();
            self.keys
                .lock()
                .unwrap()
                .push(format!("{}{{{}}}", key.name(), labels.join(",")));
        }
    }

    impl Recorder for CapturingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.capture(key);
            Counter::noop()
        }

        fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
            self.capture(key);
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            self.capture(key);
            Histogram::noop()
        }
    }

    #[test]
    fn test_labels_recorded() {
        let recorder = CapturingRecorder::default();
        ::metrics::with_local_recorder(&recorder, || {
            record_rpc_call("eth_chainId", Outcome::Timeout);
            record_contract_call("generateOTP", false, Duration::from_millis(5));
        });

        assert_eq!(
            *recorder.keys.lock().unwrap(),
            vec![
                "otp_client_rpc_requests_total{method=eth_chainId,outcome=timeout}",
                "otp_client_contract_calls_total{function=generateOTP,outcome=error}",
                "otp_client_contract_call_duration_seconds{function=generateOTP}",
            ]
        );
    }
}
