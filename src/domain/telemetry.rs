// Telemetry time-series domain models
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// One timestamped measurement within a named metric series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedValue {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl TimedValue {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    pub fn epoch_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// Metric name (e.g. "BatteryPowerW") to its ordered sequence of samples.
/// Per-series order is the response order; it is not re-sorted.
pub type TelemetryMap = HashMap<String, Vec<TimedValue>>;
