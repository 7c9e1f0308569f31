// Mapper from the telemetry wire format to domain time series
use crate::domain::telemetry::{TelemetryMap, TimedValue};
use chrono::DateTime;
use serde::Deserialize;

/// Wire shape of `GET /v1/batteries/{id}/telemetry`.
#[derive(Debug, Deserialize)]
pub struct TelemetryApiResponse {
    pub series: Vec<TelemetrySeries>,
}

/// One named metric with `[epochMillis, value]` sample pairs.
#[derive(Debug, Deserialize)]
pub struct TelemetrySeries {
    pub name: String,
    pub data: Vec<(i64, f64)>,
}

/// Convert a wire response into the domain mapping, preserving per-series
/// sample order. Timestamps outside the representable range are skipped.
pub fn parse_telemetry_response(response: TelemetryApiResponse) -> TelemetryMap {
    let mut telemetry = TelemetryMap::new();
    for series in response.series {
        let points = series
            .data
            .into_iter()
            .filter_map(|(timestamp_ms, value)| {
                DateTime::from_timestamp_millis(timestamp_ms)
                    .map(|timestamp| TimedValue::new(timestamp, value))
            })
            .collect();
        telemetry.insert(series.name, points);
    }
    telemetry
}
