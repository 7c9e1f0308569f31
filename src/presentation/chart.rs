// Chart payload for the power time-series widget
use crate::domain::telemetry::TelemetryMap;
use serde::Serialize;

const BATTERY_POWER_METRIC: &str = "BatteryPowerW";
const GRID_POWER_METRIC: &str = "GridPowerW";

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub name: &'static str,
    pub data: Vec<(i64, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrokeSpec {
    pub width: u32,
    pub curve: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisSpec {
    /// Zero renders axis labels as integers.
    pub decimals_in_float: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleSpec {
    pub text: &'static str,
    pub align: &'static str,
}

/// Options object consumed by the charting widget.
#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub series: Vec<ChartSeries>,
    pub chart: ChartSpec,
    pub stroke: StrokeSpec,
    pub colors: Vec<&'static str>,
    pub xaxis: AxisSpec,
    pub yaxis: YAxisSpec,
    pub title: TitleSpec,
}

/// Project the telemetry mapping into the two-series chart payload. Missing
/// metrics yield empty series; oversized series are downsampled.
pub fn chart_options(telemetry: &TelemetryMap, max_points: usize) -> ChartOptions {
    ChartOptions {
        series: vec![
            ChartSeries {
                name: "Battery Power (W)",
                data: series_points(telemetry, BATTERY_POWER_METRIC, max_points),
            },
            ChartSeries {
                name: "Grid Power (W)",
                data: series_points(telemetry, GRID_POWER_METRIC, max_points),
            },
        ],
        chart: ChartSpec {
            kind: "line",
            height: 350,
        },
        stroke: StrokeSpec {
            width: 2,
            curve: "smooth",
        },
        colors: vec!["#009fe3", "#00b140"],
        xaxis: AxisSpec { kind: "datetime" },
        yaxis: YAxisSpec {
            decimals_in_float: 0,
        },
        title: TitleSpec {
            text: "Battery & Grid Power",
            align: "left",
        },
    }
}

fn series_points(telemetry: &TelemetryMap, metric: &str, max_points: usize) -> Vec<(i64, f64)> {
    let points: Vec<(i64, f64)> = telemetry
        .get(metric)
        .map(|points| {
            points
                .iter()
                .map(|point| (point.epoch_millis(), point.value))
                .collect()
        })
        .unwrap_or_default();

    downsample_points(points, max_points)
}

/// Downsample by bucket averaging: middle point's timestamp, mean value.
fn downsample_points(points: Vec<(i64, f64)>, max_points: usize) -> Vec<(i64, f64)> {
    if max_points == 0 || points.len() <= max_points {
        return points;
    }

    let bucket_size = (points.len() as f64 / max_points as f64).ceil() as usize;
    let mut downsampled = Vec::with_capacity(max_points);

    for chunk in points.chunks(bucket_size) {
        let mid_idx = chunk.len() / 2;
        let avg_value = chunk.iter().map(|(_, value)| value).sum::<f64>() / chunk.len() as f64;
        downsampled.push((chunk[mid_idx].0, avg_value));
    }

    downsampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::TimedValue;
    use chrono::DateTime;

    fn telemetry_with(metric: &str, samples: &[(i64, f64)]) -> TelemetryMap {
        let mut telemetry = TelemetryMap::new();
        telemetry.insert(
            metric.to_string(),
            samples
                .iter()
                .map(|&(millis, value)| {
                    TimedValue::new(DateTime::from_timestamp_millis(millis).unwrap(), value)
                })
                .collect(),
        );
        telemetry
    }

    #[test]
    fn test_chart_options_shape() {
        let options = chart_options(&TelemetryMap::new(), 100);

        assert_eq!(options.series.len(), 2);
        assert_eq!(options.series[0].name, "Battery Power (W)");
        assert_eq!(options.series[1].name, "Grid Power (W)");
        assert_eq!(options.colors, vec!["#009fe3", "#00b140"]);
        assert_eq!(options.chart.kind, "line");
        assert_eq!(options.xaxis.kind, "datetime");
        assert_eq!(options.title.text, "Battery & Grid Power");
    }

    #[test]
    fn test_missing_metrics_yield_empty_series() {
        let telemetry = telemetry_with("SomethingElseW", &[(1000, 1.0)]);
        let options = chart_options(&telemetry, 100);

        assert!(options.series[0].data.is_empty());
        assert!(options.series[1].data.is_empty());
    }

    #[test]
    fn test_points_are_epoch_millis_value_pairs() {
        let telemetry = telemetry_with("BatteryPowerW", &[(1000, 5.0), (2000, 7.0)]);
        let options = chart_options(&telemetry, 100);

        assert_eq!(options.series[0].data, vec![(1000, 5.0), (2000, 7.0)]);
    }

    #[test]
    fn test_downsampling_buckets_by_average() {
        let samples: Vec<(i64, f64)> = (0..10).map(|i| (i * 1000, i as f64)).collect();
        let telemetry = telemetry_with("GridPowerW", &samples);

        let options = chart_options(&telemetry, 5);
        let data = &options.series[1].data;

        assert_eq!(data.len(), 5);
        // First bucket holds samples 0 and 1: middle timestamp, mean value.
        assert_eq!(data[0], (1000, 0.5));
        assert_eq!(data[4], (9000, 8.5));
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(chart_options(&TelemetryMap::new(), 100)).unwrap();

        assert_eq!(value["chart"]["type"], "line");
        assert_eq!(value["yaxis"]["decimalsInFloat"], 0);
        assert_eq!(value["stroke"]["curve"], "smooth");
        assert_eq!(value["series"][0]["name"], "Battery Power (W)");
    }
}
