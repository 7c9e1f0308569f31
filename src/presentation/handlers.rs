// HTTP request handlers
use crate::application::dashboard_controller::Timeframe;
use crate::domain::battery::{BatteryStatus, BatteryStatusType};
use crate::presentation::app_state::AppState;
use crate::presentation::chart::{ChartOptions, chart_options};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeOption {
    pub label: &'static str,
    pub minutes: i64,
}

/// Read-only view of the dashboard: raw state plus every derived value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub status: Option<BatteryStatus>,
    pub status_type: BatteryStatusType,
    pub status_color: &'static str,
    pub battery_percentage: i64,
    pub selected_device_id: String,
    pub is_loading: bool,
    pub error_message: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub selected_timeframe_minutes: i64,
    pub auto_refresh_enabled: bool,
    pub timeframe_options: Vec<TimeframeOption>,
}

#[derive(Debug, Deserialize)]
pub struct TimeframeRequest {
    pub minutes: i64,
}

#[derive(Debug, Serialize)]
pub struct AutoRefreshResponse {
    pub enabled: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard state with derived classification values.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(build_snapshot(&state))
}

/// Chart payload for the power time-series widget.
pub async fn get_chart(State(state): State<Arc<AppState>>) -> Json<ChartOptions> {
    Json(chart_options(&state.store.telemetry(), state.max_data_points))
}

/// Select a new telemetry lookback window.
pub async fn set_timeframe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TimeframeRequest>,
) -> impl IntoResponse {
    match Timeframe::from_offset_minutes(request.minutes) {
        Some(timeframe) => {
            state.controller.set_timeframe(timeframe).await;
            StatusCode::NO_CONTENT.into_response()
        }
        None => (StatusCode::BAD_REQUEST, "unsupported timeframe").into_response(),
    }
}

/// Flip auto-refresh and report the new state.
pub async fn toggle_auto_refresh(State(state): State<Arc<AppState>>) -> Json<AutoRefreshResponse> {
    Json(AutoRefreshResponse {
        enabled: state.controller.toggle_auto_refresh(),
    })
}

fn build_snapshot(state: &AppState) -> DashboardSnapshot {
    let store = &state.store;
    let current = store.snapshot();

    DashboardSnapshot {
        status_type: store.status_type(),
        status_color: store.status_color(),
        battery_percentage: store.battery_percentage(),
        selected_device_id: current.selected_device_id,
        is_loading: current.is_loading,
        error_message: current.error_message,
        last_updated: current.last_updated,
        status: current.status,
        selected_timeframe_minutes: state.controller.timeframe().offset_minutes(),
        auto_refresh_enabled: state.controller.auto_refresh_enabled(),
        timeframe_options: Timeframe::ALL
            .into_iter()
            .map(|timeframe| TimeframeOption {
                label: timeframe.label(),
                minutes: timeframe.offset_minutes(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::battery_repository::{ApiError, BatteryRepository};
    use crate::application::dashboard_controller::DashboardController;
    use crate::application::dashboard_store::DashboardStore;
    use crate::domain::telemetry::TelemetryMap;
    use async_trait::async_trait;
    use std::time::Duration;

    struct NullRepository;

    #[async_trait]
    impl BatteryRepository for NullRepository {
        async fn fetch_status(&self, _device_id: &str) -> Result<BatteryStatus, ApiError> {
            Err(ApiError::Transport("offline".to_string()))
        }

        async fn fetch_telemetry(
            &self,
            _device_id: &str,
            _offset_minutes: i64,
        ) -> Result<TelemetryMap, ApiError> {
            Err(ApiError::Transport("offline".to_string()))
        }
    }

    fn app_state() -> AppState {
        let store = DashboardStore::new();
        let controller = DashboardController::new(
            Arc::new(NullRepository),
            store.clone(),
            Duration::from_secs(30),
        );
        AppState {
            store,
            controller,
            max_data_points: 100,
        }
    }

    fn sample_status() -> BatteryStatus {
        BatteryStatus {
            log_time: Utc::now(),
            battery_energy_lifetime_import_kwh: 1000.0,
            battery_energy_lifetime_export_kwh: 900.0,
            battery_power_kw: -5.0,
            battery_power_setpoint_kw: -5.0,
            cycle_count_day: 0.5,
            cycle_count_ytd: 80.0,
            cycle_count_lifetime: 400.0,
            available_charge_power_kw: 35.0,
            available_discharge_power_kw: 65.0,
            charge_capacity_remaining_kwh: 50.0,
        }
    }

    #[test]
    fn test_snapshot_serializes_wire_field_names() {
        let state = app_state();
        state.store.set_status(Some(sample_status()));

        let value = serde_json::to_value(build_snapshot(&state)).unwrap();

        assert_eq!(value["statusType"], "Partially Available");
        assert_eq!(value["statusColor"], "#009fe3");
        assert_eq!(value["batteryPercentage"], 50);
        assert_eq!(value["selectedDeviceId"], "23.32.003");
        assert_eq!(value["isLoading"], false);
        assert_eq!(value["selectedTimeframeMinutes"], -60);
        assert_eq!(value["autoRefreshEnabled"], false);
        assert_eq!(value["status"]["availableDischargePowerKw"], 65.0);
        assert_eq!(value["timeframeOptions"][1]["minutes"], -1440);
        assert_eq!(value["timeframeOptions"][1]["label"], "Last Day");
    }

    #[test]
    fn test_snapshot_without_status() {
        let state = app_state();

        let snapshot = build_snapshot(&state);

        assert!(snapshot.status.is_none());
        assert_eq!(snapshot.status_type, BatteryStatusType::NotAvailable);
        assert_eq!(snapshot.status_color, "#e74c3c");
        assert_eq!(snapshot.battery_percentage, 0);
    }
}
