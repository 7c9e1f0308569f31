// Dashboard state store - single owner of the shared dashboard state
use crate::application::battery_repository::ApiError;
use crate::domain::battery::{BatteryStatus, BatteryStatusType, battery_percentage};
use crate::domain::telemetry::TelemetryMap;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

/// Device selected when no explicit selection has been made.
pub const DEFAULT_DEVICE_ID: &str = "23.32.003";

/// The canonical dashboard state. Created once at startup, mutated only
/// through [`DashboardStore`] operations, alive for the process lifetime.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub status: Option<BatteryStatus>,
    pub telemetry: TelemetryMap,
    pub selected_device_id: String,
    pub is_loading: bool,
    pub error_message: String,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            status: None,
            telemetry: TelemetryMap::new(),
            selected_device_id: DEFAULT_DEVICE_ID.to_string(),
            is_loading: false,
            error_message: String::new(),
            last_updated: None,
        }
    }
}

/// Observable state container backed by a watch channel. Every mutation
/// notifies all subscribed observers; derived values are pure functions
/// recomputed on read and never stored.
#[derive(Clone)]
pub struct DashboardStore {
    state: Arc<watch::Sender<DashboardState>>,
}

impl DashboardStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Observe every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> Option<BatteryStatus> {
        self.state.borrow().status.clone()
    }

    pub fn telemetry(&self) -> TelemetryMap {
        self.state.borrow().telemetry.clone()
    }

    pub fn selected_device_id(&self) -> String {
        self.state.borrow().selected_device_id.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error_message(&self) -> String {
        self.state.borrow().error_message.clone()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().last_updated
    }

    /// Replace the status snapshot and stamp the update time.
    pub fn set_status(&self, status: Option<BatteryStatus>) {
        self.state.send_modify(|state| {
            state.status = status;
            state.last_updated = Some(Utc::now());
        });
    }

    /// Replace the telemetry mapping wholesale.
    pub fn set_telemetry(&self, telemetry: TelemetryMap) {
        self.state.send_modify(|state| state.telemetry = telemetry);
    }

    pub fn set_device_id(&self, device_id: String) {
        self.state
            .send_modify(|state| state.selected_device_id = device_id);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.send_modify(|state| state.is_loading = loading);
    }

    pub fn set_error(&self, message: String) {
        self.state.send_modify(|state| state.error_message = message);
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error_message.clear());
    }

    /// Apply a successfully fetched status: clear any stale error first.
    pub fn update_status_from_fetch(&self, status: BatteryStatus) {
        self.clear_error();
        self.set_status(Some(status));
    }

    /// Record a failed fetch: log the cause for diagnostics and leave the
    /// user-visible state consistent (error message set, loading cleared).
    pub fn report_failure(&self, error: &ApiError, context: &str) {
        tracing::error!("Error in {}: {}", context, error);
        self.set_error(format!(
            "Failed to {}. Please try again.",
            context.to_lowercase()
        ));
        self.set_loading(false);
    }

    // Derived state - recomputed on read, never stored.

    pub fn status_type(&self) -> BatteryStatusType {
        BatteryStatusType::classify(self.state.borrow().status.as_ref())
    }

    pub fn status_color(&self) -> &'static str {
        self.status_type().color()
    }

    pub fn battery_percentage(&self) -> i64 {
        battery_percentage(self.state.borrow().status.as_ref())
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}
