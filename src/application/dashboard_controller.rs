// Dashboard controller - fetch orchestration and refresh lifecycle
use crate::application::battery_repository::BatteryRepository;
use crate::application::dashboard_store::DashboardStore;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Lookback window for a telemetry query, expressed as minutes before now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timeframe {
    #[default]
    LastHour,
    LastDay,
    LastWeek,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Self::LastHour, Self::LastDay, Self::LastWeek];

    pub fn offset_minutes(self) -> i64 {
        match self {
            Self::LastHour => -60,
            Self::LastDay => -1440,
            Self::LastWeek => -10080,
        }
    }

    pub fn from_offset_minutes(minutes: i64) -> Option<Self> {
        match minutes {
            -60 => Some(Self::LastHour),
            -1440 => Some(Self::LastDay),
            -10080 => Some(Self::LastWeek),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LastHour => "Last Hour",
            Self::LastDay => "Last Day",
            Self::LastWeek => "Last Week",
        }
    }
}

/// Transient UI state owned by the controller, not the shared store.
#[derive(Default)]
struct UiState {
    timeframe: Timeframe,
    auto_refresh_enabled: bool,
    refresh_task: Option<JoinHandle<()>>,
}

struct ControllerInner {
    repository: Arc<dyn BatteryRepository>,
    store: DashboardStore,
    refresh_period: Duration,
    ui: Mutex<UiState>,
}

/// Orchestrates loads into the store: load-on-init, load-on-timeframe-change,
/// and the auto-refresh timer. All fetch failures are converted into store
/// updates; nothing propagates to callers.
#[derive(Clone)]
pub struct DashboardController {
    inner: Arc<ControllerInner>,
}

impl DashboardController {
    pub fn new(
        repository: Arc<dyn BatteryRepository>,
        store: DashboardStore,
        refresh_period: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                repository,
                store,
                refresh_period,
                ui: Mutex::new(UiState::default()),
            }),
        }
    }

    pub fn timeframe(&self) -> Timeframe {
        self.inner.ui.lock().unwrap().timeframe
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.inner.ui.lock().unwrap().auto_refresh_enabled
    }

    /// Full reload: status and telemetry, concurrently and unordered. Each
    /// completion updates only its own store fields.
    pub async fn load_data(&self) {
        tokio::join!(self.load_battery_status(), self.load_telemetry());
    }

    pub async fn load_battery_status(&self) {
        let store = &self.inner.store;
        store.set_loading(true);
        store.clear_error();

        let device_id = store.selected_device_id();
        match self.inner.repository.fetch_status(&device_id).await {
            Ok(status) => {
                store.update_status_from_fetch(status);
                store.set_loading(false);
            }
            Err(error) => store.report_failure(&error, "Load battery status"),
        }
    }

    pub async fn load_telemetry(&self) {
        let device_id = self.inner.store.selected_device_id();
        let offset_minutes = self.timeframe().offset_minutes();
        match self
            .inner
            .repository
            .fetch_telemetry(&device_id, offset_minutes)
            .await
        {
            Ok(telemetry) => self.inner.store.set_telemetry(telemetry),
            Err(error) => self.inner.store.report_failure(&error, "Load telemetry data"),
        }
    }

    /// Select a new lookback window. A changed value triggers exactly one
    /// telemetry fetch; the status is not refetched.
    pub async fn set_timeframe(&self, timeframe: Timeframe) {
        {
            let mut ui = self.inner.ui.lock().unwrap();
            if ui.timeframe == timeframe {
                return;
            }
            ui.timeframe = timeframe;
        }
        self.load_telemetry().await;
    }

    pub fn toggle_auto_refresh(&self) -> bool {
        let enabled = !self.auto_refresh_enabled();
        self.set_auto_refresh(enabled);
        enabled
    }

    /// Enable or disable the repeating full reload. Only transitions have an
    /// effect; disabling an already-stopped timer is a no-op.
    pub fn set_auto_refresh(&self, enabled: bool) {
        let mut ui = self.inner.ui.lock().unwrap();
        if ui.auto_refresh_enabled == enabled {
            return;
        }
        ui.auto_refresh_enabled = enabled;

        if enabled {
            ui.refresh_task = Some(self.spawn_refresh_task());
        } else if let Some(task) = ui.refresh_task.take() {
            task.abort();
        }
    }

    /// Tear down the refresh lifecycle, abandoning any reload in flight on
    /// the timer task. Safe to call more than once.
    pub fn shutdown(&self) {
        self.set_auto_refresh(false);
    }

    fn spawn_refresh_task(&self) -> JoinHandle<()> {
        let inner = Arc::downgrade(&self.inner);
        let period = self.inner.refresh_period;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately; the first reload belongs
            // one full period after enabling.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(inner) = inner.upgrade() else { break };
                DashboardController { inner }.load_data().await;
            }
        })
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        if let Ok(ui) = self.ui.get_mut() {
            if let Some(task) = ui.refresh_task.take() {
                task.abort();
            }
        }
    }
}
