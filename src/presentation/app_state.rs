// Application state for HTTP handlers
use crate::application::dashboard_controller::DashboardController;
use crate::application::dashboard_store::DashboardStore;

#[derive(Clone)]
pub struct AppState {
    pub store: DashboardStore,
    pub controller: DashboardController,
    pub max_data_points: usize,
}
