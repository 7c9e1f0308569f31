//! Battery Dashboard
//!
//! Monitoring service for a battery energy-storage device: fetches status
//! and telemetry from the remote battery API, derives display state, and
//! serves the dashboard over HTTP.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::dashboard_controller::DashboardController;
pub use application::dashboard_store::DashboardStore;
pub use infrastructure::http_repository::HttpBatteryRepository;
