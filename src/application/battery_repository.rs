// Repository trait for battery data access
use crate::domain::battery::BatteryStatus;
use crate::domain::telemetry::TelemetryMap;
use async_trait::async_trait;

/// Failure modes of the remote battery API. The controller converts all of
/// these into a single user-visible message; only logs carry the detail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,

    #[error("server returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait BatteryRepository: Send + Sync {
    /// Fetch the current battery status snapshot for a device.
    async fn fetch_status(&self, device_id: &str) -> Result<BatteryStatus, ApiError>;

    /// Fetch historical telemetry for a device. `offset_minutes` is negative,
    /// meaning "look back N minutes from now" (-60 = last hour).
    async fn fetch_telemetry(
        &self,
        device_id: &str,
        offset_minutes: i64,
    ) -> Result<TelemetryMap, ApiError>;
}
