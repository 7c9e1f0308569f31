// HTTP implementation of the battery repository
use crate::application::battery_repository::{ApiError, BatteryRepository};
use crate::domain::battery::BatteryStatus;
use crate::domain::telemetry::TelemetryMap;
use crate::infrastructure::config::ApiSettings;
use crate::infrastructure::telemetry_mapper::{TelemetryApiResponse, parse_telemetry_response};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Remote data client for the battery API. Both endpoints carry the
/// `x-api-key` header and the configured timeout; failed requests are never
/// retried.
pub struct HttpBatteryRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBatteryRepository {
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(&settings.key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        tracing::debug!(
            base_url = %settings.base_url,
            timeout_ms = settings.timeout_ms,
            retry_attempts = settings.retry_attempts,
            "Battery API client initialized"
        );

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, device_id: &str, resource: &str) -> String {
        format!("{}/v1/batteries/{}/{}", self.base_url, device_id, resource)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|error| {
            if error.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Transport(error.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|error| {
            if error.is_timeout() {
                ApiError::Timeout
            } else if error.is_decode() {
                ApiError::Parse(error.to_string())
            } else {
                ApiError::Transport(error.to_string())
            }
        })
    }
}

#[async_trait]
impl BatteryRepository for HttpBatteryRepository {
    async fn fetch_status(&self, device_id: &str) -> Result<BatteryStatus, ApiError> {
        tracing::debug!("Fetching battery status for device {}", device_id);
        self.execute(self.client.get(self.endpoint(device_id, "status")))
            .await
    }

    async fn fetch_telemetry(
        &self,
        device_id: &str,
        offset_minutes: i64,
    ) -> Result<TelemetryMap, ApiError> {
        tracing::debug!(
            "Fetching telemetry for device {} (offset {} minutes)",
            device_id,
            offset_minutes
        );
        let response: TelemetryApiResponse = self
            .execute(
                self.client
                    .get(self.endpoint(device_id, "telemetry"))
                    .query(&[("OffsetMinutes", offset_minutes)]),
            )
            .await?;

        Ok(parse_telemetry_response(response))
    }
}
