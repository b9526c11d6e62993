use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::Config,
    model::{Query, WeatherReport},
};

/// Fallback shown when the backend rejects a lookup without saying why.
pub const FETCH_FAILED: &str = "Failed to fetch weather data";

/// Lookup errors.
///
/// Every variant's `Display` text is suitable for showing to the user
/// directly; the session layer surfaces it verbatim as the error banner.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained: connection refused, DNS failure, etc.
    #[error("Failed to connect to weather service")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-success status. `message` is the
    /// body's `error` field when present, [`FETCH_FAILED`] otherwise.
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    /// The backend answered successfully but the body did not match the
    /// expected shape.
    #[error("Failed to parse weather data")]
    Decode(#[source] serde_json::Error),
}

/// Anything that can answer a weather lookup.
///
/// Implemented by [`ApiClient`]; session tests substitute their own.
#[async_trait]
pub trait WeatherBackend: Send + Sync + std::fmt::Debug {
    async fn get_weather(&self, query: &Query) -> Result<WeatherReport, ApiError>;
}

/// HTTP client for the weather lookup backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PingBody {
    message: String,
}

impl ApiClient {
    /// Build a client for the configured endpoint.
    ///
    /// When `timeout_secs` is unset, no request timeout is applied and the
    /// transport's own defaults decide.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        let http = builder.build().map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Hit the backend's test route and return its greeting message.
    pub async fn ping(&self) -> Result<String, ApiError> {
        let url = format!("{}/api/test", self.endpoint);
        debug!(url = %url, "pinging backend");

        let res = self.http.get(&url).send().await.map_err(ApiError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(ApiError::Transport)?;

        if !status.is_success() {
            return Err(ApiError::Server { status, message: server_message(&body) });
        }

        let parsed: PingBody = serde_json::from_str(&body).map_err(ApiError::Decode)?;
        Ok(parsed.message)
    }
}

#[async_trait]
impl WeatherBackend for ApiClient {
    async fn get_weather(&self, query: &Query) -> Result<WeatherReport, ApiError> {
        let url = format!("{}/api/get_weather", self.endpoint);
        debug!(url = %url, location = %query.text(), mode = %query.mode(), "fetching weather");

        let res = self
            .http
            .get(&url)
            .query(&[("location", query.text()), ("type", query.mode().as_param())])
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(ApiError::Transport)?;

        if !status.is_success() {
            return Err(ApiError::Server { status, message: server_message(&body) });
        }

        serde_json::from_str(&body).map_err(ApiError::Decode)
    }
}

/// Extract the backend's error message from a failure body, falling back to
/// the generic message when the field is missing or the body is not JSON.
fn server_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| FETCH_FAILED.to_string())
}
