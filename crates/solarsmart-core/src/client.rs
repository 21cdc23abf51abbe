// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! SolarSmart analytics backend client.
//!
//! Every call makes exactly one attempt and returns a classified
//! [`ClientResult`]. Nothing panics or escapes past this boundary.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use solarsmart_types::{
    DashboardSummary, ForecastData, ForecastRequest, LiveSummary, RetrainAck, RetrainRequest,
    ScenarioConfig, SimulationOutput,
};
use std::time::Duration;
use tracing::{debug, error, trace};

pub const DASHBOARD_SUMMARY_PATH: &str = "/api/dashboard-summary";
pub const TWIN_SUMMARY_PATH: &str = "/api/ai-twin-summary";
pub const RETRAIN_MODEL_PATH: &str = "/api/retrain-model";
pub const FORECAST_PATH: &str = "/api/forecast";
pub const SIMULATE_SCENARIO_PATH: &str = "/api/simulate-scenario";

/// Remote analytics service as seen by the orchestration layer
#[async_trait]
pub trait SolarApi: Send + Sync {
    /// Fleet KPIs, daily energy trend and panel layout
    async fn dashboard_summary(&self) -> ClientResult<DashboardSummary>;

    /// Live twin snapshot for one location, raw readings newest first
    async fn twin_summary(&self, location: &str) -> ClientResult<LiveSummary>;

    /// Retrain the prediction model for a location
    async fn retrain_model(&self, location: &str) -> ClientResult<RetrainAck>;

    async fn forecast(&self, request: &ForecastRequest) -> ClientResult<ForecastData>;

    async fn simulate_scenario(&self, config: &ScenarioConfig) -> ClientResult<SimulationOutput>;

    /// Name for logging
    fn name(&self) -> &str;
}

/// reqwest-backed [`SolarApi`]
#[derive(Debug, Clone)]
pub struct SolarSmartClient {
    base_url: String,
    client: Client,
}

impl SolarSmartClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(ClientError::Config("base URL must not be empty".to_owned()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!("🌐 [API GET] {}", path);
        let url = format!("{}{}", self.base_url, path);
        let body = self.execute(path, self.client.get(&url)).await?;
        decode(path, &body)
    }

    /// POST `body` as JSON to `path` and decode the JSON response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        debug!("🌐 [API POST] {}", path);
        let url = format!("{}{}", self.base_url, path);
        let body = self.execute(path, self.client.post(&url).json(body)).await?;
        decode(path, &body)
    }

    /// Send the request once and return the body of a 2xx response
    async fn execute(&self, path: &str, request: RequestBuilder) -> ClientResult<String> {
        let response = request.send().await.map_err(|e| {
            error!("❌ [API] {} unreachable: {}", path, e);
            ClientError::Transport {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("❌ [API] {} body read failed: {}", path, e);
            ClientError::Transport {
                reason: e.to_string(),
            }
        })?;

        if status.is_success() {
            trace!("   {} -> {} ({} bytes)", path, status, body.len());
            return Ok(body);
        }

        let detail = error_detail(status, &body);
        error!("❌ [API] {} failed with status {}: {}", path, status, detail);
        Err(ClientError::Server {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl SolarApi for SolarSmartClient {
    async fn dashboard_summary(&self) -> ClientResult<DashboardSummary> {
        self.get(DASHBOARD_SUMMARY_PATH).await
    }

    async fn twin_summary(&self, location: &str) -> ClientResult<LiveSummary> {
        let path = format!("{}/{}", TWIN_SUMMARY_PATH, urlencoding::encode(location));
        let mut summary: LiveSummary = self.get(&path).await?;
        summary.sort_readings_newest_first();
        Ok(summary)
    }

    async fn retrain_model(&self, location: &str) -> ClientResult<RetrainAck> {
        let request = RetrainRequest {
            location: location.to_owned(),
        };
        debug!("🌐 [API POST] {}", RETRAIN_MODEL_PATH);
        let url = format!("{}{}", self.base_url, RETRAIN_MODEL_PATH);
        let body = self
            .execute(RETRAIN_MODEL_PATH, self.client.post(&url).json(&request))
            .await?;

        // Success is signalled by the status alone
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    async fn forecast(&self, request: &ForecastRequest) -> ClientResult<ForecastData> {
        self.post(FORECAST_PATH, request).await
    }

    async fn simulate_scenario(&self, config: &ScenarioConfig) -> ClientResult<SimulationOutput> {
        self.post(SIMULATE_SCENARIO_PATH, config).await
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|e| {
        error!("❌ [API] {} returned an unexpected body: {}", path, e);
        ClientError::Decode {
            path: path.to_owned(),
            reason: e.to_string(),
        }
    })
}

/// Human-readable failure reason of a non-2xx response.
///
/// A string `detail` is used verbatim, a structured one is serialized.
/// Without a usable detail the status text is returned.
fn error_detail(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|mut v| v.get_mut("detail").map(Value::take));

    match detail {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(v @ (Value::Object(_) | Value::Array(_) | Value::Number(_) | Value::Bool(_))) => {
            v.to_string()
        }
        Some(Value::String(_) | Value::Null) | None => status
            .canonical_reason()
            .map_or_else(|| status.as_str().to_owned(), str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use solarsmart_types::CleaningFrequency;

    fn client(url: String) -> SolarSmartClient {
        SolarSmartClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_simulate_scenario_posts_full_config() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", SIMULATE_SCENARIO_PATH)
            .match_body(Matcher::Json(json!({
                "num_panels": 70,
                "panel_wattage": 400,
                "tilt_angle": 21.0,
                "latitude": 21.1,
                "azimuth": 180.0,
                "shading_factor": 5.0,
                "cleaning_frequency": "Quarterly",
                "degradation_rate": 0.5
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "annual_output_kwh": 14000.0 }).to_string())
            .create_async()
            .await;

        let config = ScenarioConfig::default()
            .with_num_panels(70)
            .with_cleaning_frequency(CleaningFrequency::Quarterly);
        let output = client(server.url()).simulate_scenario(&config).await.unwrap();

        assert_eq!(output.annual_output_kwh, 14000.0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_twin_summary_encodes_location_and_orders_readings() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/ai-twin-summary/New%20Delhi")
            .with_status(200)
            .with_body(
                json!({
                    "city": "New Delhi",
                    "raw_readings": [
                        { "created_at": "2025-10-02T10:00:00+00:00", "power": 0.010 },
                        { "created_at": "2025-10-02T10:05:00+00:00", "power": 0.012 }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let summary = client(server.url()).twin_summary("New Delhi").await.unwrap();

        assert_eq!(summary.city, "New Delhi");
        assert_eq!(summary.raw_readings[0].power, Some(0.012));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_uses_string_detail() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/ai-twin-summary/Atlantis")
            .with_status(404)
            .with_body(json!({ "detail": "Location not found: Atlantis" }).to_string())
            .create_async()
            .await;

        let err = client(server.url()).twin_summary("Atlantis").await.unwrap_err();

        assert_eq!(
            err,
            ClientError::Server {
                status: 404,
                detail: "Location not found: Atlantis".to_owned()
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_serializes_structured_detail() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", FORECAST_PATH)
            .with_status(422)
            .with_body(
                json!({ "detail": [{ "loc": ["body", "forecast_days"], "msg": "field required" }] })
                    .to_string(),
            )
            .create_async()
            .await;

        let request = ForecastRequest {
            location: "Mumbai".to_owned(),
            forecast_days: 7,
            panel_capacity: 5.0,
            panel_efficiency: 18.5,
        };
        let err = client(server.url()).forecast(&request).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            r#"[{"loc":["body","forecast_days"],"msg":"field required"}]"#
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_without_detail_uses_status_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", DASHBOARD_SUMMARY_PATH)
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let err = client(server.url()).dashboard_summary().await.unwrap_err();

        assert_eq!(err.to_string(), "Service Unavailable");
        assert_eq!(err.status(), Some(503));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", SIMULATE_SCENARIO_PATH)
            .with_status(200)
            .with_body(json!({ "output": 1 }).to_string())
            .create_async()
            .await;

        let err = client(server.url())
            .simulate_scenario(&ScenarioConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode { .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_retrain_ignores_body_shape() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", RETRAIN_MODEL_PATH)
            .match_body(Matcher::Json(json!({ "location": "Pune" })))
            .with_status(200)
            .with_body("null")
            .expect(1)
            .create_async()
            .await;

        let ack = client(server.url()).retrain_model("Pune").await.unwrap();

        assert_eq!(ack, RetrainAck::default());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Nothing listens on the discard port
        let err = client("http://127.0.0.1:9".to_owned())
            .dashboard_summary()
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.to_string(), crate::error::CONNECTIVITY_MESSAGE);
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let result = SolarSmartClient::new("", Duration::from_secs(1));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client("http://localhost:8000/".to_owned());
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
