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

//! Scriptable in-memory [`SolarApi`] for orchestration tests.

use crate::client::SolarApi;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use solarsmart_types::{
    DashboardSummary, EnergyPoint, ForecastData, ForecastRequest, LiveSummary, Prediction,
    RetrainAck, ScenarioConfig, SimulationOutput,
};
use std::collections::HashMap;
use std::time::Duration;

type SimulationFn = Box<dyn Fn(&ScenarioConfig) -> ClientResult<f64> + Send + Sync>;
type DelayFn = Box<dyn Fn(&ScenarioConfig) -> Duration + Send + Sync>;

pub(crate) struct FakeApi {
    simulation: SimulationFn,
    simulation_delay: DelayFn,
    twin_delays: Mutex<HashMap<String, Duration>>,
    twin_failure: Mutex<Option<ClientError>>,
    retrain_failure: Mutex<Option<ClientError>>,
    forecast_failure: Mutex<Option<ClientError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self {
            simulation: Box::new(|_| Ok(10000.0)),
            simulation_delay: Box::new(|_| Duration::ZERO),
            twin_delays: Mutex::new(HashMap::new()),
            twin_failure: Mutex::new(None),
            retrain_failure: Mutex::new(None),
            forecast_failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_simulation(
        mut self,
        f: impl Fn(&ScenarioConfig) -> ClientResult<f64> + Send + Sync + 'static,
    ) -> Self {
        self.simulation = Box::new(f);
        self
    }

    pub(crate) fn with_simulation_delay(
        mut self,
        f: impl Fn(&ScenarioConfig) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.simulation_delay = Box::new(f);
        self
    }

    pub(crate) fn set_twin_delay(&self, location: &str, delay: Duration) {
        self.twin_delays.lock().insert(location.to_owned(), delay);
    }

    pub(crate) fn fail_twin(&self, error: Option<ClientError>) {
        *self.twin_failure.lock() = error;
    }

    pub(crate) fn fail_retrain(&self, error: ClientError) {
        *self.retrain_failure.lock() = Some(error);
    }

    pub(crate) fn fail_forecast(&self, error: ClientError) {
        *self.forecast_failure.lock() = Some(error);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub(crate) fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub(crate) fn simulation_calls(&self) -> usize {
        self.count_calls("simulate")
    }

    fn record(&self, call: String) -> usize {
        let mut calls = self.calls.lock();
        calls.push(call);
        calls.len()
    }
}

#[async_trait]
impl SolarApi for FakeApi {
    async fn dashboard_summary(&self) -> ClientResult<DashboardSummary> {
        self.record("dashboard".to_owned());
        Ok(DashboardSummary::default())
    }

    async fn twin_summary(&self, location: &str) -> ClientResult<LiveSummary> {
        let call_no = self.record(format!("twin:{location}"));
        let delay = self
            .twin_delays
            .lock()
            .get(location)
            .copied()
            .unwrap_or(Duration::ZERO);
        tokio::time::sleep(delay).await;

        if let Some(err) = self.twin_failure.lock().clone() {
            return Err(err);
        }

        Ok(LiveSummary {
            city: location.to_owned(),
            prediction: Prediction {
                predicted_power_mw: Some(call_no as f64),
            },
            ..Default::default()
        })
    }

    async fn retrain_model(&self, location: &str) -> ClientResult<RetrainAck> {
        self.record(format!("retrain:{location}"));
        tokio::time::sleep(Duration::from_millis(100)).await;

        match self.retrain_failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(RetrainAck {
                status: Some("success".to_owned()),
                message: Some(format!("Model retrained for {location}")),
            }),
        }
    }

    async fn forecast(&self, request: &ForecastRequest) -> ClientResult<ForecastData> {
        self.record(format!("forecast:{}", request.location));

        match self.forecast_failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(ForecastData {
                location: request.location.clone(),
                weather_data: Vec::new(),
                energy_forecast: (0..request.forecast_days)
                    .map(|day| EnergyPoint {
                        date: format!("day-{day}"),
                        predicted_output_kwh: Some(request.panel_capacity * 4.0),
                    })
                    .collect(),
            }),
        }
    }

    async fn simulate_scenario(&self, config: &ScenarioConfig) -> ClientResult<SimulationOutput> {
        self.record(format!("simulate:{}", config.num_panels));
        tokio::time::sleep((self.simulation_delay)(config)).await;

        (self.simulation)(config).map(|annual_output_kwh| SimulationOutput { annual_output_kwh })
    }

    fn name(&self) -> &str {
        "fake"
    }
}
