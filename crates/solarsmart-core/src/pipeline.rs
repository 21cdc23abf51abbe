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

use crate::client::SolarApi;
use crate::error::PipelineError;
use crate::selector::SelectorContext;
use solarsmart_types::{ForecastData, ForecastRequest};
use std::sync::Arc;
use tracing::{error, info};

/// Retrains the model for a location, then forecasts with it.
///
/// The forecast is only requested once retraining has succeeded. A successful
/// retrain also makes the location the active one for the live view.
pub struct RetrainForecastPipeline {
    api: Arc<dyn SolarApi>,
    selector: SelectorContext,
}

impl std::fmt::Debug for RetrainForecastPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrainForecastPipeline")
            .field("api", &self.api.name())
            .field("selector", &self.selector)
            .finish()
    }
}

impl RetrainForecastPipeline {
    pub fn new(api: Arc<dyn SolarApi>, selector: SelectorContext) -> Self {
        Self { api, selector }
    }

    pub async fn run(&self, request: &ForecastRequest) -> Result<ForecastData, PipelineError> {
        // Retrain, selection and forecast all use the same trimmed location
        let request = ForecastRequest {
            location: request.location.trim().to_owned(),
            ..request.clone()
        };
        let location = request.location.as_str();
        info!("🧠 [PIPELINE] Retraining model for '{}'", location);

        let ack = self.api.retrain_model(location).await.map_err(|e| {
            error!("❌ [PIPELINE] Retraining for '{}' failed: {}", location, e);
            PipelineError::Retrain(e)
        })?;
        if let Some(message) = ack.message {
            info!("   {}", message);
        }

        self.selector.set(location);

        info!(
            "📈 [PIPELINE] Forecasting {} days for '{}'",
            request.forecast_days, location
        );
        let forecast = self.api.forecast(&request).await.map_err(|e| {
            error!("❌ [PIPELINE] Forecast for '{}' failed: {}", location, e);
            PipelineError::Forecast(e)
        })?;

        info!(
            "✅ [PIPELINE] Forecast ready: {} days, {:.1} kWh total",
            forecast.energy_forecast.len(),
            forecast.total_output_kwh()
        );
        Ok(forecast)
    }
}
