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

use serde::{Deserialize, Serialize};

/// Body of `POST /api/retrain-model`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrainRequest {
    pub location: String,
}

/// Acknowledgement of a successful retrain. Both fields are informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrainAck {
    pub status: Option<String>,
    pub message: Option<String>,
}

/// Body of `POST /api/forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub location: String,
    pub forecast_days: u32,
    /// Installed capacity (kW)
    pub panel_capacity: f64,
    /// Panel efficiency (%)
    pub panel_efficiency: f64,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            location: "Mumbai".to_owned(),
            forecast_days: 7,
            panel_capacity: 5.0,
            panel_efficiency: 18.5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherPoint {
    pub date: String,
    pub temperature: Option<f64>,
    pub irradiance: Option<f64>,
    pub humidity: Option<f64>,
    pub cloud_cover: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyPoint {
    pub date: String,
    pub predicted_output_kwh: Option<f64>,
}

/// Response of `POST /api/forecast`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastData {
    pub location: String,
    pub weather_data: Vec<WeatherPoint>,
    pub energy_forecast: Vec<EnergyPoint>,
}

impl ForecastData {
    /// Sum of all predicted daily outputs, skipping days without a figure
    pub fn total_output_kwh(&self) -> f64 {
        self.energy_forecast
            .iter()
            .filter_map(|p| p.predicted_output_kwh)
            .sum()
    }

    /// Day with the highest predicted output
    pub fn peak_day(&self) -> Option<&EnergyPoint> {
        self.energy_forecast
            .iter()
            .filter(|p| p.predicted_output_kwh.is_some())
            .max_by(|a, b| {
                a.predicted_output_kwh
                    .unwrap_or_default()
                    .total_cmp(&b.predicted_output_kwh.unwrap_or_default())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_forecast_totals() {
        let data: ForecastData = serde_json::from_value(json!({
            "location": "Mumbai",
            "weather_data": [],
            "energy_forecast": [
                { "date": "2025-10-02", "predicted_output_kwh": 20.5 },
                { "date": "2025-10-03", "predicted_output_kwh": 24.0 },
                { "date": "2025-10-04" }
            ]
        }))
        .unwrap();

        assert!((data.total_output_kwh() - 44.5).abs() < 1e-9);
        assert_eq!(data.peak_day().unwrap().date, "2025-10-03");
    }

    #[test]
    fn test_request_serializes_backend_field_names() {
        let body = serde_json::to_value(ForecastRequest::default()).unwrap();
        assert_eq!(
            body,
            json!({
                "location": "Mumbai",
                "forecast_days": 7,
                "panel_capacity": 5.0,
                "panel_efficiency": 18.5
            })
        );
    }

    #[test]
    fn test_empty_forecast_has_no_peak() {
        assert!(ForecastData::default().peak_day().is_none());
        assert_eq!(ForecastData::default().total_output_kwh(), 0.0);
    }
}
