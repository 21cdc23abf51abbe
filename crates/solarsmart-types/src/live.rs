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

//! Live twin snapshot returned by `GET /api/ai-twin-summary/{location}`.
//!
//! The backend omits whole blocks when the telemetry store is empty, so every
//! block defaults and every figure is optional. A missing figure is shown as
//! "N/A" rather than failing the snapshot.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Shortfall (%) above which the installation is flagged as underperforming
pub const UNDERPERFORMANCE_THRESHOLD_PERCENT: f64 = 15.0;

/// Latest instrument readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveMetrics {
    pub voltage: Option<f64>,
    /// Current in mA
    pub current: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub timestamp: Option<String>,
}

/// One point of the actual power series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPoint {
    pub time: String,
    /// Actual power (W)
    pub actual: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prediction {
    pub predicted_power_mw: Option<f64>,
}

/// Actual vs predicted comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Performance {
    pub power_difference_mw: Option<f64>,
    pub percent_difference: Option<f64>,
    pub est_revenue_loss: Option<f64>,
}

/// Everyday equivalents of the predicted output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Impact {
    pub phones_charged_per_hour: Option<f64>,
    pub ev_range_added_per_hour_km: Option<f64>,
    pub co2_avoided_grams_today: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyForecast {
    pub date: String,
    pub predicted_power_mw: Option<f64>,
}

/// Raw telemetry row as stored by the logger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReading {
    pub created_at: Option<String>,
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    /// Power (W)
    pub power: Option<f64>,
    pub temperature: Option<f64>,
}

impl RawReading {
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }
}

/// Full snapshot of the live twin for one location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveSummary {
    pub city: String,
    pub live_metrics: LiveMetrics,
    pub live_power_trend: Vec<TrendPoint>,
    pub prediction: Prediction,
    pub performance: Performance,
    pub impact: Impact,
    pub forecast_7_day: Vec<DailyForecast>,
    /// Newest first
    pub raw_readings: Vec<RawReading>,
}

impl LiveSummary {
    /// Restore newest-first order of the raw readings.
    ///
    /// Readings without a parseable timestamp keep their relative order and
    /// go last.
    pub fn sort_readings_newest_first(&mut self) {
        self.raw_readings
            .sort_by_key(|reading| Reverse(reading.timestamp()));
    }

    pub fn freshest_reading(&self) -> Option<&RawReading> {
        self.raw_readings.first()
    }

    /// Power of the freshest reading in mW, 0 without readings
    pub fn latest_actual_power_mw(&self) -> f64 {
        self.freshest_reading()
            .and_then(|r| r.power)
            .map_or(0.0, |w| w * 1000.0)
    }

    /// The last `n` points of the actual power series
    pub fn recent_trend(&self, n: usize) -> &[TrendPoint] {
        let start = self.live_power_trend.len().saturating_sub(n);
        &self.live_power_trend[start..]
    }

    pub fn underperforming(&self) -> bool {
        self.performance
            .percent_difference
            .is_some_and(|p| p > UNDERPERFORMANCE_THRESHOLD_PERCENT)
    }
}
