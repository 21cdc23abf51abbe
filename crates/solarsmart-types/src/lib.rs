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

//! Shared data model for the SolarSmart client.
//!
//! Everything in here mirrors the JSON contracts of the analytics backend or
//! the tabular data a user uploads. No I/O beyond CSV parsing lives here.

pub mod dashboard;
pub mod forecast;
pub mod live;
pub mod scenario;
pub mod table;

// Re-export common types for convenience
pub use dashboard::{DashboardSummary, EnergyTrendPoint, Kpi, PanelStatus, PanelTile};
pub use forecast::{
    EnergyPoint, ForecastData, ForecastRequest, RetrainAck, RetrainRequest, WeatherPoint,
};
pub use live::{
    DailyForecast, Impact, LiveMetrics, LiveSummary, Performance, Prediction, RawReading,
    TrendPoint,
};
pub use scenario::{BASE_CASE, CleaningFrequency, ScenarioConfig, ScenarioResult, SimulationOutput};
pub use table::{Row, TableError, UploadedTable, parse_number};
