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
use std::fmt;

/// Fleet KPIs. The backend sends them pre-formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kpi {
    pub total_energy: String,
    pub avg_daily_output: String,
    pub peak_output: String,
    pub uptime: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyTrendPoint {
    pub date: String,
    /// Daily energy (kWh)
    pub energy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelStatus {
    Normal,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PanelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "Normal",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// A panel on the farm layout, positioned in percent of the layout area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelTile {
    pub id: String,
    pub output: String,
    pub status: PanelStatus,
    pub x: f64,
    pub y: f64,
}

/// Response of `GET /api/dashboard-summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub kpi: Kpi,
    pub energy_trend: Vec<EnergyTrendPoint>,
    pub panel_layout: Vec<PanelTile>,
}

impl DashboardSummary {
    pub fn panels_with_status(&self, status: PanelStatus) -> usize {
        self.panel_layout
            .iter()
            .filter(|p| p.status == status)
            .count()
    }
}
