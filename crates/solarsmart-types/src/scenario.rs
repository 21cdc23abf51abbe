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
use std::str::FromStr;

/// Label of the baseline scenario every other result is compared against
pub const BASE_CASE: &str = "Base Case";

/// How often the panels get cleaned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CleaningFrequency {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl CleaningFrequency {
    pub fn all() -> &'static [CleaningFrequency] {
        &[Self::Weekly, Self::Monthly, Self::Quarterly, Self::Annually]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Annually => "Annually",
        }
    }
}

impl fmt::Display for CleaningFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleaningFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annually" => Ok(Self::Annually),
            _ => Err(format!(
                "Unknown cleaning frequency: '{s}'. Supported: {}",
                Self::all()
                    .iter()
                    .map(CleaningFrequency::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// Parameters of one what-if simulation run.
///
/// Serialized as-is into the body of `POST /api/simulate-scenario`. Variants
/// are derived through the `with_*` builders, which return a modified copy and
/// leave the original untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub num_panels: u32,
    /// Rated power of a single panel (W)
    pub panel_wattage: u32,
    /// Panel tilt (degrees)
    pub tilt_angle: f64,
    pub latitude: f64,
    /// Panel azimuth (degrees, 180 = south)
    pub azimuth: f64,
    /// Shading loss (%)
    pub shading_factor: f64,
    pub cleaning_frequency: CleaningFrequency,
    /// Annual degradation (%)
    pub degradation_rate: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            num_panels: 50,
            panel_wattage: 400,
            tilt_angle: 21.0,
            latitude: 21.1,
            azimuth: 180.0,
            shading_factor: 5.0,
            cleaning_frequency: CleaningFrequency::Monthly,
            degradation_rate: 0.5,
        }
    }
}

impl ScenarioConfig {
    #[must_use]
    pub fn with_num_panels(&self, num_panels: u32) -> Self {
        Self {
            num_panels,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_tilt_angle(&self, tilt_angle: f64) -> Self {
        Self {
            tilt_angle,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_cleaning_frequency(&self, cleaning_frequency: CleaningFrequency) -> Self {
        Self {
            cleaning_frequency,
            ..self.clone()
        }
    }

    /// Tilt equal to the latitude, rounded half-up to a whole degree
    pub fn optimal_tilt(&self) -> f64 {
        (self.latitude + 0.5).floor()
    }
}

/// Response body of `POST /api/simulate-scenario`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub annual_output_kwh: f64,
}

/// A named scenario paired with its simulated annual output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub annual_output_kwh: f64,
}

impl ScenarioResult {
    pub fn new(name: impl Into<String>, annual_output_kwh: f64) -> Self {
        Self {
            name: name.into(),
            annual_output_kwh,
        }
    }

    pub fn is_baseline(&self) -> bool {
        self.name == BASE_CASE
    }
}
