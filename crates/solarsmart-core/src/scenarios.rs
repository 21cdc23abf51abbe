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

//! What-if scenario batches.
//!
//! A base configuration is expanded into a fixed set of variants, all of them
//! are simulated concurrently, and the batch either completes in full or fails
//! with the first error. Comparisons against the baseline are computed on
//! read with whatever unit price the caller passes at that moment.

use crate::client::SolarApi;
use crate::error::ClientResult;
use crate::statistics::{ColumnStats, summarize_values};
use solarsmart_types::{BASE_CASE, CleaningFrequency, ScenarioConfig, ScenarioResult};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const MORE_PANELS: &str = "+20 Panels";
pub const OPTIMAL_TILT: &str = "Optimal Tilt";
pub const QUARTERLY_CLEANING: &str = "Quarterly Cleaning";

/// Scenario labels in presentation order
pub const SCENARIO_NAMES: [&str; 4] = [BASE_CASE, MORE_PANELS, OPTIMAL_TILT, QUARTERLY_CLEANING];

const EXTRA_PANELS: u32 = 20;

/// Expand `base` into the named variants, in [`SCENARIO_NAMES`] order
pub fn derive_variants(base: &ScenarioConfig) -> [(&'static str, ScenarioConfig); 4] {
    [
        (BASE_CASE, base.clone()),
        (
            MORE_PANELS,
            base.with_num_panels(base.num_panels.saturating_add(EXTRA_PANELS)),
        ),
        (OPTIMAL_TILT, base.with_tilt_angle(base.optimal_tilt())),
        (
            QUARTERLY_CLEANING,
            base.with_cleaning_frequency(CleaningFrequency::Quarterly),
        ),
    ]
}

/// One row of the baseline comparison
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioComparison {
    pub name: String,
    pub annual_output_kwh: f64,
    pub annual_revenue: f64,
    /// Output minus baseline output, 0 for the baseline itself
    pub output_delta_kwh: f64,
    /// Revenue minus baseline revenue, 0 for the baseline itself
    pub revenue_delta: f64,
}

/// Complete result set of one simulation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioBatch {
    results: Vec<ScenarioResult>,
}

impl ScenarioBatch {
    pub fn from_results(results: Vec<ScenarioResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Baseline output, 0 when the batch has no "Base Case"
    pub fn baseline_output_kwh(&self) -> f64 {
        self.get(BASE_CASE).map_or(0.0, |r| r.annual_output_kwh)
    }

    /// Compare every result with the baseline at `unit_price` per kWh
    pub fn comparisons(&self, unit_price: f64) -> Vec<ScenarioComparison> {
        let baseline = self.baseline_output_kwh();
        let baseline_revenue = baseline * unit_price;

        self.results
            .iter()
            .map(|result| {
                let annual_revenue = result.annual_output_kwh * unit_price;
                let (output_delta_kwh, revenue_delta) = if result.is_baseline() {
                    (0.0, 0.0)
                } else {
                    (
                        result.annual_output_kwh - baseline,
                        annual_revenue - baseline_revenue,
                    )
                };

                ScenarioComparison {
                    name: result.name.clone(),
                    annual_output_kwh: result.annual_output_kwh,
                    annual_revenue,
                    output_delta_kwh,
                    revenue_delta,
                }
            })
            .collect()
    }

    /// Result with the highest output
    pub fn best(&self) -> Option<&ScenarioResult> {
        self.results
            .iter()
            .max_by(|a, b| a.annual_output_kwh.total_cmp(&b.annual_output_kwh))
    }

    /// Spread of the simulated outputs
    pub fn output_stats(&self) -> Option<ColumnStats> {
        summarize_values(self.results.iter().map(|r| r.annual_output_kwh))
    }
}

/// Runs scenario batches against the simulation endpoint
pub struct ScenarioOrchestrator {
    api: Arc<dyn SolarApi>,
}

impl std::fmt::Debug for ScenarioOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioOrchestrator")
            .field("api", &self.api.name())
            .finish()
    }
}

impl ScenarioOrchestrator {
    pub fn new(api: Arc<dyn SolarApi>) -> Self {
        Self { api }
    }

    /// Simulate all variants of `base` concurrently.
    ///
    /// Fails with the first error any variant reports; partial results are
    /// dropped. On success the batch holds one result per variant, ordered as
    /// [`SCENARIO_NAMES`] regardless of completion order.
    pub async fn run(&self, base: &ScenarioConfig) -> ClientResult<ScenarioBatch> {
        let [base_case, more_panels, optimal_tilt, quarterly] = derive_variants(base);
        info!(
            "🧪 [SIM] Running {} scenarios for {} panels",
            SCENARIO_NAMES.len(),
            base.num_panels
        );

        let outcome = tokio::try_join!(
            self.simulate(base_case),
            self.simulate(more_panels),
            self.simulate(optimal_tilt),
            self.simulate(quarterly),
        );

        match outcome {
            Ok((a, b, c, d)) => {
                info!("✅ [SIM] All scenarios completed");
                Ok(ScenarioBatch::from_results(vec![a, b, c, d]))
            }
            Err(e) => {
                error!("❌ [SIM] Scenario batch failed: {}", e);
                Err(e)
            }
        }
    }

    async fn simulate(
        &self,
        (name, config): (&'static str, ScenarioConfig),
    ) -> ClientResult<ScenarioResult> {
        let output = self.api.simulate_scenario(&config).await?;
        debug!("   {} -> {:.1} kWh", name, output.annual_output_kwh);
        Ok(ScenarioResult::new(name, output.annual_output_kwh))
    }
}
