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

pub mod client;
pub mod display;
pub mod error;
pub mod pipeline;
pub mod polling;
pub mod scenarios;
pub mod selector;
pub mod statistics;

#[cfg(test)]
mod testing;

pub use client::{SolarApi, SolarSmartClient};
pub use error::{CONNECTIVITY_MESSAGE, ClientError, ClientResult, PipelineError};
pub use pipeline::RetrainForecastPipeline;
pub use polling::{DEFAULT_POLL_INTERVAL, PollHandle, PollPhase, PollState, PollingScheduler};
pub use scenarios::{
    SCENARIO_NAMES, ScenarioBatch, ScenarioComparison, ScenarioOrchestrator, derive_variants,
};
pub use selector::{Selection, SelectorContext};
pub use statistics::{ColumnStats, summarize, summarize_table, summarize_values};
