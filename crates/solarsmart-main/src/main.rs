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

//! SolarSmart command line client

mod cli;
mod config;
mod formatters;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands, ForecastArgs, SimulateArgs, StatsArgs, WatchArgs};
use config::AppConfig;
use formatters::TableFormatter;
use solarsmart_core::{
    PollingScheduler, RetrainForecastPipeline, ScenarioOrchestrator, SelectorContext, SolarApi,
    SolarSmartClient, summarize, summarize_table,
};
use solarsmart_types::UploadedTable;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respects RUST_LOG, falls back to info (debug with --verbose)
    let default_level = if cli.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        // CSV statistics work offline
        Commands::Stats(args) => run_stats(&args),
        Commands::Dashboard => run_dashboard(connect(&config)?.as_ref()).await,
        Commands::Watch(args) => run_watch(&config, connect(&config)?, args).await,
        Commands::Simulate(args) => run_simulate(&config, connect(&config)?, &args).await,
        Commands::Forecast(args) => run_forecast(&config, connect(&config)?, args).await,
    }
}

fn connect(config: &AppConfig) -> Result<Arc<dyn SolarApi>> {
    info!("🚀 Starting SolarSmart client");
    info!("   Backend: {}", config.api.base_url);

    let client = SolarSmartClient::new(&config.api.base_url, config.request_timeout())
        .context("Failed to create API client")?;
    Ok(Arc::new(client))
}

async fn run_dashboard(api: &dyn SolarApi) -> Result<()> {
    let summary = api.dashboard_summary().await?;
    print!("{}", TableFormatter::format_dashboard(&summary));
    Ok(())
}

async fn run_watch(config: &AppConfig, api: Arc<dyn SolarApi>, args: WatchArgs) -> Result<()> {
    let location = args
        .location
        .unwrap_or_else(|| config.live.default_location.clone());
    let selector = SelectorContext::new(location);

    let scheduler = PollingScheduler::new(api, selector, config.poll_interval());
    let handle = scheduler.start();
    let mut updates = handle.subscribe();
    let mut shown_commits = 0;
    let mut shown_error: Option<String> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("Live poller ended unexpectedly");
                    break;
                }

                let state = updates.borrow_and_update().clone();
                let new_commit = state.commits > shown_commits;
                let new_error = state.error.is_some() && state.error != shown_error;
                shown_error.clone_from(&state.error);

                if new_commit || new_error {
                    shown_commits = state.commits;
                    println!("{}", TableFormatter::format_live(&state));
                }

                if args.cycles.is_some_and(|cycles| state.commits >= cycles) {
                    break;
                }
            }
        }
    }

    handle.stop();
    Ok(())
}

async fn run_simulate(
    config: &AppConfig,
    api: Arc<dyn SolarApi>,
    args: &SimulateArgs,
) -> Result<()> {
    let unit_price = args.price.unwrap_or(config.simulation.unit_price);
    if !unit_price.is_finite() || unit_price <= 0.0 {
        anyhow::bail!("Unit price must be a positive number, got {unit_price}");
    }

    let orchestrator = ScenarioOrchestrator::new(api);
    let batch = orchestrator.run(&config.simulation.base).await?;

    print!("{}", TableFormatter::format_scenarios(&batch, unit_price));
    Ok(())
}

async fn run_forecast(
    config: &AppConfig,
    api: Arc<dyn SolarApi>,
    args: ForecastArgs,
) -> Result<()> {
    // The live view's location, replaced once retraining succeeds
    let selector = SelectorContext::new(config.live.default_location.clone());

    let mut request = config.forecast_request(args.location);
    if let Some(days) = args.days {
        request.forecast_days = days;
    }
    if let Some(capacity) = args.capacity {
        request.panel_capacity = capacity;
    }
    if let Some(efficiency) = args.efficiency {
        request.panel_efficiency = efficiency;
    }

    let pipeline = RetrainForecastPipeline::new(api, selector.clone());
    let forecast = pipeline.run(&request).await?;

    print!("{}", TableFormatter::format_forecast(&forecast));
    println!("Active location: {}", selector.location());
    Ok(())
}

fn run_stats(args: &StatsArgs) -> Result<()> {
    let table = UploadedTable::from_csv_path(&args.csv)
        .with_context(|| format!("Failed to load {}", args.csv.display()))?;
    info!(
        "📊 Loaded {} rows, {} columns from {}",
        table.len(),
        table.columns().len(),
        args.csv.display()
    );

    let stats = match &args.column {
        Some(column) => {
            let stats = summarize(table.rows(), column)
                .with_context(|| format!("Column '{column}' has no numeric values"))?;
            vec![(column.clone(), stats)]
        }
        None => summarize_table(&table),
    };

    if stats.is_empty() {
        println!("No numerical columns found");
        return Ok(());
    }

    print!("{}", TableFormatter::format_stats(&stats));
    Ok(())
}
