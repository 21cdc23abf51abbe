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

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solarsmart", version, about = "SolarSmart analytics client")]
#[command(
    long_about = "Command line client for the SolarSmart analytics backend.\n\
    \nShows the fleet dashboard, follows the live digital twin of a location,\n\
    compares what-if scenarios and retrains the forecast model.\n\
    \nExamples:\n  \
    solarsmart dashboard\n  \
    solarsmart watch --location Pune --cycles 3\n  \
    solarsmart simulate --price 7.5\n  \
    solarsmart forecast --location Mumbai --days 5\n  \
    solarsmart stats readings.csv --column efficiency"
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print fleet KPIs, the daily energy trend and panel status counts
    Dashboard,

    /// Follow the live digital twin of a location
    #[command(
        long_about = "Poll the live twin summary on the configured period and print every\n\
        committed snapshot. Runs until --cycles snapshots were shown or Ctrl-C."
    )]
    Watch(WatchArgs),

    /// Compare what-if scenarios against the configured base case
    Simulate(SimulateArgs),

    /// Retrain the model for a location and print its energy forecast
    Forecast(ForecastArgs),

    /// Descriptive statistics of the numeric columns of a CSV file
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Location to follow (defaults to live.default_location)
    #[arg(long)]
    pub location: Option<String>,

    /// Stop after this many snapshots
    #[arg(long, value_name = "N")]
    pub cycles: Option<u64>,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Electricity price per kWh (defaults to simulation.unit_price)
    #[arg(long)]
    pub price: Option<f64>,
}

#[derive(Args, Debug)]
pub struct ForecastArgs {
    #[arg(long)]
    pub location: String,

    /// Days to forecast (1-16)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16))]
    pub days: Option<u32>,

    /// Installed capacity in kW
    #[arg(long)]
    pub capacity: Option<f64>,

    /// Panel efficiency in percent
    #[arg(long)]
    pub efficiency: Option<f64>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// CSV file with a header row
    pub csv: PathBuf,

    /// Only summarize this column
    #[arg(long)]
    pub column: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_forecast() {
        let cli = Cli::parse_from([
            "solarsmart",
            "forecast",
            "--location",
            "Mumbai",
            "--days",
            "5",
        ]);

        let Commands::Forecast(args) = cli.command else {
            panic!("expected forecast command");
        };
        assert_eq!(args.location, "Mumbai");
        assert_eq!(args.days, Some(5));
        assert!(args.capacity.is_none());
    }

    #[test]
    fn test_forecast_days_out_of_range() {
        let result = Cli::try_parse_from([
            "solarsmart",
            "forecast",
            "--location",
            "X",
            "--days",
            "30",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["solarsmart", "watch", "--cycles", "2", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Watch(WatchArgs {
                cycles: Some(2),
                location: None
            })
        ));
    }
}
