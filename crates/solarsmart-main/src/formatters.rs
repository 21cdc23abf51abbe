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

use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use solarsmart_core::display::{fmt_2dp, fmt_opt, fmt_signed, fmt_stats};
use solarsmart_core::{ColumnStats, PollPhase, PollState, ScenarioBatch};
use solarsmart_types::{DashboardSummary, ForecastData, PanelStatus};
use std::fmt::Write;

/// Trend points shown in the live view
const LIVE_TREND_POINTS: usize = 30;

/// Formatter for pretty terminal tables
pub struct TableFormatter;

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header(titles));
    table
}

impl TableFormatter {
    pub fn format_dashboard(summary: &DashboardSummary) -> String {
        let mut output = String::new();

        let mut kpis = new_table(&["Total Energy", "Avg Daily Output", "Peak Output", "Uptime"]);
        kpis.add_row(vec![
            &summary.kpi.total_energy,
            &summary.kpi.avg_daily_output,
            &summary.kpi.peak_output,
            &summary.kpi.uptime,
        ]);
        output.push_str(&kpis.to_string());
        output.push('\n');

        if !summary.energy_trend.is_empty() {
            let mut trend = new_table(&["Date", "Energy\n(kWh)"]);
            for point in &summary.energy_trend {
                trend.add_row(vec![point.date.clone(), fmt_2dp(point.energy)]);
            }
            output.push_str(&trend.to_string());
            output.push('\n');
        }

        let _ = writeln!(
            output,
            "Panels: {} total | {} normal | {} warning | {} critical",
            summary.panel_layout.len(),
            summary.panels_with_status(PanelStatus::Normal),
            summary.panels_with_status(PanelStatus::Warning),
            summary.panels_with_status(PanelStatus::Critical),
        );

        output
    }

    /// Render the current live view, including the error indicator if any
    pub fn format_live(state: &PollState) -> String {
        let mut output = String::new();

        let Some(summary) = &state.snapshot else {
            match (&state.phase, &state.error) {
                (_, Some(error)) => {
                    let _ = writeln!(output, "⚠️  {error}");
                }
                (PollPhase::Idle, None) => output.push_str("No location selected\n"),
                _ => output.push_str("Loading live data...\n"),
            }
            return output;
        };

        let updated = state
            .last_updated
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_default();
        let _ = writeln!(output, "📍 {} (updated {})", summary.city, updated);

        let metrics = &summary.live_metrics;
        let mut table = new_table(&[
            "Voltage\n(V)",
            "Current\n(A)",
            "Temperature\n(°C)",
            "Humidity\n(%)",
            "Actual\n(MW)",
            "Predicted\n(MW)",
        ]);
        table.add_row(vec![
            fmt_opt(metrics.voltage, 2),
            fmt_opt(metrics.current, 2),
            fmt_opt(metrics.temperature, 1),
            fmt_opt(metrics.humidity, 0),
            fmt_2dp(summary.latest_actual_power_mw()),
            fmt_opt(summary.prediction.predicted_power_mw, 2),
        ]);
        output.push_str(&table.to_string());
        output.push('\n');

        let performance = &summary.performance;
        let _ = writeln!(
            output,
            "Difference: {} MW ({}%) | Est. revenue loss: ₹{}",
            fmt_opt(performance.power_difference_mw, 2),
            fmt_opt(performance.percent_difference, 1),
            fmt_opt(performance.est_revenue_loss, 2),
        );
        let _ = writeln!(
            output,
            "Impact: {} phones/h | {} km EV range/h",
            fmt_opt(summary.impact.phones_charged_per_hour, 0),
            fmt_opt(summary.impact.ev_range_added_per_hour_km, 1),
        );

        let trend = summary.recent_trend(LIVE_TREND_POINTS);
        if !trend.is_empty() {
            let points: Vec<String> = trend.iter().map(|p| fmt_opt(p.actual, 2)).collect();
            let _ = writeln!(output, "Trend: {}", points.join(" "));
        }

        if state.show_underperformance_alert() {
            output.push_str("🚨 Underperformance alert: output is more than 15% below prediction\n");
        }
        if state.phase == PollPhase::Refreshing {
            output.push_str("🔄 Refreshing...\n");
        }
        if let Some(error) = &state.error {
            let _ = writeln!(output, "⚠️  Showing last good data: {error}");
        }

        output
    }

    pub fn format_scenarios(batch: &ScenarioBatch, unit_price: f64) -> String {
        let mut output = String::new();
        let best = batch.best().map(|r| r.name.as_str());

        let mut table = new_table(&[
            "Scenario",
            "Annual Output\n(kWh)",
            "Revenue\n(₹)",
            "Output Δ\n(kWh)",
            "Revenue Δ\n(₹)",
        ]);

        for row in batch.comparisons(unit_price) {
            // Highlight best scenario
            let name_cell = if best == Some(row.name.as_str()) {
                Cell::new(&row.name)
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new(&row.name)
            };

            table.add_row(vec![
                name_cell,
                Cell::new(fmt_2dp(row.annual_output_kwh)),
                Cell::new(fmt_2dp(row.annual_revenue)),
                Cell::new(fmt_signed(row.output_delta_kwh, 2)),
                Cell::new(fmt_signed(row.revenue_delta, 2)),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        let _ = writeln!(output, "Unit price: ₹{unit_price:.2}/kWh");

        output
    }

    pub fn format_forecast(forecast: &ForecastData) -> String {
        let mut output = String::new();

        let mut table = new_table(&["Date", "Predicted Output\n(kWh)"]);
        for point in &forecast.energy_forecast {
            table.add_row(vec![
                point.date.clone(),
                fmt_opt(point.predicted_output_kwh, 2),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');

        let _ = writeln!(
            output,
            "{}: {} days, {} kWh total",
            forecast.location,
            forecast.energy_forecast.len(),
            fmt_2dp(forecast.total_output_kwh())
        );
        if let Some(peak) = forecast.peak_day() {
            let _ = writeln!(
                output,
                "Peak day: {} ({} kWh)",
                peak.date,
                fmt_opt(peak.predicted_output_kwh, 2)
            );
        }

        output
    }

    pub fn format_stats(stats: &[(String, ColumnStats)]) -> String {
        let mut table = new_table(&["Column", "Count", "Mean", "Std", "Min", "Max"]);

        for (column, column_stats) in stats {
            let [mean, std, min, max] = fmt_stats(column_stats);
            table.add_row(vec![
                column.clone(),
                column_stats.count.to_string(),
                mean,
                std,
                min,
                max,
            ]);
        }

        let mut output = table.to_string();
        output.push('\n');
        output
    }
}
