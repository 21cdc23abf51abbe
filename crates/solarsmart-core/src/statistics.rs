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

//! Descriptive statistics over a numeric column.

use solarsmart_types::{Row, UploadedTable, parse_number};

/// Exact summary of a numeric series. Rounding happens at display time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize `column` across `rows`, skipping cells that are not numbers.
///
/// Returns `None` when no numeric value remains.
pub fn summarize(rows: &[Row], column: &str) -> Option<ColumnStats> {
    summarize_values(
        rows.iter()
            .filter_map(|row| row.get(column).and_then(|v| parse_number(v))),
    )
}

/// Summarize a series of values.
///
/// Values are sorted before accumulating, so any permutation of the same
/// input produces bit-identical results.
pub fn summarize_values(values: impl IntoIterator<Item = f64>) -> Option<ColumnStats> {
    let mut values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(ColumnStats {
        count,
        mean,
        std_dev: variance.sqrt(),
        min: values[0],
        max: values[count - 1],
    })
}

/// Statistics for every numerical column, in column order
pub fn summarize_table(table: &UploadedTable) -> Vec<(String, ColumnStats)> {
    table
        .numerical_columns()
        .into_iter()
        .filter_map(|col| summarize(table.rows(), col).map(|stats| (col.to_owned(), stats)))
        .collect()
}
