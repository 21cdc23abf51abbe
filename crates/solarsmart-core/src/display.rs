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

//! Presentation-boundary formatting. Internal figures stay at full precision.

use crate::statistics::ColumnStats;

pub const NOT_AVAILABLE: &str = "N/A";

pub fn fmt_2dp(value: f64) -> String {
    format!("{value:.2}")
}

/// Fixed-precision figure, or "N/A" when the backend left it out
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |v| format!("{v:.decimals$}"))
}

/// Signed figure with explicit `+` for gains
pub fn fmt_signed(value: f64, decimals: usize) -> String {
    format!("{value:+.decimals$}")
}

/// mean, std, min, max at 2 decimals
pub fn fmt_stats(stats: &ColumnStats) -> [String; 4] {
    [
        fmt_2dp(stats.mean),
        fmt_2dp(stats.std_dev),
        fmt_2dp(stats.min),
        fmt_2dp(stats.max),
    ]
}
