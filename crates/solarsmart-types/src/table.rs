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

//! User-uploaded tabular data.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Column name to raw cell value
pub type Row = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("uploaded table has no rows")]
    Empty,
}

/// Parse a cell as a finite number. Surrounding whitespace is ignored.
///
/// The whole cell must be a number; a numeric prefix such as a date's year
/// does not count.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Ordered rows plus the column order of the first row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl UploadedTable {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Read a CSV with a header line. Header names become the column order.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = csv.headers()?.iter().map(str::to_owned).collect();

        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record?;
            let row: Row = columns
                .iter()
                .zip(record.iter())
                .map(|(col, value)| (col.clone(), value.to_owned()))
                .collect();
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(Self { columns, rows })
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::from_csv_reader(file)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns whose first-row value is a number.
    ///
    /// Later rows are not consulted.
    pub fn numerical_columns(&self) -> Vec<&str> {
        let Some(first) = self.rows.first() else {
            return Vec::new();
        };

        self.columns
            .iter()
            .filter(|col| first.get(*col).and_then(|v| parse_number(v)).is_some())
            .map(String::as_str)
            .collect()
    }

    /// (x, y) pairs for rows where both cells parse
    pub fn scatter_points(&self, x_column: &str, y_column: &str) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| {
                let x = row.get(x_column).and_then(|v| parse_number(v))?;
                let y = row.get(y_column).and_then(|v| parse_number(v))?;
                Some((x, y))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
timestamp,voltage,current,power,temperature,efficiency
2025-01-01,240.2,3.8,912,28.5,18.2
2025-01-02,239.8,3.9,935,29.1,18.7
2025-01-03,241.1,n/a,892,27.8,17.9
";

    #[test]
    fn test_from_csv_keeps_column_order() {
        let table = UploadedTable::from_csv_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(
            table.columns(),
            ["timestamp", "voltage", "current", "power", "temperature", "efficiency"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[2]["current"], "n/a");
    }

    #[test]
    fn test_numerical_columns_use_first_row_only() {
        let table = UploadedTable::from_csv_reader(SAMPLE.as_bytes()).unwrap();

        // "current" stays numerical even though the third row is not
        assert_eq!(
            table.numerical_columns(),
            vec!["voltage", "current", "power", "temperature", "efficiency"]
        );
    }

    #[test]
    fn test_non_numeric_first_row_excludes_column() {
        let csv = "site,output\nalpha,1.5\n2,2.5\n";
        let table = UploadedTable::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.numerical_columns(), vec!["output"]);
    }

    #[test]
    fn test_scatter_points_skip_unparseable_rows() {
        let table = UploadedTable::from_csv_reader(SAMPLE.as_bytes()).unwrap();
        let points = table.scatter_points("current", "power");

        assert_eq!(points, vec![(3.8, 912.0), (3.9, 935.0)]);
    }

    #[test]
    fn test_header_only_csv_is_empty() {
        let result = UploadedTable::from_csv_reader("a,b\n".as_bytes());
        assert!(matches!(result, Err(TableError::Empty)));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 18.2 "), Some(18.2));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_numeric_prefix_is_not_a_number() {
        assert_eq!(parse_number("2025-01-01"), None);
        assert_eq!(parse_number("12kW"), None);

        let csv = "date,output\n2025-01-01,1.5\n";
        let table = UploadedTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.numerical_columns(), vec!["output"]);
    }
}
