//! Anscombe's quartet data.

use crate::error::InvalidInput;
use anyhow::{Result, bail};

/// Primary x-sequence shared by the first three series.
const X: [f64; 11] = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];

/// Alternate x-sequence of the fourth series.
const X4: [f64; 11] = [8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 19.0, 8.0, 8.0, 8.0];

const Y1: [f64; 11] = [
    8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68,
];
const Y2: [f64; 11] = [
    9.14, 8.14, 8.74, 8.77, 9.26, 8.10, 6.13, 3.10, 9.13, 7.26, 4.74,
];
const Y3: [f64; 11] = [
    7.46, 6.77, 12.74, 7.11, 7.81, 8.84, 6.08, 5.39, 8.15, 6.42, 5.73,
];
const Y4: [f64; 11] = [
    6.58, 5.76, 7.71, 8.84, 8.47, 7.04, 5.25, 12.50, 5.56, 7.91, 6.89,
];

/// Named column of y-values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    values: Vec<f64>,
}

impl Series {
    /// Create a new series with a given column name and values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Get the column name of the series.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the values of the series.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Table of y-series indexed by the primary x-sequence.
///
/// The fourth series of the quartet is not plotted against the index but
/// against `x4`, which is carried alongside the table.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Vec<f64>,
    x4: Vec<f64>,
    series: Vec<Series>,
}

impl Dataset {
    /// Create a dataset, checking that every column has the index length.
    ///
    /// # Errors
    /// Returns [`InvalidInput`] if `x4` or any series differs in length from `x`.
    pub fn new(x: Vec<f64>, x4: Vec<f64>, series: Vec<Series>) -> Result<Self> {
        let n_rows = x.len();
        if x4.len() != n_rows {
            bail!(InvalidInput(format!(
                "x4 must have {n_rows} values, but has {}",
                x4.len()
            )));
        }
        for s in &series {
            if s.values.len() != n_rows {
                bail!(InvalidInput(format!(
                    "series {} must have {n_rows} values, but has {}",
                    s.name,
                    s.values.len()
                )));
            }
        }
        Ok(Self { x, x4, series })
    }

    /// The four datasets of Anscombe's quartet.
    pub fn anscombe() -> Self {
        let series = vec![
            Series::new("y1", Y1.to_vec()),
            Series::new("y2", Y2.to_vec()),
            Series::new("y3", Y3.to_vec()),
            Series::new("y4", Y4.to_vec()),
        ];
        Self {
            x: X.to_vec(),
            x4: X4.to_vec(),
            series,
        }
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn x4(&self) -> &[f64] {
        &self.x4
    }

    /// Get the series in column order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Look up a series by column name.
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Number of rows shared by every column.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
