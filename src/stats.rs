use crate::dataset::Dataset;
use crate::error::InvalidInput;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

/// Summary statistics of a single series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "")]
    pub name: String,
    pub mean: f64,
    pub std: f64,
    pub var: f64,
}

impl Description {
    /// Describe `vals` with its mean, sample standard deviation and sample variance.
    pub fn compute(name: &str, vals: &[f64]) -> Result<Self> {
        let mean = compute_mean(vals)?;
        let var = compute_var(vals)?;
        Ok(Self {
            name: name.to_owned(),
            mean,
            std: var.sqrt(),
            var,
        })
    }
}

/// One [`Description`] per series, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    rows: Vec<Description>,
}

impl StatsTable {
    pub fn rows(&self) -> &[Description] {
        &self.rows
    }

    pub fn get(&self, name: &str) -> Option<&Description> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// Write the table as comma-separated values with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            writer
                .serialize(row)
                .with_context(|| format!("failed to serialize row {}", row.name))?;
        }
        writer.flush().context("failed to flush writer stream")?;
        Ok(())
    }

    /// Read a table previously written by [`StatsTable::write_csv`].
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<Description>, _>>()
            .context("failed to deserialize rows")?;
        Ok(Self { rows })
    }

    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        self.write_csv(BufWriter::new(file))
    }

    pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        Self::read_csv(BufReader::new(file))
    }
}

/// Compute the mean, standard deviation and variance of every series.
///
/// # Errors
/// Returns [`InvalidInput`] if a series has fewer than two values.
pub fn describe(data: &Dataset) -> Result<StatsTable> {
    let rows = data
        .series()
        .iter()
        .map(|s| {
            Description::compute(s.name(), s.values())
                .with_context(|| format!("failed to describe {}", s.name()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(StatsTable { rows })
}

pub fn compute_mean(vals: &[f64]) -> Result<f64> {
    if vals.is_empty() {
        bail!(InvalidInput("mean of an empty series".to_owned()));
    }
    Ok(vals.iter().sum::<f64>() / vals.len() as f64)
}

/// Sample variance with Bessel's correction.
pub fn compute_var(vals: &[f64]) -> Result<f64> {
    let n_vals = vals.len();
    if n_vals < 2 {
        bail!(InvalidInput(format!(
            "variance needs at least 2 values, but series has {n_vals}"
        )));
    }
    let mean = compute_mean(vals)?;
    Ok(vals.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / (n_vals - 1) as f64)
}
