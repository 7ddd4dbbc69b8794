use crate::chart::anscombe_figure;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::stats::{compute_mean, compute_var, describe};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct Manager {
    output_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(output_dir: P, cfg: Config) -> Self {
        let output_dir = output_dir.as_ref().to_path_buf();
        Self { output_dir, cfg }
    }

    /// Compute the statistics table and figure, then write both to the output directory.
    ///
    /// Nothing is written unless both outputs were built successfully.
    pub fn run(&self) -> Result<()> {
        let data = Dataset::anscombe();
        log::info!("loaded {} series of {} rows", data.series().len(), data.len());
        for (name, x) in [("x", data.x()), ("x4", data.x4())] {
            log::info!(
                "{name}: mean {:.4} var {:.4}",
                compute_mean(x)?,
                compute_var(x)?
            );
        }

        let table = describe(&data).context("failed to describe dataset")?;
        for row in table.rows() {
            log::info!(
                "{}: mean {:.4} std {:.4} var {:.4}",
                row.name,
                row.mean,
                row.std,
                row.var
            );
        }

        let figure = anscombe_figure(&data).context("failed to build figure")?;
        log::info!("built panels {:?}", figure.titles());

        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("failed to create {:?}", self.output_dir))?;

        let description_file = self.description_file();
        table
            .save(&description_file)
            .context("failed to save description")?;
        log::info!("wrote {description_file:?}");

        let chart_file = self.chart_file();
        figure
            .save(&chart_file, &self.cfg.chart)
            .context("failed to save chart")?;
        log::info!("wrote {chart_file:?}");

        Ok(())
    }

    /// Remove previously written outputs, leaving the directory itself in place.
    pub fn clean(&self) -> Result<()> {
        for file in [self.description_file(), self.chart_file()] {
            if file.exists() {
                fs::remove_file(&file).with_context(|| format!("failed to remove {file:?}"))?;
                log::info!("removed {file:?}");
            }
        }
        Ok(())
    }

    fn description_file(&self) -> PathBuf {
        self.output_dir.join("description.csv")
    }

    fn chart_file(&self) -> PathBuf {
        self.output_dir.join("chart.jpg")
    }
}
