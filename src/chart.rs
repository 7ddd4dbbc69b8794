//! Scatter-grid figure of the quartet.
//!
//! A [`Figure`] is a plain in-memory description of the grid. It is only
//! rasterized when saved, so it can be built and inspected without a
//! drawing backend.

use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::error::InvalidInput;
use anyhow::{Context, Result, bail};
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::{ops::Range, path::Path};

/// Rows and columns of the panel grid.
pub const GRID: (usize, usize) = (2, 2);

const N_PANELS: usize = GRID.0 * GRID.1;

const TITLES: [&str; N_PANELS] = ["I", "II", "III", "IV"];

/// Axis limits and tick positions shared by every panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
}

impl Axes {
    pub fn anscombe() -> Self {
        Self {
            x_range: 0.0..20.0,
            y_range: 2.0..14.0,
            x_ticks: vec![0.0, 10.0, 20.0],
            y_ticks: vec![4.0, 8.0, 12.0],
        }
    }
}

/// Single scatter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

/// Grid of scatter panels in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    panels: Vec<Panel>,
    axes: Axes,
}

impl Figure {
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn titles(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.title.as_str()).collect()
    }

    /// Rasterize the figure to `file`.
    ///
    /// The image format follows the file extension (`jpg`, `png` or `bmp`).
    pub fn save<P: AsRef<Path>>(&self, file: P, cfg: &ChartConfig) -> Result<()> {
        let file = file.as_ref();
        let root = BitMapBackend::new(file, (cfg.width, cfg.height)).into_drawing_area();
        root.fill(&WHITE).context("failed to fill background")?;

        // Scale text and margins with the panel size so neighbours never overlap.
        let panel_h = cfg.height / GRID.0 as u32;
        let font_size = (panel_h / 14).max(10);
        let text_style: TextStyle = ("sans-serif", font_size).into_font().into();

        // The y label area holds the widest tick label plus the rotated description.
        let mut tick_w = 0;
        for &tick in &self.axes.y_ticks {
            let (w, _) = root
                .estimate_text_size(&format_tick(tick), &text_style)
                .context("failed to measure tick label")?;
            tick_w = tick_w.max(w);
        }
        let y_label_area = y_label_area_size(tick_w, font_size);
        let x_label_area = font_size * 3;

        let areas = root.split_evenly(GRID);
        for (area, panel) in areas.iter().zip(&self.panels) {
            let x_axis = TickAxis::new(self.axes.x_range.clone(), self.axes.x_ticks.clone());
            let y_axis = TickAxis::new(self.axes.y_range.clone(), self.axes.y_ticks.clone());

            let mut chart = ChartBuilder::on(area)
                .caption(&panel.title, ("sans-serif", font_size + 2))
                .margin(font_size / 2)
                .x_label_area_size(x_label_area)
                .y_label_area_size(y_label_area)
                .build_cartesian_2d(x_axis, y_axis)
                .with_context(|| format!("failed to build panel {}", panel.title))?;

            chart
                .configure_mesh()
                .disable_mesh()
                .x_desc(panel.x_label.as_str())
                .y_desc(panel.y_label.as_str())
                .label_style(text_style.clone())
                .axis_desc_style(text_style.clone())
                .draw()
                .with_context(|| format!("failed to draw axes of panel {}", panel.title))?;

            let marker_size = cfg.marker_size;
            chart
                .draw_series(
                    panel
                        .points
                        .iter()
                        .map(|&point| Circle::new(point, marker_size, BLUE.filled())),
                )
                .with_context(|| format!("failed to draw points of panel {}", panel.title))?;
        }

        root.present()
            .with_context(|| format!("failed to write {file:?}"))?;

        Ok(())
    }
}

/// Linear axis that places its tick marks only at fixed values.
#[derive(Clone)]
pub struct TickAxis {
    coord: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickAxis {
    pub fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            coord: range.into(),
            ticks,
        }
    }
}

impl Ranged for TickAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            return Vec::new();
        }
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

impl ValueFormatter<f64> for TickAxis {
    fn format_ext(&self, value: &f64) -> String {
        format_tick(*value)
    }
}

/// Room for the tick labels, tick marks and the rotated axis description.
fn y_label_area_size(tick_w: u32, font_size: u32) -> u32 {
    tick_w + font_size * 2 + 10
}

fn format_tick(value: f64) -> String {
    format!("{value}")
}

/// Build a grid of scatter panels, one per series of `data`.
///
/// Panel `i` plots series `i` against `xs[i]`, is titled `titles[i]`,
/// labelled `x_labels[i]` on x and with the series name on y.
///
/// # Errors
/// Returns [`InvalidInput`] unless there are exactly as many series, x-sequences,
/// titles and x-labels as grid cells, and every x-sequence matches its series length.
pub fn scatter_grid(
    data: &Dataset,
    xs: &[&[f64]],
    titles: &[&str],
    x_labels: &[&str],
) -> Result<Figure> {
    let counts = [
        ("series", data.series().len()),
        ("x-sequences", xs.len()),
        ("titles", titles.len()),
        ("x-labels", x_labels.len()),
    ];
    for (what, count) in counts {
        if count != N_PANELS {
            bail!(InvalidInput(format!(
                "grid needs {N_PANELS} {what}, but got {count}"
            )));
        }
    }

    let mut panels = Vec::with_capacity(N_PANELS);
    for (i_panel, series) in data.series().iter().enumerate() {
        let x = xs[i_panel];
        let y = series.values();
        if x.len() != y.len() {
            bail!(InvalidInput(format!(
                "panel {} has {} x-values for {} y-values",
                titles[i_panel],
                x.len(),
                y.len()
            )));
        }
        panels.push(Panel {
            title: titles[i_panel].to_owned(),
            x_label: x_labels[i_panel].to_owned(),
            y_label: series.name().to_owned(),
            points: x.iter().copied().zip(y.iter().copied()).collect(),
        });
    }

    Ok(Figure {
        panels,
        axes: Axes::anscombe(),
    })
}

/// The quartet figure: first three series against `x`, the fourth against `x4`.
pub fn anscombe_figure(data: &Dataset) -> Result<Figure> {
    let xs = [data.x(), data.x(), data.x(), data.x4()];
    scatter_grid(data, &xs, &TITLES, &["x", "x", "x", "x4"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Series;
    use plotters::coord::ranged1d::{BoldPoints, LightPoints};

    #[test]
    fn quartet_figure_layout() {
        let fig = anscombe_figure(&Dataset::anscombe()).unwrap();
        assert_eq!(fig.panels().len(), 4);
        assert_eq!(fig.titles(), ["I", "II", "III", "IV"]);

        let x_labels: Vec<_> = fig.panels().iter().map(|p| p.x_label.as_str()).collect();
        assert_eq!(x_labels, ["x", "x", "x", "x4"]);
        let y_labels: Vec<_> = fig.panels().iter().map(|p| p.y_label.as_str()).collect();
        assert_eq!(y_labels, ["y1", "y2", "y3", "y4"]);
    }

    #[test]
    fn fourth_panel_uses_alternate_x() {
        let data = Dataset::anscombe();
        let fig = anscombe_figure(&data).unwrap();
        let xs: Vec<_> = fig.panels()[3].points.iter().map(|&(x, _)| x).collect();
        assert_eq!(xs, data.x4());
        assert_eq!(fig.panels()[3].points[7], (19.0, 12.50));
        assert_eq!(fig.panels()[0].points[0], (10.0, 8.04));
    }

    #[test]
    fn axes_are_shared() {
        let fig = anscombe_figure(&Dataset::anscombe()).unwrap();
        let axes = fig.axes();
        assert_eq!(axes.x_range, 0.0..20.0);
        assert_eq!(axes.y_range, 2.0..14.0);
        assert_eq!(axes.x_ticks, [0.0, 10.0, 20.0]);
        assert_eq!(axes.y_ticks, [4.0, 8.0, 12.0]);
        for panel in fig.panels() {
            for &(x, y) in &panel.points {
                assert!(axes.x_range.contains(&x) && axes.y_range.contains(&y));
            }
        }
    }

    #[test]
    fn wrong_counts_are_invalid() {
        let data = Dataset::anscombe();
        let xs = [data.x(), data.x(), data.x()];
        let err = scatter_grid(&data, &xs, &TITLES, &["x", "x", "x", "x4"]).unwrap_err();
        assert!(err.downcast_ref::<InvalidInput>().is_some());

        let xs = [data.x(), data.x(), data.x(), data.x4()];
        let err = scatter_grid(&data, &xs, &["I", "II"], &["x", "x", "x", "x4"]).unwrap_err();
        assert!(err.downcast_ref::<InvalidInput>().is_some());

        let three = Dataset::new(
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![
                Series::new("a", vec![1.0, 2.0]),
                Series::new("b", vec![1.0, 2.0]),
                Series::new("c", vec![1.0, 2.0]),
            ],
        )
        .unwrap();
        let err = anscombe_figure(&three).unwrap_err();
        assert!(err.downcast_ref::<InvalidInput>().is_some());
    }

    #[test]
    fn tick_axis_marks_only_fixed_values() {
        let axis = TickAxis::new(0.0..20.0, vec![0.0, 10.0, 20.0]);
        assert_eq!(axis.key_points(BoldPoints(100)), [0.0, 10.0, 20.0]);
        assert!(axis.key_points(LightPoints::new(100, 1000)).is_empty());
        assert_eq!(axis.range(), 0.0..20.0);
        assert_eq!(axis.format_ext(&10.0), "10");
        assert_eq!(axis.format_ext(&4.0), "4");
    }

    #[test]
    fn y_label_area_fits_ticks_and_description() {
        let font_size = 17;
        for tick_w in [0, 10, 40] {
            // Tick marks take 5px and the description is one font height wide.
            assert!(y_label_area_size(tick_w, font_size) >= tick_w + 5 + font_size);
        }
    }

    #[test]
    fn save_renders_jpeg() {
        let file = std::env::temp_dir().join(format!("anscombe-{}.jpg", std::process::id()));
        let fig = anscombe_figure(&Dataset::anscombe()).unwrap();
        fig.save(&file, &ChartConfig::default()).unwrap();
        let bytes = std::fs::read(&file).unwrap();
        std::fs::remove_file(&file).ok();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn mismatched_x_length_is_invalid() {
        let data = Dataset::anscombe();
        let short = [1.0, 2.0];
        let xs = [data.x(), data.x(), &short[..], data.x4()];
        let err = scatter_grid(&data, &xs, &TITLES, &["x", "x", "x", "x4"]).unwrap_err();
        assert!(err.downcast_ref::<InvalidInput>().is_some());
    }
}
