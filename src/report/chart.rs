//! Recovery trajectory chart, drawn with `plotters` to a PNG file.
//!
//! The bitmap backend writes to a path, so the image lives in a private
//! temporary directory owned by `ChartImage`. Dropping the value removes the
//! directory, whether rendering succeeded or not.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use printpdf::image_crate::DynamicImage;
use tempfile::TempDir;

use super::ReportError;
use crate::models::RecoveryTrajectory;

pub const CHART_WIDTH_PX: u32 = 900;
pub const CHART_HEIGHT_PX: u32 = 450;
/// Blank border around the plotting area, in pixels.
pub const CHART_MARGIN_PX: u32 = 30;
/// Top of the score axis; leaves headroom above 100.
pub const Y_AXIS_MAX: f64 = 110.0;
pub const Y_GRID_STEP: u32 = 10;

const CHART_FILE_NAME: &str = "recovery_graph.png";

const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);
const LINE_COLOR: RGBColor = RGBColor(0, 0, 255);

/// A rendered chart on disk, removed when dropped.
#[derive(Debug)]
pub struct ChartImage {
    _dir: TempDir,
    path: PathBuf,
}

impl ChartImage {
    /// Draws the trajectory into a fresh temporary directory.
    pub fn render(trajectory: &RecoveryTrajectory) -> Result<Self, ReportError> {
        let dir = tempfile::Builder::new()
            .prefix("discharge-chart-")
            .tempdir()?;
        let path = dir.path().join(CHART_FILE_NAME);

        // On error `dir` drops here and takes any partial file with it.
        draw(trajectory, &path)?;

        tracing::debug!(path = %path.display(), "Chart image written");
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decodes the PNG for embedding.
    pub fn decode(&self) -> Result<DynamicImage, ReportError> {
        printpdf::image_crate::open(&self.path).map_err(|e| ReportError::Image(e.to_string()))
    }
}

/// Horizontal pixel centre of point `index` out of `count`, from the image's left edge.
pub fn point_x_px(index: usize, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let plot_width = f64::from(CHART_WIDTH_PX - 2 * CHART_MARGIN_PX);
    f64::from(CHART_MARGIN_PX) + (index as f64 + 0.5) / count * plot_width
}

/// Vertical pixel position of `score`, from the image's top edge.
pub fn score_y_px(score: f64) -> f64 {
    let plot_height = f64::from(CHART_HEIGHT_PX - 2 * CHART_MARGIN_PX);
    f64::from(CHART_MARGIN_PX) + (Y_AXIS_MAX - score) / Y_AXIS_MAX * plot_height
}

fn draw(trajectory: &RecoveryTrajectory, path: &Path) -> Result<(), ReportError> {
    let chart_err = |e: &dyn std::fmt::Display| ReportError::Chart(e.to_string());

    let count = trajectory.len().max(1);
    let x_max = count as f64 - 0.5;

    let root = BitMapBackend::new(path, (CHART_WIDTH_PX, CHART_HEIGHT_PX)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| chart_err(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(CHART_MARGIN_PX)
        .build_cartesian_2d(-0.5f64..x_max, 0f64..Y_AXIS_MAX)
        .map_err(|e| chart_err(&e))?;

    // Grid: one horizontal line per 10 points, one vertical line per day.
    let grid = ShapeStyle::from(&GRID_COLOR).stroke_width(1);
    chart
        .draw_series((0..=Y_AXIS_MAX as u32).step_by(Y_GRID_STEP as usize).map(|y| {
            PathElement::new(vec![(-0.5, f64::from(y)), (x_max, f64::from(y))], grid)
        }))
        .map_err(|e| chart_err(&e))?;
    chart
        .draw_series((0..count).map(|i| {
            PathElement::new(vec![(i as f64, 0.0), (i as f64, Y_AXIS_MAX)], grid)
        }))
        .map_err(|e| chart_err(&e))?;

    // Axes
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(-0.5, Y_AXIS_MAX), (-0.5, 0.0), (x_max, 0.0)],
            BLACK.stroke_width(1),
        )))
        .map_err(|e| chart_err(&e))?;

    let points: Vec<(f64, f64)> = trajectory
        .scores()
        .iter()
        .enumerate()
        .map(|(i, score)| (i as f64, f64::from(*score)))
        .collect();

    chart
        .draw_series(LineSeries::new(points.clone(), LINE_COLOR.stroke_width(2)))
        .map_err(|e| chart_err(&e))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, LINE_COLOR.filled())),
        )
        .map_err(|e| chart_err(&e))?;

    root.present().map_err(|e| chart_err(&e))?;
    Ok(())
}
