//! Dispersion vs mean expression scatter plot

use std::error::Error;
use std::path::Path;

use log::{info, warn};
use plotters::prelude::*;

use crate::error::{Result, VarGenesError};
use crate::io::VariableGeneResults;

/// Appearance of the scatter plot
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Image size in pixels
    pub width: u32,
    pub height: u32,
    /// Marker radius in pixels
    pub point_size: i32,
    pub font_size: u32,
    pub inlier_color: (u8, u8, u8),
    pub outlier_color: (u8, u8, u8),
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            point_size: 5,
            font_size: 22,
            // teal, red
            inlier_color: (0, 128, 128),
            outlier_color: (255, 0, 0),
        }
    }
}

impl PlotStyle {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VarGenesError::InvalidConfig {
                reason: format!("plot size must be non-zero, got {}x{}", self.width, self.height),
            });
        }
        if self.point_size <= 0 {
            return Err(VarGenesError::InvalidConfig {
                reason: format!("plot point size must be positive, got {}", self.point_size),
            });
        }
        Ok(())
    }
}

/// Whole-decade axis range covering every finite positive value.
///
/// Returns `None` when there is nothing to plot on a log axis.
pub fn decade_range(values: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite() && **v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if min > max {
        return None;
    }

    let lo = 10f64.powi(min.log10().floor() as i32);
    let mut hi = 10f64.powi(max.log10().ceil() as i32);
    if hi <= lo {
        hi = lo * 10.0;
    }
    Some((lo, hi))
}

/// Number of whole decades between two powers of ten
fn decade_count(lo: f64, hi: f64) -> usize {
    (hi / lo).log10().round().max(1.0) as usize
}

/// Axis label for a log tick: the value at powers of ten, blank elsewhere
pub fn decade_label(value: f64) -> String {
    let exponent = value.log10().round();
    if value > 0.0 && (value.log10() - exponent).abs() < 1e-9 {
        format!("{}", 10f64.powi(exponent as i32))
    } else {
        String::new()
    }
}

/// Render dispersion (y) against basemean (x) on log-log axes, colored by
/// outlier flag.
///
/// The image format follows the file extension (`.png`, `.jpg`, ...). An
/// empty result table is skipped with a warning.
pub fn plot_dispersion_vs_mean<P: AsRef<Path>>(
    results: &VariableGeneResults,
    path: P,
    style: &PlotStyle,
) -> Result<()> {
    let path = path.as_ref();

    let ranges = decade_range(&results.base_means).zip(decade_range(&results.dispersions));
    let Some((x_range, y_range)) = ranges else {
        warn!("No genes to plot. Skipping {}", path.display());
        return Ok(());
    };

    draw_scatter(results, path, style, x_range, y_range).map_err(|e| VarGenesError::PlotFailed {
        reason: format!("{}: {}", path.display(), e),
    })?;

    info!("Scatter plot saved: {}", path.display());
    Ok(())
}

fn draw_scatter(
    results: &VariableGeneResults,
    path: &Path,
    style: &PlotStyle,
    (x_lo, x_hi): (f64, f64),
    (y_lo, y_hi): (f64, f64),
) -> std::result::Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .margin(25)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), (y_lo..y_hi).log_scale())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Mean expression")
        .y_desc("Dispersion")
        .x_labels(decade_count(x_lo, x_hi) + 1)
        .y_labels(decade_count(y_lo, y_hi) + 1)
        .x_label_formatter(&|v| decade_label(*v))
        .y_label_formatter(&|v| decade_label(*v))
        .label_style(("sans-serif", style.font_size))
        .axis_desc_style(("sans-serif", style.font_size))
        .draw()?;

    let series = [
        (false, style.inlier_color, "Dispersion outlier: False"),
        (true, style.outlier_color, "Dispersion outlier: True"),
    ];
    for (flag, (r, g, b), label) in series {
        let color = RGBColor(r, g, b);
        let radius = style.point_size;
        let points: Vec<(f64, f64)> = results
            .outliers
            .iter()
            .enumerate()
            .filter(|(_, &o)| o == flag)
            .map(|(i, _)| (results.base_means[i], results.dispersions[i]))
            .collect();

        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, radius, color.filled())))?
            .label(label)
            .legend(move |(x, y)| Circle::new((x, y), radius, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root_area.present()?;
    Ok(())
}
