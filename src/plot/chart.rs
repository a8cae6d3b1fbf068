//! Grouped bar chart of normalized weekday metrics, rendered to SVG.
//!
//! One group per weekday (centred on integer x), one bar per metric.
//! Undefined or unscalable cells are simply not drawn.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::error::{AppError, EXIT_USAGE};
use crate::report::{METRIC_NAMES, NormalizedRow};

const SIZE: (u32, u32) = (1200, 600);
/// Share of each weekday slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;

const PALETTE: [RGBColor; 5] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
];

/// Render `rows` as an SVG file at `path`.
pub fn write_metrics_chart(path: &Path, title: &str, rows: &[NormalizedRow]) -> Result<(), AppError> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    draw(&root, title, rows)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to render chart '{}': {e}", path.display())))?;
    root.present()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write chart '{}': {e}", path.display())))?;
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    rows: &[NormalizedRow],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let n_days = rows.len().max(1);
    let names: Vec<&'static str> = rows.iter().map(|r| r.weekday.name()).collect();

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n_days as f64 - 0.5), 0f64..1.05f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n_days)
        .x_label_formatter(&|x| weekday_label(&names, *x))
        .y_desc("Normalized Metric Value (0-1)")
        .draw()?;

    let bar_width = GROUP_WIDTH / METRIC_NAMES.len() as f64;
    for (col, name) in METRIC_NAMES.iter().enumerate() {
        let color = PALETTE[col % PALETTE.len()];
        let bars = rows.iter().enumerate().filter_map(move |(i, row)| {
            let v = row.values[col]?;
            let x0 = i as f64 - GROUP_WIDTH / 2.0 + col as f64 * bar_width;
            Some(Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], color.filled()))
        });
        chart
            .draw_series(bars)?
            .label(*name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

/// Weekday name for tick positions that land on a group centre.
fn weekday_label(names: &[&str], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    names.get(i as usize).map(|s| s.to_string()).unwrap_or_default()
}
