use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::styles::{to_rgb, ChartStyle, ChartTheme};
use crate::error::DashboardError;
use crate::types::ChartPoint;

type PlotError = Box<dyn Error + Send + Sync>;

type LineChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// A rasterised chart plus the pixel centre of every point marker.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub width: u32,
    pub height: u32,
    /// Packed RGB rows
    pub pixels: Vec<u8>,
    pub markers: Vec<(f32, f32)>,
}

impl RenderedChart {
    /// Index of the marker horizontally closest to `x` (in image pixels)
    pub fn nearest_point(&self, x: f32) -> Option<usize> {
        self.markers
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (a.0 - x).abs().total_cmp(&(b.0 - x).abs()))
            .map(|(idx, _)| idx)
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgb([self.width as usize, self.height as usize], &self.pixels)
    }

    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

/// Render the commits line chart into an in-memory RGB buffer
pub fn render_line_chart(
    points: &[ChartPoint],
    width: u32,
    height: u32,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<RenderedChart, PlotError> {
    if width == 0 || height == 0 {
        return Err(format!("cannot render a {}x{} chart", width, height).into());
    }

    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    let markers = {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&to_rgb(theme.background))?;

        let mut chart = build_chart(&root, points, style)?;
        draw_mesh(&mut chart, points, theme, style)?;
        draw_commits(&mut chart, points, theme, style)?;
        let markers = marker_positions(&chart, points);

        root.present()?;
        markers
    };

    Ok(RenderedChart {
        width,
        height,
        pixels,
        markers,
    })
}

/// Render the chart and write it to `path`; the format follows the file extension
pub fn export_png(
    points: &[ChartPoint],
    path: &Path,
    width: u32,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> crate::error::Result<()> {
    let height = style.chart_height.round() as u32;
    let chart = render_line_chart(points, width, height, theme, style)
        .map_err(|e| DashboardError::Render(e.to_string()))?;
    let image = chart
        .to_rgb_image()
        .ok_or_else(|| DashboardError::Render("pixel buffer does not match chart size".to_string()))?;
    image.save(path)?;

    log::info!("Wrote {} points to {}", points.len(), path.display());
    Ok(())
}

/// Y range from zero to a little above the busiest day
pub fn y_axis_range(points: &[ChartPoint]) -> (f64, f64) {
    let max = points.iter().map(|p| p.commits).max().unwrap_or(0) as f64;
    (0.0, (max * 1.1).ceil().max(1.0))
}

/// Show every `step`-th x label so at most `max_labels` appear
pub fn label_step(len: usize, max_labels: usize) -> usize {
    len.div_ceil(max_labels.max(1)).max(1)
}

pub(crate) fn build_chart<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    points: &[ChartPoint],
    style: &ChartStyle,
) -> Result<LineChart<'a, DB>, DrawingAreaErrorKind<DB::ErrorType>> {
    let (y_min, y_max) = y_axis_range(points);
    let x_max = points.len().max(1) as f64 - 0.5;

    ChartBuilder::on(root)
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size)
        .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)
}

fn draw_mesh<DB: DrawingBackend>(
    chart: &mut LineChart<'_, DB>,
    points: &[ChartPoint],
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let step = label_step(points.len(), style.max_x_labels);

    // Only integer positions carry a day
    let x_label_formatter = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        let idx = idx as usize;
        if idx % step == 0 {
            points.get(idx).map(|p| p.date.clone()).unwrap_or_default()
        } else {
            String::new()
        }
    };
    let y_label_formatter = |y: &f64| {
        if y.fract().abs() > 1e-6 {
            String::new()
        } else {
            format!("{:.0}", y)
        }
    };

    let text = to_rgb(theme.text);
    chart
        .configure_mesh()
        .x_labels(points.len().max(2))
        .y_labels(6)
        .light_line_style(TRANSPARENT)
        .bold_line_style(to_rgb(theme.grid).stroke_width(1))
        .axis_style(to_rgb(theme.border))
        .label_style(("sans-serif", f64::from(style.font_size)).into_font().color(&text))
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&y_label_formatter)
        .draw()
}

fn draw_commits<DB: DrawingBackend>(
    chart: &mut LineChart<'_, DB>,
    points: &[ChartPoint],
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let accent = to_rgb(theme.accent);
    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, f64::from(p.commits)))
        .collect();

    chart.draw_series(LineSeries::new(
        data.iter().copied(),
        accent.stroke_width(style.line_width),
    ))?;

    chart.draw_series(
        data.iter()
            .map(|&point| Circle::new(point, style.marker_radius, accent.filled())),
    )?;

    Ok(())
}

pub(crate) fn marker_positions<DB: DrawingBackend>(
    chart: &LineChart<'_, DB>,
    points: &[ChartPoint],
) -> Vec<(f32, f32)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let (x, y) = chart.backend_coord(&(i as f64, f64::from(p.commits)));
            (x as f32, y as f32)
        })
        .collect()
}
