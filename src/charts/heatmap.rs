//! Heatmap Module
//! Geographic heat (or scatter) overlay on a world basemap, with colorbar.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;

use crate::charts::colormap::Colormap;
use crate::charts::figure::{ImageFormat, RenderError};
use crate::data::GeoPoint;
use crate::spatial::{Basemap, HeatGrid, LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};

const OUTLINE_COLOR: RGBColor = RGBColor(120, 120, 120);
const POINT_COLOR: RGBColor = RGBColor(214, 39, 40);

/// Width in pixels reserved for the colorbar strip.
const COLORBAR_WIDTH: u32 = 90;

/// What gets drawn over the basemap: the smoothed density grid, or the raw
/// points when `--points` is given.
#[derive(Clone, Copy)]
pub enum HeatLayer<'a> {
    Binned(&'a HeatGrid),
    Points(&'a [GeoPoint]),
}

#[derive(Debug, Clone)]
pub struct HeatmapConfig {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub colormap: Colormap,
    pub colorbar_label: String,
    pub show_colorbar: bool,
    pub outline_width: u32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 900,
            title: None,
            x_label: "Longitude".to_string(),
            y_label: "Latitude".to_string(),
            colormap: Colormap::Jet,
            colorbar_label: "Log Frequency".to_string(),
            show_colorbar: true,
            outline_width: 1,
        }
    }
}

/// Render the heatmap figure to `path`, overwriting any existing file there.
/// An all-zero grid (or empty point set) yields a basemap-only figure.
pub fn render_heatmap(
    layer: HeatLayer<'_>,
    basemap: Option<&Basemap>,
    config: &HeatmapConfig,
    path: &Path,
    format: ImageFormat,
) -> Result<(), RenderError> {
    let size = (config.width, config.height);
    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw(&root, layer, basemap, config)?;
            root.present().map_err(RenderError::backend)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw(&root, layer, basemap, config)?;
            root.present().map_err(RenderError::backend)?;
        }
    }
    log::info!("wrote figure to {}", path.display());
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layer: HeatLayer<'_>,
    basemap: Option<&Basemap>,
    config: &HeatmapConfig,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(RenderError::backend)?;

    let heat_grid = match layer {
        HeatLayer::Binned(grid) if !grid.is_blank() => Some(grid),
        _ => None,
    };
    let show_bar = config.show_colorbar && heat_grid.is_some();

    let (map_area, bar_area) = if show_bar {
        let (left, right) = root.split_horizontally((config.width - COLORBAR_WIDTH) as i32);
        (left, Some(right))
    } else {
        (root.clone(), None)
    };

    let mut builder = ChartBuilder::on(&map_area);
    builder
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60);
    if let Some(title) = &config.title {
        builder.caption(title, ("sans-serif", 26));
    }
    let mut chart = builder
        .build_cartesian_2d(LON_MIN..LON_MAX, LAT_MIN..LAT_MAX)
        .map_err(RenderError::backend)?;

    // The mesh doubles as the graticule.
    chart
        .configure_mesh()
        .x_labels(13)
        .y_labels(7)
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(RenderError::backend)?;

    if let Some(grid) = heat_grid {
        let max_value = grid.max_value();
        let (bins_x, bins_y) = grid.bins();
        let mut cells = Vec::new();
        for iy in 0..bins_y {
            for ix in 0..bins_x {
                let value = grid.value(ix, iy);
                if value <= 0.0 {
                    continue;
                }
                let ((lon0, lon1), (lat0, lat1)) = grid.cell_bounds(ix, iy);
                cells.push(Rectangle::new(
                    [(lon0, lat0), (lon1, lat1)],
                    config.colormap.sample(value / max_value).filled(),
                ));
            }
        }
        chart.draw_series(cells).map_err(RenderError::backend)?;
    }

    // Outlines go above the heat layer so coastlines stay visible.
    if let Some(basemap) = basemap {
        for outline in basemap.outlines() {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    outline.coords().map(|c| (c.x, c.y)).collect::<Vec<_>>(),
                    OUTLINE_COLOR.stroke_width(config.outline_width),
                )))
                .map_err(RenderError::backend)?;
        }
    }

    if let HeatLayer::Points(points) = layer {
        chart
            .draw_series(
                points
                    .iter()
                    .map(|p| Circle::new((p.longitude, p.latitude), 3, POINT_COLOR.filled())),
            )
            .map_err(RenderError::backend)?;
    }

    if let (Some(bar_area), Some(grid)) = (bar_area, heat_grid) {
        draw_colorbar(&bar_area, config, grid.max_value())?;
    }
    Ok(())
}

/// Vertical gradient strip with value ticks and a rotated label, emulating
/// the reference figure's colorbar.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    config: &HeatmapConfig,
    max_value: f64,
) -> Result<(), RenderError> {
    let (width, height) = area.dim_in_pixel();
    let top = 40i32;
    let bottom = 60i32;
    let span = height as i32 - top - bottom;
    let (bar_x0, bar_x1) = (8i32, 26i32);

    let steps = 64;
    for i in 0..steps {
        let t0 = i as f64 / steps as f64;
        let t1 = (i + 1) as f64 / steps as f64;
        let y0 = top + span - (t1 * span as f64) as i32;
        let y1 = top + span - (t0 * span as f64) as i32;
        area.draw(&Rectangle::new(
            [(bar_x0, y0), (bar_x1, y1)],
            config.colormap.sample((t0 + t1) / 2.0).filled(),
        ))
        .map_err(RenderError::backend)?;
    }
    area.draw(&Rectangle::new(
        [(bar_x0, top), (bar_x1, top + span)],
        BLACK.stroke_width(1),
    ))
    .map_err(RenderError::backend)?;

    let ticks = 5;
    for k in 0..ticks {
        let f = k as f64 / (ticks - 1) as f64;
        let y = top + span - (f * span as f64) as i32;
        area.draw(&Text::new(
            format!("{:.1}", max_value * f),
            (bar_x1 + 6, y - 7),
            ("sans-serif", 13).into_font().color(&BLACK),
        ))
        .map_err(RenderError::backend)?;
    }

    let label = &config.colorbar_label;
    area.draw(&Text::new(
        label.to_string(),
        (
            width as i32 - 12,
            top + span / 2 - label.len() as i32 * 4,
        ),
        ("sans-serif", 15)
            .into_font()
            .transform(FontTransform::Rotate90)
            .color(&BLACK),
    ))
    .map_err(RenderError::backend)?;
    Ok(())
}
