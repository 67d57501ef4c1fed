//! Bar Chart Module
//! Stacked papers-per-year chart, one colored segment per technique.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::charts::figure::{ImageFormat, RenderError};
use crate::data::{Technique, TechniqueCounts};

/// Matplotlib default category colors, matching the reference figure.
pub const TECHNIQUE_PALETTE: [RGBColor; 3] = [
    RGBColor(31, 119, 180),  // tab:blue
    RGBColor(255, 127, 14),  // tab:orange
    RGBColor(44, 160, 44),   // tab:green
];

#[derive(Debug, Clone)]
pub struct BarChartConfig {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub show_legend: bool,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 750,
            title: None,
            x_label: "Year".to_string(),
            y_label: "Number of Papers".to_string(),
            legend_title: "Techniques".to_string(),
            show_legend: true,
        }
    }
}

/// Render the stacked technique chart to `path`, overwriting any existing
/// file there.
pub fn render_technique_chart(
    counts: &TechniqueCounts,
    config: &BarChartConfig,
    path: &Path,
    format: ImageFormat,
) -> Result<(), RenderError> {
    let size = (config.width, config.height);
    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw(&root, counts, config)?;
            root.present().map_err(RenderError::backend)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw(&root, counts, config)?;
            root.present().map_err(RenderError::backend)?;
        }
    }
    log::info!("wrote figure to {}", path.display());
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    counts: &TechniqueCounts,
    config: &BarChartConfig,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(RenderError::backend)?;

    let (x_min, x_max) = counts
        .year_range()
        .map(|(min, max)| (min as f64 - 0.6, max as f64 + 0.6))
        .unwrap_or((0.0, 1.0));
    let y_max = (counts.max_year_total() as f64 * 1.05).max(1.0);

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(20)
        .x_label_area_size(55)
        .y_label_area_size(65);
    if let Some(title) = &config.title {
        builder.caption(title, ("sans-serif", 26));
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(RenderError::backend)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 14))
        // Label only whole years; the float axis exists for bar placement.
        .x_label_formatter(&|v| {
            let rounded = v.round();
            if (v - rounded).abs() < 0.05 {
                format!("{}", rounded as i64)
            } else {
                String::new()
            }
        })
        .draw()
        .map_err(RenderError::backend)?;

    for tech in Technique::ALL {
        let color = TECHNIQUE_PALETTE[tech.index()];
        chart
            .draw_series(counts.years().filter_map(|year| {
                let base: u64 = Technique::ALL[..tech.index()]
                    .iter()
                    .map(|t| counts.count(year, *t))
                    .sum();
                let value = counts.count(year, tech);
                if value == 0 {
                    return None;
                }
                let x = year as f64;
                Some(Rectangle::new(
                    [(x - 0.4, base as f64), (x + 0.4, (base + value) as f64)],
                    color.filled(),
                ))
            }))
            .map_err(RenderError::backend)?;
    }

    if config.show_legend {
        let (x_range, y_range) = chart.plotting_area().get_pixel_range();
        draw_legend(root, (x_range.start, y_range.start), &config.legend_title)?;
    }
    Ok(())
}

/// Legend box drawn in the upper-left corner of the plot area, with a title
/// line followed by one swatch per technique.
fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot_origin: (i32, i32),
    title: &str,
) -> Result<(), RenderError> {
    let x0 = plot_origin.0 + 14;
    let y0 = plot_origin.1 + 12;

    let box_size = 14;
    let line_height = 22;
    let legend_width = 200;
    let legend_height = line_height * (Technique::ALL.len() as i32 + 1) + 16;

    root.draw(&Rectangle::new(
        [
            (x0 - 8, y0 - 8),
            (x0 + legend_width, y0 + legend_height),
        ],
        WHITE.mix(0.85).filled(),
    ))
    .map_err(RenderError::backend)?;
    root.draw(&Rectangle::new(
        [
            (x0 - 8, y0 - 8),
            (x0 + legend_width, y0 + legend_height),
        ],
        BLACK.stroke_width(1),
    ))
    .map_err(RenderError::backend)?;

    root.draw(&Text::new(
        title.to_string(),
        (x0, y0),
        ("sans-serif", 16).into_font().color(&BLACK),
    ))
    .map_err(RenderError::backend)?;

    for (i, tech) in Technique::ALL.iter().enumerate() {
        let y = y0 + line_height * (i as i32 + 1);
        root.draw(&Rectangle::new(
            [(x0, y), (x0 + box_size, y + box_size)],
            TECHNIQUE_PALETTE[tech.index()].filled(),
        ))
        .map_err(RenderError::backend)?;
        root.draw(&Text::new(
            tech.label().to_string(),
            (x0 + box_size + 8, y),
            ("sans-serif", 15).into_font().color(&BLACK),
        ))
        .map_err(RenderError::backend)?;
    }
    Ok(())
}
