//! Charts module - static figure rendering

mod barchart;
mod colormap;
mod figure;
mod heatmap;

pub use barchart::{render_technique_chart, BarChartConfig, TECHNIQUE_PALETTE};
pub use colormap::Colormap;
pub use figure::{ImageFormat, RenderError};
pub use heatmap::{render_heatmap, HeatLayer, HeatmapConfig};
