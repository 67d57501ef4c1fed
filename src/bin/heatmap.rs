//! Heatmap figure
//! Geographic origin of the image data behind the reviewed systems, binned
//! and smoothed over a world basemap.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use benthos_figures::charts::{
    render_heatmap, Colormap, HeatLayer, HeatmapConfig, ImageFormat,
};
use benthos_figures::data::{CsvSource, RecordExtractor, GEO_COLUMNS};
use benthos_figures::spatial::{Basemap, EdgeMode, HeatGrid};

/// Generate a heatmap of the geographic origin of image data used to train
/// the reviewed automated benthic image analysis systems.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the input CSV file containing the latitude and longitude data.
    input: PathBuf,

    /// Path for the output image file (.png or .svg).
    output: PathBuf,

    /// Number of histogram bins along longitude and latitude.
    #[arg(long, num_args = 2, value_names = ["NX", "NY"], default_values_t = [100, 100])]
    bins: Vec<usize>,

    /// Gaussian smoothing sigma, in bins; 0 disables smoothing.
    #[arg(long, default_value_t = 1.3)]
    smoothing: f64,

    /// Kernel boundary handling: nearest, reflect, or wrap.
    #[arg(long, default_value = "nearest")]
    edge_mode: EdgeMode,

    /// Colormap for the heat layer: jet, viridis, or inferno.
    #[arg(long, default_value = "jet")]
    cmap: Colormap,

    /// GeoJSON file with country or coastline outlines to draw as basemap.
    #[arg(long)]
    basemap: Option<PathBuf>,

    /// Draw the raw points instead of the binned heat layer.
    #[arg(long)]
    points: bool,

    /// Figure size in pixels.
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [1500, 900])]
    fig_size: Vec<u32>,

    /// Output format; defaults to the output path extension, then png.
    #[arg(long)]
    format: Option<ImageFormat>,

    /// Title drawn above the map.
    #[arg(long)]
    title: Option<String>,

    /// Label for the x-axis.
    #[arg(long, default_value = "Longitude")]
    xlabel: String,

    /// Label for the y-axis.
    #[arg(long, default_value = "Latitude")]
    ylabel: String,

    /// Label for the colorbar.
    #[arg(long, default_value = "Log Frequency")]
    colorbar_label: String,

    /// Do not draw the colorbar.
    #[arg(long)]
    no_colorbar: bool,

    /// Stroke width of basemap outlines in pixels.
    #[arg(long, default_value_t = 1)]
    linewidth: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    anyhow::ensure!(
        cli.bins[0] > 0 && cli.bins[1] > 0,
        "--bins values must be positive"
    );

    let format = ImageFormat::resolve(cli.format, &cli.output);
    let source = CsvSource::open(&cli.input, &GEO_COLUMNS)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    let points = RecordExtractor::geo_points(source.dataframe())?;

    let basemap = match &cli.basemap {
        Some(path) => Some(
            Basemap::from_geojson_file(path)
                .with_context(|| format!("loading basemap {}", path.display()))?,
        ),
        None => None,
    };

    let config = HeatmapConfig {
        width: cli.fig_size[0],
        height: cli.fig_size[1],
        title: cli.title,
        x_label: cli.xlabel,
        y_label: cli.ylabel,
        colormap: cli.cmap,
        colorbar_label: cli.colorbar_label,
        show_colorbar: !cli.no_colorbar,
        outline_width: cli.linewidth,
    };

    let grid;
    let layer = if cli.points {
        HeatLayer::Points(&points)
    } else {
        grid = HeatGrid::bin(&points, cli.bins[0], cli.bins[1])
            .log_scaled()
            .smoothed(cli.smoothing, cli.edge_mode);
        HeatLayer::Binned(&grid)
    };

    render_heatmap(layer, basemap.as_ref(), &config, &cli.output, format)
        .with_context(|| format!("rendering {}", cli.output.display()))?;
    Ok(())
}
