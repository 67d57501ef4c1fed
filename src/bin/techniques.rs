//! Techniques figure
//! Stacked bar chart of benthic computer vision literature per year,
//! subdivided by the techniques each paper used.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use benthos_figures::charts::{render_technique_chart, BarChartConfig, ImageFormat};
use benthos_figures::data::{CsvSource, RecordExtractor, TechniqueCounts, TECHNIQUE_COLUMNS};
use benthos_figures::stats::StatsCalculator;

/// Generate a stacked bar chart showing the progression of computer
/// vision-based benthic biodiversity monitoring literature over time,
/// subdivided by techniques utilised.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the input CSV file containing the publication data.
    input: PathBuf,

    /// Path for the output image file (.png or .svg).
    output: PathBuf,

    /// Restrict the printed statistics to publications from this year on.
    /// The chart itself always covers the full range.
    #[arg(long, value_name = "YEAR")]
    after_year_only: Option<i32>,

    /// Figure size in pixels.
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [1500, 750])]
    fig_size: Vec<u32>,

    /// Output format; defaults to the output path extension, then png.
    #[arg(long)]
    format: Option<ImageFormat>,

    /// Title drawn above the chart.
    #[arg(long)]
    title: Option<String>,

    /// Label for the x-axis.
    #[arg(long, default_value = "Year")]
    xlabel: String,

    /// Label for the y-axis.
    #[arg(long, default_value = "Number of Papers")]
    ylabel: String,

    /// Title of the legend.
    #[arg(long, default_value = "Techniques")]
    legend_title: String,

    /// Do not draw the legend.
    #[arg(long)]
    no_show_legend: bool,

    /// Do not print technique statistics after rendering.
    #[arg(long)]
    no_print_stats: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let format = ImageFormat::resolve(cli.format, &cli.output);
    let source = CsvSource::open(&cli.input, &TECHNIQUE_COLUMNS)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    let records = RecordExtractor::literature_records(source.dataframe())?;
    let counts = TechniqueCounts::from_records(&records);

    let config = BarChartConfig {
        width: cli.fig_size[0],
        height: cli.fig_size[1],
        title: cli.title,
        x_label: cli.xlabel,
        y_label: cli.ylabel,
        legend_title: cli.legend_title,
        show_legend: !cli.no_show_legend,
    };
    render_technique_chart(&counts, &config, &cli.output, format)
        .with_context(|| format!("rendering {}", cli.output.display()))?;

    if !cli.no_print_stats {
        if let Some(year) = cli.after_year_only {
            println!("Stats after {year}:");
        }
        for share in StatsCalculator::technique_shares(&counts, cli.after_year_only) {
            println!(
                "Percentage of papers that used {}: {:.1}% ({} papers)",
                share.technique.label(),
                share.percent,
                share.count
            );
        }
    }
    Ok(())
}
