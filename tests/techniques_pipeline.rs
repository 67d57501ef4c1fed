//! Integration tests for the techniques pipeline: ingest, aggregation, and
//! figure rendering.

use std::fs;
use std::path::{Path, PathBuf};

use benthos_figures::charts::{render_technique_chart, BarChartConfig, ImageFormat};
use benthos_figures::data::{
    CsvSource, LoaderError, RecordExtractor, Technique, TechniqueCounts, TECHNIQUE_COLUMNS,
};

const SAMPLE_CSV: &str = "\
Year,Image_Processing,Machine_Learning,Deep_Learning
2017,1,0,0
2018,0,0,1
2018,0,0,1
2019,0,1,0
2019,1,0,1
";

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn sample_counts(dir: &Path) -> TechniqueCounts {
    let input = write_csv(dir, "papers.csv", SAMPLE_CSV);
    let source = CsvSource::open(&input, &TECHNIQUE_COLUMNS).unwrap();
    let records = RecordExtractor::literature_records(source.dataframe()).unwrap();
    TechniqueCounts::from_records(&records)
}

#[test]
fn aggregate_matches_input_rows() {
    let dir = tempfile::tempdir().unwrap();
    let counts = sample_counts(dir.path());

    assert_eq!(counts.count(2018, Technique::DeepLearning), 2);
    assert_eq!(counts.count(2019, Technique::MachineLearning), 1);
    assert_eq!(counts.year_total(2019), 3); // one paper tagged twice
    assert_eq!(counts.year_range(), Some((2017, 2019)));
}

#[test]
fn full_pipeline_renders_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let counts = sample_counts(dir.path());
    let output = dir.path().join("techniques.png");

    render_technique_chart(&counts, &BarChartConfig::default(), &output, ImageFormat::Png)
        .unwrap();

    let bytes = fs::read(&output).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn rendering_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let counts = sample_counts(dir.path());
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");

    let config = BarChartConfig {
        title: Some("Benthic CV literature".to_string()),
        ..BarChartConfig::default()
    };
    render_technique_chart(&counts, &config, &first, ImageFormat::Png).unwrap();
    render_technique_chart(&counts, &config, &second, ImageFormat::Png).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn svg_output_is_supported() {
    let dir = tempfile::tempdir().unwrap();
    let counts = sample_counts(dir.path());
    let output = dir.path().join("techniques.svg");

    render_technique_chart(&counts, &BarChartConfig::default(), &output, ImageFormat::Svg)
        .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("<svg"));
}

#[test]
fn missing_column_fails_before_any_output_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "bad.csv",
        "Year,Image_Processing\n2018,1\n2019,0\n",
    );
    let output = dir.path().join("never.png");

    let err = CsvSource::open(&input, &TECHNIQUE_COLUMNS).unwrap_err();
    match err {
        LoaderError::MissingColumns(cols) => {
            assert_eq!(cols, vec!["Machine_Learning", "Deep_Learning"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn implausible_years_are_excluded_from_the_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "years.csv",
        "Year,Image_Processing,Machine_Learning,Deep_Learning\n\
         1800,1,0,0\n\
         2019,0,1,0\n\
         3000,0,0,1\n",
    );

    let source = CsvSource::open(&input, &TECHNIQUE_COLUMNS).unwrap();
    let records = RecordExtractor::literature_records(source.dataframe()).unwrap();
    let counts = TechniqueCounts::from_records(&records);

    assert_eq!(counts.grand_total(None), 1);
    assert_eq!(counts.year_range(), Some((2019, 2019)));
}

#[test]
fn empty_input_still_renders_an_axes_only_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "empty.csv",
        "Year,Image_Processing,Machine_Learning,Deep_Learning\n",
    );
    let output = dir.path().join("empty.png");

    let source = CsvSource::open(&input, &TECHNIQUE_COLUMNS).unwrap();
    let records = RecordExtractor::literature_records(source.dataframe()).unwrap();
    let counts = TechniqueCounts::from_records(&records);

    render_technique_chart(&counts, &BarChartConfig::default(), &output, ImageFormat::Png)
        .unwrap();
    assert!(output.exists());
}
