//! Data Processor Module
//! Turns loaded DataFrames into validated, typed records.

use polars::prelude::*;
use thiserror::Error;

use crate::data::records::{GeoPoint, LiteratureRecord, Technique};

/// Columns the techniques pipeline requires, in schema order.
pub const TECHNIQUE_COLUMNS: [&str; 4] = [
    "Year",
    "Image_Processing",
    "Machine_Learning",
    "Deep_Learning",
];

/// Columns the heatmap pipeline requires.
pub const GEO_COLUMNS: [&str; 2] = ["Latitude_rounded", "Longitude_rounded"];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Extracts typed records from a DataFrame, skipping and reporting rows that
/// fail validation rather than letting them corrupt the aggregate.
pub struct RecordExtractor;

impl RecordExtractor {
    /// Extract one [`LiteratureRecord`] per row of the techniques CSV.
    ///
    /// A row is skipped (with a warning) when its year is null or outside the
    /// plausible publication range. A nonzero technique cell tags the paper
    /// with that technique.
    pub fn literature_records(df: &DataFrame) -> Result<Vec<LiteratureRecord>, ProcessorError> {
        let year_col = df.column(TECHNIQUE_COLUMNS[0])?.cast(&DataType::Int32)?;
        let years = year_col.i32()?;

        let mut tech_flags: Vec<(Technique, Float64Chunked)> = Vec::new();
        for tech in Technique::ALL {
            let col = df.column(tech.column())?.cast(&DataType::Float64)?;
            tech_flags.push((tech, col.f64()?.clone()));
        }

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = 0usize;

        for i in 0..df.height() {
            let Some(year) = years.get(i) else {
                log::warn!("row {i}: missing or unparsable year, skipping");
                skipped += 1;
                continue;
            };

            let techniques: Vec<Technique> = tech_flags
                .iter()
                .filter(|(_, flags)| flags.get(i).map(|v| v > 0.0).unwrap_or(false))
                .map(|(tech, _)| *tech)
                .collect();

            match LiteratureRecord::new(year, techniques) {
                Ok(record) => records.push(record),
                Err(err) => {
                    log::warn!("row {i}: {err}, skipping");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            log::warn!(
                "kept {} of {} literature rows ({} skipped)",
                records.len(),
                df.height(),
                skipped
            );
        }
        Ok(records)
    }

    /// Extract one [`GeoPoint`] per row of the lat/long CSV, skipping rows
    /// with missing or out-of-range coordinates.
    pub fn geo_points(df: &DataFrame) -> Result<Vec<GeoPoint>, ProcessorError> {
        let lat_col = df.column(GEO_COLUMNS[0])?.cast(&DataType::Float64)?;
        let lats = lat_col.f64()?;
        let lon_col = df.column(GEO_COLUMNS[1])?.cast(&DataType::Float64)?;
        let lons = lon_col.f64()?;

        let mut points = Vec::with_capacity(df.height());
        let mut skipped = 0usize;

        for i in 0..df.height() {
            let (Some(lat), Some(lon)) = (lats.get(i), lons.get(i)) else {
                log::warn!("row {i}: missing coordinate, skipping");
                skipped += 1;
                continue;
            };

            match GeoPoint::new(lat, lon) {
                Ok(point) => points.push(point),
                Err(err) => {
                    log::warn!("row {i}: {err}, skipping");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            log::warn!(
                "kept {} of {} coordinate rows ({} skipped)",
                points.len(),
                df.height(),
                skipped
            );
        }
        Ok(points)
    }
}
