//! CSV Ingest Module
//! Loads an input CSV into a DataFrame using Polars and checks the schema.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("CSV is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// A fully loaded input CSV. Each pipeline declares the columns it needs up
/// front so schema problems surface before any transformation runs.
#[derive(Debug)]
pub struct CsvSource {
    df: DataFrame,
    path: PathBuf,
}

impl CsvSource {
    /// Load a CSV file and verify that every required column is present.
    pub fn open(path: &Path, required_columns: &[&str]) -> Result<Self, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        // Lazy scan, then collect: the files are small enough to hold fully
        // in memory.
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let missing: Vec<String> = required_columns
            .iter()
            .filter(|c| !names.iter().any(|n| n == *c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns(missing));
        }

        log::debug!("loaded {} rows from {}", df.height(), path.display());
        Ok(Self {
            df,
            path: path.to_path_buf(),
        })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
