//! Data module - CSV loading, typed records, aggregation

mod aggregate;
mod loader;
mod processor;
mod records;

pub use aggregate::TechniqueCounts;
pub use loader::{CsvSource, LoaderError};
pub use processor::{ProcessorError, RecordExtractor, GEO_COLUMNS, TECHNIQUE_COLUMNS};
pub use records::{GeoPoint, LiteratureRecord, Technique, ValidationError, YEAR_MAX, YEAR_MIN};
