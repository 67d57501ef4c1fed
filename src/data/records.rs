//! Record Types Module
//! Typed rows for both pipelines, with range validation.

use thiserror::Error;

/// Years outside this range are treated as data-entry errors and skipped.
pub const YEAR_MIN: i32 = 1900;
pub const YEAR_MAX: i32 = 2100;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("publication year {0} outside plausible range {YEAR_MIN}..={YEAR_MAX}")]
    YearOutOfRange(i32),
    #[error("coordinates ({lat}, {lon}) outside valid geographic range")]
    CoordinateOutOfRange { lat: f64, lon: f64 },
}

/// The closed technique vocabulary of the literature CSV.
///
/// Declaration order matches the column order of the input schema and fixes
/// the rendering order, so figures are reproducible across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technique {
    ImageProcessing,
    MachineLearning,
    DeepLearning,
}

impl Technique {
    pub const ALL: [Technique; 3] = [
        Technique::ImageProcessing,
        Technique::MachineLearning,
        Technique::DeepLearning,
    ];

    /// Column name in the input CSV.
    pub fn column(&self) -> &'static str {
        match self {
            Technique::ImageProcessing => "Image_Processing",
            Technique::MachineLearning => "Machine_Learning",
            Technique::DeepLearning => "Deep_Learning",
        }
    }

    /// Human-readable label used in legends and statistics output.
    pub fn label(&self) -> &'static str {
        match self {
            Technique::ImageProcessing => "Image Processing",
            Technique::MachineLearning => "Machine Learning",
            Technique::DeepLearning => "Deep Learning",
        }
    }

    /// Position in [`Technique::ALL`], used for palette lookup.
    pub fn index(&self) -> usize {
        match self {
            Technique::ImageProcessing => 0,
            Technique::MachineLearning => 1,
            Technique::DeepLearning => 2,
        }
    }
}

/// One paper from the literature CSV. A paper tagged with several techniques
/// contributes one count to each of them.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteratureRecord {
    pub year: i32,
    pub techniques: Vec<Technique>,
}

impl LiteratureRecord {
    pub fn new(year: i32, techniques: Vec<Technique>) -> Result<Self, ValidationError> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(ValidationError::YearOutOfRange(year));
        }
        Ok(Self { year, techniques })
    }
}

/// One image-data source location from the lat/long CSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::CoordinateOutOfRange {
                lat: latitude,
                lon: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_year() {
        let record = LiteratureRecord::new(2018, vec![Technique::DeepLearning]).unwrap();
        assert_eq!(record.year, 2018);
    }

    #[test]
    fn rejects_implausible_years() {
        assert_eq!(
            LiteratureRecord::new(1800, vec![]),
            Err(ValidationError::YearOutOfRange(1800))
        );
        assert_eq!(
            LiteratureRecord::new(3000, vec![]),
            Err(ValidationError::YearOutOfRange(3000))
        );
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }
}
