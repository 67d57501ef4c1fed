//! Basemap Module
//! World outline geometry loaded from a GeoJSON file supplied on the CLI.
//!
//! The basemap is an external collaborator: it is injected via configuration
//! (`--basemap <path>`), never bundled or downloaded. Without one the map is
//! rendered with graticule and axes only.

use std::path::{Path, PathBuf};

use geo::{Coord, LineString};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BasemapError {
    #[error("basemap file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read basemap: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported GeoJSON geometry type: {0}")]
    UnsupportedGeometry(String),
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Value>,
}

/// Country/coastline outlines drawn behind (or above) the heat layer.
#[derive(Debug)]
pub struct Basemap {
    outlines: Vec<LineString<f64>>,
}

impl Basemap {
    pub fn from_geojson_file(path: &Path) -> Result<Self, BasemapError> {
        if !path.is_file() {
            return Err(BasemapError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&text)
    }

    pub fn from_geojson_str(text: &str) -> Result<Self, BasemapError> {
        let collection: FeatureCollection = serde_json::from_str(text)?;

        let mut outlines = Vec::new();
        for feature in &collection.features {
            let Some(geometry) = &feature.geometry else {
                continue;
            };
            outlines.extend(outlines_from_geometry(geometry)?);
        }

        log::debug!("basemap holds {} outline rings", outlines.len());
        Ok(Self { outlines })
    }

    pub fn outlines(&self) -> &[LineString<f64>] {
        &self.outlines
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }
}

fn outlines_from_geometry(geometry: &Value) -> Result<Vec<LineString<f64>>, BasemapError> {
    let gtype = geometry
        .get("type")
        .and_then(|t| t.as_str())
        .unwrap_or_default();
    let coordinates = geometry.get("coordinates").cloned().unwrap_or(Value::Null);

    match gtype {
        "Polygon" => {
            let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(coordinates)?;
            Ok(rings.iter().map(|r| ring_to_line(r)).collect())
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<Vec<Vec<f64>>>> = serde_json::from_value(coordinates)?;
            Ok(polygons
                .iter()
                .flatten()
                .map(|r| ring_to_line(r))
                .collect())
        }
        "LineString" => {
            let line: Vec<Vec<f64>> = serde_json::from_value(coordinates)?;
            Ok(vec![ring_to_line(&line)])
        }
        "MultiLineString" => {
            let lines: Vec<Vec<Vec<f64>>> = serde_json::from_value(coordinates)?;
            Ok(lines.iter().map(|r| ring_to_line(r)).collect())
        }
        other => Err(BasemapError::UnsupportedGeometry(other.to_string())),
    }
}

fn ring_to_line(ring: &[Vec<f64>]) -> LineString<f64> {
    LineString::new(
        ring.iter()
            .filter(|pos| pos.len() >= 2)
            .map(|pos| Coord {
                x: pos[0],
                y: pos[1],
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "a"}, "geometry":
                    {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}},
                {"type": "Feature", "properties": {"name": "b"}, "geometry":
                    {"type": "MultiPolygon", "coordinates": [
                        [[[10.0, 10.0], [12.0, 10.0], [12.0, 12.0], [10.0, 10.0]]],
                        [[[-5.0, -5.0], [-4.0, -5.0], [-4.0, -4.0], [-5.0, -5.0]]]
                    ]}},
                {"type": "Feature", "properties": {}, "geometry": null}
            ]
        }"#;

        let basemap = Basemap::from_geojson_str(text).unwrap();
        assert_eq!(basemap.outlines().len(), 3);
        assert_eq!(basemap.outlines()[0].0[1], Coord { x: 1.0, y: 0.0 });
    }

    #[test]
    fn point_geometry_is_rejected() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}}
            ]
        }"#;

        let err = Basemap::from_geojson_str(text).unwrap_err();
        assert!(matches!(err, BasemapError::UnsupportedGeometry(t) if t == "Point"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Basemap::from_geojson_file(Path::new("/no/such/map.geojson")).unwrap_err();
        assert!(matches!(err, BasemapError::FileNotFound(_)));
    }
}
