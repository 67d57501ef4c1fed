//! Spatial module - geographic binning and basemap geometry

mod basemap;
mod grid;

pub use basemap::{Basemap, BasemapError};
pub use grid::{EdgeMode, HeatGrid, LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};
