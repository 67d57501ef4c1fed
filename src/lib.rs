//! Benthos Figures - publication figure generation
//!
//! Library behind the `techniques` and `heatmap` binaries. Each figure is a
//! single pass: load a CSV, aggregate, render an image.

pub mod charts;
pub mod data;
pub mod spatial;
pub mod stats;
