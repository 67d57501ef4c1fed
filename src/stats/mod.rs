//! Stats module - summary statistics

mod calculator;

pub use calculator::{StatsCalculator, TechniqueShare};
