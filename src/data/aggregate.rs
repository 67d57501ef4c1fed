//! Aggregation Module
//! Year-by-technique counts backing the stacked bar chart.

use std::collections::BTreeMap;

use crate::data::records::{LiteratureRecord, Technique};

/// Counts of papers per (year, technique), densified so every year between
/// the observed minimum and maximum is present (zeros included). Built once
/// and never mutated afterwards; iteration order is ascending year.
#[derive(Debug, Clone, Default)]
pub struct TechniqueCounts {
    counts: BTreeMap<i32, [u64; 3]>,
}

impl TechniqueCounts {
    pub fn from_records(records: &[LiteratureRecord]) -> Self {
        let mut counts: BTreeMap<i32, [u64; 3]> = BTreeMap::new();
        for record in records {
            let per_year = counts.entry(record.year).or_insert([0; 3]);
            for tech in &record.techniques {
                per_year[tech.index()] += 1;
            }
        }

        // Fill year gaps with zeros so the time axis is complete.
        let span = counts
            .keys()
            .next()
            .copied()
            .zip(counts.keys().last().copied());
        if let Some((min, max)) = span {
            for year in min..=max {
                counts.entry(year).or_insert([0; 3]);
            }
        }

        Self { counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Years in ascending order, gap-free.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.counts.keys().copied()
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        self.counts
            .keys()
            .next()
            .copied()
            .zip(self.counts.keys().last().copied())
    }

    pub fn count(&self, year: i32, technique: Technique) -> u64 {
        self.counts
            .get(&year)
            .map(|c| c[technique.index()])
            .unwrap_or(0)
    }

    /// Sum over all techniques for one year (the stacked bar height).
    pub fn year_total(&self, year: i32) -> u64 {
        self.counts
            .get(&year)
            .map(|c| c.iter().sum())
            .unwrap_or(0)
    }

    /// Sum over years for one technique, optionally restricted to
    /// `year >= from`.
    pub fn technique_total(&self, technique: Technique, from: Option<i32>) -> u64 {
        self.counts
            .iter()
            .filter(|(year, _)| from.map(|f| **year >= f).unwrap_or(true))
            .map(|(_, c)| c[technique.index()])
            .sum()
    }

    pub fn grand_total(&self, from: Option<i32>) -> u64 {
        Technique::ALL
            .iter()
            .map(|t| self.technique_total(*t, from))
            .sum()
    }

    /// Height of the tallest stacked bar, used to size the value axis.
    pub fn max_year_total(&self) -> u64 {
        self.counts
            .values()
            .map(|c| c.iter().sum())
            .max()
            .unwrap_or(0)
    }
}
