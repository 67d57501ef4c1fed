//! Statistics Calculator Module
//! Summary statistics printed after the techniques chart is rendered.

use crate::data::{Technique, TechniqueCounts};

/// Share of one technique among all technique tags in the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct TechniqueShare {
    pub technique: Technique,
    pub count: u64,
    pub percent: f64,
}

/// Computes the per-technique breakdown reported alongside the figure.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Percentage of technique tags per technique, optionally restricted to
    /// publications from `from_year` onwards. The restriction affects only
    /// this report; the chart always covers the full range.
    pub fn technique_shares(
        counts: &TechniqueCounts,
        from_year: Option<i32>,
    ) -> Vec<TechniqueShare> {
        let total = counts.grand_total(from_year);

        Technique::ALL
            .iter()
            .map(|tech| {
                let count = counts.technique_total(*tech, from_year);
                let percent = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                };
                TechniqueShare {
                    technique: *tech,
                    count,
                    percent,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LiteratureRecord;

    #[test]
    fn shares_sum_to_one_hundred() {
        let records = vec![
            LiteratureRecord::new(2018, vec![Technique::DeepLearning]).unwrap(),
            LiteratureRecord::new(2018, vec![Technique::DeepLearning]).unwrap(),
            LiteratureRecord::new(2019, vec![Technique::MachineLearning]).unwrap(),
            LiteratureRecord::new(2020, vec![Technique::ImageProcessing]).unwrap(),
        ];
        let counts = TechniqueCounts::from_records(&records);
        let shares = StatsCalculator::technique_shares(&counts, None);

        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(shares[2].count, 2);
        assert_eq!(shares[2].percent, 50.0);
    }

    #[test]
    fn cutoff_restricts_the_report() {
        let records = vec![
            LiteratureRecord::new(2010, vec![Technique::ImageProcessing]).unwrap(),
            LiteratureRecord::new(2020, vec![Technique::DeepLearning]).unwrap(),
        ];
        let counts = TechniqueCounts::from_records(&records);
        let shares = StatsCalculator::technique_shares(&counts, Some(2015));

        assert_eq!(shares[0].count, 0);
        assert_eq!(shares[2].percent, 100.0);
    }

    #[test]
    fn empty_aggregate_reports_zero_shares() {
        let counts = TechniqueCounts::from_records(&[]);
        for share in StatsCalculator::technique_shares(&counts, None) {
            assert_eq!(share.count, 0);
            assert_eq!(share.percent, 0.0);
        }
    }
}
