use crate::core::funnel::apply_fraction;
use crate::domain::model::{MarketRecord, SensitivityPoint};
use crate::utils::error::{MarketError, Result};
use std::ops::RangeInclusive;

pub const DEFAULT_SWEEP: RangeInclusive<u32> = 1..=10;

/// SOM elasticity across whole-percent adoption rates.
pub struct SensitivityComputer;

impl SensitivityComputer {
    /// Points are ordered by rate first, then by region in input order.
    pub fn sweep<S: AsRef<str>>(
        region_sams: &[(S, u64)],
        rate_range_percent: RangeInclusive<u32>,
    ) -> Result<Vec<SensitivityPoint>> {
        if *rate_range_percent.end() > 100 && !rate_range_percent.is_empty() {
            return Err(MarketError::invalid_input(
                "sensitivity_range",
                format!(
                    "{}..={}",
                    rate_range_percent.start(),
                    rate_range_percent.end()
                ),
                "adoption percentages cannot exceed 100",
            ));
        }

        let rates = rate_range_percent.clone().count();
        let mut points = Vec::with_capacity(rates * region_sams.len());
        for pct in rate_range_percent {
            let rate = f64::from(pct) / 100.0;
            for (region, sam) in region_sams {
                points.push(SensitivityPoint {
                    region: region.as_ref().to_string(),
                    adoption_pct: pct,
                    som: apply_fraction(*sam, rate),
                });
            }
        }

        Ok(points)
    }

    pub fn sweep_records(
        records: &[MarketRecord],
        rate_range_percent: RangeInclusive<u32>,
    ) -> Result<Vec<SensitivityPoint>> {
        let sams: Vec<(&str, u64)> = records
            .iter()
            .map(|r| (r.region.as_str(), r.funnel.sam))
            .collect();
        Self::sweep(&sams, rate_range_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sweep_values() {
        let points = SensitivityComputer::sweep(&[("Kerala", 600_000)], DEFAULT_SWEEP).unwrap();

        assert_eq!(points.len(), 10);
        assert_eq!(points[0].adoption_pct, 1);
        assert_eq!(points[0].som, 6_000);
        assert_eq!(points[9].adoption_pct, 10);
        assert_eq!(points[9].som, 60_000);
    }

    #[test]
    fn test_rate_major_region_minor_order() {
        let sams = [("Kerala", 1_000), ("Punjab", 2_000), ("Gujarat", 3_000)];
        let points = SensitivityComputer::sweep(&sams, 1..=2).unwrap();

        let order: Vec<(u32, &str)> = points
            .iter()
            .map(|p| (p.adoption_pct, p.region.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, "Kerala"),
                (1, "Punjab"),
                (1, "Gujarat"),
                (2, "Kerala"),
                (2, "Punjab"),
                (2, "Gujarat"),
            ]
        );
        assert_eq!(points[4].som, 40);
    }

    #[test]
    fn test_length_is_rates_times_regions() {
        let sams = [("A", 10), ("B", 20), ("C", 30), ("D", 40)];
        let points = SensitivityComputer::sweep(&sams, 3..=9).unwrap();
        assert_eq!(points.len(), 7 * 4);
    }

    #[test]
    fn test_full_adoption_reproduces_sam() {
        let sams = [("A", 123_457), ("B", 999_999), ("C", 0)];
        let points = SensitivityComputer::sweep(&sams, 100..=100).unwrap();
        for (point, (_, sam)) in points.iter().zip(&sams) {
            assert_eq!(point.som, *sam);
        }
    }

    #[test]
    fn test_full_adoption_stays_within_large_sam() {
        let sams = [("A", (1u64 << 53) + 3)];
        let points = SensitivityComputer::sweep(&sams, 99..=100).unwrap();
        assert!(points.iter().all(|p| p.som <= sams[0].1));
    }

    #[test]
    fn test_empty_range_and_empty_regions() {
        let sams = [("A", 10)];
        #[allow(clippy::reversed_empty_ranges)]
        let empty = SensitivityComputer::sweep(&sams, 5..=1).unwrap();
        assert!(empty.is_empty());

        let none: [(&str, u64); 0] = [];
        assert!(SensitivityComputer::sweep(&none, DEFAULT_SWEEP)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_rejects_rates_above_full_adoption() {
        let result = SensitivityComputer::sweep(&[("A", 10)], 90..=101);
        assert!(matches!(result, Err(MarketError::InvalidInput { .. })));
    }
}
