use crate::core::funnel::FunnelCalculator;
use crate::domain::model::{AdoptionRateSet, MarketRecord, RegionInput};
use crate::utils::error::{MarketError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::ops::Range;

pub const STUDENT_RANGE: Range<i64> = 200_000..600_000;
pub const PROFESSIONAL_RANGE: Range<i64> = 500_000..1_500_000;
pub const PENETRATION_RANGE: Range<f64> = 0.5..0.8;

/// The reference region list used when none is configured.
pub const DEFAULT_REGIONS: [&str; 10] = [
    "Maharashtra",
    "Karnataka",
    "Tamil Nadu",
    "Telangana",
    "Kerala",
    "Delhi NCR",
    "Uttar Pradesh",
    "Gujarat",
    "West Bengal",
    "Punjab",
];

pub fn default_regions() -> Vec<String> {
    DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect()
}

/// Returns the generator together with the seed actually used, so an
/// unseeded run can be reproduced from its logs.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (StdRng::seed_from_u64(seed), seed)
}

/// Synthesizes per-region inputs and sizes each region's market.
pub struct DatasetGenerator;

impl DatasetGenerator {
    /// One record per region, in the order given. Draws come from `rng`
    /// only, so a seeded generator reproduces the dataset exactly.
    pub fn generate<R: Rng + ?Sized>(
        region_names: &[String],
        adoption_rates: &AdoptionRateSet,
        revenue_per_user: i64,
        rng: &mut R,
    ) -> Result<Vec<MarketRecord>> {
        let mut seen = HashSet::new();
        for name in region_names {
            if name.trim().is_empty() {
                return Err(MarketError::invalid_input(
                    "regions",
                    name,
                    "region name cannot be empty",
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(MarketError::invalid_input("regions", name, "duplicate region"));
            }
        }

        let mut records = Vec::with_capacity(region_names.len());
        for region in region_names {
            let students = rng.random_range(STUDENT_RANGE);
            let professionals = rng.random_range(PROFESSIONAL_RANGE);
            let penetration = rng.random_range(PENETRATION_RANGE);

            let funnel = FunnelCalculator::compute(
                students,
                professionals,
                penetration,
                adoption_rates,
                revenue_per_user,
            )?;

            tracing::debug!(
                region = %region,
                students,
                professionals,
                penetration,
                tam = funnel.tam,
                sam = funnel.sam,
                "generated region"
            );

            records.push(MarketRecord {
                region: region.clone(),
                input: RegionInput {
                    students: students as u64,
                    professionals: professionals as u64,
                    smartphone_penetration: penetration,
                },
                penetration_pct: round_to_tenth(penetration * 100.0),
                funnel,
            });
        }

        Ok(records)
    }
}

fn round_to_tenth(value: f64) -> f64 {
    // Decimal formatting rounds the exact binary value; scaling by ten first
    // can turn a value just below .x5 into a tie.
    format!("{:.1}", value).parse().unwrap_or(value)
}
