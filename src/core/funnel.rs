use crate::domain::model::{AdoptionRateSet, FunnelResult, TierOutcome};
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{validate_count, validate_fraction};

/// TAM → SAM → SOM funnel for a single region.
///
/// Every step truncates toward zero on the double-precision product, so
/// truncation compounds from SAM into each SOM.
pub struct FunnelCalculator;

impl FunnelCalculator {
    pub fn compute(
        students: i64,
        professionals: i64,
        penetration: f64,
        adoption_rates: &AdoptionRateSet,
        revenue_per_user: i64,
    ) -> Result<FunnelResult> {
        let students = validate_count("students", students)?;
        let professionals = validate_count("professionals", professionals)?;
        validate_fraction("smartphone_penetration", penetration)?;
        if revenue_per_user <= 0 {
            return Err(MarketError::invalid_input(
                "revenue_per_user",
                revenue_per_user,
                "must be positive",
            ));
        }
        let revenue_per_user = revenue_per_user as u64;

        let tam = students.checked_add(professionals).ok_or_else(|| {
            MarketError::invalid_input(
                "tam",
                format!("{} + {}", students, professionals),
                "population total overflows",
            )
        })?;
        let sam = apply_fraction(tam, penetration);

        let mut tiers = Vec::with_capacity(adoption_rates.len());
        for tier in adoption_rates.tiers() {
            let som = apply_fraction(sam, tier.rate);
            let revenue = som.checked_mul(revenue_per_user).ok_or_else(|| {
                MarketError::invalid_input(
                    format!("revenue.{}", tier.label),
                    format!("{} x {}", som, revenue_per_user),
                    "revenue overflows",
                )
            })?;
            tiers.push(TierOutcome {
                label: tier.label.clone(),
                som,
                revenue,
            });
        }

        tracing::trace!(tam, sam, tiers = tiers.len(), "computed funnel");
        Ok(FunnelResult { tam, sam, tiers })
    }
}

/// `floor(value * fraction)`; callers guarantee `fraction` is in [0, 1].
///
/// Above 2^53 `value as f64` can round up, so the result is capped at `value`.
pub(crate) fn apply_fraction(value: u64, fraction: f64) -> u64 {
    ((value as f64 * fraction).floor() as u64).min(value)
}
