use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{validate_fraction, validate_non_empty_string};
use serde::{Deserialize, Serialize};

/// Low/Medium/High tiers of the reference tool, in percent.
pub const DEFAULT_TIER_PERCENTAGES: [(&str, u32); 3] = [("Low", 3), ("Medium", 5), ("High", 8)];

/// Raw per-region population and reach figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionInput {
    pub students: u64,
    pub professionals: u64,
    pub smartphone_penetration: f64,
}

/// A named adoption scenario such as "Low" at 3%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionTier {
    pub label: String,
    pub rate: f64,
}

/// Ordered, non-empty set of adoption tiers with unique labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionRateSet {
    tiers: Vec<AdoptionTier>,
}

impl AdoptionRateSet {
    pub fn new<I, S>(tiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut validated: Vec<AdoptionTier> = Vec::new();
        for (label, rate) in tiers {
            let label = label.into();
            validate_non_empty_string("adoption_rates.label", &label).map_err(|_| {
                MarketError::invalid_input("adoption_rates.label", &label, "label cannot be empty")
            })?;
            validate_fraction(&format!("adoption_rates.{}", label), rate)?;
            if validated.iter().any(|t| t.label == label) {
                return Err(MarketError::invalid_input(
                    "adoption_rates.label",
                    &label,
                    "duplicate tier label",
                ));
            }
            validated.push(AdoptionTier { label, rate });
        }

        if validated.is_empty() {
            return Err(MarketError::invalid_input(
                "adoption_rates",
                "{}",
                "at least one adoption tier is required",
            ));
        }

        Ok(Self { tiers: validated })
    }

    /// Builds a set from whole percentages, e.g. `("Low", 3)` for 3%.
    pub fn from_percentages<I, S>(tiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self::new(
            tiers
                .into_iter()
                .map(|(label, pct)| (label, f64::from(pct) / 100.0)),
        )
    }

    pub fn tiers(&self) -> &[AdoptionTier] {
        &self.tiers
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|t| t.label.as_str())
    }

    pub fn rate(&self, label: &str) -> Option<f64> {
        self.tiers.iter().find(|t| t.label == label).map(|t| t.rate)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for AdoptionRateSet {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIER_PERCENTAGES
                .iter()
                .map(|(label, pct)| AdoptionTier {
                    label: label.to_string(),
                    rate: f64::from(*pct) / 100.0,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierOutcome {
    pub label: String,
    pub som: u64,
    pub revenue: u64,
}

/// TAM/SAM plus one SOM and revenue figure per adoption tier, in tier order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelResult {
    pub tam: u64,
    pub sam: u64,
    pub tiers: Vec<TierOutcome>,
}

impl FunnelResult {
    pub fn tier(&self, label: &str) -> Option<&TierOutcome> {
        self.tiers.iter().find(|t| t.label == label)
    }

    pub fn som(&self, label: &str) -> Option<u64> {
        self.tier(label).map(|t| t.som)
    }

    pub fn revenue(&self, label: &str) -> Option<u64> {
        self.tier(label).map(|t| t.revenue)
    }
}

/// One row of the generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub region: String,
    pub input: RegionInput,
    /// Penetration as a percentage rounded to one decimal place.
    pub penetration_pct: f64,
    pub funnel: FunnelResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub region: String,
    pub adoption_pct: u32,
    pub som: u64,
}

/// Headline figures for one region of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionInsight {
    pub region: String,
    pub tam: u64,
    pub sam: u64,
    pub som_min: u64,
    pub som_max: u64,
    pub headline_label: String,
    pub headline_revenue: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct SizingReport {
    pub records: Vec<MarketRecord>,
    pub sensitivity: Vec<SensitivityPoint>,
    pub insight: Option<RegionInsight>,
    pub dataset_csv: String,
    pub sensitivity_csv: String,
}
