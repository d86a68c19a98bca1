use crate::domain::model::MarketRecord;
use crate::utils::error::Result;
use crate::utils::validation::validate_ordered_bounds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// `None` keeps every region.
    pub regions: Option<Vec<String>>,
    pub penetration_min: f64,
    pub penetration_max: f64,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            regions: None,
            penetration_min: 50.0,
            penetration_max: 80.0,
        }
    }
}

impl RecordFilter {
    pub fn new(regions: Option<Vec<String>>, penetration_min: f64, penetration_max: f64) -> Self {
        Self {
            regions,
            penetration_min,
            penetration_max,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_ordered_bounds(
            "penetration_filter",
            self.penetration_min,
            self.penetration_max,
        )
    }

    pub fn matches(&self, record: &MarketRecord) -> bool {
        let region_selected = self
            .regions
            .as_ref()
            .is_none_or(|selected| selected.iter().any(|r| r == &record.region));

        region_selected
            && record.penetration_pct >= self.penetration_min
            && record.penetration_pct <= self.penetration_max
    }

    /// Matching records in their original order.
    pub fn apply(&self, records: &[MarketRecord]) -> Result<Vec<MarketRecord>> {
        self.validate()?;
        let kept: Vec<MarketRecord> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        tracing::debug!(
            total = records.len(),
            kept = kept.len(),
            "applied region/penetration filter"
        );
        Ok(kept)
    }
}
