use crate::domain::model::{MarketRecord, RegionInsight};
use crate::utils::error::{MarketError, Result};

pub const DEFAULT_HEADLINE_TIER: &str = "Medium";

pub fn find_region<'a>(records: &'a [MarketRecord], region: &str) -> Result<&'a MarketRecord> {
    records
        .iter()
        .find(|r| r.region == region)
        .ok_or_else(|| MarketError::missing_data(format!("region '{}' is not in the selection", region)))
}

/// The region shown when the user has not picked one: the first row.
pub fn default_focus(records: &[MarketRecord]) -> Result<&str> {
    records
        .first()
        .map(|r| r.region.as_str())
        .ok_or_else(|| MarketError::missing_data("the filtered selection is empty"))
}

pub fn summarize(
    records: &[MarketRecord],
    region: &str,
    headline_label: &str,
) -> Result<RegionInsight> {
    let record = find_region(records, region)?;
    let funnel = &record.funnel;

    let som_min = funnel.tiers.iter().map(|t| t.som).min();
    let som_max = funnel.tiers.iter().map(|t| t.som).max();
    let (Some(som_min), Some(som_max)) = (som_min, som_max) else {
        return Err(MarketError::missing_data(format!(
            "no SOM values for region '{}'",
            region
        )));
    };

    Ok(RegionInsight {
        region: record.region.clone(),
        tam: funnel.tam,
        sam: funnel.sam,
        som_min,
        som_max,
        headline_label: headline_label.to_string(),
        headline_revenue: funnel.revenue(headline_label),
    })
}
