use crate::core::export::{DATASET_FILENAME, INSIGHTS_FILENAME, SENSITIVITY_FILENAME};
use crate::domain::model::{AdoptionRateSet, MarketRecord, SizingReport};
use crate::utils::error::Result;
use std::ops::RangeInclusive;

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn regions(&self) -> &[String];
    fn adoption_rates(&self) -> Result<AdoptionRateSet>;
    fn revenue_per_user(&self) -> i64;
    fn seed(&self) -> Option<u64>;
    fn selected_regions(&self) -> Option<&[String]>;
    fn penetration_range(&self) -> (f64, f64);
    fn sensitivity_range(&self) -> RangeInclusive<u32>;
    fn focus_region(&self) -> Option<&str>;
    fn headline_tier(&self) -> &str;
    fn output_path(&self) -> &str;
    fn write_insights(&self) -> bool;

    fn write_csv(&self) -> bool {
        true
    }

    fn dataset_filename(&self) -> &str {
        DATASET_FILENAME
    }

    fn sensitivity_filename(&self) -> &str {
        SENSITIVITY_FILENAME
    }

    fn insights_filename(&self) -> &str {
        INSIGHTS_FILENAME
    }
}

pub trait Pipeline {
    fn extract(&mut self) -> Result<Vec<MarketRecord>>;
    fn transform(&self, data: Vec<MarketRecord>) -> Result<SizingReport>;
    fn load(&self, report: SizingReport) -> Result<String>;
}
