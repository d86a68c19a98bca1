pub mod engine;
pub mod export;
pub mod filter;
pub mod funnel;
pub mod generator;
pub mod insights;
pub mod pipeline;
pub mod sensitivity;

pub use crate::domain::model::{
    AdoptionRateSet, FunnelResult, MarketRecord, RegionInsight, SensitivityPoint, SizingReport,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
