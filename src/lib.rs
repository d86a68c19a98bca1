pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    engine::SizingEngine, filter::RecordFilter, funnel::FunnelCalculator,
    generator::DatasetGenerator, pipeline::SizingPipeline, sensitivity::SensitivityComputer,
};
pub use crate::domain::model::{
    AdoptionRateSet, FunnelResult, MarketRecord, RegionInput, RegionInsight, SensitivityPoint,
};
pub use crate::utils::error::{MarketError, Result};
