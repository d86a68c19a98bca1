use crate::core::export::{DATASET_FILENAME, INSIGHTS_FILENAME, SENSITIVITY_FILENAME};
use crate::core::generator::default_regions;
use crate::core::insights::DEFAULT_HEADLINE_TIER;
use crate::core::sensitivity::DEFAULT_SWEEP;
use crate::core::{AdoptionRateSet, ConfigProvider};
use crate::domain::model::DEFAULT_TIER_PERCENTAGES;
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{
    validate_non_empty_list, validate_non_empty_string, validate_ordered_bounds, validate_path,
    validate_range, validate_unique_names, Validate,
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub scenario: ScenarioConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub sensitivity: SensitivityConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
    #[serde(default = "default_revenue_per_user")]
    pub revenue_per_user: i64,
    pub seed: Option<u64>,
    #[serde(default = "default_tiers")]
    pub tiers: Vec<TierConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierConfig {
    pub label: String,
    pub rate_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub regions: Option<Vec<String>>,
    #[serde(default = "default_penetration_min")]
    pub penetration_min: f64,
    #[serde(default = "default_penetration_max")]
    pub penetration_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityConfig {
    #[serde(default = "default_sweep_start")]
    pub start_percent: u32,
    #[serde(default = "default_sweep_end")]
    pub end_percent: u32,
    pub focus_region: Option<String>,
    #[serde(default = "default_headline_tier")]
    pub headline_tier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub dataset: Option<String>,
    pub sensitivity: Option<String>,
    pub insights: Option<String>,
}

fn default_revenue_per_user() -> i64 {
    2000
}

fn default_tiers() -> Vec<TierConfig> {
    DEFAULT_TIER_PERCENTAGES
        .iter()
        .map(|(label, pct)| TierConfig {
            label: label.to_string(),
            rate_percent: f64::from(*pct),
        })
        .collect()
}

fn default_penetration_min() -> f64 {
    50.0
}

fn default_penetration_max() -> f64 {
    80.0
}

fn default_sweep_start() -> u32 {
    *DEFAULT_SWEEP.start()
}

fn default_sweep_end() -> u32 {
    *DEFAULT_SWEEP.end()
}

fn default_headline_tier() -> String {
    DEFAULT_HEADLINE_TIER.to_string()
}

fn default_output_formats() -> Vec<String> {
    vec!["csv".to_string()]
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            revenue_per_user: default_revenue_per_user(),
            seed: None,
            tiers: default_tiers(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            regions: None,
            penetration_min: default_penetration_min(),
            penetration_max: default_penetration_max(),
        }
    }
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            start_percent: default_sweep_start(),
            end_percent: default_sweep_end(),
            focus_region: None,
            headline_tier: default_headline_tier(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MarketError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MarketError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MarketError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("scenario.name", &self.scenario.name)?;

        validate_non_empty_list("market.regions", &self.market.regions)?;
        validate_unique_names("market.regions", &self.market.regions)?;
        if self.market.revenue_per_user <= 0 {
            return Err(MarketError::InvalidConfigValueError {
                field: "market.revenue_per_user".to_string(),
                value: self.market.revenue_per_user.to_string(),
                reason: "Revenue per user must be positive".to_string(),
            });
        }
        self.adoption_rates()?;

        validate_ordered_bounds(
            "filter.penetration",
            self.filter.penetration_min,
            self.filter.penetration_max,
        )?;

        validate_range("sensitivity.start_percent", self.sensitivity.start_percent, 0, 100)?;
        validate_range(
            "sensitivity.end_percent",
            self.sensitivity.end_percent,
            self.sensitivity.start_percent,
            100,
        )?;
        validate_non_empty_string("sensitivity.headline_tier", &self.sensitivity.headline_tier)?;

        validate_path("load.output_path", &self.load.output_path)?;

        let valid_formats = ["csv", "json"];
        for format in &self.load.output_formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(MarketError::InvalidConfigValueError {
                    field: "load.output_formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        if let Some(filenames) = &self.load.filenames {
            for (field, name) in [
                ("load.filenames.dataset", &filenames.dataset),
                ("load.filenames.sensitivity", &filenames.sensitivity),
                ("load.filenames.insights", &filenames.insights),
            ] {
                if let Some(name) = name {
                    validate_path(field, name)?;
                }
            }
        }

        Ok(())
    }

    fn has_format(&self, format: &str) -> bool {
        self.load.output_formats.iter().any(|f| f == format)
    }
}

impl ConfigProvider for TomlConfig {
    fn regions(&self) -> &[String] {
        &self.market.regions
    }

    fn adoption_rates(&self) -> Result<AdoptionRateSet> {
        AdoptionRateSet::new(
            self.market
                .tiers
                .iter()
                .map(|t| (t.label.clone(), t.rate_percent / 100.0)),
        )
    }

    fn revenue_per_user(&self) -> i64 {
        self.market.revenue_per_user
    }

    fn seed(&self) -> Option<u64> {
        self.market.seed
    }

    fn selected_regions(&self) -> Option<&[String]> {
        self.filter.regions.as_deref()
    }

    fn penetration_range(&self) -> (f64, f64) {
        (self.filter.penetration_min, self.filter.penetration_max)
    }

    fn sensitivity_range(&self) -> RangeInclusive<u32> {
        self.sensitivity.start_percent..=self.sensitivity.end_percent
    }

    fn focus_region(&self) -> Option<&str> {
        self.sensitivity.focus_region.as_deref()
    }

    fn headline_tier(&self) -> &str {
        &self.sensitivity.headline_tier
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn write_insights(&self) -> bool {
        self.has_format("json")
    }

    fn write_csv(&self) -> bool {
        self.has_format("csv")
    }

    fn dataset_filename(&self) -> &str {
        self.load
            .filenames
            .as_ref()
            .and_then(|f| f.dataset.as_deref())
            .unwrap_or(DATASET_FILENAME)
    }

    fn sensitivity_filename(&self) -> &str {
        self.load
            .filenames
            .as_ref()
            .and_then(|f| f.sensitivity.as_deref())
            .unwrap_or(SENSITIVITY_FILENAME)
    }

    fn insights_filename(&self) -> &str {
        self.load
            .filenames
            .as_ref()
            .and_then(|f| f.insights.as_deref())
            .unwrap_or(INSIGHTS_FILENAME)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
