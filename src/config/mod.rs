pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::core::generator::default_regions;
    use crate::core::insights::DEFAULT_HEADLINE_TIER;
    use crate::core::{AdoptionRateSet, ConfigProvider};
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_non_empty_list, validate_non_empty_string, validate_ordered_bounds,
        validate_path, validate_range, validate_unique_names, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::ops::RangeInclusive;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "market-sizing")]
    #[command(about = "TAM/SAM/SOM market sizing with revenue projections per region")]
    pub struct CliConfig {
        /// Regions to generate, comma separated
        #[arg(long, value_delimiter = ',', default_values_t = default_regions())]
        pub regions: Vec<String>,

        /// Low adoption tier, in percent
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(0..=20))]
        pub adoption_low: u32,

        /// Medium adoption tier, in percent
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=20))]
        pub adoption_medium: u32,

        /// High adoption tier, in percent
        #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(0..=20))]
        pub adoption_high: u32,

        #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(i64).range(500..=10000))]
        pub revenue_per_user: i64,

        /// Seed for the synthetic dataset; random when omitted
        #[arg(long)]
        pub seed: Option<u64>,

        /// Keep only these regions in the exports
        #[arg(long, value_delimiter = ',')]
        pub select_regions: Option<Vec<String>>,

        #[arg(long, default_value_t = 50.0)]
        pub min_penetration: f64,

        #[arg(long, default_value_t = 80.0)]
        pub max_penetration: f64,

        #[arg(long, default_value_t = 1)]
        pub sweep_start: u32,

        #[arg(long, default_value_t = 10)]
        pub sweep_end: u32,

        /// Region to summarize; defaults to the first selected region
        #[arg(long)]
        pub focus_region: Option<String>,

        #[arg(long, default_value = DEFAULT_HEADLINE_TIER)]
        pub headline_tier: String,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        /// Also write the focus region insight as JSON
        #[arg(long)]
        pub insights: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[arg(long, help = "Validate and summarize without writing files")]
        pub dry_run: bool,
    }

    impl ConfigProvider for CliConfig {
        fn regions(&self) -> &[String] {
            &self.regions
        }

        fn adoption_rates(&self) -> Result<AdoptionRateSet> {
            AdoptionRateSet::from_percentages([
                ("Low", self.adoption_low),
                ("Medium", self.adoption_medium),
                ("High", self.adoption_high),
            ])
        }

        fn revenue_per_user(&self) -> i64 {
            self.revenue_per_user
        }

        fn seed(&self) -> Option<u64> {
            self.seed
        }

        fn selected_regions(&self) -> Option<&[String]> {
            self.select_regions.as_deref()
        }

        fn penetration_range(&self) -> (f64, f64) {
            (self.min_penetration, self.max_penetration)
        }

        fn sensitivity_range(&self) -> RangeInclusive<u32> {
            self.sweep_start..=self.sweep_end
        }

        fn focus_region(&self) -> Option<&str> {
            self.focus_region.as_deref()
        }

        fn headline_tier(&self) -> &str {
            &self.headline_tier
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn write_insights(&self) -> bool {
            self.insights
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_non_empty_list("regions", &self.regions)?;
            validate_unique_names("regions", &self.regions)?;
            validate_path("output_path", &self.output_path)?;
            validate_ordered_bounds("penetration", self.min_penetration, self.max_penetration)?;
            validate_range("sweep_start", self.sweep_start, 0, 100)?;
            validate_range("sweep_end", self.sweep_end, self.sweep_start, 100)?;
            validate_non_empty_string("headline_tier", &self.headline_tier)?;
            self.adoption_rates()?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_match_reference_tool() {
            let config = CliConfig::try_parse_from(["market-sizing"]).unwrap();

            assert_eq!(config.regions.len(), 10);
            assert_eq!(config.regions[0], "Maharashtra");
            assert_eq!(config.revenue_per_user, 2000);
            assert_eq!(config.penetration_range(), (50.0, 80.0));
            assert_eq!(config.sensitivity_range(), 1..=10);
            assert_eq!(config.headline_tier(), "Medium");
            assert_eq!(config.adoption_rates().unwrap(), AdoptionRateSet::default());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_parse_overrides() {
            let config = CliConfig::try_parse_from([
                "market-sizing",
                "--regions",
                "Kerala,Punjab",
                "--adoption-high",
                "20",
                "--revenue-per-user",
                "500",
                "--seed",
                "7",
                "--select-regions",
                "Kerala",
            ])
            .unwrap();

            assert_eq!(config.regions, vec!["Kerala", "Punjab"]);
            assert_eq!(config.adoption_rates().unwrap().rate("High"), Some(0.2));
            assert_eq!(config.seed(), Some(7));
            assert_eq!(config.selected_regions(), Some(&["Kerala".to_string()][..]));
        }

        #[test]
        fn test_slider_bounds_are_enforced() {
            assert!(CliConfig::try_parse_from(["market-sizing", "--adoption-low", "21"]).is_err());
            assert!(
                CliConfig::try_parse_from(["market-sizing", "--revenue-per-user", "499"]).is_err()
            );
            assert!(
                CliConfig::try_parse_from(["market-sizing", "--revenue-per-user", "10001"])
                    .is_err()
            );
        }

        #[test]
        fn test_validation_rejects_inverted_ranges() {
            let mut config = CliConfig::try_parse_from(["market-sizing"]).unwrap();
            config.min_penetration = 90.0;
            assert!(config.validate().is_err());

            let mut config = CliConfig::try_parse_from(["market-sizing"]).unwrap();
            config.sweep_end = 101;
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validation_rejects_duplicate_regions() {
            let config =
                CliConfig::try_parse_from(["market-sizing", "--regions", "Kerala,Kerala"])
                    .unwrap();
            assert!(config.validate().is_err());
        }
    }
}
