use crate::core::export::{dataset_csv, sensitivity_csv};
use crate::core::filter::RecordFilter;
use crate::core::generator::DatasetGenerator;
use crate::core::insights::{default_focus, summarize};
use crate::core::sensitivity::SensitivityComputer;
use crate::core::{AdoptionRateSet, ConfigProvider, MarketRecord, Pipeline, SizingReport, Storage};
use crate::utils::error::{MarketError, Result};
use rand::Rng;

/// Generates a synthetic dataset, narrows it to the configured selection and
/// writes the CSV exports through `storage`.
pub struct SizingPipeline<S: Storage, C: ConfigProvider, R: Rng> {
    storage: S,
    config: C,
    rng: R,
    adoption_rates: AdoptionRateSet,
}

impl<S: Storage, C: ConfigProvider, R: Rng> SizingPipeline<S, C, R> {
    pub fn new(storage: S, config: C, rng: R) -> Result<Self> {
        let adoption_rates = config.adoption_rates()?;
        Ok(Self {
            storage,
            config,
            rng,
            adoption_rates,
        })
    }

    pub fn adoption_rates(&self) -> &AdoptionRateSet {
        &self.adoption_rates
    }

    fn filter(&self) -> RecordFilter {
        let (min, max) = self.config.penetration_range();
        RecordFilter::new(self.config.selected_regions().map(|r| r.to_vec()), min, max)
    }
}

impl<S: Storage, C: ConfigProvider, R: Rng> Pipeline for SizingPipeline<S, C, R> {
    fn extract(&mut self) -> Result<Vec<MarketRecord>> {
        tracing::debug!(
            regions = self.config.regions().len(),
            tiers = self.adoption_rates.len(),
            revenue_per_user = self.config.revenue_per_user(),
            "generating regional dataset"
        );
        DatasetGenerator::generate(
            self.config.regions(),
            &self.adoption_rates,
            self.config.revenue_per_user(),
            &mut self.rng,
        )
    }

    fn transform(&self, data: Vec<MarketRecord>) -> Result<SizingReport> {
        let records = self.filter().apply(&data)?;
        if records.is_empty() {
            tracing::warn!("Filter removed every region; exports will only contain headers");
        }

        let sensitivity =
            SensitivityComputer::sweep_records(&records, self.config.sensitivity_range())?;

        let focus = match self.config.focus_region() {
            Some(region) => Ok(region),
            None => default_focus(&records),
        };
        let insight = match focus.and_then(|region| {
            summarize(&records, region, self.config.headline_tier())
        }) {
            Ok(insight) => Some(insight),
            Err(e @ MarketError::MissingData { .. }) => {
                tracing::warn!("No insight available: {}", e);
                None
            }
            Err(e) => return Err(e),
        };

        let dataset_csv = dataset_csv(&records, &self.adoption_rates)?;
        let sensitivity_csv = sensitivity_csv(&sensitivity)?;

        Ok(SizingReport {
            records,
            sensitivity,
            insight,
            dataset_csv,
            sensitivity_csv,
        })
    }

    fn load(&self, report: SizingReport) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        if self.config.write_csv() {
            tracing::debug!(
                "Writing {} ({} bytes)",
                self.config.dataset_filename(),
                report.dataset_csv.len()
            );
            self.storage
                .write_file(self.config.dataset_filename(), report.dataset_csv.as_bytes())?;

            tracing::debug!(
                "Writing {} ({} bytes)",
                self.config.sensitivity_filename(),
                report.sensitivity_csv.len()
            );
            self.storage.write_file(
                self.config.sensitivity_filename(),
                report.sensitivity_csv.as_bytes(),
            )?;
        }

        if self.config.write_insights() {
            match &report.insight {
                Some(insight) => {
                    let json = serde_json::to_string_pretty(insight)?;
                    self.storage
                        .write_file(self.config.insights_filename(), json.as_bytes())?;
                }
                None => tracing::warn!("Skipping {}: no insight", self.config.insights_filename()),
            }
        }

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::{DATASET_FILENAME, INSIGHTS_FILENAME, SENSITIVITY_FILENAME};
    use crate::core::generator::default_regions;
    use crate::domain::model::RegionInsight;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::ops::RangeInclusive;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<String> {
            self.files
                .borrow()
                .get(path)
                .map(|b| String::from_utf8_lossy(b).into_owned())
        }
    }

    impl Storage for MockStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        regions: Vec<String>,
        selected: Option<Vec<String>>,
        penetration: (f64, f64),
        focus: Option<String>,
        insights: bool,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                regions: default_regions(),
                selected: None,
                penetration: (50.0, 80.0),
                focus: None,
                insights: true,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn regions(&self) -> &[String] {
            &self.regions
        }

        fn adoption_rates(&self) -> Result<AdoptionRateSet> {
            Ok(AdoptionRateSet::default())
        }

        fn revenue_per_user(&self) -> i64 {
            2000
        }

        fn seed(&self) -> Option<u64> {
            Some(42)
        }

        fn selected_regions(&self) -> Option<&[String]> {
            self.selected.as_deref()
        }

        fn penetration_range(&self) -> (f64, f64) {
            self.penetration
        }

        fn sensitivity_range(&self) -> RangeInclusive<u32> {
            1..=10
        }

        fn focus_region(&self) -> Option<&str> {
            self.focus.as_deref()
        }

        fn headline_tier(&self) -> &str {
            "Medium"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn write_insights(&self) -> bool {
            self.insights
        }
    }

    fn pipeline(config: MockConfig) -> (SizingPipeline<MockStorage, MockConfig, StdRng>, MockStorage) {
        let storage = MockStorage::default();
        let pipeline =
            SizingPipeline::new(storage.clone(), config, StdRng::seed_from_u64(42)).unwrap();
        (pipeline, storage)
    }

    #[test]
    fn test_extract_generates_every_region() {
        let (mut pipeline, _) = pipeline(MockConfig::new());
        let records = pipeline.extract().unwrap();

        assert_eq!(records.len(), 10);
        assert_eq!(records[0].region, "Maharashtra");
        assert_eq!(records[9].region, "Punjab");
    }

    #[test]
    fn test_transform_sweeps_filtered_regions() {
        let mut config = MockConfig::new();
        config.selected = Some(vec!["Kerala".to_string(), "Punjab".to_string()]);
        let (mut pipeline, _) = pipeline(config);

        let records = pipeline.extract().unwrap();
        let report = pipeline.transform(records).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.sensitivity.len(), 20);
        assert_eq!(report.sensitivity[0].region, "Kerala");
        assert_eq!(report.sensitivity[1].region, "Punjab");
        assert_eq!(report.sensitivity_csv.lines().count(), 21);
        assert_eq!(report.dataset_csv.lines().count(), 3);

        let insight = report.insight.unwrap();
        assert_eq!(insight.region, "Kerala");
        assert_eq!(insight.tam, report.records[0].funnel.tam);
    }

    #[test]
    fn test_transform_with_empty_selection_has_no_insight() {
        let mut config = MockConfig::new();
        config.selected = Some(vec!["Goa".to_string()]);
        let (mut pipeline, _) = pipeline(config);

        let records = pipeline.extract().unwrap();
        let report = pipeline.transform(records).unwrap();

        assert!(report.records.is_empty());
        assert!(report.sensitivity.is_empty());
        assert!(report.insight.is_none());
        assert_eq!(report.dataset_csv.lines().count(), 1);
    }

    #[test]
    fn test_focus_region_outside_selection_is_not_fatal() {
        let mut config = MockConfig::new();
        config.selected = Some(vec!["Kerala".to_string()]);
        config.focus = Some("Punjab".to_string());
        let (mut pipeline, _) = pipeline(config);

        let records = pipeline.extract().unwrap();
        let report = pipeline.transform(records).unwrap();
        assert_eq!(report.records.len(), 1);
        assert!(report.insight.is_none());
    }

    #[test]
    fn test_load_writes_exports() {
        let (mut pipeline, storage) = pipeline(MockConfig::new());
        let records = pipeline.extract().unwrap();
        let report = pipeline.transform(records).unwrap();
        let dataset = report.dataset_csv.clone();

        let output_path = pipeline.load(report).unwrap();

        assert_eq!(output_path, "test_output");
        assert_eq!(storage.get_file(DATASET_FILENAME), Some(dataset));
        assert!(storage
            .get_file(SENSITIVITY_FILENAME)
            .unwrap()
            .starts_with("Region,Adoption (%),SOM\n"));

        let insight: RegionInsight =
            serde_json::from_str(&storage.get_file(INSIGHTS_FILENAME).unwrap()).unwrap();
        assert_eq!(insight.region, "Maharashtra");
        assert_eq!(insight.headline_label, "Medium");
    }

    #[test]
    fn test_load_without_insights() {
        let mut config = MockConfig::new();
        config.insights = false;
        let (mut pipeline, storage) = pipeline(config);
        let records = pipeline.extract().unwrap();
        let report = pipeline.transform(records).unwrap();
        pipeline.load(report).unwrap();

        assert!(storage.get_file(DATASET_FILENAME).is_some());
        assert!(storage.get_file(INSIGHTS_FILENAME).is_none());
    }

    #[test]
    fn test_invalid_rate_set_rejected_at_construction() {
        struct BadRates(MockConfig);
        impl ConfigProvider for BadRates {
            fn regions(&self) -> &[String] {
                self.0.regions()
            }
            fn adoption_rates(&self) -> Result<AdoptionRateSet> {
                AdoptionRateSet::new(Vec::<(String, f64)>::new())
            }
            fn revenue_per_user(&self) -> i64 {
                self.0.revenue_per_user()
            }
            fn seed(&self) -> Option<u64> {
                None
            }
            fn selected_regions(&self) -> Option<&[String]> {
                None
            }
            fn penetration_range(&self) -> (f64, f64) {
                self.0.penetration_range()
            }
            fn sensitivity_range(&self) -> RangeInclusive<u32> {
                self.0.sensitivity_range()
            }
            fn focus_region(&self) -> Option<&str> {
                None
            }
            fn headline_tier(&self) -> &str {
                self.0.headline_tier()
            }
            fn output_path(&self) -> &str {
                self.0.output_path()
            }
            fn write_insights(&self) -> bool {
                false
            }
        }

        let result = SizingPipeline::new(
            MockStorage::default(),
            BadRates(MockConfig::new()),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(MarketError::InvalidInput { .. })));
    }
}
