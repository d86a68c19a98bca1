use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct SizingEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SizingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&mut self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting market sizing run");

        let records = self.pipeline.extract()?;
        tracing::info!("Generated {} regional records", records.len());

        let report = self.pipeline.transform(records)?;
        tracing::info!(
            "Kept {} records, {} sensitivity points",
            report.records.len(),
            report.sensitivity.len()
        );
        if let Some(insight) = &report.insight {
            tracing::info!(
                region = %insight.region,
                tam = insight.tam,
                sam = insight.sam,
                som_min = insight.som_min,
                som_max = insight.som_max,
                "Year 1 SOM range"
            );
        }

        let output_path = self.pipeline.load(report)?;
        tracing::info!(
            "Output saved to: {} in {:?}",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }

    pub fn into_inner(self) -> P {
        self.pipeline
    }
}
