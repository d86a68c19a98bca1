use crate::domain::model::{AdoptionRateSet, MarketRecord, SensitivityPoint};
use crate::utils::error::{MarketError, Result};
use csv::{Terminator, Writer, WriterBuilder};

pub const DATASET_FILENAME: &str = "market_sizing_filtered.csv";
pub const SENSITIVITY_FILENAME: &str = "sensitivity_analysis.csv";
pub const INSIGHTS_FILENAME: &str = "insights.json";

fn writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| MarketError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| MarketError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn dataset_header(adoption_rates: &AdoptionRateSet) -> Vec<String> {
    let mut header = vec!["TAM".to_string(), "SAM".to_string()];
    header.extend(adoption_rates.labels().map(|l| format!("SOM_{}", l)));
    header.extend(adoption_rates.labels().map(|l| format!("Revenue_SOM_{}", l)));
    header.extend(
        ["Region", "Students", "Professionals", "Penetration (%)"]
            .iter()
            .map(|s| s.to_string()),
    );
    header
}

/// Dataset rows with one SOM and one revenue column per tier. A tier the
/// record was not computed for is written as an empty field.
pub fn dataset_csv(records: &[MarketRecord], adoption_rates: &AdoptionRateSet) -> Result<String> {
    let mut wtr = writer();
    wtr.write_record(dataset_header(adoption_rates))?;

    for record in records {
        let funnel = &record.funnel;
        let mut row = vec![funnel.tam.to_string(), funnel.sam.to_string()];
        row.extend(
            adoption_rates
                .labels()
                .map(|l| funnel.som(l).map(|v| v.to_string()).unwrap_or_default()),
        );
        row.extend(
            adoption_rates
                .labels()
                .map(|l| funnel.revenue(l).map(|v| v.to_string()).unwrap_or_default()),
        );
        row.push(record.region.clone());
        row.push(record.input.students.to_string());
        row.push(record.input.professionals.to_string());
        row.push(format!("{:.1}", record.penetration_pct));
        wtr.write_record(&row)?;
    }

    finish(wtr)
}

pub fn sensitivity_csv(points: &[SensitivityPoint]) -> Result<String> {
    let mut wtr = writer();
    wtr.write_record(["Region", "Adoption (%)", "SOM"])?;
    for point in points {
        let pct = point.adoption_pct.to_string();
        let som = point.som.to_string();
        wtr.write_record([point.region.as_str(), pct.as_str(), som.as_str()])?;
    }
    finish(wtr)
}
