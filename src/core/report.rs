use crate::core::indicator::{IndexMode, IndicatorCalculator};
use crate::domain::ports::StationLookup;
use crate::utils::error::{IndicatorError, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexRow {
    pub station: String,
    pub elderly_share: Option<f64>,
    pub dependent_share: Option<f64>,
    pub aging_index: Option<f64>,
}

/// All three indicators for every station in a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndexReport {
    rows: Vec<IndexRow>,
}

impl IndexReport {
    pub fn build<L: StationLookup + ?Sized>(lookup: &L) -> Result<Self> {
        let calc = IndicatorCalculator::new(lookup);
        let mut rows = Vec::new();

        for station in lookup.station_ids() {
            let mut values = [None; 3];
            for (slot, mode) in values.iter_mut().zip(IndexMode::ALL) {
                *slot = calc.compute(station, mode)?.value();
            }
            let [elderly_share, dependent_share, aging_index] = values;

            rows.push(IndexRow {
                station: station.to_string(),
                elderly_share,
                dependent_share,
                aging_index,
            });
        }

        tracing::debug!("Built report with {} stations", rows.len());
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[IndexRow] {
        &self.rows
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        if self.rows.is_empty() {
            writer.write_record(["station", "elderly_share", "dependent_share", "aging_index"])?;
        }

        let bytes = writer.into_inner().map_err(|e| IndicatorError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| IndicatorError::ConfigError {
            message: format!("CSV output is not valid UTF-8: {}", e),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
