use crate::domain::model::{PopulationField, PopulationRecord};
use crate::domain::ports::StationLookup;
use crate::utils::error::{IndicatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which ratio to derive from a station's age buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexMode {
    /// `100 * P_65_I_MES / TOTAL`: share of the population aged 65 and over.
    ElderlyShare,
    /// `100 * (P_0_14 + P_65_I_MES) / TOTAL`: share of the dependent population.
    #[default]
    DependentShare,
    /// `100 * P_65_I_MES / P_0_14`: people aged 65+ per 100 children under 15.
    AgingIndex,
}

impl IndexMode {
    pub const ALL: [IndexMode; 3] = [
        IndexMode::ElderlyShare,
        IndexMode::DependentShare,
        IndexMode::AgingIndex,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(IndexMode::ElderlyShare),
            1 => Some(IndexMode::DependentShare),
            2 => Some(IndexMode::AgingIndex),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            IndexMode::ElderlyShare => 0,
            IndexMode::DependentShare => 1,
            IndexMode::AgingIndex => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IndexMode::ElderlyShare => "elderly_share",
            IndexMode::DependentShare => "dependent_share",
            IndexMode::AgingIndex => "aging_index",
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Result of a query that did not hit corrupt data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum IndexOutcome {
    /// Ratio rounded to two decimals.
    Value(f64),
    /// Unknown station, or no `POBLACION_500M` data for it.
    NoData,
    UnsupportedMode(i64),
    /// The denominator count is zero, or so small the ratio is not finite.
    Undefined { denominator: PopulationField },
}

impl IndexOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            IndexOutcome::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Collapses every non-value outcome into `NaN`.
    pub fn to_f64(&self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }

    pub fn describe(&self) -> String {
        match self {
            IndexOutcome::Value(v) => format!("{:.2}", v),
            IndexOutcome::NoData => "no population data for station".to_string(),
            IndexOutcome::UnsupportedMode(mode) => {
                format!("unsupported mode {} (expected 0, 1 or 2)", mode)
            }
            IndexOutcome::Undefined { denominator } => {
                format!("undefined: no finite ratio over {}", denominator)
            }
        }
    }
}

/// Round half away from zero to two decimals. Values too large to scale by
/// 100 already carry no fractional digits and are returned as they are.
pub fn round_to_hundredths(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// `100 * sum(parts) / denominator`. Divides before scaling when the direct
/// form overflows.
fn percentage(parts: &[f64], denominator: f64) -> f64 {
    let numerator: f64 = parts.iter().sum();
    let direct = 100.0 * numerator / denominator;
    if direct.is_finite() {
        return direct;
    }
    parts.iter().map(|part| part / denominator).sum::<f64>() * 100.0
}

pub struct IndicatorCalculator<'a, L: StationLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: StationLookup + ?Sized> IndicatorCalculator<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// Computes the indicator for a raw mode code. Codes other than 0, 1 and 2
    /// give `UnsupportedMode` whether or not the station exists.
    pub fn compute_index(&self, station_id: &str, mode: i64) -> Result<IndexOutcome> {
        match IndexMode::from_code(mode) {
            Some(mode) => self.compute(station_id, mode),
            None => Ok(IndexOutcome::UnsupportedMode(mode)),
        }
    }

    pub fn compute_default(&self, station_id: &str) -> Result<IndexOutcome> {
        self.compute(station_id, IndexMode::default())
    }

    pub fn compute(&self, station_id: &str, mode: IndexMode) -> Result<IndexOutcome> {
        let record = match self.lookup.lookup(station_id) {
            Some(record) if !record.is_empty() => record,
            _ => return Ok(IndexOutcome::NoData),
        };

        let counts = AgeCounts::from_record(station_id, record)?;

        let (numerator, denominator, denominator_field) = match mode {
            IndexMode::ElderlyShare => (
                vec![counts.elderly],
                counts.total,
                PopulationField::Total,
            ),
            IndexMode::DependentShare => (
                vec![counts.youth, counts.elderly],
                counts.total,
                PopulationField::Total,
            ),
            IndexMode::AgingIndex => (
                vec![counts.elderly],
                counts.youth,
                PopulationField::Age0To14,
            ),
        };

        let undefined = IndexOutcome::Undefined {
            denominator: denominator_field,
        };
        if denominator == 0.0 {
            return Ok(undefined);
        }

        // A subnormal denominator can still push the ratio past f64::MAX.
        let value = round_to_hundredths(percentage(&numerator, denominator));
        if !value.is_finite() {
            return Ok(undefined);
        }

        Ok(IndexOutcome::Value(value))
    }
}

struct AgeCounts {
    total: f64,
    youth: f64,
    elderly: f64,
}

impl AgeCounts {
    const MIN_FIELDS: usize = PopulationField::Age65AndOver as usize + 1;

    fn from_record(station_id: &str, record: &PopulationRecord) -> Result<Self> {
        if record.len() < Self::MIN_FIELDS {
            return Err(IndicatorError::malformed(
                station_id,
                format!(
                    "expected at least {} fields, found {}",
                    Self::MIN_FIELDS,
                    record.len()
                ),
            ));
        }

        Ok(Self {
            total: count(station_id, record, PopulationField::Total)?,
            youth: count(station_id, record, PopulationField::Age0To14)?,
            elderly: count(station_id, record, PopulationField::Age65AndOver)?,
        })
    }
}

fn count(station_id: &str, record: &PopulationRecord, field: PopulationField) -> Result<f64> {
    let raw = record.get(field).ok_or_else(|| {
        IndicatorError::malformed(station_id, format!("field {} is missing", field))
    })?;

    match raw.as_f64() {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(IndicatorError::malformed(
            station_id,
            format!("field {} is not a number: {}", field, raw),
        )),
    }
}
