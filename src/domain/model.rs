use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Bucket holding the population counted inside the 500 m buffer around a station.
pub const POPULATION_500M_BUCKET: &str = "POBLACION_500M";

/// Positional layout of a population bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopulationField {
    Total,
    Male,
    Female,
    Age0To14,
    Age15To64,
    Age65AndOver,
    SpanishNational,
    ForeignNational,
    BornInCatalonia,
    BornElsewhereInSpain,
    BornAbroad,
}

impl PopulationField {
    pub const ALL: [PopulationField; 11] = [
        PopulationField::Total,
        PopulationField::Male,
        PopulationField::Female,
        PopulationField::Age0To14,
        PopulationField::Age15To64,
        PopulationField::Age65AndOver,
        PopulationField::SpanishNational,
        PopulationField::ForeignNational,
        PopulationField::BornInCatalonia,
        PopulationField::BornElsewhereInSpain,
        PopulationField::BornAbroad,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the population buffer files.
    pub fn code(self) -> &'static str {
        match self {
            PopulationField::Total => "TOTAL",
            PopulationField::Male => "HOMES",
            PopulationField::Female => "DONES",
            PopulationField::Age0To14 => "P_0_14",
            PopulationField::Age15To64 => "P_15_64",
            PopulationField::Age65AndOver => "P_65_I_MES",
            PopulationField::SpanishNational => "P_ESPANYOL",
            PopulationField::ForeignNational => "P_ESTRANGE",
            PopulationField::BornInCatalonia => "P_NASC_CAT",
            PopulationField::BornElsewhereInSpain => "P_NASC_RES",
            PopulationField::BornAbroad => "P_NASC_EST",
        }
    }
}

impl fmt::Display for PopulationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single count as it was stored upstream. Text values show up when the
/// buffer was read without type inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopulationRecord {
    fields: Vec<FieldValue>,
}

impl PopulationRecord {
    pub fn new(fields: Vec<FieldValue>) -> Self {
        Self { fields }
    }

    pub fn from_counts(counts: &[i64]) -> Self {
        Self::new(counts.iter().copied().map(FieldValue::from).collect())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: PopulationField) -> Option<&FieldValue> {
        self.fields.get(field.index())
    }

    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }
}

/// Named population buckets precomputed for one station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationEntry {
    buckets: HashMap<String, PopulationRecord>,
}

impl StationEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, name: impl Into<String>, record: PopulationRecord) -> Self {
        self.buckets.insert(name.into(), record);
        self
    }

    pub fn with_population_500m(self, record: PopulationRecord) -> Self {
        self.with_bucket(POPULATION_500M_BUCKET, record)
    }

    pub fn bucket(&self, name: &str) -> Option<&PopulationRecord> {
        self.buckets.get(name)
    }

    pub fn population_500m(&self) -> Option<&PopulationRecord> {
        self.bucket(POPULATION_500M_BUCKET)
    }
}
