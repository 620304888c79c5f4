pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::StationDataset;
pub use core::indicator::{IndexMode, IndexOutcome, IndicatorCalculator};
pub use core::report::{IndexReport, IndexRow};
pub use domain::model::{FieldValue, PopulationField, PopulationRecord, StationEntry};
pub use domain::ports::StationLookup;
pub use utils::error::{IndicatorError, Result};
