pub mod indicator;
pub mod report;

pub use crate::domain::model::{PopulationField, PopulationRecord};
pub use crate::domain::ports::StationLookup;
pub use crate::utils::error::Result;
