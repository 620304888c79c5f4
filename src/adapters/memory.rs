use crate::domain::model::{PopulationRecord, StationEntry};
use crate::domain::ports::StationLookup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Station population data held in memory. Filled once, then only read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationDataset {
    stations: HashMap<String, StationEntry>,
}

impl StationDataset {
    pub fn new(stations: HashMap<String, StationEntry>) -> Self {
        Self { stations }
    }

    pub fn with_station(mut self, station_id: impl Into<String>, entry: StationEntry) -> Self {
        self.stations.insert(station_id.into(), entry);
        self
    }

    pub fn station(&self, station_id: &str) -> Option<&StationEntry> {
        self.stations.get(station_id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<(String, StationEntry)> for StationDataset {
    fn from_iter<I: IntoIterator<Item = (String, StationEntry)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl StationLookup for StationDataset {
    fn lookup(&self, station_id: &str) -> Option<&PopulationRecord> {
        self.stations.get(station_id)?.population_500m()
    }

    fn station_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.stations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
