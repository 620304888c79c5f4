use crate::domain::model::PopulationRecord;

/// Read-only access to the station population data.
pub trait StationLookup: Send + Sync {
    /// The `POBLACION_500M` record of a station, if the station and bucket exist.
    fn lookup(&self, station_id: &str) -> Option<&PopulationRecord>;

    /// Every known station id, sorted.
    fn station_ids(&self) -> Vec<&str>;
}
