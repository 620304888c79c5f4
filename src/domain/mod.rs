// Domain layer: population records and the lookup port. No external dependencies beyond serde.

pub mod model;
pub mod ports;
