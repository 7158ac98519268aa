//! Emulated standard clusters backed by the device buses.
//!
//! Each cluster is a stateless sink: it subscribes to exactly one bus during
//! construction and maps every event it understands onto one fixed output
//! attribute in its cache. The host platform's generic read/report path
//! serves the cached attributes back out.

pub mod electrical;
pub mod metering;
pub mod temperature;

pub use electrical::ElectricalMeasurementCluster;
pub use metering::MeteringCluster;
pub use temperature::TemperatureMeasurementCluster;
