//! Quirk for the CSRLabs PZEM-004T v3 power meter on PTVO firmware.
//!
//! The PTVO firmware does not expose standard measurement clusters. Instead
//! it streams every reading through raw analog-input channels as two
//! attribute updates: a numeric value followed by a unit-tag string ("V",
//! "A", "W", ...). This crate adapts that stream onto the standard cluster
//! interfaces a home-automation platform expects:
//!
//! - [`analog_input`] — the sample classifier: buffers value samples,
//!   resolves them against the next unit tag and republishes typed
//!   measurements on the device buses.
//! - [`clusters`] — emulated temperature-measurement, electrical-measurement
//!   and metering clusters that subscribe to the buses and expose cached
//!   output attributes.
//! - [`device`] — the assembled device: three buses, three clusters, one
//!   classifier per raw-input endpoint.
//! - [`topology`] — the static endpoint/cluster shape the meter reports and
//!   the replacement wiring the quirk applies.

pub mod analog_input;
pub mod clusters;
pub mod device;
pub mod topology;

pub use analog_input::{AnalogInputChannel, AnalogValue, UnitTag};
pub use device::Pzem004t;
