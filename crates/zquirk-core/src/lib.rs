//! Shared plumbing for Zigbee device quirks.
//!
//! A quirk adapts a device with non-standard firmware onto the standard
//! cluster interfaces a home-automation platform expects. This crate carries
//! the pieces every quirk needs:
//!
//! - **Event buses**: synchronous in-process pub/sub, one bus per measurement
//!   domain, with an explicit listener trait per domain ([`bus`]).
//! - **Attribute model**: the cached output attribute values an emulated
//!   cluster exposes to the platform, plus display normalization ([`attribute`]).
//! - **Errors**: the [`QuirkError`] type surfaced by quirk components.
//!
//! Everything here is single-threaded and callback-driven. Updates are
//! delivered one at a time by the host stack, so listeners are shared with
//! `Rc<RefCell<_>>` and no locking is involved.

pub mod attribute;
pub mod bus;
pub mod error;

pub use attribute::{normalize, AttributeCache, AttributeValue};
pub use bus::{
    ConsumptionBus, ConsumptionListener, ElectricalBus, ElectricalListener, EventBus,
    TemperatureBus, TemperatureListener,
};
pub use error::QuirkError;
