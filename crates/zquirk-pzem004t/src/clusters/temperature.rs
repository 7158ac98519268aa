//! Emulated temperature-measurement cluster.

use std::cell::RefCell;
use std::rc::Rc;

use zquirk_core::attribute::{AttributeCache, AttributeValue};
use zquirk_core::bus::{TemperatureBus, TemperatureListener};
use zquirk_core::error::QuirkError;

/// Measured value, hundredths of a degree Celsius.
pub const MEASURED_VALUE: u16 = 0x0000;

/// Republishes classified temperature readings as the standard
/// measured-value attribute. Values arrive pre-scaled by the classifier, so
/// no transform is applied here.
#[derive(Debug, Default)]
pub struct TemperatureMeasurementCluster {
    attributes: AttributeCache,
}

impl TemperatureMeasurementCluster {
    /// Zigbee cluster id being emulated.
    pub const CLUSTER_ID: u16 = 0x0402;

    /// Create the cluster and subscribe it to the temperature bus.
    pub fn attach(bus: &Rc<RefCell<TemperatureBus>>) -> Rc<RefCell<Self>> {
        let cluster = Rc::new(RefCell::new(Self::default()));
        bus.borrow_mut().add_listener(cluster.clone());
        cluster
    }

    /// Last value written for an output attribute.
    pub fn attribute(&self, id: u16) -> Option<AttributeValue> {
        self.attributes.get(id)
    }
}

impl TemperatureListener for TemperatureMeasurementCluster {
    fn temperature_reported(&mut self, value: f64) -> Result<(), QuirkError> {
        self.attributes.update(MEASURED_VALUE, value);
        Ok(())
    }
}
