//! Device assembly: buses, clusters and classifiers wired together.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use zquirk_core::bus::{ConsumptionBus, ElectricalBus, TemperatureBus};
use zquirk_core::error::QuirkError;

use crate::analog_input::{AnalogInputChannel, AnalogValue};
use crate::clusters::{
    ElectricalMeasurementCluster, MeteringCluster, TemperatureMeasurementCluster,
};
use crate::topology;

/// The assembled PZEM-004T quirk device.
///
/// Owns the three per-domain buses, the three emulated clusters subscribed
/// to them, and one independent classifier per raw analog-input endpoint.
/// All raw channels publish onto the same device-level buses.
pub struct Pzem004t {
    temperature_bus: Rc<RefCell<TemperatureBus>>,
    electrical_bus: Rc<RefCell<ElectricalBus>>,
    consumption_bus: Rc<RefCell<ConsumptionBus>>,
    temperature: Rc<RefCell<TemperatureMeasurementCluster>>,
    electrical: Rc<RefCell<ElectricalMeasurementCluster>>,
    metering: Rc<RefCell<MeteringCluster>>,
    channels: Vec<AnalogInputChannel>,
}

impl Pzem004t {
    /// Assemble the device.
    ///
    /// The buses are created first: every cluster subscribes to its bus
    /// during its own construction.
    pub fn new() -> Self {
        let temperature_bus = Rc::new(RefCell::new(TemperatureBus::new()));
        let electrical_bus = Rc::new(RefCell::new(ElectricalBus::new()));
        let consumption_bus = Rc::new(RefCell::new(ConsumptionBus::new()));

        let temperature = TemperatureMeasurementCluster::attach(&temperature_bus);
        let electrical = ElectricalMeasurementCluster::attach(&electrical_bus);
        let metering = MeteringCluster::attach(&consumption_bus);

        let channels = topology::ANALOG_INPUT_ENDPOINTS
            .iter()
            .map(|&endpoint| {
                AnalogInputChannel::new(
                    endpoint,
                    temperature_bus.clone(),
                    electrical_bus.clone(),
                    consumption_bus.clone(),
                )
            })
            .collect();

        Self {
            temperature_bus,
            electrical_bus,
            consumption_bus,
            temperature,
            electrical,
            metering,
            channels,
        }
    }

    /// Route one raw attribute update to the classifier for its endpoint.
    ///
    /// Updates for endpoints without an analog channel are ignored; the
    /// host's generic machinery handles those clusters itself.
    pub fn handle_attribute_update(
        &mut self,
        endpoint: u8,
        attribute: u16,
        value: Option<&AnalogValue>,
    ) -> Result<(), QuirkError> {
        match self.channels.iter_mut().find(|c| c.endpoint() == endpoint) {
            Some(channel) => channel.handle_attribute_update(attribute, value),
            None => {
                debug!(endpoint, attribute, "no analog channel on endpoint, ignoring");
                Ok(())
            }
        }
    }

    /// Emulated temperature-measurement cluster.
    pub fn temperature(&self) -> &Rc<RefCell<TemperatureMeasurementCluster>> {
        &self.temperature
    }

    /// Emulated electrical-measurement cluster.
    pub fn electrical(&self) -> &Rc<RefCell<ElectricalMeasurementCluster>> {
        &self.electrical
    }

    /// Emulated metering cluster.
    pub fn metering(&self) -> &Rc<RefCell<MeteringCluster>> {
        &self.metering
    }

    /// Temperature bus, for wiring extra listeners.
    pub fn temperature_bus(&self) -> &Rc<RefCell<TemperatureBus>> {
        &self.temperature_bus
    }

    /// Electrical bus, for wiring extra listeners.
    pub fn electrical_bus(&self) -> &Rc<RefCell<ElectricalBus>> {
        &self.electrical_bus
    }

    /// Consumption bus, for wiring extra listeners.
    pub fn consumption_bus(&self) -> &Rc<RefCell<ConsumptionBus>> {
        &self.consumption_bus
    }
}

impl Default for Pzem004t {
    fn default() -> Self {
        Self::new()
    }
}
