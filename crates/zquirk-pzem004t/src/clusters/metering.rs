//! Emulated metering cluster.

use std::cell::RefCell;
use std::rc::Rc;

use zquirk_core::attribute::{AttributeCache, AttributeValue};
use zquirk_core::bus::{ConsumptionBus, ConsumptionListener};
use zquirk_core::error::QuirkError;

/// Cumulative energy delivered.
pub const CURRENT_SUMMATION_DELIVERED: u16 = 0x0000;
/// Instantaneous demand, kilowatts.
pub const INSTANTANEOUS_DEMAND: u16 = 0x0400;

/// Unit of measure.
pub const UNIT_OF_MEASURE: u16 = 0x0300;
/// Summation multiplier.
pub const MULTIPLIER: u16 = 0x0301;
/// Summation divisor.
pub const DIVISOR: u16 = 0x0302;
/// Summation digit formatting.
pub const SUMMATION_FORMATTING: u16 = 0x0303;
/// Metering device type.
pub const METERING_DEVICE_TYPE: u16 = 0x0306;

/// kWh unit code for [`UNIT_OF_MEASURE`].
const UNIT_KILOWATT_HOURS: i64 = 0;
/// Electric-meter code for [`METERING_DEVICE_TYPE`].
const DEVICE_TYPE_ELECTRIC: i64 = 0;
/// Three digits after the decimal point, suppress leading zeros.
const SUMMATION_FORMAT: i64 = 0b0_0100_011;

/// Republishes consumption events onto the standard metering attributes.
///
/// Cumulative consumption is rounded to the nearest integer before caching;
/// instantaneous demand is cached as-is. Five configuration attributes are
/// seeded at construction and never change afterwards.
#[derive(Debug)]
pub struct MeteringCluster {
    attributes: AttributeCache,
}

impl MeteringCluster {
    /// Zigbee cluster id being emulated.
    pub const CLUSTER_ID: u16 = 0x0702;

    /// Create the cluster and subscribe it to the consumption bus.
    pub fn attach(bus: &Rc<RefCell<ConsumptionBus>>) -> Rc<RefCell<Self>> {
        let cluster = Rc::new(RefCell::new(Self::new()));
        bus.borrow_mut().add_listener(cluster.clone());
        cluster
    }

    fn new() -> Self {
        let mut attributes = AttributeCache::new();
        attributes.update(UNIT_OF_MEASURE, UNIT_KILOWATT_HOURS);
        attributes.update(MULTIPLIER, 1i64);
        attributes.update(DIVISOR, 1000i64);
        attributes.update(SUMMATION_FORMATTING, SUMMATION_FORMAT);
        attributes.update(METERING_DEVICE_TYPE, DEVICE_TYPE_ELECTRIC);
        Self { attributes }
    }

    /// Last value written for an output attribute.
    pub fn attribute(&self, id: u16) -> Option<AttributeValue> {
        self.attributes.get(id)
    }
}

impl ConsumptionListener for MeteringCluster {
    fn consumption_reported(&mut self, value: f64) -> Result<(), QuirkError> {
        self.attributes
            .update(CURRENT_SUMMATION_DELIVERED, value.round() as i64);
        Ok(())
    }

    fn instantaneous_demand(&mut self, value: f64) -> Result<(), QuirkError> {
        self.attributes.update(INSTANTANEOUS_DEMAND, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached() -> (Rc<RefCell<ConsumptionBus>>, Rc<RefCell<MeteringCluster>>) {
        let bus = Rc::new(RefCell::new(ConsumptionBus::new()));
        let cluster = MeteringCluster::attach(&bus);
        (bus, cluster)
    }

    #[test]
    fn test_consumption_rounds_to_nearest_integer() {
        let (bus, cluster) = attached();
        bus.borrow().emit(|l| l.consumption_reported(123.6)).unwrap();
        assert_eq!(
            cluster.borrow().attribute(CURRENT_SUMMATION_DELIVERED),
            Some(AttributeValue::Int(124))
        );

        bus.borrow().emit(|l| l.consumption_reported(123.4)).unwrap();
        assert_eq!(
            cluster.borrow().attribute(CURRENT_SUMMATION_DELIVERED),
            Some(AttributeValue::Int(123))
        );
    }

    #[test]
    fn test_demand_kept_unrounded() {
        let (bus, cluster) = attached();
        bus.borrow().emit(|l| l.instantaneous_demand(2.3)).unwrap();
        assert_eq!(
            cluster.borrow().attribute(INSTANTANEOUS_DEMAND),
            Some(AttributeValue::Float(2.3))
        );
    }

    #[test]
    fn test_configuration_constants_seeded_and_stable() {
        let (bus, cluster) = attached();
        let expect = [
            (UNIT_OF_MEASURE, 0),
            (MULTIPLIER, 1),
            (DIVISOR, 1000),
            (SUMMATION_FORMATTING, 0b0_0100_011),
            (METERING_DEVICE_TYPE, 0),
        ];
        for (id, value) in expect {
            assert_eq!(cluster.borrow().attribute(id), Some(AttributeValue::Int(value)));
        }

        // Reported events leave the configuration untouched.
        bus.borrow().emit(|l| l.consumption_reported(9.9)).unwrap();
        bus.borrow().emit(|l| l.instantaneous_demand(1.1)).unwrap();
        for (id, value) in expect {
            assert_eq!(cluster.borrow().attribute(id), Some(AttributeValue::Int(value)));
        }
    }
}
