//! Emulated electrical-measurement cluster.

use std::cell::RefCell;
use std::rc::Rc;

use zquirk_core::attribute::{normalize, AttributeCache, AttributeValue};
use zquirk_core::bus::{ElectricalBus, ElectricalListener};
use zquirk_core::error::QuirkError;

/// AC frequency, hertz.
pub const AC_FREQUENCY: u16 = 0x0300;
/// RMS voltage, volts.
pub const RMS_VOLTAGE: u16 = 0x0505;
/// RMS current, amperes.
pub const RMS_CURRENT: u16 = 0x0508;
/// Active power, watts.
pub const ACTIVE_POWER: u16 = 0x050B;
/// Apparent power, volt-amperes.
pub const APPARENT_POWER: u16 = 0x050F;
/// Power factor.
pub const POWER_FACTOR: u16 = 0x0510;

/// AC voltage display multiplier.
pub const AC_VOLTAGE_MULTIPLIER: u16 = 0x0600;
/// AC voltage display divisor.
pub const AC_VOLTAGE_DIVISOR: u16 = 0x0601;
/// AC current display multiplier.
pub const AC_CURRENT_MULTIPLIER: u16 = 0x0602;
/// AC current display divisor.
pub const AC_CURRENT_DIVISOR: u16 = 0x0603;
/// AC power display multiplier.
pub const AC_POWER_MULTIPLIER: u16 = 0x0604;
/// AC power display divisor.
pub const AC_POWER_DIVISOR: u16 = 0x0605;

/// Decimal places kept when normalizing a reading for display.
const DISPLAY_DECIMALS: u32 = 1;

/// Republishes classified electrical readings onto the standard
/// electrical-measurement attributes.
///
/// Raw cached values are unscaled; the per-quantity multiplier/divisor
/// attributes are fixed at 1/1 because the firmware already reports in base
/// units. [`normalized`](Self::normalized) applies the display contract.
#[derive(Debug)]
pub struct ElectricalMeasurementCluster {
    attributes: AttributeCache,
}

impl ElectricalMeasurementCluster {
    /// Zigbee cluster id being emulated.
    pub const CLUSTER_ID: u16 = 0x0B04;

    /// Create the cluster and subscribe it to the electrical bus.
    pub fn attach(bus: &Rc<RefCell<ElectricalBus>>) -> Rc<RefCell<Self>> {
        let cluster = Rc::new(RefCell::new(Self::new()));
        bus.borrow_mut().add_listener(cluster.clone());
        cluster
    }

    fn new() -> Self {
        let mut attributes = AttributeCache::new();
        // Display scaling constants; readings arrive in base units.
        attributes.update(AC_VOLTAGE_MULTIPLIER, 1i64);
        attributes.update(AC_VOLTAGE_DIVISOR, 1i64);
        attributes.update(AC_CURRENT_MULTIPLIER, 1i64);
        attributes.update(AC_CURRENT_DIVISOR, 1i64);
        attributes.update(AC_POWER_MULTIPLIER, 1i64);
        attributes.update(AC_POWER_DIVISOR, 1i64);
        Self { attributes }
    }

    /// Last value written for an output attribute.
    pub fn attribute(&self, id: u16) -> Option<AttributeValue> {
        self.attributes.get(id)
    }

    /// Display value for a measurement attribute: raw × multiplier ÷
    /// divisor, rounded to one decimal. Attributes without a declared
    /// multiplier/divisor pair are returned as-is.
    pub fn normalized(&self, id: u16) -> Option<f64> {
        let raw = self.attributes.get(id)?.as_f64();
        let (multiplier_id, divisor_id) = match id {
            RMS_VOLTAGE => (AC_VOLTAGE_MULTIPLIER, AC_VOLTAGE_DIVISOR),
            RMS_CURRENT => (AC_CURRENT_MULTIPLIER, AC_CURRENT_DIVISOR),
            ACTIVE_POWER | APPARENT_POWER => (AC_POWER_MULTIPLIER, AC_POWER_DIVISOR),
            _ => return Some(raw),
        };
        let multiplier = self.attributes.get(multiplier_id).map_or(1, |v| v.as_i64());
        let divisor = self.attributes.get(divisor_id).map_or(1, |v| v.as_i64());
        Some(normalize(raw, multiplier, divisor, DISPLAY_DECIMALS))
    }
}

impl ElectricalListener for ElectricalMeasurementCluster {
    fn power_reported(&mut self, value: f64) -> Result<(), QuirkError> {
        self.attributes.update(ACTIVE_POWER, value);
        Ok(())
    }

    fn voltage_reported(&mut self, value: f64) -> Result<(), QuirkError> {
        self.attributes.update(RMS_VOLTAGE, value);
        Ok(())
    }

    fn current_reported(&mut self, value: f64) -> Result<(), QuirkError> {
        self.attributes.update(RMS_CURRENT, value);
        Ok(())
    }

    fn frequency_reported(&mut self, value: f64) -> Result<(), QuirkError> {
        self.attributes.update(AC_FREQUENCY, value);
        Ok(())
    }

    fn power_factor_reported(&mut self, value: f64) -> Result<(), QuirkError> {
        self.attributes.update(POWER_FACTOR, value);
        Ok(())
    }

    fn apparent_power_reported(&mut self, value: f64) -> Result<(), QuirkError> {
        self.attributes.update(APPARENT_POWER, value);
        Ok(())
    }
}
