//! Sample classifier for PTVO analog-input channels.
//!
//! The firmware reports each reading as two raw attribute updates on the
//! same endpoint: the numeric value (analog-input present value, attribute
//! 85) followed by a unit-tag string (description, attribute 28). The
//! classifier buffers the last value sample and resolves it when a tag
//! arrives, then republishes typed measurements on the device buses.
//!
//! Pairing is last-write-wins: there is no token or timestamp tying a value
//! to its tag, so a stale buffered value would be attributed to whatever tag
//! arrives next. That matches the firmware's actual behavior and is kept
//! as-is. Unknown tags and null payloads are ignored rather than treated as
//! errors; the tag vocabulary is not a hard contract.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};
use zquirk_core::bus::{ConsumptionBus, ElectricalBus, TemperatureBus};
use zquirk_core::error::QuirkError;

/// Analog-input present-value attribute: the numeric reading.
pub const PRESENT_VALUE_ATTR: u16 = 85;
/// Analog-input description attribute: the unit tag for the buffered reading.
pub const DESCRIPTION_ATTR: u16 = 28;

/// Raw payload of an analog-input attribute update.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalogValue {
    /// Numeric sample (present value).
    Number(f64),
    /// String sample (unit tag).
    Text(String),
}

impl From<f64> for AnalogValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AnalogValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Physical quantity named by a firmware unit tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitTag {
    /// `"C"` — chip temperature, degrees Celsius.
    Celsius,
    /// `"V"` — RMS voltage, volts.
    Volt,
    /// `"A"` — RMS current, amperes.
    Ampere,
    /// `"W"` — active power, watts.
    Watt,
    /// `"Hz"` — AC frequency, hertz.
    Hertz,
    /// `"pf"` — power factor.
    PowerFactor,
    /// `"Wh"` — cumulative energy, watt-hours.
    WattHour,
}

impl UnitTag {
    /// Case-sensitive match against the firmware's tag vocabulary.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "C" => Some(Self::Celsius),
            "V" => Some(Self::Volt),
            "A" => Some(Self::Ampere),
            "W" => Some(Self::Watt),
            "Hz" => Some(Self::Hertz),
            "pf" => Some(Self::PowerFactor),
            "Wh" => Some(Self::WattHour),
            _ => None,
        }
    }
}

/// Classifier for one physical measurement channel.
///
/// Buffers the last numeric sample and resolves it against the next unit
/// tag. Voltage and current readings are additionally retained across
/// cycles because apparent power needs both at once.
pub struct AnalogInputChannel {
    endpoint: u8,
    pending_value: f64,
    last_voltage: f64,
    last_current: f64,
    temperature_bus: Rc<RefCell<TemperatureBus>>,
    electrical_bus: Rc<RefCell<ElectricalBus>>,
    consumption_bus: Rc<RefCell<ConsumptionBus>>,
}

impl AnalogInputChannel {
    /// Create a channel for `endpoint`, wired to the device's three buses.
    pub fn new(
        endpoint: u8,
        temperature_bus: Rc<RefCell<TemperatureBus>>,
        electrical_bus: Rc<RefCell<ElectricalBus>>,
        consumption_bus: Rc<RefCell<ConsumptionBus>>,
    ) -> Self {
        Self {
            endpoint,
            pending_value: 0.0,
            last_voltage: 0.0,
            last_current: 0.0,
            temperature_bus,
            electrical_bus,
            consumption_bus,
        }
    }

    /// Endpoint this channel decodes.
    pub fn endpoint(&self) -> u8 {
        self.endpoint
    }

    /// Handle one raw attribute update from the firmware.
    ///
    /// A numeric present-value sample only buffers; a description sample
    /// resolves the buffered value against its unit tag and emits the
    /// corresponding events. Null payloads, unrelated attributes and unknown
    /// tags produce no state change and no event.
    ///
    /// The only error path is a bus listener failing during delivery; state
    /// written before the failure is not rolled back.
    pub fn handle_attribute_update(
        &mut self,
        attribute: u16,
        value: Option<&AnalogValue>,
    ) -> Result<(), QuirkError> {
        let Some(value) = value else {
            return Ok(());
        };
        match (attribute, value) {
            (PRESENT_VALUE_ATTR, AnalogValue::Number(sample)) => {
                trace!(endpoint = self.endpoint, sample, "buffered analog sample");
                self.pending_value = *sample;
                Ok(())
            }
            (DESCRIPTION_ATTR, AnalogValue::Text(tag)) => self.resolve(tag),
            _ => Ok(()),
        }
    }

    /// Resolve the buffered value against a unit tag and republish it.
    fn resolve(&mut self, tag: &str) -> Result<(), QuirkError> {
        let Some(unit) = UnitTag::from_tag(tag) else {
            debug!(endpoint = self.endpoint, tag, "ignoring unknown unit tag");
            return Ok(());
        };
        let value = self.pending_value;
        debug!(endpoint = self.endpoint, ?unit, value, "classified sample");
        match unit {
            UnitTag::Celsius => self
                .temperature_bus
                .borrow()
                .emit(|l| l.temperature_reported(value * 100.0)),
            UnitTag::Volt => {
                self.last_voltage = value;
                self.electrical_bus.borrow().emit(|l| l.voltage_reported(value))
            }
            UnitTag::Ampere => {
                self.last_current = value;
                let electrical = self.electrical_bus.borrow();
                electrical.emit(|l| l.current_reported(value))?;
                let apparent = self.last_voltage * self.last_current;
                electrical.emit(|l| l.apparent_power_reported(apparent))
            }
            UnitTag::Watt => {
                self.electrical_bus.borrow().emit(|l| l.power_reported(value))?;
                self.consumption_bus
                    .borrow()
                    .emit(|l| l.instantaneous_demand(value / 1000.0))
            }
            UnitTag::Hertz => self
                .electrical_bus
                .borrow()
                .emit(|l| l.frequency_reported(value)),
            UnitTag::PowerFactor => self
                .electrical_bus
                .borrow()
                .emit(|l| l.power_factor_reported(value)),
            UnitTag::WattHour => self
                .consumption_bus
                .borrow()
                .emit(|l| l.consumption_reported(value / 1000.0)),
        }
    }
}
