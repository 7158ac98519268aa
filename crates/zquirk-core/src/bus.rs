//! Synchronous in-process event buses, one per measurement domain.
//!
//! A device owns three independent buses (temperature, electrical,
//! consumption) so the measurement domains stay decoupled. A classifier
//! publishes typed events onto a bus; every registered listener receives them
//! synchronously, in registration order.
//!
//! Listeners implement the domain's trait. Every trait method defaults to a
//! no-op `Ok(())`, so a listener only overrides the events it understands and
//! silently ignores the rest. A listener error is not caught by the bus: it
//! propagates immediately to the publisher and the remaining listeners for
//! that event are skipped.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::QuirkError;

/// Synchronous pub/sub bus over listeners of type `L`.
///
/// Delivery order is registration order. A listener registered twice is
/// invoked once per registration; the bus performs no deduplication.
pub struct EventBus<L: ?Sized> {
    listeners: Vec<Rc<RefCell<L>>>,
}

impl<L: ?Sized> EventBus<L> {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener. Duplicates are kept and delivered to separately.
    pub fn add_listener(&mut self, listener: Rc<RefCell<L>>) {
        self.listeners.push(listener);
    }

    /// Number of registrations (duplicates counted).
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver one event to every listener, in registration order.
    ///
    /// `deliver` is called once per registration. The first error aborts
    /// delivery and propagates to the caller; no retry, no rollback.
    pub fn emit<F>(&self, mut deliver: F) -> Result<(), QuirkError>
    where
        F: FnMut(&mut L) -> Result<(), QuirkError>,
    {
        for listener in &self.listeners {
            deliver(&mut *listener.borrow_mut())?;
        }
        Ok(())
    }
}

impl<L: ?Sized> Default for EventBus<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener on a device's temperature bus.
pub trait TemperatureListener {
    /// A temperature reading, pre-scaled to hundredths of a degree Celsius.
    fn temperature_reported(&mut self, _value: f64) -> Result<(), QuirkError> {
        Ok(())
    }
}

/// Listener on a device's electrical-measurement bus.
///
/// Values arrive in the units the firmware reports (volts, amperes, watts,
/// hertz); any display scaling happens downstream on the read path.
pub trait ElectricalListener {
    /// Active power, watts.
    fn power_reported(&mut self, _value: f64) -> Result<(), QuirkError> {
        Ok(())
    }

    /// RMS voltage, volts.
    fn voltage_reported(&mut self, _value: f64) -> Result<(), QuirkError> {
        Ok(())
    }

    /// RMS current, amperes.
    fn current_reported(&mut self, _value: f64) -> Result<(), QuirkError> {
        Ok(())
    }

    /// AC frequency, hertz.
    fn frequency_reported(&mut self, _value: f64) -> Result<(), QuirkError> {
        Ok(())
    }

    /// Power factor.
    fn power_factor_reported(&mut self, _value: f64) -> Result<(), QuirkError> {
        Ok(())
    }

    /// Apparent power, volt-amperes, derived from the last voltage and
    /// current readings.
    fn apparent_power_reported(&mut self, _value: f64) -> Result<(), QuirkError> {
        Ok(())
    }
}

/// Listener on a device's consumption bus.
pub trait ConsumptionListener {
    /// Cumulative energy delivered, kilowatt-hours.
    fn consumption_reported(&mut self, _value: f64) -> Result<(), QuirkError> {
        Ok(())
    }

    /// Current draw rate, kilowatts.
    fn instantaneous_demand(&mut self, _value: f64) -> Result<(), QuirkError> {
        Ok(())
    }
}

/// Bus carrying temperature events.
pub type TemperatureBus = EventBus<dyn TemperatureListener>;
/// Bus carrying electrical-measurement events.
pub type ElectricalBus = EventBus<dyn ElectricalListener>;
/// Bus carrying consumption events.
pub type ConsumptionBus = EventBus<dyn ConsumptionListener>;
