//! End-to-end tests: raw firmware sample stream through the assembled
//! device, checked against the emulated clusters' attribute caches.

use zquirk_core::attribute::AttributeValue;
use zquirk_pzem004t::analog_input::{AnalogValue, DESCRIPTION_ATTR, PRESENT_VALUE_ATTR};
use zquirk_pzem004t::clusters::{electrical, metering, temperature};
use zquirk_pzem004t::Pzem004t;

fn number(value: f64) -> AnalogValue {
    AnalogValue::Number(value)
}

fn tag(value: &str) -> AnalogValue {
    AnalogValue::Text(value.to_string())
}

fn feed(device: &mut Pzem004t, endpoint: u8, samples: &[(u16, AnalogValue)]) {
    for (attribute, value) in samples {
        device
            .handle_attribute_update(endpoint, *attribute, Some(value))
            .unwrap();
    }
}

#[test]
fn test_full_measurement_cycle() {
    let mut device = Pzem004t::new();
    feed(
        &mut device,
        2,
        &[
            (PRESENT_VALUE_ATTR, number(230.0)),
            (DESCRIPTION_ATTR, tag("V")),
            (PRESENT_VALUE_ATTR, number(10.0)),
            (DESCRIPTION_ATTR, tag("A")),
            (PRESENT_VALUE_ATTR, number(2300.0)),
            (DESCRIPTION_ATTR, tag("W")),
            (PRESENT_VALUE_ATTR, number(50.0)),
            (DESCRIPTION_ATTR, tag("Hz")),
            (PRESENT_VALUE_ATTR, number(1.0)),
            (DESCRIPTION_ATTR, tag("pf")),
            (PRESENT_VALUE_ATTR, number(123456.0)),
            (DESCRIPTION_ATTR, tag("Wh")),
        ],
    );

    let em = device.electrical().borrow();
    assert_eq!(
        em.attribute(electrical::RMS_VOLTAGE),
        Some(AttributeValue::Float(230.0))
    );
    assert_eq!(
        em.attribute(electrical::RMS_CURRENT),
        Some(AttributeValue::Float(10.0))
    );
    assert_eq!(
        em.attribute(electrical::APPARENT_POWER),
        Some(AttributeValue::Float(2300.0))
    );
    assert_eq!(
        em.attribute(electrical::ACTIVE_POWER),
        Some(AttributeValue::Float(2300.0))
    );
    assert_eq!(
        em.attribute(electrical::AC_FREQUENCY),
        Some(AttributeValue::Float(50.0))
    );
    assert_eq!(
        em.attribute(electrical::POWER_FACTOR),
        Some(AttributeValue::Float(1.0))
    );

    let meter = device.metering().borrow();
    assert_eq!(
        meter.attribute(metering::CURRENT_SUMMATION_DELIVERED),
        Some(AttributeValue::Int(123))
    );
    assert_eq!(
        meter.attribute(metering::INSTANTANEOUS_DEMAND),
        Some(AttributeValue::Float(2.3))
    );
}

#[test]
fn test_duplicate_power_report_reemits_at_reported_scale() {
    // The firmware sometimes re-reports power with the already-divided
    // kilowatt figure. Each "W" tag classifies whatever value preceded it,
    // so the second report overwrites active power at the smaller scale and
    // divides the demand value again. Kept as-is: per-event semantics, no
    // dedup.
    let mut device = Pzem004t::new();
    feed(
        &mut device,
        2,
        &[
            (PRESENT_VALUE_ATTR, number(230.0)),
            (DESCRIPTION_ATTR, tag("V")),
            (PRESENT_VALUE_ATTR, number(10.0)),
            (DESCRIPTION_ATTR, tag("A")),
            (PRESENT_VALUE_ATTR, number(2300.0)),
            (DESCRIPTION_ATTR, tag("W")),
            (PRESENT_VALUE_ATTR, number(2.3)),
            (DESCRIPTION_ATTR, tag("W")),
        ],
    );

    let em = device.electrical().borrow();
    assert_eq!(
        em.attribute(electrical::APPARENT_POWER),
        Some(AttributeValue::Float(2300.0))
    );
    // Second "W" overwrote active power with the already-small value.
    assert_eq!(
        em.attribute(electrical::ACTIVE_POWER),
        Some(AttributeValue::Float(2.3))
    );
    assert_eq!(
        device
            .metering()
            .borrow()
            .attribute(metering::INSTANTANEOUS_DEMAND),
        Some(AttributeValue::Float(2.3 / 1000.0))
    );
}

#[test]
fn test_temperature_path_through_device() {
    let mut device = Pzem004t::new();
    feed(
        &mut device,
        3,
        &[
            (PRESENT_VALUE_ATTR, number(24.0)),
            (DESCRIPTION_ATTR, tag("C")),
        ],
    );
    assert_eq!(
        device
            .temperature()
            .borrow()
            .attribute(temperature::MEASURED_VALUE),
        Some(AttributeValue::Float(2400.0))
    );
}

#[test]
fn test_both_channels_feed_the_same_clusters() {
    let mut device = Pzem004t::new();
    feed(
        &mut device,
        2,
        &[
            (PRESENT_VALUE_ATTR, number(231.0)),
            (DESCRIPTION_ATTR, tag("V")),
        ],
    );
    feed(
        &mut device,
        3,
        &[
            (PRESENT_VALUE_ATTR, number(49.9)),
            (DESCRIPTION_ATTR, tag("Hz")),
        ],
    );

    let em = device.electrical().borrow();
    assert_eq!(
        em.attribute(electrical::RMS_VOLTAGE),
        Some(AttributeValue::Float(231.0))
    );
    assert_eq!(
        em.attribute(electrical::AC_FREQUENCY),
        Some(AttributeValue::Float(49.9))
    );
}

#[test]
fn test_unknown_tags_and_nulls_leave_clusters_untouched() {
    let mut device = Pzem004t::new();
    device.handle_attribute_update(2, PRESENT_VALUE_ATTR, None).unwrap();
    feed(
        &mut device,
        2,
        &[
            (PRESENT_VALUE_ATTR, number(42.0)),
            (DESCRIPTION_ATTR, tag("var")),
        ],
    );

    assert_eq!(
        device
            .temperature()
            .borrow()
            .attribute(temperature::MEASURED_VALUE),
        None
    );
    let em = device.electrical().borrow();
    for id in [
        electrical::RMS_VOLTAGE,
        electrical::RMS_CURRENT,
        electrical::ACTIVE_POWER,
        electrical::APPARENT_POWER,
        electrical::AC_FREQUENCY,
        electrical::POWER_FACTOR,
    ] {
        assert_eq!(em.attribute(id), None);
    }
    assert_eq!(
        device
            .metering()
            .borrow()
            .attribute(metering::CURRENT_SUMMATION_DELIVERED),
        None
    );
}
