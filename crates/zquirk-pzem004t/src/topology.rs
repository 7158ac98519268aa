//! Static device topology.
//!
//! The PTVO firmware splits the meter across three logical endpoints:
//! endpoint 1 carries identity and configuration, endpoints 2 and 3 each
//! carry a raw analog-input channel. The quirk leaves the raw channels in
//! place and grafts the three emulated measurement clusters onto endpoint 1.
//! This is declarative data consumed by the host platform, not runtime
//! protocol.

use serde::Serialize;

/// ZHA profile id.
pub const PROFILE_ZHA: u16 = 0x0104;
/// Device type the PTVO firmware reports on its endpoints.
pub const PTVO_DEVICE_TYPE: u16 = 0xFFFE;
/// Standard meter-interface device type used for the analog endpoints.
pub const METER_INTERFACE: u16 = 0x0053;

/// Manufacturer and model the quirk matches.
pub const MODEL_INFO: (&str, &str) = ("CSRLabs", "pzem004t");

/// Endpoints carrying a raw analog-input channel.
pub const ANALOG_INPUT_ENDPOINTS: [u8; 2] = [2, 3];

/// Standard cluster ids referenced by the meter's endpoints.
pub mod cluster_id {
    /// Basic.
    pub const BASIC: u16 = 0x0000;
    /// On/off configuration.
    pub const ON_OFF_CONFIGURATION: u16 = 0x0007;
    /// Multistate input.
    pub const MULTISTATE_INPUT: u16 = 0x0012;
    /// Multistate value.
    pub const MULTISTATE_VALUE: u16 = 0x0014;
    /// Analog input.
    pub const ANALOG_INPUT: u16 = 0x000C;
    /// Temperature measurement.
    pub const TEMPERATURE_MEASUREMENT: u16 = 0x0402;
    /// Metering.
    pub const METERING: u16 = 0x0702;
    /// Electrical measurement.
    pub const ELECTRICAL_MEASUREMENT: u16 = 0x0B04;
}

/// One endpoint's declarative shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    /// Endpoint number.
    pub endpoint: u8,
    /// Application profile.
    pub profile_id: u16,
    /// Device type tag.
    pub device_type: u16,
    /// Server-side cluster ids.
    pub input_clusters: Vec<u16>,
    /// Client-side cluster ids.
    pub output_clusters: Vec<u16>,
}

/// Declarative shape of the whole device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTopology {
    /// Skip the host's reporting/binding configuration pass.
    pub skip_configuration: bool,
    /// Endpoint descriptors, in endpoint order.
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Shape the meter reports before the quirk is applied.
pub fn signature() -> DeviceTopology {
    use cluster_id::*;
    DeviceTopology {
        skip_configuration: false,
        endpoints: vec![
            EndpointDescriptor {
                endpoint: 1,
                profile_id: PROFILE_ZHA,
                device_type: PTVO_DEVICE_TYPE,
                input_clusters: vec![BASIC, ON_OFF_CONFIGURATION, MULTISTATE_VALUE],
                output_clusters: vec![BASIC, MULTISTATE_INPUT],
            },
            EndpointDescriptor {
                endpoint: 2,
                profile_id: PROFILE_ZHA,
                device_type: PTVO_DEVICE_TYPE,
                input_clusters: vec![ANALOG_INPUT, MULTISTATE_VALUE],
                output_clusters: vec![],
            },
            EndpointDescriptor {
                endpoint: 3,
                profile_id: PROFILE_ZHA,
                device_type: PTVO_DEVICE_TYPE,
                input_clusters: vec![ANALOG_INPUT],
                output_clusters: vec![],
            },
        ],
    }
}

/// Wiring the quirk substitutes: endpoint 1 gains the emulated measurement
/// clusters, endpoints 2 and 3 keep their raw analog inputs but are tagged
/// as meter interfaces.
pub fn replacement() -> DeviceTopology {
    use cluster_id::*;
    DeviceTopology {
        skip_configuration: true,
        endpoints: vec![
            EndpointDescriptor {
                endpoint: 1,
                profile_id: PROFILE_ZHA,
                device_type: PTVO_DEVICE_TYPE,
                input_clusters: vec![
                    BASIC,
                    ON_OFF_CONFIGURATION,
                    MULTISTATE_VALUE,
                    TEMPERATURE_MEASUREMENT,
                    ELECTRICAL_MEASUREMENT,
                    METERING,
                ],
                output_clusters: vec![BASIC],
            },
            EndpointDescriptor {
                endpoint: 2,
                profile_id: PROFILE_ZHA,
                device_type: METER_INTERFACE,
                input_clusters: vec![ANALOG_INPUT, MULTISTATE_VALUE],
                output_clusters: vec![],
            },
            EndpointDescriptor {
                endpoint: 3,
                profile_id: PROFILE_ZHA,
                device_type: METER_INTERFACE,
                input_clusters: vec![ANALOG_INPUT],
                output_clusters: vec![],
            },
        ],
    }
}
