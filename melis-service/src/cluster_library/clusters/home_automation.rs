//! Home automation clusters
//!
//! The appliance clusters are listed with their command identifiers only,
//! their payloads are kept as raw bytes.

use melis_data::cluster_library::AttributeDataType as Type;

use super::{attribute, reply, request};
use crate::cluster_library::ClusterKind;

/// Identification of an appliance
pub static APPLIANCE_IDENTIFICATION: ClusterKind = ClusterKind {
    identifier: 0x0b00,
    name: "Appliance Identification",
    attributes: &[
        attribute(0x0000, "basic_identification", Type::Unsigned56),
        attribute(0x0010, "company_name", Type::CharacterString),
        attribute(0x0011, "company_id", Type::Unsigned16),
        attribute(0x0012, "brand_name", Type::CharacterString),
        attribute(0x0013, "brand_id", Type::Unsigned16),
        attribute(0x0014, "model", Type::CharacterString),
        attribute(0x0015, "part_number", Type::CharacterString),
        attribute(0x0016, "product_revision", Type::CharacterString),
        attribute(0x0017, "software_revision", Type::CharacterString),
        attribute(0x0018, "product_type_name", Type::CharacterString),
        attribute(0x0019, "product_type_id", Type::Unsigned16),
        attribute(0x001a, "ceced_specification_version", Type::Unsigned8),
    ],
    server_commands: &[],
    client_commands: &[],
};

/// Identification of a meter
pub static METER_IDENTIFICATION: ClusterKind = ClusterKind {
    identifier: 0x0b01,
    name: "Meter Identification",
    attributes: &[
        attribute(0x0000, "company_name", Type::CharacterString),
        attribute(0x0001, "meter_type_id", Type::Unsigned16),
        attribute(0x0004, "data_quality_id", Type::Unsigned16),
        attribute(0x0005, "customer_name", Type::CharacterString),
        attribute(0x0006, "model", Type::CharacterString),
        attribute(0x0007, "part_number", Type::CharacterString),
        attribute(0x0008, "product_revision", Type::CharacterString),
        attribute(0x000a, "software_revision", Type::CharacterString),
        attribute(0x000b, "utility_name", Type::CharacterString),
        attribute(0x000c, "pod", Type::CharacterString),
        attribute(0x000d, "available_power", Type::Signed24),
        attribute(0x000e, "power_threshold", Type::Signed24),
    ],
    server_commands: &[],
    client_commands: &[],
};

/// Appliance alerts and events
pub static APPLIANCE_EVENTS_ALERTS: ClusterKind = ClusterKind {
    identifier: 0x0b02,
    name: "Appliance Events and Alerts",
    attributes: &[],
    server_commands: &[request(0x00, "get_alerts", &[])],
    client_commands: &[
        reply(0x00, "get_alerts_response", &[]),
        request(0x01, "alerts_notification", &[]),
        request(0x02, "event_notification", &[]),
    ],
};

/// Appliance logs
pub static APPLIANCE_STATISTICS: ClusterKind = ClusterKind {
    identifier: 0x0b03,
    name: "Appliance Statistics",
    attributes: &[
        attribute(0x0000, "log_max_size", Type::Unsigned32),
        attribute(0x0001, "log_queue_max_size", Type::Unsigned8),
    ],
    server_commands: &[request(0x00, "log", &[]), request(0x01, "log_queue", &[])],
    client_commands: &[
        request(0x00, "log_notification", &[]),
        reply(0x01, "log_response", &[]),
        reply(0x02, "log_queue_response", &[]),
        request(0x03, "statistics_available", &[]),
    ],
};

/// Electrical measurements, basic, DC and single phase AC sets
pub static ELECTRICAL_MEASUREMENT: ClusterKind = ClusterKind {
    identifier: 0x0b04,
    name: "Electrical Measurement",
    attributes: &[
        attribute(0x0000, "measurement_type", Type::Bitmap32),
        attribute(0x0100, "dc_voltage", Type::Signed16),
        attribute(0x0101, "dc_voltage_min", Type::Signed16),
        attribute(0x0102, "dc_voltage_max", Type::Signed16),
        attribute(0x0103, "dc_current", Type::Signed16),
        attribute(0x0104, "dc_current_min", Type::Signed16),
        attribute(0x0105, "dc_current_max", Type::Signed16),
        attribute(0x0106, "dc_power", Type::Signed16),
        attribute(0x0107, "dc_power_min", Type::Signed16),
        attribute(0x0108, "dc_power_max", Type::Signed16),
        attribute(0x0200, "dc_voltage_multiplier", Type::Unsigned16),
        attribute(0x0201, "dc_voltage_divisor", Type::Unsigned16),
        attribute(0x0202, "dc_current_multiplier", Type::Unsigned16),
        attribute(0x0203, "dc_current_divisor", Type::Unsigned16),
        attribute(0x0204, "dc_power_multiplier", Type::Unsigned16),
        attribute(0x0205, "dc_power_divisor", Type::Unsigned16),
        attribute(0x0300, "ac_frequency", Type::Unsigned16),
        attribute(0x0301, "ac_frequency_min", Type::Unsigned16),
        attribute(0x0302, "ac_frequency_max", Type::Unsigned16),
        attribute(0x0303, "neutral_current", Type::Unsigned16),
        attribute(0x0304, "total_active_power", Type::Signed32),
        attribute(0x0305, "total_reactive_power", Type::Signed32),
        attribute(0x0306, "total_apparent_power", Type::Unsigned32),
        attribute(0x0400, "ac_frequency_multiplier", Type::Unsigned16),
        attribute(0x0401, "ac_frequency_divisor", Type::Unsigned16),
        attribute(0x0402, "power_multiplier", Type::Unsigned32),
        attribute(0x0403, "power_divisor", Type::Unsigned32),
        attribute(0x0404, "harmonic_current_multiplier", Type::Signed8),
        attribute(0x0405, "phase_harmonic_current_multiplier", Type::Signed8),
        attribute(0x0500, "instantaneous_voltage", Type::Signed16),
        attribute(0x0501, "instantaneous_line_current", Type::Unsigned16),
        attribute(0x0502, "instantaneous_active_current", Type::Signed16),
        attribute(0x0503, "instantaneous_reactive_current", Type::Signed16),
        attribute(0x0504, "instantaneous_power", Type::Signed16),
        attribute(0x0505, "rms_voltage", Type::Unsigned16),
        attribute(0x0506, "rms_voltage_min", Type::Unsigned16),
        attribute(0x0507, "rms_voltage_max", Type::Unsigned16),
        attribute(0x0508, "rms_current", Type::Unsigned16),
        attribute(0x0509, "rms_current_min", Type::Unsigned16),
        attribute(0x050a, "rms_current_max", Type::Unsigned16),
        attribute(0x050b, "active_power", Type::Signed16),
        attribute(0x050c, "active_power_min", Type::Signed16),
        attribute(0x050d, "active_power_max", Type::Signed16),
        attribute(0x050e, "reactive_power", Type::Signed16),
        attribute(0x050f, "apparent_power", Type::Unsigned16),
        attribute(0x0510, "power_factor", Type::Signed8),
        attribute(0x0800, "ac_alarms_mask", Type::Bitmap16),
    ],
    server_commands: &[
        request(0x00, "get_profile_info", &[]),
        request(0x01, "get_measurement_profile", &[]),
    ],
    client_commands: &[
        reply(0x00, "get_profile_info_response", &[]),
        reply(0x01, "get_measurement_profile_response", &[]),
    ],
};

/// Radio and stack counters
pub static DIAGNOSTICS: ClusterKind = ClusterKind {
    identifier: 0x0b05,
    name: "Diagnostics",
    attributes: &[
        attribute(0x0000, "number_of_resets", Type::Unsigned16),
        attribute(0x0001, "persistent_memory_writes", Type::Unsigned16),
        attribute(0x0100, "mac_rx_bcast", Type::Unsigned32),
        attribute(0x0101, "mac_tx_bcast", Type::Unsigned32),
        attribute(0x0102, "mac_rx_ucast", Type::Unsigned32),
        attribute(0x0103, "mac_tx_ucast", Type::Unsigned32),
        attribute(0x0104, "mac_tx_ucast_retry", Type::Unsigned16),
        attribute(0x0105, "mac_tx_ucast_fail", Type::Unsigned16),
        attribute(0x0106, "aps_rx_bcast", Type::Unsigned16),
        attribute(0x0107, "aps_tx_bcast", Type::Unsigned16),
        attribute(0x0108, "aps_rx_ucast", Type::Unsigned16),
        attribute(0x0109, "aps_tx_ucast_success", Type::Unsigned16),
        attribute(0x010a, "aps_tx_ucast_retry", Type::Unsigned16),
        attribute(0x010b, "aps_tx_ucast_fail", Type::Unsigned16),
        attribute(0x010c, "route_disc_initiated", Type::Unsigned16),
        attribute(0x010d, "neighbor_added", Type::Unsigned16),
        attribute(0x010e, "neighbor_removed", Type::Unsigned16),
        attribute(0x010f, "neighbor_stale", Type::Unsigned16),
        attribute(0x0110, "join_indication", Type::Unsigned16),
        attribute(0x0111, "child_moved", Type::Unsigned16),
        attribute(0x0112, "nwk_fc_failure", Type::Unsigned16),
        attribute(0x0113, "aps_fc_failure", Type::Unsigned16),
        attribute(0x0114, "aps_unauthorized_key", Type::Unsigned16),
        attribute(0x0115, "nwk_decrypt_failures", Type::Unsigned16),
        attribute(0x0116, "aps_decrypt_failures", Type::Unsigned16),
        attribute(0x0117, "packet_buffer_allocate_failures", Type::Unsigned16),
        attribute(0x0118, "relayed_ucast", Type::Unsigned16),
        attribute(0x0119, "phy_to_mac_queue_limit_reached", Type::Unsigned16),
        attribute(0x011a, "packet_validate_drop_count", Type::Unsigned16),
        attribute(0x011b, "average_mac_retry_per_aps_message_sent", Type::Unsigned16),
        attribute(0x011c, "last_message_lqi", Type::Unsigned8),
        attribute(0x011d, "last_message_rssi", Type::Signed8),
    ],
    server_commands: &[],
    client_commands: &[],
};
