//! General clusters

use melis_data::cluster_library::AttributeDataType as Type;
use melis_data::types::{FieldType, Schema};

use super::{attribute, reply, request};
use crate::cluster_library::ClusterKind;

/// Basic device information
pub static BASIC: ClusterKind = ClusterKind {
    identifier: 0x0000,
    name: "Basic",
    attributes: &[
        attribute(0x0000, "zcl_version", Type::Unsigned8),
        attribute(0x0001, "app_version", Type::Unsigned8),
        attribute(0x0002, "stack_version", Type::Unsigned8),
        attribute(0x0003, "hw_version", Type::Unsigned8),
        attribute(0x0004, "manufacturer", Type::CharacterString),
        attribute(0x0005, "model", Type::CharacterString),
        attribute(0x0006, "date_code", Type::CharacterString),
        attribute(0x0007, "power_source", Type::Enumeration8),
        attribute(0x0010, "location_desc", Type::CharacterString),
        attribute(0x0011, "physical_env", Type::Enumeration8),
        attribute(0x0012, "device_enabled", Type::Boolean),
        attribute(0x0013, "alarm_mask", Type::Bitmap8),
        attribute(0x0014, "disable_local_config", Type::Bitmap8),
        attribute(0x4000, "sw_build_id", Type::CharacterString),
    ],
    server_commands: &[request(0x00, "reset_factory_defaults", &[])],
    client_commands: &[],
};

/// Power source information
pub static POWER_CONFIGURATION: ClusterKind = ClusterKind {
    identifier: 0x0001,
    name: "Power Configuration",
    attributes: &[
        attribute(0x0000, "mains_voltage", Type::Unsigned16),
        attribute(0x0001, "mains_frequency", Type::Unsigned8),
        attribute(0x0010, "mains_alarm_mask", Type::Bitmap8),
        attribute(0x0011, "mains_volt_min_thres", Type::Unsigned16),
        attribute(0x0012, "mains_volt_max_thres", Type::Unsigned16),
        attribute(0x0013, "mains_voltage_dwell_trip_point", Type::Unsigned16),
        attribute(0x0020, "battery_voltage", Type::Unsigned8),
        attribute(0x0021, "battery_percentage_remaining", Type::Unsigned8),
        attribute(0x0030, "battery_manufacturer", Type::CharacterString),
        attribute(0x0031, "battery_size", Type::Enumeration8),
        attribute(0x0032, "battery_a_hr_rating", Type::Unsigned16),
        attribute(0x0033, "battery_quantity", Type::Unsigned8),
        attribute(0x0034, "battery_rated_voltage", Type::Unsigned8),
        attribute(0x0035, "battery_alarm_mask", Type::Bitmap8),
        attribute(0x0036, "battery_volt_min_thres", Type::Unsigned8),
    ],
    server_commands: &[],
    client_commands: &[],
};

const GROUP: Schema = schema!("group_id": FieldType::Unsigned16);
const GROUP_STATUS: Schema = schema!(
    "status": FieldType::Unsigned8,
    "group_id": FieldType::Unsigned16,
);
const SCENE: Schema = schema!(
    "group_id": FieldType::Unsigned16,
    "scene_id": FieldType::Unsigned8,
);
const SCENE_STATUS: Schema = schema!(
    "status": FieldType::Unsigned8,
    "group_id": FieldType::Unsigned16,
    "scene_id": FieldType::Unsigned8,
);
const EXTENSION_FIELD_SET: Schema = schema!(
    "cluster_id": FieldType::Unsigned16,
    "extension": FieldType::OctetString,
);
const EFFECT: Schema = schema!(
    "effect_id": FieldType::Unsigned8,
    "effect_variant": FieldType::Unsigned8,
);

/// Identification of a device by blinking or beeping
pub static IDENTIFY: ClusterKind = ClusterKind {
    identifier: 0x0003,
    name: "Identify",
    attributes: &[attribute(0x0000, "identify_time", Type::Unsigned16)],
    server_commands: &[
        request(
            0x00,
            "identify",
            schema!("identify_time": FieldType::Unsigned16),
        ),
        request(0x01, "identify_query", &[]),
        request(0x40, "trigger_effect", EFFECT),
    ],
    client_commands: &[reply(
        0x00,
        "identify_query_response",
        schema!("timeout": FieldType::Unsigned16),
    )],
};

/// Group membership
pub static GROUPS: ClusterKind = ClusterKind {
    identifier: 0x0004,
    name: "Groups",
    attributes: &[attribute(0x0000, "name_support", Type::Bitmap8)],
    server_commands: &[
        request(
            0x00,
            "add",
            schema!(
                "group_id": FieldType::Unsigned16,
                "group_name": FieldType::CharacterString,
            ),
        ),
        request(0x01, "view", GROUP),
        request(
            0x02,
            "get_membership",
            schema!("groups": FieldType::CountedList(&FieldType::Unsigned16)),
        ),
        request(0x03, "remove", GROUP),
        request(0x04, "remove_all", &[]),
        request(
            0x05,
            "add_if_identifying",
            schema!(
                "group_id": FieldType::Unsigned16,
                "group_name": FieldType::CharacterString,
            ),
        ),
    ],
    client_commands: &[
        reply(0x00, "add_response", GROUP_STATUS),
        reply(
            0x01,
            "view_response",
            schema!(
                "status": FieldType::Unsigned8,
                "group_id": FieldType::Unsigned16,
                "group_name": FieldType::CharacterString,
            ),
        ),
        reply(
            0x02,
            "get_membership_response",
            schema!(
                "capacity": FieldType::Unsigned8,
                "groups": FieldType::CountedList(&FieldType::Unsigned16),
            ),
        ),
        reply(0x03, "remove_response", GROUP_STATUS),
    ],
};

/// Stored attribute settings recalled as a whole
pub static SCENES: ClusterKind = ClusterKind {
    identifier: 0x0005,
    name: "Scenes",
    attributes: &[
        attribute(0x0000, "count", Type::Unsigned8),
        attribute(0x0001, "current_scene", Type::Unsigned8),
        attribute(0x0002, "current_group", Type::Unsigned16),
        attribute(0x0003, "scene_valid", Type::Boolean),
        attribute(0x0004, "name_support", Type::Bitmap8),
        attribute(0x0005, "last_configured_by", Type::IeeeAddress),
    ],
    server_commands: &[
        request(
            0x00,
            "add",
            schema!(
                "group_id": FieldType::Unsigned16,
                "scene_id": FieldType::Unsigned8,
                "transition_time": FieldType::Unsigned16,
                "scene_name": FieldType::CharacterString,
                "extension_field_sets": FieldType::List(&FieldType::Record(EXTENSION_FIELD_SET)),
            ),
        ),
        request(0x01, "view", SCENE),
        request(0x02, "remove", SCENE),
        request(0x03, "remove_all", GROUP),
        request(0x04, "store", SCENE),
        request(0x05, "recall", SCENE),
        request(0x06, "get_scene_membership", GROUP),
    ],
    client_commands: &[
        reply(0x00, "add_response", SCENE_STATUS),
        reply(
            0x01,
            "view_response",
            schema!(
                "status": FieldType::Unsigned8,
                "group_id": FieldType::Unsigned16,
                "scene_id": FieldType::Unsigned8,
                "scene_data": FieldType::List(&FieldType::Unsigned8),
            ),
        ),
        reply(0x02, "remove_response", SCENE_STATUS),
        reply(0x03, "remove_all_response", GROUP_STATUS),
        reply(0x04, "store_response", SCENE_STATUS),
        reply(
            0x06,
            "get_scene_membership_response",
            schema!(
                "status": FieldType::Unsigned8,
                "capacity": FieldType::Unsigned8,
                "group_id": FieldType::Unsigned16,
                "scenes": FieldType::CountedList(&FieldType::Unsigned8),
            ),
        ),
    ],
};

/// On and off switching
pub static ON_OFF: ClusterKind = ClusterKind {
    identifier: 0x0006,
    name: "On/Off",
    attributes: &[
        attribute(0x0000, "on_off", Type::Boolean),
        attribute(0x4000, "global_scene_control", Type::Boolean),
        attribute(0x4001, "on_time", Type::Unsigned16),
        attribute(0x4002, "off_wait_time", Type::Unsigned16),
    ],
    server_commands: &[
        request(0x00, "off", &[]),
        request(0x01, "on", &[]),
        request(0x02, "toggle", &[]),
        request(0x40, "off_with_effect", EFFECT),
        request(0x41, "on_with_recall_global_scene", &[]),
        request(
            0x42,
            "on_with_timed_off",
            schema!(
                "on_off_control": FieldType::Unsigned8,
                "on_time": FieldType::Unsigned16,
                "off_wait_time": FieldType::Unsigned16,
            ),
        ),
    ],
    client_commands: &[],
};

const MOVE_TO_LEVEL: Schema = schema!(
    "level": FieldType::Unsigned8,
    "transition_time": FieldType::Unsigned16,
);
const MOVE: Schema = schema!(
    "move_mode": FieldType::Unsigned8,
    "rate": FieldType::Unsigned8,
);
const STEP: Schema = schema!(
    "step_mode": FieldType::Unsigned8,
    "step_size": FieldType::Unsigned8,
    "transition_time": FieldType::Unsigned16,
);

/// Dimming
pub static LEVEL_CONTROL: ClusterKind = ClusterKind {
    identifier: 0x0008,
    name: "Level control",
    attributes: &[
        attribute(0x0000, "current_level", Type::Unsigned8),
        attribute(0x0001, "remaining_time", Type::Unsigned16),
        attribute(0x0010, "on_off_transition_time", Type::Unsigned16),
        attribute(0x0011, "on_level", Type::Unsigned8),
        attribute(0x0012, "on_transition_time", Type::Unsigned16),
        attribute(0x0013, "off_transition_time", Type::Unsigned16),
        attribute(0x0014, "default_move_rate", Type::Unsigned8),
    ],
    server_commands: &[
        request(0x00, "move_to_level", MOVE_TO_LEVEL),
        request(0x01, "move", MOVE),
        request(0x02, "step", STEP),
        request(0x03, "stop", &[]),
        request(0x04, "move_to_level_with_on_off", MOVE_TO_LEVEL),
        request(0x05, "move_with_on_off", MOVE),
        request(0x06, "step_with_on_off", STEP),
        request(0x07, "stop_with_on_off", &[]),
    ],
    client_commands: &[],
};
