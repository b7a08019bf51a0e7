//! Lighting clusters

use melis_data::cluster_library::AttributeDataType as Type;
use melis_data::types::FieldType;

use super::{attribute, request};
use crate::cluster_library::ClusterKind;

/// Color properties of a color capable light
pub static COLOR_CONTROL: ClusterKind = ClusterKind {
    identifier: 0x0300,
    name: "Color Control",
    attributes: &[
        attribute(0x0000, "current_hue", Type::Unsigned8),
        attribute(0x0001, "current_saturation", Type::Unsigned8),
        attribute(0x0002, "remaining_time", Type::Unsigned16),
        attribute(0x0003, "current_x", Type::Unsigned16),
        attribute(0x0004, "current_y", Type::Unsigned16),
        attribute(0x0005, "drift_compensation", Type::Enumeration8),
        attribute(0x0006, "compensation_text", Type::CharacterString),
        attribute(0x0007, "color_temperature", Type::Unsigned16),
        attribute(0x0008, "color_mode", Type::Enumeration8),
        attribute(0x0010, "num_primaries", Type::Unsigned8),
        attribute(0x0011, "primary1_x", Type::Unsigned16),
        attribute(0x0012, "primary1_y", Type::Unsigned16),
        attribute(0x0013, "primary1_intensity", Type::Unsigned8),
        attribute(0x0015, "primary2_x", Type::Unsigned16),
        attribute(0x0016, "primary2_y", Type::Unsigned16),
        attribute(0x0017, "primary2_intensity", Type::Unsigned8),
        attribute(0x0019, "primary3_x", Type::Unsigned16),
        attribute(0x001a, "primary3_y", Type::Unsigned16),
        attribute(0x001b, "primary3_intensity", Type::Unsigned8),
        attribute(0x0020, "primary4_x", Type::Unsigned16),
        attribute(0x0021, "primary4_y", Type::Unsigned16),
        attribute(0x0022, "primary4_intensity", Type::Unsigned8),
        attribute(0x0024, "primary5_x", Type::Unsigned16),
        attribute(0x0025, "primary5_y", Type::Unsigned16),
        attribute(0x0026, "primary5_intensity", Type::Unsigned8),
        attribute(0x0028, "primary6_x", Type::Unsigned16),
        attribute(0x0029, "primary6_y", Type::Unsigned16),
        attribute(0x002a, "primary6_intensity", Type::Unsigned8),
        attribute(0x0030, "white_point_x", Type::Unsigned16),
        attribute(0x0031, "white_point_y", Type::Unsigned16),
        attribute(0x0032, "color_point_r_x", Type::Unsigned16),
        attribute(0x0033, "color_point_r_y", Type::Unsigned16),
        attribute(0x0034, "color_point_r_intensity", Type::Unsigned8),
        attribute(0x0036, "color_point_g_x", Type::Unsigned16),
        attribute(0x0037, "color_point_g_y", Type::Unsigned16),
        attribute(0x0038, "color_point_g_intensity", Type::Unsigned8),
        attribute(0x003a, "color_point_b_x", Type::Unsigned16),
        attribute(0x003b, "color_point_b_y", Type::Unsigned16),
        attribute(0x003c, "color_point_b_intensity", Type::Unsigned8),
        attribute(0x4000, "enhanced_current_hue", Type::Unsigned16),
        attribute(0x4001, "enhanced_color_mode", Type::Enumeration8),
        attribute(0x4002, "color_loop_active", Type::Unsigned8),
        attribute(0x4003, "color_loop_direction", Type::Unsigned8),
        attribute(0x4004, "color_loop_time", Type::Unsigned16),
        attribute(0x4005, "color_loop_start_enhanced_hue", Type::Unsigned16),
        attribute(0x4006, "color_loop_stored_enhanced_hue", Type::Unsigned16),
        attribute(0x400a, "color_capabilities", Type::Bitmap16),
        attribute(0x400b, "color_temp_physical_min", Type::Unsigned16),
        attribute(0x400c, "color_temp_physical_max", Type::Unsigned16),
    ],
    server_commands: &[
        request(
            0x00,
            "move_to_hue",
            schema!(
                "hue": FieldType::Unsigned8,
                "direction": FieldType::Unsigned8,
                "transition_time": FieldType::Unsigned16,
            ),
        ),
        request(
            0x01,
            "move_hue",
            schema!(
                "move_mode": FieldType::Unsigned8,
                "rate": FieldType::Unsigned8,
            ),
        ),
        request(
            0x02,
            "step_hue",
            schema!(
                "step_mode": FieldType::Unsigned8,
                "step_size": FieldType::Unsigned8,
                "transition_time": FieldType::Unsigned8,
            ),
        ),
        request(
            0x03,
            "move_to_saturation",
            schema!(
                "saturation": FieldType::Unsigned8,
                "transition_time": FieldType::Unsigned16,
            ),
        ),
        request(
            0x04,
            "move_saturation",
            schema!(
                "move_mode": FieldType::Unsigned8,
                "rate": FieldType::Unsigned8,
            ),
        ),
        request(
            0x05,
            "step_saturation",
            schema!(
                "step_mode": FieldType::Unsigned8,
                "step_size": FieldType::Unsigned8,
                "transition_time": FieldType::Unsigned8,
            ),
        ),
        request(
            0x06,
            "move_to_hue_and_saturation",
            schema!(
                "hue": FieldType::Unsigned8,
                "saturation": FieldType::Unsigned8,
                "transition_time": FieldType::Unsigned16,
            ),
        ),
        request(
            0x07,
            "move_to_color",
            schema!(
                "color_x": FieldType::Unsigned16,
                "color_y": FieldType::Unsigned16,
                "transition_time": FieldType::Unsigned16,
            ),
        ),
        request(
            0x08,
            "move_color",
            schema!(
                "rate_x": FieldType::Signed16,
                "rate_y": FieldType::Signed16,
            ),
        ),
        request(
            0x09,
            "step_color",
            schema!(
                "step_x": FieldType::Signed16,
                "step_y": FieldType::Signed16,
                "duration": FieldType::Unsigned16,
            ),
        ),
        request(
            0x0a,
            "move_to_color_temp",
            schema!(
                "color_temp_mireds": FieldType::Unsigned16,
                "transition_time": FieldType::Unsigned16,
            ),
        ),
        request(
            0x40,
            "enhanced_move_to_hue",
            schema!(
                "enhanced_hue": FieldType::Unsigned16,
                "direction": FieldType::Unsigned8,
                "transition_time": FieldType::Unsigned16,
            ),
        ),
        request(
            0x41,
            "enhanced_move_hue",
            schema!(
                "move_mode": FieldType::Unsigned8,
                "rate": FieldType::Unsigned16,
            ),
        ),
        request(
            0x42,
            "enhanced_step_hue",
            schema!(
                "step_mode": FieldType::Unsigned8,
                "step_size": FieldType::Unsigned16,
                "transition_time": FieldType::Unsigned16,
            ),
        ),
        request(
            0x43,
            "enhanced_move_to_hue_and_saturation",
            schema!(
                "enhanced_hue": FieldType::Unsigned16,
                "saturation": FieldType::Unsigned8,
                "transition_time": FieldType::Unsigned16,
            ),
        ),
        request(
            0x44,
            "color_loop_set",
            schema!(
                "update_flags": FieldType::Unsigned8,
                "action": FieldType::Unsigned8,
                "direction": FieldType::Unsigned8,
                "time": FieldType::Unsigned16,
                "start_hue": FieldType::Unsigned16,
            ),
        ),
        request(0x47, "stop_move_step", &[]),
    ],
    client_commands: &[],
};

/// Configuration of a lighting ballast
pub static BALLAST_CONFIGURATION: ClusterKind = ClusterKind {
    identifier: 0x0301,
    name: "Ballast Configuration",
    attributes: &[
        attribute(0x0000, "physical_min_level", Type::Unsigned8),
        attribute(0x0001, "physical_max_level", Type::Unsigned8),
        attribute(0x0002, "ballast_status", Type::Bitmap8),
        attribute(0x0010, "min_level", Type::Unsigned8),
        attribute(0x0011, "max_level", Type::Unsigned8),
        attribute(0x0012, "power_on_level", Type::Unsigned8),
        attribute(0x0013, "power_on_fade_time", Type::Unsigned16),
        attribute(0x0014, "intrinsic_ballast_factor", Type::Unsigned8),
        attribute(0x0015, "ballast_factor_adjustment", Type::Unsigned8),
        attribute(0x0020, "lamp_quantity", Type::Unsigned8),
        attribute(0x0030, "lamp_type", Type::CharacterString),
        attribute(0x0031, "lamp_manufacturer", Type::CharacterString),
        attribute(0x0032, "lamp_rated_hours", Type::Unsigned24),
        attribute(0x0033, "lamp_burn_hours", Type::Unsigned24),
        attribute(0x0034, "lamp_alarm_mode", Type::Bitmap8),
        attribute(0x0035, "lamp_burn_hours_trip_point", Type::Unsigned24),
    ],
    server_commands: &[],
    client_commands: &[],
};
