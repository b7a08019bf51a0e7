//! # Cluster tables
//!
//! Attribute and command tables of the clusters known to the registry.

use melis_data::cluster_library::{AttributeDataType, AttributeDefinition, CommandDefinition};
use melis_data::types::Schema;

use crate::cluster_library::ClusterKind;

pub mod general;
pub mod home_automation;
pub mod lighting;

/// Every cluster kind of this crate
pub static ALL: &[&ClusterKind] = &[
    &general::BASIC,
    &general::POWER_CONFIGURATION,
    &general::IDENTIFY,
    &general::GROUPS,
    &general::SCENES,
    &general::ON_OFF,
    &general::LEVEL_CONTROL,
    &lighting::COLOR_CONTROL,
    &lighting::BALLAST_CONFIGURATION,
    &home_automation::APPLIANCE_IDENTIFICATION,
    &home_automation::METER_IDENTIFICATION,
    &home_automation::APPLIANCE_EVENTS_ALERTS,
    &home_automation::APPLIANCE_STATISTICS,
    &home_automation::ELECTRICAL_MEASUREMENT,
    &home_automation::DIAGNOSTICS,
];

const fn attribute(
    identifier: u16,
    name: &'static str,
    data_type: AttributeDataType,
) -> AttributeDefinition {
    AttributeDefinition::new(identifier, name, data_type)
}

const fn request(identifier: u8, name: &'static str, schema: Schema) -> CommandDefinition {
    CommandDefinition::new(identifier, name, schema, false)
}

const fn reply(identifier: u8, name: &'static str, schema: Schema) -> CommandDefinition {
    CommandDefinition::new(identifier, name, schema, true)
}
