//! # EZSP
//!
//! Frames exchanged with an EmberZNet network co-processor using the legacy
//! frame header, and the command definitions used by the host.

mod aps;
mod commands;
mod frame;

pub use aps::{
    ApsFrame, APS_FRAME, APS_OPTIONS_DEFAULT, APS_OPTION_DESTINATION_EUI64, APS_OPTION_ENCRYPTION,
    APS_OPTION_ENABLE_ROUTE_DISCOVERY, APS_OPTION_FORCE_ROUTE_DISCOVERY, APS_OPTION_NONE,
    APS_OPTION_RETRY, APS_OPTION_SOURCE_EUI64,
};
pub use commands::{
    command, command_by_id, CommandDefinition, CommandKind, IncomingMessageType,
    OutgoingMessageType, ScanType, COMMANDS, EMBER_SUCCESS, NETWORK_PARAMETERS, ZIGBEE_NETWORK,
};
pub use frame::{CallbackType, FrameControl, FrameHeader};
