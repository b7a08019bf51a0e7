use crate::ezsp::aps::APS_FRAME;
use crate::types::{FieldType, Schema};

/// Kind of frame a command definition describes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    /// Host command answered by a response with the same frame identifier
    Command,
    /// Frame sent by the network co-processor without a request
    Callback,
}

/// Definition of an EZSP frame
///
/// Callbacks only have a response schema, their parameters schema is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandDefinition {
    /// Command name
    pub name: &'static str,
    /// Frame identifier
    pub frame_id: u8,
    /// Command or callback
    pub kind: CommandKind,
    /// Parameters sent with the command
    pub parameters: Schema,
    /// Parameters of the response or callback
    pub response: Schema,
}

impl CommandDefinition {
    const fn command(
        name: &'static str,
        frame_id: u8,
        parameters: Schema,
        response: Schema,
    ) -> Self {
        Self {
            name,
            frame_id,
            kind: CommandKind::Command,
            parameters,
            response,
        }
    }

    const fn callback(name: &'static str, frame_id: u8, response: Schema) -> Self {
        Self {
            name,
            frame_id,
            kind: CommandKind::Callback,
            parameters: &[],
            response,
        }
    }

    /// Is this a callback frame
    pub fn is_callback(&self) -> bool {
        self.kind == CommandKind::Callback
    }
}

/// EmberStatus success
pub const EMBER_SUCCESS: u8 = 0x00;

extended_enum!(
    /// Type of an outgoing message
    OutgoingMessageType, u8,
    /// Unicast sent directly to a node id
    Direct => 0x00,
    /// Unicast sent using an entry in the address table
    ViaAddressTable => 0x01,
    /// Unicast sent using an entry in the binding table
    ViaBinding => 0x02,
    /// Multicast message
    Multicast => 0x03,
    /// Broadcast message
    Broadcast => 0x04,
);

extended_enum!(
    /// Type of an incoming message
    IncomingMessageType, u8,
    /// Unicast
    Unicast => 0x00,
    /// Unicast reply
    UnicastReply => 0x01,
    /// Multicast
    Multicast => 0x02,
    /// Multicast sent by the local device
    MulticastLoopback => 0x03,
    /// Broadcast
    Broadcast => 0x04,
    /// Broadcast sent by the local device
    BroadcastLoopback => 0x05,
    /// Many to one route request
    ManyToOneRouteRequest => 0x06,
);

extended_enum!(
    /// Network scan type
    ScanType, u8,
    /// Measure the energy on each channel
    Energy => 0x00,
    /// Look for networks using beacon requests
    Active => 0x01,
);

/// Wire layout of the EmberZigbeeNetwork record
pub const ZIGBEE_NETWORK: Schema = schema!(
    "channel": FieldType::Unsigned8,
    "pan_id": FieldType::Unsigned16,
    "extended_pan_id": FieldType::ExtendedAddress,
    "allowing_join": FieldType::Boolean,
    "stack_profile": FieldType::Unsigned8,
    "network_update_id": FieldType::Unsigned8,
);

/// Wire layout of the EmberNetworkParameters record
pub const NETWORK_PARAMETERS: Schema = schema!(
    "extended_pan_id": FieldType::ExtendedAddress,
    "pan_id": FieldType::Unsigned16,
    "radio_tx_power": FieldType::Signed8,
    "radio_channel": FieldType::Unsigned8,
    "join_method": FieldType::Unsigned8,
    "network_manager_id": FieldType::Unsigned16,
    "network_update_id": FieldType::Unsigned8,
    "channels": FieldType::Unsigned32,
);

const STATUS: Schema = schema!("status": FieldType::Unsigned8);

/// Frames known to the multiplexer
pub static COMMANDS: &[CommandDefinition] = &[
    CommandDefinition::command(
        "version",
        0x00,
        schema!("desired_protocol_version": FieldType::Unsigned8),
        schema!(
            "protocol_version": FieldType::Unsigned8,
            "stack_type": FieldType::Unsigned8,
            "stack_version": FieldType::Unsigned16,
        ),
    ),
    CommandDefinition::command("nop", 0x05, &[], &[]),
    CommandDefinition::command("callback", 0x06, &[], &[]),
    CommandDefinition::command("noCallbacks", 0x07, &[], &[]),
    CommandDefinition::command("networkInit", 0x17, &[], STATUS),
    CommandDefinition::command(
        "networkState",
        0x18,
        &[],
        schema!("network_status": FieldType::Unsigned8),
    ),
    CommandDefinition::callback("stackStatusHandler", 0x19, STATUS),
    CommandDefinition::command(
        "startScan",
        0x1a,
        schema!(
            "scan_type": FieldType::Unsigned8,
            "channel_mask": FieldType::Unsigned32,
            "duration": FieldType::Unsigned8,
        ),
        STATUS,
    ),
    CommandDefinition::callback(
        "networkFoundHandler",
        0x1b,
        schema!(
            "network": FieldType::Record(ZIGBEE_NETWORK),
            "last_hop_lqi": FieldType::Unsigned8,
            "last_hop_rssi": FieldType::Signed8,
        ),
    ),
    CommandDefinition::callback(
        "scanCompleteHandler",
        0x1c,
        schema!(
            "channel": FieldType::Unsigned8,
            "status": FieldType::Unsigned8,
        ),
    ),
    CommandDefinition::command("stopScan", 0x1d, &[], STATUS),
    CommandDefinition::command(
        "formNetwork",
        0x1e,
        schema!("parameters": FieldType::Record(NETWORK_PARAMETERS)),
        STATUS,
    ),
    CommandDefinition::command("leaveNetwork", 0x20, &[], STATUS),
    CommandDefinition::command(
        "permitJoining",
        0x22,
        schema!("duration": FieldType::Unsigned8),
        STATUS,
    ),
    CommandDefinition::callback(
        "childJoinHandler",
        0x23,
        schema!(
            "index": FieldType::Unsigned8,
            "joining": FieldType::Boolean,
            "child_id": FieldType::Unsigned16,
            "child_eui64": FieldType::ExtendedAddress,
            "child_type": FieldType::Unsigned8,
        ),
    ),
    CommandDefinition::callback(
        "trustCenterJoinHandler",
        0x24,
        schema!(
            "new_node_id": FieldType::Unsigned16,
            "new_node_eui64": FieldType::ExtendedAddress,
            "device_update_status": FieldType::Unsigned8,
            "policy_decision": FieldType::Unsigned8,
            "parent_of_new_node_id": FieldType::Unsigned16,
        ),
    ),
    CommandDefinition::command(
        "getEui64",
        0x26,
        &[],
        schema!("eui64": FieldType::ExtendedAddress),
    ),
    CommandDefinition::command(
        "getNodeId",
        0x27,
        &[],
        schema!("node_id": FieldType::Unsigned16),
    ),
    CommandDefinition::command(
        "getNetworkParameters",
        0x28,
        &[],
        schema!(
            "status": FieldType::Unsigned8,
            "node_type": FieldType::Unsigned8,
            "parameters": FieldType::Record(NETWORK_PARAMETERS),
        ),
    ),
    CommandDefinition::command(
        "sendUnicast",
        0x34,
        schema!(
            "type": FieldType::Unsigned8,
            "index_or_destination": FieldType::Unsigned16,
            "aps_frame": FieldType::Record(APS_FRAME),
            "message_tag": FieldType::Unsigned8,
            "message": FieldType::OctetString,
        ),
        schema!(
            "status": FieldType::Unsigned8,
            "sequence": FieldType::Unsigned8,
        ),
    ),
    CommandDefinition::callback(
        "messageSentHandler",
        0x3f,
        schema!(
            "type": FieldType::Unsigned8,
            "index_or_destination": FieldType::Unsigned16,
            "aps_frame": FieldType::Record(APS_FRAME),
            "message_tag": FieldType::Unsigned8,
            "status": FieldType::Unsigned8,
            "message": FieldType::OctetString,
        ),
    ),
    CommandDefinition::callback(
        "incomingMessageHandler",
        0x45,
        schema!(
            "type": FieldType::Unsigned8,
            "aps_frame": FieldType::Record(APS_FRAME),
            "last_hop_lqi": FieldType::Unsigned8,
            "last_hop_rssi": FieldType::Signed8,
            "sender": FieldType::Unsigned16,
            "binding_index": FieldType::Unsigned8,
            "address_index": FieldType::Unsigned8,
            "message": FieldType::OctetString,
        ),
    ),
    CommandDefinition::callback(
        "energyScanResultHandler",
        0x48,
        schema!(
            "channel": FieldType::Unsigned8,
            "max_rssi_value": FieldType::Signed8,
        ),
    ),
    CommandDefinition::command(
        "getConfigurationValue",
        0x52,
        schema!("config_id": FieldType::Unsigned8),
        schema!(
            "status": FieldType::Unsigned8,
            "value": FieldType::Unsigned16,
        ),
    ),
    CommandDefinition::command(
        "setConfigurationValue",
        0x53,
        schema!(
            "config_id": FieldType::Unsigned8,
            "value": FieldType::Unsigned16,
        ),
        STATUS,
    ),
    CommandDefinition::command(
        "setPolicy",
        0x55,
        schema!(
            "policy_id": FieldType::Unsigned8,
            "decision_id": FieldType::Unsigned8,
        ),
        STATUS,
    ),
    CommandDefinition::command(
        "getPolicy",
        0x56,
        schema!("policy_id": FieldType::Unsigned8),
        schema!(
            "status": FieldType::Unsigned8,
            "decision_id": FieldType::Unsigned8,
        ),
    ),
    CommandDefinition::callback(
        "invalidCommand",
        0x58,
        schema!("reason": FieldType::Unsigned8),
    ),
    CommandDefinition::command(
        "echo",
        0x81,
        schema!("data": FieldType::OctetString),
        schema!("echo": FieldType::OctetString),
    ),
];

/// Look up a frame definition by name
pub fn command(name: &str) -> Option<&'static CommandDefinition> {
    COMMANDS.iter().find(|definition| definition.name == name)
}

/// Look up a frame definition by frame identifier
pub fn command_by_id(frame_id: u8) -> Option<&'static CommandDefinition> {
    COMMANDS
        .iter()
        .find(|definition| definition.frame_id == frame_id)
}
