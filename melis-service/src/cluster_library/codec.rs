//! # Cluster library frame codec
//!
//! Frames are decoded against the tables of the registry. Anything the
//! tables can not explain is logged as a [`ProtocolWarning`] and handed on
//! as raw bytes, only a frame too short to carry a header is an error.

use melis_data::cluster_library::{foundation, ClusterLibraryHeader, Direction, FrameType};
use melis_data::ezsp::ApsFrame;
use melis_data::pack::Pack;
use melis_data::types::{self, Schema, Value};
use tracing::warn;

use crate::cluster_library::{ClusterKind, Registry};
use crate::error::ProtocolWarning;
use crate::Result;

/// Command identifier scoped by frame type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandIdentifier {
    /// General command, shared by every cluster
    Foundation(u8),
    /// Command specific to the addressed cluster
    ClusterSpecific(u8),
}

impl CommandIdentifier {
    /// Identifier without the scope
    pub fn value(self) -> u8 {
        match self {
            CommandIdentifier::Foundation(id) | CommandIdentifier::ClusterSpecific(id) => id,
        }
    }
}

/// Command arguments
#[derive(Clone, Debug, PartialEq)]
pub enum Arguments {
    /// Decoded against the command schema
    Decoded(Vec<Value>),
    /// Payload the tables could not describe
    Raw(Vec<u8>),
}

impl Arguments {
    /// Decoded values, `None` for raw payloads
    pub fn values(&self) -> Option<&[Value]> {
        match self {
            Arguments::Decoded(values) => Some(values),
            Arguments::Raw(_) => None,
        }
    }
}

/// Decoded cluster library frame
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedFrame {
    /// Frame header
    pub header: ClusterLibraryHeader,
    /// Command identifier
    pub command: CommandIdentifier,
    /// The command answers a earlier request
    pub is_reply: bool,
    /// Command arguments
    pub arguments: Arguments,
    /// Anomaly found while decoding
    pub warning: Option<ProtocolWarning>,
}

impl DecodedFrame {
    /// Transaction sequence number
    pub fn sequence(&self) -> u8 {
        self.header.transaction_sequence
    }
}

/// Decode a cluster library frame addressed by `aps`
pub fn deserialize(registry: &Registry, aps: &ApsFrame, data: &[u8]) -> Result<DecodedFrame> {
    let (header, used) = ClusterLibraryHeader::unpack(data)?;
    let payload = &data[used..];
    let direction = header.control.direction;
    let command_id = header.command;

    let (command, table) = match header.control.frame_type {
        FrameType::Local => {
            let command = CommandIdentifier::ClusterSpecific(command_id);
            match registry.get(aps.cluster) {
                Some(kind) => (command, lookup(kind, direction, command_id)),
                None => {
                    let warning = ProtocolWarning::UnknownCluster(aps.cluster);
                    return Ok(raw(header, command, direction, payload, warning));
                }
            }
        }
        // reserved frame types are read as general commands
        FrameType::Global | FrameType::Reserved(_) => (
            CommandIdentifier::Foundation(command_id),
            foundation::command(command_id)
                .map(|definition| (definition.schema, definition.is_reply))
                .ok_or(ProtocolWarning::UnknownFoundationCommand(command_id)),
        ),
    };

    let (schema, is_reply) = match table {
        Ok(entry) => entry,
        Err(warning) => return Ok(raw(header, command, direction, payload, warning)),
    };

    let (values, consumed) = match types::decode(payload, schema) {
        Ok(decoded) => decoded,
        Err(error) => {
            let warning = ProtocolWarning::MalformedPayload {
                command: command_id,
                error,
            };
            return Ok(raw(header, command, direction, payload, warning));
        }
    };

    let warning = if consumed < payload.len() {
        let warning = ProtocolWarning::TrailingBytes {
            count: payload.len() - consumed,
        };
        warn!(cluster = aps.cluster, "{}", warning);
        Some(warning)
    } else {
        None
    };

    Ok(DecodedFrame {
        header,
        command,
        is_reply,
        arguments: Arguments::Decoded(values),
        warning,
    })
}

/// Encode a cluster library frame
pub fn serialize(header: &ClusterLibraryHeader, schema: Schema, args: &[Value]) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(16);
    header.pack(&mut data)?;
    types::encode(args, schema, &mut data)?;
    Ok(data)
}

fn lookup(
    kind: &ClusterKind,
    direction: Direction,
    command: u8,
) -> std::result::Result<(Schema, bool), ProtocolWarning> {
    kind.command(direction, command)
        .map(|definition| (definition.schema, definition.is_reply))
        .ok_or(ProtocolWarning::UnknownClusterCommand {
            cluster: kind.identifier,
            command,
        })
}

fn raw(
    header: ClusterLibraryHeader,
    command: CommandIdentifier,
    direction: Direction,
    payload: &[u8],
    warning: ProtocolWarning,
) -> DecodedFrame {
    warn!("{}", warning);
    DecodedFrame {
        header,
        command,
        is_reply: direction == Direction::ToClient,
        arguments: Arguments::Raw(payload.to_vec()),
        warning: Some(warning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melis_data::cluster_library::{
        AttributeDataType, AttributeInformation, AttributeRecord, AttributeStatus, AttributeValue,
        ClusterLibraryStatus, CommandDefinition, FrameControl, ReportingConfiguration,
        ReportingDirection, ReportingStatus, WriteAttributeStatus,
    };
    use melis_data::types::FieldType;
    use melis_data::{Error as DataError, ExtendedAddress};

    use crate::cluster_library::clusters;
    use crate::Error;

    fn aps(cluster: u16) -> ApsFrame {
        ApsFrame {
            profile: 0x0104,
            cluster,
            source_endpoint: 1,
            destination_endpoint: 1,
            ..ApsFrame::default()
        }
    }

    fn registry() -> Registry {
        Registry::with_defaults()
    }

    #[test]
    fn unknown_cluster_keeps_raw_payload() {
        let data = [0x01, 0x33, 0x07, 0xaa, 0xbb];
        let frame = deserialize(&registry(), &aps(0xfc01), &data).unwrap();
        assert_eq!(frame.command, CommandIdentifier::ClusterSpecific(0x07));
        assert_eq!(frame.sequence(), 0x33);
        assert!(!frame.is_reply);
        assert_eq!(frame.arguments, Arguments::Raw(vec![0xaa, 0xbb]));
        assert_eq!(frame.warning, Some(ProtocolWarning::UnknownCluster(0xfc01)));
    }

    #[test]
    fn unknown_cluster_command() {
        let frame = deserialize(&registry(), &aps(0x0006), &[0x09, 0x01, 0x55, 0x01]).unwrap();
        assert_eq!(frame.command, CommandIdentifier::ClusterSpecific(0x55));
        assert!(frame.is_reply);
        assert_eq!(frame.arguments, Arguments::Raw(vec![0x01]));
        assert_eq!(
            frame.warning,
            Some(ProtocolWarning::UnknownClusterCommand {
                cluster: 0x0006,
                command: 0x55
            })
        );
    }

    #[test]
    fn unknown_foundation_command() {
        let frame = deserialize(&registry(), &aps(0x0006), &[0x00, 0x01, 0x42]).unwrap();
        assert_eq!(frame.command, CommandIdentifier::Foundation(0x42));
        assert_eq!(frame.arguments, Arguments::Raw(Vec::new()));
        assert_eq!(
            frame.warning,
            Some(ProtocolWarning::UnknownFoundationCommand(0x42))
        );
    }

    #[test]
    fn reserved_frame_type_reads_as_general() {
        let data = [0x02, 0x07, 0x0b, 0x00, 0x00];
        let frame = deserialize(&registry(), &aps(0x0006), &data).unwrap();
        assert_eq!(frame.header.control.frame_type, FrameType::Reserved(0b10));
        assert_eq!(frame.command, CommandIdentifier::Foundation(0x0b));
        assert_eq!(frame.sequence(), 0x07);
        assert_eq!(
            frame.arguments,
            Arguments::Decoded(vec![Value::Unsigned(0x00), Value::Unsigned(0x00)])
        );
        assert_eq!(frame.warning, None);

        let frame = deserialize(&registry(), &aps(0x0006), &[0x03, 0x01, 0x42, 0xaa]).unwrap();
        assert_eq!(frame.command, CommandIdentifier::Foundation(0x42));
        assert_eq!(frame.arguments, Arguments::Raw(vec![0xaa]));
    }

    #[test]
    fn short_frame_is_an_error() {
        for data in [&[][..], &[0x00], &[0x00, 0x01]] {
            assert_eq!(
                deserialize(&registry(), &aps(0x0006), data),
                Err(Error::Data(DataError::WrongNumberOfBytes))
            );
        }
    }

    #[test]
    fn cluster_specific_command() {
        let frame = deserialize(&registry(), &aps(0x0006), &[0x01, 0x10, 0x02]).unwrap();
        assert_eq!(frame.command, CommandIdentifier::ClusterSpecific(0x02));
        assert!(!frame.is_reply);
        assert_eq!(frame.arguments, Arguments::Decoded(Vec::new()));
        assert_eq!(frame.warning, None);
    }

    #[test]
    fn reply_uses_client_table() {
        // add group response, status and group id
        let data = [0x19, 0x22, 0x00, 0x00, 0x34, 0x12];
        let frame = deserialize(&registry(), &aps(0x0004), &data).unwrap();
        assert_eq!(frame.command, CommandIdentifier::ClusterSpecific(0x00));
        assert!(frame.is_reply);
        assert_eq!(
            frame.arguments,
            Arguments::Decoded(vec![Value::Unsigned(0), Value::Unsigned(0x1234)])
        );
    }

    #[test]
    fn manufacturer_code_is_skipped() {
        let data = [0x04, 0x5f, 0x11, 0x07, 0x0b, 0x06, 0x00];
        let frame = deserialize(&registry(), &aps(0x0006), &data).unwrap();
        assert_eq!(frame.header.manufacturer, Some(0x115f));
        assert_eq!(frame.sequence(), 0x07);
        assert_eq!(frame.command, CommandIdentifier::Foundation(0x0b));
        assert!(frame.is_reply);
        assert_eq!(
            frame.arguments,
            Arguments::Decoded(vec![Value::Unsigned(0x06), Value::Unsigned(0x00)])
        );
    }

    #[test]
    fn report_attributes() {
        let data = [0x18, 0x05, 0x0a, 0x00, 0x00, 0x10, 0x01];
        let frame = deserialize(&registry(), &aps(0x0006), &data).unwrap();
        assert_eq!(frame.command, CommandIdentifier::Foundation(0x0a));
        assert_eq!(
            frame.arguments,
            Arguments::Decoded(vec![Value::List(vec![Value::AttributeRecord(
                AttributeRecord {
                    identifier: 0x0000,
                    value: AttributeValue::Boolean(1),
                }
            )])])
        );
    }

    #[test]
    fn trailing_bytes_are_reported() {
        let data = [0x18, 0x05, 0x0b, 0x00, 0x00, 0xee, 0xff];
        let frame = deserialize(&registry(), &aps(0x0006), &data).unwrap();
        assert_eq!(
            frame.arguments,
            Arguments::Decoded(vec![Value::Unsigned(0x00), Value::Unsigned(0x00)])
        );
        assert_eq!(frame.warning, Some(ProtocolWarning::TrailingBytes { count: 2 }));
    }

    #[test]
    fn malformed_payload_is_kept_raw() {
        // move to level needs three octets
        let frame = deserialize(&registry(), &aps(0x0008), &[0x01, 0x01, 0x00, 0x80]).unwrap();
        assert_eq!(frame.command, CommandIdentifier::ClusterSpecific(0x00));
        assert_eq!(frame.arguments, Arguments::Raw(vec![0x80]));
        assert!(matches!(
            frame.warning,
            Some(ProtocolWarning::MalformedPayload { command: 0x00, .. })
        ));
    }

    fn sample(kind: FieldType) -> Value {
        match kind {
            FieldType::Unsigned8
            | FieldType::Unsigned16
            | FieldType::Unsigned24
            | FieldType::Unsigned32
            | FieldType::Unsigned64 => Value::Unsigned(0x12),
            FieldType::Signed8 | FieldType::Signed16 | FieldType::Signed32 => Value::Signed(-3),
            FieldType::Boolean => Value::Boolean(true),
            FieldType::OctetString => Value::Octets(vec![0xde, 0xad]),
            FieldType::CharacterString => Value::Text("melis".to_string()),
            FieldType::ExtendedAddress => {
                Value::ExtendedAddress(ExtendedAddress::new(0x0011_2233_4455_6677))
            }
            FieldType::Record(fields) => {
                Value::Record(fields.iter().map(|field| sample(field.kind)).collect())
            }
            FieldType::List(element) => Value::List(vec![sample(*element)]),
            FieldType::CountedList(element) => {
                Value::List(vec![sample(*element), sample(*element)])
            }
            FieldType::TypedValue => Value::Attribute(AttributeValue::Unsigned16(0x1234)),
            FieldType::AttributeRecord => Value::AttributeRecord(AttributeRecord {
                identifier: 0x0000,
                value: AttributeValue::Boolean(1),
            }),
            FieldType::AttributeStatus => Value::AttributeStatus(AttributeStatus {
                identifier: 0x0004,
                status: ClusterLibraryStatus::Success,
                value: Some(AttributeValue::CharacterString(Some("melis".to_string()))),
            }),
            FieldType::WriteAttributeStatus => {
                Value::WriteAttributeStatus(WriteAttributeStatus {
                    status: ClusterLibraryStatus::UnsupportedAttribute,
                    identifier: Some(0x0005),
                })
            }
            FieldType::ReportingConfiguration => {
                Value::ReportingConfiguration(ReportingConfiguration::Reported {
                    identifier: 0x0000,
                    data_type: AttributeDataType::Unsigned8,
                    minimum_interval: 1,
                    maximum_interval: 300,
                    reportable_change: Some(AttributeValue::Unsigned8(2)),
                })
            }
            FieldType::ReportingStatus => Value::ReportingStatus(ReportingStatus {
                status: ClusterLibraryStatus::UnsupportedAttribute,
                attribute: Some((ReportingDirection::Reported, 0x0005)),
            }),
            FieldType::AttributeInformation => {
                Value::AttributeInformation(AttributeInformation {
                    identifier: 0x0000,
                    data_type: AttributeDataType::Boolean,
                })
            }
        }
    }

    fn assert_round_trip(
        registry: &Registry,
        cluster: u16,
        frame_type: FrameType,
        definition: &CommandDefinition,
    ) {
        let name = definition.name;
        let args: Vec<Value> = definition
            .schema
            .iter()
            .map(|field| sample(field.kind))
            .collect();
        let header = ClusterLibraryHeader {
            control: FrameControl {
                frame_type,
                manufacturer_specific: false,
                direction: if definition.is_reply {
                    Direction::ToClient
                } else {
                    Direction::ToServer
                },
                disable_default_response: false,
            },
            manufacturer: None,
            transaction_sequence: 0x20,
            command: definition.identifier,
        };
        let data = serialize(&header, definition.schema, &args)
            .unwrap_or_else(|e| panic!("{:04x} {}: {}", cluster, name, e));
        let frame = deserialize(registry, &aps(cluster), &data).unwrap();
        assert_eq!(frame.header, header, "{:04x} {}", cluster, name);
        assert_eq!(frame.command.value(), definition.identifier, "{}", name);
        assert_eq!(frame.is_reply, definition.is_reply, "{:04x} {}", cluster, name);
        assert_eq!(frame.arguments, Arguments::Decoded(args), "{:04x} {}", cluster, name);
        assert_eq!(frame.warning, None, "{:04x} {}", cluster, name);
    }

    #[test]
    fn every_cluster_command_round_trips() {
        let registry = registry();
        for kind in clusters::ALL.iter().copied() {
            for definition in kind.server_commands.iter().chain(kind.client_commands) {
                assert_round_trip(&registry, kind.identifier, FrameType::Local, definition);
            }
        }
    }

    #[test]
    fn every_foundation_command_round_trips() {
        let registry = registry();
        for definition in foundation::COMMANDS {
            assert_round_trip(&registry, 0x0006, FrameType::Global, definition);
        }
    }

    #[test]
    fn serialize_rejects_mismatching_arguments() {
        let header = ClusterLibraryHeader {
            control: FrameControl::request(FrameType::Global),
            manufacturer: None,
            transaction_sequence: 0x01,
            command: 0x00,
        };
        let result = serialize(&header, foundation::READ_ATTRIBUTES, &[]);
        assert!(matches!(result, Err(Error::Data(_))));
    }
}
