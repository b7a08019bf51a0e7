//! General commands shared by all clusters
//!
//! Attribute access, reporting and the default response, along with the
//! record types these commands carry.

use byteorder::{ByteOrder, LittleEndian};
use bytes::BufMut;

use super::{
    AttributeDataType, AttributeIdentifier, AttributeValue, ClusterLibraryStatus,
    CommandDefinition,
};
use crate::pack::Pack;
use crate::types::{FieldType, Schema};
use crate::Error;

extended_enum!(
    /// Cluster library general command identifiers
    GeneralCommandIdentifier, u8,
    ReadAttributes => 0x00,
    ReadAttributesResponse => 0x01,
    WriteAttributes => 0x02,
    WriteAttributesUndivided => 0x03,
    WriteAttributesResponse => 0x04,
    WriteAttributesNoResponse => 0x05,
    ConfigureReporting => 0x06,
    ConfigureReportingResponse => 0x07,
    ReadReportingConfiguration => 0x08,
    ReadReportingConfigurationResponse => 0x09,
    ReportAttributes => 0x0a,
    DefaultResponse => 0x0b,
    DiscoverAttributes => 0x0c,
    DiscoverAttributesResponse => 0x0d,
);

extended_enum!(
    /// Direction field of reporting records
    ReportingDirection, u8,
    /// The attribute is reported by the receiver of the configuration
    Reported => 0x00,
    /// Reports of the attribute are received by the receiver of the
    /// configuration
    Received => 0x01,
);

fn read_u16(data: &[u8]) -> Result<u16, Error> {
    if data.len() < 2 {
        return Err(Error::WrongNumberOfBytes);
    }
    Ok(LittleEndian::read_u16(data))
}

fn read_data_type(value: u8) -> Result<AttributeDataType, Error> {
    AttributeDataType::try_from(value).map_err(|_| Error::UnknownDataType(value))
}

fn ensure_space<B: BufMut>(data: &B, size: usize) -> Result<(), Error> {
    if data.remaining_mut() < size {
        return Err(Error::NotEnoughSpace);
    }
    Ok(())
}

/// Attribute identifier with a typed value, as written and reported
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeRecord {
    /// Attribute identifier
    pub identifier: AttributeIdentifier,
    /// Attribute value
    pub value: AttributeValue,
}

impl Pack<AttributeRecord, Error> for AttributeRecord {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        ensure_space(data, 3)?;
        data.put_u16_le(self.identifier);
        data.put_u8(self.value.data_type().into());
        Ok(3 + self.value.pack(data)?)
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        let identifier = read_u16(data)?;
        let data_type = read_data_type(*data.get(2).ok_or(Error::WrongNumberOfBytes)?)?;
        let (value, used) = AttributeValue::unpack(&data[3..], data_type)?;
        Ok((Self { identifier, value }, 3 + used))
    }
}

/// Status of a read attribute, carries the value on success
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeStatus {
    /// Attribute identifier
    pub identifier: AttributeIdentifier,
    /// Read status
    pub status: ClusterLibraryStatus,
    /// Attribute value, only present on success
    pub value: Option<AttributeValue>,
}

impl Pack<AttributeStatus, Error> for AttributeStatus {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        ensure_space(data, 3)?;
        data.put_u16_le(self.identifier);
        data.put_u8(self.status.into());
        match &self.value {
            Some(value) if self.status == ClusterLibraryStatus::Success => {
                ensure_space(data, 1)?;
                data.put_u8(value.data_type().into());
                Ok(4 + value.pack(data)?)
            }
            _ => Ok(3),
        }
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        let identifier = read_u16(data)?;
        let status = ClusterLibraryStatus::try_from(
            *data.get(2).ok_or(Error::WrongNumberOfBytes)?,
        )?;
        if status != ClusterLibraryStatus::Success {
            return Ok((
                Self {
                    identifier,
                    status,
                    value: None,
                },
                3,
            ));
        }
        let data_type = read_data_type(*data.get(3).ok_or(Error::WrongNumberOfBytes)?)?;
        let (value, used) = AttributeValue::unpack(&data[4..], data_type)?;
        Ok((
            Self {
                identifier,
                status,
                value: Some(value),
            },
            4 + used,
        ))
    }
}

/// Status of a write attribute
///
/// When every write succeeds the response holds a single record with only
/// a successful status.
#[derive(Clone, Debug, PartialEq)]
pub struct WriteAttributeStatus {
    /// Write status
    pub status: ClusterLibraryStatus,
    /// Attribute identifier, absent for the all successful record
    pub identifier: Option<AttributeIdentifier>,
}

impl Pack<WriteAttributeStatus, Error> for WriteAttributeStatus {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        ensure_space(data, if self.identifier.is_some() { 3 } else { 1 })?;
        data.put_u8(self.status.into());
        match self.identifier {
            Some(identifier) => {
                data.put_u16_le(identifier);
                Ok(3)
            }
            None => Ok(1),
        }
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        let status = ClusterLibraryStatus::try_from(
            *data.first().ok_or(Error::WrongNumberOfBytes)?,
        )?;
        if status == ClusterLibraryStatus::Success && data.len() < 3 {
            return Ok((
                Self {
                    status,
                    identifier: None,
                },
                1,
            ));
        }
        let identifier = read_u16(&data[1..])?;
        Ok((
            Self {
                status,
                identifier: Some(identifier),
            },
            3,
        ))
    }
}

/// Attribute reporting configuration
#[derive(Clone, Debug, PartialEq)]
pub enum ReportingConfiguration {
    /// Configure how the receiver reports an attribute
    Reported {
        /// Attribute identifier
        identifier: AttributeIdentifier,
        /// Attribute data type
        data_type: AttributeDataType,
        /// Minimum reporting interval in seconds
        minimum_interval: u16,
        /// Maximum reporting interval in seconds
        maximum_interval: u16,
        /// Change causing a report, only used for analog data types
        reportable_change: Option<AttributeValue>,
    },
    /// Configure how long the receiver waits for reports of an attribute
    Received {
        /// Attribute identifier
        identifier: AttributeIdentifier,
        /// Timeout period in seconds
        timeout: u16,
    },
}

impl ReportingConfiguration {
    /// Identifier of the configured attribute
    pub fn identifier(&self) -> AttributeIdentifier {
        match self {
            ReportingConfiguration::Reported { identifier, .. }
            | ReportingConfiguration::Received { identifier, .. } => *identifier,
        }
    }
}

impl Pack<ReportingConfiguration, Error> for ReportingConfiguration {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        match self {
            ReportingConfiguration::Reported {
                identifier,
                data_type,
                minimum_interval,
                maximum_interval,
                reportable_change,
            } => {
                ensure_space(data, 8)?;
                data.put_u8(ReportingDirection::Reported.into());
                data.put_u16_le(*identifier);
                data.put_u8((*data_type).into());
                data.put_u16_le(*minimum_interval);
                data.put_u16_le(*maximum_interval);
                if !data_type.is_analog() {
                    return Ok(8);
                }
                match reportable_change {
                    Some(change) if change.data_type() == *data_type => Ok(8 + change.pack(data)?),
                    _ => Err(Error::TypeMismatch),
                }
            }
            ReportingConfiguration::Received {
                identifier,
                timeout,
            } => {
                ensure_space(data, 5)?;
                data.put_u8(ReportingDirection::Received.into());
                data.put_u16_le(*identifier);
                data.put_u16_le(*timeout);
                Ok(5)
            }
        }
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        let direction = ReportingDirection::try_from(
            *data.first().ok_or(Error::WrongNumberOfBytes)?,
        )?;
        let identifier = read_u16(&data[1..])?;
        match direction {
            ReportingDirection::Reported => {
                if data.len() < 8 {
                    return Err(Error::WrongNumberOfBytes);
                }
                let data_type = read_data_type(data[3])?;
                let minimum_interval = LittleEndian::read_u16(&data[4..6]);
                let maximum_interval = LittleEndian::read_u16(&data[6..8]);
                let (reportable_change, used) = if data_type.is_analog() {
                    let (change, used) = AttributeValue::unpack(&data[8..], data_type)?;
                    (Some(change), used)
                } else {
                    (None, 0)
                };
                Ok((
                    ReportingConfiguration::Reported {
                        identifier,
                        data_type,
                        minimum_interval,
                        maximum_interval,
                        reportable_change,
                    },
                    8 + used,
                ))
            }
            ReportingDirection::Received => {
                let timeout = read_u16(&data[3..])?;
                Ok((
                    ReportingConfiguration::Received {
                        identifier,
                        timeout,
                    },
                    5,
                ))
            }
        }
    }
}

/// Status of a reporting configuration
///
/// When every configuration succeeds the response holds a single record
/// with only a successful status.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportingStatus {
    /// Configuration status
    pub status: ClusterLibraryStatus,
    /// Direction and identifier of the configured attribute
    pub attribute: Option<(ReportingDirection, AttributeIdentifier)>,
}

impl Pack<ReportingStatus, Error> for ReportingStatus {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        ensure_space(data, if self.attribute.is_some() { 4 } else { 1 })?;
        data.put_u8(self.status.into());
        match self.attribute {
            Some((direction, identifier)) => {
                data.put_u8(direction.into());
                data.put_u16_le(identifier);
                Ok(4)
            }
            None => Ok(1),
        }
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        let status = ClusterLibraryStatus::try_from(
            *data.first().ok_or(Error::WrongNumberOfBytes)?,
        )?;
        if status == ClusterLibraryStatus::Success && data.len() < 4 {
            return Ok((
                Self {
                    status,
                    attribute: None,
                },
                1,
            ));
        }
        if data.len() < 4 {
            return Err(Error::WrongNumberOfBytes);
        }
        let direction = ReportingDirection::try_from(data[1])?;
        let identifier = LittleEndian::read_u16(&data[2..4]);
        Ok((
            Self {
                status,
                attribute: Some((direction, identifier)),
            },
            4,
        ))
    }
}

/// Attribute found by attribute discovery
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeInformation {
    /// Attribute identifier
    pub identifier: AttributeIdentifier,
    /// Attribute data type
    pub data_type: AttributeDataType,
}

impl Pack<AttributeInformation, Error> for AttributeInformation {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        ensure_space(data, 3)?;
        data.put_u16_le(self.identifier);
        data.put_u8(self.data_type.into());
        Ok(3)
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        let identifier = read_u16(data)?;
        let data_type = read_data_type(*data.get(2).ok_or(Error::WrongNumberOfBytes)?)?;
        Ok((
            Self {
                identifier,
                data_type,
            },
            3,
        ))
    }
}

/// Read attributes request
pub const READ_ATTRIBUTES: Schema = schema!("attributes": FieldType::List(&FieldType::Unsigned16));
/// Read attributes response
pub const READ_ATTRIBUTES_RESPONSE: Schema =
    schema!("records": FieldType::List(&FieldType::AttributeStatus));
/// Write attributes, also used for undivided and unacknowledged writes and
/// attribute reports
pub const WRITE_ATTRIBUTES: Schema =
    schema!("records": FieldType::List(&FieldType::AttributeRecord));
/// Write attributes response
pub const WRITE_ATTRIBUTES_RESPONSE: Schema =
    schema!("records": FieldType::List(&FieldType::WriteAttributeStatus));
/// Configure reporting request
pub const CONFIGURE_REPORTING: Schema =
    schema!("records": FieldType::List(&FieldType::ReportingConfiguration));
/// Configure reporting response
pub const CONFIGURE_REPORTING_RESPONSE: Schema =
    schema!("records": FieldType::List(&FieldType::ReportingStatus));
/// Read reporting configuration request
pub const READ_REPORTING_CONFIGURATION: Schema = schema!(
    "records": FieldType::List(&FieldType::Record(schema!(
        "direction": FieldType::Unsigned8,
        "attribute": FieldType::Unsigned16,
    ))),
);
/// Default response
pub const DEFAULT_RESPONSE: Schema = schema!(
    "command": FieldType::Unsigned8,
    "status": FieldType::Unsigned8,
);
/// Discover attributes request
pub const DISCOVER_ATTRIBUTES: Schema = schema!(
    "start": FieldType::Unsigned16,
    "count": FieldType::Unsigned8,
);
/// Discover attributes response
pub const DISCOVER_ATTRIBUTES_RESPONSE: Schema = schema!(
    "complete": FieldType::Boolean,
    "attributes": FieldType::List(&FieldType::AttributeInformation),
);

/// General commands known to every cluster
pub static COMMANDS: &[CommandDefinition] = &[
    CommandDefinition::new(0x00, "read_attributes", READ_ATTRIBUTES, false),
    CommandDefinition::new(0x01, "read_attributes_response", READ_ATTRIBUTES_RESPONSE, true),
    CommandDefinition::new(0x02, "write_attributes", WRITE_ATTRIBUTES, false),
    CommandDefinition::new(0x03, "write_attributes_undivided", WRITE_ATTRIBUTES, false),
    CommandDefinition::new(0x04, "write_attributes_response", WRITE_ATTRIBUTES_RESPONSE, true),
    CommandDefinition::new(0x05, "write_attributes_no_response", WRITE_ATTRIBUTES, false),
    CommandDefinition::new(0x06, "configure_reporting", CONFIGURE_REPORTING, false),
    CommandDefinition::new(
        0x07,
        "configure_reporting_response",
        CONFIGURE_REPORTING_RESPONSE,
        true,
    ),
    CommandDefinition::new(
        0x08,
        "read_reporting_configuration",
        READ_REPORTING_CONFIGURATION,
        false,
    ),
    CommandDefinition::new(0x0a, "report_attributes", WRITE_ATTRIBUTES, false),
    CommandDefinition::new(0x0b, "default_response", DEFAULT_RESPONSE, true),
    CommandDefinition::new(0x0c, "discover_attributes", DISCOVER_ATTRIBUTES, false),
    CommandDefinition::new(
        0x0d,
        "discover_attributes_response",
        DISCOVER_ATTRIBUTES_RESPONSE,
        true,
    ),
];

/// Look up a general command by identifier
pub fn command(identifier: u8) -> Option<&'static CommandDefinition> {
    COMMANDS.iter().find(|command| command.identifier == identifier)
}
