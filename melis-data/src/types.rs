//! # Schema driven serialisation
//!
//! Command payloads are described by a static schema, an ordered list of
//! named fields. Decoding a payload yields one [`Value`] per field, encoding
//! takes one value per field. Composite fields nest schemas or repeat an
//! element type.

use byteorder::{ByteOrder, LittleEndian};
use bytes::BufMut;

use crate::cluster_library::{
    AttributeDataType, AttributeInformation, AttributeRecord, AttributeStatus, AttributeValue,
    ReportingConfiguration, ReportingStatus, WriteAttributeStatus,
};
use crate::common::address::ExtendedAddress;
use crate::pack::{Pack, PackFixed};
use crate::Error;

/// Wire representation of a field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    /// 8-bit unsigned integer
    Unsigned8,
    /// 16-bit unsigned integer
    Unsigned16,
    /// 24-bit unsigned integer
    Unsigned24,
    /// 32-bit unsigned integer
    Unsigned32,
    /// 64-bit unsigned integer
    Unsigned64,
    /// 8-bit signed integer
    Signed8,
    /// 16-bit signed integer
    Signed16,
    /// 32-bit signed integer
    Signed32,
    /// Boolean stored in one octet
    Boolean,
    /// Octets prefixed with a one octet length
    OctetString,
    /// UTF-8 text prefixed with a one octet length
    CharacterString,
    /// 64-bit IEEE address
    ExtendedAddress,
    /// Nested record
    Record(&'static [Field]),
    /// Elements repeated until the end of the payload
    List(&'static FieldType),
    /// Elements prefixed with a one octet count
    CountedList(&'static FieldType),
    /// Attribute data type followed by a value of that type
    TypedValue,
    /// Attribute identifier followed by a typed value
    AttributeRecord,
    /// Read attributes status record
    AttributeStatus,
    /// Write attributes status record
    WriteAttributeStatus,
    /// Attribute reporting configuration record
    ReportingConfiguration,
    /// Configure reporting status record
    ReportingStatus,
    /// Attribute identifier and data type pair
    AttributeInformation,
}

/// Named field of a schema
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Field name
    pub name: &'static str,
    /// Field wire type
    pub kind: FieldType,
}

/// Ordered list of fields describing a payload
pub type Schema = &'static [Field];

/// Decoded value of a field
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Unsigned integer of any width
    Unsigned(u64),
    /// Signed integer of any width
    Signed(i64),
    /// Boolean
    Boolean(bool),
    /// Octet string
    Octets(Vec<u8>),
    /// Character string
    Text(String),
    /// 64-bit IEEE address
    ExtendedAddress(ExtendedAddress),
    /// Nested record, one value per record field
    Record(Vec<Value>),
    /// Repeated elements
    List(Vec<Value>),
    /// Typed attribute value
    Attribute(AttributeValue),
    /// Attribute identifier and value
    AttributeRecord(AttributeRecord),
    /// Read attributes status
    AttributeStatus(AttributeStatus),
    /// Write attributes status
    WriteAttributeStatus(WriteAttributeStatus),
    /// Reporting configuration
    ReportingConfiguration(ReportingConfiguration),
    /// Configure reporting status
    ReportingStatus(ReportingStatus),
    /// Attribute identifier and data type
    AttributeInformation(AttributeInformation),
}

impl Value {
    /// Integer value, negative integers excluded
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(*v),
            Value::Signed(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Integer value as signed
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Signed(v) => Some(*v),
            Value::Unsigned(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Octet string value
    pub fn as_octets(&self) -> Option<&[u8]> {
        match self {
            Value::Octets(v) => Some(v),
            _ => None,
        }
    }

    /// Elements of a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Fields of a record
    pub fn as_record(&self) -> Option<&[Value]> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }
}

/// Look up the value of a named field
pub fn field<'a>(schema: &[Field], values: &'a [Value], name: &str) -> Option<&'a Value> {
    let index = schema.iter().position(|field| field.name == name)?;
    values.get(index)
}

/// Serialise one value per schema field, returning the number of bytes
/// written
pub fn encode<B: BufMut>(values: &[Value], schema: &[Field], data: &mut B) -> Result<usize, Error> {
    if values.len() != schema.len() {
        return Err(Error::WrongNumberOfValues {
            expected: schema.len(),
            actual: values.len(),
        });
    }
    let mut used = 0;
    for (value, field) in values.iter().zip(schema) {
        used += encode_field(value, field.kind, data)?;
    }
    Ok(used)
}

/// De-serialise one value per schema field, returning the values and the
/// number of bytes consumed
pub fn decode(data: &[u8], schema: &[Field]) -> Result<(Vec<Value>, usize), Error> {
    let mut values = Vec::with_capacity(schema.len());
    let mut offset = 0;
    for field in schema {
        let (value, used) = decode_field(&data[offset..], field.kind)?;
        values.push(value);
        offset += used;
    }
    Ok((values, offset))
}

fn encode_unsigned<B: BufMut>(value: &Value, octets: usize, data: &mut B) -> Result<usize, Error> {
    let v = value.as_u64().ok_or(Error::TypeMismatch)?;
    if octets < 8 && v >> (octets * 8) != 0 {
        return Err(Error::ValueOutOfRange);
    }
    ensure_space(data, octets)?;
    data.put_uint_le(v, octets);
    Ok(octets)
}

fn encode_signed<B: BufMut>(value: &Value, octets: usize, data: &mut B) -> Result<usize, Error> {
    let v = value.as_i64().ok_or(Error::TypeMismatch)?;
    let bits = octets * 8;
    if bits < 64 && !(-(1i64 << (bits - 1))..(1i64 << (bits - 1))).contains(&v) {
        return Err(Error::ValueOutOfRange);
    }
    ensure_space(data, octets)?;
    data.put_int_le(v, octets);
    Ok(octets)
}

fn encode_string<B: BufMut>(octets: &[u8], data: &mut B) -> Result<usize, Error> {
    let length = u8::try_from(octets.len()).map_err(|_| Error::ValueOutOfRange)?;
    ensure_space(data, 1 + octets.len())?;
    data.put_u8(length);
    data.put_slice(octets);
    Ok(1 + octets.len())
}

fn ensure_space<B: BufMut>(data: &B, size: usize) -> Result<(), Error> {
    if data.remaining_mut() < size {
        return Err(Error::NotEnoughSpace);
    }
    Ok(())
}

fn encode_field<B: BufMut>(value: &Value, kind: FieldType, data: &mut B) -> Result<usize, Error> {
    match (kind, value) {
        (FieldType::Unsigned8, _) => encode_unsigned(value, 1, data),
        (FieldType::Unsigned16, _) => encode_unsigned(value, 2, data),
        (FieldType::Unsigned24, _) => encode_unsigned(value, 3, data),
        (FieldType::Unsigned32, _) => encode_unsigned(value, 4, data),
        (FieldType::Unsigned64, _) => encode_unsigned(value, 8, data),
        (FieldType::Signed8, _) => encode_signed(value, 1, data),
        (FieldType::Signed16, _) => encode_signed(value, 2, data),
        (FieldType::Signed32, _) => encode_signed(value, 4, data),
        (FieldType::Boolean, Value::Boolean(flag)) => {
            ensure_space(data, 1)?;
            data.put_u8(u8::from(*flag));
            Ok(1)
        }
        (FieldType::OctetString, Value::Octets(octets)) => encode_string(octets, data),
        (FieldType::CharacterString, Value::Text(text)) => encode_string(text.as_bytes(), data),
        (FieldType::ExtendedAddress, Value::ExtendedAddress(address)) => {
            address.pack(data)?;
            Ok(ExtendedAddress::SIZE)
        }
        (FieldType::Record(fields), Value::Record(values)) => encode(values, fields, data),
        (FieldType::List(element), Value::List(values)) => {
            let mut used = 0;
            for value in values {
                used += encode_field(value, *element, data)?;
            }
            Ok(used)
        }
        (FieldType::CountedList(element), Value::List(values)) => {
            let count = u8::try_from(values.len()).map_err(|_| Error::ValueOutOfRange)?;
            ensure_space(data, 1)?;
            data.put_u8(count);
            let mut used = 1;
            for value in values {
                used += encode_field(value, *element, data)?;
            }
            Ok(used)
        }
        (FieldType::TypedValue, Value::Attribute(attribute)) => {
            ensure_space(data, 1)?;
            data.put_u8(attribute.data_type().into());
            Ok(1 + attribute.pack(data)?)
        }
        (FieldType::AttributeRecord, Value::AttributeRecord(record)) => record.pack(data),
        (FieldType::AttributeStatus, Value::AttributeStatus(record)) => record.pack(data),
        (FieldType::WriteAttributeStatus, Value::WriteAttributeStatus(record)) => record.pack(data),
        (FieldType::ReportingConfiguration, Value::ReportingConfiguration(record)) => {
            record.pack(data)
        }
        (FieldType::ReportingStatus, Value::ReportingStatus(record)) => record.pack(data),
        (FieldType::AttributeInformation, Value::AttributeInformation(record)) => record.pack(data),
        _ => Err(Error::TypeMismatch),
    }
}

fn decode_unsigned(data: &[u8], octets: usize) -> Result<(Value, usize), Error> {
    if data.len() < octets {
        return Err(Error::WrongNumberOfBytes);
    }
    Ok((Value::Unsigned(LittleEndian::read_uint(data, octets)), octets))
}

fn decode_signed(data: &[u8], octets: usize) -> Result<(Value, usize), Error> {
    if data.len() < octets {
        return Err(Error::WrongNumberOfBytes);
    }
    Ok((Value::Signed(LittleEndian::read_int(data, octets)), octets))
}

fn decode_string(data: &[u8]) -> Result<(&[u8], usize), Error> {
    let length = usize::from(*data.first().ok_or(Error::WrongNumberOfBytes)?);
    if data.len() < 1 + length {
        return Err(Error::WrongNumberOfBytes);
    }
    Ok((&data[1..=length], 1 + length))
}

fn decode_field(data: &[u8], kind: FieldType) -> Result<(Value, usize), Error> {
    match kind {
        FieldType::Unsigned8 => decode_unsigned(data, 1),
        FieldType::Unsigned16 => decode_unsigned(data, 2),
        FieldType::Unsigned24 => decode_unsigned(data, 3),
        FieldType::Unsigned32 => decode_unsigned(data, 4),
        FieldType::Unsigned64 => decode_unsigned(data, 8),
        FieldType::Signed8 => decode_signed(data, 1),
        FieldType::Signed16 => decode_signed(data, 2),
        FieldType::Signed32 => decode_signed(data, 4),
        FieldType::Boolean => {
            let flag = *data.first().ok_or(Error::WrongNumberOfBytes)?;
            Ok((Value::Boolean(flag != 0), 1))
        }
        FieldType::OctetString => {
            let (octets, used) = decode_string(data)?;
            Ok((Value::Octets(octets.to_vec()), used))
        }
        FieldType::CharacterString => {
            let (octets, used) = decode_string(data)?;
            let text = String::from_utf8(octets.to_vec()).map_err(|_| Error::InvalidValue)?;
            Ok((Value::Text(text), used))
        }
        FieldType::ExtendedAddress => {
            let address = ExtendedAddress::unpack(data)?;
            Ok((Value::ExtendedAddress(address), ExtendedAddress::SIZE))
        }
        FieldType::Record(fields) => {
            let (values, used) = decode(data, fields)?;
            Ok((Value::Record(values), used))
        }
        FieldType::List(element) => {
            let mut values = Vec::new();
            let mut offset = 0;
            while offset < data.len() {
                let (value, used) = decode_field(&data[offset..], *element)?;
                if used == 0 {
                    return Err(Error::InvalidValue);
                }
                values.push(value);
                offset += used;
            }
            Ok((Value::List(values), offset))
        }
        FieldType::CountedList(element) => {
            let count = *data.first().ok_or(Error::WrongNumberOfBytes)?;
            let mut values = Vec::with_capacity(usize::from(count));
            let mut offset = 1;
            for _ in 0..count {
                let (value, used) = decode_field(&data[offset..], *element)?;
                values.push(value);
                offset += used;
            }
            Ok((Value::List(values), offset))
        }
        FieldType::TypedValue => {
            let data_type = *data.first().ok_or(Error::WrongNumberOfBytes)?;
            let data_type: AttributeDataType = data_type
                .try_into()
                .map_err(|_| Error::UnknownDataType(data_type))?;
            let (attribute, used) = AttributeValue::unpack(&data[1..], data_type)?;
            Ok((Value::Attribute(attribute), 1 + used))
        }
        FieldType::AttributeRecord => {
            let (record, used) = AttributeRecord::unpack(data)?;
            Ok((Value::AttributeRecord(record), used))
        }
        FieldType::AttributeStatus => {
            let (record, used) = AttributeStatus::unpack(data)?;
            Ok((Value::AttributeStatus(record), used))
        }
        FieldType::WriteAttributeStatus => {
            let (record, used) = WriteAttributeStatus::unpack(data)?;
            Ok((Value::WriteAttributeStatus(record), used))
        }
        FieldType::ReportingConfiguration => {
            let (record, used) = ReportingConfiguration::unpack(data)?;
            Ok((Value::ReportingConfiguration(record), used))
        }
        FieldType::ReportingStatus => {
            let (record, used) = ReportingStatus::unpack(data)?;
            Ok((Value::ReportingStatus(record), used))
        }
        FieldType::AttributeInformation => {
            let (record, used) = AttributeInformation::unpack(data)?;
            Ok((Value::AttributeInformation(record), used))
        }
    }
}
