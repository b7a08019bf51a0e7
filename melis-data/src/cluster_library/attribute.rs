use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use bytes::BufMut;

use crate::types::Value;
use crate::Error;

/// Marker for strings with the non-value length
const STRING_INVALID_LENGTH: u8 = 0xff;

extended_enum!(
    /// Attribute data type
    AttributeDataType, u8,
    None => 0x00,
    Data8 => 0x08,
    Data16 => 0x09,
    Data24 => 0x0a,
    Data32 => 0x0b,
    Data40 => 0x0c,
    Data48 => 0x0d,
    Data56 => 0x0e,
    Data64 => 0x0f,
    Boolean => 0x10,
    Bitmap8 => 0x18,
    Bitmap16 => 0x19,
    Bitmap24 => 0x1a,
    Bitmap32 => 0x1b,
    Bitmap40 => 0x1c,
    Bitmap48 => 0x1d,
    Bitmap56 => 0x1e,
    Bitmap64 => 0x1f,
    Unsigned8 => 0x20,
    Unsigned16 => 0x21,
    Unsigned24 => 0x22,
    Unsigned32 => 0x23,
    Unsigned40 => 0x24,
    Unsigned48 => 0x25,
    Unsigned56 => 0x26,
    Unsigned64 => 0x27,
    Signed8 => 0x28,
    Signed16 => 0x29,
    Signed24 => 0x2a,
    Signed32 => 0x2b,
    Signed40 => 0x2c,
    Signed48 => 0x2d,
    Signed56 => 0x2e,
    Signed64 => 0x2f,
    Enumeration8 => 0x30,
    Enumeration16 => 0x31,
    FloatingPoint16 => 0x38,
    FloatingPoint32 => 0x39,
    FloatingPoint64 => 0x3a,
    OctetString => 0x41,
    CharacterString => 0x42,
    LongOctetString => 0x43,
    LongCharacterString => 0x44,
    Array => 0x48,
    Structure => 0x4c,
    Set => 0x50,
    Bag => 0x51,
    TimeOfDay => 0xe0,
    Date => 0xe1,
    UtcTime => 0xe2,
    ClusterIdentifier => 0xe8,
    AttributeIdentifier => 0xe9,
    BuildingAutomationControlNetworkObjectIdentifier => 0xea,
    IeeeAddress => 0xf0,
    Key128 => 0xf1,
    Unknown => 0xff,
);

impl AttributeDataType {
    /// Number of octets used by values of this type, `None` for variable
    /// sized types
    pub fn num_octets(self) -> Option<usize> {
        use AttributeDataType::*;
        match self {
            None | Unknown => Some(0),
            Data8 | Boolean | Bitmap8 | Unsigned8 | Signed8 | Enumeration8 => Some(1),
            Data16 | Bitmap16 | Unsigned16 | Signed16 | Enumeration16 | FloatingPoint16
            | ClusterIdentifier | AttributeIdentifier => Some(2),
            Data24 | Bitmap24 | Unsigned24 | Signed24 => Some(3),
            Data32 | Bitmap32 | Unsigned32 | Signed32 | FloatingPoint32 | TimeOfDay | Date
            | UtcTime | BuildingAutomationControlNetworkObjectIdentifier => Some(4),
            Data40 | Bitmap40 | Unsigned40 | Signed40 => Some(5),
            Data48 | Bitmap48 | Unsigned48 | Signed48 => Some(6),
            Data56 | Bitmap56 | Unsigned56 | Signed56 => Some(7),
            Data64 | Bitmap64 | Unsigned64 | Signed64 | FloatingPoint64 | IeeeAddress => Some(8),
            Key128 => Some(16),
            OctetString | CharacterString | LongOctetString | LongCharacterString | Array
            | Structure | Set | Bag => Option::None,
        }
    }

    /// Analog types carry a reportable change in reporting configurations
    pub fn is_analog(self) -> bool {
        use AttributeDataType::*;
        matches!(
            self,
            Unsigned8
                | Unsigned16
                | Unsigned24
                | Unsigned32
                | Unsigned40
                | Unsigned48
                | Unsigned56
                | Unsigned64
                | Signed8
                | Signed16
                | Signed24
                | Signed32
                | Signed40
                | Signed48
                | Signed56
                | Signed64
                | FloatingPoint16
                | FloatingPoint32
                | FloatingPoint64
                | TimeOfDay
                | Date
                | UtcTime
        )
    }
}

/// Attribute value tagged with its data type
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    None,
    Data8(u8),
    Data16(u16),
    Data24(u32),
    Data32(u32),
    Data64(u64),
    Boolean(u8),
    Bitmap8(u8),
    Bitmap16(u16),
    Bitmap24(u32),
    Bitmap32(u32),
    Bitmap64(u64),
    Unsigned8(u8),
    Unsigned16(u16),
    Unsigned24(u32),
    Unsigned32(u32),
    Unsigned40(u64),
    Unsigned48(u64),
    Unsigned56(u64),
    Unsigned64(u64),
    Signed8(i8),
    Signed16(i16),
    Signed24(i32),
    Signed32(i32),
    Signed64(i64),
    Enumeration8(u8),
    Enumeration16(u16),
    FloatingPoint32(f32),
    FloatingPoint64(f64),
    OctetString(Option<Vec<u8>>),
    CharacterString(Option<String>),
    TimeOfDay(u32),
    Date(u32),
    UtcTime(u32),
    ClusterIdentifier(u16),
    AttributeIdentifier(u16),
    IeeeAddress(u64),
}

impl AttributeValue {
    /// Serialise the value without its data type tag
    pub fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        let size = self.packed_size()?;
        if data.remaining_mut() < size {
            return Err(Error::NotEnoughSpace);
        }
        match self {
            AttributeValue::None => {}
            AttributeValue::Data8(v)
            | AttributeValue::Boolean(v)
            | AttributeValue::Bitmap8(v)
            | AttributeValue::Unsigned8(v)
            | AttributeValue::Enumeration8(v) => data.put_u8(*v),
            AttributeValue::Data16(v)
            | AttributeValue::Bitmap16(v)
            | AttributeValue::Unsigned16(v)
            | AttributeValue::Enumeration16(v)
            | AttributeValue::ClusterIdentifier(v)
            | AttributeValue::AttributeIdentifier(v) => data.put_u16_le(*v),
            AttributeValue::Data24(v)
            | AttributeValue::Bitmap24(v)
            | AttributeValue::Unsigned24(v) => data.put_uint_le(u64::from(*v), 3),
            AttributeValue::Data32(v)
            | AttributeValue::Bitmap32(v)
            | AttributeValue::Unsigned32(v)
            | AttributeValue::TimeOfDay(v)
            | AttributeValue::Date(v)
            | AttributeValue::UtcTime(v) => data.put_u32_le(*v),
            AttributeValue::Unsigned40(v)
            | AttributeValue::Unsigned48(v)
            | AttributeValue::Unsigned56(v) => data.put_uint_le(*v, size),
            AttributeValue::Data64(v)
            | AttributeValue::Bitmap64(v)
            | AttributeValue::Unsigned64(v)
            | AttributeValue::IeeeAddress(v) => data.put_u64_le(*v),
            AttributeValue::Signed8(v) => data.put_i8(*v),
            AttributeValue::Signed16(v) => data.put_i16_le(*v),
            AttributeValue::Signed24(v) => data.put_int_le(i64::from(*v), 3),
            AttributeValue::Signed32(v) => data.put_i32_le(*v),
            AttributeValue::Signed64(v) => data.put_i64_le(*v),
            AttributeValue::FloatingPoint32(v) => data.put_f32_le(*v),
            AttributeValue::FloatingPoint64(v) => data.put_f64_le(*v),
            AttributeValue::OctetString(v) => pack_string(data, v.as_deref()),
            AttributeValue::CharacterString(v) => {
                pack_string(data, v.as_deref().map(str::as_bytes))
            }
        }
        Ok(size)
    }

    /// De-serialise a value of the given data type
    pub fn unpack(data: &[u8], data_type: AttributeDataType) -> Result<(Self, usize), Error> {
        if let Some(num_octets) = data_type.num_octets() {
            if data.len() < num_octets {
                return Err(Error::WrongNumberOfBytes);
            }
        }
        let uint = |n| LittleEndian::read_uint(data, n);
        let value = match data_type {
            AttributeDataType::None => AttributeValue::None,
            AttributeDataType::Data8 => AttributeValue::Data8(data[0]),
            AttributeDataType::Data16 => AttributeValue::Data16(LittleEndian::read_u16(data)),
            AttributeDataType::Data24 => AttributeValue::Data24(LittleEndian::read_u24(data)),
            AttributeDataType::Data32 => AttributeValue::Data32(LittleEndian::read_u32(data)),
            AttributeDataType::Data64 => AttributeValue::Data64(LittleEndian::read_u64(data)),
            AttributeDataType::Boolean => match data[0] {
                0x00 | 0x01 | 0xff => AttributeValue::Boolean(data[0]),
                _ => return Err(Error::InvalidValue),
            },
            AttributeDataType::Bitmap8 => AttributeValue::Bitmap8(data[0]),
            AttributeDataType::Bitmap16 => AttributeValue::Bitmap16(LittleEndian::read_u16(data)),
            AttributeDataType::Bitmap24 => AttributeValue::Bitmap24(LittleEndian::read_u24(data)),
            AttributeDataType::Bitmap32 => AttributeValue::Bitmap32(LittleEndian::read_u32(data)),
            AttributeDataType::Bitmap64 => AttributeValue::Bitmap64(LittleEndian::read_u64(data)),
            AttributeDataType::Unsigned8 => AttributeValue::Unsigned8(data[0]),
            AttributeDataType::Unsigned16 => {
                AttributeValue::Unsigned16(LittleEndian::read_u16(data))
            }
            AttributeDataType::Unsigned24 => {
                AttributeValue::Unsigned24(LittleEndian::read_u24(data))
            }
            AttributeDataType::Unsigned32 => {
                AttributeValue::Unsigned32(LittleEndian::read_u32(data))
            }
            AttributeDataType::Unsigned40 => AttributeValue::Unsigned40(uint(5)),
            AttributeDataType::Unsigned48 => AttributeValue::Unsigned48(uint(6)),
            AttributeDataType::Unsigned56 => AttributeValue::Unsigned56(uint(7)),
            AttributeDataType::Unsigned64 => {
                AttributeValue::Unsigned64(LittleEndian::read_u64(data))
            }
            AttributeDataType::Signed8 => AttributeValue::Signed8(data[0] as i8),
            AttributeDataType::Signed16 => AttributeValue::Signed16(LittleEndian::read_i16(data)),
            AttributeDataType::Signed24 => AttributeValue::Signed24(LittleEndian::read_i24(data)),
            AttributeDataType::Signed32 => AttributeValue::Signed32(LittleEndian::read_i32(data)),
            AttributeDataType::Signed64 => AttributeValue::Signed64(LittleEndian::read_i64(data)),
            AttributeDataType::Enumeration8 => AttributeValue::Enumeration8(data[0]),
            AttributeDataType::Enumeration16 => {
                AttributeValue::Enumeration16(LittleEndian::read_u16(data))
            }
            AttributeDataType::FloatingPoint32 => {
                AttributeValue::FloatingPoint32(LittleEndian::read_f32(data))
            }
            AttributeDataType::FloatingPoint64 => {
                AttributeValue::FloatingPoint64(LittleEndian::read_f64(data))
            }
            AttributeDataType::OctetString => {
                let (value, used) = unpack_string(data)?;
                return Ok((AttributeValue::OctetString(value.map(<[u8]>::to_vec)), used));
            }
            AttributeDataType::CharacterString => {
                let (value, used) = unpack_string(data)?;
                let value = match value {
                    Some(octets) => Some(
                        String::from_utf8(octets.to_vec()).map_err(|_| Error::InvalidValue)?,
                    ),
                    None => None,
                };
                return Ok((AttributeValue::CharacterString(value), used));
            }
            AttributeDataType::TimeOfDay => AttributeValue::TimeOfDay(LittleEndian::read_u32(data)),
            AttributeDataType::Date => AttributeValue::Date(LittleEndian::read_u32(data)),
            AttributeDataType::UtcTime => AttributeValue::UtcTime(LittleEndian::read_u32(data)),
            AttributeDataType::ClusterIdentifier => {
                AttributeValue::ClusterIdentifier(LittleEndian::read_u16(data))
            }
            AttributeDataType::AttributeIdentifier => {
                AttributeValue::AttributeIdentifier(LittleEndian::read_u16(data))
            }
            AttributeDataType::IeeeAddress => {
                AttributeValue::IeeeAddress(LittleEndian::read_u64(data))
            }
            _ => return Err(Error::UnsupportedAttributeValue),
        };
        let used = data_type.num_octets().unwrap_or_default();
        Ok((value, used))
    }

    /// Build a attribute value of the given type from a loosely typed value
    pub fn from_value(data_type: AttributeDataType, value: &Value) -> Result<Self, Error> {
        if let Value::Attribute(attribute) = value {
            return if attribute.data_type() == data_type {
                Ok(attribute.clone())
            } else {
                Err(Error::TypeMismatch)
            };
        }
        let attribute = match data_type {
            AttributeDataType::None => AttributeValue::None,
            AttributeDataType::Data8 => AttributeValue::Data8(narrow(value)?),
            AttributeDataType::Data16 => AttributeValue::Data16(narrow(value)?),
            AttributeDataType::Data24 => AttributeValue::Data24(bounded(value, 24)? as u32),
            AttributeDataType::Data32 => AttributeValue::Data32(narrow(value)?),
            AttributeDataType::Data64 => AttributeValue::Data64(narrow(value)?),
            AttributeDataType::Boolean => match value {
                Value::Boolean(flag) => AttributeValue::Boolean(u8::from(*flag)),
                _ => match narrow::<u8>(value)? {
                    flag @ (0x00 | 0x01) => AttributeValue::Boolean(flag),
                    _ => return Err(Error::ValueOutOfRange),
                },
            },
            AttributeDataType::Bitmap8 => AttributeValue::Bitmap8(narrow(value)?),
            AttributeDataType::Bitmap16 => AttributeValue::Bitmap16(narrow(value)?),
            AttributeDataType::Bitmap24 => AttributeValue::Bitmap24(bounded(value, 24)? as u32),
            AttributeDataType::Bitmap32 => AttributeValue::Bitmap32(narrow(value)?),
            AttributeDataType::Bitmap64 => AttributeValue::Bitmap64(narrow(value)?),
            AttributeDataType::Unsigned8 => AttributeValue::Unsigned8(narrow(value)?),
            AttributeDataType::Unsigned16 => AttributeValue::Unsigned16(narrow(value)?),
            AttributeDataType::Unsigned24 => {
                AttributeValue::Unsigned24(bounded(value, 24)? as u32)
            }
            AttributeDataType::Unsigned32 => AttributeValue::Unsigned32(narrow(value)?),
            AttributeDataType::Unsigned40 => AttributeValue::Unsigned40(bounded(value, 40)?),
            AttributeDataType::Unsigned48 => AttributeValue::Unsigned48(bounded(value, 48)?),
            AttributeDataType::Unsigned56 => AttributeValue::Unsigned56(bounded(value, 56)?),
            AttributeDataType::Unsigned64 => AttributeValue::Unsigned64(narrow(value)?),
            AttributeDataType::Signed8 => AttributeValue::Signed8(narrow_signed(value)?),
            AttributeDataType::Signed16 => AttributeValue::Signed16(narrow_signed(value)?),
            AttributeDataType::Signed24 => {
                let v: i32 = narrow_signed(value)?;
                if !(-0x80_0000..0x80_0000).contains(&v) {
                    return Err(Error::ValueOutOfRange);
                }
                AttributeValue::Signed24(v)
            }
            AttributeDataType::Signed32 => AttributeValue::Signed32(narrow_signed(value)?),
            AttributeDataType::Signed64 => AttributeValue::Signed64(narrow_signed(value)?),
            AttributeDataType::Enumeration8 => AttributeValue::Enumeration8(narrow(value)?),
            AttributeDataType::Enumeration16 => AttributeValue::Enumeration16(narrow(value)?),
            AttributeDataType::OctetString => match value {
                Value::Octets(octets) if octets.len() < usize::from(STRING_INVALID_LENGTH) => {
                    AttributeValue::OctetString(Some(octets.clone()))
                }
                Value::Octets(_) => return Err(Error::ValueOutOfRange),
                _ => return Err(Error::TypeMismatch),
            },
            AttributeDataType::CharacterString => match value {
                Value::Text(text) if text.len() < usize::from(STRING_INVALID_LENGTH) => {
                    AttributeValue::CharacterString(Some(text.clone()))
                }
                Value::Text(_) => return Err(Error::ValueOutOfRange),
                _ => return Err(Error::TypeMismatch),
            },
            AttributeDataType::TimeOfDay => AttributeValue::TimeOfDay(narrow(value)?),
            AttributeDataType::Date => AttributeValue::Date(narrow(value)?),
            AttributeDataType::UtcTime => AttributeValue::UtcTime(narrow(value)?),
            AttributeDataType::ClusterIdentifier => {
                AttributeValue::ClusterIdentifier(narrow(value)?)
            }
            AttributeDataType::AttributeIdentifier => {
                AttributeValue::AttributeIdentifier(narrow(value)?)
            }
            AttributeDataType::IeeeAddress => match value {
                Value::ExtendedAddress(address) => AttributeValue::IeeeAddress((*address).into()),
                _ => AttributeValue::IeeeAddress(narrow(value)?),
            },
            _ => return Err(Error::UnsupportedAttributeValue),
        };
        Ok(attribute)
    }

    /// The data type tag of this value
    pub fn data_type(&self) -> AttributeDataType {
        match self {
            AttributeValue::None => AttributeDataType::None,
            AttributeValue::Data8(_) => AttributeDataType::Data8,
            AttributeValue::Data16(_) => AttributeDataType::Data16,
            AttributeValue::Data24(_) => AttributeDataType::Data24,
            AttributeValue::Data32(_) => AttributeDataType::Data32,
            AttributeValue::Data64(_) => AttributeDataType::Data64,
            AttributeValue::Boolean(_) => AttributeDataType::Boolean,
            AttributeValue::Bitmap8(_) => AttributeDataType::Bitmap8,
            AttributeValue::Bitmap16(_) => AttributeDataType::Bitmap16,
            AttributeValue::Bitmap24(_) => AttributeDataType::Bitmap24,
            AttributeValue::Bitmap32(_) => AttributeDataType::Bitmap32,
            AttributeValue::Bitmap64(_) => AttributeDataType::Bitmap64,
            AttributeValue::Unsigned8(_) => AttributeDataType::Unsigned8,
            AttributeValue::Unsigned16(_) => AttributeDataType::Unsigned16,
            AttributeValue::Unsigned24(_) => AttributeDataType::Unsigned24,
            AttributeValue::Unsigned32(_) => AttributeDataType::Unsigned32,
            AttributeValue::Unsigned40(_) => AttributeDataType::Unsigned40,
            AttributeValue::Unsigned48(_) => AttributeDataType::Unsigned48,
            AttributeValue::Unsigned56(_) => AttributeDataType::Unsigned56,
            AttributeValue::Unsigned64(_) => AttributeDataType::Unsigned64,
            AttributeValue::Signed8(_) => AttributeDataType::Signed8,
            AttributeValue::Signed16(_) => AttributeDataType::Signed16,
            AttributeValue::Signed24(_) => AttributeDataType::Signed24,
            AttributeValue::Signed32(_) => AttributeDataType::Signed32,
            AttributeValue::Signed64(_) => AttributeDataType::Signed64,
            AttributeValue::Enumeration8(_) => AttributeDataType::Enumeration8,
            AttributeValue::Enumeration16(_) => AttributeDataType::Enumeration16,
            AttributeValue::FloatingPoint32(_) => AttributeDataType::FloatingPoint32,
            AttributeValue::FloatingPoint64(_) => AttributeDataType::FloatingPoint64,
            AttributeValue::OctetString(_) => AttributeDataType::OctetString,
            AttributeValue::CharacterString(_) => AttributeDataType::CharacterString,
            AttributeValue::TimeOfDay(_) => AttributeDataType::TimeOfDay,
            AttributeValue::Date(_) => AttributeDataType::Date,
            AttributeValue::UtcTime(_) => AttributeDataType::UtcTime,
            AttributeValue::ClusterIdentifier(_) => AttributeDataType::ClusterIdentifier,
            AttributeValue::AttributeIdentifier(_) => AttributeDataType::AttributeIdentifier,
            AttributeValue::IeeeAddress(_) => AttributeDataType::IeeeAddress,
        }
    }

    /// Check that the value is not the non-value of its type
    pub fn is_valid(&self) -> bool {
        match self {
            AttributeValue::Boolean(v) => *v == 0x00 || *v == 0x01,
            AttributeValue::Unsigned8(v) | AttributeValue::Enumeration8(v) => *v != u8::MAX,
            AttributeValue::Unsigned16(v)
            | AttributeValue::Enumeration16(v)
            | AttributeValue::ClusterIdentifier(v)
            | AttributeValue::AttributeIdentifier(v) => *v != u16::MAX,
            AttributeValue::Unsigned24(v) => *v < 0x00ff_ffff,
            AttributeValue::Unsigned32(v)
            | AttributeValue::TimeOfDay(v)
            | AttributeValue::Date(v)
            | AttributeValue::UtcTime(v) => *v != u32::MAX,
            AttributeValue::Unsigned40(v) => *v != 0xff_ffff_ffff,
            AttributeValue::Unsigned48(v) => *v != 0xffff_ffff_ffff,
            AttributeValue::Unsigned56(v) => *v != 0xff_ffff_ffff_ffff,
            AttributeValue::Unsigned64(v) | AttributeValue::IeeeAddress(v) => *v != u64::MAX,
            AttributeValue::Signed8(v) => *v != i8::MIN,
            AttributeValue::Signed16(v) => *v != i16::MIN,
            AttributeValue::Signed24(v) => *v != -0x80_0000,
            AttributeValue::Signed32(v) => *v != i32::MIN,
            AttributeValue::Signed64(v) => *v != i64::MIN,
            AttributeValue::FloatingPoint32(v) => !v.is_nan(),
            AttributeValue::FloatingPoint64(v) => !v.is_nan(),
            AttributeValue::OctetString(v) => v.is_some(),
            AttributeValue::CharacterString(v) => v.is_some(),
            _ => true,
        }
    }

    fn packed_size(&self) -> Result<usize, Error> {
        let length = match self {
            AttributeValue::OctetString(Some(v)) => v.len(),
            AttributeValue::CharacterString(Some(v)) => v.len(),
            AttributeValue::OctetString(None) | AttributeValue::CharacterString(None) => 0,
            _ => return Ok(self.data_type().num_octets().unwrap_or_default()),
        };
        if length >= usize::from(STRING_INVALID_LENGTH) {
            return Err(Error::ValueOutOfRange);
        }
        Ok(1 + length)
    }
}

fn pack_string<B: BufMut>(data: &mut B, value: Option<&[u8]>) {
    match value {
        Some(octets) => {
            data.put_u8(octets.len() as u8);
            data.put_slice(octets);
        }
        None => data.put_u8(STRING_INVALID_LENGTH),
    }
}

fn unpack_string(data: &[u8]) -> Result<(Option<&[u8]>, usize), Error> {
    let length = *data.first().ok_or(Error::WrongNumberOfBytes)?;
    if length == STRING_INVALID_LENGTH {
        return Ok((None, 1));
    }
    let end = 1 + usize::from(length);
    if data.len() < end {
        return Err(Error::WrongNumberOfBytes);
    }
    Ok((Some(&data[1..end]), end))
}

fn narrow<T: TryFrom<u64>>(value: &Value) -> Result<T, Error> {
    let value = value.as_u64().ok_or(Error::TypeMismatch)?;
    T::try_from(value).map_err(|_| Error::ValueOutOfRange)
}

fn narrow_signed<T: TryFrom<i64>>(value: &Value) -> Result<T, Error> {
    let value = value.as_i64().ok_or(Error::TypeMismatch)?;
    T::try_from(value).map_err(|_| Error::ValueOutOfRange)
}

fn bounded(value: &Value, bits: u32) -> Result<u64, Error> {
    let value = value.as_u64().ok_or(Error::TypeMismatch)?;
    if value >> bits != 0 {
        return Err(Error::ValueOutOfRange);
    }
    Ok(value)
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("Invalid");
        }
        match self {
            AttributeValue::None => f.write_str("None"),
            AttributeValue::Data8(v)
            | AttributeValue::Bitmap8(v)
            | AttributeValue::Unsigned8(v)
            | AttributeValue::Enumeration8(v) => write!(f, "{}", v),
            AttributeValue::Data16(v)
            | AttributeValue::Bitmap16(v)
            | AttributeValue::Unsigned16(v)
            | AttributeValue::Enumeration16(v) => write!(f, "{}", v),
            AttributeValue::Data24(v)
            | AttributeValue::Data32(v)
            | AttributeValue::Bitmap24(v)
            | AttributeValue::Bitmap32(v)
            | AttributeValue::Unsigned24(v)
            | AttributeValue::Unsigned32(v)
            | AttributeValue::UtcTime(v) => write!(f, "{}", v),
            AttributeValue::Data64(v)
            | AttributeValue::Bitmap64(v)
            | AttributeValue::Unsigned40(v)
            | AttributeValue::Unsigned48(v)
            | AttributeValue::Unsigned56(v)
            | AttributeValue::Unsigned64(v) => write!(f, "{}", v),
            AttributeValue::Boolean(v) => write!(f, "{}", *v == 0x01),
            AttributeValue::Signed8(v) => write!(f, "{}", v),
            AttributeValue::Signed16(v) => write!(f, "{}", v),
            AttributeValue::Signed24(v) | AttributeValue::Signed32(v) => write!(f, "{}", v),
            AttributeValue::Signed64(v) => write!(f, "{}", v),
            AttributeValue::FloatingPoint32(v) => write!(f, "{}", v),
            AttributeValue::FloatingPoint64(v) => write!(f, "{}", v),
            AttributeValue::OctetString(v) => {
                for octet in v.iter().flatten() {
                    write!(f, "{:02x}", octet)?;
                }
                Ok(())
            }
            AttributeValue::CharacterString(v) => f.write_str(v.as_deref().unwrap_or_default()),
            AttributeValue::TimeOfDay(v) => {
                let [hours, minutes, seconds, hundredths] = v.to_le_bytes();
                write!(
                    f,
                    "{:02}:{:02}:{:02}.{:02}",
                    hours, minutes, seconds, hundredths
                )
            }
            AttributeValue::Date(v) => {
                let [year, month, day, _weekday] = v.to_le_bytes();
                write!(f, "{}-{:02}-{:02}", 1900 + u32::from(year), month, day)
            }
            AttributeValue::ClusterIdentifier(v) | AttributeValue::AttributeIdentifier(v) => {
                write!(f, "{:04x}", v)
            }
            AttributeValue::IeeeAddress(v) => write!(f, "{:016x}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_sizes() {
        assert_eq!(AttributeDataType::Boolean.num_octets(), Some(1));
        assert_eq!(AttributeDataType::Unsigned24.num_octets(), Some(3));
        assert_eq!(AttributeDataType::IeeeAddress.num_octets(), Some(8));
        assert_eq!(AttributeDataType::CharacterString.num_octets(), None);
        assert!(AttributeDataType::Unsigned16.is_analog());
        assert!(AttributeDataType::UtcTime.is_analog());
        assert!(!AttributeDataType::Enumeration8.is_analog());
        assert!(!AttributeDataType::Bitmap16.is_analog());
    }

    #[test]
    fn unpack_fixed_size_values() {
        let data = [0xd2, 0x04, 0xff, 0x7f];
        assert_eq!(
            AttributeValue::unpack(&data, AttributeDataType::Unsigned16),
            Ok((AttributeValue::Unsigned16(1234), 2))
        );
        assert_eq!(
            AttributeValue::unpack(&data, AttributeDataType::Signed24),
            Ok((AttributeValue::Signed24(-64302), 3))
        );
        assert_eq!(
            AttributeValue::unpack(&data, AttributeDataType::Unsigned32),
            Ok((AttributeValue::Unsigned32(0x7fff_04d2), 4))
        );
        assert_eq!(
            AttributeValue::unpack(&data[..1], AttributeDataType::Unsigned16),
            Err(Error::WrongNumberOfBytes)
        );
        assert_eq!(
            AttributeValue::unpack(&[0x02], AttributeDataType::Boolean),
            Err(Error::InvalidValue)
        );
        assert_eq!(
            AttributeValue::unpack(&data, AttributeDataType::Array),
            Err(Error::UnsupportedAttributeValue)
        );
    }

    #[test]
    fn unpack_strings() {
        let data = [0x05, b'h', b'e', b'l', b'l', b'o', 0x00];
        assert_eq!(
            AttributeValue::unpack(&data, AttributeDataType::CharacterString),
            Ok((AttributeValue::CharacterString(Some("hello".to_string())), 6))
        );
        assert_eq!(
            AttributeValue::unpack(&[0xff], AttributeDataType::OctetString),
            Ok((AttributeValue::OctetString(None), 1))
        );
        assert_eq!(
            AttributeValue::unpack(&[0x04, 0x01], AttributeDataType::OctetString),
            Err(Error::WrongNumberOfBytes)
        );
    }

    #[test]
    fn pack_values() {
        let mut data = Vec::new();
        AttributeValue::Signed24(-2).pack(&mut data).unwrap();
        AttributeValue::Unsigned48(0x0102_0304_0506).pack(&mut data).unwrap();
        AttributeValue::CharacterString(Some("ab".to_string()))
            .pack(&mut data)
            .unwrap();
        AttributeValue::OctetString(None).pack(&mut data).unwrap();
        assert_eq!(
            data,
            [0xfe, 0xff, 0xff, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0x02, b'a', b'b', 0xff]
        );

        let mut data = [0u8; 1];
        assert_eq!(
            AttributeValue::Unsigned16(1).pack(&mut &mut data[..]),
            Err(Error::NotEnoughSpace)
        );
    }

    #[test]
    fn value_from_loose_value() {
        assert_eq!(
            AttributeValue::from_value(AttributeDataType::Unsigned8, &Value::Unsigned(42)),
            Ok(AttributeValue::Unsigned8(42))
        );
        assert_eq!(
            AttributeValue::from_value(AttributeDataType::Unsigned8, &Value::Unsigned(256)),
            Err(Error::ValueOutOfRange)
        );
        assert_eq!(
            AttributeValue::from_value(AttributeDataType::Signed16, &Value::Signed(-5)),
            Ok(AttributeValue::Signed16(-5))
        );
        assert_eq!(
            AttributeValue::from_value(AttributeDataType::Boolean, &Value::Boolean(true)),
            Ok(AttributeValue::Boolean(1))
        );
        assert_eq!(
            AttributeValue::from_value(AttributeDataType::Unsigned24, &Value::Unsigned(0x100_0000)),
            Err(Error::ValueOutOfRange)
        );
        assert_eq!(
            AttributeValue::from_value(
                AttributeDataType::CharacterString,
                &Value::Text("Kitchen".to_string())
            ),
            Ok(AttributeValue::CharacterString(Some("Kitchen".to_string())))
        );
        assert_eq!(
            AttributeValue::from_value(AttributeDataType::CharacterString, &Value::Unsigned(1)),
            Err(Error::TypeMismatch)
        );
        assert_eq!(
            AttributeValue::from_value(
                AttributeDataType::Unsigned16,
                &Value::Attribute(AttributeValue::Unsigned16(7))
            ),
            Ok(AttributeValue::Unsigned16(7))
        );
        assert_eq!(
            AttributeValue::from_value(
                AttributeDataType::Unsigned16,
                &Value::Attribute(AttributeValue::Unsigned8(7))
            ),
            Err(Error::TypeMismatch)
        );
    }

    #[test]
    fn display_values() {
        assert_eq!(format!("{}", AttributeValue::None), "None");
        assert_eq!(format!("{}", AttributeValue::Boolean(1)), "true");
        assert_eq!(format!("{}", AttributeValue::Boolean(0xff)), "Invalid");
        assert_eq!(format!("{}", AttributeValue::Unsigned8(0xff)), "Invalid");
        assert_eq!(format!("{}", AttributeValue::Signed16(-12)), "-12");
        assert_eq!(
            format!("{}", AttributeValue::OctetString(Some(vec![0xca, 0xfe]))),
            "cafe"
        );
        assert_eq!(
            format!("{}", AttributeValue::TimeOfDay(u32::from_le_bytes([13, 5, 9, 0]))),
            "13:05:09.00"
        );
        assert_eq!(
            format!("{}", AttributeValue::Date(u32::from_le_bytes([124, 10, 19, 6]))),
            "2024-10-19"
        );
        assert_eq!(format!("{}", AttributeValue::ClusterIdentifier(0x0300)), "0300");
    }
}
