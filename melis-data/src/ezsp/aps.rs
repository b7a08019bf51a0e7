use byteorder::{ByteOrder, LittleEndian};
use bytes::BufMut;

use crate::pack::PackFixed;
use crate::types::{FieldType, Schema, Value};
use crate::Error;

/// No options
pub const APS_OPTION_NONE: u16 = 0x0000;
/// Encrypt with the transient key
pub const APS_OPTION_ENCRYPTION: u16 = 0x0020;
/// Resend the message until acknowledged
pub const APS_OPTION_RETRY: u16 = 0x0040;
/// Allow route discovery
pub const APS_OPTION_ENABLE_ROUTE_DISCOVERY: u16 = 0x0100;
/// Force route discovery
pub const APS_OPTION_FORCE_ROUTE_DISCOVERY: u16 = 0x0200;
/// Include the source IEEE address in the network frame
pub const APS_OPTION_SOURCE_EUI64: u16 = 0x0400;
/// Include the destination IEEE address in the network frame
pub const APS_OPTION_DESTINATION_EUI64: u16 = 0x0800;

/// Options used for unicast requests to devices
pub const APS_OPTIONS_DEFAULT: u16 = APS_OPTION_RETRY | APS_OPTION_ENABLE_ROUTE_DISCOVERY;

/// Wire layout of the EZSP APS frame record
pub const APS_FRAME: Schema = schema!(
    "profile": FieldType::Unsigned16,
    "cluster": FieldType::Unsigned16,
    "source_endpoint": FieldType::Unsigned8,
    "destination_endpoint": FieldType::Unsigned8,
    "options": FieldType::Unsigned16,
    "group": FieldType::Unsigned16,
    "sequence": FieldType::Unsigned8,
);

/// Application support addressing of a message
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApsFrame {
    /// Application profile
    pub profile: u16,
    /// Cluster the message is for
    pub cluster: u16,
    /// Sending endpoint
    pub source_endpoint: u8,
    /// Receiving endpoint
    pub destination_endpoint: u8,
    /// APS option bits
    pub options: u16,
    /// Group identifier, for multicast messages
    pub group: u16,
    /// APS sequence number
    pub sequence: u8,
}

impl PackFixed<ApsFrame, Error> for ApsFrame {
    const SIZE: usize = 11;

    fn pack<B: BufMut>(&self, data: &mut B) -> Result<(), Error> {
        if data.remaining_mut() < Self::SIZE {
            return Err(Error::NotEnoughSpace);
        }
        data.put_u16_le(self.profile);
        data.put_u16_le(self.cluster);
        data.put_u8(self.source_endpoint);
        data.put_u8(self.destination_endpoint);
        data.put_u16_le(self.options);
        data.put_u16_le(self.group);
        data.put_u8(self.sequence);
        Ok(())
    }

    fn unpack(data: &[u8]) -> Result<Self, Error> {
        if data.len() < Self::SIZE {
            return Err(Error::WrongNumberOfBytes);
        }
        Ok(Self {
            profile: LittleEndian::read_u16(&data[0..2]),
            cluster: LittleEndian::read_u16(&data[2..4]),
            source_endpoint: data[4],
            destination_endpoint: data[5],
            options: LittleEndian::read_u16(&data[6..8]),
            group: LittleEndian::read_u16(&data[8..10]),
            sequence: data[10],
        })
    }
}

impl From<&ApsFrame> for Value {
    fn from(frame: &ApsFrame) -> Self {
        Value::Record(vec![
            Value::Unsigned(u64::from(frame.profile)),
            Value::Unsigned(u64::from(frame.cluster)),
            Value::Unsigned(u64::from(frame.source_endpoint)),
            Value::Unsigned(u64::from(frame.destination_endpoint)),
            Value::Unsigned(u64::from(frame.options)),
            Value::Unsigned(u64::from(frame.group)),
            Value::Unsigned(u64::from(frame.sequence)),
        ])
    }
}

impl TryFrom<&Value> for ApsFrame {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Error> {
        let fields = value.as_record().ok_or(Error::TypeMismatch)?;
        if fields.len() != APS_FRAME.len() {
            return Err(Error::WrongNumberOfValues {
                expected: APS_FRAME.len(),
                actual: fields.len(),
            });
        }
        let get = |index: usize| fields[index].as_u64().ok_or(Error::TypeMismatch);
        let narrow = |v: u64| u16::try_from(v).map_err(|_| Error::ValueOutOfRange);
        let narrow8 = |v: u64| u8::try_from(v).map_err(|_| Error::ValueOutOfRange);
        Ok(Self {
            profile: narrow(get(0)?)?,
            cluster: narrow(get(1)?)?,
            source_endpoint: narrow8(get(2)?)?,
            destination_endpoint: narrow8(get(3)?)?,
            options: narrow(get(4)?)?,
            group: narrow(get(5)?)?,
            sequence: narrow8(get(6)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{decode, encode};

    fn frame() -> ApsFrame {
        ApsFrame {
            profile: 0x0104,
            cluster: 0x0006,
            source_endpoint: 1,
            destination_endpoint: 11,
            options: APS_OPTIONS_DEFAULT,
            group: 0,
            sequence: 0x42,
        }
    }

    #[test]
    fn pack_aps_frame() {
        let mut data = Vec::new();
        frame().pack(&mut data).unwrap();
        assert_eq!(
            data,
            [0x04, 0x01, 0x06, 0x00, 0x01, 0x0b, 0x40, 0x01, 0x00, 0x00, 0x42]
        );
        assert_eq!(ApsFrame::unpack(&data).unwrap(), frame());
    }

    #[test]
    fn schema_matches_packed_layout() {
        let mut packed = Vec::new();
        frame().pack(&mut packed).unwrap();

        let wrapper = schema!("frame": FieldType::Record(APS_FRAME));
        let mut encoded = Vec::new();
        let used = encode(&[Value::from(&frame())], wrapper, &mut encoded).unwrap();
        assert_eq!(used, ApsFrame::SIZE);
        assert_eq!(encoded, packed);

        let (values, _) = decode(&packed, APS_FRAME).unwrap();
        let value = Value::Record(values);
        assert_eq!(ApsFrame::try_from(&value).unwrap(), frame());
    }

    #[test]
    fn reject_out_of_range_record() {
        let mut value = Value::from(&frame());
        if let Value::Record(fields) = &mut value {
            fields[2] = Value::Unsigned(0x100);
        }
        assert_eq!(ApsFrame::try_from(&value), Err(Error::ValueOutOfRange));
    }
}
