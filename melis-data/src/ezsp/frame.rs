use bytes::BufMut;

use crate::pack::PackFixed;
use crate::Error;

bitflags::bitflags! {
    /// Frame control of the legacy EZSP frame header
    ///
    /// Commands sent by the host carry an empty frame control, responses and
    /// callbacks carry `RESPONSE` together with callback and status bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FrameControl: u8 {
        /// Frame is a response sent by the network co-processor
        const RESPONSE = 0b1000_0000;
        /// Network index
        const NETWORK_INDEX = 0b0110_0000;
        /// Asynchronous callback
        const CALLBACK_ASYNCHRONOUS = 0b0001_0000;
        /// Synchronous callback
        const CALLBACK_SYNCHRONOUS = 0b0000_1000;
        /// More callbacks are pending
        const CALLBACK_PENDING = 0b0000_0100;
        /// The response was truncated
        const TRUNCATED = 0b0000_0010;
        /// One or more callbacks were lost
        const OVERFLOW = 0b0000_0001;
    }
}

extended_enum!(
    /// Callback type of a response frame
    CallbackType, u8,
    /// Not a callback
    None => 0,
    /// Callback delivered in response to the callback command
    Synchronous => 1,
    /// Callback delivered as soon as it occurred
    Asynchronous => 2,
);

impl FrameControl {
    /// Is this a response frame
    pub fn is_response(self) -> bool {
        self.contains(Self::RESPONSE)
    }

    /// Network index the frame refers to
    pub fn network_index(self) -> u8 {
        (self.bits() & Self::NETWORK_INDEX.bits()) >> 5
    }

    /// Callback type, invalid values are reported as no callback
    pub fn callback_type(self) -> CallbackType {
        let value = (self.bits() & 0b0001_1000) >> 3;
        CallbackType::try_from(value).unwrap_or(CallbackType::None)
    }
}

/// Legacy EZSP frame header
///
/// ```notrust
/// | sequence | frame control | frame identifier | parameters ... |
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    /// Sequence number, copied from command to response
    pub sequence: u8,
    /// Frame control
    pub control: FrameControl,
    /// Frame identifier
    pub frame_id: u8,
}

impl FrameHeader {
    /// Header of a command sent by the host
    pub fn command(sequence: u8, frame_id: u8) -> Self {
        Self {
            sequence,
            control: FrameControl::empty(),
            frame_id,
        }
    }

    /// Split a frame into its header and parameters
    pub fn split(data: &[u8]) -> Result<(Self, &[u8]), Error> {
        let header = Self::unpack(data)?;
        Ok((header, &data[Self::SIZE..]))
    }
}

impl PackFixed<FrameHeader, Error> for FrameHeader {
    const SIZE: usize = 3;

    fn pack<B: BufMut>(&self, data: &mut B) -> Result<(), Error> {
        if data.remaining_mut() < Self::SIZE {
            return Err(Error::NotEnoughSpace);
        }
        data.put_u8(self.sequence);
        data.put_u8(self.control.bits());
        data.put_u8(self.frame_id);
        Ok(())
    }

    fn unpack(data: &[u8]) -> Result<Self, Error> {
        if data.len() < Self::SIZE {
            return Err(Error::WrongNumberOfBytes);
        }
        Ok(Self {
            sequence: data[0],
            control: FrameControl::from_bits_retain(data[1]),
            frame_id: data[2],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_response_header() {
        let data = [0x2a, 0x90, 0x45, 0x01];
        let (header, parameters) = FrameHeader::split(&data).unwrap();
        assert_eq!(header.sequence, 0x2a);
        assert_eq!(header.frame_id, 0x45);
        assert!(header.control.is_response());
        assert_eq!(header.control.callback_type(), CallbackType::Asynchronous);
        assert_eq!(header.control.network_index(), 0);
        assert_eq!(parameters, &[0x01]);
    }

    #[test]
    fn unpack_control_flags() {
        let control = FrameControl::from_bits_retain(0xef);
        assert!(control.contains(FrameControl::OVERFLOW));
        assert!(control.contains(FrameControl::TRUNCATED));
        assert!(control.contains(FrameControl::CALLBACK_PENDING));
        assert_eq!(control.network_index(), 3);
        assert_eq!(control.callback_type(), CallbackType::Synchronous);
    }

    #[test]
    fn pack_command_header() {
        let mut data = Vec::new();
        FrameHeader::command(7, 0x81).pack(&mut data).unwrap();
        assert_eq!(data, [0x07, 0x00, 0x81]);
    }

    #[test]
    fn unpack_short_header() {
        assert_eq!(
            FrameHeader::unpack(&[0x00, 0x80]),
            Err(Error::WrongNumberOfBytes)
        );
    }
}
