use bytes::BufMut;

use crate::error::Error;
use crate::pack::{Pack, PackFixed};

const FRAME_TYPE_MASK: u8 = 0b0000_0011;
const MANUFACTURER_SPECIFIC: u8 = 0b0000_0100;
const DIRECTION_TO_CLIENT: u8 = 0b0000_1000;
const DISABLE_DEFAULT_RESPONSE: u8 = 0b0001_0000;

/// Frame type field
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// The command is global for all clusters
    Global,
    /// Command is specific or local to a cluster
    Local,
    /// Reserved frame type, receivers handle it like `Global`
    Reserved(u8),
}

impl From<u8> for FrameType {
    fn from(value: u8) -> Self {
        match value & FRAME_TYPE_MASK {
            0b00 => FrameType::Global,
            0b01 => FrameType::Local,
            reserved => FrameType::Reserved(reserved),
        }
    }
}

impl TryFrom<FrameType> for u8 {
    type Error = Error;

    fn try_from(value: FrameType) -> Result<Self, Self::Error> {
        match value {
            FrameType::Global => Ok(0b00),
            FrameType::Local => Ok(0b01),
            FrameType::Reserved(_) => Err(Error::UnknownFrameType),
        }
    }
}

/// Direction of the command
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sent from the client side to the server side
    ToServer,
    /// Sent from the server side to the client side, replies travel this way
    ToClient,
}

impl From<u8> for Direction {
    fn from(value: u8) -> Self {
        if value & DIRECTION_TO_CLIENT == DIRECTION_TO_CLIENT {
            Direction::ToClient
        } else {
            Direction::ToServer
        }
    }
}

impl From<Direction> for u8 {
    fn from(value: Direction) -> u8 {
        match value {
            Direction::ToServer => 0,
            Direction::ToClient => DIRECTION_TO_CLIENT,
        }
    }
}

/// Cluster library frame control field
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameControl {
    /// Frame type, see `FrameType`
    pub frame_type: FrameType,
    /// Manufacturer specific command
    pub manufacturer_specific: bool,
    /// Command direction, see `Direction`
    pub direction: Direction,
    /// Disable default response mechanism
    pub disable_default_response: bool,
}

impl FrameControl {
    /// Frame control for a request sent towards a server cluster
    pub fn request(frame_type: FrameType) -> Self {
        Self {
            frame_type,
            manufacturer_specific: false,
            direction: Direction::ToServer,
            disable_default_response: false,
        }
    }
}

impl PackFixed<FrameControl, Error> for FrameControl {
    const SIZE: usize = 1;

    fn pack<B: BufMut>(&self, data: &mut B) -> Result<(), Error> {
        if data.remaining_mut() < Self::SIZE {
            return Err(Error::NotEnoughSpace);
        }
        let mut value = u8::try_from(self.frame_type)? | u8::from(self.direction);
        if self.manufacturer_specific {
            value |= MANUFACTURER_SPECIFIC;
        }
        if self.disable_default_response {
            value |= DISABLE_DEFAULT_RESPONSE;
        }
        data.put_u8(value);
        Ok(())
    }

    fn unpack(data: &[u8]) -> Result<Self, Error> {
        let value = *data.first().ok_or(Error::WrongNumberOfBytes)?;
        Ok(Self {
            frame_type: FrameType::from(value),
            manufacturer_specific: value & MANUFACTURER_SPECIFIC == MANUFACTURER_SPECIFIC,
            direction: Direction::from(value),
            disable_default_response: value & DISABLE_DEFAULT_RESPONSE == DISABLE_DEFAULT_RESPONSE,
        })
    }
}

/// Cluster library frame header
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClusterLibraryHeader {
    /// Frame control, see `FrameControl`
    pub control: FrameControl,
    /// Optional manufacturer code for manufacturer specific clusters
    pub manufacturer: Option<u16>,
    /// Transaction sequence number
    pub transaction_sequence: u8,
    /// Command identifier
    pub command: u8,
}

impl Pack<ClusterLibraryHeader, Error> for ClusterLibraryHeader {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        let length = if self.manufacturer.is_some() { 5 } else { 3 };
        if data.remaining_mut() < length {
            return Err(Error::NotEnoughSpace);
        }
        let mut control = self.control;
        control.manufacturer_specific = self.manufacturer.is_some();
        control.pack(data)?;
        if let Some(manufacturer) = self.manufacturer {
            data.put_u16_le(manufacturer);
        }
        data.put_u8(self.transaction_sequence);
        data.put_u8(self.command);
        Ok(length)
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        if data.len() < 3 {
            return Err(Error::WrongNumberOfBytes);
        }
        let control = FrameControl::unpack(data)?;
        let mut offset = 1;
        let manufacturer = if control.manufacturer_specific {
            if data.len() < 5 {
                return Err(Error::WrongNumberOfBytes);
            }
            offset += 2;
            Some(u16::from_le_bytes([data[1], data[2]]))
        } else {
            None
        };
        let transaction_sequence = data[offset];
        let command = data[offset + 1];
        Ok((
            Self {
                control,
                manufacturer,
                transaction_sequence,
                command,
            },
            offset + 2,
        ))
    }
}
