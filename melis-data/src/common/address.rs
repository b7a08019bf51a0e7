//! # Addresses used in the network

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use bytes::BufMut;

use crate::pack::PackFixed;
use crate::Error;

/// Network address, broadcast address
pub const NETWORK_ADDRESS_BROADCAST: u16 = 0xffff;
/// Network address, unassigned address
///
/// The device has joined a network but has not been assigned a address.
pub const NETWORK_ADDRESS_UNASSIGNED: u16 = 0xfffe;

/// 16-bit network address of a node
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkAddress(u16);

impl NetworkAddress {
    /// Create a network address from its numeric value
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// The broadcast address
    pub const fn broadcast() -> Self {
        Self(NETWORK_ADDRESS_BROADCAST)
    }

    /// Check if this is the broadcast address
    pub fn is_broadcast(self) -> bool {
        self.0 == NETWORK_ADDRESS_BROADCAST
    }

    /// Check if this is a regular, assigned address
    pub fn is_assigned(self) -> bool {
        self.0 < NETWORK_ADDRESS_UNASSIGNED
    }
}

impl PackFixed<NetworkAddress, Error> for NetworkAddress {
    const SIZE: usize = 2;

    fn pack<B: BufMut>(&self, data: &mut B) -> Result<(), Error> {
        if data.remaining_mut() < Self::SIZE {
            return Err(Error::NotEnoughSpace);
        }
        data.put_u16_le(self.0);
        Ok(())
    }

    fn unpack(data: &[u8]) -> Result<Self, Error> {
        if data.len() < Self::SIZE {
            return Err(Error::WrongNumberOfBytes);
        }
        Ok(Self(LittleEndian::read_u16(&data[..Self::SIZE])))
    }
}

impl From<u16> for NetworkAddress {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<NetworkAddress> for u16 {
    fn from(value: NetworkAddress) -> Self {
        value.0
    }
}

impl PartialEq<u16> for NetworkAddress {
    fn eq(&self, other: &u16) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

/// 64-bit IEEE address of a node
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtendedAddress(u64);

impl ExtendedAddress {
    /// Create a extended address from its numeric value
    pub const fn new(address: u64) -> Self {
        Self(address)
    }

    /// The broadcast address
    pub const fn broadcast() -> Self {
        Self(0xffff_ffff_ffff_ffff)
    }

    /// Check if this is the broadcast address
    pub fn is_broadcast(self) -> bool {
        self.0 == 0xffff_ffff_ffff_ffff
    }
}

impl PackFixed<ExtendedAddress, Error> for ExtendedAddress {
    const SIZE: usize = 8;

    fn pack<B: BufMut>(&self, data: &mut B) -> Result<(), Error> {
        if data.remaining_mut() < Self::SIZE {
            return Err(Error::NotEnoughSpace);
        }
        data.put_u64_le(self.0);
        Ok(())
    }

    fn unpack(data: &[u8]) -> Result<Self, Error> {
        if data.len() < Self::SIZE {
            return Err(Error::WrongNumberOfBytes);
        }
        Ok(Self(LittleEndian::read_u64(&data[..Self::SIZE])))
    }
}

impl From<u64> for ExtendedAddress {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ExtendedAddress> for u64 {
    fn from(value: ExtendedAddress) -> Self {
        value.0
    }
}

impl PartialEq<u64> for ExtendedAddress {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl Default for ExtendedAddress {
    fn default() -> Self {
        Self::broadcast()
    }
}

impl fmt::Display for ExtendedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let octets = self.0.to_be_bytes();
        for (n, octet) in octets.iter().enumerate() {
            if n > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", octet)?;
        }
        Ok(())
    }
}

/// 64-bit extended personal area network (PAN) identifier
pub type ExtendedPanIdentifier = ExtendedAddress;
