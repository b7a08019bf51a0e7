use byteorder::{ByteOrder, LittleEndian};
use bytes::BufMut;

use crate::common::address::NetworkAddress;
use crate::device_profile::Status;
use crate::pack::{Pack, PackFixed};
use crate::Error;

/// Simple descriptor for a node endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleDescriptor {
    /// Endpoint described
    pub endpoint: u8,
    /// Application profile identifier
    pub profile: u16,
    /// Device type within the profile
    pub device: u16,
    /// Device version, four bits
    pub device_version: u8,
    /// Server clusters implemented by the device
    pub input_clusters: Vec<u16>,
    /// Client clusters implemented by the device
    pub output_clusters: Vec<u16>,
}

impl SimpleDescriptor {
    /// Create a simple descriptor
    pub fn new(
        endpoint: u8,
        profile: u16,
        device: u16,
        device_version: u8,
        input_clusters: &[u16],
        output_clusters: &[u16],
    ) -> Self {
        Self {
            endpoint,
            profile,
            device,
            device_version: device_version & 0x0f,
            input_clusters: input_clusters.to_vec(),
            output_clusters: output_clusters.to_vec(),
        }
    }

    /// Server clusters implemented by the device
    pub fn input_clusters(&self) -> &[u16] {
        &self.input_clusters
    }

    /// Client clusters implemented by the device
    pub fn output_clusters(&self) -> &[u16] {
        &self.output_clusters
    }

    fn packed_size(&self) -> usize {
        8 + 2 * (self.input_clusters.len() + self.output_clusters.len())
    }
}

fn unpack_clusters(data: &[u8]) -> Result<(Vec<u16>, usize), Error> {
    let count = usize::from(*data.first().ok_or(Error::WrongNumberOfBytes)?);
    let end = 1 + 2 * count;
    if data.len() < end {
        return Err(Error::WrongNumberOfBytes);
    }
    let clusters = data[1..end].chunks_exact(2).map(LittleEndian::read_u16).collect();
    Ok((clusters, end))
}

fn pack_clusters<B: BufMut>(clusters: &[u16], data: &mut B) -> Result<(), Error> {
    let count = u8::try_from(clusters.len()).map_err(|_| Error::ValueOutOfRange)?;
    data.put_u8(count);
    for cluster in clusters {
        data.put_u16_le(*cluster);
    }
    Ok(())
}

impl Pack<SimpleDescriptor, Error> for SimpleDescriptor {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        let size = self.packed_size();
        if data.remaining_mut() < size {
            return Err(Error::NotEnoughSpace);
        }
        data.put_u8(self.endpoint);
        data.put_u16_le(self.profile);
        data.put_u16_le(self.device);
        data.put_u8(self.device_version & 0x0f);
        pack_clusters(&self.input_clusters, data)?;
        pack_clusters(&self.output_clusters, data)?;
        Ok(size)
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        if data.len() < 8 {
            return Err(Error::WrongNumberOfBytes);
        }
        let (input_clusters, used) = unpack_clusters(&data[6..])?;
        let mut offset = 6 + used;
        let (output_clusters, used) = unpack_clusters(&data[offset..])?;
        offset += used;
        Ok((
            Self {
                endpoint: data[0],
                profile: LittleEndian::read_u16(&data[1..3]),
                device: LittleEndian::read_u16(&data[3..5]),
                device_version: data[5] & 0x0f,
                input_clusters,
                output_clusters,
            },
            offset,
        ))
    }
}

/// Simple descriptor request
///
/// Requests the simple descriptor for a remote device endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimpleDescriptorRequest {
    /// Address of the device of interest
    pub address: NetworkAddress,
    /// Endpoint of interest
    pub endpoint: u8,
}

impl Pack<SimpleDescriptorRequest, Error> for SimpleDescriptorRequest {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        if data.remaining_mut() < 3 {
            return Err(Error::NotEnoughSpace);
        }
        self.address.pack(data)?;
        data.put_u8(self.endpoint);
        Ok(3)
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        if data.len() < 3 {
            return Err(Error::WrongNumberOfBytes);
        }
        let address = NetworkAddress::unpack(&data[0..2])?;
        Ok((
            Self {
                address,
                endpoint: data[2],
            },
            3,
        ))
    }
}

/// Simple descriptor response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleDescriptorResponse {
    /// Request status
    pub status: Status,
    /// Address of the device of interest
    pub address: NetworkAddress,
    /// Descriptor, empty unless the status is success
    pub descriptor: SimpleDescriptor,
}

impl SimpleDescriptorResponse {
    /// Successful response carrying a descriptor
    pub fn success_response(address: NetworkAddress, descriptor: SimpleDescriptor) -> Self {
        Self {
            status: Status::Success,
            address,
            descriptor,
        }
    }

    /// Failed response
    pub fn failure_response(address: NetworkAddress, status: Status) -> Self {
        Self {
            status,
            address,
            descriptor: SimpleDescriptor::default(),
        }
    }
}

impl Pack<SimpleDescriptorResponse, Error> for SimpleDescriptorResponse {
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, Error> {
        let length = if self.status == Status::Success {
            self.descriptor.packed_size()
        } else {
            0
        };
        let length_field = u8::try_from(length).map_err(|_| Error::ValueOutOfRange)?;
        if data.remaining_mut() < 4 + length {
            return Err(Error::NotEnoughSpace);
        }
        data.put_u8(self.status.into());
        self.address.pack(data)?;
        data.put_u8(length_field);
        if length > 0 {
            self.descriptor.pack(data)?;
        }
        Ok(4 + length)
    }

    fn unpack(data: &[u8]) -> Result<(Self, usize), Error> {
        if data.len() < 4 {
            return Err(Error::WrongNumberOfBytes);
        }
        let status = Status::try_from(data[0])?;
        let address = NetworkAddress::unpack(&data[1..3])?;
        let length = usize::from(data[3]);
        if data.len() < 4 + length {
            return Err(Error::WrongNumberOfBytes);
        }
        let (descriptor, used) = if status == Status::Success {
            SimpleDescriptor::unpack(&data[4..4 + length])?
        } else {
            (SimpleDescriptor::default(), 0)
        };
        Ok((
            Self {
                status,
                address,
                descriptor,
            },
            4 + used,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_simple_descriptor() {
        let data = [
            0x01, 0x04, 0x01, 0x02, 0x01, 0x01, 0x03, 0x00, 0x00, 0x06, 0x00, 0x00, 0x03, 0x02,
            0x19, 0x00, 0x0a, 0x00,
        ];
        let (descriptor, used) = SimpleDescriptor::unpack(&data[..]).unwrap();
        assert_eq!(used, data.len());
        assert_eq!(descriptor.endpoint, 0x01);
        assert_eq!(descriptor.profile, 0x0104);
        assert_eq!(descriptor.device, 0x0102);
        assert_eq!(descriptor.device_version, 0x01);
        assert_eq!(descriptor.input_clusters(), [0x0000, 0x0006, 0x0300]);
        assert_eq!(descriptor.output_clusters(), [0x0019, 0x000a]);

        assert_eq!(
            SimpleDescriptor::unpack(&data[..12]),
            Err(Error::WrongNumberOfBytes)
        );
    }

    #[test]
    fn simple_descriptor_request() {
        let (request, used) = SimpleDescriptorRequest::unpack(&[0x96, 0x1f, 0x01]).unwrap();
        assert_eq!(used, 3);
        assert_eq!(request.address, 0x1f96);
        assert_eq!(request.endpoint, 0x01);

        let request = SimpleDescriptorRequest {
            address: NetworkAddress::from(0x8001),
            endpoint: 0x0f,
        };
        let mut data = Vec::new();
        assert_eq!(request.pack(&mut data), Ok(3));
        assert_eq!(data, [0x01, 0x80, 0x0f]);
    }

    #[test]
    fn simple_descriptor_response() {
        let descriptor = SimpleDescriptor::new(
            0x02,
            0x0104,
            0x0100,
            0x01,
            &[0x0000, 0x0006],
            &[0x0019],
        );
        let response =
            SimpleDescriptorResponse::success_response(NetworkAddress::from(0x4a21), descriptor);

        let mut data = Vec::new();
        assert_eq!(response.pack(&mut data), Ok(18));
        assert_eq!(
            data,
            [
                0x00, 0x21, 0x4a, 14, 0x02, 0x04, 0x01, 0x00, 0x01, 0x01, 2, 0x00, 0x00, 0x06,
                0x00, 1, 0x19, 0x00
            ]
        );
        assert_eq!(SimpleDescriptorResponse::unpack(&data), Ok((response, 18)));
    }

    #[test]
    fn simple_descriptor_response_error() {
        let (response, used) = SimpleDescriptorResponse::unpack(&[0x82, 0x65, 0x87, 0x00]).unwrap();
        assert_eq!(used, 4);
        assert_eq!(response.status, Status::InvalidEndpoint);
        assert_eq!(response.address, 0x8765);

        let response = SimpleDescriptorResponse::failure_response(
            NetworkAddress::from(0xfffe),
            Status::NotActive,
        );
        let mut data = Vec::new();
        assert_eq!(response.pack(&mut data), Ok(4));
        assert_eq!(data, [0x83, 0xfe, 0xff, 0x00]);
    }
}
