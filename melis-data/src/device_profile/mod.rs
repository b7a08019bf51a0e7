//! # Device Profile (ZDP)
//!
//! Only the parts used for endpoint discovery and binding are modelled. The
//! device profile transport itself lives outside this crate.

mod simple_descriptor;

pub use simple_descriptor::{SimpleDescriptor, SimpleDescriptorRequest, SimpleDescriptorResponse};

extended_enum!(
    /// Device profile cluster identifiers used for endpoint discovery and
    /// binding
    ClusterIdentifier, u16,
    /// Request the simple descriptor of another device
    SimpleDescriptorRequest => 0x0004,
    /// Request the active endpoints of another device
    ActiveEndpointRequest => 0x0005,
    /// Create a binding on another device
    BindRequest => 0x0021,
    /// Remove a binding on another device
    UnbindRequest => 0x0022,
);

extended_enum!(
    /// Response status codes
    Status, u8,
    /// Request succeeded
    Success => 0x00,
    /// The supplied request type was invalid
    InvalidRequestType => 0x80,
    /// The requested device cannot be found
    DeviceNotFound => 0x81,
    /// The provided endpoint is invalid (0x00 or 0xff)
    InvalidEndpoint => 0x82,
    /// Endpoint is not described by a simple descriptor
    NotActive => 0x83,
    /// The requested optional feature is not supported by this device
    NotSupported => 0x84,
    /// The request timed out
    Timeout => 0x85,
    /// Bind request was unsuccessful because the requested cluster was not found
    NoMatch => 0x86,
    /// Failed to unbind because lack of binding entries
    NoEntry => 0x88,
    /// The child descriptor is not available to the parent
    NoDescriptor => 0x89,
    /// The device do not have sufficient storage to support the request
    InsufficientSpace => 0x8a,
    /// The device could not complete the operation at this time
    NotPermitted => 0x8b,
    /// The device could not complete the operation since the table is full
    TableFull => 0x8c,
    /// The device was not authorised to complete the operation
    NotAuthorised => 0x8d,
    /// The device binding table is full
    DeviceBindingTableFull => 0x8e,
    /// The index is out of range
    InvalidIndex => 0x8f,
);
