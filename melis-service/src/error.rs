use std::time::Duration;

use melis_data::device_profile::Status;
use thiserror::Error;

/// Errors
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// No cluster with this identifier on the endpoint
    #[error("unknown cluster 0x{0:04x}")]
    UnknownCluster(u16),
    /// No endpoint with this number on the device
    #[error("unknown endpoint {0}")]
    UnknownEndpoint(u8),
    /// The command name is not in the command table
    #[error("unknown command {0}")]
    UnknownCommand(String),
    /// The attribute is not in the attribute table of the cluster
    #[error("unknown attribute 0x{0:04x}")]
    UnknownAttribute(u16),
    /// The value can not be represented as the declared attribute type
    #[error("invalid value for attribute 0x{0:04x}")]
    InvalidAttributeValue(u16),
    /// The endpoint has not completed discovery
    #[error("endpoint {0} is not initialized")]
    NotInitialized(u8),
    /// The network co-processor answered with a failure status
    #[error("command {command} failed with status 0x{status:02x}")]
    CommandRejected {
        /// Command name
        command: String,
        /// Status reported
        status: u8,
    },
    /// A callback of a streaming command reported a failure
    #[error("command {command} stream failed with status 0x{status:02x}")]
    StreamFailed {
        /// Command name
        command: String,
        /// Status reported
        status: u8,
    },
    /// The device management request failed
    #[error("device management request failed, {0:?}")]
    DeviceManagement(Status),
    /// No reply within the time limit
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    /// All sequence numbers are in use
    #[error("no free sequence number")]
    NoFreeSequence,
    /// The transport was closed
    #[error("transport closed")]
    Closed,
    /// The owning endpoint or device no longer exists
    #[error("detached from device")]
    Detached,
    /// The gateway failed to transmit
    #[error("gateway error, {0}")]
    Gateway(String),
    /// Invalid configuration
    #[error("configuration error, {0}")]
    Config(String),
    /// The reply does not have the expected shape
    #[error("unexpected reply")]
    UnexpectedReply,
    /// Wire format error
    #[error(transparent)]
    Data(#[from] melis_data::Error),
}

/// Result with the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Protocol anomalies that are logged and otherwise ignored
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProtocolWarning {
    /// Cluster-specific frame for a cluster without a registered kind
    #[error("ignoring unknown cluster 0x{0:04x}")]
    UnknownCluster(u16),
    /// Cluster-specific command not in the cluster's command table
    #[error("unknown cluster-specific command 0x{command:02x} for cluster 0x{cluster:04x}")]
    UnknownClusterCommand {
        /// Cluster identifier
        cluster: u16,
        /// Command identifier
        command: u8,
    },
    /// General command not in the foundation command table
    #[error("unknown foundation command 0x{0:02x}")]
    UnknownFoundationCommand(u8),
    /// Payload of a known command could not be decoded
    #[error("malformed payload for command 0x{command:02x}, {error}")]
    MalformedPayload {
        /// Command identifier
        command: u8,
        /// Decoding error
        error: melis_data::Error,
    },
    /// Bytes left over after decoding a payload
    #[error("{count} bytes remain after deserializing frame")]
    TrailingBytes {
        /// Number of bytes not consumed
        count: usize,
    },
    /// Reply for a request that is no longer pending
    #[error("unexpected response for {name} with sequence {sequence}")]
    DuplicateResolution {
        /// Command name
        name: &'static str,
        /// Transport sequence number
        sequence: u8,
    },
    /// Frame identifier not in the command table
    #[error("unknown frame 0x{0:02x}")]
    UnknownFrame(u8),
    /// Frame shorter than its header or with an undecodable payload
    #[error("malformed frame, {0}")]
    MalformedFrame(melis_data::Error),
}
