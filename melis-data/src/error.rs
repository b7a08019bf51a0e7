//! # Error handling

use thiserror::Error;

/// Errors
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Not enough space for the operation
    #[error("not enough space")]
    NotEnoughSpace,
    /// Wrong number of bytes provided to the operation
    #[error("wrong number of bytes")]
    WrongNumberOfBytes,
    /// The value provided is invalid
    #[error("invalid value")]
    InvalidValue,
    /// The frame type is unknown
    #[error("unknown frame type")]
    UnknownFrameType,
    /// The attribute data type is unknown
    #[error("unknown attribute data type 0x{0:02x}")]
    UnknownDataType(u8),
    /// The attribute value is unsupported
    #[error("unsupported attribute value")]
    UnsupportedAttributeValue,
    /// The value does not match the type it is serialised as
    #[error("value does not match field type")]
    TypeMismatch,
    /// The value is outside the range of the field type
    #[error("value out of range")]
    ValueOutOfRange,
    /// The number of values does not match the number of schema fields
    #[error("expected {expected} values, got {actual}")]
    WrongNumberOfValues {
        /// Number of fields in the schema
        expected: usize,
        /// Number of values provided
        actual: usize,
    },
}
