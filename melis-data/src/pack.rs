//! # Traits for handling packing and unpacking
//!
//! Packing appends to any `bytes::BufMut`, unpacking reads from a byte slice
//! and reports how many bytes were consumed.

use bytes::BufMut;

/// Packing of data of fixed size
pub trait PackFixed<T, E> {
    /// Number of bytes used on the wire
    const SIZE: usize;
    /// Serialise into buffer, returning if there was an error
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<(), E>;
    /// De-serialise from buffer, returning object or error
    fn unpack(data: &[u8]) -> Result<T, E>;
}

/// Packing of data with variable size
pub trait Pack<T, E> {
    /// Serialise into buffer, returning number of bytes written or error
    fn pack<B: BufMut>(&self, data: &mut B) -> Result<usize, E>;
    /// De-serialise from buffer, returning object and number of bytes used
    /// or error
    fn unpack(data: &[u8]) -> Result<(T, usize), E>;
}
