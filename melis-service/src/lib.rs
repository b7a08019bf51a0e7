//! # Melis Service
//!
//! Devices, endpoints and clusters of a Zigbee network as seen from the
//! coordinator, on top of a EZSP network co-processor.
//!
//! Frames to and from the co-processor pass through a
//! [`transport::Multiplexer`]. The [`application::ControllerApplication`]
//! turns received messages into cluster library frames and routes them to
//! the [`device::Device`] that sent them.

#![warn(missing_docs)]

#[macro_use]
extern crate melis_data;

use std::sync::{Mutex, MutexGuard};

pub mod application;
pub mod cluster_library;
pub mod config;
pub mod device;
pub mod endpoint;
mod error;
pub mod logging;
pub mod transport;

#[cfg(test)]
mod testing;

pub use error::{Error, ProtocolWarning, Result};

/// Lock a mutex, a poisoned mutex is recovered
///
/// The protected state is updated in single steps, a panicking holder can
/// not leave it half written.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::debug!("Recovering poisoned lock");
            poisoned.into_inner()
        }
    }
}
