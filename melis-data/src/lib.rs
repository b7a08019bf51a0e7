//! # Melis data - Z**bee wire formats
//!
//! This crate contains the wire formats used by a Z**bee coordinator host.
//!
//!

#![warn(missing_docs)]

#[macro_use]
mod utils;

pub mod cluster_library; // ZCL
pub mod common;
pub mod device_profile; // ZDP
pub mod error;
pub mod ezsp; // EmberZNet serial protocol
pub mod pack;
pub mod types;

pub use common::address::{ExtendedAddress, ExtendedPanIdentifier, NetworkAddress};
pub use error::Error;
