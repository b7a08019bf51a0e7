//! # Common structs and functions
//!
//! Addresses, profile identifiers and device types shared by the other
//! sub-systems.

pub mod address;
pub mod device_type;
pub mod profile_identifier;

pub use device_type::{DeviceType, HomeAutomationDevice};
pub use profile_identifier::ProfileIdentifier;
