//! # Cluster library
//!
//! Cluster kinds and their registry, the frame codec and the cluster
//! instances bound to remote endpoints.

mod cluster;
pub mod clusters;
mod codec;
mod registry;

pub use cluster::{Cluster, ClusterHandler};
pub use codec::{deserialize, serialize, Arguments, CommandIdentifier, DecodedFrame};
pub use registry::{ClusterKind, Registry, GENERIC};
