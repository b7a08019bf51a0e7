//! # Device
//!
//! A remote node with its endpoints. Outbound frames leave through the
//! [`ApplicationTransport`], binding and discovery go through the
//! [`DeviceManagement`] layer.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, Weak};

use melis_data::device_profile::{SimpleDescriptorResponse, Status};
use melis_data::ezsp::{ApsFrame, APS_OPTIONS_DEFAULT};
use melis_data::{ExtendedAddress, NetworkAddress};
use tracing::{debug, warn};

use crate::cluster_library::{DecodedFrame, Registry};
use crate::endpoint::Endpoint;
use crate::{lock, Error, Result};

/// Boxed future returned by the collaborator traits
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Device profile requests towards remote nodes
pub trait DeviceManagement: Send + Sync {
    /// Request the simple descriptor of an endpoint
    fn simple_descriptor(
        &self,
        address: NetworkAddress,
        endpoint: u8,
    ) -> BoxFuture<'_, Result<SimpleDescriptorResponse>>;
    /// Bind a cluster of a remote endpoint to the coordinator
    fn bind(
        &self,
        address: NetworkAddress,
        endpoint: u8,
        cluster: u16,
    ) -> BoxFuture<'_, Result<Status>>;
    /// Remove a binding created with `bind`
    fn unbind(
        &self,
        address: NetworkAddress,
        endpoint: u8,
        cluster: u16,
    ) -> BoxFuture<'_, Result<Status>>;
}

/// Path for cluster library frames towards remote nodes
pub trait ApplicationTransport: Send + Sync {
    /// Send a frame and wait for the reply carrying the same transaction
    /// sequence number
    fn request(
        &self,
        address: NetworkAddress,
        aps: ApsFrame,
        data: Vec<u8>,
    ) -> BoxFuture<'_, Result<DecodedFrame>>;
}

/// Remote node
pub struct Device {
    network_address: NetworkAddress,
    extended_address: ExtendedAddress,
    transport: Weak<dyn ApplicationTransport>,
    management: Arc<dyn DeviceManagement>,
    registry: Arc<Registry>,
    options: u16,
    sequence: AtomicU8,
    endpoints: Mutex<HashMap<u8, Arc<Endpoint>>>,
    this: Weak<Device>,
}

impl Device {
    /// Create a device without endpoints
    pub fn new(
        network_address: NetworkAddress,
        extended_address: ExtendedAddress,
        transport: Weak<dyn ApplicationTransport>,
        management: Arc<dyn DeviceManagement>,
        registry: Arc<Registry>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            network_address,
            extended_address,
            transport,
            management,
            registry,
            options: APS_OPTIONS_DEFAULT,
            sequence: AtomicU8::new(0),
            endpoints: Mutex::new(HashMap::new()),
            this: this.clone(),
        })
    }

    /// Network address
    pub fn network_address(&self) -> NetworkAddress {
        self.network_address
    }

    /// IEEE address
    pub fn extended_address(&self) -> ExtendedAddress {
        self.extended_address
    }

    /// APS options for frames sent to this device
    pub fn options(&self) -> u16 {
        self.options
    }

    pub(crate) fn management(&self) -> &Arc<dyn DeviceManagement> {
        &self.management
    }

    pub(crate) fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Next APS sequence number, also used as transaction sequence number
    pub fn next_sequence(&self) -> u8 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    /// Add an endpoint, an existing endpoint with the same number is kept
    pub fn add_endpoint(&self, endpoint: u8) -> Arc<Endpoint> {
        lock(&self.endpoints)
            .entry(endpoint)
            .or_insert_with(|| Endpoint::new(self.this.clone(), self.network_address, endpoint))
            .clone()
    }

    /// Endpoint by number
    pub fn endpoint(&self, endpoint: u8) -> Option<Arc<Endpoint>> {
        lock(&self.endpoints).get(&endpoint).cloned()
    }

    /// Numbers of the known endpoints, in ascending order
    pub fn endpoints(&self) -> Vec<u8> {
        let mut numbers: Vec<u8> = lock(&self.endpoints).keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// Discover every endpoint that is not yet initialized
    pub async fn initialize(&self) -> Result<()> {
        let endpoints: Vec<Arc<Endpoint>> = lock(&self.endpoints).values().cloned().collect();
        for endpoint in endpoints {
            endpoint.initialize().await?;
        }
        Ok(())
    }

    /// Send a frame to the device and wait for its reply
    pub async fn request(&self, aps: ApsFrame, data: Vec<u8>) -> Result<DecodedFrame> {
        let transport = self.transport.upgrade().ok_or(Error::Detached)?;
        debug!(
            nwk = %self.network_address,
            endpoint = aps.destination_endpoint,
            cluster = aps.cluster,
            "Request {} bytes",
            data.len()
        );
        transport.request(self.network_address, aps, data).await
    }

    /// Route a frame received from the device
    pub fn handle_message(&self, aps: &ApsFrame, frame: &DecodedFrame) {
        match self.endpoint(aps.source_endpoint) {
            Some(endpoint) => endpoint.handle_request(aps, frame),
            None => warn!(
                nwk = %self.network_address,
                endpoint = aps.source_endpoint,
                "Message for unknown endpoint"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingTransport, ScriptedManagement};

    fn device(transport: &Arc<RecordingTransport>) -> Arc<Device> {
        let transport: Arc<dyn ApplicationTransport> = transport.clone();
        Device::new(
            NetworkAddress::new(0x1234),
            ExtendedAddress::new(0x0011_2233_4455_6677),
            Arc::downgrade(&transport),
            Arc::new(ScriptedManagement::default()),
            Arc::new(Registry::with_defaults()),
        )
    }

    #[test]
    fn endpoints_are_kept() {
        let transport = Arc::new(RecordingTransport::default());
        let device = device(&transport);
        let first = device.add_endpoint(3);
        let second = device.add_endpoint(3);
        device.add_endpoint(1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(device.endpoints(), vec![1, 3]);
        assert!(device.endpoint(2).is_none());
    }

    #[test]
    fn sequence_wraps() {
        let transport = Arc::new(RecordingTransport::default());
        let device = device(&transport);
        for expected in 0..=255u8 {
            assert_eq!(device.next_sequence(), expected);
        }
        assert_eq!(device.next_sequence(), 0);
    }

    #[tokio::test]
    async fn request_without_transport() {
        let device = {
            let transport = Arc::new(RecordingTransport::default());
            device(&transport)
        };
        let result = device.request(ApsFrame::default(), vec![0x00, 0x01, 0x00]).await;
        assert_eq!(result, Err(Error::Detached));
    }
}
