//! # Endpoint
//!
//! An endpoint starts out as [`Status::New`] and learns its profile, device
//! type and clusters from the simple descriptor of the remote node.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use melis_data::common::DeviceType;
use melis_data::device_profile::Status as ManagementStatus;
use melis_data::ezsp::ApsFrame;
use melis_data::NetworkAddress;
use tracing::{info, warn};

use crate::cluster_library::{Cluster, DecodedFrame};
use crate::device::Device;
use crate::{lock, Error, Result};

/// Discovery state of an endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Not yet discovered
    New,
    /// Discovered through the simple descriptor
    Initialized,
}

struct State {
    status: Status,
    profile: u16,
    device_type: Option<DeviceType>,
    clusters: HashMap<u16, Arc<Cluster>>,
    output_clusters: Vec<u16>,
}

/// Endpoint of a remote device
pub struct Endpoint {
    device: Weak<Device>,
    nwk: NetworkAddress,
    endpoint: u8,
    state: Mutex<State>,
    this: Weak<Endpoint>,
}

impl Endpoint {
    pub(crate) fn new(device: Weak<Device>, nwk: NetworkAddress, endpoint: u8) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            device,
            nwk,
            endpoint,
            state: Mutex::new(State {
                status: Status::New,
                profile: 0,
                device_type: None,
                clusters: HashMap::new(),
                output_clusters: Vec::new(),
            }),
            this: this.clone(),
        })
    }

    /// Endpoint number
    pub fn endpoint(&self) -> u8 {
        self.endpoint
    }

    /// Network address of the owning device
    pub fn network_address(&self) -> NetworkAddress {
        self.nwk
    }

    pub(crate) fn downgrade(&self) -> Weak<Endpoint> {
        self.this.clone()
    }

    /// Discovery state
    pub fn status(&self) -> Status {
        lock(&self.state).status
    }

    /// Application profile, zero until initialized
    pub fn profile(&self) -> u16 {
        lock(&self.state).profile
    }

    /// Device type, `None` until initialized
    pub fn device_type(&self) -> Option<DeviceType> {
        lock(&self.state).device_type
    }

    /// Client clusters as advertised by the device
    pub fn output_clusters(&self) -> Vec<u16> {
        lock(&self.state).output_clusters.clone()
    }

    /// Identifiers of the server clusters, in ascending order
    pub fn clusters(&self) -> Vec<u16> {
        let mut clusters: Vec<u16> = lock(&self.state).clusters.keys().copied().collect();
        clusters.sort_unstable();
        clusters
    }

    /// Server cluster by identifier
    pub fn cluster(&self, cluster: u16) -> Option<Arc<Cluster>> {
        lock(&self.state).clusters.get(&cluster).cloned()
    }

    pub(crate) fn device(&self) -> Result<Arc<Device>> {
        self.device.upgrade().ok_or(Error::Detached)
    }

    /// Discover the endpoint through its simple descriptor
    ///
    /// A failure status from the device leaves the endpoint as `New`,
    /// retrying is up to the caller.
    pub async fn initialize(&self) -> Result<()> {
        if self.status() == Status::Initialized {
            return Ok(());
        }
        let device = self.device()?;
        let nwk = self.nwk;
        info!(%nwk, endpoint = self.endpoint, "Discovering endpoint");
        let response = device
            .management()
            .simple_descriptor(nwk, self.endpoint)
            .await?;
        if response.status != ManagementStatus::Success {
            warn!(
                %nwk,
                endpoint = self.endpoint,
                "Failed to discover endpoint, {:?}",
                response.status
            );
            return Ok(());
        }

        let descriptor = response.descriptor;
        let mut state = lock(&self.state);
        state.profile = descriptor.profile;
        state.device_type = Some(DeviceType::resolve(descriptor.profile, descriptor.device));
        for cluster in descriptor.input_clusters() {
            let kind = device.registry().resolve(*cluster);
            state
                .clusters
                .entry(*cluster)
                .or_insert_with(|| Cluster::new(self, *cluster, kind));
        }
        state.output_clusters = descriptor.output_clusters().to_vec();
        state.status = Status::Initialized;
        info!(
            %nwk,
            endpoint = self.endpoint,
            profile = state.profile,
            "Discovered endpoint with {} clusters",
            state.clusters.len()
        );
        Ok(())
    }

    /// Add a server cluster, an existing cluster with the same identifier
    /// is kept
    pub fn add_cluster(&self, cluster: u16) -> Result<Arc<Cluster>> {
        let kind = self.device()?.registry().resolve(cluster);
        Ok(lock(&self.state)
            .clusters
            .entry(cluster)
            .or_insert_with(|| Cluster::new(self, cluster, kind))
            .clone())
    }

    /// Addressing for a frame to a cluster of this endpoint
    pub fn get_aps(&self, cluster: u16) -> Result<ApsFrame> {
        let profile = {
            let state = lock(&self.state);
            if state.status != Status::Initialized {
                return Err(Error::NotInitialized(self.endpoint));
            }
            state.profile
        };
        let device = self.device()?;
        Ok(ApsFrame {
            profile,
            cluster,
            source_endpoint: self.endpoint,
            destination_endpoint: self.endpoint,
            options: device.options(),
            group: 0,
            sequence: device.next_sequence(),
        })
    }

    /// Route a received frame to the addressed cluster
    pub fn handle_request(&self, aps: &ApsFrame, frame: &DecodedFrame) {
        match self.cluster(aps.cluster) {
            Some(cluster) => cluster.handle_request(aps, frame),
            None => warn!(
                nwk = %self.nwk,
                endpoint = self.endpoint,
                cluster = aps.cluster,
                "Request on unknown cluster"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melis_data::common::HomeAutomationDevice;
    use melis_data::device_profile::{SimpleDescriptor, SimpleDescriptorResponse};
    use melis_data::ezsp::APS_OPTIONS_DEFAULT;
    use melis_data::{ExtendedAddress, NetworkAddress};

    use crate::cluster_library::Registry;
    use crate::device::ApplicationTransport;
    use crate::testing::{RecordingTransport, ScriptedManagement};

    const NWK: NetworkAddress = NetworkAddress::new(0x4321);

    fn device(management: ScriptedManagement) -> (Arc<Device>, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let link: Arc<dyn ApplicationTransport> = transport.clone();
        let device = Device::new(
            NWK,
            ExtendedAddress::new(0x0102_0304_0506_0708),
            Arc::downgrade(&link),
            Arc::new(management),
            Arc::new(Registry::with_defaults()),
        );
        (device, transport)
    }

    fn descriptor(profile: u16, device: u16) -> SimpleDescriptorResponse {
        SimpleDescriptorResponse::success_response(
            NWK,
            SimpleDescriptor::new(1, profile, device, 0, &[5], &[6]),
        )
    }

    #[tokio::test]
    async fn initialize() {
        let management = ScriptedManagement::default();
        management.push_descriptor(Ok(descriptor(0x0104, 0x0100)));
        let (device, _transport) = device(management);
        let endpoint = device.add_endpoint(1);
        assert_eq!(endpoint.status(), Status::New);

        endpoint.initialize().await.unwrap();
        assert_eq!(endpoint.status(), Status::Initialized);
        assert_eq!(endpoint.profile(), 0x0104);
        assert_eq!(
            endpoint.device_type(),
            Some(DeviceType::HomeAutomation(HomeAutomationDevice::OnOffLight))
        );
        assert_eq!(endpoint.clusters(), vec![5]);
        assert_eq!(endpoint.output_clusters(), vec![6]);
        assert_eq!(endpoint.cluster(5).unwrap().name(), "Scenes");
    }

    #[tokio::test]
    async fn initialize_other_profile() {
        let management = ScriptedManagement::default();
        management.push_descriptor(Ok(descriptor(0xc05e, 0x0100)));
        let (device, _transport) = device(management);
        let endpoint = device.add_endpoint(1);
        endpoint.initialize().await.unwrap();
        assert_eq!(endpoint.device_type(), Some(DeviceType::Raw(0x0100)));
    }

    #[tokio::test]
    async fn initialize_unknown_home_automation_device() {
        let management = ScriptedManagement::default();
        management.push_descriptor(Ok(descriptor(0x0104, 0xfffe)));
        let (device, _transport) = device(management);
        let endpoint = device.add_endpoint(1);
        endpoint.initialize().await.unwrap();
        assert_eq!(endpoint.device_type(), Some(DeviceType::Raw(0xfffe)));
    }

    #[tokio::test]
    async fn initialize_fail() {
        let management = ScriptedManagement::default();
        management.push_descriptor(Ok(SimpleDescriptorResponse::failure_response(
            NWK,
            ManagementStatus::NotActive,
        )));
        let (device, _transport) = device(management);
        let endpoint = device.add_endpoint(1);
        endpoint.initialize().await.unwrap();
        assert_eq!(endpoint.status(), Status::New);
        assert!(endpoint.clusters().is_empty());
    }

    #[tokio::test]
    async fn initialize_transport_failure() {
        let management = ScriptedManagement::default();
        management.push_descriptor(Err(Error::Timeout(std::time::Duration::from_secs(1))));
        let (device, _transport) = device(management);
        let endpoint = device.add_endpoint(1);
        assert!(matches!(endpoint.initialize().await, Err(Error::Timeout(_))));
        assert_eq!(endpoint.status(), Status::New);
    }

    #[tokio::test]
    async fn reinitialize_is_a_noop() {
        let management = Arc::new(ScriptedManagement::default());
        management.push_descriptor(Ok(descriptor(0x0104, 0x0100)));
        let transport: Arc<dyn ApplicationTransport> = Arc::new(RecordingTransport::default());
        let device = Device::new(
            NWK,
            ExtendedAddress::new(1),
            Arc::downgrade(&transport),
            management.clone(),
            Arc::new(Registry::with_defaults()),
        );
        let endpoint = device.add_endpoint(1);
        endpoint.initialize().await.unwrap();
        endpoint.initialize().await.unwrap();
        assert_eq!(management.descriptor_requests(), vec![(NWK, 1)]);
    }

    #[tokio::test]
    async fn get_aps() {
        let management = ScriptedManagement::default();
        management.push_descriptor(Ok(SimpleDescriptorResponse::success_response(
            NWK,
            SimpleDescriptor::new(55, 99, 0x0100, 0, &[], &[]),
        )));
        let (device, _transport) = device(management);
        let endpoint = device.add_endpoint(55);
        assert_eq!(endpoint.get_aps(255), Err(Error::NotInitialized(55)));

        endpoint.initialize().await.unwrap();
        let aps = endpoint.get_aps(255).unwrap();
        assert_eq!(aps.profile, 99);
        assert_eq!(aps.cluster, 255);
        assert_eq!(aps.source_endpoint, 55);
        assert_eq!(aps.destination_endpoint, 55);
        assert_eq!(aps.options, APS_OPTIONS_DEFAULT);
        assert_ne!(endpoint.get_aps(255).unwrap().sequence, aps.sequence);
    }

    #[test]
    fn add_cluster_keeps_existing() {
        let (device, _transport) = device(ScriptedManagement::default());
        let endpoint = device.add_endpoint(1);
        let first = endpoint.add_cluster(0x0006).unwrap();
        let second = endpoint.add_cluster(0x0006).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        let vendor = endpoint.add_cluster(0xfc00).unwrap();
        assert_eq!(vendor.identifier(), 0xfc00);
        assert_eq!(vendor.name(), "Generic");
    }
}
