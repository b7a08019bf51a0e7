//! # Controller application
//!
//! Glue between the devices and the network co-processor. Cluster library
//! frames are sent with `sendUnicast`, received frames arrive as
//! `incomingMessageHandler` callbacks. Replies are matched to requests by
//! sender and transaction sequence number, everything else is routed to the
//! device that sent it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use melis_data::cluster_library::ClusterLibraryHeader;
use melis_data::common::ProfileIdentifier;
use melis_data::ezsp::{ApsFrame, OutgoingMessageType, ScanType, EMBER_SUCCESS};
use melis_data::pack::Pack;
use melis_data::types::Value;
use melis_data::{ExtendedAddress, NetworkAddress};
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::cluster_library::{deserialize, DecodedFrame, Registry};
use crate::config::ClusterLibraryConfig;
use crate::device::{ApplicationTransport, BoxFuture, Device, DeviceManagement};
use crate::transport::{Callback, ListenerId, ListenerResult, Multiplexer, Response};
use crate::{lock, Error, Result};

/// Network found during an active scan
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkFound {
    /// Network description as reported by the co-processor
    pub network: Vec<Value>,
    /// Link quality of the beacon
    pub last_hop_lqi: u8,
    /// Signal strength of the beacon in dBm
    pub last_hop_rssi: i8,
}

/// Coordinator side of the network
pub struct ControllerApplication {
    multiplexer: Multiplexer,
    registry: Arc<Registry>,
    management: Arc<dyn DeviceManagement>,
    config: ClusterLibraryConfig,
    devices: Mutex<HashMap<NetworkAddress, Arc<Device>>>,
    pending: Mutex<HashMap<(NetworkAddress, u8), oneshot::Sender<DecodedFrame>>>,
    listener: ListenerId,
    this: Weak<ControllerApplication>,
}

impl ControllerApplication {
    /// Create the application and start listening for incoming messages
    pub fn new(
        multiplexer: Multiplexer,
        registry: Arc<Registry>,
        management: Arc<dyn DeviceManagement>,
        config: ClusterLibraryConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let application = this.clone();
            let listener = multiplexer.add_listener(move |callback: &Callback| {
                match application.upgrade() {
                    Some(application) => application.handle_callback(callback),
                    None => Ok(()),
                }
            });
            Self {
                multiplexer,
                registry,
                management,
                config,
                devices: Mutex::new(HashMap::new()),
                pending: Mutex::new(HashMap::new()),
                listener,
                this: this.clone(),
            }
        })
    }

    /// The multiplexer used to reach the co-processor
    pub fn multiplexer(&self) -> &Multiplexer {
        &self.multiplexer
    }

    /// Cluster kinds used to decode frames
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Add a device, an existing device with the same address is kept
    pub fn add_device(&self, nwk: NetworkAddress, ieee: ExtendedAddress) -> Arc<Device> {
        let transport: Weak<dyn ApplicationTransport> = self.this.clone();
        lock(&self.devices)
            .entry(nwk)
            .or_insert_with(|| {
                info!(%nwk, %ieee, "New device");
                Device::new(
                    nwk,
                    ieee,
                    transport,
                    self.management.clone(),
                    self.registry.clone(),
                )
            })
            .clone()
    }

    /// Device by network address
    pub fn device(&self, nwk: NetworkAddress) -> Option<Arc<Device>> {
        lock(&self.devices).get(&nwk).cloned()
    }

    /// Remove a device, returns the removed device
    pub fn remove_device(&self, nwk: NetworkAddress) -> Option<Arc<Device>> {
        lock(&self.devices).remove(&nwk)
    }

    /// Number of cluster library requests waiting for a reply
    pub fn pending_requests(&self) -> usize {
        let mut pending = lock(&self.pending);
        pending.retain(|_, sender| !sender.is_closed());
        pending.len()
    }

    /// Allow devices to join for `duration` seconds, 0xff for no limit
    pub async fn permit_joining(&self, duration: u8) -> Result<()> {
        let response = self
            .multiplexer
            .command("permitJoining", &[Value::Unsigned(u64::from(duration))])
            .await?;
        check_status(&response)
    }

    /// Scan for networks on the channels of `channel_mask`
    pub async fn scan_networks(
        &self,
        channel_mask: u32,
        duration: u8,
    ) -> Result<Vec<NetworkFound>> {
        let found = self
            .multiplexer
            .streaming_command(
                "startScan",
                &["networkFoundHandler"],
                "scanCompleteHandler",
                &scan_arguments(ScanType::Active, channel_mask, duration),
            )
            .await?;
        found
            .into_iter()
            .map(|args| match args.as_slice() {
                [Value::Record(network), lqi, rssi] => Ok(NetworkFound {
                    network: network.clone(),
                    last_hop_lqi: lqi
                        .as_u64()
                        .and_then(|lqi| u8::try_from(lqi).ok())
                        .ok_or(Error::UnexpectedReply)?,
                    last_hop_rssi: rssi
                        .as_i64()
                        .and_then(|rssi| i8::try_from(rssi).ok())
                        .ok_or(Error::UnexpectedReply)?,
                }),
                _ => Err(Error::UnexpectedReply),
            })
            .collect()
    }

    /// Measure the energy on the channels of `channel_mask`
    ///
    /// Returns the channel and the highest signal strength in dBm seen on
    /// it.
    pub async fn energy_scan(&self, channel_mask: u32, duration: u8) -> Result<Vec<(u8, i8)>> {
        let results = self
            .multiplexer
            .streaming_command(
                "startScan",
                &["energyScanResultHandler"],
                "scanCompleteHandler",
                &scan_arguments(ScanType::Energy, channel_mask, duration),
            )
            .await?;
        results
            .into_iter()
            .map(|args| {
                let channel = args
                    .first()
                    .and_then(Value::as_u64)
                    .and_then(|channel| u8::try_from(channel).ok());
                let rssi = args
                    .get(1)
                    .and_then(Value::as_i64)
                    .and_then(|rssi| i8::try_from(rssi).ok());
                channel.zip(rssi).ok_or(Error::UnexpectedReply)
            })
            .collect()
    }

    /// Stop listening and close the multiplexer
    pub fn close(&self) {
        self.multiplexer.remove_listener(self.listener);
        lock(&self.pending).clear();
        self.multiplexer.close();
    }

    fn handle_callback(&self, callback: &Callback) -> ListenerResult {
        if callback.name != "incomingMessageHandler" {
            return Ok(());
        }
        let aps = callback
            .field("aps_frame")
            .ok_or(Error::UnexpectedReply)
            .and_then(|value| ApsFrame::try_from(value).map_err(Error::from))?;
        let sender = callback
            .field("sender")
            .and_then(Value::as_u64)
            .and_then(|sender| u16::try_from(sender).ok())
            .map(NetworkAddress::from)
            .ok_or(Error::UnexpectedReply)?;
        let message = callback
            .field("message")
            .and_then(Value::as_octets)
            .ok_or(Error::UnexpectedReply)?;
        self.handle_message(sender, &aps, message);
        Ok(())
    }

    /// Handle a message received from a device
    pub fn handle_message(&self, sender: NetworkAddress, aps: &ApsFrame, message: &[u8]) {
        if aps.profile != ProfileIdentifier::HomeAutomation {
            debug!(
                nwk = %sender,
                profile = aps.profile,
                cluster = aps.cluster,
                "Ignoring message for other profile"
            );
            return;
        }
        let frame = match deserialize(&self.registry, aps, message) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(nwk = %sender, cluster = aps.cluster, "Failed to decode message, {}", e);
                return;
            }
        };
        if frame.is_reply {
            let waiting = lock(&self.pending).remove(&(sender, frame.sequence()));
            if let Some(reply) = waiting {
                if let Err(frame) = reply.send(frame) {
                    debug!(
                        sequence = frame.sequence(),
                        "Reply arrived after the request was abandoned"
                    );
                }
                return;
            }
        }
        match self.device(sender) {
            Some(device) => device.handle_message(aps, &frame),
            None => warn!(nwk = %sender, cluster = aps.cluster, "Message from unknown device"),
        }
    }

    async fn send_request(
        &self,
        nwk: NetworkAddress,
        aps: ApsFrame,
        data: Vec<u8>,
    ) -> Result<DecodedFrame> {
        let (header, _) = ClusterLibraryHeader::unpack(&data)?;
        let key = (nwk, header.transaction_sequence);
        let (sender, receiver) = oneshot::channel();
        {
            let mut pending = lock(&self.pending);
            pending.retain(|_, sender| !sender.is_closed());
            if pending.contains_key(&key) {
                warn!(
                    %nwk,
                    sequence = header.transaction_sequence,
                    "Sequence number already waiting for a reply"
                );
                return Err(Error::NoFreeSequence);
            }
            pending.insert(key, sender);
        }

        let args = [
            Value::Unsigned(u64::from(u8::from(OutgoingMessageType::Direct))),
            Value::Unsigned(u64::from(u16::from(nwk))),
            Value::from(&aps),
            Value::Unsigned(u64::from(aps.sequence)),
            Value::Octets(data),
        ];
        let response = match self.multiplexer.command("sendUnicast", &args).await {
            Ok(response) => response,
            Err(e) => {
                lock(&self.pending).remove(&key);
                return Err(e);
            }
        };
        if let Err(e) = check_status(&response) {
            lock(&self.pending).remove(&key);
            return Err(e);
        }

        let reply_timeout = self.config.reply_timeout();
        match timeout(reply_timeout, receiver).await {
            Ok(Ok(frame)) => Ok(frame),
            Ok(Err(_)) => Err(Error::Closed),
            Err(_) => {
                lock(&self.pending).remove(&key);
                Err(Error::Timeout(reply_timeout))
            }
        }
    }
}

impl Drop for ControllerApplication {
    fn drop(&mut self) {
        self.multiplexer.remove_listener(self.listener);
    }
}

impl ApplicationTransport for ControllerApplication {
    fn request(
        &self,
        address: NetworkAddress,
        aps: ApsFrame,
        data: Vec<u8>,
    ) -> BoxFuture<'_, Result<DecodedFrame>> {
        Box::pin(self.send_request(address, aps, data))
    }
}

fn scan_arguments(scan_type: ScanType, channel_mask: u32, duration: u8) -> [Value; 3] {
    [
        Value::Unsigned(u64::from(u8::from(scan_type))),
        Value::Unsigned(u64::from(channel_mask)),
        Value::Unsigned(u64::from(duration)),
    ]
}

fn check_status(response: &Response) -> Result<()> {
    match response.status() {
        Some(EMBER_SUCCESS) | None => Ok(()),
        Some(status) => Err(Error::CommandRejected {
            command: response.name.to_string(),
            status,
        }),
    }
}
