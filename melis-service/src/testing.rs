//! Recording and scripted collaborators for tests

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use melis_data::device_profile::{SimpleDescriptorResponse, Status};
use melis_data::ezsp::ApsFrame;
use melis_data::NetworkAddress;

use crate::cluster_library::DecodedFrame;
use crate::device::{ApplicationTransport, BoxFuture, DeviceManagement};
use crate::transport::Gateway;
use crate::{lock, Error, Result};

/// Gateway keeping every request
#[derive(Default)]
pub struct RecordingGateway {
    frames: Mutex<Vec<Vec<u8>>>,
    resets: Mutex<usize>,
    closed: Mutex<usize>,
}

impl RecordingGateway {
    pub fn frames(&self) -> Vec<Vec<u8>> {
        lock(&self.frames).clone()
    }

    pub fn resets(&self) -> usize {
        *lock(&self.resets)
    }

    pub fn closed(&self) -> usize {
        *lock(&self.closed)
    }
}

impl Gateway for RecordingGateway {
    fn send(&self, frame: Bytes) -> Result<()> {
        lock(&self.frames).push(frame.to_vec());
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        *lock(&self.resets) += 1;
        Ok(())
    }

    fn close(&self) {
        *lock(&self.closed) += 1;
    }
}

/// Device management answering from a script
///
/// Simple descriptor requests take the queued responses in order, binding
/// requests succeed unless a status is queued.
#[derive(Default)]
pub struct ScriptedManagement {
    descriptors: Mutex<VecDeque<Result<SimpleDescriptorResponse>>>,
    descriptor_requests: Mutex<Vec<(NetworkAddress, u8)>>,
    bindings: Mutex<VecDeque<Status>>,
    binding_requests: Mutex<Vec<(NetworkAddress, u8, u16)>>,
}

impl ScriptedManagement {
    pub fn push_descriptor(&self, response: Result<SimpleDescriptorResponse>) {
        lock(&self.descriptors).push_back(response);
    }

    pub fn push_binding(&self, status: Status) {
        lock(&self.bindings).push_back(status);
    }

    pub fn descriptor_requests(&self) -> Vec<(NetworkAddress, u8)> {
        lock(&self.descriptor_requests).clone()
    }

    pub fn bindings(&self) -> Vec<(NetworkAddress, u8, u16)> {
        lock(&self.binding_requests).clone()
    }

    fn binding(&self, address: NetworkAddress, endpoint: u8, cluster: u16) -> Result<Status> {
        lock(&self.binding_requests).push((address, endpoint, cluster));
        Ok(lock(&self.bindings).pop_front().unwrap_or(Status::Success))
    }
}

impl DeviceManagement for ScriptedManagement {
    fn simple_descriptor(
        &self,
        address: NetworkAddress,
        endpoint: u8,
    ) -> BoxFuture<'_, Result<SimpleDescriptorResponse>> {
        lock(&self.descriptor_requests).push((address, endpoint));
        let response = lock(&self.descriptors)
            .pop_front()
            .unwrap_or(Ok(SimpleDescriptorResponse::failure_response(
                address,
                Status::DeviceNotFound,
            )));
        Box::pin(async move { response })
    }

    fn bind(
        &self,
        address: NetworkAddress,
        endpoint: u8,
        cluster: u16,
    ) -> BoxFuture<'_, Result<Status>> {
        let status = self.binding(address, endpoint, cluster);
        Box::pin(async move { status })
    }

    fn unbind(
        &self,
        address: NetworkAddress,
        endpoint: u8,
        cluster: u16,
    ) -> BoxFuture<'_, Result<Status>> {
        let status = self.binding(address, endpoint, cluster);
        Box::pin(async move { status })
    }
}

/// Application transport keeping every request and answering from a script
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<(NetworkAddress, ApsFrame, Vec<u8>)>>,
    replies: Mutex<VecDeque<Result<DecodedFrame>>>,
}

impl RecordingTransport {
    pub fn push_reply(&self, reply: Result<DecodedFrame>) {
        lock(&self.replies).push_back(reply);
    }

    pub fn requests(&self) -> Vec<(NetworkAddress, ApsFrame, Vec<u8>)> {
        lock(&self.requests).clone()
    }
}

impl ApplicationTransport for RecordingTransport {
    fn request(
        &self,
        address: NetworkAddress,
        aps: ApsFrame,
        data: Vec<u8>,
    ) -> BoxFuture<'_, Result<DecodedFrame>> {
        lock(&self.requests).push((address, aps, data));
        let reply = lock(&self.replies).pop_front().unwrap_or(Err(Error::Closed));
        Box::pin(async move { reply })
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        lock(&self.0).extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber collecting every log line it emits
pub fn captured_logs<F: FnOnce()>(f: F) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8_lossy(&lock(&buffer.0)).into_owned();
    text
}
