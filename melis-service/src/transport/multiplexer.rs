use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use bytes::{BufMut, BytesMut};
use melis_data::ezsp::{self, CommandDefinition, FrameHeader};
use melis_data::pack::PackFixed;
use melis_data::types::{self, Schema, Value};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::config::TransportConfig;
use crate::error::ProtocolWarning;
use crate::transport::Gateway;
use crate::{lock, Error, Result};

/// Identifier of a registered listener, unique for the multiplexer
pub type ListenerId = u64;

/// Outcome of a listener invocation, failures are logged
pub type ListenerResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Callback listener
pub type Listener = Arc<dyn Fn(&Callback) -> ListenerResult + Send + Sync>;

fn status_of(schema: Schema, args: &[Value]) -> Option<u8> {
    types::field(schema, args, "status")
        .and_then(Value::as_u64)
        .and_then(|status| u8::try_from(status).ok())
}

/// Decoded response to a command
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    /// Command name
    pub name: &'static str,
    /// Response parameters, one per schema field
    pub args: Vec<Value>,
    schema: Schema,
}

impl Response {
    /// Value of a named parameter
    pub fn field(&self, name: &str) -> Option<&Value> {
        types::field(self.schema, &self.args, name)
    }

    /// Value of the `status` parameter, if the response has one
    pub fn status(&self) -> Option<u8> {
        status_of(self.schema, &self.args)
    }
}

/// Decoded callback frame
#[derive(Clone, Debug, PartialEq)]
pub struct Callback {
    /// Callback name
    pub name: &'static str,
    /// Frame identifier
    pub frame_id: u8,
    /// Callback parameters, one per schema field
    pub args: Vec<Value>,
    schema: Schema,
}

impl Callback {
    /// Create a callback from its definition and decoded parameters
    pub fn new(definition: &'static CommandDefinition, args: Vec<Value>) -> Self {
        Self {
            name: definition.name,
            frame_id: definition.frame_id,
            args,
            schema: definition.response,
        }
    }

    /// Value of a named parameter
    pub fn field(&self, name: &str) -> Option<&Value> {
        types::field(self.schema, &self.args, name)
    }

    /// Value of the `status` parameter, if the callback has one
    pub fn status(&self) -> Option<u8> {
        status_of(self.schema, &self.args)
    }
}

/// What happened to a received frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameDisposition {
    /// Completed a pending request
    Resolved,
    /// Delivered to the callback listeners
    Delivered,
    /// Logged and dropped
    Ignored(ProtocolWarning),
}

struct Pending {
    request: u64,
    frame_id: u8,
    schema: Schema,
    sender: oneshot::Sender<Result<Vec<Value>>>,
}

#[derive(Default)]
struct State {
    sequence: u8,
    next_request: u64,
    pending: HashMap<u8, Pending>,
    next_listener: ListenerId,
    listeners: Vec<(ListenerId, Listener)>,
    closed: bool,
}

impl State {
    /// Next sequence number not used by a pending request
    fn allocate_sequence(&mut self) -> Result<u8> {
        for offset in 0..=u8::MAX {
            let candidate = self.sequence.wrapping_add(offset);
            if !self.pending.contains_key(&candidate) {
                self.sequence = candidate.wrapping_add(1);
                return Ok(candidate);
            }
        }
        Err(Error::NoFreeSequence)
    }
}

struct Inner {
    gateway: Arc<dyn Gateway>,
    config: TransportConfig,
    state: Mutex<State>,
}

/// Shares one gateway between concurrent commands
///
/// Every command gets a sequence number that is unique among the pending
/// commands. Responses are matched on sequence number and frame identifier,
/// everything else that is a known callback goes to the listeners.
#[derive(Clone)]
pub struct Multiplexer {
    inner: Arc<Inner>,
}

impl Multiplexer {
    /// Create a multiplexer on top of a gateway
    pub fn new(gateway: Arc<dyn Gateway>, config: TransportConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                gateway,
                config,
                state: Mutex::new(State::default()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        lock(&self.inner.state)
    }

    /// Transport settings
    pub fn config(&self) -> &TransportConfig {
        &self.inner.config
    }

    /// Send a command, returning a handle to its response
    ///
    /// Nothing is transmitted if the name is unknown or the arguments do not
    /// match the command parameters.
    pub fn send(&self, name: &str, args: &[Value]) -> Result<PendingReply> {
        let definition = ezsp::command(name)
            .filter(|definition| !definition.is_callback())
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;

        let mut parameters = Vec::new();
        types::encode(args, definition.parameters, &mut parameters)?;

        let (sender, receiver) = oneshot::channel();
        let (sequence, request) = {
            let mut state = self.state();
            if state.closed {
                return Err(Error::Closed);
            }
            let sequence = state.allocate_sequence()?;
            let request = state.next_request;
            state.next_request += 1;
            state.pending.insert(
                sequence,
                Pending {
                    request,
                    frame_id: definition.frame_id,
                    schema: definition.response,
                    sender,
                },
            );
            (sequence, request)
        };
        let reply = PendingReply {
            inner: Arc::clone(&self.inner),
            definition,
            sequence,
            request,
            receiver: Some(receiver),
        };

        let mut frame = BytesMut::with_capacity(FrameHeader::SIZE + parameters.len());
        FrameHeader::command(sequence, definition.frame_id).pack(&mut frame)?;
        frame.put_slice(&parameters);
        debug!(command = definition.name, sequence, "Send {} bytes", frame.len());
        self.inner.gateway.send(frame.freeze())?;
        Ok(reply)
    }

    /// Send a command and wait for its response
    pub async fn command(&self, name: &str, args: &[Value]) -> Result<Response> {
        self.send(name, args)?.wait().await
    }

    /// Send a command whose results arrive as callbacks
    ///
    /// Collects the parameters of every `handlers` callback until the
    /// `terminal` callback arrives. A non-zero status in the response fails
    /// the command without waiting. A non-zero status in the terminal
    /// callback, or in a collected callback, fails the whole stream.
    pub async fn streaming_command(
        &self,
        name: &str,
        handlers: &[&str],
        terminal: &str,
        args: &[Value],
    ) -> Result<Vec<Vec<Value>>> {
        let callback_name = |name: &str| {
            ezsp::command(name)
                .filter(|definition| definition.is_callback())
                .map(|definition| definition.name)
                .ok_or_else(|| Error::UnknownCommand(name.to_string()))
        };
        let handlers = handlers
            .iter()
            .map(|name| callback_name(*name))
            .collect::<Result<Vec<_>>>()?;
        let terminal = callback_name(terminal)?;

        let (sender, mut receiver) = mpsc::unbounded_channel();
        let id = self.add_listener(move |callback: &Callback| {
            if callback.name == terminal || handlers.contains(&callback.name) {
                sender.send(callback.clone())?;
            }
            Ok(())
        });
        let _guard = ListenerGuard {
            multiplexer: self,
            id,
        };

        let response = self.command(name, args).await?;
        if let Some(status) = response.status().filter(|status| *status != 0) {
            return Err(Error::CommandRejected {
                command: name.to_string(),
                status,
            });
        }

        let stream_timeout = self.inner.config.stream_timeout();
        let collect = async {
            let mut results = Vec::new();
            while let Some(callback) = receiver.recv().await {
                if let Some(status) = callback.status().filter(|status| *status != 0) {
                    return Err(Error::StreamFailed {
                        command: name.to_string(),
                        status,
                    });
                }
                if callback.name == terminal {
                    return Ok(results);
                }
                results.push(callback.args);
            }
            Err(Error::Closed)
        };
        match tokio::time::timeout(stream_timeout, collect).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(stream_timeout)),
        }
    }

    /// Handle a frame received from the gateway
    pub fn on_frame_received(&self, data: &[u8]) -> FrameDisposition {
        let (header, parameters) = match FrameHeader::split(data) {
            Ok(split) => split,
            Err(e) => return ignore(ProtocolWarning::MalformedFrame(e)),
        };

        let pending = {
            let mut state = self.state();
            match state.pending.get(&header.sequence) {
                Some(pending) if pending.frame_id == header.frame_id => {
                    state.pending.remove(&header.sequence)
                }
                _ => None,
            }
        };
        if let Some(pending) = pending {
            debug!(
                sequence = header.sequence,
                frame_id = header.frame_id,
                "Received response"
            );
            let result = decode_parameters(parameters, pending.schema).map_err(Error::from);
            if let Err(e) = &result {
                warn!(sequence = header.sequence, "Failed to decode response, {}", e);
            }
            // The requester may have given up already
            let _ = pending.sender.send(result);
            return FrameDisposition::Resolved;
        }

        let definition = match ezsp::command_by_id(header.frame_id) {
            Some(definition) => definition,
            None => return ignore(ProtocolWarning::UnknownFrame(header.frame_id)),
        };
        if !definition.is_callback() {
            return ignore(ProtocolWarning::DuplicateResolution {
                name: definition.name,
                sequence: header.sequence,
            });
        }
        match decode_parameters(parameters, definition.response) {
            Ok(args) => {
                debug!(callback = definition.name, "Received callback");
                self.deliver_callback(&Callback::new(definition, args));
                FrameDisposition::Delivered
            }
            Err(e) => ignore(ProtocolWarning::MalformedFrame(e)),
        }
    }

    /// Invoke every listener with a callback, in registration order
    ///
    /// Returns the number of listeners that failed.
    pub fn deliver_callback(&self, callback: &Callback) -> usize {
        let listeners: Vec<Listener> = self
            .state()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        let mut failures = 0;
        for listener in listeners {
            match catch_unwind(AssertUnwindSafe(|| listener(callback))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failures += 1;
                    warn!(callback = callback.name, "Listener failed, {}", e);
                }
                Err(_) => {
                    failures += 1;
                    warn!(callback = callback.name, "Listener panicked");
                }
            }
        }
        failures
    }

    /// Register a callback listener
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Callback) -> ListenerResult + Send + Sync + 'static,
    {
        let mut state = self.state();
        let id = state.next_listener;
        state.next_listener += 1;
        state.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a callback listener, returns false if it was not registered
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state();
        let count = state.listeners.len();
        state.listeners.retain(|(listener, _)| *listener != id);
        state.listeners.len() != count
    }

    /// Number of registered listeners
    pub fn listeners(&self) -> usize {
        self.state().listeners.len()
    }

    /// Number of commands waiting for a response
    pub fn pending_requests(&self) -> usize {
        self.state().pending.len()
    }

    /// Reset the gateway
    pub fn reset(&self) -> Result<()> {
        self.inner.gateway.reset()
    }

    /// Close the gateway, failing every pending command
    pub fn close(&self) {
        let pending: Vec<Pending> = {
            let mut state = self.state();
            state.closed = true;
            state.pending.drain().map(|(_, pending)| pending).collect()
        };
        for request in pending {
            let _ = request.sender.send(Err(Error::Closed));
        }
        self.inner.gateway.close();
    }
}

fn decode_parameters(
    data: &[u8],
    schema: Schema,
) -> std::result::Result<Vec<Value>, melis_data::Error> {
    let (values, used) = types::decode(data, schema)?;
    if used < data.len() {
        warn!(
            "{}",
            ProtocolWarning::TrailingBytes {
                count: data.len() - used
            }
        );
    }
    Ok(values)
}

fn ignore(warning: ProtocolWarning) -> FrameDisposition {
    warn!("{}", warning);
    FrameDisposition::Ignored(warning)
}

/// Removes a listener when dropped
struct ListenerGuard<'a> {
    multiplexer: &'a Multiplexer,
    id: ListenerId,
}

impl Drop for ListenerGuard<'_> {
    fn drop(&mut self) {
        self.multiplexer.remove_listener(self.id);
    }
}

/// Response of a command that has been sent
///
/// Dropping the handle forgets the command, a late response is then
/// reported as a duplicate.
pub struct PendingReply {
    inner: Arc<Inner>,
    definition: &'static CommandDefinition,
    sequence: u8,
    request: u64,
    receiver: Option<oneshot::Receiver<Result<Vec<Value>>>>,
}

impl PendingReply {
    /// Sequence number of the command
    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    /// Wait for the response, bounded by the request timeout
    pub async fn wait(mut self) -> Result<Response> {
        let timeout = self.inner.config.request_timeout();
        let receiver = self.receiver.take().ok_or(Error::Closed)?;
        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(result)) => result.map(|args| Response {
                name: self.definition.name,
                args,
                schema: self.definition.response,
            }),
            Ok(Err(_)) => Err(Error::Closed),
            Err(_) => {
                warn!(
                    command = self.definition.name,
                    sequence = self.sequence,
                    "No response"
                );
                Err(Error::Timeout(timeout))
            }
        }
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        let mut state = lock(&self.inner.state);
        let current = state
            .pending
            .get(&self.sequence)
            .map(|pending| pending.request);
        if current == Some(self.request) {
            state.pending.remove(&self.sequence);
        }
    }
}
