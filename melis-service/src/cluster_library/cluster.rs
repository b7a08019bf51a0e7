use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use melis_data::cluster_library::{
    foundation, AttributeIdentifier, AttributeRecord, AttributeStatus, AttributeValue,
    ClusterIdentifier, ClusterLibraryHeader, ClusterLibraryStatus, FrameControl, FrameType,
    GeneralCommandIdentifier, ReportingConfiguration, ReportingStatus, WriteAttributeStatus,
};
use melis_data::device_profile::Status as ManagementStatus;
use melis_data::ezsp::ApsFrame;
use melis_data::types::{Schema, Value};
use melis_data::NetworkAddress;
use tracing::{debug, warn};

use crate::cluster_library::codec::{self, Arguments, CommandIdentifier, DecodedFrame};
use crate::cluster_library::ClusterKind;
use crate::endpoint::Endpoint;
use crate::{lock, Error, Result};

/// Application handler for cluster-specific commands
pub trait ClusterHandler: Send + Sync {
    /// Handle a cluster-specific command received on `cluster`
    fn handle_cluster_request(&self, cluster: &Cluster, aps: &ApsFrame, frame: &DecodedFrame);
}

/// Cluster instance on a remote endpoint
///
/// Keeps the last value seen for every attribute, either read or reported.
pub struct Cluster {
    endpoint: Weak<Endpoint>,
    nwk: NetworkAddress,
    endpoint_id: u8,
    identifier: ClusterIdentifier,
    kind: &'static ClusterKind,
    attributes: Mutex<HashMap<AttributeIdentifier, AttributeValue>>,
    handler: Mutex<Option<Arc<dyn ClusterHandler>>>,
}

impl Cluster {
    pub(crate) fn new(
        endpoint: &Endpoint,
        identifier: ClusterIdentifier,
        kind: &'static ClusterKind,
    ) -> Arc<Self> {
        Arc::new(Self {
            endpoint: endpoint.downgrade(),
            nwk: endpoint.network_address(),
            endpoint_id: endpoint.endpoint(),
            identifier,
            kind,
            attributes: Mutex::new(HashMap::new()),
            handler: Mutex::new(None),
        })
    }

    /// Cluster identifier, also for clusters without a known kind
    pub fn identifier(&self) -> ClusterIdentifier {
        self.identifier
    }

    /// Name of the cluster kind
    pub fn name(&self) -> &'static str {
        self.kind.name
    }

    /// Attribute and command tables
    pub fn kind(&self) -> &'static ClusterKind {
        self.kind
    }

    /// Last known value of an attribute
    pub fn attribute(&self, identifier: AttributeIdentifier) -> Option<AttributeValue> {
        lock(&self.attributes).get(&identifier).cloned()
    }

    /// Last known value of an attribute by name
    pub fn attribute_by_name(&self, name: &str) -> Option<AttributeValue> {
        let definition = self.kind.attribute_by_name(name)?;
        self.attribute(definition.identifier)
    }

    /// Install the handler for cluster-specific commands
    pub fn set_handler(&self, handler: Arc<dyn ClusterHandler>) {
        *lock(&self.handler) = Some(handler);
    }

    /// Send a command to the cluster and wait for the reply
    pub async fn request(
        &self,
        general: bool,
        command: u8,
        schema: Schema,
        args: &[Value],
    ) -> Result<DecodedFrame> {
        let endpoint = self.endpoint.upgrade().ok_or(Error::Detached)?;
        let aps = endpoint.get_aps(self.identifier)?;
        let frame_type = if general {
            FrameType::Global
        } else {
            FrameType::Local
        };
        let header = ClusterLibraryHeader {
            control: FrameControl::request(frame_type),
            manufacturer: None,
            transaction_sequence: aps.sequence,
            command,
        };
        let data = codec::serialize(&header, schema, args)?;
        let device = endpoint.device()?;
        device.request(aps, data).await
    }

    /// Read attributes, successful reads update the cache
    ///
    /// Returns every record of the response, failed reads included.
    pub async fn read_attributes(
        &self,
        attributes: &[AttributeIdentifier],
    ) -> Result<Vec<AttributeStatus>> {
        let identifiers = attributes
            .iter()
            .map(|identifier| Value::Unsigned(u64::from(*identifier)))
            .collect();
        let reply = self
            .general(
                GeneralCommandIdentifier::ReadAttributes,
                foundation::READ_ATTRIBUTES,
                &[Value::List(identifiers)],
            )
            .await?;
        let records = response_records(&reply, GeneralCommandIdentifier::ReadAttributesResponse)?;
        let mut statuses = Vec::with_capacity(records.len());
        for record in records {
            match record {
                Value::AttributeStatus(status) => statuses.push(status.clone()),
                _ => return Err(Error::UnexpectedReply),
            }
        }
        {
            let mut cache = lock(&self.attributes);
            for status in &statuses {
                if let (ClusterLibraryStatus::Success, Some(value)) =
                    (status.status, &status.value)
                {
                    cache.insert(status.identifier, value.clone());
                }
            }
        }
        Ok(statuses)
    }

    /// Write attributes
    ///
    /// Every value is converted to the type declared in the attribute table.
    /// The cache is left as is, it follows reads and reports only.
    pub async fn write_attributes(
        &self,
        attributes: &[(AttributeIdentifier, Value)],
    ) -> Result<Vec<WriteAttributeStatus>> {
        let mut records = Vec::with_capacity(attributes.len());
        for (identifier, value) in attributes {
            let definition = self
                .kind
                .attribute(*identifier)
                .ok_or(Error::UnknownAttribute(*identifier))?;
            let value = AttributeValue::from_value(definition.data_type, value)
                .map_err(|_| Error::InvalidAttributeValue(*identifier))?;
            records.push(Value::AttributeRecord(AttributeRecord {
                identifier: *identifier,
                value,
            }));
        }
        let reply = self
            .general(
                GeneralCommandIdentifier::WriteAttributes,
                foundation::WRITE_ATTRIBUTES,
                &[Value::List(records)],
            )
            .await?;
        response_records(&reply, GeneralCommandIdentifier::WriteAttributesResponse)?
            .iter()
            .map(|record| match record {
                Value::WriteAttributeStatus(status) => Ok(status.clone()),
                _ => Err(Error::UnexpectedReply),
            })
            .collect()
    }

    /// Configure reporting of an attribute
    ///
    /// `reportable_change` is only sent for analog attribute types.
    pub async fn configure_reporting(
        &self,
        attribute: AttributeIdentifier,
        minimum_interval: u16,
        maximum_interval: u16,
        reportable_change: &Value,
    ) -> Result<Vec<ReportingStatus>> {
        let definition = self
            .kind
            .attribute(attribute)
            .ok_or(Error::UnknownAttribute(attribute))?;
        let reportable_change = if definition.data_type.is_analog() {
            Some(
                AttributeValue::from_value(definition.data_type, reportable_change)
                    .map_err(|_| Error::InvalidAttributeValue(attribute))?,
            )
        } else {
            None
        };
        let configuration = ReportingConfiguration::Reported {
            identifier: attribute,
            data_type: definition.data_type,
            minimum_interval,
            maximum_interval,
            reportable_change,
        };
        let reply = self
            .general(
                GeneralCommandIdentifier::ConfigureReporting,
                foundation::CONFIGURE_REPORTING,
                &[Value::List(vec![Value::ReportingConfiguration(configuration)])],
            )
            .await?;
        response_records(&reply, GeneralCommandIdentifier::ConfigureReportingResponse)?
            .iter()
            .map(|record| match record {
                Value::ReportingStatus(status) => Ok(status.clone()),
                _ => Err(Error::UnexpectedReply),
            })
            .collect()
    }

    /// Bind the cluster to the coordinator
    pub async fn bind(&self) -> Result<()> {
        let endpoint = self.endpoint.upgrade().ok_or(Error::Detached)?;
        let device = endpoint.device()?;
        let status = device
            .management()
            .bind(self.nwk, self.endpoint_id, self.identifier)
            .await?;
        management_result(status)
    }

    /// Remove the binding created by `bind`
    pub async fn unbind(&self) -> Result<()> {
        let endpoint = self.endpoint.upgrade().ok_or(Error::Detached)?;
        let device = endpoint.device()?;
        let status = device
            .management()
            .unbind(self.nwk, self.endpoint_id, self.identifier)
            .await?;
        management_result(status)
    }

    /// Send a cluster-specific command by name
    ///
    /// Unknown names fail without sending anything.
    pub async fn command(&self, name: &str, args: &[Value]) -> Result<DecodedFrame> {
        let definition = self
            .kind
            .server_command_by_name(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        self.request(false, definition.identifier, definition.schema, args)
            .await
    }

    /// Send a cluster-specific command by identifier
    pub async fn command_by_id(&self, command: u8, args: &[Value]) -> Result<DecodedFrame> {
        let definition = self
            .kind
            .server_commands
            .iter()
            .find(|definition| definition.identifier == command)
            .ok_or_else(|| Error::UnknownCommand(format!("0x{:02x}", command)))?;
        self.request(false, definition.identifier, definition.schema, args)
            .await
    }

    /// Handle a frame received from the remote cluster
    pub fn handle_request(&self, aps: &ApsFrame, frame: &DecodedFrame) {
        match frame.command {
            CommandIdentifier::Foundation(command)
                if command == u8::from(GeneralCommandIdentifier::ReportAttributes) =>
            {
                self.handle_report(frame)
            }
            CommandIdentifier::ClusterSpecific(command) => {
                let handler = lock(&self.handler).clone();
                match handler {
                    Some(handler) => handler.handle_cluster_request(self, aps, frame),
                    None => warn!(
                        nwk = %self.nwk,
                        endpoint = self.endpoint_id,
                        cluster = self.identifier,
                        "No handler for cluster command 0x{:02x}",
                        command
                    ),
                }
            }
            CommandIdentifier::Foundation(command) => warn!(
                nwk = %self.nwk,
                endpoint = self.endpoint_id,
                cluster = self.identifier,
                "No handler for general command 0x{:02x}",
                command
            ),
        }
    }

    fn handle_report(&self, frame: &DecodedFrame) {
        let records = match &frame.arguments {
            Arguments::Decoded(values) => values.first().and_then(Value::as_list),
            Arguments::Raw(_) => None,
        };
        let Some(records) = records else {
            warn!(
                nwk = %self.nwk,
                endpoint = self.endpoint_id,
                cluster = self.identifier,
                "Undecodable attribute report"
            );
            return;
        };
        let mut cache = lock(&self.attributes);
        for record in records {
            match record {
                Value::AttributeRecord(record) => {
                    debug!(
                        nwk = %self.nwk,
                        endpoint = self.endpoint_id,
                        cluster = self.identifier,
                        "Attribute report 0x{:04x} = {:?}",
                        record.identifier,
                        record.value
                    );
                    cache.insert(record.identifier, record.value.clone());
                }
                Value::AttributeStatus(status) => {
                    if let (ClusterLibraryStatus::Success, Some(value)) =
                        (status.status, &status.value)
                    {
                        cache.insert(status.identifier, value.clone());
                    }
                }
                _ => {}
            }
        }
    }

    async fn general(
        &self,
        command: GeneralCommandIdentifier,
        schema: Schema,
        args: &[Value],
    ) -> Result<DecodedFrame> {
        self.request(true, command.into(), schema, args).await
    }
}

/// Records of a general command response
///
/// A default response in place of the expected response carries the
/// failure status of the request.
fn response_records(frame: &DecodedFrame, expected: GeneralCommandIdentifier) -> Result<&[Value]> {
    let values = frame.arguments.values().ok_or(Error::UnexpectedReply)?;
    match frame.command {
        CommandIdentifier::Foundation(command) if command == u8::from(expected) => values
            .first()
            .and_then(Value::as_list)
            .ok_or(Error::UnexpectedReply),
        CommandIdentifier::Foundation(command)
            if command == u8::from(GeneralCommandIdentifier::DefaultResponse) =>
        {
            let status = values
                .get(1)
                .and_then(Value::as_u64)
                .and_then(|status| u8::try_from(status).ok())
                .ok_or(Error::UnexpectedReply)?;
            let rejected = values
                .first()
                .and_then(Value::as_u64)
                .and_then(|command| u8::try_from(command).ok())
                .and_then(foundation::command)
                .map_or("unknown", |definition| definition.name);
            Err(Error::CommandRejected {
                command: rejected.to_string(),
                status,
            })
        }
        _ => Err(Error::UnexpectedReply),
    }
}

fn management_result(status: ManagementStatus) -> Result<()> {
    if status == ManagementStatus::Success {
        Ok(())
    } else {
        Err(Error::DeviceManagement(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melis_data::cluster_library::{AttributeDataType, ReportingDirection};
    use melis_data::device_profile::{SimpleDescriptor, SimpleDescriptorResponse};
    use melis_data::ExtendedAddress;

    use crate::cluster_library::Registry;
    use crate::device::{ApplicationTransport, Device};
    use crate::testing::{captured_logs, RecordingTransport, ScriptedManagement};

    const NWK: NetworkAddress = NetworkAddress::new(0x7a01);

    struct Fixture {
        transport: Arc<RecordingTransport>,
        management: Arc<ScriptedManagement>,
        _device: Arc<Device>,
        endpoint: Arc<Endpoint>,
    }

    async fn fixture() -> Fixture {
        let transport = Arc::new(RecordingTransport::default());
        let management = Arc::new(ScriptedManagement::default());
        management.push_descriptor(Ok(SimpleDescriptorResponse::success_response(
            NWK,
            SimpleDescriptor::new(1, 0x0104, 0x0100, 0, &[0x0000, 0x0006, 0x0008], &[]),
        )));
        let link: Arc<dyn ApplicationTransport> = transport.clone();
        let device = Device::new(
            NWK,
            ExtendedAddress::new(0x1122),
            Arc::downgrade(&link),
            management.clone(),
            Arc::new(Registry::with_defaults()),
        );
        let endpoint = device.add_endpoint(1);
        endpoint.initialize().await.unwrap();
        Fixture {
            transport,
            management,
            _device: device,
            endpoint,
        }
    }

    fn reply(command: CommandIdentifier, args: Vec<Value>) -> DecodedFrame {
        DecodedFrame {
            header: ClusterLibraryHeader {
                control: FrameControl::request(FrameType::Global),
                manufacturer: None,
                transaction_sequence: 0,
                command: command.value(),
            },
            command,
            is_reply: true,
            arguments: Arguments::Decoded(args),
            warning: None,
        }
    }

    #[tokio::test]
    async fn read_attributes_updates_cache() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0006).unwrap();
        fixture.transport.push_reply(Ok(reply(
            CommandIdentifier::Foundation(0x01),
            vec![Value::List(vec![
                Value::AttributeStatus(AttributeStatus {
                    identifier: 0x0000,
                    status: ClusterLibraryStatus::Success,
                    value: Some(AttributeValue::Boolean(1)),
                }),
                Value::AttributeStatus(AttributeStatus {
                    identifier: 0x4000,
                    status: ClusterLibraryStatus::UnsupportedAttribute,
                    value: None,
                }),
            ])],
        )));

        let statuses = cluster.read_attributes(&[0x0000, 0x4000]).await.unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(cluster.attribute(0x0000), Some(AttributeValue::Boolean(1)));
        assert_eq!(cluster.attribute_by_name("on_off"), Some(AttributeValue::Boolean(1)));
        assert_eq!(cluster.attribute(0x4000), None);

        let requests = fixture.transport.requests();
        assert_eq!(requests.len(), 1);
        let (address, aps, data) = &requests[0];
        assert_eq!(*address, NWK);
        assert_eq!(aps.cluster, 0x0006);
        assert_eq!(aps.profile, 0x0104);
        assert_eq!(data, &[0x00, aps.sequence, 0x00, 0x00, 0x00, 0x00, 0x40]);
    }

    #[tokio::test]
    async fn default_response_fails_read() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0006).unwrap();
        fixture.transport.push_reply(Ok(reply(
            CommandIdentifier::Foundation(0x0b),
            vec![Value::Unsigned(0x00), Value::Unsigned(0x81)],
        )));
        let result = cluster.read_attributes(&[0x0000]).await;
        assert_eq!(
            result,
            Err(Error::CommandRejected {
                command: "read_attributes".to_string(),
                status: 0x81
            })
        );
    }

    #[tokio::test]
    async fn write_attributes_leaves_cache() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0000).unwrap();
        fixture.transport.push_reply(Ok(reply(
            CommandIdentifier::Foundation(0x04),
            vec![Value::List(vec![Value::WriteAttributeStatus(
                WriteAttributeStatus {
                    status: ClusterLibraryStatus::Success,
                    identifier: None,
                },
            )])],
        )));

        let statuses = cluster
            .write_attributes(&[(0x0010, Value::Text("hall".to_string()))])
            .await
            .unwrap();
        assert_eq!(statuses[0].status, ClusterLibraryStatus::Success);
        assert_eq!(cluster.attribute(0x0010), None);

        let (_, aps, data) = &fixture.transport.requests()[0];
        assert_eq!(
            data,
            &[0x00, aps.sequence, 0x02, 0x10, 0x00, 0x42, 0x04, b'h', b'a', b'l', b'l']
        );
    }

    #[tokio::test]
    async fn write_unknown_attribute() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0000).unwrap();
        let result = cluster
            .write_attributes(&[(0x7777, Value::Unsigned(1))])
            .await;
        assert_eq!(result, Err(Error::UnknownAttribute(0x7777)));
        assert!(fixture.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn write_invalid_value() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0008).unwrap();
        let result = cluster
            .write_attributes(&[(0x0000, Value::Unsigned(0x1ff))])
            .await;
        assert_eq!(result, Err(Error::InvalidAttributeValue(0x0000)));
        assert!(fixture.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn configure_reporting() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0008).unwrap();
        fixture.transport.push_reply(Ok(reply(
            CommandIdentifier::Foundation(0x07),
            vec![Value::List(vec![Value::ReportingStatus(ReportingStatus {
                status: ClusterLibraryStatus::Success,
                attribute: None,
            })])],
        )));

        let statuses = cluster
            .configure_reporting(0x0000, 1, 300, &Value::Unsigned(5))
            .await
            .unwrap();
        assert_eq!(statuses.len(), 1);
        let (_, aps, data) = &fixture.transport.requests()[0];
        assert_eq!(
            data,
            &[0x00, aps.sequence, 0x06, 0x00, 0x00, 0x00, 0x20, 0x01, 0x00, 0x2c, 0x01, 0x05]
        );

        let unknown = cluster
            .configure_reporting(0x0999, 1, 300, &Value::Unsigned(5))
            .await;
        assert_eq!(unknown, Err(Error::UnknownAttribute(0x0999)));
    }

    #[tokio::test]
    async fn configure_discrete_reporting() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0006).unwrap();
        fixture.transport.push_reply(Ok(reply(
            CommandIdentifier::Foundation(0x07),
            vec![Value::List(vec![Value::ReportingStatus(ReportingStatus {
                status: ClusterLibraryStatus::UnreportableAttribute,
                attribute: Some((ReportingDirection::Reported, 0x0000)),
            })])],
        )));
        let statuses = cluster
            .configure_reporting(0x0000, 0, 600, &Value::Unsigned(0))
            .await
            .unwrap();
        assert_eq!(
            statuses[0].status,
            ClusterLibraryStatus::UnreportableAttribute
        );
        let (_, aps, data) = &fixture.transport.requests()[0];
        assert_eq!(
            data,
            &[0x00, aps.sequence, 0x06, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x58, 0x02]
        );
    }

    #[tokio::test]
    async fn command_by_name() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0006).unwrap();
        fixture.transport.push_reply(Ok(reply(
            CommandIdentifier::Foundation(0x0b),
            vec![Value::Unsigned(0x02), Value::Unsigned(0x00)],
        )));
        let response = cluster.command("toggle", &[]).await.unwrap();
        assert_eq!(response.command, CommandIdentifier::Foundation(0x0b));
        let (_, aps, data) = &fixture.transport.requests()[0];
        assert_eq!(data, &[0x01, aps.sequence, 0x02]);
    }

    #[tokio::test]
    async fn unknown_command_sends_nothing() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0006).unwrap();
        let result = cluster.command("explode", &[]).await;
        assert_eq!(result, Err(Error::UnknownCommand("explode".to_string())));
        let result = cluster.command_by_id(0x99, &[]).await;
        assert!(matches!(result, Err(Error::UnknownCommand(_))));
        assert!(fixture.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn request_before_discovery() {
        let transport = Arc::new(RecordingTransport::default());
        let link: Arc<dyn ApplicationTransport> = transport.clone();
        let device = Device::new(
            NWK,
            ExtendedAddress::new(0x1122),
            Arc::downgrade(&link),
            Arc::new(ScriptedManagement::default()),
            Arc::new(Registry::with_defaults()),
        );
        let endpoint = device.add_endpoint(3);
        let cluster = endpoint.add_cluster(0x0006).unwrap();
        let result = cluster.command("on", &[]).await;
        assert_eq!(result, Err(Error::NotInitialized(3)));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn report_updates_cache() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let fixture = runtime.block_on(fixture());
        let cluster = fixture.endpoint.cluster(0x0008).unwrap();
        let report = reply(
            CommandIdentifier::Foundation(0x0a),
            vec![Value::List(vec![
                Value::AttributeRecord(AttributeRecord {
                    identifier: 0x0000,
                    value: AttributeValue::Unsigned8(0x7f),
                }),
                Value::AttributeStatus(AttributeStatus {
                    identifier: 0x0010,
                    status: ClusterLibraryStatus::Failure,
                    value: Some(AttributeValue::Unsigned16(10)),
                }),
            ])],
        );
        cluster.handle_request(&ApsFrame::default(), &report);
        assert_eq!(cluster.attribute(0x0000), Some(AttributeValue::Unsigned8(0x7f)));
        assert_eq!(cluster.attribute(0x0010), None);
    }

    #[test]
    fn cluster_command_reaches_handler() {
        struct Recorder(Mutex<Vec<u8>>);

        impl ClusterHandler for Recorder {
            fn handle_cluster_request(
                &self,
                cluster: &Cluster,
                _aps: &ApsFrame,
                frame: &DecodedFrame,
            ) {
                assert_eq!(cluster.identifier(), 0x0006);
                lock(&self.0).push(frame.command.value());
            }
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let fixture = runtime.block_on(fixture());
        let cluster = fixture.endpoint.cluster(0x0006).unwrap();
        let frame = reply(CommandIdentifier::ClusterSpecific(0x40), Vec::new());

        // without a handler the command is only logged
        cluster.handle_request(&ApsFrame::default(), &frame);

        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        cluster.set_handler(recorder.clone());
        cluster.handle_request(&ApsFrame::default(), &frame);
        cluster.handle_request(
            &ApsFrame::default(),
            &reply(CommandIdentifier::Foundation(0x0b), Vec::new()),
        );
        assert_eq!(*lock(&recorder.0), vec![0x40]);
    }

    #[test]
    fn unhandled_commands_are_warnings() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let fixture = runtime.block_on(fixture());
        let cluster = fixture.endpoint.cluster(0x0006).unwrap();
        let logs = captured_logs(|| {
            cluster.handle_request(
                &ApsFrame::default(),
                &reply(CommandIdentifier::ClusterSpecific(0x40), Vec::new()),
            );
            cluster.handle_request(
                &ApsFrame::default(),
                &reply(CommandIdentifier::Foundation(0x0b), Vec::new()),
            );
        });
        let lines: Vec<&str> = logs.lines().collect();
        assert_eq!(lines.len(), 2, "{}", logs);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("No handler for cluster command 0x40"));
        assert!(lines[1].contains("WARN"));
        assert!(lines[1].contains("No handler for general command 0x0b"));
    }

    #[tokio::test]
    async fn bind_and_unbind() {
        let fixture = fixture().await;
        let cluster = fixture.endpoint.cluster(0x0006).unwrap();
        fixture.management.push_binding(ManagementStatus::Success);
        fixture.management.push_binding(ManagementStatus::TableFull);
        cluster.bind().await.unwrap();
        assert_eq!(
            cluster.unbind().await,
            Err(Error::DeviceManagement(ManagementStatus::TableFull))
        );
        assert_eq!(
            fixture.management.bindings(),
            vec![(NWK, 1, 0x0006), (NWK, 1, 0x0006)]
        );
    }

    #[test]
    fn generic_cluster_keeps_identifier() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let fixture = runtime.block_on(fixture());
        let cluster = fixture.endpoint.add_cluster(0xfc57).unwrap();
        assert_eq!(cluster.identifier(), 0xfc57);
        assert_eq!(cluster.kind().attributes.len(), 0);
        assert_eq!(
            AttributeDataType::Unsigned8,
            fixture.endpoint.cluster(0x0008).unwrap().kind().attributes[0].data_type
        );
    }
}
