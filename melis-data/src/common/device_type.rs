//! Device types reported in simple descriptors

use std::fmt;

use super::ProfileIdentifier;

extended_enum!(
    /// Home automation device types
    HomeAutomationDevice, u16,
    /// On/Off switch
    OnOffSwitch => 0x0000,
    /// Level control switch
    LevelControlSwitch => 0x0001,
    /// On/Off output
    OnOffOutput => 0x0002,
    /// Level controllable output
    LevelControllableOutput => 0x0003,
    /// Scene selector
    SceneSelector => 0x0004,
    /// Configuration tool
    ConfigurationTool => 0x0005,
    /// Remote control
    RemoteControl => 0x0006,
    /// Combined interface
    CombinedInterface => 0x0007,
    /// Range extender
    RangeExtender => 0x0008,
    /// Mains power outlet
    MainsPowerOutlet => 0x0009,
    /// Door lock
    DoorLock => 0x000a,
    /// Door lock controller
    DoorLockController => 0x000b,
    /// Simple sensor
    SimpleSensor => 0x000c,
    /// Consumption awareness device
    ConsumptionAwarenessDevice => 0x000d,
    /// Home gateway
    HomeGateway => 0x0050,
    /// Smart plug
    SmartPlug => 0x0051,
    /// White goods
    WhiteGoods => 0x0052,
    /// Meter interface
    MeterInterface => 0x0053,
    /// On/Off light
    OnOffLight => 0x0100,
    /// Dimmable light
    DimmableLight => 0x0101,
    /// Color dimmable light
    ColorDimmableLight => 0x0102,
    /// On/Off light switch
    OnOffLightSwitch => 0x0103,
    /// Dimmer switch
    DimmerSwitch => 0x0104,
    /// Color dimmer switch
    ColorDimmerSwitch => 0x0105,
    /// Light sensor
    LightSensor => 0x0106,
    /// Occupancy sensor
    OccupancySensor => 0x0107,
    /// Shade
    Shade => 0x0200,
    /// Shade controller
    ShadeController => 0x0201,
    /// Window covering device
    WindowCoveringDevice => 0x0202,
    /// Window covering controller
    WindowCoveringController => 0x0203,
    /// Heating/Cooling unit
    HeatingCoolingUnit => 0x0300,
    /// Thermostat
    Thermostat => 0x0301,
    /// Temperature sensor
    TemperatureSensor => 0x0302,
    /// Pump
    Pump => 0x0303,
    /// Pump controller
    PumpController => 0x0304,
    /// Pressure sensor
    PressureSensor => 0x0305,
    /// Flow sensor
    FlowSensor => 0x0306,
    /// Mini split air conditioner
    MiniSplitAirConditioner => 0x0307,
    /// IAS control and indicating equipment
    IasControlIndicatingEquipment => 0x0400,
    /// IAS ancillary control equipment
    IasAncillaryControl => 0x0401,
    /// IAS zone
    IasZone => 0x0402,
    /// IAS warning device
    IasWarningDevice => 0x0403,
);

/// Device type of an endpoint
///
/// Device types are only meaningful within a profile. Types belonging to the
/// home automation profile are resolved, anything else is kept as the raw
/// 16-bit value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Known home automation device type
    HomeAutomation(HomeAutomationDevice),
    /// Device type not resolved against a profile
    Raw(u16),
}

impl DeviceType {
    /// Resolve a raw device type within the given profile
    pub fn resolve(profile: u16, device: u16) -> Self {
        if profile != ProfileIdentifier::HomeAutomation {
            return DeviceType::Raw(device);
        }
        match HomeAutomationDevice::try_from(device) {
            Ok(device) => DeviceType::HomeAutomation(device),
            Err(_) => DeviceType::Raw(device),
        }
    }

    /// The raw 16-bit device type
    pub fn value(self) -> u16 {
        match self {
            DeviceType::HomeAutomation(device) => device.into(),
            DeviceType::Raw(value) => value,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::HomeAutomation(device) => write!(f, "{:?}", device),
            DeviceType::Raw(value) => write!(f, "0x{:04x}", value),
        }
    }
}
