use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    On,
    Off,
}

impl Power {
    pub fn as_eolia_code(&self) -> bool {
        matches!(self, Power::On)
    }

    pub fn from_eolia_code(v: &Value) -> Option<Self> {
        match v.as_bool()? {
            true => Some(Power::On),
            false => Some(Power::Off),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Auto,
    Cool,
    Heat,
    Dry,
    ComfortDry,
    Fan,
    Nanoe,
    Stop,
}

impl OperationMode {
    pub fn as_eolia_code(&self) -> &'static str {
        match self {
            OperationMode::Auto => "Auto",
            OperationMode::Cool => "Cooling",
            OperationMode::Heat => "Heating",
            OperationMode::Dry => "CoolDehumidifying",
            OperationMode::ComfortDry => "ComfortableDehumidification",
            OperationMode::Fan => "Blast",
            OperationMode::Nanoe => "Nanoe",
            OperationMode::Stop => "Stop",
        }
    }

    pub fn from_eolia_code(v: &Value) -> Option<Self> {
        match v.as_str()? {
            "Auto" => Some(OperationMode::Auto),
            "Cooling" => Some(OperationMode::Cool),
            "Heating" => Some(OperationMode::Heat),
            "CoolDehumidifying" => Some(OperationMode::Dry),
            "ComfortableDehumidification" => Some(OperationMode::ComfortDry),
            "Blast" => Some(OperationMode::Fan),
            "Nanoe" => Some(OperationMode::Nanoe),
            "Stop" => Some(OperationMode::Stop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanSpeed {
    Auto,
    Quiet,
    Low,
    Medium,
    High,
    Powerful,
}

impl FanSpeed {
    pub fn as_eolia_code(&self) -> u8 {
        match self {
            FanSpeed::Auto => 0,
            FanSpeed::Quiet => 1,
            FanSpeed::Low => 2,
            FanSpeed::Medium => 3,
            FanSpeed::High => 4,
            FanSpeed::Powerful => 5,
        }
    }

    pub fn from_eolia_code(v: &Value) -> Option<Self> {
        match v.as_u64()? {
            0 => Some(FanSpeed::Auto),
            1 => Some(FanSpeed::Quiet),
            2 => Some(FanSpeed::Low),
            3 => Some(FanSpeed::Medium),
            4 => Some(FanSpeed::High),
            5 => Some(FanSpeed::Powerful),
            _ => None,
        }
    }
}

/// Vertical louver position, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirSwingVertical {
    Auto,
    Top,
    UpperMiddle,
    Middle,
    LowerMiddle,
    Bottom,
}

impl AirSwingVertical {
    pub fn as_eolia_code(&self) -> u8 {
        match self {
            AirSwingVertical::Auto => 0,
            AirSwingVertical::Top => 1,
            AirSwingVertical::UpperMiddle => 2,
            AirSwingVertical::Middle => 3,
            AirSwingVertical::LowerMiddle => 4,
            AirSwingVertical::Bottom => 5,
        }
    }

    pub fn from_eolia_code(v: &Value) -> Option<Self> {
        match v.as_u64()? {
            0 => Some(AirSwingVertical::Auto),
            1 => Some(AirSwingVertical::Top),
            2 => Some(AirSwingVertical::UpperMiddle),
            3 => Some(AirSwingVertical::Middle),
            4 => Some(AirSwingVertical::LowerMiddle),
            5 => Some(AirSwingVertical::Bottom),
            _ => None,
        }
    }
}

/// Entry of the account's appliance list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub model: String,
}

/// Decoded operating parameters. A field is only set when the service
/// reported the matching key.
///
/// The service reports an unknown sensor reading as `null`; a temperature
/// field that arrives as `null` reads as `None`, the same as an absent key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    pub power: Option<Power>,
    pub mode: Option<OperationMode>,
    pub fan_speed: Option<FanSpeed>,
    pub air_swing_vertical: Option<AirSwingVertical>,
    pub temperature: Option<f64>,
    pub temperature_inside: Option<f64>,
    pub temperature_outside: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceStatus {
    pub id: String,
    pub parameters: Parameters,
}

/// A loosely typed setting value, as accepted by [`Settings::set`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setting {
    Power(Power),
    Mode(OperationMode),
    FanSpeed(FanSpeed),
    AirSwingVertical(AirSwingVertical),
    Number(f64),
}

/// The subset of parameters a caller wants to change on a device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub power: Option<Power>,
    pub mode: Option<OperationMode>,
    pub fan_speed: Option<FanSpeed>,
    pub air_swing_vertical: Option<AirSwingVertical>,
    pub temperature: Option<f64>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn power(mut self, power: Power) -> Self {
        self.power = Some(power);
        self
    }

    pub fn mode(mut self, mode: OperationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn fan_speed(mut self, speed: FanSpeed) -> Self {
        self.fan_speed = Some(speed);
        self
    }

    pub fn air_swing_vertical(mut self, position: AirSwingVertical) -> Self {
        self.air_swing_vertical = Some(position);
        self
    }

    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Collect named settings, dropping any whose name is unknown or whose
    /// value does not fit the name.
    pub fn from_named<'a>(entries: impl IntoIterator<Item = (&'a str, Setting)>) -> Self {
        let mut settings = Self::default();
        for (name, value) in entries {
            settings.set(name, value);
        }
        settings
    }

    /// Apply one named setting. Names are `power`, `mode`, `fanSpeed`,
    /// `airSwingVertical` and `temperature`. Returns `false` and leaves the
    /// record unchanged when the value has the wrong type for the name.
    pub fn set(&mut self, name: &str, value: Setting) -> bool {
        match (name, value) {
            ("power", Setting::Power(v)) => self.power = Some(v),
            ("mode", Setting::Mode(v)) => self.mode = Some(v),
            ("fanSpeed", Setting::FanSpeed(v)) => self.fan_speed = Some(v),
            ("airSwingVertical", Setting::AirSwingVertical(v)) => {
                self.air_swing_vertical = Some(v)
            }
            ("temperature", Setting::Number(v)) => self.temperature = Some(v),
            _ => {
                debug!(setting = name, ?value, "skipping setting");
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
