use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account login. Fixed for the lifetime of a client.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response from `/users/auth/login`.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub access_token: String,
    /// Lifetime in seconds, counted from receipt.
    pub access_token_expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("access_token_expires_in", &self.access_token_expires_in)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mode {
    Off,
    Heat,
    Cool,
    Auto,
    EmergencyHeat,
}

impl Mode {
    pub fn as_code(&self) -> u8 {
        match self {
            Mode::Off => 0,
            Mode::Heat => 1,
            Mode::Cool => 2,
            Mode::Auto => 3,
            Mode::EmergencyHeat => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Mode::Off),
            1 => Some(Mode::Heat),
            2 => Some(Mode::Cool),
            3 => Some(Mode::Auto),
            4 => Some(Mode::EmergencyHeat),
            _ => None,
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Mode::Off),
            "heat" => Some(Mode::Heat),
            "cool" => Some(Mode::Cool),
            "auto" => Some(Mode::Auto),
            "emergency heat" | "emergency-heat" | "eheat" => Some(Mode::EmergencyHeat),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Mode::from_code(code).ok_or_else(|| format!("unknown mode: {code}"))
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> u8 {
        mode.as_code()
    }
}

/// What the equipment is doing right now. Codes outside the known set are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum EquipmentStatus {
    Cool,
    Overcool,
    Heat,
    Fan,
    #[default]
    Idle,
    Unknown(u8),
}

impl From<u8> for EquipmentStatus {
    fn from(code: u8) -> Self {
        match code {
            1 => EquipmentStatus::Cool,
            2 => EquipmentStatus::Overcool,
            3 => EquipmentStatus::Heat,
            4 => EquipmentStatus::Fan,
            5 => EquipmentStatus::Idle,
            other => EquipmentStatus::Unknown(other),
        }
    }
}

impl From<EquipmentStatus> for u8 {
    fn from(status: EquipmentStatus) -> u8 {
        match status {
            EquipmentStatus::Cool => 1,
            EquipmentStatus::Overcool => 2,
            EquipmentStatus::Heat => 3,
            EquipmentStatus::Fan => 4,
            EquipmentStatus::Idle => 5,
            EquipmentStatus::Unknown(code) => code,
        }
    }
}

/// Entry from `/devices`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub location_id: String,
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub firmware_version: String,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_owner: bool,
    #[serde(default)]
    pub has_write: bool,
}

/// State record from `/deviceData/{id}`. Temperatures are Celsius.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub mode: Mode,
    #[serde(default)]
    pub equipment_status: EquipmentStatus,
    pub csp_home: f64,
    pub hsp_home: f64,
    #[serde(rename = "tempSPMin")]
    pub temp_sp_min: f64,
    #[serde(rename = "tempSPMax")]
    pub temp_sp_max: f64,
    pub temp_delta_min: f64,
    #[serde(default)]
    pub temp_indoor: Option<f64>,
    #[serde(default)]
    pub hum_indoor: Option<f64>,
    #[serde(default)]
    pub temp_outdoor: Option<f64>,
    #[serde(default)]
    pub hum_outdoor: Option<f64>,
    #[serde(default)]
    pub fan: u8,
    #[serde(default)]
    pub fan_circulate: u8,
    #[serde(default)]
    pub fan_circulate_speed: u8,
    #[serde(default)]
    pub sched_enabled: bool,
}

impl DeviceInfo {
    pub fn constraints(&self) -> DeviceConstraints {
        DeviceConstraints {
            current_cool: self.csp_home,
            current_heat: self.hsp_home,
            min: self.temp_sp_min,
            max: self.temp_sp_max,
            min_delta: self.temp_delta_min,
        }
    }
}

/// Snapshot of the limits a setpoint change is checked against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceConstraints {
    pub current_cool: f64,
    pub current_heat: f64,
    pub min: f64,
    pub max: f64,
    pub min_delta: f64,
}

/// Requested cool/heat targets. `None` keeps the device's current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SetpointRequest {
    pub cool: Option<f64>,
    pub heat: Option<f64>,
}

impl SetpointRequest {
    pub fn cool(cool: f64) -> Self {
        Self::new(Some(cool), None)
    }

    pub fn heat(heat: f64) -> Self {
        Self::new(None, Some(heat))
    }

    pub fn both(cool: f64, heat: f64) -> Self {
        Self::new(Some(cool), Some(heat))
    }

    /// A zero target is treated as absent.
    pub fn new(cool: Option<f64>, heat: Option<f64>) -> Self {
        Self {
            cool: cool.filter(|v| *v != 0.0),
            heat: heat.filter(|v| *v != 0.0),
        }
    }
}

/// Fully resolved setpoints, ready to submit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetpointPlan {
    pub cool: f64,
    pub heat: f64,
}

impl fmt::Display for SetpointPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cool {:.1}\u{00b0}C / heat {:.1}\u{00b0}C", self.cool, self.heat)
    }
}
