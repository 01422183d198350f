use serde_json::{Value, json};

use crate::types::{Credentials, Mode, SetpointPlan};

pub const DEFAULT_BASE_URL: &str = "https://api.daikinskyport.com";

pub const LOGIN_PATH: &str = "/users/auth/login";
pub const DEVICES_PATH: &str = "/devices";

pub fn device_data_path(device_id: &str) -> String {
    format!("/deviceData/{device_id}")
}

pub fn login_body(credentials: &Credentials) -> Value {
    json!({
        "email": credentials.email,
        "password": credentials.password,
    })
}

pub fn set_mode_data(mode: Mode) -> Value {
    json!({ "mode": mode.as_code() })
}

/// Manual setpoints always override the active schedule.
pub fn set_temp_data(plan: &SetpointPlan) -> Value {
    json!({
        "cspHome": plan.cool,
        "hspHome": plan.heat,
        "schedOverride": 1,
    })
}
