use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::auth::AuthSession;
use crate::gateway::DeviceGateway;
use crate::logger::{MessageLogMode, MessageLogger};
use crate::planner;
use crate::protocol::{DEFAULT_BASE_URL, set_mode_data, set_temp_data};
use crate::types::*;
use crate::{Error, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DaikinClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    expiry_margin: Duration,
    log_mode: Option<MessageLogMode>,
    log_path: Option<PathBuf>,
}

impl DaikinClientBuilder {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(email, password),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            expiry_margin: Duration::ZERO,
            log_mode: None,
            log_path: None,
        }
    }

    /// Reads `DAIKIN_EMAIL`, `DAIKIN_PASSWORD` and, if set, `DAIKIN_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            env::var(name).map_err(|_| Error::Config(format!("{name} is not set")))
        };
        let mut builder = Self::new(var("DAIKIN_EMAIL")?, var("DAIKIN_PASSWORD")?);
        if let Ok(url) = env::var("DAIKIN_BASE_URL") {
            builder = builder.base_url(url);
        }
        Ok(builder)
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Per-request timeout. Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Treat the access token as expired this long before the server's deadline.
    /// Zero by default.
    pub fn expiry_margin(mut self, margin: Duration) -> Self {
        self.expiry_margin = margin;
        self
    }

    pub fn message_log(mut self, mode: MessageLogMode, path: impl Into<PathBuf>) -> Self {
        self.log_mode = Some(mode);
        self.log_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<DaikinClient> {
        let logger = match (self.log_mode, self.log_path) {
            (Some(mode), Some(path)) => Some(MessageLogger::new(mode, path)?),
            _ => None,
        };

        Ok(DaikinClient {
            gateway: DeviceGateway::new(&self.base_url, self.timeout, logger)?,
            session: AuthSession::new(self.credentials, self.expiry_margin),
        })
    }
}

/// Client for one Daikin account. Safe to share between tasks; token refresh
/// is serialized internally.
pub struct DaikinClient {
    gateway: DeviceGateway,
    session: AuthSession,
}

impl DaikinClient {
    pub fn builder(email: impl Into<String>, password: impl Into<String>) -> DaikinClientBuilder {
        DaikinClientBuilder::new(email, password)
    }

    /// Current bearer token, logging in first if the cached one has lapsed.
    pub async fn access_token(&self) -> Result<String> {
        self.session.acquire_token(&self.gateway).await
    }

    pub async fn devices(&self) -> Result<Vec<Device>> {
        let token = self.access_token().await?;
        self.gateway.list_devices(&token).await
    }

    pub async fn device_info(&self, device_id: &str) -> Result<DeviceInfo> {
        let token = self.access_token().await?;
        self.gateway.fetch_device_info(device_id, &token).await
    }

    pub async fn set_mode(&self, device_id: &str, mode: Mode) -> Result<()> {
        let token = self.access_token().await?;
        self.gateway
            .submit_update(device_id, &token, "set_mode", &set_mode_data(mode))
            .await
    }

    /// Change cool and/or heat setpoints. Missing sides come from the device's
    /// current values; the change overrides any active schedule.
    ///
    /// Invalid requests fail before anything is sent.
    pub async fn set_temp(&self, device_id: &str, request: SetpointRequest) -> Result<SetpointPlan> {
        let plan = planner::plan(&request, move || async move {
            let token = self.access_token().await?;
            self.gateway.fetch_device_constraints(device_id, &token).await
        })
        .await?;

        debug!(device = device_id, %plan, "submitting setpoints");
        let token = self.access_token().await?;
        self.gateway
            .submit_update(device_id, &token, "set_temp", &set_temp_data(&plan))
            .await?;
        Ok(plan)
    }

    /// Send an arbitrary JSON object for fields not otherwise modeled.
    pub async fn update_device_raw(&self, device_id: &str, json: &str) -> Result<()> {
        let payload: Value = serde_json::from_str(json)
            .map_err(|e| Error::InvalidPayload(e.to_string()))?;
        self.update_device(device_id, &payload).await
    }

    pub async fn update_device(&self, device_id: &str, payload: &Value) -> Result<()> {
        if !payload.is_object() {
            return Err(Error::InvalidPayload("expected a JSON object".to_string()));
        }
        let token = self.access_token().await?;
        self.gateway
            .submit_update(device_id, &token, "update_raw", payload)
            .await
    }
}
