use std::sync::Mutex;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::auth::Authenticator;
use crate::logger::MessageLogger;
use crate::protocol::{DEVICES_PATH, LOGIN_PATH, device_data_path, login_body};
use crate::types::{Credentials, Device, DeviceConstraints, DeviceInfo, Token};
use crate::{Error, Result};

/// Plain request/response exchange with the cloud API.
///
/// Holds no session state: every authenticated call takes the bearer token
/// from the caller.
pub(crate) struct DeviceGateway {
    http: reqwest::Client,
    base_url: String,
    logger: Option<Mutex<MessageLogger>>,
}

impl DeviceGateway {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        logger: Option<MessageLogger>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            logger: logger.map(Mutex::new),
        })
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Token> {
        let url = format!("{}{LOGIN_PATH}", self.base_url);
        debug!(url = %url, "logging in");
        self.with_logger(|l| l.log_request("POST", LOGIN_PATH, None));

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&login_body(credentials))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Auth(format!(
                "token request returned a non-success response: {status}"
            )));
        }

        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Auth(format!("token response could not be decoded: {e}")))
    }

    pub async fn list_devices(&self, token: &str) -> Result<Vec<Device>> {
        self.get_json("get devices", DEVICES_PATH, token).await
    }

    pub async fn fetch_device_info(&self, device_id: &str, token: &str) -> Result<DeviceInfo> {
        self.get_json("get device info", &device_data_path(device_id), token)
            .await
    }

    pub async fn fetch_device_constraints(
        &self,
        device_id: &str,
        token: &str,
    ) -> Result<DeviceConstraints> {
        Ok(self.fetch_device_info(device_id, token).await?.constraints())
    }

    pub async fn submit_update(
        &self,
        device_id: &str,
        token: &str,
        action: &str,
        payload: &Value,
    ) -> Result<()> {
        let path = device_data_path(device_id);
        debug!(device = device_id, action, "updating device");
        self.with_logger(|l| l.log_command(action, device_id, payload));

        let resp = self
            .authorized(Method::PUT, &path, token)
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                operation: "update",
                status,
            });
        }
        Ok(())
    }

    fn authorized(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        token: &str,
    ) -> Result<T> {
        self.with_logger(|l| l.log_request("GET", path, None));

        let resp = self.authorized(Method::GET, path, token).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { operation, status });
        }

        let body = resp.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|source| Error::Decode { operation, source })?;
        trace!(operation, bytes = body.len(), "response received");
        self.with_logger(|l| l.log_response(path, status.as_u16(), &value));

        serde_json::from_value(value).map_err(|source| Error::Decode { operation, source })
    }

    fn with_logger(&self, f: impl FnOnce(&mut MessageLogger)) {
        let Some(logger) = &self.logger else {
            return;
        };
        let mut guard = logger.lock().unwrap_or_else(|poisoned| {
            warn!("message log lock poisoned, continuing with recovered logger");
            logger.clear_poison();
            poisoned.into_inner()
        });
        f(&mut guard);
    }
}

impl Authenticator for DeviceGateway {
    async fn login(&self, credentials: &Credentials) -> Result<Token> {
        DeviceGateway::login(self, credentials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MessageLogMode;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use tempfile::NamedTempFile;

    #[test]
    fn poisoned_logger_keeps_writing() {
        let tmp = NamedTempFile::new().unwrap();
        let logger = MessageLogger::new(MessageLogMode::Full, tmp.path()).unwrap();
        let gateway =
            DeviceGateway::new("http://127.0.0.1:1", Duration::from_secs(1), Some(logger)).unwrap();

        let poisoned = catch_unwind(AssertUnwindSafe(|| {
            let _guard = gateway.logger.as_ref().unwrap().lock().unwrap();
            panic!("writer panicked");
        }));
        assert!(poisoned.is_err());
        assert!(gateway.logger.as_ref().unwrap().is_poisoned());

        gateway.with_logger(|l| l.log_request("GET", DEVICES_PATH, None));
        assert!(!gateway.logger.as_ref().unwrap().is_poisoned());

        let contents = std::fs::read_to_string(tmp.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("/devices"));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let gateway =
            DeviceGateway::new("http://example.test/", Duration::from_secs(1), None).unwrap();
        assert_eq!(gateway.base_url, "http://example.test");
    }
}
