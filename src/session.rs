use std::fmt;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, trace};

use crate::codec::{build_payload, read_parameters};
use crate::logger::{MessageLog, MessageLogger};
use crate::protocol::{Endpoints, login_message, parse_device_list, request_headers, response_body};
use crate::transport::{TlsMode, build_client};
use crate::types::*;
use crate::{Error, Result};

pub struct SessionBuilder {
    username: String,
    password: String,
    endpoints: Endpoints,
    tls: TlsMode,
    message_log: Option<MessageLog>,
}

impl SessionBuilder {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            endpoints: Endpoints::default(),
            tls: TlsMode::default(),
            message_log: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints = Endpoints::new(url);
        self
    }

    pub fn tls(mut self, mode: TlsMode) -> Self {
        self.tls = mode;
        self
    }

    /// Write every request and response body to `target`.
    pub fn message_log(mut self, target: MessageLog) -> Self {
        self.message_log = Some(target);
        self
    }

    pub fn build(self) -> Result<Session> {
        let http = build_client(&self.tls)?;
        let logger = self
            .message_log
            .as_ref()
            .map(MessageLogger::open)
            .transpose()?;

        Ok(Session {
            username: self.username,
            password: self.password,
            http,
            endpoints: self.endpoints,
            logger,
            authenticated: false,
            devices: Vec::new(),
        })
    }
}

impl fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("endpoints", &self.endpoints)
            .field("tls", &self.tls)
            .field("message_log", &self.message_log)
            .finish()
    }
}

/// Status codes a call accepts.
#[derive(Debug, Clone, Copy)]
enum Accept {
    /// Any 2xx.
    Success,
    /// Exactly 200.
    OkOnly,
}

/// Authenticated conversation with the Eolia service.
///
/// Authentication lives in the HTTP client's cookie store, so a session
/// must be logged in before the device calls succeed. Calls are never
/// retried; every failure is returned to the caller as-is.
///
/// Pair every `login` with a `logout`, even when an operation in between
/// fails:
///
/// ```no_run
/// use panasonic_eolia::{Power, Session, Settings};
///
/// # async fn run() -> panasonic_eolia::Result<()> {
/// let mut session = Session::builder("user@example.com", "secret").build()?;
/// session.login().await?;
///
/// let result = async {
///     let devices = session.list_devices().await?.to_vec();
///     for device in &devices {
///         session.set_device(&device.id, &Settings::new().power(Power::On)).await?;
///     }
///     Ok::<_, panasonic_eolia::Error>(())
/// }
/// .await;
///
/// session.logout().await?;
/// result
/// # }
/// ```
pub struct Session {
    username: String,
    password: String,
    http: reqwest::Client,
    endpoints: Endpoints,
    logger: Option<MessageLogger>,
    authenticated: bool,
    devices: Vec<Device>,
}

impl Session {
    pub fn builder(username: impl Into<String>, password: impl Into<String>) -> SessionBuilder {
        SessionBuilder::new(username, password)
    }

    pub async fn login(&mut self) -> Result<()> {
        let url = self.endpoints.login();
        debug!(url = %url, user = %self.username, "logging in");

        let body = login_message(&self.username, &self.password);
        self.call(Method::POST, &url, Some(&body), Accept::Success, Error::Login)
            .await?;

        self.authenticated = true;
        debug!("login successful");
        Ok(())
    }

    /// Release point paired with [`login`](Self::login). The service has no
    /// revoke endpoint, so nothing is sent and the cookie is kept.
    pub async fn logout(&mut self) -> Result<()> {
        debug!("logout (no remote call)");
        Ok(())
    }

    /// Whether [`login`](Self::login) has succeeded on this session.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Fetch the account's appliances, replacing the previous list.
    pub async fn list_devices(&mut self) -> Result<&[Device]> {
        self.devices.clear();

        let url = self.endpoints.devices();
        debug!(url = %url, "listing devices");
        let text = self
            .call(Method::GET, &url, None, Accept::Success, Error::Transport)
            .await?;

        self.devices = parse_device_list(&text)?;
        Ok(&self.devices)
    }

    /// Devices from the last successful [`list_devices`](Self::list_devices).
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub async fn get_device(&mut self, id: &str) -> Result<DeviceStatus> {
        let doc = self.dump(id).await?;
        let parameters = read_parameters(&doc)?;
        Ok(DeviceStatus {
            id: id.to_string(),
            parameters,
        })
    }

    /// The device's status document exactly as the service returned it.
    pub async fn dump(&mut self, id: &str) -> Result<Value> {
        let url = self.endpoints.status(id);
        debug!(url = %url, "reading device status");
        let text = self
            .call(Method::GET, &url, None, Accept::OkOnly, Error::Request)
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the supplied settings to a device. Unset fields are left
    /// untouched on the device. Any 2xx answer counts as success.
    pub async fn set_device(&mut self, id: &str, settings: &Settings) -> Result<bool> {
        let url = self.endpoints.status(id);
        let payload = Value::Object(build_payload(settings));
        debug!(url = %url, ?settings, "writing device status");

        let text = self
            .call(Method::PUT, &url, Some(&payload), Accept::Success, Error::Request)
            .await?;
        let _: Value = serde_json::from_str(&text)?;
        Ok(true)
    }

    async fn call(
        &mut self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        accept: Accept,
        transport_error: fn(reqwest::Error) -> Error,
    ) -> Result<String> {
        if let Some(ref mut logger) = self.logger {
            logger.log_request(method.as_str(), url, body);
        }

        let mut request = self
            .http
            .request(method.clone(), url)
            .headers(request_headers());
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let resp = request.send().await.map_err(transport_error)?;
        let status = resp.status();
        let text = resp.text().await.map_err(transport_error)?;
        trace!(%status, len = text.len(), "response");

        if let Some(ref mut logger) = self.logger {
            logger.log_response(method.as_str(), url, status.as_u16(), &text);
        }

        check_response(status, accept, &text)?;
        Ok(text)
    }
}

fn check_response(status: StatusCode, accept: Accept, text: &str) -> Result<()> {
    let accepted = match accept {
        Accept::Success => status.is_success(),
        Accept::OkOnly => status == StatusCode::OK,
    };
    if accepted {
        return Ok(());
    }
    Err(Error::Response {
        status: status.as_u16(),
        body: response_body(text),
    })
}
