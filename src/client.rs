use crate::constants::{
    APPLICATION_JSON, APPLICATION_OCTET_STREAM, DEFAULT_HOST, DEFAULT_USER_AGENT, SERVICE_PATH,
};
use crate::error::{CalibrationError, Result};
use crate::protocol::{RequestBody, ServiceResponse};
use hyper::ext::ReasonPhrase;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use strum_macros::{AsRefStr, Display};
use tracing::{debug, warn};

/// The four operations of the mobile service. The variant name is also the
/// last path segment of the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
pub enum ServiceCall {
    SessionStart,
    GetFilesList,
    GetFile,
    SessionEnd,
}

impl ServiceCall {
    pub fn path(&self) -> String {
        format!("{}/{}", SERVICE_PATH, self.as_ref())
    }

    /// Media type the response must carry.
    pub fn accept(&self) -> &'static str {
        match self {
            ServiceCall::GetFile => APPLICATION_OCTET_STREAM,
            _ => APPLICATION_JSON,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Active(String),
    Closed,
}

pub struct ThermAppCloud {
    pub(crate) base_url: Url,
    pub(crate) user_agent: String,
    pub(crate) timeout: Option<Duration>,

    pub(crate) body: RequestBody,
    pub(crate) state: SessionState,

    // Set by `connect`, dropped by `close`
    pub(crate) http: Option<reqwest::Client>,
}

impl ThermAppCloud {
    pub fn new(body: RequestBody) -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            body,
            state: SessionState::NotStarted,
            http: None,
        }
    }

    pub fn with_host(mut self, host: &str) -> Result<Self> {
        self.base_url = parse_base_url(host)?;
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn endpoint(&self, call: ServiceCall) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), call.path())
    }

    /// Session ID of the open session, or an error naming the call that
    /// needed one.
    pub(crate) fn require_active(&self, call: ServiceCall) -> Result<&str> {
        match &self.state {
            SessionState::Active(id) => Ok(id),
            SessionState::NotStarted => Err(CalibrationError::Session(format!(
                "{call} requires an open session; call SessionStart first"
            ))),
            SessionState::Closed => Err(CalibrationError::Session(format!(
                "{call} issued after SessionEnd"
            ))),
        }
    }

    /// POST the request body for `call` and hand back the response once its
    /// status and media type have been checked. The payload is left unread.
    pub(crate) async fn post(&self, call: ServiceCall, data: Option<Value>) -> Result<Response> {
        let http = self.http.as_ref().ok_or_else(|| {
            CalibrationError::Session("Not connected; call connect() first".to_string())
        })?;

        let url = self.endpoint(call);
        let payload = self.body.render(data);
        debug!(%url, %payload, "POST {}", call);

        // `json` sets Content-Type: application/json
        let response = http
            .post(&url)
            .header(ACCEPT, call.accept())
            .json(&payload)
            .send()
            .await?;

        check_response(call, &response)?;
        Ok(response)
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        call: ServiceCall,
        data: Option<Value>,
    ) -> Result<ServiceResponse<T>> {
        let bytes = self.post(call, data).await?.bytes().await?;
        let reply: ServiceResponse<T> = serde_json::from_slice(&bytes).map_err(|e| {
            CalibrationError::Serialization(format!("Error parsing {} response: {}", call, e))
        })?;

        if reply.has_error() {
            warn!(
                "{} reported an error: {}",
                call,
                reply.error_message.as_deref().unwrap_or("(no message)")
            );
        }

        Ok(reply)
    }
}

/// Reject anything but `200 OK` with the media type `call` expects.
pub fn check_response(call: ServiceCall, response: &Response) -> Result<()> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(CalibrationError::Status {
            call,
            status: status.as_u16(),
            reason: reason_phrase(response).to_string(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !content_type.starts_with(call.accept()) {
        return Err(CalibrationError::ContentType {
            call,
            content_type: content_type.to_string(),
        });
    }

    Ok(())
}

/// The phrase from the status line. hyper only keeps it when it differs from
/// the canonical one, so fall back to that.
fn reason_phrase(response: &Response) -> &str {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or_default()
}

/// Accepts either a full URL or a bare host name, which is reached over
/// plain HTTP like the app does.
pub fn parse_base_url(host: &str) -> Result<Url> {
    let host = host.trim();
    if host.is_empty() {
        return Err(CalibrationError::Config("empty host".to_string()));
    }

    let raw = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };

    let url = Url::parse(&raw)
        .map_err(|e| CalibrationError::Config(format!("invalid host {:?}: {}", host, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CalibrationError::Config(format!(
            "unsupported scheme {:?} in {:?}",
            other, host
        ))),
    }
}

fn default_base_url() -> Url {
    Url::parse(&format!("http://{}", DEFAULT_HOST)).expect("default host is a valid URL")
}
