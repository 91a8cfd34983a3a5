use crate::client::ThermAppCloud;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use tracing::debug;

#[async_trait]
pub trait Connection: Send + Sync {
    /// Build the HTTP client used for every call of the session
    async fn connect(&mut self) -> Result<()>;

    /// Drop the HTTP client and its pooled connection
    async fn close(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Get the service host
    fn host(&self) -> &str;
}

#[async_trait]
impl Connection for ThermAppCloud {
    async fn connect(&mut self) -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("Keep-Alive"));

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            // A 3xx is a failed call like any other non-200
            .redirect(Policy::none())
            .pool_max_idle_per_host(1);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        self.http = Some(builder.build()?);
        debug!(base_url = %self.base_url, "connected to {}", self.host());

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.http.take().is_some() {
            debug!(base_url = %self.base_url, "connection closed");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.http.is_some()
    }

    fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }
}
