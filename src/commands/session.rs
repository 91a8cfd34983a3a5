use crate::client::{ServiceCall, SessionState, ThermAppCloud};
use crate::error::{CalibrationError, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

#[async_trait]
pub trait Session: Send + Sync {
    /// Open a session; every later request carries the returned ID
    async fn session_start(&mut self) -> Result<String>;

    /// Close the session opened by `session_start`
    async fn session_end(&mut self) -> Result<()>;

    /// ID of the open session, if any
    fn session_id(&self) -> Option<&str>;

    fn is_active(&self) -> bool;
}

#[async_trait]
impl Session for ThermAppCloud {
    async fn session_start(&mut self) -> Result<String> {
        if self.state != SessionState::NotStarted {
            return Err(CalibrationError::Session(
                "SessionStart may only be issued once per client".to_string(),
            ));
        }

        info!("SessionStart");
        let reply = self
            .post_json::<Value>(ServiceCall::SessionStart, None)
            .await?;

        let session_id = reply.session_id.ok_or_else(|| {
            CalibrationError::Serialization("SessionStart reply has no sessionID".to_string())
        })?;

        self.body.set_session_id(session_id.clone());
        self.state = SessionState::Active(session_id.clone());

        Ok(session_id)
    }

    async fn session_end(&mut self) -> Result<()> {
        self.require_active(ServiceCall::SessionEnd)?;

        info!("SessionEnd");
        self.post_json::<Value>(ServiceCall::SessionEnd, Some(Value::Null))
            .await?;
        self.state = SessionState::Closed;

        Ok(())
    }

    fn session_id(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active(id) => Some(id),
            _ => None,
        }
    }

    fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }
}
