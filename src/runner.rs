use crate::client::ThermAppCloud;
use crate::commands::{Connection, FileManagement, SavedFile, Session};
use crate::constants::{DEFAULT_HOST, DEFAULT_USER_AGENT};
use crate::error::{CalibrationError, Result};
use crate::protocol::RequestBody;
use crate::storage::prepare_output_dir;
use std::path::PathBuf;
use std::time::Duration;

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub body: RequestBody,
    pub host: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn new(body: RequestBody) -> Self {
        Self {
            body,
            host: DEFAULT_HOST.to_string(),
            output_dir: PathBuf::from("."),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub session_id: String,
    pub directory: PathBuf,
    pub files: Vec<SavedFile>,
}

impl Summary {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }
}

/// SessionStart, GetFilesList, GetFile for every listed file, SessionEnd.
///
/// The first failure ends the run; SessionEnd is not sent after an error.
pub async fn run(config: &Config) -> Result<Summary> {
    let serial = config
        .body
        .serial_number()
        .ok_or_else(|| CalibrationError::Config("serialNumber is required".to_string()))?
        .to_string();

    let directory = prepare_output_dir(&config.output_dir, &serial).await?;

    let mut cloud = ThermAppCloud::new(config.body.clone())
        .with_host(&config.host)?
        .with_user_agent(config.user_agent.as_str())
        .with_timeout(config.timeout);
    cloud.connect().await?;

    let session_id = cloud.session_start().await?;

    let listing = cloud.get_files_list(&serial).await?;
    let mut files = Vec::with_capacity(listing.len());
    for descriptor in &listing {
        files.push(cloud.download_file(descriptor, &directory).await?);
    }

    cloud.session_end().await?;
    cloud.close().await?;

    Ok(Summary {
        session_id,
        directory,
        files,
    })
}
