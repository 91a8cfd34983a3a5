use crate::client::{ServiceCall, ThermAppCloud};
use crate::error::{CalibrationError, Result};
use crate::protocol::FileDescriptor;
use crate::storage::{checked_file_name, save_response};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One file written by `download_file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub name: String,
    pub path: PathBuf,
    pub bytes: u64,
    /// `None` when the creation stamp could not be decoded and the file kept
    /// its download time.
    pub modified: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait FileManagement: Send + Sync {
    /// List the files stored under `folder` (the camera serial)
    async fn get_files_list(&self, folder: &str) -> Result<Vec<FileDescriptor>>;

    /// Fetch one file's bytes into memory
    async fn get_file(&self, token: &str) -> Result<Vec<u8>>;

    /// Fetch one file into `target_dir` and restore its creation time
    async fn download_file(
        &self,
        descriptor: &FileDescriptor,
        target_dir: &Path,
    ) -> Result<SavedFile>;
}

#[async_trait]
impl FileManagement for ThermAppCloud {
    async fn get_files_list(&self, folder: &str) -> Result<Vec<FileDescriptor>> {
        self.require_active(ServiceCall::GetFilesList)?;

        info!("GetFilesList {}", folder);
        let reply = self
            .post_json::<Vec<FileDescriptor>>(
                ServiceCall::GetFilesList,
                Some(json!({ "folder": folder })),
            )
            .await?;

        let files = reply.data.ok_or_else(|| {
            CalibrationError::Serialization("GetFilesList reply has no data".to_string())
        })?;
        debug!("{} files listed", files.len());

        Ok(files)
    }

    async fn get_file(&self, token: &str) -> Result<Vec<u8>> {
        self.require_active(ServiceCall::GetFile)?;

        let response = self
            .post(ServiceCall::GetFile, Some(json!({ "token": token })))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn download_file(
        &self,
        descriptor: &FileDescriptor,
        target_dir: &Path,
    ) -> Result<SavedFile> {
        self.require_active(ServiceCall::GetFile)?;
        let name = checked_file_name(&descriptor.name)?;

        info!("GetFile {}", name);
        let response = self
            .post(
                ServiceCall::GetFile,
                Some(json!({ "token": descriptor.token })),
            )
            .await?;

        let created_at = descriptor.created_at();
        if created_at.is_none() {
            debug!(
                created_date = ?descriptor.created_date,
                "{}: creation date not decodable, keeping download time", name
            );
        }

        let path = target_dir.join(name);
        let bytes = save_response(&path, response, created_at).await?;

        if descriptor.length != 0 && bytes != descriptor.length {
            warn!(
                "{}: listing announced {} bytes, received {}",
                name, descriptor.length, bytes
            );
        }

        Ok(SavedFile {
            name: name.to_string(),
            path,
            bytes,
            modified: created_at,
        })
    }
}
