use crate::error::{CalibrationError, Result};
use chrono::{DateTime, Utc};
use reqwest::Response;
use std::fs::FileTimes;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Make sure `<parent>/<serial>` exists as a directory. An existing directory
/// is reused.
pub async fn prepare_output_dir(parent: &Path, serial: &str) -> Result<PathBuf> {
    let dir = parent.join(checked_file_name(serial)?);

    let exists = tokio::fs::metadata(&dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if !exists {
        tokio::fs::create_dir(&dir)
            .await
            .map_err(|source| CalibrationError::OutputDirectory {
                path: dir.clone(),
                source,
            })?;
    }

    Ok(dir)
}

/// A name the server handed us must stay a single plain path component.
pub fn checked_file_name(name: &str) -> Result<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(name),
        _ => Err(CalibrationError::InvalidFileName(name.to_string())),
    }
}

/// Stream the response body into `path`, truncating whatever was there, then
/// stamp the file with `created_at` when one is known.
pub async fn save_response(
    path: &Path,
    mut response: Response,
    created_at: Option<DateTime<Utc>>,
) -> Result<u64> {
    let mut file = File::create(path).await?;
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    file.sync_all().await?;

    if let Some(created_at) = created_at {
        let file = file.into_std().await;
        restore_timestamp(&file, created_at)?;
    }

    Ok(written)
}

/// Set both access and modification time.
pub fn restore_timestamp(file: &std::fs::File, at: DateTime<Utc>) -> Result<()> {
    let time = SystemTime::from(at);
    file.set_times(FileTimes::new().set_accessed(time).set_modified(time))?;
    Ok(())
}
