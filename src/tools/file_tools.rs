use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs::{metadata, read_to_string, write};

use crate::{Error, Result};

pub fn filename_from_path(path: &str) -> Option<String> {
    let escaped = path.replace('\\', "/");
    escaped.split('/').last().filter(|last| !last.is_empty()).map(|last| last.to_owned())
}

pub fn get_mime_from_filename(path: &str) -> Option<String> {
    mime_guess::from_path(path).first().map(|mime| mime.to_string())
}

pub async fn has_file(path: &Path) -> bool {
    metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

/// Reads and parses a JSON artifact. A missing file is `Ok(None)`.
pub async fn read_json_artifact<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let data = match read_to_string(path).await {
        Ok(data) => data,
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => return Ok(None),
            _ => return Err(e.into()),
        }
    };
    serde_json::from_str::<T>(&data)
        .map(Some)
        .map_err(|e| Error::MalformedArtifact { path: PathBuf::from(path), message: e.to_string() })
}

pub async fn write_json_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_string_pretty(value)?;
    write(path, data.as_bytes()).await?;
    Ok(())
}
