use std::path::{Path, PathBuf};

use crate::{
    domain::DetectionArtifact,
    service::FaceService,
    tools::{file_tools::{filename_from_path, has_file, read_json_artifact, write_json_artifact}, log::{log_info, LogServiceType}},
    Error, Result,
};

/// Sends `image_path` to the service and writes the detection artifact to `artifact_path`.
/// Nothing is written when the remote call fails.
pub async fn detect_faces<S: FaceService + ?Sized>(service: &S, image_path: &Path, artifact_path: &Path) -> Result<DetectionArtifact> {
    if !has_file(image_path).await {
        return Err(Error::FileNotFound(PathBuf::from(image_path)));
    }
    let image = tokio::fs::read(image_path).await?;
    let file_name = filename_from_path(&image_path.to_string_lossy()).unwrap_or_else(|| "image".to_string());

    log_info(LogServiceType::Detection, format!("Detecting faces on {:?} ({} bytes)", image_path, image.len()));
    let artifact = service.detect(image, &file_name).await?;
    log_info(LogServiceType::Detection, format!("Detected {} faces", artifact.faces.len()));

    write_json_artifact(artifact_path, &artifact).await?;
    log_info(LogServiceType::Detection, format!("Saved face tokens to {:?}", artifact_path));
    Ok(artifact)
}

/// With `reuse` set and an artifact already on disk, loads it instead of calling the service.
pub async fn detect_or_reuse<S: FaceService + ?Sized>(service: &S, image_path: &Path, artifact_path: &Path, reuse: bool) -> Result<DetectionArtifact> {
    if reuse && has_file(artifact_path).await {
        log_info(LogServiceType::Detection, format!("Reusing face tokens from {:?}", artifact_path));
        return load_detection(artifact_path).await;
    }
    detect_faces(service, image_path, artifact_path).await
}

pub async fn load_detection(artifact_path: &Path) -> Result<DetectionArtifact> {
    read_json_artifact::<DetectionArtifact>(artifact_path).await?
        .ok_or_else(|| Error::ArtifactNotFound(PathBuf::from(artifact_path)))
}
