use std::path::Path;

use crate::{
    domain::{ComparedFace, ComparisonRecord, ComparisonResultSet, FaceDescriptor},
    service::FaceService,
    tools::{clock::{now, Clock}, file_tools::{read_json_artifact, write_json_artifact}, log::{log_error, log_info, LogServiceType}},
    Error, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSource {
    /// Loaded from an existing artifact, no remote call made.
    Cache,
    Computed { failed: usize },
}

/// Returns the cached result set when the artifact exists. Presence alone makes it valid:
/// it is not checked against `faces`. Otherwise every pair is compared and the artifact written.
pub async fn load_or_compare<S: FaceService + ?Sized>(service: &S, faces: &[FaceDescriptor], artifact_path: &Path) -> Result<(ComparisonResultSet, ComparisonSource)> {
    if let Some(cached) = read_json_artifact::<ComparisonResultSet>(artifact_path).await? {
        log_info(LogServiceType::Comparison, format!("Loading existing comparison results from {:?}", artifact_path));
        return Ok((cached, ComparisonSource::Cache));
    }

    log_info(LogServiceType::Comparison, format!("Performing new comparisons for {} faces", faces.len()));
    let (results, failed) = compare_all(service, faces).await;
    write_json_artifact(artifact_path, &results).await?;
    log_info(LogServiceType::Comparison, format!("Saved {} comparisons to {:?} ({} failed)", results.comparisons.len(), artifact_path, failed));
    Ok((results, ComparisonSource::Computed { failed }))
}

/// Compares each unordered pair once, `i` then `j` ascending. Failed pairs are logged and skipped.
pub async fn compare_all<S: FaceService + ?Sized>(service: &S, faces: &[FaceDescriptor]) -> (ComparisonResultSet, usize) {
    let mut results = ComparisonResultSet::new(now().print());
    let mut failed = 0;

    for (i, first) in faces.iter().enumerate() {
        for second in &faces[i + 1..] {
            match service.compare(&first.token, &second.token).await {
                Ok(confidence) => results.comparisons.push(ComparisonRecord {
                    face1: ComparedFace { number: first.index, token: first.token.clone() },
                    face2: ComparedFace { number: second.index, token: second.token.clone() },
                    confidence,
                }),
                Err(e) => {
                    failed += 1;
                    let err = Error::ComparisonCall { first: first.index, second: second.index, message: e.to_string() };
                    log_error(LogServiceType::Comparison, err.to_string());
                }
            }
        }
    }

    (results, failed)
}
