use async_trait::async_trait;

use crate::{domain::DetectionArtifact, Result};

pub mod facepp;

pub use facepp::FaceppContext;

/// Remote face detection and comparison capability.
#[async_trait]
pub trait FaceService: Send + Sync {
    /// Detects faces on an encoded image. Faces come back in service order.
    async fn detect(&self, image: Vec<u8>, file_name: &str) -> Result<DetectionArtifact>;

    /// Similarity between two face tokens, 0 to 100.
    async fn compare(&self, first_token: &str, second_token: &str) -> Result<f64>;
}
