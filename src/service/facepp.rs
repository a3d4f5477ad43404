use async_trait::async_trait;
use reqwest::{multipart::{Form, Part}, Client, Response, Url};
use serde::Deserialize;

use crate::{config::{CompareConfig, Credentials}, domain::DetectionArtifact, tools::file_tools::get_mime_from_filename, Error, Result};

use super::FaceService;

const DETECT_PATH: &str = "facepp/v3/detect";
const COMPARE_PATH: &str = "facepp/v3/compare";

#[derive(Debug, Deserialize)]
struct CompareResponse {
    confidence: Option<f64>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FaceppContext {
    base_url: Url,
    credentials: Credentials,
    client: Client
}

impl FaceppContext {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let normalized = if base_url.ends_with('/') { base_url.to_string() } else { format!("{}/", base_url) };
        let base_url = Url::parse(&normalized).map_err(|e| Error::Error { message: format!("invalid face service url {}: {}", base_url, e) })?;
        Ok(FaceppContext {
            base_url,
            credentials,
            client: Client::new()
        })
    }

    pub fn from_config(config: &CompareConfig) -> Result<Self> {
        Self::new(&config.api_url, config.credentials.clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| Error::remote(path, e.to_string()))
    }

    fn auth_form(&self) -> Form {
        Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("api_secret", self.credentials.api_secret.clone())
    }
}

/// Turns a non-success status into a service error, using `error_message` when the body has one.
async fn check_status(endpoint: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body).ok()
        .and_then(|e| e.error_message)
        .unwrap_or(body);
    Err(Error::remote(endpoint, format!("{}: {}", status, message)))
}

#[async_trait]
impl FaceService for FaceppContext {
    async fn detect(&self, image: Vec<u8>, file_name: &str) -> Result<DetectionArtifact> {
        let url = self.endpoint(DETECT_PATH)?;
        let mime = get_mime_from_filename(file_name).unwrap_or_else(|| "application/octet-stream".to_string());
        let part = Part::bytes(image).file_name(file_name.to_string()).mime_str(&mime)?;
        let form = self.auth_form().part("image_file", part);

        let response = self.client.post(url).multipart(form).send().await
            .map_err(|e| Error::remote(DETECT_PATH, e.to_string()))?;
        let response = check_status(DETECT_PATH, response).await?;
        let body = response.text().await.map_err(|e| Error::remote(DETECT_PATH, e.to_string()))?;
        serde_json::from_str::<DetectionArtifact>(&body)
            .map_err(|e| Error::remote(DETECT_PATH, format!("malformed payload: {}", e)))
    }

    async fn compare(&self, first_token: &str, second_token: &str) -> Result<f64> {
        let url = self.endpoint(COMPARE_PATH)?;
        let params = [
            ("api_key", self.credentials.api_key.as_str()),
            ("api_secret", self.credentials.api_secret.as_str()),
            ("face_token1", first_token),
            ("face_token2", second_token),
        ];
        let response = self.client.post(url).form(&params).send().await?;
        let response = check_status(COMPARE_PATH, response).await?;
        let result = response.json::<CompareResponse>().await?;
        match (result.confidence, result.error_message) {
            (Some(confidence), _) => Ok(confidence),
            (None, Some(message)) => Err(Error::remote(COMPARE_PATH, message)),
            (None, None) => Err(Error::remote(COMPARE_PATH, "response has no confidence")),
        }
    }
}
