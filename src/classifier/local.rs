/// Client for an inference server running alongside the service.
///
/// The server only accepts image bytes, so URL submissions are downloaded
/// here first. It does not report image dimensions; those are probed from
/// the bytes.

use super::fetch::fetch_image;
use super::{read_response, Classifier, ClassifierOutput, ImageSource};
use crate::config::Endpoint;
use crate::error::AppError;
use crate::preprocess::decode::probe_image;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

#[derive(Clone)]
pub struct LocalClassifier {
    base_url: String,
    client: Client,
}

impl LocalClassifier {
    /// Build the client and check the server answers `/health`.
    pub async fn connect(endpoint: &Endpoint) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        let health_url = format!("{}/health", endpoint.url);
        let unreachable = |detail: String| {
            AppError::Unreachable(format!(
                "Failed to connect to the inference server at {}: {detail}",
                endpoint.url
            ))
        };

        let response = client
            .get(&health_url)
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unreachable(format!("health check returned {}", response.status())));
        }

        info!(url = %endpoint.url, "connected to local inference server");
        Ok(Self {
            base_url: endpoint.url.clone(),
            client,
        })
    }
}

#[async_trait]
impl Classifier for LocalClassifier {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn classify(&self, image: &ImageSource) -> Result<ClassifierOutput, AppError> {
        let downloaded;
        let bytes: &[u8] = match image {
            ImageSource::Upload { bytes, .. } => bytes,
            ImageSource::Remote(url) => {
                downloaded = fetch_image(&self.client, url).await?;
                &downloaded
            }
        };

        let info = probe_image(bytes)
            .map_err(|e| AppError::Validation(format!("Invalid image format: {e}")))?;
        debug!(
            width = info.width,
            height = info.height,
            format = info.mime(),
            "sending image to local inference server"
        );

        let data_url = format!("data:{};base64,{}", info.mime(), B64.encode(bytes));
        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&json!({ "image": data_url }))
            .send()
            .await?;

        let body = read_response(response).await?;
        Ok(body.into_output(Some((info.width, info.height))))
    }
}
