/// Hosted detection API client.
///
/// Uploads go out as a base64 body; URL submissions are passed through as the
/// `image` query parameter so the service fetches them itself.

use super::{read_response, Classifier, ClassifierOutput, ImageSource};
use crate::config::Endpoint;
use crate::error::AppError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

#[derive(Clone)]
pub struct HostedClassifier {
    url: String,
    api_key: String,
    client: Client,
}

impl HostedClassifier {
    pub fn new(endpoint: &Endpoint) -> Result<Self, AppError> {
        let api_key = endpoint.api_key.clone().ok_or_else(|| {
            AppError::Config("API key for the prediction service is not configured.".to_string())
        })?;

        let client = Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: endpoint.url.clone(),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl Classifier for HostedClassifier {
    fn name(&self) -> &'static str {
        "hosted"
    }

    async fn classify(&self, image: &ImageSource) -> Result<ClassifierOutput, AppError> {
        let request = self
            .client
            .post(&self.url)
            .query(&[("api_key", self.api_key.as_str())]);

        let request = match image {
            ImageSource::Upload { bytes, .. } => {
                debug!(bytes = bytes.len(), "sending upload to hosted classifier");
                request
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(B64.encode(bytes))
            }
            ImageSource::Remote(url) => {
                debug!(%url, "sending image URL to hosted classifier");
                request.query(&[("image", url.as_str())])
            }
        };

        let response = request.send().await?;
        let body = read_response(response).await?;
        Ok(body.into_output(None))
    }
}
