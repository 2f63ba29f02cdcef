/// External disease classifier.
///
/// Both backends speak JSON over HTTP and return the same detection shape:
/// center x/y, width/height in source pixels, confidence, and class label.

mod fetch;
pub mod handle;
pub mod hosted;
pub mod local;

use crate::error::{AppError, API_FALLBACK_MESSAGE};
use crate::postprocess::detection::RawDetection;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use url::Url;

pub use handle::ClassifierHandle;

/// A validated image, ready to send.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Upload { bytes: Vec<u8>, mime: &'static str },
    Remote(Url),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutput {
    pub detections: Vec<RawDetection>,
    /// Natural (width, height) of the source image, when the service reports it.
    pub image_size: Option<(u32, u32)>,
}

#[async_trait]
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn classify(&self, image: &ImageSource) -> Result<ClassifierOutput, AppError>;
}

#[derive(Debug, Deserialize)]
struct WireImage {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireError {
    Text(String),
    Detail { message: Option<String> },
}

impl WireError {
    fn into_message(self) -> String {
        match self {
            WireError::Text(text) => text,
            WireError::Detail { message } => {
                message.unwrap_or_else(|| "Unknown prediction API error".to_string())
            }
        }
    }
}

/// Detection response body. The local server may answer with a single
/// `label`/`confidence` pair instead of a prediction list.
#[derive(Debug, Default, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    predictions: Option<Vec<RawDetection>>,
    #[serde(default)]
    image: Option<WireImage>,
    #[serde(default)]
    error: Option<WireError>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Clamp confidence into [0, 1]; NaN becomes 0.
fn sanitize(mut det: RawDetection) -> RawDetection {
    if !(0.0..=1.0).contains(&det.confidence) {
        let fixed = if det.confidence.is_nan() {
            0.0
        } else {
            det.confidence.clamp(0.0, 1.0)
        };
        warn!(
            class = %det.class_label,
            confidence = det.confidence,
            "classifier confidence out of range, clamped to {fixed}"
        );
        det.confidence = fixed;
    }
    det
}

/// Pull a human-readable message out of an error response body.
fn api_error_message(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => {
            let err = value.get("error").unwrap_or(&value);
            if let Some(text) = err.as_str() {
                return text.to_string();
            }
            err.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| API_FALLBACK_MESSAGE.to_string())
        }
        Err(_) if !trimmed.is_empty() => trimmed.to_string(),
        Err(_) => API_FALLBACK_MESSAGE.to_string(),
    }
}

/// Turn a classifier HTTP response into a parsed body, mapping error statuses
/// and in-body errors to `AppError::Api`.
async fn read_response(response: reqwest::Response) -> Result<DetectResponse, AppError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AppError::Api {
            status: Some(status.as_u16()),
            message: api_error_message(&body),
        });
    }

    let parsed: DetectResponse = serde_json::from_str(&body).map_err(|e| AppError::Api {
        status: None,
        message: format!("Malformed response from classifier: {e}"),
    })?;

    match parsed.error {
        Some(err) => Err(AppError::Api {
            status: None,
            message: err.into_message(),
        }),
        None => Ok(parsed),
    }
}

impl DetectResponse {
    /// `probed` is the size measured from the image bytes, used when the body
    /// has no `image` block.
    fn into_output(self, probed: Option<(u32, u32)>) -> ClassifierOutput {
        let image_size = self.image.map(|i| (i.width, i.height)).or(probed);

        let detections = match (self.predictions, self.label) {
            (Some(predictions), _) => predictions.into_iter().map(sanitize).collect(),
            (None, Some(label)) => {
                let (w, h) = image_size.unwrap_or((0, 0));
                vec![sanitize(RawDetection {
                    center_x: w as f64 / 2.0,
                    center_y: h as f64 / 2.0,
                    width: w as f64,
                    height: h as f64,
                    confidence: self.confidence.unwrap_or(0.0),
                    class_label: label,
                })]
            }
            (None, None) => Vec::new(),
        };

        ClassifierOutput {
            detections,
            image_size,
        }
    }
}
