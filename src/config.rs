/// Environment-based configuration.

use crate::error::AppError;
use std::time::Duration;

const DEFAULT_LOCAL_URL: &str = "http://localhost:5000";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Hosted detection API, authenticated with an API key.
    Hosted,
    /// Inference server running next to this service.
    Local,
}

impl Backend {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Backend::Local,
            _ => Backend::Hosted,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClassifierSettings {
    pub backend: Backend,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Classifier settings that passed the presence checks.
#[derive(Clone, Debug)]
pub struct Endpoint {
    pub backend: Backend,
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ClassifierSettings {
    /// Resolve the endpoint, failing when the URL or (hosted) credential is absent.
    pub fn endpoint(&self) -> Result<Endpoint, AppError> {
        let url = non_empty(self.url.as_deref()).ok_or_else(|| {
            AppError::Config(
                "Classifier URL is not configured. Please check server environment variables."
                    .to_string(),
            )
        })?;

        let api_key = non_empty(self.api_key.as_deref());
        if self.backend == Backend::Hosted && api_key.is_none() {
            return Err(AppError::Config(
                "API key for the prediction service is not configured. Please check server environment variables."
                    .to_string(),
            ));
        }

        Ok(Endpoint {
            backend: self.backend,
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
            timeout: self.timeout,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub classifier: ClassifierSettings,
    pub min_confidence: f64,
    pub max_upload_bytes: usize,
    pub overlay_width: f64,
    pub overlay_height: f64,
}

impl Config {
    pub fn from_env() -> Self {
        let backend = std::env::var("CLASSIFIER_BACKEND")
            .map(|b| Backend::parse(&b))
            .unwrap_or(Backend::Hosted);

        let url = std::env::var("CLASSIFIER_URL").ok().or_else(|| match backend {
            Backend::Local => Some(DEFAULT_LOCAL_URL.to_string()),
            Backend::Hosted => None,
        });

        Self {
            port: parsed("PORT").unwrap_or(8000),
            classifier: ClassifierSettings {
                backend,
                url,
                api_key: std::env::var("CLASSIFIER_API_KEY").ok(),
                timeout: Duration::from_secs(parsed("CLASSIFIER_TIMEOUT_SECS").unwrap_or(20)),
            },
            min_confidence: parsed("MIN_CONFIDENCE").unwrap_or(0.25),
            max_upload_bytes: parsed("MAX_UPLOAD_BYTES").unwrap_or(4 * 1024 * 1024),
            overlay_width: parsed("OVERLAY_WIDTH").unwrap_or(640.0),
            overlay_height: parsed("OVERLAY_HEIGHT").unwrap_or(384.0),
        }
    }
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
