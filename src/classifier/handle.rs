/// Lazily created, shared classifier client.
///
/// The first submission builds the client (and for the local backend probes
/// the server). Concurrent first submissions wait on the same
/// initialisation. A failed initialisation leaves the handle empty, so the
/// next submission tries again.

use super::hosted::HostedClassifier;
use super::local::LocalClassifier;
use super::Classifier;
use crate::config::{Backend, ClassifierSettings, Endpoint};
use crate::error::AppError;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

pub struct ClassifierHandle {
    settings: Option<ClassifierSettings>,
    cell: OnceCell<Arc<dyn Classifier>>,
}

impl ClassifierHandle {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self {
            settings: Some(settings),
            cell: OnceCell::new(),
        }
    }

    /// Handle around an already-built classifier.
    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            settings: None,
            cell: OnceCell::new_with(Some(classifier)),
        }
    }

    /// Fail fast on missing URL/credential, without touching the network.
    pub fn check_config(&self) -> Result<(), AppError> {
        match &self.settings {
            Some(settings) => settings.endpoint().map(|_| ()),
            None => Ok(()),
        }
    }

    pub async fn get(&self) -> Result<Arc<dyn Classifier>, AppError> {
        self.cell
            .get_or_try_init(|| async {
                let settings = self.settings.as_ref().ok_or_else(|| {
                    AppError::Internal("classifier handle has no settings".to_string())
                })?;
                connect(&settings.endpoint()?).await
            })
            .await
            .map(Arc::clone)
    }
}

async fn connect(endpoint: &Endpoint) -> Result<Arc<dyn Classifier>, AppError> {
    let classifier: Arc<dyn Classifier> = match endpoint.backend {
        Backend::Hosted => Arc::new(HostedClassifier::new(endpoint)?),
        Backend::Local => Arc::new(LocalClassifier::connect(endpoint).await?),
    };
    info!(backend = classifier.name(), url = %endpoint.url, "classifier ready");
    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn local(url: Option<String>) -> ClassifierSettings {
        ClassifierSettings {
            backend: Backend::Local,
            url,
            api_key: None,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn concurrent_first_use_initialises_once() {
        let server = MockServer::start_async().await;
        let health = server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(200).delay(Duration::from_millis(100));
            })
            .await;

        let handle = ClassifierHandle::new(local(Some(server.base_url())));
        let (a, b, c, d) = tokio::join!(handle.get(), handle.get(), handle.get(), handle.get());

        for result in [&a, &b, &c, &d] {
            assert!(result.is_ok());
        }
        assert!(Arc::ptr_eq(a.as_ref().unwrap(), b.as_ref().unwrap()));
        assert_eq!(health.hits_async().await, 1);

        handle.get().await.unwrap();
        assert_eq!(health.hits_async().await, 1);
    }

    #[tokio::test]
    async fn failed_initialisation_is_retried() {
        let server = MockServer::start_async().await;
        let down = server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(503);
            })
            .await;

        let handle = ClassifierHandle::new(local(Some(server.base_url())));
        assert!(matches!(handle.get().await, Err(AppError::Unreachable(_))));

        down.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(200);
            })
            .await;
        assert!(handle.get().await.is_ok());
    }

    #[test]
    fn missing_url_is_config_error() {
        let handle = ClassifierHandle::new(ClassifierSettings {
            backend: Backend::Hosted,
            url: None,
            api_key: None,
            timeout: Duration::from_secs(5),
        });
        assert!(matches!(handle.check_config(), Err(AppError::Config(_))));
    }
}
