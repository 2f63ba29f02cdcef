/// Prediction orchestration: validate, classify, group, report.

pub mod input;
pub mod report;

use crate::classifier::{ClassifierHandle, ImageSource};
use crate::error::AppError;
use crate::postprocess::detection::{normalize, DetectionGroup};
use crate::preprocess::decode::probe_image;
use std::time::Instant;
use tracing::{debug, info};

pub use input::{Submission, UploadedFile};
pub use report::{build_reports, Report};

/// Grouped result of one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub groups: Vec<DetectionGroup>,
    pub image_url: String,
    pub natural_width: u32,
    pub natural_height: u32,
}

pub struct Predictor {
    classifier: ClassifierHandle,
    min_confidence: f64,
    max_upload_bytes: usize,
}

impl Predictor {
    pub fn new(classifier: ClassifierHandle, min_confidence: f64, max_upload_bytes: usize) -> Self {
        Self {
            classifier,
            min_confidence,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Run one submission through the classifier. Configuration and input
    /// problems are reported before any request is made.
    pub async fn predict(&self, submission: Submission) -> Result<Prediction, AppError> {
        let start = Instant::now();

        self.classifier.check_config()?;
        let source = submission.validate(self.max_upload_bytes)?;

        let classifier = self.classifier.get().await?;
        let output = classifier.classify(&source).await?;
        debug!(
            backend = classifier.name(),
            detections = output.detections.len(),
            "classifier responded"
        );

        let (natural_width, natural_height) = match output.image_size {
            Some(size) => size,
            None => probed_size(&source)?,
        };

        let groups = normalize(&output.detections, self.min_confidence);
        info!(
            groups = groups.len(),
            top = %groups[0].class_name,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "prediction complete"
        );

        Ok(Prediction {
            groups,
            image_url: source.display_url(),
            natural_width,
            natural_height,
        })
    }

    pub async fn report(&self, submission: Submission) -> Result<Vec<Report>, AppError> {
        let prediction = self.predict(submission).await?;
        Ok(build_reports(&prediction))
    }
}

fn probed_size(source: &ImageSource) -> Result<(u32, u32), AppError> {
    let missing = || AppError::Api {
        status: None,
        message: "Classifier did not report image dimensions".to_string(),
    };
    match source {
        ImageSource::Upload { bytes, .. } => probe_image(bytes)
            .map(|info| (info.width, info.height))
            .map_err(|_| missing()),
        ImageSource::Remote(_) => Err(missing()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Classifier, ClassifierOutput};
    use crate::config::{Backend, ClassifierSettings};
    use crate::postprocess::detection::{RawDetection, UNDETERMINED};
    use crate::preprocess::decode::tests::encoded;
    use async_trait::async_trait;
    use image::ImageFormat;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct FakeClassifier {
        result: Result<ClassifierOutput, AppError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Classifier for FakeClassifier {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn classify(&self, _image: &ImageSource) -> Result<ClassifierOutput, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(out) => Ok(out.clone()),
                Err(AppError::Timeout) => Err(AppError::Timeout),
                Err(e) => Err(AppError::Internal(e.to_string())),
            }
        }
    }

    fn det(class: &str, confidence: f64) -> RawDetection {
        RawDetection {
            center_x: 100.0,
            center_y: 80.0,
            width: 40.0,
            height: 30.0,
            confidence,
            class_label: class.to_string(),
        }
    }

    fn predictor(result: Result<ClassifierOutput, AppError>) -> (Predictor, Arc<FakeClassifier>) {
        let fake = Arc::new(FakeClassifier {
            result,
            calls: AtomicUsize::new(0),
        });
        let handle = ClassifierHandle::with_classifier(fake.clone());
        (Predictor::new(handle, 0.25, 4 * 1024 * 1024), fake)
    }

    fn url_submission() -> Submission {
        Submission {
            file: None,
            image_url: Some("https://example.com/leaf.jpg".to_string()),
        }
    }

    #[tokio::test]
    async fn groups_and_keeps_reported_size() {
        let (predictor, _) = predictor(Ok(ClassifierOutput {
            detections: vec![det("Canker", 0.4), det("Spider_Mites", 0.8), det("Canker", 0.9)],
            image_size: Some((800, 600)),
        }));

        let p = predictor.predict(url_submission()).await.unwrap();
        assert_eq!(p.image_url, "https://example.com/leaf.jpg");
        assert_eq!((p.natural_width, p.natural_height), (800, 600));
        assert_eq!(p.groups[0].class_name, "Canker");
        assert_eq!(p.groups[0].instances.len(), 2);
        assert_eq!(p.groups[1].class_name, "Spider_Mites");
    }

    #[tokio::test]
    async fn nothing_confident_is_undetermined() {
        let (predictor, _) = predictor(Ok(ClassifierOutput {
            detections: vec![det("Canker", 0.1)],
            image_size: Some((10, 10)),
        }));

        let reports = predictor.report(url_submission()).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].class_name, UNDETERMINED);
        assert!(reports[0].instances.is_empty());
        assert_eq!(reports[0].highest_confidence, 1.0);
    }

    #[tokio::test]
    async fn upload_size_is_probed_when_unreported() {
        let (predictor, _) = predictor(Ok(ClassifierOutput {
            detections: vec![det("Healthy", 0.95)],
            image_size: None,
        }));
        let submission = Submission {
            file: Some(UploadedFile {
                bytes: encoded(120, 90, ImageFormat::Png),
                content_type: Some("image/png".to_string()),
                file_name: None,
            }),
            image_url: None,
        };

        let p = predictor.predict(submission).await.unwrap();
        assert_eq!((p.natural_width, p.natural_height), (120, 90));
        assert!(p.image_url.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn unknown_size_for_url_is_api_error() {
        let (predictor, _) = predictor(Ok(ClassifierOutput {
            detections: vec![],
            image_size: None,
        }));
        let err = predictor.predict(url_submission()).await.unwrap_err();
        assert!(matches!(err, AppError::Api { status: None, .. }));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_classifier() {
        let (predictor, fake) = predictor(Ok(ClassifierOutput {
            detections: vec![],
            image_size: Some((1, 1)),
        }));
        let err = predictor.predict(Submission::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn classifier_errors_propagate() {
        let (predictor, _) = predictor(Err(AppError::Timeout));
        let err = predictor.predict(url_submission()).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout));
    }

    #[tokio::test]
    async fn missing_configuration_wins_over_bad_input() {
        let handle = ClassifierHandle::new(ClassifierSettings {
            backend: Backend::Hosted,
            url: Some("https://detect.example.com/model/1".to_string()),
            api_key: None,
            timeout: Duration::from_secs(1),
        });
        let predictor = Predictor::new(handle, 0.25, 1024);
        let err = predictor.predict(Submission::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
