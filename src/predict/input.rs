/// Submission validation. Nothing here touches the network.

use crate::classifier::ImageSource;
use crate::error::AppError;
use crate::preprocess::decode::sniff_format;
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use image::ImageFormat;
use tracing::debug;
use url::Url;

const ALLOWED_TYPES: [(&str, &str); 3] = [
    ("image/jpeg", "image/jpeg"),
    ("image/jpg", "image/jpeg"),
    ("image/png", "image/png"),
];

#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

/// What the form sent: a file, a URL, both, or neither.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub file: Option<UploadedFile>,
    pub image_url: Option<String>,
}

impl Submission {
    /// Validate into an image source. A non-empty file wins over a URL.
    pub fn validate(self, max_upload_bytes: usize) -> Result<ImageSource, AppError> {
        let file = self.file.filter(|f| !f.bytes.is_empty());
        let url = self
            .image_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        match (file, url) {
            (Some(file), _) => validate_file(file, max_upload_bytes),
            (None, Some(url)) => validate_url(&url),
            (None, None) => Err(AppError::Validation(
                "Please provide either an image file or an image URL.".to_string(),
            )),
        }
    }
}

fn validate_file(file: UploadedFile, max_upload_bytes: usize) -> Result<ImageSource, AppError> {
    if file.bytes.len() > max_upload_bytes {
        return Err(AppError::Validation(format!(
            "Image file is too large. Please upload an image smaller than {}MB.",
            max_upload_bytes / (1024 * 1024)
        )));
    }

    // Browsers occasionally omit the part's content type; fall back to the bytes.
    let declared = file
        .content_type
        .as_deref()
        .map(|t| t.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty() && t != "application/octet-stream");

    let mime = match declared {
        Some(declared) => ALLOWED_TYPES
            .iter()
            .find(|(name, _)| *name == declared)
            .map(|(_, canonical)| *canonical),
        None => match sniff_format(&file.bytes) {
            Some(ImageFormat::Jpeg) => Some("image/jpeg"),
            Some(ImageFormat::Png) => Some("image/png"),
            _ => None,
        },
    };

    let mime = mime.ok_or_else(|| {
        AppError::Validation("Invalid file type. Please upload a JPG or PNG image.".to_string())
    })?;

    debug!(
        file = file.file_name.as_deref().unwrap_or("-"),
        bytes = file.bytes.len(),
        mime,
        "upload accepted"
    );
    Ok(ImageSource::Upload {
        bytes: file.bytes,
        mime,
    })
}

fn validate_url(raw: &str) -> Result<ImageSource, AppError> {
    let invalid = || AppError::Validation("Invalid image URL format.".to_string());
    let url = Url::parse(raw).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(ImageSource::Remote(url))
}

impl ImageSource {
    /// URL the results page shows the image from.
    pub fn display_url(&self) -> String {
        match self {
            ImageSource::Upload { bytes, mime } => {
                format!("data:{mime};base64,{}", B64.encode(bytes))
            }
            ImageSource::Remote(url) => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 4 * 1024 * 1024;
    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn file(bytes: &[u8], content_type: Option<&str>) -> Submission {
        Submission {
            file: Some(UploadedFile {
                bytes: bytes.to_vec(),
                content_type: content_type.map(str::to_string),
                file_name: Some("leaf.png".to_string()),
            }),
            image_url: None,
        }
    }

    fn url(u: &str) -> Submission {
        Submission {
            file: None,
            image_url: Some(u.to_string()),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn nothing_submitted() {
        let err = Submission::default().validate(MAX).unwrap_err();
        assert_eq!(
            message(err),
            "Please provide either an image file or an image URL."
        );
    }

    #[test]
    fn empty_file_counts_as_absent() {
        let mut s = file(b"", Some("image/png"));
        s.image_url = Some("https://example.com/leaf.jpg".to_string());
        assert!(matches!(s.validate(MAX), Ok(ImageSource::Remote(_))));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let big = vec![0u8; MAX + 1];
        let err = file(&big, Some("image/jpeg")).validate(MAX).unwrap_err();
        assert!(message(err).starts_with("Image file is too large"));
    }

    #[test]
    fn file_at_limit_is_accepted() {
        let exact = vec![0u8; MAX];
        assert!(file(&exact, Some("image/jpeg")).validate(MAX).is_ok());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = file(b"GIF89a", Some("image/gif")).validate(MAX).unwrap_err();
        assert_eq!(
            message(err),
            "Invalid file type. Please upload a JPG or PNG image."
        );
    }

    #[test]
    fn jpg_alias_normalises_to_jpeg() {
        match file(b"\xFF\xD8\xFF", Some("image/jpg")).validate(MAX).unwrap() {
            ImageSource::Upload { mime, .. } => assert_eq!(mime, "image/jpeg"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_type_is_sniffed() {
        match file(PNG_MAGIC, None).validate(MAX).unwrap() {
            ImageSource::Upload { mime, .. } => assert_eq!(mime, "image/png"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(file(b"plain text", Some("application/octet-stream"))
            .validate(MAX)
            .is_err());
    }

    #[test]
    fn file_wins_over_url() {
        let mut s = file(PNG_MAGIC, Some("image/png"));
        s.image_url = Some("https://example.com/leaf.jpg".to_string());
        assert!(matches!(s.validate(MAX), Ok(ImageSource::Upload { .. })));
    }

    #[test]
    fn urls_must_be_http() {
        assert!(matches!(
            url("https://example.com/leaf.jpg").validate(MAX),
            Ok(ImageSource::Remote(_))
        ));
        for bad in ["not a url", "ftp://example.com/leaf.jpg", "file:///etc/passwd", "http://"] {
            let err = url(bad).validate(MAX).unwrap_err();
            assert_eq!(message(err), "Invalid image URL format.", "{bad}");
        }
    }

    #[test]
    fn upload_display_url_is_data_url() {
        let source = ImageSource::Upload {
            bytes: b"abc".to_vec(),
            mime: "image/png",
        };
        assert_eq!(source.display_url(), "data:image/png;base64,YWJj");
    }
}
