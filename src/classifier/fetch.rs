/// Download of URL submissions for backends that need the bytes.

use crate::error::AppError;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use url::Url;

const MAX_REMOTE_BYTES: usize = 10 * 1024 * 1024;
const BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

fn download_error(err: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("Error downloading image: {err}"))
}

pub async fn fetch_image(client: &Client, url: &Url) -> Result<Vec<u8>, AppError> {
    let response = client
        .get(url.clone())
        .header(USER_AGENT, BROWSER_AGENT)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(download_error)?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if !content_type.starts_with("image/") {
        let message = if content_type.contains("text/html") {
            "URL points to a webpage, not an image. Please use a direct link to an image file \
             (ending in .jpg, .png, .jpeg, etc.)"
                .to_string()
        } else {
            format!(
                "URL does not point to an image. Content-Type: {content_type}. \
                 Please use a direct link to an image file."
            )
        };
        return Err(AppError::Validation(message));
    }

    let too_large = || AppError::Validation("Image too large. Maximum size: 10MB".to_string());
    if response
        .content_length()
        .is_some_and(|len| len as usize > MAX_REMOTE_BYTES)
    {
        return Err(too_large());
    }

    let bytes = response.bytes().await.map_err(download_error)?;
    if bytes.len() > MAX_REMOTE_BYTES {
        return Err(too_large());
    }

    Ok(bytes.to_vec())
}
