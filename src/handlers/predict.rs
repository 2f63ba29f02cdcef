/// Prediction endpoints: /predict (HTML) and /api/predict (JSON)

use super::AppState;
use crate::error::AppError;
use crate::predict::{Report, Submission, UploadedFile};
use crate::render::page::{index_page, results_page};
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

/// Multipart framing allowed on top of the largest accepted file.
pub const BODY_LIMIT_HEADROOM: usize = 64 * 1024;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub reports: Vec<Report>,
    pub image_url: String,
    pub image_natural_width: u32,
    pub image_natural_height: u32,
}

/// POST /predict - form submission, answered with the results page or the
/// form again with an alert.
pub async fn predict_page(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    match run(&state, multipart).await {
        Ok(reports) => Html(results_page(&reports, state.overlay)).into_response(),
        Err(e) => {
            warn!("prediction failed: {e}");
            (e.status_code(), Html(index_page(Some(&e.to_string())))).into_response()
        }
    }
}

/// POST /api/predict
pub async fn predict_json(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, AppError> {
    let reports = run(&state, multipart).await?;

    let (image_url, image_natural_width, image_natural_height) = reports
        .first()
        .map(|r| (r.image_url.clone(), r.image_natural_width, r.image_natural_height))
        .unwrap_or_default();

    Ok(Json(PredictResponse {
        reports,
        image_url,
        image_natural_width,
        image_natural_height,
    }))
}

async fn run(state: &AppState, multipart: Multipart) -> Result<Vec<Report>, AppError> {
    let span = info_span!("predict", request_id = %Uuid::new_v4());
    async {
        let submission = read_submission(multipart, state.predictor.max_upload_bytes()).await?;
        state.predictor.report(submission).await
    }
    .instrument(span)
    .await
}

/// Collect the `imageFile` and `imageUrl` fields. Anything else is ignored.
async fn read_submission(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    let read_error = |context: &str, e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_large(max_upload_bytes)
        } else {
            AppError::Validation(format!("{context}: {e}"))
        }
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error("Multipart error", e))?
    {
        match field.name() {
            Some("imageFile") => {
                let content_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| read_error("Failed to read image", e))?;
                submission.file = Some(UploadedFile {
                    bytes: data.to_vec(),
                    content_type,
                    file_name,
                });
            }
            Some("imageUrl") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| read_error("Failed to read image URL", e))?;
                submission.image_url = Some(text);
            }
            _ => {}
        }
    }

    Ok(submission)
}

fn too_large(max_upload_bytes: usize) -> AppError {
    AppError::Validation(format!(
        "Image file is too large. Please upload an image smaller than {}MB.",
        max_upload_bytes / (1024 * 1024)
    ))
}
