/// Overlay endpoint: POST /api/overlay
///
/// Lets a client that re-measures its image container (on resize, say) get
/// fresh box placements without resubmitting the image. Placements sent back
/// are converted to source-pixel boxes.

use crate::error::AppError;
use crate::postprocess::geometry::{CenterBox, ContainFit, Placement, Size};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRequest {
    pub natural_size: Size,
    pub container_size: Size,
    #[serde(default)]
    pub boxes: Vec<CenterBox>,
    #[serde(default)]
    pub placements: Vec<Placement>,
}

#[derive(Debug, Serialize)]
pub struct OverlayResponse {
    /// `boxes` of the request, in container pixels.
    pub placements: Vec<Placement>,
    /// `placements` of the request, in source pixels.
    pub boxes: Vec<CenterBox>,
}

pub async fn overlay(Json(req): Json<OverlayRequest>) -> Result<Json<OverlayResponse>, AppError> {
    Ok(Json(place(req)?))
}

fn place(req: OverlayRequest) -> Result<OverlayResponse, AppError> {
    let fit = ContainFit::new(req.natural_size, req.container_size).ok_or_else(|| {
        AppError::Validation("naturalSize width and height must be positive".to_string())
    })?;

    let boxes = req
        .placements
        .iter()
        .map(|p| fit.unmap(p))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            AppError::Validation("containerSize must be positive to convert placements".to_string())
        })?;

    Ok(OverlayResponse {
        placements: req.boxes.iter().map(|b| fit.map(b)).collect(),
        boxes,
    })
}
