/// Per-disease report assembly.

use super::Prediction;
use crate::advisory::guide::{fallback_guide, render_guide};
use crate::postprocess::detection::{
    is_healthy_class, is_undetermined_class, DetectionGroup, RawDetection,
};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "diseaseName")]
    pub class_name: String,
    pub instances: Vec<RawDetection>,
    pub highest_confidence: f64,
    #[serde(rename = "guide")]
    pub rendered_guide_text: String,
    // Shared by every report of one prediction; the JSON surface sends them once.
    #[serde(skip)]
    pub image_url: String,
    #[serde(skip)]
    pub image_natural_width: u32,
    #[serde(skip)]
    pub image_natural_height: u32,
}

impl Report {
    pub fn is_healthy(&self) -> bool {
        is_healthy_class(&self.class_name)
    }

    pub fn is_undetermined(&self) -> bool {
        is_undetermined_class(&self.class_name)
    }
}

/// One report per group. A group whose guide fails to render gets the
/// short fallback text; the others are unaffected.
pub fn build_reports(prediction: &Prediction) -> Vec<Report> {
    build_reports_with(prediction, render_guide)
}

fn build_reports_with<F, E>(prediction: &Prediction, mut render: F) -> Vec<Report>
where
    F: FnMut(&DetectionGroup) -> Result<String, E>,
    E: std::fmt::Display,
{
    prediction
        .groups
        .iter()
        .map(|group| {
            let guide = render(group).unwrap_or_else(|e| {
                warn!(class = %group.class_name, "guide generation failed: {e}");
                fallback_guide(group)
            });

            Report {
                class_name: group.class_name.clone(),
                instances: group.instances.clone(),
                highest_confidence: group.highest_confidence,
                rendered_guide_text: guide,
                image_url: prediction.image_url.clone(),
                image_natural_width: prediction.natural_width,
                image_natural_height: prediction.natural_height,
            }
        })
        .collect()
}
