/// Detection grouping: raw per-instance detections to per-class groups.
///
/// The confidence filter works on whole groups. A class survives when its
/// best instance clears the threshold, and then keeps every instance,
/// including the weak ones.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const UNDETERMINED: &str = "Undetermined";

/// Confidence reported for the synthetic undetermined group. Only used to
/// suppress the percentage in the UI.
pub const UNDETERMINED_CONFIDENCE: f64 = 1.0;

/// One bounding box from the classifier, in source-image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    #[serde(rename = "x")]
    pub center_x: f64,
    #[serde(rename = "y")]
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64,
    #[serde(rename = "class")]
    pub class_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionGroup {
    #[serde(rename = "diseaseName")]
    pub class_name: String,
    pub instances: Vec<RawDetection>,
    pub highest_confidence: f64,
}

impl DetectionGroup {
    pub fn undetermined() -> Self {
        Self {
            class_name: UNDETERMINED.to_string(),
            instances: Vec::new(),
            highest_confidence: UNDETERMINED_CONFIDENCE,
        }
    }

    pub fn is_undetermined(&self) -> bool {
        is_undetermined_class(&self.class_name)
    }
}

pub fn is_undetermined_class(class_name: &str) -> bool {
    class_name.to_ascii_lowercase().contains("undetermined")
}

pub fn is_healthy_class(class_name: &str) -> bool {
    class_name.to_ascii_lowercase().contains("healthy")
}

/// Group detections by class and keep the classes whose best instance
/// reaches `min_confidence`, strongest first.
///
/// Returns the single undetermined group when the input is empty or when no
/// class qualifies.
pub fn normalize(raw: &[RawDetection], min_confidence: f64) -> Vec<DetectionGroup> {
    if raw.is_empty() {
        return vec![DetectionGroup::undetermined()];
    }

    // Insertion order is the first time each class was seen.
    let mut groups: Vec<DetectionGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for det in raw {
        let slot = *index.entry(det.class_label.as_str()).or_insert_with(|| {
            groups.push(DetectionGroup {
                class_name: det.class_label.clone(),
                instances: Vec::new(),
                highest_confidence: f64::NEG_INFINITY,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.highest_confidence = group.highest_confidence.max(det.confidence);
        group.instances.push(det.clone());
    }

    groups.retain(|g| g.highest_confidence >= min_confidence);

    if groups.is_empty() {
        return vec![DetectionGroup::undetermined()];
    }

    // sort_by is stable, so equal confidences keep first-seen order.
    groups.sort_by(|a, b| b.highest_confidence.total_cmp(&a.highest_confidence));
    groups
}
