/// Overlay boxes for the results page.

use crate::advisory::guide::{display_name, percent};
use crate::postprocess::geometry::{map_box, CenterBox, Placement, Size};
use crate::predict::Report;

/// Box colours, cycled by report index.
pub const PALETTE: [&str; 5] = ["#2a9d8f", "#e9c46a", "#ef4444", "#f4a261", "#8e7dbe"];

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub placement: Placement,
    pub color: &'static str,
    pub label: String,
    pub title: String,
}

pub fn color_for(report_index: usize) -> &'static str {
    PALETTE[report_index % PALETTE.len()]
}

/// Healthy and Undetermined groups mark no region of the leaf.
pub fn is_marked(report: &Report) -> bool {
    !report.is_healthy() && !report.is_undetermined()
}

/// Place every instance of every marked report inside `container`. Empty when
/// the natural image size is unknown.
pub fn overlay_boxes(reports: &[Report], container: Size) -> Vec<OverlayBox> {
    let Some(first) = reports.first() else {
        return Vec::new();
    };
    let natural = Size::new(
        first.image_natural_width as f64,
        first.image_natural_height as f64,
    );

    reports
        .iter()
        .enumerate()
        .filter(|(_, report)| is_marked(report))
        .flat_map(|(index, report)| {
            let label = display_name(&report.class_name);
            report.instances.iter().filter_map(move |instance| {
                let b = CenterBox {
                    center_x: instance.center_x,
                    center_y: instance.center_y,
                    width: instance.width,
                    height: instance.height,
                };
                Some(OverlayBox {
                    placement: map_box(&b, natural, container)?,
                    color: color_for(index),
                    title: format!("{label} (Confidence: {}%)", percent(instance.confidence)),
                    label: label.clone(),
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocess::detection::RawDetection;

    fn report(name: &str, instances: Vec<RawDetection>) -> Report {
        Report {
            class_name: name.to_string(),
            highest_confidence: instances.iter().map(|d| d.confidence).fold(0.0, f64::max),
            instances,
            rendered_guide_text: String::new(),
            image_url: String::new(),
            image_natural_width: 800,
            image_natural_height: 600,
        }
    }

    fn det(class: &str, confidence: f64) -> RawDetection {
        RawDetection {
            center_x: 400.0,
            center_y: 300.0,
            width: 200.0,
            height: 100.0,
            confidence,
            class_label: class.to_string(),
        }
    }

    #[test]
    fn boxes_for_marked_reports_only() {
        let reports = vec![
            report("Spider_Mites", vec![det("Spider_Mites", 0.8), det("Spider_Mites", 0.12)]),
            report("Healthy", vec![det("Healthy", 0.9)]),
            report("Canker", vec![det("Canker", 0.6)]),
        ];
        let boxes = overlay_boxes(&reports, Size::new(400.0, 400.0));

        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].label, "Spider Mites");
        assert_eq!(boxes[0].title, "Spider Mites (Confidence: 80%)");
        assert_eq!(boxes[1].title, "Spider Mites (Confidence: 12%)");
        assert_eq!(boxes[0].color, PALETTE[0]);
        // Colour follows the report index, so the skipped Healthy report still counts.
        assert_eq!(boxes[2].color, PALETTE[2]);
        assert_eq!(
            boxes[0].placement,
            Placement {
                left: 150.0,
                top: 175.0,
                width: 100.0,
                height: 50.0
            }
        );
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(color_for(5), color_for(0));
        assert_eq!(color_for(7), PALETTE[2]);
    }

    #[test]
    fn undetermined_and_unknown_size_draw_nothing() {
        let undetermined = vec![report("Undetermined", vec![])];
        assert!(overlay_boxes(&undetermined, Size::new(640.0, 384.0)).is_empty());

        let mut unsized_report = report("Canker", vec![det("Canker", 0.9)]);
        unsized_report.image_natural_width = 0;
        assert!(overlay_boxes(&[unsized_report], Size::new(640.0, 384.0)).is_empty());
        assert!(overlay_boxes(&[], Size::new(640.0, 384.0)).is_empty());
    }
}
