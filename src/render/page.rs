/// Server-rendered pages: the submission form and the results view.

use super::markdown::{escape, to_html};
use super::overlay::{color_for, overlay_boxes, OverlayBox};
use crate::advisory::guide::{display_name, percent, LOW_CONFIDENCE};
use crate::postprocess::geometry::Size;
use crate::predict::Report;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f6f8f3; color: #1f2a1c; }
main { max-width: 46rem; margin: 0 auto; padding: 2rem 1rem 4rem; }
h1 { color: #3f7d20; text-align: center; }
form, .card { background: #fff; border: 1px solid #dde3d6; border-radius: 8px; padding: 1.25rem; margin-top: 1.5rem; }
label { display: block; font-weight: 600; margin: 0.75rem 0 0.25rem; }
input[type=url] { width: 100%; padding: 0.4rem; box-sizing: border-box; }
button { margin-top: 1rem; padding: 0.5rem 1.25rem; background: #3f7d20; color: #fff; border: 0; border-radius: 4px; }
.alert { background: #fdecec; border: 1px solid #ef4444; border-radius: 6px; padding: 0.75rem 1rem; margin-top: 1rem; }
.overlay { position: relative; margin: 0 auto; overflow: hidden; border: 1px solid #dde3d6; background: #fff; }
.overlay img { width: 100%; height: 100%; object-fit: contain; }
.box { position: absolute; border: 3px solid; border-radius: 2px; }
.tag { position: absolute; transform: translateY(-100%); color: #fff; padding: 2px 5px; font-size: 12px; font-weight: bold; border-radius: 3px; white-space: nowrap; }
.status { display: flex; align-items: baseline; gap: 0.75rem; }
.status .pct { margin-left: auto; color: #66705f; font-size: 0.9rem; }
.note { color: #66705f; font-size: 0.85rem; margin-top: 2rem; text-align: center; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Submission form, optionally with an error alert above it.
pub fn index_page(error: Option<&str>) -> String {
    let mut body = String::from(
        "<h1>Lemon Leaf Disease Detection</h1>\n\
         <p>Upload an image of a lemon leaf or provide an image URL to get a diagnosis \
         and treatment guide.</p>\n",
    );
    if let Some(message) = error {
        body.push_str(&format!(
            "<div class=\"alert\" role=\"alert\"><strong>Error</strong><p>{}</p></div>\n",
            escape(message)
        ));
    }
    body.push_str(
        "<form method=\"post\" action=\"/predict\" enctype=\"multipart/form-data\">\n\
         <label for=\"imageFile\">Upload image (JPG or PNG)</label>\n\
         <input id=\"imageFile\" name=\"imageFile\" type=\"file\" accept=\"image/jpeg,image/png\">\n\
         <label for=\"imageUrl\">or image URL</label>\n\
         <input id=\"imageUrl\" name=\"imageUrl\" type=\"url\" placeholder=\"https://example.com/leaf.jpg\">\n\
         <button type=\"submit\">Diagnose</button>\n\
         </form>\n\
         <p class=\"note\">This tool is for informational purposes only and does not replace \
         professional agricultural advice.</p>\n",
    );
    layout("Leaf Diagnosis", &body)
}

/// Status label shown next to each group.
pub fn status_label(report: &Report) -> String {
    if report.is_healthy() {
        "Healthy".to_string()
    } else if report.is_undetermined() {
        "Undetermined".to_string()
    } else if report.highest_confidence < LOW_CONFIDENCE {
        format!("Possible: {}", display_name(&report.class_name))
    } else {
        display_name(&report.class_name)
    }
}

pub fn results_page(reports: &[Report], container: Size) -> String {
    let mut body = String::from("<h1>Diagnosis Results</h1>\n");

    if let Some(first) = reports.first() {
        body.push_str(&format!(
            "<div class=\"overlay\" style=\"width:{}px;height:{}px\">\n\
             <img src=\"{}\" alt=\"Analyzed leaf\">\n",
            container.width,
            container.height,
            escape(&first.image_url),
        ));
        for b in overlay_boxes(reports, container) {
            body.push_str(&overlay_box(&b));
        }
        body.push_str("</div>\n");
    }

    for (index, report) in reports.iter().enumerate() {
        body.push_str(&report_card(index, report));
    }
    body.push_str("<p><a href=\"/\">Diagnose another leaf</a></p>\n");

    layout("Diagnosis Results", &body)
}

fn overlay_box(b: &OverlayBox) -> String {
    let p = &b.placement;
    format!(
        "<div class=\"box\" style=\"left:{:.2}px;top:{:.2}px;width:{:.2}px;height:{:.2}px;\
         border-color:{color};box-shadow:0 0 8px {color}b3\" title=\"{title}\" \
         aria-label=\"Detected area for {label}\"></div>\n\
         <div class=\"tag\" style=\"left:{:.2}px;top:{:.2}px;background:{color}\">{label}</div>\n",
        p.left,
        p.top,
        p.width,
        p.height,
        p.left,
        p.top,
        color = b.color,
        title = escape(&b.title),
        label = escape(&b.label),
    )
}

fn report_card(index: usize, report: &Report) -> String {
    let pct = if report.is_undetermined() {
        String::new()
    } else {
        format!(
            "<span class=\"pct\">(Highest Confidence: {}%)</span>",
            percent(report.highest_confidence)
        )
    };
    format!(
        "<section class=\"card\">\n<div class=\"status\">\
         <h2 style=\"color:{color}\">{label}</h2>{pct}</div>\n\
         <div class=\"guide\">\n{guide}</div>\n</section>\n",
        color = color_for(index),
        label = escape(&status_label(report)),
        guide = to_html(&report.rendered_guide_text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocess::detection::RawDetection;

    fn report(name: &str, confidence: f64) -> Report {
        Report {
            class_name: name.to_string(),
            instances: vec![RawDetection {
                center_x: 400.0,
                center_y: 300.0,
                width: 200.0,
                height: 100.0,
                confidence,
                class_label: name.to_string(),
            }],
            highest_confidence: confidence,
            rendered_guide_text: format!("### {name}\n\n**Symptoms:**\n- spots\n"),
            image_url: "https://example.com/leaf.jpg?a=1&b=2".to_string(),
            image_natural_width: 800,
            image_natural_height: 600,
        }
    }

    #[test]
    fn status_labels() {
        assert_eq!(status_label(&report("Healthy", 0.2)), "Healthy");
        assert_eq!(status_label(&report("Undetermined", 1.0)), "Undetermined");
        assert_eq!(status_label(&report("Spider_Mites", 0.49)), "Possible: Spider Mites");
        assert_eq!(status_label(&report("Spider_Mites", 0.5)), "Spider Mites");
    }

    #[test]
    fn index_shows_escaped_error() {
        let html = index_page(Some("bad <input>"));
        assert!(html.contains("bad &lt;input&gt;"));
        assert!(html.contains("name=\"imageFile\""));
        assert!(!index_page(None).contains("class=\"alert\""));
    }

    #[test]
    fn results_page_places_boxes_and_guides() {
        let html = results_page(
            &[report("Canker", 0.9), report("Healthy", 0.6)],
            Size::new(400.0, 400.0),
        );
        assert!(html.contains("width:400px;height:400px"));
        assert!(html.contains("src=\"https://example.com/leaf.jpg?a=1&amp;b=2\""));
        assert!(html.contains("left:150.00px;top:175.00px;width:100.00px;height:50.00px"));
        assert_eq!(html.matches("class=\"box\"").count(), 1);
        assert!(html.contains("(Highest Confidence: 90%)"));
        assert!(html.contains("<h3>Canker</h3>"));
    }

    #[test]
    fn undetermined_hides_percentage() {
        let mut r = report("Undetermined", 1.0);
        r.instances.clear();
        let html = results_page(&[r], Size::new(640.0, 384.0));
        assert!(!html.contains("Highest Confidence"));
        assert!(!html.contains("class=\"box\""));
    }

    #[test]
    fn classifier_labels_are_escaped() {
        let html = results_page(&[report("<b>Rot</b>", 0.9)], Size::new(640.0, 384.0));
        assert!(!html.contains("<b>Rot</b>"));
        assert!(html.contains("&lt;b&gt;Rot&lt;/b&gt;"));
    }
}
