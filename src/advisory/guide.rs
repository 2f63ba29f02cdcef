/// Markdown guide for one detection group.

use super::{lookup, AdvisoryRecord};
use crate::postprocess::detection::DetectionGroup;
use std::fmt::{self, Write};

/// Groups below this confidence get a "retake the photo" note.
pub const LOW_CONFIDENCE: f64 = 0.5;

pub fn percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

/// "Spider_Mites" -> "Spider Mites".
pub fn display_name(class_name: &str) -> String {
    class_name
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_low_confidence(group: &DetectionGroup) -> bool {
    !group.is_undetermined() && group.highest_confidence < LOW_CONFIDENCE
}

pub fn render_guide(group: &DetectionGroup) -> Result<String, fmt::Error> {
    let record = lookup(&group.class_name);
    let mut out = String::new();

    if is_low_confidence(group) {
        write_low_confidence_note(&mut out, group)?;
    }
    write_record(&mut out, record)?;

    Ok(out)
}

/// Minimal guide used when rendering the full one failed.
pub fn fallback_guide(group: &DetectionGroup) -> String {
    format!(
        "### {name}\n**Confidence:** {pct}%\n\n*(Detailed guidance could not be generated for this item. \
         Please consult agricultural resources or a local expert for specific guidance on symptoms, \
         treatment, and prevention for {name}.)*",
        name = group.class_name,
        pct = percent(group.highest_confidence),
    )
}

fn write_low_confidence_note(out: &mut impl Write, group: &DetectionGroup) -> fmt::Result {
    write!(
        out,
        "**Important Note Regarding Confidence:** The confidence in diagnosing *{}* is {}%, \
         which is relatively low. For a more accurate assessment, please try again with a clearer, \
         well-lit image focusing on the affected parts of the leaf. The information below is based \
         on the current (low-confidence) prediction.\n\n---\n\n",
        group.class_name,
        percent(group.highest_confidence),
    )
}

fn write_list(out: &mut impl Write, items: &[&str]) -> fmt::Result {
    for item in items {
        writeln!(out, "- {item}")?;
    }
    Ok(())
}

fn write_record(out: &mut impl Write, record: &AdvisoryRecord) -> fmt::Result {
    write!(out, "### {}\n\n", record.name)?;
    write!(out, "**Description:** {}\n\n", record.description)?;

    writeln!(out, "**Symptoms:**")?;
    write_list(out, record.symptoms)?;

    writeln!(out, "\n**Treatment Options:**")?;
    if !record.organic.is_empty() {
        writeln!(out, "**Organic/Cultural Controls:**")?;
        write_list(out, record.organic)?;
    }
    if !record.chemical.is_empty() {
        writeln!(out, "\n**Chemical Controls:**")?;
        write_list(out, record.chemical)?;
    }

    writeln!(out, "\n**Prevention:**")?;
    write_list(out, record.prevention)
}
