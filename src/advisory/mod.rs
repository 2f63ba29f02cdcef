/// Static advice for detected classes.
///
/// Class names from the classifier do not always match the table keys
/// verbatim ("spider_mites", "Spider Mites", "leaf_canker"), so lookup ranks
/// candidates instead of taking the first hit.

pub mod guide;
pub mod table;

pub use table::AdvisoryRecord;
use table::{FALLBACK_KEY, RECORDS};

/// Lowercase and fold spaces/hyphens to underscores.
fn canonical(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

pub fn fallback() -> &'static AdvisoryRecord {
    RECORDS
        .iter()
        .find(|r| r.key == FALLBACK_KEY)
        .unwrap_or(&RECORDS[RECORDS.len() - 1])
}

/// Find the advisory record for a class name.
///
/// Exact match first, then the longest key that contains or is contained in
/// the name (table order breaks ties), then the undetermined record.
pub fn lookup(class_name: &str) -> &'static AdvisoryRecord {
    let wanted = canonical(class_name);
    if wanted.is_empty() {
        return fallback();
    }

    let mut best: Option<(&'static AdvisoryRecord, usize)> = None;
    for record in RECORDS {
        let key = canonical(record.key);
        if key == wanted {
            return record;
        }
        if key.contains(&wanted) || wanted.contains(&key) {
            match best {
                Some((_, len)) if len >= key.len() => {}
                _ => best = Some((record, key.len())),
            }
        }
    }

    best.map(|(record, _)| record).unwrap_or_else(fallback)
}
