//! Per-title feature extraction.
//!
//! Each text feature is squashed into a single lowercase token stream with all
//! whitespace removed, so multi-word names ("Christopher Nolan") become one
//! term ("christophernolan") and only exact name matches count as overlap.

use crate::models::TitleRecord;

/// Removes every whitespace character and lowercases the rest
pub fn normalize(field: &str) -> String {
    field
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Concatenates the normalized title, director, cast and description
///
/// Fields are always separated by one space, even when empty.
pub fn build_soup(record: &TitleRecord) -> String {
    format!(
        "{} {} {} {}",
        normalize(&record.title),
        normalize(&record.director),
        normalize(&record.cast),
        normalize(&record.description)
    )
}
