use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Platform, PlatformFlags, RawTitle, TitleRecord, TitleType},
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum TitleFlags {
    Unique(PlatformFlags),
    /// Several rows share this title with different memberships
    Conflicting,
}

/// Deduplicated titles from all platforms, one row per (title, type)
#[derive(Debug, Clone, Default)]
pub struct MergedCatalog {
    records: Vec<TitleRecord>,
    flags_by_title: HashMap<String, TitleFlags>,
}

impl MergedCatalog {
    /// Wraps already-merged records, checking the (title, type) uniqueness invariant
    pub fn from_records(records: Vec<TitleRecord>) -> AppResult<Self> {
        let mut seen: HashMap<(&str, &TitleType), usize> = HashMap::new();
        for (row, record) in records.iter().enumerate() {
            if let Some(first) = seen.insert((record.title.as_str(), &record.title_type), row) {
                return Err(AppError::InvariantViolation(format!(
                    "duplicate ({}, {}) at rows {} and {}",
                    record.title, record.title_type, first, row
                )));
            }
        }

        let mut flags_by_title: HashMap<String, TitleFlags> = HashMap::new();
        for record in &records {
            flags_by_title
                .entry(record.title.clone())
                .and_modify(|existing| {
                    if *existing != TitleFlags::Unique(record.platforms) {
                        *existing = TitleFlags::Conflicting;
                    }
                })
                .or_insert(TitleFlags::Unique(record.platforms));
        }

        Ok(Self {
            records,
            flags_by_title,
        })
    }

    pub fn records(&self) -> &[TitleRecord] {
        &self.records
    }

    pub fn get(&self, row: usize) -> Option<&TitleRecord> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Platform membership for an exact title
    ///
    /// Fails with `AmbiguousTitle` when rows sharing the title disagree.
    pub fn flags_for(&self, title: &str) -> AppResult<PlatformFlags> {
        match self.flags_by_title.get(title) {
            Some(TitleFlags::Unique(flags)) => Ok(*flags),
            Some(TitleFlags::Conflicting) => Err(AppError::AmbiguousTitle(format!(
                "'{}' matches several catalog rows with different platforms",
                title
            ))),
            None => Err(AppError::NotFound(title.to_string())),
        }
    }
}

/// Merges per-platform tables into one catalog
///
/// Tables are concatenated in the given order. Rows missing a title or type
/// are dropped. For a repeated (title, type) the last occurrence supplies the
/// text fields and the row position; membership is the union over all
/// occurrences.
pub fn build_catalog(tables: Vec<(Platform, Vec<RawTitle>)>) -> AppResult<MergedCatalog> {
    let mut rows: Vec<(Platform, RawTitle)> = Vec::new();
    let mut dropped = 0usize;
    for (platform, table) in tables {
        for raw in table {
            if raw.title.trim().is_empty() || raw.kind.trim().is_empty() {
                dropped += 1;
                continue;
            }
            rows.push((platform, raw));
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "Skipped catalog rows without title or type");
    }

    let mut last_seen: HashMap<(String, TitleType), (usize, PlatformFlags)> = HashMap::new();
    for (position, (platform, raw)) in rows.iter().enumerate() {
        let key = (raw.title.clone(), TitleType::from(raw.kind.as_str()));
        let entry = last_seen
            .entry(key)
            .or_insert((position, PlatformFlags::default()));
        entry.0 = position;
        entry.1.insert(*platform);
    }

    let total = rows.len();
    let records: Vec<TitleRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(position, (_, raw))| {
            let key = (raw.title.clone(), TitleType::from(raw.kind.as_str()));
            match last_seen.get(&key) {
                Some(&(last, flags)) if last == position => Some(TitleRecord::from_raw(raw, flags)),
                _ => None,
            }
        })
        .collect();

    tracing::info!(
        input_rows = total,
        merged_rows = records.len(),
        "Catalogs merged"
    );

    MergedCatalog::from_records(records)
}
