// Batch merger: combines per-query record batches into one canonical list.
use crate::model::RawRecord;
use tracing::{debug, info};

/// Canonical form of a source field name: trimmed, lowercased, inner
/// whitespace runs collapsed to single underscores.
pub fn canonical_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn canonicalize(record: RawRecord) -> RawRecord {
    record
        .into_fields()
        .into_iter()
        .map(|(key, value)| (canonical_key(&key), value))
        .collect::<RawRecord>()
}

/// Flattens the batches into a single list, batch order preserved and
/// records kept in their original order within each batch. Every field
/// name is rewritten to its canonical form; duplicates are left alone.
pub fn merge(batches: Vec<Vec<RawRecord>>) -> Vec<RawRecord> {
    let batch_count = batches.len();
    let merged: Vec<RawRecord> = batches
        .into_iter()
        .flatten()
        .map(canonicalize)
        .collect();

    info!("merged {} batch(es) into {} record(s)", batch_count, merged.len());
    if let Some(first) = merged.first() {
        debug!("columns available: {:?}", first.keys());
    }
    merged
}
