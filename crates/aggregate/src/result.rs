use std::collections::BTreeMap;

use foundation::time::Timestamp;
use identity::CountryIdentity;

/// Per-country statistics for one aggregation pass.
///
/// Buckets are rebuilt from scratch every pass rather than incrementally
/// mutated, so a stale batch can never leak counts into the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationBucket {
    /// Resolved identity, carried so a renderer can label and flag the bucket.
    pub identity: CountryIdentity,
    /// News items attributed to this country in the current batch.
    pub count: u32,
    /// Recency- and volume-weighted visual weight in [0.3, 1].
    pub intensity: f64,
    pub newest_timestamp: Timestamp,
}

/// Output handed to the renderer collaborator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationResult {
    /// Keyed by ISO code when known, else canonical name.
    pub buckets: BTreeMap<String, AggregationBucket>,
    /// Maximum bucket count of this pass only — the color scale is always
    /// relative to the current news window, never all-time history.
    pub max_count: u32,
    /// Distinct countries with at least one item.
    pub active_region_count: usize,
    /// Items with a usable geography tag whose timestamp falls on the as-of
    /// UTC day. A tag that resolves to an empty identity does not qualify.
    pub today_event_count: usize,
}

impl AggregationResult {
    pub fn bucket(&self, key: &str) -> Option<&AggregationBucket> {
        self.buckets.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
