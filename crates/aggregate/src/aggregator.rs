use std::collections::{BTreeMap, BTreeSet};

use foundation::time::Timestamp;
use identity::CountryIdentityResolver;

use crate::news::NewsItem;
use crate::result::{AggregationBucket, AggregationResult};

/// Hours after which a bucket's recency decay bottoms out.
const DECAY_WINDOW_HOURS: f64 = 72.0;
/// Floor for fully-aged buckets: faded countries stay visible, never vanish.
const DECAY_FLOOR: f64 = 0.3;

pub struct GeographicAggregator;

impl GeographicAggregator {
    /// Aggregates a batch of news items into per-country buckets.
    ///
    /// Pure with respect to its inputs: the same items and `as_of` always
    /// produce the same bucket map. The only external state consulted is the
    /// resolver's loaded boundary set, used for name matching.
    pub fn aggregate(
        items: &[NewsItem],
        as_of: Timestamp,
        resolver: &CountryIdentityResolver,
    ) -> AggregationResult {
        let mut buckets: BTreeMap<String, AggregationBucket> = BTreeMap::new();
        let mut today_event_count = 0usize;

        for item in items {
            // Dedupe identities within one item: "USA" and "United States"
            // on the same article count that country once.
            let mut seen: BTreeSet<String> = BTreeSet::new();

            for tag in item.geography_tags() {
                let identity = resolver.resolve(&tag.name);
                if identity.canonical_name().is_empty() {
                    continue;
                }
                let key = identity.bucket_key();
                if !seen.insert(key.clone()) {
                    continue;
                }

                let ts = item.timestamp();
                buckets
                    .entry(key)
                    .and_modify(|bucket| {
                        bucket.count += 1;
                        bucket.newest_timestamp = bucket.newest_timestamp.max(ts);
                    })
                    .or_insert(AggregationBucket {
                        identity,
                        count: 1,
                        intensity: 0.0,
                        newest_timestamp: ts,
                    });
            }

            if !seen.is_empty() && item.timestamp().same_utc_day(as_of) {
                today_event_count += 1;
            }
        }

        let max_count = buckets.values().map(|b| b.count).max().unwrap_or(0);
        for bucket in buckets.values_mut() {
            bucket.intensity = intensity(bucket.count, bucket.newest_timestamp, as_of);
        }

        AggregationResult {
            active_region_count: buckets.len(),
            max_count,
            today_event_count,
            buckets,
        }
    }
}

/// Recency decay with a floor, times a logarithmic volume boost, clamped for
/// renderer safety. The log keeps one loud country from saturating the scale
/// on volume alone while still rewarding sustained activity.
fn intensity(count: u32, newest: Timestamp, as_of: Timestamp) -> f64 {
    let age_hours = newest.hours_until(as_of).max(0.0);
    let decay = (1.0 - age_hours / DECAY_WINDOW_HOURS).max(DECAY_FLOOR);
    (decay * (1.0 + f64::from(count).ln() / 2.0)).min(1.0)
}
