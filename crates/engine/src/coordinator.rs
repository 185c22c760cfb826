use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use aggregate::{AggregationResult, GeographicAggregator, NewsItem};
use boundary::BoundaryFeature;
use foundation::time::Timestamp;
use identity::{AliasTable, CountryIdentityResolver};

use crate::clock::Sleeper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The aggregation that should replace the currently displayed state.
    Published(AggregationResult),
    /// A newer update started while this one was in flight; its result was
    /// discarded without being published.
    Superseded,
}

/// Whatever boundary data is currently resident, used to (re)build the
/// resolver before each aggregation pass.
pub trait BoundarySource {
    fn loaded_features(&self) -> Vec<BoundaryFeature>;
}

/// Drives aggregation passes and retries thin results.
///
/// A pass that resolves at most one distinct country usually means boundary
/// chunks are still arriving, so the coordinator waits out a backoff and
/// re-resolves against whatever has loaded since. A monotonic generation
/// counter lets a newer update supersede an in-flight one instead of racing
/// it to publication.
pub struct RetryingUpdateCoordinator<Sl> {
    config: RetryConfig,
    sleeper: Sl,
    aliases: AliasTable,
    generation: AtomicU64,
}

impl<Sl: Sleeper> RetryingUpdateCoordinator<Sl> {
    pub fn new(config: RetryConfig, sleeper: Sl) -> Self {
        Self::with_aliases(config, sleeper, AliasTable::builtin())
    }

    pub fn with_aliases(config: RetryConfig, sleeper: Sl, aliases: AliasTable) -> Self {
        Self {
            config,
            sleeper,
            aliases,
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> RetryConfig {
        self.config
    }

    /// Runs one update: resolve, aggregate, and retry until the result covers
    /// more than one country or the retry budget runs out. The final attempt
    /// publishes whatever it produced, sparse or not.
    pub async fn update<B: BoundarySource>(
        &self,
        items: &[NewsItem],
        as_of: Timestamp,
        boundaries: &B,
    ) -> UpdateOutcome {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut attempt = 0u32;

        loop {
            let mut resolver = CountryIdentityResolver::new(self.aliases.clone());
            resolver.rebuild(&boundaries.loaded_features());
            let result = GeographicAggregator::aggregate(items, as_of, &resolver);

            if self.generation.load(Ordering::SeqCst) != my_generation {
                tracing::debug!(generation = my_generation, "update superseded");
                return UpdateOutcome::Superseded;
            }

            if result.active_region_count > 1 || attempt >= self.config.max_retries {
                tracing::info!(
                    generation = my_generation,
                    attempt,
                    regions = result.active_region_count,
                    items = items.len(),
                    "aggregation published"
                );
                return UpdateOutcome::Published(result);
            }

            attempt += 1;
            tracing::debug!(
                generation = my_generation,
                attempt,
                regions = result.active_region_count,
                "sparse aggregation, retrying after backoff"
            );
            self.sleeper.sleep(self.config.backoff).await;

            if self.generation.load(Ordering::SeqCst) != my_generation {
                tracing::debug!(generation = my_generation, "update superseded during backoff");
                return UpdateOutcome::Superseded;
            }
        }
    }
}
