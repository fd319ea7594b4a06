use crate::core::rate::{CurrencyRate, CurrencyRateCollection};
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Append-only store of rates that have already been fetched.
///
/// Clones share the same underlying collection.
#[derive(Clone, Default)]
pub struct RateCache {
    inner: Arc<RwLock<CurrencyRateCollection>>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// First cached rate for `id` whose window contains `as_of`.
    pub fn lookup(&self, id: &str, as_of: DateTime<Utc>) -> Option<CurrencyRate> {
        let rates = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let rate = rates
            .find(|rate| rate.id == id && rate.covers(as_of))
            .cloned();
        if rate.is_some() {
            debug!("Cache HIT for rate: {} at {}", id, as_of);
        } else {
            debug!("Cache MISS for rate: {} at {}", id, as_of);
        }
        rate
    }

    pub fn insert(&self, rate: CurrencyRate) {
        let mut rates = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Cache PUT for rate: {}", rate.id);
        rates.add(rate);
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_cache_lookup_insert() {
        let cache = RateCache::new();

        // Initially, cache is empty
        assert!(cache.is_empty());
        assert!(cache.lookup("EUR-rec", at(2023, 1, 15)).is_none());

        cache.insert(CurrencyRate::new("EUR-rec", at(2023, 1, 1), at(2023, 2, 1), 0.9));

        let rate = cache.lookup("EUR-rec", at(2023, 1, 15)).unwrap();
        assert_eq!(rate.rate, 0.9);

        // Outside the window or for another currency
        assert!(cache.lookup("EUR-rec", at(2023, 2, 1)).is_none());
        assert!(cache.lookup("GBP-rec", at(2023, 1, 15)).is_none());
    }

    #[test]
    fn test_cache_returns_first_matching_rate() {
        let cache = RateCache::new();
        cache.insert(CurrencyRate::new("EUR-rec", at(2023, 1, 1), at(2023, 2, 1), 0.9));
        cache.insert(CurrencyRate::new("EUR-rec", at(2023, 1, 10), at(2023, 1, 20), 0.8));

        assert_eq!(cache.lookup("EUR-rec", at(2023, 1, 15)).unwrap().rate, 0.9);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = RateCache::new();
        let other = cache.clone();

        other.insert(CurrencyRate::new("EUR-rec", at(2023, 1, 1), at(2023, 2, 1), 0.9));

        assert_eq!(cache.len(), 1);
        assert!(cache.lookup("EUR-rec", at(2023, 1, 2)).is_some());
    }
}
