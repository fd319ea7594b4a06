use crate::core::cache::RateCache;
use crate::core::date::DEFAULT_DATE_FORMAT;
use crate::core::query::RateQueryMode;
use crate::core::store::RecordStore;
use std::sync::Arc;

/// Services the currency model needs from its host: the record store, the
/// shared rate cache and display settings.
#[derive(Clone)]
pub struct ModelContext {
    store: Arc<dyn RecordStore>,
    rates: RateCache,
    date_format: String,
    rate_query: RateQueryMode,
}

impl ModelContext {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            rates: RateCache::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            rate_query: RateQueryMode::default(),
        }
    }

    pub fn with_rate_cache(mut self, rates: RateCache) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_date_format(mut self, date_format: &str) -> Self {
        self.date_format = date_format.to_string();
        self
    }

    pub fn with_rate_query(mut self, rate_query: RateQueryMode) -> Self {
        self.rate_query = rate_query;
        self
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn rates(&self) -> &RateCache {
        &self.rates
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn rate_query(&self) -> RateQueryMode {
        self.rate_query
    }
}
