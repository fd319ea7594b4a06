//! Record store abstraction

use crate::core::currency::CurrencyRecord;
use crate::core::query::QueryParameter;
use crate::core::rate::CurrencyRateCollection;
use anyhow::Result;
use async_trait::async_trait;

/// Remote store the currency model reads from and writes to.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Id of an existing `record_type` record whose `attribute` equals `value`,
    /// ignoring the record with `exclude_id`.
    async fn find_existing(
        &self,
        record_type: &str,
        attribute: &str,
        value: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<String>>;

    /// Rates belonging to `currency_id` that match every parameter.
    async fn fetch_rates(
        &self,
        currency_id: &str,
        parameters: &[QueryParameter],
    ) -> Result<CurrencyRateCollection>;

    async fn fetch_currencies(&self) -> Result<Vec<CurrencyRecord>>;

    /// Inserts or updates a currency and returns its id.
    async fn save_currency(&self, record: &CurrencyRecord) -> Result<String>;
}
