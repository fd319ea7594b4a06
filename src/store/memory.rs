use crate::core::collection::Record;
use crate::core::config::MemoryStoreConfig;
use crate::core::currency::{Currency, CurrencyRecord};
use crate::core::query::QueryParameter;
use crate::core::rate::{CurrencyRate, CurrencyRateCollection};
use crate::core::store::RecordStore;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct Records {
    currencies: Vec<CurrencyRecord>,
    rates: Vec<CurrencyRate>,
}

/// In-memory record store. Rate queries are applied literally.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Records>>,
}

impl MemoryStore {
    pub fn new(currencies: Vec<CurrencyRecord>, rates: Vec<CurrencyRate>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Records { currencies, rates })),
        }
    }

    pub fn from_config(config: &MemoryStoreConfig) -> Self {
        Self::new(config.currencies.clone(), config.rates.clone())
    }

    pub async fn add_rate(&self, rate: CurrencyRate) {
        self.inner.lock().await.rates.push(rate);
    }
}

fn currency_attribute<'a>(record: &'a CurrencyRecord, attribute: &str) -> Result<&'a str> {
    Ok(match attribute {
        "name" => record.name.as_str(),
        "abbreviation" => record.abbreviation.as_str(),
        "symbol" => record.symbol.as_str(),
        _ => bail!("Unknown currency attribute: {}", attribute),
    })
}

fn rate_matches(rate: &CurrencyRate, parameter: &QueryParameter) -> Result<bool> {
    let field = match parameter.attribute.as_str() {
        "effective" => &rate.effective,
        "expires" => &rate.expires,
        other => bail!("Unknown rate attribute: {}", other),
    };
    Ok(parameter.operator.matches(field, &parameter.value))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_existing(
        &self,
        record_type: &str,
        attribute: &str,
        value: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<String>> {
        if record_type != Currency::RECORD_TYPE {
            bail!("Unsupported record type: {}", record_type);
        }

        let records = self.inner.lock().await;
        for record in &records.currencies {
            if record.id.is_some() && record.id.as_deref() == exclude_id {
                continue;
            }
            if currency_attribute(record, attribute)? == value {
                debug!("Found existing {} with {} = {}", record_type, attribute, value);
                return Ok(Some(record.id.clone().unwrap_or_default()));
            }
        }
        Ok(None)
    }

    async fn fetch_rates(
        &self,
        currency_id: &str,
        parameters: &[QueryParameter],
    ) -> Result<CurrencyRateCollection> {
        let records = self.inner.lock().await;
        let mut rates = CurrencyRateCollection::new();
        for rate in records.rates.iter().filter(|r| r.id == currency_id) {
            let mut matched = true;
            for parameter in parameters {
                matched &= rate_matches(rate, parameter)?;
            }
            if matched {
                rates.add(rate.clone());
            }
        }
        debug!("Rate query for {} matched {} rates", currency_id, rates.len());
        Ok(rates)
    }

    async fn fetch_currencies(&self) -> Result<Vec<CurrencyRecord>> {
        Ok(self.inner.lock().await.currencies.clone())
    }

    async fn save_currency(&self, record: &CurrencyRecord) -> Result<String> {
        let mut records = self.inner.lock().await;
        let id = record
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let saved = CurrencyRecord {
            id: Some(id.clone()),
            ..record.clone()
        };

        match records
            .currencies
            .iter()
            .position(|c| c.id.as_deref() == Some(id.as_str()))
        {
            Some(index) => records.currencies[index] = saved,
            None => records.currencies.push(saved),
        }
        debug!("Saved currency {}", id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{Operator, RateQueryMode};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn currency(id: &str, abbreviation: &str) -> CurrencyRecord {
        CurrencyRecord {
            id: Some(id.to_string()),
            name: format!("{abbreviation} name"),
            abbreviation: abbreviation.to_string(),
            symbol: "¤".to_string(),
            is_base: false,
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new(
            vec![currency("USD-rec", "USD"), currency("EUR-rec", "EUR")],
            vec![
                CurrencyRate::new("EUR-rec", at(2023, 1, 1), at(2023, 2, 1), 0.92),
                CurrencyRate::new("EUR-rec", at(2023, 2, 1), at(2023, 3, 1), 0.94),
                CurrencyRate::new("GBP-rec", at(2023, 1, 1), at(2023, 2, 1), 0.81),
            ],
        )
    }

    #[tokio::test]
    async fn test_find_existing() {
        let store = store();

        let found = store
            .find_existing("Currency", "abbreviation", "EUR", None)
            .await
            .unwrap();
        assert_eq!(found.as_deref(), Some("EUR-rec"));

        // The record itself is not a conflict
        let found = store
            .find_existing("Currency", "abbreviation", "EUR", Some("EUR-rec"))
            .await
            .unwrap();
        assert!(found.is_none());

        let found = store
            .find_existing("Currency", "abbreviation", "JPY", None)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_existing_rejects_unknown_inputs() {
        let store = store();
        assert!(
            store
                .find_existing("Account", "abbreviation", "EUR", None)
                .await
                .is_err()
        );
        assert!(
            store
                .find_existing("Currency", "color", "red", None)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_covering_query_finds_window() {
        let store = store();
        let params = RateQueryMode::Covering.parameters(at(2023, 2, 10));

        let rates = store.fetch_rates("EUR-rec", &params).await.unwrap();

        assert_eq!(rates.len(), 1);
        assert_eq!(rates.at(0).unwrap().rate, 0.94);
    }

    #[tokio::test]
    async fn test_legacy_query_misses_covering_window() {
        let store = store();
        let params = RateQueryMode::Legacy.parameters(at(2023, 1, 15));

        let rates = store.fetch_rates("EUR-rec", &params).await.unwrap();

        assert!(rates.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_query_matches_degenerate_window() {
        let as_of = at(2023, 1, 15);
        let store = MemoryStore::new(
            Vec::new(),
            vec![CurrencyRate::new("EUR-rec", as_of, as_of, 0.9)],
        );

        let rates = store
            .fetch_rates("EUR-rec", &RateQueryMode::Legacy.parameters(as_of))
            .await
            .unwrap();

        assert_eq!(rates.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_rates_rejects_unknown_attribute() {
        let store = store();
        let params = vec![QueryParameter::new("rate", Operator::Equals, at(2023, 1, 1))];
        assert!(store.fetch_rates("EUR-rec", &params).await.is_err());
    }

    #[tokio::test]
    async fn test_save_currency_assigns_id_and_updates() {
        let store = MemoryStore::default();
        let mut record = CurrencyRecord {
            id: None,
            name: "Yen".to_string(),
            abbreviation: "JPY".to_string(),
            symbol: "¥".to_string(),
            is_base: false,
        };

        let id = store.save_currency(&record).await.unwrap();
        assert!(!id.is_empty());

        record.id = Some(id.clone());
        record.symbol = "円".to_string();
        let same_id = store.save_currency(&record).await.unwrap();
        assert_eq!(same_id, id);

        let currencies = store.fetch_currencies().await.unwrap();
        assert_eq!(currencies.len(), 1);
        assert_eq!(currencies[0].symbol, "円");
    }

    #[tokio::test]
    async fn test_add_rate() {
        let store = MemoryStore::default();
        store
            .add_rate(CurrencyRate::new("EUR-rec", at(2023, 1, 1), at(2023, 2, 1), 0.92))
            .await;

        let rates = store.fetch_rates("EUR-rec", &[]).await.unwrap();
        assert_eq!(rates.len(), 1);
    }
}
