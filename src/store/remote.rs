use crate::core::collection::Record;
use crate::core::currency::{Currency, CurrencyRecord};
use crate::core::query::QueryParameter;
use crate::core::rate::{CurrencyRate, CurrencyRateCollection};
use crate::core::store::RecordStore;
use crate::store::util::{RetryPolicy, read_json, with_retry};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const USER_AGENT: &str = "basefx/0.1";

/// Record store reached over HTTP with JSON bodies.
pub struct RemoteStore {
    base_url: String,
    retry: RetryPolicy,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> Self {
        RemoteStore {
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
    }
}

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: Option<String>,
}

#[derive(Debug, Serialize)]
struct RateQuery<'a> {
    currency: &'a str,
    parameters: &'a [QueryParameter],
}

#[async_trait]
impl RecordStore for RemoteStore {
    #[instrument(name = "RemoteFindExisting", skip(self))]
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

        let mut params = vec![("attribute", attribute), ("value", value)];
        if let Some(exclude_id) = exclude_id {
            params.push(("exclude", exclude_id));
        }
        let url = Url::parse_with_params(&format!("{}/currencies/exists", self.base_url), &params)
            .with_context(|| format!("Invalid store URL: {}", self.base_url))?;
        debug!("Checking for existing currency at {}", url);

        let client = self.client()?;
        let response = with_retry(|| client.get(url.clone()).send(), self.retry)
            .await
            .with_context(|| format!("Failed to check {attribute} = {value}"))?;

        let existing: IdResponse = read_json(response, &format!("{attribute} = {value}")).await?;
        Ok(existing.id)
    }

    #[instrument(name = "RemoteFetchRates", skip(self, parameters))]
    async fn fetch_rates(
        &self,
        currency_id: &str,
        parameters: &[QueryParameter],
    ) -> Result<CurrencyRateCollection> {
        let url = format!("{}/currency-rates/query", self.base_url);
        let body = RateQuery {
            currency: currency_id,
            parameters,
        };
        debug!("Requesting rates from {}", url);

        let client = self.client()?;
        let response = with_retry(|| client.post(&url).json(&body).send(), self.retry)
            .await
            .with_context(|| format!("Failed to query rates for currency: {currency_id}"))?;

        let rates: Vec<CurrencyRate> =
            read_json(response, &format!("rates of currency {currency_id}")).await?;
        Ok(rates.into_iter().collect())
    }

    async fn fetch_currencies(&self) -> Result<Vec<CurrencyRecord>> {
        let url = format!("{}/currencies", self.base_url);
        debug!("Requesting currencies from {}", url);

        let client = self.client()?;
        let response = with_retry(|| client.get(&url).send(), self.retry)
            .await
            .context("Failed to list currencies")?;

        read_json(response, "currencies").await
    }

    #[instrument(name = "RemoteSaveCurrency", skip(self, record), fields(name = %record.name))]
    async fn save_currency(&self, record: &CurrencyRecord) -> Result<String> {
        let url = format!("{}/currencies", self.base_url);

        let client = self.client()?;
        let response = with_retry(|| client.put(&url).json(record).send(), self.retry)
            .await
            .with_context(|| format!("Failed to save currency: {}", record.name))?;

        let saved: IdResponse = read_json(response, &format!("currency {}", record.name)).await?;
        saved
            .id
            .with_context(|| format!("Store returned no id for currency: {}", record.name))
    }
}
