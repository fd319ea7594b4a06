//! Exchange rates valid over a time window

use crate::core::collection::{Collection, Record};
use crate::core::date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One exchange rate for a currency, valid over `[effective, expires)`.
///
/// `id` is the identifier of the currency the rate belongs to. `rate` is the
/// number of local-currency units per one base-currency unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub id: String,
    pub effective: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub rate: f64,
}

impl CurrencyRate {
    pub fn new(id: &str, effective: DateTime<Utc>, expires: DateTime<Utc>, rate: f64) -> Self {
        Self {
            id: id.to_string(),
            effective,
            expires,
            rate,
        }
    }

    pub fn covers(&self, as_of: DateTime<Utc>) -> bool {
        date::in_range(as_of, self.effective, self.expires)
    }
}

impl Record for CurrencyRate {
    const RECORD_TYPE: &'static str = "CurrencyRate";

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

pub type CurrencyRateCollection = Collection<CurrencyRate>;
