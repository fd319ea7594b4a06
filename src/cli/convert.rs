use super::{load_currencies, ui};
use crate::core::{Conversion, ModelContext, date};
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use tracing::debug;

/// Converts `amount` of the currency with `abbreviation` to the base currency
/// at the start of `as_of`.
pub async fn run(
    ctx: &ModelContext,
    abbreviation: &str,
    amount: f64,
    as_of: NaiveDate,
) -> Result<String> {
    let currencies = load_currencies(ctx).await?;
    let currency = currencies
        .find(|c| c.abbreviation().eq_ignore_ascii_case(abbreviation))
        .ok_or_else(|| anyhow!("Unknown currency: {}", abbreviation))?;
    let base = currencies
        .find(|c| c.is_base())
        .map_or("base", |c| c.abbreviation());

    let conversion = currency.to_base(ctx, amount, date::start_of_day(as_of));
    debug!("Conversion of {} is {:?}", currency, conversion);
    let value = match conversion {
        Conversion::Skipped => bail!("Currency {} has not been saved", currency),
        Conversion::Ready(value) => value,
        Conversion::Pending(fut) => fut.await?,
    };

    Ok(format!(
        "{:.2} {} = {} on {}",
        amount,
        currency.abbreviation(),
        ui::style_text(&format!("{value:.2} {base}"), ui::StyleType::Value),
        date::format(date::start_of_day(as_of), ctx.date_format())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CurrencyRate, CurrencyRecord, RateQueryMode, RecordStore};
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn record(id: &str, abbreviation: &str, is_base: bool) -> CurrencyRecord {
        CurrencyRecord {
            id: Some(id.to_string()),
            name: abbreviation.to_string(),
            abbreviation: abbreviation.to_string(),
            symbol: abbreviation.to_string(),
            is_base,
        }
    }

    fn context(rate_query: RateQueryMode) -> ModelContext {
        let store = MemoryStore::new(
            vec![record("USD-rec", "USD", true), record("EUR-rec", "EUR", false)],
            vec![CurrencyRate::new(
                "EUR-rec",
                Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap(),
                0.8,
            )],
        );
        ModelContext::new(Arc::new(store) as Arc<dyn RecordStore>).with_rate_query(rate_query)
    }

    fn jan_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
    }

    #[tokio::test]
    async fn test_convert_with_covering_query() {
        let ctx = context(RateQueryMode::Covering);

        let output = run(&ctx, "eur", 100.0, jan_15()).await.unwrap();

        assert!(output.contains("100.00 EUR"));
        assert!(output.contains("125.00 USD"));
        assert!(output.contains("1/15/2023"));
        assert_eq!(ctx.rates().len(), 1);
    }

    #[tokio::test]
    async fn test_convert_base_currency() {
        let ctx = context(RateQueryMode::Legacy);
        let output = run(&ctx, "USD", 42.0, jan_15()).await.unwrap();
        assert!(output.contains("42.00 USD"));
    }

    #[tokio::test]
    async fn test_convert_with_legacy_query_finds_no_rate() {
        let ctx = context(RateQueryMode::Legacy);

        let err = run(&ctx, "EUR", 100.0, jan_15()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "No exchange rate found for EUR as of 1/15/2023."
        );
    }

    #[tokio::test]
    async fn test_convert_unknown_currency() {
        let ctx = context(RateQueryMode::Covering);
        let err = run(&ctx, "JPY", 1.0, jan_15()).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown currency: JPY");
    }
}
