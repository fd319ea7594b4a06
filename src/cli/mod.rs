pub mod add;
pub mod check;
pub mod convert;
pub mod list;
pub mod setup;
pub mod ui;

use crate::core::{Currency, CurrencyCollection, ModelContext};
use anyhow::{Context, Result};

/// Loads every currency from the context's store.
pub async fn load_currencies(ctx: &ModelContext) -> Result<CurrencyCollection> {
    let records = ctx
        .store()
        .fetch_currencies()
        .await
        .context("Failed to load currencies")?;
    Ok(records.into_iter().map(Currency::from_record).collect())
}
