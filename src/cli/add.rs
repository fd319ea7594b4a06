use crate::core::{Currency, CurrencyPatch, ModelContext, Record};
use anyhow::Result;

/// Creates and saves a new currency.
pub async fn run(
    ctx: &ModelContext,
    name: &str,
    abbreviation: &str,
    symbol: &str,
    is_base: bool,
) -> Result<String> {
    let mut currency = Currency::new(name, abbreviation, symbol);
    currency.set_is_base(is_base);

    currency.validate_edit(&CurrencyPatch {
        abbreviation: Some(abbreviation.to_string()),
        ..Default::default()
    })?;

    currency.save(ctx, None).await?;

    Ok(format!(
        "Saved {} ({})",
        currency,
        currency.id().unwrap_or_default()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CurrencyRecord, RecordStore};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn context(store: &MemoryStore) -> ModelContext {
        ModelContext::new(Arc::new(store.clone()) as Arc<dyn RecordStore>)
    }

    #[tokio::test]
    async fn test_add_saves_currency() {
        let store = MemoryStore::default();

        let output = run(&context(&store), "Yen", "JPY", "¥", false)
            .await
            .unwrap();

        assert!(output.starts_with("Saved JPY - ¥ ("));
        let saved = store.fetch_currencies().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].abbreviation, "JPY");
        assert!(saved[0].id.is_some());
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate() {
        let store = MemoryStore::new(
            vec![CurrencyRecord {
                id: Some("JPY-rec".to_string()),
                name: "Yen".to_string(),
                abbreviation: "JPY".to_string(),
                symbol: "¥".to_string(),
                is_base: false,
            }],
            Vec::new(),
        );

        let err = run(&context(&store), "Japanese Yen", "JPY", "¥", false)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Abbreviation \"JPY\" already exists.");
        assert_eq!(store.fetch_currencies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_length() {
        let store = MemoryStore::default();
        let err = run(&context(&store), "Yen", "JP", "¥", false)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Abbreviation must be 3 characters.");
    }
}
