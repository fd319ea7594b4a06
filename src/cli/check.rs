use super::ui;
use crate::core::strings::loc;
use crate::core::{Currency, CurrencyPatch, ErrorCode, ModelContext, ModelError, ModelEvent};
use anyhow::{Context, Result};

/// Reports whether `abbreviation` can be used for a new currency.
pub async fn run(ctx: &ModelContext, abbreviation: &str) -> Result<String> {
    if abbreviation.is_empty() {
        let err = ModelError::new(ErrorCode::RequiredAttribute, [("attr", loc("_abbreviation"))]);
        return Ok(ui::style_text(&err.to_string(), ui::StyleType::Error));
    }

    let currency = Currency::new("", "", "");
    let patch = CurrencyPatch {
        abbreviation: Some(abbreviation.to_string()),
        ..Default::default()
    };
    if let Err(err) = currency.validate_edit(&patch) {
        return Ok(ui::style_text(&err.to_string(), ui::StyleType::Error));
    }

    let mut events = currency.subscribe();
    currency
        .abbreviation_did_change(ctx, abbreviation)
        .await
        .with_context(|| format!("Could not check abbreviation {abbreviation}"))?;

    let mut problems = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let ModelEvent::Error(err) = event {
            problems.push(err.to_string());
        }
    }

    if problems.is_empty() {
        Ok(format!("{abbreviation} is available"))
    } else {
        Ok(ui::style_text(&problems.join("\n"), ui::StyleType::Error))
    }
}
