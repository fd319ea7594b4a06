use super::{load_currencies, ui};
use crate::core::{CurrencyCollection, ModelContext, Record};
use anyhow::Result;
use comfy_table::Cell;

pub fn display_as_table(currencies: &CurrencyCollection) -> String {
    if currencies.is_empty() {
        return ui::style_text("No currencies defined", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("Currency"),
        ui::header_cell("Base"),
        ui::header_cell("Id"),
    ]);

    for currency in currencies {
        table.add_row(vec![
            Cell::new(currency.name()),
            Cell::new(currency.to_string()),
            ui::flag_cell(currency.is_base()),
            Cell::new(currency.id().unwrap_or("-")),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Currencies", ui::StyleType::Title),
        table
    )
}

pub async fn run(ctx: &ModelContext) -> Result<String> {
    let currencies = load_currencies(ctx).await?;
    Ok(display_as_table(&currencies))
}
