//! Currency records and conversion to the base currency

use crate::core::collection::{Collection, Record};
use crate::core::context::ModelContext;
use crate::core::conversion::Conversion;
use crate::core::date;
use crate::core::error::{ErrorCode, ModelError};
use crate::core::strings::loc;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

const ABBREVIATION_LENGTH: usize = 3;
const EVENT_CAPACITY: usize = 16;

/// Lifecycle state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// Created locally and never saved.
    ReadyNew,
    /// Matches what the store holds.
    ReadyClean,
    /// Changed since it was loaded or last saved.
    ReadyDirty,
    /// A save is in flight.
    Busy,
}

impl RecordStatus {
    pub fn is_ready(&self) -> bool {
        !matches!(self, RecordStatus::Busy)
    }
}

/// Attributes of a currency as stored and sent over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub abbreviation: String,
    pub symbol: String,
    #[serde(default)]
    pub is_base: bool,
}

/// A partial set of attribute changes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPatch {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub symbol: Option<String>,
    pub is_base: Option<bool>,
}

/// Notifications published by a model to its subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    Error(ModelError),
    Saved,
}

#[derive(Debug, Clone)]
pub struct Currency {
    attributes: CurrencyRecord,
    original: CurrencyRecord,
    status: RecordStatus,
    events: broadcast::Sender<ModelEvent>,
}

pub type CurrencyCollection = Collection<Currency>;

fn duplicate_abbreviation(value: &str) -> ModelError {
    ModelError::new(
        ErrorCode::DuplicateValue,
        [("attr", loc("_abbreviation")), ("value", value)],
    )
}

fn required(key: &str) -> ModelError {
    ModelError::new(ErrorCode::RequiredAttribute, [("attr", loc(key))])
}

impl Currency {
    /// A new, unsaved currency.
    pub fn new(name: &str, abbreviation: &str, symbol: &str) -> Self {
        let attributes = CurrencyRecord {
            id: None,
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            symbol: symbol.to_string(),
            is_base: false,
        };
        Self::with_status(attributes, RecordStatus::ReadyNew)
    }

    /// A currency loaded from the store.
    pub fn from_record(record: CurrencyRecord) -> Self {
        Self::with_status(record, RecordStatus::ReadyClean)
    }

    fn with_status(attributes: CurrencyRecord, status: RecordStatus) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            original: attributes.clone(),
            attributes,
            status,
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    pub fn abbreviation(&self) -> &str {
        &self.attributes.abbreviation
    }

    pub fn symbol(&self) -> &str {
        &self.attributes.symbol
    }

    pub fn is_base(&self) -> bool {
        self.attributes.is_base
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn record(&self) -> &CurrencyRecord {
        &self.attributes
    }

    /// Abbreviation as of the last load or save.
    pub fn original_abbreviation(&self) -> &str {
        &self.original.abbreviation
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ModelEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ModelEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }

    fn emit_error(&self, err: ModelError) {
        debug!(code = %err.code, "Currency error: {}", err);
        self.emit(ModelEvent::Error(err));
    }

    fn mark_dirty(&mut self) {
        if self.status == RecordStatus::ReadyClean {
            self.status = RecordStatus::ReadyDirty;
        }
    }

    pub fn set_name(&mut self, name: &str) {
        if self.attributes.name != name {
            self.attributes.name = name.to_string();
            self.mark_dirty();
        }
    }

    pub fn set_symbol(&mut self, symbol: &str) {
        if self.attributes.symbol != symbol {
            self.attributes.symbol = symbol.to_string();
            self.mark_dirty();
        }
    }

    pub fn set_is_base(&mut self, is_base: bool) {
        if self.attributes.is_base != is_base {
            self.attributes.is_base = is_base;
            self.mark_dirty();
        }
    }

    /// Validates and applies a new abbreviation, then checks it for
    /// duplicates. A rejected value leaves the record unchanged.
    pub async fn set_abbreviation(
        &mut self,
        ctx: &ModelContext,
        abbreviation: &str,
    ) -> Result<(), ModelError> {
        let patch = CurrencyPatch {
            abbreviation: Some(abbreviation.to_string()),
            ..Default::default()
        };
        if let Err(err) = self.validate_edit(&patch) {
            self.emit_error(err.clone());
            return Err(err);
        }
        if self.attributes.abbreviation == abbreviation {
            return Ok(());
        }

        self.attributes.abbreviation = abbreviation.to_string();
        self.mark_dirty();
        if let Err(e) = self.abbreviation_did_change(ctx, abbreviation).await {
            warn!("Could not check abbreviation {}: {:#}", abbreviation, e);
        }
        Ok(())
    }

    async fn find_existing_abbreviation(
        &self,
        ctx: &ModelContext,
        abbreviation: &str,
    ) -> Result<Option<String>> {
        ctx.store()
            .find_existing(
                Self::RECORD_TYPE,
                "abbreviation",
                abbreviation,
                self.attributes.id.as_deref(),
            )
            .await
    }

    /// Publishes a duplicate-value error when another currency already uses
    /// `abbreviation`. Does nothing while the record is not ready.
    ///
    /// A failed existence check is returned without publishing anything.
    #[instrument(skip(self, ctx), fields(currency = %self.attributes.name))]
    pub async fn abbreviation_did_change(
        &self,
        ctx: &ModelContext,
        abbreviation: &str,
    ) -> Result<()> {
        if !self.status.is_ready() {
            return Ok(());
        }

        if let Some(existing) = self.find_existing_abbreviation(ctx, abbreviation).await? {
            debug!("Abbreviation {} already used by {}", abbreviation, existing);
            self.emit_error(duplicate_abbreviation(abbreviation));
        }
        Ok(())
    }

    /// Checks edited attributes. Only the abbreviation length is validated;
    /// an empty abbreviation is left to the required-attribute check.
    pub fn validate_edit(&self, attributes: &CurrencyPatch) -> Result<(), ModelError> {
        match &attributes.abbreviation {
            Some(abbreviation)
                if !abbreviation.is_empty()
                    && abbreviation.chars().count() != ABBREVIATION_LENGTH =>
            {
                Err(ModelError::new(
                    ErrorCode::InvalidLength,
                    [
                        ("attr", loc("_abbreviation").to_string()),
                        ("length", ABBREVIATION_LENGTH.to_string()),
                    ],
                ))
            }
            _ => Ok(()),
        }
    }

    fn validate_required(&self) -> Result<(), ModelError> {
        if self.attributes.name.is_empty() {
            return Err(required("_name"));
        }
        if self.attributes.abbreviation.is_empty() {
            return Err(required("_abbreviation"));
        }
        if self.attributes.symbol.is_empty() {
            return Err(required("_symbol"));
        }
        Ok(())
    }

    /// Applies `changes` and saves the currency. New records, and records
    /// whose abbreviation changed, are first checked for a duplicate
    /// abbreviation; a conflict aborts the save.
    #[instrument(skip(self, ctx, changes), fields(currency = %self.attributes.name))]
    pub async fn save(
        &mut self,
        ctx: &ModelContext,
        changes: Option<CurrencyPatch>,
    ) -> Result<(), ModelError> {
        if let Some(changes) = changes {
            self.validate_edit(&changes)
                .inspect_err(|e| self.emit_error(e.clone()))?;
            self.apply(changes);
        }

        let abbreviation = self.attributes.abbreviation.clone();
        let needs_check = match self.status {
            RecordStatus::ReadyNew => true,
            RecordStatus::ReadyDirty => abbreviation != self.original.abbreviation,
            _ => false,
        };

        if needs_check {
            match self.find_existing_abbreviation(ctx, &abbreviation).await {
                Ok(None) => {}
                Ok(Some(_)) => {
                    let err = duplicate_abbreviation(&abbreviation);
                    self.emit_error(err.clone());
                    return Err(err);
                }
                Err(e) => {
                    let err = ModelError::request_failed(&e);
                    self.emit_error(err.clone());
                    return Err(err);
                }
            }
        }

        self.persist(ctx).await
    }

    async fn persist(&mut self, ctx: &ModelContext) -> Result<(), ModelError> {
        self.validate_required()
            .inspect_err(|e| self.emit_error(e.clone()))?;

        let prior = self.status;
        self.status = RecordStatus::Busy;
        match ctx.store().save_currency(&self.attributes).await {
            Ok(id) => {
                info!("Saved currency {} as {}", self.attributes.name, id);
                self.attributes.id = Some(id);
                self.original = self.attributes.clone();
                self.status = RecordStatus::ReadyClean;
                self.emit(ModelEvent::Saved);
                Ok(())
            }
            Err(e) => {
                self.status = prior;
                let err = ModelError::request_failed(&e);
                self.emit_error(err.clone());
                Err(err)
            }
        }
    }

    fn apply(&mut self, changes: CurrencyPatch) {
        if let Some(name) = changes.name {
            self.set_name(&name);
        }
        if let Some(abbreviation) = changes.abbreviation {
            if self.attributes.abbreviation != abbreviation {
                self.attributes.abbreviation = abbreviation;
                self.mark_dirty();
            }
        }
        if let Some(symbol) = changes.symbol {
            self.set_symbol(&symbol);
        }
        if let Some(is_base) = changes.is_base {
            self.set_is_base(is_base);
        }
    }

    /// Converts `local_value` in this currency to the base currency using the
    /// rate valid at `as_of`.
    ///
    /// Unsaved currencies and missing dates are skipped silently. The base
    /// currency and cached rates convert immediately; otherwise the returned
    /// future queries the store once and caches the first rate it gets.
    pub fn to_base(
        &self,
        ctx: &ModelContext,
        local_value: f64,
        as_of: impl Into<Option<DateTime<Utc>>>,
    ) -> Conversion {
        let (Some(id), Some(as_of)) = (self.attributes.id.as_deref(), as_of.into()) else {
            debug!("Skipping conversion for {}: missing id or date", self);
            return Conversion::Skipped;
        };

        if self.attributes.is_base {
            return Conversion::Ready(local_value);
        }

        if let Some(rate) = ctx.rates().lookup(id, as_of) {
            return Conversion::Ready(local_value / rate.rate);
        }

        let store = Arc::clone(ctx.store());
        let rates = ctx.rates().clone();
        let id = id.to_string();
        let abbreviation = self.attributes.abbreviation.clone();
        let as_of_display = date::format(as_of, ctx.date_format());
        let parameters = ctx.rate_query().parameters(as_of);

        Conversion::Pending(Box::pin(async move {
            debug!("Requesting rate for {} as of {}", abbreviation, as_of_display);
            let fetched = store
                .fetch_rates(&id, &parameters)
                .await
                .map_err(|e| {
                    warn!("Rate query for {} failed: {:#}", abbreviation, e);
                    ModelError::request_failed(&e)
                })?;

            let Some(rate) = fetched.into_iter().next() else {
                return Err(ModelError::new(
                    ErrorCode::RateNotFound,
                    [("currency", abbreviation), ("asOf", as_of_display)],
                ));
            };

            let base_value = local_value / rate.rate;
            rates.insert(rate);
            Ok(base_value)
        }))
    }
}

impl Record for Currency {
    const RECORD_TYPE: &'static str = "Currency";

    fn id(&self) -> Option<&str> {
        self.attributes.id.as_deref()
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.attributes.abbreviation, self.attributes.symbol)
    }
}
