//! Core currency model

pub mod cache;
pub mod collection;
pub mod config;
pub mod context;
pub mod conversion;
pub mod currency;
pub mod date;
pub mod error;
pub mod log;
pub mod query;
pub mod rate;
pub mod store;
pub mod strings;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use collection::{Collection, Record};
pub use context::ModelContext;
pub use conversion::Conversion;
pub use currency::{
    Currency, CurrencyCollection, CurrencyPatch, CurrencyRecord, ModelEvent, RecordStatus,
};
pub use error::{ErrorCode, ModelError};
pub use query::{Operator, QueryParameter, RateQueryMode};
pub use rate::{CurrencyRate, CurrencyRateCollection};
pub use store::RecordStore;
