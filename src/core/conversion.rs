//! Result of a base currency conversion

use crate::core::error::ModelError;
use futures::future::BoxFuture;
use std::fmt;

/// Outcome of [`Currency::to_base`](crate::core::currency::Currency::to_base).
///
/// `Ready` values were computed without touching the store. `Pending` needs
/// one store query and yields exactly one result when awaited.
pub enum Conversion {
    /// The call was missing an id or a date; nothing was done.
    Skipped,
    Ready(f64),
    Pending(BoxFuture<'static, Result<f64, ModelError>>),
}

impl Conversion {
    pub fn is_ready(&self) -> bool {
        matches!(self, Conversion::Ready(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Conversion::Pending(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Conversion::Skipped)
    }

    pub fn ready_value(&self) -> Option<f64> {
        match self {
            Conversion::Ready(value) => Some(*value),
            _ => None,
        }
    }

    /// Waits for the result. `None` when the conversion was skipped.
    pub async fn resolve(self) -> Option<Result<f64, ModelError>> {
        match self {
            Conversion::Skipped => None,
            Conversion::Ready(value) => Some(Ok(value)),
            Conversion::Pending(fut) => Some(fut.await),
        }
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Skipped => write!(f, "Skipped"),
            Conversion::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Conversion::Pending(_) => write!(f, "Pending(..)"),
        }
    }
}
