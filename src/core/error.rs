//! Structured model errors with localized message templates

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    RequiredAttribute,
    InvalidLength,
    DuplicateValue,
    RateNotFound,
    RequestFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RequiredAttribute => "required-attribute",
            ErrorCode::InvalidLength => "invalid-length",
            ErrorCode::DuplicateValue => "duplicate-value",
            ErrorCode::RateNotFound => "rate-not-found",
            ErrorCode::RequestFailed => "request-failed",
        }
    }

    /// Message template. Placeholders are `{param}` names.
    pub fn template(&self) -> &'static str {
        match self {
            ErrorCode::RequiredAttribute => "{attr} is required.",
            ErrorCode::InvalidLength => "{attr} must be {length} characters.",
            ErrorCode::DuplicateValue => "{attr} \"{value}\" already exists.",
            ErrorCode::RateNotFound => "No exchange rate found for {currency} as of {asOf}.",
            ErrorCode::RequestFailed => "Request failed: {reason}",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error carrying a code and the parameters its message is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelError {
    pub code: ErrorCode,
    pub params: BTreeMap<String, String>,
}

impl ModelError {
    pub fn new<I, K, V>(code: ErrorCode, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            code,
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn request_failed(err: &anyhow::Error) -> Self {
        Self::new(ErrorCode::RequestFailed, [("reason", format!("{err:#}"))])
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Renders the template, leaving unknown placeholders untouched.
    pub fn message(&self) -> String {
        self.params
            .iter()
            .fold(self.code.template().to_string(), |msg, (key, value)| {
                msg.replace(&format!("{{{key}}}"), value)
            })
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for ModelError {}
