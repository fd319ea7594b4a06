//! Query parameters sent to the record store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
}

impl Operator {
    pub fn matches<T: PartialOrd>(&self, lhs: &T, rhs: &T) -> bool {
        match self {
            Operator::Equals => lhs == rhs,
            Operator::GreaterOrEqual => lhs >= rhs,
            Operator::LessOrEqual => lhs <= rhs,
            Operator::Greater => lhs > rhs,
            Operator::Less => lhs < rhs,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Operator::Equals => "=",
                Operator::GreaterOrEqual => ">=",
                Operator::LessOrEqual => "<=",
                Operator::Greater => ">",
                Operator::Less => "<",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameter {
    pub attribute: String,
    pub operator: Operator,
    pub value: DateTime<Utc>,
}

impl QueryParameter {
    pub fn new(attribute: &str, operator: Operator, value: DateTime<Utc>) -> Self {
        Self {
            attribute: attribute.to_string(),
            operator,
            value,
        }
    }
}

/// Which filter a rate query sends for a conversion date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateQueryMode {
    /// `effective >= as_of AND expires <= as_of`. This is inverted relative to
    /// the cache check and only matches degenerate windows; it is kept because
    /// existing deployments rely on the store interpreting it.
    #[default]
    Legacy,
    /// `effective <= as_of AND expires > as_of`, matching the cache check.
    Covering,
}

impl RateQueryMode {
    pub fn parameters(&self, as_of: DateTime<Utc>) -> Vec<QueryParameter> {
        match self {
            RateQueryMode::Legacy => vec![
                QueryParameter::new("effective", Operator::GreaterOrEqual, as_of),
                QueryParameter::new("expires", Operator::LessOrEqual, as_of),
            ],
            RateQueryMode::Covering => vec![
                QueryParameter::new("effective", Operator::LessOrEqual, as_of),
                QueryParameter::new("expires", Operator::Greater, as_of),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_legacy_parameters_are_inverted() {
        let as_of = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        let params = RateQueryMode::default().parameters(as_of);

        assert_eq!(
            params,
            vec![
                QueryParameter::new("effective", Operator::GreaterOrEqual, as_of),
                QueryParameter::new("expires", Operator::LessOrEqual, as_of),
            ]
        );
    }

    #[test]
    fn test_covering_parameters() {
        let as_of = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        let params = RateQueryMode::Covering.parameters(as_of);

        assert_eq!(params[0].operator, Operator::LessOrEqual);
        assert_eq!(params[1].operator, Operator::Greater);
    }

    #[test]
    fn test_operator_wire_format() {
        let json = serde_json::to_string(&Operator::GreaterOrEqual).unwrap();
        assert_eq!(json, "\">=\"");
        let op: Operator = serde_json::from_str("\"<\"").unwrap();
        assert_eq!(op, Operator::Less);
        assert_eq!(Operator::LessOrEqual.to_string(), "<=");
    }

    #[test]
    fn test_operator_matches() {
        assert!(Operator::GreaterOrEqual.matches(&2, &2));
        assert!(!Operator::Greater.matches(&2, &2));
        assert!(Operator::Less.matches(&1, &2));
        assert!(Operator::Equals.matches(&"a", &"a"));
    }
}
