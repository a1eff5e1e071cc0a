//! Helpers for reading typed values out of DynamoDB items.

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::{RepositoryError, RepositoryResult};

pub type Item = HashMap<String, AttributeValue>;

fn malformed(field: &str, problem: &str) -> RepositoryError {
    RepositoryError::InvalidItem {
        message: format!("{} {}", problem, field),
    }
}

pub fn string(item: &Item, field: &str) -> RepositoryResult<String> {
    item.get(field)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| malformed(field, "Missing"))
}

/// Optional string attributes default to empty, matching how they are written
pub fn string_or_default(item: &Item, field: &str) -> String {
    item.get(field)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_default()
}

pub fn number<T: FromStr>(item: &Item, field: &str) -> RepositoryResult<T> {
    item.get(field)
        .and_then(|v| v.as_n().ok())
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| malformed(field, "Invalid"))
}

pub fn decimal(item: &Item, field: &str) -> RepositoryResult<Decimal> {
    item.get(field)
        .and_then(|v| v.as_n().ok())
        .and_then(|s| Decimal::from_str(s).ok())
        .ok_or_else(|| malformed(field, "Invalid"))
}

pub fn boolean(item: &Item, field: &str) -> RepositoryResult<bool> {
    item.get(field)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| malformed(field, "Invalid"))
}

pub fn parsed<T: FromStr>(item: &Item, field: &str) -> RepositoryResult<T> {
    item.get(field)
        .and_then(|v| v.as_s().ok())
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| malformed(field, "Invalid"))
}

pub fn timestamp(item: &Item, field: &str) -> RepositoryResult<DateTime<Utc>> {
    item.get(field)
        .and_then(|v| v.as_s().ok())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| malformed(field, "Invalid"))
}

pub fn list<'a>(item: &'a Item, field: &str) -> RepositoryResult<&'a [AttributeValue]> {
    item.get(field)
        .and_then(|v| v.as_l().ok())
        .map(|l| l.as_slice())
        .ok_or_else(|| malformed(field, "Invalid"))
}

pub fn s(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

pub fn n(value: impl ToString) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_typed_reads() {
        let mut item = Item::new();
        item.insert("name".to_string(), s("Mojito"));
        item.insert("price".to_string(), n(dec!(8.50)));
        item.insert("quantity".to_string(), n(3));
        item.insert("available".to_string(), AttributeValue::Bool(true));
        item.insert("created_at".to_string(), s("2025-06-01T10:00:00+00:00"));

        assert_eq!(string(&item, "name").unwrap(), "Mojito");
        assert_eq!(decimal(&item, "price").unwrap(), dec!(8.50));
        assert_eq!(number::<u32>(&item, "quantity").unwrap(), 3);
        assert!(boolean(&item, "available").unwrap());
        assert_eq!(
            timestamp(&item, "created_at").unwrap().to_rfc3339(),
            "2025-06-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_missing_and_mistyped_attributes() {
        let mut item = Item::new();
        item.insert("price".to_string(), s("not a number"));

        assert!(matches!(
            string(&item, "name"),
            Err(RepositoryError::InvalidItem { .. })
        ));
        assert!(decimal(&item, "price").is_err());
        assert_eq!(string_or_default(&item, "name"), "");
    }
}
