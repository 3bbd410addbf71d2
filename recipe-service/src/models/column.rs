//! Loosely typed SQLite cells.
//!
//! The bundled database does not agree on column affinity: ids, times,
//! servings and amounts show up as integers, reals or text depending on how
//! a row was written. Values are decoded by their storage class and
//! serialized back as the same JSON type.

use serde::{Deserialize, Serialize};
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Decode, Type, TypeInfo, ValueRef};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Integer(value) => write!(f, "{}", value),
            ColumnValue::Real(value) => write!(f, "{}", value),
            ColumnValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Integer(value)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Real(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }
}

enum StorageClass {
    Integer,
    Real,
    Other,
}

impl Type<Sqlite> for ColumnValue {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(_ty: &SqliteTypeInfo) -> bool {
        true
    }
}

impl<'r> Decode<'r, Sqlite> for ColumnValue {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let storage = match value.type_info().name() {
            "INTEGER" => StorageClass::Integer,
            "REAL" => StorageClass::Real,
            _ => StorageClass::Other,
        };

        Ok(match storage {
            StorageClass::Integer => ColumnValue::Integer(<i64 as Decode<'r, Sqlite>>::decode(value)?),
            StorageClass::Real => ColumnValue::Real(<f64 as Decode<'r, Sqlite>>::decode(value)?),
            StorageClass::Other => ColumnValue::Text(<String as Decode<'r, Sqlite>>::decode(value)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_native_json_types() {
        assert_eq!(serde_json::to_value(ColumnValue::from(7)).unwrap(), serde_json::json!(7));
        assert_eq!(serde_json::to_value(ColumnValue::from(1.5)).unwrap(), serde_json::json!(1.5));
        assert_eq!(
            serde_json::to_value(ColumnValue::from("45 minutes")).unwrap(),
            serde_json::json!("45 minutes")
        );
    }

    #[test]
    fn displays_as_plain_text() {
        assert_eq!(ColumnValue::from(7).to_string(), "7");
        assert_eq!(ColumnValue::from("abc").to_string(), "abc");
    }
}
