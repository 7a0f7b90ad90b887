//! Database value parsing utilities
//!
//! Provides error-safe parsing of stored values.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Error as SqlError;
use uuid::Uuid;

use crate::models::{GroupEventType, GroupState, GroupType, RoleName};

fn conversion_failure(message: String) -> SqlError {
    SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, message.into())
}

/// Parse a UUID from a database string column
pub fn parse_uuid(s: &str) -> Result<Uuid, SqlError> {
    Uuid::parse_str(s).map_err(|e| {
        SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse an optional UUID from a database string column
pub fn parse_uuid_opt(s: Option<String>) -> Result<Option<Uuid>, SqlError> {
    s.map(|s| parse_uuid(&s)).transpose()
}

/// Parse a DateTime from an RFC3339 string
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, SqlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parse a calendar date from a YYYY-MM-DD string
pub fn parse_date(s: &str) -> Result<NaiveDate, SqlError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse an optional calendar date from a YYYY-MM-DD string
pub fn parse_date_opt(s: Option<String>) -> Result<Option<NaiveDate>, SqlError> {
    s.map(|s| parse_date(&s)).transpose()
}

/// Parse a group state from its stored text form
pub fn parse_group_state(s: &str) -> Result<GroupState, SqlError> {
    GroupState::from_str(s).ok_or_else(|| conversion_failure(format!("unknown group state: {s}")))
}

/// Parse a group type from its stored text form
pub fn parse_group_type(s: &str) -> Result<GroupType, SqlError> {
    GroupType::from_str(s).ok_or_else(|| conversion_failure(format!("unknown group type: {s}")))
}

/// Parse a role name from its stored text form
pub fn parse_role_name(s: &str) -> Result<RoleName, SqlError> {
    RoleName::from_str(s).ok_or_else(|| conversion_failure(format!("unknown role name: {s}")))
}

/// Parse an event type from its stored text form
pub fn parse_event_type(s: &str) -> Result<GroupEventType, SqlError> {
    GroupEventType::from_str(s).ok_or_else(|| conversion_failure(format!("unknown event type: {s}")))
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
