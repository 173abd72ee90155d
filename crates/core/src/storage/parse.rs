//! Database value parsing utilities
//!
//! Provides error-safe parsing of stored values.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Error as SqlError;
use uuid::Uuid;

use crate::models::{BookingStatus, ChangeStatus, RoomType, TicketPriority, TicketStatus};

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

/// Parse an optional DateTime from an RFC3339 string
pub fn parse_datetime_opt(s: Option<String>) -> Result<Option<DateTime<Utc>>, SqlError> {
    s.map(|s| parse_datetime(&s)).transpose()
}

/// Parse a calendar date stored as YYYY-MM-DD
pub fn parse_date(s: &str) -> Result<NaiveDate, SqlError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Convert a u8 to RoomType
pub fn room_type_from_u8(value: u8) -> RoomType {
    match value {
        2 => RoomType::Deluxe,
        _ => RoomType::Standard,
    }
}

/// Decode a stored booking status, falling back to pending
pub fn booking_status_from_str(s: &str) -> BookingStatus {
    BookingStatus::from_str(s).unwrap_or(BookingStatus::Pending)
}

/// Decode a stored change status, falling back to pending
pub fn change_status_from_str(s: &str) -> ChangeStatus {
    ChangeStatus::from_str(s).unwrap_or(ChangeStatus::Pending)
}

/// Decode a stored ticket status, falling back to open
pub fn ticket_status_from_str(s: &str) -> TicketStatus {
    TicketStatus::from_str(s).unwrap_or(TicketStatus::Open)
}

/// Decode a stored ticket priority, falling back to normal
pub fn ticket_priority_from_str(s: &str) -> TicketPriority {
    TicketPriority::from_str(s).unwrap_or(TicketPriority::Normal)
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
