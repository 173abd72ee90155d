//! Booking request model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a booking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Submitted, awaiting an admin decision
    Pending,
    /// Admin approved - the student holds a bed in the room
    Approved,
    /// Admin rejected, or approval failed against a full room
    Rejected,
    /// Withdrawn by the student
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "approved" => Some(BookingStatus::Approved),
            "rejected" => Some(BookingStatus::Rejected),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A student's request for a room
///
/// The room is referenced, not owned: capacity is reserved only when an
/// admin approves, never at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub room_id: Uuid,
    /// First day of the stay (no end date is tracked)
    pub from_date: NaiveDate,
    pub requested_at: DateTime<Utc>,
    pub status: BookingStatus,
}

impl BookingRequest {
    pub fn new(student_id: Uuid, room_id: Uuid, from_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            room_id,
            from_date,
            requested_at: Utc::now(),
            status: BookingStatus::Pending,
        }
    }

    /// A booking is active while it holds or may still claim a bed
    pub fn is_active(&self) -> bool {
        matches!(self.status, BookingStatus::Pending | BookingStatus::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_booking_is_pending_and_active() {
        let booking = BookingRequest::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        );
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.is_active());
    }

    #[test]
    fn test_terminal_statuses_are_inactive() {
        let mut booking = BookingRequest::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        );
        booking.status = BookingStatus::Rejected;
        assert!(!booking.is_active());
        booking.status = BookingStatus::Cancelled;
        assert!(!booking.is_active());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Approved,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::from_str("waitlisted"), None);
    }
}
