//! Room-change request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a room-change request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeStatus {
    Pending,
    Approved,
    Rejected,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Pending => "pending",
            ChangeStatus::Approved => "approved",
            ChangeStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ChangeStatus::Pending),
            "approved" => Some(ChangeStatus::Approved),
            "rejected" => Some(ChangeStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to move an assigned student to another room
///
/// Only a student with an approved booking may file one, and at most one
/// may be pending per student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub from_room_id: Uuid,
    pub to_room_id: Uuid,
    pub reason: String,
    pub status: ChangeStatus,
    pub requested_at: DateTime<Utc>,
}

impl ChangeRequest {
    pub fn new(student_id: Uuid, from_room_id: Uuid, to_room_id: Uuid, reason: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            from_room_id,
            to_room_id,
            reason,
            status: ChangeStatus::Pending,
            requested_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_change_is_pending() {
        let change = ChangeRequest::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Closer to the library".to_string(),
        );
        assert_eq!(change.status, ChangeStatus::Pending);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ChangeStatus::Pending,
            ChangeStatus::Approved,
            ChangeStatus::Rejected,
        ] {
            assert_eq!(ChangeStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ChangeStatus::from_str("cancelled"), None);
    }
}
