//! Maintenance ticket model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Urgency of a maintenance ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TicketPriority {
    Low,
    Normal,
    High,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Normal => "normal",
            TicketPriority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(TicketPriority::Low),
            "normal" => Some(TicketPriority::Normal),
            "high" => Some(TicketPriority::High),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TicketPriority::Low => "Low",
            TicketPriority::Normal => "Normal",
            TicketPriority::High => "High",
        }
    }
}

/// Lifecycle of a maintenance ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    /// Terminal; set only by an admin
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Resolved => "resolved",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(TicketStatus::Open),
            "resolved" => Some(TicketStatus::Resolved),
            _ => None,
        }
    }
}

/// A student-filed maintenance issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceTicket {
    pub id: Uuid,
    pub opened_by: Uuid,
    pub subject: String,
    pub details: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Unassigned students may file tickets with no room
    pub room_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl MaintenanceTicket {
    pub fn new(opened_by: Uuid, subject: String, details: String, priority: TicketPriority) -> Self {
        Self {
            id: Uuid::new_v4(),
            opened_by,
            subject,
            details,
            priority,
            status: TicketStatus::Open,
            room_id: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    pub fn with_room(mut self, room_id: Uuid) -> Self {
        self.room_id = Some(room_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ticket_is_open() {
        let ticket = MaintenanceTicket::new(
            Uuid::new_v4(),
            "Broken fan".to_string(),
            "Ceiling fan rattles at any speed".to_string(),
            TicketPriority::Normal,
        );
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(ticket.room_id.is_none());
        assert!(ticket.resolved_at.is_none());
    }

    #[test]
    fn test_with_room() {
        let room_id = Uuid::new_v4();
        let ticket = MaintenanceTicket::new(
            Uuid::new_v4(),
            "Leaky tap".to_string(),
            String::new(),
            TicketPriority::High,
        )
        .with_room(room_id);
        assert_eq!(ticket.room_id, Some(room_id));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(TicketPriority::High > TicketPriority::Normal);
        assert!(TicketPriority::Normal > TicketPriority::Low);
    }
}
