//! Maintenance flow: submit, resolve

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use super::AllocationEngine;
use crate::error::Result;
use crate::models::{MaintenanceTicket, TicketPriority, TicketStatus};

impl<'a> AllocationEngine<'a> {
    /// File a maintenance ticket
    ///
    /// Always succeeds; the room is optional since unassigned students
    /// may report issues in shared areas.
    #[instrument(skip(self, subject, details))]
    pub fn submit_ticket(
        &self,
        opened_by: Uuid,
        subject: String,
        details: String,
        priority: TicketPriority,
        room_id: Option<Uuid>,
    ) -> Result<MaintenanceTicket> {
        let mut ticket = MaintenanceTicket::new(opened_by, subject, details, priority);
        if let Some(room_id) = room_id {
            ticket = ticket.with_room(room_id);
        }

        self.db().tickets().create(&ticket)?;
        tracing::info!(ticket_id = %ticket.id, priority = %ticket.priority.as_str(), "Ticket filed");
        Ok(ticket)
    }

    /// Resolve an open ticket
    ///
    /// Returns `None` if the ticket does not exist; resolving twice is a
    /// no-op. No other state is touched.
    #[instrument(skip(self))]
    pub fn resolve_ticket(&self, ticket_id: Uuid) -> Result<Option<MaintenanceTicket>> {
        let Some(ticket) = self.db().tickets().find_by_id(ticket_id)? else {
            return Ok(None);
        };
        if ticket.status == TicketStatus::Resolved {
            return Ok(Some(ticket));
        }

        self.db().tickets().mark_resolved(ticket_id, Utc::now())?;
        tracing::info!(ticket_id = %ticket_id, "Ticket resolved");
        self.db().tickets().find_by_id(ticket_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    #[test]
    fn test_submit_and_resolve() {
        let db = Database::open_in_memory().unwrap();
        let engine = AllocationEngine::new(&db);

        let ticket = engine
            .submit_ticket(
                Uuid::new_v4(),
                "Blocked drain".to_string(),
                "Washroom drain on floor 2".to_string(),
                TicketPriority::High,
                None,
            )
            .unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);

        let resolved = engine.resolve_ticket(ticket.id).unwrap().unwrap();
        assert_eq!(resolved.status, TicketStatus::Resolved);
        assert!(resolved.resolved_at.is_some());
    }

    #[test]
    fn test_resolve_twice_keeps_first_timestamp() {
        let db = Database::open_in_memory().unwrap();
        let engine = AllocationEngine::new(&db);

        let ticket = engine
            .submit_ticket(
                Uuid::new_v4(),
                "Window latch".to_string(),
                String::new(),
                TicketPriority::Low,
                None,
            )
            .unwrap();

        let first = engine.resolve_ticket(ticket.id).unwrap().unwrap();
        let second = engine.resolve_ticket(ticket.id).unwrap().unwrap();
        assert_eq!(first.resolved_at, second.resolved_at);
    }

    #[test]
    fn test_resolve_missing_ticket() {
        let db = Database::open_in_memory().unwrap();
        let engine = AllocationEngine::new(&db);
        assert!(engine.resolve_ticket(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_ticket_against_seeded_room() {
        let db = Database::open_in_memory().unwrap();
        let engine = AllocationEngine::new(&db);
        engine.seed_rooms().unwrap();

        let room = db.rooms().find_by_number("D-204").unwrap().unwrap();
        let ticket = engine
            .submit_ticket(
                Uuid::new_v4(),
                "Desk lamp".to_string(),
                "Bulb burnt out".to_string(),
                TicketPriority::Normal,
                Some(room.id),
            )
            .unwrap();
        assert_eq!(ticket.room_id, Some(room.id));
    }
}
