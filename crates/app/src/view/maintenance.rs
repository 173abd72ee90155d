//! Maintenance intents and rows

use chrono::{DateTime, Utc};
use uuid::Uuid;

use hostel_core::{AllocationEngine, Error, MaintenanceTicket, Result, TicketPriority};

use super::{require_admin, require_student, room_label};
use crate::state::AppState;

/// One row of the ticket table
#[derive(Debug, Clone)]
pub struct TicketRow {
    pub id: Uuid,
    pub subject: String,
    pub priority_label: String,
    pub status_label: String,
    pub room_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The whole ticket ledger, open and resolved
pub fn ticket_rows(state: &AppState) -> Result<Vec<TicketRow>> {
    let db = state.db.lock().unwrap();
    let engine = AllocationEngine::new(&db);
    let rooms = engine.rooms()?;

    Ok(engine
        .tickets()?
        .into_iter()
        .map(|t| TicketRow {
            id: t.id,
            subject: t.subject,
            priority_label: t.priority.display_name().to_string(),
            status_label: t.status.as_str().to_string(),
            room_number: t.room_id.map(|id| room_label(&rooms, id)),
            created_at: t.created_at,
        })
        .collect())
}

/// Student intent: file a ticket, optionally against a room by number
pub fn submit_ticket(
    state: &AppState,
    subject: &str,
    details: &str,
    priority: TicketPriority,
    room_number: Option<&str>,
) -> Result<MaintenanceTicket> {
    let student_id = require_student(state)?;
    let db = state.db.lock().unwrap();

    let room_id = match room_number {
        Some(number) => Some(
            db.rooms()
                .find_by_number(number)?
                .ok_or_else(|| Error::NotFound(format!("Room {}", number)))?
                .id,
        ),
        None => None,
    };

    AllocationEngine::new(&db).submit_ticket(
        student_id,
        subject.to_string(),
        details.to_string(),
        priority,
        room_id,
    )
}

/// Admin intent: mark a ticket resolved
pub fn resolve_ticket(state: &AppState, ticket_id: Uuid) -> Result<Option<MaintenanceTicket>> {
    require_admin(state)?;
    let db = state.db.lock().unwrap();
    AllocationEngine::new(&db).resolve_ticket(ticket_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth;
    use hostel_core::TicketStatus;

    #[test]
    fn test_ticket_flow() {
        let state = AppState::open_in_memory().unwrap();

        auth::login(&state, "student", "student123").unwrap();
        let ticket = submit_ticket(
            &state,
            "Broken fan",
            "Rattles at any speed",
            TicketPriority::Normal,
            Some("A-101"),
        )
        .unwrap();

        // Students cannot resolve
        assert!(matches!(
            resolve_ticket(&state, ticket.id),
            Err(Error::PermissionDenied(_))
        ));

        auth::login(&state, "admin", "admin123").unwrap();
        let resolved = resolve_ticket(&state, ticket.id).unwrap().unwrap();
        assert_eq!(resolved.status, TicketStatus::Resolved);

        let rows = ticket_rows(&state).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].room_number.as_deref(), Some("A-101"));
        assert_eq!(rows[0].status_label, "resolved");
    }

    #[test]
    fn test_ticket_without_room() {
        let state = AppState::open_in_memory().unwrap();
        auth::login(&state, "student", "student123").unwrap();

        let ticket = submit_ticket(
            &state,
            "Common room heater",
            "",
            TicketPriority::High,
            None,
        )
        .unwrap();
        assert!(ticket.room_id.is_none());
    }
}
