//! Room-change intents and rows

use chrono::{DateTime, Utc};
use uuid::Uuid;

use hostel_core::{AllocationEngine, ChangeRequest, Decision, Error, Result};

use super::{require_admin, require_student, room_label};
use crate::state::AppState;

/// One row of the change-request table
#[derive(Debug, Clone)]
pub struct ChangeRow {
    pub id: Uuid,
    pub from_room: String,
    pub to_room: String,
    pub reason: String,
    pub requested_at: DateTime<Utc>,
    pub status_label: String,
}

/// The whole change ledger (admin view)
pub fn change_rows(state: &AppState) -> Result<Vec<ChangeRow>> {
    require_admin(state)?;
    let db = state.db.lock().unwrap();
    let engine = AllocationEngine::new(&db);
    let rooms = engine.rooms()?;

    Ok(engine
        .changes()?
        .into_iter()
        .map(|r| ChangeRow {
            id: r.id,
            from_room: room_label(&rooms, r.from_room_id),
            to_room: room_label(&rooms, r.to_room_id),
            reason: r.reason,
            requested_at: r.requested_at,
            status_label: r.status.to_string(),
        })
        .collect())
}

/// Student intent: request a move between two rooms by number
pub fn submit_change(
    state: &AppState,
    from_room_number: &str,
    to_room_number: &str,
    reason: &str,
) -> Result<ChangeRequest> {
    let student_id = require_student(state)?;
    let db = state.db.lock().unwrap();

    let from = db
        .rooms()
        .find_by_number(from_room_number)?
        .ok_or_else(|| Error::NotFound(format!("Room {}", from_room_number)))?;
    let to = db
        .rooms()
        .find_by_number(to_room_number)?
        .ok_or_else(|| Error::NotFound(format!("Room {}", to_room_number)))?;

    AllocationEngine::new(&db).submit_change(student_id, from.id, to.id, reason.to_string())
}

/// Admin intent: decide a pending change request
pub fn decide_change(
    state: &AppState,
    request_id: Uuid,
    decision: Decision,
) -> Result<Option<ChangeRequest>> {
    require_admin(state)?;
    let db = state.db.lock().unwrap();
    AllocationEngine::new(&db).decide_change(request_id, decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth;
    use crate::view::{decide_booking, submit_booking};
    use chrono::NaiveDate;
    use hostel_core::ChangeStatus;

    fn book_and_approve(state: &AppState, room: &str) {
        auth::login(state, "student", "student123").unwrap();
        let request =
            submit_booking(state, room, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()).unwrap();
        auth::login(state, "admin", "admin123").unwrap();
        decide_booking(state, request.id, Decision::Approve).unwrap();
        auth::login(state, "student", "student123").unwrap();
    }

    #[test]
    fn test_change_flow_end_to_end() {
        let state = AppState::open_in_memory().unwrap();
        book_and_approve(&state, "A-101");

        let request = submit_change(&state, "A-101", "B-201", "near the stairwell").unwrap();

        auth::login(&state, "admin", "admin123").unwrap();
        let decided = decide_change(&state, request.id, Decision::Approve)
            .unwrap()
            .unwrap();
        assert_eq!(decided.status, ChangeStatus::Approved);

        let rows = change_rows(&state).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].from_room, "A-101");
        assert_eq!(rows[0].to_room, "B-201");
        assert_eq!(rows[0].status_label, "approved");
    }

    #[test]
    fn test_change_without_booking_is_blocked() {
        let state = AppState::open_in_memory().unwrap();
        auth::login(&state, "student", "student123").unwrap();

        let err = submit_change(&state, "A-101", "B-201", "no booking yet").unwrap_err();
        assert!(matches!(err, Error::NoAssignedRoom));
    }

    #[test]
    fn test_change_requires_student_role() {
        let state = AppState::open_in_memory().unwrap();
        auth::login(&state, "admin", "admin123").unwrap();

        let err = submit_change(&state, "A-101", "B-201", "as admin").unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));
    }
}
