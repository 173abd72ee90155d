//! View adapters - display rows and intent forwarding
//!
//! The thin layer a UI binds to. Intents are role-gated here and then
//! forwarded to the allocation engine; no booking rule is duplicated.

mod bookings;
mod changes;
mod maintenance;
mod rooms;

pub use bookings::*;
pub use changes::*;
pub use maintenance::*;
pub use rooms::*;

use uuid::Uuid;

use hostel_core::{Error, Result, Role, Room};

use crate::state::AppState;

/// User-facing blocking notice for a failed intent
pub fn notice_for(err: &Error) -> String {
    match err {
        Error::DuplicateActiveBooking => {
            "You already have an active booking request.".to_string()
        }
        Error::DuplicatePendingChange => {
            "You already have a pending room-change request.".to_string()
        }
        Error::NoAssignedRoom => {
            "You need an approved booking before requesting a room change.".to_string()
        }
        Error::Authentication(_) => "Please log in first.".to_string(),
        Error::PermissionDenied(_) => "Your role cannot perform this action.".to_string(),
        Error::NotFound(what) => format!("{} was not found.", what),
        other => format!("Something went wrong: {}", other),
    }
}

/// The logged-in student's identity, or why there is none
pub(crate) fn require_student(state: &AppState) -> Result<Uuid> {
    match state.current_session() {
        Some(session) if session.role == Role::Student => session
            .student_id
            .ok_or_else(|| Error::Authentication("Student session has no identity".to_string())),
        Some(_) => Err(Error::PermissionDenied(
            "requires the student role".to_string(),
        )),
        None => Err(Error::Authentication("Not logged in".to_string())),
    }
}

pub(crate) fn require_admin(state: &AppState) -> Result<()> {
    match state.current_session() {
        Some(session) if session.role == Role::Admin => Ok(()),
        Some(_) => Err(Error::PermissionDenied(
            "requires the admin role".to_string(),
        )),
        None => Err(Error::Authentication("Not logged in".to_string())),
    }
}

/// Display label for a room id within a listing
pub(crate) fn room_label(rooms: &[Room], id: Uuid) -> String {
    rooms
        .iter()
        .find(|r| r.id == id)
        .map(|r| r.number.clone())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth;

    #[test]
    fn test_role_gates() {
        let state = AppState::open_in_memory().unwrap();
        assert!(matches!(
            require_student(&state),
            Err(Error::Authentication(_))
        ));

        auth::login(&state, "admin", "admin123").unwrap();
        assert!(matches!(
            require_student(&state),
            Err(Error::PermissionDenied(_))
        ));
        assert!(require_admin(&state).is_ok());

        auth::login(&state, "student", "student123").unwrap();
        assert!(require_student(&state).is_ok());
        assert!(matches!(
            require_admin(&state),
            Err(Error::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_notices_are_blocking_text() {
        assert!(notice_for(&Error::DuplicateActiveBooking).contains("active booking"));
        assert!(notice_for(&Error::NoAssignedRoom).contains("approved booking"));
        assert!(notice_for(&Error::NotFound("Room A-999".to_string())).contains("A-999"));
    }
}
