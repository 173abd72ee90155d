//! Role login with the two built-in credential pairs
//!
//! The demo knows exactly two accounts. There is no password hashing to
//! do here; the pairs are fixed and only select a role.

use hostel_core::{Error, Result, Role, Session};

use crate::state::AppState;

/// Built-in student credentials
pub const STUDENT_CREDENTIALS: (&str, &str) = ("student", "student123");
/// Built-in admin credentials
pub const ADMIN_CREDENTIALS: (&str, &str) = ("admin", "admin123");

/// Log in with one of the built-in credential pairs
///
/// Student logins always bind to the stable resident identity, so a
/// returning student still matches their own requests.
pub fn login(state: &AppState, username: &str, password: &str) -> Result<Session> {
    let role = if (username, password) == STUDENT_CREDENTIALS {
        Role::Student
    } else if (username, password) == ADMIN_CREDENTIALS {
        Role::Admin
    } else {
        return Err(Error::Authentication(
            "Unknown username or password".to_string(),
        ));
    };

    let db = state.db.lock().unwrap();
    let session = match role {
        Role::Student => Session::student(db.session().resident_id()?),
        Role::Admin => Session::admin(),
    };
    db.session().save(&session)?;
    drop(db);

    state.set_session(Some(session.clone()));
    tracing::info!(role = %session.role, "Logged in");

    Ok(session)
}

/// Clear the session flag
pub fn logout(state: &AppState) -> Result<()> {
    state.db.lock().unwrap().session().clear()?;
    state.set_session(None);
    tracing::info!("Logged out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_login() {
        let state = AppState::open_in_memory().unwrap();
        let session = login(&state, "student", "student123").unwrap();
        assert_eq!(session.role, Role::Student);
        assert!(session.student_id.is_some());
        assert_eq!(state.current_role(), Some(Role::Student));
    }

    #[test]
    fn test_admin_login() {
        let state = AppState::open_in_memory().unwrap();
        let session = login(&state, "admin", "admin123").unwrap();
        assert_eq!(session.role, Role::Admin);
        assert!(session.student_id.is_none());
    }

    #[test]
    fn test_bad_credentials() {
        let state = AppState::open_in_memory().unwrap();
        assert!(matches!(
            login(&state, "student", "wrong"),
            Err(Error::Authentication(_))
        ));
        assert!(matches!(
            login(&state, "warden", "warden123"),
            Err(Error::Authentication(_))
        ));
        assert!(state.current_session().is_none());
    }

    #[test]
    fn test_student_identity_survives_relogin() {
        let state = AppState::open_in_memory().unwrap();
        let first = login(&state, "student", "student123").unwrap();

        // Even with an admin session in between
        login(&state, "admin", "admin123").unwrap();
        let second = login(&state, "student", "student123").unwrap();
        assert_eq!(first.student_id, second.student_id);

        logout(&state).unwrap();
        let third = login(&state, "student", "student123").unwrap();
        assert_eq!(first.student_id, third.student_id);
    }

    #[test]
    fn test_logout_clears_flag() {
        let state = AppState::open_in_memory().unwrap();
        login(&state, "admin", "admin123").unwrap();
        logout(&state).unwrap();

        assert!(state.current_session().is_none());
        let persisted = state.db.lock().unwrap().session().load().unwrap();
        assert!(persisted.is_none());
    }
}
