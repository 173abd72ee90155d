//! Session flag and roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two roles the system knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Role::Student),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active login session
///
/// Holds only the role and, for students, the resident identity that
/// request records are scoped to. Cleared on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub role: Role,
    pub student_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn student(student_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Student,
            student_id: Some(student_id),
            started_at: Utc::now(),
        }
    }

    pub fn admin() -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Admin,
            student_id: None,
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_session_carries_identity() {
        let student_id = Uuid::new_v4();
        let session = Session::student(student_id);
        assert_eq!(session.role, Role::Student);
        assert_eq!(session.student_id, Some(student_id));
    }

    #[test]
    fn test_admin_session_has_no_identity() {
        let session = Session::admin();
        assert_eq!(session.role, Role::Admin);
        assert!(session.student_id.is_none());
    }
}
