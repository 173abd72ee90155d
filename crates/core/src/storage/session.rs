//! Session flag persistence
//!
//! At most one session row exists at a time. A malformed row is treated
//! as no session rather than an error, so a corrupt flag can never keep
//! the app from starting.

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid};
use crate::error::Result;
use crate::models::{Role, Session};

pub struct SessionStore<'a> {
    conn: &'a Connection,
}

impl<'a> SessionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist the session flag, replacing any previous one
    pub fn save(&self, session: &Session) -> Result<()> {
        self.conn.execute("DELETE FROM session", [])?;
        self.conn.execute(
            "INSERT INTO session (id, role, student_id, started_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session.id.to_string(),
                session.role.as_str(),
                session.student_id.map(|id| id.to_string()),
                session.started_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Load the persisted session flag, if any
    pub fn load(&self) -> Result<Option<Session>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, role, student_id, started_at FROM session LIMIT 1",
        )?;

        let row = stmt.query_row([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
            ))
        });

        let (id, role, student_id, started_at) = match row {
            Ok(values) => values,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Unknown role means the flag is from another schema era; drop it
        let Some(role) = Role::from_str(&role) else {
            tracing::warn!(%role, "Discarding session flag with unknown role");
            return Ok(None);
        };

        Ok(Some(Session {
            id: parse_uuid(&id)?,
            role,
            student_id: student_id.and_then(|s| Uuid::parse_str(&s).ok()),
            started_at: parse_datetime(&started_at)?,
        }))
    }

    /// Clear the session flag (logout)
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM session", [])?;
        Ok(())
    }

    /// The stable resident student identity, created on first use
    ///
    /// Request records are scoped to this identity. It survives logouts
    /// and role switches, so a returning student still matches their
    /// own bookings.
    pub fn resident_id(&self) -> Result<Uuid> {
        let existing = self
            .conn
            .query_row("SELECT student_id FROM resident LIMIT 1", [], |row| {
                row.get::<_, String>(0)
            });

        match existing {
            Ok(id) => Ok(parse_uuid(&id)?),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                let id = Uuid::new_v4();
                self.conn.execute(
                    "INSERT INTO resident (student_id, created_at) VALUES (?1, ?2)",
                    params![id.to_string(), chrono::Utc::now().to_rfc3339()],
                )?;
                tracing::info!(student_id = %id, "Created resident identity");
                Ok(id)
            }
            Err(e) => Err(e.into()),
        }
    }
}
