//! Room-change request storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{change_status_from_str, parse_datetime, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{ChangeRequest, ChangeStatus};

pub struct ChangeStore<'a> {
    conn: &'a Connection,
}

impl<'a> ChangeStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Append a new change request to the ledger
    pub fn create(&self, request: &ChangeRequest) -> Result<()> {
        self.conn.execute(
            "INSERT INTO change_requests (id, student_id, from_room_id, to_room_id, reason, status, requested_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                request.id.to_string(),
                request.student_id.to_string(),
                request.from_room_id.to_string(),
                request.to_room_id.to_string(),
                request.reason,
                request.status.as_str(),
                request.requested_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find a change request by ID
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<ChangeRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, from_room_id, to_room_id, reason, status, requested_at
             FROM change_requests WHERE id = ?1",
        )?;

        let request = stmt
            .query_row(params![id.to_string()], map_change_row)
            .optional()?;

        Ok(request)
    }

    /// List the whole change ledger in submission order
    pub fn list_all(&self) -> Result<Vec<ChangeRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, from_room_id, to_room_id, reason, status, requested_at
             FROM change_requests ORDER BY requested_at, id",
        )?;

        let requests = stmt
            .query_map([], map_change_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(requests)
    }

    /// Find a student's pending change request, if any
    pub fn find_pending_for_student(&self, student_id: Uuid) -> Result<Option<ChangeRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, from_room_id, to_room_id, reason, status, requested_at
             FROM change_requests
             WHERE student_id = ?1 AND status = 'pending'
             ORDER BY requested_at LIMIT 1",
        )?;

        let request = stmt
            .query_row(params![student_id.to_string()], map_change_row)
            .optional()?;

        Ok(request)
    }

    /// Update a request's status
    #[instrument(skip(self))]
    pub fn update_status(&self, id: Uuid, status: ChangeStatus) -> Result<()> {
        self.conn.execute(
            "UPDATE change_requests SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id.to_string()],
        )?;
        Ok(())
    }
}

fn map_change_row(row: &rusqlite::Row<'_>) -> std::result::Result<ChangeRequest, rusqlite::Error> {
    Ok(ChangeRequest {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        student_id: parse_uuid(&row.get::<_, String>(1)?)?,
        from_room_id: parse_uuid(&row.get::<_, String>(2)?)?,
        to_room_id: parse_uuid(&row.get::<_, String>(3)?)?,
        reason: row.get(4)?,
        status: change_status_from_str(&row.get::<_, String>(5)?),
        requested_at: parse_datetime(&row.get::<_, String>(6)?)?,
    })
}
