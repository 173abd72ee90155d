//! Booking request storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{booking_status_from_str, parse_date, parse_datetime, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{BookingRequest, BookingStatus};

pub struct BookingStore<'a> {
    conn: &'a Connection,
}

impl<'a> BookingStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Append a new booking request to the ledger
    pub fn create(&self, request: &BookingRequest) -> Result<()> {
        self.conn.execute(
            "INSERT INTO booking_requests (id, student_id, room_id, from_date, requested_at, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                request.id.to_string(),
                request.student_id.to_string(),
                request.room_id.to_string(),
                request.from_date.format("%Y-%m-%d").to_string(),
                request.requested_at.to_rfc3339(),
                request.status.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Find a booking request by ID
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<BookingRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, room_id, from_date, requested_at, status
             FROM booking_requests WHERE id = ?1",
        )?;

        let request = stmt
            .query_row(params![id.to_string()], map_booking_row)
            .optional()?;

        Ok(request)
    }

    /// List the whole booking ledger in submission order
    pub fn list_all(&self) -> Result<Vec<BookingRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, room_id, from_date, requested_at, status
             FROM booking_requests ORDER BY requested_at, id",
        )?;

        let requests = stmt
            .query_map([], map_booking_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(requests)
    }

    /// List a student's booking requests in submission order
    pub fn list_for_student(&self, student_id: Uuid) -> Result<Vec<BookingRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, room_id, from_date, requested_at, status
             FROM booking_requests WHERE student_id = ?1 ORDER BY requested_at, id",
        )?;

        let requests = stmt
            .query_map(params![student_id.to_string()], map_booking_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(requests)
    }

    /// Find a student's active (pending or approved) booking, if any
    pub fn find_active_for_student(&self, student_id: Uuid) -> Result<Option<BookingRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, room_id, from_date, requested_at, status
             FROM booking_requests
             WHERE student_id = ?1 AND status IN ('pending', 'approved')
             ORDER BY requested_at LIMIT 1",
        )?;

        let request = stmt
            .query_row(params![student_id.to_string()], map_booking_row)
            .optional()?;

        Ok(request)
    }

    /// Find a student's approved booking, if any
    pub fn find_approved_for_student(&self, student_id: Uuid) -> Result<Option<BookingRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, room_id, from_date, requested_at, status
             FROM booking_requests
             WHERE student_id = ?1 AND status = 'approved'
             ORDER BY requested_at LIMIT 1",
        )?;

        let request = stmt
            .query_row(params![student_id.to_string()], map_booking_row)
            .optional()?;

        Ok(request)
    }

    /// Update a request's status
    #[instrument(skip(self))]
    pub fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<()> {
        self.conn.execute(
            "UPDATE booking_requests SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id.to_string()],
        )?;
        Ok(())
    }

    /// Rewrite the room a booking points at (room-change approval)
    #[instrument(skip(self))]
    pub fn update_room(&self, id: Uuid, room_id: Uuid) -> Result<()> {
        self.conn.execute(
            "UPDATE booking_requests SET room_id = ?1 WHERE id = ?2",
            params![room_id.to_string(), id.to_string()],
        )?;
        Ok(())
    }
}

fn map_booking_row(
    row: &rusqlite::Row<'_>,
) -> std::result::Result<BookingRequest, rusqlite::Error> {
    Ok(BookingRequest {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        student_id: parse_uuid(&row.get::<_, String>(1)?)?,
        room_id: parse_uuid(&row.get::<_, String>(2)?)?,
        from_date: parse_date(&row.get::<_, String>(3)?)?,
        requested_at: parse_datetime(&row.get::<_, String>(4)?)?,
        status: booking_status_from_str(&row.get::<_, String>(5)?),
    })
}
