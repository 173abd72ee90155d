//! Booking intents and rows

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use hostel_core::{AllocationEngine, BookingRequest, Decision, Error, Result};

use super::{require_admin, require_student, room_label};
use crate::state::AppState;

/// One row of a booking table
#[derive(Debug, Clone)]
pub struct BookingRow {
    pub id: Uuid,
    pub room_number: String,
    pub from_date: NaiveDate,
    pub requested_at: DateTime<Utc>,
    pub status_label: String,
}

fn to_rows(state: &AppState, requests: Vec<BookingRequest>) -> Result<Vec<BookingRow>> {
    let db = state.db.lock().unwrap();
    let rooms = AllocationEngine::new(&db).rooms()?;
    Ok(requests
        .into_iter()
        .map(|r| BookingRow {
            id: r.id,
            room_number: room_label(&rooms, r.room_id),
            from_date: r.from_date,
            requested_at: r.requested_at,
            status_label: r.status.to_string(),
        })
        .collect())
}

/// The whole booking ledger (admin view)
pub fn booking_rows(state: &AppState) -> Result<Vec<BookingRow>> {
    require_admin(state)?;
    let requests = {
        let db = state.db.lock().unwrap();
        AllocationEngine::new(&db).bookings()?
    };
    to_rows(state, requests)
}

/// The logged-in student's booking requests
pub fn my_booking_rows(state: &AppState) -> Result<Vec<BookingRow>> {
    let student_id = require_student(state)?;
    let requests = {
        let db = state.db.lock().unwrap();
        db.bookings().list_for_student(student_id)?
    };
    to_rows(state, requests)
}

/// Student intent: request a room by number
pub fn submit_booking(
    state: &AppState,
    room_number: &str,
    from_date: NaiveDate,
) -> Result<BookingRequest> {
    let student_id = require_student(state)?;
    let db = state.db.lock().unwrap();

    let room = db
        .rooms()
        .find_by_number(room_number)?
        .ok_or_else(|| Error::NotFound(format!("Room {}", room_number)))?;

    AllocationEngine::new(&db).submit_booking(student_id, room.id, from_date)
}

/// Admin intent: decide a pending booking request
pub fn decide_booking(
    state: &AppState,
    request_id: Uuid,
    decision: Decision,
) -> Result<Option<BookingRequest>> {
    require_admin(state)?;
    let db = state.db.lock().unwrap();
    AllocationEngine::new(&db).decide_booking(request_id, decision)
}

/// Student intent: withdraw an own booking request
pub fn cancel_booking(state: &AppState, request_id: Uuid) -> Result<Option<BookingRequest>> {
    let student_id = require_student(state)?;
    let db = state.db.lock().unwrap();

    match db.bookings().find_by_id(request_id)? {
        None => Ok(None),
        Some(request) if request.student_id != student_id => Err(Error::PermissionDenied(
            "cannot cancel another student's booking".to_string(),
        )),
        Some(_) => AllocationEngine::new(&db).cancel_booking(request_id),
    }
}
