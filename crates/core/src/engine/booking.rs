//! Booking flow: submit, decide, cancel

use chrono::{NaiveDate, Utc};
use tracing::instrument;
use uuid::Uuid;

use super::{AllocationEngine, Decision};
use crate::error::{Error, Result};
use crate::invariants;
use crate::models::{BookingRequest, BookingStatus};
use crate::storage::{BookingStore, RoomStore};

impl<'a> AllocationEngine<'a> {
    /// Submit a booking request for a room
    ///
    /// No bed is reserved at submission; capacity is claimed only when an
    /// admin approves. A student with an active (pending or approved)
    /// booking cannot submit another.
    #[instrument(skip(self))]
    pub fn submit_booking(
        &self,
        student_id: Uuid,
        room_id: Uuid,
        from_date: NaiveDate,
    ) -> Result<BookingRequest> {
        if self
            .db()
            .bookings()
            .find_active_for_student(student_id)?
            .is_some()
        {
            return Err(Error::DuplicateActiveBooking);
        }

        let request = BookingRequest::new(student_id, room_id, from_date);
        self.db().bookings().create(&request)?;
        tracing::info!(request_id = %request.id, "Booking request submitted");

        invariants::assert_single_active_booking(&self.db().bookings().list_all()?);
        Ok(request)
    }

    /// Decide a pending booking request
    ///
    /// Returns `None` if the request does not exist. A decision on a
    /// request that is no longer pending is ignored and the record is
    /// returned unchanged, so repeated decisions mutate state only once.
    ///
    /// Approval against a full or missing room resolves in favour of the
    /// registry: the request is rejected instead of overfilling the room.
    #[instrument(skip(self))]
    pub fn decide_booking(
        &self,
        request_id: Uuid,
        decision: Decision,
    ) -> Result<Option<BookingRequest>> {
        let Some(request) = self.db().bookings().find_by_id(request_id)? else {
            return Ok(None);
        };
        if request.status != BookingStatus::Pending {
            return Ok(Some(request));
        }

        match decision {
            Decision::Reject => {
                self.db()
                    .bookings()
                    .update_status(request_id, BookingStatus::Rejected)?;
                tracing::info!(request_id = %request_id, "Booking rejected");
            }
            Decision::Approve => {
                // Occupant row and status change commit as one unit
                let tx = self.db().conn.unchecked_transaction()?;
                let rooms = RoomStore::new(&tx);
                let bookings = BookingStore::new(&tx);

                match rooms.find_by_id(request.room_id)? {
                    Some(room) if !room.is_full() => {
                        rooms.add_occupant(room.id, request.student_id, Utc::now())?;
                        bookings.update_status(request_id, BookingStatus::Approved)?;
                        tracing::info!(
                            request_id = %request_id,
                            room = %room.number,
                            "Booking approved"
                        );
                    }
                    Some(room) => {
                        bookings.update_status(request_id, BookingStatus::Rejected)?;
                        tracing::warn!(
                            request_id = %request_id,
                            room = %room.number,
                            "Booking rejected: room full"
                        );
                    }
                    None => {
                        bookings.update_status(request_id, BookingStatus::Rejected)?;
                        tracing::warn!(
                            request_id = %request_id,
                            room_id = %request.room_id,
                            "Booking rejected: room not found"
                        );
                    }
                }

                tx.commit()?;
            }
        }

        if let Some(room) = self.db().rooms().find_by_id(request.room_id)? {
            invariants::assert_room_invariants(&room);
        }
        self.db().bookings().find_by_id(request_id)
    }

    /// Cancel a booking request
    ///
    /// Returns `None` if the request does not exist; cancelling an
    /// already-cancelled request is a no-op. Cancelling an approved
    /// booking also releases the occupied bed.
    #[instrument(skip(self))]
    pub fn cancel_booking(&self, request_id: Uuid) -> Result<Option<BookingRequest>> {
        let Some(request) = self.db().bookings().find_by_id(request_id)? else {
            return Ok(None);
        };
        if request.status == BookingStatus::Cancelled {
            return Ok(Some(request));
        }

        let tx = self.db().conn.unchecked_transaction()?;
        let bookings = BookingStore::new(&tx);

        if request.status == BookingStatus::Approved {
            RoomStore::new(&tx).remove_occupant(request.room_id, request.student_id)?;
            tracing::info!(
                request_id = %request_id,
                room_id = %request.room_id,
                "Released bed on cancellation"
            );
        }
        bookings.update_status(request_id, BookingStatus::Cancelled)?;

        tx.commit()?;
        self.db().bookings().find_by_id(request_id)
    }
}
