//! Room-change flow: submit, decide

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use super::{AllocationEngine, Decision};
use crate::error::{Error, Result};
use crate::invariants;
use crate::models::{ChangeRequest, ChangeStatus};
use crate::storage::{BookingStore, ChangeStore, RoomStore};

impl<'a> AllocationEngine<'a> {
    /// Submit a room-change request
    ///
    /// Requires an approved booking (the assigned room must match
    /// `from_room_id`) and no other pending change for the student.
    #[instrument(skip(self, reason))]
    pub fn submit_change(
        &self,
        student_id: Uuid,
        from_room_id: Uuid,
        to_room_id: Uuid,
        reason: String,
    ) -> Result<ChangeRequest> {
        let Some(booking) = self.db().bookings().find_approved_for_student(student_id)? else {
            return Err(Error::NoAssignedRoom);
        };
        if booking.room_id != from_room_id {
            return Err(Error::InvalidOperation(
                "change request does not start from the assigned room".to_string(),
            ));
        }
        if self
            .db()
            .changes()
            .find_pending_for_student(student_id)?
            .is_some()
        {
            return Err(Error::DuplicatePendingChange);
        }

        let request = ChangeRequest::new(student_id, from_room_id, to_room_id, reason);
        self.db().changes().create(&request)?;
        tracing::info!(request_id = %request.id, "Room-change request submitted");
        Ok(request)
    }

    /// Decide a pending room-change request
    ///
    /// Returns `None` if the request does not exist; decisions on settled
    /// requests are ignored. On approval the occupant moves from the
    /// source to the destination room and the student's approved booking
    /// is rewritten to the new room, all in one transaction. A full
    /// destination rejects the request; a room that cannot be resolved
    /// drops the decision without mutation.
    #[instrument(skip(self))]
    pub fn decide_change(
        &self,
        request_id: Uuid,
        decision: Decision,
    ) -> Result<Option<ChangeRequest>> {
        let Some(request) = self.db().changes().find_by_id(request_id)? else {
            return Ok(None);
        };
        if request.status != ChangeStatus::Pending {
            return Ok(Some(request));
        }

        match decision {
            Decision::Reject => {
                self.db()
                    .changes()
                    .update_status(request_id, ChangeStatus::Rejected)?;
                tracing::info!(request_id = %request_id, "Room change rejected");
            }
            Decision::Approve => {
                let tx = self.db().conn.unchecked_transaction()?;
                let rooms = RoomStore::new(&tx);
                let changes = ChangeStore::new(&tx);
                let bookings = BookingStore::new(&tx);

                let (Some(from_room), Some(to_room)) = (
                    rooms.find_by_id(request.from_room_id)?,
                    rooms.find_by_id(request.to_room_id)?,
                ) else {
                    tracing::warn!(
                        request_id = %request_id,
                        "Dropping change decision: room not found"
                    );
                    return Ok(Some(request));
                };

                if to_room.is_full() {
                    changes.update_status(request_id, ChangeStatus::Rejected)?;
                    tx.commit()?;
                    tracing::warn!(
                        request_id = %request_id,
                        room = %to_room.number,
                        "Room change rejected: destination full"
                    );
                    return self.db().changes().find_by_id(request_id);
                }

                rooms.remove_occupant(from_room.id, request.student_id)?;
                rooms.add_occupant(to_room.id, request.student_id, Utc::now())?;

                // Only the requesting student's booking follows the move
                if let Some(booking) =
                    bookings.find_approved_for_student(request.student_id)?
                {
                    bookings.update_room(booking.id, request.to_room_id)?;
                }

                changes.update_status(request_id, ChangeStatus::Approved)?;
                tx.commit()?;

                tracing::info!(
                    request_id = %request_id,
                    from = %from_room.number,
                    to = %to_room.number,
                    "Room change approved"
                );
            }
        }

        invariants::assert_registry_invariants(&self.db().rooms().list_all()?);
        self.db().changes().find_by_id(request_id)
    }
}
