//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{BookingRequest, Room};

/// Validate that a Room's state is internally consistent
pub fn assert_room_invariants(room: &Room) {
    // Occupancy must never exceed capacity
    debug_assert!(
        room.occupants.len() as u32 <= room.capacity,
        "Room {} holds {} occupants over capacity {}",
        room.number,
        room.occupants.len(),
        room.capacity
    );

    // Number must not be empty
    debug_assert!(
        !room.number.trim().is_empty(),
        "Room {} has empty number",
        room.id
    );

    // A student occupies at most one bed in a room
    let unique: HashSet<Uuid> = room.occupants.iter().map(|o| o.student_id).collect();
    debug_assert!(
        unique.len() == room.occupants.len(),
        "Room {} lists a student on more than one bed",
        room.number
    );
}

/// Validate that each student holds at most one active booking
pub fn assert_single_active_booking(bookings: &[BookingRequest]) {
    let mut active: HashSet<Uuid> = HashSet::new();
    for booking in bookings.iter().filter(|b| b.is_active()) {
        debug_assert!(
            active.insert(booking.student_id),
            "Student {} has more than one active booking",
            booking.student_id
        );
    }
}

/// Validate a full room listing
pub fn assert_registry_invariants(rooms: &[Room]) {
    let numbers: HashSet<&str> = rooms.iter().map(|r| r.number.as_str()).collect();
    debug_assert!(
        numbers.len() == rooms.len(),
        "Registry contains duplicate room numbers"
    );

    for room in rooms {
        assert_room_invariants(room);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, OccupantRef, RoomType};
    use chrono::{NaiveDate, Utc};

    fn make_room(number: &str) -> Room {
        Room::new("A", 1, number.to_string(), 2, RoomType::Standard)
    }

    #[test]
    fn test_valid_room() {
        let room = make_room("A-101");
        assert_room_invariants(&room);
    }

    #[test]
    #[should_panic(expected = "over capacity")]
    #[cfg(debug_assertions)]
    fn test_over_capacity_trips() {
        let mut room = make_room("A-101");
        for _ in 0..3 {
            room.occupants.push(OccupantRef {
                student_id: Uuid::new_v4(),
                assigned_at: Utc::now(),
            });
        }
        assert_room_invariants(&room);
    }

    #[test]
    fn test_single_active_booking_passes_on_settled_requests() {
        let student = Uuid::new_v4();
        let from = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();

        let mut first = BookingRequest::new(student, Uuid::new_v4(), from);
        first.status = BookingStatus::Rejected;
        let second = BookingRequest::new(student, Uuid::new_v4(), from);

        // One rejected plus one pending for the same student is fine
        assert_single_active_booking(&[first, second]);
    }

    #[test]
    #[should_panic(expected = "more than one active booking")]
    #[cfg(debug_assertions)]
    fn test_two_active_bookings_trip() {
        let student = Uuid::new_v4();
        let from = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();

        let first = BookingRequest::new(student, Uuid::new_v4(), from);
        let mut second = BookingRequest::new(student, Uuid::new_v4(), from);
        second.status = BookingStatus::Approved;

        assert_single_active_booking(&[first, second]);
    }

    #[test]
    fn test_registry_invariants() {
        let rooms = vec![make_room("A-101"), make_room("A-102")];
        assert_registry_invariants(&rooms);
    }
}
