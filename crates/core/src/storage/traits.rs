//! Storage repository traits
//!
//! These traits define the storage interface, allowing for different
//! implementations (SQLite, mock, future network backend).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    BookingRequest, BookingStatus, ChangeRequest, ChangeStatus, MaintenanceTicket, Room,
};

/// Room registry operations
pub trait RoomRepository {
    /// Insert a room (registry seeding)
    fn insert_room(&self, room: &Room) -> Result<()>;

    /// Find a room by ID
    fn find_room_by_id(&self, id: Uuid) -> Result<Option<Room>>;

    /// Find a room by display number
    fn find_room_by_number(&self, number: &str) -> Result<Option<Room>>;

    /// List all rooms with occupants
    fn list_rooms(&self) -> Result<Vec<Room>>;

    /// Assign a student a bed
    fn add_occupant(&self, room_id: Uuid, student_id: Uuid, assigned_at: DateTime<Utc>)
        -> Result<()>;

    /// Release a student's bed; false if they held none
    fn remove_occupant(&self, room_id: Uuid, student_id: Uuid) -> Result<bool>;
}

/// Booking ledger operations
pub trait BookingRepository {
    /// Append a booking request
    fn create_booking(&self, request: &BookingRequest) -> Result<()>;

    /// Find a booking request by ID
    fn find_booking_by_id(&self, id: Uuid) -> Result<Option<BookingRequest>>;

    /// List the whole ledger
    fn list_bookings(&self) -> Result<Vec<BookingRequest>>;

    /// Find a student's active booking
    fn find_active_booking(&self, student_id: Uuid) -> Result<Option<BookingRequest>>;

    /// Update a request's status
    fn update_booking_status(&self, id: Uuid, status: BookingStatus) -> Result<()>;
}

/// Change ledger operations
pub trait ChangeRepository {
    /// Append a change request
    fn create_change(&self, request: &ChangeRequest) -> Result<()>;

    /// Find a change request by ID
    fn find_change_by_id(&self, id: Uuid) -> Result<Option<ChangeRequest>>;

    /// List the whole ledger
    fn list_changes(&self) -> Result<Vec<ChangeRequest>>;

    /// Find a student's pending change request
    fn find_pending_change(&self, student_id: Uuid) -> Result<Option<ChangeRequest>>;

    /// Update a request's status
    fn update_change_status(&self, id: Uuid, status: ChangeStatus) -> Result<()>;
}

/// Ticket ledger operations
pub trait TicketRepository {
    /// Append a ticket
    fn create_ticket(&self, ticket: &MaintenanceTicket) -> Result<()>;

    /// Find a ticket by ID
    fn find_ticket_by_id(&self, id: Uuid) -> Result<Option<MaintenanceTicket>>;

    /// List the whole ledger
    fn list_tickets(&self) -> Result<Vec<MaintenanceTicket>>;

    /// Mark a ticket resolved
    fn resolve_ticket(&self, id: Uuid, resolved_at: DateTime<Utc>) -> Result<()>;
}

/// Combined storage interface
///
/// Provides access to all repository operations.
/// Implementations may be backed by SQLite, mocks, or network.
pub trait Storage: RoomRepository + BookingRepository + ChangeRepository + TicketRepository {}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where
    T: RoomRepository + BookingRepository + ChangeRepository + TicketRepository
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomType;
    use crate::storage::Database;

    fn registry_size<S: Storage>(storage: &S) -> usize {
        storage.list_rooms().unwrap().len()
    }

    #[test]
    fn test_database_usable_through_storage_trait() {
        let db = Database::open_in_memory().unwrap();
        let room = Room::new("A", 1, "A-101".to_string(), 2, RoomType::Standard);
        db.insert_room(&room).unwrap();

        assert_eq!(registry_size(&db), 1);
        assert!(db.find_room_by_number("A-101").unwrap().is_some());
    }
}
