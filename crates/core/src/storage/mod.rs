//! SQLite storage layer for the hostel system

mod bookings;
mod changes;
mod migrations;
mod parse;
mod rooms;
mod session;
mod tickets;
mod traits;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    BookingRequest, BookingStatus, ChangeRequest, ChangeStatus, MaintenanceTicket, Room,
};

pub use bookings::BookingStore;
pub use changes::ChangeStore;
pub use rooms::RoomStore;
pub use session::SessionStore;
pub use tickets::TicketStore;
pub use traits::{
    BookingRepository, ChangeRepository, RoomRepository, Storage, TicketRepository,
};

/// Main database handle
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get room store
    pub fn rooms(&self) -> RoomStore<'_> {
        RoomStore::new(&self.conn)
    }

    /// Get booking ledger store
    pub fn bookings(&self) -> BookingStore<'_> {
        BookingStore::new(&self.conn)
    }

    /// Get change ledger store
    pub fn changes(&self) -> ChangeStore<'_> {
        ChangeStore::new(&self.conn)
    }

    /// Get ticket ledger store
    pub fn tickets(&self) -> TicketStore<'_> {
        TicketStore::new(&self.conn)
    }

    /// Get session flag store
    pub fn session(&self) -> SessionStore<'_> {
        SessionStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl RoomRepository for Database {
    fn insert_room(&self, room: &Room) -> Result<()> {
        self.rooms().insert(room)
    }

    fn find_room_by_id(&self, id: Uuid) -> Result<Option<Room>> {
        self.rooms().find_by_id(id)
    }

    fn find_room_by_number(&self, number: &str) -> Result<Option<Room>> {
        self.rooms().find_by_number(number)
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        self.rooms().list_all()
    }

    fn add_occupant(
        &self,
        room_id: Uuid,
        student_id: Uuid,
        assigned_at: DateTime<Utc>,
    ) -> Result<()> {
        self.rooms().add_occupant(room_id, student_id, assigned_at)
    }

    fn remove_occupant(&self, room_id: Uuid, student_id: Uuid) -> Result<bool> {
        self.rooms().remove_occupant(room_id, student_id)
    }
}

impl BookingRepository for Database {
    fn create_booking(&self, request: &BookingRequest) -> Result<()> {
        self.bookings().create(request)
    }

    fn find_booking_by_id(&self, id: Uuid) -> Result<Option<BookingRequest>> {
        self.bookings().find_by_id(id)
    }

    fn list_bookings(&self) -> Result<Vec<BookingRequest>> {
        self.bookings().list_all()
    }

    fn find_active_booking(&self, student_id: Uuid) -> Result<Option<BookingRequest>> {
        self.bookings().find_active_for_student(student_id)
    }

    fn update_booking_status(&self, id: Uuid, status: BookingStatus) -> Result<()> {
        self.bookings().update_status(id, status)
    }
}

impl ChangeRepository for Database {
    fn create_change(&self, request: &ChangeRequest) -> Result<()> {
        self.changes().create(request)
    }

    fn find_change_by_id(&self, id: Uuid) -> Result<Option<ChangeRequest>> {
        self.changes().find_by_id(id)
    }

    fn list_changes(&self) -> Result<Vec<ChangeRequest>> {
        self.changes().list_all()
    }

    fn find_pending_change(&self, student_id: Uuid) -> Result<Option<ChangeRequest>> {
        self.changes().find_pending_for_student(student_id)
    }

    fn update_change_status(&self, id: Uuid, status: ChangeStatus) -> Result<()> {
        self.changes().update_status(id, status)
    }
}

impl TicketRepository for Database {
    fn create_ticket(&self, ticket: &MaintenanceTicket) -> Result<()> {
        self.tickets().create(ticket)
    }

    fn find_ticket_by_id(&self, id: Uuid) -> Result<Option<MaintenanceTicket>> {
        self.tickets().find_by_id(id)
    }

    fn list_tickets(&self) -> Result<Vec<MaintenanceTicket>> {
        self.tickets().list_all()
    }

    fn resolve_ticket(&self, id: Uuid, resolved_at: DateTime<Utc>) -> Result<()> {
        self.tickets().mark_resolved(id, resolved_at)
    }
}
