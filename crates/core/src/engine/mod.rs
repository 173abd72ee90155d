//! Allocation engine - the booking/occupancy state machine
//!
//! The engine is the only writer of request statuses and occupant rows.
//! Every operation is synchronous and total over the current state:
//! precondition violations return typed errors, capacity exhaustion
//! degrades to a rejected status, and decisions on already-settled
//! requests are no-ops.

mod booking;
mod change;
mod maintenance;

use crate::error::Result;
use crate::models::{BookingRequest, ChangeRequest, MaintenanceTicket, Room};
use crate::registry::{self, OccupancySummary};
use crate::storage::Database;

/// Admin decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

/// The allocation engine over a database
pub struct AllocationEngine<'a> {
    db: &'a Database,
}

impl<'a> AllocationEngine<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Seed the room registry if absent (idempotent)
    pub fn seed_rooms(&self) -> Result<Vec<Room>> {
        registry::seed_rooms(self.db)
    }

    /// Current registry snapshot with occupants
    pub fn rooms(&self) -> Result<Vec<Room>> {
        self.db.rooms().list_all()
    }

    /// The booking ledger
    pub fn bookings(&self) -> Result<Vec<BookingRequest>> {
        self.db.bookings().list_all()
    }

    /// The change-request ledger
    pub fn changes(&self) -> Result<Vec<ChangeRequest>> {
        self.db.changes().list_all()
    }

    /// The maintenance ledger
    pub fn tickets(&self) -> Result<Vec<MaintenanceTicket>> {
        self.db.tickets().list_all()
    }

    /// Bed usage across the registry
    pub fn occupancy(&self) -> Result<OccupancySummary> {
        Ok(registry::occupancy_summary(&self.rooms()?))
    }

    pub(crate) fn db(&self) -> &Database {
        self.db
    }
}
