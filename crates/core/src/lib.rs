//! Hostel Core Library
//!
//! Models, allocation engine, registry seeding, invariants, and storage
//! for the hostel room-booking system.

pub mod engine;
pub mod error;
pub mod invariants;
pub mod models;
pub mod registry;
pub mod storage;

pub use engine::{AllocationEngine, Decision};
pub use error::{Error, Result};
pub use models::*;
pub use registry::{occupancy_summary, seed_rooms, OccupancySummary};
pub use storage::{
    BookingRepository, BookingStore, ChangeRepository, ChangeStore, Database, RoomRepository,
    RoomStore, SessionStore, Storage, TicketRepository, TicketStore,
};
