//! Room registry - deterministic seeding and occupancy totals
//!
//! The registry is the fixed 48-room layout. Seeding runs once at first
//! start and is idempotent; rooms are never destroyed afterwards.

use crate::error::Result;
use crate::models::{Room, RoomType};
use crate::storage::Database;

/// Hostel blocks
pub const BLOCKS: [&str; 4] = ["A", "B", "C", "D"];
/// Floors per block
pub const FLOORS: u8 = 3;
/// Rooms per floor
pub const ROOMS_PER_FLOOR: u8 = 4;
/// Beds per room
pub const ROOM_CAPACITY: u32 = 2;
/// Rooms on this floor are deluxe
pub const DELUXE_FLOOR: u8 = 3;

/// Seed the room registry if it does not exist yet
///
/// Idempotent: when rooms are already persisted the existing registry is
/// returned unchanged. The layout is deterministic - 4 blocks x 3 floors
/// x 4 rooms, numbered like "A-101", all capacity 2, top floor deluxe.
pub fn seed_rooms(db: &Database) -> Result<Vec<Room>> {
    let store = db.rooms();
    if store.count()? > 0 {
        return store.list_all();
    }

    for block in BLOCKS {
        for floor in 1..=FLOORS {
            for slot in 1..=ROOMS_PER_FLOOR {
                let number = format!("{}-{}{:02}", block, floor, slot);
                let room_type = if floor == DELUXE_FLOOR {
                    RoomType::Deluxe
                } else {
                    RoomType::Standard
                };
                let room = Room::new(block, floor, number, ROOM_CAPACITY, room_type);
                store.insert(&room)?;
            }
        }
    }

    let rooms = store.list_all()?;
    tracing::info!(rooms = rooms.len(), "Seeded room registry");
    Ok(rooms)
}

/// Snapshot of bed usage across the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancySummary {
    pub total_rooms: usize,
    pub total_beds: u32,
    pub occupied_beds: u32,
}

impl OccupancySummary {
    pub fn free_beds(&self) -> u32 {
        self.total_beds.saturating_sub(self.occupied_beds)
    }
}

/// Compute bed usage over a room listing
pub fn occupancy_summary(rooms: &[Room]) -> OccupancySummary {
    OccupancySummary {
        total_rooms: rooms.len(),
        total_beds: rooms.iter().map(|r| r.capacity).sum(),
        occupied_beds: rooms.iter().map(|r| r.occupants.len() as u32).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_creates_full_layout() {
        let db = Database::open_in_memory().unwrap();
        let rooms = seed_rooms(&db).unwrap();

        assert_eq!(rooms.len(), 48);
        assert!(rooms.iter().all(|r| r.capacity == ROOM_CAPACITY));
        assert!(rooms.iter().all(|r| r.occupants.is_empty()));

        // Top floor is deluxe, the rest standard
        for room in &rooms {
            let expected = if room.floor == DELUXE_FLOOR {
                RoomType::Deluxe
            } else {
                RoomType::Standard
            };
            assert_eq!(room.room_type, expected, "room {}", room.number);
        }

        let deluxe = rooms.iter().filter(|r| r.room_type == RoomType::Deluxe).count();
        assert_eq!(deluxe, 16);
    }

    #[test]
    fn test_seed_numbering() {
        let db = Database::open_in_memory().unwrap();
        let rooms = seed_rooms(&db).unwrap();

        assert!(rooms.iter().any(|r| r.number == "A-101"));
        assert!(rooms.iter().any(|r| r.number == "D-304"));
        assert!(!rooms.iter().any(|r| r.number == "E-101"));
    }

    #[test]
    fn test_seed_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let first = seed_rooms(&db).unwrap();
        let second = seed_rooms(&db).unwrap();

        assert_eq!(first.len(), second.len());
        let first_ids: Vec<_> = first.iter().map(|r| r.id).collect();
        let second_ids: Vec<_> = second.iter().map(|r| r.id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_occupancy_summary() {
        let db = Database::open_in_memory().unwrap();
        let rooms = seed_rooms(&db).unwrap();

        let summary = occupancy_summary(&rooms);
        assert_eq!(summary.total_rooms, 48);
        assert_eq!(summary.total_beds, 96);
        assert_eq!(summary.occupied_beds, 0);
        assert_eq!(summary.free_beds(), 96);
    }
}
