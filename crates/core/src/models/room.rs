//! Room model - the bookable unit of the hostel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RoomType {
    /// Regular twin-bed room
    Standard = 1,
    /// Top-floor room with extra amenities
    Deluxe = 2,
}

impl RoomType {
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::Standard => "Standard",
            RoomType::Deluxe => "Deluxe",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One occupied bed in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantRef {
    pub student_id: Uuid,
    pub assigned_at: DateTime<Utc>,
}

/// A room in the hostel
///
/// Rooms are created once by the registry seed and never destroyed.
/// The occupant list is mutated only by the allocation engine, on
/// booking approval and room-change approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    /// Human-facing room number, e.g. "A-101"
    pub number: String,
    pub block: String,
    pub floor: u8,
    pub capacity: u32,
    pub occupants: Vec<OccupantRef>,
    pub room_type: RoomType,
}

impl Room {
    pub fn new(block: &str, floor: u8, number: String, capacity: u32, room_type: RoomType) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            block: block.to_string(),
            floor,
            capacity,
            occupants: Vec::new(),
            room_type,
        }
    }

    /// Free beds remaining in this room
    pub fn capacity_remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.occupants.len() as u32)
    }

    pub fn is_full(&self) -> bool {
        self.capacity_remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_remaining() {
        let mut room = Room::new("A", 1, "A-101".to_string(), 2, RoomType::Standard);
        assert_eq!(room.capacity_remaining(), 2);
        assert!(!room.is_full());

        room.occupants.push(OccupantRef {
            student_id: Uuid::new_v4(),
            assigned_at: Utc::now(),
        });
        room.occupants.push(OccupantRef {
            student_id: Uuid::new_v4(),
            assigned_at: Utc::now(),
        });
        assert_eq!(room.capacity_remaining(), 0);
        assert!(room.is_full());
    }

    #[test]
    fn test_capacity_remaining_saturates() {
        let mut room = Room::new("B", 2, "B-203".to_string(), 1, RoomType::Standard);
        room.occupants.push(OccupantRef {
            student_id: Uuid::new_v4(),
            assigned_at: Utc::now(),
        });
        room.occupants.push(OccupantRef {
            student_id: Uuid::new_v4(),
            assigned_at: Utc::now(),
        });
        // Over-full rooms never report negative remaining capacity
        assert_eq!(room.capacity_remaining(), 0);
    }
}
