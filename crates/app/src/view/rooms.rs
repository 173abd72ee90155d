//! Room listing rows

use hostel_core::{AllocationEngine, Result, Room};

use crate::state::AppState;

/// One row of the room table
#[derive(Debug, Clone)]
pub struct RoomRow {
    pub number: String,
    pub block: String,
    pub floor: u8,
    pub type_label: String,
    /// "occupied/capacity", e.g. "1/2"
    pub occupancy: String,
    pub is_full: bool,
}

impl RoomRow {
    fn from_room(room: &Room) -> Self {
        Self {
            number: room.number.clone(),
            block: room.block.clone(),
            floor: room.floor,
            type_label: room.room_type.display_name().to_string(),
            occupancy: format!("{}/{}", room.occupants.len(), room.capacity),
            is_full: room.is_full(),
        }
    }
}

/// All rooms, ordered by number (visible to both roles)
pub fn room_rows(state: &AppState) -> Result<Vec<RoomRow>> {
    let db = state.db.lock().unwrap();
    let rooms = AllocationEngine::new(&db).rooms()?;
    Ok(rooms.iter().map(RoomRow::from_room).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_rows_cover_registry() {
        let state = AppState::open_in_memory().unwrap();
        let rows = room_rows(&state).unwrap();

        assert_eq!(rows.len(), 48);
        assert_eq!(rows[0].number, "A-101");
        assert_eq!(rows[0].occupancy, "0/2");
        assert!(!rows[0].is_full);
        assert!(rows.iter().any(|r| r.type_label == "Deluxe"));
    }
}
