//! Room and occupant storage operations

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, room_type_from_u8, OptionalExt};
use crate::error::Result;
use crate::models::{OccupantRef, Room};

pub struct RoomStore<'a> {
    conn: &'a Connection,
}

impl<'a> RoomStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new room (seeding only; occupants start empty)
    pub fn insert(&self, room: &Room) -> Result<()> {
        self.conn.execute(
            "INSERT INTO rooms (id, number, block, floor, capacity, room_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                room.id.to_string(),
                room.number,
                room.block,
                room.floor,
                room.capacity,
                room.room_type as u8,
            ],
        )?;
        Ok(())
    }

    /// Find a room by ID, with its occupant list
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Room>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, number, block, floor, capacity, room_type
             FROM rooms WHERE id = ?1",
        )?;

        let room = stmt
            .query_row(params![id.to_string()], map_room_row)
            .optional()?;

        match room {
            Some(mut room) => {
                room.occupants = self.load_occupants(room.id)?;
                Ok(Some(room))
            }
            None => Ok(None),
        }
    }

    /// Find a room by its display number (e.g. "A-101")
    pub fn find_by_number(&self, number: &str) -> Result<Option<Room>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, number, block, floor, capacity, room_type
             FROM rooms WHERE number = ?1",
        )?;

        let room = stmt.query_row(params![number], map_room_row).optional()?;

        match room {
            Some(mut room) => {
                room.occupants = self.load_occupants(room.id)?;
                Ok(Some(room))
            }
            None => Ok(None),
        }
    }

    /// List all rooms with occupants, ordered by number
    pub fn list_all(&self) -> Result<Vec<Room>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, number, block, floor, capacity, room_type
             FROM rooms ORDER BY number",
        )?;

        let mut rooms = stmt
            .query_map([], map_room_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for room in &mut rooms {
            room.occupants = self.load_occupants(room.id)?;
        }

        Ok(rooms)
    }

    /// Number of rooms in the registry
    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Assign a student a bed in a room
    #[instrument(skip(self))]
    pub fn add_occupant(
        &self,
        room_id: Uuid,
        student_id: Uuid,
        assigned_at: DateTime<Utc>,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO occupants (room_id, student_id, assigned_at)
             VALUES (?1, ?2, ?3)",
            params![
                room_id.to_string(),
                student_id.to_string(),
                assigned_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Release a student's bed in a room
    ///
    /// Returns whether a bed was actually released; removing an occupant
    /// that is not there is a no-op, so the count never goes negative.
    #[instrument(skip(self))]
    pub fn remove_occupant(&self, room_id: Uuid, student_id: Uuid) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM occupants WHERE room_id = ?1 AND student_id = ?2",
            params![room_id.to_string(), student_id.to_string()],
        )?;
        Ok(removed > 0)
    }

    /// Count occupied beds in a room
    pub fn occupant_count(&self, room_id: Uuid) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM occupants WHERE room_id = ?1",
            params![room_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn load_occupants(&self, room_id: Uuid) -> Result<Vec<OccupantRef>> {
        let mut stmt = self.conn.prepare(
            "SELECT student_id, assigned_at FROM occupants
             WHERE room_id = ?1 ORDER BY assigned_at",
        )?;

        let occupants = stmt
            .query_map(params![room_id.to_string()], |row| {
                Ok(OccupantRef {
                    student_id: parse_uuid(&row.get::<_, String>(0)?)?,
                    assigned_at: parse_datetime(&row.get::<_, String>(1)?)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(occupants)
    }
}

fn map_room_row(row: &rusqlite::Row<'_>) -> std::result::Result<Room, rusqlite::Error> {
    Ok(Room {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        number: row.get(1)?,
        block: row.get(2)?,
        floor: row.get(3)?,
        capacity: row.get(4)?,
        occupants: Vec::new(),
        room_type: room_type_from_u8(row.get::<_, u8>(5)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomType;
    use crate::storage::Database;

    fn make_room(number: &str) -> Room {
        Room::new("A", 1, number.to_string(), 2, RoomType::Standard)
    }

    #[test]
    fn test_insert_and_find() {
        let db = Database::open_in_memory().unwrap();
        let room = make_room("A-101");
        db.rooms().insert(&room).unwrap();

        let found = db.rooms().find_by_id(room.id).unwrap().unwrap();
        assert_eq!(found.number, "A-101");
        assert_eq!(found.capacity, 2);
        assert!(found.occupants.is_empty());

        let by_number = db.rooms().find_by_number("A-101").unwrap().unwrap();
        assert_eq!(by_number.id, room.id);
        assert!(db.rooms().find_by_number("Z-999").unwrap().is_none());
    }

    #[test]
    fn test_add_and_remove_occupant() {
        let db = Database::open_in_memory().unwrap();
        let room = make_room("B-102");
        db.rooms().insert(&room).unwrap();

        let student = Uuid::new_v4();
        db.rooms().add_occupant(room.id, student, Utc::now()).unwrap();
        assert_eq!(db.rooms().occupant_count(room.id).unwrap(), 1);

        let found = db.rooms().find_by_id(room.id).unwrap().unwrap();
        assert_eq!(found.occupants.len(), 1);
        assert_eq!(found.occupants[0].student_id, student);

        assert!(db.rooms().remove_occupant(room.id, student).unwrap());
        assert_eq!(db.rooms().occupant_count(room.id).unwrap(), 0);

        // Removing again releases nothing
        assert!(!db.rooms().remove_occupant(room.id, student).unwrap());
    }

    #[test]
    fn test_list_all_ordered_by_number() {
        let db = Database::open_in_memory().unwrap();
        db.rooms().insert(&make_room("B-201")).unwrap();
        db.rooms().insert(&make_room("A-102")).unwrap();
        db.rooms().insert(&make_room("A-101")).unwrap();

        let rooms = db.rooms().list_all().unwrap();
        let numbers: Vec<_> = rooms.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["A-101", "A-102", "B-201"]);
    }
}
