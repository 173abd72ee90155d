//! Database migration system
//!
//! Tracks schema versions and applies migrations in order.

use rusqlite::Connection;
use tracing::{info, instrument};

use crate::error::Result;

/// A database migration
pub struct Migration {
    /// Version number (must be sequential starting from 1)
    pub version: u32,
    /// Description of what this migration does
    pub description: &'static str,
    /// SQL to run for this migration
    pub sql: &'static str,
}

/// All migrations in order
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema",
        sql: r#"
            -- Rooms table (the registry)
            CREATE TABLE IF NOT EXISTS rooms (
                id TEXT PRIMARY KEY,
                number TEXT NOT NULL UNIQUE,
                block TEXT NOT NULL,
                floor INTEGER NOT NULL,
                capacity INTEGER NOT NULL,
                room_type INTEGER NOT NULL
            );

            -- One row per occupied bed
            CREATE TABLE IF NOT EXISTS occupants (
                room_id TEXT NOT NULL,
                student_id TEXT NOT NULL,
                assigned_at TEXT NOT NULL,
                PRIMARY KEY (room_id, student_id),
                FOREIGN KEY (room_id) REFERENCES rooms(id) ON DELETE CASCADE
            );

            -- Booking request ledger
            -- room_id is a reference, not a foreign key: requests may
            -- outlive any registry lookup and are settled by the engine
            CREATE TABLE IF NOT EXISTS booking_requests (
                id TEXT PRIMARY KEY,
                student_id TEXT NOT NULL,
                room_id TEXT NOT NULL,
                from_date TEXT NOT NULL,
                requested_at TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending'
            );

            -- Room-change request ledger
            CREATE TABLE IF NOT EXISTS change_requests (
                id TEXT PRIMARY KEY,
                student_id TEXT NOT NULL,
                from_room_id TEXT NOT NULL,
                to_room_id TEXT NOT NULL,
                reason TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                requested_at TEXT NOT NULL
            );

            -- Maintenance ticket ledger
            CREATE TABLE IF NOT EXISTS maintenance_tickets (
                id TEXT PRIMARY KEY,
                opened_by TEXT NOT NULL,
                subject TEXT NOT NULL,
                details TEXT NOT NULL,
                priority TEXT NOT NULL DEFAULT 'normal',
                status TEXT NOT NULL DEFAULT 'open',
                room_id TEXT,
                created_at TEXT NOT NULL,
                resolved_at TEXT
            );
        "#,
    },
    Migration {
        version: 2,
        description: "Add indexes for query performance",
        sql: r#"
            -- Occupant indexes
            CREATE INDEX IF NOT EXISTS idx_occupants_room ON occupants(room_id);
            CREATE INDEX IF NOT EXISTS idx_occupants_student ON occupants(student_id);

            -- Booking indexes
            CREATE INDEX IF NOT EXISTS idx_bookings_student ON booking_requests(student_id);
            CREATE INDEX IF NOT EXISTS idx_bookings_status ON booking_requests(status);
            CREATE INDEX IF NOT EXISTS idx_bookings_student_status
                ON booking_requests(student_id, status);

            -- Change request indexes
            CREATE INDEX IF NOT EXISTS idx_changes_student ON change_requests(student_id);
            CREATE INDEX IF NOT EXISTS idx_changes_status ON change_requests(status);

            -- Ticket indexes
            CREATE INDEX IF NOT EXISTS idx_tickets_status ON maintenance_tickets(status);
        "#,
    },
    Migration {
        version: 3,
        description: "Add session flag and resident identity",
        sql: r#"
            -- The single active session (role + resident identity)
            CREATE TABLE IF NOT EXISTS session (
                id TEXT PRIMARY KEY,
                role TEXT NOT NULL,
                student_id TEXT,
                started_at TEXT NOT NULL
            );

            -- The resident student identity request records are scoped to.
            -- Single row; survives logins and logouts.
            CREATE TABLE IF NOT EXISTS resident (
                student_id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL
            );
        "#,
    },
];

/// Initialize the migrations table
fn init_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version
fn get_current_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })
        .unwrap_or(None);
    Ok(version.unwrap_or(0))
}

/// Record that a migration was applied
fn record_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            migration.version,
            migration.description,
            chrono::Utc::now().to_rfc3339()
        ],
    )?;
    Ok(())
}

/// Run all pending migrations
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    init_migrations_table(conn)?;

    let current_version = get_current_version(conn)?;

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                description = migration.description,
                "Applying migration"
            );

            conn.execute_batch(migration.sql)?;
            record_migration(conn, migration)?;
        }
    }

    let new_version = get_current_version(conn)?;
    if new_version > current_version {
        info!(
            from = current_version,
            to = new_version,
            "Database schema updated"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Get the latest migration version (test helper)
    fn latest_version() -> u32 {
        MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
    }

    #[test]
    fn test_migrations_run() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let version = get_current_version(&conn).unwrap();
        assert_eq!(version, latest_version());
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // Run twice
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version = get_current_version(&conn).unwrap();
        assert_eq!(version, latest_version());
    }

    #[test]
    fn test_migrations_sequential() {
        // Verify migrations are numbered sequentially
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(
                migration.version as usize,
                i + 1,
                "Migration {} should have version {}",
                migration.description,
                i + 1
            );
        }
    }
}
