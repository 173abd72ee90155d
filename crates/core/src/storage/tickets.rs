//! Maintenance ticket storage operations

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse::{
    parse_datetime, parse_datetime_opt, parse_uuid, parse_uuid_opt, ticket_priority_from_str,
    ticket_status_from_str, OptionalExt,
};
use crate::error::Result;
use crate::models::MaintenanceTicket;

pub struct TicketStore<'a> {
    conn: &'a Connection,
}

impl<'a> TicketStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Append a new ticket to the ledger
    pub fn create(&self, ticket: &MaintenanceTicket) -> Result<()> {
        self.conn.execute(
            "INSERT INTO maintenance_tickets (id, opened_by, subject, details, priority, status, room_id, created_at, resolved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                ticket.id.to_string(),
                ticket.opened_by.to_string(),
                ticket.subject,
                ticket.details,
                ticket.priority.as_str(),
                ticket.status.as_str(),
                ticket.room_id.map(|id| id.to_string()),
                ticket.created_at.to_rfc3339(),
                ticket.resolved_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Find a ticket by ID
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceTicket>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, opened_by, subject, details, priority, status, room_id, created_at, resolved_at
             FROM maintenance_tickets WHERE id = ?1",
        )?;

        let ticket = stmt
            .query_row(params![id.to_string()], map_ticket_row)
            .optional()?;

        Ok(ticket)
    }

    /// List all tickets in creation order
    pub fn list_all(&self) -> Result<Vec<MaintenanceTicket>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, opened_by, subject, details, priority, status, room_id, created_at, resolved_at
             FROM maintenance_tickets ORDER BY created_at, id",
        )?;

        let tickets = stmt
            .query_map([], map_ticket_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tickets)
    }

    /// List open tickets in creation order
    pub fn list_open(&self) -> Result<Vec<MaintenanceTicket>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, opened_by, subject, details, priority, status, room_id, created_at, resolved_at
             FROM maintenance_tickets WHERE status = 'open' ORDER BY created_at, id",
        )?;

        let tickets = stmt
            .query_map([], map_ticket_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tickets)
    }

    /// Mark a ticket resolved
    pub fn mark_resolved(&self, id: Uuid, resolved_at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "UPDATE maintenance_tickets SET status = 'resolved', resolved_at = ?1 WHERE id = ?2",
            params![resolved_at.to_rfc3339(), id.to_string()],
        )?;
        Ok(())
    }
}

fn map_ticket_row(
    row: &rusqlite::Row<'_>,
) -> std::result::Result<MaintenanceTicket, rusqlite::Error> {
    Ok(MaintenanceTicket {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        opened_by: parse_uuid(&row.get::<_, String>(1)?)?,
        subject: row.get(2)?,
        details: row.get(3)?,
        priority: ticket_priority_from_str(&row.get::<_, String>(4)?),
        status: ticket_status_from_str(&row.get::<_, String>(5)?),
        room_id: parse_uuid_opt(row.get::<_, Option<String>>(6)?)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?)?,
        resolved_at: parse_datetime_opt(row.get::<_, Option<String>>(8)?)?,
    })
}
