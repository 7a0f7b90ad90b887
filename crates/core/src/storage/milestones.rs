//! Milestone storage operations

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_date, parse_date_opt, parse_datetime, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::GroupMilestone;

fn milestone_from_row(row: &Row<'_>) -> std::result::Result<GroupMilestone, rusqlite::Error> {
    Ok(GroupMilestone {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        group_id: parse_uuid(&row.get::<_, String>(1)?)?,
        description: row.get(2)?,
        expected_due_date: parse_date(&row.get::<_, String>(3)?)?,
        done: row.get::<_, i32>(4)? != 0,
        done_date: parse_date_opt(row.get::<_, Option<String>>(5)?)?,
        time: parse_datetime(&row.get::<_, String>(6)?)?,
    })
}

pub struct MilestoneStore<'a> {
    conn: &'a Connection,
}

impl<'a> MilestoneStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Add a milestone
    #[instrument(skip(self, milestone), fields(group_id = %milestone.group_id))]
    pub fn add(&self, milestone: &GroupMilestone) -> Result<()> {
        self.conn.execute(
            "INSERT INTO group_milestones (id, group_id, description, expected_due_date,
                                           done, done_date, time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                milestone.id.to_string(),
                milestone.group_id.to_string(),
                milestone.description,
                milestone.expected_due_date.format("%Y-%m-%d").to_string(),
                milestone.done as i32,
                milestone
                    .done_date
                    .map(|d| d.format("%Y-%m-%d").to_string()),
                milestone.time.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find a milestone by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<GroupMilestone>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, group_id, description, expected_due_date, done, done_date, time
             FROM group_milestones WHERE id = ?1",
        )?;

        let milestone = stmt
            .query_row(params![id.to_string()], milestone_from_row)
            .optional()?;

        Ok(milestone)
    }

    /// Update a milestone, stamping its change time
    #[instrument(skip(self, milestone), fields(milestone_id = %milestone.id))]
    pub fn update(&self, milestone: &GroupMilestone) -> Result<()> {
        self.conn.execute(
            "UPDATE group_milestones SET description = ?1, expected_due_date = ?2,
                                         done = ?3, done_date = ?4, time = ?5
             WHERE id = ?6",
            params![
                milestone.description,
                milestone.expected_due_date.format("%Y-%m-%d").to_string(),
                milestone.done as i32,
                milestone
                    .done_date
                    .map(|d| d.format("%Y-%m-%d").to_string()),
                Utc::now().to_rfc3339(),
                milestone.id.to_string(),
            ],
        )?;
        Ok(())
    }

    /// Mark a milestone done on the given date
    #[instrument(skip(self))]
    pub fn mark_done(&self, milestone_id: Uuid, done_date: NaiveDate) -> Result<()> {
        self.conn.execute(
            "UPDATE group_milestones SET done = 1, done_date = ?1, time = ?2 WHERE id = ?3",
            params![
                done_date.format("%Y-%m-%d").to_string(),
                Utc::now().to_rfc3339(),
                milestone_id.to_string(),
            ],
        )?;
        Ok(())
    }

    /// List a group's milestones ordered by expected due date
    #[instrument(skip(self))]
    pub fn list_for_group(&self, group_id: Uuid) -> Result<Vec<GroupMilestone>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, group_id, description, expected_due_date, done, done_date, time
             FROM group_milestones WHERE group_id = ?1 ORDER BY expected_due_date",
        )?;

        let milestones = stmt
            .query_map(params![group_id.to_string()], milestone_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(milestones)
    }
}
