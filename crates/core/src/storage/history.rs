//! History storage operations - the snapshot routine and lineage queries
//!
//! A snapshot captures a live group's scalar fields and its current role
//! set as immutable rows. The multi-row write happens inside one
//! transaction: a history row must never exist with only part of its role
//! set, and a role-history row must never exist without its group-history
//! row.

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::groups::GroupStore;
use super::parse::{
    parse_datetime, parse_group_state, parse_group_type, parse_role_name, parse_uuid,
    parse_uuid_opt, OptionalExt,
};
use super::roles::RoleStore;
use crate::error::{Error, Result};
use crate::models::{GroupHistory, RoleHistory};

const HISTORY_COLUMNS: &str = "id, group_id, time, name, acronym, state, type, parent_id, ad_id, \
     list_email, list_subscribe, list_archive, comments";

fn history_from_row(row: &Row<'_>) -> std::result::Result<GroupHistory, rusqlite::Error> {
    Ok(GroupHistory {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        group_id: parse_uuid(&row.get::<_, String>(1)?)?,
        time: parse_datetime(&row.get::<_, String>(2)?)?,
        name: row.get(3)?,
        acronym: row.get(4)?,
        state: parse_group_state(&row.get::<_, String>(5)?)?,
        group_type: parse_group_type(&row.get::<_, String>(6)?)?,
        parent_id: parse_uuid_opt(row.get::<_, Option<String>>(7)?)?,
        ad_id: parse_uuid_opt(row.get::<_, Option<String>>(8)?)?,
        list_email: row.get(9)?,
        list_subscribe: row.get(10)?,
        list_archive: row.get(11)?,
        comments: row.get(12)?,
    })
}

pub struct HistoryStore<'a> {
    conn: &'a Connection,
}

impl<'a> HistoryStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Snapshot a live group into history.
    ///
    /// Writes one group-history row plus one role-history row per current
    /// role assignment, all in a single transaction. The charter reference
    /// is not copied; it stays canonical on the live group. Calling twice
    /// records two snapshots.
    #[instrument(skip(self))]
    pub fn snapshot_group(&self, group_id: Uuid) -> Result<GroupHistory> {
        let group = GroupStore::new(self.conn)
            .find_by_id(group_id)?
            .ok_or_else(|| Error::NotFound(format!("group {group_id}")))?;
        let roles = RoleStore::new(self.conn).list_for_group(group_id)?;

        let history = GroupHistory::from_group(&group);

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO group_history (id, group_id, time, name, acronym, state, type,
                                        parent_id, ad_id, list_email, list_subscribe,
                                        list_archive, comments)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                history.id.to_string(),
                history.group_id.to_string(),
                history.time.to_rfc3339(),
                history.name,
                history.acronym,
                history.state.as_str(),
                history.group_type.as_str(),
                history.parent_id.map(|p| p.to_string()),
                history.ad_id.map(|a| a.to_string()),
                history.list_email,
                history.list_subscribe,
                history.list_archive,
                history.comments,
            ],
        )?;

        for role in &roles {
            let rh = RoleHistory::from_role(role, history.id);
            tx.execute(
                "INSERT INTO role_history (id, group_history_id, name, email)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    rh.id.to_string(),
                    rh.group_history_id.to_string(),
                    rh.name.as_str(),
                    rh.email,
                ],
            )?;
        }
        tx.commit()?;

        Ok(history)
    }

    /// Find a history row by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<GroupHistory>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {HISTORY_COLUMNS} FROM group_history WHERE id = ?1"
        ))?;

        let history = stmt
            .query_row(params![id.to_string()], history_from_row)
            .optional()?;

        Ok(history)
    }

    /// List a group's history, newest first
    #[instrument(skip(self))]
    pub fn list_for_group(&self, group_id: Uuid) -> Result<Vec<GroupHistory>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {HISTORY_COLUMNS} FROM group_history
             WHERE group_id = ?1 ORDER BY time DESC, rowid DESC"
        ))?;

        let rows = stmt
            .query_map(params![group_id.to_string()], history_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// List history by acronym, newest first.
    ///
    /// The acronym is the invariant handle for a lineage; this works even
    /// when the caller only has the acronym of a past state.
    #[instrument(skip(self))]
    pub fn list_for_acronym(&self, acronym: &str) -> Result<Vec<GroupHistory>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {HISTORY_COLUMNS} FROM group_history
             WHERE acronym = ?1 ORDER BY time DESC, rowid DESC"
        ))?;

        let rows = stmt
            .query_map(params![acronym], history_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// List the role snapshots belonging to a history row
    #[instrument(skip(self))]
    pub fn roles_for(&self, group_history_id: Uuid) -> Result<Vec<RoleHistory>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, group_history_id, name, email FROM role_history
             WHERE group_history_id = ?1 ORDER BY name, email",
        )?;

        let rows = stmt
            .query_map(params![group_history_id.to_string()], |row| {
                Ok(RoleHistory {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    group_history_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    name: parse_role_name(&row.get::<_, String>(2)?)?,
                    email: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
