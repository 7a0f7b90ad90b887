//! Group storage operations

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{
    parse_datetime, parse_group_state, parse_group_type, parse_uuid, parse_uuid_opt, OptionalExt,
};
use crate::error::Result;
use crate::models::{Group, GroupState};

const GROUP_COLUMNS: &str = "id, time, name, acronym, state, type, parent_id, ad_id, \
     list_email, list_subscribe, list_archive, comments, charter_doc_id";

fn group_from_row(row: &Row<'_>) -> std::result::Result<Group, rusqlite::Error> {
    Ok(Group {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        time: parse_datetime(&row.get::<_, String>(1)?)?,
        name: row.get(2)?,
        acronym: row.get(3)?,
        state: parse_group_state(&row.get::<_, String>(4)?)?,
        group_type: parse_group_type(&row.get::<_, String>(5)?)?,
        parent_id: parse_uuid_opt(row.get::<_, Option<String>>(6)?)?,
        ad_id: parse_uuid_opt(row.get::<_, Option<String>>(7)?)?,
        list_email: row.get(8)?,
        list_subscribe: row.get(9)?,
        list_archive: row.get(10)?,
        comments: row.get(11)?,
        charter_doc_id: parse_uuid_opt(row.get::<_, Option<String>>(12)?)?,
    })
}

pub struct GroupStore<'a> {
    conn: &'a Connection,
}

impl<'a> GroupStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new group
    #[instrument(skip(self, group), fields(acronym = %group.acronym))]
    pub fn create(&self, group: &Group) -> Result<()> {
        self.conn.execute(
            "INSERT INTO groups (id, time, name, acronym, state, type, parent_id, ad_id,
                                 list_email, list_subscribe, list_archive, comments, charter_doc_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                group.id.to_string(),
                group.time.to_rfc3339(),
                group.name,
                group.acronym,
                group.state.as_str(),
                group.group_type.as_str(),
                group.parent_id.map(|p| p.to_string()),
                group.ad_id.map(|a| a.to_string()),
                group.list_email,
                group.list_subscribe,
                group.list_archive,
                group.comments,
                group.charter_doc_id.map(|c| c.to_string()),
            ],
        )?;
        Ok(())
    }

    /// Find group by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Group>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {GROUP_COLUMNS} FROM groups WHERE id = ?1"))?;

        let group = stmt
            .query_row(params![id.to_string()], group_from_row)
            .optional()?;

        Ok(group)
    }

    /// Find group by acronym (the stable lineage handle)
    #[instrument(skip(self))]
    pub fn find_by_acronym(&self, acronym: &str) -> Result<Option<Group>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE acronym = ?1"
        ))?;

        let group = stmt.query_row(params![acronym], group_from_row).optional()?;

        Ok(group)
    }

    /// Update a group, stamping its change time
    #[instrument(skip(self, group), fields(group_id = %group.id))]
    pub fn update(&self, group: &Group) -> Result<()> {
        self.conn.execute(
            "UPDATE groups SET time = ?1, name = ?2, acronym = ?3, state = ?4, type = ?5,
                               parent_id = ?6, ad_id = ?7, list_email = ?8, list_subscribe = ?9,
                               list_archive = ?10, comments = ?11, charter_doc_id = ?12
             WHERE id = ?13",
            params![
                group.time.to_rfc3339(),
                group.name,
                group.acronym,
                group.state.as_str(),
                group.group_type.as_str(),
                group.parent_id.map(|p| p.to_string()),
                group.ad_id.map(|a| a.to_string()),
                group.list_email,
                group.list_subscribe,
                group.list_archive,
                group.comments,
                group.charter_doc_id.map(|c| c.to_string()),
                group.id.to_string(),
            ],
        )?;
        Ok(())
    }

    /// Delete a group; owned rows go with it by cascade
    #[instrument(skip(self))]
    pub fn delete(&self, group_id: Uuid) -> Result<()> {
        self.conn.execute(
            "DELETE FROM groups WHERE id = ?1",
            params![group_id.to_string()],
        )?;
        Ok(())
    }

    /// List direct children of a group
    #[instrument(skip(self))]
    pub fn list_children(&self, parent_id: Uuid) -> Result<Vec<Group>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE parent_id = ?1 ORDER BY acronym"
        ))?;

        let groups = stmt
            .query_map(params![parent_id.to_string()], group_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(groups)
    }

    /// List groups in a given state
    #[instrument(skip(self))]
    pub fn list_by_state(&self, state: GroupState) -> Result<Vec<Group>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE state = ?1 ORDER BY acronym"
        ))?;

        let groups = stmt
            .query_map(params![state.as_str()], group_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Email, GroupEventType, GroupMilestone, GroupType, GroupUrl, NewGroupEvent, Person, Role,
        RoleName,
    };
    use crate::storage::Database;
    use chrono::{NaiveDate, Utc};

    fn seed_person(db: &Database, name: &str, address: &str) -> Person {
        let person = Person::new(name.to_string());
        db.persons().create(&person).unwrap();
        db.persons()
            .add_email(&Email::new(address.to_string(), person.id))
            .unwrap();
        person
    }

    #[test]
    fn test_create_and_find_by_acronym() {
        let db = Database::open_in_memory().unwrap();
        let group = Group::new(
            "Transport Area".to_string(),
            "tsv".to_string(),
            GroupType::Area,
        );
        db.groups().create(&group).unwrap();

        let found = db.groups().find_by_acronym("tsv").unwrap().unwrap();
        assert_eq!(found.id, group.id);
        assert_eq!(found.name, "Transport Area");
        assert_eq!(found.state, GroupState::Proposed);
        assert!(db.groups().find_by_acronym("nope").unwrap().is_none());
    }

    #[test]
    fn test_acronym_unique() {
        let db = Database::open_in_memory().unwrap();
        let a = Group::new("First".to_string(), "dup".to_string(), GroupType::WorkingGroup);
        let b = Group::new("Second".to_string(), "dup".to_string(), GroupType::WorkingGroup);
        db.groups().create(&a).unwrap();
        assert!(db.groups().create(&b).is_err());
    }

    #[test]
    fn test_name_and_acronym_length_limits() {
        let db = Database::open_in_memory().unwrap();

        // Over the 80-char name limit
        let group = Group::new("x".repeat(81), "ok".to_string(), GroupType::WorkingGroup);
        assert!(db.groups().create(&group).is_err());

        // Over the 16-char acronym limit
        let group = Group::new("Fine".to_string(), "y".repeat(17), GroupType::WorkingGroup);
        assert!(db.groups().create(&group).is_err());

        // Exactly at the limits is accepted
        let group = Group::new("x".repeat(80), "z".repeat(16), GroupType::WorkingGroup);
        db.groups().create(&group).unwrap();
        let mut found = db.groups().find_by_id(group.id).unwrap().unwrap();
        assert_eq!(found.name.chars().count(), 80);

        // Updates are constrained the same way
        found.name = "x".repeat(81);
        assert!(db.groups().update(&found).is_err());
    }

    #[test]
    fn test_update_round_trips_all_fields() {
        let db = Database::open_in_memory().unwrap();
        let ad = seed_person(&db, "Ada Lovelace", "ada@example.org");
        let mut group = Group::new(
            "Calendaring Extensions".to_string(),
            "calext".to_string(),
            GroupType::WorkingGroup,
        );
        db.groups().create(&group).unwrap();

        group.state = GroupState::Active;
        group.ad_id = Some(ad.id);
        group.list_email = "calext@example.org".to_string();
        group.list_subscribe = "https://lists.example.org/calext".to_string();
        group.list_archive = "https://archive.example.org/calext".to_string();
        group.comments = "rechartered".to_string();
        group.time = Utc::now();
        db.groups().update(&group).unwrap();

        let found = db.groups().find_by_id(group.id).unwrap().unwrap();
        assert_eq!(found.state, GroupState::Active);
        assert_eq!(found.ad_id, Some(ad.id));
        assert_eq!(found.list_email, "calext@example.org");
        assert_eq!(found.comments, "rechartered");
    }

    #[test]
    fn test_list_children() {
        let db = Database::open_in_memory().unwrap();
        let area = Group::new("Apps Area".to_string(), "app".to_string(), GroupType::Area);
        db.groups().create(&area).unwrap();

        let wg1 = Group::new("HTTP".to_string(), "httpbis".to_string(), GroupType::WorkingGroup)
            .with_parent(area.id);
        let wg2 = Group::new("Calendars".to_string(), "calext".to_string(), GroupType::WorkingGroup)
            .with_parent(area.id);
        db.groups().create(&wg1).unwrap();
        db.groups().create(&wg2).unwrap();

        let children = db.groups().list_children(area.id).unwrap();
        assert_eq!(children.len(), 2);
        // Ordered by acronym
        assert_eq!(children[0].acronym, "calext");
        assert_eq!(children[1].acronym, "httpbis");
    }

    #[test]
    fn test_delete_cascades_to_owned_rows() {
        let db = Database::open_in_memory().unwrap();
        let person = seed_person(&db, "Grace Hopper", "grace@example.org");
        let group = Group::new("Routing".to_string(), "rtg".to_string(), GroupType::WorkingGroup);
        db.groups().create(&group).unwrap();

        db.roles()
            .add(&Role::new(group.id, RoleName::Chair, "grace@example.org".to_string()))
            .unwrap();
        db.urls()
            .add(&GroupUrl::new(
                group.id,
                "wiki".to_string(),
                "https://wiki.example.org/rtg".to_string(),
            ))
            .unwrap();
        db.milestones()
            .add(&GroupMilestone::new(
                group.id,
                "Publish requirements".to_string(),
                NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            ))
            .unwrap();
        db.events()
            .append(&NewGroupEvent::new(
                group.id,
                person.id,
                GroupEventType::Started,
                "Started group".to_string(),
            ))
            .unwrap();

        db.groups().delete(group.id).unwrap();

        assert!(db.roles().list_for_group(group.id).unwrap().is_empty());
        assert!(db.urls().list_for_group(group.id).unwrap().is_empty());
        assert!(db.milestones().list_for_group(group.id).unwrap().is_empty());
        assert!(db.events().list_for_group(group.id).unwrap().is_empty());
    }
}
