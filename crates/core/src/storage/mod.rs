//! SQLite storage layer for Gavel

mod events;
mod groups;
mod history;
mod migrations;
mod milestones;
mod parse;
mod persons;
mod roles;
mod traits;
mod urls;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{
    Email, EventInfo, Group, GroupEvent, GroupEventType, GroupHistory, GroupMilestone, GroupState,
    GroupUrl, NewGroupEvent, Person, Role, RoleHistory, RoleInfo,
};
use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

pub use events::EventStore;
pub use groups::GroupStore;
pub use history::HistoryStore;
pub use milestones::MilestoneStore;
pub use persons::PersonStore;
pub use roles::RoleStore;
pub use traits::{
    EventRepository, GroupRepository, HistoryRepository, MilestoneRepository, PersonRepository,
    Storage,
};
pub use urls::UrlStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open the database at the platform data directory
    #[instrument]
    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("org", "Gavel", "gavel").ok_or_else(|| {
            Error::InvalidOperation("could not determine platform data directory".to_string())
        })?;
        std::fs::create_dir_all(dirs.data_dir())?;
        Self::open(dirs.data_dir().join("gavel.db"))
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get person store
    pub fn persons(&self) -> PersonStore<'_> {
        PersonStore::new(&self.conn)
    }

    /// Get group store
    pub fn groups(&self) -> GroupStore<'_> {
        GroupStore::new(&self.conn)
    }

    /// Get role store
    pub fn roles(&self) -> RoleStore<'_> {
        RoleStore::new(&self.conn)
    }

    /// Get history store
    pub fn history(&self) -> HistoryStore<'_> {
        HistoryStore::new(&self.conn)
    }

    /// Get URL store
    pub fn urls(&self) -> UrlStore<'_> {
        UrlStore::new(&self.conn)
    }

    /// Get milestone store
    pub fn milestones(&self) -> MilestoneStore<'_> {
        MilestoneStore::new(&self.conn)
    }

    /// Get event store
    pub fn events(&self) -> EventStore<'_> {
        EventStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl PersonRepository for Database {
    fn create_person(&self, person: &Person) -> Result<()> {
        self.persons().create(person)
    }

    fn find_person_by_id(&self, id: Uuid) -> Result<Option<Person>> {
        self.persons().find_by_id(id)
    }

    fn add_email(&self, email: &Email) -> Result<()> {
        self.persons().add_email(email)
    }

    fn name_for_email(&self, address: &str) -> Result<Option<String>> {
        self.persons().name_for_email(address)
    }
}

impl GroupRepository for Database {
    fn create_group(&self, group: &Group) -> Result<()> {
        self.groups().create(group)
    }

    fn find_group_by_id(&self, id: Uuid) -> Result<Option<Group>> {
        self.groups().find_by_id(id)
    }

    fn find_group_by_acronym(&self, acronym: &str) -> Result<Option<Group>> {
        self.groups().find_by_acronym(acronym)
    }

    fn update_group(&self, group: &Group) -> Result<()> {
        self.groups().update(group)
    }

    fn delete_group(&self, group_id: Uuid) -> Result<()> {
        self.groups().delete(group_id)
    }

    fn list_children(&self, parent_id: Uuid) -> Result<Vec<Group>> {
        self.groups().list_children(parent_id)
    }

    fn list_groups_by_state(&self, state: GroupState) -> Result<Vec<Group>> {
        self.groups().list_by_state(state)
    }

    fn add_role(&self, role: &Role) -> Result<()> {
        self.roles().add(role)
    }

    fn remove_role(&self, role_id: Uuid) -> Result<()> {
        self.roles().remove(role_id)
    }

    fn list_roles(&self, group_id: Uuid) -> Result<Vec<Role>> {
        self.roles().list_for_group(group_id)
    }

    fn list_role_info(&self, group_id: Uuid) -> Result<Vec<RoleInfo>> {
        self.roles().list_info_for_group(group_id)
    }

    fn add_url(&self, url: &GroupUrl) -> Result<()> {
        self.urls().add(url)
    }

    fn remove_url(&self, url_id: Uuid) -> Result<()> {
        self.urls().remove(url_id)
    }

    fn list_urls(&self, group_id: Uuid) -> Result<Vec<GroupUrl>> {
        self.urls().list_for_group(group_id)
    }
}

impl HistoryRepository for Database {
    fn snapshot_group(&self, group_id: Uuid) -> Result<GroupHistory> {
        self.history().snapshot_group(group_id)
    }

    fn list_history(&self, group_id: Uuid) -> Result<Vec<GroupHistory>> {
        self.history().list_for_group(group_id)
    }

    fn list_history_for_acronym(&self, acronym: &str) -> Result<Vec<GroupHistory>> {
        self.history().list_for_acronym(acronym)
    }

    fn list_role_history(&self, group_history_id: Uuid) -> Result<Vec<RoleHistory>> {
        self.history().roles_for(group_history_id)
    }
}

impl MilestoneRepository for Database {
    fn add_milestone(&self, milestone: &GroupMilestone) -> Result<()> {
        self.milestones().add(milestone)
    }

    fn update_milestone(&self, milestone: &GroupMilestone) -> Result<()> {
        self.milestones().update(milestone)
    }

    fn mark_milestone_done(&self, milestone_id: Uuid, done_date: NaiveDate) -> Result<()> {
        self.milestones().mark_done(milestone_id, done_date)
    }

    fn list_milestones(&self, group_id: Uuid) -> Result<Vec<GroupMilestone>> {
        self.milestones().list_for_group(group_id)
    }
}

impl EventRepository for Database {
    fn append_event(&self, event: &NewGroupEvent) -> Result<GroupEvent> {
        self.events().append(event)
    }

    fn latest_event(
        &self,
        group_id: Uuid,
        event_type: Option<GroupEventType>,
    ) -> Result<Option<GroupEvent>> {
        self.events().latest_for_group(group_id, event_type)
    }

    fn list_events(&self, group_id: Uuid) -> Result<Vec<GroupEvent>> {
        self.events().list_for_group(group_id)
    }

    fn list_event_info(&self, group_id: Uuid) -> Result<Vec<EventInfo>> {
        self.events().list_info_for_group(group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupType;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_schema() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("gavel.db")).unwrap();
        assert!(db.schema_version() >= 1);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gavel.db");

        let group = Group::new(
            "Transport".to_string(),
            "tsvwg".to_string(),
            GroupType::WorkingGroup,
        );
        {
            let db = Database::open(&path).unwrap();
            db.groups().create(&group).unwrap();
        }

        let db = Database::open(&path).unwrap();
        let found = db.groups().find_by_acronym("tsvwg").unwrap().unwrap();
        assert_eq!(found.id, group.id);
    }

    #[test]
    fn test_storage_trait_object_usable() {
        let db = Database::open_in_memory().unwrap();
        let storage: &dyn Storage = &db;

        let group = Group::new("Ops Area".to_string(), "ops".to_string(), GroupType::Area);
        storage.create_group(&group).unwrap();
        let hist = storage.snapshot_group(group.id).unwrap();
        assert_eq!(hist.acronym, "ops");
    }
}
