//! Storage repository traits
//!
//! These traits define the storage interface, allowing for different
//! implementations (SQLite, mock, future server backend).

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Email, EventInfo, Group, GroupEvent, GroupEventType, GroupHistory, GroupMilestone, GroupState,
    GroupUrl, NewGroupEvent, Person, Role, RoleHistory, RoleInfo,
};

/// Person and email reference-record operations
pub trait PersonRepository {
    /// Create a new person
    fn create_person(&self, person: &Person) -> Result<()>;

    /// Find person by ID
    fn find_person_by_id(&self, id: Uuid) -> Result<Option<Person>>;

    /// Register an email address for a person
    fn add_email(&self, email: &Email) -> Result<()>;

    /// Resolve an email address to a person's display name
    fn name_for_email(&self, address: &str) -> Result<Option<String>>;
}

/// Group repository operations, including role assignments and links
pub trait GroupRepository {
    /// Create a new group
    fn create_group(&self, group: &Group) -> Result<()>;

    /// Find group by ID
    fn find_group_by_id(&self, id: Uuid) -> Result<Option<Group>>;

    /// Find group by acronym
    fn find_group_by_acronym(&self, acronym: &str) -> Result<Option<Group>>;

    /// Update a group
    fn update_group(&self, group: &Group) -> Result<()>;

    /// Delete a group and its owned rows
    fn delete_group(&self, group_id: Uuid) -> Result<()>;

    /// List direct children of a group
    fn list_children(&self, parent_id: Uuid) -> Result<Vec<Group>>;

    /// List groups in a given state
    fn list_groups_by_state(&self, state: GroupState) -> Result<Vec<Group>>;

    /// Add a role assignment
    fn add_role(&self, role: &Role) -> Result<()>;

    /// Remove a role assignment
    fn remove_role(&self, role_id: Uuid) -> Result<()>;

    /// List current role assignments for a group
    fn list_roles(&self, group_id: Uuid) -> Result<Vec<Role>>;

    /// List roles with person and group info for display
    fn list_role_info(&self, group_id: Uuid) -> Result<Vec<RoleInfo>>;

    /// Add a named link to a group
    fn add_url(&self, url: &GroupUrl) -> Result<()>;

    /// Remove a link
    fn remove_url(&self, url_id: Uuid) -> Result<()>;

    /// List a group's links
    fn list_urls(&self, group_id: Uuid) -> Result<Vec<GroupUrl>>;
}

/// History repository operations
pub trait HistoryRepository {
    /// Snapshot a live group plus its role set into history
    fn snapshot_group(&self, group_id: Uuid) -> Result<GroupHistory>;

    /// List a group's history, newest first
    fn list_history(&self, group_id: Uuid) -> Result<Vec<GroupHistory>>;

    /// List history by acronym, newest first
    fn list_history_for_acronym(&self, acronym: &str) -> Result<Vec<GroupHistory>>;

    /// List the role snapshots belonging to a history row
    fn list_role_history(&self, group_history_id: Uuid) -> Result<Vec<RoleHistory>>;
}

/// Milestone repository operations
pub trait MilestoneRepository {
    /// Add a milestone
    fn add_milestone(&self, milestone: &GroupMilestone) -> Result<()>;

    /// Update a milestone
    fn update_milestone(&self, milestone: &GroupMilestone) -> Result<()>;

    /// Mark a milestone done on the given date
    fn mark_milestone_done(&self, milestone_id: Uuid, done_date: NaiveDate) -> Result<()>;

    /// List a group's milestones ordered by expected due date
    fn list_milestones(&self, group_id: Uuid) -> Result<Vec<GroupMilestone>>;
}

/// Event repository operations
pub trait EventRepository {
    /// Append an audit event, returning the persisted row
    fn append_event(&self, event: &NewGroupEvent) -> Result<GroupEvent>;

    /// Latest event for a group, optionally restricted to one type
    fn latest_event(
        &self,
        group_id: Uuid,
        event_type: Option<GroupEventType>,
    ) -> Result<Option<GroupEvent>>;

    /// List a group's events, newest first
    fn list_events(&self, group_id: Uuid) -> Result<Vec<GroupEvent>>;

    /// List a group's events with the actor resolved, newest first
    fn list_event_info(&self, group_id: Uuid) -> Result<Vec<EventInfo>>;
}

/// Combined storage interface
///
/// Provides access to all repository operations.
/// Implementations may be backed by SQLite, mocks, or a server.
pub trait Storage:
    PersonRepository + GroupRepository + HistoryRepository + MilestoneRepository + EventRepository
{
}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where
    T: PersonRepository + GroupRepository + HistoryRepository + MilestoneRepository + EventRepository
{
}
