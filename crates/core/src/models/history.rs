//! Historical snapshot records for groups and roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Group, GroupState, GroupType, Role, RoleName};

/// Immutable snapshot of a [`Group`]'s fields at a revision point
///
/// Carries every scalar field of the live record except the charter
/// reference, which stays canonical on the live Group. History for a
/// lineage is selected by acronym or by `group_id`, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupHistory {
    pub id: Uuid,
    /// The live group this snapshot was taken from
    pub group_id: Uuid,
    pub time: DateTime<Utc>,
    pub name: String,
    pub acronym: String,
    pub state: GroupState,
    pub group_type: GroupType,
    pub parent_id: Option<Uuid>,
    pub ad_id: Option<Uuid>,
    pub list_email: String,
    pub list_subscribe: String,
    pub list_archive: String,
    pub comments: String,
}

impl GroupHistory {
    /// Hand-enumerated copy of a live group's scalar fields.
    ///
    /// Field-by-field on purpose: adding a column to `Group` must force the
    /// decision of whether history carries it. `charter_doc_id` does not
    /// appear here.
    pub fn from_group(group: &Group) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id: group.id,
            time: group.time,
            name: group.name.clone(),
            acronym: group.acronym.clone(),
            state: group.state,
            group_type: group.group_type,
            parent_id: group.parent_id,
            ad_id: group.ad_id,
            list_email: group.list_email.clone(),
            list_subscribe: group.list_subscribe.clone(),
            list_archive: group.list_archive.clone(),
            comments: group.comments.clone(),
        }
    }
}

/// Snapshot of a [`Role`] tied to a specific [`GroupHistory`]
///
/// No timestamp of its own: a role change is always accompanied by a group
/// snapshot, so the instant lives on the owning GroupHistory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleHistory {
    pub id: Uuid,
    pub group_history_id: Uuid,
    pub name: RoleName,
    pub email: String,
}

impl RoleHistory {
    pub fn from_role(role: &Role, group_history_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_history_id,
            name: role.name,
            email: role.email.clone(),
        }
    }
}
