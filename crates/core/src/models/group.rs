//! Group model - the live, mutable group record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GroupState, GroupType};

/// A live organizational group (working group, committee, area)
///
/// Groups form a forest through `parent_id`; the acronym is unique and is
/// the stable handle for the group's history lineage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    /// When the record last changed
    pub time: DateTime<Utc>,
    pub name: String,
    pub acronym: String,
    pub state: GroupState,
    pub group_type: GroupType,
    /// Parent group, by identifier (no cyclic object graph)
    pub parent_id: Option<Uuid>,
    /// Responsible person (area director)
    pub ad_id: Option<Uuid>,
    pub list_email: String,
    pub list_subscribe: String,
    pub list_archive: String,
    pub comments: String,
    /// Charter document in the external document registry.
    /// Kept canonically here and never copied into history.
    pub charter_doc_id: Option<Uuid>,
}

impl Group {
    pub fn new(name: String, acronym: String, group_type: GroupType) -> Self {
        Self {
            id: Uuid::new_v4(),
            time: Utc::now(),
            name,
            acronym,
            state: GroupState::Proposed,
            group_type,
            parent_id: None,
            ad_id: None,
            list_email: String::new(),
            list_subscribe: String::new(),
            list_archive: String::new(),
            comments: String::new(),
            charter_doc_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_ad(mut self, ad_id: Uuid) -> Self {
        self.ad_id = Some(ad_id);
        self
    }

    pub fn with_charter(mut self, charter_doc_id: Uuid) -> Self {
        self.charter_doc_id = Some(charter_doc_id);
        self
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
