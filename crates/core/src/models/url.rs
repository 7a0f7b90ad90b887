//! Named external links for a group

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named external link attached to a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupUrl {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    pub url: String,
}

impl GroupUrl {
    pub fn new(group_id: Uuid, name: String, url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            name,
            url,
        }
    }
}
