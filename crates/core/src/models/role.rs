//! Role model - a person's assignment to a named role within a group

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RoleName;

/// A named responsibility held within a live group
///
/// The binding is through an email address; the person sits behind it in
/// the identity records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: RoleName,
    /// Email address used by the person for this role
    pub email: String,
}

impl Role {
    pub fn new(group_id: Uuid, name: RoleName, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            name,
            email,
        }
    }
}

/// A role with its person and group resolved, for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleInfo {
    pub role_id: Uuid,
    pub person_id: Uuid,
    pub person_name: String,
    pub email: String,
    pub name: RoleName,
    pub group_acronym: String,
}

impl std::fmt::Display for RoleInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is {} in {}",
            self.person_name, self.name, self.group_acronym
        )
    }
}
