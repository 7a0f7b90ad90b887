//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use uuid::Uuid;

use crate::models::{Group, GroupHistory, RoleHistory};

/// Validate that a group's state is internally consistent
pub fn assert_group_invariants(group: &Group) {
    // Name and acronym must not be empty
    debug_assert!(
        !group.name.trim().is_empty(),
        "Group {} has empty name",
        group.id
    );

    debug_assert!(
        !group.acronym.trim().is_empty(),
        "Group {} has empty acronym",
        group.id
    );

    // A group cannot be its own parent
    debug_assert!(
        group.parent_id != Some(group.id),
        "Group {} is its own parent",
        group.id
    );
}

/// Validate that a snapshot is consistent with its role-history set
pub fn assert_snapshot_invariants(history: &GroupHistory, roles: &[RoleHistory]) {
    debug_assert!(
        history.group_id != Uuid::nil(),
        "GroupHistory {} has nil group_id",
        history.id
    );

    // Every role snapshot must belong to this history row
    for role in roles {
        debug_assert!(
            role.group_history_id == history.id,
            "RoleHistory {} belongs to {}, not {}",
            role.id,
            role.group_history_id,
            history.id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupType, Role, RoleName};

    #[test]
    fn test_consistent_group_passes() {
        let group = Group::new(
            "Naming Things".to_string(),
            "name".to_string(),
            GroupType::WorkingGroup,
        );
        assert_group_invariants(&group);
    }

    #[test]
    fn test_consistent_snapshot_passes() {
        let group = Group::new(
            "Naming Things".to_string(),
            "name".to_string(),
            GroupType::WorkingGroup,
        );
        let history = GroupHistory::from_group(&group);
        let role = Role::new(group.id, RoleName::Chair, "chair@example.org".to_string());
        let roles = vec![RoleHistory::from_role(&role, history.id)];
        assert_snapshot_invariants(&history, &roles);
    }

    #[test]
    #[should_panic(expected = "is its own parent")]
    #[cfg(debug_assertions)]
    fn test_self_parent_panics() {
        let mut group = Group::new(
            "Loop".to_string(),
            "loop".to_string(),
            GroupType::WorkingGroup,
        );
        group.parent_id = Some(group.id);
        assert_group_invariants(&group);
    }
}
