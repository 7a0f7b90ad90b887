//! Role storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_role_name, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{Role, RoleInfo, RoleName};

pub struct RoleStore<'a> {
    conn: &'a Connection,
}

impl<'a> RoleStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Add a role assignment
    #[instrument(skip(self, role), fields(group_id = %role.group_id, name = %role.name))]
    pub fn add(&self, role: &Role) -> Result<()> {
        self.conn.execute(
            "INSERT INTO roles (id, group_id, name, email) VALUES (?1, ?2, ?3, ?4)",
            params![
                role.id.to_string(),
                role.group_id.to_string(),
                role.name.as_str(),
                role.email,
            ],
        )?;
        Ok(())
    }

    /// Find a role by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Role>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, group_id, name, email FROM roles WHERE id = ?1")?;

        let role = stmt
            .query_row(params![id.to_string()], |row| {
                Ok(Role {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    group_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    name: parse_role_name(&row.get::<_, String>(2)?)?,
                    email: row.get(3)?,
                })
            })
            .optional()?;

        Ok(role)
    }

    /// Remove a role assignment
    #[instrument(skip(self))]
    pub fn remove(&self, role_id: Uuid) -> Result<()> {
        self.conn.execute(
            "DELETE FROM roles WHERE id = ?1",
            params![role_id.to_string()],
        )?;
        Ok(())
    }

    /// List current role assignments for a group
    #[instrument(skip(self))]
    pub fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Role>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, group_id, name, email FROM roles
             WHERE group_id = ?1 ORDER BY name, email",
        )?;

        let roles = stmt
            .query_map(params![group_id.to_string()], |row| {
                Ok(Role {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    group_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    name: parse_role_name(&row.get::<_, String>(2)?)?,
                    email: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(roles)
    }

    /// List roles for a group with person and group info for display
    #[instrument(skip(self))]
    pub fn list_info_for_group(&self, group_id: Uuid) -> Result<Vec<RoleInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.id, p.id, p.name, r.email, r.name, g.acronym
             FROM roles r
             INNER JOIN emails e ON e.address = r.email
             INNER JOIN persons p ON p.id = e.person_id
             INNER JOIN groups g ON g.id = r.group_id
             WHERE r.group_id = ?1
             ORDER BY r.name, p.name",
        )?;

        let roles = stmt
            .query_map(params![group_id.to_string()], |row| {
                Ok(RoleInfo {
                    role_id: parse_uuid(&row.get::<_, String>(0)?)?,
                    person_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    person_name: row.get(2)?,
                    email: row.get(3)?,
                    name: parse_role_name(&row.get::<_, String>(4)?)?,
                    group_acronym: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(roles)
    }

    /// Count role assignments for a group
    #[instrument(skip(self))]
    pub fn count_for_group(&self, group_id: Uuid) -> Result<u64> {
        let count: u64 = self.conn.query_row(
            "SELECT COUNT(*) FROM roles WHERE group_id = ?1",
            params![group_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// List role assignments held through an email address
    #[instrument(skip(self))]
    pub fn list_for_email(&self, email: &str) -> Result<Vec<Role>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, group_id, name, email FROM roles WHERE email = ?1 ORDER BY name",
        )?;

        let roles = stmt
            .query_map(params![email], |row| {
                Ok(Role {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    group_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    name: parse_role_name(&row.get::<_, String>(2)?)?,
                    email: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Email, Group, GroupType, Person};
    use crate::storage::Database;

    fn seed(db: &Database) -> (Person, Group) {
        let person = Person::new("Jane Doe".to_string());
        db.persons().create(&person).unwrap();
        db.persons()
            .add_email(&Email::new("jane@example.org".to_string(), person.id))
            .unwrap();

        let group = Group::new(
            "Session Initiation".to_string(),
            "sipcore".to_string(),
            GroupType::WorkingGroup,
        );
        db.groups().create(&group).unwrap();
        (person, group)
    }

    #[test]
    fn test_add_list_remove() {
        let db = Database::open_in_memory().unwrap();
        let (_, group) = seed(&db);

        let role = Role::new(group.id, RoleName::Chair, "jane@example.org".to_string());
        db.roles().add(&role).unwrap();
        assert_eq!(db.roles().count_for_group(group.id).unwrap(), 1);

        let listed = db.roles().list_for_group(group.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, RoleName::Chair);
        assert_eq!(listed[0].email, "jane@example.org");

        db.roles().remove(role.id).unwrap();
        assert_eq!(db.roles().count_for_group(group.id).unwrap(), 0);
    }

    #[test]
    fn test_find_by_id() {
        let db = Database::open_in_memory().unwrap();
        let (_, group) = seed(&db);

        let role = Role::new(group.id, RoleName::Editor, "jane@example.org".to_string());
        db.roles().add(&role).unwrap();

        let found = db.roles().find_by_id(role.id).unwrap().unwrap();
        assert_eq!(found.group_id, group.id);
        assert_eq!(found.name, RoleName::Editor);
        assert_eq!(found.email, "jane@example.org");
        assert!(db.roles().find_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_list_for_email_spans_groups() {
        let db = Database::open_in_memory().unwrap();
        let (_, group) = seed(&db);
        let other = Group::new(
            "Core Parameters".to_string(),
            "core".to_string(),
            GroupType::WorkingGroup,
        );
        db.groups().create(&other).unwrap();

        db.roles()
            .add(&Role::new(group.id, RoleName::Chair, "jane@example.org".to_string()))
            .unwrap();
        db.roles()
            .add(&Role::new(other.id, RoleName::Secretary, "jane@example.org".to_string()))
            .unwrap();

        let held = db.roles().list_for_email("jane@example.org").unwrap();
        assert_eq!(held.len(), 2);
        // Ordered by role name
        assert_eq!(held[0].name, RoleName::Chair);
        assert_eq!(held[1].name, RoleName::Secretary);
        assert!(db.roles().list_for_email("nobody@example.org").unwrap().is_empty());
    }

    #[test]
    fn test_role_requires_known_email() {
        let db = Database::open_in_memory().unwrap();
        let (_, group) = seed(&db);

        let role = Role::new(group.id, RoleName::Chair, "stranger@example.org".to_string());
        assert!(db.roles().add(&role).is_err());
    }

    #[test]
    fn test_role_info_display() {
        let db = Database::open_in_memory().unwrap();
        let (_, group) = seed(&db);

        db.roles()
            .add(&Role::new(group.id, RoleName::Chair, "jane@example.org".to_string()))
            .unwrap();

        let info = db.roles().list_info_for_group(group.id).unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].to_string(), "Jane Doe is Chair in sipcore");
    }
}
