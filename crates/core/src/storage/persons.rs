//! Person and email storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{Email, Person};

pub struct PersonStore<'a> {
    conn: &'a Connection,
}

impl<'a> PersonStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new person
    #[instrument(skip(self, person), fields(person_name = %person.name))]
    pub fn create(&self, person: &Person) -> Result<()> {
        self.conn.execute(
            "INSERT INTO persons (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![
                person.id.to_string(),
                person.name,
                person.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find person by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Person>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM persons WHERE id = ?1")?;

        let person = stmt
            .query_row(params![id.to_string()], |row| {
                Ok(Person {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                    created_at: parse_datetime(&row.get::<_, String>(2)?)?,
                })
            })
            .optional()?;

        Ok(person)
    }

    /// Register an email address for a person
    #[instrument(skip(self, email), fields(address = %email.address))]
    pub fn add_email(&self, email: &Email) -> Result<()> {
        self.conn.execute(
            "INSERT INTO emails (address, person_id, active) VALUES (?1, ?2, ?3)",
            params![
                email.address,
                email.person_id.to_string(),
                email.active as i32,
            ],
        )?;
        Ok(())
    }

    /// Find an email record by address
    #[instrument(skip(self))]
    pub fn find_email(&self, address: &str) -> Result<Option<Email>> {
        let mut stmt = self
            .conn
            .prepare("SELECT address, person_id, active FROM emails WHERE address = ?1")?;

        let email = stmt
            .query_row(params![address], |row| {
                Ok(Email {
                    address: row.get(0)?,
                    person_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    active: row.get::<_, i32>(2)? != 0,
                })
            })
            .optional()?;

        Ok(email)
    }

    /// List a person's email addresses
    #[instrument(skip(self))]
    pub fn list_emails(&self, person_id: Uuid) -> Result<Vec<Email>> {
        let mut stmt = self.conn.prepare(
            "SELECT address, person_id, active FROM emails WHERE person_id = ?1 ORDER BY address",
        )?;

        let emails = stmt
            .query_map(params![person_id.to_string()], |row| {
                Ok(Email {
                    address: row.get(0)?,
                    person_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    active: row.get::<_, i32>(2)? != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(emails)
    }

    /// Resolve an email address to the person's display name
    #[instrument(skip(self))]
    pub fn name_for_email(&self, address: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.name FROM emails e
             INNER JOIN persons p ON p.id = e.person_id
             WHERE e.address = ?1",
        )?;

        let name = stmt
            .query_row(params![address], |row| row.get(0))
            .optional()?;

        Ok(name)
    }
}
