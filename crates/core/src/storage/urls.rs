//! Group URL storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::parse_uuid;
use crate::error::Result;
use crate::models::GroupUrl;

pub struct UrlStore<'a> {
    conn: &'a Connection,
}

impl<'a> UrlStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Add a named link to a group
    #[instrument(skip(self, url), fields(group_id = %url.group_id, name = %url.name))]
    pub fn add(&self, url: &GroupUrl) -> Result<()> {
        self.conn.execute(
            "INSERT INTO group_urls (id, group_id, name, url) VALUES (?1, ?2, ?3, ?4)",
            params![
                url.id.to_string(),
                url.group_id.to_string(),
                url.name,
                url.url,
            ],
        )?;
        Ok(())
    }

    /// Remove a link
    #[instrument(skip(self))]
    pub fn remove(&self, url_id: Uuid) -> Result<()> {
        self.conn.execute(
            "DELETE FROM group_urls WHERE id = ?1",
            params![url_id.to_string()],
        )?;
        Ok(())
    }

    /// List a group's links
    #[instrument(skip(self))]
    pub fn list_for_group(&self, group_id: Uuid) -> Result<Vec<GroupUrl>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, group_id, name, url FROM group_urls
             WHERE group_id = ?1 ORDER BY name",
        )?;

        let urls = stmt
            .query_map(params![group_id.to_string()], |row| {
                Ok(GroupUrl {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    group_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    name: row.get(2)?,
                    url: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(urls)
    }
}
