//! Database migration system
//!
//! Tracks schema versions and applies migrations in order.

use rusqlite::Connection;
use tracing::{info, instrument};

use crate::error::Result;

/// A database migration
pub struct Migration {
    /// Version number (must be sequential starting from 1)
    pub version: u32,
    /// Description of what this migration does
    pub description: &'static str,
    /// SQL to run for this migration
    pub sql: &'static str,
}

/// All migrations in order
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema",
        sql: r#"
            -- Persons table (identity reference records)
            CREATE TABLE IF NOT EXISTS persons (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            -- Emails table; the address is how roles bind people to groups
            CREATE TABLE IF NOT EXISTS emails (
                address TEXT PRIMARY KEY,
                person_id TEXT NOT NULL,
                active INTEGER NOT NULL DEFAULT 1,
                FOREIGN KEY (person_id) REFERENCES persons(id) ON DELETE CASCADE
            );

            -- Groups table (live records)
            CREATE TABLE IF NOT EXISTS groups (
                id TEXT PRIMARY KEY,
                time TEXT NOT NULL,
                name TEXT NOT NULL CHECK (length(name) <= 80),
                acronym TEXT NOT NULL UNIQUE CHECK (length(acronym) <= 16),
                state TEXT NOT NULL,
                type TEXT NOT NULL,
                parent_id TEXT,
                ad_id TEXT,
                list_email TEXT NOT NULL DEFAULT '',
                list_subscribe TEXT NOT NULL DEFAULT '',
                list_archive TEXT NOT NULL DEFAULT '',
                comments TEXT NOT NULL DEFAULT '',
                charter_doc_id TEXT,
                FOREIGN KEY (parent_id) REFERENCES groups(id),
                FOREIGN KEY (ad_id) REFERENCES persons(id)
            );

            -- Group history table (immutable snapshots, no charter column)
            -- parent_id and ad_id are plain copied identifiers: history rows
            -- must stay valid whatever later happens to the referents
            CREATE TABLE IF NOT EXISTS group_history (
                id TEXT PRIMARY KEY,
                group_id TEXT NOT NULL,
                time TEXT NOT NULL,
                name TEXT NOT NULL CHECK (length(name) <= 80),
                acronym TEXT NOT NULL CHECK (length(acronym) <= 16),
                state TEXT NOT NULL,
                type TEXT NOT NULL,
                parent_id TEXT,
                ad_id TEXT,
                list_email TEXT NOT NULL DEFAULT '',
                list_subscribe TEXT NOT NULL DEFAULT '',
                list_archive TEXT NOT NULL DEFAULT '',
                comments TEXT NOT NULL DEFAULT '',
                FOREIGN KEY (group_id) REFERENCES groups(id) ON DELETE CASCADE
            );

            -- Roles table (live role assignments)
            CREATE TABLE IF NOT EXISTS roles (
                id TEXT PRIMARY KEY,
                group_id TEXT NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                FOREIGN KEY (group_id) REFERENCES groups(id) ON DELETE CASCADE,
                FOREIGN KEY (email) REFERENCES emails(address),
                UNIQUE(group_id, name, email)
            );

            -- Role history table; rows exist only under a group_history row
            CREATE TABLE IF NOT EXISTS role_history (
                id TEXT PRIMARY KEY,
                group_history_id TEXT NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                FOREIGN KEY (group_history_id) REFERENCES group_history(id) ON DELETE CASCADE
            );

            -- Group URLs table
            CREATE TABLE IF NOT EXISTS group_urls (
                id TEXT PRIMARY KEY,
                group_id TEXT NOT NULL,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                FOREIGN KEY (group_id) REFERENCES groups(id) ON DELETE CASCADE
            );

            -- Group milestones table
            CREATE TABLE IF NOT EXISTS group_milestones (
                id TEXT PRIMARY KEY,
                group_id TEXT NOT NULL,
                description TEXT NOT NULL,
                expected_due_date TEXT NOT NULL,
                done INTEGER NOT NULL DEFAULT 0,
                done_date TEXT,
                time TEXT NOT NULL,
                FOREIGN KEY (group_id) REFERENCES groups(id) ON DELETE CASCADE
            );

            -- Group events table; integer id gives deterministic ordering
            -- within a single timestamp
            CREATE TABLE IF NOT EXISTS group_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                group_id TEXT NOT NULL,
                time TEXT NOT NULL,
                type TEXT NOT NULL,
                by_person TEXT NOT NULL,
                description TEXT NOT NULL,
                FOREIGN KEY (group_id) REFERENCES groups(id) ON DELETE CASCADE,
                FOREIGN KEY (by_person) REFERENCES persons(id)
            );
        "#,
    },
    Migration {
        version: 2,
        description: "Add indexes for query performance",
        sql: r#"
            -- Email indexes
            CREATE INDEX IF NOT EXISTS idx_emails_person ON emails(person_id);

            -- Group indexes
            CREATE INDEX IF NOT EXISTS idx_groups_parent ON groups(parent_id);
            CREATE INDEX IF NOT EXISTS idx_groups_state ON groups(state);

            -- History indexes; lineage is looked up by group or by acronym
            CREATE INDEX IF NOT EXISTS idx_group_history_group ON group_history(group_id, time);
            CREATE INDEX IF NOT EXISTS idx_group_history_acronym ON group_history(acronym);
            CREATE INDEX IF NOT EXISTS idx_role_history_history ON role_history(group_history_id);

            -- Role indexes
            CREATE INDEX IF NOT EXISTS idx_roles_group ON roles(group_id);
            CREATE INDEX IF NOT EXISTS idx_roles_email ON roles(email);

            -- URL and milestone indexes
            CREATE INDEX IF NOT EXISTS idx_group_urls_group ON group_urls(group_id);
            CREATE INDEX IF NOT EXISTS idx_milestones_due ON group_milestones(group_id, expected_due_date);

            -- Event index for latest-event queries
            CREATE INDEX IF NOT EXISTS idx_events_group_time ON group_events(group_id, time, id);
        "#,
    },
];

/// Initialize the migrations table
fn init_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version
fn get_current_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })
        .unwrap_or(None);
    Ok(version.unwrap_or(0))
}

/// Record that a migration was applied
fn record_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            migration.version,
            migration.description,
            chrono::Utc::now().to_rfc3339()
        ],
    )?;
    Ok(())
}

/// Run all pending migrations
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    init_migrations_table(conn)?;

    let current_version = get_current_version(conn)?;
    info!(current_version, "Checking for pending migrations");

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                description = migration.description,
                "Applying migration"
            );

            conn.execute_batch(migration.sql)?;
            record_migration(conn, migration)?;

            info!(version = migration.version, "Migration complete");
        }
    }

    let new_version = get_current_version(conn)?;
    if new_version > current_version {
        info!(
            from = current_version,
            to = new_version,
            "Database schema updated"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Get the latest migration version (test helper)
    fn latest_version() -> u32 {
        MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
    }

    #[test]
    fn test_migrations_run() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let version = get_current_version(&conn).unwrap();
        assert_eq!(version, latest_version());
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // Run twice
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version = get_current_version(&conn).unwrap();
        assert_eq!(version, latest_version());
    }

    #[test]
    fn test_migrations_sequential() {
        // Verify migrations are numbered sequentially
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(
                migration.version as usize,
                i + 1,
                "Migration {} should have version {}",
                migration.description,
                i + 1
            );
        }
    }
}
