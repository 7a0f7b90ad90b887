//! Group event storage operations
//!
//! The audit log is append-only; ordering is (time, id) descending, with
//! the storage-assigned integer id breaking ties within one timestamp.

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_event_type, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{EventInfo, GroupEvent, GroupEventType, NewGroupEvent};

fn event_from_row(row: &Row<'_>) -> std::result::Result<GroupEvent, rusqlite::Error> {
    Ok(GroupEvent {
        id: row.get(0)?,
        group_id: parse_uuid(&row.get::<_, String>(1)?)?,
        time: parse_datetime(&row.get::<_, String>(2)?)?,
        event_type: parse_event_type(&row.get::<_, String>(3)?)?,
        by: parse_uuid(&row.get::<_, String>(4)?)?,
        description: row.get(5)?,
    })
}

pub struct EventStore<'a> {
    conn: &'a Connection,
}

impl<'a> EventStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Append an event, returning the persisted row with its assigned id
    #[instrument(skip(self, event), fields(group_id = %event.group_id, event_type = %event.event_type))]
    pub fn append(&self, event: &NewGroupEvent) -> Result<GroupEvent> {
        self.conn.execute(
            "INSERT INTO group_events (group_id, time, type, by_person, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.group_id.to_string(),
                event.time.to_rfc3339(),
                event.event_type.as_str(),
                event.by.to_string(),
                event.description,
            ],
        )?;

        Ok(GroupEvent {
            id: self.conn.last_insert_rowid(),
            group_id: event.group_id,
            time: event.time,
            event_type: event.event_type,
            by: event.by,
            description: event.description.clone(),
        })
    }

    /// Latest event for a group: the maximum (time, id) row, optionally
    /// restricted to one event type
    #[instrument(skip(self))]
    pub fn latest_for_group(
        &self,
        group_id: Uuid,
        event_type: Option<GroupEventType>,
    ) -> Result<Option<GroupEvent>> {
        let event = match event_type {
            Some(t) => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, group_id, time, type, by_person, description
                     FROM group_events WHERE group_id = ?1 AND type = ?2
                     ORDER BY time DESC, id DESC LIMIT 1",
                )?;
                stmt.query_row(params![group_id.to_string(), t.as_str()], event_from_row)
                    .optional()?
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, group_id, time, type, by_person, description
                     FROM group_events WHERE group_id = ?1
                     ORDER BY time DESC, id DESC LIMIT 1",
                )?;
                stmt.query_row(params![group_id.to_string()], event_from_row)
                    .optional()?
            }
        };

        Ok(event)
    }

    /// List a group's events with the actor resolved, newest first
    #[instrument(skip(self))]
    pub fn list_info_for_group(&self, group_id: Uuid) -> Result<Vec<EventInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, p.name, e.time, e.type, e.description
             FROM group_events e
             INNER JOIN persons p ON p.id = e.by_person
             WHERE e.group_id = ?1
             ORDER BY e.time DESC, e.id DESC",
        )?;

        let events = stmt
            .query_map(params![group_id.to_string()], |row| {
                Ok(EventInfo {
                    event_id: row.get(0)?,
                    by_name: row.get(1)?,
                    time: parse_datetime(&row.get::<_, String>(2)?)?,
                    event_type: parse_event_type(&row.get::<_, String>(3)?)?,
                    description: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// List a group's events, newest first
    #[instrument(skip(self))]
    pub fn list_for_group(&self, group_id: Uuid) -> Result<Vec<GroupEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, group_id, time, type, by_person, description
             FROM group_events WHERE group_id = ?1
             ORDER BY time DESC, id DESC",
        )?;

        let events = stmt
            .query_map(params![group_id.to_string()], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, GroupType, Person};
    use crate::storage::Database;
    use chrono::{Duration, Utc};

    fn seed(db: &Database) -> (Person, Group) {
        let person = Person::new("Olaf Operator".to_string());
        db.persons().create(&person).unwrap();
        let group = Group::new(
            "Measurement".to_string(),
            "ippm".to_string(),
            GroupType::WorkingGroup,
        );
        db.groups().create(&group).unwrap();
        (person, group)
    }

    #[test]
    fn test_latest_is_max_time_then_id() {
        let db = Database::open_in_memory().unwrap();
        let (person, group) = seed(&db);
        let base = Utc::now();

        db.events()
            .append(
                &NewGroupEvent::new(
                    group.id,
                    person.id,
                    GroupEventType::Proposed,
                    "Proposed group".to_string(),
                )
                .at(base - Duration::days(2)),
            )
            .unwrap();
        let started = db
            .events()
            .append(
                &NewGroupEvent::new(
                    group.id,
                    person.id,
                    GroupEventType::Started,
                    "Started group".to_string(),
                )
                .at(base),
            )
            .unwrap();
        // Same timestamp: the higher id wins
        let comment = db
            .events()
            .append(
                &NewGroupEvent::new(
                    group.id,
                    person.id,
                    GroupEventType::AddedComment,
                    "minutes approved".to_string(),
                )
                .at(base),
            )
            .unwrap();
        assert!(comment.id > started.id);

        let latest = db.events().latest_for_group(group.id, None).unwrap().unwrap();
        assert_eq!(latest.id, comment.id);
        assert_eq!(latest.event_type, GroupEventType::AddedComment);
    }

    #[test]
    fn test_latest_with_type_filter() {
        let db = Database::open_in_memory().unwrap();
        let (person, group) = seed(&db);
        let base = Utc::now();

        db.events()
            .append(
                &NewGroupEvent::new(
                    group.id,
                    person.id,
                    GroupEventType::Started,
                    "Started group".to_string(),
                )
                .at(base - Duration::days(1)),
            )
            .unwrap();
        db.events()
            .append(
                &NewGroupEvent::new(
                    group.id,
                    person.id,
                    GroupEventType::InfoChanged,
                    "new chair".to_string(),
                )
                .at(base),
            )
            .unwrap();

        let latest_started = db
            .events()
            .latest_for_group(group.id, Some(GroupEventType::Started))
            .unwrap()
            .unwrap();
        assert_eq!(latest_started.event_type, GroupEventType::Started);
        assert_eq!(latest_started.description, "Started group");

        let none = db
            .events()
            .latest_for_group(group.id, Some(GroupEventType::Concluded))
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_event_info_display() {
        let db = Database::open_in_memory().unwrap();
        let (person, group) = seed(&db);

        let event = db
            .events()
            .append(&NewGroupEvent::new(
                group.id,
                person.id,
                GroupEventType::AddedComment,
                "minutes approved".to_string(),
            ))
            .unwrap();

        let info = db.events().list_info_for_group(group.id).unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].event_id, event.id);
        assert_eq!(info[0].by_name, "Olaf Operator");
        assert_eq!(
            info[0].to_string(),
            format!("Olaf Operator added comment at {}", event.time)
        );
    }

    #[test]
    fn test_list_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let (person, group) = seed(&db);
        let base = Utc::now();

        for (i, description) in ["first", "second", "third"].iter().enumerate() {
            db.events()
                .append(
                    &NewGroupEvent::new(
                        group.id,
                        person.id,
                        GroupEventType::AddedComment,
                        (*description).to_string(),
                    )
                    .at(base + Duration::seconds(i as i64)),
                )
                .unwrap();
        }

        let events = db.events().list_for_group(group.id).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].description, "third");
        assert_eq!(events[2].description, "first");
    }
}
