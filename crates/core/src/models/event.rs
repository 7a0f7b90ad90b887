//! Audit-log events for group actions
//!
//! Append-only record of who did what to a group and when. Event ids are
//! assigned by storage as a monotonic integer so (time, id) orders events
//! deterministically even within the same instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GroupEventType;

/// A persisted audit event for a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEvent {
    /// Storage-assigned, monotonically increasing
    pub id: i64,
    pub group_id: Uuid,
    /// When the event happened
    pub time: DateTime<Utc>,
    pub event_type: GroupEventType,
    /// Person who performed the action
    pub by: Uuid,
    pub description: String,
}

/// An audit event with its actor resolved, for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInfo {
    pub event_id: i64,
    pub by_name: String,
    pub time: DateTime<Utc>,
    pub event_type: GroupEventType,
    pub description: String,
}

impl std::fmt::Display for EventInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} at {}",
            self.by_name,
            self.event_type.display_name().to_lowercase(),
            self.time
        )
    }
}

/// An audit event not yet persisted (no id until appended)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroupEvent {
    pub group_id: Uuid,
    pub time: DateTime<Utc>,
    pub event_type: GroupEventType,
    pub by: Uuid,
    pub description: String,
}

impl NewGroupEvent {
    pub fn new(group_id: Uuid, by: Uuid, event_type: GroupEventType, description: String) -> Self {
        Self {
            group_id,
            time: Utc::now(),
            event_type,
            by,
            description,
        }
    }

    /// Override the event time (imports, tests)
    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }
}
