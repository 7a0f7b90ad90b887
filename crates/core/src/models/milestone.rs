//! Milestone model - planned deliverables with due dates

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A planned deliverable for a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMilestone {
    pub id: Uuid,
    pub group_id: Uuid,
    pub description: String,
    pub expected_due_date: NaiveDate,
    pub done: bool,
    pub done_date: Option<NaiveDate>,
    /// When the record last changed
    pub time: DateTime<Utc>,
}

impl GroupMilestone {
    pub fn new(group_id: Uuid, description: String, expected_due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            description,
            expected_due_date,
            done: false,
            done_date: None,
            time: Utc::now(),
        }
    }

    /// Mark the milestone completed on the given date
    pub fn complete(&mut self, done_date: NaiveDate) {
        self.done = true;
        self.done_date = Some(done_date);
        self.time = Utc::now();
    }

    /// Short display form: the first 20 characters of the description
    /// followed by an ellipsis marker.
    pub fn summary(&self) -> String {
        let head: String = self.description.chars().take(20).collect();
        format!("{head}...")
    }
}

impl std::fmt::Display for GroupMilestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}
