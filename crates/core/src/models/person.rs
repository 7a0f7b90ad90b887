//! Person and email reference records
//!
//! Identity lives in its own registry; these are the minimal records roles
//! and events hold foreign keys into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person known to the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Person {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        }
    }
}

/// An email address belonging to a person
///
/// The address itself is the key; roles bind people to groups through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub address: String,
    pub person_id: Uuid,
    pub active: bool,
}

impl Email {
    pub fn new(address: String, person_id: Uuid) -> Self {
        Self {
            address,
            person_id,
            active: true,
        }
    }
}
