//! Gavel Core Library
//!
//! Group registry data model, history snapshots, and storage for the Gavel
//! standards tracker.

pub mod error;
pub mod invariants;
pub mod models;
pub mod storage;

pub use error::{Error, Result};
pub use models::*;
pub use storage::{
    Database, EventRepository, EventStore, GroupRepository, GroupStore, HistoryRepository,
    HistoryStore, MilestoneRepository, MilestoneStore, PersonRepository, PersonStore, RoleStore,
    Storage, UrlStore,
};
