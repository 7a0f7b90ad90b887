//! Data models for Gavel

mod event;
mod group;
mod history;
mod milestone;
mod names;
mod person;
mod role;
mod url;

pub use event::*;
pub use group::*;
pub use history::*;
pub use milestone::*;
pub use names::*;
pub use person::*;
pub use role::*;
pub use url::*;
