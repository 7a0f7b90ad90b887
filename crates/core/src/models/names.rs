//! Closed reference enumerations for group records
//!
//! These replace the lookup tables the registry used to share process-wide:
//! the sets are closed and versioned with the schema, stored as text.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupState {
    /// Birds-of-a-feather session, not yet proposed
    Bof,
    /// Proposed, awaiting approval
    Proposed,
    /// Active and producing work
    Active,
    /// Inactive but not formally closed
    Dormant,
    /// Formally closed
    Concluded,
    /// State not recorded
    Unknown,
}

impl GroupState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupState::Bof => "bof",
            GroupState::Proposed => "proposed",
            GroupState::Active => "active",
            GroupState::Dormant => "dormant",
            GroupState::Concluded => "concluded",
            GroupState::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bof" => Some(GroupState::Bof),
            "proposed" => Some(GroupState::Proposed),
            "active" => Some(GroupState::Active),
            "dormant" => Some(GroupState::Dormant),
            "concluded" => Some(GroupState::Concluded),
            "unknown" => Some(GroupState::Unknown),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GroupState::Bof => "BOF",
            GroupState::Proposed => "Proposed",
            GroupState::Active => "Active",
            GroupState::Dormant => "Dormant",
            GroupState::Concluded => "Concluded",
            GroupState::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for GroupState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Kind of organizational group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupType {
    /// Top-level area
    Area,
    /// Working group
    WorkingGroup,
    /// Research group
    ResearchGroup,
    /// Directorate or team
    Team,
    /// Individual submission container
    Individual,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Area => "area",
            GroupType::WorkingGroup => "wg",
            GroupType::ResearchGroup => "rg",
            GroupType::Team => "team",
            GroupType::Individual => "individual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "area" => Some(GroupType::Area),
            "wg" => Some(GroupType::WorkingGroup),
            "rg" => Some(GroupType::ResearchGroup),
            "team" => Some(GroupType::Team),
            "individual" => Some(GroupType::Individual),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GroupType::Area => "Area",
            GroupType::WorkingGroup => "Working Group",
            GroupType::ResearchGroup => "Research Group",
            GroupType::Team => "Team",
            GroupType::Individual => "Individual",
        }
    }
}

impl std::fmt::Display for GroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Named responsibility a person can hold within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    Chair,
    Secretary,
    Editor,
    TechAdvisor,
    AreaDirector,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Chair => "chair",
            RoleName::Secretary => "secr",
            RoleName::Editor => "editor",
            RoleName::TechAdvisor => "techadv",
            RoleName::AreaDirector => "ad",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "chair" => Some(RoleName::Chair),
            "secr" => Some(RoleName::Secretary),
            "editor" => Some(RoleName::Editor),
            "techadv" => Some(RoleName::TechAdvisor),
            "ad" => Some(RoleName::AreaDirector),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoleName::Chair => "Chair",
            RoleName::Secretary => "Secretary",
            RoleName::Editor => "Editor",
            RoleName::TechAdvisor => "Tech Advisor",
            RoleName::AreaDirector => "Area Director",
        }
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// What happened to a group, for the audit-event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupEventType {
    // core events
    Proposed,
    Started,
    Concluded,
    // misc group events
    AddedComment,
    InfoChanged,
}

impl GroupEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupEventType::Proposed => "proposed",
            GroupEventType::Started => "started",
            GroupEventType::Concluded => "concluded",
            GroupEventType::AddedComment => "added_comment",
            GroupEventType::InfoChanged => "info_changed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "proposed" => Some(GroupEventType::Proposed),
            "started" => Some(GroupEventType::Started),
            "concluded" => Some(GroupEventType::Concluded),
            "added_comment" => Some(GroupEventType::AddedComment),
            "info_changed" => Some(GroupEventType::InfoChanged),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GroupEventType::Proposed => "Proposed group",
            GroupEventType::Started => "Started group",
            GroupEventType::Concluded => "Concluded group",
            GroupEventType::AddedComment => "Added comment",
            GroupEventType::InfoChanged => "Changed group metadata",
        }
    }
}

impl std::fmt::Display for GroupEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
