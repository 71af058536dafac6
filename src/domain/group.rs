//! Domain types for expense-sharing groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Presentation color tags selectable when creating a group.
pub const GROUP_COLORS: [&str; 9] = [
    "blue", "green", "violet", "orange", "pink", "teal", "red", "yellow", "indigo",
];

/// Presentation icon tags selectable when creating a group.
pub const GROUP_ICONS: [&str; 9] = [
    "users",
    "home",
    "briefcase",
    "coffee",
    "heart",
    "plane",
    "car",
    "shopping-bag",
    "utensils",
];

/// A named collection of users sharing expenses, with one designated leader.
///
/// Members are stored as ids only; display data resolves through the ledger's
/// user directory. Invariant: `leader_id` appears in `members`, and every
/// member id refers to a registered user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub leader_id: Uuid,
    pub members: Vec<Uuid>,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates a group seeded with exactly the creator, who becomes leader.
    pub fn new(name: impl Into<String>, description: impl Into<String>, creator: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            leader_id: creator,
            members: vec![creator],
            color: GROUP_COLORS[0].into(),
            icon: GROUP_ICONS[0].into(),
            created_at: Utc::now(),
        }
    }

    /// Sets the presentation color and icon tags.
    pub fn with_style(mut self, color: impl Into<String>, icon: impl Into<String>) -> Self {
        self.color = color.into();
        self.icon = icon.into();
        self
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

impl Identifiable for Group {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Group {
    fn display_label(&self) -> String {
        format!("{} ({} members)", self.name, self.members.len())
    }
}
