use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A person who can belong to groups and take part in expense splits.
///
/// Users are shared, read-only reference data: the ledger's user directory is
/// the single source of truth and groups refer to their members by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    /// Attaches an avatar reference (URL or asset key).
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Uppercase initials used as an avatar fallback ("Priya Patel" -> "PP").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}

impl Identifiable for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for User {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for User {
    fn display_label(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_come_from_each_name_part() {
        let user = User::new("Priya Patel", "priya@example.com");
        assert_eq!(user.initials(), "PP");
        assert_eq!(user.display_label(), "Priya Patel <priya@example.com>");
        let mononym = User::new("Cher", "cher@example.com");
        assert_eq!(mononym.initials(), "C");
    }

    #[test]
    fn avatar_is_optional_and_skipped_when_absent() {
        let plain = User::new("Amit Kumar", "amit@example.com");
        let json = serde_json::to_string(&plain).unwrap();
        assert!(!json.contains("avatar"));
        let pictured = plain.clone().with_avatar("https://i.pravatar.cc/150?img=3");
        assert_eq!(
            pictured.avatar.as_deref(),
            Some("https://i.pravatar.cc/150?img=3")
        );
    }
}
