//! Domain types for expense records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A single spend event attributed to a payer and divided among a subset of a
/// group's members.
///
/// Invariants (enforced by the mutation contract, not the constructor):
/// `amount > 0`, `group_id` names an existing group, `paid_by` and every id in
/// `split_between` are members of that group, and `split_between` is a
/// non-empty, duplicate-free set. The payer need not appear in the split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub paid_by: Uuid,
    pub date: DateTime<Utc>,
    pub split_between: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl Expense {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        group_id: Uuid,
        title: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        paid_by: Uuid,
        date: DateTime<Utc>,
        split_between: Vec<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            title: title.into(),
            amount,
            category,
            paid_by,
            date,
            split_between,
            notes: None,
            receipt: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_split_participant(&self, user_id: Uuid) -> bool {
        self.split_between.contains(&user_id)
    }

    /// True when the user either paid or owes a share of this expense.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.paid_by == user_id || self.is_split_participant(user_id)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({})", self.title, self.category)
    }
}

/// The fixed set of spending categories an expense can be filed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Utilities,
    Rent,
    Travel,
    Medical,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Utilities,
        ExpenseCategory::Rent,
        ExpenseCategory::Travel,
        ExpenseCategory::Medical,
        ExpenseCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food & Dining",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Medical => "Medical",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn category_serializes_to_its_wire_tag() {
        let json = serde_json::to_string(&ExpenseCategory::Food).unwrap();
        assert_eq!(json, "\"food\"");
        let parsed: ExpenseCategory = serde_json::from_str("\"utilities\"").unwrap();
        assert_eq!(parsed, ExpenseCategory::Utilities);
    }

    #[test]
    fn every_category_has_a_label() {
        for category in ExpenseCategory::ALL {
            assert!(!category.label().is_empty());
        }
    }

    #[test]
    fn involves_covers_payer_and_participants() {
        let (payer, participant, bystander) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let expense = Expense::new(
            Uuid::new_v4(),
            "Cab",
            330.0,
            ExpenseCategory::Transport,
            payer,
            chrono::Utc::now(),
            vec![participant],
        )
        .with_notes("airport drop");
        assert!(expense.involves(payer));
        assert!(expense.involves(participant));
        assert!(!expense.involves(bystander));
        assert!(!expense.is_split_participant(payer));
        assert_eq!(expense.notes.as_deref(), Some("airport drop"));
        assert_eq!(expense.display_label(), "Cab (Transport)");
    }
}
