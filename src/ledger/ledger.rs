use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Expense, Group, User};
use crate::errors::{Result, SplitError};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The authoritative in-memory collection of users, groups, and expenses.
///
/// Doubles as the persistence snapshot: saving a ledger captures the group
/// and expense collections, the user directory, the current user, and the
/// active group selection in one document.
///
/// The ledger exposes accessors and raw collection primitives; the validated
/// mutation contract lives in [`crate::core::services`], which is the only
/// path presentation layers should mutate through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    pub current_user: Uuid,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub active_group_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    /// Creates an empty ledger owned by `creator`, who becomes the current
    /// user and the first entry of the user directory.
    pub fn new(name: impl Into<String>, creator: User) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            current_user: creator.id,
            users: vec![creator],
            groups: Vec::new(),
            expenses: Vec::new(),
            active_group_id: None,
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn register_user(&mut self, user: User) -> Uuid {
        let id = user.id;
        self.users.push(user);
        self.touch();
        id
    }

    pub fn add_group(&mut self, group: Group) -> Uuid {
        let id = group.id;
        self.groups.push(group);
        self.touch();
        id
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn group_mut(&mut self, id: Uuid) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    /// Expenses scoped to one group, in insertion order.
    pub fn group_expenses(&self, group_id: Uuid) -> impl Iterator<Item = &Expense> {
        self.expenses
            .iter()
            .filter(move |expense| expense.group_id == group_id)
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        let expense = self.expenses.remove(index);
        self.touch();
        Some(expense)
    }

    /// Removes a group together with every expense scoped to it.
    ///
    /// The dependent expenses go first and the intermediate state is never
    /// observable: callers hold `&mut self` for the whole transition. When the
    /// removed group was the active selection, the selection falls back to the
    /// first remaining group, or to none.
    pub fn remove_group_cascade(&mut self, id: Uuid) -> Option<Group> {
        let index = self.groups.iter().position(|group| group.id == id)?;
        self.expenses.retain(|expense| expense.group_id != id);
        let group = self.groups.remove(index);
        if self.active_group_id == Some(id) {
            self.active_group_id = self.groups.first().map(|remaining| remaining.id);
        }
        self.touch();
        Some(group)
    }

    /// Checks every invariant an expense record must satisfy against the
    /// current collections. Leaves the ledger untouched.
    pub fn validate_expense(&self, expense: &Expense) -> Result<()> {
        if expense.title.trim().is_empty() {
            return Err(SplitError::Validation(
                "expense title must not be empty".into(),
            ));
        }
        if !expense.amount.is_finite() || expense.amount <= 0.0 {
            return Err(SplitError::Validation(format!(
                "expense amount must be positive, got {}",
                expense.amount
            )));
        }
        if expense.split_between.is_empty() {
            return Err(SplitError::Validation(
                "expense must be split between at least one member".into(),
            ));
        }
        let group = self.group(expense.group_id).ok_or_else(|| {
            SplitError::InvalidReference(format!(
                "expense references unknown group {}",
                expense.group_id
            ))
        })?;
        if !group.is_member(expense.paid_by) {
            return Err(SplitError::InvalidReference(format!(
                "payer {} is not a member of group `{}`",
                expense.paid_by, group.name
            )));
        }
        for participant in &expense.split_between {
            if !group.is_member(*participant) {
                return Err(SplitError::InvalidReference(format!(
                    "split participant {} is not a member of group `{}`",
                    participant, group.name
                )));
            }
        }
        Ok(())
    }

    /// Checks the structural invariants of a group record against the user
    /// directory. Leaves the ledger untouched.
    pub fn validate_group(&self, group: &Group) -> Result<()> {
        if group.name.trim().is_empty() {
            return Err(SplitError::Validation(
                "group name must not be empty".into(),
            ));
        }
        if group.members.is_empty() {
            return Err(SplitError::Validation(
                "group must keep at least one member".into(),
            ));
        }
        for member in &group.members {
            if self.user(*member).is_none() {
                return Err(SplitError::InvalidReference(format!(
                    "group member {} is not a registered user",
                    member
                )));
            }
        }
        if !group.members.contains(&group.leader_id) {
            return Err(SplitError::InvalidReference(format!(
                "group leader {} is not in the member list",
                group.leader_id
            )));
        }
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
