//! Validated CRUD over ledger groups, including the cascade delete.

use uuid::Uuid;

use crate::domain::Group;
use crate::errors::{Result, SplitError};
use crate::ledger::Ledger;

/// Input for creating a group. The creator becomes the sole member and the
/// leader; id and creation timestamp are assigned on insert.
#[derive(Debug, Clone)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub creator: Uuid,
}

/// Partial update for an existing group. `None` fields keep their current
/// value; id and `created_at` cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub leader_id: Option<Uuid>,
    pub members: Option<Vec<Uuid>>,
}

/// Provides validated CRUD helpers for expense-sharing groups.
pub struct GroupService;

impl GroupService {
    /// Creates a group from the draft and returns its identifier.
    pub fn add(ledger: &mut Ledger, draft: GroupDraft) -> Result<Uuid> {
        let group = Group::new(draft.name, draft.description, draft.creator)
            .with_style(draft.color, draft.icon);
        ledger.validate_group(&group)?;
        Ok(ledger.add_group(group))
    }

    /// Merges `update` into the group, re-validating the merged record before
    /// committing. Membership changes must not orphan recorded expenses: a
    /// payer or split participant of an existing expense cannot leave.
    pub fn update(ledger: &mut Ledger, id: Uuid, update: GroupUpdate) -> Result<()> {
        let mut candidate = ledger
            .group(id)
            .cloned()
            .ok_or(SplitError::GroupNotFound(id))?;
        if let Some(name) = update.name {
            candidate.name = name;
        }
        if let Some(description) = update.description {
            candidate.description = description;
        }
        if let Some(color) = update.color {
            candidate.color = color;
        }
        if let Some(icon) = update.icon {
            candidate.icon = icon;
        }
        if let Some(leader_id) = update.leader_id {
            candidate.leader_id = leader_id;
        }
        if let Some(members) = update.members {
            candidate.members = dedupe(members);
        }
        ledger.validate_group(&candidate)?;
        for expense in ledger.group_expenses(id) {
            if !candidate.is_member(expense.paid_by) {
                return Err(SplitError::InvalidReference(format!(
                    "cannot drop member {}: they paid expense `{}`",
                    expense.paid_by, expense.title
                )));
            }
            for participant in &expense.split_between {
                if !candidate.is_member(*participant) {
                    return Err(SplitError::InvalidReference(format!(
                        "cannot drop member {}: they owe a share of `{}`",
                        participant, expense.title
                    )));
                }
            }
        }
        let slot = ledger.group_mut(id).ok_or(SplitError::GroupNotFound(id))?;
        *slot = candidate;
        ledger.touch();
        Ok(())
    }

    /// Adds a registered user to the group's member list. Re-adding an
    /// existing member is a no-op.
    pub fn add_member(ledger: &mut Ledger, group_id: Uuid, user_id: Uuid) -> Result<()> {
        if ledger.user(user_id).is_none() {
            return Err(SplitError::UserNotFound(user_id));
        }
        let group = ledger
            .group_mut(group_id)
            .ok_or(SplitError::GroupNotFound(group_id))?;
        if !group.is_member(user_id) {
            group.members.push(user_id);
            ledger.touch();
        }
        Ok(())
    }

    /// Removes the group and every expense scoped to it, returning the
    /// removed group. Removing an absent group is an error.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<Group> {
        ledger
            .remove_group_cascade(id)
            .ok_or(SplitError::GroupNotFound(id))
    }

    /// Switches the active group selection, or clears it with `None`.
    pub fn set_active(ledger: &mut Ledger, group_id: Option<Uuid>) -> Result<()> {
        if let Some(id) = group_id {
            if ledger.group(id).is_none() {
                return Err(SplitError::GroupNotFound(id));
            }
        }
        ledger.active_group_id = group_id;
        ledger.touch();
        Ok(())
    }

    pub fn get(ledger: &Ledger, id: Uuid) -> Result<&Group> {
        ledger.group(id).ok_or(SplitError::GroupNotFound(id))
    }

    pub fn list(ledger: &Ledger) -> Vec<&Group> {
        ledger.groups.iter().collect()
    }
}

fn dedupe(members: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = Vec::with_capacity(members.len());
    for member in members {
        if !seen.contains(&member) {
            seen.push(member);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::expense_service::{ExpenseDraft, ExpenseService};
    use crate::domain::{ExpenseCategory, User};
    use chrono::Utc;

    fn base_ledger() -> (Ledger, Uuid) {
        let creator = User::new("Rajesh Sharma", "rajesh@example.com");
        let creator_id = creator.id;
        (Ledger::new("Household", creator), creator_id)
    }

    fn draft(name: &str, creator: Uuid) -> GroupDraft {
        GroupDraft {
            name: name.into(),
            description: "Family expenses".into(),
            color: "blue".into(),
            icon: "home".into(),
            creator,
        }
    }

    #[test]
    fn add_seeds_creator_as_leader_and_sole_member() {
        let (mut ledger, creator) = base_ledger();
        let group_id = GroupService::add(&mut ledger, draft("Parivar", creator)).unwrap();
        let group = GroupService::get(&ledger, group_id).unwrap();
        assert_eq!(group.members, vec![creator]);
        assert_eq!(group.leader_id, creator);
    }

    #[test]
    fn add_rejects_blank_name() {
        let (mut ledger, creator) = base_ledger();
        let err = GroupService::add(&mut ledger, draft("   ", creator))
            .expect_err("blank name must fail");
        assert!(matches!(err, SplitError::Validation(_)));
        assert!(ledger.groups.is_empty(), "failed add must not commit");
    }

    #[test]
    fn add_rejects_unregistered_creator() {
        let (mut ledger, _) = base_ledger();
        let err = GroupService::add(&mut ledger, draft("Parivar", Uuid::new_v4()))
            .expect_err("unknown creator must fail");
        assert!(matches!(err, SplitError::InvalidReference(_)));
    }

    #[test]
    fn update_rejects_leader_outside_members() {
        let (mut ledger, creator) = base_ledger();
        let group_id = GroupService::add(&mut ledger, draft("Parivar", creator)).unwrap();
        let outsider = ledger.register_user(User::new("Priya Patel", "priya@example.com"));
        let err = GroupService::update(
            &mut ledger,
            group_id,
            GroupUpdate {
                leader_id: Some(outsider),
                ..GroupUpdate::default()
            },
        )
        .expect_err("leader must be a member");
        assert!(matches!(err, SplitError::InvalidReference(_)));
        let group = GroupService::get(&ledger, group_id).unwrap();
        assert_eq!(group.leader_id, creator, "failed update must not commit");
    }

    #[test]
    fn update_cannot_drop_member_with_recorded_expenses() {
        let (mut ledger, creator) = base_ledger();
        let group_id = GroupService::add(&mut ledger, draft("Parivar", creator)).unwrap();
        let priya = ledger.register_user(User::new("Priya Patel", "priya@example.com"));
        GroupService::add_member(&mut ledger, group_id, priya).unwrap();
        ExpenseService::add(
            &mut ledger,
            ExpenseDraft {
                group_id,
                title: "Groceries".into(),
                amount: 120.0,
                category: ExpenseCategory::Food,
                paid_by: creator,
                date: Utc::now(),
                split_between: vec![creator, priya],
                notes: None,
                receipt: None,
            },
        )
        .unwrap();

        let err = GroupService::update(
            &mut ledger,
            group_id,
            GroupUpdate {
                members: Some(vec![creator]),
                ..GroupUpdate::default()
            },
        )
        .expect_err("member with shares cannot leave");
        assert!(matches!(err, SplitError::InvalidReference(_)));
    }

    #[test]
    fn add_member_is_idempotent() {
        let (mut ledger, creator) = base_ledger();
        let group_id = GroupService::add(&mut ledger, draft("Parivar", creator)).unwrap();
        let priya = ledger.register_user(User::new("Priya Patel", "priya@example.com"));
        GroupService::add_member(&mut ledger, group_id, priya).unwrap();
        GroupService::add_member(&mut ledger, group_id, priya).unwrap();
        assert_eq!(GroupService::get(&ledger, group_id).unwrap().member_count(), 2);
    }

    #[test]
    fn add_member_rejects_unregistered_user() {
        let (mut ledger, creator) = base_ledger();
        let group_id = GroupService::add(&mut ledger, draft("Parivar", creator)).unwrap();
        let err = GroupService::add_member(&mut ledger, group_id, Uuid::new_v4())
            .expect_err("unregistered user cannot join");
        assert!(matches!(err, SplitError::UserNotFound(_)));
    }

    #[test]
    fn set_active_rejects_unknown_group() {
        let (mut ledger, _) = base_ledger();
        let err = GroupService::set_active(&mut ledger, Some(Uuid::new_v4()))
            .expect_err("unknown group cannot become active");
        assert!(matches!(err, SplitError::GroupNotFound(_)));
    }
}
