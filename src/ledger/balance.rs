//! Balance and settlement computation over expense records.
//!
//! Everything here is a pure, order-independent reduction: no caching, no
//! mutation, recomputed from the expense set on demand. Amounts stay in full
//! `f64` precision; rounding belongs to presentation layers, and callers
//! comparing balances should use an epsilon rather than exact equality.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{Expense, Group};
use crate::errors::{Result, SplitError};

/// Each participant's equal share of one expense.
///
/// Callers going through the mutation contract never hold an expense with an
/// empty split, but the computation rejects one anyway rather than divide by
/// zero.
pub fn split_amount(expense: &Expense) -> Result<f64> {
    let participants = expense.split_between.len();
    if participants == 0 {
        return Err(SplitError::Validation(format!(
            "expense `{}` has no split participants",
            expense.title
        )));
    }
    Ok(expense.amount / participants as f64)
}

/// Sum of all expense amounts recorded against `group_id`, zero when none.
pub fn group_total<'a, I>(expenses: I, group_id: Uuid) -> f64
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .filter(|expense| expense.group_id == group_id)
        .map(|expense| expense.amount)
        .sum()
}

/// Signed net position of one user across a set of expenses.
///
/// Positive means the user is owed money, negative means they owe, zero means
/// settled. The payer is credited what the other participants owe them: their
/// own share counts against the credit only when they take part in the split
/// themselves. A non-payer participant is debited their share. The two
/// branches never both apply to the same expense.
pub fn user_balance<'a, I>(expenses: I, user_id: Uuid) -> Result<f64>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut balance = 0.0;
    for expense in expenses {
        let share = split_amount(expense)?;
        if expense.paid_by == user_id {
            let own_share = if expense.is_split_participant(user_id) {
                share
            } else {
                0.0
            };
            balance += expense.amount - own_share;
        } else if expense.is_split_participant(user_id) {
            balance -= share;
        }
    }
    Ok(balance)
}

/// Net balance per member of `group`, over the expenses scoped to it.
///
/// Members without any recorded activity report a zero balance. The values
/// always sum to zero (up to floating-point drift) because every credit to a
/// payer is matched by debits to the other participants.
pub fn group_balances<'a, I>(expenses: I, group: &Group) -> Result<HashMap<Uuid, f64>>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut balances: HashMap<Uuid, f64> =
        group.members.iter().map(|member| (*member, 0.0)).collect();
    for expense in expenses
        .into_iter()
        .filter(|expense| expense.group_id == group.id)
    {
        let share = split_amount(expense)?;
        if let Some(entry) = balances.get_mut(&expense.paid_by) {
            let own_share = if expense.is_split_participant(expense.paid_by) {
                share
            } else {
                0.0
            };
            *entry += expense.amount - own_share;
        }
        for participant in &expense.split_between {
            if *participant == expense.paid_by {
                continue;
            }
            if let Some(entry) = balances.get_mut(participant) {
                *entry -= share;
            }
        }
    }
    Ok(balances)
}
