//! Validated CRUD over expense records.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Expense, ExpenseCategory};
use crate::errors::{Result, SplitError};
use crate::ledger::Ledger;

/// Input for logging a new expense; the id is assigned on insert.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub group_id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub paid_by: Uuid,
    pub date: DateTime<Utc>,
    pub split_between: Vec<Uuid>,
    pub notes: Option<String>,
    pub receipt: Option<String>,
}

/// Partial update for an existing expense. `None` fields keep their current
/// value; the id cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub group_id: Option<Uuid>,
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
    pub paid_by: Option<Uuid>,
    pub date: Option<DateTime<Utc>>,
    pub split_between: Option<Vec<Uuid>>,
    pub notes: Option<String>,
    pub receipt: Option<String>,
}

/// Provides validated CRUD helpers for ledger expenses.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates the draft against every record invariant, assigns a fresh
    /// id, and appends the expense. Nothing is committed on failure.
    pub fn add(ledger: &mut Ledger, draft: ExpenseDraft) -> Result<Uuid> {
        let mut expense = Expense::new(
            draft.group_id,
            draft.title,
            draft.amount,
            draft.category,
            draft.paid_by,
            draft.date,
            normalize_split(draft.split_between),
        );
        expense.notes = draft.notes;
        expense.receipt = draft.receipt;
        ledger.validate_expense(&expense)?;
        Ok(ledger.add_expense(expense))
    }

    /// Merges `update` into a candidate copy, re-validates the whole record,
    /// then commits. A partial update can never leave the stored record in an
    /// invalid state.
    pub fn update(ledger: &mut Ledger, id: Uuid, update: ExpenseUpdate) -> Result<()> {
        let mut candidate = ledger
            .expense(id)
            .cloned()
            .ok_or(SplitError::ExpenseNotFound(id))?;
        if let Some(group_id) = update.group_id {
            candidate.group_id = group_id;
        }
        if let Some(title) = update.title {
            candidate.title = title;
        }
        if let Some(amount) = update.amount {
            candidate.amount = amount;
        }
        if let Some(category) = update.category {
            candidate.category = category;
        }
        if let Some(paid_by) = update.paid_by {
            candidate.paid_by = paid_by;
        }
        if let Some(date) = update.date {
            candidate.date = date;
        }
        if let Some(split_between) = update.split_between {
            candidate.split_between = normalize_split(split_between);
        }
        if let Some(notes) = update.notes {
            candidate.notes = Some(notes);
        }
        if let Some(receipt) = update.receipt {
            candidate.receipt = Some(receipt);
        }
        ledger.validate_expense(&candidate)?;
        let slot = ledger
            .expense_mut(id)
            .ok_or(SplitError::ExpenseNotFound(id))?;
        *slot = candidate;
        ledger.touch();
        Ok(())
    }

    /// Removes the expense, returning the removed record. Removing an absent
    /// expense is an error.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<Expense> {
        ledger
            .remove_expense(id)
            .ok_or(SplitError::ExpenseNotFound(id))
    }

    pub fn get(ledger: &Ledger, id: Uuid) -> Result<&Expense> {
        ledger.expense(id).ok_or(SplitError::ExpenseNotFound(id))
    }

    pub fn list(ledger: &Ledger) -> Vec<&Expense> {
        ledger.expenses.iter().collect()
    }

    pub fn list_for_group(ledger: &Ledger, group_id: Uuid) -> Vec<&Expense> {
        ledger.group_expenses(group_id).collect()
    }
}

/// Order-preserving dedupe: form layers submit split sets as lists, and a
/// double-tapped member must count once, not twice.
fn normalize_split(split: Vec<Uuid>) -> Vec<Uuid> {
    let mut unique = Vec::with_capacity(split.len());
    for participant in split {
        if !unique.contains(&participant) {
            unique.push(participant);
        }
    }
    unique
}
