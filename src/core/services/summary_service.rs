//! Read-side aggregation: group totals and per-member balance views.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, SplitError};
use crate::ledger::{balance, Ledger};

/// One member's net position within a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberBalance {
    pub user_id: Uuid,
    pub name: String,
    pub balance: f64,
}

/// The single largest expense recorded against a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseHighlight {
    pub expense_id: Uuid,
    pub title: String,
    pub amount: f64,
}

/// Aggregated view of one group: totals plus per-member balances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupSummary {
    pub group_id: Uuid,
    pub name: String,
    pub total_spent: f64,
    pub expense_count: usize,
    pub member_count: usize,
    pub average_per_member: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_expense: Option<ExpenseHighlight>,
    pub balances: Vec<MemberBalance>,
}

pub struct SummaryService;

impl SummaryService {
    /// Recomputes the group's aggregate view from the full expense set.
    pub fn summarize_group(ledger: &Ledger, group_id: Uuid) -> Result<GroupSummary> {
        let group = ledger
            .group(group_id)
            .ok_or(SplitError::GroupNotFound(group_id))?;
        let total_spent = balance::group_total(&ledger.expenses, group_id);
        let expense_count = ledger.group_expenses(group_id).count();
        let member_count = group.member_count();
        let average_per_member = if member_count > 0 {
            total_spent / member_count as f64
        } else {
            0.0
        };
        let highest_expense = ledger
            .group_expenses(group_id)
            .max_by(|a, b| a.amount.total_cmp(&b.amount))
            .map(|expense| ExpenseHighlight {
                expense_id: expense.id,
                title: expense.title.clone(),
                amount: expense.amount,
            });
        let mut net = balance::group_balances(&ledger.expenses, group)?;
        let balances = group
            .members
            .iter()
            .map(|member| MemberBalance {
                user_id: *member,
                name: ledger
                    .user(*member)
                    .map(|user| user.name.clone())
                    .unwrap_or_else(|| "Unknown".into()),
                balance: net.remove(member).unwrap_or(0.0),
            })
            .collect();
        Ok(GroupSummary {
            group_id,
            name: group.name.clone(),
            total_spent,
            expense_count,
            member_count,
            average_per_member,
            highest_expense,
            balances,
        })
    }

    /// Net position of one user over a single group's expenses.
    pub fn user_balance_in_group(ledger: &Ledger, group_id: Uuid, user_id: Uuid) -> Result<f64> {
        if ledger.group(group_id).is_none() {
            return Err(SplitError::GroupNotFound(group_id));
        }
        balance::user_balance(ledger.group_expenses(group_id), user_id)
    }
}
