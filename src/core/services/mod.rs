//! The ledger mutation contract and read-side aggregation.
//!
//! Presentation layers go through these services for every mutation; the
//! services validate before committing, so the ledger's invariants hold at
//! every observable boundary.

pub mod expense_service;
pub mod group_service;
pub mod summary_service;

pub use expense_service::{ExpenseDraft, ExpenseService, ExpenseUpdate};
pub use group_service::{GroupDraft, GroupService, GroupUpdate};
pub use summary_service::{ExpenseHighlight, GroupSummary, MemberBalance, SummaryService};
