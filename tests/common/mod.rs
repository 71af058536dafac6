use chrono::Utc;
use uuid::Uuid;

use split_core::core::services::{ExpenseDraft, ExpenseService, GroupDraft, GroupService};
use split_core::domain::{ExpenseCategory, User};
use split_core::ledger::Ledger;

pub const EPSILON: f64 = 1e-9;

/// A ledger with one group of three members, in registration order.
pub fn ledger_with_trio() -> (Ledger, Uuid, [Uuid; 3]) {
    let u1 = User::new("Rajesh Sharma", "rajesh@example.com");
    let u1_id = u1.id;
    let mut ledger = Ledger::new("Household", u1);
    let u2 = ledger.register_user(User::new("Priya Patel", "priya@example.com"));
    let u3 = ledger.register_user(User::new("Amit Kumar", "amit@example.com"));
    let group_id = GroupService::add(
        &mut ledger,
        GroupDraft {
            name: "Parivar".into(),
            description: "Family expenses".into(),
            color: "blue".into(),
            icon: "home".into(),
            creator: u1_id,
        },
    )
    .expect("create group");
    GroupService::add_member(&mut ledger, group_id, u2).expect("add second member");
    GroupService::add_member(&mut ledger, group_id, u3).expect("add third member");
    GroupService::set_active(&mut ledger, Some(group_id)).expect("activate group");
    (ledger, group_id, [u1_id, u2, u3])
}

pub fn log_expense(
    ledger: &mut Ledger,
    group_id: Uuid,
    title: &str,
    amount: f64,
    paid_by: Uuid,
    split_between: Vec<Uuid>,
) -> Uuid {
    ExpenseService::add(
        ledger,
        ExpenseDraft {
            group_id,
            title: title.into(),
            amount,
            category: ExpenseCategory::Food,
            paid_by,
            date: Utc::now(),
            split_between,
            notes: None,
            receipt: None,
        },
    )
    .expect("log expense")
}
