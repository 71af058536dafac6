pub mod common;
pub mod expense;
pub mod group;
pub mod user;

pub use common::{Displayable, Identifiable, NamedEntity};
pub use expense::{Expense, ExpenseCategory};
pub use group::{Group, GROUP_COLORS, GROUP_ICONS};
pub use user::User;
