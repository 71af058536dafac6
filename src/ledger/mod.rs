//! Ledger state container and balance computation.

pub mod balance;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
