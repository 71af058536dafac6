pub mod json_backend;

use crate::errors::Result;
use crate::ledger::Ledger;

/// Abstraction over persistence backends capable of storing ledger snapshots.
///
/// The core hands a snapshot over after every mutation and reads one back on
/// startup; everything else about how bytes reach disk is the backend's
/// business.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Ledger>;
    fn backup(&self, ledger: &Ledger, name: &str, note: Option<&str>) -> Result<()>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Ledger>;
    fn last_ledger(&self) -> Result<Option<String>>;
    fn record_last_ledger(&self, name: Option<&str>) -> Result<()>;
}

pub use json_backend::{ledger_warnings, JsonStorage};
