use crate::errors::{Result, SplitError};
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use crate::storage::{ledger_warnings, StorageBackend};

/// Facade that coordinates the in-memory ledger with its persistence backend.
///
/// Presentation layers hold one of these: mutations go through the services
/// against [`current_mut`](Self::current_mut), then `save` hands the
/// resulting snapshot back to storage.
pub struct LedgerManager {
    current: Option<Ledger>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn current(&self) -> Option<&Ledger> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Ledger> {
        self.current.as_mut()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// Loads a named ledger and makes it current. Snapshots written by a
    /// newer schema are rejected; referential drift in the snapshot is
    /// logged, not fatal.
    pub fn load(&mut self, name: &str) -> Result<()> {
        let ledger = self.storage.load(name)?;
        self.ensure_schema_support(ledger.schema_version)?;
        for warning in ledger_warnings(&ledger) {
            tracing::warn!(ledger = name, "{warning}");
        }
        self.current = Some(ledger);
        self.current_name = Some(name.to_string());
        self.storage.record_last_ledger(Some(name))?;
        Ok(())
    }

    /// Persists the current ledger under its known name.
    pub fn save(&mut self) -> Result<()> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| SplitError::Storage("current ledger is unnamed".into()))?;
        let ledger = self
            .current
            .as_ref()
            .ok_or_else(|| SplitError::Storage("no ledger loaded".into()))?;
        self.storage.save(ledger, &name)
    }

    /// Persists the current ledger under a new name and adopts it.
    pub fn save_as(&mut self, name: &str) -> Result<()> {
        let ledger = self
            .current
            .as_ref()
            .ok_or_else(|| SplitError::Storage("no ledger loaded".into()))?;
        self.storage.save(ledger, name)?;
        self.current_name = Some(name.to_string());
        self.storage.record_last_ledger(Some(name))?;
        Ok(())
    }

    pub fn backup(&self, note: Option<&str>) -> Result<()> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| SplitError::Storage("current ledger is unnamed".into()))?;
        let ledger = self
            .current
            .as_ref()
            .ok_or_else(|| SplitError::Storage("no ledger loaded".into()))?;
        self.storage.backup(ledger, name, note)
    }

    pub fn last_opened(&self) -> Result<Option<String>> {
        self.storage.last_ledger()
    }

    pub fn set_current(&mut self, ledger: Ledger, name: Option<String>) {
        self.current = Some(ledger);
        self.current_name = name;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_name = None;
    }

    fn ensure_schema_support(&self, schema_version: u8) -> Result<()> {
        if schema_version > CURRENT_SCHEMA_VERSION {
            return Err(SplitError::Storage(format!(
                "ledger schema v{} is newer than supported v{}",
                schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::storage::JsonStorage;
    use std::fs;
    use tempfile::tempdir;

    fn manager_in(dir: &std::path::Path) -> LedgerManager {
        let store = JsonStorage::new(Some(dir.to_path_buf()), Some(3)).unwrap();
        LedgerManager::new(Box::new(store))
    }

    #[test]
    fn save_and_load_named_roundtrip() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());

        let ledger = Ledger::new("Demo", User::new("Rajesh Sharma", "rajesh@example.com"));
        manager.set_current(ledger, None);
        manager.save_as("demo-ledger").expect("save ledger");

        manager.clear();
        manager.load("demo-ledger").expect("load ledger");
        assert!(manager.current().is_some());
        assert_eq!(manager.current_name(), Some("demo-ledger"));
        assert_eq!(
            manager.last_opened().unwrap().as_deref(),
            Some("demo_ledger")
        );
    }

    #[test]
    fn rejects_future_schema_versions() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());

        let mut ledger = Ledger::new("Future", User::new("Rajesh Sharma", "rajesh@example.com"));
        ledger.schema_version = CURRENT_SCHEMA_VERSION + 5;
        let store = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();
        let path = store.ledger_path("future");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_string(&ledger).unwrap()).unwrap();

        let err = manager
            .load("future")
            .expect_err("load future schema should fail");
        match err {
            SplitError::Storage(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
