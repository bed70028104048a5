use crate::domain::errors::{AppError, StorageResult};
use crate::domain::logging::LogComponent;
use crate::domain::watchlist::{WATCHLIST_STORAGE_KEY, Watchlist, WatchlistStore};
use crate::log_warn;
use gloo::storage::{LocalStorage, Storage};

/// Decodes a stored watchlist. Unreadable JSON is treated as an empty list.
fn decode_watchlist(raw: &str) -> Watchlist {
    serde_json::from_str(raw).unwrap_or_else(|error| {
        log_warn!(
            LogComponent::Infrastructure("Watchlist"),
            "discarding unreadable stored watchlist: {}",
            error
        );
        Watchlist::new()
    })
}

/// Watchlist persisted in the browser's `localStorage` as a JSON array of asset ids.
pub struct LocalStorageWatchlistStore {
    key: String,
}

impl LocalStorageWatchlistStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for LocalStorageWatchlistStore {
    fn default() -> Self {
        Self::new(WATCHLIST_STORAGE_KEY)
    }
}

impl WatchlistStore for LocalStorageWatchlistStore {
    fn load(&self) -> StorageResult<Watchlist> {
        match LocalStorage::raw().get_item(&self.key) {
            Ok(Some(raw)) => Ok(decode_watchlist(&raw)),
            Ok(None) => Ok(Watchlist::new()),
            Err(error) => Err(AppError::Storage(format!("{:?}", error))),
        }
    }

    fn save(&mut self, watchlist: &Watchlist) -> StorageResult<()> {
        LocalStorage::set(&self.key, watchlist).map_err(|error| AppError::Storage(error.to_string()))
    }
}

/// In-process store holding the serialized form, for native tests and non-browser hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryWatchlistStore {
    raw: Option<String>,
    read_only: bool,
}

impl MemoryWatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already stored value, which need not be valid JSON.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Some(raw.into()), read_only: false }
    }

    /// Every save fails, like a full or disabled `localStorage`.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl WatchlistStore for MemoryWatchlistStore {
    fn load(&self) -> StorageResult<Watchlist> {
        Ok(self.raw.as_deref().map(decode_watchlist).unwrap_or_default())
    }

    fn save(&mut self, watchlist: &Watchlist) -> StorageResult<()> {
        if self.read_only {
            return Err(AppError::Storage("storage is read-only".to_string()));
        }
        self.raw = Some(serde_json::to_string(watchlist).map_err(|error| AppError::Storage(error.to_string()))?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::AssetId;
    use crate::domain::watchlist::toggle_in_store;

    #[test]
    fn corrupt_value_loads_as_empty() {
        let store = MemoryWatchlistStore::with_raw("{not json");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn toggles_persist_as_json_array() {
        let mut store = MemoryWatchlistStore::new();
        assert!(toggle_in_store(&mut store, &AssetId::from("bitcoin")).unwrap());
        assert!(toggle_in_store(&mut store, &AssetId::from("solana")).unwrap());
        assert_eq!(store.raw(), Some(r#"["bitcoin","solana"]"#));
        assert!(!toggle_in_store(&mut store, &AssetId::from("bitcoin")).unwrap());
        assert_eq!(store.raw(), Some(r#"["solana"]"#));
    }

    #[test]
    fn read_only_store_reports_storage_error() {
        let mut store = MemoryWatchlistStore::new().read_only();
        let result = toggle_in_store(&mut store, &AssetId::from("bitcoin"));
        assert!(matches!(result, Err(AppError::Storage(_))));
    }
}
