use crate::domain::errors::StorageResult;
use crate::domain::market::AssetId;
use serde::{Deserialize, Serialize};

pub const WATCHLIST_STORAGE_KEY: &str = "cryptoWatchlist";

/// Starred asset ids, in the order they were added, without duplicates.
/// Serialized as a plain JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist(Vec<AssetId>);

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.0.contains(id)
    }

    /// Returns `false` if the id was already present.
    pub fn insert(&mut self, id: AssetId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn remove(&mut self, id: &AssetId) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != id);
        before != self.0.len()
    }

    /// Flips membership and returns the new state.
    pub fn toggle(&mut self, id: &AssetId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.0.push(id.clone());
            true
        }
    }

    pub fn ids(&self) -> &[AssetId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AssetId> for Watchlist {
    fn from_iter<I: IntoIterator<Item = AssetId>>(iter: I) -> Self {
        let mut watchlist = Watchlist::new();
        for id in iter {
            watchlist.insert(id);
        }
        watchlist
    }
}

/// Persistent key-value home of the watchlist.
pub trait WatchlistStore {
    fn load(&self) -> StorageResult<Watchlist>;
    fn save(&mut self, watchlist: &Watchlist) -> StorageResult<()>;
}

/// Read-modify-write of one toggle. Returns the new membership of `id`.
pub fn toggle_in_store<S: WatchlistStore + ?Sized>(store: &mut S, id: &AssetId) -> StorageResult<bool> {
    let mut watchlist = store.load()?;
    let now_watched = watchlist.toggle(id);
    store.save(&watchlist)?;
    Ok(now_watched)
}

/// Confirmation shown after a toggle.
pub fn watchlist_message(name: &str, watched: bool) -> String {
    if watched {
        format!("{} added to watchlist", name)
    } else {
        format!("{} removed from watchlist", name)
    }
}
