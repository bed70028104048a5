use crate::domain::errors::{AppError, DataResult};
use crate::domain::listing::DEFAULT_PAGE_SIZE;
use crate::domain::watchlist::WATCHLIST_STORAGE_KEY;
use serde::{Deserialize, Serialize};

/// Tunables of the dashboard pages. Every field has a default, so a partial JSON override works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub page_size: usize,
    pub markets_refresh_ms: u32,
    pub news_refresh_ms: u32,
    pub portfolio_refresh_ms: u32,
    pub watchlist_key: String,
    pub toast_duration_ms: u32,
    /// Numbered pagination buttons shown at once.
    pub page_window: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            markets_refresh_ms: 30_000,
            news_refresh_ms: 60_000,
            portfolio_refresh_ms: 30_000,
            watchlist_key: WATCHLIST_STORAGE_KEY.to_string(),
            toast_duration_ms: 5_000,
            page_window: 5,
        }
    }
}

impl DashboardConfig {
    /// Parses a JSON override. Missing fields keep their defaults; a zero page size is rejected.
    pub fn from_json(json: &str) -> DataResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.page_size == 0 {
            return Err(AppError::Validation("pageSize must be at least 1".to_string()));
        }
        Ok(config)
    }
}
