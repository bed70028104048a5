use super::page_handle::{PageHandle, to_js_error, to_json};
use crate::application::{AsyncDataSource, DataSource, PageController};
use crate::config::DashboardConfig;
use crate::domain::errors::AppError;
use crate::domain::listing::{SortDirection, SortSpec};
use crate::domain::logging::LogComponent;
use crate::domain::market::{
    AlertCondition, AssetId, MarketAsset, MarketFilter, MarketOverview, MarketSortField, PriceAlert,
    annotate_watchlist, top_assets, triggered_alerts,
};
use crate::domain::watchlist::{WatchlistStore, toggle_in_store, watchlist_message};
use crate::infrastructure::{LocalStorageWatchlistStore, MockMarketSource, Notifier, Toast, ToastNotifier};
use crate::{log_info, log_warn};
use js_sys::Promise;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Markets table: 25 assets, gainer/loser filters, sortable columns and a persisted watchlist.
#[wasm_bindgen]
pub struct MarketsPage {
    handle: PageHandle<MarketAsset>,
    store: Rc<RefCell<LocalStorageWatchlistStore>>,
    alerts: Vec<PriceAlert>,
}

#[wasm_bindgen]
impl MarketsPage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MarketsPage {
        Self::assemble(DashboardConfig::default())
    }

    /// Same as the constructor with a partial JSON config override.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<MarketsPage, JsValue> {
        DashboardConfig::from_json(json).map(Self::assemble).map_err(to_js_error)
    }

    pub fn refresh(&self) -> Promise {
        self.handle.refresh()
    }

    #[wasm_bindgen(js_name = startAutoRefresh)]
    pub fn start_auto_refresh(&mut self) {
        self.handle.start_auto_refresh();
    }

    #[wasm_bindgen(js_name = stopAutoRefresh)]
    pub fn stop_auto_refresh(&mut self) {
        self.handle.stop_auto_refresh();
    }

    #[wasm_bindgen(js_name = isAutoRefreshing)]
    pub fn is_auto_refreshing(&self) -> bool {
        self.handle.is_auto_refreshing()
    }

    /// `all`, `gainers` or `losers`; anything else shows all.
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&self, key: &str) {
        self.handle.set_filter(MarketFilter::from_key(key));
    }

    /// Column key such as `price` or `change_24h_desc`. Unknown keys are ignored.
    #[wasm_bindgen(js_name = setSort)]
    pub fn set_sort(&self, key: &str) -> bool {
        match SortSpec::<MarketSortField>::parse(key) {
            Some(sort) => {
                self.handle.controller().borrow_mut().set_sort(Some(sort));
                true
            }
            None => false,
        }
    }

    /// Header click: the same column again flips the direction, a new column starts ascending.
    #[wasm_bindgen(js_name = sortByColumn)]
    pub fn sort_by_column(&self, column: &str) -> bool {
        let Ok(field) = column.parse::<MarketSortField>() else {
            return false;
        };
        let mut controller = self.handle.controller().borrow_mut();
        let direction = match controller.view_state().sort {
            Some(current) if current.field == field && current.direction == SortDirection::Asc => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        controller.set_sort(Some(SortSpec::new(field, direction)));
        true
    }

    #[wasm_bindgen(js_name = setSearch)]
    pub fn set_search(&self, query: &str) {
        self.handle.set_query(query);
    }

    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&self, page: usize) -> usize {
        self.handle.go_to_page(page)
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&self) -> usize {
        self.handle.next_page()
    }

    #[wasm_bindgen(js_name = previousPage)]
    pub fn previous_page(&self) -> usize {
        self.handle.previous_page()
    }

    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> Result<String, JsValue> {
        self.handle.view_json()
    }

    #[wasm_bindgen(js_name = overviewJson)]
    pub fn overview_json(&self) -> Result<String, JsValue> {
        to_json(&MarketOverview::from_assets(self.handle.controller().borrow().collection()))
    }

    /// Leading assets in collection order, for the trending sidebar.
    #[wasm_bindgen(js_name = topAssetsJson)]
    pub fn top_assets_json(&self, count: usize) -> Result<String, JsValue> {
        to_json(&top_assets(self.handle.controller().borrow().collection(), count))
    }

    /// Stars or un-stars an asset and returns the new state. If the browser refuses the write,
    /// the row still flips and an error toast replaces the confirmation.
    #[wasm_bindgen(js_name = toggleWatchlist)]
    pub fn toggle_watchlist(&self, id: &str) -> bool {
        let id = AssetId::from(id);
        let mut controller = self.handle.controller().borrow_mut();
        let stored = toggle_in_store(&mut *self.store.borrow_mut(), &id);
        let watched = match &stored {
            Ok(watched) => *watched,
            Err(_) => !controller.find(&id).is_some_and(|asset| asset.is_watchlisted),
        };
        let name = match controller.find_mut(&id) {
            Some(asset) => {
                asset.is_watchlisted = watched;
                asset.name.clone()
            }
            None => id.to_string(),
        };
        drop(controller);

        match stored {
            Ok(_) => {
                if let Err(error) = self.handle.notifier().notify(Toast::success(watchlist_message(&name, watched))) {
                    log_warn!(LogComponent::Presentation("Markets"), "toast failed: {}", error);
                }
            }
            Err(error) => self.handle.notifier().notify_error(&error),
        }
        log_info!(LogComponent::Presentation("Markets"), "{} watchlisted: {}", id, watched);
        watched
    }

    /// `condition` is `above` or `below`.
    #[wasm_bindgen(js_name = addPriceAlert)]
    pub fn add_price_alert(&mut self, symbol: &str, condition: &str, price: f64) -> Result<(), JsValue> {
        let condition: AlertCondition = condition
            .trim()
            .to_lowercase()
            .parse()
            .map_err(|_| to_js_error(AppError::Validation(format!("Unknown alert condition: {}", condition))))?;
        if !price.is_finite() || price <= 0.0 {
            return Err(to_js_error(AppError::Validation(format!("Invalid alert price: {}", price))));
        }
        self.alerts.push(PriceAlert::new(symbol.trim(), condition, price));
        Ok(())
    }

    /// Shows a toast for every alert that currently holds; returns how many fired.
    #[wasm_bindgen(js_name = checkPriceAlerts)]
    pub fn check_price_alerts(&self) -> usize {
        let controller = self.handle.controller().borrow();
        let fired = triggered_alerts(&self.alerts, controller.collection());
        for (alert, asset) in &fired {
            if let Err(error) = self.handle.notifier().notify(Toast::success(alert.message(asset))) {
                log_warn!(LogComponent::Presentation("Markets"), "alert toast failed: {}", error);
            }
        }
        fired.len()
    }
}

impl MarketsPage {
    fn assemble(config: DashboardConfig) -> MarketsPage {
        let store = Rc::new(RefCell::new(LocalStorageWatchlistStore::new(config.watchlist_key.clone())));
        let feed_store = store.clone();
        let feed = MockMarketSource::browser().map_records(move |mut assets: Vec<MarketAsset>| {
            match feed_store.borrow().load() {
                Ok(watchlist) => annotate_watchlist(&mut assets, &watchlist),
                Err(error) => {
                    log_warn!(LogComponent::Presentation("Markets"), "watchlist unavailable: {}", error);
                }
            }
            assets
        });
        let source: Rc<RefCell<dyn AsyncDataSource<MarketAsset>>> = Rc::new(RefCell::new(feed));

        let controller = PageController::<MarketAsset>::new("Markets", config.page_size)
            .with_default_sort(SortSpec::asc(MarketSortField::Rank))
            .with_page_window(config.page_window);
        let notifier: Rc<dyn Notifier> = Rc::new(ToastNotifier::new(config.toast_duration_ms));

        MarketsPage {
            handle: PageHandle::new("Markets", controller, source, notifier, config.markets_refresh_ms),
            store,
            alerts: Vec::new(),
        }
    }
}

impl Default for MarketsPage {
    fn default() -> Self {
        Self::new()
    }
}
